//! Persistence strategies. A controller holds exactly one backend, chosen
//! at construction; there is no per-call-path mode sniffing.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use shared::{domain::EntityKind, protocol::DeleteResponse};
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceMode {
    /// All mutations stay in memory; form submits are intercepted locally.
    FrontendOnly,
    /// Deletes go to the server; create/edit submits pass through as a
    /// normal full-page form post and are never applied locally.
    ServerBacked,
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("seed payload was not a record array: {0}")]
    InvalidSeed(#[from] serde_json::Error),
}

#[async_trait]
pub trait PersistenceBackend: Send + Sync {
    fn mode(&self) -> PersistenceMode;

    /// Requests removal of one record. The frontend-only strategy always
    /// confirms; the server-backed strategy reports the server's verdict.
    async fn delete(&self, entity: EntityKind, id: i64) -> Result<DeleteResponse, BackendError>;

    /// Initial dataset for the store, as a raw JSON array. Used only when
    /// no snapshot was injected at load time.
    async fn fetch_seed(&self, entity: EntityKind) -> Result<serde_json::Value, BackendError>;
}

/// Frontend-only strategy: memory is the source of truth, optionally
/// seeded with canned records.
#[derive(Default)]
pub struct MemoryBackend {
    seed: Option<serde_json::Value>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed<R: Serialize>(records: &[R]) -> Self {
        Self {
            seed: Some(json!(records)),
        }
    }
}

#[async_trait]
impl PersistenceBackend for MemoryBackend {
    fn mode(&self) -> PersistenceMode {
        PersistenceMode::FrontendOnly
    }

    async fn delete(&self, _entity: EntityKind, _id: i64) -> Result<DeleteResponse, BackendError> {
        Ok(DeleteResponse {
            success: true,
            message: None,
        })
    }

    async fn fetch_seed(&self, _entity: EntityKind) -> Result<serde_json::Value, BackendError> {
        Ok(self.seed.clone().unwrap_or_else(|| json!([])))
    }
}

/// Server-backed strategy over the admin app's HTTP surface.
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: Url,
    csrf_token: String,
}

impl HttpBackend {
    /// `csrf_token` is the value of the page's hidden `csrf_token` input,
    /// consumed as an opaque string.
    pub fn new(base_url: &str, csrf_token: impl Into<String>) -> Result<Self, url::ParseError> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: Url::parse(base_url)?,
            csrf_token: csrf_token.into(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.as_str().trim_end_matches('/'))
    }
}

#[async_trait]
impl PersistenceBackend for HttpBackend {
    fn mode(&self) -> PersistenceMode {
        PersistenceMode::ServerBacked
    }

    async fn delete(&self, entity: EntityKind, id: i64) -> Result<DeleteResponse, BackendError> {
        let url = self.endpoint(&format!("/user/{}/delete/{id}", entity.path_segment()));
        let response = self
            .http
            .post(&url)
            .header("X-CSRFToken", &self.csrf_token)
            .send()
            .await?;
        // Blocked deletes come back as 400 with a success:false body, so
        // the body is parsed before any status check.
        Ok(response.json::<DeleteResponse>().await?)
    }

    async fn fetch_seed(&self, entity: EntityKind) -> Result<serde_json::Value, BackendError> {
        let url = self.endpoint(&format!("/static/data/{}.json", entity.path_segment()));
        let value = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;
        Ok(value)
    }
}
