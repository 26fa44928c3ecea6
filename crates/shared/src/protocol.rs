use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JSON body returned by `POST /user/<entity>/delete/<id>`. The server
/// answers 400 with `success: false` when a delete is blocked by linked
/// records, so callers must parse the body regardless of status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Severity of a transient dismissible banner. Values map onto the UI
/// toolkit's alert classes (`alert-success`, `alert-danger`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
    Success,
    Danger,
}

impl BannerKind {
    pub fn css_class(self) -> &'static str {
        match self {
            BannerKind::Success => "success",
            BannerKind::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    pub shown_at: DateTime<Utc>,
}

impl Banner {
    pub fn new(kind: BannerKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            shown_at: Utc::now(),
        }
    }
}
