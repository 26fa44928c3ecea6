//! Generic client-side table controller for the campus admin app.
//!
//! One [`TableController`] instance manages one entity table: it owns the
//! in-memory record list, derives a filtered/paginated view, renders row
//! and pagination markup, bridges records through the modal form, and
//! routes edit/delete actions through an explicit interaction state
//! machine. Persistence is a strategy chosen once at construction.

use std::sync::Arc;

use shared::error::{ApiError, ErrorCode};
use shared::protocol::{Banner, BannerKind};
use tokio::sync::{broadcast, Mutex};
use tracing::{error, warn};

pub mod backend;
pub mod form;
pub mod record;
pub mod view;

pub use backend::{
    BackendError, HttpBackend, MemoryBackend, PersistenceBackend, PersistenceMode,
};
pub use form::{FormError, FormValues};
pub use record::TableRecord;
pub use view::{Pager, DEFAULT_PAGE_SIZE};

/// Notifications for the host UI layer. The controller never touches the
/// page itself; subscribers re-render, open/close the modal, and show
/// banners in response.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// The visible table (and pagination, when enabled) is stale.
    ViewChanged,
    ModalOpened,
    ModalClosed,
    /// Transient dismissible alert.
    BannerShown(Banner),
    /// Server-backed submit: the form post proceeds as a normal full-page
    /// round trip; nothing was applied locally.
    SubmitPassedThrough,
    Error(ApiError),
}

/// Per-table interaction state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Idle,
    /// Modal open. `id` is `None` for a create, the tracked record id for
    /// an edit.
    Editing { id: Option<i64> },
    /// Delete clicked, confirmation prompt showing.
    ConfirmPending { id: i64 },
    /// Confirmed delete in flight against the backend.
    AwaitingResponse { id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Frontend-only mode: the store was mutated and the view refreshed.
    Applied,
    /// Server-backed mode: submission passes through to the server.
    DeferredToServer,
}

struct ControllerState<R> {
    records: Vec<R>,
    query: String,
    pager: Option<Pager>,
    interaction: Interaction,
}

pub struct TableController<R: TableRecord> {
    backend: Arc<dyn PersistenceBackend>,
    inner: Mutex<ControllerState<R>>,
    events: broadcast::Sender<ClientEvent>,
}

impl<R: TableRecord> TableController<R> {
    /// Controller without pagination (colleges, programs).
    pub fn new(backend: Arc<dyn PersistenceBackend>) -> Arc<Self> {
        Self::build(backend, None)
    }

    /// Controller with a fixed page size (students use
    /// [`DEFAULT_PAGE_SIZE`]).
    pub fn with_pagination(backend: Arc<dyn PersistenceBackend>, page_size: usize) -> Arc<Self> {
        Self::build(backend, Some(Pager::new(page_size)))
    }

    fn build(backend: Arc<dyn PersistenceBackend>, pager: Option<Pager>) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            backend,
            inner: Mutex::new(ControllerState {
                records: Vec::new(),
                query: String::new(),
                pager,
                interaction: Interaction::Idle,
            }),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    pub fn mode(&self) -> PersistenceMode {
        self.backend.mode()
    }

    /// Populates the store, preferring an injected snapshot over a seed
    /// fetch. Fetch failures degrade to an empty list and are logged —
    /// load never fails.
    pub async fn load(&self, snapshot: Option<Vec<R>>) {
        let records = match snapshot {
            Some(list) => list,
            None => match self.backend.fetch_seed(R::ENTITY).await {
                Ok(value) => match serde_json::from_value::<Vec<R>>(value) {
                    Ok(list) => list,
                    Err(err) => {
                        error!(
                            entity = R::ENTITY.label(),
                            "seed payload was not a record array: {err}"
                        );
                        Vec::new()
                    }
                },
                Err(err) => {
                    error!(entity = R::ENTITY.label(), "failed to fetch seed: {err}");
                    Vec::new()
                }
            },
        };

        let mut state = self.inner.lock().await;
        state.records = records;
        assign_missing_ids(&mut state.records);
        state.query.clear();
        if let Some(pager) = state.pager.as_mut() {
            pager.reset();
        }
        state.interaction = Interaction::Idle;
        drop(state);
        let _ = self.events.send(ClientEvent::ViewChanged);
    }

    pub async fn records(&self) -> Vec<R> {
        self.inner.lock().await.records.clone()
    }

    pub async fn interaction(&self) -> Interaction {
        self.inner.lock().await.interaction
    }

    pub async fn current_page(&self) -> Option<usize> {
        self.inner.lock().await.pager.as_ref().map(Pager::current)
    }

    /// Applies a new search query. Always resets to page 1.
    pub async fn set_query(&self, query: impl Into<String>) {
        let mut state = self.inner.lock().await;
        state.query = query.into();
        if let Some(pager) = state.pager.as_mut() {
            pager.reset();
        }
        drop(state);
        let _ = self.events.send(ClientEvent::ViewChanged);
    }

    /// Jumps to a page, clamped into the valid range for the current
    /// filtered view. No-op for unpaginated tables.
    pub async fn set_page(&self, page: usize) {
        let mut state = self.inner.lock().await;
        let filtered_len = view::filter_records(&state.records, &state.query).len();
        if let Some(pager) = state.pager.as_mut() {
            pager.set_page(page, filtered_len);
            drop(state);
            let _ = self.events.send(ClientEvent::ViewChanged);
        }
    }

    /// Row markup for the current filtered, paginated view.
    pub async fn render_table(&self) -> String {
        let state = self.inner.lock().await;
        let filtered = view::filter_records(&state.records, &state.query);
        let slice = match state.pager.as_ref() {
            Some(pager) => {
                let (start, end) = pager.slice_bounds(filtered.len());
                &filtered[start..end]
            }
            None => &filtered[..],
        };
        view::render_rows(slice)
    }

    /// Pagination markup, or `None` for unpaginated tables.
    pub async fn render_pagination(&self) -> Option<String> {
        let state = self.inner.lock().await;
        let pager = state.pager.as_ref()?;
        let filtered_len = view::filter_records(&state.records, &state.query).len();
        Some(view::render_pagination(pager, filtered_len))
    }

    /// Opens the modal for a new record; every form field starts blank.
    pub async fn begin_create(&self) -> FormValues {
        let mut state = self.inner.lock().await;
        state.interaction = Interaction::Editing { id: None };
        drop(state);
        let _ = self.events.send(ClientEvent::ModalOpened);
        R::form_fields()
            .iter()
            .map(|field| (*field, ""))
            .collect()
    }

    /// Opens the modal pre-filled from the record with the given id.
    /// Returns `None` when the id no longer exists (stale render).
    pub async fn begin_edit(&self, id: i64) -> Option<FormValues> {
        let mut state = self.inner.lock().await;
        let Some(record) = state.records.iter().find(|r| r.id() == Some(id)) else {
            warn!(entity = R::ENTITY.label(), id, "edit target not found");
            return None;
        };
        let values = record.to_form();
        state.interaction = Interaction::Editing { id: Some(id) };
        drop(state);
        let _ = self.events.send(ClientEvent::ModalOpened);
        Some(values)
    }

    /// Cancels whatever the modal or confirmation prompt was doing.
    pub async fn cancel(&self) {
        let mut state = self.inner.lock().await;
        let was_modal = matches!(state.interaction, Interaction::Editing { .. });
        state.interaction = Interaction::Idle;
        drop(state);
        if was_modal {
            let _ = self.events.send(ClientEvent::ModalClosed);
        }
    }

    /// Handles the modal form submit according to the persistence mode.
    ///
    /// Frontend-only: validates, then creates (synthesizing
    /// `max(ids) + 1`) or updates the tracked record, merging fields the
    /// form did not carry. Server-backed: never intercepts — the post
    /// proceeds to the server and the local list is left alone.
    pub async fn submit_form(&self, values: &FormValues) -> Result<SubmitOutcome, FormError> {
        if self.backend.mode() == PersistenceMode::ServerBacked {
            let mut state = self.inner.lock().await;
            state.interaction = Interaction::Idle;
            drop(state);
            let _ = self.events.send(ClientEvent::SubmitPassedThrough);
            return Ok(SubmitOutcome::DeferredToServer);
        }

        form::validate_required(values, R::required_fields())?;

        let mut state = self.inner.lock().await;
        match state.interaction {
            Interaction::Editing { id: Some(id) } => {
                let Some(record) = state.records.iter_mut().find(|r| r.id() == Some(id)) else {
                    state.interaction = Interaction::Idle;
                    warn!(entity = R::ENTITY.label(), id, "edit target vanished");
                    return Err(FormError::MissingField("id"));
                };
                record.apply_form(values)?;
            }
            _ => {
                let mut record = R::from_form(values)?;
                if record.id().is_none() {
                    record.set_id(next_id(&state.records));
                }
                if R::prepend_new() {
                    state.records.insert(0, record);
                } else {
                    state.records.push(record);
                }
            }
        }
        state.interaction = Interaction::Idle;
        drop(state);

        let _ = self.events.send(ClientEvent::ModalClosed);
        let _ = self.events.send(ClientEvent::ViewChanged);
        Ok(SubmitOutcome::Applied)
    }

    /// Starts a delete: returns the confirmation prompt for the record,
    /// or `None` when the id is gone or a delete is already in flight.
    pub async fn begin_delete(&self, id: i64) -> Option<String> {
        let mut state = self.inner.lock().await;
        if matches!(state.interaction, Interaction::AwaitingResponse { .. }) {
            warn!(entity = R::ENTITY.label(), id, "delete already in flight");
            return None;
        }
        let record = state.records.iter().find(|r| r.id() == Some(id))?;
        let prompt = format!("Delete {} {}?", R::ENTITY.label(), record.display_name());
        state.interaction = Interaction::ConfirmPending { id };
        Some(prompt)
    }

    /// Executes a confirmed delete. Returns whether a record was removed.
    ///
    /// Frontend-only removals are immediate. Server-backed removals apply
    /// locally only after a `success: true` response; failures and
    /// transport errors leave the list untouched and surface a banner.
    pub async fn confirm_delete(&self) -> bool {
        let id = {
            let mut state = self.inner.lock().await;
            let Interaction::ConfirmPending { id } = state.interaction else {
                return false;
            };
            state.interaction = Interaction::AwaitingResponse { id };
            id
        };

        let outcome = self.backend.delete(R::ENTITY, id).await;
        let server_backed = self.backend.mode() == PersistenceMode::ServerBacked;
        let label = R::ENTITY.label();

        let mut state = self.inner.lock().await;
        state.interaction = Interaction::Idle;
        match outcome {
            Ok(response) if response.success => {
                let before = state.records.len();
                state.records.retain(|r| r.id() != Some(id));
                let removed = state.records.len() != before;
                let filtered_len = view::filter_records(&state.records, &state.query).len();
                if let Some(pager) = state.pager.as_mut() {
                    pager.clamp(filtered_len);
                }
                drop(state);
                let _ = self.events.send(ClientEvent::ViewChanged);
                if server_backed {
                    let message = response
                        .message
                        .unwrap_or_else(|| format!("{} deleted", capitalize(label)));
                    let _ = self
                        .events
                        .send(ClientEvent::BannerShown(Banner::new(
                            BannerKind::Success,
                            message,
                        )));
                }
                removed
            }
            Ok(response) => {
                drop(state);
                let message = response
                    .message
                    .unwrap_or_else(|| format!("Failed to delete {label}"));
                let _ = self
                    .events
                    .send(ClientEvent::BannerShown(Banner::new(
                        BannerKind::Danger,
                        message,
                    )));
                false
            }
            Err(err) => {
                drop(state);
                error!(entity = label, id, "delete request failed: {err}");
                let _ = self
                    .events
                    .send(ClientEvent::BannerShown(Banner::new(
                        BannerKind::Danger,
                        format!("Failed to delete {label}"),
                    )));
                let _ = self.events.send(ClientEvent::Error(ApiError::new(
                    ErrorCode::Network,
                    err.to_string(),
                )));
                false
            }
        }
    }
}

fn next_id<R: TableRecord>(records: &[R]) -> i64 {
    records.iter().filter_map(TableRecord::id).max().unwrap_or(0) + 1
}

/// Records arriving without ids (frontend-only sample data) get stable
/// synthesized ones so row actions never fall back to positional indexes.
fn assign_missing_ids<R: TableRecord>(records: &mut [R]) {
    let mut next = records.iter().filter_map(TableRecord::id).max().unwrap_or(0);
    for record in records.iter_mut() {
        if record.id().is_none() {
            next += 1;
            record.set_id(next);
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
