//! Entry form controller
//!
//! Owns the draft being edited and the optional editing target. The target's
//! presence alone decides whether a submit creates or updates an entry.

use crate::catalog;
use crate::error::{AppError, Result};
use crate::gateway::{EntryDraft, EntryGateway, EntryId, MoodEntry};
use crate::services::EntryStore;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Snapshot of the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormState {
    pub draft: EntryDraft,
    /// Entry being edited; `None` means the draft is a new entry
    pub editing: Option<EntryId>,
}

/// What a successful submit did
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(MoodEntry),
    Updated {
        id: EntryId,
        entry: Option<MoodEntry>,
    },
}

/// Clears the busy flag however the submit ends
struct SubmitGuard<'a>(&'a AtomicBool);

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Controller for creating and editing entries
pub struct EntryFormController {
    gateway: Arc<dyn EntryGateway>,
    store: Arc<EntryStore>,
    state: Mutex<FormState>,
    submitting: AtomicBool,
}

impl EntryFormController {
    pub fn new(gateway: Arc<dyn EntryGateway>, store: Arc<EntryStore>) -> Self {
        Self {
            gateway,
            store,
            state: Mutex::new(FormState::default()),
            submitting: AtomicBool::new(false),
        }
    }

    pub async fn state(&self) -> FormState {
        self.state.lock().await.clone()
    }

    pub async fn draft(&self) -> EntryDraft {
        self.state.lock().await.draft.clone()
    }

    pub async fn editing_target(&self) -> Option<EntryId> {
        self.state.lock().await.editing
    }

    pub async fn is_editing(&self) -> bool {
        self.editing_target().await.is_some()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Pick a mood from the catalog; its color comes along with it
    pub async fn select_mood(&self, key: &str) -> Result<()> {
        let option = catalog::find(key).ok_or_else(|| AppError::UnknownMood(key.to_string()))?;

        let mut state = self.state.lock().await;
        state.draft.mood = option.key.to_string();
        state.draft.color = option.color.to_string();

        Ok(())
    }

    pub async fn set_note(&self, note: impl Into<String>) {
        self.state.lock().await.draft.note = note.into();
    }

    /// Load an existing entry into the form
    pub async fn begin_edit(&self, entry: &MoodEntry) {
        tracing::debug!("Editing mood entry: {}", entry.id);

        let mut state = self.state.lock().await;
        state.draft = EntryDraft::from_entry(entry);
        state.editing = Some(entry.id);
    }

    /// Discard the draft and leave edit mode
    pub async fn cancel(&self) {
        *self.state.lock().await = FormState::default();
    }

    /// Save the draft, then refresh the entry list.
    ///
    /// On failure the draft and editing target are left as they were and no
    /// refresh happens. Only one submit runs at a time.
    pub async fn submit(&self) -> Result<SubmitOutcome> {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("Ignoring submit while a save is in flight");
            return Err(AppError::SubmissionInProgress);
        }
        let _guard = SubmitGuard(&self.submitting);

        let FormState { draft, editing } = self.state().await;

        let result = match editing {
            Some(id) => {
                tracing::info!("Updating mood entry: {}", id);
                self.gateway
                    .update_entry(id, &draft)
                    .await
                    .map(|entry| SubmitOutcome::Updated { id, entry })
            }
            None => {
                tracing::info!("Creating new mood entry: {}", draft.mood);
                self.gateway
                    .create_entry(&draft)
                    .await
                    .map(SubmitOutcome::Created)
            }
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Error saving mood: {}", e);
                return Err(e);
            }
        };

        self.cancel().await;

        if self.store.refresh().await.is_err() {
            tracing::debug!("Entry list not refreshed after save");
        }

        Ok(outcome)
    }
}
