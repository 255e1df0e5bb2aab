//! Application state and initialization
//!
//! This module wires the client components together. All of them share one
//! gateway and are made available through AppState.

use crate::error::Result;
use crate::gateway::{EntryGateway, EntryId, HttpGateway};
use crate::services::{AnalysisController, ClientSettings, EntryFormController, EntryStore};
use std::sync::Arc;

/// Central application state holding all components
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn EntryGateway>,
    pub entries: Arc<EntryStore>,
    pub form: Arc<EntryFormController>,
    pub analysis: Arc<AnalysisController>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn EntryGateway>, settings: &ClientSettings) -> Self {
        let entries = Arc::new(EntryStore::new(gateway.clone()));
        let form = Arc::new(EntryFormController::new(gateway.clone(), entries.clone()));
        let analysis = Arc::new(AnalysisController::with_fallback_label(
            gateway.clone(),
            settings.fallback_model_label.clone(),
        ));

        Self {
            gateway,
            entries,
            form,
            analysis,
        }
    }

    /// Build the state over the REST API named in `settings`.
    ///
    /// Settings are validated first, so hand-built values get the same URL
    /// normalization, timeout clamp and label fallback as loaded ones.
    pub fn connect(settings: &ClientSettings) -> Result<Self> {
        let settings = settings.clone().validated()?;
        let gateway = HttpGateway::from_settings(&settings)?;
        tracing::info!(
            "Connecting to journal API at {} (timeout {:?})",
            gateway.base_url(),
            gateway.timeout()
        );
        Ok(Self::new(Arc::new(gateway), &settings))
    }

    /// Initial load of the entry list
    pub async fn mount(&self) -> Result<()> {
        self.entries.refresh().await
    }

    /// Delete an entry remotely, then refresh the list.
    ///
    /// If the entry is the one being edited the form is reset first, so a
    /// later submit cannot target a deleted id.
    pub async fn delete_entry(&self, id: EntryId) -> Result<()> {
        tracing::info!("Deleting mood entry: {}", id);

        if let Err(e) = self.gateway.delete_entry(id).await {
            tracing::warn!("Error deleting mood: {}", e);
            return Err(e);
        }

        if self.form.editing_target().await == Some(id) {
            tracing::debug!("Deleted entry {} was being edited, resetting form", id);
            self.form.cancel().await;
        }

        if self.entries.refresh().await.is_err() {
            tracing::debug!("Entry list not refreshed after delete");
        }

        Ok(())
    }

    /// Whether the insight action should be enabled
    pub async fn can_request_analysis(&self) -> bool {
        !self.entries.is_empty().await && !self.analysis.is_pending().await
    }
}

/// Application setup - called once on startup.
///
/// A failed initial load is not fatal: the list simply starts empty.
pub async fn setup(settings: &ClientSettings) -> Result<AppState> {
    tracing::info!("Initializing application");

    let state = AppState::connect(settings)?;

    match state.mount().await {
        Ok(()) => {
            let count = state.entries.len().await;
            tracing::info!("Loaded {} mood entries", count);
        }
        Err(e) => tracing::warn!("Starting with an empty journal: {}", e),
    }

    tracing::info!("Application initialized successfully");

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::fake::{sample_entry, Call, FakeGateway, Op};

    fn create_test_state(entries: Vec<crate::gateway::MoodEntry>) -> (Arc<FakeGateway>, AppState) {
        let fake = Arc::new(FakeGateway::with_entries(entries));
        let state = AppState::new(fake.clone(), &ClientSettings::default());
        (fake, state)
    }

    #[tokio::test]
    async fn test_empty_journal_disables_analysis() {
        let (_fake, state) = create_test_state(Vec::new());

        state.mount().await.unwrap();

        assert!(state.entries.list().await.is_empty());
        assert!(!state.can_request_analysis().await);
    }

    #[tokio::test]
    async fn test_analysis_enabled_once_entries_exist() {
        let (_fake, state) = create_test_state(Vec::new());
        state.mount().await.unwrap();

        state.form.select_mood("calm").await.unwrap();
        state.form.submit().await.unwrap();

        assert_eq!(state.entries.len().await, 1);
        assert!(state.can_request_analysis().await);
    }

    #[tokio::test]
    async fn test_delete_refreshes_once() {
        let (fake, state) = create_test_state(vec![
            sample_entry(2, "sad", ""),
            sample_entry(1, "happy", ""),
        ]);
        state.mount().await.unwrap();

        state.delete_entry(2).await.unwrap();

        assert_eq!(fake.calls(), vec![Call::List, Call::Delete(2), Call::List]);
        assert_eq!(state.entries.list().await, fake.entries());
        assert_eq!(state.entries.len().await, 1);
    }

    #[tokio::test]
    async fn test_failed_delete_skips_refresh() {
        let (fake, state) = create_test_state(vec![sample_entry(1, "happy", "")]);
        state.mount().await.unwrap();
        fake.fail(Op::Delete);

        assert!(state.delete_entry(1).await.is_err());

        assert_eq!(fake.count(Op::List), 1);
        assert_eq!(state.entries.len().await, 1);
    }

    #[tokio::test]
    async fn test_deleting_edited_entry_resets_form() {
        let entry = sample_entry(3, "angry", "traffic");
        let (fake, state) = create_test_state(vec![entry.clone()]);
        state.mount().await.unwrap();

        state.form.begin_edit(&entry).await;
        state.delete_entry(3).await.unwrap();
        state.form.submit().await.unwrap();

        assert_eq!(state.form.editing_target().await, None);
        assert_eq!(fake.count(Op::Update), 0);
        assert_eq!(fake.count(Op::Create), 1);
    }

    #[tokio::test]
    async fn test_analysis_and_form_are_independent() {
        let (fake, state) = create_test_state(vec![sample_entry(1, "happy", "")]);
        state.mount().await.unwrap();

        let (saved, analysed) = tokio::join!(state.form.submit(), state.analysis.request_analysis());

        assert!(saved.is_ok());
        assert!(matches!(
            analysed.unwrap(),
            crate::services::AnalysisState::Ready(_)
        ));
        assert_eq!(fake.count(Op::Create), 1);
        assert_eq!(fake.count(Op::Analysis), 1);
    }
}
