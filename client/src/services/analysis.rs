//! Analysis controller
//!
//! Lifecycle of the AI insight request. The state is a single enum, so a
//! pending request, a result and an error can never be observed together.

use crate::config::{FALLBACK_MODEL_LABEL, INSUFFICIENT_DATA_TEXT, SERVICE_UNREACHABLE_TEXT};
use crate::error::{AppError, Result};
use crate::gateway::{AnalysisReport, EntryGateway};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Analysis produced by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub text: String,
    pub model_label: String,
    pub moods_analyzed: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum AnalysisState {
    /// Nothing requested yet, or the last outcome was dismissed
    #[default]
    Idle,
    Pending,
    Ready(AnalysisResult),
    /// The backend answered but had nothing to analyze
    InsufficientData,
    /// The request failed; `message` holds the underlying error
    Failed { message: String },
}

impl AnalysisState {
    pub fn is_pending(&self) -> bool {
        matches!(self, AnalysisState::Pending)
    }

    /// Text to show the user, if there is an outcome
    pub fn display_text(&self) -> Option<&str> {
        match self {
            AnalysisState::Ready(result) => Some(&result.text),
            AnalysisState::InsufficientData => Some(INSUFFICIENT_DATA_TEXT),
            AnalysisState::Failed { .. } => Some(SERVICE_UNREACHABLE_TEXT),
            AnalysisState::Idle | AnalysisState::Pending => None,
        }
    }

    pub fn model_label(&self) -> Option<&str> {
        match self {
            AnalysisState::Ready(result) => Some(&result.model_label),
            _ => None,
        }
    }
}

struct Inner {
    state: AnalysisState,
    /// Number of the latest request; older completions are dropped
    seq: u64,
}

impl Inner {
    /// Back to idle if request `seq` is still the pending one
    fn abandon(&mut self, seq: u64) {
        if self.seq == seq && self.state.is_pending() {
            self.state = AnalysisState::Idle;
        }
    }
}

/// Clears `Pending` when a request future is dropped before it completes
struct PendingGuard {
    inner: Arc<Mutex<Inner>>,
    seq: u64,
    armed: bool,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        tracing::debug!("Analysis #{} dropped before completing", self.seq);

        let seq = self.seq;
        match self.inner.try_lock() {
            Ok(mut inner) => inner.abandon(seq),
            Err(_) => {
                if let Ok(handle) = tokio::runtime::Handle::try_current() {
                    let inner = self.inner.clone();
                    handle.spawn(async move {
                        inner.lock().await.abandon(seq);
                    });
                }
            }
        }
    }
}

/// Controller for AI insight requests
pub struct AnalysisController {
    gateway: Arc<dyn EntryGateway>,
    fallback_model_label: String,
    inner: Arc<Mutex<Inner>>,
}

impl AnalysisController {
    pub fn new(gateway: Arc<dyn EntryGateway>) -> Self {
        Self::with_fallback_label(gateway, FALLBACK_MODEL_LABEL)
    }

    pub fn with_fallback_label(gateway: Arc<dyn EntryGateway>, label: impl Into<String>) -> Self {
        Self {
            gateway,
            fallback_model_label: label.into(),
            inner: Arc::new(Mutex::new(Inner {
                state: AnalysisState::Idle,
                seq: 0,
            })),
        }
    }

    pub async fn state(&self) -> AnalysisState {
        self.inner.lock().await.state.clone()
    }

    pub async fn is_pending(&self) -> bool {
        self.inner.lock().await.state.is_pending()
    }

    /// Ask the backend for an analysis of the stored entries.
    ///
    /// Whether there are entries to analyze is the caller's concern; this only
    /// refuses to start while another request is pending. Transport failures
    /// become [`AnalysisState::Failed`] rather than an `Err`. Dropping the
    /// returned future before it resolves puts the controller back to idle.
    pub async fn request_analysis(&self) -> Result<AnalysisState> {
        let seq = {
            let mut inner = self.inner.lock().await;
            if inner.state.is_pending() {
                return Err(AppError::AnalysisInProgress);
            }
            inner.seq += 1;
            inner.state = AnalysisState::Pending;
            inner.seq
        };
        let mut guard = PendingGuard {
            inner: self.inner.clone(),
            seq,
            armed: true,
        };

        tracing::info!("Requesting mood analysis (#{})", seq);

        let outcome = match self.gateway.get_analysis().await {
            Ok(report) => self.interpret(report),
            Err(e) => {
                tracing::warn!("AI analysis error: {}", e);
                AnalysisState::Failed {
                    message: e.to_string(),
                }
            }
        };

        let mut inner = self.inner.lock().await;
        guard.armed = false;
        if inner.seq != seq {
            tracing::debug!("Discarding superseded analysis #{}", seq);
            return Ok(inner.state.clone());
        }
        inner.state = outcome.clone();

        Ok(outcome)
    }

    /// Drop the current outcome. A request still in flight is abandoned and
    /// its result will be ignored.
    pub async fn dismiss(&self) {
        let mut inner = self.inner.lock().await;
        inner.seq += 1;
        inner.state = AnalysisState::Idle;
    }

    fn interpret(&self, report: AnalysisReport) -> AnalysisState {
        let Some(text) = report.analysis_text() else {
            tracing::info!("Analysis returned no content");
            return AnalysisState::InsufficientData;
        };

        let model_label = report
            .model_used
            .clone()
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| self.fallback_model_label.clone());

        tracing::info!(
            "Analysis ready from {} ({} moods)",
            model_label,
            report
                .moods_analyzed
                .map(|n| n.to_string())
                .unwrap_or_else(|| "?".to_string())
        );

        AnalysisState::Ready(AnalysisResult {
            text: text.to_string(),
            model_label,
            moods_analyzed: report.moods_analyzed,
        })
    }
}
