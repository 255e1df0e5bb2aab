//! REST gateway for the journal API
//!
//! Talks to the mood collection endpoint:
//! - `GET {base}` lists entries, `POST {base}` creates one
//! - `PUT {base}{id}/` and `DELETE {base}{id}/` address a single entry
//! - `GET {base}analyze/` returns the AI summary

use super::{AnalysisReport, EntryDraft, EntryGateway, EntryId, MoodEntry};
use crate::config::{ANALYZE_PATH, USER_AGENT};
use crate::error::{AppError, Result};
use crate::services::settings::ClientSettings;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

/// Normalize a configured API URL so entry paths can be appended to it.
///
/// The URL must use http or https; a trailing `/` is added when missing.
pub fn normalize_base_url(url: &str) -> Result<String> {
    let url = url.trim();

    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(AppError::Config(format!(
            "API URL must start with http:// or https://, got {:?}",
            url
        )));
    }

    if url.ends_with('/') {
        Ok(url.to_string())
    } else {
        Ok(format!("{}/", url))
    }
}

/// Turn a non-success response into an error
fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(AppError::Status {
            status,
            url: response.url().to_string(),
        })
    }
}

/// Gateway backed by the journal REST API
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        tracing::debug!("HTTP gateway targeting {}", base_url);

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Build from settings, applying the same validation as a settings load
    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        let settings = settings.clone().validated()?;
        Self::new(
            &settings.api_url,
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn entry_url(&self, id: EntryId) -> String {
        format!("{}{}/", self.base_url, id)
    }

    fn analyze_url(&self) -> String {
        format!("{}{}", self.base_url, ANALYZE_PATH)
    }
}

#[async_trait]
impl EntryGateway for HttpGateway {
    async fn list_entries(&self) -> Result<Vec<MoodEntry>> {
        tracing::debug!("Fetching mood entries from {}", self.base_url);

        let response = self.client.get(&self.base_url).send().await?;
        let entries: Vec<MoodEntry> = ensure_success(response)?.json().await?;

        tracing::debug!("Fetched {} mood entries", entries.len());

        Ok(entries)
    }

    async fn create_entry(&self, draft: &EntryDraft) -> Result<MoodEntry> {
        let response = self
            .client
            .post(&self.base_url)
            .json(draft)
            .send()
            .await?;
        let entry: MoodEntry = ensure_success(response)?.json().await?;

        tracing::debug!("Created mood entry: {}", entry.id);

        Ok(entry)
    }

    async fn update_entry(&self, id: EntryId, draft: &EntryDraft) -> Result<Option<MoodEntry>> {
        let response = self
            .client
            .put(self.entry_url(id))
            .json(draft)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::EntryNotFound(id));
        }

        let body = ensure_success(response)?.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            tracing::debug!("Updated mood entry {} (no body returned)", id);
            return Ok(None);
        }

        let entry: MoodEntry = serde_json::from_slice(&body)?;
        tracing::debug!("Updated mood entry: {}", entry.id);

        Ok(Some(entry))
    }

    async fn delete_entry(&self, id: EntryId) -> Result<()> {
        let response = self.client.delete(self.entry_url(id)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::EntryNotFound(id));
        }

        ensure_success(response)?;
        tracing::debug!("Deleted mood entry: {}", id);

        Ok(())
    }

    async fn get_analysis(&self) -> Result<AnalysisReport> {
        let response = self.client.get(self.analyze_url()).send().await?;

        // The backend reports "nothing to analyze" and provider failures as 400
        // with an `error` body. That is an answer, not a transport failure.
        if response.status() == StatusCode::BAD_REQUEST {
            let mut report: AnalysisReport = response.json().await?;
            tracing::warn!(
                "Analysis endpoint returned no analysis: {}",
                report.error.as_deref().unwrap_or("no reason given")
            );
            report.analysis = None;
            return Ok(report);
        }

        let report: AnalysisReport = ensure_success(response)?.json().await?;

        Ok(report)
    }
}
