//! Gateway models
//!
//! Rust structs for the entities exchanged with the journal API.
//! All models use serde so they map 1:1 onto the wire format.

use crate::catalog::{self, MoodOption};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the remote store
pub type EntryId = i64;

/// A recorded mood
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: EntryId,
    /// Catalog key, e.g. `happy`
    pub mood: String,
    #[serde(default)]
    pub note: String,
    /// Color snapshot taken when the entry was saved
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl MoodEntry {
    /// Catalog option for this entry's mood, if it is still in the catalog
    pub fn option(&self) -> Option<&'static MoodOption> {
        catalog::find(&self.mood)
    }

    /// Emoji for display, empty when the mood is no longer known
    pub fn emoji(&self) -> &'static str {
        self.option().map(|o| o.emoji).unwrap_or("")
    }

    /// Color for display.
    ///
    /// The stored snapshot wins even if the catalog color has since changed;
    /// the catalog is only used when the entry carries no color at all.
    pub fn display_color(&self) -> &str {
        if !self.color.is_empty() {
            return &self.color;
        }
        self.option()
            .map(|o| o.color)
            .unwrap_or(catalog::default_option().color)
    }
}

/// Create/update request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDraft {
    pub mood: String,
    pub note: String,
    pub color: String,
}

impl EntryDraft {
    /// Fresh draft for a catalog option with an empty note
    pub fn from_option(option: &MoodOption) -> Self {
        Self {
            mood: option.key.to_string(),
            note: String::new(),
            color: option.color.to_string(),
        }
    }

    /// Draft that edits an existing entry, keeping its stored color
    pub fn from_entry(entry: &MoodEntry) -> Self {
        Self {
            mood: entry.mood.clone(),
            note: entry.note.clone(),
            color: entry.color.clone(),
        }
    }
}

impl Default for EntryDraft {
    fn default() -> Self {
        Self::from_option(catalog::default_option())
    }
}

/// Body of the analysis endpoint.
///
/// A successful answer carries `analysis`; the backend answers with only
/// `error` when there was nothing to analyze or its model call failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default)]
    pub model_used: Option<String>,
    #[serde(default)]
    pub moods_analyzed: Option<u32>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AnalysisReport {
    /// Analysis text, treating an empty string as absent
    pub fn analysis_text(&self) -> Option<&str> {
        self.analysis.as_deref().filter(|text| !text.is_empty())
    }
}
