//! Error types for the Mood Journal client
//!
//! All errors use thiserror for structured error handling.
//! These errors can be serialized to a presentation layer as plain messages.

use crate::gateway::EntryId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} failed with status {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Mood entry not found: {0}")]
    EntryNotFound(EntryId),

    #[error("Unknown mood: {0}")]
    UnknownMood(String),

    #[error("A save is already in progress")]
    SubmissionInProgress,

    #[error("An analysis is already in progress")]
    AnalysisInProgress,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
