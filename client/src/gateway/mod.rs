//! Gateway module
//!
//! The boundary to the remote journal service:
//! - `models`: wire types for entries, drafts and analysis reports
//! - `http`: the REST implementation used by the application
//!
//! Everything above this module talks to the service through
//! [`EntryGateway`] only.

pub mod http;
pub mod models;

#[cfg(test)]
pub(crate) mod fake;

pub use http::HttpGateway;
pub use models::*;

use crate::error::Result;
use async_trait::async_trait;

/// Remote CRUD and analysis operations on mood entries
#[async_trait]
pub trait EntryGateway: Send + Sync {
    /// All stored entries, in the order the store returns them
    async fn list_entries(&self) -> Result<Vec<MoodEntry>>;

    /// Store a new entry; the remote assigns `id` and `created_at`
    async fn create_entry(&self, draft: &EntryDraft) -> Result<MoodEntry>;

    /// Replace an entry's mood, note and color.
    ///
    /// Returns the stored entry when the remote echoes it back.
    async fn update_entry(&self, id: EntryId, draft: &EntryDraft) -> Result<Option<MoodEntry>>;

    async fn delete_entry(&self, id: EntryId) -> Result<()>;

    /// Read-only analysis over the currently stored entries
    async fn get_analysis(&self) -> Result<AnalysisReport>;
}
