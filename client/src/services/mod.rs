//! Services module
//!
//! Client-side state that coordinates between the presentation layer and
//! the gateway.

pub mod analysis;
pub mod entries;
pub mod form;
pub mod settings;

pub use analysis::{AnalysisController, AnalysisResult, AnalysisState};
pub use entries::EntryStore;
pub use form::{EntryFormController, FormState, SubmitOutcome};
pub use settings::{ClientSettings, SettingsService};
