//! Application configuration constants
//!
//! Central location for defaults, limits and the fixed user-facing
//! messages used throughout the client.

// ===== Journal API =====

/// Base URL of the mood collection on a local development backend
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/moods/";

/// Path segment of the analysis action, relative to the collection URL
pub const ANALYZE_PATH: &str = "analyze/";

/// User agent sent with every API request
pub const USER_AGENT: &str = concat!("moodjournal/", env!("CARGO_PKG_VERSION"));

// ===== Request Limits =====

/// Default transport timeout for API requests in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Minimum transport timeout in seconds
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Maximum transport timeout in seconds.
/// Analysis calls wait on a remote model before answering.
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

// ===== Analysis =====

/// Label shown when the backend does not say which model produced an analysis
pub const FALLBACK_MODEL_LABEL: &str = "gemini";

/// Shown when the backend answered but had nothing to analyze
pub const INSUFFICIENT_DATA_TEXT: &str = "Not enough data to analyze. Add more moods!";

/// Shown when the analysis request itself failed
pub const SERVICE_UNREACHABLE_TEXT: &str = "Error connecting to AI. Check your API key.";

// ===== Settings =====

/// File name of the persisted client settings
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Environment variable naming the settings directory
pub const CONFIG_DIR_ENV: &str = "MOODJOURNAL_CONFIG_DIR";

/// Environment variable overriding the configured API URL
pub const API_URL_ENV: &str = "MOODJOURNAL_API_URL";
