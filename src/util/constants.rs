// ChatbotQuery - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name (window title and About dialog).
pub const APP_NAME: &str = "AI Chatbot";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "ChatbotQuery";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Backend endpoint
// =============================================================================

/// Base URL of the chatbot backend in the reference deployment.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Path of the chatbot endpoint, joined onto the base URL.
pub const DEFAULT_ENDPOINT_PATH: &str = "/chatbot/";

/// Name of the single query parameter carrying the user's input.
pub const SUPPLIER_ID_PARAM: &str = "supplier_id";

/// Maximum response body size accepted from the backend (10 MB).
pub const MAX_RESPONSE_BODY_BYTES: u64 = 10 * 1024 * 1024;

// =============================================================================
// User-facing messages
// =============================================================================

/// Shown when the request left the client but nothing came back.
pub const NO_RESPONSE_MESSAGE: &str = "No response from server. Possible CORS or server issue.";

/// Hint text for the query field.
pub const QUERY_FIELD_HINT: &str = "Enter Supplier ID, Brand, or Product Name";

// =============================================================================
// UI
// =============================================================================

/// Default body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Minimum configurable font size.
pub const MIN_FONT_SIZE: f32 = 8.0;

/// Maximum configurable font size.
pub const MAX_FONT_SIZE: f32 = 32.0;

/// How often the UI repaints while a request is in flight (ms).
/// The background thread does not wake the UI itself, so this bounds the
/// latency between a response arriving and it being shown.
pub const PENDING_REPAINT_INTERVAL_MS: u64 = 100;

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, --debug, nor config set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Name of the optional configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
