// ProfileLookup - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "ProfileLookup";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "ProfileLookup";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Server / GraphQL
// =============================================================================

/// Server base URL used when neither CLI, environment, nor config sets one.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Path of the GraphQL endpoint, appended to the server base URL.
pub const GRAPHQL_PATH: &str = "/graphql";

/// Environment variable overriding the server base URL (below `--server`).
pub const SERVER_URL_ENV: &str = "PROFILE_LOOKUP_SERVER";

/// Maximum number of response-body bytes quoted in a `Status` error message.
/// The full body is still logged at debug level.
pub const MAX_ERROR_BODY_CHARS: usize = 512;

// =============================================================================
// Rendering
// =============================================================================

/// Indentation unit for the pretty-printed JSON result.
pub const JSON_INDENT: &[u8] = b"    ";

/// Text rendered in the result area before any response has been applied.
pub const NO_VALUE_TEXT: &str = "null";

// =============================================================================
// UI
// =============================================================================

/// Default body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum allowed font size.
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum allowed font size.
pub const MAX_FONT_SIZE: f32 = 24.0;

/// Repaint interval while any lookup is still in flight.
///
/// The worker thread cannot wake the UI directly, so the channel is polled
/// at this cadence until every outstanding request has reported back.
pub const LOOKUP_POLL_INTERVAL_MS: u64 = 50;

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, --debug, nor config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Files
// =============================================================================

/// Name of the optional configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Suggested file name in the "Save JSON" dialog.
pub const DEFAULT_SAVE_FILE_NAME: &str = "profile.json";
