// ProfileLookup - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every variant keeps its cause so the
// full chain can be logged.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all ProfileLookup operations.
#[derive(Debug)]
pub enum ProfileLookupError {
    /// A profile query failed.
    Query(QueryError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error outside of config loading (writing results).
    Io {
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for ProfileLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(e) => write!(f, "Query error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io { operation, source } => write!(f, "I/O error during {operation}: {source}"),
        }
    }
}

impl std::error::Error for ProfileLookupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Query(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Query errors
// ---------------------------------------------------------------------------

/// Errors produced by a single GraphQL request/response exchange.
#[derive(Debug)]
pub enum QueryError {
    /// The request could not be sent or the response could not be read
    /// (connection refused, DNS failure, timeout, ...).
    Transport { url: String, source: reqwest::Error },

    /// The server answered with a non-success HTTP status.
    Status { url: String, status: u16, body: String },

    /// The response body was not valid JSON.
    Decode { url: String, source: serde_json::Error },

    /// The response envelope did not contain a `data` member.
    MissingData { url: String },

    /// `data` was null and the server reported GraphQL errors.
    GraphQl { url: String, messages: Vec<String> },
}

impl QueryError {
    /// Short, single-line description suitable for the status bar.
    pub fn summary(&self) -> String {
        match self {
            Self::Transport { source, .. } => {
                if source.is_timeout() {
                    "Request timed out".to_string()
                } else if source.is_connect() {
                    "Could not connect to server".to_string()
                } else {
                    "Network error".to_string()
                }
            }
            Self::Status { status, .. } => format!("Server returned HTTP {status}"),
            Self::Decode { .. } => "Response was not valid JSON".to_string(),
            Self::MissingData { .. } => "Response had no data".to_string(),
            Self::GraphQl { messages, .. } => match messages.first() {
                Some(first) if messages.len() == 1 => format!("GraphQL error: {first}"),
                Some(first) => format!("GraphQL error: {first} (+{} more)", messages.len() - 1),
                None => "GraphQL error".to_string(),
            },
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { url, source } => {
                write!(f, "Request to '{url}' failed: {source}")
            }
            Self::Status { url, status, body } => {
                if body.is_empty() {
                    write!(f, "'{url}' returned HTTP {status}")
                } else {
                    write!(f, "'{url}' returned HTTP {status}: {body}")
                }
            }
            Self::Decode { url, source } => {
                write!(f, "Response from '{url}' is not valid JSON: {source}")
            }
            Self::MissingData { url } => {
                write!(f, "Response from '{url}' has no 'data' field")
            }
            Self::GraphQl { url, messages } => {
                write!(f, "'{url}' reported GraphQL errors: {}", messages.join("; "))
            }
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<QueryError> for ProfileLookupError {
    fn from(e: QueryError) -> Self {
        Self::Query(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for ProfileLookupError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for ProfileLookup results.
pub type Result<T> = std::result::Result<T, ProfileLookupError>;
