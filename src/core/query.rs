// ProfileLookup - core/query.rs
//
// The profile query: GraphQL document, request body, response envelope
// decoding, and result formatting.
//
// The HTTP exchange itself is behind the `GraphQlTransport` trait so this
// module stays free of network code; `platform::http` provides the real
// implementation.

use crate::core::json_text::{replace_lone_surrogates, JsPrettyFormatter};
use crate::util::constants::{JSON_INDENT, MAX_ERROR_BODY_CHARS, NO_VALUE_TEXT};
use crate::util::error::QueryError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// GraphQL document requesting the three profile fields for one username.
pub const PROFILE_QUERY: &str = r#"
    query($username: String) {
        profile(discordUsername: $username) {
            userId
            discordUsername
            credit
        }
    }
"#;

// =============================================================================
// Request
// =============================================================================

/// JSON body of a GraphQL POST: `{"query": ..., "variables": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: ProfileVariables<'a>,
}

/// Variables map for `PROFILE_QUERY`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileVariables<'a> {
    pub username: &'a str,
}

impl<'a> GraphQlRequest<'a> {
    /// Build the profile request for `username`. No validation is applied:
    /// empty and whitespace-only names are sent as typed.
    pub fn profile(username: &'a str) -> Self {
        Self {
            query: PROFILE_QUERY,
            variables: ProfileVariables { username },
        }
    }
}

// =============================================================================
// Transport seam
// =============================================================================

/// Status and body of an HTTP response, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Performs one POST of a GraphQL request to a fixed endpoint.
///
/// Implementations report only transport-level failures; status and body
/// interpretation happens in `query_profile`.
pub trait GraphQlTransport: Send + Sync {
    /// Full endpoint URL, used for error context and logging.
    fn endpoint(&self) -> &str;

    /// Send `request` as a JSON POST and return the raw response.
    fn post(&self, request: &GraphQlRequest<'_>) -> Result<RawResponse, QueryError>;
}

// =============================================================================
// Response
// =============================================================================

/// One entry of a GraphQL `errors` array. Only `message` is required.
#[derive(Debug, Clone, Deserialize)]
struct GraphQlErrorItem {
    message: String,
}

/// Run the profile query for `username` and return the response `data`.
///
/// Fails on transport errors, non-2xx status, undecodable JSON, a missing
/// `data` member, or `data: null` accompanied by GraphQL errors.
pub fn query_profile(
    transport: &dyn GraphQlTransport,
    username: &str,
) -> Result<Value, QueryError> {
    let request = GraphQlRequest::profile(username);
    tracing::debug!(
        endpoint = transport.endpoint(),
        username,
        "Sending profile query"
    );

    let response = transport.post(&request)?;
    let data = decode_response(transport.endpoint(), response)?;

    tracing::debug!(username, data = %data, "Profile query response");
    Ok(data)
}

/// Interpret a raw HTTP response as a GraphQL envelope and extract `data`.
pub fn decode_response(url: &str, response: RawResponse) -> Result<Value, QueryError> {
    if !(200..300).contains(&response.status) {
        tracing::debug!(
            url,
            status = response.status,
            body = %response.body,
            "Non-success status"
        );
        return Err(QueryError::Status {
            url: url.to_string(),
            status: response.status,
            body: truncate_chars(response.body.trim(), MAX_ERROR_BODY_CHARS),
        });
    }

    let envelope = parse_envelope(url, &response.body)?;

    let messages = error_messages(&envelope);

    match envelope.get("data") {
        None => {
            if messages.is_empty() {
                Err(QueryError::MissingData {
                    url: url.to_string(),
                })
            } else {
                Err(QueryError::GraphQl {
                    url: url.to_string(),
                    messages,
                })
            }
        }
        Some(Value::Null) if !messages.is_empty() => Err(QueryError::GraphQl {
            url: url.to_string(),
            messages,
        }),
        Some(data) => {
            if !messages.is_empty() {
                tracing::warn!(
                    url,
                    errors = ?messages,
                    "GraphQL returned partial data with errors"
                );
            }
            Ok(data.clone())
        }
    }
}

/// Parse the body as JSON. A body rejected only because of unpaired
/// surrogate escapes is parsed again with those escapes replaced by U+FFFD.
fn parse_envelope(url: &str, body: &str) -> Result<Value, QueryError> {
    let source = match serde_json::from_str(body) {
        Ok(envelope) => return Ok(envelope),
        Err(e) => e,
    };
    if let Some(repaired) = replace_lone_surrogates(body) {
        if let Ok(envelope) = serde_json::from_str(&repaired) {
            tracing::warn!(
                url,
                "Response contained unpaired surrogate escapes; replaced with U+FFFD"
            );
            return Ok(envelope);
        }
    }
    Err(QueryError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Collect `errors[].message` from an envelope. Entries without a message
/// are reported by their raw JSON.
fn error_messages(envelope: &Value) -> Vec<String> {
    let Some(Value::Array(errors)) = envelope.get("errors") else {
        return Vec::new();
    };
    errors
        .iter()
        .map(|e| match serde_json::from_value::<GraphQlErrorItem>(e.clone()) {
            Ok(item) => item.message,
            Err(_) => e.to_string(),
        })
        .collect()
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}\u{2026}", &s[..idx]),
        None => s.to_string(),
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Pretty-print a result the way the result area shows it: four-space
/// indentation, keys in server order, numbers written as a browser writes
/// them (`5.0` as `5`), `null` when there is no value.
pub fn to_pretty_json(value: Option<&Value>) -> String {
    let Some(value) = value else {
        return NO_VALUE_TEXT.to_string();
    };

    let mut buf = Vec::new();
    let formatter = JsPrettyFormatter::with_indent(JSON_INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    match value.serialize(&mut ser) {
        // serde_json only emits valid UTF-8.
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to format result as JSON");
            value.to_string()
        }
    }
}
