// ProfileLookup - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::error::QueryError;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

// =============================================================================
// Lookup request / outcome (worker <-> UI messages)
// =============================================================================

/// One profile lookup issued by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    /// Monotonically increasing sequence number assigned at issue time.
    pub seq: u64,

    /// Input text at the moment the request was issued. Sent unmodified.
    pub username: String,
}

/// Result of one lookup, sent from the worker thread back to the UI thread.
#[derive(Debug)]
pub struct LookupOutcome {
    /// Sequence number of the originating `LookupRequest`.
    pub seq: u64,

    /// Username the request was issued for.
    pub username: String,

    /// The GraphQL `data` payload, or the reason the exchange failed.
    pub result: Result<Value, QueryError>,

    /// Wall-clock time between sending the request and decoding the response.
    pub elapsed: Duration,
}

// =============================================================================
// Response ordering policy
// =============================================================================

/// How responses that arrive out of order are reconciled with the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseOrdering {
    /// Only the response to the most recently issued request is applied;
    /// responses to superseded requests are discarded.
    #[default]
    LatestIssued,

    /// Every successful response is applied in arrival order, so the one
    /// that resolves last wins regardless of which keystroke issued it.
    LastResolved,
}

impl ResponseOrdering {
    /// Parse the config-file spelling (`latest-issued` / `last-resolved`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "latest-issued" => Some(Self::LatestIssued),
            "last-resolved" => Some(Self::LastResolved),
            _ => None,
        }
    }

    /// Config-file spelling.
    pub fn label(&self) -> &'static str {
        match self {
            Self::LatestIssued => "latest-issued",
            Self::LastResolved => "last-resolved",
        }
    }
}

// =============================================================================
// Lookup status
// =============================================================================

/// What the status line shows about the most recently issued request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LookupStatus {
    /// Nothing has been issued yet.
    #[default]
    Idle,

    /// The request with this sequence number has not reported back.
    Loading { seq: u64 },

    /// The most recent request succeeded.
    Loaded,

    /// The most recent request failed. `message` is a one-line summary.
    Failed { message: String },
}

/// What `AppState::apply_outcome` did with a `LookupOutcome`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeDisposition {
    /// The payload replaced the displayed result.
    Applied,

    /// The request failed; the displayed result was left unchanged.
    Failed,

    /// The outcome belonged to a superseded request and was dropped.
    Discarded,
}

// =============================================================================
// Profile summary (typed view over the opaque response)
// =============================================================================

/// The three requested profile fields.
///
/// Field types belong to the remote schema, so each value is kept as raw
/// JSON and rendered verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    #[serde(default)]
    pub user_id: Value,
    #[serde(default)]
    pub discord_username: Value,
    #[serde(default)]
    pub credit: Value,
}

/// Interpretation of the `profile` member of a response `data` payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileView {
    /// `data` has no `profile` object to summarise (absent or not an object).
    Absent,

    /// The server answered `profile: null`: no member with that username.
    NotFound,

    /// A profile record was returned.
    Found(ProfileSummary),
}

impl ProfileView {
    /// Inspect a `data` payload.
    pub fn from_data(data: &Value) -> Self {
        match data.get("profile") {
            Some(Value::Null) => Self::NotFound,
            Some(profile @ Value::Object(_)) => {
                match serde_json::from_value::<ProfileSummary>(profile.clone()) {
                    Ok(summary) => Self::Found(summary),
                    Err(_) => Self::Absent,
                }
            }
            _ => Self::Absent,
        }
    }
}

/// Render a field value for the summary grid: strings without quotes,
/// everything else as compact JSON.
pub fn display_field(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "\u{2014}".to_string(),
        other => other.to_string(),
    }
}
