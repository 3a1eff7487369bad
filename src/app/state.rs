// ProfileLookup - app/state.rs
//
// Application state management. Holds the input text, the last applied
// query result, and the lookup status for the status line.
// Owned by the eframe::App implementation; lives as long as the window.

use crate::core::model::{
    LookupOutcome, LookupRequest, LookupStatus, OutcomeDisposition, ResponseOrdering,
};
use crate::core::query;
use chrono::{DateTime, Local};
use serde_json::Value;
use std::time::Duration;

/// Metadata about the result currently on screen.
#[derive(Debug, Clone)]
pub struct AppliedResult {
    /// Sequence number of the request that produced it.
    pub seq: u64,
    /// Username it was requested for.
    pub username: String,
    /// Local time the outcome was applied.
    pub received_at: DateTime<Local>,
    /// Request round-trip time.
    pub elapsed: Duration,
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Current text of the username input.
    pub username_input: String,

    /// Last applied GraphQL `data` payload; `None` until a response lands.
    /// Replaced wholesale, never merged.
    pub profile_data: Option<Value>,

    /// Details of the request behind `profile_data`.
    pub applied: Option<AppliedResult>,

    /// Status of the most recently issued request.
    pub status: LookupStatus,

    /// How out-of-order responses are reconciled.
    pub ordering: ResponseOrdering,

    /// Sequence number of the most recently issued request.
    latest_issued: Option<u64>,

    /// Set by the view when the input changed; consumed by the app loop,
    /// which issues the lookup. At most one lookup is issued per frame:
    /// several edits delivered in the same frame (for example fast typing
    /// between repaints) coalesce and the last value wins.
    pub pending_lookup: Option<String>,

    /// GraphQL endpoint, shown in the status bar and About dialog.
    pub endpoint: String,

    /// Status message for the status bar (save/copy feedback).
    pub status_message: String,

    /// Non-fatal startup warnings (config problems).
    pub warnings: Vec<String>,

    /// Whether to show the About dialog.
    pub show_about: bool,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    /// Create initial state: empty input, no result.
    pub fn new(endpoint: String, ordering: ResponseOrdering, debug_mode: bool) -> Self {
        Self {
            username_input: String::new(),
            profile_data: None,
            applied: None,
            status: LookupStatus::Idle,
            ordering,
            latest_issued: None,
            pending_lookup: None,
            endpoint,
            status_message: "Type a username to look up a profile.".to_string(),
            warnings: Vec::new(),
            show_about: false,
            debug_mode,
        }
    }

    /// Called by the view on every input change.
    pub fn request_lookup(&mut self) {
        self.pending_lookup = Some(self.username_input.clone());
    }

    /// Record that `request` has been issued. It becomes the latest request.
    pub fn note_issued(&mut self, request: &LookupRequest) {
        self.latest_issued = Some(request.seq);
        self.status = LookupStatus::Loading { seq: request.seq };
    }

    /// True if `seq` is the most recently issued request.
    pub fn is_latest(&self, seq: u64) -> bool {
        self.latest_issued == Some(seq)
    }

    /// Reconcile one lookup outcome with the display according to the
    /// ordering policy.
    ///
    /// | ordering      | outcome           | effect                                   |
    /// |---------------|-------------------|------------------------------------------|
    /// | any           | latest, Ok        | data replaced, status Loaded             |
    /// | any           | latest, Err       | data kept, status Failed                 |
    /// | latest-issued | superseded        | discarded                                |
    /// | last-resolved | superseded, Ok    | data replaced, status untouched          |
    /// | last-resolved | superseded, Err   | discarded                                |
    pub fn apply_outcome(&mut self, outcome: LookupOutcome) -> OutcomeDisposition {
        let latest = self.is_latest(outcome.seq);
        let applies_stale =
            self.ordering == ResponseOrdering::LastResolved && outcome.result.is_ok();

        if !latest && !applies_stale {
            match &outcome.result {
                Ok(_) => tracing::debug!(
                    seq = outcome.seq,
                    latest = ?self.latest_issued,
                    "Discarding superseded response"
                ),
                Err(e) => tracing::debug!(
                    seq = outcome.seq,
                    error = %e,
                    "Discarding superseded failure"
                ),
            }
            return OutcomeDisposition::Discarded;
        }

        match outcome.result {
            Ok(data) => {
                self.profile_data = Some(data);
                self.applied = Some(AppliedResult {
                    seq: outcome.seq,
                    username: outcome.username,
                    received_at: Local::now(),
                    elapsed: outcome.elapsed,
                });
                if latest {
                    self.status = LookupStatus::Loaded;
                }
                OutcomeDisposition::Applied
            }
            Err(e) => {
                tracing::warn!(
                    seq = outcome.seq,
                    username = %outcome.username,
                    error = %e,
                    "Profile lookup failed"
                );
                self.status = LookupStatus::Failed {
                    message: e.summary(),
                };
                OutcomeDisposition::Failed
            }
        }
    }

    /// Text for the result area: the payload with four-space indentation,
    /// or `null` before anything has been applied.
    pub fn result_text(&self) -> String {
        query::to_pretty_json(self.profile_data.as_ref())
    }

    /// True if there is a result worth copying or saving.
    pub fn has_result(&self) -> bool {
        self.profile_data.is_some()
    }
}
