// ProfileLookup - app/lookup.rs
//
// Lookup lifecycle management. Runs each profile query on its own
// background thread and sends the tagged outcome to the UI thread via an
// mpsc channel.
//
// Architecture:
//   - `LookupManager` lives on the UI thread; `run_lookup` runs on a worker.
//   - Every request gets the next sequence number; in-flight requests are
//     never cancelled, so outcomes may arrive in any order.
//   - Reconciling out-of-order outcomes with the display is the job of
//     `AppState::apply_outcome`, not of this module.

use crate::core::model::{LookupOutcome, LookupRequest};
use crate::core::query::{self, GraphQlTransport};
use std::sync::{mpsc, Arc};
use std::time::Instant;

// =============================================================================
// LookupManager
// =============================================================================

/// Issues profile lookups on background threads and collects their outcomes.
pub struct LookupManager {
    transport: Arc<dyn GraphQlTransport>,

    /// Sender cloned into each worker.
    outcome_tx: mpsc::Sender<LookupOutcome>,

    /// Receiver polled by the UI thread once per frame.
    outcome_rx: mpsc::Receiver<LookupOutcome>,

    /// Sequence number for the next request. Starts at 1.
    next_seq: u64,

    /// Requests issued but not yet reported back.
    in_flight: usize,
}

impl LookupManager {
    pub fn new(transport: Arc<dyn GraphQlTransport>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::channel();
        Self {
            transport,
            outcome_tx,
            outcome_rx,
            next_seq: 1,
            in_flight: 0,
        }
    }

    /// Endpoint the lookups are sent to.
    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    /// Start a lookup for `username` and return the request it was issued as.
    ///
    /// Spawns a worker thread immediately. Earlier lookups keep running.
    pub fn start_lookup(&mut self, username: String) -> LookupRequest {
        let request = LookupRequest {
            seq: self.next_seq,
            username,
        };
        self.next_seq += 1;
        self.in_flight += 1;

        let transport = Arc::clone(&self.transport);
        let tx = self.outcome_tx.clone();
        let worker_request = request.clone();
        std::thread::spawn(move || {
            run_lookup(transport.as_ref(), worker_request, tx);
        });

        tracing::debug!(seq = request.seq, username = %request.username, "Lookup started");
        request
    }

    /// Poll for outcomes without blocking. Returns all pending outcomes in
    /// arrival order.
    pub fn poll_outcomes(&mut self) -> Vec<LookupOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            outcomes.push(outcome);
        }
        self.in_flight = self.in_flight.saturating_sub(outcomes.len());
        outcomes
    }

    /// Number of lookups whose outcome has not been polled yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

// =============================================================================
// Worker
// =============================================================================

/// Execute one query and report its outcome. Runs on a worker thread.
fn run_lookup(
    transport: &dyn GraphQlTransport,
    request: LookupRequest,
    tx: mpsc::Sender<LookupOutcome>,
) {
    let start = Instant::now();
    let result = query::query_profile(transport, &request.username);
    let elapsed = start.elapsed();

    match &result {
        Ok(_) => tracing::debug!(
            seq = request.seq,
            elapsed_ms = elapsed.as_millis() as u64,
            "Lookup succeeded"
        ),
        Err(e) => tracing::debug!(seq = request.seq, error = %e, "Lookup failed"),
    }

    // Receiver dropped means the window closed; nothing left to update.
    let _ = tx.send(LookupOutcome {
        seq: request.seq,
        username: request.username,
        result,
        elapsed,
    });
}
