//! Cascade bookkeeping: request payloads and stale-response guards.
//!
//! Overlapping cascade fetches are not coalesced; every trigger starts an
//! independent fetch. Each carries a token from [`CascadeTokens`], and a
//! response is applied only while its token is still the newest for that
//! provoker. Without the guard, the last response to *arrive* would win even
//! when it answered an older selection.

use std::collections::HashMap;

/// A scoped schema refresh provoked by one widget's change.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeRequest {
    /// Name of the parameter whose change provoked the refresh.
    pub provoker: String,
    /// The provoker's normalized value at trigger time.
    pub selections: Vec<String>,
    /// Token from [`CascadeTokens::issue`]; checked on arrival.
    pub token: u64,
}

impl CascadeRequest {
    /// Query pairs scoping the schema fetch: the provoker name repeated once
    /// per selection, in selection order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.selections
            .iter()
            .map(|value| (self.provoker.clone(), value.clone()))
            .collect()
    }
}

/// Monotonically increasing token per provoker name. Owned alongside the
/// form; dropping both on a dataset switch makes any in-flight response
/// fail the `is_current` check and land harmlessly.
#[derive(Debug, Clone, Default)]
pub struct CascadeTokens {
    latest: HashMap<String, u64>,
}

impl CascadeTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next token for a provoker, superseding any outstanding one.
    pub fn issue(&mut self, provoker: &str) -> u64 {
        let counter = self.latest.entry(provoker.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Whether a response carrying this token is still the newest answer for
    /// its provoker.
    pub fn is_current(&self, provoker: &str, token: u64) -> bool {
        self.latest.get(provoker).is_some_and(|latest| *latest == token)
    }
}
