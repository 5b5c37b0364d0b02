pub mod analysis;

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use tracing::debug;

/// Number of past summaries kept for meta-analysis.
pub const SUMMARY_HISTORY_CAPACITY: usize = 5;

/// A rolling summary as it stood after a given turn.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRecord {
    /// Turn number the summary closed (1 for the first exchange).
    pub turn: u32,
    pub text: String,
    pub recorded_at: DateTime<Utc>,
}

/// Owns the rolling summary and a bounded history of past summaries.
///
/// The rolling summary is the only conversational memory carried between
/// turns; no transcript is kept.
#[derive(Debug, Clone)]
pub struct MemoryManager {
    summary: String,
    history: VecDeque<SummaryRecord>,
    capacity: usize,
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryManager {
    pub fn new() -> Self {
        Self::with_capacity(SUMMARY_HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            summary: String::new(),
            history: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Current rolling summary; empty before the first exchange.
    pub fn current_summary(&self) -> &str {
        &self.summary
    }

    /// Replace the rolling summary and append it to history, evicting the
    /// oldest entries beyond capacity.
    pub fn record(&mut self, turn: u32, summary: String) {
        self.history.push_back(SummaryRecord {
            turn,
            text: summary.clone(),
            recorded_at: Utc::now(),
        });
        while self.history.len() > self.capacity {
            if let Some(evicted) = self.history.pop_front() {
                debug!(turn = evicted.turn, "evicted oldest summary");
            }
        }
        self.summary = summary;
    }

    /// Past summaries, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &SummaryRecord> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
