//! Bounded log of past rounds used for fairness checks.

use crate::models::player::{Pair, Player};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of past rounds retained ("last round" and "the round before that").
pub const HISTORY_DEPTH: usize = 2;

/// What we remember about one past round.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub waiting: Vec<Player>,
    pub pairs: Vec<Pair>,
}

/// Most-recent-first log of at most [`HISTORY_DEPTH`] entries.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "VecDeque<HistoryEntry>", into = "VecDeque<HistoryEntry>")]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
}

impl From<VecDeque<HistoryEntry>> for HistoryLog {
    fn from(mut entries: VecDeque<HistoryEntry>) -> Self {
        entries.truncate(HISTORY_DEPTH);
        Self { entries }
    }
}

impl From<HistoryLog> for VecDeque<HistoryEntry> {
    fn from(log: HistoryLog) -> Self {
        log.entries
    }
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a round; the oldest entry is evicted past [`HISTORY_DEPTH`].
    pub fn record_round(&mut self, waiting: Vec<Player>, pairs: Vec<Pair>) {
        self.entries.push_front(HistoryEntry { waiting, pairs });
        self.entries.truncate(HISTORY_DEPTH);
    }

    pub fn last_waiting(&self) -> &[Player] {
        self.waiting_at(0)
    }

    pub fn second_last_waiting(&self) -> &[Player] {
        self.waiting_at(1)
    }

    fn waiting_at(&self, idx: usize) -> &[Player] {
        self.entries
            .get(idx)
            .map(|e| e.waiting.as_slice())
            .unwrap_or(&[])
    }

    /// Lazy union of pairs across all retained entries (may repeat a pair).
    pub fn all_pairs(&self) -> impl Iterator<Item = &Pair> {
        self.entries.iter().flat_map(|e| e.pairs.iter())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
