//! Bounded undo history.

use std::collections::VecDeque;

use cubeturn_geometry::Move;

/// The most recent executed moves, oldest first.
///
/// Holds at most `limit` entries; recording past the limit evicts the oldest.
/// Direction changes are never moves, so they never appear here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveHistory {
    entries: VecDeque<Move>,
    limit: usize,
}

impl MoveHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit,
        }
    }

    /// Restore from stored notation, keeping only the newest `limit` valid entries.
    pub fn from_tokens<I, S>(tokens: I, limit: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut history = Self::new(limit);
        for token in tokens {
            let token = token.as_ref();
            match Move::parse(token) {
                Ok(mv) => {
                    history.record(mv);
                }
                Err(e) => tracing::warn!(token, error = %e, "skipping stored move"),
            }
        }
        history
    }

    /// Append a move; returns the evicted oldest entry if over capacity.
    pub fn record(&mut self, mv: Move) -> Option<Move> {
        self.entries.push_back(mv);
        if self.entries.len() > self.limit {
            self.entries.pop_front()
        } else {
            None
        }
    }

    /// The most recent move.
    pub fn last(&self) -> Option<Move> {
        self.entries.back().copied()
    }

    /// Remove and return the most recent move.
    pub fn pop(&mut self) -> Option<Move> {
        self.entries.pop_back()
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

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.entries.iter().copied()
    }

    /// Notation for every entry, oldest first.
    pub fn to_tokens(&self) -> Vec<String> {
        self.entries.iter().map(|mv| mv.notation()).collect()
    }
}
