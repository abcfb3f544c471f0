//! Recently-viewed item history.
//!
//! A bounded, duplicate-free sequence of item ids in recency order.
//! Viewing an item that is already present moves it to the most-recent
//! end; past capacity the least-recently viewed entry is evicted.

use std::collections::VecDeque;

/// How many viewed items are remembered.
pub const HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<u32>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Note a view of `id`, deduplicating and evicting past capacity.
    pub fn record(&mut self, id: u32) {
        if let Some(position) = self.entries.iter().position(|&entry| entry == id) {
            self.entries.remove(position);
        }
        self.entries.push_back(id);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Forget `id`. Called whenever the item leaves the store, so the
    /// history never holds dangling ids.
    pub fn remove(&mut self, id: u32) {
        if let Some(position) = self.entries.iter().position(|&entry| entry == id) {
            self.entries.remove(position);
        }
    }

    /// Ids oldest to newest.
    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(history: &History) -> Vec<u32> {
        history.ids().collect()
    }

    #[test]
    fn revisiting_moves_to_the_recent_end() {
        let mut history = History::new();
        history.record(1);
        history.record(2);
        history.record(1);

        assert_eq!(ids(&history), vec![2, 1]);
    }

    #[test]
    fn capacity_evicts_the_oldest_entry() {
        let mut history = History::new();
        for id in 1..=10 {
            history.record(id);
        }
        history.record(11);

        let current = ids(&history);
        assert_eq!(current.len(), HISTORY_CAPACITY);
        assert_eq!(current.first(), Some(&2));
        assert_eq!(current.last(), Some(&11));
    }

    #[test]
    fn revisit_does_not_evict() {
        let mut history = History::with_capacity(3);
        history.record(1);
        history.record(2);
        history.record(3);
        history.record(2);

        assert_eq!(ids(&history), vec![1, 3, 2]);
    }

    #[test]
    fn remove_is_a_no_op_for_unknown_ids() {
        let mut history = History::new();
        history.record(1);
        history.remove(99);
        history.remove(1);

        assert!(history.is_empty());
    }
}
