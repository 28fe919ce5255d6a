use std::cmp::Reverse;
use std::collections::BinaryHeap;

use chrono::{DateTime, Utc};
use cp_core::ids::ItemId;

/// One-shot auto-delete deadlines, earliest first.
///
/// Entries are never cancelled; whoever pops a due id re-checks current
/// state before acting on it.
#[derive(Debug, Default)]
pub struct DeferredDeletes {
    heap: BinaryHeap<Reverse<(DateTime<Utc>, ItemId)>>,
}

impl DeferredDeletes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, at: DateTime<Utc>, id: ItemId) {
        self.heap.push(Reverse((at, id)));
    }

    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.heap.peek().map(|Reverse((at, _))| *at)
    }

    /// Removes and returns every id whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: DateTime<Utc>) -> Vec<ItemId> {
        let mut due = Vec::new();
        while let Some(Reverse((at, _))) = self.heap.peek() {
            if *at > now {
                break;
            }
            if let Some(Reverse((_, id))) = self.heap.pop() {
                due.push(id);
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
