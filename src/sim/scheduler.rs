//! Deferred events keyed by simulated time
//!
//! Replaces wall-clock timers: entries only fire when the tick clock passes
//! them, so pausing delays them and a reset drops them.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Work deferred to a later tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scheduled {
    /// Spawn one attacker for the given round
    SpawnAttacker { round: u32 },
    /// Move from Cleared to the next round
    AdvanceRound { round: u32 },
    /// Second projectile of a double shooter volley, fired from the plant's column
    FollowUpShot { row: usize, col: usize },
}

#[derive(Debug, Clone)]
struct Entry {
    at: f64,
    seq: u64,
    event: Scheduled,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

// Min-heap on (at, seq)
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .at
            .total_cmp(&self.at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue of [`Scheduled`] events
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event to fire once simulated time reaches `at`
    pub fn schedule(&mut self, at: f64, event: Scheduled) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { at, seq, event });
    }

    /// Pop every event due at or before `now`, earliest first
    pub fn drain_due(&mut self, now: f64) -> Vec<Scheduled> {
        let mut due = Vec::new();
        while self.heap.peek().is_some_and(|e| e.at <= now) {
            if let Some(entry) = self.heap.pop() {
                due.push(entry.event);
            }
        }
        due
    }

    /// Drop every pending event
    pub fn cancel_all(&mut self) {
        self.heap.clear();
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
