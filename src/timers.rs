use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

use crate::ghost::PursuerId;

/// Deferred actions the tick scheduler fires once the simulation clock reaches them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Timer {
    Respawn(PursuerId),
    /// Ends the fright window opened at `epoch`; stale epochs are ignored.
    FrightEnd { epoch: u32 },
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    // (fire time, insertion order) keeps same-instant timers first-in first-out.
    heap: BinaryHeap<Reverse<(Duration, u64, Timer)>>,
    seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, at: Duration, timer: Timer) {
        self.heap.push(Reverse((at, self.seq, timer)));
        self.seq += 1;
    }

    /// Removes and returns the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<Timer> {
        match self.heap.peek() {
            Some(Reverse((at, _, _))) if *at <= now => {
                self.heap.pop().map(|Reverse((_, _, timer))| timer)
            }
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
