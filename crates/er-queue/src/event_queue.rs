//! `EventQueue` — the engine's heartbeat.
//!
//! # Ordering
//!
//! Events pop in ascending `(time, kind rank, insertion sequence)` order.
//! Many events share a timestamp (heartbeats and arrivals both land on
//! round 5-minute marks), so the two tie-breakers make every run a pure
//! function of its inputs: the kind rank is documented on
//! [`EventKind::rank`], and events of the same kind at the same minute pop
//! in the order they were pushed.
//!
//! # Performance note
//!
//! `BTreeMap` gives O(log n) push and O(log n) pop.  A full default run
//! holds a few hundred pending events at most.

use std::collections::BTreeMap;

use er_core::SimTime;

use crate::Event;

/// `(time, kind rank, insertion sequence)`, unique per pushed event.
type EventKey = (SimTime, u8, u64);

/// A time-ordered priority queue of [`Event`]s.
#[derive(Default)]
pub struct EventQueue {
    inner: BTreeMap<EventKey, Event>,
    /// Monotonic push counter; never reset so keys stay unique across `clear`.
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event`.  O(log n).
    pub fn push(&mut self, event: Event) {
        let key = (event.time, event.kind.rank(), self.next_seq);
        self.next_seq += 1;
        self.inner.insert(key, event);
    }

    /// Remove and return the earliest event, or `None` when drained.  O(log n).
    pub fn pop(&mut self) -> Option<Event> {
        self.inner.pop_first().map(|(_, event)| event)
    }

    /// The earliest event without removing it.
    pub fn peek(&self) -> Option<&Event> {
        self.inner.values().next()
    }

    /// Timestamp of the earliest pending event.
    pub fn next_time(&self) -> Option<SimTime> {
        self.inner.keys().next().map(|&(t, _, _)| t)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Drop every pending event.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Pending events in pop order.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.inner.values()
    }
}
