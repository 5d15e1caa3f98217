//! `WaitingRoom` — triaged patients waiting for a treatment room.
//!
//! A patient's priority changes when a YELLOW wait times out and the patient
//! becomes RED.  An ordered set cannot re-key an element in place, so the
//! engine removes the patient, changes the color, and pushes again.  To make
//! that removal O(log n) the room keeps an id → key index alongside the set:
//! the key is captured at push time, so removal still works after the
//! roster's color has already moved on.
//!
//! # Ordering
//!
//! Severity descending (RED, YELLOW, WHITE), then arrival ascending, then id
//! ascending.  An escalated patient keeps its arrival-based place among the
//! REDs rather than going to the back of the line.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use er_core::{Patient, PatientId, SimTime};
use rustc_hash::FxHashMap;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
struct WaitKey {
    urgency: Reverse<u8>,
    arrival: SimTime,
    id:      PatientId,
}

/// Severity-ordered priority queue of waiting patients.
///
/// Invariant: a patient is present at most once.
#[derive(Default)]
pub struct WaitingRoom {
    order: BTreeSet<WaitKey>,
    index: FxHashMap<PatientId, WaitKey>,
}

impl WaitingRoom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `patient` by its current color.
    ///
    /// Returns `false` (and changes nothing) if the patient is already
    /// present or its color is not WHITE/YELLOW/RED.
    pub fn push(&mut self, patient: &Patient) -> bool {
        let Some(severity) = patient.color().severity() else {
            return false;
        };
        if self.index.contains_key(&patient.id()) {
            return false;
        }
        let key = WaitKey {
            urgency: Reverse(severity),
            arrival: patient.arrival(),
            id:      patient.id(),
        };
        self.order.insert(key);
        self.index.insert(patient.id(), key);
        true
    }

    /// Remove and return the most urgent patient.
    pub fn pop(&mut self) -> Option<PatientId> {
        let key = self.order.pop_first()?;
        self.index.remove(&key.id);
        Some(key.id)
    }

    /// The most urgent patient without removing it.
    pub fn peek(&self) -> Option<PatientId> {
        self.order.first().map(|k| k.id)
    }

    /// Remove a specific patient.  Absent patients are a no-op returning `false`.
    pub fn remove(&mut self, id: PatientId) -> bool {
        match self.index.remove(&id) {
            Some(key) => {
                self.order.remove(&key);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: PatientId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.index.clear();
    }

    /// Waiting patients, most urgent first.
    pub fn iter(&self) -> impl Iterator<Item = PatientId> + '_ {
        self.order.iter().map(|k| k.id)
    }
}
