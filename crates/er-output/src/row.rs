//! Plain data row types written by output backends.

use er_core::{Color, SimTime};
use er_queue::EventKind;
use er_sim::Outcome;

/// One processed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRow {
    pub time:       SimTime,
    pub kind:       EventKind,
    /// `None` for FREE_STUDIO and TICK.
    pub patient_id: Option<u32>,
    /// The patient's color after the event was dispatched.
    pub color:      Option<Color>,
}

/// Final counters of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryRow {
    pub generated:  u32,
    pub treated:    u32,
    pub abandoned:  u32,
    pub dead:       u32,
    pub unresolved: u32,
}

impl From<&Outcome> for SummaryRow {
    fn from(o: &Outcome) -> Self {
        Self {
            generated:  o.generated,
            treated:    o.treated,
            abandoned:  o.abandoned,
            dead:       o.dead,
            unresolved: o.unresolved(),
        }
    }
}
