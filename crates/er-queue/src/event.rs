//! Scheduled occurrences.

use std::fmt;

use er_core::{PatientId, SimTime};

/// What an event does when it fires.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum EventKind {
    /// A patient enters the emergency room.
    Arrival,
    /// A patient receives a color and joins the waiting room.
    Triage,
    /// A room may take the most urgent waiting patient.
    FreeStudio,
    /// A patient's wait deadline for their current color.
    Timeout,
    /// A patient leaves their room.
    Treated,
    /// Periodic heartbeat.
    Tick,
}

impl EventKind {
    /// Tie-break among events sharing a timestamp (lower fires first).
    ///
    /// Arrivals and triage land first so the rest of the minute sees them;
    /// a room freed this minute is offered before any deadline of this
    /// minute fires; the heartbeat goes last and sees everything.
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            EventKind::Arrival    => 0,
            EventKind::Triage     => 1,
            EventKind::Treated    => 2,
            EventKind::FreeStudio => 3,
            EventKind::Timeout    => 4,
            EventKind::Tick       => 5,
        }
    }

    /// `true` for kinds that concern a single patient.
    #[inline]
    pub fn is_patient_scoped(self) -> bool {
        !matches!(self, EventKind::FreeStudio | EventKind::Tick)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Arrival    => "ARRIVAL",
            EventKind::Triage     => "TRIAGE",
            EventKind::FreeStudio => "FREE_STUDIO",
            EventKind::Timeout    => "TIMEOUT",
            EventKind::Treated    => "TREATED",
            EventKind::Tick       => "TICK",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable scheduled occurrence.  Consumed exactly once when popped.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub time:    SimTime,
    pub kind:    EventKind,
    /// Set for patient-scoped kinds; `None` for FREE_STUDIO and TICK.
    pub patient: Option<PatientId>,
}

impl Event {
    /// An event concerning one patient.
    pub fn for_patient(time: SimTime, kind: EventKind, patient: PatientId) -> Self {
        Self { time, kind, patient: Some(patient) }
    }

    /// An event acting on global state only.
    pub fn global(time: SimTime, kind: EventKind) -> Self {
        Self { time, kind, patient: None }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.patient {
            Some(p) => write!(f, "{} {} {}", self.time, self.kind, p),
            None    => write!(f, "{} {}", self.time, self.kind),
        }
    }
}
