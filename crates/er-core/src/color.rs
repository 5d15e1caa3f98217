//! Triage colors and the patient lifecycle.
//!
//! ```text
//! NEW ──TRIAGE──▶ WHITE / YELLOW / RED ──admit──▶ TREATING ──▶ OUT
//!                   │        │        │
//!                   │        │        └─timeout─▶ BLACK
//!                   │        └─timeout─▶ RED (re-queued)
//!                   └─timeout─▶ OUT (abandoned)
//! ```
//!
//! Only the three waiting colors carry an urgency; the others track lifecycle.

/// Current triage color / lifecycle state of a patient.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Color {
    /// Arrived, not yet triaged.
    #[default]
    New,
    White,
    Yellow,
    Red,
    /// Occupying a treatment room.
    Treating,
    /// Left the system, treated or abandoned.  Terminal.
    Out,
    /// Died while waiting.  Terminal.
    Black,
}

impl Color {
    /// Urgency rank for waiting colors (higher is more urgent); `None` otherwise.
    #[inline]
    pub fn severity(self) -> Option<u8> {
        match self {
            Color::White  => Some(0),
            Color::Yellow => Some(1),
            Color::Red    => Some(2),
            _             => None,
        }
    }

    /// `true` for WHITE, YELLOW and RED: triaged and waiting for a room.
    #[inline]
    pub fn is_waiting(self) -> bool {
        self.severity().is_some()
    }

    /// `true` for OUT and BLACK.  No event may change a terminal color.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Color::Out | Color::Black)
    }

    /// Human-readable label, used for trace rows and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Color::New      => "NEW",
            Color::White    => "WHITE",
            Color::Yellow   => "YELLOW",
            Color::Red      => "RED",
            Color::Treating => "TREATING",
            Color::Out      => "OUT",
            Color::Black    => "BLACK",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── TriageRotation ────────────────────────────────────────────────────────────

/// Round-robin color assignment: WHITE → YELLOW → RED → WHITE → …
///
/// One rotation is shared by every patient of a run, so the color a patient
/// receives depends only on how many triages happened before it.  This is a
/// load-generation policy, not a clinical decision.
#[derive(Clone, Debug)]
pub struct TriageRotation {
    last: Color,
}

impl TriageRotation {
    /// A fresh rotation whose first assignment is WHITE.
    pub fn new() -> Self {
        Self { last: Color::Red }
    }

    /// Advance the rotation and return the assigned color.
    pub fn next_color(&mut self) -> Color {
        self.last = match self.last {
            Color::White  => Color::Yellow,
            Color::Yellow => Color::Red,
            _             => Color::White,
        };
        self.last
    }
}

impl Default for TriageRotation {
    fn default() -> Self {
        Self::new()
    }
}
