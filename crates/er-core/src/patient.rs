//! A roster entry.

use crate::{Color, PatientId, SimTime};

/// One simulated patient.
///
/// `id` and `arrival` are fixed at generation; only `color` changes, and only
/// through the engine's event handlers.  Fields are private to keep it that way.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Patient {
    id:      PatientId,
    arrival: SimTime,
    color:   Color,
}

impl Patient {
    /// A freshly generated patient in state NEW.
    pub fn new(id: PatientId, arrival: SimTime) -> Self {
        Self { id, arrival, color: Color::New }
    }

    #[inline]
    pub fn id(&self) -> PatientId {
        self.id
    }

    #[inline]
    pub fn arrival(&self) -> SimTime {
        self.arrival
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Replace the color.  Engine-only by convention.
    ///
    /// # Panics
    /// Panics in debug mode if the current color is terminal.
    #[inline]
    pub fn set_color(&mut self, color: Color) {
        debug_assert!(
            !self.color.is_terminal(),
            "{} is {} and cannot become {color}",
            self.id,
            self.color,
        );
        self.color = color;
    }
}
