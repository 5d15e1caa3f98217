//! Final counters of a run.

/// The three output counters plus the generated population.
///
/// `treated + abandoned + dead + unresolved() == generated` at all times.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outcome {
    pub generated: u32,
    pub treated:   u32,
    /// WHITE patients whose wait timed out.
    pub abandoned: u32,
    /// RED patients whose wait timed out.
    pub dead:      u32,
}

impl Outcome {
    /// Patients not yet in a terminal state (waiting, in a room, or not yet triaged).
    #[inline]
    pub fn unresolved(&self) -> u32 {
        self.generated - (self.treated + self.abandoned + self.dead)
    }
}
