//! Strongly typed patient identifier.
//!
//! Patients live in a single roster `Vec` owned by the engine; every other
//! structure (events, the waiting room) refers to them by `PatientId` only.
//! The inner integer is `pub` so it can index the roster directly, but
//! callers should prefer [`PatientId::index`].

use std::fmt;

/// Sequence number assigned at generation time, stable for the patient's lifetime.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatientId(pub u32);

impl PatientId {
    /// Cast to `usize` for direct use as a roster index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

impl From<PatientId> for usize {
    #[inline(always)]
    fn from(id: PatientId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for PatientId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<PatientId, Self::Error> {
        u32::try_from(n).map(PatientId)
    }
}
