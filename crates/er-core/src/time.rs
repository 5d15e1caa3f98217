//! Simulation time model.
//!
//! # Design
//!
//! Time is a whole number of minutes since midnight of the simulated day.
//! Every duration in the simulator (arrival gap, triage, treatment, timeouts,
//! heartbeat) is a whole number of minutes, so all schedule arithmetic is
//! exact and comparisons are O(1).
//!
//! There is no wrap at midnight: a timeout scheduled at 23:50 + 30 lands on
//! minute 1460, which displays as `+1d 00:20` and parses back from the same
//! text.  Ordering across midnight is therefore preserved for free.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// An absolute simulated timestamp, in minutes since midnight.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct SimTime(pub u32);

impl SimTime {
    pub const MIDNIGHT: SimTime = SimTime(0);

    /// Build a timestamp from an hour and minute on the first simulated day.
    #[inline]
    pub const fn hm(hour: u32, minute: u32) -> SimTime {
        SimTime(hour * 60 + minute)
    }

    /// Return the timestamp `mins` minutes after `self`, saturating at the
    /// end of the clock.  A validated config never gets near it.
    #[inline]
    pub fn plus(self, mins: u32) -> SimTime {
        SimTime(self.0.saturating_add(mins))
    }

    /// `mins` minutes after `self`, or `None` past the end of the clock.
    #[inline]
    pub fn checked_plus(self, mins: u32) -> Option<SimTime> {
        self.0.checked_add(mins).map(SimTime)
    }

    /// Minutes elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> u32 {
        self.0 - earlier.0
    }

    /// Break the timestamp into (day, hour, minute).
    pub fn dhm(self) -> (u32, u32, u32) {
        let day = self.0 / MINUTES_PER_DAY;
        let rem = self.0 % MINUTES_PER_DAY;
        (day, rem / 60, rem % 60)
    }
}

impl std::ops::Add<u32> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: u32) -> SimTime {
        self.plus(rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = u32;
    #[inline]
    fn sub(self, rhs: SimTime) -> u32 {
        self.since(rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.dhm();
        if d > 0 {
            write!(f, "+{d}d {h:02}:{m:02}")
        } else {
            write!(f, "{h:02}:{m:02}")
        }
    }
}

impl FromStr for SimTime {
    type Err = CoreError;

    /// Parse `"HH:MM"` (first simulated day) or `"+Nd HH:MM"`, the two forms
    /// written by `Display`.
    fn from_str(s: &str) -> Result<SimTime, CoreError> {
        let bad = || CoreError::Parse(format!("expected HH:MM or +Nd HH:MM, got {s:?}"));
        let s = s.trim();
        let (day, clock) = match s.strip_prefix('+') {
            Some(rest) => {
                let (d, clock) = rest.split_once("d ").ok_or_else(bad)?;
                let day: u32 = d.parse().map_err(|_| bad())?;
                (day, clock)
            }
            None => (0, s),
        };
        let (h, m) = clock.split_once(':').ok_or_else(bad)?;
        let hour: u32 = h.parse().map_err(|_| bad())?;
        let minute: u32 = m.parse().map_err(|_| bad())?;
        if hour > 23 || minute > 59 {
            return Err(bad());
        }
        day.checked_mul(MINUTES_PER_DAY)
            .and_then(|base| base.checked_add(hour * 60 + minute))
            .map(SimTime)
            .ok_or_else(bad)
    }
}

impl TryFrom<String> for SimTime {
    type Error = CoreError;
    fn try_from(s: String) -> Result<SimTime, CoreError> {
        s.parse()
    }
}

impl From<SimTime> for String {
    fn from(t: SimTime) -> String {
        t.to_string()
    }
}
