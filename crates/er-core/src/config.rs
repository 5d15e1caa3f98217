//! Run parameters.
//!
//! Typically built by the driver (CLI flags or a JSON file) and handed to the
//! engine builder.  Every field has a default, so a JSON file only needs the
//! keys it wants to change.

use crate::{Color, CoreError, CoreResult, SimTime};

/// All knobs of one simulation run.  Durations are whole minutes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TriageConfig {
    /// Treatment rooms.  Zero is legal: nobody is ever admitted.
    pub total_rooms: u32,

    /// Upper bound on patients generated; arrivals also stop at `closing`.
    pub total_patients: u32,

    /// Gap between consecutive arrivals.
    pub arrival_interval_mins: u32,

    /// Delay between ARRIVAL and TRIAGE.
    pub triage_mins: u32,

    pub treat_white_mins:  u32,
    pub treat_yellow_mins: u32,
    pub treat_red_mins:    u32,

    /// WHITE wait before the patient abandons.
    pub timeout_white_mins: u32,
    /// YELLOW wait before the patient escalates to RED.
    pub timeout_yellow_mins: u32,
    /// RED wait before the patient dies.
    pub timeout_red_mins: u32,

    /// Heartbeat cadence.  Must be non-zero.
    pub tick_interval_mins: u32,

    /// First arrival and first heartbeat.
    pub opening: SimTime,

    /// No arrival is generated at or after this time; the heartbeat stops here.
    pub closing: SimTime,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            total_rooms:           3,
            total_patients:        120,
            arrival_interval_mins: 5,
            triage_mins:           5,
            treat_white_mins:      10,
            treat_yellow_mins:     15,
            treat_red_mins:        30,
            timeout_white_mins:    60,
            timeout_yellow_mins:   30,
            timeout_red_mins:      30,
            tick_interval_mins:    5,
            opening:               SimTime::hm(8, 0),
            closing:               SimTime::hm(20, 0),
        }
    }
}

impl TriageConfig {
    /// Treatment duration for a waiting color; `None` for lifecycle states.
    pub fn treatment_mins(&self, color: Color) -> Option<u32> {
        match color {
            Color::White  => Some(self.treat_white_mins),
            Color::Yellow => Some(self.treat_yellow_mins),
            Color::Red    => Some(self.treat_red_mins),
            _             => None,
        }
    }

    /// Wait timeout for a waiting color; `None` for lifecycle states.
    pub fn timeout_mins(&self, color: Color) -> Option<u32> {
        match color {
            Color::White  => Some(self.timeout_white_mins),
            Color::Yellow => Some(self.timeout_yellow_mins),
            Color::Red    => Some(self.timeout_red_mins),
            _             => None,
        }
    }

    /// Reject parameter combinations the engine cannot run.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_interval_mins == 0 {
            return Err(CoreError::Config(
                "tick_interval_mins must be at least 1".into(),
            ));
        }
        if self.closing < self.opening {
            return Err(CoreError::Config(format!(
                "closing time {} precedes opening time {}",
                self.closing, self.opening
            )));
        }
        if self.horizon().is_none() {
            return Err(CoreError::Config(format!(
                "durations run past the end of the clock after closing time {}",
                self.closing
            )));
        }
        Ok(())
    }

    /// Upper bound on the timestamp of any event a run can schedule, or
    /// `None` if it does not fit the clock.
    ///
    /// Arrivals and heartbeats start before `closing`.  A patient waits at
    /// most until its last deadline (YELLOW escalating to RED is the long
    /// path) and is then admitted for at most the longest treatment.
    pub fn horizon(&self) -> Option<SimTime> {
        let wait = self
            .timeout_white_mins
            .max(self.timeout_red_mins)
            .max(self.timeout_yellow_mins.checked_add(self.timeout_red_mins)?);
        let treat = self
            .treat_white_mins
            .max(self.treat_yellow_mins)
            .max(self.treat_red_mins);
        let stay = self.triage_mins.checked_add(wait)?.checked_add(treat)?;
        let step = stay
            .max(self.arrival_interval_mins)
            .max(self.tick_interval_mins);
        self.closing.checked_plus(step)
    }

    // ── Fluent setters ────────────────────────────────────────────────────

    pub fn with_rooms(mut self, rooms: u32) -> Self {
        self.total_rooms = rooms;
        self
    }

    pub fn with_patients(mut self, patients: u32) -> Self {
        self.total_patients = patients;
        self
    }

    pub fn with_arrival_interval(mut self, mins: u32) -> Self {
        self.arrival_interval_mins = mins;
        self
    }

    pub fn with_triage(mut self, mins: u32) -> Self {
        self.triage_mins = mins;
        self
    }

    /// Set the treatment duration for one waiting color.  Other colors are ignored.
    pub fn with_treatment(mut self, color: Color, mins: u32) -> Self {
        match color {
            Color::White  => self.treat_white_mins = mins,
            Color::Yellow => self.treat_yellow_mins = mins,
            Color::Red    => self.treat_red_mins = mins,
            _             => {}
        }
        self
    }

    /// Set the wait timeout for one waiting color.  Other colors are ignored.
    pub fn with_timeout(mut self, color: Color, mins: u32) -> Self {
        match color {
            Color::White  => self.timeout_white_mins = mins,
            Color::Yellow => self.timeout_yellow_mins = mins,
            Color::Red    => self.timeout_red_mins = mins,
            _             => {}
        }
        self
    }

    pub fn with_tick_interval(mut self, mins: u32) -> Self {
        self.tick_interval_mins = mins;
        self
    }

    pub fn with_window(mut self, opening: SimTime, closing: SimTime) -> Self {
        self.opening = opening;
        self.closing = closing;
        self
    }
}
