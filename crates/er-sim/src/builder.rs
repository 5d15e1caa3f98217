//! Fluent builder for constructing a [`Sim`].

use er_core::{Color, SimTime, TriageConfig};

use crate::{Sim, SimResult};

/// Fluent builder for [`Sim`].
///
/// Every knob starts at its [`TriageConfig::default`] value:
///
/// | Method                    | Default        |
/// |---------------------------|----------------|
/// | `.rooms(n)`               | 3              |
/// | `.patients(n)`            | 120            |
/// | `.arrival_interval(m)`    | 5 min          |
/// | `.triage(m)`              | 5 min          |
/// | `.treatment(color, m)`    | 10 / 15 / 30   |
/// | `.timeout(color, m)`      | 60 / 30 / 30   |
/// | `.tick_interval(m)`       | 5 min          |
/// | `.window(open, close)`    | 08:00 – 20:00  |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new()
///     .rooms(1)
///     .treatment(Color::White, 60)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct SimBuilder {
    config: TriageConfig,
}

impl SimBuilder {
    /// A builder holding the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration (e.g. one loaded from JSON).
    pub fn from_config(config: TriageConfig) -> Self {
        Self { config }
    }

    pub fn rooms(mut self, rooms: u32) -> Self {
        self.config = self.config.with_rooms(rooms);
        self
    }

    pub fn patients(mut self, patients: u32) -> Self {
        self.config = self.config.with_patients(patients);
        self
    }

    pub fn arrival_interval(mut self, mins: u32) -> Self {
        self.config = self.config.with_arrival_interval(mins);
        self
    }

    pub fn triage(mut self, mins: u32) -> Self {
        self.config = self.config.with_triage(mins);
        self
    }

    pub fn treatment(mut self, color: Color, mins: u32) -> Self {
        self.config = self.config.with_treatment(color, mins);
        self
    }

    pub fn timeout(mut self, color: Color, mins: u32) -> Self {
        self.config = self.config.with_timeout(color, mins);
        self
    }

    pub fn tick_interval(mut self, mins: u32) -> Self {
        self.config = self.config.with_tick_interval(mins);
        self
    }

    pub fn window(mut self, opening: SimTime, closing: SimTime) -> Self {
        self.config = self.config.with_window(opening, closing);
        self
    }

    /// The configuration as built so far.
    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    /// Validate the configuration and return an initialized [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        Sim::new(self.config)
    }
}
