//! Simulation observer trait for event traces and reporting.

use er_core::{Patient, SimTime};
use er_queue::Event;

use crate::Outcome;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — console trace
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_event(&mut self, event: &Event, _patient: Option<&Patient>) {
///         println!("{event}");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once before the first event, with the generated population size.
    fn on_sim_start(&mut self, _opening: SimTime, _generated: usize) {}

    /// Called after each event has been dispatched.
    ///
    /// `patient` is the concerned patient in its post-event state, or `None`
    /// for FREE_STUDIO and TICK.
    fn on_event(&mut self, _event: &Event, _patient: Option<&Patient>) {}

    /// Called once after the queue drains.
    fn on_sim_end(&mut self, _outcome: &Outcome) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Fans every callback out to both observers, first `A` then `B`.
impl<A: SimObserver, B: SimObserver> SimObserver for (A, B) {
    fn on_sim_start(&mut self, opening: SimTime, generated: usize) {
        self.0.on_sim_start(opening, generated);
        self.1.on_sim_start(opening, generated);
    }

    fn on_event(&mut self, event: &Event, patient: Option<&Patient>) {
        self.0.on_event(event, patient);
        self.1.on_event(event, patient);
    }

    fn on_sim_end(&mut self, outcome: &Outcome) {
        self.0.on_sim_end(outcome);
        self.1.on_sim_end(outcome);
    }
}
