//! `er-sim` — event-driven engine for the emergency-room triage simulator.
//!
//! # Event loop
//!
//! ```text
//! initialize():
//!   seed TICK @ opening
//!   for t = opening, opening + gap, … while t < closing and n < total_patients:
//!     roster += Patient(NEW, t);  queue += ARRIVAL @ t
//!
//! run():
//!   while let Some(e) = queue.pop():       (time ↑, kind rank ↑, push order ↑)
//!     ARRIVAL     → TRIAGE @ t + triage
//!     TRIAGE      → next round-robin color, join waiting room, TIMEOUT @ t + timeout(color)
//!     FREE_STUDIO → if a room is free, admit the most urgent patient, TREATED @ t + treatment(color)
//!     TIMEOUT     → WHITE: abandon · YELLOW: re-queue as RED + TIMEOUT · RED: dies · else ignore
//!     TREATED     → OUT, room freed, FREE_STUDIO @ t
//!     TICK        → FREE_STUDIO @ t if a room is free and someone waits; TICK @ t + tick while t < closing
//! ```
//!
//! The queue drains on its own: heartbeats stop at closing and every patient
//! lifecycle ends in OUT or BLACK.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use er_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new().rooms(2).patients(60).build()?;
//! let outcome = sim.run(&mut NoopObserver)?;
//! println!("treated {} / abandoned {} / dead {}", outcome.treated, outcome.abandoned, outcome.dead);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod outcome;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use outcome::Outcome;
pub use sim::Sim;
