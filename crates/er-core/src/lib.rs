//! `er-core` — foundational types for the emergency-room triage simulator.
//!
//! This crate is a dependency of every other `er-*` crate.  It has no `er-*`
//! dependencies and minimal external ones (only `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `PatientId`                                           |
//! | [`time`]        | `SimTime` (minutes since midnight)                    |
//! | [`color`]       | `Color` lifecycle states, `TriageRotation`            |
//! | [`patient`]     | `Patient` roster entry                                |
//! | [`config`]      | `TriageConfig` run parameters and defaults            |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | `SimTime` round-trips as an `"HH:MM"` string.              |

pub mod color;
pub mod config;
pub mod error;
pub mod ids;
pub mod patient;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use color::{Color, TriageRotation};
pub use config::TriageConfig;
pub use error::{CoreError, CoreResult};
pub use ids::PatientId;
pub use patient::Patient;
pub use time::SimTime;
