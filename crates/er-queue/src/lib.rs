//! `er-queue` — the two priority structures the engine drives.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                 |
//! |------------------|----------------------------------------------------------|
//! | [`event`]        | `Event`, `EventKind`                                     |
//! | [`event_queue`]  | `EventQueue` (`BTreeMap<(SimTime, rank, seq), Event>`)   |
//! | [`waiting_room`] | `WaitingRoom` (ordered set + id index for removal)       |
//!
//! # Ordering summary
//!
//! ```text
//! EventQueue   : time ↑, then kind rank ↑, then insertion sequence ↑
//! WaitingRoom  : severity ↓ (RED > YELLOW > WHITE), then arrival ↑, then id ↑
//! ```
//!
//! Both structures hold `PatientId`s only; the engine's roster owns the
//! patients themselves.

pub mod event;
pub mod event_queue;
pub mod waiting_room;


pub use event::{Event, EventKind};
pub use event_queue::EventQueue;
pub use waiting_room::WaitingRoom;
