//! `er-output` — simulation output writers for the ER triage simulator.
//!
//! | Backend | Files created                   |
//! |---------|---------------------------------|
//! | CSV     | `events.csv`, `summary.csv`     |
//!
//! Backends implement [`OutputWriter`] and are driven by [`TraceObserver`],
//! which implements `er_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use er_output::{CsvWriter, TraceObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = TraceObserver::new(writer);
//! sim.run(&mut obs).unwrap();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::{EventRow, SummaryRow};
pub use writer::OutputWriter;
