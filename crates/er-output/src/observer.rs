//! `TraceObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use er_core::Patient;
use er_queue::Event;
use er_sim::{Outcome, SimObserver};

use crate::row::{EventRow, SummaryRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes every dispatched event and the final
/// summary to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct TraceObserver<W: OutputWriter> {
    writer:         W,
    events_written: u64,
    last_error:     Option<OutputError>,
}

impl<W: OutputWriter> TraceObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            events_written: 0,
            last_error:     None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Number of event rows successfully handed to the writer.
    pub fn events_written(&self) -> u64 {
        self.events_written
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for TraceObserver<W> {
    fn on_event(&mut self, event: &Event, patient: Option<&Patient>) {
        let row = EventRow {
            time:       event.time,
            kind:       event.kind,
            patient_id: event.patient.map(|id| id.0),
            color:      patient.map(Patient::color),
        };
        let result = self.writer.write_event(&row);
        if result.is_ok() {
            self.events_written += 1;
        }
        self.store_err(result);
    }

    fn on_sim_end(&mut self, outcome: &Outcome) {
        let result = self.writer.write_summary(&SummaryRow::from(outcome));
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
