//! The `OutputWriter` trait implemented by all backend writers.

use crate::{EventRow, OutputResult, SummaryRow};

/// Trait implemented by output backends.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with [`TraceObserver::take_error`][crate::TraceObserver::take_error].
pub trait OutputWriter {
    /// Append one event-trace row.
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()>;

    /// Write the run summary.
    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
