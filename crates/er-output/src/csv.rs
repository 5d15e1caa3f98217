//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `events.csv`: one row per dispatched event
//! - `summary.csv`: one row per finished run

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{EventRow, OutputResult, SummaryRow};
use crate::writer::OutputWriter;

/// Writes the event trace and run summary to two CSV files.
pub struct CsvWriter {
    events:   Writer<File>,
    summary:  Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(["time", "minute", "kind", "patient_id", "color"])?;

        let mut summary = Writer::from_path(dir.join("summary.csv"))?;
        summary.write_record(["generated", "treated", "abandoned", "dead", "unresolved"])?;

        Ok(Self {
            events,
            summary,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.time.to_string(),
            row.time.0.to_string(),
            row.kind.as_str().to_owned(),
            row.patient_id.map(|id| id.to_string()).unwrap_or_default(),
            row.color.map(|c| c.as_str().to_owned()).unwrap_or_default(),
        ])?;
        Ok(())
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        self.summary.write_record(&[
            row.generated.to_string(),
            row.treated.to_string(),
            row.abandoned.to_string(),
            row.dead.to_string(),
            row.unresolved.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.summary.flush()?;
        Ok(())
    }
}
