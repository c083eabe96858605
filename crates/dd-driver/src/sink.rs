//! Report destinations.
//!
//! | Sink               | Destination                                  |
//! |--------------------|----------------------------------------------|
//! | [`TextFileWriter`] | one line per report in a text file           |
//! | [`MemorySink`]     | `Vec<String>`, for tests and embedding hosts |

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use dd_engine::Report;

use crate::DriverResult;

/// Trait implemented by every report destination.
pub trait ReportSink {
    /// Write one report as one line.
    fn write_report(&mut self, report: &Report) -> DriverResult<()>;

    /// Write a batch of reports in order.
    fn write_reports(&mut self, reports: &[Report]) -> DriverResult<()> {
        for report in reports {
            self.write_report(report)?;
        }
        Ok(())
    }

    /// Flush and close the destination.
    ///
    /// Calling it again after success is a no-op.
    fn finish(&mut self) -> DriverResult<()>;
}

// ── Text file ─────────────────────────────────────────────────────────────────

/// Writes each report's `Display` line, newline-terminated.
pub struct TextFileWriter {
    out:      BufWriter<File>,
    lines:    usize,
    finished: bool,
}

impl TextFileWriter {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: &Path) -> DriverResult<Self> {
        let file = File::create(path)?;
        Ok(Self { out: BufWriter::new(file), lines: 0, finished: false })
    }

    /// Number of lines written so far.
    pub fn lines(&self) -> usize {
        self.lines
    }
}

impl ReportSink for TextFileWriter {
    fn write_report(&mut self, report: &Report) -> DriverResult<()> {
        writeln!(self.out, "{report}")?;
        self.lines += 1;
        Ok(())
    }

    fn finish(&mut self) -> DriverResult<()> {
        if self.finished {
            return Ok(());
        }
        self.out.flush()?;
        self.finished = true;
        Ok(())
    }
}

// ── In-memory ─────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemorySink {
    pub lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportSink for MemorySink {
    fn write_report(&mut self, report: &Report) -> DriverResult<()> {
        self.lines.push(report.to_string());
        Ok(())
    }

    fn finish(&mut self) -> DriverResult<()> {
        Ok(())
    }
}
