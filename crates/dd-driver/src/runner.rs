//! `Runner` — feeds script lines to a [`DispatchEngine`] and streams the
//! resulting reports into a [`ReportSink`].
//!
//! Each line is isolated: a line that fails to parse, or a query for an
//! order that is not active, is logged at `warn`, counted in the
//! [`RunSummary`], and skipped.  Only sink I/O errors abort a run.

use dd_engine::{DispatchEngine, EngineError, Report};
use tracing::{debug, warn};

use crate::{Command, DriverResult, ReportSink, ScriptLine};

/// Counters accumulated over a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines executed successfully.
    pub executed:   usize,
    /// Lines that failed to parse.
    pub malformed:  usize,
    /// Queries for an order that is not active.
    pub not_found:  usize,
    /// Report lines written.
    pub reports:    usize,
    /// Of which delivery notifications.
    pub deliveries: usize,
}

pub struct Runner<S: ReportSink> {
    engine:  DispatchEngine,
    sink:    S,
    summary: RunSummary,
}

impl<S: ReportSink> Runner<S> {
    pub fn new(engine: DispatchEngine, sink: S) -> Self {
        Self { engine, sink, summary: RunSummary::default() }
    }

    pub fn engine(&self) -> &DispatchEngine {
        &self.engine
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn into_parts(self) -> (DispatchEngine, S, RunSummary) {
        (self.engine, self.sink, self.summary)
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run every line in order, then finish the sink.
    pub fn run(&mut self, lines: &[ScriptLine]) -> DriverResult<RunSummary> {
        for line in lines {
            self.run_line(line)?;
        }
        self.sink.finish()?;
        debug!(summary = ?self.summary, "script complete");
        Ok(self.summary.clone())
    }

    /// Parse and execute one line.
    pub fn run_line(&mut self, line: &ScriptLine) -> DriverResult<()> {
        match line.parse() {
            Ok(cmd) => self.run_command(cmd),
            Err(e) => {
                warn!(line = line.number, text = %line.text, error = %e, "skipping malformed line");
                self.summary.malformed += 1;
                Ok(())
            }
        }
    }

    /// Execute one command and write its reports.
    pub fn run_command(&mut self, cmd: Command) -> DriverResult<()> {
        debug!(command = %cmd, now = %self.engine.now(), "executing");
        match self.execute(cmd) {
            Ok(reports) => {
                self.summary.executed += 1;
                self.summary.reports += reports.len();
                self.summary.deliveries += reports.iter().filter(|r| r.is_delivery()).count();
                self.sink.write_reports(&reports)
            }
            Err(EngineError::NotFound(id)) => {
                warn!(command = %cmd, order = %id, "order not active; no output");
                self.summary.not_found += 1;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn execute(&mut self, cmd: Command) -> Result<Vec<Report>, EngineError> {
        let engine = &mut self.engine;
        let reports = match cmd {
            Command::Create { id, created_at, value, duration } => {
                engine.create(id, created_at, value, duration)
            }
            Command::Print { id } => vec![engine.describe(id)?],
            Command::PrintRange { start, end } => vec![engine.describe_range(start, end)],
            Command::Rank { id } => vec![engine.rank_of(id)?],
            Command::Cancel { id, now } => engine.cancel(id, now),
            Command::UpdateTime { id, now, duration } => engine.update_duration(id, now, duration),
            Command::Quit => engine.finish(),
        };
        Ok(reports)
    }
}
