//! `dd-driver` — runs command scripts against the dispatch engine.
//!
//! # Pipeline
//!
//! ```text
//! script file ──load_script_path──▶ Vec<ScriptLine>
//!             ──Runner::run──▶ Command::parse ─▶ DispatchEngine ─▶ Report
//!             ──ReportSink──▶ <stem>_output_file.txt
//! ```
//!
//! # Crate layout
//!
//! | Module      | Contents                                               |
//! |-------------|--------------------------------------------------------|
//! | [`command`] | `Command` and its line parser                          |
//! | [`script`]  | `ScriptLine`, script loaders, `output_path_for`        |
//! | [`config`]  | JSON `DispatchConfig` loader                           |
//! | [`sink`]    | `ReportSink`, `TextFileWriter`, `MemorySink`           |
//! | [`runner`]  | `Runner`, `RunSummary`                                 |
//! | [`error`]   | `DriverError`, `DriverResult<T>`                       |
//!
//! # Usage
//!
//! ```rust,ignore
//! use dd_driver::{load_script_path, output_path_for, Runner, TextFileWriter};
//! use dd_engine::DispatchEngine;
//!
//! let input = Path::new("input.txt");
//! let lines = load_script_path(input)?;
//! let sink = TextFileWriter::create(&output_path_for(input))?;
//! let summary = Runner::new(DispatchEngine::new(), sink).run(&lines)?;
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod runner;
pub mod script;
pub mod sink;


pub use command::Command;
pub use config::{load_config_path, load_config_reader};
pub use error::{DriverError, DriverResult};
pub use runner::{RunSummary, Runner};
pub use script::{ScriptLine, load_script_path, load_script_reader, output_path_for};
pub use sink::{MemorySink, ReportSink, TextFileWriter};
