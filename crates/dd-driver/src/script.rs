//! Command-script loader.
//!
//! A script is plain UTF-8 text with one command per line (see
//! [`crate::command`] for the syntax).  Blank lines are dropped here; every
//! other line is kept verbatim with its 1-based line number so the runner
//! can parse and execute lines one at a time and report failures against
//! the source.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::{Command, DriverResult};

/// One non-blank script line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptLine {
    pub number: usize,
    pub text:   String,
}

impl ScriptLine {
    pub fn parse(&self) -> DriverResult<Command> {
        Command::parse(&self.text, self.number)
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load every non-blank line of the script at `path`.
pub fn load_script_path(path: &Path) -> DriverResult<Vec<ScriptLine>> {
    let file = File::open(path)?;
    load_script_reader(file)
}

/// Like [`load_script_path`] but accepts any `Read` source.
pub fn load_script_reader<R: Read>(reader: R) -> DriverResult<Vec<ScriptLine>> {
    let mut lines = Vec::new();
    for (i, line) in BufReader::new(reader).lines().enumerate() {
        let text = line?;
        if text.trim().is_empty() {
            continue;
        }
        lines.push(ScriptLine { number: i + 1, text });
    }
    Ok(lines)
}

/// Default output file for a script: `<dir>/<stem>_output_file.txt`, where
/// `<stem>` is the file name up to its first `.`.
///
/// ```rust,ignore
/// assert_eq!(
///     output_path_for(Path::new("runs/input.v2.txt")),
///     PathBuf::from("runs/input_output_file.txt"),
/// );
/// ```
pub fn output_path_for(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.split('.').next().unwrap_or_default();
    let file = format!("{stem}_output_file.txt");
    match input.parent() {
        Some(dir) => dir.join(file),
        None => PathBuf::from(file),
    }
}
