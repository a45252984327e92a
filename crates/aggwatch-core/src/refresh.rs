//! Regenerating a summary file from raw logs via the external replayer.
//!
//! The replayer prints a few banner lines before the CSV header; upstream
//! tooling stripped them with `tail -n+4`. The trigger does the same thing
//! natively: run the dump command, drop the banner, overwrite the summary
//! file. Whether the output is actually parseable is deliberately not
//! checked here — a stale or empty summary surfaces as a parse failure in
//! the extractor.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

/// Banner lines the replayer prints before the CSV header.
pub const DUMP_HEADER_LINES: usize = 3;

/// Default replayer invocation, matching the deployed layout.
pub const DEFAULT_DUMP_CMD: &str = "java -cp bin/lib/*:bin/classes/ protocols.DIASLogReplayer";

/// Why a refresh could not be completed.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("failed to spawn dump command: {0}")]
    Spawn(std::io::Error),

    #[error("dump command exited with {status}")]
    CommandFailed { status: std::process::ExitStatus },

    #[error("cannot write summary file: {0}")]
    Io(#[from] std::io::Error),
}

/// Invokes the dump command for a dataset and materializes its summary file.
#[derive(Debug, Clone)]
pub struct RefreshTrigger {
    dump_cmd: String,
    summaries_dir: PathBuf,
    header_lines: usize,
}

impl RefreshTrigger {
    pub fn new(dump_cmd: impl Into<String>, summaries_dir: impl Into<PathBuf>) -> Self {
        Self {
            dump_cmd: dump_cmd.into(),
            summaries_dir: summaries_dir.into(),
            header_lines: DUMP_HEADER_LINES,
        }
    }

    /// Override the number of banner lines stripped from dump output.
    pub fn with_header_lines(mut self, lines: usize) -> Self {
        self.header_lines = lines;
        self
    }

    /// Path the summary for `id` is written to.
    pub fn summary_path(&self, id: &str) -> PathBuf {
        self.summaries_dir.join(format!("{id}.dat"))
    }

    /// Run the dump command for `dump/<id>` and overwrite `summaries/<id>.dat`
    /// with its output, banner stripped. Returns the summary path.
    ///
    /// Blocks until the command exits; there is no timeout, so a hung
    /// replayer hangs the caller.
    pub fn run(&self, id: &str) -> Result<PathBuf, RefreshError> {
        // The deployed dump command carries a classpath glob, so it goes
        // through the shell rather than an argv split.
        let command_line = format!("{} dump/{id}", self.dump_cmd);
        log::debug!("refreshing {id}: {command_line}");

        let output = Command::new("sh")
            .arg("-c")
            .arg(&command_line)
            .output()
            .map_err(RefreshError::Spawn)?;

        if !output.status.success() {
            return Err(RefreshError::CommandFailed {
                status: output.status,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = self.summary_path(id);
        write_skipping_header(&path, &stdout, self.header_lines)?;

        log::debug!("wrote {}", path.display());
        Ok(path)
    }
}

impl Default for RefreshTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_DUMP_CMD, "summaries")
    }
}

/// Write `content` to `path` minus its first `skip` lines, replacing any
/// previous file.
fn write_skipping_header(path: &Path, content: &str, skip: usize) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    for line in content.lines().skip(skip) {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}
