use std::fmt;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// Upper bound on bytes kept per stream; older output is dropped.
pub const MAX_CAPTURED_BYTES: u64 = 64 * 1024;

/// Tail of a server process's stdout and stderr, kept for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// Read the tails of the two log files. Missing files read as empty.
    pub fn read_from(stdout_path: &Path, stderr_path: &Path) -> Self {
        Self {
            stdout: read_tail(stdout_path, MAX_CAPTURED_BYTES),
            stderr: read_tail(stderr_path, MAX_CAPTURED_BYTES),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stdout.trim().is_empty() && self.stderr.trim().is_empty()
    }
}

fn read_tail(path: &Path, max_bytes: u64) -> String {
    let Ok(mut file) = File::open(path) else {
        return String::new();
    };

    let len = file.metadata().map(|m| m.len()).unwrap_or(0);
    let truncated = len > max_bytes;
    if truncated && file.seek(SeekFrom::Start(len - max_bytes)).is_err() {
        return String::new();
    }

    let mut bytes = Vec::new();
    if file.take(max_bytes).read_to_end(&mut bytes).is_err() {
        return String::new();
    }

    let text = String::from_utf8_lossy(&bytes).into_owned();
    if truncated {
        format!(
            "[... {} earlier bytes omitted ...]\n{text}",
            len - max_bytes
        )
    } else {
        text
    }
}

/// Renders as an empty string when nothing was captured, so it can be
/// appended to error messages unconditionally.
impl fmt::Display for ProcessOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        if !self.stdout.trim().is_empty() {
            write!(f, "\n--- server stdout ---\n{}", self.stdout.trim_end())?;
        }
        if !self.stderr.trim().is_empty() {
            write!(f, "\n--- server stderr ---\n{}", self.stderr.trim_end())?;
        }
        Ok(())
    }
}
