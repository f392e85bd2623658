//! Append-only journal persistence for the history buffer.
//!
//! One JSON-encoded string per line, so messages containing newlines
//! survive a round trip. Appends are O(1); the file is only rewritten
//! during startup compaction, when replay finds more lines than the
//! buffer capacity retains.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use chathub_core::AppResult;

/// Append-only message journal backing a history buffer.
#[derive(Debug)]
pub struct Journal {
    path: PathBuf,
    file: File,
}

impl Journal {
    /// Opens the journal at `path`, replaying existing entries.
    ///
    /// Returns the journal plus the replayed tail, truncated to the final
    /// `capacity` entries. When the file held more than `capacity` lines
    /// it is compacted down to the retained tail.
    pub fn open(path: impl AsRef<Path>, capacity: usize) -> AppResult<(Self, Vec<String>)> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut entries = Vec::new();
        let mut total_lines = 0usize;
        if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            for line in reader.lines() {
                let line = line?;
                if line.is_empty() {
                    continue;
                }
                total_lines += 1;
                match serde_json::from_str::<String>(&line) {
                    Ok(msg) => entries.push(msg),
                    Err(e) => {
                        // A torn write from a crash; skip the line.
                        warn!(path = %path.display(), error = %e, "Skipping corrupt journal line");
                    }
                }
            }
        }

        let skip = entries.len().saturating_sub(capacity);
        let entries: Vec<String> = entries.into_iter().skip(skip).collect();

        if total_lines > entries.len() {
            Self::compact(&path, &entries)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok((Self { path, file }, entries))
    }

    /// Appends one message as a single journal line and flushes.
    pub fn append(&mut self, message: &str) -> AppResult<()> {
        let line = serde_json::to_string(message)?;
        writeln!(self.file, "{line}")?;
        self.file.flush()?;
        Ok(())
    }

    /// Rewrites the journal to hold exactly `entries`.
    fn compact(path: &Path, entries: &[String]) -> AppResult<()> {
        let mut file = File::create(path)?;
        for entry in entries {
            writeln!(file, "{}", serde_json::to_string(entry)?)?;
        }
        file.flush()?;
        Ok(())
    }

    /// Path of the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
