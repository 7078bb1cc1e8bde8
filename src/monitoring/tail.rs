//! Incremental, rotation-tolerant file tailing.
//!
//! The tailer keeps a byte offset into the target file and reads only the
//! complete lines appended since the previous poll. It never holds the file
//! open between polls, so log rotation can replace the file freely.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use crate::utils::WatcherResult;

/// Tails a growing log file from a stored byte offset.
#[derive(Debug)]
pub struct LogTailer {
    path: PathBuf,
    offset: u64,
}

impl LogTailer {
    /// Create a tailer for `path`, starting at offset 0.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            offset: 0,
        }
    }

    /// Path of the tailed file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current byte offset into the file
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Sleep in `poll_interval` steps until the file exists, logging each
    /// attempt.
    pub async fn wait_for_file(&self, poll_interval: Duration) {
        while !self.path.exists() {
            info!(log_file = %self.path.display(), "Waiting for log file");
            tokio::time::sleep(poll_interval).await;
        }
    }

    /// Move the offset to the current end of the file and return it.
    ///
    /// Content already in the file is skipped; only lines appended afterwards
    /// are treated as live traffic.
    pub fn seek_to_end(&mut self) -> WatcherResult<u64> {
        let len = fs::metadata(&self.path)?.len();
        self.offset = len;
        Ok(len)
    }

    /// Read all complete lines appended since the last poll.
    ///
    /// If the file is now smaller than the stored offset it was truncated or
    /// replaced by rotation; the offset resets to 0 so reading resumes from
    /// the start of the new incarnation. An unterminated trailing fragment is
    /// left in the file for the next poll. Blank lines are skipped.
    pub fn poll(&mut self) -> WatcherResult<Vec<String>> {
        let file_len = fs::metadata(&self.path)?.len();

        if file_len < self.offset {
            info!(
                previous_offset = self.offset,
                current_size = file_len,
                "Log file truncated or rotated, resetting offset"
            );
            self.offset = 0;
        }

        if file_len == self.offset {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let mut reader = BufReader::new(file);
        reader.seek(SeekFrom::Start(self.offset))?;

        let mut lines = Vec::new();
        let mut buf = String::new();

        loop {
            buf.clear();
            let read = reader.read_line(&mut buf)?;
            if read == 0 {
                break;
            }
            if !buf.ends_with('\n') {
                // Still being written; pick it up once the newline lands.
                break;
            }

            self.offset += read as u64;

            let line = buf.trim_end();
            if line.is_empty() {
                continue;
            }
            lines.push(line.to_string());
        }

        if !lines.is_empty() {
            debug!(
                new_lines = lines.len(),
                offset = self.offset,
                "Read new log lines"
            );
        }

        Ok(lines)
    }
}
