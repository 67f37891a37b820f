//! On-air log.
//!
//! Appends one record per narrated script to daily JSONL files at
//! ~/.jockey-history/{date}-onair.jsonl. Write-only: nothing reads it back.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use serde::Serialize;
use tracing::{debug, warn};

use crate::script::Segment;

/// Default log directory, if there is a home directory.
pub fn default_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".jockey-history"))
}

#[derive(Debug, Clone, Serialize)]
pub struct OnAirRecord {
    pub timestamp: String,
    pub index: u64,
    pub title: String,
    pub url: String,
    pub source: String,
    pub voice: String,
    pub segments: Vec<Segment>,
    pub playback_ms: i64,
    pub failed: bool,
}

pub struct OnAirLog {
    dir: PathBuf,
}

impl OnAirLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn file_for(&self, date: &str) -> PathBuf {
        self.dir.join(format!("{date}-onair.jsonl"))
    }

    /// Append a record to today's file. Failures are logged, never returned.
    pub fn append(&self, record: &OnAirRecord) {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            warn!("Failed to create on-air log dir: {e}");
            return;
        }

        let date = Local::now().format("%Y-%m-%d").to_string();
        let path = self.file_for(&date);

        let mut file = match fs::OpenOptions::new().create(true).append(true).open(&path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Failed to open on-air log {}: {e}", path.display());
                return;
            }
        };

        match serde_json::to_string(record) {
            Ok(line) => {
                if let Err(e) = writeln!(file, "{line}") {
                    warn!("Failed to write on-air record: {e}");
                } else {
                    debug!("Logged script {} to {}", record.index, path.display());
                }
            }
            Err(e) => warn!("Failed to serialize on-air record: {e}"),
        }
    }
}
