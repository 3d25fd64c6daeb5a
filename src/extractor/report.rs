use crate::scanner::SourceEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub filename: String,
    pub size: u64,
}

impl From<&SourceEntry> for FileInfo {
    fn from(entry: &SourceEntry) -> Self {
        Self {
            filename: entry.filename.clone(),
            size: entry.size,
        }
    }
}

/// One (directory, extension) pair and the files it selected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseSummary {
    pub source_dir: PathBuf,
    pub extension: String,
    pub files: Vec<FileInfo>,
}

impl PhaseSummary {
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcatReport {
    pub output_path: PathBuf,
    pub phases: Vec<PhaseSummary>,
    pub bytes_written: u64,
    pub duration: Duration,
    pub completed_at: DateTime<Utc>,
}

impl ConcatReport {
    pub fn total_files(&self) -> usize {
        self.phases.iter().map(|p| p.files.len()).sum()
    }

    pub fn extensions(&self) -> Vec<&str> {
        self.phases.iter().map(|p| p.extension.as_str()).collect()
    }

    /// The one-line confirmation printed when a run completes.
    pub fn confirmation_message(&self) -> String {
        format!(
            "All {} files have been written to {}",
            self.extensions().join(" and "),
            self.output_path.display()
        )
    }
}
