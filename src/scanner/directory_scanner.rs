use crate::error::{Result, SrcCatError};
use crate::scanner::file_filter::ExtensionFilter;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A matched directory entry. Content is read later, when its block is written.
///
/// `file_name` is the name as listed; `filename` is its lossy UTF-8 rendering
/// used for matching, reports and logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub source_path: PathBuf,
    pub file_name: OsString,
    pub filename: String,
    pub size: u64,
}

impl SourceEntry {
    pub fn new(source_path: PathBuf, size: u64) -> Self {
        let file_name = source_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        let filename = file_name.to_string_lossy().into_owned();

        Self {
            source_path,
            file_name,
            filename,
            size,
        }
    }
}

pub struct DirectoryScanner {
    filter: ExtensionFilter,
}

impl DirectoryScanner {
    pub fn new(filter: ExtensionFilter) -> Self {
        Self { filter }
    }

    /// Lists `root` one level deep and keeps the entries whose name ends with
    /// the filter's suffix, in the order the filesystem returns them.
    pub fn scan_directory<P: AsRef<Path>>(&self, root: P) -> Result<Vec<SourceEntry>> {
        let root_path = root.as_ref();
        ensure_directory(root_path)?;

        let walker = WalkDir::new(root_path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);

        let mut entries = Vec::new();

        for entry in walker {
            let entry = entry.map_err(|err| {
                let path = err.path().unwrap_or(root_path).to_path_buf();
                SrcCatError::filesystem(path, io::Error::from(err))
            })?;

            if let Some(source) = self.process_entry(&entry) {
                entries.push(source);
            }
        }

        tracing::debug!(
            dir = %root_path.display(),
            suffix = self.filter.suffix(),
            matched = entries.len(),
            "scanned directory"
        );

        Ok(entries)
    }

    fn process_entry(&self, entry: &DirEntry) -> Option<SourceEntry> {
        let name = entry.file_name().to_string_lossy();
        if !self.filter.matches(&name) {
            return None;
        }

        let metadata = if entry.file_type().is_symlink() {
            fs::metadata(entry.path()).ok()
        } else {
            entry.metadata().ok()
        };

        match metadata {
            Some(metadata) if metadata.is_dir() => {
                tracing::debug!(path = %entry.path().display(), "skipping matching directory");
                None
            }
            Some(metadata) => Some(SourceEntry::new(entry.path().to_path_buf(), metadata.len())),
            // Dangling link or vanished entry: reading it reports the failure.
            None => Some(SourceEntry::new(entry.path().to_path_buf(), 0)),
        }
    }
}

/// Fails with a filesystem error unless `path` exists and is a directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|e| SrcCatError::filesystem(path, e))?;

    if !metadata.is_dir() {
        return Err(SrcCatError::filesystem(
            path,
            io::Error::other("not a directory"),
        ));
    }

    Ok(())
}
