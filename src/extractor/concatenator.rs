use crate::config::Config;
use crate::error::{Result, SrcCatError};
use crate::extractor::report::{ConcatReport, FileInfo, PhaseSummary};
use crate::scanner::{ensure_directory, DirectoryScanner, ExtensionFilter};
use std::borrow::Cow;
use std::ffi::OsStr;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const BLOCK_SEPARATOR: &[u8] = b"\n\n";
const OUTPUT_BUFFER_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct ConcatProgress {
    pub phase: usize,
    pub files_in_phase: usize,
    pub files_processed: usize,
    pub bytes_written: u64,
    pub current_file: Option<String>,
    pub start_time: Instant,
}

impl ConcatProgress {
    pub fn new() -> Self {
        Self {
            phase: 0,
            files_in_phase: 0,
            files_processed: 0,
            bytes_written: 0,
            current_file: None,
            start_time: Instant::now(),
        }
    }

    pub fn start_phase(&mut self, phase: usize, files_in_phase: usize) {
        self.phase = phase;
        self.files_in_phase = files_in_phase;
        self.files_processed = 0;
        self.current_file = None;
    }

    pub fn update_file(&mut self, filename: String, bytes: u64) {
        self.files_processed += 1;
        self.bytes_written += bytes;
        self.current_file = Some(filename);
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for ConcatProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct Phase {
    pub source_dir: PathBuf,
    pub filter: ExtensionFilter,
}

impl Phase {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(source_dir: P, extension: S) -> Self {
        Self {
            source_dir: source_dir.into(),
            filter: ExtensionFilter::new(extension),
        }
    }

    fn scanner(&self) -> DirectoryScanner {
        DirectoryScanner::new(self.filter.clone())
    }
}

/// Writes every matching file of two directories into one output file.
pub struct Concatenator {
    phases: [Phase; 2],
    output_path: PathBuf,
}

impl Concatenator {
    pub fn new<P: Into<PathBuf>>(phase_a: Phase, phase_b: Phase, output_path: P) -> Self {
        Self {
            phases: [phase_a, phase_b],
            output_path: output_path.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Phase::new(&config.source_dir_a, &config.ext_a),
            Phase::new(&config.source_dir_b, &config.ext_b),
            &config.output_path,
        )
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Lists and filters both directories without touching the output file.
    pub fn plan(&self) -> Result<Vec<PhaseSummary>> {
        self.phases
            .iter()
            .map(|phase| {
                let entries = phase.scanner().scan_directory(&phase.source_dir)?;
                Ok(PhaseSummary {
                    source_dir: phase.source_dir.clone(),
                    extension: phase.filter.suffix().to_string(),
                    files: entries.iter().map(FileInfo::from).collect(),
                })
            })
            .collect()
    }

    /// Both source directories are checked before the output file is created,
    /// so a missing directory leaves any existing output untouched. Later
    /// failures abort the run and leave a partially written file.
    pub fn run(
        &self,
        progress_callback: Option<&dyn Fn(&ConcatProgress)>,
    ) -> Result<ConcatReport> {
        for phase in &self.phases {
            ensure_directory(&phase.source_dir)?;
        }

        let output_file = fs::File::create(&self.output_path)
            .map_err(|e| SrcCatError::filesystem(&self.output_path, e))?;
        let mut writer = BufWriter::with_capacity(OUTPUT_BUFFER_SIZE, output_file);
        tracing::info!(output = %self.output_path.display(), "created output file");

        let mut progress = ConcatProgress::new();
        let mut summaries = Vec::with_capacity(self.phases.len());

        for (index, phase) in self.phases.iter().enumerate() {
            let entries = phase.scanner().scan_directory(&phase.source_dir)?;
            tracing::info!(
                dir = %phase.source_dir.display(),
                suffix = phase.filter.suffix(),
                files = entries.len(),
                "starting phase"
            );

            progress.start_phase(index, entries.len());
            if let Some(callback) = progress_callback {
                callback(&progress);
            }

            let mut files = Vec::with_capacity(entries.len());
            for entry in &entries {
                let content = fs::read(&entry.source_path)
                    .map_err(|e| SrcCatError::filesystem(&entry.source_path, e))?;

                let written = write_block(&mut writer, &entry.file_name, &content)
                    .map_err(|e| SrcCatError::filesystem(&self.output_path, e))?;
                tracing::debug!(file = %entry.filename, bytes = content.len(), "wrote block");

                progress.update_file(entry.filename.clone(), written);
                if let Some(callback) = progress_callback {
                    callback(&progress);
                }

                files.push(FileInfo {
                    filename: entry.filename.clone(),
                    size: content.len() as u64,
                });
            }

            summaries.push(PhaseSummary {
                source_dir: phase.source_dir.clone(),
                extension: phase.filter.suffix().to_string(),
                files,
            });
        }

        writer
            .flush()
            .map_err(|e| SrcCatError::filesystem(&self.output_path, e))?;

        tracing::info!(
            output = %self.output_path.display(),
            bytes = progress.bytes_written,
            "concatenation complete"
        );

        Ok(ConcatReport {
            output_path: self.output_path.clone(),
            phases: summaries,
            bytes_written: progress.bytes_written,
            duration: progress.elapsed(),
            completed_at: chrono::Utc::now(),
        })
    }
}

/// The name is written as listed. Non-UTF-8 names keep their raw bytes on Unix.
pub fn format_header(file_name: &OsStr) -> Vec<u8> {
    let name = name_bytes(file_name);
    let mut header = Vec::with_capacity(name.len() + 19);
    header.extend_from_slice(b"Contents of file ");
    header.extend_from_slice(&name);
    header.extend_from_slice(b":\n");
    header
}

#[cfg(unix)]
fn name_bytes(file_name: &OsStr) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(file_name.as_bytes())
}

#[cfg(not(unix))]
fn name_bytes(file_name: &OsStr) -> Cow<'_, [u8]> {
    match file_name.to_string_lossy() {
        Cow::Borrowed(name) => Cow::Borrowed(name.as_bytes()),
        Cow::Owned(name) => Cow::Owned(name.into_bytes()),
    }
}

/// Writes header, content and separator. Returns the number of bytes written.
pub fn write_block<W: Write>(
    writer: &mut W,
    file_name: &OsStr,
    content: &[u8],
) -> std::io::Result<u64> {
    let header = format_header(file_name);
    writer.write_all(&header)?;
    writer.write_all(content)?;
    writer.write_all(BLOCK_SEPARATOR)?;

    Ok((header.len() + content.len() + BLOCK_SEPARATOR.len()) as u64)
}
