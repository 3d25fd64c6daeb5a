pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config};
pub use error::{Result, SrcCatError, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{ConcatProgress, ConcatReport, Concatenator, FileInfo, Phase, PhaseSummary};
pub use scanner::{DirectoryScanner, ExtensionFilter, SourceEntry};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::path::Path;

/// Main library interface for srccat functionality
pub struct SrcCat {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl SrcCat {
    /// Create a new SrcCat instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create SrcCat instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;

        Ok(Self::new(
            config,
            cli_args.output_format.into(),
            cli_args.verbose,
            cli_args.quiet,
        ))
    }

    /// Concatenate both directories into the configured output file
    pub fn concatenate(&self) -> Result<ConcatReport> {
        let concatenator = Concatenator::from_config(&self.config);

        self.output_formatter.start_operation(&format!(
            "Concatenating {} and {} files into {}",
            self.config.ext_a,
            self.config.ext_b,
            self.config.output_path.display()
        ));

        for phase in concatenator.phases() {
            self.output_formatter.debug(&format!(
                "Selecting {} files in {}",
                phase.filter.suffix(),
                phase.source_dir.display()
            ));
        }

        let labels: Vec<String> = concatenator
            .phases()
            .iter()
            .map(|p| p.filter.suffix().to_string())
            .collect();
        let file_progress = self.progress_manager.create_file_progress();
        let progress_callback = {
            let pb = file_progress.clone();
            move |progress: &ConcatProgress| {
                ui::progress::update_file_progress(&pb, progress, &labels);
            }
        };

        let result = concatenator.run(Some(&progress_callback));

        match result {
            Ok(report) => {
                ui::progress::finish_progress_with_summary(
                    &file_progress,
                    &format!("Wrote {} files", report.total_files()),
                    report.duration,
                );
                self.progress_manager.clear();
                Ok(report)
            }
            Err(e) => {
                file_progress.abandon();
                self.progress_manager.clear();
                Err(e)
            }
        }
    }

    /// List what a run would write, without writing anything
    pub fn plan(&self) -> Result<Vec<PhaseSummary>> {
        Concatenator::from_config(&self.config).plan()
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let path = output_path.as_ref();
        let sample_config = Config::create_sample_config();
        std::fs::write(path, sample_config).map_err(|e| SrcCatError::filesystem(path, e))?;
        Ok(())
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &SrcCatError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Concatenate with plain defaults and no terminal output
pub fn concatenate_files<A, B, O>(
    dir_a: A,
    ext_a: &str,
    dir_b: B,
    ext_b: &str,
    output_path: O,
) -> Result<ConcatReport>
where
    A: AsRef<Path>,
    B: AsRef<Path>,
    O: AsRef<Path>,
{
    Concatenator::new(
        Phase::new(dir_a.as_ref(), ext_a),
        Phase::new(dir_b.as_ref(), ext_b),
        output_path.as_ref(),
    )
    .run(None)
}
