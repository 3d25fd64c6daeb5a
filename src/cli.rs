use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "srccat")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Concatenate source files from two directories into a single text file")]
#[command(
    long_about = "srccat lists two directories (without recursing), keeps the files whose \
                  names end with each directory's extension, and writes every file's content \
                  under a 'Contents of file <name>:' header into one output file."
)]
#[command(after_help = "EXAMPLES:\n  \
    srccat --dir-a lib --ext-a .dart --dir-b android/src/main/kotlin --ext-b .kt\n  \
    srccat --config srccat.toml --output bundle.txt\n  \
    srccat --dry-run -v\n  \
    srccat --generate-config")]
pub struct Cli {
    /// First source directory
    #[arg(long, value_name = "PATH")]
    pub dir_a: Option<PathBuf>,

    /// File suffix selected in the first directory (e.g. .dart)
    #[arg(long, value_name = "SUFFIX", allow_hyphen_values = true)]
    pub ext_a: Option<String>,

    /// Second source directory
    #[arg(long, value_name = "PATH")]
    pub dir_b: Option<PathBuf>,

    /// File suffix selected in the second directory (e.g. .kt)
    #[arg(long, value_name = "SUFFIX", allow_hyphen_values = true)]
    pub ext_b: Option<String>,

    /// Output file (created or truncated)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for messages
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only the confirmation message)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be written without writing)
    #[arg(long, help = "List the files that would be concatenated without writing the output")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl From<OutputFormat> for OutputMode {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_source_dir_a(self.dir_a.clone())
            .with_ext_a(self.ext_a.clone())
            .with_source_dir_b(self.dir_b.clone())
            .with_ext_b(self.ext_b.clone())
            .with_output_path(self.output.clone())
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
