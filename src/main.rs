use clap::Parser;
use srccat::{Cli, OutputFormatter, SrcCat, SrcCatError, UserFriendlyError};
use std::process;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbosity_level());

    let exit_code = run(&cli);
    process::exit(exit_code);
}

fn run(cli: &Cli) -> i32 {
    if cli.generate_config {
        return handle_generate_config(cli);
    }

    let srccat = match SrcCat::from_cli(cli) {
        Ok(srccat) => srccat,
        Err(e) => {
            print_startup_error(cli, &e);
            return exit_code_for(&e);
        }
    };

    if cli.dry_run {
        return handle_dry_run(&srccat);
    }

    match srccat.concatenate() {
        Ok(report) => {
            srccat.output_formatter().print_report(&report);
            0
        }
        Err(e) => {
            srccat.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &SrcCatError) -> i32 {
    match error {
        SrcCatError::Config { .. } => 2,
        _ => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "srccat.toml".to_string());

    match SrcCat::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  srccat --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(srccat: &SrcCat) -> i32 {
    let formatter = srccat.output_formatter();
    formatter.info("DRY RUN MODE - the output file will not be written");

    match srccat.plan() {
        Ok(plan) => {
            formatter.print_plan(&plan, &srccat.config().output_path);
            0
        }
        Err(e) => {
            srccat.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn print_startup_error(cli: &Cli, error: &SrcCatError) {
    let formatter = OutputFormatter::new(cli.output_format.into(), 0, false);
    formatter.print_user_friendly_error(error);
}

/// RUST_LOG wins over the -v level. Logs go to stderr.
fn setup_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "srccat=info",
        _ => "srccat=debug",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
