use crate::error::{SrcCatError, UserFriendlyError};
use crate::extractor::{ConcatReport, PhaseSummary};
use crate::ui::progress::format_duration;
use console::{style, Emoji, Term};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");
static SPARKLES: Emoji = Emoji("✨ ", "* ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Success, message),
            OutputMode::Json => self.print_json_message("success", message),
            OutputMode::Plain => println!("{}", message),
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                OutputMode::Json => self.print_json_message("operation_start", operation),
                OutputMode::Plain => println!("STARTING: {}", operation),
            }
        }
    }

    pub fn print_user_friendly_error(&self, error: &SrcCatError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    /// The confirmation line is printed even in quiet mode.
    pub fn print_report(&self, report: &ConcatReport) {
        match self.mode {
            OutputMode::Human => {
                if self.should_show_message(1) {
                    self.print_phases(&report.phases);
                    println!(
                        "  {} files, {} written in {}",
                        report.total_files(),
                        format_bytes(report.bytes_written),
                        format_duration(report.duration)
                    );
                }
                self.success(&report.confirmation_message());
            }
            OutputMode::Json => {
                let mut value = serde_json::to_value(report).unwrap_or_default();
                if let Some(object) = value.as_object_mut() {
                    object.insert("type".to_string(), serde_json::json!("report"));
                    object.insert(
                        "message".to_string(),
                        serde_json::json!(report.confirmation_message()),
                    );
                }
                self.print_json_object(&value);
            }
            OutputMode::Plain => {
                if self.should_show_message(1) {
                    for phase in &report.phases {
                        for file in &phase.files {
                            println!("{}", phase.source_dir.join(&file.filename).display());
                        }
                    }
                }
                println!("{}", report.confirmation_message());
            }
        }
    }

    pub fn print_plan(&self, plan: &[PhaseSummary], output_path: &Path) {
        match self.mode {
            OutputMode::Human => {
                self.print_header("Dry run");
                self.print_phases(plan);
                println!("  Output file: {}", output_path.display());
            }
            OutputMode::Json => {
                let phases = serde_json::to_value(plan).unwrap_or_default();
                self.print_json_object(&serde_json::json!({
                    "type": "plan",
                    "phases": phases,
                    "output_path": output_path.display().to_string(),
                }));
            }
            OutputMode::Plain => {
                for phase in plan {
                    for file in &phase.files {
                        println!("{}", phase.source_dir.join(&file.filename).display());
                    }
                }
                println!("OUTPUT: {}", output_path.display());
            }
        }
    }

    pub fn print_header(&self, title: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            println!("{} {}", SPARKLES, style(title).bold().cyan());
        } else {
            println!("=== {} ===", title);
        }
    }

    fn print_phases(&self, phases: &[PhaseSummary]) {
        for phase in phases {
            let heading = format!(
                "{} ({}): {} files, {}",
                phase.source_dir.display(),
                phase.extension,
                phase.files.len(),
                format_bytes(phase.total_size())
            );
            if self.use_colors {
                println!("  {}", style(heading).bold());
            } else {
                println!("  {}", heading);
            }

            for file in &phase.files {
                println!("    {} ({})", file.filename, format_bytes(file.size));
            }
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        if self.use_colors {
            match msg_type {
                MessageType::Success => println!("{}{}", CHECKMARK, style(message).green().bold()),
                MessageType::Error => eprintln!("{}{}", CROSS, style(message).red().bold()),
                MessageType::Info => println!("{}{}", INFO, style(message).cyan()),
            }
        } else {
            match msg_type {
                MessageType::Success => println!("{}", message),
                MessageType::Error => eprintln!("✗ {}", message),
                MessageType::Info => println!("i {}", message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Info,
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_mode() {
        let formatter = OutputFormatter::new(OutputMode::Human, 2, true);
        assert_eq!(formatter.verbose_level, 0);
        assert!(formatter.quiet);
        assert!(!formatter.use_colors);
    }

    #[test]
    fn test_non_human_modes_never_colour() {
        let formatter = OutputFormatter::new(OutputMode::Json, 0, false);
        assert!(!formatter.use_colors);
        assert_eq!(formatter.mode(), OutputMode::Json);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
    }

    #[test]
    fn test_should_show_message() {
        let formatter = OutputFormatter::new(OutputMode::Plain, 1, false);
        assert!(formatter.should_show_message(0));
        assert!(formatter.should_show_message(1));
        assert!(!formatter.should_show_message(2));

        let quiet_formatter = OutputFormatter::new(OutputMode::Plain, 2, true);
        assert!(!quiet_formatter.should_show_message(0));
    }
}
