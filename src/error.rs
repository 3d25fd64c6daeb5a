use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SrcCatError {
    #[error("Filesystem access failed for {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl SrcCatError {
    /// Wrap an `io::Error` with the path it happened on.
    pub fn filesystem<P: AsRef<Path>>(path: P, source: std::io::Error) -> Self {
        SrcCatError::Filesystem {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn is_filesystem(&self) -> bool {
        matches!(self, SrcCatError::Filesystem { .. })
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for SrcCatError {
    fn user_message(&self) -> String {
        match self {
            SrcCatError::Filesystem { path, source } => {
                format!("Cannot access {}: {}", path.display(), source)
            }
            SrcCatError::Config { message } => {
                format!("Configuration error: {}", message)
            }
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            SrcCatError::Filesystem { source, .. } => match source.kind() {
                std::io::ErrorKind::NotFound => Some(
                    "Check the source directories with --dir-a/--dir-b or the paths in your configuration file.".to_string()
                ),
                std::io::ErrorKind::PermissionDenied => Some(
                    "Ensure you have read access to the source files and write access to the output path.".to_string()
                ),
                _ => None,
            },
            SrcCatError::Config { .. } => Some(
                "Check your configuration file syntax, or run with --generate-config to create a sample.".to_string()
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, SrcCatError>;
