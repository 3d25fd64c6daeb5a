use crate::error::{Result, SrcCatError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The five recognized options. Serialized as flat TOML keys.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub source_dir_a: PathBuf,
    pub ext_a: String,
    pub source_dir_b: PathBuf,
    pub ext_b: String,
    pub output_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir_a: PathBuf::from("../lib"),
            ext_a: ".dart".to_string(),
            source_dir_b: PathBuf::from("../android/src/main/kotlin/im/nfc/flutter_nfc_kit"),
            ext_b: ".kt".to_string(),
            output_path: PathBuf::from("all_flutter_nfc_kit_files.txt"),
        }
    }
}

pub const DEFAULT_CONFIG_PATHS: &[&str] = &["srccat.toml", ".srccat.toml"];

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SrcCatError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| SrcCatError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| SrcCatError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                for default_path in DEFAULT_CONFIG_PATHS {
                    if Path::new(default_path).exists() {
                        tracing::debug!(path = default_path, "loading configuration");
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref dir) = cli_args.source_dir_a {
            self.source_dir_a = dir.clone();
        }

        if let Some(ref ext) = cli_args.ext_a {
            self.ext_a = ext.clone();
        }

        if let Some(ref dir) = cli_args.source_dir_b {
            self.source_dir_b = dir.clone();
        }

        if let Some(ref ext) = cli_args.ext_b {
            self.ext_b = ext.clone();
        }

        if let Some(ref output) = cli_args.output_path {
            self.output_path = output.clone();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| SrcCatError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| SrcCatError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for (key, ext) in [("ext_a", &self.ext_a), ("ext_b", &self.ext_b)] {
            if ext.is_empty() {
                return Err(SrcCatError::Config {
                    message: format!("{} must be a non-empty file suffix", key),
                });
            }

            // A suffix is matched against a base name, so it can never hold a separator.
            if ext.contains('/') || ext.contains(std::path::MAIN_SEPARATOR) {
                return Err(SrcCatError::Config {
                    message: format!("{} must not contain a path separator: {}", key, ext),
                });
            }
        }

        for (key, path) in [
            ("source_dir_a", &self.source_dir_a),
            ("source_dir_b", &self.source_dir_b),
            ("output_path", &self.output_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(SrcCatError::Config {
                    message: format!("{} must not be empty", key),
                });
            }
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub source_dir_a: Option<PathBuf>,
    pub ext_a: Option<String>,
    pub source_dir_b: Option<PathBuf>,
    pub ext_b: Option<String>,
    pub output_path: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_dir_a(mut self, dir: Option<PathBuf>) -> Self {
        self.source_dir_a = dir;
        self
    }

    pub fn with_ext_a(mut self, ext: Option<String>) -> Self {
        self.ext_a = ext;
        self
    }

    pub fn with_source_dir_b(mut self, dir: Option<PathBuf>) -> Self {
        self.source_dir_b = dir;
        self
    }

    pub fn with_ext_b(mut self, ext: Option<String>) -> Self {
        self.ext_b = ext;
        self
    }

    pub fn with_output_path(mut self, output: Option<PathBuf>) -> Self {
        self.output_path = output;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.ext_a, ".dart");
        assert_eq!(config.ext_b, ".kt");
        assert_eq!(config.output_path, PathBuf::from("all_flutter_nfc_kit_files.txt"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.ext_a.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.ext_b = "sub/.kt".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.output_path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let config = Config {
            source_dir_a: PathBuf::from("src"),
            ext_a: ".rs".to_string(),
            source_dir_b: PathBuf::from("scripts"),
            ext_b: ".sh".to_string(),
            output_path: PathBuf::from("bundle.txt"),
        };
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config, loaded_config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "ext_a = \".txt\"").unwrap();

        let config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.ext_a, ".txt");
        assert_eq!(config.ext_b, ".kt");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "ext_a = [").unwrap();

        let err = Config::load_from_file(temp_file.path()).unwrap_err();
        assert!(matches!(err, SrcCatError::Config { .. }));
    }

    #[test]
    fn test_missing_config_file() {
        assert!(Config::load_from_file("/definitely/not/here.toml").is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_ext_a(Some(".txt".to_string()))
            .with_output_path(Some(PathBuf::from("out.txt")));

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.ext_a, ".txt");
        assert_eq!(config.output_path, PathBuf::from("out.txt"));
        assert_eq!(config.ext_b, ".kt");
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(sample.contains("source_dir_a"));
        assert!(sample.contains("ext_a = \".dart\""));
        assert!(sample.contains("ext_b = \".kt\""));
        assert!(sample.contains("output_path"));
    }
}
