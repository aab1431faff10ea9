//! Configuration types for the photo census

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;

/// What to do with a file that cannot be opened as an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the whole scan at the first unreadable file
    #[default]
    Abort,
    /// Log the file and continue without it
    Skip,
}

/// Format of the final dataset dump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text table followed by a shape summary
    #[default]
    Table,
    /// JSON array of records
    Json,
}

/// Configuration for the photo census
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory to scan
    pub folder: PathBuf,

    /// File extensions to ignore, compared case-insensitively
    pub ignore_extensions: Vec<String>,

    /// chrono pattern used to parse the capture timestamp
    pub timestamp_format: String,

    /// Timezone label of the library. Recorded only, never applied to timestamps.
    pub timezone: String,

    /// EXIF tag name holding the capture timestamp
    pub timestamp_tag: String,

    /// EXIF tag name holding the camera model
    pub camera_tag: String,

    /// Chart canvas width in character cells
    pub chart_width: u16,

    /// Chart canvas height in character cells
    pub chart_height: u16,

    /// Print the bar chart of photos per camera
    pub camera_chart: bool,

    /// Print the line chart of photos per day and camera
    pub date_chart: bool,

    /// Behavior on files that fail the image integrity check
    pub on_unreadable: FailurePolicy,

    /// Number of threads for metadata extraction (0 = auto, 1 = sequential)
    pub threads: usize,

    /// Sort each directory's entries by file name during the walk
    pub sort_entries: bool,

    /// Follow symbolic links during the walk
    pub follow_links: bool,

    /// Format of the dataset dump
    pub output_format: OutputFormat,

    /// Log at debug level instead of info
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("."),
            ignore_extensions: vec![
                "md".into(), "mov".into(), "mp4".into(), "cr2".into(), "raf".into(),
            ],
            timestamp_format: "%Y:%m:%d %H:%M:%S".into(),
            timezone: "Europe/Berlin".into(),
            timestamp_tag: "DateTime".into(),
            camera_tag: "Model".into(),
            chart_width: 100,
            chart_height: 20,
            camera_chart: false,
            date_chart: false,
            on_unreadable: FailurePolicy::default(),
            threads: 0,
            sort_entries: false,
            follow_links: false,
            output_format: OutputFormat::default(),
            verbose: false,
        }
    }
}

impl Config {
    /// Default log level; `RUST_LOG` still overrides it
    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }

    /// Ignore list normalized to lower case without a leading dot
    pub fn ignore_set(&self) -> HashSet<String> {
        self.ignore_extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect()
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            source: e,
        })?;

        fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    /// Generate a sample configuration file content
    pub fn sample_config() -> String {
        r#"# Photo Census Configuration File
# This file uses TOML format (https://toml.io)

# Root directory to scan (the positional CLI argument overrides it)
folder = "/home/me/Pictures"

# Extensions to skip, matched case-insensitively ("MOV" and "mov" are the same)
ignore_extensions = ["md", "mov", "mp4", "cr2", "raf"]

# chrono pattern of the capture timestamp
timestamp_format = "%Y:%m:%d %H:%M:%S"

# Timezone of the library. Informational only: timestamps are never converted.
timezone = "Europe/Berlin"

# EXIF tags read for each photo
timestamp_tag = "DateTime"
camera_tag = "Model"

# Chart canvas in character cells
chart_width = 100
chart_height = 20

# Charts to print after the dataset
camera_chart = false
date_chart = false

# Files that cannot be opened as images: "abort" or "skip"
on_unreadable = "abort"

# Threads for metadata extraction (0 = auto-detect, 1 = sequential)
threads = 0

# Sort directory entries by name for reproducible row order
sort_entries = false

# Follow symbolic links
follow_links = false

# Dataset dump: "table" or "json"
output_format = "table"

# Log at debug level
verbose = false
"#
        .to_string()
    }
}

/// Errors that can occur when loading or saving configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse configuration file
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Failed to write configuration file
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to serialize configuration
    SerializeError {
        source: toml::ser::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError { path, source } => {
                write!(f, "Failed to read config file '{}': {}", path.display(), source)
            }
            ConfigError::ParseError { path, source } => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), source)
            }
            ConfigError::WriteError { path, source } => {
                write!(f, "Failed to write config file '{}': {}", path.display(), source)
            }
            ConfigError::SerializeError { source } => {
                write!(f, "Failed to serialize config: {}", source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::WriteError { source, .. } => Some(source),
            ConfigError::SerializeError { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ignore_set_is_normalized() {
        let config = Config {
            ignore_extensions: vec![".MOV".into(), "Md".into(), " cr2 ".into(), "".into()],
            ..Config::default()
        };
        let set = config.ignore_set();
        assert_eq!(set.len(), 3);
        assert!(set.contains("mov"));
        assert!(set.contains("md"));
        assert!(set.contains("cr2"));
    }

    #[test]
    fn test_sample_config_parses_to_defaults() {
        let config: Config = toml::from_str(&Config::sample_config()).unwrap();
        let defaults = Config::default();
        assert_eq!(config.ignore_extensions, defaults.ignore_extensions);
        assert_eq!(config.timestamp_format, defaults.timestamp_format);
        assert_eq!(config.chart_width, defaults.chart_width);
        assert_eq!(config.on_unreadable, FailurePolicy::Abort);
        assert_eq!(config.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let config: Config = toml::from_str("on_unreadable = \"skip\"\nthreads = 1\n").unwrap();
        assert_eq!(config.on_unreadable, FailurePolicy::Skip);
        assert_eq!(config.threads, 1);
        assert_eq!(config.camera_tag, "Model");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("census.toml");

        let config = Config {
            ignore_extensions: vec!["heic".into()],
            date_chart: true,
            ..Config::default()
        };
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.ignore_extensions, vec!["heic".to_string()]);
        assert!(loaded.date_chart);
    }

    #[test]
    fn test_verbose_from_file_sets_log_level() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("census.toml");
        fs::write(&path, "verbose = true\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert!(config.verbose);
        assert_eq!(config.log_level(), Level::DEBUG);
        assert_eq!(Config::default().log_level(), Level::INFO);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load_from_file("/nonexistent/census.toml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
        assert!(err.to_string().contains("census.toml"));
    }
}
