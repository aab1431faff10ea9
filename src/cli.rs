//! CLI argument parsing with clap

use crate::config::{Config, FailurePolicy, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

/// Photo Census - inventory a photo library by camera and capture date
///
/// Scans a directory tree, reads the capture timestamp and camera model
/// embedded in every photo, prints the resulting table and optionally charts
/// photos per camera and photos per day.
#[derive(Parser, Debug)]
#[command(name = "photo-census")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to photos directory which should be scanned
    pub folder_path: Option<PathBuf>,

    /// Path to configuration file (TOML format)
    ///
    /// Settings from the file are used as defaults; CLI arguments override them.
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Print a sample configuration file and exit
    #[arg(long)]
    pub print_config: bool,

    /// File extensions to ignore (case-insensitive, comma separated)
    #[arg(short = 'x', long = "ignore-ext", value_delimiter = ',', num_args = 1..)]
    pub ignore_ext: Option<Vec<String>>,

    /// chrono pattern of the capture timestamp
    #[arg(long)]
    pub timestamp_format: Option<String>,

    /// Timezone label of the library (informational, never applied)
    #[arg(long)]
    pub timezone: Option<String>,

    /// EXIF tag holding the capture timestamp
    #[arg(long)]
    pub timestamp_tag: Option<String>,

    /// EXIF tag holding the camera model
    #[arg(long)]
    pub camera_tag: Option<String>,

    /// Chart photos per camera
    #[arg(short = 'c', long)]
    pub camera_chart: bool,

    /// Chart photos per day and camera
    #[arg(short = 'd', long)]
    pub date_chart: bool,

    /// Chart width in character cells
    #[arg(long)]
    pub width: Option<u16>,

    /// Chart height in character cells
    #[arg(long)]
    pub height: Option<u16>,

    /// What to do with files that cannot be opened as images
    #[arg(long, value_enum)]
    pub on_unreadable: Option<FailurePolicy>,

    /// Number of threads for metadata extraction (0 = auto, 1 = sequential)
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// Sort directory entries by name for reproducible row order
    #[arg(short = 's', long)]
    pub sort: bool,

    /// Follow symbolic links
    #[arg(short = 'L', long)]
    pub follow_links: bool,

    /// Format of the dataset dump
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Also write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Write the log file as JSON
    #[arg(long)]
    pub json_log: bool,
}

impl Cli {
    /// Merge CLI arguments with config from file
    /// CLI arguments take precedence over config file settings
    pub fn merge_with_config(&self, mut config: Config) -> Config {
        if let Some(ref folder) = self.folder_path {
            config.folder = folder.clone();
        }
        if let Some(ref ignore) = self.ignore_ext {
            config.ignore_extensions = ignore.clone();
        }
        if let Some(ref format) = self.timestamp_format {
            config.timestamp_format = format.clone();
        }
        if let Some(ref timezone) = self.timezone {
            config.timezone = timezone.clone();
        }
        if let Some(ref tag) = self.timestamp_tag {
            config.timestamp_tag = tag.clone();
        }
        if let Some(ref tag) = self.camera_tag {
            config.camera_tag = tag.clone();
        }
        if self.camera_chart {
            config.camera_chart = true;
        }
        if self.date_chart {
            config.date_chart = true;
        }
        if let Some(width) = self.width {
            config.chart_width = width;
        }
        if let Some(height) = self.height {
            config.chart_height = height;
        }
        if let Some(policy) = self.on_unreadable {
            config.on_unreadable = policy;
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if self.sort {
            config.sort_entries = true;
        }
        if self.follow_links {
            config.follow_links = true;
        }
        if let Some(format) = self.format {
            config.output_format = format;
        }
        if self.verbose {
            config.verbose = true;
        }

        config
    }

    /// Convert CLI arguments to Config (when no config file is used)
    pub fn to_config(&self) -> Config {
        self.merge_with_config(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_folder_only() {
        let cli = Cli::try_parse_from(["photo-census", "/photos"]).unwrap();
        let config = cli.to_config();
        assert_eq!(config.folder, PathBuf::from("/photos"));
        assert!(!config.camera_chart);
        assert!(!config.date_chart);
        assert_eq!(config.ignore_extensions, Config::default().ignore_extensions);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "photo-census",
            "/photos",
            "-c",
            "-d",
            "--width",
            "80",
            "--ignore-ext",
            "MOV,md",
            "--on-unreadable",
            "skip",
            "-f",
            "json",
        ])
        .unwrap();
        let config = cli.to_config();
        assert!(config.camera_chart);
        assert!(config.date_chart);
        assert_eq!(config.chart_width, 80);
        assert_eq!(config.chart_height, 20);
        assert_eq!(config.ignore_extensions, ["MOV", "md"]);
        assert_eq!(config.on_unreadable, FailurePolicy::Skip);
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = Config {
            folder: PathBuf::from("/from/file"),
            threads: 2,
            date_chart: true,
            verbose: true,
            ..Config::default()
        };

        let cli = Cli::try_parse_from(["photo-census", "/from/cli", "-t", "1"]).unwrap();
        let config = cli.merge_with_config(file);
        assert_eq!(config.folder, PathBuf::from("/from/cli"));
        assert_eq!(config.threads, 1);
        // flags that were not given keep the file's value
        assert!(config.date_chart);
        assert!(config.verbose);

        let cli = Cli::try_parse_from(["photo-census"]).unwrap();
        let config = cli.merge_with_config(Config {
            folder: PathBuf::from("/from/file"),
            ..Config::default()
        });
        assert_eq!(config.folder, PathBuf::from("/from/file"));
    }
}
