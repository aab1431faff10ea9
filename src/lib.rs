//! Photo Census - inventory a photo library by camera and capture date
//!
//! This library provides:
//! - Recursive discovery of photos with an extension/visibility filter
//! - Image integrity checks and EXIF decoding (JPEG, TIFF, PNG, WebP, HEIF)
//! - Tag lookup by name through a pluggable registry
//! - A dataset of (photo, capture date, camera) records
//! - Photo counts per camera and a gap-free daily count per camera
//! - Text tables and ratatui charts for the console

pub mod chart;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod metadata;
pub mod output;
pub mod probe;
pub mod scanner;
pub mod summary;

#[cfg(test)]
mod fixtures;

pub use cli::Cli;
pub use config::{Config, ConfigError, FailurePolicy, OutputFormat};
pub use dataset::{Dataset, DatasetBuilder, PhotoRecord};
pub use error::{Error, Result};
pub use metadata::{ExifTagRegistry, MetadataTable, TagRegistry};
pub use scanner::{ScanEvent, ScanReport, ScanStats, Scanner};
pub use summary::{CameraSummary, DateCameraSummary};
