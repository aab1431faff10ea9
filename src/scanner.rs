//! Directory scanner that turns a photo tree into a [`Dataset`]
//!
//! The walk itself is sequential. Per-file work (integrity check, metadata
//! decode, field parsing) can run on a Rayon pool; results are collected in
//! discovery order so the dataset is the same for any thread count. Dataset
//! order follows the directory walk, which is filesystem dependent unless
//! `sort_entries` is set.

use crate::config::{Config, FailurePolicy};
use crate::dataset::{Dataset, DatasetBuilder, PhotoRecord};
use crate::error::{Error, Result};
use crate::filter::is_eligible;
use crate::metadata::{self, ExifTagRegistry, TagRegistry, parse_timestamp};
use crate::probe;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info, span, warn};
use walkdir::WalkDir;

/// Something worth reporting about a single file during a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// The file is an image without an embedded metadata table
    MissingMetadata(PathBuf),
    /// The file could not be read and was left out
    Skipped { path: PathBuf, reason: String },
}

/// Counters collected during a scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Directory entries seen by the walk
    pub visited: usize,
    /// Files rejected by the extension/visibility filter
    pub filtered: usize,
    /// Files opened and inspected
    pub inspected: usize,
    /// Records added to the dataset
    pub recorded: usize,
    /// Images without a metadata table
    pub missing_metadata: usize,
    /// Unreadable files left out under [`FailurePolicy::Skip`]
    pub skipped: usize,
}

impl ScanStats {
    pub fn summary(&self) -> String {
        format!(
            "Visited: {}, Filtered: {}, Inspected: {}, Recorded: {}, No metadata: {}, Skipped: {}",
            self.visited,
            self.filtered,
            self.inspected,
            self.recorded,
            self.missing_metadata,
            self.skipped
        )
    }
}

/// Result of a completed scan
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub dataset: Dataset,
    pub stats: ScanStats,
}

/// What inspecting one file produced
#[derive(Debug)]
enum FileOutcome {
    Record(PhotoRecord),
    NoMetadata,
}

/// Scans a directory tree for photos
pub struct Scanner<R: TagRegistry = ExifTagRegistry> {
    config: Config,
    registry: R,
}

impl Scanner<ExifTagRegistry> {
    /// Create a scanner resolving tag names with the EXIF registry
    pub fn new(config: Config) -> Self {
        Self::with_registry(config, ExifTagRegistry)
    }
}

impl<R: TagRegistry> Scanner<R> {
    pub fn with_registry(config: Config, registry: R) -> Self {
        Self { config, registry }
    }

    /// Scan `root`, discarding per-file events
    pub fn scan(&self, root: &Path) -> Result<ScanReport> {
        self.scan_with(root, |_| {})
    }

    /// Scan `root`, passing per-file events to `on_event` in discovery order
    ///
    /// Under [`FailurePolicy::Abort`] the first unreadable file (in discovery
    /// order) ends the scan with its error; events for the files before it
    /// have already been delivered.
    pub fn scan_with<F>(&self, root: &Path, mut on_event: F) -> Result<ScanReport>
    where
        F: FnMut(&ScanEvent),
    {
        let _span = span!(Level::INFO, "scan", root = %root.display()).entered();

        let mut stats = ScanStats::default();
        let candidates = self.collect_candidates(root, &mut stats)?;
        info!(count = candidates.len(), "Found candidate files");

        stats.inspected = candidates.len();
        let outcomes = self.inspect_all(&candidates)?;

        let mut builder = DatasetBuilder::new();
        for (path, outcome) in candidates.into_iter().zip(outcomes) {
            match outcome {
                Ok(FileOutcome::Record(record)) => {
                    debug!(?path, ?record, "Recorded photo");
                    builder.push(record);
                }
                Ok(FileOutcome::NoMetadata) => {
                    debug!(?path, "No metadata table");
                    stats.missing_metadata += 1;
                    on_event(&ScanEvent::MissingMetadata(path));
                }
                Err(e) => match self.config.on_unreadable {
                    FailurePolicy::Abort => return Err(e),
                    FailurePolicy::Skip => {
                        warn!(?path, error = %e, "Skipping unreadable file");
                        stats.skipped += 1;
                        on_event(&ScanEvent::Skipped {
                            path,
                            reason: e.to_string(),
                        });
                    }
                },
            }
        }

        stats.recorded = builder.len();
        info!("{}", stats.summary());

        Ok(ScanReport {
            dataset: builder.finish(),
            stats,
        })
    }

    /// Walk the tree and keep regular files that pass the filter
    fn collect_candidates(&self, root: &Path, stats: &mut ScanStats) -> Result<Vec<PathBuf>> {
        let ignored = self.config.ignore_set();
        let mut walker = WalkDir::new(root).follow_links(self.config.follow_links);
        if self.config.sort_entries {
            walker = walker.sort_by_file_name();
        }

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            stats.visited += 1;

            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if !is_eligible(&name, &ignored) {
                debug!(?path, "Filtered out");
                stats.filtered += 1;
                continue;
            }

            files.push(entry.into_path());
        }

        Ok(files)
    }

    /// Inspect every candidate, keeping results in candidate order
    fn inspect_all(&self, files: &[PathBuf]) -> Result<Vec<Result<FileOutcome>>> {
        let outcomes: Vec<Result<FileOutcome>> = match self.config.threads {
            1 => files.iter().map(|path| self.inspect(path)).collect(),
            0 => files.par_iter().map(|path| self.inspect(path)).collect(),
            threads => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| Error::Config(format!("Cannot start {threads} threads: {e}")))?
                .install(|| files.par_iter().map(|path| self.inspect(path)).collect()),
        };
        Ok(outcomes)
    }

    /// Read one file into a record
    ///
    /// The file handle is closed before this returns.
    fn inspect(&self, path: &Path) -> Result<FileOutcome> {
        let kind = probe::probe(path)?;

        let table = if kind.carries_exif() {
            metadata::read_table(path)?
        } else {
            None
        };
        let Some(table) = table else {
            return Ok(FileOutcome::NoMetadata);
        };

        let raw_date = table.field(&self.registry, &self.config.timestamp_tag);
        let capture_date = match parse_timestamp(raw_date, &self.config.timestamp_format) {
            Ok(date) => date,
            Err(e) => {
                warn!(
                    ?path,
                    raw = raw_date.unwrap_or_default(),
                    error = %e,
                    "Unparseable capture timestamp, recording it as empty"
                );
                None
            }
        };
        let camera = table
            .field(&self.registry, &self.config.camera_tag)
            .map(str::to_string);

        let photo = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(FileOutcome::Record(PhotoRecord {
            photo,
            capture_date,
            camera,
        }))
    }
}
