//! Embedded metadata decoding and tag lookup
//!
//! A [`MetadataTable`] holds the decoded tags of a photo's primary image in
//! file order. Fields are looked up by their EXIF tag name (`DateTime`,
//! `Model`, ...) through a [`TagRegistry`], which decides the raw tags a name
//! stands for.

pub mod timestamp;

use crate::error::{Error, Result};
use exif::{Field, In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{trace, warn};

pub use timestamp::parse_timestamp;

/// Decides which tags a symbolic field name stands for
pub trait TagRegistry: Send + Sync {
    /// Whether `tag` is registered under `name`
    fn matches(&self, tag: Tag, name: &str) -> bool;
}

/// Registry backed by the tag names kamadak-exif knows, which follow the
/// EXIF standard (`DateTime`, `Model`, `LensSerialNumber`, ...)
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifTagRegistry;

impl TagRegistry for ExifTagRegistry {
    fn matches(&self, tag: Tag, name: &str) -> bool {
        !name.is_empty() && tag.to_string() == name
    }
}

/// Decoded tags of one photo, in the order they appear in the file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataTable {
    entries: Vec<(Tag, String)>,
}

impl MetadataTable {
    /// Build a table from already decoded entries
    pub fn from_entries(entries: Vec<(Tag, String)>) -> Self {
        Self { entries }
    }

    /// Build a table from the primary image fields of a decoded EXIF block
    pub fn from_exif(exif: &exif::Exif) -> Self {
        let entries = exif
            .fields()
            .filter(|f| f.ifd_num == In::PRIMARY)
            .map(|f| (f.tag, field_text(f)))
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value of the first entry whose tag is registered under `name`
    pub fn field(&self, registry: &dyn TagRegistry, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(tag, _)| registry.matches(*tag, name))
            .map(|(_, value)| value.as_str())
    }
}

/// Text of a field, with ASCII values unquoted and stripped of padding NULs
fn field_text(field: &Field) -> String {
    match field.value {
        Value::Ascii(ref parts) => parts
            .iter()
            .map(|p| String::from_utf8_lossy(p))
            .collect::<Vec<_>>()
            .join(" ")
            .trim_matches(|c: char| c == '\0' || c.is_whitespace())
            .to_string(),
        _ => field.display_value().to_string(),
    }
}

/// Decode the metadata table embedded in `path`
///
/// Returns `Ok(None)` when the container holds no metadata block at all. A
/// block that only partially decodes is kept as far as it goes.
pub fn read_table(path: &Path) -> Result<Option<MetadataTable>> {
    let file = File::open(path).map_err(|e| Error::ExifRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let mut reader = BufReader::new(file);

    let mut exif_reader = Reader::new();
    exif_reader.continue_on_error(true);

    match exif_reader.read_from_container(&mut reader) {
        Ok(exif) => {
            let table = MetadataTable::from_exif(&exif);
            trace!(?path, fields = table.len(), "Decoded EXIF table");
            Ok(Some(table))
        }
        Err(exif::Error::NotFound(_)) => Ok(None),
        Err(exif::Error::PartialResult(partial)) => {
            let (exif, errors) = partial.into_inner();
            warn!(?path, errors = errors.len(), "EXIF block only partially decoded");
            Ok(Some(MetadataTable::from_exif(&exif)))
        }
        Err(e) => Err(Error::ExifRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
    }
}
