//! Image identification and integrity check
//!
//! A candidate file is identified from its magic bytes. When the `image`
//! crate can read the format, its header is decoded as well so truncated or
//! corrupt files are caught before any metadata is read. Containers it cannot
//! decode (HEIF, camera RAW) are verified by the metadata reader instead.

use crate::error::{Error, Result};
use image::{ImageFormat, ImageReader};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::trace;

/// Bytes read for format sniffing
const SNIFF_LEN: u64 = 8192;

/// MIME types whose containers can carry an EXIF block
const EXIF_CONTAINERS: &[&str] = &[
    "image/jpeg",
    "image/tiff",
    "image/png",
    "image/webp",
    "image/heif",
    "image/avif",
    "image/x-canon-cr2",
];

/// What a probed file turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageKind {
    pub mime: &'static str,
    pub extension: &'static str,
}

impl ImageKind {
    /// Whether the container format can hold embedded metadata
    pub fn carries_exif(&self) -> bool {
        EXIF_CONTAINERS.contains(&self.mime)
    }
}

/// Open `path` as an image and verify its header
pub fn probe(path: &Path) -> Result<ImageKind> {
    let unreadable = |message: String| Error::Unreadable {
        path: path.to_path_buf(),
        message,
    };

    let mut file = File::open(path).map_err(|e| unreadable(e.to_string()))?;

    let mut header = Vec::with_capacity(SNIFF_LEN as usize);
    (&mut file)
        .take(SNIFF_LEN)
        .read_to_end(&mut header)
        .map_err(|e| unreadable(e.to_string()))?;

    let kind = infer::get(&header)
        .filter(|k| k.matcher_type() == infer::MatcherType::Image)
        .ok_or_else(|| unreadable("unrecognised image format".to_string()))?;

    if let Some(format) = ImageFormat::from_mime_type(kind.mime_type())
        && format.reading_enabled()
    {
        file.seek(SeekFrom::Start(0))
            .map_err(|e| unreadable(e.to_string()))?;
        let (width, height) = ImageReader::with_format(BufReader::new(file), format)
            .into_dimensions()
            .map_err(|e| unreadable(e.to_string()))?;
        trace!(?path, ?format, width, height, "Verified image header");
    }

    Ok(ImageKind {
        mime: kind.mime_type(),
        extension: kind.extension(),
    })
}
