//! Extension and visibility filter for directory entries

use std::collections::HashSet;
use std::path::Path;

/// Check whether a file name should be inspected at all
///
/// Hidden files (leading `.`) are rejected, as is any name whose extension,
/// lower-cased, is in `ignored`. The set must already be lower case; see
/// [`crate::Config::ignore_set`].
pub fn is_eligible(file_name: &str, ignored: &HashSet<String>) -> bool {
    if file_name.starts_with('.') {
        return false;
    }

    match Path::new(file_name).extension().and_then(|e| e.to_str()) {
        Some(ext) => !ignored.contains(&ext.to_lowercase()),
        None => true,
    }
}
