//! Capture timestamp parsing

use chrono::NaiveDateTime;

/// Parse a raw capture timestamp with the given chrono pattern
///
/// Absent input stays absent. Surrounding quotes, padding NULs and whitespace
/// are ignored. No timezone is applied: the result is the wall-clock time the
/// camera recorded.
pub fn parse_timestamp(
    raw: Option<&str>,
    format: &str,
) -> Result<Option<NaiveDateTime>, chrono::ParseError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let s = raw
        .trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .trim_matches('"');

    NaiveDateTime::parse_from_str(s, format).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    const EXIF_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

    #[test]
    fn test_parse_exif_timestamp() {
        let dt = parse_timestamp(Some("2024:01:15 14:30:00"), EXIF_FORMAT)
            .unwrap()
            .unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 15);
        assert_eq!(dt.hour(), 14);
        assert_eq!(dt.minute(), 30);
        assert_eq!(dt.second(), 0);

        // With quotes and NUL padding
        let dt = parse_timestamp(Some("\"2024:01:15 14:30:00\"\0"), EXIF_FORMAT)
            .unwrap()
            .unwrap();
        assert_eq!(dt.year(), 2024);
    }

    #[test]
    fn test_absent_stays_absent() {
        assert_eq!(parse_timestamp(None, EXIF_FORMAT).unwrap(), None);
    }

    #[test]
    fn test_unparseable() {
        assert!(parse_timestamp(Some("invalid"), EXIF_FORMAT).is_err());
        // blank timestamp some cameras write when the clock was never set
        assert!(parse_timestamp(Some("    :  :     :  :  "), EXIF_FORMAT).is_err());
        // the pattern is fixed, ISO input does not match it
        assert!(parse_timestamp(Some("2024-01-15 14:30:00"), EXIF_FORMAT).is_err());
    }

    #[test]
    fn test_custom_format() {
        let dt = parse_timestamp(Some("2024-01-15T14:30:00"), "%Y-%m-%dT%H:%M:%S")
            .unwrap()
            .unwrap();
        assert_eq!(dt.hour(), 14);
    }
}
