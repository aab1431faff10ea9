//! Photo records and the dataset built from a scan

use chrono::NaiveDateTime;
use serde::Serialize;

/// Column names of the dataset, in display order
pub const COLUMNS: [&str; 3] = ["photo", "capture_date", "camera"];

/// One successfully read photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoRecord {
    /// File name without its directory; not unique across subdirectories
    pub photo: String,
    /// Capture time as recorded by the camera
    pub capture_date: Option<NaiveDateTime>,
    /// Camera model
    pub camera: Option<String>,
}

/// Accumulates records while a scan is running
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    records: Vec<PhotoRecord>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: PhotoRecord) {
        self.records.push(record);
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    /// Close the builder and hand out the finished dataset
    pub fn finish(self) -> Dataset {
        Dataset {
            records: self.records,
        }
    }
}

/// Records of a scan in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<PhotoRecord>,
}

impl Dataset {
    pub fn records(&self) -> &[PhotoRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PhotoRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.records.len(), COLUMNS.len())
    }

    /// Non-null cell count per column, in [`COLUMNS`] order
    pub fn non_null_counts(&self) -> [usize; 3] {
        let dated = self.records.iter().filter(|r| r.capture_date.is_some()).count();
        let with_camera = self.records.iter().filter(|r| r.camera.is_some()).count();
        [self.records.len(), dated, with_camera]
    }
}

impl FromIterator<PhotoRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = PhotoRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a PhotoRecord;
    type IntoIter = std::slice::Iter<'a, PhotoRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Shorthand for building records in tests
#[cfg(test)]
pub(crate) fn record(photo: &str, capture_date: Option<&str>, camera: Option<&str>) -> PhotoRecord {
    PhotoRecord {
        photo: photo.to_string(),
        capture_date: capture_date
            .map(|s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()),
        camera: camera.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_insertion_order() {
        let mut builder = DatasetBuilder::new();
        builder.push(record("b.jpg", None, Some("CamX")));
        builder.push(record("a.jpg", None, Some("CamY")));
        builder.push(record("b.jpg", None, Some("CamX")));
        assert_eq!(builder.len(), 3);

        let dataset = builder.finish();
        let names: Vec<_> = dataset.iter().map(|r| r.photo.as_str()).collect();
        // duplicates are kept
        assert_eq!(names, ["b.jpg", "a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_shape_and_non_null_counts() {
        let dataset: Dataset = vec![
            record("a.jpg", Some("2023-05-01 10:00:00"), Some("CamX")),
            record("b.jpg", None, Some("CamX")),
            record("c.jpg", Some("2023-05-02 10:00:00"), None),
        ]
        .into_iter()
        .collect();

        assert_eq!(dataset.shape(), (3, 3));
        assert_eq!(dataset.non_null_counts(), [3, 2, 2]);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = DatasetBuilder::new().finish();
        assert!(dataset.is_empty());
        assert_eq!(dataset.shape(), (0, 3));
        assert_eq!(dataset.non_null_counts(), [0, 0, 0]);
    }

    #[test]
    fn test_json_shape() {
        let dataset: Dataset = vec![record("a.jpg", Some("2023-05-01 10:00:00"), None)]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&dataset).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "photo": "a.jpg", "capture_date": "2023-05-01T10:00:00", "camera": null }
            ])
        );
    }
}
