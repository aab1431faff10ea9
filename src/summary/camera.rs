//! Photo counts per camera

use super::camera_label;
use crate::chart::BarChart;
use crate::dataset::Dataset;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraCount {
    pub camera: Option<String>,
    pub count: usize,
}

/// Number of photos per distinct camera, most used camera first
///
/// Cameras with equal counts keep the order in which they first appear in
/// the dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraSummary {
    entries: Vec<CameraCount>,
}

impl CameraSummary {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut index: HashMap<Option<&str>, usize> = HashMap::new();
        let mut entries: Vec<CameraCount> = Vec::new();

        for record in dataset {
            let key = record.camera.as_deref();
            match index.get(&key) {
                Some(&i) => entries[i].count += 1,
                None => {
                    index.insert(key, entries.len());
                    entries.push(CameraCount {
                        camera: key.map(str::to_string),
                        count: 1,
                    });
                }
            }
        }

        // stable, so ties stay in first-appearance order
        entries.sort_by(|a, b| b.count.cmp(&a.count));

        Self { entries }
    }

    pub fn entries(&self) -> &[CameraCount] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Count for one camera key
    pub fn get(&self, camera: Option<&str>) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.camera.as_deref() == camera)
            .map(|e| e.count)
    }

    pub fn bar_chart(&self) -> BarChart {
        BarChart {
            title: "Photos per camera".to_string(),
            labels: self
                .entries
                .iter()
                .map(|e| camera_label(e.camera.as_deref()).to_string())
                .collect(),
            values: self.entries.iter().map(|e| e.count).collect(),
        }
    }
}
