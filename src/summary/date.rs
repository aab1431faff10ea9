//! Photo counts per day and camera on a gap-free date axis

use super::camera_label;
use crate::chart::{LineChart, Series};
use crate::dataset::Dataset;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Dense grid of photo counts: one row per calendar day, one column per camera
///
/// Rows cover every day from the earliest to the latest capture date,
/// inclusive. Days without photos read 0 in every column. Records without a
/// capture date are left out; records without a camera model form their own
/// column, ordered after the named cameras.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateCameraSummary {
    dates: Vec<NaiveDate>,
    cameras: Vec<Option<String>>,
    /// `counts[row][column]`
    counts: Vec<Vec<usize>>,
}

impl DateCameraSummary {
    /// Aggregate a dataset; no dated records gives an empty grid
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut grouped: HashMap<(NaiveDate, Option<&str>), usize> = HashMap::new();
        for record in dataset {
            if let Some(captured) = record.capture_date {
                *grouped
                    .entry((captured.date(), record.camera.as_deref()))
                    .or_default() += 1;
            }
        }

        let (Some(min_date), Some(max_date)) = (
            grouped.keys().map(|(d, _)| *d).min(),
            grouped.keys().map(|(d, _)| *d).max(),
        ) else {
            return Self::default();
        };

        let mut cameras: Vec<Option<&str>> = grouped.keys().map(|(_, c)| *c).collect();
        cameras.sort_by(|a, b| (a.is_none(), a).cmp(&(b.is_none(), b)));
        cameras.dedup();

        let dates: Vec<NaiveDate> = min_date
            .iter_days()
            .take_while(|d| *d <= max_date)
            .collect();

        let mut counts = vec![vec![0usize; cameras.len()]; dates.len()];
        for ((date, camera), count) in &grouped {
            let row = (*date - min_date).num_days() as usize;
            // cameras is sorted with the same key, so the search always hits
            if let Ok(col) = cameras.binary_search_by(|c| {
                (c.is_none(), c).cmp(&(camera.is_none(), camera))
            }) {
                counts[row][col] = *count;
            }
        }

        Self {
            dates,
            cameras: cameras.into_iter().map(|c| c.map(str::to_string)).collect(),
            counts,
        }
    }

    /// Row labels, one per day
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Column keys
    pub fn cameras(&self) -> &[Option<String>] {
        &self.cameras
    }

    pub fn min_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Number of rows (days)
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Rows as (date, counts in [`cameras`](Self::cameras) order)
    pub fn rows(&self) -> impl Iterator<Item = (NaiveDate, &[usize])> + '_ {
        self.dates
            .iter()
            .copied()
            .zip(self.counts.iter().map(Vec::as_slice))
    }

    fn column_index(&self, camera: Option<&str>) -> Option<usize> {
        self.cameras.iter().position(|c| c.as_deref() == camera)
    }

    /// Count for one cell; `None` outside the date range or for an unknown camera
    pub fn get(&self, date: NaiveDate, camera: Option<&str>) -> Option<usize> {
        let col = self.column_index(camera)?;
        let min_date = self.min_date()?;
        let row = usize::try_from((date - min_date).num_days()).ok()?;
        self.counts.get(row).map(|r| r[col])
    }

    /// Daily series of one camera
    pub fn column(&self, camera: Option<&str>) -> Option<Vec<usize>> {
        let col = self.column_index(camera)?;
        Some(self.counts.iter().map(|r| r[col]).collect())
    }

    pub fn line_chart(&self) -> LineChart {
        LineChart {
            title: "Photos per day".to_string(),
            x: self.dates.clone(),
            series: self
                .cameras
                .iter()
                .enumerate()
                .map(|(col, camera)| Series {
                    label: camera_label(camera.as_deref()).to_string(),
                    values: self.counts.iter().map(|r| r[col]).collect(),
                })
                .collect(),
        }
    }
}
