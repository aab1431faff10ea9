//! Aggregations over a finished dataset
//!
//! Both summaries are pure functions of the [`Dataset`](crate::Dataset):
//! they can be computed in any order, any number of times.

pub mod camera;
pub mod date;

pub use camera::{CameraCount, CameraSummary};
pub use date::DateCameraSummary;

/// Chart label of the group of records without a camera model
pub const UNKNOWN_CAMERA: &str = "(unknown)";

/// Display label for a camera key; records without a camera model get their own group
pub fn camera_label(camera: Option<&str>) -> &str {
    camera.unwrap_or(UNKNOWN_CAMERA)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_camera_label_is_distinct() {
        assert_eq!(camera_label(Some("CamX")), "CamX");
        assert_eq!(camera_label(None), "(unknown)");
        assert_ne!(camera_label(None), camera_label(Some("None")));
    }
}
