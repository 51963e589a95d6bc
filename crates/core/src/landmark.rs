//! Landmark records and the edits applied to them.

use glam::Vec3;

/// A labeled point annotation on the mesh surface.
///
/// `index` is a stable key: it is unique within a collection and never
/// reused, even after the landmark's point is cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct Landmark {
    pub index: usize,
    /// Position in mesh-local space, `None` while the slot is unplaced.
    pub point: Option<Vec3>,
    pub selected: bool,
}

impl Landmark {
    pub fn new(index: usize, point: Option<Vec3>) -> Self {
        Self {
            index,
            point,
            selected: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.point.is_none()
    }
}

/// One landmark's move inside a history entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointChange {
    pub index: usize,
    pub from: Vec3,
    pub to: Vec3,
}

/// Start positions captured when a multi-landmark drag begins.
///
/// Closed into a batch of [`PointChange`]s once the drag ends, so the whole
/// gesture lands in history as a single entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragSnapshot {
    starts: Vec<(usize, Vec3)>,
}

impl DragSnapshot {
    /// Snapshots every non-empty landmark in `landmarks`, in order.
    pub fn capture<'a>(landmarks: impl IntoIterator<Item = &'a Landmark>) -> Self {
        let starts = landmarks
            .into_iter()
            .filter_map(|lm| lm.point.map(|p| (lm.index, p)))
            .collect();
        Self { starts }
    }

    pub fn starts(&self) -> &[(usize, Vec3)] {
        &self.starts
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Pairs every start with the landmark's final point.
    ///
    /// Landmarks whose point is gone by the end are dropped from the batch.
    pub fn close(self, mut final_point: impl FnMut(usize) -> Option<Vec3>) -> Vec<PointChange> {
        self.starts
            .into_iter()
            .filter_map(|(index, from)| {
                final_point(index).map(|to| PointChange { index, from, to })
            })
            .collect()
    }
}
