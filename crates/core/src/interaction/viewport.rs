//! The scene and landmark collection as seen by the controller.

use crate::geometry::Vector2D;
use crate::landmark::{Landmark, PointChange};
use crate::selection_box::SelectionBox;
use glam::Vec3;

/// What a ray is cast against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// The marker spheres drawn around placed landmarks.
    Landmarks,
    Mesh,
}

/// The object a ray hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitObject {
    /// A landmark marker, by the owning landmark's index.
    Landmark(usize),
    Mesh,
}

/// A single ray hit. `distance` is measured from the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub hit: HitObject,
    pub world_point: Vec3,
    pub distance: f32,
}

/// Queries and commands the [`MouseController`](super::MouseController)
/// issues while resolving gestures.
///
/// Every call is synchronous. Overlay and redraw commands are
/// fire-and-forget; their coalescing is up to the implementation.
pub trait Viewport {
    /// All landmarks, empty slots included.
    fn landmarks(&self) -> &[Landmark];

    fn landmark(&self, index: usize) -> Option<&Landmark> {
        self.landmarks().iter().find(|lm| lm.index == index)
    }

    fn has_landmarks(&self) -> bool {
        !self.landmarks().is_empty()
    }

    fn selected_landmarks(&self) -> Vec<&Landmark> {
        self.landmarks().iter().filter(|lm| lm.selected).collect()
    }

    fn non_empty_landmarks(&self) -> Vec<&Landmark> {
        self.landmarks().iter().filter(|lm| !lm.is_empty()).collect()
    }

    /// Whether mesh clicks re-point the current target landmark.
    fn snap_mode(&self) -> bool;

    fn group_selection_mode(&self) -> bool;

    /// Casts a ray through `position`, nearest hit first.
    fn intersect(&self, position: Vector2D, target: HitTarget) -> Vec<Intersection>;

    /// Indices of placed landmarks whose projection lies inside the bounds.
    fn landmarks_in_screen_rect(&self, min: Vector2D, max: Vector2D) -> Vec<usize>;

    /// Whether the landmark's marker is not occluded by the mesh.
    fn is_landmark_visible(&self, index: usize) -> bool;

    fn world_to_local(&self, point: Vec3) -> Vec3;

    fn local_to_screen(&self, point: Vec3) -> Vector2D;

    /// The box currently drawn around the selection.
    fn selection_box(&self) -> SelectionBox;

    fn select_landmarks(&mut self, indices: &[usize]);

    fn deselect_landmarks(&mut self, indices: &[usize]);

    fn select_landmark_and_deselect_rest(&mut self, index: usize);

    fn deselect_all_landmarks(&mut self);

    /// Moves a landmark and records the move as its own history entry.
    fn set_landmark_point(&mut self, index: usize, point: Vec3);

    /// Moves a landmark without touching history; used mid-drag.
    fn set_landmark_point_without_history(&mut self, index: usize, point: Vec3);

    /// Records an already-applied batch of moves as one history entry.
    fn add_landmark_history(&mut self, batch: Vec<PointChange>);

    fn insert_new_landmark(&mut self, point: Vec3);

    fn set_camera_locked(&mut self, locked: bool);

    fn request_redraw(&mut self);

    fn draw_selection_box(&mut self, from: Vector2D, to: Vector2D);

    fn clear_canvas(&mut self);

    /// Recomputes the selection box from the current selection.
    fn update_selection_box(&mut self);

    fn draw_targeting_lines(&mut self, cursor: Vector2D, target: Vector2D, next_closest: &[Vector2D]);
}
