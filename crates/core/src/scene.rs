//! Headless scene: camera, mesh, landmark collection and edit history.
//!
//! [`Scene`] is the [`Viewport`] the annotator window drives. It has no GPU
//! state, so the interaction controller can be exercised end-to-end without
//! a window.
//!
//! # Coordinate spaces
//!
//! - **local**: mesh space, where landmark points live
//! - **world**: local space after the mesh's model transform
//! - **screen**: viewport pixels, origin top-left, y down
//!
//! The camera looks straight down the world z axis, so every pick ray is
//! vertical. The model transform is restricted to uniform scale, rotation
//! about z and translation, which keeps those rays vertical in local space
//! too.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::geometry::Vector2D;
use crate::interaction::{HitObject, HitTarget, Intersection, Viewport};
use crate::landmark::{Landmark, PointChange};
use crate::selection_box::SelectionBox;
use glam::{Affine3A, Quat, Vec2, Vec3};
use std::f32::consts::TAU;

/// How far below the surface a landmark may sit and still count as visible.
const OCCLUSION_EPSILON: f32 = 1e-3;

/// Orthographic camera looking down -z.
#[derive(Debug, Clone, PartialEq)]
pub struct OrthoCamera {
    /// World xy shown at the centre of the viewport.
    pub center: Vec2,
    /// Screen units per world unit.
    pub zoom: f32,
    pub viewport_size: Vector2D,
    /// World z of the eye; pick distances are measured from here.
    pub eye_height: f32,
}

impl Default for OrthoCamera {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            zoom: 60.0,
            viewport_size: Vector2D::new(800.0, 600.0),
            eye_height: 100.0,
        }
    }
}

impl OrthoCamera {
    pub fn world_to_screen(&self, world: Vec3) -> Vector2D {
        Vector2D::new(
            (world.x - self.center.x) * self.zoom + self.viewport_size.x / 2.0,
            (self.center.y - world.y) * self.zoom + self.viewport_size.y / 2.0,
        )
    }

    /// World xy of the pick ray through `screen`.
    pub fn screen_to_world(&self, screen: Vector2D) -> Vec2 {
        Vec2::new(
            self.center.x + (screen.x - self.viewport_size.x / 2.0) / self.zoom,
            self.center.y - (screen.y - self.viewport_size.y / 2.0) / self.zoom,
        )
    }
}

/// Dome-shaped height field over a rectangular footprint in local space.
///
/// Height falls from `amplitude` at the centre to zero along the border;
/// an amplitude of zero gives a flat plate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightField {
    pub half_extent: Vec2,
    pub amplitude: f32,
}

impl HeightField {
    pub fn new(half_extent: Vec2, amplitude: f32) -> Result<Self> {
        if half_extent.x <= 0.0 || half_extent.y <= 0.0 || !half_extent.is_finite() {
            return Err(AppError::scene(format!(
                "mesh extent must be positive, got {half_extent}"
            )));
        }
        Ok(Self {
            half_extent,
            amplitude,
        })
    }

    pub fn contains(&self, xy: Vec2) -> bool {
        xy.x.abs() <= self.half_extent.x && xy.y.abs() <= self.half_extent.y
    }

    /// Surface height at `xy`, or `None` outside the footprint.
    pub fn height(&self, xy: Vec2) -> Option<f32> {
        if !self.contains(xy) {
            return None;
        }
        let u = xy / self.half_extent;
        Some(self.amplitude * (1.0 - u.x * u.x) * (1.0 - u.y * u.y))
    }
}

/// Shapes drawn on the transient overlay canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayShape {
    /// Box-select rectangle between the press and the cursor.
    SelectionBox { from: Vector2D, to: Vector2D },
    /// Lines from the cursor to the current target and its runners-up.
    TargetingLines {
        cursor: Vector2D,
        target: Vector2D,
        next_closest: Vec<Vector2D>,
    },
}

/// An undoable edit.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryEntry {
    Moved(Vec<PointChange>),
    /// An empty slot received its first point.
    Inserted { index: usize, point: Vec3 },
    /// Points removed from landmarks, with their last positions.
    Cleared(Vec<(usize, Vec3)>),
}

#[derive(Debug, Default)]
struct History {
    undo: Vec<HistoryEntry>,
    redo: Vec<HistoryEntry>,
}

impl History {
    fn push(&mut self, entry: HistoryEntry) {
        self.undo.push(entry);
        self.redo.clear();
    }
}

/// The mesh, its landmarks and the camera looking at them.
#[derive(Debug)]
pub struct Scene {
    pub camera: OrthoCamera,
    mesh: HeightField,
    model: Affine3A,
    inverse_model: Affine3A,
    marker_radius: f32,
    landmarks: Vec<Landmark>,
    next_index: usize,
    snap_mode: bool,
    group_selection_mode: bool,
    camera_locked: bool,
    selection_box: SelectionBox,
    overlay: Vec<OverlayShape>,
    history: History,
    redraw_requested: bool,
}

impl Scene {
    pub fn new(mesh: HeightField, marker_radius: f32) -> Self {
        Self {
            camera: OrthoCamera::default(),
            mesh,
            model: Affine3A::IDENTITY,
            inverse_model: Affine3A::IDENTITY,
            marker_radius,
            landmarks: Vec::new(),
            next_index: 0,
            snap_mode: false,
            group_selection_mode: false,
            camera_locked: false,
            selection_box: SelectionBox::INACTIVE,
            overlay: Vec::new(),
            history: History::default(),
            redraw_requested: false,
        }
    }

    /// Builds the default 10x8 dome with the configured empty slots.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mesh = HeightField::new(Vec2::new(5.0, 4.0), config.mesh_amplitude)?;
        let mut scene = Self::new(mesh, config.marker_radius);
        for _ in 0..config.landmark_slots {
            scene.add_landmark(None);
        }
        Ok(scene)
    }

    /// Places the mesh in the world: uniform `scale`, then rotation about z,
    /// then translation.
    pub fn set_model_transform(&mut self, scale: f32, rotation_z: f32, translation: Vec3) -> Result<()> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(AppError::scene(format!("model scale must be positive, got {scale}")));
        }
        self.model = Affine3A::from_scale_rotation_translation(
            Vec3::splat(scale),
            Quat::from_rotation_z(rotation_z),
            translation,
        );
        self.inverse_model = self.model.inverse();
        Ok(())
    }

    pub fn mesh(&self) -> &HeightField {
        &self.mesh
    }

    pub fn local_to_world(&self, point: Vec3) -> Vec3 {
        self.model.transform_point3(point)
    }

    pub fn marker_radius(&self) -> f32 {
        self.marker_radius
    }

    /// Appends a landmark under a fresh index and returns that index.
    pub fn add_landmark(&mut self, point: Option<Vec3>) -> usize {
        let index = self.next_index;
        self.next_index += 1;
        self.landmarks.push(Landmark::new(index, point));
        index
    }

    /// Places `count` landmarks evenly on a ring around the mesh centre.
    pub fn seed_ring(&mut self, count: usize) {
        let radius = 0.5 * self.mesh.half_extent.min_element();
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32;
            let xy = Vec2::from_angle(angle) * radius;
            let z = self.mesh.height(xy).unwrap_or_default();
            self.add_landmark(Some(xy.extend(z)));
        }
    }

    pub fn set_snap_mode(&mut self, enabled: bool) {
        self.snap_mode = enabled;
    }

    pub fn set_group_selection_mode(&mut self, enabled: bool) {
        self.group_selection_mode = enabled;
        self.update_selection_box();
    }

    pub fn camera_locked(&self) -> bool {
        self.camera_locked
    }

    /// Pans by a screen-space offset. Refused while the camera is locked.
    pub fn pan(&mut self, screen_delta: Vector2D) -> bool {
        if self.camera_locked {
            return false;
        }
        self.camera.center -= Vec2::new(screen_delta.x, -screen_delta.y) / self.camera.zoom;
        true
    }

    /// Multiplies the zoom, clamped to a sane range. Refused while locked.
    pub fn zoom_by(&mut self, factor: f32) -> bool {
        if self.camera_locked || !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        self.camera.zoom = (self.camera.zoom * factor).clamp(5.0, 2000.0);
        true
    }

    /// Zooms so the mesh footprint fills most of the viewport.
    pub fn fit_mesh(&mut self) {
        let corners = [
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        ]
        .map(|c| self.local_to_world(c * self.mesh.half_extent.extend(0.0)).truncate());
        let min = corners.iter().copied().reduce(Vec2::min).unwrap_or_default();
        let max = corners.iter().copied().reduce(Vec2::max).unwrap_or_default();
        let size = (max - min).max(Vec2::splat(f32::EPSILON));

        self.camera.center = (min + max) / 2.0;
        self.camera.zoom = 0.85
            * (self.camera.viewport_size.x / size.x).min(self.camera.viewport_size.y / size.y);
    }

    pub fn overlay(&self) -> &[OverlayShape] {
        &self.overlay
    }

    /// Returns and resets the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    pub fn can_undo(&self) -> bool {
        !self.history.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.history.redo.is_empty()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history.undo
    }

    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.undo.pop() else {
            return false;
        };
        match &entry {
            HistoryEntry::Moved(batch) => {
                for change in batch {
                    self.write_point(change.index, Some(change.from));
                }
            }
            HistoryEntry::Inserted { index, .. } => self.write_point(*index, None),
            HistoryEntry::Cleared(points) => {
                for &(index, point) in points {
                    self.write_point(index, Some(point));
                }
            }
        }
        self.history.redo.push(entry);
        self.update_selection_box();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.history.redo.pop() else {
            return false;
        };
        match &entry {
            HistoryEntry::Moved(batch) => {
                for change in batch {
                    self.write_point(change.index, Some(change.to));
                }
            }
            HistoryEntry::Inserted { index, point } => self.write_point(*index, Some(*point)),
            HistoryEntry::Cleared(points) => {
                for &(index, _) in points {
                    self.write_point(index, None);
                }
            }
        }
        self.history.undo.push(entry);
        self.update_selection_box();
        true
    }

    /// Empties every selected landmark, as one history entry.
    pub fn clear_selected_points(&mut self) -> usize {
        let cleared: Vec<(usize, Vec3)> = self
            .landmarks
            .iter_mut()
            .filter(|lm| lm.selected)
            .filter_map(|lm| lm.point.take().map(|p| (lm.index, p)))
            .collect();
        let count = cleared.len();
        if count > 0 {
            tracing::debug!("[scene] cleared {count} landmark(s)");
            self.history.push(HistoryEntry::Cleared(cleared));
            self.update_selection_box();
            self.redraw_requested = true;
        }
        count
    }

    fn landmark_mut(&mut self, index: usize) -> Option<&mut Landmark> {
        self.landmarks.iter_mut().find(|lm| lm.index == index)
    }

    fn write_point(&mut self, index: usize, point: Option<Vec3>) {
        if let Some(lm) = self.landmark_mut(index) {
            lm.point = point;
        }
        self.redraw_requested = true;
    }

    fn set_selected(&mut self, mut wanted: impl FnMut(&Landmark) -> Option<bool>) {
        for lm in &mut self.landmarks {
            if let Some(selected) = wanted(&*lm) {
                lm.selected = selected;
            }
        }
        self.redraw_requested = true;
    }

    fn marker_hits(&self, ray: Vec2) -> Vec<Intersection> {
        // marker spheres are sized in world units
        let r2 = self.marker_radius * self.marker_radius;
        let mut hits: Vec<Intersection> = self
            .landmarks
            .iter()
            .filter_map(|lm| lm.point.map(|p| (lm.index, self.local_to_world(p))))
            .filter_map(|(index, center)| {
                let d2 = center.truncate().distance_squared(ray);
                (d2 <= r2).then(|| {
                    let top = center.z + (r2 - d2).sqrt();
                    Intersection {
                        hit: HitObject::Landmark(index),
                        world_point: ray.extend(top),
                        distance: self.camera.eye_height - top,
                    }
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn mesh_hit(&self, ray: Vec2) -> Option<Intersection> {
        let local_xy = self.inverse_model.transform_point3(ray.extend(0.0)).truncate();
        let height = self.mesh.height(local_xy)?;
        let world_point = self.local_to_world(local_xy.extend(height));
        Some(Intersection {
            hit: HitObject::Mesh,
            world_point,
            distance: self.camera.eye_height - world_point.z,
        })
    }
}

impl Viewport for Scene {
    fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    fn snap_mode(&self) -> bool {
        self.snap_mode
    }

    fn group_selection_mode(&self) -> bool {
        self.group_selection_mode
    }

    fn intersect(&self, position: Vector2D, target: HitTarget) -> Vec<Intersection> {
        let ray = self.camera.screen_to_world(position);
        match target {
            HitTarget::Landmarks => self.marker_hits(ray),
            HitTarget::Mesh => self.mesh_hit(ray).into_iter().collect(),
        }
    }

    fn landmarks_in_screen_rect(&self, min: Vector2D, max: Vector2D) -> Vec<usize> {
        self.landmarks
            .iter()
            .filter_map(|lm| lm.point.map(|p| (lm.index, self.local_to_screen(p))))
            .filter(|(_, s)| s.x >= min.x && s.x <= max.x && s.y >= min.y && s.y <= max.y)
            .map(|(index, _)| index)
            .collect()
    }

    fn is_landmark_visible(&self, index: usize) -> bool {
        let Some(point) = self.landmark(index).and_then(|lm| lm.point) else {
            return false;
        };
        match self.mesh.height(point.truncate()) {
            Some(surface) => point.z >= surface - OCCLUSION_EPSILON,
            None => true,
        }
    }

    fn world_to_local(&self, point: Vec3) -> Vec3 {
        self.inverse_model.transform_point3(point)
    }

    fn local_to_screen(&self, point: Vec3) -> Vector2D {
        self.camera.world_to_screen(self.local_to_world(point))
    }

    fn selection_box(&self) -> SelectionBox {
        self.selection_box
    }

    fn select_landmarks(&mut self, indices: &[usize]) {
        self.set_selected(|lm| indices.contains(&lm.index).then_some(true));
    }

    fn deselect_landmarks(&mut self, indices: &[usize]) {
        self.set_selected(|lm| indices.contains(&lm.index).then_some(false));
    }

    fn select_landmark_and_deselect_rest(&mut self, index: usize) {
        self.set_selected(|lm| Some(lm.index == index));
    }

    fn deselect_all_landmarks(&mut self) {
        self.set_selected(|_| Some(false));
    }

    fn set_landmark_point(&mut self, index: usize, point: Vec3) {
        let Some(previous) = self.landmark(index).map(|lm| lm.point) else {
            tracing::warn!("[scene] no landmark with index {index}");
            return;
        };
        let entry = match previous {
            Some(from) => HistoryEntry::Moved(vec![PointChange {
                index,
                from,
                to: point,
            }]),
            None => HistoryEntry::Inserted { index, point },
        };
        self.write_point(index, Some(point));
        self.history.push(entry);
    }

    fn set_landmark_point_without_history(&mut self, index: usize, point: Vec3) {
        self.write_point(index, Some(point));
    }

    fn add_landmark_history(&mut self, batch: Vec<PointChange>) {
        self.history.push(HistoryEntry::Moved(batch));
    }

    fn insert_new_landmark(&mut self, point: Vec3) {
        let index = match self.landmarks.iter().find(|lm| lm.is_empty()) {
            Some(slot) => slot.index,
            None => self.add_landmark(None),
        };
        self.write_point(index, Some(point));
        self.history.push(HistoryEntry::Inserted { index, point });
    }

    fn set_camera_locked(&mut self, locked: bool) {
        self.camera_locked = locked;
    }

    fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    fn draw_selection_box(&mut self, from: Vector2D, to: Vector2D) {
        self.overlay.push(OverlayShape::SelectionBox { from, to });
        self.redraw_requested = true;
    }

    fn clear_canvas(&mut self) {
        self.overlay.clear();
        self.redraw_requested = true;
    }

    fn update_selection_box(&mut self) {
        let selected: Vec<Vector2D> = self
            .landmarks
            .iter()
            .filter(|lm| lm.selected)
            .filter_map(|lm| lm.point)
            .map(|p| self.local_to_screen(p))
            .collect();

        self.selection_box = if self.group_selection_mode && selected.len() >= 2 {
            SelectionBox::bounding(selected)
        } else {
            SelectionBox::INACTIVE
        };
    }

    fn draw_targeting_lines(&mut self, cursor: Vector2D, target: Vector2D, next_closest: &[Vector2D]) {
        self.overlay.push(OverlayShape::TargetingLines {
            cursor,
            target,
            next_closest: next_closest.to_vec(),
        });
        self.redraw_requested = true;
    }
}
