//! UI rendering helpers for the annotator canvas.
//!
//! Scene coordinates are relative to the canvas; every helper takes the
//! canvas origin and offsets by it.

use crate::geometry::Vector2D;
use crate::interaction::Viewport;
use crate::scene::{OverlayShape, Scene};
use crate::selection_box::{Handle, SelectionBox, HANDLE_TOLERANCE};
use eframe::egui;
use glam::{Vec2, Vec3};

const MESH_FILL: egui::Color32 = egui::Color32::from_rgb(52, 58, 70);
const MESH_LINE: egui::Color32 = egui::Color32::from_rgb(84, 92, 110);
const MARKER: egui::Color32 = egui::Color32::from_rgb(120, 180, 255);
const MARKER_SELECTED: egui::Color32 = egui::Color32::from_rgb(255, 170, 60);
const MARKER_TARGET: egui::Color32 = egui::Color32::from_rgb(90, 230, 120);

/// Grid lines drawn across the mesh footprint, per axis.
const MESH_GRID_LINES: usize = 12;
/// Samples along each grid line.
const MESH_GRID_SAMPLES: usize = 24;

fn to_pos(origin: egui::Pos2, v: Vector2D) -> egui::Pos2 {
    origin + egui::vec2(v.x, v.y)
}

/// Draws the mesh footprint with a height-following grid.
pub fn draw_mesh(painter: &egui::Painter, scene: &Scene, origin: egui::Pos2) {
    let mesh = scene.mesh();
    let project = |xy: Vec2| {
        let z = mesh.height(xy).unwrap_or_default();
        to_pos(origin, scene.local_to_screen(xy.extend(z)))
    };

    let e = mesh.half_extent;
    let outline: Vec<egui::Pos2> = [
        Vec2::new(-e.x, -e.y),
        Vec2::new(e.x, -e.y),
        Vec2::new(e.x, e.y),
        Vec2::new(-e.x, e.y),
    ]
    .into_iter()
    .map(&project)
    .collect();
    painter.add(egui::Shape::convex_polygon(
        outline,
        MESH_FILL,
        egui::Stroke::new(1.5, MESH_LINE),
    ));

    let stroke = egui::Stroke::new(1.0, MESH_LINE);
    for i in 0..=MESH_GRID_LINES {
        let t = -1.0 + 2.0 * i as f32 / MESH_GRID_LINES as f32;
        let along = |axis: Vec2, across: Vec2| {
            (0..=MESH_GRID_SAMPLES)
                .map(|j| {
                    let s = -1.0 + 2.0 * j as f32 / MESH_GRID_SAMPLES as f32;
                    project((axis * s + across * t) * e)
                })
                .collect::<Vec<_>>()
        };
        painter.line(along(Vec2::X, Vec2::Y), stroke);
        painter.line(along(Vec2::Y, Vec2::X), stroke);
    }
}

/// Draws every placed landmark's marker and label.
pub fn draw_landmarks(painter: &egui::Painter, scene: &Scene, origin: egui::Pos2, target: Option<usize>) {
    let radius = (scene.marker_radius() * scene.camera.zoom).max(3.0);

    for lm in scene.landmarks() {
        let Some(point) = lm.point else {
            continue;
        };
        let center = to_pos(origin, scene.local_to_screen(point));
        let mut color = if lm.selected { MARKER_SELECTED } else { MARKER };
        if !scene.is_landmark_visible(lm.index) {
            color = color.gamma_multiply(0.4);
        }

        painter.circle_filled(center, radius, color);
        if target == Some(lm.index) {
            painter.circle_stroke(center, radius + 3.0, egui::Stroke::new(2.0, MARKER_TARGET));
        }
        painter.text(
            center + egui::vec2(radius + 2.0, -radius - 2.0),
            egui::Align2::LEFT_BOTTOM,
            lm.index.to_string(),
            egui::FontId::proportional(12.0),
            egui::Color32::LIGHT_GRAY,
        );
    }
}

/// Draws a border around a rectangle.
///
/// # Arguments
/// * `painter` - The egui painter to draw with
/// * `rect` - The rectangle to outline
/// * `stroke_width` - Width of the border line
/// * `color` - Color of the border
pub fn draw_selection_border(
    painter: &egui::Painter,
    rect: egui::Rect,
    stroke_width: f32,
    color: egui::Color32,
) {
    painter.rect_stroke(
        rect,
        0.0,
        egui::Stroke::new(stroke_width, color),
        egui::StrokeKind::Middle,
    );
}

/// Draws the group selection box and its four corner handles.
pub fn draw_selection_box(painter: &egui::Painter, selection: &SelectionBox, origin: egui::Pos2) {
    if !selection.is_active() {
        return;
    }
    let rect = egui::Rect::from_min_max(to_pos(origin, selection.min), to_pos(origin, selection.max));
    draw_selection_border(painter, rect, 1.0, MARKER_SELECTED);

    let half = egui::vec2(HANDLE_TOLERANCE, HANDLE_TOLERANCE);
    for handle in Handle::ALL {
        let corner = to_pos(origin, selection.corner(handle));
        painter.rect_filled(egui::Rect::from_center_size(corner, half * 2.0), 0.0, MARKER_SELECTED);
    }
}

/// Draws the transient overlay: the box-select rectangle and targeting lines.
pub fn draw_overlay(
    painter: &egui::Painter,
    shapes: &[OverlayShape],
    origin: egui::Pos2,
    show_targeting_lines: bool,
) {
    for shape in shapes {
        match shape {
            OverlayShape::SelectionBox { from, to } => {
                let rect = egui::Rect::from_two_pos(to_pos(origin, *from), to_pos(origin, *to));
                painter.rect_filled(rect, 0.0, egui::Color32::from_white_alpha(20));
                draw_selection_border(painter, rect, 1.0, egui::Color32::WHITE);
            }
            OverlayShape::TargetingLines {
                cursor,
                target,
                next_closest,
            } if show_targeting_lines => {
                let cursor = to_pos(origin, *cursor);
                for next in next_closest {
                    painter.line_segment(
                        [cursor, to_pos(origin, *next)],
                        egui::Stroke::new(1.0, egui::Color32::from_gray(140)),
                    );
                }
                painter.line_segment(
                    [cursor, to_pos(origin, *target)],
                    egui::Stroke::new(2.0, MARKER_TARGET),
                );
            }
            OverlayShape::TargetingLines { .. } => {}
        }
    }
}

/// Formats a landmark point for the side panel.
pub fn format_point(point: Option<Vec3>) -> String {
    match point {
        Some(p) => format!("({:.3}, {:.3}, {:.3})", p.x, p.y, p.z),
        None => "empty".to_string(),
    }
}
