//! Main annotator application.
//!
//! This module contains the `Annotator` struct which implements the
//! `eframe::App` trait: a landmark side panel next to the mesh canvas.

use super::input::{canvas_inputs, CanvasInput};
use super::rendering::{draw_landmarks, draw_mesh, draw_overlay, draw_selection_box, format_point};
use super::settings::Settings;
use crate::error::{AppError, Result};
use crate::interaction::{MouseController, Viewport};
use crate::scene::Scene;
use crate::geometry::Vector2D;
use eframe::egui;
use serde::Serialize;

/// Zoom factor per scrolled point.
const SCROLL_ZOOM_RATE: f32 = 0.002;

/// Landmark as written to the clipboard.
#[derive(Serialize)]
struct ExportedLandmark {
    index: usize,
    point: Option<[f32; 3]>,
}

/// The annotator window.
pub struct Annotator {
    scene: Scene,
    controller: MouseController,
    settings: Settings,
    /// Last clipboard or settings problem, shown under the side panel buttons.
    status: Option<String>,
    fitted: bool,
}

impl Annotator {
    /// Creates an annotator over `scene`, applying the persisted modes.
    pub fn new(mut scene: Scene, settings: Settings) -> Self {
        scene.set_snap_mode(settings.snap_mode);
        scene.set_group_selection_mode(settings.group_selection);
        Self {
            scene,
            controller: MouseController::new(),
            settings,
            status: None,
            fitted: false,
        }
    }

    fn apply_settings(&mut self) {
        self.scene.set_snap_mode(self.settings.snap_mode);
        self.scene.set_group_selection_mode(self.settings.group_selection);
        if !self.settings.snap_mode {
            self.controller.clear_target();
        }
        if let Err(e) = self.settings.save() {
            tracing::warn!("Failed to save settings: {}", e);
            self.status = Some(format!("Settings not saved: {}", e));
        }
    }

    /// Copies the selected landmarks to the clipboard as JSON.
    fn copy_selected(&self) -> Result<usize> {
        let exported: Vec<ExportedLandmark> = self
            .scene
            .selected_landmarks()
            .into_iter()
            .map(|lm| ExportedLandmark {
                index: lm.index,
                point: lm.point.map(|p| p.to_array()),
            })
            .collect();
        let json = serde_json::to_string_pretty(&exported)?;

        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| AppError::ui(format!("Clipboard unavailable: {}", e)))?;
        clipboard
            .set_text(json)
            .map_err(|e| AppError::ui(format!("Copy failed: {}", e)))?;
        Ok(exported.len())
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        // history edits only between gestures
        if !self.controller.gesture().is_idle() {
            return;
        }
        let (undo, redo, delete) = ctx.input(|i| {
            let command = i.modifiers.command;
            let z = i.key_pressed(egui::Key::Z);
            (
                command && z && !i.modifiers.shift,
                command && ((z && i.modifiers.shift) || i.key_pressed(egui::Key::Y)),
                i.key_pressed(egui::Key::Delete),
            )
        });
        if undo {
            self.scene.undo();
        }
        if redo {
            self.scene.redo();
        }
        if delete {
            self.scene.clear_selected_points();
        }
    }

    fn render_side_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Landmarks");

        let before = self.settings.clone();
        ui.checkbox(&mut self.settings.snap_mode, "Snap placement");
        ui.checkbox(&mut self.settings.group_selection, "Group selection box");
        ui.checkbox(&mut self.settings.show_targeting_lines, "Targeting lines");
        if self.settings != before {
            self.apply_settings();
        }

        ui.separator();
        ui.horizontal(|ui| {
            if ui.add_enabled(self.scene.can_undo(), egui::Button::new("Undo")).clicked() {
                self.scene.undo();
            }
            if ui.add_enabled(self.scene.can_redo(), egui::Button::new("Redo")).clicked() {
                self.scene.redo();
            }
            if ui.button("Copy selected").clicked() {
                self.status = match self.copy_selected() {
                    Ok(count) => Some(format!("Copied {} landmark(s)", count)),
                    Err(e) => Some(e.to_string()),
                };
            }
        });
        if let Some(status) = &self.status {
            ui.label(egui::RichText::new(status).small().color(egui::Color32::LIGHT_GRAY));
        }

        ui.separator();
        let target = self.controller.current_target();
        let mut clicked = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for lm in self.scene.landmarks() {
                let marker = if target == Some(lm.index) { "▶" } else { " " };
                let text = format!("{} #{:<3} {}", marker, lm.index, format_point(lm.point));
                let label = egui::RichText::new(text).monospace();
                if ui.selectable_label(lm.selected, label).clicked() && !lm.is_empty() {
                    clicked = Some(lm.index);
                }
            }
        });
        if let Some(index) = clicked {
            self.scene.select_landmark_and_deselect_rest(index);
        }

        ui.separator();
        ui.label(
            egui::RichText::new(
                "Drag markers to move · Shift-drag to box-select · Ctrl to add/lock · Right-click to insert",
            )
            .small(),
        );
    }

    fn render_canvas(&mut self, ui: &mut egui::Ui) {
        let rect = ui.max_rect();
        self.scene.camera.viewport_size = Vector2D::new(rect.width(), rect.height());
        if !self.fitted {
            self.scene.fit_mesh();
            self.fitted = true;
        }

        let response = ui.interact(rect, ui.id().with("canvas"), egui::Sense::click_and_drag());

        let inputs = ui.ctx().input(|i| canvas_inputs(i, rect));
        for input in inputs {
            match input {
                CanvasInput::Down(event) => self.controller.on_pointer_down(&mut self.scene, event),
                CanvasInput::Move(event) => self.controller.on_pointer_move(&mut self.scene, event),
                CanvasInput::Up(event) => self.controller.on_pointer_up(&mut self.scene, event),
            }
        }

        // the scene refuses camera moves while a gesture holds the lock
        if response.dragged_by(egui::PointerButton::Primary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            let delta = response.drag_delta();
            self.scene.pan(Vector2D::new(delta.x, delta.y));
        }
        if response.hovered() {
            let scroll = ui.ctx().input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.scene.zoom_by((scroll * SCROLL_ZOOM_RATE).exp());
            }
        }

        if self.controller.gesture().is_idle() {
            self.scene.update_selection_box();
        }

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(24, 26, 31));
        draw_mesh(&painter, &self.scene, rect.min);
        draw_landmarks(&painter, &self.scene, rect.min, self.controller.current_target());
        draw_selection_box(&painter, &self.scene.selection_box(), rect.min);
        draw_overlay(
            &painter,
            self.scene.overlay(),
            rect.min,
            self.settings.show_targeting_lines,
        );
    }
}

impl eframe::App for Annotator {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Enforce dark mode
        ctx.set_visuals(egui::Visuals::dark());

        self.handle_shortcuts(ctx);

        egui::SidePanel::left("landmark_panel")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.render_side_panel(ui));

        // Fullscreen canvas with no margins
        let panel_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(0))
            .outer_margin(egui::Margin::same(0));

        egui::CentralPanel::default()
            .frame(panel_frame)
            .show(ctx, |ui| self.render_canvas(ui));

        if self.scene.take_redraw_request() {
            ctx.request_repaint();
        }
    }
}

/// Opens the annotator window and blocks until it is closed.
///
/// # Arguments
/// * `scene` - The mesh and landmarks to edit
/// * `settings` - Persisted interaction preferences
pub fn run(scene: Scene, settings: Settings) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Landmarker"),
        ..Default::default()
    };

    eframe::run_native(
        "Landmarker",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(Annotator::new(scene, settings)) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|e| AppError::ui(format!("Failed to run UI: {}", e)))
}
