//! Translation of egui input into controller pointer events.
//!
//! Positions are converted to canvas-relative screen coordinates, which is
//! what the scene's camera works in.

use crate::geometry::Vector2D;
use crate::interaction::{Modifiers, PointerButton, PointerEvent};
use eframe::egui;

/// A pointer event destined for the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasInput {
    Down(PointerEvent),
    Move(PointerEvent),
    Up(PointerEvent),
}

/// Collects this frame's pointer events over `canvas`.
///
/// Presses outside the canvas are dropped. Moves and releases are kept
/// wherever they happen, so a gesture started on the canvas always sees its
/// release.
pub fn canvas_inputs(input: &egui::InputState, canvas: egui::Rect) -> Vec<CanvasInput> {
    let held = held_button(&input.pointer);
    let relative = |pos: egui::Pos2| Vector2D::from(pos) - Vector2D::from(canvas.min);

    input
        .events
        .iter()
        .filter_map(|event| match event {
            egui::Event::PointerMoved(pos) => Some(CanvasInput::Move(PointerEvent::new(
                relative(*pos),
                held,
                input.modifiers.into(),
            ))),
            egui::Event::PointerButton {
                pos,
                button,
                pressed,
                modifiers,
            } => {
                let button = PointerButton::from_egui(*button)?;
                let event = PointerEvent::new(relative(*pos), Some(button), Modifiers::from(*modifiers));
                if *pressed {
                    canvas.contains(*pos).then_some(CanvasInput::Down(event))
                } else {
                    Some(CanvasInput::Up(event))
                }
            }
            _ => None,
        })
        .collect()
}

fn held_button(pointer: &egui::PointerState) -> Option<PointerButton> {
    if pointer.primary_down() {
        Some(PointerButton::Primary)
    } else if pointer.secondary_down() {
        Some(PointerButton::Secondary)
    } else if pointer.middle_down() {
        Some(PointerButton::Middle)
    } else {
        None
    }
}
