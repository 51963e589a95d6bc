//! Pointer input as seen by the interaction controller.

use crate::geometry::Vector2D;
use eframe::egui;

/// Mouse buttons the controller distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

impl PointerButton {
    /// Maps an egui button; the extra side buttons are not used.
    pub fn from_egui(button: egui::PointerButton) -> Option<Self> {
        match button {
            egui::PointerButton::Primary => Some(Self::Primary),
            egui::PointerButton::Secondary => Some(Self::Secondary),
            egui::PointerButton::Middle => Some(Self::Middle),
            _ => None,
        }
    }
}

/// Keyboard modifiers held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        meta: false,
    };

    /// Multi-select on presses, target pinning while hovering.
    pub fn lock(&self) -> bool {
        self.ctrl || self.meta
    }
}

impl From<egui::Modifiers> for Modifiers {
    fn from(m: egui::Modifiers) -> Self {
        Self {
            shift: m.shift,
            ctrl: m.ctrl,
            meta: m.mac_cmd,
        }
    }
}

/// A pointer press, release or move in screen space.
///
/// For presses and releases `button` is the button that changed; for moves
/// it is the button held down, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Vector2D,
    pub button: Option<PointerButton>,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(position: Vector2D, button: Option<PointerButton>, modifiers: Modifiers) -> Self {
        Self {
            position,
            button,
            modifiers,
        }
    }

    pub fn primary(position: Vector2D) -> Self {
        Self::new(position, Some(PointerButton::Primary), Modifiers::NONE)
    }

    pub fn secondary(position: Vector2D) -> Self {
        Self::new(position, Some(PointerButton::Secondary), Modifiers::NONE)
    }

    /// A move with no button held.
    pub fn hover(position: Vector2D) -> Self {
        Self::new(position, None, Modifiers::NONE)
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
