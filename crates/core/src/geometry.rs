//! Screen-space primitives.
//!
//! Mesh-local and world positions are plain [`glam::Vec3`]; only screen
//! space gets its own type so the two can never be mixed up.

use eframe::egui;
use std::ops::{Add, Sub};

/// A point (or offset) in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }
}

impl Add for Vector2D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2D {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<egui::Pos2> for Vector2D {
    fn from(pos: egui::Pos2) -> Self {
        Self::new(pos.x, pos.y)
    }
}

impl From<Vector2D> for egui::Pos2 {
    fn from(v: Vector2D) -> Self {
        egui::pos2(v.x, v.y)
    }
}
