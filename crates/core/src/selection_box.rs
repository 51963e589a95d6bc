//! Screen-space selection box with four draggable corner handles.

use crate::geometry::Vector2D;

/// Half-size of the square hit region around each corner, in screen units.
pub const HANDLE_TOLERANCE: f32 = 3.0;

/// Corner coordinate shared by both corners of an inactive box.
pub const INACTIVE_CORNER: Vector2D = Vector2D::new(-1.0, -1.0);

/// One of the four corners of a [`SelectionBox`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Handle {
    pub const ALL: [Handle; 4] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
    ];
}

/// Axis-aligned rectangle in screen space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionBox {
    pub min: Vector2D,
    pub max: Vector2D,
}

impl Default for SelectionBox {
    fn default() -> Self {
        Self::INACTIVE
    }
}

impl SelectionBox {
    pub const INACTIVE: Self = Self {
        min: INACTIVE_CORNER,
        max: INACTIVE_CORNER,
    };

    pub fn new(min: Vector2D, max: Vector2D) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, or the inactive box when empty.
    pub fn bounding(points: impl IntoIterator<Item = Vector2D>) -> Self {
        points
            .into_iter()
            .fold(None, |acc: Option<Self>, p| {
                Some(match acc {
                    None => Self::new(p, p),
                    Some(b) => Self::new(
                        Vector2D::new(b.min.x.min(p.x), b.min.y.min(p.y)),
                        Vector2D::new(b.max.x.max(p.x), b.max.y.max(p.y)),
                    ),
                })
            })
            .unwrap_or(Self::INACTIVE)
    }

    pub fn is_active(&self) -> bool {
        !(self.min == INACTIVE_CORNER && self.max == INACTIVE_CORNER)
    }

    pub fn corner(&self, handle: Handle) -> Vector2D {
        match handle {
            Handle::TopLeft => self.min,
            Handle::TopRight => Vector2D::new(self.max.x, self.min.y),
            Handle::BottomLeft => Vector2D::new(self.min.x, self.max.y),
            Handle::BottomRight => self.max,
        }
    }

    /// The handle whose square hit region contains `point`, if any.
    ///
    /// An inactive box never reports a hit.
    pub fn handle_at(&self, point: Vector2D) -> Option<Handle> {
        if !self.is_active() {
            return None;
        }
        Handle::ALL.into_iter().find(|&handle| {
            let corner = self.corner(handle);
            (point.x - corner.x).abs() <= HANDLE_TOLERANCE
                && (point.y - corner.y).abs() <= HANDLE_TOLERANCE
        })
    }

    /// The box after dragging `handle` by `delta`; the opposite corner stays put.
    pub fn resized(&self, handle: Handle, delta: Vector2D) -> Self {
        let mut resized = *self;
        match handle {
            Handle::TopLeft => {
                resized.min.x += delta.x;
                resized.min.y += delta.y;
            }
            Handle::TopRight => {
                resized.min.y += delta.y;
                resized.max.x += delta.x;
            }
            Handle::BottomLeft => {
                resized.min.x += delta.x;
                resized.max.y += delta.y;
            }
            Handle::BottomRight => {
                resized.max.x += delta.x;
                resized.max.y += delta.y;
            }
        }
        resized
    }

    /// Maps `point` from this box into `target`, keeping its fractional
    /// position on both axes.
    pub fn remap(&self, point: Vector2D, target: &SelectionBox) -> Vector2D {
        let fx = fraction(point.x, self.min.x, self.max.x);
        let fy = fraction(point.y, self.min.y, self.max.y);
        Vector2D::new(
            target.min.x + fx * (target.max.x - target.min.x),
            target.min.y + fy * (target.max.y - target.min.y),
        )
    }
}

// A flat axis has no interior, everything on it sits at the min edge.
fn fraction(value: f32, min: f32, max: f32) -> f32 {
    let extent = max - min;
    if extent.abs() <= f32::EPSILON {
        0.0
    } else {
        (value - min) / extent
    }
}
