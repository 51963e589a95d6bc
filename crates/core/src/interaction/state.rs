//! Gesture state machine types.
//!
//! Each non-idle state owns exactly the data its gesture needs, so nothing
//! leaks from one gesture into the next:
//!
//! `Idle` -> any other state (pointer down) -> `Idle` (pointer up)

use super::event::PointerEvent;
use super::viewport::Intersection;
use crate::geometry::Vector2D;
use crate::landmark::DragSnapshot;
use crate::selection_box::{Handle, SelectionBox};

/// The gesture currently in progress.
#[derive(Debug, Clone, Default)]
pub enum Gesture {
    /// No button pressed; moves drive hover targeting.
    #[default]
    Idle,
    /// Pressed on the mesh; resolved on release.
    AwaitingMeshRelease {
        down: PointerEvent,
        mesh_hit: Intersection,
    },
    /// Dragging one or more selected landmarks across the mesh.
    DraggingLandmark(LandmarkDrag),
    /// Shift-dragging a box-select rectangle.
    DraggingSelectionBox { down: PointerEvent },
    /// Dragging a corner of the selection box.
    ResizingSelectionHandle(HandleResize),
    /// Pressed on nothing meaningful; resolved on release.
    AwaitingNothingRelease { down: PointerEvent },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    /// Whether pointer moves are consumed by the gesture rather than
    /// passed on to hover targeting or the camera.
    pub fn tracks_motion(&self) -> bool {
        matches!(
            self,
            Gesture::DraggingLandmark(_)
                | Gesture::DraggingSelectionBox { .. }
                | Gesture::ResizingSelectionHandle(_)
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Gesture::Idle => "idle",
            Gesture::AwaitingMeshRelease { .. } => "mesh-press",
            Gesture::DraggingLandmark(_) => "landmark-drag",
            Gesture::DraggingSelectionBox { .. } => "box-select",
            Gesture::ResizingSelectionHandle(_) => "handle-resize",
            Gesture::AwaitingNothingRelease { .. } => "nothing-press",
        }
    }
}

/// State of a landmark press, which becomes a drag once a move lands.
#[derive(Debug, Clone)]
pub struct LandmarkDrag {
    pub down: PointerEvent,
    /// The landmark whose marker was pressed.
    pub index: usize,
    /// Selection state of the pressed landmark before the press.
    pub was_selected: bool,
    /// Screen projection of the pressed landmark at press time.
    pub anchor: Vector2D,
    pub last_position: Vector2D,
    pub snapshot: DragSnapshot,
    pub dragged: bool,
}

/// State of a selection-box corner drag.
#[derive(Debug, Clone)]
pub struct HandleResize {
    pub down: PointerEvent,
    pub handle: Handle,
    pub start_box: SelectionBox,
    /// Screen projection of each snapshotted landmark at gesture start.
    pub start_screen: Vec<(usize, Vector2D)>,
    pub snapshot: DragSnapshot,
    pub dragged: bool,
}
