//! Gesture resolution and drag tracking.
//!
//! A pointer press resolves to exactly one [`Gesture`]; moves are routed to
//! that gesture (or to hover targeting while idle); the matching release
//! commits at most one edit and returns the controller to [`Gesture::Idle`].

use super::event::{PointerButton, PointerEvent};
use super::state::{Gesture, HandleResize, LandmarkDrag};
use super::viewport::{HitObject, HitTarget, Intersection, Viewport};
use crate::geometry::Vector2D;
use crate::landmark::DragSnapshot;
use crate::selection_box::Handle;
use std::mem;

/// Releases closer than this to the press count as a click on the mesh or
/// on nothing. Landmark presses use an exact-position test instead.
pub const CLICK_TOLERANCE: f32 = 2.0;

/// Turns raw pointer events into landmark edits.
#[derive(Debug, Default)]
pub struct MouseController {
    pub(super) gesture: Gesture,
    /// The landmark edited by snap-mode mesh clicks. Outlives gestures.
    pub(super) current_target: Option<usize>,
}

impl MouseController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn current_target(&self) -> Option<usize> {
        self.current_target
    }

    pub fn clear_target(&mut self) {
        self.current_target = None;
    }

    /// Resolves a press into a gesture.
    ///
    /// Ignored when there are no landmarks at all, or while another gesture
    /// is still waiting for its release.
    pub fn on_pointer_down<V: Viewport>(&mut self, viewport: &mut V, event: PointerEvent) {
        if !viewport.has_landmarks() {
            return;
        }
        if !self.gesture.is_idle() {
            tracing::trace!("[gesture] press ignored during {}", self.gesture.name());
            return;
        }
        let Some(button) = event.button else {
            viewport.request_redraw();
            return;
        };

        let landmark_hit = first_placed_landmark_hit(viewport, event.position);
        let mesh_hit = viewport
            .intersect(event.position, HitTarget::Mesh)
            .into_iter()
            .next();
        let handle = viewport.selection_box().handle_at(event.position);

        self.gesture = match button {
            PointerButton::Primary => {
                resolve_primary(viewport, event, landmark_hit, mesh_hit, handle)
            }
            PointerButton::Secondary => match (landmark_hit, mesh_hit) {
                (None, Some(mesh_hit)) => {
                    self.current_target = None;
                    viewport.deselect_all_landmarks();
                    Gesture::AwaitingMeshRelease {
                        down: event,
                        mesh_hit,
                    }
                }
                _ => Gesture::Idle,
            },
            PointerButton::Middle => Gesture::Idle,
        };

        tracing::debug!(
            "[gesture] {:?} press at ({:.1}, {:.1}) -> {}",
            button,
            event.position.x,
            event.position.y,
            self.gesture.name()
        );
        viewport.request_redraw();
    }

    /// Feeds a move to the active gesture, or to hover targeting when idle.
    pub fn on_pointer_move<V: Viewport>(&mut self, viewport: &mut V, event: PointerEvent) {
        if self.gesture.is_idle() {
            self.hover(viewport, event);
            return;
        }

        match &mut self.gesture {
            Gesture::DraggingLandmark(drag) => drag_landmarks(viewport, drag, event.position),
            Gesture::DraggingSelectionBox { down } => {
                viewport.clear_canvas();
                viewport.draw_selection_box(down.position, event.position);
            }
            Gesture::ResizingSelectionHandle(resize) => {
                resize_selection(viewport, resize, event.position)
            }
            // mesh and nothing presses leave the camera free
            _ => {}
        }
    }

    /// Ends the active gesture and commits its edit.
    pub fn on_pointer_up<V: Viewport>(&mut self, viewport: &mut V, event: PointerEvent) {
        let gesture = mem::take(&mut self.gesture);
        tracing::debug!("[gesture] release ends {}", gesture.name());

        match gesture {
            Gesture::Idle => {}
            Gesture::DraggingLandmark(drag) => finish_landmark_press(viewport, drag, event),
            Gesture::DraggingSelectionBox { down } => finish_box_select(viewport, down, event),
            Gesture::ResizingSelectionHandle(resize) => finish_resize(viewport, resize),
            Gesture::AwaitingMeshRelease { down, mesh_hit } => {
                if is_click(down, event) {
                    self.mesh_click(viewport, down, mesh_hit);
                }
                viewport.clear_canvas();
            }
            Gesture::AwaitingNothingRelease { down } => {
                if is_click(down, event) {
                    viewport.deselect_all_landmarks();
                }
                viewport.clear_canvas();
            }
        }
    }

    fn mesh_click<V: Viewport>(&mut self, viewport: &mut V, down: PointerEvent, mesh_hit: Intersection) {
        let local = viewport.world_to_local(mesh_hit.world_point);

        // the press button decides, whatever button was released
        if down.button == Some(PointerButton::Secondary) {
            tracing::debug!("[gesture] insert landmark at {local}");
            viewport.insert_new_landmark(local);
            return;
        }

        if !viewport.snap_mode() {
            return;
        }
        // a target emptied since the last hover tick is not re-pointed
        let target = self
            .current_target
            .filter(|&index| viewport.landmark(index).is_some_and(|lm| !lm.is_empty()));
        if let Some(target) = target {
            tracing::debug!("[gesture] snap landmark {target} to {local}");
            viewport.set_landmark_point(target, local);
        }
    }
}

fn is_click(down: PointerEvent, up: PointerEvent) -> bool {
    down.position.distance(up.position) < CLICK_TOLERANCE
}

fn first_placed_landmark_hit<V: Viewport>(viewport: &V, position: Vector2D) -> Option<(usize, Intersection)> {
    viewport
        .intersect(position, HitTarget::Landmarks)
        .into_iter()
        .find_map(|hit| match hit.hit {
            HitObject::Landmark(index)
                if viewport.landmark(index).is_some_and(|lm| !lm.is_empty()) =>
            {
                Some((index, hit))
            }
            _ => None,
        })
}

fn resolve_primary<V: Viewport>(
    viewport: &mut V,
    event: PointerEvent,
    landmark_hit: Option<(usize, Intersection)>,
    mesh_hit: Option<Intersection>,
    handle: Option<Handle>,
) -> Gesture {
    if let (Some((index, lm_hit)), Some(mesh)) = (landmark_hit, mesh_hit) {
        if let Some(handle) = handle {
            return begin_resize(viewport, event, handle);
        }
        if lm_hit.distance <= mesh.distance {
            return begin_landmark_press(viewport, event, index);
        }
        // marker hidden behind the surface
        return if event.modifiers.shift {
            begin_box_select(viewport, event)
        } else if viewport.snap_mode() {
            Gesture::AwaitingMeshRelease {
                down: event,
                mesh_hit: mesh,
            }
        } else {
            Gesture::AwaitingNothingRelease { down: event }
        };
    }

    if let Some(handle) = handle {
        begin_resize(viewport, event, handle)
    } else if let Some((index, _)) = landmark_hit {
        begin_landmark_press(viewport, event, index)
    } else if event.modifiers.shift {
        begin_box_select(viewport, event)
    } else if let (Some(mesh_hit), true) = (mesh_hit, viewport.snap_mode()) {
        Gesture::AwaitingMeshRelease {
            down: event,
            mesh_hit,
        }
    } else {
        Gesture::AwaitingNothingRelease { down: event }
    }
}

fn begin_landmark_press<V: Viewport>(viewport: &mut V, event: PointerEvent, index: usize) -> Gesture {
    viewport.set_camera_locked(true);

    let (was_selected, point) = match viewport.landmark(index) {
        Some(lm) => (lm.selected, lm.point),
        None => (false, None),
    };
    let Some(point) = point else {
        viewport.set_camera_locked(false);
        return Gesture::Idle;
    };

    if !was_selected {
        if event.modifiers.lock() {
            viewport.select_landmarks(&[index]);
        } else {
            viewport.select_landmark_and_deselect_rest(index);
        }
    }

    let anchor = viewport.local_to_screen(point);
    let snapshot = DragSnapshot::capture(viewport.selected_landmarks());

    Gesture::DraggingLandmark(LandmarkDrag {
        down: event,
        index,
        was_selected,
        anchor,
        last_position: event.position,
        snapshot,
        dragged: false,
    })
}

fn begin_box_select<V: Viewport>(viewport: &mut V, event: PointerEvent) -> Gesture {
    viewport.set_camera_locked(true);
    if !event.modifiers.lock() {
        viewport.deselect_all_landmarks();
    }
    Gesture::DraggingSelectionBox { down: event }
}

fn begin_resize<V: Viewport>(viewport: &mut V, event: PointerEvent, handle: Handle) -> Gesture {
    viewport.set_camera_locked(true);

    let snapshot = DragSnapshot::capture(viewport.selected_landmarks());
    let start_screen = snapshot
        .starts()
        .iter()
        .map(|&(index, point)| (index, viewport.local_to_screen(point)))
        .collect();

    Gesture::ResizingSelectionHandle(HandleResize {
        down: event,
        handle,
        start_box: viewport.selection_box(),
        start_screen,
        snapshot,
        dragged: false,
    })
}

/// Moves a landmark onto the mesh under `screen`; off-mesh positions are skipped.
fn snap_to_mesh<V: Viewport>(viewport: &mut V, index: usize, screen: Vector2D) -> bool {
    let Some(hit) = viewport.intersect(screen, HitTarget::Mesh).into_iter().next() else {
        tracing::trace!("[drag] landmark {index} would leave the mesh, kept");
        return false;
    };
    let local = viewport.world_to_local(hit.world_point);
    viewport.set_landmark_point_without_history(index, local);
    true
}

fn drag_landmarks<V: Viewport>(viewport: &mut V, drag: &mut LandmarkDrag, position: Vector2D) {
    if position == drag.last_position {
        return;
    }
    drag.last_position = position;

    let Some(primary) = viewport.landmark(drag.index).and_then(|lm| lm.point) else {
        return;
    };
    let wanted = drag.anchor + (position - drag.down.position);
    let delta = wanted - viewport.local_to_screen(primary);

    let moves: Vec<(usize, Vector2D)> = viewport
        .selected_landmarks()
        .into_iter()
        .filter_map(|lm| lm.point.map(|p| (lm.index, p)))
        .map(|(index, p)| (index, viewport.local_to_screen(p) + delta))
        .collect();

    for (index, screen) in moves {
        if snap_to_mesh(viewport, index, screen) {
            drag.dragged = true;
        }
    }
}

fn resize_selection<V: Viewport>(viewport: &mut V, resize: &mut HandleResize, position: Vector2D) {
    let new_box = resize
        .start_box
        .resized(resize.handle, position - resize.down.position);

    for &(index, start) in &resize.start_screen {
        let target = resize.start_box.remap(start, &new_box);
        if snap_to_mesh(viewport, index, target) {
            resize.dragged = true;
        }
    }
    viewport.update_selection_box();
}

fn commit_snapshot<V: Viewport>(viewport: &mut V, snapshot: DragSnapshot) {
    let batch = snapshot.close(|index| viewport.landmark(index).and_then(|lm| lm.point));
    if !batch.is_empty() {
        tracing::debug!("[gesture] commit {} moved landmark(s)", batch.len());
        viewport.add_landmark_history(batch);
    }
}

fn finish_landmark_press<V: Viewport>(viewport: &mut V, drag: LandmarkDrag, up: PointerEvent) {
    viewport.set_camera_locked(false);

    // zero displacement is a click even after intermediate moves
    if up.position == drag.down.position {
        if drag.down.modifiers.lock() {
            if drag.was_selected {
                viewport.deselect_landmarks(&[drag.index]);
            }
        } else {
            viewport.select_landmark_and_deselect_rest(drag.index);
            if drag.was_selected {
                let hit = viewport
                    .intersect(up.position, HitTarget::Mesh)
                    .into_iter()
                    .next();
                if let Some(hit) = hit {
                    let local = viewport.world_to_local(hit.world_point);
                    viewport.set_landmark_point(drag.index, local);
                }
            }
        }
    } else if drag.dragged {
        commit_snapshot(viewport, drag.snapshot);
    }
    viewport.update_selection_box();
}

fn finish_box_select<V: Viewport>(viewport: &mut V, down: PointerEvent, up: PointerEvent) {
    viewport.set_camera_locked(false);

    let [x0, x1] = sorted(down.position.x, up.position.x);
    let [y0, y1] = sorted(down.position.y, up.position.y);
    let visible: Vec<usize> = viewport
        .landmarks_in_screen_rect(Vector2D::new(x0, y0), Vector2D::new(x1, y1))
        .into_iter()
        .filter(|&index| viewport.is_landmark_visible(index))
        .collect();

    tracing::debug!("[gesture] box-select picked {} landmark(s)", visible.len());
    viewport.select_landmarks(&visible);
    viewport.clear_canvas();
    viewport.update_selection_box();
}

fn finish_resize<V: Viewport>(viewport: &mut V, resize: HandleResize) {
    if resize.dragged {
        commit_snapshot(viewport, resize.snapshot);
    }
    viewport.set_camera_locked(false);
    viewport.update_selection_box();
}

fn sorted(a: f32, b: f32) -> [f32; 2] {
    if a <= b { [a, b] } else { [b, a] }
}
