//! Hover targeting for snap placement.
//!
//! While no button is held, the landmark nearest to the cursor's mesh point
//! becomes the current target, and targeting it also selects it alone.

use super::controller::MouseController;
use super::event::PointerEvent;
use super::viewport::{HitTarget, Viewport};
use crate::nearest::nearest_landmarks;

/// Neighbours drawn alongside the target.
const NEXT_CLOSEST: usize = 3;

impl MouseController {
    pub(super) fn hover<V: Viewport>(&mut self, viewport: &mut V, event: PointerEvent) {
        viewport.clear_canvas();
        viewport.update_selection_box();

        if event.button.is_some() || !viewport.snap_mode() {
            return;
        }

        if let Some(target) = self.current_target {
            if viewport.landmark(target).is_none_or(|lm| lm.is_empty()) {
                tracing::debug!("[targeting] landmark {target} lost its point, untargeted");
                self.current_target = None;
            }
        }

        let Some(hit) = viewport
            .intersect(event.position, HitTarget::Mesh)
            .into_iter()
            .next()
        else {
            return;
        };
        let local = viewport.world_to_local(hit.world_point);

        let (target, next_closest) = match self.current_target {
            Some(pinned) if event.modifiers.lock() => {
                let candidates = viewport
                    .non_empty_landmarks()
                    .into_iter()
                    .filter(|lm| lm.index != pinned);
                let next: Vec<usize> = nearest_landmarks(candidates, local, NEXT_CLOSEST)
                    .into_iter()
                    .map(|lm| lm.index)
                    .collect();
                (pinned, next)
            }
            _ => {
                let found: Vec<usize> =
                    nearest_landmarks(viewport.non_empty_landmarks(), local, NEXT_CLOSEST + 1)
                        .into_iter()
                        .map(|lm| lm.index)
                        .collect();
                let Some((&nearest, rest)) = found.split_first() else {
                    return;
                };
                (nearest, rest.to_vec())
            }
        };

        if self.current_target != Some(target) {
            tracing::debug!("[targeting] target -> landmark {target}");
            self.current_target = Some(target);
            viewport.select_landmark_and_deselect_rest(target);
        }

        let screen_of = |index: usize| {
            viewport
                .landmark(index)
                .and_then(|lm| lm.point)
                .map(|p| viewport.local_to_screen(p))
        };
        let Some(target_screen) = screen_of(target) else {
            return;
        };
        let next_screen: Vec<_> = next_closest.into_iter().filter_map(screen_of).collect();
        viewport.draw_targeting_lines(event.position, target_screen, &next_screen);
    }
}
