use glam::{Vec2, Vec3};
use landmark_core::interaction::{Gesture, Modifiers, MouseController, PointerButton, PointerEvent, Viewport};
use landmark_core::scene::{HeightField, HistoryEntry, OrthoCamera, OverlayShape, Scene};
use landmark_core::Vector2D;

/// Flat 10x10 plate seen at 10 screen units per world unit; world (0, 0)
/// sits at screen (100, 100) and world y points up the screen.
fn flat_scene() -> Scene {
    scene_with_amplitude(0.0)
}

fn scene_with_amplitude(amplitude: f32) -> Scene {
    let mesh = HeightField::new(Vec2::new(5.0, 5.0), amplitude).unwrap();
    let mut scene = Scene::new(mesh, 0.3);
    scene.camera = OrthoCamera {
        center: Vec2::ZERO,
        zoom: 10.0,
        viewport_size: Vector2D::new(200.0, 200.0),
        eye_height: 100.0,
    };
    scene
}

fn at(x: f32, y: f32) -> Vector2D {
    Vector2D::new(x, y)
}

fn press(button: PointerButton, position: Vector2D, modifiers: Modifiers) -> PointerEvent {
    PointerEvent::new(position, Some(button), modifiers)
}

fn click(c: &mut MouseController, scene: &mut Scene, position: Vector2D, modifiers: Modifiers) {
    let event = press(PointerButton::Primary, position, modifiers);
    c.on_pointer_down(scene, event);
    c.on_pointer_up(scene, event);
}

fn drag(c: &mut MouseController, scene: &mut Scene, from: Vector2D, to: Vector2D, modifiers: Modifiers) {
    c.on_pointer_down(scene, press(PointerButton::Primary, from, modifiers));
    c.on_pointer_move(scene, press(PointerButton::Primary, to, modifiers));
    c.on_pointer_up(scene, press(PointerButton::Primary, to, modifiers));
}

fn selected(scene: &Scene) -> Vec<usize> {
    scene.selected_landmarks().iter().map(|lm| lm.index).collect()
}

fn point(scene: &Scene, index: usize) -> Vec3 {
    scene.landmark(index).and_then(|lm| lm.point).unwrap()
}

#[test]
fn press_without_landmarks_is_ignored() {
    let mut scene = flat_scene();
    let mut c = MouseController::new();
    c.on_pointer_down(&mut scene, PointerEvent::primary(at(100.0, 100.0)));
    assert!(c.gesture().is_idle());
    assert!(!scene.take_redraw_request());
}

#[test]
fn every_press_requests_a_redraw() {
    let mut scene = flat_scene();
    scene.add_landmark(Some(Vec3::ZERO));
    let mut c = MouseController::new();
    scene.take_redraw_request();

    // middle button resolves to nothing but still redraws
    c.on_pointer_down(&mut scene, press(PointerButton::Middle, at(150.0, 150.0), Modifiers::NONE));
    assert!(c.gesture().is_idle());
    assert!(scene.take_redraw_request());
}

#[test]
fn click_selects_exactly_the_pressed_landmark() {
    for preselected in [vec![], vec![1, 2], vec![0, 1, 2]] {
        let mut scene = flat_scene();
        let a = scene.add_landmark(Some(Vec3::ZERO));
        scene.add_landmark(Some(Vec3::new(2.0, 0.0, 0.0)));
        scene.add_landmark(Some(Vec3::new(-2.0, 0.0, 0.0)));
        scene.select_landmarks(&preselected);

        let mut c = MouseController::new();
        click(&mut c, &mut scene, at(100.0, 100.0), Modifiers::NONE);

        assert_eq!(selected(&scene), vec![a], "prior selection {preselected:?}");
        assert_eq!(point(&scene, a), Vec3::ZERO);
        assert!(!scene.camera_locked());
        assert!(c.gesture().is_idle());
    }
}

#[test]
fn ctrl_click_adds_then_removes_a_landmark() {
    let mut scene = flat_scene();
    let a = scene.add_landmark(Some(Vec3::ZERO));
    let b = scene.add_landmark(Some(Vec3::new(2.0, 0.0, 0.0)));
    scene.select_landmarks(&[b]);
    let mut c = MouseController::new();

    click(&mut c, &mut scene, at(100.0, 100.0), Modifiers::CTRL);
    assert_eq!(selected(&scene), vec![a, b]);

    click(&mut c, &mut scene, at(100.0, 100.0), Modifiers::CTRL);
    assert_eq!(selected(&scene), vec![b]);
    assert!(scene.history().is_empty());
}

#[test]
fn dragging_moves_the_selection_as_one_history_entry() {
    let mut scene = flat_scene();
    let a = scene.add_landmark(Some(Vec3::ZERO));
    let b = scene.add_landmark(Some(Vec3::new(2.0, 0.0, 0.0)));
    scene.select_landmarks(&[a, b]);
    let mut c = MouseController::new();

    c.on_pointer_down(&mut scene, PointerEvent::primary(at(100.0, 100.0)));
    assert!(matches!(c.gesture(), Gesture::DraggingLandmark(_)));
    assert!(scene.camera_locked());

    c.on_pointer_move(&mut scene, PointerEvent::primary(at(105.0, 100.0)));
    c.on_pointer_move(&mut scene, PointerEvent::primary(at(110.0, 100.0)));
    c.on_pointer_up(&mut scene, PointerEvent::primary(at(110.0, 100.0)));

    assert!(point(&scene, a).abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), 1e-5));
    assert!(point(&scene, b).abs_diff_eq(Vec3::new(3.0, 0.0, 0.0), 1e-5));
    assert!(!scene.camera_locked());

    assert_eq!(scene.history().len(), 1);
    let HistoryEntry::Moved(batch) = &scene.history()[0] else {
        panic!("expected a move entry");
    };
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].from, Vec3::ZERO);

    scene.undo();
    assert_eq!(point(&scene, a), Vec3::ZERO);
    assert_eq!(point(&scene, b), Vec3::new(2.0, 0.0, 0.0));
}

#[test]
fn drag_step_off_the_mesh_leaves_the_point_unchanged() {
    let mut scene = flat_scene();
    let edge = scene.add_landmark(Some(Vec3::new(4.0, 0.0, 0.0)));
    let centre = scene.add_landmark(Some(Vec3::ZERO));
    scene.select_landmarks(&[edge, centre]);
    let mut c = MouseController::new();

    drag(&mut c, &mut scene, at(100.0, 100.0), at(120.0, 100.0), Modifiers::NONE);

    assert_eq!(point(&scene, edge), Vec3::new(4.0, 0.0, 0.0));
    assert!(point(&scene, centre).abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-5));
}

#[test]
fn box_select_gives_the_same_result_in_every_direction() {
    let corners = [
        (at(90.0, 70.0), at(125.0, 105.0)),
        (at(125.0, 105.0), at(90.0, 70.0)),
        (at(90.0, 105.0), at(125.0, 70.0)),
        (at(125.0, 70.0), at(90.0, 105.0)),
    ];
    for (from, to) in corners {
        let mut scene = flat_scene();
        let a = scene.add_landmark(Some(Vec3::ZERO));
        let b = scene.add_landmark(Some(Vec3::new(2.0, 2.0, 0.0)));
        let outside = scene.add_landmark(Some(Vec3::new(-3.0, -3.0, 0.0)));
        scene.select_landmarks(&[outside]);
        let mut c = MouseController::new();

        c.on_pointer_down(&mut scene, press(PointerButton::Primary, from, Modifiers::SHIFT));
        // prior selection is dropped before the box is even drawn
        assert!(selected(&scene).is_empty());
        c.on_pointer_move(&mut scene, press(PointerButton::Primary, to, Modifiers::SHIFT));
        assert!(matches!(scene.overlay(), [OverlayShape::SelectionBox { .. }]));
        c.on_pointer_up(&mut scene, press(PointerButton::Primary, to, Modifiers::SHIFT));

        assert_eq!(selected(&scene), vec![a, b], "dragged {from:?} -> {to:?}");
        assert!(scene.overlay().is_empty());
        assert!(!scene.camera_locked());
    }
}

#[test]
fn box_select_skips_landmarks_under_the_surface() {
    let mut scene = scene_with_amplitude(1.0);
    let hidden = scene.add_landmark(Some(Vec3::new(0.0, 0.0, 0.5)));
    let on_top = scene.add_landmark(Some(Vec3::new(2.0, 0.0, 2.0)));
    let mut c = MouseController::new();

    drag(&mut c, &mut scene, at(80.0, 80.0), at(130.0, 120.0), Modifiers::SHIFT);

    let picked = selected(&scene);
    assert!(picked.contains(&on_top));
    assert!(!picked.contains(&hidden));
}

#[test]
fn shift_box_with_ctrl_keeps_the_prior_selection() {
    let mut scene = flat_scene();
    let inside = scene.add_landmark(Some(Vec3::ZERO));
    let kept = scene.add_landmark(Some(Vec3::new(-4.0, -4.0, 0.0)));
    scene.select_landmarks(&[kept]);
    let mut c = MouseController::new();

    let both = Modifiers {
        shift: true,
        ctrl: true,
        meta: false,
    };
    drag(&mut c, &mut scene, at(90.0, 90.0), at(110.0, 110.0), both);

    assert_eq!(selected(&scene), vec![inside, kept]);
}

#[test]
fn resizing_keeps_fractional_positions() {
    let mut scene = flat_scene();
    scene.set_group_selection_mode(true);
    let top_left = scene.add_landmark(Some(Vec3::new(-5.0, 5.0, 0.0)));
    let middle = scene.add_landmark(Some(Vec3::ZERO));
    let bottom_right = scene.add_landmark(Some(Vec3::new(5.0, -5.0, 0.0)));
    scene.select_landmarks(&[top_left, middle, bottom_right]);
    scene.update_selection_box();
    assert!(scene.selection_box().is_active());

    let mut c = MouseController::new();
    // the handle wins over the marker sitting on the same corner
    c.on_pointer_down(&mut scene, PointerEvent::primary(at(150.0, 150.0)));
    assert!(matches!(c.gesture(), Gesture::ResizingSelectionHandle(_)));

    c.on_pointer_move(&mut scene, PointerEvent::primary(at(100.0, 100.0)));
    c.on_pointer_up(&mut scene, PointerEvent::primary(at(100.0, 100.0)));

    assert!(point(&scene, middle).abs_diff_eq(Vec3::new(-2.5, 2.5, 0.0), 1e-4));
    assert!(point(&scene, bottom_right).abs_diff_eq(Vec3::ZERO, 1e-4));
    assert!(point(&scene, top_left).abs_diff_eq(Vec3::new(-5.0, 5.0, 0.0), 1e-4));
    assert_eq!(scene.history().len(), 1);
    assert!(!scene.camera_locked());
}

#[test]
fn right_click_on_the_mesh_inserts_a_landmark() {
    let mut scene = flat_scene();
    let a = scene.add_landmark(Some(Vec3::ZERO));
    scene.select_landmarks(&[a]);
    let mut c = MouseController::new();

    let event = PointerEvent::secondary(at(130.0, 100.0));
    c.on_pointer_down(&mut scene, event);
    assert!(selected(&scene).is_empty());
    c.on_pointer_up(&mut scene, event);

    assert_eq!(scene.landmarks().len(), 2);
    let inserted = scene.landmarks()[1].index;
    assert!(point(&scene, inserted).abs_diff_eq(Vec3::new(3.0, 0.0, 0.0), 1e-5));
}

#[test]
fn right_press_decides_even_when_another_button_is_released() {
    let mut scene = flat_scene();
    scene.add_landmark(Some(Vec3::ZERO));
    let mut c = MouseController::new();

    c.on_pointer_down(&mut scene, PointerEvent::secondary(at(130.0, 100.0)));
    c.on_pointer_up(&mut scene, PointerEvent::primary(at(130.0, 100.0)));
    assert_eq!(scene.landmarks().len(), 2);
}

#[test]
fn snap_mode_click_moves_the_hovered_target() {
    let mut scene = flat_scene();
    scene.set_snap_mode(true);
    let a = scene.add_landmark(Some(Vec3::ZERO));
    let b = scene.add_landmark(Some(Vec3::new(3.0, 0.0, 0.0)));
    let mut c = MouseController::new();

    c.on_pointer_move(&mut scene, PointerEvent::hover(at(125.0, 100.0)));
    assert_eq!(c.current_target(), Some(b));
    assert_eq!(selected(&scene), vec![b]);

    click(&mut c, &mut scene, at(125.0, 100.0), Modifiers::NONE);
    assert!(point(&scene, b).abs_diff_eq(Vec3::new(2.5, 0.0, 0.0), 1e-5));
    assert_eq!(point(&scene, a), Vec3::ZERO);
    assert_eq!(scene.history().len(), 1);
}

#[test]
fn locked_hover_never_changes_the_target() {
    let mut scene = flat_scene();
    scene.set_snap_mode(true);
    let a = scene.add_landmark(Some(Vec3::ZERO));
    let b = scene.add_landmark(Some(Vec3::new(3.0, 0.0, 0.0)));
    scene.add_landmark(Some(Vec3::new(-3.0, 0.0, 0.0)));
    let mut c = MouseController::new();

    c.on_pointer_move(&mut scene, PointerEvent::hover(at(101.0, 100.0)));
    assert_eq!(c.current_target(), Some(a));

    for x in [128.0, 72.0, 140.0] {
        let event = PointerEvent::hover(at(x, 100.0)).with_modifiers(Modifiers::CTRL);
        c.on_pointer_move(&mut scene, event);
        assert_eq!(c.current_target(), Some(a));
    }

    c.on_pointer_move(
        &mut scene,
        PointerEvent::hover(at(128.0, 100.0)).with_modifiers(Modifiers::CTRL),
    );
    let Some(OverlayShape::TargetingLines { next_closest, .. }) = scene.overlay().last() else {
        panic!("expected targeting lines");
    };
    assert_eq!(next_closest.first(), Some(&scene.local_to_screen(point(&scene, b))));
    assert_eq!(next_closest.len(), 2);
}

#[test]
fn hovering_off_the_mesh_keeps_the_target() {
    let mut scene = flat_scene();
    scene.set_snap_mode(true);
    let a = scene.add_landmark(Some(Vec3::ZERO));
    let mut c = MouseController::new();

    c.on_pointer_move(&mut scene, PointerEvent::hover(at(100.0, 100.0)));
    c.on_pointer_move(&mut scene, PointerEvent::hover(at(190.0, 100.0)));
    assert_eq!(c.current_target(), Some(a));
}

#[test]
fn target_whose_point_vanished_is_dropped() {
    let mut scene = flat_scene();
    scene.set_snap_mode(true);
    let a = scene.add_landmark(Some(Vec3::ZERO));
    let b = scene.add_landmark(Some(Vec3::new(3.0, 0.0, 0.0)));
    let mut c = MouseController::new();

    c.on_pointer_move(&mut scene, PointerEvent::hover(at(100.0, 100.0)));
    assert_eq!(c.current_target(), Some(a));
    scene.clear_selected_points();

    // the lock would pin a live target, but this one is stale
    let event = PointerEvent::hover(at(100.0, 100.0)).with_modifiers(Modifiers::CTRL);
    c.on_pointer_move(&mut scene, event);
    assert_eq!(c.current_target(), Some(b));
}

#[test]
fn nothing_press_deselects_only_when_stationary() {
    let mut scene = flat_scene();
    let a = scene.add_landmark(Some(Vec3::ZERO));
    scene.select_landmarks(&[a]);
    let mut c = MouseController::new();

    c.on_pointer_down(&mut scene, PointerEvent::primary(at(150.0, 150.0)));
    assert!(matches!(c.gesture(), Gesture::AwaitingNothingRelease { .. }));
    assert!(!scene.camera_locked());
    c.on_pointer_up(&mut scene, PointerEvent::primary(at(155.0, 150.0)));
    assert_eq!(selected(&scene), vec![a]);

    c.on_pointer_down(&mut scene, PointerEvent::primary(at(150.0, 150.0)));
    c.on_pointer_up(&mut scene, PointerEvent::primary(at(151.5, 150.0)));
    assert!(selected(&scene).is_empty());
}

#[test]
fn second_press_during_a_gesture_is_ignored() {
    let mut scene = flat_scene();
    let a = scene.add_landmark(Some(Vec3::ZERO));
    let b = scene.add_landmark(Some(Vec3::new(2.0, 0.0, 0.0)));
    let mut c = MouseController::new();

    c.on_pointer_down(&mut scene, PointerEvent::primary(at(100.0, 100.0)));
    c.on_pointer_down(&mut scene, PointerEvent::primary(at(120.0, 100.0)));
    let Gesture::DraggingLandmark(pressed) = c.gesture() else {
        panic!("expected the first press to stay in charge");
    };
    assert_eq!(pressed.index, a);

    c.on_pointer_up(&mut scene, PointerEvent::primary(at(100.0, 100.0)));
    assert_eq!(selected(&scene), vec![a]);
    assert!(!scene.landmark(b).unwrap().selected);
}

#[test]
fn plain_click_on_selected_landmark_resnaps_it_under_the_cursor() {
    let mut scene = flat_scene();
    // marker centre sits 2 px right of the cursor, still within its radius
    let a = scene.add_landmark(Some(Vec3::new(0.2, 0.0, 0.0)));
    let b = scene.add_landmark(Some(Vec3::new(-3.0, 0.0, 0.0)));
    scene.select_landmarks(&[a, b]);
    let mut c = MouseController::new();

    click(&mut c, &mut scene, at(100.0, 100.0), Modifiers::NONE);

    assert_eq!(selected(&scene), vec![a]);
    assert!(point(&scene, a).abs_diff_eq(Vec3::ZERO, 1e-5));
    assert_eq!(scene.history().len(), 1);
    let HistoryEntry::Moved(batch) = &scene.history()[0] else {
        panic!("expected a move entry");
    };
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].index, a);
    assert_eq!(batch[0].from, Vec3::new(0.2, 0.0, 0.0));
}

#[test]
fn release_back_on_the_press_position_is_a_click() {
    let mut scene = flat_scene();
    let a = scene.add_landmark(Some(Vec3::ZERO));
    let b = scene.add_landmark(Some(Vec3::new(2.0, 0.0, 0.0)));
    scene.select_landmarks(&[a, b]);
    let mut c = MouseController::new();

    c.on_pointer_down(&mut scene, PointerEvent::primary(at(100.0, 100.0)));
    c.on_pointer_move(&mut scene, PointerEvent::primary(at(110.0, 100.0)));
    c.on_pointer_move(&mut scene, PointerEvent::primary(at(100.0, 100.0)));
    c.on_pointer_up(&mut scene, PointerEvent::primary(at(100.0, 100.0)));

    assert_eq!(selected(&scene), vec![a]);
    assert!(point(&scene, b).abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-5));
    assert!(!scene.camera_locked());

    // only the re-snap of the pressed landmark is recorded
    assert_eq!(scene.history().len(), 1);
    let HistoryEntry::Moved(batch) = &scene.history()[0] else {
        panic!("expected a move entry");
    };
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].index, a);
}

#[test]
fn marker_under_the_surface_loses_to_the_mesh() {
    let build = || {
        let mut scene = scene_with_amplitude(1.0);
        scene.add_landmark(Some(Vec3::new(0.0, 0.0, 0.5)));
        scene
    };
    let centre = at(100.0, 100.0);

    let mut scene = build();
    let mut c = MouseController::new();
    c.on_pointer_down(&mut scene, press(PointerButton::Primary, centre, Modifiers::SHIFT));
    assert!(matches!(c.gesture(), Gesture::DraggingSelectionBox { .. }));

    let mut scene = build();
    scene.set_snap_mode(true);
    let mut c = MouseController::new();
    c.on_pointer_down(&mut scene, PointerEvent::primary(centre));
    assert!(matches!(c.gesture(), Gesture::AwaitingMeshRelease { .. }));

    let mut scene = build();
    let mut c = MouseController::new();
    c.on_pointer_down(&mut scene, PointerEvent::primary(centre));
    assert!(matches!(c.gesture(), Gesture::AwaitingNothingRelease { .. }));
    assert!(!scene.camera_locked());
}

#[test]
fn snap_click_skips_a_target_emptied_since_hover() {
    let mut scene = flat_scene();
    scene.set_snap_mode(true);
    let a = scene.add_landmark(Some(Vec3::ZERO));
    scene.add_landmark(Some(Vec3::new(3.0, 0.0, 0.0)));
    let mut c = MouseController::new();

    c.on_pointer_move(&mut scene, PointerEvent::hover(at(100.0, 100.0)));
    assert_eq!(c.current_target(), Some(a));
    scene.clear_selected_points();

    click(&mut c, &mut scene, at(150.0, 150.0), Modifiers::NONE);

    assert!(scene.landmark(a).unwrap().is_empty());
    assert_eq!(scene.landmarks().len(), 2);
    assert!(matches!(scene.history(), [HistoryEntry::Cleared(_)]));
}

#[test]
fn press_without_a_known_button_still_redraws() {
    let mut scene = flat_scene();
    scene.add_landmark(Some(Vec3::ZERO));
    let mut c = MouseController::new();
    scene.take_redraw_request();

    c.on_pointer_down(&mut scene, PointerEvent::hover(at(100.0, 100.0)));
    assert!(c.gesture().is_idle());
    assert!(scene.take_redraw_request());
}
