#![allow(clippy::float_cmp)]

use std::cell::RefCell;
use std::f64::consts::FRAC_PI_4;
use std::rc::Rc;

use super::*;
use crate::events::Event;
use crate::input::{KeyEventKind, MouseEventKind};

const EPSILON: f64 = 1e-9;

fn approx(a: Vector2, b: Vector2) -> bool {
    (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
}

fn setup() -> (InputState, Camera) {
    let mut camera = Camera::new(1000.0, FRAC_PI_4);
    assert!(camera.set_screen_size(800.0, 600.0).is_ok());
    (InputState::new(), camera)
}

fn at(x: f64, y: f64) -> PointerInput {
    PointerInput::new(Vector2::new(x, y), Button::Primary)
}

fn record_mouse(input: &mut InputState, kind: MouseEventKind) -> Rc<RefCell<Vec<MouseEvent>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    input.mouse.events.on(kind, move |e| sink.borrow_mut().push(e.clone()));
    seen
}

// =============================================================
// Pointer
// =============================================================

#[test]
fn move_maps_world_position() {
    let (mut input, mut camera) = setup();
    let mut t = InputTarget { input: &mut input, camera: &mut camera, controls: None };
    assert!(pointer_move(&mut t, at(400.0, 300.0)).is_ok());
    assert_eq!(input.mouse.pos, Vector2::new(400.0, 300.0));
    assert!(approx(input.mouse.world_pos, Vector2::ZERO));
}

#[test]
fn move_delta_is_in_world_units() {
    let (mut input, mut camera) = setup();
    let scale = camera.viewport().scale;
    let mut t = InputTarget { input: &mut input, camera: &mut camera, controls: None };
    assert!(pointer_move(&mut t, at(100.0, 100.0)).is_ok());
    t.input.mouse.delta = Vector2::ZERO;
    assert!(pointer_move(&mut t, at(180.0, 160.0)).is_ok());
    assert!(approx(input.mouse.delta, Vector2::new(80.0 / scale.x, 60.0 / scale.y)));
}

#[test]
fn moves_between_ticks_accumulate_delta() {
    let (mut input, mut camera) = setup();
    let scale = camera.viewport().scale;
    let mut t = InputTarget { input: &mut input, camera: &mut camera, controls: None };
    assert!(pointer_move(&mut t, at(100.0, 100.0)).is_ok());
    t.input.mouse.delta = Vector2::ZERO;
    assert!(pointer_move(&mut t, at(140.0, 100.0)).is_ok());
    assert!(pointer_move(&mut t, at(180.0, 160.0)).is_ok());
    assert!(approx(input.mouse.delta, Vector2::new(80.0 / scale.x, 60.0 / scale.y)));
}

#[test]
fn move_emits_with_world_payload() {
    let (mut input, mut camera) = setup();
    let seen = record_mouse(&mut input, MouseEventKind::Move);
    let mut t = InputTarget { input: &mut input, camera: &mut camera, controls: None };
    assert!(pointer_move(&mut t, at(400.0, 300.0)).is_ok());
    let events = seen.borrow();
    assert_eq!(events.len(), 1);
    let MouseEvent::Move(p) = &events[0] else {
        panic!("expected a move event");
    };
    assert!(approx(p.world, Vector2::ZERO));
}

#[test]
fn down_and_up_track_buttons() {
    let (mut input, mut camera) = setup();
    let downs = record_mouse(&mut input, MouseEventKind::Down);
    let ups = record_mouse(&mut input, MouseEventKind::Up);
    let mut t = InputTarget { input: &mut input, camera: &mut camera, controls: None };

    pointer_down(&mut t, at(10.0, 10.0));
    assert!(t.input.mouse.left_down);
    pointer_down(&mut t, PointerInput::new(Vector2::new(10.0, 10.0), Button::Secondary));
    assert!(t.input.mouse.right_down);
    pointer_up(&mut t, at(12.0, 10.0));
    assert!(!t.input.mouse.left_down);
    assert!(t.input.mouse.right_down);
    assert_eq!(t.input.mouse.pos, Vector2::new(12.0, 10.0));

    assert_eq!(downs.borrow().len(), 2);
    assert_eq!(ups.borrow().len(), 1);
}

#[test]
fn click_and_context_menu_only_notify() {
    let (mut input, mut camera) = setup();
    let clicks = record_mouse(&mut input, MouseEventKind::Click);
    let menus = record_mouse(&mut input, MouseEventKind::ContextMenu);
    let mut t = InputTarget { input: &mut input, camera: &mut camera, controls: None };
    click(&mut t, at(1.0, 1.0));
    context_menu(&mut t, at(1.0, 1.0));
    assert!(!t.input.mouse.left_down);
    assert_eq!(clicks.borrow().len(), 1);
    assert_eq!(menus.borrow().len(), 1);
}

// =============================================================
// Panning
// =============================================================

#[test]
fn pan_keeps_grabbed_world_point_under_cursor() {
    let (mut input, mut camera) = setup();
    let controls = CameraControls::default();
    let mut t = InputTarget { input: &mut input, camera: &mut camera, controls: Some(&controls) };
    pointer_down(&mut t, at(100.0, 100.0));
    let grabbed = t.input.mouse.world_pos;
    assert!(pointer_move(&mut t, at(300.0, 250.0)).is_ok());
    assert!(approx(t.input.mouse.world_pos, grabbed));
    assert!(t.camera.look_at() != Vector2::ZERO);
}

#[test]
fn pan_follows_this_move_only() {
    let (mut input, mut camera) = setup();
    let controls = CameraControls::default();
    input.mouse.delta = Vector2::new(500.0, -500.0);
    let mut t = InputTarget { input: &mut input, camera: &mut camera, controls: Some(&controls) };
    pointer_down(&mut t, at(100.0, 100.0));
    let grabbed = t.input.mouse.world_pos;
    assert!(pointer_move(&mut t, at(300.0, 250.0)).is_ok());
    assert!(approx(t.input.mouse.world_pos, grabbed));
}

#[test]
fn no_controls_means_no_pan() {
    let (mut input, mut camera) = setup();
    let mut t = InputTarget { input: &mut input, camera: &mut camera, controls: None };
    pointer_down(&mut t, at(100.0, 100.0));
    assert!(pointer_move(&mut t, at(300.0, 250.0)).is_ok());
    assert_eq!(camera.look_at(), Vector2::ZERO);
}

#[test]
fn locked_camera_does_not_pan() {
    let (mut input, mut camera) = setup();
    camera.lock();
    let controls = CameraControls::default();
    let mut t = InputTarget { input: &mut input, camera: &mut camera, controls: Some(&controls) };
    pointer_down(&mut t, at(100.0, 100.0));
    assert!(pointer_move(&mut t, at(300.0, 250.0)).is_ok());
    assert_eq!(camera.look_at(), Vector2::ZERO);
}

#[test]
fn hover_blocks_default_pan() {
    let (mut input, mut camera) = setup();
    input.mouse.hovering = Some(uuid::Uuid::new_v4());
    let controls = CameraControls::default();
    let mut t = InputTarget { input: &mut input, camera: &mut camera, controls: Some(&controls) };
    pointer_down(&mut t, at(100.0, 100.0));
    assert!(pointer_move(&mut t, at(300.0, 250.0)).is_ok());
    assert_eq!(camera.look_at(), Vector2::ZERO);
}

// =============================================================
// Wheel
// =============================================================

#[test]
fn wheel_zooms_and_clamps() {
    let (mut input, mut camera) = setup();
    let controls = CameraControls::default();
    let mut t = InputTarget { input: &mut input, camera: &mut camera, controls: Some(&controls) };

    assert!(wheel(&mut t, at(0.0, 0.0), WheelDelta { dx: 0.0, dy: 250.0 }).is_ok());
    assert_eq!(t.camera.distance(), 1250.0);
    assert!(wheel(&mut t, at(0.0, 0.0), WheelDelta { dx: 0.0, dy: 1e9 }).is_ok());
    assert_eq!(t.camera.distance(), MAX_DISTANCE);
    assert!(wheel(&mut t, at(0.0, 0.0), WheelDelta { dx: 0.0, dy: -1e9 }).is_ok());
    assert_eq!(t.camera.distance(), MIN_DISTANCE);
}

#[test]
fn wheel_respects_zoom_flag_and_lock() {
    let (mut input, mut camera) = setup();
    let no_zoom = CameraControls { zoom: false, ..CameraControls::default() };
    let seen = record_mouse(&mut input, MouseEventKind::Wheel);
    {
        let mut t = InputTarget { input: &mut input, camera: &mut camera, controls: Some(&no_zoom) };
        assert!(wheel(&mut t, at(0.0, 0.0), WheelDelta { dx: 0.0, dy: 250.0 }).is_ok());
    }
    assert_eq!(camera.distance(), 1000.0);

    camera.lock();
    let controls = CameraControls::default();
    let mut t = InputTarget { input: &mut input, camera: &mut camera, controls: Some(&controls) };
    assert!(wheel(&mut t, at(0.0, 0.0), WheelDelta { dx: 0.0, dy: 250.0 }).is_ok());
    assert_eq!(camera.distance(), 1000.0);
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn wheel_refreshes_world_position() {
    let (mut input, mut camera) = setup();
    let controls = CameraControls::default();
    let mut t = InputTarget { input: &mut input, camera: &mut camera, controls: Some(&controls) };
    assert!(pointer_move(&mut t, at(0.0, 0.0)).is_ok());
    let before = t.input.mouse.world_pos;
    assert!(wheel(&mut t, at(0.0, 0.0), WheelDelta { dx: 0.0, dy: 500.0 }).is_ok());
    assert!(t.input.mouse.world_pos.x < before.x);
}

// =============================================================
// Resize
// =============================================================

#[test]
fn resize_rederives_viewport() {
    let (mut input, mut camera) = setup();
    let mut t = InputTarget { input: &mut input, camera: &mut camera, controls: None };
    assert!(resize(&mut t, 400.0, 400.0).is_ok());
    let vp = *camera.viewport();
    assert_eq!(vp.scale.x, 400.0 / vp.width);
    assert!((vp.width - vp.height).abs() < EPSILON);
}

#[test]
fn resize_to_zero_is_an_error() {
    let (mut input, mut camera) = setup();
    let mut t = InputTarget { input: &mut input, camera: &mut camera, controls: None };
    assert!(resize(&mut t, 0.0, 0.0).is_err());
}

// =============================================================
// Keyboard
// =============================================================

#[test]
fn keys_update_map_and_notify() {
    let mut input = InputState::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    for kind in [KeyEventKind::Down, KeyEventKind::Up, KeyEventKind::Press] {
        let sink = Rc::clone(&seen);
        input.keyboard.events.on(kind, move |e| sink.borrow_mut().push(e.kind()));
    }

    key_down(&mut input, Key::new("Shift"), Modifiers::default());
    assert!(input.keyboard.is_down(&Key::new("Shift")));
    key_press(&mut input, Key::new("Shift"), Modifiers::default());
    key_up(&mut input, Key::new("Shift"), Modifiers::default());
    assert!(!input.keyboard.is_down(&Key::new("Shift")));

    assert_eq!(*seen.borrow(), vec![KeyEventKind::Down, KeyEventKind::Press, KeyEventKind::Up]);
}
