#![allow(clippy::float_cmp)]

use super::*;
use crate::SceneError;
use crate::input::Button;

#[test]
fn empty_json_uses_defaults() {
    let opts = RendererOptions::from_json("{}").unwrap_or_default();
    assert!(!opts.debug);
    assert!(!opts.profiler);
    assert!(opts.camera_controls.is_none());
    assert_eq!(opts.camera, CameraSettings::default());
}

#[test]
fn camel_case_keys() {
    let json = r#"{ "debug": true, "profiler": true, "cameraControls": { "zoom": false }, "camera": { "distance": 500 } }"#;
    let Ok(opts) = RendererOptions::from_json(json) else {
        panic!("options should parse");
    };
    assert!(opts.debug);
    assert!(opts.profiler);
    let controls = opts.camera_controls.unwrap_or_default();
    assert!(!controls.zoom);
    assert!(controls.panning);
    assert_eq!(opts.camera.distance, 500.0);
    assert_eq!(opts.camera.fov, crate::consts::DEFAULT_FOV);
}

#[test]
fn empty_controls_object_enables_both() {
    let Ok(opts) = RendererOptions::from_json(r#"{ "cameraControls": {} }"#) else {
        panic!("options should parse");
    };
    let controls = opts.camera_controls.unwrap_or_default();
    assert!(controls.zoom);
    assert!(controls.panning);
    assert!(controls.move_button.is_none());
}

#[test]
fn malformed_json_is_config_error() {
    assert!(matches!(RendererOptions::from_json("{ debug: "), Err(SceneError::InvalidConfig(_))));
    assert!(matches!(RendererOptions::from_json(r#"{ "debug": "yes" }"#), Err(SceneError::InvalidConfig(_))));
}

#[test]
fn default_pan_needs_primary_over_empty_space() {
    let controls = CameraControls::default();
    let mut mouse = Mouse::default();
    assert!(!controls.wants_pan(&mouse));
    mouse.left_down = true;
    assert!(controls.wants_pan(&mouse));
    mouse.hovering = Some(uuid::Uuid::new_v4());
    assert!(!controls.wants_pan(&mouse));
}

#[test]
fn custom_move_button() {
    let controls = CameraControls::default().with_move_button(|m| m.is_down(Button::Secondary));
    let mut mouse = Mouse::default();
    mouse.left_down = true;
    assert!(!controls.wants_pan(&mouse));
    mouse.right_down = true;
    assert!(controls.wants_pan(&mouse));
}

#[test]
fn panning_disabled_never_pans() {
    let controls = CameraControls { panning: false, ..CameraControls::default() }.with_move_button(|_| true);
    assert!(!controls.wants_pan(&Mouse::default()));
}

#[test]
fn debug_format_hides_predicate() {
    let controls = CameraControls::default().with_move_button(|_| true);
    let s = format!("{controls:?}");
    assert!(s.contains("<fn>"));
}
