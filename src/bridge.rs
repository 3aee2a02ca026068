//! Input bridging: raw pointer, wheel and key input into [`InputState`],
//! camera pan/zoom, and notifications.
//!
//! These functions are browser-agnostic; [`crate::web`] calls them from DOM
//! listeners and tests call them directly. Pan and zoom only happen when
//! controls are configured and the camera is unlocked.

#[cfg(test)]
#[path = "bridge_test.rs"]
mod bridge_test;

use crate::camera::Camera;
use crate::config::CameraControls;
use crate::consts::{MAX_DISTANCE, MIN_DISTANCE, WHEEL_ZOOM_FACTOR};
use crate::error::Result;
use crate::input::{Button, InputState, Key, KeyEvent, KeyInput, Modifiers, MouseEvent, Pointer, WheelDelta};
use crate::vector::Vector2;

/// A pointer sample in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub screen: Vector2,
    pub button: Button,
    pub modifiers: Modifiers,
}

impl PointerInput {
    #[must_use]
    pub fn new(screen: Vector2, button: Button) -> Self {
        Self { screen, button, modifiers: Modifiers::default() }
    }
}

/// Everything an input handler may mutate.
pub struct InputTarget<'a> {
    pub input: &'a mut InputState,
    pub camera: &'a mut Camera,
    pub controls: Option<&'a CameraControls>,
}

impl InputTarget<'_> {
    fn pointer(&self, p: PointerInput) -> Pointer {
        Pointer { screen: p.screen, world: self.camera.screen_to_world(p.screen), button: p.button, modifiers: p.modifiers }
    }

    fn place(&mut self, screen: Vector2) {
        self.input.mouse.pos = screen;
        self.input.mouse.world_pos = self.camera.screen_to_world(screen);
    }

    fn refresh_world_pos(&mut self) {
        let screen = self.input.mouse.pos;
        self.place(screen);
    }
}

/// Pointer moved: track position, accumulate the world delta for the next
/// tick, pan by this move's step if the controls ask.
///
/// # Errors
///
/// Propagates camera failures from panning.
pub fn pointer_move(target: &mut InputTarget<'_>, p: PointerInput) -> Result<()> {
    let previous = target.input.mouse.pos;
    let step = target.camera.screen_delta_to_world(p.screen - previous);
    target.input.mouse.delta = target.input.mouse.delta + step;

    let pan = target
        .controls
        .is_some_and(|c| c.wants_pan(&target.input.mouse))
        && !target.camera.is_locked();
    if pan {
        target.camera.move_to(target.camera.look_at() - step)?;
    }

    target.place(p.screen);
    let pointer = target.pointer(p);
    target.input.mouse.events.emit(&MouseEvent::Move(pointer));
    Ok(())
}

pub fn pointer_down(target: &mut InputTarget<'_>, p: PointerInput) {
    target.place(p.screen);
    target.input.mouse.set_down(p.button, true);
    let pointer = target.pointer(p);
    target.input.mouse.events.emit(&MouseEvent::Down(pointer));
}

pub fn pointer_up(target: &mut InputTarget<'_>, p: PointerInput) {
    target.place(p.screen);
    target.input.mouse.set_down(p.button, false);
    let pointer = target.pointer(p);
    target.input.mouse.events.emit(&MouseEvent::Up(pointer));
}

pub fn click(target: &mut InputTarget<'_>, p: PointerInput) {
    let pointer = target.pointer(p);
    target.input.mouse.events.emit(&MouseEvent::Click(pointer));
}

pub fn context_menu(target: &mut InputTarget<'_>, p: PointerInput) {
    let pointer = target.pointer(p);
    target.input.mouse.events.emit(&MouseEvent::ContextMenu(pointer));
}

/// Wheel: zoom by `dy`, clamped to the distance limits, if the controls ask.
///
/// # Errors
///
/// Propagates camera failures from zooming.
pub fn wheel(target: &mut InputTarget<'_>, p: PointerInput, delta: WheelDelta) -> Result<()> {
    let zoom = target.controls.is_some_and(|c| c.zoom) && !target.camera.is_locked();
    if zoom {
        let distance = (target.camera.distance() + delta.dy * WHEEL_ZOOM_FACTOR).clamp(MIN_DISTANCE, MAX_DISTANCE);
        target.camera.zoom_to(distance)?;
        target.refresh_world_pos();
    }
    let pointer = target.pointer(p);
    target.input.mouse.events.emit(&MouseEvent::Wheel { pointer, delta });
    Ok(())
}

/// Surface resized: re-derive the viewport and the world mouse position.
///
/// # Errors
///
/// Returns [`crate::SceneError::DegenerateViewport`] for an empty surface.
pub fn resize(target: &mut InputTarget<'_>, width: f64, height: f64) -> Result<()> {
    target.camera.set_screen_size(width, height)?;
    target.refresh_world_pos();
    Ok(())
}

pub fn key_down(input: &mut InputState, key: Key, modifiers: Modifiers) {
    input.keyboard.set_down(key.clone(), true);
    input.keyboard.events.emit(&KeyEvent::Down(KeyInput { key, modifiers }));
}

pub fn key_up(input: &mut InputState, key: Key, modifiers: Modifiers) {
    input.keyboard.set_down(key.clone(), false);
    input.keyboard.events.emit(&KeyEvent::Up(KeyInput { key, modifiers }));
}

pub fn key_press(input: &mut InputState, key: Key, modifiers: Modifiers) {
    input.keyboard.events.emit(&KeyEvent::Press(KeyInput { key, modifiers }));
}
