//! Input model: mouse and keyboard state plus their notification channels.
//!
//! One [`InputState`] lives per renderer. The [`crate::bridge`] functions are
//! the only writers of positions and button flags; scene nodes write the
//! hover/drag/select owner fields while they tick. Owners are node ids, not
//! references, and are dropped when their node leaves the scene.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::collections::HashMap;

use crate::events::{Emitter, Event};
use crate::node::NodeId;
use crate::vector::Vector2;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_code(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// A keyboard key as reported by the browser (e.g. `"Shift"`, `"a"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Payload of pointer notifications.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    /// Position in canvas pixels.
    pub screen: Vector2,
    /// Position mapped through the camera.
    pub world: Vector2,
    pub button: Button,
    pub modifiers: Modifiers,
}

/// Notifications broadcast on [`Mouse::events`].
#[derive(Debug, Clone, PartialEq)]
pub enum MouseEvent {
    Move(Pointer),
    Down(Pointer),
    Up(Pointer),
    Click(Pointer),
    ContextMenu(Pointer),
    Wheel { pointer: Pointer, delta: WheelDelta },
    /// The selection owner changed.
    Select { previous: Option<NodeId>, current: Option<NodeId> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    Move,
    Down,
    Up,
    Click,
    ContextMenu,
    Wheel,
    Select,
}

impl Event for MouseEvent {
    type Kind = MouseEventKind;

    fn kind(&self) -> MouseEventKind {
        match self {
            Self::Move(_) => MouseEventKind::Move,
            Self::Down(_) => MouseEventKind::Down,
            Self::Up(_) => MouseEventKind::Up,
            Self::Click(_) => MouseEventKind::Click,
            Self::ContextMenu(_) => MouseEventKind::ContextMenu,
            Self::Wheel { .. } => MouseEventKind::Wheel,
            Self::Select { .. } => MouseEventKind::Select,
        }
    }
}

/// Mouse position, buttons and interaction owners.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Default)]
pub struct Mouse {
    /// Position in canvas pixels.
    pub pos: Vector2,
    /// `pos` mapped through the camera.
    pub world_pos: Vector2,
    /// Movement accumulated since the last tick, in world units. The frame
    /// driver zeroes it once every node has ticked.
    pub delta: Vector2,
    pub left_down: bool,
    pub middle_down: bool,
    pub right_down: bool,
    /// Node currently under the pointer.
    pub hovering: Option<NodeId>,
    /// Node currently being dragged.
    pub dragging: Option<NodeId>,
    /// Node currently selected.
    pub selected: Option<NodeId>,
    pub events: Emitter<MouseEvent>,
}

impl Mouse {
    /// Whether `button` is currently held.
    #[must_use]
    pub fn is_down(&self, button: Button) -> bool {
        match button {
            Button::Primary => self.left_down,
            Button::Middle => self.middle_down,
            Button::Secondary => self.right_down,
        }
    }

    pub(crate) fn set_down(&mut self, button: Button, down: bool) {
        match button {
            Button::Primary => self.left_down = down,
            Button::Middle => self.middle_down = down,
            Button::Secondary => self.right_down = down,
        }
    }

    /// Replace the selection owner and broadcast the change.
    ///
    /// Does nothing, and emits nothing, when `id` is already selected.
    pub fn select(&mut self, id: Option<NodeId>) {
        if self.selected == id {
            return;
        }
        let previous = self.selected;
        self.selected = id;
        log::debug!("selection changed: {previous:?} -> {id:?}");
        self.events.emit(&MouseEvent::Select { previous, current: id });
    }

    /// Drop every owner for which `is_live` is false.
    ///
    /// A dropped selection broadcasts like any other selection change. Returns
    /// true if anything was dropped.
    pub fn retain_live(&mut self, is_live: impl Fn(NodeId) -> bool) -> bool {
        let mut dropped = false;
        if self.hovering.is_some_and(|id| !is_live(id)) {
            self.hovering = None;
            dropped = true;
        }
        if self.dragging.is_some_and(|id| !is_live(id)) {
            self.dragging = None;
            dropped = true;
        }
        if self.selected.is_some_and(|id| !is_live(id)) {
            self.select(None);
            dropped = true;
        }
        dropped
    }
}

/// Payload of keyboard notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

/// Notifications broadcast on [`Keyboard::events`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    Down(KeyInput),
    Up(KeyInput),
    Press(KeyInput),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventKind {
    Down,
    Up,
    Press,
}

impl Event for KeyEvent {
    type Kind = KeyEventKind;

    fn kind(&self) -> KeyEventKind {
        match self {
            Self::Down(_) => KeyEventKind::Down,
            Self::Up(_) => KeyEventKind::Up,
            Self::Press(_) => KeyEventKind::Press,
        }
    }
}

/// Pressed-key map.
#[derive(Debug, Default)]
pub struct Keyboard {
    keys: HashMap<Key, bool>,
    pub events: Emitter<KeyEvent>,
}

impl Keyboard {
    /// Whether `key` is currently held. Unknown keys are up.
    #[must_use]
    pub fn is_down(&self, key: &Key) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    pub(crate) fn set_down(&mut self, key: Key, down: bool) {
        self.keys.insert(key, down);
    }

    /// Keys currently held, in no particular order.
    pub fn pressed(&self) -> impl Iterator<Item = &Key> {
        self.keys.iter().filter(|(_, down)| **down).map(|(k, _)| k)
    }
}

/// All input state owned by one renderer.
#[derive(Debug, Default)]
pub struct InputState {
    pub mouse: Mouse,
    pub keyboard: Keyboard,
}

impl InputState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
