//! Renderer options.
//!
//! Options arrive from the host as JSON (`camelCase` keys, every field
//! optional). Callbacks cannot cross that boundary, so the background painter
//! and the pan-button predicate are attached from Rust after parsing.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_DISTANCE, DEFAULT_FOV};
use crate::error::Result;
use crate::input::Mouse;

/// Predicate deciding whether the current mouse state should pan the camera.
pub type MoveButton = Rc<dyn Fn(&Mouse) -> bool>;

/// Top-level renderer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RendererOptions {
    /// Draw the debug overlay.
    pub debug: bool,
    /// Collect and draw per-phase timings.
    pub profiler: bool,
    /// Built-in pan/zoom bindings. `None` disables them entirely.
    pub camera_controls: Option<CameraControls>,
    /// Initial camera.
    pub camera: CameraSettings,
}

impl RendererOptions {
    /// Parse options from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SceneError::InvalidConfig`] for malformed JSON or
    /// mistyped fields.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Initial camera distance and field of view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraSettings {
    pub distance: f64,
    /// Radians.
    pub fov: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self { distance: DEFAULT_DISTANCE, fov: DEFAULT_FOV }
    }
}

/// Which built-in camera bindings are active.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraControls {
    /// Wheel zooms the camera.
    pub zoom: bool,
    /// Pointer drags pan the camera.
    pub panning: bool,
    /// Custom pan predicate; defaults to the primary button held over empty space.
    #[serde(skip)]
    pub move_button: Option<MoveButton>,
}

impl Default for CameraControls {
    fn default() -> Self {
        Self { zoom: true, panning: true, move_button: None }
    }
}

impl CameraControls {
    /// Replace the pan predicate.
    #[must_use]
    pub fn with_move_button(mut self, predicate: impl Fn(&Mouse) -> bool + 'static) -> Self {
        self.move_button = Some(Rc::new(predicate));
        self
    }

    /// Whether this mouse state should pan, ignoring the camera lock.
    #[must_use]
    pub fn wants_pan(&self, mouse: &Mouse) -> bool {
        if !self.panning {
            return false;
        }
        match &self.move_button {
            Some(predicate) => predicate(mouse),
            None => mouse.left_down && mouse.hovering.is_none(),
        }
    }
}

impl fmt::Debug for CameraControls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraControls")
            .field("zoom", &self.zoom)
            .field("panning", &self.panning)
            .field("move_button", &self.move_button.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
