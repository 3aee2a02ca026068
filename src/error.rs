//! Crate error type.

use wasm_bindgen::JsValue;

/// Errors surfaced by the scene crate.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// No canvas element was supplied, or the id did not resolve to one.
    #[error("no drawing surface supplied")]
    MissingSurface,
    /// The canvas element did not yield a 2D rendering context.
    #[error("canvas has no 2d context")]
    MissingContext,
    /// Renderer options could not be parsed.
    #[error("invalid renderer options: {0}")]
    InvalidConfig(String),
    /// The camera would produce an empty or non-finite view rectangle.
    #[error("degenerate viewport: {width} x {height}")]
    DegenerateViewport { width: f64, height: f64 },
    /// A drawing-surface call threw.
    #[error("surface error: {0}")]
    Surface(String),
    /// Scheduling a frame or registering a listener failed.
    #[error("scheduler error: {0}")]
    Scheduler(String),
}

impl SceneError {
    /// Wrap a thrown JS value as a surface error.
    #[must_use]
    pub fn surface(value: &JsValue) -> Self {
        Self::Surface(js_message(value))
    }

    /// Wrap a thrown JS value as a scheduler error.
    #[must_use]
    pub fn scheduler(value: &JsValue) -> Self {
        Self::Scheduler(js_message(value))
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SceneError>;
