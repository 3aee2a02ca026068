//! Drawing-surface abstraction.
//!
//! The frame driver and nodes draw through [`Surface`] rather than a concrete
//! `CanvasRenderingContext2d`, which keeps the driver testable off the browser.
//! Only the transform stack and a handful of primitives are exposed here; shape
//! helpers live with whatever node kinds need them.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::error::{Result, SceneError};
use crate::vector::Vector2;

/// Font used for overlay and label text.
pub const DEFAULT_FONT: &str = "12px monospace";

/// An immediate-mode 2D drawing target with a save/restore transform stack.
pub trait Surface {
    /// Backing-store width in pixels.
    fn width(&self) -> f64;

    /// Backing-store height in pixels.
    fn height(&self) -> f64;

    /// Erase every pixel.
    fn clear(&mut self);

    /// Push the current transform and style state.
    fn save(&mut self);

    /// Pop the most recently saved state.
    fn restore(&mut self);

    /// # Errors
    ///
    /// Returns [`SceneError::Surface`] if the underlying context throws.
    fn scale(&mut self, x: f64, y: f64) -> Result<()>;

    /// # Errors
    ///
    /// Returns [`SceneError::Surface`] if the underlying context throws.
    fn translate(&mut self, x: f64, y: f64) -> Result<()>;

    /// Restore the default text baseline, alignment and font.
    fn reset_text_defaults(&mut self);

    fn fill_rect(&mut self, pos: Vector2, size: Vector2, color: &str);

    fn stroke_rect(&mut self, pos: Vector2, size: Vector2, color: &str, line_width: f64);

    /// # Errors
    ///
    /// Returns [`SceneError::Surface`] if the underlying context throws.
    fn fill_text(&mut self, text: &str, pos: Vector2, color: &str) -> Result<()>;
}

impl Surface for CanvasRenderingContext2d {
    fn width(&self) -> f64 {
        self.canvas().map_or(0.0, |c| f64::from(c.width()))
    }

    fn height(&self) -> f64 {
        self.canvas().map_or(0.0, |c| f64::from(c.height()))
    }

    fn clear(&mut self) {
        let (w, h) = (Surface::width(self), Surface::height(self));
        self.clear_rect(0.0, 0.0, w, h);
    }

    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn scale(&mut self, x: f64, y: f64) -> Result<()> {
        CanvasRenderingContext2d::scale(self, x, y).map_err(|e| SceneError::surface(&e))
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<()> {
        CanvasRenderingContext2d::translate(self, x, y).map_err(|e| SceneError::surface(&e))
    }

    fn reset_text_defaults(&mut self) {
        self.set_text_baseline("top");
        self.set_text_align("left");
        self.set_font(DEFAULT_FONT);
    }

    fn fill_rect(&mut self, pos: Vector2, size: Vector2, color: &str) {
        self.set_fill_style_str(color);
        CanvasRenderingContext2d::fill_rect(self, pos.x, pos.y, size.x, size.y);
    }

    fn stroke_rect(&mut self, pos: Vector2, size: Vector2, color: &str, line_width: f64) {
        self.set_stroke_style_str(color);
        self.set_line_width(line_width);
        CanvasRenderingContext2d::stroke_rect(self, pos.x, pos.y, size.x, size.y);
    }

    fn fill_text(&mut self, text: &str, pos: Vector2, color: &str) -> Result<()> {
        self.set_fill_style_str(color);
        CanvasRenderingContext2d::fill_text(self, text, pos.x, pos.y).map_err(|e: JsValue| SceneError::surface(&e))
    }
}
