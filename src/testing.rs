//! Test doubles shared by the unit tests.

use std::cell::Cell;

use crate::error::Result;
use crate::renderer::Clock;
use crate::surface::Surface;
use crate::vector::Vector2;

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Clear,
    Save,
    Restore,
    Scale(f64, f64),
    Translate(f64, f64),
    ResetText,
    FillRect { pos: Vector2, size: Vector2, color: String },
    StrokeRect { pos: Vector2, size: Vector2, color: String },
    FillText(String),
}

/// In-memory surface that records every call and tracks save depth.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub width: f64,
    pub height: f64,
    pub ops: Vec<Op>,
    pub depth: i32,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, ..Self::default() }
    }

    /// Position of the first op equal to `op`.
    pub fn position(&self, op: &Op) -> Option<usize> {
        self.ops.iter().position(|o| o == op)
    }

    pub fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|o| match o {
                Op::FillText(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.ops.push(Op::Clear);
    }

    fn save(&mut self) {
        self.depth += 1;
        self.ops.push(Op::Save);
    }

    fn restore(&mut self) {
        self.depth -= 1;
        self.ops.push(Op::Restore);
    }

    fn scale(&mut self, x: f64, y: f64) -> Result<()> {
        self.ops.push(Op::Scale(x, y));
        Ok(())
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<()> {
        self.ops.push(Op::Translate(x, y));
        Ok(())
    }

    fn reset_text_defaults(&mut self) {
        self.ops.push(Op::ResetText);
    }

    fn fill_rect(&mut self, pos: Vector2, size: Vector2, color: &str) {
        self.ops.push(Op::FillRect { pos, size, color: color.to_owned() });
    }

    fn stroke_rect(&mut self, pos: Vector2, size: Vector2, color: &str, _line_width: f64) {
        self.ops.push(Op::StrokeRect { pos, size, color: color.to_owned() });
    }

    fn fill_text(&mut self, text: &str, _pos: Vector2, _color: &str) -> Result<()> {
        self.ops.push(Op::FillText(text.to_owned()));
        Ok(())
    }
}

/// Clock advanced by hand.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}
