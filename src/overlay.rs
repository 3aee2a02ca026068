//! Screen-space debug and profiler overlays.
//!
//! Both are drawn after the camera transform has been popped, stacked from the
//! top-left corner of the canvas.

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;

use std::collections::VecDeque;

use crate::consts::{OVERLAY_LINE_HEIGHT_PX, OVERLAY_MARGIN_PX, PROFILER_SAMPLES};
use crate::error::Result;
use crate::node::NodeId;
use crate::renderer::FrameView;
use crate::surface::Surface;
use crate::vector::Vector2;

const TEXT_COLOR: &str = "#F5F5F5";
const PANEL_COLOR: &str = "rgba(0, 0, 0, 0.6)";
const PANEL_WIDTH_PX: f64 = 260.0;

/// Rolling per-phase frame timings in milliseconds.
#[derive(Debug, Clone, Default)]
pub struct Profiler {
    tick: VecDeque<f64>,
    draw: VecDeque<f64>,
    frame: VecDeque<f64>,
}

impl Profiler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push one frame's timings, evicting the oldest past the buffer size.
    pub fn record(&mut self, tick_ms: f64, draw_ms: f64, frame_ms: f64) {
        for (buf, sample) in [(&mut self.tick, tick_ms), (&mut self.draw, draw_ms), (&mut self.frame, frame_ms)] {
            if buf.len() == PROFILER_SAMPLES {
                buf.pop_front();
            }
            buf.push_back(sample);
        }
    }

    pub fn reset(&mut self) {
        self.tick.clear();
        self.draw.clear();
        self.frame.clear();
    }

    #[must_use]
    pub fn samples(&self) -> usize {
        self.frame.len()
    }

    #[must_use]
    pub fn average_tick_ms(&self) -> f64 {
        average(&self.tick)
    }

    #[must_use]
    pub fn average_draw_ms(&self) -> f64 {
        average(&self.draw)
    }

    #[must_use]
    pub fn average_frame_ms(&self) -> f64 {
        average(&self.frame)
    }

    #[must_use]
    pub fn max_frame_ms(&self) -> f64 {
        self.frame.iter().copied().fold(0.0, f64::max)
    }
}

#[allow(clippy::cast_precision_loss)]
fn average(buf: &VecDeque<f64>) -> f64 {
    if buf.is_empty() {
        return 0.0;
    }
    buf.iter().sum::<f64>() / buf.len() as f64
}

fn owner(id: Option<NodeId>) -> String {
    id.map_or_else(|| "-".to_owned(), |id| id.to_string()[..8].to_owned())
}

/// Text lines shown by the debug overlay.
#[must_use]
pub fn debug_lines(view: &FrameView<'_>) -> Vec<String> {
    let cam = view.camera;
    let vp = cam.viewport();
    let mouse = &view.input.mouse;
    vec![
        format!("tps {}  frame {}", view.stats.tps, view.stats.frame),
        format!("look_at ({:.1}, {:.1})  distance {:.1}", cam.look_at().x, cam.look_at().y, cam.distance()),
        format!("viewport [{:.1}, {:.1}] {:.1} x {:.1}", vp.left, vp.top, vp.width, vp.height),
        format!("mouse ({:.0}, {:.0})  world ({:.1}, {:.1})", mouse.pos.x, mouse.pos.y, mouse.world_pos.x, mouse.world_pos.y),
        format!(
            "hover {}  drag {}  select {}",
            owner(mouse.hovering),
            owner(mouse.dragging),
            owner(mouse.selected)
        ),
        format!("nodes {}  locked {}", view.scene.node_count(), cam.is_locked()),
    ]
}

/// Text lines shown by the profiler overlay.
#[must_use]
pub fn profiler_lines(profiler: &Profiler) -> Vec<String> {
    vec![
        format!("tick  {:.2} ms", profiler.average_tick_ms()),
        format!("draw  {:.2} ms", profiler.average_draw_ms()),
        format!("frame {:.2} ms (max {:.2})", profiler.average_frame_ms(), profiler.max_frame_ms()),
    ]
}

/// Draw `lines` in a panel starting at `top`; returns the y below the panel.
#[allow(clippy::cast_precision_loss)]
fn draw_panel(surface: &mut dyn Surface, lines: &[String], top: f64) -> Result<f64> {
    let height = lines.len() as f64 * OVERLAY_LINE_HEIGHT_PX + OVERLAY_MARGIN_PX;
    surface.fill_rect(
        Vector2::new(OVERLAY_MARGIN_PX, top),
        Vector2::new(PANEL_WIDTH_PX, height),
        PANEL_COLOR,
    );
    let mut y = top + OVERLAY_MARGIN_PX / 2.0;
    for line in lines {
        surface.fill_text(line, Vector2::new(OVERLAY_MARGIN_PX * 2.0, y), TEXT_COLOR)?;
        y += OVERLAY_LINE_HEIGHT_PX;
    }
    Ok(top + height + OVERLAY_MARGIN_PX)
}

/// Draw whichever overlays are enabled, debug above profiler.
///
/// # Errors
///
/// Propagates surface failures.
pub fn draw(surface: &mut dyn Surface, view: &FrameView<'_>, debug: bool, profiler: Option<&Profiler>) -> Result<()> {
    let mut top = OVERLAY_MARGIN_PX;
    if debug {
        top = draw_panel(surface, &debug_lines(view), top)?;
    }
    if let Some(profiler) = profiler {
        draw_panel(surface, &profiler_lines(profiler), top)?;
    }
    Ok(())
}
