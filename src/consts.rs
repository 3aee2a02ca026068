//! Shared numeric constants for the scene crate.

// ── Camera ──────────────────────────────────────────────────────

/// Closest the wheel binding lets the camera get.
pub const MIN_DISTANCE: f64 = 100.0;

/// Farthest the wheel binding lets the camera get.
pub const MAX_DISTANCE: f64 = 10_000.0;

/// Starting camera distance.
pub const DEFAULT_DISTANCE: f64 = 1000.0;

/// Starting field of view, π / 4 (45°).
pub const DEFAULT_FOV: f64 = std::f64::consts::FRAC_PI_4;

/// Distance change per unit of wheel `deltaY`.
pub const WHEEL_ZOOM_FACTOR: f64 = 1.0;

// ── Frame loop ──────────────────────────────────────────────────

/// Wall-clock window after which the ticks-per-second counter rolls over.
pub const TPS_WINDOW_MS: f64 = 1000.0;

/// Number of samples kept per profiler buffer.
pub const PROFILER_SAMPLES: usize = 60;

// ── Overlays ────────────────────────────────────────────────────

/// Line height of the debug overlay text, in screen pixels.
pub const OVERLAY_LINE_HEIGHT_PX: f64 = 14.0;

/// Inset of the overlays from the canvas corner, in screen pixels.
pub const OVERLAY_MARGIN_PX: f64 = 8.0;
