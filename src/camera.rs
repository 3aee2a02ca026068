//! Camera and viewport: maps world space onto the canvas.
//!
//! The camera is described by a world-space `look_at` point, a `distance`
//! (zoom proxy) and a field of view. From those and the screen size it derives
//! a [`Viewport`]: the visible world rectangle plus screen pixels per world unit
//! on each axis. Every setter recomputes the viewport.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use std::ops::{Deref, DerefMut};

use serde::Serialize;

use crate::consts::{DEFAULT_DISTANCE, DEFAULT_FOV};
use crate::error::{Result, SceneError};
use crate::surface::Surface;
use crate::vector::Vector2;

/// The world-space rectangle currently on screen.
///
/// `right = left + width`, `bottom = top + height`, and
/// `scale = screen / (width, height)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Viewport {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
    /// Screen pixels per world unit on each axis.
    pub scale: Vector2,
}

impl Viewport {
    /// Whether a world point lies inside the visible rectangle.
    #[must_use]
    pub fn contains(&self, point: Vector2) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }

    /// Whether the box `pos..pos+size` overlaps the visible rectangle.
    #[must_use]
    pub fn intersects(&self, pos: Vector2, size: Vector2) -> bool {
        pos.x < self.right && pos.x + size.x > self.left && pos.y < self.bottom && pos.y + size.y > self.top
    }
}

/// Look-at / distance / fov camera.
#[derive(Debug, Clone)]
pub struct Camera {
    distance: f64,
    look_at: Vector2,
    fov: f64,
    locked: bool,
    screen: Vector2,
    viewport: Viewport,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_DISTANCE, DEFAULT_FOV)
    }
}

impl Camera {
    /// A camera looking at the world origin. The viewport stays empty until a
    /// screen size is supplied with [`Camera::set_screen_size`].
    #[must_use]
    pub fn new(distance: f64, fov: f64) -> Self {
        Self {
            distance,
            look_at: Vector2::ZERO,
            fov,
            locked: false,
            screen: Vector2::ZERO,
            viewport: Viewport::default(),
        }
    }

    // --- Accessors ---

    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    #[must_use]
    pub fn look_at(&self) -> Vector2 {
        self.look_at
    }

    /// Field of view in radians.
    #[must_use]
    pub fn fov(&self) -> f64 {
        self.fov
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Screen size in pixels the viewport was last derived from.
    #[must_use]
    pub fn screen_size(&self) -> Vector2 {
        self.screen
    }

    // --- Mutation ---

    /// Recompute the viewport from distance, fov, look-at and screen size.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::DegenerateViewport`] when the result would be empty
    /// or non-finite (zero fov, zero screen). The previous viewport is kept.
    pub fn update(&mut self) -> Result<()> {
        let width = self.distance * self.fov.tan();
        let aspect = self.screen.x / self.screen.y;
        let height = width / aspect;
        let valid = width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;
        if !valid {
            return Err(SceneError::DegenerateViewport { width, height });
        }

        let left = self.look_at.x - width / 2.0;
        let top = self.look_at.y - height / 2.0;
        self.viewport = Viewport {
            left,
            right: left + width,
            top,
            bottom: top + height,
            width,
            height,
            scale: Vector2::new(self.screen.x / width, self.screen.y / height),
        };
        Ok(())
    }

    /// Record a new screen size and recompute.
    ///
    /// # Errors
    ///
    /// See [`Camera::update`].
    pub fn set_screen_size(&mut self, width: f64, height: f64) -> Result<()> {
        self.screen = Vector2::new(width, height);
        self.update()
    }

    /// Center the view on `pos`. Ignores the lock.
    ///
    /// # Errors
    ///
    /// See [`Camera::update`].
    pub fn move_to(&mut self, pos: Vector2) -> Result<()> {
        self.look_at = pos;
        self.update()
    }

    /// Set the distance. Callers clamp; the camera does not. Ignores the lock.
    ///
    /// # Errors
    ///
    /// See [`Camera::update`].
    pub fn zoom_to(&mut self, distance: f64) -> Result<()> {
        self.distance = distance;
        self.update()
    }

    /// Set the field of view in radians.
    ///
    /// # Errors
    ///
    /// See [`Camera::update`].
    pub fn set_fov(&mut self, fov: f64) -> Result<()> {
        self.fov = fov;
        self.update()
    }

    /// Ask input bindings to leave the camera alone.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    // --- Conversions ---

    /// Convert a screen-space point (pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Vector2) -> Vector2 {
        let vp = &self.viewport;
        Vector2::new(screen.x / vp.scale.x + vp.left, screen.y / vp.scale.y + vp.top)
    }

    /// Convert a world-space point to screen coordinates (pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Vector2) -> Vector2 {
        let vp = &self.viewport;
        Vector2::new((world.x - vp.left) * vp.scale.x, (world.y - vp.top) * vp.scale.y)
    }

    /// Convert a screen-space displacement to a world-space displacement.
    #[must_use]
    pub fn screen_delta_to_world(&self, delta: Vector2) -> Vector2 {
        delta.div(self.viewport.scale)
    }

    // --- Surface transform ---

    /// Push surface state and switch it to world coordinates.
    ///
    /// The returned guard restores the surface when dropped or ended, so every
    /// `begin` is paired with exactly one restore.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Surface`] if the transform calls fail. The surface
    /// has already been restored when this returns an error.
    pub fn begin<'a>(&self, surface: &'a mut dyn Surface) -> Result<WorldSpace<'a>> {
        surface.save();
        let mut guard = WorldSpace { surface };
        let vp = &self.viewport;
        guard.scale(vp.scale.x, vp.scale.y)?;
        guard.translate(-vp.left, -vp.top)?;
        Ok(guard)
    }
}

/// A surface in world coordinates; restores screen coordinates on drop.
pub struct WorldSpace<'a> {
    surface: &'a mut dyn Surface,
}

impl WorldSpace<'_> {
    /// Restore screen coordinates now.
    pub fn end(self) {}
}

impl<'a> Deref for WorldSpace<'a> {
    type Target = dyn Surface + 'a;

    fn deref(&self) -> &Self::Target {
        self.surface
    }
}

impl DerefMut for WorldSpace<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.surface
    }
}

impl Drop for WorldSpace<'_> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}
