//! 2D vector value type shared by screen and world space.
//!
//! Every operation returns a new vector. `norm` on a zero vector divides by
//! zero and yields non-finite components; callers must not normalize zero.

#[cfg(test)]
#[path = "vector_test.rs"]
mod vector_test;

use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A point or displacement in either screen or world space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise sum.
    #[must_use]
    pub fn sum(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn diff(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Add a scalar to both components.
    #[must_use]
    pub fn add_scalar(self, s: f64) -> Self {
        Self::new(self.x + s, self.y + s)
    }

    /// Subtract a scalar from both components.
    #[must_use]
    pub fn sub_scalar(self, s: f64) -> Self {
        Self::new(self.x - s, self.y - s)
    }

    /// Component-wise product.
    #[must_use]
    pub fn mult(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    /// Multiply both components by a scalar.
    #[must_use]
    pub fn scale(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s)
    }

    /// Component-wise quotient.
    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn div(self, other: Self) -> Self {
        Self::new(self.x / other.x, self.y / other.y)
    }

    /// Divide both components by a scalar.
    #[must_use]
    pub fn divs(self, s: f64) -> Self {
        Self::new(self.x / s, self.y / s)
    }

    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product.
    #[must_use]
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Euclidean length.
    #[must_use]
    pub fn mag(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction.
    #[must_use]
    pub fn norm(self) -> Self {
        self.divs(self.mag())
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn dist(self, other: Self) -> f64 {
        self.diff(other).mag()
    }

    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }

    /// Whether both components are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.sum(rhs)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.diff(rhs)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Div<f64> for Vector2 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        self.divs(rhs)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Vector2::neg(self)
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}
