#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::vector::Vector2;

/// Whether `point` lies in the half-open box `[pos, pos + size)`.
#[must_use]
pub fn inside(pos: Vector2, size: Vector2, point: Vector2) -> bool {
    point.x >= pos.x && point.x < pos.x + size.x && point.y >= pos.y && point.y < pos.y + size.y
}
