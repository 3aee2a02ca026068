use super::*;

fn v(x: f64, y: f64) -> Vector2 {
    Vector2::new(x, y)
}

#[test]
fn inside_interior_point() {
    assert!(inside(v(0.0, 0.0), v(50.0, 50.0), v(25.0, 25.0)));
}

#[test]
fn inside_includes_origin_corner() {
    assert!(inside(v(10.0, 20.0), v(5.0, 5.0), v(10.0, 20.0)));
}

#[test]
fn inside_excludes_far_edges() {
    let pos = v(0.0, 0.0);
    let size = v(50.0, 50.0);
    assert!(!inside(pos, size, v(50.0, 10.0)));
    assert!(!inside(pos, size, v(10.0, 50.0)));
    assert!(!inside(pos, size, v(50.0, 50.0)));
    assert!(inside(pos, size, v(49.999, 49.999)));
}

#[test]
fn inside_excludes_points_before_origin() {
    let pos = v(0.0, 0.0);
    let size = v(50.0, 50.0);
    assert!(!inside(pos, size, v(-0.001, 10.0)));
    assert!(!inside(pos, size, v(10.0, -0.001)));
}

#[test]
fn inside_negative_coordinates() {
    assert!(inside(v(-100.0, -100.0), v(50.0, 50.0), v(-75.0, -51.0)));
    assert!(!inside(v(-100.0, -100.0), v(50.0, 50.0), v(-50.0, -75.0)));
}

#[test]
fn inside_zero_size_never_hits() {
    assert!(!inside(v(5.0, 5.0), v(0.0, 0.0), v(5.0, 5.0)));
}
