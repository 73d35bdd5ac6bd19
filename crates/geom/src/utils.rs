//! Various math tools.

use crate::scalar::Float;
use crate::tolerance::APPROX_EPSILON;
use crate::{Point, Vector};

/// Square root that treats negative inputs, typically produced by rounding, as zero.
#[inline]
pub fn safe_sqrt(x: f32) -> f32 {
    Float::sqrt(x.max(0.0))
}

/// Compares two values with [`APPROX_EPSILON`].
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    approx_eq_eps(a, b, APPROX_EPSILON)
}

#[inline]
pub fn approx_eq_eps(a: f32, b: f32, epsilon: f32) -> bool {
    Float::abs(a - b) <= epsilon
}

/// Compares both coordinates of two points with an absolute tolerance.
#[inline]
pub fn approx_eq_point(a: Point, b: Point, epsilon: f32) -> bool {
    approx_eq_eps(a.x, b.x, epsilon) && approx_eq_eps(a.y, b.y, epsilon)
}

#[inline]
pub fn approx_eq_vector(a: Vector, b: Vector, epsilon: f32) -> bool {
    approx_eq_eps(a.x, b.x, epsilon) && approx_eq_eps(a.y, b.y, epsilon)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Restricts a value to the `[min, max]` range.
///
/// Unlike `f32::clamp` this does not panic when `min > max`, the lower bound wins.
#[inline]
pub fn clamp(x: f32, min: f32, max: f32) -> f32 {
    x.min(max).max(min)
}

#[inline]
pub fn min_max(a: f32, b: f32) -> (f32, f32) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

#[test]
fn safe_sqrt_of_negative_rounding_error() {
    assert_eq!(safe_sqrt(-1e-7), 0.0);
    assert_eq!(safe_sqrt(4.0), 2.0);
}

#[test]
fn approx_eq_uses_absolute_tolerance() {
    assert!(approx_eq(1.0, 1.0005));
    assert!(!approx_eq(1.0, 1.01));
    assert!(approx_eq_eps(100.0, 100.5, 1.0));
}

#[test]
fn clamp_and_lerp() {
    assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
    assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
    assert_eq!(clamp(0.5, 1.0, 0.0), 1.0);
    assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
    assert_eq!(min_max(3.0, 1.0), (1.0, 3.0));
}
