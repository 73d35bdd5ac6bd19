use crate::scalar::Float;
use crate::traits::Transformation;
use crate::{point, Box2D, CubicBezierSegment, LineSegment2F, Point, Vector};

use core::ops::Range;

/// A 2d curve segment defined by three points: the beginning of the segment, a control
/// point and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)² * from + 2 * (1 - t) * t * ctrl + t² * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadraticBezierSegment {
    pub from: Point,
    pub ctrl: Point,
    pub to: Point,
}

impl QuadraticBezierSegment {
    #[inline]
    pub fn new(from: Point, ctrl: Point, to: Point) -> Self {
        QuadraticBezierSegment { from, ctrl, to }
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f32) -> Point {
        let t2 = t * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;

        self.from * one_t2 + self.ctrl.to_vector() * 2.0 * one_t * t + self.to.to_vector() * t2
    }

    /// Sample the x coordinate of the curve at t (expecting t between 0 and 1).
    pub fn x(&self, t: f32) -> f32 {
        let t2 = t * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;

        self.from.x * one_t2 + self.ctrl.x * 2.0 * one_t * t + self.to.x * t2
    }

    /// Sample the y coordinate of the curve at t (expecting t between 0 and 1).
    pub fn y(&self, t: f32) -> f32 {
        let t2 = t * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;

        self.from.y * one_t2 + self.ctrl.y * 2.0 * one_t * t + self.to.y * t2
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: f32) -> Vector {
        let (c0, c1, c2) = (2.0 * t - 2.0, -4.0 * t + 2.0, 2.0 * t);
        self.from.to_vector() * c0 + self.ctrl.to_vector() * c1 + self.to.to_vector() * c2
    }

    #[inline]
    pub fn from(&self) -> Point {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point {
        self.to
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        QuadraticBezierSegment {
            from: self.to,
            ctrl: self.ctrl,
            to: self.from,
        }
    }

    /// Return the y extremum or None if this curve is y-monotonic.
    pub fn local_y_extremum_t(&self) -> Option<f32> {
        let div = self.from.y - 2.0 * self.ctrl.y + self.to.y;
        if div == 0.0 {
            return None;
        }
        let t = (self.from.y - self.ctrl.y) / div;
        if t > 0.0 && t < 1.0 {
            return Some(t);
        }

        None
    }

    /// Return the x extremum or None if this curve is x-monotonic.
    pub fn local_x_extremum_t(&self) -> Option<f32> {
        let div = self.from.x - 2.0 * self.ctrl.x + self.to.x;
        if div == 0.0 {
            return None;
        }
        let t = (self.from.x - self.ctrl.x) / div;
        if t > 0.0 && t < 1.0 {
            return Some(t);
        }

        None
    }

    /// Return the sub-curve inside a given range of t.
    ///
    /// This is equivalent to splitting at the range's end points.
    pub fn split_range(&self, t_range: Range<f32>) -> Self {
        let t0 = t_range.start;
        let t1 = t_range.end;

        let from = self.sample(t0);
        let to = self.sample(t1);
        let ctrl = from + (self.ctrl - self.from).lerp(self.to - self.ctrl, t0) * (t1 - t0);

        QuadraticBezierSegment { from, ctrl, to }
    }

    /// Split this curve into two sub-curves.
    pub fn split(&self, t: f32) -> (QuadraticBezierSegment, QuadraticBezierSegment) {
        let split_point = self.sample(t);

        (
            QuadraticBezierSegment {
                from: self.from,
                ctrl: self.from.lerp(self.ctrl, t),
                to: split_point,
            },
            QuadraticBezierSegment {
                from: split_point,
                ctrl: self.ctrl.lerp(self.to, t),
                to: self.to,
            },
        )
    }

    /// Return the curve before the split point.
    pub fn before_split(&self, t: f32) -> QuadraticBezierSegment {
        QuadraticBezierSegment {
            from: self.from,
            ctrl: self.from.lerp(self.ctrl, t),
            to: self.sample(t),
        }
    }

    /// Return the curve after the split point.
    pub fn after_split(&self, t: f32) -> QuadraticBezierSegment {
        QuadraticBezierSegment {
            from: self.sample(t),
            ctrl: self.ctrl.lerp(self.to, t),
            to: self.to,
        }
    }

    /// Elevate this curve to a third order bézier.
    pub fn to_cubic(&self) -> CubicBezierSegment {
        CubicBezierSegment {
            from: self.from,
            ctrl1: (self.from + self.ctrl.to_vector() * 2.0) / 3.0,
            ctrl2: (self.to + self.ctrl.to_vector() * 2.0) / 3.0,
            to: self.to,
        }
    }

    #[inline]
    pub fn baseline(&self) -> LineSegment2F {
        LineSegment2F::new(self.from, self.to)
    }

    /// Returns true if both legs of the control polygon are collinear within `tolerance`.
    ///
    /// The test is the magnitude of the cross product of the legs, so it scales with
    /// the square of the curve size.
    pub fn is_flat(&self, tolerance: f32) -> bool {
        Float::abs((self.ctrl - self.from).cross(self.to - self.ctrl)) <= tolerance
    }

    /// Applies the transform to this curve and returns the results.
    #[inline]
    pub fn transformed<T: Transformation>(&self, transform: &T) -> Self {
        QuadraticBezierSegment {
            from: transform.transform_point(self.from),
            ctrl: transform.transform_point(self.ctrl),
            to: transform.transform_point(self.to),
        }
    }

    /// Returns a conservative rectangle that contains the curve.
    pub fn fast_bounding_box(&self) -> Box2D<f32> {
        Box2D {
            min: self.from.min(self.ctrl).min(self.to),
            max: self.from.max(self.ctrl).max(self.to),
        }
    }

    /// Returns the smallest rectangle the curve is contained in.
    pub fn bounding_box(&self) -> Box2D<f32> {
        let mut min = self.from.min(self.to);
        let mut max = self.from.max(self.to);

        if let Some(t) = self.local_x_extremum_t() {
            let x = self.x(t);
            min.x = min.x.min(x);
            max.x = max.x.max(x);
        }

        if let Some(t) = self.local_y_extremum_t() {
            let y = self.y(t);
            min.y = min.y.min(y);
            max.y = max.y.max(y);
        }

        Box2D {
            min: point(min.x, min.y),
            max: point(max.x, max.y),
        }
    }
}

#[test]
fn bounding_box_for_quadratic_bezier_segment() {
    let a = QuadraticBezierSegment::new(point(0.0, 0.0), point(1.0, 1.0), point(2.0, 0.0));

    let fast = a.fast_bounding_box();
    assert_eq!(fast.min, point(0.0, 0.0));
    assert_eq!(fast.max, point(2.0, 1.0));

    let tight = a.bounding_box();
    assert_eq!(tight.min, point(0.0, 0.0));
    assert_eq!(tight.max, point(2.0, 0.5));
}

#[test]
fn split_halves_join() {
    let a = QuadraticBezierSegment::new(point(0.0, 0.0), point(4.0, 8.0), point(8.0, 0.0));
    let (before, after) = a.split(0.25);

    assert_eq!(before.from, a.from);
    assert_eq!(before.to, after.from);
    assert_eq!(after.to, a.to);
    assert_eq!(before.to, a.sample(0.25));
    assert_eq!(before, a.before_split(0.25));
    assert_eq!(after, a.after_split(0.25));
    assert_eq!(a.split_range(0.0..0.25), before);
}

#[test]
fn elevation_preserves_curve() {
    let a = QuadraticBezierSegment::new(point(0.0, 0.0), point(3.0, 6.0), point(6.0, 0.0));
    let c = a.to_cubic();

    for i in 0..=10 {
        let t = i as f32 / 10.0;
        assert!((a.sample(t) - c.sample(t)).square_length() < 1e-8);
    }
}

#[test]
fn flatness() {
    let straight = QuadraticBezierSegment::new(point(0.0, 0.0), point(1.0, 1.0), point(2.0, 2.0));
    assert!(straight.is_flat(1e-3));

    let bent = QuadraticBezierSegment::new(point(0.0, 0.0), point(1.0, 1.0), point(2.0, 0.0));
    assert!(!bent.is_flat(1e-3));
    assert!(bent.is_flat(2.0));
}
