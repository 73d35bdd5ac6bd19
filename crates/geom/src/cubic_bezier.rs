use crate::scalar::Float;
use crate::traits::Transformation;
use crate::{Box2D, LineSegment2F, Point, QuadraticBezierSegment, Vector};

use core::ops::Range;

/// A 2d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicBezierSegment {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

impl CubicBezierSegment {
    #[inline]
    pub fn new(from: Point, ctrl1: Point, ctrl2: Point, to: Point) -> Self {
        CubicBezierSegment {
            from,
            ctrl1,
            ctrl2,
            to,
        }
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f32) -> Point {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from * one_t3
            + self.ctrl1.to_vector() * 3.0 * one_t2 * t
            + self.ctrl2.to_vector() * 3.0 * one_t * t2
            + self.to.to_vector() * t3
    }

    /// Sample the x coordinate of the curve at t (expecting t between 0 and 1).
    pub fn x(&self, t: f32) -> f32 {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from.x * one_t3
            + self.ctrl1.x * 3.0 * one_t2 * t
            + self.ctrl2.x * 3.0 * one_t * t2
            + self.to.x * t3
    }

    /// Sample the y coordinate of the curve at t (expecting t between 0 and 1).
    pub fn y(&self, t: f32) -> f32 {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from.y * one_t3
            + self.ctrl1.y * 3.0 * one_t2 * t
            + self.ctrl2.y * 3.0 * one_t * t2
            + self.to.y * t3
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: f32) -> Vector {
        let t2 = t * t;
        let c0 = -3.0 * t2 + 6.0 * t - 3.0;
        let c1 = 9.0 * t2 - 12.0 * t + 3.0;
        let c2 = -9.0 * t2 + 6.0 * t;
        let c3 = 3.0 * t2;

        self.from.to_vector() * c0
            + self.ctrl1.to_vector() * c1
            + self.ctrl2.to_vector() * c2
            + self.to.to_vector() * c3
    }

    #[inline]
    pub fn from(&self) -> Point {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point {
        self.to
    }

    /// Return the sub-curve inside a given range of t.
    ///
    /// This is equivalent to splitting at the range's end points.
    pub fn split_range(&self, t_range: Range<f32>) -> Self {
        let (t0, t1) = (t_range.start, t_range.end);
        let from = self.sample(t0);
        let to = self.sample(t1);

        let d = QuadraticBezierSegment {
            from: (self.ctrl1 - self.from).to_point(),
            ctrl: (self.ctrl2 - self.ctrl1).to_point(),
            to: (self.to - self.ctrl2).to_point(),
        };

        let dt = t1 - t0;
        let ctrl1 = from + d.sample(t0).to_vector() * dt;
        let ctrl2 = to - d.sample(t1).to_vector() * dt;

        CubicBezierSegment {
            from,
            ctrl1,
            ctrl2,
            to,
        }
    }

    /// Split this curve into two sub-curves using De Casteljau's construction.
    pub fn split(&self, t: f32) -> (CubicBezierSegment, CubicBezierSegment) {
        let ctrl1a = self.from + (self.ctrl1 - self.from) * t;
        let ctrl2a = self.ctrl1 + (self.ctrl2 - self.ctrl1) * t;
        let ctrl1aa = ctrl1a + (ctrl2a - ctrl1a) * t;
        let ctrl3a = self.ctrl2 + (self.to - self.ctrl2) * t;
        let ctrl2aa = ctrl2a + (ctrl3a - ctrl2a) * t;
        let ctrl1aaa = ctrl1aa + (ctrl2aa - ctrl1aa) * t;

        (
            CubicBezierSegment {
                from: self.from,
                ctrl1: ctrl1a,
                ctrl2: ctrl1aa,
                to: ctrl1aaa,
            },
            CubicBezierSegment {
                from: ctrl1aaa,
                ctrl1: ctrl2aa,
                ctrl2: ctrl3a,
                to: self.to,
            },
        )
    }

    /// Return the curve before the split point.
    #[inline]
    pub fn before_split(&self, t: f32) -> CubicBezierSegment {
        self.split(t).0
    }

    /// Return the curve after the split point.
    #[inline]
    pub fn after_split(&self, t: f32) -> CubicBezierSegment {
        self.split(t).1
    }

    #[inline]
    pub fn baseline(&self) -> LineSegment2F {
        LineSegment2F::new(self.from, self.to)
    }

    /// Returns true if the three legs of the control polygon are collinear within `tolerance`.
    ///
    /// Sums the magnitudes of the cross products of consecutive legs.
    pub fn is_flat(&self, tolerance: f32) -> bool {
        let a = self.ctrl1 - self.from;
        let b = self.ctrl2 - self.ctrl1;
        let c = self.to - self.ctrl2;

        Float::abs(a.cross(b)) + Float::abs(b.cross(c)) <= tolerance
    }

    /// Applies the transform to this curve and returns the results.
    #[inline]
    pub fn transformed<T: Transformation>(&self, transform: &T) -> Self {
        CubicBezierSegment {
            from: transform.transform_point(self.from),
            ctrl1: transform.transform_point(self.ctrl1),
            ctrl2: transform.transform_point(self.ctrl2),
            to: transform.transform_point(self.to),
        }
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        CubicBezierSegment {
            from: self.to,
            ctrl1: self.ctrl2,
            ctrl2: self.ctrl1,
            to: self.from,
        }
    }

    fn for_each_local_extremum<F>(p0: f32, p1: f32, p2: f32, p3: f32, cb: &mut F)
    where
        F: FnMut(f32),
    {
        // The derivative is a second degree polynomial a * t² + b * t + c.
        let a = 3.0 * (p3 + 3.0 * (p1 - p2) - p0);
        let b = 6.0 * (p2 - 2.0 * p1 + p0);
        let c = 3.0 * (p1 - p0);

        fn in_range(t: f32) -> bool {
            t > 0.0 && t < 1.0
        }

        if a == 0.0 {
            if b != 0.0 {
                let t = -c / b;
                if in_range(t) {
                    cb(t);
                }
            }
            return;
        }

        let discriminant = b * b - 4.0 * a * c;

        if discriminant < 0.0 {
            return;
        }

        if discriminant == 0.0 {
            let t = -b / (2.0 * a);
            if in_range(t) {
                cb(t);
            }
            return;
        }

        let discriminant_sqrt = Float::sqrt(discriminant);

        let first_extremum = (-b - discriminant_sqrt) / (2.0 * a);
        let second_extremum = (-b + discriminant_sqrt) / (2.0 * a);

        if in_range(first_extremum) {
            cb(first_extremum);
        }

        if in_range(second_extremum) {
            cb(second_extremum);
        }
    }

    /// Calls `cb` with the parameter of each local x extremum.
    pub fn for_each_local_x_extremum_t<F>(&self, cb: &mut F)
    where
        F: FnMut(f32),
    {
        Self::for_each_local_extremum(self.from.x, self.ctrl1.x, self.ctrl2.x, self.to.x, cb)
    }

    /// Calls `cb` with the parameter of each local y extremum.
    pub fn for_each_local_y_extremum_t<F>(&self, cb: &mut F)
    where
        F: FnMut(f32),
    {
        Self::for_each_local_extremum(self.from.y, self.ctrl1.y, self.ctrl2.y, self.to.y, cb)
    }

    /// Returns a conservative rectangle the curve is contained in.
    ///
    /// This method is faster than `bounding_box` but more conservative.
    pub fn fast_bounding_box(&self) -> Box2D<f32> {
        Box2D {
            min: self.from.min(self.ctrl1).min(self.ctrl2).min(self.to),
            max: self.from.max(self.ctrl1).max(self.ctrl2).max(self.to),
        }
    }

    /// Returns the smallest rectangle the curve is contained in.
    pub fn bounding_box(&self) -> Box2D<f32> {
        let mut min = self.from.min(self.to);
        let mut max = self.from.max(self.to);

        self.for_each_local_x_extremum_t(&mut |t| {
            let x = self.x(t);
            min.x = min.x.min(x);
            max.x = max.x.max(x);
        });

        self.for_each_local_y_extremum_t(&mut |t| {
            let y = self.y(t);
            min.y = min.y.min(y);
            max.y = max.y.max(y);
        });

        Box2D { min, max }
    }
}

#[cfg(test)]
use crate::point;

#[test]
fn split_matches_sampling() {
    let c = CubicBezierSegment::new(
        point(0.0, 0.0),
        point(1.0, 3.0),
        point(4.0, 3.0),
        point(5.0, 0.0),
    );

    let (before, after) = c.split(0.3);
    assert_eq!(before.from, c.from);
    assert_eq!(after.to, c.to);
    assert_eq!(before.to, after.from);
    assert!((before.to - c.sample(0.3)).square_length() < 1e-10);

    // The halves trace the same curve.
    for i in 0..=4 {
        let t = i as f32 / 4.0;
        assert!((before.sample(t) - c.sample(t * 0.3)).square_length() < 1e-8);
        assert!((after.sample(t) - c.sample(0.3 + t * 0.7)).square_length() < 1e-8);
    }
}

#[test]
fn split_range_matches_split() {
    let c = CubicBezierSegment::new(
        point(0.0, 0.0),
        point(2.0, 6.0),
        point(6.0, -2.0),
        point(8.0, 4.0),
    );

    let middle = c.split_range(0.25..0.75);
    let expected = c.after_split(0.25).before_split(2.0 / 3.0);

    assert!((middle.from - expected.from).square_length() < 1e-8);
    assert!((middle.ctrl1 - expected.ctrl1).square_length() < 1e-8);
    assert!((middle.ctrl2 - expected.ctrl2).square_length() < 1e-8);
    assert!((middle.to - expected.to).square_length() < 1e-8);
}

#[test]
fn bounding_box_of_arch() {
    let c = CubicBezierSegment::new(
        point(0.0, 0.0),
        point(0.0, 4.0),
        point(4.0, 4.0),
        point(4.0, 0.0),
    );

    let fast = c.fast_bounding_box();
    assert_eq!(fast.max, point(4.0, 4.0));

    let tight = c.bounding_box();
    assert_eq!(tight.min, point(0.0, 0.0));
    assert!(Float::abs(tight.max.y - 3.0) < 1e-5);
    assert_eq!(tight.max.x, 4.0);
}

#[test]
fn cubic_flatness() {
    let straight = CubicBezierSegment::new(
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(2.0, 0.0),
        point(3.0, 0.0),
    );
    assert!(straight.is_flat(1e-6));

    let curved = CubicBezierSegment::new(
        point(0.0, 0.0),
        point(0.0, 1.0),
        point(1.0, 1.0),
        point(1.0, 0.0),
    );
    assert!(!curved.is_flat(0.5));
    assert!(curved.is_flat(2.0));
}

#[test]
fn flip_reverses_sampling() {
    let c = CubicBezierSegment::new(
        point(0.0, 0.0),
        point(1.0, 3.0),
        point(4.0, 3.0),
        point(6.0, 1.0),
    );
    let f = c.flip();
    assert!((f.sample(0.2) - c.sample(0.8)).square_length() < 1e-8);
}
