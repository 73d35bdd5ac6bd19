use crate::scalar::Float;
use crate::tolerance::{INTERSECTION_EPSILON, ZERO_LENGTH_EPSILON};
use crate::traits::Transformation;
use crate::utils::min_max;
use crate::{vector, Box2D, Point, Vector};

use core::ops::{Add, Mul, MulAssign, Sub};

/// A linear segment.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineSegment2F {
    pub from: Point,
    pub to: Point,
}

impl LineSegment2F {
    #[inline]
    pub fn new(from: Point, to: Point) -> Self {
        LineSegment2F { from, to }
    }

    #[inline]
    pub fn from(&self) -> Point {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point {
        self.to
    }

    #[inline]
    pub fn set_from(&mut self, p: Point) {
        self.from = p;
    }

    #[inline]
    pub fn set_to(&mut self, p: Point) {
        self.to = p;
    }

    #[inline]
    pub fn from_x(&self) -> f32 {
        self.from.x
    }

    #[inline]
    pub fn from_y(&self) -> f32 {
        self.from.y
    }

    #[inline]
    pub fn to_x(&self) -> f32 {
        self.to.x
    }

    #[inline]
    pub fn to_y(&self) -> f32 {
        self.to.y
    }

    /// The vector from the start to the end of the segment.
    #[inline]
    pub fn vector(&self) -> Vector {
        self.to - self.from
    }

    /// Sample the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: f32) -> Point {
        self.from.lerp(self.to, t)
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        self.sample(0.5)
    }

    #[inline]
    pub fn square_length(&self) -> f32 {
        self.vector().square_length()
    }

    #[inline]
    pub fn length(&self) -> f32 {
        Float::sqrt(self.square_length())
    }

    #[inline]
    pub fn is_zero_length(&self) -> bool {
        self.square_length() < ZERO_LENGTH_EPSILON
    }

    /// Returns an inverted version of this segment where the beginning and the end
    /// points are swapped.
    #[inline]
    pub fn reversed(&self) -> Self {
        LineSegment2F::new(self.to, self.from)
    }

    /// Split this segment into two sub-segments at `t`.
    #[inline]
    pub fn split(&self, t: f32) -> (Self, Self) {
        let split_point = self.sample(t);
        (
            LineSegment2F::new(self.from, split_point),
            LineSegment2F::new(split_point, self.to),
        )
    }

    /// Splits the segment by a vertical line. The part left of `x` comes first.
    pub fn split_at_x(&self, x: f32) -> (Self, Self) {
        let (prev_part, next_part) = self.split(self.solve_t_for_x(x));
        if prev_part.from.x < prev_part.to.x {
            (prev_part, next_part)
        } else {
            (next_part, prev_part)
        }
    }

    /// Splits the segment by a horizontal line. The part above `y` comes first.
    pub fn split_at_y(&self, y: f32) -> (Self, Self) {
        let (prev_part, next_part) = self.split(self.solve_t_for_y(y));
        if prev_part.from.y < prev_part.to.y {
            (prev_part, next_part)
        } else {
            (next_part, prev_part)
        }
    }

    /// Returns 0 for vertical segments.
    pub fn solve_t_for_x(&self, x: f32) -> f32 {
        let dx = self.to.x - self.from.x;
        if dx == 0.0 {
            return 0.0;
        }

        (x - self.from.x) / dx
    }

    /// Returns 0 for horizontal segments.
    pub fn solve_t_for_y(&self, y: f32) -> f32 {
        let dy = self.to.y - self.from.y;
        if dy == 0.0 {
            return 0.0;
        }

        (y - self.from.y) / dy
    }

    #[inline]
    pub fn solve_x_for_y(&self, y: f32) -> f32 {
        self.sample(self.solve_t_for_y(y)).x
    }

    #[inline]
    pub fn solve_y_for_x(&self, x: f32) -> f32 {
        self.sample(self.solve_t_for_x(x)).y
    }

    #[inline]
    pub fn min_x(&self) -> f32 {
        self.from.x.min(self.to.x)
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.from.x.max(self.to.x)
    }

    #[inline]
    pub fn min_y(&self) -> f32 {
        self.from.y.min(self.to.y)
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        self.from.y.max(self.to.y)
    }

    /// The endpoint with the smallest y.
    #[inline]
    pub fn upper_point(&self) -> Point {
        if self.from.y < self.to.y {
            self.from
        } else {
            self.to
        }
    }

    /// The endpoint with the largest y.
    #[inline]
    pub fn lower_point(&self) -> Point {
        if self.from.y < self.to.y {
            self.to
        } else {
            self.from
        }
    }

    /// 1 if the segment goes towards positive x, -1 otherwise.
    #[inline]
    pub fn winding_x(&self) -> i32 {
        if self.from.x < self.to.x {
            1
        } else {
            -1
        }
    }

    /// 1 if the segment goes down, -1 otherwise.
    #[inline]
    pub fn winding_y(&self) -> i32 {
        if self.from.y < self.to.y {
            1
        } else {
            -1
        }
    }

    /// Returns the segment as is for a non-negative `winding` and reversed otherwise.
    #[inline]
    pub fn orient(&self, winding: i32) -> Self {
        if winding >= 0 {
            *self
        } else {
            self.reversed()
        }
    }

    #[inline]
    pub fn bounding_box(&self) -> Box2D<f32> {
        let (min_x, max_x) = min_max(self.from.x, self.to.x);
        let (min_y, max_y) = min_max(self.from.y, self.to.y);

        Box2D {
            min: Point::new(min_x, min_y),
            max: Point::new(max_x, max_y),
        }
    }

    /// Intersects the infinite lines through both segments.
    ///
    /// Returns the parameter along `self` of the crossing point, or `None` when
    /// the lines are parallel.
    pub fn intersection_t(&self, other: &LineSegment2F) -> Option<f32> {
        let v = self.vector();
        let o = other.vector();
        let det = v.cross(o);
        if Float::abs(det) < INTERSECTION_EPSILON {
            return None;
        }

        Some((other.from - self.from).cross(o) / det)
    }

    #[inline]
    pub fn intersection(&self, other: &LineSegment2F) -> Option<Point> {
        self.intersection_t(other).map(|t| self.sample(t))
    }

    /// Moves the segment along its normal by `distance`.
    ///
    /// The normal is the direction rotated by a quarter turn, which points to the
    /// right of the direction of travel in y-down space.
    /// Segments of zero length are left untouched.
    pub fn offset(&self, distance: f32) -> Self {
        if self.is_zero_length() {
            return *self;
        }

        let v = self.vector();
        let normal = vector(-v.y, v.x) / Float::sqrt(v.square_length());
        *self + normal * distance
    }

    #[inline]
    pub fn translate(&self, by: Vector) -> Self {
        LineSegment2F::new(self.from + by, self.to + by)
    }

    #[inline]
    pub fn transformed<T: Transformation>(&self, transform: &T) -> Self {
        LineSegment2F::new(
            transform.transform_point(self.from),
            transform.transform_point(self.to),
        )
    }
}

impl Add<Vector> for LineSegment2F {
    type Output = LineSegment2F;
    #[inline]
    fn add(self, v: Vector) -> LineSegment2F {
        self.translate(v)
    }
}

impl Sub<Vector> for LineSegment2F {
    type Output = LineSegment2F;
    #[inline]
    fn sub(self, v: Vector) -> LineSegment2F {
        self.translate(-v)
    }
}

impl Mul<Vector> for LineSegment2F {
    type Output = LineSegment2F;
    #[inline]
    fn mul(self, factors: Vector) -> LineSegment2F {
        LineSegment2F::new(
            self.from.to_vector().component_mul(factors).to_point(),
            self.to.to_vector().component_mul(factors).to_point(),
        )
    }
}

impl Mul<f32> for LineSegment2F {
    type Output = LineSegment2F;
    #[inline]
    fn mul(self, factor: f32) -> LineSegment2F {
        LineSegment2F::new(self.from * factor, self.to * factor)
    }
}

impl MulAssign<Vector> for LineSegment2F {
    #[inline]
    fn mul_assign(&mut self, factors: Vector) {
        *self = *self * factors;
    }
}

#[cfg(test)]
use crate::point;
#[cfg(test)]
use crate::utils::{approx_eq, approx_eq_point};

#[test]
fn accessors() {
    let l = LineSegment2F::new(point(1.0, 2.0), point(3.0, 4.0));
    assert_eq!(l.from_x(), 1.0);
    assert_eq!(l.from_y(), 2.0);
    assert_eq!(l.to_x(), 3.0);
    assert_eq!(l.to_y(), 4.0);
    assert_eq!(l.vector(), vector(2.0, 2.0));
    assert_eq!(l.midpoint(), point(2.0, 3.0));
}

#[test]
fn split_at_x_returns_left_part_first() {
    let l = LineSegment2F::new(point(4.0, 0.0), point(0.0, 4.0));
    let (left, right) = l.split_at_x(1.0);

    assert!(left.max_x() <= 1.0 + 1e-6);
    assert!(right.min_x() >= 1.0 - 1e-6);
    assert!(approx_eq_point(left.from, point(1.0, 3.0), 1e-6));
    assert_eq!(left.to, point(0.0, 4.0));
}

#[test]
fn split_at_y_returns_upper_part_first() {
    let l = LineSegment2F::new(point(0.0, 0.0), point(2.0, 4.0));
    let (upper, lower) = l.split_at_y(1.0);

    assert_eq!(upper.from, point(0.0, 0.0));
    assert!(approx_eq_point(upper.to, point(0.5, 1.0), 1e-6));
    assert_eq!(lower.to, point(2.0, 4.0));
}

#[test]
fn solve() {
    let l = LineSegment2F::new(point(0.0, 0.0), point(10.0, 5.0));
    assert!(approx_eq(l.solve_t_for_x(2.5), 0.25));
    assert!(approx_eq(l.solve_y_for_x(4.0), 2.0));
    assert!(approx_eq(l.solve_x_for_y(4.0), 8.0));

    let vertical = LineSegment2F::new(point(1.0, 0.0), point(1.0, 5.0));
    assert_eq!(vertical.solve_t_for_x(3.0), 0.0);
}

#[test]
fn intersection() {
    let h = LineSegment2F::new(point(0.0, 0.0), point(2.0, 0.0));
    let v = LineSegment2F::new(point(1.0, -1.0), point(1.0, 1.0));

    assert!(approx_eq(h.intersection_t(&v).unwrap(), 0.5));
    assert!(approx_eq(v.intersection_t(&h).unwrap(), 0.5));
    assert!(approx_eq_point(h.intersection(&v).unwrap(), point(1.0, 0.0), 1e-6));

    // The lines extend past the segments.
    let far = LineSegment2F::new(point(5.0, 3.0), point(5.0, 4.0));
    assert!(approx_eq(h.intersection_t(&far).unwrap(), 2.5));
}

#[test]
fn parallel_segments_do_not_intersect() {
    let a = LineSegment2F::new(point(0.0, 0.0), point(2.0, 0.0));
    let b = LineSegment2F::new(point(0.0, 1.0), point(3.0, 1.0));
    assert!(a.intersection_t(&b).is_none());
    assert!(a.intersection_t(&a).is_none());
}

#[test]
fn offset() {
    let l = LineSegment2F::new(point(0.0, 0.0), point(4.0, 0.0));
    let o = l.offset(2.0);
    assert_eq!(o, LineSegment2F::new(point(0.0, 2.0), point(4.0, 2.0)));

    let tiny = LineSegment2F::new(point(1.0, 1.0), point(1.001, 1.0));
    assert!(tiny.is_zero_length());
    assert_eq!(tiny.offset(10.0), tiny);
}

#[test]
fn winding_and_orient() {
    let down = LineSegment2F::new(point(0.0, 0.0), point(1.0, 3.0));
    let up = down.reversed();

    assert_eq!(down.winding_y(), 1);
    assert_eq!(up.winding_y(), -1);
    assert_eq!(up.winding_x(), -1);
    assert_eq!(up.orient(1), up);
    assert_eq!(up.orient(0), up);
    assert_eq!(up.orient(-1), down);
    assert_eq!(down.orient(-1), up);
    assert_eq!(down.orient(up.winding_y()), up);
    assert_eq!(up.upper_point(), point(0.0, 0.0));
    assert_eq!(up.lower_point(), point(1.0, 3.0));
}

#[test]
fn operators() {
    let l = LineSegment2F::new(point(1.0, 2.0), point(3.0, 4.0));
    assert_eq!(l + vector(1.0, 1.0), LineSegment2F::new(point(2.0, 3.0), point(4.0, 5.0)));
    assert_eq!(l - vector(1.0, 2.0), LineSegment2F::new(point(0.0, 0.0), point(2.0, 2.0)));
    assert_eq!(l * 2.0, LineSegment2F::new(point(2.0, 4.0), point(6.0, 8.0)));

    let mut m = l;
    m *= vector(1.0, -1.0);
    assert_eq!(m, LineSegment2F::new(point(1.0, -2.0), point(3.0, -4.0)));
}
