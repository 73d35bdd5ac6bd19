use crate::scalar::Float;
use crate::{int_point, point, vector, Box2D, IntPoint, IntVector, Point, Size, Vector};

use core::ops::{Add, Mul, Sub};

/// An axis-aligned rectangle with floating point coordinates.
///
/// Stored as its minimum and maximum corners. Constructors that take two arbitrary
/// points normalize them, so `min <= max` holds for rectangles built that way.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct RectF(Box2D<f32>);

impl Default for RectF {
    #[inline]
    fn default() -> Self {
        RectF(Box2D::zero())
    }
}

impl RectF {
    /// Creates a rectangle from its corners, which must already be ordered.
    #[inline]
    pub fn new(min: Point, max: Point) -> Self {
        RectF(Box2D::new(min, max))
    }

    /// The rectangle spanned by two opposite corners, in any order.
    #[inline]
    pub fn from_points(a: Point, b: Point) -> Self {
        RectF::new(a.min(b), a.max(b))
    }

    #[inline]
    pub fn from_origin_and_size(origin: Point, size: Size) -> Self {
        RectF::from_points(origin, origin + size.to_vector())
    }

    #[inline]
    pub fn from_box2d(b: Box2D<f32>) -> Self {
        RectF(b)
    }

    #[inline]
    pub fn to_box2d(&self) -> Box2D<f32> {
        self.0
    }

    #[inline]
    pub fn origin(&self) -> Point {
        self.0.min
    }

    #[inline]
    pub fn min(&self) -> Point {
        self.0.min
    }

    #[inline]
    pub fn max(&self) -> Point {
        self.0.max
    }

    #[inline]
    pub fn min_x(&self) -> f32 {
        self.0.min.x
    }

    #[inline]
    pub fn min_y(&self) -> f32 {
        self.0.min.y
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.0.max.x
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        self.0.max.y
    }

    #[inline]
    pub fn size(&self) -> Size {
        (self.0.max - self.0.min).to_size()
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.0.max.x - self.0.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.0.max.y - self.0.min.y
    }

    #[inline]
    pub fn upper_right(&self) -> Point {
        point(self.0.max.x, self.0.min.y)
    }

    #[inline]
    pub fn lower_left(&self) -> Point {
        point(self.0.min.x, self.0.max.y)
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.0.min.lerp(self.0.max, 0.5)
    }

    /// True if both corners coincide.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.min == self.0.max
    }

    /// Inclusive on all edges.
    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.0.min.x && p.x <= self.0.max.x && p.y >= self.0.min.y && p.y <= self.0.max.y
    }

    #[inline]
    pub fn contains_rect(&self, other: &RectF) -> bool {
        other.0.min.x >= self.0.min.x
            && other.0.max.x <= self.0.max.x
            && other.0.min.y >= self.0.min.y
            && other.0.max.y <= self.0.max.y
    }

    /// True if the interiors overlap. Rectangles that only share an edge do not intersect.
    #[inline]
    pub fn intersects(&self, other: &RectF) -> bool {
        other.0.min.x < self.0.max.x
            && other.0.max.x > self.0.min.x
            && other.0.min.y < self.0.max.y
            && other.0.max.y > self.0.min.y
    }

    #[inline]
    pub fn intersection(&self, other: &RectF) -> Option<RectF> {
        if !self.intersects(other) {
            return None;
        }

        Some(RectF::new(self.0.min.max(other.0.min), self.0.max.min(other.0.max)))
    }

    /// The smallest rectangle containing both rectangles.
    #[inline]
    pub fn union_rect(&self, other: &RectF) -> RectF {
        RectF::new(self.0.min.min(other.0.min), self.0.max.max(other.0.max))
    }

    /// The smallest rectangle containing this rectangle and `p`.
    #[inline]
    pub fn union_point(&self, p: Point) -> RectF {
        RectF::new(self.0.min.min(p), self.0.max.max(p))
    }

    /// Grows the rectangle by `amount` on each side.
    #[inline]
    pub fn dilate(&self, amount: Vector) -> RectF {
        RectF::from_points(self.0.min - amount, self.0.max + amount)
    }

    /// Shrinks the rectangle by `amount` on each side.
    #[inline]
    pub fn contract(&self, amount: Vector) -> RectF {
        self.dilate(-amount)
    }

    #[inline]
    pub fn round(&self) -> RectF {
        RectF::new(
            point(Float::round(self.0.min.x), Float::round(self.0.min.y)),
            point(Float::round(self.0.max.x), Float::round(self.0.max.y)),
        )
    }

    /// Rounds outwards so that the result contains this rectangle.
    #[inline]
    pub fn round_out(&self) -> RectF {
        RectF::new(
            point(Float::floor(self.0.min.x), Float::floor(self.0.min.y)),
            point(Float::ceil(self.0.max.x), Float::ceil(self.0.max.y)),
        )
    }

    #[inline]
    pub fn translate(&self, v: Vector) -> RectF {
        RectF::new(self.0.min + v, self.0.max + v)
    }

    /// Scales both corners. Negative factors swap them back into order.
    #[inline]
    pub fn scale(&self, factors: Vector) -> RectF {
        RectF::from_points(
            self.0.min.to_vector().component_mul(factors).to_point(),
            self.0.max.to_vector().component_mul(factors).to_point(),
        )
    }

    /// Truncates the coordinates towards zero.
    #[inline]
    pub fn to_i32(&self) -> RectI {
        RectI::new(
            int_point(self.0.min.x as i32, self.0.min.y as i32),
            int_point(self.0.max.x as i32, self.0.max.y as i32),
        )
    }
}

impl From<Box2D<f32>> for RectF {
    #[inline]
    fn from(b: Box2D<f32>) -> Self {
        RectF(b)
    }
}

impl From<RectF> for Box2D<f32> {
    #[inline]
    fn from(r: RectF) -> Self {
        r.0
    }
}

impl Add<Vector> for RectF {
    type Output = RectF;
    #[inline]
    fn add(self, v: Vector) -> RectF {
        self.translate(v)
    }
}

impl Add<f32> for RectF {
    type Output = RectF;
    #[inline]
    fn add(self, amount: f32) -> RectF {
        self.translate(vector(amount, amount))
    }
}

impl Sub<Vector> for RectF {
    type Output = RectF;
    #[inline]
    fn sub(self, v: Vector) -> RectF {
        self.translate(-v)
    }
}

impl Sub<f32> for RectF {
    type Output = RectF;
    #[inline]
    fn sub(self, amount: f32) -> RectF {
        self.translate(vector(-amount, -amount))
    }
}

impl Mul<Vector> for RectF {
    type Output = RectF;
    #[inline]
    fn mul(self, factors: Vector) -> RectF {
        self.scale(factors)
    }
}

impl Mul<f32> for RectF {
    type Output = RectF;
    #[inline]
    fn mul(self, factor: f32) -> RectF {
        self.scale(vector(factor, factor))
    }
}

/// An axis-aligned rectangle with integer coordinates, typically a pixel or tile range.
///
/// The maximum edges are exclusive: the rectangle covers the cells whose
/// coordinates are in `min..max`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct RectI(Box2D<i32>);

impl Default for RectI {
    #[inline]
    fn default() -> Self {
        RectI(Box2D::zero())
    }
}

impl RectI {
    #[inline]
    pub fn new(min: IntPoint, max: IntPoint) -> Self {
        RectI(Box2D::new(min, max))
    }

    #[inline]
    pub fn from_points(a: IntPoint, b: IntPoint) -> Self {
        RectI::new(a.min(b), a.max(b))
    }

    #[inline]
    pub fn to_box2d(&self) -> Box2D<i32> {
        self.0
    }

    #[inline]
    pub fn origin(&self) -> IntPoint {
        self.0.min
    }

    #[inline]
    pub fn min(&self) -> IntPoint {
        self.0.min
    }

    #[inline]
    pub fn max(&self) -> IntPoint {
        self.0.max
    }

    #[inline]
    pub fn min_x(&self) -> i32 {
        self.0.min.x
    }

    #[inline]
    pub fn min_y(&self) -> i32 {
        self.0.min.y
    }

    #[inline]
    pub fn max_x(&self) -> i32 {
        self.0.max.x
    }

    #[inline]
    pub fn max_y(&self) -> i32 {
        self.0.max.y
    }

    #[inline]
    pub fn size(&self) -> IntVector {
        self.0.max - self.0.min
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.0.max.x - self.0.min.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.0.max.y - self.0.min.y
    }

    #[inline]
    pub fn area(&self) -> i32 {
        self.width() * self.height()
    }

    #[inline]
    pub fn upper_right(&self) -> IntPoint {
        int_point(self.0.max.x, self.0.min.y)
    }

    #[inline]
    pub fn lower_left(&self) -> IntPoint {
        int_point(self.0.min.x, self.0.max.y)
    }

    /// Rounds towards negative infinity.
    #[inline]
    pub fn center(&self) -> IntPoint {
        int_point(
            (self.0.min.x + self.0.max.x) >> 1,
            (self.0.min.y + self.0.max.y) >> 1,
        )
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.min == self.0.max
    }

    /// Inclusive on the minimum edges, exclusive on the maximum edges.
    #[inline]
    pub fn contains_point(&self, p: IntPoint) -> bool {
        p.x >= self.0.min.x && p.x < self.0.max.x && p.y >= self.0.min.y && p.y < self.0.max.y
    }

    #[inline]
    pub fn contains_rect(&self, other: &RectI) -> bool {
        other.0.min.x >= self.0.min.x
            && other.0.max.x <= self.0.max.x
            && other.0.min.y >= self.0.min.y
            && other.0.max.y <= self.0.max.y
    }

    /// True if the rectangles share at least one cell.
    #[inline]
    pub fn intersects(&self, other: &RectI) -> bool {
        other.0.min.x < self.0.max.x
            && other.0.max.x > self.0.min.x
            && other.0.min.y < self.0.max.y
            && other.0.max.y > self.0.min.y
    }

    #[inline]
    pub fn intersection(&self, other: &RectI) -> Option<RectI> {
        if !self.intersects(other) {
            return None;
        }

        Some(RectI::new(self.0.min.max(other.0.min), self.0.max.min(other.0.max)))
    }

    #[inline]
    pub fn union_rect(&self, other: &RectI) -> RectI {
        RectI::new(self.0.min.min(other.0.min), self.0.max.max(other.0.max))
    }

    #[inline]
    pub fn union_point(&self, p: IntPoint) -> RectI {
        RectI::new(self.0.min.min(p), self.0.max.max(p))
    }

    #[inline]
    pub fn translate(&self, v: IntVector) -> RectI {
        RectI::new(self.0.min + v, self.0.max + v)
    }

    #[inline]
    pub fn scale(&self, factor: i32) -> RectI {
        self.scale_xy(IntVector::new(factor, factor))
    }

    #[inline]
    pub fn scale_xy(&self, factors: IntVector) -> RectI {
        RectI::from_points(
            self.0.min.to_vector().component_mul(factors).to_point(),
            self.0.max.to_vector().component_mul(factors).to_point(),
        )
    }

    /// Shrinks the rectangle by `amount` on each side.
    #[inline]
    pub fn contract(&self, amount: IntVector) -> RectI {
        RectI::new(self.0.min + amount, self.0.max - amount)
    }

    #[inline]
    pub fn to_f32(&self) -> RectF {
        RectF::new(self.0.min.to_f32(), self.0.max.to_f32())
    }
}

impl From<RectI> for RectF {
    #[inline]
    fn from(r: RectI) -> Self {
        r.to_f32()
    }
}

#[test]
fn from_points_normalizes() {
    let r = RectF::from_points(point(5.0, 1.0), point(2.0, 4.0));
    assert_eq!(r.min(), point(2.0, 1.0));
    assert_eq!(r.max(), point(5.0, 4.0));
    assert_eq!(r.width(), 3.0);
    assert_eq!(r.height(), 3.0);
    assert_eq!(r.center(), point(3.5, 2.5));
}

#[test]
fn rect_f_queries() {
    let r = RectF::new(point(0.0, 0.0), point(10.0, 10.0));

    assert!(r.contains_point(point(10.0, 10.0)));
    assert!(!r.contains_point(point(10.5, 0.0)));
    assert!(r.contains_rect(&RectF::new(point(1.0, 1.0), point(10.0, 5.0))));
    assert!(!r.contains_rect(&RectF::new(point(-1.0, 1.0), point(5.0, 5.0))));

    let touching = RectF::new(point(10.0, 0.0), point(20.0, 10.0));
    assert!(!r.intersects(&touching));
    assert!(r.intersection(&touching).is_none());

    let overlapping = RectF::new(point(5.0, -5.0), point(15.0, 5.0));
    assert_eq!(
        r.intersection(&overlapping),
        Some(RectF::new(point(5.0, 0.0), point(10.0, 5.0)))
    );
    assert_eq!(
        r.union_rect(&overlapping),
        RectF::new(point(0.0, -5.0), point(15.0, 10.0))
    );
    assert_eq!(
        r.union_point(point(-3.0, 12.0)),
        RectF::new(point(-3.0, 0.0), point(10.0, 12.0))
    );
}

#[test]
fn rect_f_is_empty() {
    assert!(RectF::default().is_empty());
    assert!(RectF::new(point(1.0, 1.0), point(1.0, 1.0)).is_empty());
    assert!(!RectF::new(point(0.0, 0.0), point(3.0, 0.0)).is_empty());
}

#[test]
fn rect_f_rounding_and_operators() {
    let r = RectF::new(point(0.4, 0.6), point(2.5, 3.2));
    assert_eq!(r.round_out(), RectF::new(point(0.0, 0.0), point(3.0, 4.0)));
    assert_eq!(r.round(), RectF::new(point(0.0, 1.0), point(3.0, 3.0)));

    let r = RectF::new(point(1.0, 2.0), point(3.0, 4.0));
    assert_eq!(r + vector(1.0, 1.0), RectF::new(point(2.0, 3.0), point(4.0, 5.0)));
    assert_eq!(r - 1.0, RectF::new(point(0.0, 1.0), point(2.0, 3.0)));
    assert_eq!(r * 2.0, RectF::new(point(2.0, 4.0), point(6.0, 8.0)));
    assert_eq!(r * vector(-1.0, 1.0), RectF::new(point(-3.0, 2.0), point(-1.0, 4.0)));
    assert_eq!(r.dilate(vector(1.0, 2.0)), RectF::new(point(0.0, 0.0), point(4.0, 6.0)));
    assert_eq!(r.contract(vector(0.5, 0.5)), RectF::new(point(1.5, 2.5), point(2.5, 3.5)));
}

#[test]
fn rect_f_to_i32_truncates() {
    let r = RectF::new(point(-1.7, 0.2), point(3.9, 4.5));
    assert_eq!(r.to_i32(), RectI::new(int_point(-1, 0), int_point(3, 4)));
}

#[test]
fn rect_i_half_open() {
    let r = RectI::new(int_point(0, 0), int_point(4, 4));

    assert!(r.contains_point(int_point(0, 0)));
    assert!(r.contains_point(int_point(3, 3)));
    assert!(!r.contains_point(int_point(4, 0)));
    assert!(r.contains_rect(&RectI::new(int_point(1, 1), int_point(4, 4))));
    assert!(!r.contains_rect(&RectI::new(int_point(1, 1), int_point(5, 4))));

    let adjacent = RectI::new(int_point(4, 0), int_point(8, 4));
    assert!(!r.intersects(&adjacent));
    assert_eq!(
        r.intersection(&RectI::new(int_point(2, -2), int_point(6, 2))),
        Some(RectI::new(int_point(2, 0), int_point(4, 2)))
    );
}

#[test]
fn rect_i_metrics() {
    let r = RectI::new(int_point(-3, 1), int_point(4, 5));
    assert_eq!(r.area(), 28);
    assert_eq!(r.size(), IntVector::new(7, 4));
    assert_eq!(r.center(), int_point(0, 3));
    assert_eq!(r.scale(2), RectI::new(int_point(-6, 2), int_point(8, 10)));
    assert_eq!(
        r.scale_xy(IntVector::new(1, -1)),
        RectI::new(int_point(-3, -5), int_point(4, -1))
    );
    assert_eq!(
        r.contract(IntVector::new(1, 1)),
        RectI::new(int_point(-2, 2), int_point(3, 4))
    );
    assert_eq!(r.to_f32(), RectF::new(point(-3.0, 1.0), point(4.0, 5.0)));
}
