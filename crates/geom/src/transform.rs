use crate::line::LineSegment2F;
use crate::rect::RectF;
use crate::scalar::Float;
use crate::traits::Transformation;
use crate::unit_vector::UnitVector;
use crate::{point, vector, Point, Vector};

use core::ops::{Mul, MulAssign};

/// A 2x2 matrix, with `m<row><column>` naming.
///
/// Multiplying a column vector gives `(m11 * x + m12 * y, m21 * x + m22 * y)`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Matrix2x2F {
    pub m11: f32,
    pub m12: f32,
    pub m21: f32,
    pub m22: f32,
}

impl Default for Matrix2x2F {
    #[inline]
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix2x2F {
    #[inline]
    pub const fn row_major(m11: f32, m12: f32, m21: f32, m22: f32) -> Self {
        Matrix2x2F { m11, m12, m21, m22 }
    }

    #[inline]
    pub fn column_major(col0: Vector, col1: Vector) -> Self {
        Matrix2x2F {
            m11: col0.x,
            m12: col1.x,
            m21: col0.y,
            m22: col1.y,
        }
    }

    #[inline]
    pub const fn identity() -> Self {
        Matrix2x2F::row_major(1.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub const fn zero() -> Self {
        Matrix2x2F::row_major(0.0, 0.0, 0.0, 0.0)
    }

    #[inline]
    pub fn from_scale(scale: Vector) -> Self {
        Matrix2x2F::row_major(scale.x, 0.0, 0.0, scale.y)
    }

    #[inline]
    pub fn from_rotation(theta: f32) -> Self {
        Matrix2x2F::from_rotation_vector(UnitVector::from_angle(theta))
    }

    /// The rotation that maps the x axis onto `v`.
    #[inline]
    pub fn from_rotation_vector(v: UnitVector) -> Self {
        Matrix2x2F::column_major(v.0, vector(-v.0.y, v.0.x))
    }

    #[inline]
    pub fn det(&self) -> f32 {
        self.m11 * self.m22 - self.m12 * self.m21
    }

    #[inline]
    pub fn adjugate(&self) -> Self {
        Matrix2x2F::row_major(self.m22, -self.m12, -self.m21, self.m11)
    }

    #[inline]
    pub fn transpose(&self) -> Self {
        Matrix2x2F::row_major(self.m11, self.m21, self.m12, self.m22)
    }

    /// Returns the inverse, or `None` if the matrix is singular.
    pub fn try_inverse(&self) -> Option<Self> {
        let det = self.det();
        if det == 0.0 {
            return None;
        }

        let inverse = self.adjugate().scale(1.0 / det);
        let finite = inverse.m11.is_finite()
            && inverse.m12.is_finite()
            && inverse.m21.is_finite()
            && inverse.m22.is_finite();

        if finite {
            Some(inverse)
        } else {
            None
        }
    }

    /// Multiplies every component by `factor`.
    #[inline]
    pub fn scale(&self, factor: f32) -> Self {
        Matrix2x2F::row_major(
            self.m11 * factor,
            self.m12 * factor,
            self.m21 * factor,
            self.m22 * factor,
        )
    }

    /// Returns `self * other`, the matrix applying `other` first.
    #[inline]
    pub fn mul_matrix(&self, other: &Matrix2x2F) -> Self {
        Matrix2x2F::row_major(
            self.m11 * other.m11 + self.m12 * other.m21,
            self.m11 * other.m12 + self.m12 * other.m22,
            self.m21 * other.m11 + self.m22 * other.m21,
            self.m21 * other.m12 + self.m22 * other.m22,
        )
    }

    #[inline]
    pub fn transform_vector(&self, v: Vector) -> Vector {
        vector(
            self.m11 * v.x + self.m12 * v.y,
            self.m21 * v.x + self.m22 * v.y,
        )
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Matrix2x2F::identity()
    }
}

impl Mul<Matrix2x2F> for Matrix2x2F {
    type Output = Matrix2x2F;
    #[inline]
    fn mul(self, other: Matrix2x2F) -> Matrix2x2F {
        self.mul_matrix(&other)
    }
}

impl Mul<Vector> for Matrix2x2F {
    type Output = Vector;
    #[inline]
    fn mul(self, v: Vector) -> Vector {
        self.transform_vector(v)
    }
}

/// An affine transform: a 2x2 matrix followed by a translation.
///
/// A point `p` maps to `matrix * p + vector`. Composition is written the
/// mathematical way: `a * b` applies `b` first, then `a`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Transform2F {
    pub matrix: Matrix2x2F,
    pub vector: Vector,
}

impl Transform2F {
    #[inline]
    pub const fn new(matrix: Matrix2x2F, vector: Vector) -> Self {
        Transform2F { matrix, vector }
    }

    #[inline]
    pub fn identity() -> Self {
        Transform2F::new(Matrix2x2F::identity(), Vector::zero())
    }

    /// Builds a transform from its two matrix rows, the last column being the translation.
    #[inline]
    pub fn row_major(m11: f32, m12: f32, m13: f32, m21: f32, m22: f32, m23: f32) -> Self {
        Transform2F::new(Matrix2x2F::row_major(m11, m12, m21, m22), vector(m13, m23))
    }

    /// Builds a transform from the images of the x axis, the y axis and the origin.
    #[inline]
    pub fn column_major(col0: Vector, col1: Vector, col2: Vector) -> Self {
        Transform2F::new(Matrix2x2F::column_major(col0, col1), col2)
    }

    #[inline]
    pub fn from_scale(scale: Vector) -> Self {
        Transform2F::new(Matrix2x2F::from_scale(scale), Vector::zero())
    }

    #[inline]
    pub fn from_uniform_scale(scale: f32) -> Self {
        Transform2F::from_scale(vector(scale, scale))
    }

    #[inline]
    pub fn from_rotation(theta: f32) -> Self {
        Transform2F::new(Matrix2x2F::from_rotation(theta), Vector::zero())
    }

    #[inline]
    pub fn from_rotation_vector(v: UnitVector) -> Self {
        Transform2F::new(Matrix2x2F::from_rotation_vector(v), Vector::zero())
    }

    #[inline]
    pub fn from_translation(v: Vector) -> Self {
        Transform2F::new(Matrix2x2F::identity(), v)
    }

    /// Scales, then rotates, then translates.
    pub fn from_scale_rotation_translation(scale: Vector, theta: f32, translation: Vector) -> Self {
        let rotation = Matrix2x2F::from_rotation(theta);
        Transform2F::new(rotation * Matrix2x2F::from_scale(scale), translation)
    }

    /// Exact comparison with the identity transform.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.matrix.is_identity() && self.vector == Vector::zero()
    }

    #[inline]
    pub fn translation(&self) -> Vector {
        self.vector
    }

    /// The rotation angle in radians, assuming the transform has no skew.
    #[inline]
    pub fn rotation(&self) -> f32 {
        Float::atan2(self.matrix.m21, self.matrix.m11)
    }

    /// The diagonal of the matrix.
    #[inline]
    pub fn scale_factors(&self) -> Vector {
        vector(self.matrix.m11, self.matrix.m22)
    }

    /// The length of the image of the x axis.
    #[inline]
    pub fn scale_factor(&self) -> f32 {
        Float::sqrt(self.matrix.m11 * self.matrix.m11 + self.matrix.m21 * self.matrix.m21)
    }

    #[inline]
    pub fn det(&self) -> f32 {
        self.matrix.det()
    }

    /// Returns `self * other`: the transform applying `other` first, then `self`.
    #[inline]
    pub fn then_after(&self, other: &Transform2F) -> Self {
        Transform2F::new(
            self.matrix * other.matrix,
            self.apply_point(other.vector.to_point()).to_vector(),
        )
    }

    /// Returns the transform applying `self` first, then `other`.
    #[inline]
    pub fn then(&self, other: &Transform2F) -> Self {
        other.then_after(self)
    }

    /// Scales the rows of the matrix. The translation is left untouched.
    #[inline]
    pub fn scale(&self, scale: Vector) -> Self {
        Transform2F::new(Matrix2x2F::from_scale(scale) * self.matrix, self.vector)
    }

    /// Appends a rotation around the origin after this transform.
    #[inline]
    pub fn rotate(&self, theta: f32) -> Self {
        self.then(&Transform2F::from_rotation(theta))
    }

    /// Appends a translation after this transform.
    #[inline]
    pub fn translate(&self, v: Vector) -> Self {
        Transform2F::new(self.matrix, self.vector + v)
    }

    /// Returns the inverse transform, or `None` if the matrix is singular.
    pub fn try_inverse(&self) -> Option<Self> {
        let matrix = self.matrix.try_inverse()?;
        let vector = -(matrix * self.vector);
        Some(Transform2F::new(matrix, vector))
    }

    /// Returns the inverse transform.
    ///
    /// A singular transform has no inverse; the zero transform is returned so that
    /// the result stays finite. Use [`try_inverse`](Self::try_inverse) to detect it.
    pub fn inverse(&self) -> Self {
        self.try_inverse()
            .unwrap_or_else(|| Transform2F::new(Matrix2x2F::zero(), Vector::zero()))
    }

    #[inline]
    pub fn apply_point(&self, p: Point) -> Point {
        (self.matrix * p.to_vector() + self.vector).to_point()
    }

    /// Maps a vector. The translation does not apply to vectors.
    #[inline]
    pub fn apply_vector(&self, v: Vector) -> Vector {
        self.matrix * v
    }

    #[inline]
    pub fn apply_line_segment(&self, line: &LineSegment2F) -> LineSegment2F {
        LineSegment2F::new(self.apply_point(line.from), self.apply_point(line.to))
    }

    /// The bounding rectangle of the transformed corners of `rect`.
    ///
    /// The result is conservative for rotations and skews.
    pub fn apply_rect(&self, rect: &RectF) -> RectF {
        let corners = [
            self.apply_point(rect.min()),
            self.apply_point(point(rect.max_x(), rect.min_y())),
            self.apply_point(rect.max()),
            self.apply_point(point(rect.min_x(), rect.max_y())),
        ];

        let mut min = corners[0];
        let mut max = corners[0];
        for corner in &corners[1..] {
            min = min.min(*corner);
            max = max.max(*corner);
        }

        RectF::from_points(min, max)
    }
}

impl Mul<Transform2F> for Transform2F {
    type Output = Transform2F;
    #[inline]
    fn mul(self, other: Transform2F) -> Transform2F {
        self.then_after(&other)
    }
}

impl MulAssign<Transform2F> for Transform2F {
    #[inline]
    fn mul_assign(&mut self, other: Transform2F) {
        *self = self.then_after(&other);
    }
}

impl Mul<Point> for Transform2F {
    type Output = Point;
    #[inline]
    fn mul(self, p: Point) -> Point {
        self.apply_point(p)
    }
}

impl Mul<Vector> for Transform2F {
    type Output = Vector;
    #[inline]
    fn mul(self, v: Vector) -> Vector {
        self.apply_vector(v)
    }
}

impl Mul<LineSegment2F> for Transform2F {
    type Output = LineSegment2F;
    #[inline]
    fn mul(self, line: LineSegment2F) -> LineSegment2F {
        self.apply_line_segment(&line)
    }
}

impl Mul<RectF> for Transform2F {
    type Output = RectF;
    #[inline]
    fn mul(self, rect: RectF) -> RectF {
        self.apply_rect(&rect)
    }
}

impl Transformation for Transform2F {
    #[inline]
    fn transform_point(&self, p: Point) -> Point {
        self.apply_point(p)
    }

    #[inline]
    fn transform_vector(&self, v: Vector) -> Vector {
        self.apply_vector(v)
    }
}

// euclid uses the row vector convention, hence the transposed matrix.
impl From<Transform2F> for euclid::default::Transform2D<f32> {
    fn from(t: Transform2F) -> Self {
        let m = t.matrix;
        euclid::default::Transform2D::new(m.m11, m.m21, m.m12, m.m22, t.vector.x, t.vector.y)
    }
}

impl From<euclid::default::Transform2D<f32>> for Transform2F {
    fn from(t: euclid::default::Transform2D<f32>) -> Self {
        Transform2F::row_major(t.m11, t.m21, t.m31, t.m12, t.m22, t.m32)
    }
}

#[cfg(test)]
use crate::utils::{approx_eq, approx_eq_point};

#[test]
fn identity() {
    let t = Transform2F::default();
    assert!(t.is_identity());
    assert_eq!(t.apply_point(point(3.0, -2.0)), point(3.0, -2.0));

    let almost = Transform2F::from_translation(vector(1e-7, 0.0));
    assert!(!almost.is_identity());
}

#[test]
fn scale_rotation_translation_order() {
    use core::f32::consts::FRAC_PI_2;

    let t = Transform2F::from_scale_rotation_translation(vector(2.0, 1.0), FRAC_PI_2, vector(10.0, 0.0));
    assert!(approx_eq_point(t.apply_point(point(1.0, 0.0)), point(10.0, 2.0), 1e-5));

    let manual = Transform2F::from_scale(vector(2.0, 1.0))
        .rotate(FRAC_PI_2)
        .translate(vector(10.0, 0.0));
    assert!(approx_eq_point(manual.apply_point(point(1.0, 0.0)), point(10.0, 2.0), 1e-5));
}

#[test]
fn composition_applies_right_operand_first() {
    let scale = Transform2F::from_uniform_scale(3.0);
    let translation = Transform2F::from_translation(vector(1.0, 2.0));

    let p = point(1.0, 1.0);
    assert_eq!((scale * translation).apply_point(p), point(6.0, 9.0));
    assert_eq!((translation * scale).apply_point(p), point(4.0, 5.0));
    assert_eq!(translation.then(&scale).apply_point(p), point(6.0, 9.0));
}

#[test]
fn scale_keeps_translation() {
    let t = Transform2F::from_translation(vector(1.0, 1.0)).scale(vector(2.0, 3.0));
    assert_eq!(t.vector, vector(1.0, 1.0));
    assert_eq!(t.apply_point(point(1.0, 1.0)), point(3.0, 4.0));

    let r = Transform2F::from_rotation(1.0).scale(vector(2.0, 0.5));
    let p = point(3.0, -2.0);
    let rotated = Transform2F::from_rotation(1.0).apply_point(p);
    assert!(approx_eq_point(r.apply_point(p), point(rotated.x * 2.0, rotated.y * 0.5), 1e-5));
}

#[test]
fn inverse_round_trip() {
    let t = Transform2F::row_major(2.0, 1.0, 5.0, -1.0, 3.0, 7.0);
    let inv = t.try_inverse().unwrap();

    assert!(approx_eq_point((inv * t).apply_point(point(4.0, -3.0)), point(4.0, -3.0), 1e-4));
    assert!(approx_eq_point((t * inv).apply_point(point(-2.0, 8.0)), point(-2.0, 8.0), 1e-4));
}

#[test]
fn singular_inverse() {
    let t = Transform2F::from_scale(vector(1.0, 0.0));
    assert!(t.try_inverse().is_none());

    let inv = t.inverse();
    assert_eq!(inv.apply_point(point(3.0, 4.0)), point(0.0, 0.0));
}

#[test]
fn rotation_angle() {
    let t = Transform2F::from_rotation(0.5).scale(vector(2.0, 2.0));
    assert!(approx_eq(t.rotation(), 0.5));
    assert!(approx_eq(t.scale_factor(), 2.0));

    let t = Transform2F::from_rotation(-2.0);
    assert!(approx_eq(t.rotation(), -2.0));
}

#[test]
fn row_and_column_major_agree() {
    let a = Transform2F::row_major(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
    let b = Transform2F::column_major(vector(1.0, 4.0), vector(2.0, 5.0), vector(3.0, 6.0));
    assert_eq!(a, b);
    assert_eq!(a.apply_point(point(1.0, 1.0)), point(6.0, 15.0));
}

#[test]
fn rotated_rect_bounds() {
    use core::f32::consts::FRAC_PI_4;

    let rect = RectF::new(point(-1.0, -1.0), point(1.0, 1.0));
    let rotated = Transform2F::from_rotation(FRAC_PI_4).apply_rect(&rect);

    let r = core::f32::consts::SQRT_2;
    assert!(approx_eq_point(rotated.min(), point(-r, -r), 1e-5));
    assert!(approx_eq_point(rotated.max(), point(r, r), 1e-5));
}

#[test]
fn euclid_conversion() {
    let t = Transform2F::row_major(2.0, 1.0, 5.0, -1.0, 3.0, 7.0);
    let e: euclid::default::Transform2D<f32> = t.into();

    let p = point(1.5, -2.0);
    assert_eq!(e.transform_point(p), t.apply_point(p));
    assert_eq!(Transform2F::from(e), t);
}
