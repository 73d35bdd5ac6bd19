//! Tagged path segments.
//!
//! A [`Segment`] is one piece of a contour: nothing, a line, a quadratic or a cubic
//! bézier curve. Segments also carry [`SegmentFlags`] telling where they sit in the
//! contour they were extracted from.
//!
//! The arc constructors build cubic approximations of arcs of the unit circle, which
//! contours then map onto ellipses with a transform.

use crate::scalar::Float;
use crate::tolerance::{ARC_COS_EPSILON, TINY_SEGMENT_EPSILON};
use crate::traits::Transformation;
use crate::utils::safe_sqrt;
use crate::{point, CubicBezierSegment, LineSegment2F, Point, QuadraticBezierSegment, RectF};

use arrayvec::ArrayVec;

/// The distance of the control points of a quarter circle from its endpoints, along
/// the tangents, for a unit radius: `4/3 * (√2 - 1)`.
pub const QUARTER_ARC_CONTROL_DISTANCE: f32 = 0.552_284_75;

bitflags! {
    /// Where a segment sits in its contour.
    #[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
    pub struct SegmentFlags: u8 {
        /// The segment starts a contour.
        const FIRST_IN_SUBPATH = 0x01;
        /// The segment is the implicit line closing a contour.
        const CLOSES_SUBPATH = 0x02;
    }
}

/// The geometry of a segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum SegmentKind {
    /// An empty segment, used as a placeholder.
    None,
    Line(LineSegment2F),
    Quadratic(QuadraticBezierSegment),
    Cubic(CubicBezierSegment),
}

/// A path segment along with its flags.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Segment {
    pub kind: SegmentKind,
    pub flags: SegmentFlags,
}

impl Default for Segment {
    #[inline]
    fn default() -> Self {
        Segment::none()
    }
}

impl Segment {
    #[inline]
    pub fn new(kind: SegmentKind) -> Self {
        Segment {
            kind,
            flags: SegmentFlags::empty(),
        }
    }

    #[inline]
    pub fn none() -> Self {
        Segment::new(SegmentKind::None)
    }

    #[inline]
    pub fn line(from: Point, to: Point) -> Self {
        Segment::new(SegmentKind::Line(LineSegment2F::new(from, to)))
    }

    #[inline]
    pub fn quadratic(from: Point, ctrl: Point, to: Point) -> Self {
        Segment::new(SegmentKind::Quadratic(QuadraticBezierSegment::new(from, ctrl, to)))
    }

    #[inline]
    pub fn cubic(from: Point, ctrl1: Point, ctrl2: Point, to: Point) -> Self {
        Segment::new(SegmentKind::Cubic(CubicBezierSegment::new(from, ctrl1, ctrl2, to)))
    }

    #[inline]
    pub fn with_flags(mut self, flags: SegmentFlags) -> Self {
        self.flags = flags;
        self
    }

    /// A quarter of the unit circle, from `(1, 0)` to `(0, 1)`.
    ///
    /// The control points sit on the tangents at the endpoints, so four rotated copies
    /// of this segment have exactly the bounds of the unit circle.
    pub fn quarter_arc() -> Self {
        let k = QUARTER_ARC_CONTROL_DISTANCE;
        Segment::cubic(point(1.0, 0.0), point(1.0, k), point(k, 1.0), point(0.0, 1.0))
    }

    /// An arc of the unit circle sweeping `angle` radians, centered on the positive x axis.
    ///
    /// The angle must be in `[0, π]`.
    #[inline]
    pub fn arc(angle: f32) -> Self {
        Segment::arc_from_cos(Float::cos(angle))
    }

    /// An arc of the unit circle whose sweep angle has the given cosine, centered on
    /// the positive x axis.
    ///
    /// The arc goes from below the x axis to above it. Sweeps so small that the cosine
    /// rounds to one produce a degenerate line at `(1, 0)`.
    pub fn arc_from_cos(cos_sweep_angle: f32) -> Self {
        if cos_sweep_angle >= 1.0 - ARC_COS_EPSILON {
            return Segment::line(point(1.0, 0.0), point(1.0, 0.0));
        }

        // The endpoints are at plus and minus half of the sweep angle.
        let half_cos = safe_sqrt(0.5 * (1.0 + cos_sweep_angle));
        let half_sin = safe_sqrt(0.5 * (1.0 - cos_sweep_angle));

        let ctrl_x = (4.0 - half_cos) / 3.0;
        let ctrl_y = (1.0 - half_cos) * (3.0 - half_cos) / (3.0 * half_sin);

        Segment::cubic(
            point(half_cos, -half_sin),
            point(ctrl_x, -ctrl_y),
            point(ctrl_x, ctrl_y),
            point(half_cos, half_sin),
        )
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        self.kind == SegmentKind::None
    }

    #[inline]
    pub fn is_line(&self) -> bool {
        matches!(self.kind, SegmentKind::Line(..))
    }

    #[inline]
    pub fn is_quadratic(&self) -> bool {
        matches!(self.kind, SegmentKind::Quadratic(..))
    }

    #[inline]
    pub fn is_cubic(&self) -> bool {
        matches!(self.kind, SegmentKind::Cubic(..))
    }

    /// The endpoints and control points in curve order. Empty for `None` segments.
    pub fn points(&self) -> ArrayVec<Point, 4> {
        let mut points = ArrayVec::new();
        match self.kind {
            SegmentKind::None => {}
            SegmentKind::Line(line) => {
                points.push(line.from);
                points.push(line.to);
            }
            SegmentKind::Quadratic(curve) => {
                points.push(curve.from);
                points.push(curve.ctrl);
                points.push(curve.to);
            }
            SegmentKind::Cubic(curve) => {
                points.push(curve.from);
                points.push(curve.ctrl1);
                points.push(curve.ctrl2);
                points.push(curve.to);
            }
        }

        points
    }

    /// The start point, or `None` for an empty segment.
    #[inline]
    pub fn from(&self) -> Option<Point> {
        match self.kind {
            SegmentKind::None => None,
            SegmentKind::Line(line) => Some(line.from),
            SegmentKind::Quadratic(curve) => Some(curve.from),
            SegmentKind::Cubic(curve) => Some(curve.from),
        }
    }

    /// The end point, or `None` for an empty segment.
    #[inline]
    pub fn to(&self) -> Option<Point> {
        match self.kind {
            SegmentKind::None => None,
            SegmentKind::Line(line) => Some(line.to),
            SegmentKind::Quadratic(curve) => Some(curve.to),
            SegmentKind::Cubic(curve) => Some(curve.to),
        }
    }

    /// The line between the endpoints, or `None` for an empty segment.
    #[inline]
    pub fn baseline(&self) -> Option<LineSegment2F> {
        Some(LineSegment2F::new(self.from()?, self.to()?))
    }

    /// Sample the segment at t (expecting t between 0 and 1).
    ///
    /// # Panics
    ///
    /// Panics if the segment is `None`.
    pub fn sample(&self, t: f32) -> Point {
        match self.kind {
            SegmentKind::None => panic!("cannot sample an empty segment"),
            SegmentKind::Line(line) => line.sample(t),
            SegmentKind::Quadratic(curve) => curve.sample(t),
            SegmentKind::Cubic(curve) => curve.sample(t),
        }
    }

    /// Splits the segment at `t`. Both halves keep the kind of this segment.
    ///
    /// Splitting an empty segment gives two empty segments.
    pub fn split(&self, t: f32) -> (Segment, Segment) {
        let (before, after) = match self.kind {
            SegmentKind::None => (SegmentKind::None, SegmentKind::None),
            SegmentKind::Line(line) => {
                let (a, b) = line.split(t);
                (SegmentKind::Line(a), SegmentKind::Line(b))
            }
            SegmentKind::Quadratic(curve) => {
                let (a, b) = curve.split(t);
                (SegmentKind::Quadratic(a), SegmentKind::Quadratic(b))
            }
            SegmentKind::Cubic(curve) => {
                let (a, b) = curve.split(t);
                (SegmentKind::Cubic(a), SegmentKind::Cubic(b))
            }
        };

        let mut before = Segment::new(before);
        let mut after = Segment::new(after);
        before.flags = self.flags & SegmentFlags::FIRST_IN_SUBPATH;
        after.flags = self.flags & SegmentFlags::CLOSES_SUBPATH;

        (before, after)
    }

    /// Converts the segment into an equivalent cubic bézier curve.
    ///
    /// Lines get their control points at one and two thirds. Empty segments stay empty.
    pub fn to_cubic(&self) -> Segment {
        let kind = match self.kind {
            SegmentKind::None => SegmentKind::None,
            SegmentKind::Line(line) => SegmentKind::Cubic(CubicBezierSegment::new(
                line.from,
                line.sample(1.0 / 3.0),
                line.sample(2.0 / 3.0),
                line.to,
            )),
            SegmentKind::Quadratic(curve) => SegmentKind::Cubic(curve.to_cubic()),
            SegmentKind::Cubic(curve) => SegmentKind::Cubic(curve),
        };

        Segment {
            kind,
            flags: self.flags,
        }
    }

    /// Swaps the beginning and the end of the segment.
    pub fn reversed(&self) -> Segment {
        let kind = match self.kind {
            SegmentKind::None => SegmentKind::None,
            SegmentKind::Line(line) => SegmentKind::Line(line.reversed()),
            SegmentKind::Quadratic(curve) => SegmentKind::Quadratic(curve.flip()),
            SegmentKind::Cubic(curve) => SegmentKind::Cubic(curve.flip()),
        };

        Segment {
            kind,
            flags: self.flags,
        }
    }

    /// Returns true if the curve can be drawn as a straight line within `tolerance`.
    ///
    /// Lines and empty segments are always flat.
    pub fn is_flat(&self, tolerance: f32) -> bool {
        match self.kind {
            SegmentKind::None | SegmentKind::Line(..) => true,
            SegmentKind::Quadratic(curve) => curve.is_flat(tolerance),
            SegmentKind::Cubic(curve) => curve.is_flat(tolerance),
        }
    }

    /// Returns true if the control polygon is so short that the segment can be dropped.
    pub fn is_tiny(&self) -> bool {
        let points = self.points();
        let mut sum = 0.0;
        for pair in points.windows(2) {
            sum += (pair[1] - pair[0]).square_length();
        }

        sum < TINY_SEGMENT_EPSILON
    }

    /// Applies the transform to this segment and returns the results.
    pub fn transformed<T: Transformation>(&self, transform: &T) -> Segment {
        let kind = match self.kind {
            SegmentKind::None => SegmentKind::None,
            SegmentKind::Line(line) => SegmentKind::Line(line.transformed(transform)),
            SegmentKind::Quadratic(curve) => SegmentKind::Quadratic(curve.transformed(transform)),
            SegmentKind::Cubic(curve) => SegmentKind::Cubic(curve.transformed(transform)),
        };

        Segment {
            kind,
            flags: self.flags,
        }
    }

    /// The smallest x of the control polygon, `+∞` for empty segments.
    pub fn min_x(&self) -> f32 {
        self.points().iter().fold(f32::INFINITY, |acc, p| acc.min(p.x))
    }

    /// The largest x of the control polygon, `-∞` for empty segments.
    pub fn max_x(&self) -> f32 {
        self.points().iter().fold(f32::NEG_INFINITY, |acc, p| acc.max(p.x))
    }

    /// The smallest y of the control polygon, `+∞` for empty segments.
    pub fn min_y(&self) -> f32 {
        self.points().iter().fold(f32::INFINITY, |acc, p| acc.min(p.y))
    }

    /// The largest y of the control polygon, `-∞` for empty segments.
    pub fn max_y(&self) -> f32 {
        self.points().iter().fold(f32::NEG_INFINITY, |acc, p| acc.max(p.y))
    }

    /// The bounds of the control polygon, which contain the curve.
    pub fn fast_bounds(&self) -> Option<RectF> {
        let points = self.points();
        let (first, rest) = points.split_first()?;
        let mut rect = RectF::new(*first, *first);
        for p in rest {
            rect = rect.union_point(*p);
        }

        Some(rect)
    }
}

impl From<LineSegment2F> for Segment {
    #[inline]
    fn from(line: LineSegment2F) -> Self {
        Segment::new(SegmentKind::Line(line))
    }
}

impl From<QuadraticBezierSegment> for Segment {
    #[inline]
    fn from(curve: QuadraticBezierSegment) -> Self {
        Segment::new(SegmentKind::Quadratic(curve))
    }
}

impl From<CubicBezierSegment> for Segment {
    #[inline]
    fn from(curve: CubicBezierSegment) -> Self {
        Segment::new(SegmentKind::Cubic(curve))
    }
}

#[cfg(test)]
use crate::utils::{approx_eq, approx_eq_point};
#[cfg(test)]
use crate::{vector, Transform2F};

#[test]
fn points_by_kind() {
    assert!(Segment::none().points().is_empty());
    assert_eq!(Segment::line(point(0.0, 0.0), point(1.0, 1.0)).points().len(), 2);
    assert_eq!(
        Segment::quadratic(point(0.0, 0.0), point(1.0, 1.0), point(2.0, 0.0)).points().len(),
        3
    );
    assert_eq!(Segment::quarter_arc().points().len(), 4);
    assert!(Segment::none().from().is_none());
    assert_eq!(Segment::quarter_arc().to(), Some(point(0.0, 1.0)));
}

#[test]
fn quarter_arc_stays_close_to_the_circle() {
    let arc = Segment::quarter_arc();
    for i in 0..=16 {
        let p = arc.sample(i as f32 / 16.0);
        let radius = Float::sqrt(p.to_vector().square_length());
        assert!(Float::abs(radius - 1.0) < 5e-4, "radius {} at step {}", radius, i);
    }
}

#[test]
fn arc_from_cos_is_symmetric() {
    for &angle in &[0.3f32, 1.0, core::f32::consts::FRAC_PI_2, 2.5, core::f32::consts::PI] {
        let arc = Segment::arc(angle);
        let points = arc.points();
        assert_eq!(points.len(), 4);

        let from = points[0];
        let to = points[3];
        assert!(approx_eq_point(from, point(to.x, -to.y), 1e-6));
        assert!(approx_eq(Float::atan2(to.y, to.x) * 2.0, angle));

        // The middle of the arc is on the positive x axis.
        let mid = arc.sample(0.5);
        assert!(approx_eq_point(mid, point(1.0, 0.0), 2e-3), "{:?} for {}", mid, angle);
    }
}

#[test]
fn quarter_arc_matches_centered_right_angle_arc() {
    let centered = Segment::arc_from_cos(0.0);
    let rotated = Segment::quarter_arc()
        .transformed(&Transform2F::from_rotation(-core::f32::consts::FRAC_PI_4));

    let a = centered.points();
    let b = rotated.points();
    for i in 0..4 {
        assert!(approx_eq_point(a[i], b[i], 1e-5), "{:?} != {:?}", a[i], b[i]);
    }
}

#[test]
fn tiny_sweep_collapses() {
    let arc = Segment::arc_from_cos(0.99995);
    assert!(arc.is_line());
    assert_eq!(arc.points().as_slice(), &[point(1.0, 0.0), point(1.0, 0.0)]);
    assert!(arc.is_tiny());
}

#[test]
fn split_keeps_flags_at_the_ends() {
    let s = Segment::line(point(0.0, 0.0), point(4.0, 0.0))
        .with_flags(SegmentFlags::FIRST_IN_SUBPATH | SegmentFlags::CLOSES_SUBPATH);
    let (a, b) = s.split(0.25);

    assert_eq!(a.to(), Some(point(1.0, 0.0)));
    assert_eq!(b.from(), Some(point(1.0, 0.0)));
    assert_eq!(a.flags, SegmentFlags::FIRST_IN_SUBPATH);
    assert_eq!(b.flags, SegmentFlags::CLOSES_SUBPATH);

    let (n0, n1) = Segment::none().split(0.5);
    assert!(n0.is_none() && n1.is_none());
}

#[test]
fn line_to_cubic() {
    let c = Segment::line(point(0.0, 0.0), point(3.0, 6.0)).to_cubic();
    assert!(c.is_cubic());

    let points = c.points();
    assert!(approx_eq_point(points[1], point(1.0, 2.0), 1e-6));
    assert!(approx_eq_point(points[2], point(2.0, 4.0), 1e-6));
    assert!(Segment::none().to_cubic().is_none());
}

#[test]
fn reversed_and_extents() {
    let s = Segment::cubic(point(0.0, 0.0), point(-1.0, 2.0), point(3.0, 5.0), point(2.0, 1.0));
    let r = s.reversed();

    assert_eq!(r.from(), Some(point(2.0, 1.0)));
    assert_eq!(r.to(), Some(point(0.0, 0.0)));
    assert_eq!(s.min_x(), -1.0);
    assert_eq!(s.max_x(), 3.0);
    assert_eq!(s.min_y(), 0.0);
    assert_eq!(s.max_y(), 5.0);
    assert_eq!(
        s.fast_bounds(),
        Some(RectF::new(point(-1.0, 0.0), point(3.0, 5.0)))
    );

    assert_eq!(Segment::none().min_x(), f32::INFINITY);
    assert_eq!(Segment::none().max_y(), f32::NEG_INFINITY);
    assert!(Segment::none().fast_bounds().is_none());
}

#[test]
fn flat_and_tiny() {
    assert!(Segment::none().is_flat(0.0));
    assert!(Segment::line(point(0.0, 0.0), point(5.0, 5.0)).is_flat(0.0));
    assert!(!Segment::quarter_arc().is_flat(0.1));

    assert!(Segment::line(point(0.0, 0.0), point(0.01, 0.01)).is_tiny());
    assert!(!Segment::line(point(0.0, 0.0), point(0.1, 0.0)).is_tiny());
}

#[test]
fn transform_keeps_flags() {
    let s = Segment::quarter_arc().with_flags(SegmentFlags::FIRST_IN_SUBPATH);
    let t = s.transformed(&Transform2F::from_translation(vector(1.0, 1.0)));

    assert_eq!(t.flags, SegmentFlags::FIRST_IN_SUBPATH);
    assert_eq!(t.from(), Some(point(2.0, 1.0)));
}

#[test]
fn segment_flag_set() {
    let both = SegmentFlags::FIRST_IN_SUBPATH | SegmentFlags::CLOSES_SUBPATH;
    assert_eq!(both, SegmentFlags::all());
    assert_eq!(both - SegmentFlags::CLOSES_SUBPATH, SegmentFlags::FIRST_IN_SUBPATH);
    assert_eq!(SegmentFlags::from_bits_truncate(0xff), both);
    assert!(Segment::none().flags.is_empty());
}
