use bitflags::bitflags;
use crate::geom::tolerance::{ARC_SWEEP_EPSILON, MITER_EPSILON, ROUNDED_RECT_RADIUS_EPSILON};
use crate::geom::utils::safe_sqrt;
use crate::geom::{
    point, vector, LineSegment2F, Matrix2x2F, Point, RectF, Segment, SegmentFlags, SegmentKind,
    Transform2F, UnitVector, Vector,
};
use crate::orientation::Orientation;

use std::f32::consts::TAU;
use std::fmt;
use std::ops::{Index, IndexMut};

/// The role of a point in the bézier chain of a contour.
///
/// Runs of points are grouped as `[control point]*, endpoint`: a line is a single
/// endpoint, a quadratic curve a `ControlPoint0` followed by an endpoint and a cubic
/// curve a `ControlPoint0`, a `ControlPoint1` then an endpoint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum PointKind {
    Endpoint = 0,
    ControlPoint0 = 1,
    ControlPoint1 = 2,
}

impl PointKind {
    #[inline]
    pub fn is_endpoint(self) -> bool {
        self == PointKind::Endpoint
    }

    #[inline]
    pub fn is_control_point(self) -> bool {
        self != PointKind::Endpoint
    }
}

/// A point of a contour.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ContourPoint {
    pub position: Point,
    pub kind: PointKind,
}

impl ContourPoint {
    #[inline]
    pub fn new(position: Point, kind: PointKind) -> Self {
        ContourPoint { position, kind }
    }
}

/// The direction of an arc: clockwise or counterclockwise.
///
/// With y pointing down, clockwise is the direction of increasing angles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum ArcDirection {
    /// Clockwise, starting from the +x axis.
    CW,
    /// Counterclockwise, starting from the +x axis.
    CCW,
}

bitflags! {
    /// Flags that control the behavior of `Contour::push_segment()`.
    pub struct PushSegmentFlags: u8 {
        /// Whether the bounding box should be updated to include the new points.
        const UPDATE_BOUNDS = 0x01;
        /// Whether the starting point of the segment should be pushed too.
        const INCLUDE_FROM_POINT = 0x02;
    }
}

bitflags! {
    /// Flags that control the behavior of `Contour::iter()`.
    pub struct ContourIterFlags: u8 {
        /// Skip the implicit line joining the last point to the first one in closed contours.
        const IGNORE_CLOSE_SEGMENT = 0x01;
    }
}

/// One connected sub-path: a chain of lines and bézier curves stored as tagged points.
///
/// The contour keeps the bounding box of the points that were pushed with bounds
/// tracking enabled, which all the high level builders do.
#[derive(Clone, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Contour {
    points: Vec<ContourPoint>,
    // `None` until a point is pushed with bounds tracking.
    bounds: Option<RectF>,
    closed: bool,
}

impl Contour {
    /// Creates a new empty unclosed contour.
    #[inline]
    pub fn new() -> Contour {
        Contour::default()
    }

    /// Creates a new empty unclosed contour with space preallocated for the given number of
    /// points.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Contour {
        Contour {
            points: Vec::with_capacity(capacity),
            bounds: None,
            closed: false,
        }
    }

    /// Creates a closed contour following the corners of `rect`, clockwise on screen
    /// starting from the minimum corner.
    pub fn from_rect(rect: &RectF) -> Contour {
        let mut contour = Contour::with_capacity(4);
        contour.push_point(rect.min(), PointKind::Endpoint, false);
        contour.push_point(rect.upper_right(), PointKind::Endpoint, false);
        contour.push_point(rect.max(), PointKind::Endpoint, false);
        contour.push_point(rect.lower_left(), PointKind::Endpoint, false);
        contour.close();
        contour.bounds = Some(*rect);
        contour
    }

    /// Creates a closed contour following `rect` with elliptical corners.
    ///
    /// The radii are clamped to half the size of the rectangle. Corners whose radii are
    /// both close to zero make a plain rectangle.
    pub fn from_rect_rounded(rect: &RectF, radius: Vector) -> Contour {
        // Distance from the corner to the control points, for a unit radius.
        const QUARTER_ARC_CP_FROM_OUTSIDE: f32 = (3.0 - 4.0 * (std::f32::consts::SQRT_2 - 1.0)) / 3.0;

        if radius.x.abs() < ROUNDED_RECT_RADIUS_EPSILON
            && radius.y.abs() < ROUNDED_RECT_RADIUS_EPSILON
        {
            debug!("rounded rect radius {:?} is zero, using square corners", radius);
            return Contour::from_rect(rect);
        }

        let half_size = rect.size().to_vector() * 0.5;
        let radius = radius.abs().min(half_size);
        let cp_offset = radius * QUARTER_ARC_CP_FROM_OUTSIDE;

        let mut contour = Contour::with_capacity(16);

        // Upper left corner.
        {
            let p0 = rect.min();
            let p1 = p0 + cp_offset;
            let p2 = p0 + radius;
            contour.push_endpoint(point(p0.x, p2.y));
            contour.push_cubic(point(p0.x, p1.y), point(p1.x, p0.y), point(p2.x, p0.y));
        }

        // Upper right corner.
        {
            let p0 = rect.upper_right();
            let p1 = p0 + vector(-cp_offset.x, cp_offset.y);
            let p2 = p0 + vector(-radius.x, radius.y);
            contour.push_endpoint(point(p2.x, p0.y));
            contour.push_cubic(point(p1.x, p0.y), point(p0.x, p1.y), point(p0.x, p2.y));
        }

        // Lower right corner.
        {
            let p0 = rect.max();
            let p1 = p0 - cp_offset;
            let p2 = p0 - radius;
            contour.push_endpoint(point(p0.x, p2.y));
            contour.push_cubic(point(p0.x, p1.y), point(p1.x, p0.y), point(p2.x, p0.y));
        }

        // Lower left corner.
        {
            let p0 = rect.lower_left();
            let p1 = p0 + vector(cp_offset.x, -cp_offset.y);
            let p2 = p0 + vector(radius.x, -radius.y);
            contour.push_endpoint(point(p2.x, p0.y));
            contour.push_cubic(point(p1.x, p0.y), point(p0.x, p1.y), point(p0.x, p2.y));
        }

        contour.close();
        contour
    }

    /// Returns true if this contour has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the number of points (including on-curve and control points) in this contour.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns the dimensions of an axis-aligned rectangle that encloses this contour.
    ///
    /// Meaningless for empty contours.
    #[inline]
    pub fn bounds(&self) -> RectF {
        self.bounds.unwrap_or_default()
    }

    /// Returns true if this contour is closed.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[inline]
    pub fn points(&self) -> &[ContourPoint] {
        &self.points
    }

    #[inline]
    pub fn first(&self) -> Option<&ContourPoint> {
        self.points.first()
    }

    #[inline]
    pub fn last(&self) -> Option<&ContourPoint> {
        self.points.last()
    }

    /// Returns the position of the point (which can be an on-curve point or a control point) with
    /// the given index.
    ///
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn position_of(&self, index: usize) -> Point {
        self.points[index].position
    }

    /// Returns the position of the first point in this contour.
    #[inline]
    pub fn first_position(&self) -> Option<Point> {
        self.points.first().map(|p| p.position)
    }

    /// Returns the position of the last point in this contour.
    #[inline]
    pub fn last_position(&self) -> Option<Point> {
        self.points.last().map(|p| p.position)
    }

    /// Returns true if the given point is on-curve or false if it is off-curve.
    ///
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn point_is_endpoint(&self, index: usize) -> bool {
        self.points[index].kind.is_endpoint()
    }

    /// Removes all points and reopens the contour.
    #[inline]
    pub fn clear(&mut self) {
        self.points.clear();
        self.bounds = None;
        self.closed = false;
    }

    /// Marks the contour as closed. Closing twice has no effect.
    #[inline]
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Pushes a new point with the given kind.
    ///
    /// If `update_bounds` is set, the bounding box grows to include the point; the first
    /// tracked point of the contour resets it.
    #[inline]
    pub fn push_point(&mut self, position: Point, kind: PointKind, update_bounds: bool) {
        debug_assert!(!position.x.is_nan() && !position.y.is_nan());

        if update_bounds {
            self.bounds = Some(match self.bounds {
                Some(bounds) => bounds.union_point(position),
                None => RectF::new(position, position),
            });
        }

        self.points.push(ContourPoint::new(position, kind));
    }

    /// Adds a new on-curve point at the given position to this contour.
    #[inline]
    pub fn push_endpoint(&mut self, to: Point) {
        self.push_point(to, PointKind::Endpoint, true);
    }

    /// Adds a new quadratic bézier curve to the given on-curve position and control point to
    /// this contour.
    #[inline]
    pub fn push_quadratic(&mut self, ctrl: Point, to: Point) {
        self.push_point(ctrl, PointKind::ControlPoint0, true);
        self.push_point(to, PointKind::Endpoint, true);
    }

    /// Adds a new cubic bézier curve to the given on-curve position and control points to this
    /// contour.
    #[inline]
    pub fn push_cubic(&mut self, ctrl0: Point, ctrl1: Point, to: Point) {
        self.push_point(ctrl0, PointKind::ControlPoint0, true);
        self.push_point(ctrl1, PointKind::ControlPoint1, true);
        self.push_point(to, PointKind::Endpoint, true);
    }

    /// Adds the points of a segment to this contour.
    ///
    /// The start point of the segment is normally already the last point of the contour,
    /// so it is only pushed with `INCLUDE_FROM_POINT`. Empty segments are ignored.
    pub fn push_segment(&mut self, segment: &Segment, flags: PushSegmentFlags) {
        if segment.is_none() {
            return;
        }

        let update_bounds = flags.contains(PushSegmentFlags::UPDATE_BOUNDS);
        let points = segment.points();
        let last = points.len() - 1;

        if flags.contains(PushSegmentFlags::INCLUDE_FROM_POINT) {
            self.push_point(points[0], PointKind::Endpoint, update_bounds);
        }

        for (index, position) in points[1..last].iter().enumerate() {
            let kind = if index == 0 {
                PointKind::ControlPoint0
            } else {
                PointKind::ControlPoint1
            };
            self.push_point(*position, kind, update_bounds);
        }

        self.push_point(points[last], PointKind::Endpoint, update_bounds);
    }

    /// Adds an ellipse to this contour.
    ///
    /// The ellipse is the unit circle mapped by `transform`, made of four quarter arcs
    /// starting and ending at the image of `(1, 0)`.
    pub fn push_ellipse(&mut self, transform: &Transform2F) {
        let quarter_turn = UnitVector(vector(0.0, 1.0));
        let mut rotation = UnitVector(vector(1.0, 0.0));

        for segment_index in 0..4 {
            let segment = Segment::quarter_arc()
                .transformed(&transform.then_after(&Transform2F::from_rotation_vector(rotation)));

            let mut flags = PushSegmentFlags::UPDATE_BOUNDS;
            if segment_index == 0 && self.needs_start_point(&segment) {
                flags.insert(PushSegmentFlags::INCLUDE_FROM_POINT);
            }
            self.push_segment(&segment, flags);

            rotation = rotation.rotate_by(quarter_turn);
        }
    }

    /// Adds an arc of the unit circle mapped by `transform`, from `start_angle` to
    /// `end_angle` radians.
    ///
    /// Sweeps of a full turn or more add a whole ellipse.
    pub fn push_arc(
        &mut self,
        transform: &Transform2F,
        start_angle: f32,
        end_angle: f32,
        direction: ArcDirection,
    ) {
        if end_angle - start_angle >= TAU {
            self.push_ellipse(transform);
            return;
        }

        let start = UnitVector::from_angle(start_angle).0.to_point();
        let end = UnitVector::from_angle(end_angle).0.to_point();
        self.push_arc_from_unit_chord(transform, LineSegment2F::new(start, end), direction);
    }

    /// Adds an arc of the unit circle mapped by `transform`, going from the direction of
    /// `chord.from` to the direction of `chord.to`.
    ///
    /// The arc is split into at most four cubic curves of at most a quarter turn each.
    pub fn push_arc_from_unit_chord(
        &mut self,
        transform: &Transform2F,
        mut chord: LineSegment2F,
        direction: ArcDirection,
    ) {
        // Counterclockwise arcs are built clockwise in a mirrored space.
        let mut direction_transform = Transform2F::identity();
        if direction == ArcDirection::CCW {
            chord *= vector(1.0, -1.0);
            direction_transform = Transform2F::from_scale(vector(1.0, -1.0));
        }
        let transform = transform.then_after(&direction_transform);

        let quarter_turn = UnitVector(vector(0.0, 1.0));
        let mut current = UnitVector::normalize(chord.from.to_vector());
        let end = UnitVector::normalize(chord.to.to_vector());

        for segment_index in 0..4 {
            let sweep = end.rev_rotate_by(current);
            let last = sweep.0.x >= -ARC_SWEEP_EPSILON && sweep.0.y >= -ARC_SWEEP_EPSILON;
            trace!(
                "arc step {}: direction {:?}, remaining sweep {:?}, last: {}",
                segment_index,
                current.0,
                sweep.0,
                last
            );

            let (segment, rotation) = if last {
                let rotation = sweep.halve_angle().rotate_by(current);
                (Segment::arc_from_cos(sweep.0.x), rotation)
            } else {
                (Segment::quarter_arc(), current)
            };
            let segment = segment
                .transformed(&transform.then_after(&Transform2F::from_rotation_vector(rotation)));

            if segment.is_line() {
                // The remaining sweep rounds to nothing.
                if segment_index == 0 && self.needs_start_point(&segment) {
                    if let Some(to) = segment.to() {
                        self.push_endpoint(to);
                    }
                }
                break;
            }

            let mut flags = PushSegmentFlags::UPDATE_BOUNDS;
            if segment_index == 0 && self.needs_start_point(&segment) {
                flags.insert(PushSegmentFlags::INCLUDE_FROM_POINT);
            }
            self.push_segment(&segment, flags);

            if last {
                break;
            }

            current = current.rotate_by(quarter_turn);
        }
    }

    /// Adds an elliptical arc following the SVG path `A` command semantics, from the last
    /// point of the contour (or the origin if it is empty) to `to`.
    ///
    /// `x_axis_rotation` is in radians. A line is drawn when a radius is zero or not finite
    /// and nothing is drawn when both endpoints coincide.
    ///
    /// Radii too small to span the endpoints are not scaled up: the ellipse is centered
    /// on the middle of the chord instead and the arc stops short of `to`.
    pub fn push_svg_arc(
        &mut self,
        radius: Vector,
        x_axis_rotation: f32,
        large_arc: bool,
        direction: ArcDirection,
        to: Point,
    ) {
        let from = self.last_position().unwrap_or_else(Point::origin);

        if !radius.x.is_finite() || !radius.y.is_finite() {
            debug!("svg arc radius {:?} is not finite, drawing a line to {:?}", radius, to);
            self.push_endpoint(to);
            return;
        }

        let radius = radius.abs();
        if radius.x == 0.0 || radius.y == 0.0 {
            debug!("svg arc radius {:?} is zero, drawing a line to {:?}", radius, to);
            self.push_endpoint(to);
            return;
        }

        if from == to {
            debug!("svg arc endpoints coincide at {:?}, skipping", to);
            return;
        }

        let rotation = Matrix2x2F::from_rotation(x_axis_rotation);
        let midpoint = from.lerp(to, 0.5).to_vector();

        // Half of the chord, in the frame of the ellipse axes.
        let q = rotation.transpose() * ((from - to) * 0.5);
        let q2 = q.component_mul(q);
        let gamma = q2.x / (radius.x * radius.x) + q2.y / (radius.y * radius.y);

        let (center, s) = if gamma <= 1.0 {
            let r2 = radius.component_mul(radius);
            let rq2 = r2.x * q2.y + r2.y * q2.x;
            let factor = if rq2 > 0.0 {
                safe_sqrt((r2.x * r2.y - rq2) / rq2)
            } else {
                0.0
            };
            let sign = if large_arc != (direction == ArcDirection::CW) {
                1.0
            } else {
                -1.0
            };

            let s = vector(radius.x * q.y / radius.y, -radius.y * q.x / radius.x) * (factor * sign);
            (rotation * s + midpoint, s)
        } else {
            // The radii are kept as is, so the arc does not reach the endpoints.
            debug!(
                "svg arc radius {:?} is too small for the endpoints, centering it on {:?}",
                radius, midpoint
            );
            (midpoint, Vector::zero())
        };

        let a = (q - s).component_div(radius);
        let b = -(q + s).component_div(radius);

        let transform = Transform2F::new(rotation, center).then_after(&Transform2F::from_scale(radius));
        self.push_arc_from_unit_chord(
            &transform,
            LineSegment2F::new(a.to_point(), b.to_point()),
            direction,
        );
    }

    /// Applies the given affine transform to this contour and recomputes its bounds.
    pub fn transform(&mut self, transform: &Transform2F) {
        if transform.is_identity() {
            return;
        }

        for point in &mut self.points {
            point.position = transform.apply_point(point.position);
        }

        self.recompute_bounds();
    }

    /// Applies the given affine transform to this contour, returning a new contour instead of
    /// mutating this one.
    #[inline]
    pub fn transformed(mut self, transform: &Transform2F) -> Contour {
        self.transform(transform);
        self
    }

    /// Thickens the contour by `amount` along each axis, or thins it for negative amounts.
    ///
    /// Every point, control points included, is treated as a vertex of the polygon closing
    /// the contour and moves to the corner of its offset edges. `orientation` tells which
    /// side of the edges is the outside.
    pub fn dilate(&mut self, amount: Vector, orientation: Orientation) {
        if self.points.is_empty() || amount == Vector::zero() {
            return;
        }

        let positions: Vec<Point> = self.points.iter().map(|p| p.position).collect();
        let len = positions.len();

        for (index, point) in self.points.iter_mut().enumerate() {
            let position = positions[index];
            // Coincident neighbours have no direction, look past them.
            let prev = (1..len)
                .map(|i| positions[(index + len - i) % len])
                .find(|p| *p != position);
            let next = (1..len)
                .map(|i| positions[(index + i) % len])
                .find(|p| *p != position);

            if let (Some(prev), Some(next)) = (prev, next) {
                let offset = miter_offset(position - prev, next - position, orientation);
                point.position = position + offset.component_mul(amount);
            }
        }

        if self.bounds.is_some() {
            self.recompute_bounds();
        }
    }

    /// Iterates over the segments of this contour, including the implicit closing line
    /// of closed contours.
    #[inline]
    pub fn segments(&self) -> SegmentIter<'_> {
        self.iter(ContourIterFlags::empty())
    }

    #[inline]
    pub fn iter(&self, flags: ContourIterFlags) -> SegmentIter<'_> {
        SegmentIter {
            contour: self,
            index: 1,
            include_close_segment: self.closed
                && !flags.contains(ContourIterFlags::IGNORE_CLOSE_SEGMENT),
        }
    }

    /// Returns the segment starting at the endpoint with the given index, wrapping around
    /// the end of the contour.
    ///
    /// Panics if the index is out of bounds.
    pub fn segment_after(&self, point_index: usize) -> Segment {
        debug_assert!(self.point_is_endpoint(point_index));

        let len = self.points.len();
        let from = self.position_of(point_index);
        let index1 = (point_index + 1) % len;
        if self.point_is_endpoint(index1) {
            return Segment::line(from, self.position_of(index1));
        }

        let index2 = (point_index + 2) % len;
        if self.point_is_endpoint(index2) {
            return Segment::quadratic(from, self.position_of(index1), self.position_of(index2));
        }

        let index3 = (point_index + 3) % len;
        Segment::cubic(
            from,
            self.position_of(index1),
            self.position_of(index2),
            self.position_of(index3),
        )
    }

    fn recompute_bounds(&mut self) {
        let mut positions = self.points.iter().map(|p| p.position);
        self.bounds = positions
            .next()
            .map(|first| positions.fold(RectF::new(first, first), |rect, p| rect.union_point(p)));
    }

    // An arc only needs its start point when it does not continue the contour.
    fn needs_start_point(&self, segment: &Segment) -> bool {
        match (self.last_position(), segment.from()) {
            (Some(last), Some(from)) => !LineSegment2F::new(last, from).is_zero_length(),
            (None, Some(_)) => true,
            (_, None) => false,
        }
    }
}

// Displacement of a vertex for a unit dilation: the intersection of both edges pushed
// out by one along their normals.
fn miter_offset(incoming: Vector, outgoing: Vector, orientation: Orientation) -> Vector {
    let n0 = outward_normal(incoming.normalize(), orientation);
    let n1 = outward_normal(outgoing.normalize(), orientation);
    let denominator = 1.0 + n0.dot(n1);
    if denominator < MITER_EPSILON {
        return n1;
    }

    (n0 + n1) / denominator
}

#[inline]
fn outward_normal(direction: Vector, orientation: Orientation) -> Vector {
    match orientation {
        Orientation::Cw => vector(direction.y, -direction.x),
        Orientation::Ccw => vector(-direction.y, direction.x),
    }
}

impl Index<usize> for Contour {
    type Output = ContourPoint;
    #[inline]
    fn index(&self, index: usize) -> &ContourPoint {
        &self.points[index]
    }
}

impl IndexMut<usize> for Contour {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut ContourPoint {
        &mut self.points[index]
    }
}

impl fmt::Debug for Contour {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        for (segment_index, segment) in self
            .iter(ContourIterFlags::IGNORE_CLOSE_SEGMENT)
            .enumerate()
        {
            if segment_index == 0 {
                if let Some(from) = segment.from() {
                    write!(formatter, "M {} {}", from.x, from.y)?;
                }
            }

            match segment.kind {
                SegmentKind::None => {}
                SegmentKind::Line(line) => {
                    write!(formatter, " L {} {}", line.to.x, line.to.y)?;
                }
                SegmentKind::Quadratic(curve) => {
                    write!(
                        formatter,
                        " Q {} {} {} {}",
                        curve.ctrl.x, curve.ctrl.y, curve.to.x, curve.to.y
                    )?;
                }
                SegmentKind::Cubic(curve) => {
                    write!(
                        formatter,
                        " C {} {} {} {} {} {}",
                        curve.ctrl1.x,
                        curve.ctrl1.y,
                        curve.ctrl2.x,
                        curve.ctrl2.y,
                        curve.to.x,
                        curve.to.y
                    )?;
                }
            }
        }

        if self.points.len() == 1 {
            let p = self.points[0].position;
            write!(formatter, "M {} {}", p.x, p.y)?;
        }

        if self.closed {
            write!(formatter, " Z")?;
        }

        Ok(())
    }
}

/// Iterates over the segments of a contour.
///
/// The first segment has the `FIRST_IN_SUBPATH` flag and the implicit closing line of a
/// closed contour has the `CLOSES_SUBPATH` flag.
pub struct SegmentIter<'a> {
    contour: &'a Contour,
    index: usize,
    include_close_segment: bool,
}

impl<'a> Iterator for SegmentIter<'a> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        let contour = self.contour;
        let len = contour.len();

        if (self.index == len && !self.include_close_segment) || self.index >= len + 1 {
            return None;
        }

        let mut flags = SegmentFlags::empty();
        if self.index == 1 {
            flags.insert(SegmentFlags::FIRST_IN_SUBPATH);
        }

        let point0 = contour.position_of(self.index - 1);
        if self.index == len {
            self.index += 1;
            flags.insert(SegmentFlags::CLOSES_SUBPATH);
            let point1 = contour.position_of(0);
            return Some(Segment::line(point0, point1).with_flags(flags));
        }

        let point1_index = self.index;
        self.index += 1;
        let point1 = contour.position_of(point1_index);
        if contour.point_is_endpoint(point1_index) {
            return Some(Segment::line(point0, point1).with_flags(flags));
        }

        // A contour ending with control points has no endpoint to finish the curve.
        let point2_index = self.index;
        if point2_index >= len {
            self.index = len + 1;
            return None;
        }
        let point2 = contour.position_of(point2_index);
        self.index += 1;
        if contour.point_is_endpoint(point2_index) {
            return Some(Segment::quadratic(point0, point1, point2).with_flags(flags));
        }

        let point3_index = self.index;
        if point3_index >= len {
            self.index = len + 1;
            return None;
        }
        let point3 = contour.position_of(point3_index);
        self.index += 1;
        debug_assert!(contour.point_is_endpoint(point3_index));
        Some(Segment::cubic(point0, point1, point2, point3).with_flags(flags))
    }
}

#[cfg(test)]
use crate::geom::utils::approx_eq_point;

#[cfg(test)]
fn positions(contour: &Contour) -> Vec<Point> {
    contour.points().iter().map(|p| p.position).collect()
}

#[test]
fn rect_contour() {
    let rect = RectF::new(point(1.0, 2.0), point(4.0, 6.0));
    let contour = Contour::from_rect(&rect);

    assert!(contour.is_closed());
    assert_eq!(contour.bounds(), rect);
    assert_eq!(
        positions(&contour),
        vec![point(1.0, 2.0), point(4.0, 2.0), point(4.0, 6.0), point(1.0, 6.0)]
    );
    assert!(contour.points().iter().all(|p| p.kind.is_endpoint()));
}

#[test]
fn rounded_rect_with_zero_radius_is_a_rect() {
    let rect = RectF::new(point(0.0, 0.0), point(10.0, 5.0));
    assert_eq!(
        Contour::from_rect_rounded(&rect, vector(0.0, 0.0)),
        Contour::from_rect(&rect)
    );
    assert_eq!(
        Contour::from_rect_rounded(&rect, vector(0.00005, -0.00005)),
        Contour::from_rect(&rect)
    );
}

#[test]
fn rounded_rect() {
    let rect = RectF::new(point(0.0, 0.0), point(10.0, 4.0));
    let contour = Contour::from_rect_rounded(&rect, vector(1.0, 8.0));

    assert_eq!(contour.len(), 16);
    assert!(contour.is_closed());
    assert_eq!(contour.bounds(), rect);

    // The vertical radius is clamped to half the height.
    assert_eq!(contour.position_of(0), point(0.0, 2.0));
    assert_eq!(contour.position_of(3), point(1.0, 0.0));
    assert_eq!(contour[1].kind, PointKind::ControlPoint0);
    assert_eq!(contour[2].kind, PointKind::ControlPoint1);
    assert_eq!(contour[4].kind, PointKind::Endpoint);
}

#[test]
fn bounds_follow_tracked_points() {
    let mut contour = Contour::new();
    contour.push_endpoint(point(3.0, 3.0));
    assert_eq!(contour.bounds(), RectF::new(point(3.0, 3.0), point(3.0, 3.0)));

    contour.push_quadratic(point(5.0, -1.0), point(4.0, 2.0));
    assert_eq!(contour.bounds(), RectF::new(point(3.0, -1.0), point(5.0, 3.0)));

    contour.push_point(point(100.0, 100.0), PointKind::Endpoint, false);
    assert_eq!(contour.bounds(), RectF::new(point(3.0, -1.0), point(5.0, 3.0)));
    assert_eq!(contour.len(), 4);
}

#[test]
fn untracked_points_do_not_seed_bounds() {
    let mut contour = Contour::new();
    contour.push_point(point(10.0, 10.0), PointKind::Endpoint, false);
    assert_eq!(contour.bounds(), RectF::default());

    contour.push_endpoint(point(20.0, 20.0));
    contour.push_endpoint(point(30.0, 25.0));
    assert_eq!(contour.bounds(), RectF::new(point(20.0, 20.0), point(30.0, 25.0)));

    contour.clear();
    contour.push_point(point(-4.0, 2.0), PointKind::Endpoint, false);
    contour.push_endpoint(point(-2.0, 3.0));
    assert_eq!(contour.bounds(), RectF::new(point(-2.0, 3.0), point(-2.0, 3.0)));
}

#[test]
fn dilate_circle() {
    let mut contour = Contour::new();
    contour.push_ellipse(&Transform2F::identity());
    contour.close();
    contour.dilate(vector(1.0, 1.0), Orientation::Cw);

    let bounds = contour.bounds();
    assert!(approx_eq_point(bounds.min(), point(-2.0, -2.0), 1e-4), "{:?}", bounds);
    assert!(approx_eq_point(bounds.max(), point(2.0, 2.0), 1e-4), "{:?}", bounds);
    assert!(approx_eq_point(contour.position_of(0), point(2.0, 0.0), 1e-4));
    assert_eq!(contour.first_position(), contour.last_position());

    // Dilating with the wrong orientation shrinks it instead.
    contour.dilate(vector(1.0, 1.0), Orientation::Ccw);
    assert!(approx_eq_point(contour.position_of(0), point(1.0, 0.0), 1e-4));
}

#[test]
fn dilate_skips_degenerate_contours() {
    let mut single = Contour::new();
    single.push_endpoint(point(3.0, 4.0));
    single.push_endpoint(point(3.0, 4.0));
    single.dilate(vector(5.0, 5.0), Orientation::Cw);
    assert_eq!(single.position_of(0), point(3.0, 4.0));
    assert_eq!(single.bounds(), RectF::new(point(3.0, 4.0), point(3.0, 4.0)));

    let mut empty = Contour::new();
    empty.dilate(vector(1.0, 1.0), Orientation::Cw);
    assert!(empty.is_empty());
}

#[test]
fn push_segment_skips_join_point() {
    let mut contour = Contour::new();
    contour.push_endpoint(point(0.0, 0.0));
    contour.push_segment(
        &Segment::cubic(point(0.0, 0.0), point(1.0, 1.0), point(2.0, 1.0), point(3.0, 0.0)),
        PushSegmentFlags::UPDATE_BOUNDS,
    );
    assert_eq!(contour.len(), 4);
    assert_eq!(contour[3].position, point(3.0, 0.0));

    contour.push_segment(&Segment::none(), PushSegmentFlags::all());
    assert_eq!(contour.len(), 4);

    contour.push_segment(
        &Segment::line(point(5.0, 5.0), point(6.0, 5.0)),
        PushSegmentFlags::all(),
    );
    assert_eq!(contour.len(), 6);
    assert_eq!(contour.bounds(), RectF::new(point(0.0, 0.0), point(6.0, 5.0)));
}

#[test]
fn unit_circle() {
    let mut contour = Contour::with_capacity(13);
    contour.push_ellipse(&Transform2F::identity());

    assert_eq!(contour.len(), 13);
    assert_eq!(contour.bounds(), RectF::new(point(-1.0, -1.0), point(1.0, 1.0)));
    assert_eq!(contour.first_position(), contour.last_position());

    let segments: Vec<Segment> = contour.segments().collect();
    assert_eq!(segments.len(), 4);
    assert!(segments.iter().all(|s| s.is_cubic()));
}

#[test]
fn ellipse_with_transform() {
    let mut contour = Contour::new();
    let transform = Transform2F::from_scale(vector(3.0, 2.0)).translate(vector(10.0, 10.0));
    contour.push_ellipse(&transform);

    assert_eq!(contour.bounds(), RectF::new(point(7.0, 8.0), point(13.0, 12.0)));
    assert_eq!(contour.first_position(), Some(point(13.0, 10.0)));
}

#[test]
fn half_circle_arc() {
    use std::f32::consts::PI;

    let mut contour = Contour::new();
    contour.push_arc(&Transform2F::identity(), 0.0, PI, ArcDirection::CW);

    // Two quarter arcs.
    assert_eq!(contour.len(), 7);
    assert!(approx_eq_point(contour.position_of(0), point(1.0, 0.0), 1e-5));
    assert!(approx_eq_point(contour.position_of(3), point(0.0, 1.0), 1e-5));
    assert!(approx_eq_point(contour.position_of(6), point(-1.0, 0.0), 1e-5));

    let mut contour = Contour::new();
    contour.push_arc(&Transform2F::identity(), 0.0, PI, ArcDirection::CCW);
    assert!(approx_eq_point(contour.position_of(3), point(0.0, -1.0), 1e-5));
}

#[test]
fn small_arc_is_a_single_curve() {
    let mut contour = Contour::new();
    contour.push_arc(&Transform2F::identity(), 0.25, 1.0, ArcDirection::CW);

    assert_eq!(contour.len(), 4);
    assert!(approx_eq_point(contour.position_of(0), UnitVector::from_angle(0.25).0.to_point(), 1e-5));
    assert!(approx_eq_point(contour.position_of(3), UnitVector::from_angle(1.0).0.to_point(), 1e-5));
}

#[test]
fn three_quarter_arc() {
    use std::f32::consts::{FRAC_PI_2, PI};

    let mut contour = Contour::new();
    contour.push_arc(&Transform2F::identity(), -FRAC_PI_2, PI, ArcDirection::CW);

    assert_eq!(contour.len(), 10);
    assert!(approx_eq_point(contour.position_of(0), point(0.0, -1.0), 1e-5));
    assert!(approx_eq_point(contour.position_of(9), point(-1.0, 0.0), 1e-5));
    assert!(contour.bounds().max_x() > 0.999);
    assert!(contour.bounds().max_y() > 0.999);
}

#[test]
fn full_turn_arc_is_an_ellipse() {
    let mut arc = Contour::new();
    arc.push_arc(&Transform2F::identity(), 0.0, TAU, ArcDirection::CW);

    let mut ellipse = Contour::new();
    ellipse.push_ellipse(&Transform2F::identity());

    assert_eq!(arc, ellipse);
}

#[test]
fn arc_continues_contour() {
    let mut contour = Contour::new();
    contour.push_endpoint(point(1.0, 0.0));
    contour.push_arc(&Transform2F::identity(), 0.0, 1.0, ArcDirection::CW);
    assert_eq!(contour.len(), 4);
}

#[test]
fn svg_half_circle() {
    let mut contour = Contour::new();
    contour.push_endpoint(point(0.0, 0.0));
    contour.push_svg_arc(vector(5.0, 5.0), 0.0, false, ArcDirection::CCW, point(10.0, 0.0));

    assert_eq!(contour.len(), 7);
    assert!(approx_eq_point(contour.position_of(3), point(5.0, 5.0), 1e-4));
    assert!(approx_eq_point(contour.position_of(6), point(10.0, 0.0), 1e-4));

    let mut contour = Contour::new();
    contour.push_endpoint(point(0.0, 0.0));
    contour.push_svg_arc(vector(5.0, 5.0), 0.0, false, ArcDirection::CW, point(10.0, 0.0));
    assert!(approx_eq_point(contour.position_of(3), point(5.0, -5.0), 1e-4));
}

#[test]
fn svg_arc_flags_pick_the_center() {
    // A circle of radius 10 through both endpoints has its center at (5, ±8.66).
    let mut small_cw = Contour::new();
    small_cw.push_endpoint(point(0.0, 0.0));
    small_cw.push_svg_arc(vector(10.0, 10.0), 0.0, false, ArcDirection::CW, point(10.0, 0.0));
    assert!(approx_eq_point(small_cw.last_position().unwrap(), point(10.0, 0.0), 1e-4));
    assert_eq!(small_cw.len(), 4);
    assert!(small_cw.bounds().min_y() < -1.3);
    assert!(small_cw.bounds().max_y() <= 1e-4);

    let mut large_cw = Contour::new();
    large_cw.push_endpoint(point(0.0, 0.0));
    large_cw.push_svg_arc(vector(10.0, 10.0), 0.0, true, ArcDirection::CW, point(10.0, 0.0));
    assert!(approx_eq_point(large_cw.last_position().unwrap(), point(10.0, 0.0), 1e-4));
    assert!(large_cw.bounds().min_y() < -18.6);
    assert!(large_cw.bounds().max_y() < 1e-3);
}

#[test]
fn svg_arc_with_rotated_ellipse_reaches_endpoint() {
    let mut contour = Contour::new();
    contour.push_endpoint(point(2.0, 3.0));
    contour.push_svg_arc(vector(8.0, 3.0), 0.7, true, ArcDirection::CCW, point(9.0, -1.0));
    assert!(approx_eq_point(contour.last_position().unwrap(), point(9.0, -1.0), 1e-3));
}

#[test]
fn svg_arc_with_small_radius_stays_on_midpoint() {
    let mut contour = Contour::new();
    contour.push_endpoint(point(0.0, 0.0));
    contour.push_svg_arc(vector(1.0, 1.0), 0.0, false, ArcDirection::CW, point(10.0, 0.0));

    // Unlike the SVG error handling rules, the radii are not scaled up: a line joins the
    // start point to a half circle of radius 1 around the chord midpoint.
    assert_eq!(contour.len(), 8);
    assert_eq!(contour.position_of(1), point(4.0, 0.0));
    assert!(approx_eq_point(contour.position_of(4), point(5.0, -1.0), 1e-4));
    assert!(approx_eq_point(contour.position_of(7), point(6.0, 0.0), 1e-4));
}

#[test]
fn svg_arc_degenerate_cases() {
    let mut contour = Contour::new();
    contour.push_endpoint(point(1.0, 1.0));

    contour.push_svg_arc(vector(f32::INFINITY, 1.0), 0.0, false, ArcDirection::CW, point(2.0, 2.0));
    assert_eq!(contour.len(), 2);
    assert_eq!(contour.last_position(), Some(point(2.0, 2.0)));

    contour.push_svg_arc(vector(0.0, 3.0), 0.0, false, ArcDirection::CW, point(3.0, 2.0));
    assert_eq!(contour.len(), 3);

    contour.push_svg_arc(vector(3.0, 3.0), 0.0, false, ArcDirection::CW, point(3.0, 2.0));
    assert_eq!(contour.len(), 3);
}

#[test]
fn svg_arc_on_empty_contour_starts_at_origin() {
    let mut contour = Contour::new();
    contour.push_svg_arc(vector(5.0, 5.0), 0.0, false, ArcDirection::CW, point(10.0, 0.0));

    assert_eq!(contour.len(), 7);
    assert!(approx_eq_point(contour.position_of(0), point(0.0, 0.0), 1e-4));
}

#[test]
fn transform_recomputes_bounds() {
    let mut contour = Contour::from_rect(&RectF::new(point(0.0, 0.0), point(2.0, 1.0)));
    contour.transform(&Transform2F::from_rotation(std::f32::consts::FRAC_PI_2));

    let bounds = contour.bounds();
    assert!(approx_eq_point(bounds.min(), point(-1.0, 0.0), 1e-5));
    assert!(approx_eq_point(bounds.max(), point(0.0, 2.0), 1e-5));

    let before = contour.clone();
    assert_eq!(before.clone().transformed(&Transform2F::identity()), before);
}

#[test]
fn close_and_clear() {
    let mut contour = Contour::new();
    contour.push_endpoint(point(1.0, 1.0));
    contour.close();
    contour.close();
    assert!(contour.is_closed());

    contour.clear();
    assert!(!contour.is_closed());
    assert!(contour.is_empty());
    assert_eq!(contour.first(), None);
}

#[test]
fn segment_iteration() {
    let mut contour = Contour::new();
    contour.push_endpoint(point(0.0, 0.0));
    contour.push_endpoint(point(4.0, 0.0));
    contour.push_quadratic(point(6.0, 2.0), point(4.0, 4.0));
    contour.push_cubic(point(3.0, 5.0), point(1.0, 5.0), point(0.0, 4.0));

    let open: Vec<Segment> = contour.segments().collect();
    assert_eq!(open.len(), 3);
    assert!(open[0].is_line());
    assert!(open[1].is_quadratic());
    assert!(open[2].is_cubic());
    assert_eq!(open[0].flags, SegmentFlags::FIRST_IN_SUBPATH);
    assert_eq!(open[2].flags, SegmentFlags::empty());

    contour.close();
    let closed: Vec<Segment> = contour.segments().collect();
    assert_eq!(closed.len(), 4);
    assert_eq!(closed[3].flags, SegmentFlags::CLOSES_SUBPATH);
    assert_eq!(closed[3].from(), Some(point(0.0, 4.0)));
    assert_eq!(closed[3].to(), Some(point(0.0, 0.0)));

    assert_eq!(contour.iter(ContourIterFlags::IGNORE_CLOSE_SEGMENT).count(), 3);
    assert_eq!(contour.segment_after(1), open[1]);
    assert_eq!(contour.segment_after(6), Segment::line(point(0.0, 4.0), point(0.0, 0.0)));
}

#[test]
fn dangling_control_point_ends_iteration() {
    let mut contour = Contour::new();
    contour.push_endpoint(point(0.0, 0.0));
    contour.push_endpoint(point(1.0, 0.0));
    contour.push_point(point(2.0, 0.0), PointKind::ControlPoint0, true);

    assert_eq!(contour.segments().count(), 1);
    assert_eq!(Contour::new().segments().count(), 0);
}

#[test]
fn debug_as_path_data() {
    let mut contour = Contour::new();
    contour.push_endpoint(point(0.0, 0.0));
    contour.push_endpoint(point(1.0, 0.0));
    contour.push_quadratic(point(2.0, 1.0), point(1.0, 2.0));
    contour.close();

    assert_eq!(format!("{:?}", contour), "M 0 0 L 1 0 Q 2 1 1 2 Z");
}
