//! Threshold values used by the geometric predicates.
//!
//! Each predicate works at the scale of the quantity it tests, which is why the
//! values differ by a few orders of magnitude.

/// Default tolerance of [`approx_eq`](crate::utils::approx_eq).
pub const APPROX_EPSILON: f32 = 1e-3;

/// An arc chord sweep whose coordinates are both above `-ARC_SWEEP_EPSILON` fits
/// in the current quadrant and finishes the arc.
pub const ARC_SWEEP_EPSILON: f32 = 1e-3;

/// Segments whose summed squared control polygon length is below this value are tiny.
pub const TINY_SEGMENT_EPSILON: f32 = 1e-3;

/// Arcs whose sweep cosine is above `1 - ARC_COS_EPSILON` collapse to a point.
pub const ARC_COS_EPSILON: f32 = 1e-4;

/// Line segments whose direction cross product is below this value are parallel.
pub const INTERSECTION_EPSILON: f32 = 1e-4;

/// Rounded rectangles with both radii below this value have square corners.
pub const ROUNDED_RECT_RADIUS_EPSILON: f32 = 1e-4;

/// Line segments whose squared length is below this value have zero length.
pub const ZERO_LENGTH_EPSILON: f32 = 1e-5;

/// Dilated corners where `1 + cos` of the angle between the edge normals is below this
/// value turn back on themselves and move along the outgoing normal only.
pub const MITER_EPSILON: f32 = 1e-3;
