use crate::contour::{Contour, ContourIterFlags, PushSegmentFlags};
use crate::orientation::Orientation;
use crate::geom::{RectF, Segment, SegmentFlags, Transform2F, Vector};

use std::fmt;
use std::ops::Index;
use std::slice;

/// A list of contours and the bounding box of all of them.
///
/// Empty contours are never stored, so they never contribute to the bounds.
#[derive(Clone, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Outline {
    contours: Vec<Contour>,
    bounds: RectF,
}

impl Outline {
    /// Creates a new empty outline with no contours.
    #[inline]
    pub fn new() -> Outline {
        Outline::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Outline {
        Outline {
            contours: Vec::with_capacity(capacity),
            bounds: RectF::default(),
        }
    }

    /// Creates a new outline from a list of segments.
    ///
    /// A segment flagged `FIRST_IN_SUBPATH` starts a new contour and one flagged
    /// `CLOSES_SUBPATH` closes the current one; the closing segment itself only
    /// contributes its start point. Empty segments are skipped.
    pub fn from_segments<I>(segments: I) -> Outline
    where
        I: Iterator<Item = Segment>,
    {
        let mut outline = Outline::new();
        let mut current = Contour::new();

        for segment in segments {
            if segment.flags.contains(SegmentFlags::FIRST_IN_SUBPATH) {
                if !current.is_empty() {
                    outline.push_contour(std::mem::take(&mut current));
                }
                if let Some(from) = segment.from() {
                    current.push_endpoint(from);
                }
            }

            if segment.flags.contains(SegmentFlags::CLOSES_SUBPATH) {
                if !current.is_empty() {
                    current.close();
                    outline.push_contour(std::mem::take(&mut current));
                }
                continue;
            }

            if segment.is_none() {
                continue;
            }

            let mut flags = PushSegmentFlags::UPDATE_BOUNDS;
            if current.is_empty() {
                flags.insert(PushSegmentFlags::INCLUDE_FROM_POINT);
            }
            current.push_segment(&segment, flags);
        }

        if !current.is_empty() {
            outline.push_contour(current);
        }

        outline
    }

    /// Creates a new outline that represents a single axis-aligned rectangle.
    #[inline]
    pub fn from_rect(rect: &RectF) -> Outline {
        let mut outline = Outline::new();
        outline.push_contour(Contour::from_rect(rect));
        outline
    }

    /// Creates a new outline that represents a rounded rectangle.
    #[inline]
    pub fn from_rect_rounded(rect: &RectF, radius: Vector) -> Outline {
        let mut outline = Outline::new();
        outline.push_contour(Contour::from_rect_rounded(rect, radius));
        outline
    }

    /// Returns the dimensions of an axis-aligned box that encloses the entire outline.
    ///
    /// Meaningless for empty outlines.
    #[inline]
    pub fn bounds(&self) -> RectF {
        self.bounds
    }

    #[inline]
    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    #[inline]
    pub fn into_contours(self) -> Vec<Contour> {
        self.contours
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.contours.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Contour> {
        self.contours.iter()
    }

    /// Iterates over the segments of every contour in order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.contours
            .iter()
            .flat_map(|contour| contour.iter(ContourIterFlags::empty()))
    }

    /// Removes all contours from this outline.
    #[inline]
    pub fn clear(&mut self) {
        self.contours.clear();
        self.bounds = RectF::default();
    }

    /// Adds a new contour to this outline. Empty contours are dropped.
    pub fn push_contour(&mut self, contour: Contour) {
        if contour.is_empty() {
            return;
        }

        if self.contours.is_empty() {
            self.bounds = contour.bounds();
        } else {
            self.bounds = self.bounds.union_rect(&contour.bounds());
        }

        self.contours.push(contour);
    }

    /// Adds copies of all the contours of `other` to this outline.
    pub fn push_outline(&mut self, other: &Outline) {
        if other.is_empty() {
            return;
        }

        if self.is_empty() {
            self.bounds = other.bounds;
        } else {
            self.bounds = self.bounds.union_rect(&other.bounds);
        }

        self.contours.extend_from_slice(&other.contours);
    }

    /// Moves all the contours of `other` into this outline, leaving `other` empty.
    pub fn append(&mut self, other: &mut Outline) {
        if other.is_empty() {
            return;
        }

        if self.is_empty() {
            self.bounds = other.bounds;
        } else {
            self.bounds = self.bounds.union_rect(&other.bounds);
        }

        self.contours.append(&mut other.contours);
        other.bounds = RectF::default();
    }

    /// Removes the last contour in this outline and returns it.
    pub fn pop_contour(&mut self) -> Option<Contour> {
        let last_contour = self.contours.pop();
        self.recompute_bounds();
        last_contour
    }

    /// Applies an affine transform to this outline and all its subpaths.
    pub fn transform(&mut self, transform: &Transform2F) {
        if transform.is_identity() {
            return;
        }

        for contour in &mut self.contours {
            contour.transform(transform);
        }
        self.recompute_bounds();
    }

    /// Applies an affine transform to this outline and all its subpaths, consuming this outline
    /// instead of mutating it.
    #[inline]
    pub fn transformed(mut self, transform: &Transform2F) -> Outline {
        self.transform(transform);
        self
    }

    /// Thickens the outline by `amount` along each axis, or thins it for negative amounts.
    ///
    /// The outside of every contour is picked from the orientation of the whole outline.
    pub fn dilate(&mut self, amount: Vector) {
        let orientation = Orientation::from_outline(self);
        for contour in &mut self.contours {
            contour.dilate(amount, orientation);
        }
        self.recompute_bounds();
    }

    /// Marks all the contours in this outline as closed.
    pub fn close_all_contours(&mut self) {
        self.contours.iter_mut().for_each(|contour| contour.close());
    }

    fn recompute_bounds(&mut self) {
        let mut contours = self.contours.iter();
        self.bounds = match contours.next() {
            Some(first) => contours.fold(first.bounds(), |bounds, contour| {
                bounds.union_rect(&contour.bounds())
            }),
            None => RectF::default(),
        };
    }
}

impl Index<usize> for Outline {
    type Output = Contour;
    #[inline]
    fn index(&self, index: usize) -> &Contour {
        &self.contours[index]
    }
}

impl<'a> IntoIterator for &'a Outline {
    type Item = &'a Contour;
    type IntoIter = slice::Iter<'a, Contour>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.contours.iter()
    }
}

impl fmt::Debug for Outline {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        for (contour_index, contour) in self.contours.iter().enumerate() {
            if contour_index > 0 {
                write!(formatter, " ")?;
            }
            fmt::Debug::fmt(contour, formatter)?;
        }
        Ok(())
    }
}

#[cfg(test)]
use crate::geom::{point, vector};

#[cfg(test)]
fn triangle(offset: f32) -> Contour {
    let mut contour = Contour::new();
    contour.push_endpoint(point(offset, offset));
    contour.push_endpoint(point(offset + 2.0, offset));
    contour.push_endpoint(point(offset + 1.0, offset + 2.0));
    contour.close();
    contour
}

#[test]
fn bounds_union_of_contours() {
    let mut outline = Outline::new();
    outline.push_contour(triangle(0.0));
    assert_eq!(outline.bounds(), RectF::new(point(0.0, 0.0), point(2.0, 2.0)));

    outline.push_contour(triangle(10.0));
    assert_eq!(outline.bounds(), RectF::new(point(0.0, 0.0), point(12.0, 12.0)));
    assert_eq!(outline.len(), 2);
}

#[test]
fn empty_contours_are_ignored() {
    let mut outline = Outline::new();
    outline.push_contour(Contour::new());
    assert!(outline.is_empty());
    assert_eq!(outline.bounds(), RectF::default());

    outline.push_contour(triangle(5.0));
    outline.push_contour(Contour::new());
    assert_eq!(outline.len(), 1);
    assert_eq!(outline.bounds(), RectF::new(point(5.0, 5.0), point(7.0, 7.0)));
}

#[test]
fn pop_recomputes_bounds() {
    let mut outline = Outline::new();
    outline.push_contour(triangle(0.0));
    outline.push_contour(triangle(10.0));

    assert_eq!(outline.pop_contour(), Some(triangle(10.0)));
    assert_eq!(outline.bounds(), RectF::new(point(0.0, 0.0), point(2.0, 2.0)));

    assert!(outline.pop_contour().is_some());
    assert_eq!(outline.bounds(), RectF::default());
    assert_eq!(outline.pop_contour(), None);
}

#[test]
fn append_moves_contours() {
    let mut a = Outline::from_rect(&RectF::new(point(0.0, 0.0), point(1.0, 1.0)));
    let mut b = Outline::new();
    b.push_contour(triangle(3.0));
    b.push_contour(triangle(-3.0));

    a.append(&mut b);
    assert_eq!(a.len(), 3);
    assert_eq!(a.bounds(), RectF::new(point(-3.0, -3.0), point(5.0, 5.0)));
    assert!(b.is_empty());
    assert_eq!(b.bounds(), RectF::default());

    let mut c = Outline::new();
    c.push_outline(&a);
    assert_eq!(c, a);
}

#[test]
fn transform_outline() {
    let mut outline = Outline::new();
    outline.push_contour(triangle(0.0));
    outline.push_contour(triangle(4.0));

    let outline = outline.transformed(&Transform2F::from_scale(vector(2.0, -1.0)));
    assert_eq!(outline.bounds(), RectF::new(point(0.0, -6.0), point(12.0, 0.0)));
    assert_eq!(outline[1].first_position(), Some(point(8.0, -4.0)));
}

#[test]
fn segments_round_trip() {
    let mut outline = Outline::new();
    outline.push_contour(triangle(0.0));
    let mut open = Contour::new();
    open.push_endpoint(point(5.0, 5.0));
    open.push_cubic(point(6.0, 4.0), point(7.0, 6.0), point(8.0, 5.0));
    open.push_quadratic(point(9.0, 3.0), point(10.0, 5.0));
    outline.push_contour(open);

    let rebuilt = Outline::from_segments(outline.segments());
    assert_eq!(rebuilt, outline);
}

#[test]
fn from_segments_without_flags() {
    let segments = vec![
        Segment::line(point(0.0, 0.0), point(1.0, 0.0)),
        Segment::none(),
        Segment::quadratic(point(1.0, 0.0), point(2.0, 1.0), point(1.0, 2.0)),
    ];
    let outline = Outline::from_segments(segments.into_iter());

    assert_eq!(outline.len(), 1);
    assert_eq!(outline[0].len(), 4);
    assert!(!outline[0].is_closed());
    assert_eq!(outline.bounds(), RectF::new(point(0.0, 0.0), point(2.0, 2.0)));
}

#[test]
fn dilate_grows_bounds() {
    let rect = RectF::new(point(0.0, 0.0), point(10.0, 5.0));
    let mut outline = Outline::from_rect(&rect);
    outline.dilate(vector(2.0, 1.0));

    assert_eq!(outline.bounds(), RectF::new(point(-2.0, -1.0), point(12.0, 6.0)));
    assert_eq!(outline[0].bounds(), outline.bounds());
    assert_eq!(outline[0].position_of(2), point(12.0, 6.0));

    outline.dilate(vector(-2.0, -1.0));
    assert_eq!(outline.bounds(), rect);
}

#[test]
fn dilate_follows_orientation() {
    // The same rectangle, traced counterclockwise.
    let mut contour = Contour::new();
    contour.push_endpoint(point(0.0, 0.0));
    contour.push_endpoint(point(0.0, 4.0));
    contour.push_endpoint(point(4.0, 4.0));
    contour.push_endpoint(point(4.0, 0.0));
    contour.close();
    let mut outline = Outline::new();
    outline.push_contour(contour);

    outline.dilate(vector(1.0, 1.0));
    assert_eq!(outline.bounds(), RectF::new(point(-1.0, -1.0), point(5.0, 5.0)));

    let mut empty = Outline::new();
    empty.dilate(vector(1.0, 1.0));
    assert!(empty.is_empty());
    assert_eq!(empty.bounds(), RectF::default());
}

#[test]
fn close_all() {
    let mut outline = Outline::new();
    let mut open = Contour::new();
    open.push_endpoint(point(0.0, 0.0));
    open.push_endpoint(point(1.0, 1.0));
    outline.push_contour(open.clone());
    outline.push_contour(open);

    outline.close_all_contours();
    assert!(outline.iter().all(|contour| contour.is_closed()));

    outline.clear();
    assert!(outline.is_empty());
}

#[test]
fn debug_lists_contours() {
    let outline = Outline::from_rect(&RectF::new(point(0.0, 0.0), point(1.0, 2.0)));
    assert_eq!(format!("{:?}", outline), "M 0 0 L 1 0 L 1 2 L 0 2 Z");
}
