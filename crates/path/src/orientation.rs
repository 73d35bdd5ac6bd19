use crate::contour::Contour;
use crate::outline::Outline;

/// The winding direction of an outline, as seen on a y-down screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[repr(i8)]
pub enum Orientation {
    Ccw = -1,
    Cw = 1,
}

impl Orientation {
    /// Determines the orientation of an outline from the sign of its total area.
    ///
    /// Every contour contributes its signed area, control points included, so the
    /// result is only meaningful for outlines whose contours do not cancel out. Empty
    /// outlines are counterclockwise.
    pub fn from_outline(outline: &Outline) -> Orientation {
        let area: f32 = outline.iter().map(doubled_signed_area).sum();
        Orientation::from_area(area)
    }

    /// Determines the orientation of a single contour.
    #[inline]
    pub fn from_contour(contour: &Contour) -> Orientation {
        Orientation::from_area(doubled_signed_area(contour))
    }

    #[inline]
    pub fn opposite(self) -> Orientation {
        match self {
            Orientation::Ccw => Orientation::Cw,
            Orientation::Cw => Orientation::Ccw,
        }
    }

    #[inline]
    fn from_area(area: f32) -> Orientation {
        if area <= 0.0 {
            Orientation::Ccw
        } else {
            Orientation::Cw
        }
    }
}

/// Shorthand for `Orientation::from_outline`.
#[inline]
pub fn orientation_of(outline: &Outline) -> Orientation {
    Orientation::from_outline(outline)
}

// Shoelace formula over the implicitly closed polygon of all the points.
fn doubled_signed_area(contour: &Contour) -> f32 {
    let points = contour.points();
    let mut prev = match points.last() {
        Some(last) => last.position,
        None => return 0.0,
    };

    let mut area = 0.0;
    for point in points {
        let next = point.position;
        area += prev.x * next.y - prev.y * next.x;
        prev = next;
    }

    area
}

#[cfg(test)]
use crate::geom::{point, vector, RectF, Transform2F};

#[cfg(test)]
use crate::ArcDirection;

#[test]
fn rect_is_clockwise() {
    let outline = Outline::from_rect(&RectF::new(point(0.0, 0.0), point(10.0, 5.0)));
    assert_eq!(Orientation::from_outline(&outline), Orientation::Cw);
    assert_eq!(orientation_of(&outline), Orientation::Cw);
}

#[test]
fn reversed_contour_is_counterclockwise() {
    let mut contour = Contour::new();
    contour.push_endpoint(point(0.0, 0.0));
    contour.push_endpoint(point(0.0, 5.0));
    contour.push_endpoint(point(10.0, 5.0));
    contour.push_endpoint(point(10.0, 0.0));
    contour.close();

    assert_eq!(Orientation::from_contour(&contour), Orientation::Ccw);
    assert_eq!(Orientation::from_contour(&contour).opposite(), Orientation::Cw);
}

#[test]
fn rotation_keeps_orientation() {
    let outline = Outline::from_rect_rounded(
        &RectF::new(point(0.0, 0.0), point(10.0, 5.0)),
        vector(1.0, 1.0),
    );
    let orientation = Orientation::from_outline(&outline);

    for i in 0..8 {
        let rotated = outline
            .clone()
            .transformed(&Transform2F::from_rotation(i as f32 * 0.8));
        assert_eq!(Orientation::from_outline(&rotated), orientation);
    }
}

#[test]
fn mirroring_flips_orientation() {
    let mut contour = Contour::new();
    contour.push_ellipse(&Transform2F::from_scale(vector(4.0, 2.0)));
    let mut outline = Outline::new();
    outline.push_contour(contour);

    let orientation = Orientation::from_outline(&outline);
    let mirrored = outline.transformed(&Transform2F::from_scale(vector(-1.0, 1.0)));
    assert_eq!(Orientation::from_outline(&mirrored), orientation.opposite());
}

#[test]
fn arc_direction_gives_orientation() {
    let mut cw = Contour::new();
    cw.push_arc(&Transform2F::identity(), 0.0, 3.0, ArcDirection::CW);
    cw.close();
    assert_eq!(Orientation::from_contour(&cw), Orientation::Cw);

    let mut ccw = Contour::new();
    ccw.push_arc(&Transform2F::identity(), 0.0, 3.0, ArcDirection::CCW);
    ccw.close();
    assert_eq!(Orientation::from_contour(&ccw), Orientation::Ccw);
}

#[test]
fn empty_outline_is_counterclockwise() {
    assert_eq!(Orientation::from_outline(&Outline::new()), Orientation::Ccw);
}
