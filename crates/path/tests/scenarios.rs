extern crate pathcore_path;

use pathcore_path::geom::utils::approx_eq_point;
use pathcore_path::geom::Segment;
use pathcore_path::math::{point, vector, Point, RectF, Transform2F};
use pathcore_path::{ArcDirection, Contour, Orientation, Outline};

fn sample_segments() -> Vec<Segment> {
    vec![
        Segment::line(point(-3.0, 2.0), point(7.0, -4.0)),
        Segment::quadratic(point(0.0, 0.0), point(5.0, 12.0), point(10.0, 1.0)),
        Segment::cubic(
            point(1.0, 1.0),
            point(2.0, 9.0),
            point(11.0, -4.0),
            point(12.0, 6.0),
        ),
        Segment::quarter_arc(),
        Segment::arc(2.5),
    ]
}

fn polygon(points: &[Point]) -> Contour {
    let mut contour = Contour::new();
    for p in points {
        contour.push_endpoint(*p);
    }
    contour.close();
    contour
}

#[test]
fn split_halves_meet_on_the_curve() {
    for segment in sample_segments() {
        for i in 0..=8 {
            let t = i as f32 / 8.0;
            let (before, after) = segment.split(t);
            let at = segment.sample(t);

            assert!(approx_eq_point(before.sample(1.0), at, 1e-4), "{:?} at {}", segment, t);
            assert!(approx_eq_point(after.sample(0.0), at, 1e-4), "{:?} at {}", segment, t);
            assert!(approx_eq_point(before.sample(0.0), segment.sample(0.0), 1e-5));
            assert!(approx_eq_point(after.sample(1.0), segment.sample(1.0), 1e-5));
        }
    }
}

#[test]
fn degree_elevation_keeps_the_curve() {
    for segment in sample_segments() {
        let cubic = segment.to_cubic();
        assert!(cubic.is_cubic());

        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!(approx_eq_point(cubic.sample(t), segment.sample(t), 1e-4));
        }
    }

    assert!(Segment::none().to_cubic().is_none());
}

#[test]
fn rect_contour_bounds() {
    let rects = [
        RectF::new(point(0.0, 0.0), point(1.0, 1.0)),
        RectF::new(point(-20.5, 3.0), point(-1.0, 4.25)),
        RectF::from_points(point(10.0, 10.0), point(-10.0, 5.0)),
    ];

    for rect in &rects {
        assert_eq!(Contour::from_rect(rect).bounds(), *rect);
        assert_eq!(Contour::from_rect_rounded(rect, vector(0.0, 0.0)), Contour::from_rect(rect));
        assert_eq!(Outline::from_rect(rect).bounds(), *rect);
    }
}

#[test]
fn inverse_round_trip() {
    let transforms = [
        Transform2F::identity(),
        Transform2F::from_scale_rotation_translation(vector(2.0, 0.5), 0.7, vector(-3.0, 8.0)),
        Transform2F::row_major(1.0, 2.0, 3.0, -1.0, 0.5, 4.0),
        Transform2F::from_rotation(2.0).translate(vector(1.0, 1.0)),
    ];
    let points = [point(0.0, 0.0), point(1.0, -2.0), point(100.0, 37.5)];

    for transform in &transforms {
        let inverse = transform.inverse();
        for p in &points {
            let round_trip = transform.apply_point(inverse.apply_point(*p));
            assert!(approx_eq_point(round_trip, *p, 1e-3), "{:?}", transform);
        }
    }
}

#[test]
fn orientation_ignores_the_starting_point() {
    let points = [
        point(0.0, 0.0),
        point(4.0, 1.0),
        point(6.0, 5.0),
        point(1.0, 7.0),
        point(-2.0, 3.0),
    ];
    let expected = Orientation::from_contour(&polygon(&points));
    assert_eq!(expected, Orientation::Cw);

    for shift in 0..points.len() {
        let mut rotated = points.to_vec();
        rotated.rotate_left(shift);
        assert_eq!(Orientation::from_contour(&polygon(&rotated)), expected);

        rotated.reverse();
        assert_eq!(Orientation::from_contour(&polygon(&rotated)), expected.opposite());
    }
}

#[test]
fn unit_circle() {
    let mut contour = Contour::with_capacity(13);
    contour.push_ellipse(&Transform2F::identity());

    let segments: Vec<Segment> = contour.segments().collect();
    assert_eq!(segments.len(), 4);
    assert_eq!(contour.first_position(), contour.last_position());
    assert_eq!(contour.bounds(), RectF::new(point(-1.0, -1.0), point(1.0, 1.0)));

    // Every quarter stays close to the circle.
    for segment in &segments {
        for i in 0..=10 {
            let p = segment.sample(i as f32 / 10.0);
            assert!((p.to_vector().length() - 1.0).abs() < 1e-3);
        }
    }
}

#[test]
fn arc_with_no_sweep_is_a_point() {
    let segment = Segment::arc_from_cos(1.0);
    assert!(segment.is_line());
    assert_eq!(segment.from(), Some(point(1.0, 0.0)));
    assert_eq!(segment.to(), Some(point(1.0, 0.0)));
}

#[test]
fn svg_half_circles() {
    for &(direction, expected_y) in &[(ArcDirection::CCW, 5.0), (ArcDirection::CW, -5.0)] {
        let mut contour = Contour::new();
        contour.push_endpoint(point(0.0, 0.0));
        contour.push_svg_arc(vector(5.0, 5.0), 0.0, false, direction, point(10.0, 0.0));

        let segments: Vec<Segment> = contour.segments().collect();
        assert_eq!(segments.len(), 2);
        let middle = segments[0].to().unwrap();
        assert!(approx_eq_point(middle, point(5.0, expected_y), 1e-4), "{:?}", middle);

        for segment in &segments {
            for i in 0..=10 {
                let p = segment.sample(i as f32 / 10.0);
                assert!(((p - point(5.0, 0.0)).length() - 5.0).abs() < 5e-3);
            }
        }
    }
}

#[test]
fn append_empties_the_source() {
    let mut a = Outline::from_rect(&RectF::new(point(0.0, 0.0), point(1.0, 1.0)));
    let mut b = Outline::from_rect_rounded(
        &RectF::new(point(2.0, 2.0), point(8.0, 4.0)),
        vector(1.0, 1.0),
    );

    a.append(&mut b);

    assert_eq!(a.len(), 2);
    assert_eq!(a.bounds(), RectF::new(point(0.0, 0.0), point(8.0, 4.0)));
    assert!(b.is_empty());
    assert_eq!(b.bounds(), RectF::default());
}

#[test]
fn outline_segments_round_trip() {
    let mut outline = Outline::from_rect_rounded(
        &RectF::new(point(0.0, 0.0), point(30.0, 20.0)),
        vector(5.0, 3.0),
    );
    let mut bump = Contour::new();
    bump.push_endpoint(point(0.0, 0.0));
    bump.push_svg_arc(vector(16.0, 10.0), 0.2, true, ArcDirection::CW, point(30.0, 0.0));
    outline.push_contour(bump);

    let rebuilt = Outline::from_segments(outline.segments());
    assert_eq!(rebuilt, outline);

    let moved = outline.clone().transformed(&Transform2F::from_translation(vector(5.0, 5.0)));
    assert_eq!(moved.bounds(), outline.bounds() + vector(5.0, 5.0));
}
