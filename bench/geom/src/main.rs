extern crate pathcore;
#[macro_use]
extern crate bencher;

use bencher::Bencher;

use pathcore::geom::Segment;
use pathcore::math::*;
use pathcore::path::{ArcDirection, Contour, Outline};

const N: usize = 10;

fn split_cubic(bench: &mut Bencher) {
    let curve = Segment::cubic(
        point(0.0, 0.0),
        point(10.0, 90.0),
        point(90.0, 100.0),
        point(100.0, 0.0),
    );

    bench.iter(|| {
        let mut acc = 0.0;
        for i in 0..N {
            let t = i as f32 / N as f32;
            let (before, after) = curve.split(t);
            acc += before.max_y() + after.min_x();
        }
        acc
    });
}

fn arcs(bench: &mut Bencher) {
    let transform = Transform2F::from_scale(vector(20.0, 10.0)).translate(vector(50.0, 50.0));

    bench.iter(|| {
        let mut contour = Contour::with_capacity(N * 13);
        for i in 0..N {
            let end = 0.5 + i as f32 * 0.6;
            contour.push_arc(&transform, 0.0, end, ArcDirection::CW);
        }
        contour.bounds()
    });
}

fn svg_arcs(bench: &mut Bencher) {
    bench.iter(|| {
        let mut contour = Contour::new();
        contour.push_endpoint(point(0.0, 0.0));
        for i in 0..N {
            let x = (i + 1) as f32 * 10.0;
            contour.push_svg_arc(
                vector(8.0, 5.0),
                0.3,
                i % 2 == 0,
                ArcDirection::CCW,
                point(x, 0.0),
            );
        }
        contour.len()
    });
}

fn rounded_rects(bench: &mut Bencher) {
    bench.iter(|| {
        let mut outline = Outline::with_capacity(N);
        for i in 0..N {
            let offset = i as f32 * 5.0;
            let rect = RectF::new(point(offset, offset), point(offset + 40.0, offset + 20.0));
            outline.push_contour(Contour::from_rect_rounded(&rect, vector(4.0, 3.0)));
        }
        outline.bounds()
    });
}

fn dilate_outline(bench: &mut Bencher) {
    let mut outline = Outline::with_capacity(N);
    for i in 0..N {
        let offset = i as f32 * 5.0;
        let rect = RectF::new(point(offset, offset), point(offset + 40.0, offset + 20.0));
        outline.push_contour(Contour::from_rect_rounded(&rect, vector(4.0, 3.0)));
    }

    bench.iter(|| {
        let mut dilated = outline.clone();
        dilated.dilate(vector(1.5, 1.5));
        dilated.bounds()
    });
}

benchmark_group!(segments, split_cubic);
benchmark_group!(contours, arcs, svg_arcs, rounded_rects, dilate_outline);
benchmark_main!(segments, contours);
