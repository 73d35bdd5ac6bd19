#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::many_single_char_names)]
#![no_std]

//! Single precision 2D geometric primitives on top of euclid.
//!
//! This crate is reexported in [pathcore](https://docs.rs/pathcore/).
//!
//! # Overview.
//!
//! This crate implements the maths that the path layer is built upon:
//!
//! - affine transforms ([`Transform2F`], [`Matrix2x2F`]),
//! - line segments ([`LineSegment2F`]),
//! - floating point and integer rectangles ([`RectF`], [`RectI`]),
//! - quadratic and cubic bézier curves,
//! - tagged path segments ([`Segment`]) along with the circular arc approximations
//!   used to build ellipses and SVG arcs.
//!
//! All types work with `f32` coordinates, which is what rasterizers and GPUs consume.
//!
//! # Orientation
//!
//! The coordinate system is y-down: a positive rotation angle turns the x axis
//! towards the y axis, which appears clockwise on screen.
//!
//! # Tolerances
//!
//! The threshold values used by the various predicates are collected in the
//! [`tolerance`] module.

#[cfg(any(test, feature = "std"))]
extern crate std;

#[macro_use]
extern crate bitflags;

// Reexport dependencies.
pub use arrayvec;
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod cubic_bezier;
mod line;
pub mod quadratic_bezier;
mod rect;
pub mod segment;
pub mod tolerance;
mod transform;
mod unit_vector;
pub mod utils;

#[doc(inline)]
pub use crate::cubic_bezier::CubicBezierSegment;
#[doc(inline)]
pub use crate::line::LineSegment2F;
#[doc(inline)]
pub use crate::quadratic_bezier::QuadraticBezierSegment;
#[doc(inline)]
pub use crate::rect::{RectF, RectI};
#[doc(inline)]
pub use crate::segment::{Segment, SegmentFlags, SegmentKind};
#[doc(inline)]
pub use crate::transform::{Matrix2x2F, Transform2F};
#[doc(inline)]
pub use crate::unit_vector::UnitVector;

mod scalar {
    pub(crate) use num_traits::Float;
}

/// Alias for `euclid::default::Point2D<f32>`.
pub type Point = euclid::default::Point2D<f32>;

/// Alias for `euclid::default::Vector2D<f32>`.
pub type Vector = euclid::default::Vector2D<f32>;

/// Alias for `euclid::default::Point2D<i32>`.
pub type IntPoint = euclid::default::Point2D<i32>;

/// Alias for `euclid::default::Vector2D<i32>`.
pub type IntVector = euclid::default::Vector2D<i32>;

/// Alias for `euclid::default::Size2D<f32>`.
pub type Size = euclid::default::Size2D<f32>;

/// Alias for `euclid::default::Box2D`
pub use euclid::default::Box2D;

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector(x: f32, y: f32) -> Vector {
    Vector::new(x, y)
}

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

/// Shorthand for `IntPoint::new(x, y)`.
#[inline]
pub fn int_point(x: i32, y: i32) -> IntPoint {
    IntPoint::new(x, y)
}

/// Shorthand for `IntVector::new(x, y)`.
#[inline]
pub fn int_vector(x: i32, y: i32) -> IntVector {
    IntVector::new(x, y)
}

/// Shorthand for `Size::new(w, h)`.
#[inline]
pub fn size(w: f32, h: f32) -> Size {
    Size::new(w, h)
}

pub mod traits {
    use crate::{Point, Vector};

    /// Anything that can map points and vectors of the plane.
    ///
    /// Segments, contours and outlines accept any implementor, so euclid's
    /// transforms can be used interchangeably with [`Transform2F`](crate::Transform2F).
    pub trait Transformation {
        fn transform_point(&self, p: Point) -> Point;
        fn transform_vector(&self, v: Vector) -> Vector;
    }

    impl Transformation for euclid::default::Transform2D<f32> {
        fn transform_point(&self, p: Point) -> Point {
            self.transform_point(p)
        }

        fn transform_vector(&self, v: Vector) -> Vector {
            self.transform_vector(v)
        }
    }

    impl Transformation for euclid::default::Rotation2D<f32> {
        fn transform_point(&self, p: Point) -> Point {
            self.transform_point(p)
        }

        fn transform_vector(&self, v: Vector) -> Vector {
            self.transform_vector(v)
        }
    }

    impl Transformation for euclid::Translation2D<f32, euclid::UnknownUnit, euclid::UnknownUnit> {
        fn transform_point(&self, p: Point) -> Point {
            self.transform_point(p)
        }

        fn transform_vector(&self, v: Vector) -> Vector {
            v
        }
    }

    impl Transformation for euclid::default::Scale<f32> {
        fn transform_point(&self, p: Point) -> Point {
            (*self).transform_point(p)
        }

        fn transform_vector(&self, v: Vector) -> Vector {
            (*self).transform_vector(v)
        }
    }

    // Automatically implement Transformation for all &Transformation.
    impl<'l, T: Transformation> Transformation for &'l T {
        #[inline]
        fn transform_point(&self, p: Point) -> Point {
            (*self).transform_point(p)
        }

        #[inline]
        fn transform_vector(&self, v: Vector) -> Vector {
            (*self).transform_vector(v)
        }
    }
}
