#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::match_like_matches_macro)]

//! Contours and outlines: the geometric data handed to rasterizers.
//!
//! A [`Contour`] is one connected sub-path stored as a flat list of points, each
//! tagged with its role in the bézier chain (see [`PointKind`]). An [`Outline`] is a
//! list of contours. Both keep an axis-aligned bounding box up to date as they
//! are built.
//!
//! This crate is reexported in [pathcore](https://docs.rs/pathcore/).
//!
//! # Examples
//!
//! ```
//! # extern crate pathcore_path;
//! # fn main() {
//! use pathcore_path::{ArcDirection, Contour, Outline, Orientation};
//! use pathcore_path::math::{point, vector, RectF};
//!
//! // A rounded square with a half-circle bump on top.
//! let mut bump = Contour::new();
//! bump.push_endpoint(point(0.0, 0.0));
//! bump.push_svg_arc(vector(5.0, 5.0), 0.0, false, ArcDirection::CW, point(10.0, 0.0));
//! bump.close();
//!
//! let mut outline = Outline::from_rect_rounded(
//!     &RectF::new(point(0.0, 0.0), point(10.0, 10.0)),
//!     vector(2.0, 2.0),
//! );
//! outline.push_contour(bump);
//!
//! assert_eq!(outline.len(), 2);
//! assert!(outline.bounds().min_y() < -4.9);
//! assert_eq!(Orientation::from_outline(&outline), Orientation::Cw);
//! # }
//! ```

pub use pathcore_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

#[macro_use]
extern crate log;

mod contour;
mod orientation;
mod outline;

#[doc(inline)]
pub use crate::contour::{
    ArcDirection, Contour, ContourIterFlags, ContourPoint, PointKind, PushSegmentFlags,
    SegmentIter,
};
#[doc(inline)]
pub use crate::orientation::{orientation_of, Orientation};
#[doc(inline)]
pub use crate::outline::Outline;

pub mod math {
    //! The geometry types used throughout this crate, reexported from `pathcore_geom`.

    pub use crate::geom::{
        int_point, int_vector, point, size, vector, IntPoint, IntVector, LineSegment2F,
        Matrix2x2F, Point, RectF, RectI, Size, Transform2F, UnitVector, Vector,
    };
}
