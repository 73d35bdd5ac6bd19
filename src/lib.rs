#![deny(bare_trait_objects)]

//! Vector path geometry for 2D renderers.
//!
//! This crate reexports the pathcore sub-crates:
//!
//! - [`geom`]: affine transforms, line segments, rectangles and bézier segments.
//! - [`path`]: contours, outlines and their orientation.
//!
//! ```
//! use pathcore::math::{point, vector, RectF, Transform2F};
//! use pathcore::path::{Orientation, Outline};
//!
//! let mut outline = Outline::from_rect_rounded(
//!     &RectF::new(point(0.0, 0.0), point(100.0, 50.0)),
//!     vector(8.0, 8.0),
//! );
//! outline.transform(&Transform2F::from_uniform_scale(0.5));
//!
//! assert_eq!(outline.bounds(), RectF::new(point(0.0, 0.0), point(50.0, 25.0)));
//! assert_eq!(Orientation::from_outline(&outline), Orientation::Cw);
//! ```

pub extern crate pathcore_geom;
pub extern crate pathcore_path;

pub use pathcore_geom as geom;
pub use pathcore_path as path;

pub use path::math;
