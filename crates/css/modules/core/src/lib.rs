//! Layout-side core of CSS Shapes Level 1: float geometry, reference boxes,
//! the shape-boundary family consulted during line layout, and the collision
//! adapter that narrows line intervals against active floats.
//!
//! Everything here is synchronous and single-threaded: boundaries are value
//! objects built once per layout pass and queried read-only, with no shared
//! mutable state. Image decoding happens inline through a caller-supplied
//! fetcher.

#![forbid(unsafe_code)]

pub mod boundary;
pub mod exclusion_space;
pub mod float_box;
pub mod image_shape;
pub mod resolve;

pub use boundary::{
    BoxBounds, CircleBounds, EllipseBounds, InsetBounds, PolygonBounds, ShapeBoundary,
};
pub use exclusion_space::{ExclusionSpace, FloatExclusion, LineBand, LinePlacement};
pub use float_box::{CornerRadii, Edges, FloatBox, FloatSide, ReferenceRect};
pub use image_shape::{AlphaMap, DataUrlFetcher, FetchedResource, FileFetcher, ImageBounds, UrlFetcher};
pub use resolve::{ShapeStyle, create_shape_boundary};
