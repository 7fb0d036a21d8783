//! CSS Shapes Module Level 1 — `shape-outside`, `shape-margin` and
//! `shape-image-threshold` value model, parsing and serialization.
//! Spec: <https://www.w3.org/TR/css-shapes-1/>
//!
//! The crate covers the specified-value side only: the layout-side boundary
//! geometry that consumes these values lives in `css_core`.

#![forbid(unsafe_code)]

pub mod chapter_3_supported_shapes;
pub mod chapter_6_declaring_shapes;

pub use chapter_3_supported_shapes::{
    BasicShape, FillRule, InsetRect, PolygonPoint, ShapePosition, ShapeRadius, parse_basic_shape,
};
pub use chapter_6_declaring_shapes::{
    ReferenceBox, ShapeOutside, SpecifiedShapeOutside, parse_reference_box, parse_shape_image_threshold_value,
    parse_shape_margin_value, parse_shape_outside, parse_shape_outside_value, shape_image_threshold_or_zero,
    shape_margin_or_zero, shape_outside_or_none,
};

/// Reasons a shape property declaration is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeParseError {
    /// A token did not match the shape grammar.
    UnexpectedToken,
    /// `polygon()` listed fewer than three vertices.
    PolygonTooFewPoints,
    /// `inset()` listed more than four offsets.
    InsetTooManyOffsets,
    /// `shape-margin` was given a negative value.
    NegativeShapeMargin,
}

/// Parse error carried through the tokenizer while a value is being consumed.
pub type ValueParseError<'i> = cssparser::ParseError<'i, ShapeParseError>;
