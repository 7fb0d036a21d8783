//! CSS Shapes Level 1 — §6 Declaring Shapes
//! Spec: <https://www.w3.org/TR/css-shapes-1/#declaring-shapes>
//!
//! `shape-outside` picks the exclusion geometry of a float; `shape-margin`
//! expands it; `shape-image-threshold` selects the alpha cutoff for image
//! shapes.

use crate::chapter_3_supported_shapes::{BasicShape, parse_basic_shape};
use crate::{ShapeParseError, ValueParseError};
use css_values_units::{LengthPercentage, parse_non_negative_length_percentage};
use cssparser::{Parser, ParserInput};
use log::warn;
use std::fmt;

/// `<shape-box>`: the box whose edges a shape's coordinates and percentages
/// are resolved against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReferenceBox {
    #[default]
    MarginBox,
    BorderBox,
    PaddingBox,
    ContentBox,
}

impl ReferenceBox {
    fn from_ident(lower: &str) -> Option<Self> {
        match lower {
            "margin-box" => Some(Self::MarginBox),
            "border-box" => Some(Self::BorderBox),
            "padding-box" => Some(Self::PaddingBox),
            "content-box" => Some(Self::ContentBox),
            _ => None,
        }
    }
}

impl fmt::Display for ReferenceBox {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MarginBox => formatter.write_str("margin-box"),
            Self::BorderBox => formatter.write_str("border-box"),
            Self::PaddingBox => formatter.write_str("padding-box"),
            Self::ContentBox => formatter.write_str("content-box"),
        }
    }
}

/// Computed `shape-outside` value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ShapeOutside {
    /// No shape: the float's margin box is the exclusion.
    #[default]
    None,
    /// A box keyword alone: that box edge is the shape.
    Box(ReferenceBox),
    /// A basic shape resolved against a reference box.
    Shape {
        shape: BasicShape,
        reference_box: ReferenceBox,
    },
    /// An image whose alpha channel defines the shape.
    Image {
        url: String,
        reference_box: ReferenceBox,
    },
}

impl fmt::Display for ShapeOutside {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => formatter.write_str("none"),
            Self::Box(reference_box) => reference_box.fmt(formatter),
            Self::Shape {
                shape,
                reference_box,
            } => write!(formatter, "{shape} {reference_box}"),
            Self::Image { url, reference_box } => {
                write!(formatter, "url(\"{url}\") {reference_box}")
            }
        }
    }
}

/// Specified `shape-outside` value. The property does not inherit by
/// default, but an explicit `inherit` is honored at cascade time.
#[derive(Clone, Debug, PartialEq)]
pub enum SpecifiedShapeOutside {
    Inherit,
    Value(ShapeOutside),
}

impl SpecifiedShapeOutside {
    /// Resolve against the parent's computed value.
    pub fn cascade(&self, parent: &ShapeOutside) -> ShapeOutside {
        match self {
            Self::Inherit => parent.clone(),
            Self::Value(value) => value.clone(),
        }
    }
}

/// Parse a `shape-outside` value:
/// `none | <shape-box> | <basic-shape> [<shape-box>]? | <shape-box>
/// <basic-shape> | <image> | inherit`.
///
/// The reference box defaults to `margin-box` when omitted.
///
/// # Errors
/// Returns a parse error when the value does not match the grammar; the
/// caller rejects the whole declaration.
pub fn parse_shape_outside<'i>(
    input: &mut Parser<'i, '_>,
) -> Result<SpecifiedShapeOutside, ValueParseError<'i>> {
    if let Ok(ident) = input.try_parse(|nested| nested.expect_ident_cloned()) {
        let lower = ident.to_ascii_lowercase();
        match lower.as_str() {
            "none" => return Ok(SpecifiedShapeOutside::Value(ShapeOutside::None)),
            "inherit" => return Ok(SpecifiedShapeOutside::Inherit),
            _ => {}
        }
        if let Some(reference_box) = ReferenceBox::from_ident(&lower) {
            // The box keyword may precede the shape function.
            if let Ok(shape) = input.try_parse(parse_basic_shape) {
                return Ok(SpecifiedShapeOutside::Value(ShapeOutside::Shape {
                    shape,
                    reference_box,
                }));
            }
            return Ok(SpecifiedShapeOutside::Value(ShapeOutside::Box(
                reference_box,
            )));
        }
        return Err(input.new_custom_error(ShapeParseError::UnexpectedToken));
    }
    if let Ok(shape) = input.try_parse(parse_basic_shape) {
        let reference_box = input.try_parse(parse_reference_box).unwrap_or_default();
        return Ok(SpecifiedShapeOutside::Value(ShapeOutside::Shape {
            shape,
            reference_box,
        }));
    }
    let url = input.expect_url()?.as_ref().to_owned();
    Ok(SpecifiedShapeOutside::Value(ShapeOutside::Image {
        url,
        reference_box: ReferenceBox::default(),
    }))
}

/// Parse a `<shape-box>` keyword.
///
/// # Errors
/// Returns a parse error when the next token is not one of the four box
/// keywords.
pub fn parse_reference_box<'i>(
    input: &mut Parser<'i, '_>,
) -> Result<ReferenceBox, ValueParseError<'i>> {
    let ident = input.expect_ident_cloned()?;
    ReferenceBox::from_ident(&ident.to_ascii_lowercase())
        .ok_or_else(|| input.new_custom_error(ShapeParseError::UnexpectedToken))
}

fn parse_entirely<T>(
    css: &str,
    parse: impl for<'i, 'tt> Fn(&mut Parser<'i, 'tt>) -> Result<T, ValueParseError<'i>>,
) -> Result<T, ShapeParseError> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    parser.parse_entirely(parse).map_err(|error| match error.kind {
        cssparser::ParseErrorKind::Custom(custom) => custom,
        cssparser::ParseErrorKind::Basic(_) => ShapeParseError::UnexpectedToken,
    })
}

/// Parse a full `shape-outside` declaration value.
///
/// # Errors
/// Returns the rejection reason when the value does not match the grammar.
pub fn parse_shape_outside_value(css: &str) -> Result<SpecifiedShapeOutside, ShapeParseError> {
    parse_entirely(css, parse_shape_outside)
}

fn parse_shape_margin<'i>(
    input: &mut Parser<'i, '_>,
) -> Result<LengthPercentage, ValueParseError<'i>> {
    let location = input.current_source_location();
    parse_non_negative_length_percentage(input).map_err(|error| match error {
        css_values_units::ParseError::NegativeValue => {
            location.new_custom_error(ShapeParseError::NegativeShapeMargin)
        }
        css_values_units::ParseError::UnexpectedToken => {
            location.new_custom_error(ShapeParseError::UnexpectedToken)
        }
    })
}

fn parse_shape_image_threshold<'i>(input: &mut Parser<'i, '_>) -> Result<f32, ValueParseError<'i>> {
    let value = input.expect_number()?;
    Ok(value.clamp(0.0, 1.0))
}

/// Parse a full `shape-margin` declaration value: a non-negative
/// `<length-percentage>`.
///
/// # Errors
/// Returns `NegativeShapeMargin` for negative values, `UnexpectedToken`
/// otherwise.
pub fn parse_shape_margin_value(css: &str) -> Result<LengthPercentage, ShapeParseError> {
    parse_entirely(css, parse_shape_margin)
}

/// Parse a full `shape-image-threshold` declaration value: a `<number>`
/// clamped to [0, 1].
///
/// # Errors
/// Returns `UnexpectedToken` when the value is not a number.
pub fn parse_shape_image_threshold_value(css: &str) -> Result<f32, ShapeParseError> {
    parse_entirely(css, parse_shape_image_threshold)
}

/// Parse `shape-outside`, falling back to `none` with a warning on invalid
/// input.
pub fn shape_outside_or_none(css: &str) -> SpecifiedShapeOutside {
    match parse_shape_outside_value(css) {
        Ok(value) => value,
        Err(error) => {
            warn!("invalid shape-outside value '{css}': {error:?}; falling back to none");
            SpecifiedShapeOutside::Value(ShapeOutside::None)
        }
    }
}

/// Parse `shape-margin`, falling back to `0` with a warning on invalid
/// input.
pub fn shape_margin_or_zero(css: &str) -> LengthPercentage {
    match parse_shape_margin_value(css) {
        Ok(value) => value,
        Err(error) => {
            warn!("invalid shape-margin value '{css}': {error:?}; falling back to 0");
            LengthPercentage::px(0.0)
        }
    }
}

/// Parse `shape-image-threshold`, falling back to `0` with a warning on
/// invalid input.
pub fn shape_image_threshold_or_zero(css: &str) -> f32 {
    match parse_shape_image_threshold_value(css) {
        Ok(value) => value,
        Err(error) => {
            warn!("invalid shape-image-threshold value '{css}': {error:?}; falling back to 0");
            0.0
        }
    }
}
