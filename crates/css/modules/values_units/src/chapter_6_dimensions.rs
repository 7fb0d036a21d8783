//! CSS Values & Units Level 3 — §6 Dimensions (Lengths subset)
//! Spec: <https://www.w3.org/TR/css-values-3/#lengths>

use crate::ParseError;
use cssparser::{Parser, Token};
use std::fmt;

/// Supported subset of CSS <length>: the absolute units plus em/rem and
/// unitless zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthUnit {
    Pixels,
    Ems,
    RootEms,
    Inches,
    Centimeters,
    Millimeters,
    QuarterMillimeters,
    Points,
    Picas,
}

impl LengthUnit {
    /// Pixels per one unit for the absolute units (CSS §6.2: 1in = 96px).
    /// Font-relative units have no fixed factor and return `None`.
    fn pixels_per_unit(self) -> Option<f32> {
        match self {
            Self::Pixels => Some(1.0),
            Self::Inches => Some(96.0),
            Self::Centimeters => Some(96.0 / 2.54),
            Self::Millimeters => Some(96.0 / 25.4),
            Self::QuarterMillimeters => Some(96.0 / 101.6),
            Self::Points => Some(96.0 / 72.0),
            Self::Picas => Some(16.0),
            Self::Ems | Self::RootEms => None,
        }
    }

    /// The canonical unit suffix used when serializing.
    fn suffix(self) -> &'static str {
        match self {
            Self::Pixels => "px",
            Self::Ems => "em",
            Self::RootEms => "rem",
            Self::Inches => "in",
            Self::Centimeters => "cm",
            Self::Millimeters => "mm",
            Self::QuarterMillimeters => "q",
            Self::Points => "pt",
            Self::Picas => "pc",
        }
    }
}

/// A CSS <length> value with unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Length {
    pub value: f32,
    pub unit: LengthUnit,
}

impl Length {
    /// A pixel length.
    pub fn px(value: f32) -> Self {
        Self {
            value,
            unit: LengthUnit::Pixels,
        }
    }

    /// Compute the used pixel value using the given environment.
    pub fn to_px(self, resolver: &LengthResolver) -> f32 {
        match self.unit {
            LengthUnit::Ems => self.value * resolver.font_size_px,
            LengthUnit::RootEms => self.value * resolver.root_font_size_px,
            unit => self.value * unit.pixels_per_unit().unwrap_or(1.0),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}{}", self.value, self.unit.suffix())
    }
}

/// Environment needed to resolve font-relative lengths.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LengthResolver {
    /// Used font size of the element, in pixels.
    pub font_size_px: f32,
    /// Used font size of the root element, in pixels.
    pub root_font_size_px: f32,
}

impl Default for LengthResolver {
    fn default() -> Self {
        Self {
            font_size_px: 16.0,
            root_font_size_px: 16.0,
        }
    }
}

fn unit_from_name(name: &str) -> Option<LengthUnit> {
    let lower = name.to_ascii_lowercase();
    match lower.as_str() {
        "px" => Some(LengthUnit::Pixels),
        "em" => Some(LengthUnit::Ems),
        "rem" => Some(LengthUnit::RootEms),
        "in" => Some(LengthUnit::Inches),
        "cm" => Some(LengthUnit::Centimeters),
        "mm" => Some(LengthUnit::Millimeters),
        "q" => Some(LengthUnit::QuarterMillimeters),
        "pt" => Some(LengthUnit::Points),
        "pc" => Some(LengthUnit::Picas),
        _ => None,
    }
}

/// Parse a CSS <length> (§6.2). Supports the absolute units, em/rem and
/// unitless zero per spec.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` when the next token is not a
/// supported `<length>`.
pub fn parse_length(input: &mut Parser) -> Result<Length, ParseError> {
    let token = match input.next() {
        Ok(token) => token.clone(),
        Err(_) => return Err(ParseError::UnexpectedToken),
    };
    match token {
        Token::Dimension { value, unit, .. } => match unit_from_name(unit.as_ref()) {
            Some(unit_kind) => Ok(Length {
                value,
                unit: unit_kind,
            }),
            None => Err(ParseError::UnexpectedToken),
        },
        Token::Number { value, .. } if value == 0.0 => Ok(Length::px(0.0)),
        _ => Err(ParseError::UnexpectedToken),
    }
}
