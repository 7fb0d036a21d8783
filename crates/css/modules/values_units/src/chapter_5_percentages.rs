//! CSS Values & Units Level 3 — §5 Percentages
//! Spec: <https://www.w3.org/TR/css-values-3/#percentages>

use crate::ParseError;
use crate::chapter_6_dimensions::{Length, LengthResolver, parse_length};
use cssparser::{Parser, Token};
use std::fmt;

/// A CSS <percentage>
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Percentage(pub f32); // stored as 0.0..=1.0

impl fmt::Display for Percentage {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}%", self.0 * 100.0)
    }
}

/// Parse a CSS <percentage> (§5.1).
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` when the next token is not a
/// `<percentage>`.
pub fn parse_percentage(input: &mut Parser) -> Result<Percentage, ParseError> {
    if let Ok(token) = input.next()
        && let Token::Percentage { unit_value, .. } = *token
    {
        return Ok(Percentage(unit_value));
    }
    Err(ParseError::UnexpectedToken)
}

/// A value that is either a <length> or a <percentage>, resolved against a
/// reference length at used-value time (§5.1).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LengthPercentage {
    Length(Length),
    Percentage(Percentage),
}

impl LengthPercentage {
    /// A pixel length.
    pub fn px(value: f32) -> Self {
        Self::Length(Length::px(value))
    }

    /// A percentage from the human-readable 0..=100 scale.
    pub fn percent(value: f32) -> Self {
        Self::Percentage(Percentage(value / 100.0))
    }

    /// Resolve to pixels against `basis_px` (the reference length that
    /// percentages measure).
    pub fn resolve(self, basis_px: f32, resolver: &LengthResolver) -> f32 {
        match self {
            Self::Length(length) => length.to_px(resolver),
            Self::Percentage(percentage) => percentage.0 * basis_px,
        }
    }

    /// Whether the specified value is negative. Percentages compare on their
    /// raw fraction; lengths on their raw value (all supported units carry
    /// positive factors).
    pub fn is_negative(self) -> bool {
        match self {
            Self::Length(length) => length.value < 0.0,
            Self::Percentage(percentage) => percentage.0 < 0.0,
        }
    }
}

impl fmt::Display for LengthPercentage {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length(length) => length.fmt(formatter),
            Self::Percentage(percentage) => percentage.fmt(formatter),
        }
    }
}

/// Parse a CSS <length-percentage>.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` when the next token is neither a
/// supported `<length>` nor a `<percentage>`.
pub fn parse_length_percentage(input: &mut Parser) -> Result<LengthPercentage, ParseError> {
    if let Ok(percentage) = input.try_parse(parse_percentage) {
        return Ok(LengthPercentage::Percentage(percentage));
    }
    parse_length(input).map(LengthPercentage::Length)
}

/// Parse a non-negative <length-percentage>.
///
/// # Errors
/// Returns `ParseError::NegativeValue` for a negative value and
/// `ParseError::UnexpectedToken` for anything that is not a
/// `<length-percentage>`.
pub fn parse_non_negative_length_percentage(
    input: &mut Parser,
) -> Result<LengthPercentage, ParseError> {
    let value = parse_length_percentage(input)?;
    if value.is_negative() {
        return Err(ParseError::NegativeValue);
    }
    Ok(value)
}
