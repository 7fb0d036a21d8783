//! CSS Shapes Level 1 — §3.1 Supported Shapes (`<basic-shape>` functions)
//! Spec: <https://www.w3.org/TR/css-shapes-1/#supported-basic-shapes>

use crate::{ShapeParseError, ValueParseError};
use css_values_units::{
    LengthPercentage, parse_length_percentage, parse_non_negative_length_percentage,
};
use cssparser::Parser;
use std::fmt;

/// `<fill-rule>` for `polygon()`. Stored for fidelity; the scanline reduction
/// collapses each row to a single span and does not consult it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

impl fmt::Display for FillRule {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonZero => formatter.write_str("nonzero"),
            Self::EvenOdd => formatter.write_str("evenodd"),
        }
    }
}

/// `<shape-radius>` for `circle()` and `ellipse()`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ShapeRadius {
    #[default]
    ClosestSide,
    FarthestSide,
    Length(LengthPercentage),
}

impl fmt::Display for ShapeRadius {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClosestSide => formatter.write_str("closest-side"),
            Self::FarthestSide => formatter.write_str("farthest-side"),
            Self::Length(length) => length.fmt(formatter),
        }
    }
}

/// A resolved two-component `<position>`. Keywords canonicalize to
/// percentages at parse time (`left` → `0%`, `center` → `50%`, …).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapePosition {
    pub x: LengthPercentage,
    pub y: LengthPercentage,
}

impl Default for ShapePosition {
    fn default() -> Self {
        Self {
            x: LengthPercentage::percent(50.0),
            y: LengthPercentage::percent(50.0),
        }
    }
}

impl fmt::Display for ShapePosition {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} {}", self.x, self.y)
    }
}

/// One `polygon()` vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolygonPoint {
    pub x: LengthPercentage,
    pub y: LengthPercentage,
}

/// The `inset()` rectangle: four edge offsets plus optional corner rounding
/// (top-left, top-right, bottom-right, bottom-left).
#[derive(Clone, Debug, PartialEq)]
pub struct InsetRect {
    pub top: LengthPercentage,
    pub right: LengthPercentage,
    pub bottom: LengthPercentage,
    pub left: LengthPercentage,
    pub border_radius: Option<[LengthPercentage; 4]>,
}

/// A parsed `<basic-shape>` function.
#[derive(Clone, Debug, PartialEq)]
pub enum BasicShape {
    Circle {
        radius: ShapeRadius,
        position: ShapePosition,
    },
    Ellipse {
        radius_x: ShapeRadius,
        radius_y: ShapeRadius,
        position: ShapePosition,
    },
    Polygon {
        fill_rule: FillRule,
        points: Vec<PolygonPoint>,
    },
    Inset(InsetRect),
}

/// Parse a `<basic-shape>` function: `circle()`, `ellipse()`, `polygon()` or
/// `inset()`.
///
/// # Errors
/// Returns a parse error when the next token is not one of the four shape
/// functions or its arguments do not match the shape grammar.
pub fn parse_basic_shape<'i>(input: &mut Parser<'i, '_>) -> Result<BasicShape, ValueParseError<'i>> {
    let name = input.expect_function()?.clone();
    let lower = name.to_ascii_lowercase();
    input.parse_nested_block(|args| {
        let shape = match lower.as_str() {
            "circle" => parse_circle(args),
            "ellipse" => parse_ellipse(args),
            "polygon" => parse_polygon(args),
            "inset" => parse_inset(args),
            _ => Err(args.new_custom_error(ShapeParseError::UnexpectedToken)),
        }?;
        // Anything the shape grammar did not consume rejects the whole
        // function: optional pieces roll back their probes, so a leftover
        // token here is a negative radius, an unpaired ellipse radius, or
        // trailing junk.
        if !args.is_exhausted() {
            return Err(args.new_custom_error(ShapeParseError::UnexpectedToken));
        }
        Ok(shape)
    })
}

/// `circle( [<shape-radius>]? [ at <position> ]? )`.
/// Omitted radius defaults to `closest-side`, omitted position to `50% 50%`.
fn parse_circle<'i>(args: &mut Parser<'i, '_>) -> Result<BasicShape, ValueParseError<'i>> {
    let radius = args.try_parse(parse_shape_radius).unwrap_or_default();
    let position = parse_optional_at_position(args)?;
    Ok(BasicShape::Circle { radius, position })
}

/// `ellipse( [<shape-radius> <shape-radius>]? [ at <position> ]? )`.
/// Radii come in pairs; a single radius is not valid.
fn parse_ellipse<'i>(args: &mut Parser<'i, '_>) -> Result<BasicShape, ValueParseError<'i>> {
    let radii = args.try_parse(|nested| -> Result<_, ValueParseError<'i>> {
        let radius_x = parse_shape_radius(nested)?;
        let radius_y = parse_shape_radius(nested)?;
        Ok((radius_x, radius_y))
    });
    let (radius_x, radius_y) = radii.unwrap_or_default();
    let position = parse_optional_at_position(args)?;
    Ok(BasicShape::Ellipse {
        radius_x,
        radius_y,
        position,
    })
}

/// `polygon( [<fill-rule> ,]? [<length-percentage> <length-percentage>]# )`
/// with at least three vertices.
fn parse_polygon<'i>(args: &mut Parser<'i, '_>) -> Result<BasicShape, ValueParseError<'i>> {
    let fill_rule = args
        .try_parse(|nested| -> Result<FillRule, ValueParseError<'i>> {
            let ident = nested.expect_ident_cloned()?;
            let rule = match ident.to_ascii_lowercase().as_str() {
                "nonzero" => FillRule::NonZero,
                "evenodd" => FillRule::EvenOdd,
                _ => return Err(nested.new_custom_error(ShapeParseError::UnexpectedToken)),
            };
            nested.expect_comma()?;
            Ok(rule)
        })
        .unwrap_or_default();
    let points = args.parse_comma_separated(|nested| {
        let x = length_percentage(nested)?;
        let y = length_percentage(nested)?;
        Ok(PolygonPoint { x, y })
    })?;
    if points.len() < 3 {
        return Err(args.new_custom_error(ShapeParseError::PolygonTooFewPoints));
    }
    Ok(BasicShape::Polygon { fill_rule, points })
}

/// `inset( <length-percentage>{1,4} [ round <border-radius> ]? )`.
/// Offsets expand per the margin shorthand; corner radii per the
/// border-radius shorthand (single radius per corner).
fn parse_inset<'i>(args: &mut Parser<'i, '_>) -> Result<BasicShape, ValueParseError<'i>> {
    let mut offsets: Vec<LengthPercentage> = Vec::new();
    while let Ok(offset) = args.try_parse(length_percentage) {
        if offsets.len() == 4 {
            return Err(args.new_custom_error(ShapeParseError::InsetTooManyOffsets));
        }
        offsets.push(offset);
    }
    if offsets.is_empty() {
        return Err(args.new_custom_error(ShapeParseError::UnexpectedToken));
    }
    let (top, right, bottom, left) = expand_side_shorthand(&offsets);
    let border_radius = if args
        .try_parse(|nested| nested.expect_ident_matching("round"))
        .is_ok()
    {
        Some(parse_corner_radii(args)?)
    } else {
        None
    };
    Ok(BasicShape::Inset(InsetRect {
        top,
        right,
        bottom,
        left,
        border_radius,
    }))
}

/// Expand 1–4 side values to (top, right, bottom, left).
fn expand_side_shorthand(
    values: &[LengthPercentage],
) -> (
    LengthPercentage,
    LengthPercentage,
    LengthPercentage,
    LengthPercentage,
) {
    let top = values[0];
    let right = values.get(1).copied().unwrap_or(top);
    let bottom = values.get(2).copied().unwrap_or(top);
    let left = values.get(3).copied().unwrap_or(right);
    (top, right, bottom, left)
}

/// Parse 1–4 non-negative corner radii and expand to
/// [top-left, top-right, bottom-right, bottom-left].
fn parse_corner_radii<'i>(
    args: &mut Parser<'i, '_>,
) -> Result<[LengthPercentage; 4], ValueParseError<'i>> {
    let mut radii: Vec<LengthPercentage> = Vec::new();
    while let Ok(radius) = args.try_parse(non_negative_length_percentage) {
        if radii.len() == 4 {
            return Err(args.new_custom_error(ShapeParseError::UnexpectedToken));
        }
        radii.push(radius);
    }
    if radii.is_empty() {
        return Err(args.new_custom_error(ShapeParseError::UnexpectedToken));
    }
    let top_left = radii[0];
    let top_right = radii.get(1).copied().unwrap_or(top_left);
    let bottom_right = radii.get(2).copied().unwrap_or(top_left);
    let bottom_left = radii.get(3).copied().unwrap_or(top_right);
    Ok([top_left, top_right, bottom_right, bottom_left])
}

fn parse_shape_radius<'i>(
    input: &mut Parser<'i, '_>,
) -> Result<ShapeRadius, ValueParseError<'i>> {
    if let Ok(keyword) = input.try_parse(|nested| nested.expect_ident_cloned()) {
        return match keyword.to_ascii_lowercase().as_str() {
            "closest-side" => Ok(ShapeRadius::ClosestSide),
            "farthest-side" => Ok(ShapeRadius::FarthestSide),
            _ => Err(input.new_custom_error(ShapeParseError::UnexpectedToken)),
        };
    }
    non_negative_length_percentage(input).map(ShapeRadius::Length)
}

/// Parse `[ at <position> ]?`, defaulting to the center.
fn parse_optional_at_position<'i>(
    input: &mut Parser<'i, '_>,
) -> Result<ShapePosition, ValueParseError<'i>> {
    if input
        .try_parse(|nested| nested.expect_ident_matching("at"))
        .is_ok()
    {
        return parse_position(input);
    }
    Ok(ShapePosition::default())
}

/// One component of a `<position>` before placement is decided.
#[derive(Clone, Copy, Debug, PartialEq)]
enum PositionComponent {
    /// `left` or `right`, as a fraction of the horizontal axis.
    Horizontal(f32),
    /// `top` or `bottom`, as a fraction of the vertical axis.
    Vertical(f32),
    Center,
    Value(LengthPercentage),
}

fn parse_position_component<'i>(
    input: &mut Parser<'i, '_>,
) -> Result<PositionComponent, ValueParseError<'i>> {
    if let Ok(keyword) = input.try_parse(|nested| nested.expect_ident_cloned()) {
        return match keyword.to_ascii_lowercase().as_str() {
            "left" => Ok(PositionComponent::Horizontal(0.0)),
            "right" => Ok(PositionComponent::Horizontal(100.0)),
            "top" => Ok(PositionComponent::Vertical(0.0)),
            "bottom" => Ok(PositionComponent::Vertical(100.0)),
            "center" => Ok(PositionComponent::Center),
            _ => Err(input.new_custom_error(ShapeParseError::UnexpectedToken)),
        };
    }
    length_percentage(input).map(PositionComponent::Value)
}

/// Parse a one- or two-component `<position>`.
///
/// With two components, keywords may appear in either order only when both
/// components are keywords; once a `<length-percentage>` is involved the
/// first component is horizontal and the second vertical.
pub(crate) fn parse_position<'i>(
    input: &mut Parser<'i, '_>,
) -> Result<ShapePosition, ValueParseError<'i>> {
    let first = parse_position_component(input)?;
    let second = input.try_parse(parse_position_component).ok();
    let center = LengthPercentage::percent(50.0);
    match (first, second) {
        (PositionComponent::Horizontal(fraction), None) => Ok(ShapePosition {
            x: LengthPercentage::percent(fraction),
            y: center,
        }),
        (PositionComponent::Vertical(fraction), None) => Ok(ShapePosition {
            x: center,
            y: LengthPercentage::percent(fraction),
        }),
        (PositionComponent::Center, None) => Ok(ShapePosition::default()),
        (PositionComponent::Value(value), None) => Ok(ShapePosition { x: value, y: center }),
        (first_component, Some(second_component)) => {
            place_position_pair(input, first_component, second_component)
        }
    }
}

fn place_position_pair<'i>(
    input: &mut Parser<'i, '_>,
    first: PositionComponent,
    second: PositionComponent,
) -> Result<ShapePosition, ValueParseError<'i>> {
    let both_keywords = !matches!(first, PositionComponent::Value(_))
        && !matches!(second, PositionComponent::Value(_));
    if both_keywords {
        let mut horizontal = None;
        let mut vertical = None;
        for component in [first, second] {
            match component {
                PositionComponent::Horizontal(fraction) if horizontal.is_none() => {
                    horizontal = Some(LengthPercentage::percent(fraction));
                }
                PositionComponent::Vertical(fraction) if vertical.is_none() => {
                    vertical = Some(LengthPercentage::percent(fraction));
                }
                PositionComponent::Center => {}
                // Two keywords for the same axis.
                _ => return Err(input.new_custom_error(ShapeParseError::UnexpectedToken)),
            }
        }
        let center = LengthPercentage::percent(50.0);
        return Ok(ShapePosition {
            x: horizontal.unwrap_or(center),
            y: vertical.unwrap_or(center),
        });
    }
    // Positional form: first is horizontal, second vertical.
    let x = match first {
        PositionComponent::Horizontal(fraction) => LengthPercentage::percent(fraction),
        PositionComponent::Center => LengthPercentage::percent(50.0),
        PositionComponent::Value(value) => value,
        PositionComponent::Vertical(_) => {
            return Err(input.new_custom_error(ShapeParseError::UnexpectedToken));
        }
    };
    let y = match second {
        PositionComponent::Vertical(fraction) => LengthPercentage::percent(fraction),
        PositionComponent::Center => LengthPercentage::percent(50.0),
        PositionComponent::Value(value) => value,
        PositionComponent::Horizontal(_) => {
            return Err(input.new_custom_error(ShapeParseError::UnexpectedToken));
        }
    };
    Ok(ShapePosition { x, y })
}

fn length_percentage<'i>(
    input: &mut Parser<'i, '_>,
) -> Result<LengthPercentage, ValueParseError<'i>> {
    let location = input.current_source_location();
    parse_length_percentage(input)
        .map_err(|_| location.new_custom_error(ShapeParseError::UnexpectedToken))
}

fn non_negative_length_percentage<'i>(
    input: &mut Parser<'i, '_>,
) -> Result<LengthPercentage, ValueParseError<'i>> {
    let location = input.current_source_location();
    parse_non_negative_length_percentage(input)
        .map_err(|_| location.new_custom_error(ShapeParseError::UnexpectedToken))
}

impl fmt::Display for BasicShape {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circle { radius, position } => {
                write!(formatter, "circle({radius} at {position})")
            }
            Self::Ellipse {
                radius_x,
                radius_y,
                position,
            } => write!(formatter, "ellipse({radius_x} {radius_y} at {position})"),
            Self::Polygon { fill_rule, points } => {
                formatter.write_str("polygon(")?;
                if *fill_rule == FillRule::EvenOdd {
                    write!(formatter, "{fill_rule}, ")?;
                }
                for (index, point) in points.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{} {}", point.x, point.y)?;
                }
                formatter.write_str(")")
            }
            Self::Inset(inset) => inset.fmt(formatter),
        }
    }
}

impl fmt::Display for InsetRect {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("inset(")?;
        write_side_shorthand(
            formatter,
            [&self.top, &self.right, &self.bottom, &self.left],
        )?;
        if let Some(radii) = &self.border_radius {
            formatter.write_str(" round ")?;
            write_corner_shorthand(formatter, [&radii[0], &radii[1], &radii[2], &radii[3]])?;
        }
        formatter.write_str(")")
    }
}

/// Serialize (top, right, bottom, left) in the shortest shorthand form.
fn write_side_shorthand(
    formatter: &mut fmt::Formatter<'_>,
    sides: [&LengthPercentage; 4],
) -> fmt::Result {
    let [top, right, bottom, left] = sides;
    if left == right {
        if bottom == top {
            if right == top {
                write!(formatter, "{top}")
            } else {
                write!(formatter, "{top} {right}")
            }
        } else {
            write!(formatter, "{top} {right} {bottom}")
        }
    } else {
        write!(formatter, "{top} {right} {bottom} {left}")
    }
}

/// Serialize (top-left, top-right, bottom-right, bottom-left) radii in the
/// shortest shorthand form.
fn write_corner_shorthand(
    formatter: &mut fmt::Formatter<'_>,
    corners: [&LengthPercentage; 4],
) -> fmt::Result {
    let [top_left, top_right, bottom_right, bottom_left] = corners;
    if bottom_left == top_right {
        if bottom_right == top_left {
            if top_right == top_left {
                write!(formatter, "{top_left}")
            } else {
                write!(formatter, "{top_left} {top_right}")
            }
        } else {
            write!(formatter, "{top_left} {top_right} {bottom_right}")
        }
    } else {
        write!(
            formatter,
            "{top_left} {top_right} {bottom_right} {bottom_left}"
        )
    }
}
