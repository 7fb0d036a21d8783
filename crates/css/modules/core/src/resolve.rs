//! Resolution of shape values against a positioned float, and the boundary
//! factory.
//!
//! Percentages measure the reference box: horizontal offsets against its
//! width, vertical against its height, circle radii against the normalized
//! diagonal, ellipse radii against their own axis. `shape-margin`
//! percentages measure the float's margin-box width, consistent with the
//! other shape measurements.

use crate::boundary::{
    BoxBounds, CircleBounds, EllipseBounds, InsetBounds, PolygonBounds, ShapeBoundary,
};
use crate::float_box::{CornerRadii, FloatBox, ReferenceRect};
use crate::image_shape::{AlphaMap, ImageBounds, UrlFetcher};
use anyhow::Context as _;
use css_shapes::{
    BasicShape, InsetRect, ReferenceBox, ShapeOutside, ShapePosition, ShapeRadius,
};
use css_values_units::{LengthPercentage, LengthResolver};
use log::{debug, warn};

/// Shape-related computed style of one float.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeStyle {
    pub shape_outside: ShapeOutside,
    pub shape_margin: LengthPercentage,
    pub shape_image_threshold: f32,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            shape_outside: ShapeOutside::None,
            shape_margin: LengthPercentage::px(0.0),
            shape_image_threshold: 0.0,
        }
    }
}

/// Build the exclusion boundary for a positioned float.
///
/// `none` and bare box keywords produce rectangles (rounded when the float
/// itself has a border-radius); shape functions produce their geometry;
/// image shapes fetch and scan their alpha channel, degrading to the
/// reference box on failure. A positive `shape-margin` wraps the result.
/// The caller caches the boundary on the float and rebuilds it when the
/// float's geometry changes.
pub fn create_shape_boundary(
    float_box: &FloatBox,
    style: &ShapeStyle,
    resolver: &LengthResolver,
    fetcher: Option<&dyn UrlFetcher>,
) -> ShapeBoundary {
    let base = create_base_boundary(float_box, style, resolver, fetcher);
    let margin = style
        .shape_margin
        .resolve(float_box.margin_width(), resolver)
        .max(0.0);
    if margin > 0.0 {
        ShapeBoundary::Margined {
            inner: Box::new(base),
            margin,
        }
    } else {
        base
    }
}

fn create_base_boundary(
    float_box: &FloatBox,
    style: &ShapeStyle,
    resolver: &LengthResolver,
    fetcher: Option<&dyn UrlFetcher>,
) -> ShapeBoundary {
    match &style.shape_outside {
        ShapeOutside::None => box_boundary(float_box, ReferenceBox::MarginBox),
        ShapeOutside::Box(reference_box) => box_boundary(float_box, *reference_box),
        ShapeOutside::Shape {
            shape,
            reference_box,
        } => {
            let reference = float_box.reference_rect(*reference_box);
            match shape {
                BasicShape::Circle { radius, position } => {
                    ShapeBoundary::Circle(resolve_circle(radius, position, &reference, resolver))
                }
                BasicShape::Ellipse {
                    radius_x,
                    radius_y,
                    position,
                } => ShapeBoundary::Ellipse(resolve_ellipse(
                    radius_x, radius_y, position, &reference, resolver,
                )),
                BasicShape::Polygon { fill_rule, points } => {
                    let absolute = points
                        .iter()
                        .map(|point| {
                            (
                                reference.x + point.x.resolve(reference.width, resolver),
                                reference.y + point.y.resolve(reference.height, resolver),
                            )
                        })
                        .collect();
                    ShapeBoundary::Polygon(PolygonBounds::new(absolute, *fill_rule))
                }
                BasicShape::Inset(inset) => {
                    ShapeBoundary::Inset(resolve_inset(inset, &reference, resolver))
                }
            }
        }
        ShapeOutside::Image { url, reference_box } => resolve_image(
            float_box,
            url,
            *reference_box,
            style.shape_image_threshold,
            fetcher,
        ),
    }
}

/// A bare box keyword: a rectangle, or a zero-inset rounded rectangle when
/// the float's own border-radius is non-zero.
fn box_boundary(float_box: &FloatBox, reference_box: ReferenceBox) -> ShapeBoundary {
    let reference = float_box.reference_rect(reference_box);
    if float_box.border_radii.is_zero() {
        ShapeBoundary::Box(BoxBounds::new(&reference, &float_box.margin_rect()))
    } else {
        ShapeBoundary::Inset(InsetBounds {
            left: reference.x,
            top: reference.y,
            right: reference.right(),
            bottom: reference.bottom(),
            corner_radii: Some(float_box.border_radii),
        })
    }
}

fn resolve_position(
    position: &ShapePosition,
    reference: &ReferenceRect,
    resolver: &LengthResolver,
) -> (f32, f32) {
    (
        reference.x + position.x.resolve(reference.width, resolver),
        reference.y + position.y.resolve(reference.height, resolver),
    )
}

fn resolve_circle(
    radius: &ShapeRadius,
    position: &ShapePosition,
    reference: &ReferenceRect,
    resolver: &LengthResolver,
) -> CircleBounds {
    let (center_x, center_y) = resolve_position(position, reference, resolver);
    let radius = match radius {
        ShapeRadius::ClosestSide => side_distances(reference, center_x, center_y)
            .into_iter()
            .fold(f32::INFINITY, f32::min),
        ShapeRadius::FarthestSide => side_distances(reference, center_x, center_y)
            .into_iter()
            .fold(f32::NEG_INFINITY, f32::max),
        ShapeRadius::Length(length) => {
            // A percentage radius measures the normalized diagonal of the
            // reference box: sqrt(w^2 + h^2) / sqrt(2).
            let basis = (reference.width * reference.width
                + reference.height * reference.height)
                .sqrt()
                / 2.0f32.sqrt();
            length.resolve(basis, resolver)
        }
    };
    CircleBounds {
        center_x,
        center_y,
        radius,
    }
}

/// Distances from the center to the four reference-box sides:
/// left, right, top, bottom.
fn side_distances(reference: &ReferenceRect, center_x: f32, center_y: f32) -> [f32; 4] {
    [
        center_x - reference.x,
        reference.right() - center_x,
        center_y - reference.y,
        reference.bottom() - center_y,
    ]
}

fn resolve_ellipse(
    radius_x: &ShapeRadius,
    radius_y: &ShapeRadius,
    position: &ShapePosition,
    reference: &ReferenceRect,
    resolver: &LengthResolver,
) -> EllipseBounds {
    let (center_x, center_y) = resolve_position(position, reference, resolver);
    let horizontal = (center_x - reference.x, reference.right() - center_x);
    let vertical = (center_y - reference.y, reference.bottom() - center_y);
    let radius_x = match radius_x {
        ShapeRadius::ClosestSide => horizontal.0.min(horizontal.1),
        ShapeRadius::FarthestSide => horizontal.0.max(horizontal.1),
        ShapeRadius::Length(length) => length.resolve(reference.width, resolver),
    };
    let radius_y = match radius_y {
        ShapeRadius::ClosestSide => vertical.0.min(vertical.1),
        ShapeRadius::FarthestSide => vertical.0.max(vertical.1),
        ShapeRadius::Length(length) => length.resolve(reference.height, resolver),
    };
    EllipseBounds {
        center_x,
        center_y,
        radius_x,
        radius_y,
    }
}

fn resolve_inset(
    inset: &InsetRect,
    reference: &ReferenceRect,
    resolver: &LengthResolver,
) -> InsetBounds {
    let corner_radii = inset.border_radius.as_ref().map(|radii| {
        // Corner radii measure the shorter reference-box axis.
        let basis = reference.width.min(reference.height);
        CornerRadii {
            top_left: radii[0].resolve(basis, resolver).max(0.0),
            top_right: radii[1].resolve(basis, resolver).max(0.0),
            bottom_right: radii[2].resolve(basis, resolver).max(0.0),
            bottom_left: radii[3].resolve(basis, resolver).max(0.0),
        }
    });
    InsetBounds {
        left: reference.x + inset.left.resolve(reference.width, resolver),
        top: reference.y + inset.top.resolve(reference.height, resolver),
        right: reference.right() - inset.right.resolve(reference.width, resolver),
        bottom: reference.bottom() - inset.bottom.resolve(reference.height, resolver),
        corner_radii,
    }
}

fn resolve_image(
    float_box: &FloatBox,
    url: &str,
    reference_box: ReferenceBox,
    threshold: f32,
    fetcher: Option<&dyn UrlFetcher>,
) -> ShapeBoundary {
    let reference = float_box.reference_rect(reference_box);
    match fetch_alpha_map(url, fetcher) {
        Ok(map) => {
            debug!(
                "[SHAPE-IMAGE] '{url}' decoded as {}x{} alpha map",
                map.width(),
                map.height()
            );
            ShapeBoundary::Image(ImageBounds::new(&map, threshold, reference))
        }
        Err(error) => {
            warn!(
                "failed to load shape image at '{url}': {error:#}; falling back to the reference box"
            );
            ShapeBoundary::Box(BoxBounds::new(&reference, &float_box.margin_rect()))
        }
    }
}

fn fetch_alpha_map(url: &str, fetcher: Option<&dyn UrlFetcher>) -> anyhow::Result<AlphaMap> {
    let fetcher = fetcher.context("no URL fetcher supplied")?;
    let resource = fetcher.fetch(url)?;
    AlphaMap::decode(&resource.bytes)
}
