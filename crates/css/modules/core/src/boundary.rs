//! Shape boundaries: the runtime geometry consulted during line layout.
//!
//! Every boundary answers two queries: its vertical extent, and the
//! horizontal span it occupies at a given scanline. Box-based boundaries
//! return their constant span for any `y`; the collision adapter performs
//! the vertical-overlap check before sampling.

use crate::float_box::{CornerRadii, ReferenceRect};
use crate::image_shape::ImageBounds;
use css_shapes::FillRule;
use smallvec::SmallVec;

/// Rectangular boundary tracking a reference box. Horizontal bounds follow
/// the selected box; the vertical extent is always the margin box, which is
/// the float's collision footprint.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl BoxBounds {
    /// Horizontal bounds from the selected reference box, vertical extent
    /// from the margin box.
    pub fn new(horizontal: &ReferenceRect, margin_rect: &ReferenceRect) -> Self {
        Self {
            left: horizontal.x,
            right: horizontal.right(),
            top: margin_rect.y,
            bottom: margin_rect.bottom(),
        }
    }
}

/// Circular boundary for `circle()`, in absolute coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleBounds {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
}

/// Elliptical boundary for `ellipse()`, in absolute coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EllipseBounds {
    pub center_x: f32,
    pub center_y: f32,
    pub radius_x: f32,
    pub radius_y: f32,
}

/// Polygon boundary for `polygon()`, queried by scanline intersection.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonBounds {
    points: Vec<(f32, f32)>,
    fill_rule: FillRule,
    min_y: f32,
    max_y: f32,
}

impl PolygonBounds {
    /// Build from absolute vertices. Fewer than three vertices cannot close
    /// a shape; such a polygon is degenerate.
    pub fn new(points: Vec<(f32, f32)>, fill_rule: FillRule) -> Self {
        let mut min_y = 0.0f32;
        let mut max_y = 0.0f32;
        if points.len() >= 3 {
            min_y = f32::INFINITY;
            max_y = f32::NEG_INFINITY;
            for (_, vertex_y) in &points {
                min_y = min_y.min(*vertex_y);
                max_y = max_y.max(*vertex_y);
            }
        }
        Self {
            points,
            fill_rule,
            min_y,
            max_y,
        }
    }

    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    fn is_degenerate(&self) -> bool {
        self.points.len() < 3
    }

    /// Scanline intersection collapsed to the polygon's horizontal span at
    /// `query_y`. Horizontal edges are skipped; their endpoints are covered
    /// by the adjacent edges.
    #[allow(
        clippy::float_cmp,
        reason = "exactly horizontal edges must be skipped to avoid dividing by zero"
    )]
    fn bounds_at_y(&self, query_y: f32) -> Option<(f32, f32)> {
        if self.is_degenerate() {
            return None;
        }
        if query_y < self.min_y || query_y > self.max_y {
            return None;
        }
        let mut intersections: SmallVec<f32, 8> = SmallVec::new();
        let vertex_count = self.points.len();
        for index in 0..vertex_count {
            let (start_x, start_y) = self.points[index];
            let (end_x, end_y) = self.points[(index + 1) % vertex_count];
            if start_y == end_y {
                continue;
            }
            if query_y < start_y.min(end_y) || query_y > start_y.max(end_y) {
                continue;
            }
            let fraction = (query_y - start_y) / (end_y - start_y);
            intersections.push(start_x + fraction * (end_x - start_x));
        }
        if intersections.len() < 2 {
            return None;
        }
        intersections.sort_unstable_by(f32::total_cmp);
        Some((intersections[0], intersections[intersections.len() - 1]))
    }
}

/// Inset rectangle with optional per-corner rounding, in absolute
/// coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InsetBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub corner_radii: Option<CornerRadii>,
}

impl InsetBounds {
    fn is_degenerate(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    fn bounds_at_y(&self, query_y: f32) -> Option<(f32, f32)> {
        if self.is_degenerate() {
            return None;
        }
        if query_y < self.top || query_y > self.bottom {
            return None;
        }
        let mut left = self.left;
        let mut right = self.right;
        if let Some(radii) = &self.corner_radii {
            let top_delta = query_y - self.top;
            let bottom_delta = self.bottom - query_y;
            if radii.top_left > 0.0 && top_delta < radii.top_left {
                left = left.max(self.left + corner_inset(radii.top_left, top_delta));
            }
            if radii.top_right > 0.0 && top_delta < radii.top_right {
                right = right.min(self.right - corner_inset(radii.top_right, top_delta));
            }
            if radii.bottom_left > 0.0 && bottom_delta < radii.bottom_left {
                left = left.max(self.left + corner_inset(radii.bottom_left, bottom_delta));
            }
            if radii.bottom_right > 0.0 && bottom_delta < radii.bottom_right {
                right = right.min(self.right - corner_inset(radii.bottom_right, bottom_delta));
            }
        }
        if right < left {
            return None;
        }
        Some((left, right))
    }
}

/// How far a rounded corner pushes the straight edge inward at `delta`
/// pixels from the corner's edge. The square-root argument clamps at zero
/// to absorb floating-point error at exact corner boundaries.
fn corner_inset(radius: f32, delta: f32) -> f32 {
    let sqrt_arg = (radius * radius - (radius - delta) * (radius - delta)).max(0.0);
    radius - sqrt_arg.sqrt()
}

/// The exclusion geometry of one float, as a tagged variant. The two-query
/// interface is small enough that no trait object is needed.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeBoundary {
    Box(BoxBounds),
    Circle(CircleBounds),
    Ellipse(EllipseBounds),
    Polygon(PolygonBounds),
    Inset(InsetBounds),
    /// An inner boundary dilated outward by a non-negative margin.
    Margined {
        inner: Box<ShapeBoundary>,
        margin: f32,
    },
    Image(ImageBounds),
}

impl ShapeBoundary {
    /// The vertical range the boundary can occupy.
    pub fn vertical_extent(&self) -> (f32, f32) {
        match self {
            Self::Box(bounds) => (bounds.top, bounds.bottom),
            Self::Circle(circle) => (
                circle.center_y - circle.radius,
                circle.center_y + circle.radius,
            ),
            Self::Ellipse(ellipse) => (
                ellipse.center_y - ellipse.radius_y,
                ellipse.center_y + ellipse.radius_y,
            ),
            Self::Polygon(polygon) => (polygon.min_y, polygon.max_y),
            Self::Inset(inset) => (inset.top, inset.bottom),
            Self::Margined { inner, margin } => {
                let (top, bottom) = inner.vertical_extent();
                (top - margin, bottom + margin)
            }
            Self::Image(image) => image.vertical_extent(),
        }
    }

    /// The horizontal span occupied at `query_y`, or `None` where the shape
    /// does not intersect that scanline.
    pub fn bounds_at_y(&self, query_y: f32) -> Option<(f32, f32)> {
        match self {
            Self::Box(bounds) => Some((bounds.left, bounds.right)),
            Self::Circle(circle) => {
                if circle.radius <= 0.0 {
                    return None;
                }
                let delta_y = query_y - circle.center_y;
                if delta_y.abs() > circle.radius {
                    return None;
                }
                let delta_x = (circle.radius * circle.radius - delta_y * delta_y)
                    .max(0.0)
                    .sqrt();
                Some((circle.center_x - delta_x, circle.center_x + delta_x))
            }
            Self::Ellipse(ellipse) => {
                if ellipse.radius_x <= 0.0 || ellipse.radius_y <= 0.0 {
                    return None;
                }
                let delta_y = query_y - ellipse.center_y;
                if delta_y.abs() > ellipse.radius_y {
                    return None;
                }
                let ratio =
                    (1.0 - (delta_y * delta_y) / (ellipse.radius_y * ellipse.radius_y)).max(0.0);
                let delta_x = ellipse.radius_x * ratio.sqrt();
                Some((ellipse.center_x - delta_x, ellipse.center_x + delta_x))
            }
            Self::Polygon(polygon) => polygon.bounds_at_y(query_y),
            Self::Inset(inset) => inset.bounds_at_y(query_y),
            Self::Margined { inner, margin } => margined_bounds_at_y(inner, *margin, query_y),
            Self::Image(image) => image.bounds_at_y(query_y),
        }
    }

    /// Whether the described area is empty. A degenerate boundary never
    /// reports a span; the float then presents its margin box instead.
    pub fn is_degenerate(&self) -> bool {
        match self {
            Self::Box(_) => false,
            Self::Circle(circle) => circle.radius <= 0.0,
            Self::Ellipse(ellipse) => ellipse.radius_x <= 0.0 || ellipse.radius_y <= 0.0,
            Self::Polygon(polygon) => polygon.is_degenerate(),
            Self::Inset(inset) => inset.is_degenerate(),
            Self::Margined { inner, .. } => inner.is_degenerate(),
            Self::Image(image) => image.is_degenerate(),
        }
    }
}

/// Dilation by a disc: inside the inner extent the span widens by `margin`;
/// in the cap zones above and below, the widening follows a circular cap
/// sampled at the inner edge. Exact along straight sides, a circular join
/// near corners.
fn margined_bounds_at_y(
    inner: &ShapeBoundary,
    margin: f32,
    query_y: f32,
) -> Option<(f32, f32)> {
    let (inner_top, inner_bottom) = inner.vertical_extent();
    if query_y < inner_top - margin || query_y > inner_bottom + margin {
        return None;
    }
    if query_y >= inner_top && query_y <= inner_bottom {
        return inner
            .bounds_at_y(query_y)
            .map(|(left, right)| (left - margin, right + margin));
    }
    let (anchor_y, delta_y) = if query_y < inner_top {
        (inner_top, inner_top - query_y)
    } else {
        (inner_bottom, query_y - inner_bottom)
    };
    let (left, right) = inner.bounds_at_y(anchor_y)?;
    let delta_x = (margin * margin - delta_y * delta_y).max(0.0).sqrt();
    let center = (left + right) / 2.0;
    let half_width = (right - left) / 2.0 + delta_x;
    Some((center - half_width, center + half_width))
}
