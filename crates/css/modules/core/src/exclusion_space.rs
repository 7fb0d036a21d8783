//! Exclusion space: the collision adapter between shape boundaries and line
//! layout.
//!
//! Line layout asks, per candidate line band, which horizontal interval
//! remains once every active float's shape is avoided. Floats whose shape is
//! narrower than their margin box yield a strictly larger interval than the
//! rectangular wrap would.

use crate::boundary::ShapeBoundary;
use crate::float_box::{FloatBox, FloatSide, ReferenceRect};
use crate::image_shape::UrlFetcher;
use crate::resolve::{ShapeStyle, create_shape_boundary};
use css_values_units::LengthResolver;
use log::debug;

/// The vertical band a candidate line occupies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineBand {
    pub top: f32,
    pub bottom: f32,
}

/// The horizontal interval available to a line, or the signal that the line
/// must be pushed down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LinePlacement {
    Fit { left: f32, right: f32 },
    NoFit,
}

/// One active float: its side, its cached shape boundary, and its margin
/// box (the fallback footprint for degenerate shapes).
#[derive(Clone, Debug, PartialEq)]
pub struct FloatExclusion {
    pub side: FloatSide,
    pub boundary: ShapeBoundary,
    pub margin_rect: ReferenceRect,
}

impl FloatExclusion {
    /// Build the exclusion for a freshly positioned float, constructing and
    /// caching its boundary.
    pub fn new(
        float_box: &FloatBox,
        style: &ShapeStyle,
        resolver: &LengthResolver,
        fetcher: Option<&dyn UrlFetcher>,
    ) -> Self {
        Self {
            side: float_box.side,
            boundary: create_shape_boundary(float_box, style, resolver, fetcher),
            margin_rect: float_box.margin_rect(),
        }
    }

    /// The horizontal span this float occupies across `band`, as the union
    /// of the boundary's spans at the band edges. Degenerate boundaries fall
    /// back to the margin box.
    fn band_span(&self, band: LineBand) -> Option<(f32, f32)> {
        // Extents are half-open at the bottom: a band starting exactly at a
        // float's lower edge is clear of it.
        if self.boundary.is_degenerate() {
            if band.bottom <= self.margin_rect.y || band.top >= self.margin_rect.bottom() {
                return None;
            }
            return Some((self.margin_rect.x, self.margin_rect.right()));
        }
        let (extent_top, extent_bottom) = self.boundary.vertical_extent();
        if band.bottom <= extent_top || band.top >= extent_bottom {
            return None;
        }
        let sample_top = band.top.max(extent_top);
        let sample_bottom = band.bottom.min(extent_bottom);
        let mut union: Option<(f32, f32)> = None;
        for sample_y in [sample_top, sample_bottom] {
            if let Some((left, right)) = self.boundary.bounds_at_y(sample_y) {
                union = Some(match union {
                    Some((union_left, union_right)) => {
                        (union_left.min(left), union_right.max(right))
                    }
                    None => (left, right),
                });
            }
        }
        union
    }

    /// The lowest `y` this exclusion can affect.
    fn lower_edge(&self) -> f32 {
        if self.boundary.is_degenerate() {
            self.margin_rect.bottom()
        } else {
            self.boundary.vertical_extent().1.max(self.margin_rect.bottom())
        }
    }
}

/// Active floats within one block formatting context.
#[derive(Clone, Debug, Default)]
pub struct ExclusionSpace {
    left_floats: Vec<FloatExclusion>,
    right_floats: Vec<FloatExclusion>,
}

impl ExclusionSpace {
    /// Create an empty exclusion space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a positioned float.
    pub fn add_float(&mut self, exclusion: FloatExclusion) {
        match exclusion.side {
            FloatSide::Left => self.left_floats.push(exclusion),
            FloatSide::Right => self.right_floats.push(exclusion),
        }
    }

    /// Narrow the containing-block interval for a line band.
    ///
    /// Left floats raise the left edge to their span's right bound; right
    /// floats lower the right edge to their span's left bound. When the
    /// remaining width drops below `min_width` the caller must push the band
    /// down (`next_band_below`) and retry.
    pub fn narrow_line_interval(
        &self,
        band: LineBand,
        containing: (f32, f32),
        min_width: f32,
    ) -> LinePlacement {
        let (mut available_left, mut available_right) = containing;
        for exclusion in &self.left_floats {
            if let Some((_, span_right)) = exclusion.band_span(band) {
                available_left = available_left.max(span_right);
            }
        }
        for exclusion in &self.right_floats {
            if let Some((span_left, _)) = exclusion.band_span(band) {
                available_right = available_right.min(span_left);
            }
        }
        debug!(
            "[LINE-BANDS] band=[{}, {}] containing=[{}, {}] -> available=[{available_left}, {available_right}]",
            band.top, band.bottom, containing.0, containing.1
        );
        if available_right - available_left < min_width {
            return LinePlacement::NoFit;
        }
        LinePlacement::Fit {
            left: available_left,
            right: available_right,
        }
    }

    /// The nearest float lower edge strictly below `query_y`: the next
    /// candidate position after a `NoFit`.
    pub fn next_band_below(&self, query_y: f32) -> Option<f32> {
        self.left_floats
            .iter()
            .chain(&self.right_floats)
            .map(FloatExclusion::lower_edge)
            .filter(|edge| *edge > query_y)
            .fold(None, |lowest: Option<f32>, edge| {
                Some(lowest.map_or(edge, |current| current.min(edge)))
            })
    }

    /// The bottom edge of the deepest exclusion, where all floats end.
    pub fn last_float_bottom(&self) -> f32 {
        self.left_floats
            .iter()
            .chain(&self.right_floats)
            .map(FloatExclusion::lower_edge)
            .fold(0.0, f32::max)
    }
}
