//! Image shapes: alpha-channel extraction and the URL-fetcher seam.
//!
//! An image shape is the set of pixels whose alpha exceeds
//! `shape-image-threshold`, scaled onto the reference box. Fetching is a
//! blocking call through a caller-supplied fetcher; decode or fetch failures
//! degrade to a rectangular exclusion at the factory.

use crate::float_box::ReferenceRect;
use anyhow::{Context as _, anyhow, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use std::fs;
use std::path::PathBuf;
use url::Url;

/// Bytes returned by a fetcher, with the MIME type when known.
#[derive(Clone, Debug)]
pub struct FetchedResource {
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

/// The seam to the embedding environment: resolve a URL to bytes.
pub trait UrlFetcher {
    /// Fetch the resource behind `target`.
    ///
    /// # Errors
    /// Returns an error when the target cannot be resolved or read; the
    /// caller degrades the shape to its reference box.
    fn fetch(&self, target: &str) -> anyhow::Result<FetchedResource>;
}

/// Fetcher for `data:` URLs (base64 or verbatim payloads).
#[derive(Clone, Copy, Debug, Default)]
pub struct DataUrlFetcher;

impl UrlFetcher for DataUrlFetcher {
    fn fetch(&self, target: &str) -> anyhow::Result<FetchedResource> {
        let rest = target
            .strip_prefix("data:")
            .ok_or_else(|| anyhow!("not a data URL: {target}"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| anyhow!("malformed data URL: {target}"))?;
        let (mime_part, is_base64) = match header.strip_suffix(";base64") {
            Some(mime_part) => (mime_part, true),
            None => (header, false),
        };
        let bytes = if is_base64 {
            BASE64_STANDARD
                .decode(payload)
                .context("decoding base64 data URL payload")?
        } else {
            payload.as_bytes().to_vec()
        };
        let mime = if mime_part.is_empty() {
            None
        } else {
            Some(mime_part.to_owned())
        };
        Ok(FetchedResource { bytes, mime })
    }
}

/// Fetcher resolving `file:` URLs and bare filesystem paths.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileFetcher;

impl UrlFetcher for FileFetcher {
    fn fetch(&self, target: &str) -> anyhow::Result<FetchedResource> {
        let path = match Url::parse(target) {
            Ok(parsed) if parsed.scheme() == "file" => parsed
                .to_file_path()
                .map_err(|()| anyhow!("file URL has no local path: {target}"))?,
            Ok(parsed) if parsed.scheme().len() > 1 => {
                bail!("unsupported URL scheme '{}': {target}", parsed.scheme())
            }
            // Bare paths (and single-letter Windows drive prefixes) are read
            // directly.
            _ => PathBuf::from(target),
        };
        let bytes = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        Ok(FetchedResource { bytes, mime: None })
    }
}

/// Decoded alpha channel of an image, row-major, each value in [0, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct AlphaMap {
    width: u32,
    height: u32,
    alpha: Vec<f32>,
}

impl AlphaMap {
    /// Decode image bytes and keep the alpha channel.
    ///
    /// # Errors
    /// Returns an error when the bytes are not a decodable image.
    pub fn decode(bytes: &[u8]) -> anyhow::Result<Self> {
        let decoded = image::load_from_memory(bytes).context("decoding shape image")?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        let alpha = rgba
            .pixels()
            .map(|pixel| f32::from(pixel.0[3]) / 255.0)
            .collect();
        Ok(Self {
            width,
            height,
            alpha,
        })
    }

    /// Build directly from alpha values, row-major. Used by tests and
    /// embedders that already hold decoded pixels.
    ///
    /// # Errors
    /// Returns an error when `alpha` does not hold `width * height` values.
    pub fn from_alpha(width: u32, height: u32, alpha: Vec<f32>) -> anyhow::Result<Self> {
        if alpha.len() != (width as usize) * (height as usize) {
            bail!(
                "alpha buffer holds {} values for a {width}x{height} image",
                alpha.len()
            );
        }
        Ok(Self {
            width,
            height,
            alpha,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn row(&self, row_index: u32) -> &[f32] {
        let start = (row_index as usize) * (self.width as usize);
        &self.alpha[start..start + self.width as usize]
    }
}

/// Image boundary: per-row spans of pixels above the threshold, scaled onto
/// the reference rectangle. Row scans happen eagerly at construction so the
/// boundary stays read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageBounds {
    reference: ReferenceRect,
    image_width: u32,
    image_height: u32,
    /// Leftmost/rightmost pixel column above the threshold, per row.
    row_spans: Vec<Option<(u32, u32)>>,
}

impl ImageBounds {
    pub fn new(map: &AlphaMap, threshold: f32, reference: ReferenceRect) -> Self {
        let mut row_spans = Vec::with_capacity(map.height() as usize);
        for row_index in 0..map.height() {
            let mut span: Option<(u32, u32)> = None;
            for (column, alpha) in map.row(row_index).iter().enumerate() {
                if *alpha > threshold {
                    let column = column as u32;
                    span = Some(match span {
                        Some((first, _)) => (first, column),
                        None => (column, column),
                    });
                }
            }
            row_spans.push(span);
        }
        Self {
            reference,
            image_width: map.width(),
            image_height: map.height(),
            row_spans,
        }
    }

    pub(crate) fn bounds_at_y(&self, query_y: f32) -> Option<(f32, f32)> {
        if self.image_width == 0 || self.image_height == 0 || self.reference.height <= 0.0 {
            return None;
        }
        let relative_y = query_y - self.reference.y;
        if relative_y < 0.0 || relative_y >= self.reference.height {
            return None;
        }
        let row_index = ((relative_y / self.reference.height) * self.image_height as f32) as u32;
        let row_index = row_index.min(self.image_height - 1);
        let (first, last) = self.row_spans[row_index as usize]?;
        let pixel_width = self.reference.width / self.image_width as f32;
        let left = self.reference.x + (first as f32 / self.image_width as f32) * self.reference.width;
        let right = self.reference.x
            + (last as f32 / self.image_width as f32) * self.reference.width
            + pixel_width;
        Some((left, right))
    }

    pub(crate) fn vertical_extent(&self) -> (f32, f32) {
        let Some(first_row) = self.row_spans.iter().position(Option::is_some) else {
            return (self.reference.y, self.reference.bottom());
        };
        let last_row = self
            .row_spans
            .iter()
            .rposition(Option::is_some)
            .unwrap_or(first_row);
        let pixel_height = self.reference.height / self.image_height as f32;
        let min_y = self.reference.y
            + (first_row as f32 / self.image_height as f32) * self.reference.height;
        let max_y = self.reference.y
            + (last_row as f32 / self.image_height as f32) * self.reference.height
            + pixel_height;
        (min_y, max_y)
    }

    pub(crate) fn is_degenerate(&self) -> bool {
        self.row_spans.iter().all(Option::is_none)
    }
}
