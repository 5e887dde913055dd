//! Pattern matching over OCR tokens and blackout of matched boxes.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use regex::Regex;

use crate::config::Padding;
use crate::error::{RedactError, Result};
use crate::ocr::{BoundingBox, OcrToken};

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Built-in patterns for identity cards: names are runs of capitals, dates
/// are DD/MM/YYYY, and PAN numbers start with five letters, four digits and
/// a letter. The PAN pattern has no end anchor.
pub const DEFAULT_PATTERNS: &[(&str, &str)] = &[
    ("Name", r"^[A-Z\s]+$"),
    ("Father's Name", r"^[A-Z\s]+$"),
    ("Date of Birth", r"^\d{2}/\d{2}/\d{4}$"),
    ("PAN Number", r"^[A-Z]{5}\d{4}[A-Z]"),
];

/// Ordered set of labelled patterns. A token is sensitive when any of them
/// matches; labels only show up in logs.
#[derive(Debug, Clone)]
pub struct PatternTable {
    patterns: Vec<(String, Regex)>,
}

impl PatternTable {
    pub fn new(patterns: &[(&str, &str)]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|(label, pattern)| {
                Regex::new(pattern)
                    .map(|re| (label.to_string(), re))
                    .map_err(|source| RedactError::Pattern {
                        label: label.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn default_table() -> Result<Self> {
        Self::new(DEFAULT_PATTERNS)
    }

    /// Label of the first pattern that matches `text`.
    pub fn matching_label(&self, text: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|(_, re)| re.is_match(text))
            .map(|(label, _)| label.as_str())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionRegion {
    pub bbox: BoundingBox,
    pub label: String,
}

/// One region per token whose text matches any pattern, in token order.
/// Overlapping or duplicate boxes are kept as they are.
pub fn find_regions(tokens: &[OcrToken], patterns: &PatternTable) -> Vec<RedactionRegion> {
    tokens
        .iter()
        .filter_map(|token| {
            let label = patterns.matching_label(&token.text)?;
            tracing::debug!(label, bbox = %token.bbox, "token matched");
            Some(RedactionRegion {
                bbox: token.bbox,
                label: label.to_string(),
            })
        })
        .collect()
}

/// Paints every region solid black and returns how many touched the image.
/// Parts outside the image are clipped; empty boxes are skipped.
pub fn apply_regions(image: &mut RgbImage, regions: &[RedactionRegion], padding: Padding) -> usize {
    let mut painted = 0;
    for region in regions {
        let bbox = region.bbox;
        if bbox.is_empty() {
            tracing::debug!(label = %region.label, bbox = %bbox, "skipping empty box");
            continue;
        }
        let Some(rect) = clip_to_image(bbox, padding, image.dimensions()) else {
            tracing::debug!(label = %region.label, bbox = %bbox, "box lies outside the image");
            continue;
        };
        draw_filled_rect_mut(image, rect, BLACK);
        painted += 1;
    }
    painted
}

/// Grows `bbox` by `padding` on every side and intersects it with the image.
fn clip_to_image(bbox: BoundingBox, padding: Padding, (width, height): (u32, u32)) -> Option<Rect> {
    let (px, py) = (i64::from(padding.x), i64::from(padding.y));
    let left = (i64::from(bbox.left) - px).max(0);
    let top = (i64::from(bbox.top) - py).max(0);
    let right = (i64::from(bbox.left) + i64::from(bbox.width) + px).min(i64::from(width));
    let bottom = (i64::from(bbox.top) + i64::from(bbox.height) + py).min(i64::from(height));
    if right <= left || bottom <= top {
        return None;
    }
    // Bounded by the image dimensions, so every value fits.
    Some(Rect::at(left as i32, top as i32).of_size((right - left) as u32, (bottom - top) as u32))
}

/// [`find_regions`] followed by [`apply_regions`] on the original image.
pub fn redact(
    image: &mut RgbImage,
    tokens: &[OcrToken],
    patterns: &PatternTable,
    padding: Padding,
) -> usize {
    let regions = find_regions(tokens, patterns);
    apply_regions(image, &regions, padding)
}
