//! Text measurement and glyph outlines.
//!
//! Layout only needs advances and line metrics; the rasterizer also needs
//! outlines. Both go through [`Typeface`] so the host decides which font
//! renders (and tests can use a synthetic one).

use std::sync::Arc;

use tiny_skia::{Path, PathBuilder};
use ttf_parser::{Face, GlyphId, OutlineBuilder};

use crate::error::FontError;

/// Vertical metrics at a given size, both positive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineMetrics {
    /// Baseline to top of the line box.
    pub ascent: f32,
    /// Baseline to bottom of the line box.
    pub descent: f32,
}

impl LineMetrics {
    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// A font the engine can measure and draw with.
pub trait Typeface {
    /// Horizontal advance of `text` at `size` pixels.
    fn advance(&self, text: &str, size: f32) -> f32;

    fn line_metrics(&self, size: f32) -> LineMetrics;

    /// Outline of `text` with its baseline origin at `(x, baseline)`.
    /// `None` when nothing is visible (empty or whitespace-only text).
    fn outline(&self, text: &str, x: f32, baseline: f32, size: f32) -> Option<Path>;
}

/// TrueType/OpenType font backed by `ttf-parser`.
///
/// Shaping is not applied: glyphs come straight from the cmap and advance by
/// their horizontal metrics, which is enough for titles, labels and digits.
#[derive(Clone, Debug)]
pub struct Font {
    data: Arc<[u8]>,
    index: u32,
}

impl Font {
    /// Parse font data (face 0 of a collection).
    pub fn from_bytes(data: impl Into<Arc<[u8]>>) -> Result<Self, FontError> {
        Self::from_collection(data, 0)
    }

    pub fn from_collection(data: impl Into<Arc<[u8]>>, index: u32) -> Result<Self, FontError> {
        let data = data.into();
        Face::parse(&data, index)?;
        Ok(Self { data, index })
    }

    fn face(&self) -> Option<Face<'_>> {
        // Validated in the constructor.
        Face::parse(&self.data, self.index).ok()
    }
}

impl Typeface for Font {
    fn advance(&self, text: &str, size: f32) -> f32 {
        let Some(face) = self.face() else {
            return 0.0;
        };
        let scale = size / face.units_per_em().max(1) as f32;
        text.chars()
            .map(|ch| {
                let gid = face.glyph_index(ch).unwrap_or(GlyphId(0));
                face.glyph_hor_advance(gid).unwrap_or(0) as f32 * scale
            })
            .sum()
    }

    fn line_metrics(&self, size: f32) -> LineMetrics {
        let Some(face) = self.face() else {
            return LineMetrics {
                ascent: size,
                descent: 0.0,
            };
        };
        let scale = size / face.units_per_em().max(1) as f32;
        LineMetrics {
            ascent: face.ascender() as f32 * scale,
            descent: -(face.descender() as f32) * scale,
        }
    }

    fn outline(&self, text: &str, x: f32, baseline: f32, size: f32) -> Option<Path> {
        let face = self.face()?;
        let scale = size / face.units_per_em().max(1) as f32;
        let mut glyphs = GlyphOutline {
            builder: PathBuilder::new(),
            origin_x: x,
            origin_y: baseline,
            scale,
        };
        for ch in text.chars() {
            let gid = face.glyph_index(ch).unwrap_or(GlyphId(0));
            face.outline_glyph(gid, &mut glyphs);
            glyphs.origin_x += face.glyph_hor_advance(gid).unwrap_or(0) as f32 * scale;
        }
        glyphs.builder.finish()
    }
}

/// Collects glyph outlines into one path, flipping font units (y up) into
/// canvas space (y down).
struct GlyphOutline {
    builder: PathBuilder,
    origin_x: f32,
    origin_y: f32,
    scale: f32,
}

impl GlyphOutline {
    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (self.origin_x + x * self.scale, self.origin_y - y * self.scale)
    }
}

impl OutlineBuilder for GlyphOutline {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x, y) = self.map(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x2, y2) = self.map(x2, y2);
        let (x, y) = self.map(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
