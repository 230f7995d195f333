//! Geometry primitives: rectangles, background crop, rounded-rect paths,
//! and text-driven box sizing.
//!
//! Pure arithmetic apart from [`rounded_rect_path`], which emits a
//! `tiny_skia::Path` for the rasterizer.

use tiny_skia::{Path, PathBuilder};

use crate::config::HeaderConfig;

/// Axis-aligned rectangle in canvas pixels (top-left origin).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Square of side `size` centered on this rect's center.
    pub fn centered_square(&self, size: f32) -> Self {
        let (cx, cy) = self.center();
        Self::new(cx - size / 2.0, cy - size / 2.0, size, size)
    }

    /// `None` for empty or non-finite rects.
    pub(crate) fn to_skia(self) -> Option<tiny_skia::Rect> {
        tiny_skia::Rect::from_xywh(self.x, self.y, self.width, self.height)
    }
}

/// How the background template is mapped onto the canvas.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BackgroundCrop {
    /// Scale the whole template non-uniformly onto the canvas.
    #[default]
    StretchFit,
    /// Take a left-anchored slice matching the canvas aspect ratio, when the
    /// template is wider than the canvas. Otherwise behaves as
    /// [`StretchFit`](Self::StretchFit).
    CenterCropSquare,
}

impl BackgroundCrop {
    /// Region of the template (in template pixels) that fills the canvas.
    ///
    /// ```
    /// use deck_export::{BackgroundCrop, Rect};
    ///
    /// let r = BackgroundCrop::CenterCropSquare.source_rect(1920, 1080, 1080, 1080);
    /// assert_eq!(r, Rect::new(0.0, 0.0, 1080.0, 1080.0));
    /// ```
    pub fn source_rect(self, template_w: u32, template_h: u32, canvas_w: u32, canvas_h: u32) -> Rect {
        let (tw, th) = (template_w as f32, template_h as f32);
        let full = Rect::new(0.0, 0.0, tw, th);
        match self {
            Self::StretchFit => full,
            Self::CenterCropSquare => {
                if template_h == 0 || canvas_h == 0 {
                    return full;
                }
                let target_ratio = canvas_w as f32 / canvas_h as f32;
                // Cross-multiply to compare aspect ratios exactly.
                let wider = template_w as u64 * canvas_h as u64 > canvas_w as u64 * template_h as u64;
                if wider {
                    Rect::new(0.0, 0.0, th * target_ratio, th)
                } else {
                    full
                }
            }
        }
    }
}

/// Closed rounded-rectangle path. The radius is clamped to half the shorter
/// side, so `radius = height / 2` yields a pill.
pub fn rounded_rect_path(rect: Rect, radius: f32) -> Option<Path> {
    if !(rect.width > 0.0 && rect.height > 0.0) {
        return None;
    }
    let r = radius.max(0.0).min(rect.width / 2.0).min(rect.height / 2.0);
    if r == 0.0 {
        return rect.to_skia().map(PathBuilder::from_rect);
    }

    // Cubic approximation of a quarter circle.
    const KAPPA: f32 = 0.552_284_8;
    let k = r * KAPPA;
    let (l, t, rt, b) = (rect.x, rect.y, rect.right(), rect.bottom());

    let mut pb = PathBuilder::new();
    pb.move_to(l + r, t);
    pb.line_to(rt - r, t);
    pb.cubic_to(rt - r + k, t, rt, t + r - k, rt, t + r);
    pb.line_to(rt, b - r);
    pb.cubic_to(rt, b - r + k, rt - r + k, b, rt - r, b);
    pb.line_to(l + r, b);
    pb.cubic_to(l + r - k, b, l, b - r + k, l, b - r);
    pb.line_to(l, t + r);
    pb.cubic_to(l, t + r - k, l + r - k, t, l + r, t);
    pb.close();
    pb.finish()
}

/// Chip width from the measured label and count widths.
pub fn chip_width(label_width: f32, count_width: f32, header: &HeaderConfig) -> f32 {
    2.0 * header.chip_padding
        + label_width.max(count_width)
        + header.chip_inner_gap
        + header.icon_box
}

/// Width of a stack of `quantity` copies fanned by `offset`.
pub fn stack_width(card_width: f32, quantity: u32, offset: f32) -> f32 {
    card_width + quantity.saturating_sub(1) as f32 * offset
}
