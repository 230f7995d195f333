//! Rasterize an [`ExportPlan`] onto a `tiny_skia::Pixmap`.
//!
//! Commands paint in order onto a single surface. Assets load sequentially in
//! draw order through a per-export cache, so repeated art decodes once.

use tiny_skia::{FillRule, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Transform};

use crate::assets::{AssetLoader, AssetSource};
use crate::color::Color;
use crate::error::ExportError;
use crate::geometry::{BackgroundCrop, Rect, rounded_rect_path};
use crate::plan::{DrawCommand, ExportPlan};
use crate::text::Typeface;

/// Paint every command of `plan`.
///
/// Only a missing background (or an unallocatable surface) fails; any other
/// image that cannot load leaves its rect showing what is underneath.
pub fn render_plan(
    plan: &ExportPlan,
    assets: &dyn AssetSource,
    face: &dyn Typeface,
) -> Result<Pixmap, ExportError> {
    let (width, height) = (plan.canvas.width, plan.canvas.height);
    let mut pixmap = Pixmap::new(width, height).ok_or(ExportError::Surface { width, height })?;
    let mut loader = AssetLoader::new(assets);

    for cmd in &plan.commands {
        match cmd {
            DrawCommand::Background { reference, crop } => {
                let template = loader.require(reference).map_err(ExportError::Background)?;
                draw_background(&mut pixmap, template, *crop);
            }
            DrawCommand::Text {
                text,
                x,
                baseline,
                size,
                color,
            } => {
                if let Some(path) = face.outline(text, *x, *baseline, *size) {
                    pixmap.fill_path(
                        &path,
                        &fill_paint(*color),
                        FillRule::Winding,
                        Transform::identity(),
                        None,
                    );
                }
            }
            DrawCommand::RoundedRect {
                rect,
                radius,
                color,
            } => {
                if let Some(path) = rounded_rect_path(*rect, *radius) {
                    pixmap.fill_path(
                        &path,
                        &fill_paint(*color),
                        FillRule::Winding,
                        Transform::identity(),
                        None,
                    );
                }
            }
            DrawCommand::Circle {
                cx,
                cy,
                radius,
                color,
            } => {
                if let Some(path) = PathBuilder::from_circle(*cx, *cy, *radius) {
                    pixmap.fill_path(
                        &path,
                        &fill_paint(*color),
                        FillRule::Winding,
                        Transform::identity(),
                        None,
                    );
                }
            }
            DrawCommand::Image { reference, rect, .. } => {
                if let Some(image) = loader.load(reference) {
                    draw_image(&mut pixmap, image, *rect);
                }
            }
        }
    }
    Ok(pixmap)
}

fn draw_background(pixmap: &mut Pixmap, template: &Pixmap, crop: BackgroundCrop) {
    let src = crop.source_rect(
        template.width(),
        template.height(),
        pixmap.width(),
        pixmap.height(),
    );
    if !(src.width > 0.0 && src.height > 0.0) {
        return;
    }
    let sx = pixmap.width() as f32 / src.width;
    let sy = pixmap.height() as f32 / src.height;
    let ts = Transform::from_row(sx, 0.0, 0.0, sy, -src.x * sx, -src.y * sy);
    pixmap.draw_pixmap(0, 0, template.as_ref(), &image_paint(), ts, None);
}

fn draw_image(pixmap: &mut Pixmap, image: &Pixmap, rect: Rect) {
    let (src_w, src_h) = (image.width() as f32, image.height() as f32);
    if !(rect.width > 0.0 && rect.height > 0.0) {
        return;
    }
    let ts = Transform::from_row(
        rect.width / src_w,
        0.0,
        0.0,
        rect.height / src_h,
        rect.x,
        rect.y,
    );
    pixmap.draw_pixmap(0, 0, image.as_ref(), &image_paint(), ts, None);
}

fn image_paint() -> PixmapPaint {
    PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    }
}

fn fill_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    paint
}
