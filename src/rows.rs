//! Row packing for the wide export.
//!
//! Two passes over the same walk: the first measures the natural height at
//! scale 1, the second places stacks at the resolved scale. Horizontal
//! margins never scale; card size, gaps, stack offset and category gap do.

use crate::config::{CanvasSize, RowConfig};
use crate::geometry::{Rect, stack_width};
use crate::group::{CategoryGroup, GroupedCard};
use crate::plan::{DrawCommand, ImageRole};

/// Scaled row metrics for one pass.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Metrics {
    card_width: f32,
    card_height: f32,
    gap_x: f32,
    gap_y: f32,
    stack_offset: f32,
    category_gap: f32,
}

impl Metrics {
    fn scaled(config: &RowConfig, scale: f32) -> Self {
        Self {
            card_width: config.card_width * scale,
            card_height: config.card_height * scale,
            gap_x: config.gap_x * scale,
            gap_y: config.gap_y * scale,
            stack_offset: config.stack_offset * scale,
            category_gap: config.category_gap * scale,
        }
    }
}

/// Walk all stacks, calling `place(item, x, y)` with `y` relative to the
/// layout top. Returns the used height.
///
/// A stack wraps whenever it would cross the right margin, even from an
/// empty row. A stack wider than the row then sits alone below a blank row
/// and overflows the margin.
fn walk<'a>(
    groups: &[CategoryGroup<'a>],
    config: &RowConfig,
    canvas_width: f32,
    m: Metrics,
    mut place: impl FnMut(GroupedCard<'a>, f32, f32),
) -> f32 {
    let left = config.margin_left;
    let right = canvas_width - config.margin_right;
    let mut y = 0.0;

    for group in groups {
        y += m.category_gap;
        let mut x = left;
        for &item in &group.cards {
            let width = stack_width(m.card_width, item.quantity, m.stack_offset);
            if x + width > right {
                x = left;
                y += m.card_height + m.gap_y;
            }
            place(item, x, y);
            x += width + m.gap_x;
        }
        y += m.card_height + m.gap_y;
    }
    y
}

/// Natural height of the packed rows at scale 1.
pub fn measure(groups: &[CategoryGroup<'_>], config: &RowConfig, canvas_width: f32) -> f32 {
    walk(
        groups,
        config,
        canvas_width,
        Metrics::scaled(config, 1.0),
        |_, _, _| {},
    )
}

/// Fill scale: grow to fill `available` up to `max_scale`, never shrink.
///
/// ```
/// use deck_export::rows::resolve_scale;
///
/// assert_eq!(resolve_scale(500.0, 600.0, 1.4), 1.2);
/// assert_eq!(resolve_scale(100.0, 800.0, 1.4), 1.4);
/// assert_eq!(resolve_scale(900.0, 800.0, 1.4), 1.0);
/// assert_eq!(resolve_scale(0.0, 800.0, 1.4), 1.0);
/// ```
pub fn resolve_scale(used_height: f32, available_height: f32, max_scale: f32) -> f32 {
    if used_height <= 0.0 {
        return 1.0;
    }
    let ratio = available_height / used_height;
    if ratio > 1.0 { ratio.min(max_scale) } else { 1.0 }
}

/// Plan every copy of every stack, returning the resolved scale.
///
/// Each copy is an [`ImageRole::Card`] command; copies in a stack share `y`
/// and step right by the scaled stack offset, earlier copies underneath.
pub fn plan_rows(
    groups: &[CategoryGroup<'_>],
    config: &RowConfig,
    canvas: CanvasSize,
    layout_top: f32,
    out: &mut Vec<DrawCommand>,
) -> f32 {
    let canvas_width = canvas.width as f32;
    let used = measure(groups, config, canvas_width);
    let available = canvas.height as f32 - layout_top - config.bottom_margin;
    let scale = resolve_scale(used, available, config.max_scale);
    log::debug!("rows: used {used:.1} of {available:.1}, scale {scale:.3}");

    let m = Metrics::scaled(config, scale);
    walk(groups, config, canvas_width, m, |item, x, y| {
        for i in 0..item.quantity {
            out.push(DrawCommand::Image {
                reference: item.card.image.clone(),
                rect: Rect::new(
                    x + i as f32 * m.stack_offset,
                    layout_top + y,
                    m.card_width,
                    m.card_height,
                ),
                role: ImageRole::Card(item.card.id),
            });
        }
    });
    scale
}
