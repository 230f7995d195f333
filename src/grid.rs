//! Near-square grid for the square export.

use crate::config::{CanvasSize, GridConfig};
use crate::geometry::Rect;
use crate::group::GroupedCard;
use crate::plan::{DrawCommand, ImageRole};
use crate::text::Typeface;

/// Resolved grid shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridShape {
    pub cols: usize,
    pub rows: usize,
    pub cell_width: f32,
    pub cell_height: f32,
    /// Top-left of the first cell.
    pub origin_x: f32,
    pub origin_y: f32,
}

impl GridShape {
    /// Total width including gaps.
    pub fn width(&self, gap: f32) -> f32 {
        self.cols as f32 * self.cell_width + self.cols.saturating_sub(1) as f32 * gap
    }

    pub fn height(&self, gap: f32) -> f32 {
        self.rows as f32 * self.cell_height + self.rows.saturating_sub(1) as f32 * gap
    }

    /// Cell rect at `index` in row-major order.
    pub fn cell(&self, index: usize, gap: f32) -> Rect {
        let col = index % self.cols.max(1);
        let row = index / self.cols.max(1);
        Rect::new(
            self.origin_x + col as f32 * (self.cell_width + gap),
            self.origin_y + row as f32 * (self.cell_height + gap),
            self.cell_width,
            self.cell_height,
        )
    }
}

/// Columns and rows for `n` cells: `cols = ceil(sqrt(n))`,
/// `rows = ceil(n / cols)`.
///
/// ```
/// use deck_export::grid::grid_dimensions;
///
/// assert_eq!(grid_dimensions(16), (4, 4));
/// assert_eq!(grid_dimensions(17), (5, 4));
/// assert_eq!(grid_dimensions(1), (1, 1));
/// ```
pub fn grid_dimensions(n: usize) -> (usize, usize) {
    if n == 0 {
        return (0, 0);
    }
    let mut cols = (n as f64).sqrt() as usize;
    while cols * cols < n {
        cols += 1;
    }
    while cols > 1 && (cols - 1) * (cols - 1) >= n {
        cols -= 1;
    }
    (cols, n.div_ceil(cols))
}

/// Largest cell `(width, height)` with `height = width * aspect` that fits
/// `cols x rows` cells and their gaps in the available area.
pub fn fit_cell(
    cols: usize,
    rows: usize,
    available_width: f32,
    available_height: f32,
    gap: f32,
    aspect: f32,
) -> (f32, f32) {
    if cols == 0 || rows == 0 {
        return (0.0, 0.0);
    }
    let by_width = (available_width - (cols - 1) as f32 * gap) / cols as f32;
    let by_height = (available_height - (rows - 1) as f32 * gap) / rows as f32;
    let (w, h) = if by_width * aspect <= by_height {
        (by_width, by_width * aspect)
    } else {
        (by_height / aspect, by_height)
    };
    (w.max(0.0), h.max(0.0))
}

/// Plan one cell per unique card, with a quantity badge where quantity > 1.
///
/// The grid is centered horizontally and starts at `layout_top`. Returns
/// `None` (and plans nothing) for an empty deck.
pub fn plan_grid(
    cards: &[GroupedCard<'_>],
    config: &GridConfig,
    canvas: CanvasSize,
    layout_top: f32,
    face: &dyn Typeface,
    out: &mut Vec<DrawCommand>,
) -> Option<GridShape> {
    let (cols, rows) = grid_dimensions(cards.len());
    if cols == 0 {
        return None;
    }
    let canvas_width = canvas.width as f32;
    let available_width = canvas_width - 2.0 * config.margin_x;
    let available_height = canvas.height as f32 - layout_top - config.bottom_margin;
    let (cell_width, cell_height) = fit_cell(
        cols,
        rows,
        available_width,
        available_height,
        config.gap,
        config.aspect,
    );

    let mut shape = GridShape {
        cols,
        rows,
        cell_width,
        cell_height,
        origin_x: 0.0,
        origin_y: layout_top,
    };
    shape.origin_x = (canvas_width - shape.width(config.gap)) / 2.0;
    log::debug!("grid {cols}x{rows}, cell {cell_width:.1}x{cell_height:.1}");

    let metrics = face.line_metrics(config.badge_text_size);
    for (i, item) in cards.iter().enumerate() {
        let cell = shape.cell(i, config.gap);
        out.push(DrawCommand::Image {
            reference: item.card.image.clone(),
            rect: cell,
            role: ImageRole::Card(item.card.id),
        });
        if item.quantity <= 1 {
            continue;
        }

        let cx = cell.x + cell.width / 2.0;
        let cy = cell.y + config.badge_inset + config.badge_radius;
        out.push(DrawCommand::Circle {
            cx,
            cy,
            radius: config.badge_radius,
            color: config.badge_fill,
        });
        let label = item.quantity.to_string();
        let width = face.advance(&label, config.badge_text_size);
        out.push(DrawCommand::Text {
            text: label,
            x: cx - width / 2.0,
            baseline: cy - metrics.height() / 2.0 + metrics.ascent,
            size: config.badge_text_size,
            color: config.badge_text_color,
        });
    }
    Some(shape)
}
