//! Header layout: background, title and the five category chips.

use crate::ally_icon::AllyIcon;
use crate::card::Category;
use crate::config::ExportConfig;
use crate::geometry::{BackgroundCrop, Rect, chip_width};
use crate::group::CategoryCounts;
use crate::plan::{DrawCommand, ImageRole};
use crate::text::Typeface;

/// Inputs the header draws from.
#[derive(Copy, Clone, Debug)]
pub struct Header<'a> {
    pub title: &'a str,
    pub counts: &'a CategoryCounts,
    pub ally_icon: AllyIcon,
    pub crop: BackgroundCrop,
}

/// Plan the background, title and chip row, returning `layout_top`.
///
/// Chips are laid out left to right in category order, each sized to its
/// own text. A chip holds a two-line text column (label over count, each
/// line centered in the column) and a right-aligned icon box. The chip row
/// does not wrap; on a narrow canvas trailing chips may run past the edge.
pub fn plan_header(
    header: &Header<'_>,
    config: &ExportConfig,
    face: &dyn Typeface,
    out: &mut Vec<DrawCommand>,
) -> f32 {
    let h = &config.header;

    out.push(DrawCommand::Background {
        reference: config.background.clone(),
        crop: header.crop,
    });

    let title = face.line_metrics(h.title_size);
    out.push(DrawCommand::Text {
        text: header.title.to_string(),
        x: h.title_x,
        baseline: h.title_y + title.ascent,
        size: h.title_size,
        color: h.title_color,
    });

    let label_metrics = face.line_metrics(h.label_size);
    let count_metrics = face.line_metrics(h.count_size);
    let block_height = label_metrics.height() + count_metrics.height();
    let block_top = h.chip_top + (h.chip_height - block_height) / 2.0;

    let mut x = h.chip_x;
    for category in Category::ALL {
        let label = category.label();
        let count = header.counts.get(category).to_string();
        let label_width = face.advance(label, h.label_size);
        let count_width = face.advance(&count, h.count_size);
        let width = chip_width(label_width, count_width, h);
        let chip = Rect::new(x, h.chip_top, width, h.chip_height);

        out.push(DrawCommand::RoundedRect {
            rect: chip,
            radius: h.chip_height / 2.0,
            color: h.chip_color,
        });

        let column_x = x + h.chip_padding;
        let column_width = label_width.max(count_width);
        out.push(DrawCommand::Text {
            text: label.to_string(),
            x: column_x + (column_width - label_width) / 2.0,
            baseline: block_top + label_metrics.ascent,
            size: h.label_size,
            color: h.label_color,
        });
        out.push(DrawCommand::Text {
            text: count,
            x: column_x + (column_width - count_width) / 2.0,
            baseline: block_top + label_metrics.height() + count_metrics.ascent,
            size: h.count_size,
            color: h.count_color,
        });

        let icon_box = Rect::new(
            chip.right() - h.chip_padding - h.icon_box,
            h.chip_top + (h.chip_height - h.icon_box) / 2.0,
            h.icon_box,
            h.icon_box,
        );
        let reference = match category {
            Category::Ally => header.ally_icon.reference(&config.icons),
            other => config.icons.category(other),
        };
        out.push(DrawCommand::Image {
            reference: reference.to_string(),
            rect: icon_box.centered_square(h.icon_box * h.icon_fraction),
            role: ImageRole::Icon,
        });

        x += width + h.chip_gap;
    }

    h.chip_top + h.chip_height + h.bottom_margin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Race;
    use crate::text::testing::BoxFace;

    fn run(counts: CategoryCounts, ally_icon: AllyIcon) -> (f32, Vec<DrawCommand>) {
        let config = ExportConfig::default();
        let header = Header {
            title: "My Deck",
            counts: &counts,
            ally_icon,
            crop: BackgroundCrop::StretchFit,
        };
        let mut out = Vec::new();
        let top = plan_header(&header, &config, &BoxFace, &mut out);
        (top, out)
    }

    fn chips(out: &[DrawCommand]) -> Vec<Rect> {
        out.iter()
            .filter_map(|c| match c {
                DrawCommand::RoundedRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    fn icons(out: &[DrawCommand]) -> Vec<(String, Rect)> {
        out.iter()
            .filter_map(|c| match c {
                DrawCommand::Image {
                    reference,
                    rect,
                    role: ImageRole::Icon,
                } => Some((reference.clone(), *rect)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn layout_top_from_chip_row() {
        let (top, _) = run(CategoryCounts::default(), AllyIcon::Generic);
        assert_eq!(top, 128.0 + 64.0 + 28.0);
    }

    #[test]
    fn chips_are_text_sized_and_separated() {
        let counts = CategoryCounts::new([12, 3, 0, 4, 21]);
        let (_, out) = run(counts, AllyIcon::Generic);
        let chips = chips(&out);
        assert_eq!(chips.len(), 5);
        assert_eq!(chips[0].x, 60.0);
        // "Allies" at 20px on BoxFace = 60 wide; count "12" at 16px = 16.
        assert_eq!(chips[0].width, 40.0 + 60.0 + 12.0 + 44.0);
        // "Talismans" = 90 wide.
        assert_eq!(chips[2].width, 40.0 + 90.0 + 12.0 + 44.0);
        for pair in chips.windows(2) {
            assert_eq!(pair[1].x, pair[0].right() + 16.0);
        }
        for chip in &chips {
            assert_eq!(chip.y, 128.0);
            assert_eq!(chip.height, 64.0);
        }
    }

    #[test]
    fn chip_text_is_centered_in_column() {
        let (_, out) = run(CategoryCounts::new([7, 0, 0, 0, 0]), AllyIcon::Generic);
        let texts: Vec<(&str, f32, f32)> = out
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text {
                    text, x, baseline, ..
                } => Some((text.as_str(), *x, *baseline)),
                _ => None,
            })
            .collect();
        assert_eq!(texts[0].0, "My Deck");
        assert_eq!(texts[0].2, 40.0 + 56.0 * 0.8);

        // Label/count block is 20 + 16 = 36 tall, centered in 64.
        let (label, lx, lb) = texts[1];
        assert_eq!(label, "Allies");
        assert_eq!(lx, 80.0);
        assert_eq!(lb, 128.0 + 14.0 + 16.0);

        // "7" is 8 wide in a 60 wide column.
        let (count, cx, cb) = texts[2];
        assert_eq!(count, "7");
        assert_eq!(cx, 80.0 + 26.0);
        assert_eq!(cb, 128.0 + 14.0 + 20.0 + 12.8);
    }

    #[test]
    fn icon_right_aligned_and_scaled() {
        let (_, out) = run(CategoryCounts::default(), AllyIcon::Generic);
        let chip = chips(&out)[0];
        let (_, icon) = &icons(&out)[0];
        let side = 44.0 * 0.8;
        assert!((icon.width - side).abs() < 1e-4);
        let box_x = chip.right() - 20.0 - 44.0;
        assert!((icon.x - (box_x + (44.0 - side) / 2.0)).abs() < 1e-4);
        assert!((icon.center().1 - (128.0 + 32.0)).abs() < 1e-4);
    }

    #[test]
    fn ally_chip_uses_resolved_icon() {
        let (_, out) = run(CategoryCounts::default(), AllyIcon::Race(Race::Dragon));
        let refs: Vec<String> = icons(&out).into_iter().map(|(r, _)| r).collect();
        assert_eq!(
            refs,
            vec![
                "icons/race/dragon.png",
                "icons/weapon.png",
                "icons/talisman.png",
                "icons/totem.png",
                "icons/gold.png",
            ]
        );
    }

    #[test]
    fn header_commands_start_with_background() {
        let (_, out) = run(CategoryCounts::default(), AllyIcon::Generic);
        assert!(matches!(out[0], DrawCommand::Background { .. }));
        // background + title + 5 * (chip, label, count, icon)
        assert_eq!(out.len(), 2 + 5 * 4);
    }
}
