//! Export planning: the ordered draw-command list and the orchestrator that
//! builds it.
//!
//! Planning is pure geometry. Every coordinate is resolved here; the
//! rasterizer only loads assets and paints commands in order.

use crate::ally_icon::AllyIcon;
use crate::card::CardId;
use crate::color::Color;
use crate::config::{CanvasSize, ExportConfig};
use crate::export::{ExportContext, ExportRequest};
use crate::geometry::{BackgroundCrop, Rect};
use crate::grid::{self, GridShape};
use crate::group::{group_deck, unique_cards};
use crate::header::{self, Header};
use crate::rows;

/// Output format.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Wide summary, row-packed stacks.
    Horizontal,
    /// Square grid of unique cards.
    Vertical,
}

impl ExportFormat {
    /// Canvas size from config.
    pub fn canvas(self, config: &ExportConfig) -> CanvasSize {
        match self {
            Self::Horizontal => config.wide,
            Self::Vertical => config.square,
        }
    }

    pub fn background_crop(self) -> BackgroundCrop {
        match self {
            Self::Horizontal => BackgroundCrop::StretchFit,
            Self::Vertical => BackgroundCrop::CenterCropSquare,
        }
    }

    /// Name used in suggested filenames.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

/// What an image command depicts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ImageRole {
    /// Header chip icon.
    Icon,
    /// One copy of a card's art.
    Card(CardId),
}

/// A single resolved drawing operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Full-canvas background template. A load failure aborts the export.
    Background {
        reference: String,
        crop: BackgroundCrop,
    },
    /// Single-line text with its baseline origin at `(x, baseline)`.
    Text {
        text: String,
        x: f32,
        baseline: f32,
        size: f32,
        color: Color,
    },
    RoundedRect {
        rect: Rect,
        radius: f32,
        color: Color,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        color: Color,
    },
    /// Image scaled into `rect`. A load failure leaves the rect blank.
    Image {
        reference: String,
        rect: Rect,
        role: ImageRole,
    },
}

/// A fully resolved export: canvas, layout results and draw commands.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportPlan {
    pub format: ExportFormat,
    pub canvas: CanvasSize,
    /// Y below which header content never draws.
    pub layout_top: f32,
    /// Resolved row scale (always 1 for the square grid).
    pub scale: f32,
    /// Grid shape for the square export with at least one card.
    pub grid: Option<GridShape>,
    pub ally_icon: AllyIcon,
    pub commands: Vec<DrawCommand>,
}

impl ExportPlan {
    /// Card image commands in draw order.
    pub fn card_images(&self) -> impl Iterator<Item = (CardId, &Rect)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Image {
                rect,
                role: ImageRole::Card(id),
                ..
            } => Some((*id, rect)),
            _ => None,
        })
    }

    /// Number of copies drawn for one card.
    pub fn copies_of(&self, id: CardId) -> usize {
        self.card_images().filter(|(card, _)| *card == id).count()
    }

    /// Number of image commands (cards or icons) using `reference`.
    pub fn image_count_for(&self, reference: &str) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Image { reference: r, .. } if r == reference))
            .count()
    }

    /// Draw order of distinct cards (first appearance).
    pub fn card_order(&self) -> Vec<CardId> {
        let mut order: Vec<CardId> = Vec::new();
        for (id, _) in self.card_images() {
            if !order.contains(&id) {
                order.push(id);
            }
        }
        order
    }
}

/// Build the draw plan for one export request.
///
/// Groups the deck, resolves the Ally icon, lays out the header, then hands
/// `layout_top` to the row or grid engine depending on the format.
pub fn plan_export(ctx: &ExportContext<'_>, request: &ExportRequest<'_>) -> ExportPlan {
    let config = ctx.config;
    let canvas = request.format.canvas(config);
    let groups = group_deck(request.deck, ctx.catalog);
    let ally_icon = AllyIcon::resolve(&groups, &config.ally_rule);
    log::debug!("ally icon {ally_icon:?}");

    let mut commands = Vec::new();
    let header = Header {
        title: request.title,
        counts: &request.counts,
        ally_icon,
        crop: request.format.background_crop(),
    };
    let layout_top = header::plan_header(&header, config, ctx.typeface, &mut commands);

    let (scale, grid) = match request.format {
        ExportFormat::Horizontal => {
            let scale = rows::plan_rows(&groups, &config.rows, canvas, layout_top, &mut commands);
            (scale, None)
        }
        ExportFormat::Vertical => {
            let cards = unique_cards(&groups);
            let grid = grid::plan_grid(
                &cards,
                &config.grid,
                canvas,
                layout_top,
                ctx.typeface,
                &mut commands,
            );
            (1.0, grid)
        }
    };

    ExportPlan {
        format: request.format,
        canvas,
        layout_top,
        scale,
        grid,
        ally_icon,
        commands,
    }
}
