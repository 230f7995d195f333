//! Deck export layout and rendering.
//!
//! Turns a deck (card references plus quantities) into a single PNG: a
//! header with title and per-category chips over a background template,
//! followed by either row-packed stacks of every copy (wide export) or a
//! near-square grid of unique cards with quantity badges (square export).
//!
//! Layout is pure geometry, planned up front into an [`ExportPlan`] of draw
//! commands. Rasterization then loads assets and paints the plan with
//! `tiny-skia`.
//!
//! # Modules
//!
//! - [`card`]: Catalog types: categories, races, cards, deck entries
//! - [`group`]: Category grouping, sort order, live counts
//! - [`ally_icon`]: Ally chip icon selection
//! - [`header`]: Title and chip row
//! - [`rows`]: Row packing with fill scale
//! - [`grid`]: Square grid with badges
//! - [`plan`]: Draw commands and the planning entry point
//! - [`raster`]: Plan execution onto a pixmap
//! - [`export`]: Plan, render, encode
//!
//! # Example
//!
//! ```no_run
//! use deck_export::{
//!     Catalog, CategoryCounts, DeckEntry, DirAssets, ExportConfig, ExportContext, ExportFormat,
//!     ExportRequest, Font, export,
//! };
//!
//! let catalog = Catalog::from_json(&std::fs::read_to_string("cards.json").unwrap()).unwrap();
//! let font = Font::from_bytes(std::fs::read("fonts/title.ttf").unwrap()).unwrap();
//! let assets = DirAssets::new("assets");
//! let config = ExportConfig::default();
//! let deck: Vec<DeckEntry> =
//!     serde_json::from_str(&std::fs::read_to_string("deck.json").unwrap()).unwrap();
//!
//! let ctx = ExportContext { catalog: &catalog, assets: &assets, typeface: &font, config: &config };
//! let request = ExportRequest {
//!     title: "Dragons",
//!     deck: &deck,
//!     counts: CategoryCounts::from_deck(&deck, &catalog),
//!     format: ExportFormat::Horizontal,
//! };
//! match export(&ctx, &request) {
//!     Ok(image) => std::fs::write(&image.filename, &image.png).unwrap(),
//!     Err(e) => eprintln!("export failed: {e}"),
//! }
//! ```

#![forbid(unsafe_code)]

pub mod ally_icon;
pub mod assets;
pub mod card;
pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod grid;
pub mod group;
pub mod header;
pub mod plan;
pub mod raster;
pub mod rows;
pub mod text;

#[cfg(feature = "svg")]
pub mod svg;

pub use ally_icon::AllyIcon;
pub use assets::{AssetSource, DirAssets, MemoryAssets, decode_image};
pub use card::{Card, CardId, Catalog, Category, DeckEntry, EditionId, Race};
pub use color::Color;
pub use config::{
    AllyIconRule, CanvasSize, ExportConfig, GridConfig, HeaderConfig, IconSet, RaceIcons,
    RowConfig,
};
pub use error::{AssetError, ConfigError, ExportError, FontError};
pub use export::{ExportContext, ExportRequest, ExportedImage, export, suggested_filename};
pub use geometry::{BackgroundCrop, Rect};
pub use grid::GridShape;
pub use group::{CategoryCounts, CategoryGroup, GroupedCard, group_deck, unique_cards};
pub use plan::{DrawCommand, ExportFormat, ExportPlan, ImageRole, plan_export};
pub use raster::render_plan;
pub use text::{Font, LineMetrics, Typeface};
