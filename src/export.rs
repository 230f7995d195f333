//! Export entry point: plan, rasterize, encode.

use crate::assets::AssetSource;
use crate::card::{Catalog, DeckEntry};
use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::group::CategoryCounts;
use crate::plan::{ExportFormat, plan_export};
use crate::raster::render_plan;
use crate::text::Typeface;

/// Everything an export reads besides the request itself.
#[derive(Copy, Clone)]
pub struct ExportContext<'a> {
    pub catalog: &'a Catalog,
    pub assets: &'a dyn AssetSource,
    pub typeface: &'a dyn Typeface,
    pub config: &'a ExportConfig,
}

/// One export request.
#[derive(Copy, Clone, Debug)]
pub struct ExportRequest<'a> {
    /// Deck name, drawn as the title.
    pub title: &'a str,
    pub deck: &'a [DeckEntry],
    /// Chip counts, supplied by the host.
    pub counts: CategoryCounts,
    pub format: ExportFormat,
}

/// A finished PNG plus the name to save it under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub filename: String,
}

/// Render one export to PNG.
///
/// Nothing is retained between calls: identical inputs produce
/// byte-identical output.
pub fn export(
    ctx: &ExportContext<'_>,
    request: &ExportRequest<'_>,
) -> Result<ExportedImage, ExportError> {
    let plan = plan_export(ctx, request);
    log::debug!(
        "export {:?}: {} commands on {}x{}",
        request.format,
        plan.commands.len(),
        plan.canvas.width,
        plan.canvas.height
    );

    let pixmap = render_plan(&plan, ctx.assets, ctx.typeface)?;
    let png = pixmap
        .encode_png()
        .map_err(|e| ExportError::Encode(e.to_string()))?;

    Ok(ExportedImage {
        png,
        width: pixmap.width(),
        height: pixmap.height(),
        filename: suggested_filename(request.title, request.format),
    })
}

/// `{deck}-{horizontal|vertical}.png`, with path and shell-hostile
/// characters replaced by `_`.
///
/// ```
/// use deck_export::{ExportFormat, suggested_filename};
///
/// assert_eq!(suggested_filename("Dragons", ExportFormat::Horizontal), "Dragons-horizontal.png");
/// assert_eq!(suggested_filename("a/b: c", ExportFormat::Vertical), "a_b_ c-vertical.png");
/// assert_eq!(suggested_filename("  ", ExportFormat::Vertical), "deck-vertical.png");
/// ```
pub fn suggested_filename(title: &str, format: ExportFormat) -> String {
    let trimmed = title.trim();
    let stem: String = if trimmed.is_empty() {
        "deck".to_string()
    } else {
        trimmed
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect()
    };
    format!("{stem}-{}.png", format.slug())
}
