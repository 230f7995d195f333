//! Shared fixtures: a box-glyph typeface and in-memory PNG art.

#![allow(dead_code)]

use deck_export::{
    Card, CardId, Catalog, Category, DeckEntry, ExportConfig, LineMetrics, MemoryAssets, Typeface,
};
use tiny_skia::{Path, PathBuilder};

pub const BACKGROUND_RGBA: [u8; 4] = [20, 30, 60, 255];

/// Every glyph is a solid box half an em wide.
pub struct BoxFace;

impl Typeface for BoxFace {
    fn advance(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * 0.5
    }

    fn line_metrics(&self, size: f32) -> LineMetrics {
        LineMetrics {
            ascent: size * 0.8,
            descent: size * 0.2,
        }
    }

    fn outline(&self, text: &str, x: f32, baseline: f32, size: f32) -> Option<Path> {
        let mut pb = PathBuilder::new();
        let advance = size * 0.5;
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let left = x + i as f32 * advance;
            if let Some(r) =
                tiny_skia::Rect::from_xywh(left + 1.0, baseline - size * 0.7, advance - 2.0, size * 0.7)
            {
                pb.push_rect(r);
            }
        }
        pb.finish()
    }
}

pub fn png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Distinct opaque color per card id.
pub fn art_color(id: u32) -> [u8; 4] {
    [
        (id * 37 % 200 + 40) as u8,
        (id * 91 % 200 + 40) as u8,
        (id * 53 % 200 + 40) as u8,
        255,
    ]
}

pub fn art_ref(id: u32) -> String {
    format!("art/{id}.png")
}

/// Background, every chip icon and art for each card in `catalog`.
pub fn assets_for(catalog_ids: impl IntoIterator<Item = u32>) -> MemoryAssets {
    let config = ExportConfig::default();
    let mut assets = MemoryAssets::new().with(config.background.clone(), png(192, 108, BACKGROUND_RGBA));
    let icons = &config.icons;
    for icon in [
        &icons.ally_generic,
        &icons.ally_edition,
        &icons.weapon,
        &icons.talisman,
        &icons.totem,
        &icons.gold,
    ] {
        assets.insert(icon.clone(), png(8, 8, [250, 250, 250, 255]));
    }
    for race in deck_export::Race::ALL {
        assets.insert(icons.races.get(race).to_string(), png(8, 8, [200, 200, 0, 255]));
    }
    for id in catalog_ids {
        assets.insert(art_ref(id), png(11, 15, art_color(id)));
    }
    assets
}

pub fn card(id: u32, category: Category) -> Card {
    Card::new(CardId::new(id), format!("card {id}"), category, art_ref(id))
}

pub fn entry(id: u32, quantity: u32) -> DeckEntry {
    DeckEntry::new(CardId::new(id), quantity)
}

pub fn catalog(cards: impl IntoIterator<Item = Card>) -> Catalog {
    Catalog::from_cards(cards)
}
