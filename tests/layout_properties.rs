//! Layout invariants over generated decks.

mod common;

use common::{BoxFace, card, entry};
use deck_export::{
    CanvasSize, CardId, Catalog, Category, CategoryCounts, DeckEntry, ExportConfig, ExportContext,
    ExportFormat, ExportPlan, ExportRequest, MemoryAssets, grid::grid_dimensions, plan_export,
    rows::resolve_scale,
};
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
struct GenCard {
    category: usize,
    cost: Option<u32>,
    initial: bool,
}

fn gen_card() -> impl Strategy<Value = GenCard> {
    (0usize..5, proptest::option::of(0u32..8), any::<bool>()).prop_map(
        |(category, cost, initial)| GenCard {
            category,
            cost,
            initial,
        },
    )
}

/// Catalog of generated cards plus a deck of (index, quantity) lines that may
/// repeat cards and include zero quantities.
fn gen_deck() -> impl Strategy<Value = (Vec<GenCard>, Vec<(usize, u32)>)> {
    prop::collection::vec(gen_card(), 1..30).prop_flat_map(|cards| {
        let n = cards.len();
        (
            Just(cards),
            prop::collection::vec((0..n, 0u32..5), 0..40),
        )
    })
}

fn build(cards: &[GenCard], lines: &[(usize, u32)]) -> (Catalog, Vec<DeckEntry>) {
    let catalog = Catalog::from_cards(cards.iter().enumerate().map(|(i, g)| {
        let mut c = card(i as u32 + 1, Category::ALL[g.category]);
        c.cost = g.cost;
        c.is_initial_gold = g.initial;
        c
    }));
    let deck = lines
        .iter()
        .map(|&(i, q)| entry(i as u32 + 1, q))
        .collect();
    (catalog, deck)
}

fn plan_with(
    catalog: &Catalog,
    deck: &[DeckEntry],
    format: ExportFormat,
    config: &ExportConfig,
) -> ExportPlan {
    let assets = MemoryAssets::new();
    let ctx = ExportContext {
        catalog,
        assets: &assets,
        typeface: &BoxFace,
        config,
    };
    let request = ExportRequest {
        title: "Generated",
        deck,
        counts: CategoryCounts::from_deck(deck, catalog),
        format,
    };
    plan_export(&ctx, &request)
}

fn expected_copies(deck: &[DeckEntry]) -> BTreeMap<CardId, u32> {
    let mut copies = BTreeMap::new();
    for e in deck {
        if e.quantity > 0 {
            *copies.entry(e.card_id).or_insert(0) += e.quantity;
        }
    }
    copies
}

proptest! {
    #[test]
    fn wide_export_draws_every_copy((cards, lines) in gen_deck()) {
        let (catalog, deck) = build(&cards, &lines);
        let plan = plan_with(&catalog, &deck, ExportFormat::Horizontal, &ExportConfig::default());
        let expected = expected_copies(&deck);
        for (&id, &copies) in &expected {
            prop_assert_eq!(plan.copies_of(id), copies as usize);
        }
        prop_assert_eq!(
            plan.card_images().count(),
            expected.values().map(|&q| q as usize).sum::<usize>()
        );
    }

    #[test]
    fn square_export_draws_each_card_once((cards, lines) in gen_deck()) {
        let (catalog, deck) = build(&cards, &lines);
        let plan = plan_with(&catalog, &deck, ExportFormat::Vertical, &ExportConfig::default());
        let expected = expected_copies(&deck);
        prop_assert_eq!(plan.card_images().count(), expected.len());
        for id in expected.keys() {
            prop_assert_eq!(plan.copies_of(*id), 1);
        }
    }

    #[test]
    fn draw_order_follows_category_rules((cards, lines) in gen_deck()) {
        let (catalog, deck) = build(&cards, &lines);
        let plan = plan_with(&catalog, &deck, ExportFormat::Vertical, &ExportConfig::default());
        let order: Vec<_> = plan
            .card_order()
            .into_iter()
            .filter_map(|id| catalog.get(id))
            .collect();
        for pair in order.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(a.category <= b.category);
            if a.category == b.category {
                if a.category == Category::Gold {
                    prop_assert!(a.is_initial_gold <= b.is_initial_gold);
                } else {
                    prop_assert!(a.sort_cost() <= b.sort_cost());
                }
            }
        }
    }

    #[test]
    fn scale_never_shrinks_and_is_capped((cards, lines) in gen_deck()) {
        let (catalog, deck) = build(&cards, &lines);
        let config = ExportConfig::default();
        let plan = plan_with(&catalog, &deck, ExportFormat::Horizontal, &config);
        prop_assert!(plan.scale >= 1.0);
        prop_assert!(plan.scale <= config.rows.max_scale);
    }

    #[test]
    fn scale_is_monotone_in_canvas_height(
        (cards, lines) in gen_deck(),
        h1 in 400u32..2000,
        extra in 0u32..1500,
    ) {
        let (catalog, deck) = build(&cards, &lines);
        let mut config = ExportConfig::default();
        config.wide = CanvasSize::new(1920, h1);
        let short = plan_with(&catalog, &deck, ExportFormat::Horizontal, &config);
        config.wide = CanvasSize::new(1920, h1 + extra);
        let tall = plan_with(&catalog, &deck, ExportFormat::Horizontal, &config);
        prop_assert!(short.scale <= tall.scale);
    }

    #[test]
    fn resolve_scale_is_monotone(a in 1.0f32..5000.0, b in 1.0f32..5000.0, avail in 0.0f32..3000.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(resolve_scale(lo, avail, 1.4) >= resolve_scale(hi, avail, 1.4));
    }

    #[test]
    fn grid_covers_all_cards(n in 1usize..2000) {
        let (cols, rows) = grid_dimensions(n);
        prop_assert!(cols * rows >= n);
        prop_assert_eq!(cols, (n as f64).sqrt().ceil() as usize);
        prop_assert_eq!(rows, n.div_ceil(cols));
    }

    #[test]
    fn grid_cells_stay_inside_content_area((cards, lines) in gen_deck()) {
        let (catalog, deck) = build(&cards, &lines);
        let config = ExportConfig::default();
        let plan = plan_with(&catalog, &deck, ExportFormat::Vertical, &config);
        let bottom = plan.canvas.height as f32 - config.grid.bottom_margin;
        for (_, r) in plan.card_images() {
            prop_assert!(r.y >= plan.layout_top - 1e-3);
            prop_assert!(r.bottom() <= bottom + 1e-2);
            prop_assert!(r.x >= config.grid.margin_x - 1e-2);
            prop_assert!(r.right() <= plan.canvas.width as f32 - config.grid.margin_x + 1e-2);
        }
    }
}
