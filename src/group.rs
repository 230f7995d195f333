//! Category grouping and sort order.
//!
//! Groups are derived fresh for every export and borrow from the catalog.

use rustc_hash::FxHashMap;

use crate::card::{Card, CardId, Catalog, Category, DeckEntry};

/// A card and its copy count within a group.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GroupedCard<'a> {
    pub card: &'a Card,
    pub quantity: u32,
}

/// All cards of one category, in draw order.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryGroup<'a> {
    pub category: Category,
    pub cards: Vec<GroupedCard<'a>>,
}

impl CategoryGroup<'_> {
    /// Total copies in this group.
    pub fn copies(&self) -> u32 {
        self.cards
            .iter()
            .fold(0, |acc, c| acc.saturating_add(c.quantity))
    }
}

/// Group a deck by category in [`Category::ALL`] order.
///
/// - Entries with quantity 0 are skipped.
/// - Entries whose card is missing from the catalog are dropped.
/// - Repeated entries for one card are merged at the first occurrence.
/// - Non-Gold categories sort by cost ascending (missing cost = 0).
/// - Gold sorts non-initial before initial, each block by quantity descending.
///
/// Sorts are stable, so ties keep deck order. Empty categories are omitted.
pub fn group_deck<'a>(deck: &[DeckEntry], catalog: &'a Catalog) -> Vec<CategoryGroup<'a>> {
    let mut merged: Vec<GroupedCard<'a>> = Vec::with_capacity(deck.len());
    let mut seen: FxHashMap<CardId, usize> = FxHashMap::default();

    for entry in deck {
        if entry.quantity == 0 {
            continue;
        }
        let Some(card) = catalog.get(entry.card_id) else {
            log::debug!("dropping {}: not in catalog", entry.card_id);
            continue;
        };
        match seen.get(&entry.card_id) {
            Some(&i) => merged[i].quantity = merged[i].quantity.saturating_add(entry.quantity),
            None => {
                seen.insert(entry.card_id, merged.len());
                merged.push(GroupedCard {
                    card,
                    quantity: entry.quantity,
                });
            }
        }
    }

    Category::ALL
        .iter()
        .filter_map(|&category| {
            let mut cards: Vec<GroupedCard<'a>> = merged
                .iter()
                .copied()
                .filter(|c| c.card.category == category)
                .collect();
            if cards.is_empty() {
                return None;
            }
            sort_group(category, &mut cards);
            Some(CategoryGroup { category, cards })
        })
        .collect()
}

fn sort_group(category: Category, cards: &mut [GroupedCard<'_>]) {
    match category {
        Category::Gold => cards.sort_by(|a, b| {
            a.card
                .is_initial_gold
                .cmp(&b.card.is_initial_gold)
                .then(b.quantity.cmp(&a.quantity))
        }),
        _ => cards.sort_by_key(|c| c.card.sort_cost()),
    }
}

/// Flatten groups into one sequence, one item per distinct card.
pub fn unique_cards<'a>(groups: &[CategoryGroup<'a>]) -> Vec<GroupedCard<'a>> {
    groups.iter().flat_map(|g| g.cards.iter().copied()).collect()
}

/// Live per-category copy counts shown on the header chips.
///
/// The host usually passes these in precomputed; [`CategoryCounts::from_deck`]
/// derives them when it does not.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CategoryCounts([u32; 5]);

impl CategoryCounts {
    pub const fn new(counts: [u32; 5]) -> Self {
        Self(counts)
    }

    /// Sum quantities per category; missing cards are skipped.
    pub fn from_deck(deck: &[DeckEntry], catalog: &Catalog) -> Self {
        let mut counts = [0u32; 5];
        for entry in deck {
            if let Some(card) = catalog.get(entry.card_id) {
                let slot = &mut counts[card.category.index()];
                *slot = slot.saturating_add(entry.quantity);
            }
        }
        Self(counts)
    }

    pub fn get(&self, category: Category) -> u32 {
        self.0[category.index()]
    }

    #[must_use]
    pub fn with(mut self, category: Category, count: u32) -> Self {
        self.0[category.index()] = count;
        self
    }

    pub fn total(&self) -> u32 {
        self.0.iter().fold(0, |acc, &n| acc.saturating_add(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: u32, category: Category) -> Card {
        Card::new(CardId::new(id), format!("c{id}"), category, format!("art/{id}.png"))
    }

    fn ids(group: &CategoryGroup<'_>) -> Vec<(u32, u32)> {
        group
            .cards
            .iter()
            .map(|c| (c.card.id.raw(), c.quantity))
            .collect()
    }

    #[test]
    fn groups_follow_fixed_category_order() {
        let catalog = Catalog::from_cards([
            card(1, Category::Gold),
            card(2, Category::Totem),
            card(3, Category::Ally),
            card(4, Category::Weapon),
        ]);
        let deck = [1, 2, 3, 4].map(|i| DeckEntry::new(CardId::new(i), 1));
        let groups = group_deck(&deck, &catalog);
        let order: Vec<Category> = groups.iter().map(|g| g.category).collect();
        assert_eq!(
            order,
            vec![Category::Ally, Category::Weapon, Category::Totem, Category::Gold]
        );
    }

    #[test]
    fn cost_ascending_with_missing_cost_as_zero() {
        let catalog = Catalog::from_cards([
            card(1, Category::Ally).with_cost(3),
            card(2, Category::Ally),
            card(3, Category::Ally).with_cost(1),
            card(4, Category::Ally).with_cost(0),
        ]);
        let deck = [1, 2, 3, 4].map(|i| DeckEntry::new(CardId::new(i), 1));
        let groups = group_deck(&deck, &catalog);
        // 2 (None) and 4 (0) tie; stable sort keeps deck order.
        assert_eq!(ids(&groups[0]), vec![(2, 1), (4, 1), (3, 1), (1, 1)]);
    }

    #[test]
    fn gold_initial_block_goes_last() {
        let catalog = Catalog::from_cards([
            card(1, Category::Gold).initial_gold(),
            card(2, Category::Gold),
            card(3, Category::Gold).initial_gold(),
            card(4, Category::Gold),
        ]);
        let deck = [
            DeckEntry::new(CardId::new(1), 5),
            DeckEntry::new(CardId::new(2), 1),
            DeckEntry::new(CardId::new(3), 2),
            DeckEntry::new(CardId::new(4), 3),
        ];
        let groups = group_deck(&deck, &catalog);
        assert_eq!(ids(&groups[0]), vec![(4, 3), (2, 1), (1, 5), (3, 2)]);
    }

    #[test]
    fn gold_ignores_cost() {
        let catalog = Catalog::from_cards([
            card(1, Category::Gold).with_cost(0),
            card(2, Category::Gold).with_cost(9),
        ]);
        let deck = [
            DeckEntry::new(CardId::new(1), 1),
            DeckEntry::new(CardId::new(2), 4),
        ];
        let groups = group_deck(&deck, &catalog);
        assert_eq!(ids(&groups[0]), vec![(2, 4), (1, 1)]);
    }

    #[test]
    fn zero_quantity_and_missing_cards_are_dropped() {
        let catalog = Catalog::from_cards([card(1, Category::Ally), card(2, Category::Weapon)]);
        let deck = [
            DeckEntry::new(CardId::new(1), 0),
            DeckEntry::new(CardId::new(2), 2),
            DeckEntry::new(CardId::new(99), 3),
        ];
        let groups = group_deck(&deck, &catalog);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, Category::Weapon);
        assert_eq!(ids(&groups[0]), vec![(2, 2)]);
    }

    #[test]
    fn repeated_entries_merge() {
        let catalog = Catalog::from_cards([card(1, Category::Totem), card(2, Category::Totem)]);
        let deck = [
            DeckEntry::new(CardId::new(1), 1),
            DeckEntry::new(CardId::new(2), 1),
            DeckEntry::new(CardId::new(1), 2),
        ];
        let groups = group_deck(&deck, &catalog);
        assert_eq!(ids(&groups[0]), vec![(1, 3), (2, 1)]);
        assert_eq!(groups[0].copies(), 4);
    }

    #[test]
    fn unique_cards_flatten_in_group_order() {
        let catalog = Catalog::from_cards([
            card(1, Category::Gold),
            card(2, Category::Ally).with_cost(5),
            card(3, Category::Ally).with_cost(1),
        ]);
        let deck = [1, 2, 3].map(|i| DeckEntry::new(CardId::new(i), 2));
        let groups = group_deck(&deck, &catalog);
        let flat: Vec<u32> = unique_cards(&groups).iter().map(|c| c.card.id.raw()).collect();
        assert_eq!(flat, vec![3, 2, 1]);
    }

    #[test]
    fn counts_from_deck() {
        let catalog = Catalog::from_cards([card(1, Category::Ally), card(2, Category::Gold)]);
        let deck = [
            DeckEntry::new(CardId::new(1), 3),
            DeckEntry::new(CardId::new(2), 2),
            DeckEntry::new(CardId::new(1), 1),
            DeckEntry::new(CardId::new(42), 7),
        ];
        let counts = CategoryCounts::from_deck(&deck, &catalog);
        assert_eq!(counts.get(Category::Ally), 4);
        assert_eq!(counts.get(Category::Gold), 2);
        assert_eq!(counts.get(Category::Totem), 0);
        assert_eq!(counts.total(), 6);
        assert_eq!(counts.with(Category::Totem, 1).get(Category::Totem), 1);
    }

    #[test]
    fn huge_quantities_saturate() {
        let catalog = Catalog::from_cards([card(1, Category::Ally), card(2, Category::Ally)]);
        let deck = [
            DeckEntry::new(CardId::new(1), u32::MAX),
            DeckEntry::new(CardId::new(1), 1),
            DeckEntry::new(CardId::new(2), 5),
        ];
        let groups = group_deck(&deck, &catalog);
        assert_eq!(ids(&groups[0]), vec![(1, u32::MAX), (2, 5)]);
        assert_eq!(groups[0].copies(), u32::MAX);

        let counts = CategoryCounts::from_deck(&deck, &catalog);
        assert_eq!(counts.get(Category::Ally), u32::MAX);
        assert_eq!(counts.with(Category::Gold, 3).total(), u32::MAX);
    }
}
