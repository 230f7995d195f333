//! Card catalog types: categories, races, cards, deck entries.
//!
//! Everything here is supplied by the host and treated as immutable input.
//! Categories and races are closed enums so every lookup keyed by them is an
//! exhaustive `match` rather than a string table.

use core::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Card category. Declaration order is the fixed render order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Ally,
    Weapon,
    Talisman,
    Totem,
    Gold,
}

impl Category {
    /// All categories in render order.
    pub const ALL: [Self; 5] = [
        Self::Ally,
        Self::Weapon,
        Self::Talisman,
        Self::Totem,
        Self::Gold,
    ];

    /// Position in [`Category::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Chip label drawn in the export header.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ally => "Allies",
            Self::Weapon => "Weapons",
            Self::Talisman => "Talismans",
            Self::Totem => "Totems",
            Self::Gold => "Gold",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Ally race.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Race {
    Knight,
    Dragon,
    Faerie,
    Hero,
    Olympian,
    Titan,
    Defender,
    Challenger,
    Shadow,
    Eternal,
    Pharaoh,
    Sphinx,
}

impl Race {
    pub const ALL: [Self; 12] = [
        Self::Knight,
        Self::Dragon,
        Self::Faerie,
        Self::Hero,
        Self::Olympian,
        Self::Titan,
        Self::Defender,
        Self::Challenger,
        Self::Shadow,
        Self::Eternal,
        Self::Pharaoh,
        Self::Sphinx,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Edition (card set) identifier, opaque to the engine.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditionId(pub String);

impl EditionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Catalog identifier of a card.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Static card metadata.
///
/// Field names on the wire follow the host's JSON (`type`, `isInitialGold`).
///
/// ```
/// use deck_export::{Card, CardId, Category};
///
/// let card = Card::new(CardId::new(7), "Excalibur", Category::Weapon, "art/7.png").with_cost(3);
/// assert_eq!(card.sort_cost(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub category: Category,
    #[serde(default)]
    pub cost: Option<u32>,
    #[serde(default)]
    pub race: Option<Race>,
    #[serde(default)]
    pub edition: Option<EditionId>,
    #[serde(default)]
    pub is_initial_gold: bool,
    /// Art reference handed to the [`AssetSource`](crate::AssetSource).
    pub image: String,
}

impl Card {
    #[must_use]
    pub fn new(
        id: CardId,
        name: impl Into<String>,
        category: Category,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            cost: None,
            race: None,
            edition: None,
            is_initial_gold: false,
            image: image.into(),
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = Some(cost);
        self
    }

    #[must_use]
    pub fn with_race(mut self, race: Race) -> Self {
        self.race = Some(race);
        self
    }

    #[must_use]
    pub fn with_edition(mut self, edition: impl Into<String>) -> Self {
        self.edition = Some(EditionId::new(edition));
        self
    }

    #[must_use]
    pub fn initial_gold(mut self) -> Self {
        self.is_initial_gold = true;
        self
    }

    /// Cost used as a sort key; a missing cost sorts as 0.
    pub fn sort_cost(&self) -> u32 {
        self.cost.unwrap_or(0)
    }
}

/// One line of a deck: a card reference and how many copies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckEntry {
    pub card_id: CardId,
    pub quantity: u32,
}

impl DeckEntry {
    pub const fn new(card_id: CardId, quantity: u32) -> Self {
        Self { card_id, quantity }
    }
}

/// Card lookup by id.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    cards: FxHashMap<CardId, Card>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list of cards; a later duplicate id replaces an earlier one.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut catalog = Self::new();
        for card in cards {
            catalog.insert(card);
        }
        catalog
    }

    /// Parse a JSON array of cards.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cards: Vec<Card> = serde_json::from_str(json)?;
        Ok(Self::from_cards(cards))
    }

    /// Insert a card, returning the one it replaced.
    pub fn insert(&mut self, card: Card) -> Option<Card> {
        self.cards.insert(card.id, card)
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
