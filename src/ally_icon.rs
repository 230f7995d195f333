//! Ally chip icon selection from deck composition.

use crate::card::{Category, Race};
use crate::config::{AllyIconRule, IconSet};
use crate::group::CategoryGroup;

/// Which icon the Ally chip shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AllyIcon {
    Generic,
    /// The themed edition holds more than its threshold share of allies.
    Edition,
    /// One race holds more than its threshold share of allies.
    Race(Race),
}

impl AllyIcon {
    /// Resolve the icon for a grouped deck.
    ///
    /// Shares are of total Ally copies. The edition check runs first; a race
    /// only wins by exceeding the race threshold on its own, so ties and
    /// spread-out decks fall back to [`AllyIcon::Generic`].
    pub fn resolve(groups: &[CategoryGroup<'_>], rule: &AllyIconRule) -> Self {
        let Some(allies) = groups.iter().find(|g| g.category == Category::Ally) else {
            return Self::Generic;
        };

        let mut total = 0u32;
        let mut edition_copies = 0u32;
        let mut by_race = [0u32; Race::ALL.len()];
        for item in &allies.cards {
            total = total.saturating_add(item.quantity);
            if let (Some(themed), Some(edition)) = (&rule.edition, &item.card.edition)
                && themed == edition
            {
                edition_copies = edition_copies.saturating_add(item.quantity);
            }
            if let Some(race) = item.card.race {
                let slot = &mut by_race[race.index()];
                *slot = slot.saturating_add(item.quantity);
            }
        }
        if total == 0 {
            return Self::Generic;
        }

        let share = |copies: u32| copies as f32 / total as f32;
        if share(edition_copies) > rule.edition_threshold {
            return Self::Edition;
        }
        Race::ALL
            .iter()
            .find(|race| share(by_race[race.index()]) > rule.race_threshold)
            .map_or(Self::Generic, |&race| Self::Race(race))
    }

    /// Icon reference for this choice.
    pub fn reference(self, icons: &IconSet) -> &str {
        match self {
            Self::Generic => &icons.ally_generic,
            Self::Edition => &icons.ally_edition,
            Self::Race(race) => icons.races.get(race),
        }
    }
}
