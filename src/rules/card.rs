//! Initiative cards and the catalog they are loaded into

use crate::core::metrics::{MetricDelta, Metrics};
use crate::core::types::{CardId, Round};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A catalog entry the player can spend tokens on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Card {
    pub id: CardId,
    /// Human-readable name
    #[serde(default)]
    pub name: String,
    /// Rounds in which the card can be chosen
    pub rounds: Vec<Round>,
    /// Extra gate on top of `rounds`, evaluated against current metrics
    #[serde(default)]
    pub unlock: Option<UnlockCondition>,
    /// Applied once per token spent
    #[serde(default)]
    pub effects: MetricDelta,
}

impl Card {
    pub fn offered_in(&self, round: Round) -> bool {
        self.rounds.contains(&round)
    }

    /// Offered this round and, if gated, unlocked by the given metrics
    pub fn is_available(
        &self,
        round: Round,
        metrics: &Metrics,
        thresholds: &UnlockThresholds,
    ) -> bool {
        self.offered_in(round)
            && self
                .unlock
                .map_or(true, |condition| condition.is_met(metrics, thresholds))
    }
}

/// Closed set of named unlock predicates
///
/// Scenario files refer to these by name; the numbers they compare
/// against come from [`UnlockThresholds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockCondition {
    /// complexity >= `high_complexity`
    HighComplexity,
    /// visibility >= `strong_visibility`
    StrongVisibility,
    /// sustainability <= `low_sustainability`
    LowSustainability,
}

impl UnlockCondition {
    pub fn is_met(&self, metrics: &Metrics, thresholds: &UnlockThresholds) -> bool {
        match self {
            UnlockCondition::HighComplexity => metrics.complexity >= thresholds.high_complexity,
            UnlockCondition::StrongVisibility => metrics.visibility >= thresholds.strong_visibility,
            UnlockCondition::LowSustainability => {
                metrics.sustainability <= thresholds.low_sustainability
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UnlockThresholds {
    pub high_complexity: f64,
    pub strong_visibility: f64,
    pub low_sustainability: f64,
}

impl Default for UnlockThresholds {
    fn default() -> Self {
        Self {
            high_complexity: 35.0,
            strong_visibility: 45.0,
            low_sustainability: 25.0,
        }
    }
}

/// Read-only card collection, in scenario order
#[derive(Debug, Clone, Default)]
pub struct CardCatalog {
    cards: Vec<Card>,
    index: AHashMap<CardId, usize>,
    duplicates: Vec<CardId>,
}

impl CardCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card. A card reusing an existing id replaces it in place and the
    /// id is remembered so `GameConfig::validate` can reject the catalog.
    pub fn add(&mut self, card: Card) {
        match self.index.get(&card.id) {
            Some(&idx) => {
                self.duplicates.push(card.id.clone());
                self.cards[idx] = card;
            }
            None => {
                self.index.insert(card.id.clone(), self.cards.len());
                self.cards.push(card);
            }
        }
    }

    /// Ids that were added more than once, in insertion order
    pub fn duplicate_ids(&self) -> &[CardId] {
        &self.duplicates
    }

    pub fn get(&self, id: &str) -> Option<&Card> {
        self.index.get(id).map(|&idx| &self.cards[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn all(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards selectable in `round` given the current metrics
    pub fn available<'a>(
        &'a self,
        round: Round,
        metrics: &'a Metrics,
        thresholds: &'a UnlockThresholds,
    ) -> impl Iterator<Item = &'a Card> + 'a {
        self.cards
            .iter()
            .filter(move |card| card.is_available(round, metrics, thresholds))
    }
}

impl PartialEq for CardCatalog {
    fn eq(&self, other: &Self) -> bool {
        self.cards == other.cards
    }
}

impl FromIterator<Card> for CardCatalog {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for card in iter {
            catalog.add(card);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, rounds: Vec<Round>, unlock: Option<UnlockCondition>) -> Card {
        Card {
            id: CardId::from(id),
            name: id.to_string(),
            rounds,
            unlock,
            effects: MetricDelta::default(),
        }
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog: CardCatalog = vec![card("a", vec![1], None), card("b", vec![2], None)]
            .into_iter()
            .collect();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("a").is_some());
        assert!(catalog.get("zzz").is_none());
    }

    #[test]
    fn test_duplicate_id_replaces_in_place() {
        let mut catalog = CardCatalog::new();
        catalog.add(card("a", vec![1], None));
        catalog.add(card("b", vec![1], None));
        catalog.add(card("a", vec![3], None));
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.all()[0].rounds, vec![3]);
        assert_eq!(catalog.duplicate_ids(), &[CardId::from("a")]);
    }

    #[test]
    fn test_unlock_conditions() {
        let t = UnlockThresholds::default();
        let mut m = Metrics::new(20.0, 30.0, 30.0, 20.0, 20.0);
        assert!(!UnlockCondition::HighComplexity.is_met(&m, &t));
        m.complexity = 35.0;
        assert!(UnlockCondition::HighComplexity.is_met(&m, &t));
        assert!(!UnlockCondition::LowSustainability.is_met(&m, &t));
        m.sustainability = 25.0;
        assert!(UnlockCondition::LowSustainability.is_met(&m, &t));
    }

    #[test]
    fn test_available_filters_round_and_unlock() {
        let catalog: CardCatalog = vec![
            card("always", vec![1, 2, 3], None),
            card("later", vec![2, 3], None),
            card("gated", vec![1], Some(UnlockCondition::StrongVisibility)),
        ]
        .into_iter()
        .collect();
        let t = UnlockThresholds::default();

        let low = Metrics::new(10.0, 10.0, 10.0, 10.0, 10.0);
        let ids: Vec<&str> = catalog.available(1, &low, &t).map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["always"]);

        let high = Metrics::new(50.0, 10.0, 10.0, 10.0, 10.0);
        let ids: Vec<&str> = catalog.available(1, &high, &t).map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["always", "gated"]);
    }
}
