//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;

/// Stable identifier of an initiative card
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CardId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Round counter, 1-based
pub type Round = u32;

/// Tokens a player spends on each card during one round
///
/// Kept ordered so every pass over it adds floats in the same order,
/// which keeps repeated round computations bit-identical.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Allocation(BTreeMap<CardId, u32>);

impl Allocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy in tests and plan files
    pub fn with(mut self, card: impl Into<CardId>, tokens: u32) -> Self {
        self.set(card, tokens);
        self
    }

    pub fn set(&mut self, card: impl Into<CardId>, tokens: u32) {
        self.0.insert(card.into(), tokens);
    }

    /// Tokens on a card, 0 when absent
    pub fn tokens_for(&self, card: &str) -> u32 {
        self.0.get(card).copied().unwrap_or(0)
    }

    pub fn is_funded(&self, card: &str) -> bool {
        self.tokens_for(card) > 0
    }

    /// Sum over every entry, known card or not. Widened so huge counts never overflow.
    pub fn total_tokens(&self) -> u64 {
        self.0.values().map(|&tokens| u64::from(tokens)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CardId, u32)> {
        self.0.iter().map(|(id, tokens)| (id, *tokens))
    }

    /// Entries with at least one token
    pub fn funded(&self) -> impl Iterator<Item = (&CardId, u32)> {
        self.iter().filter(|(_, tokens)| *tokens > 0)
    }

    pub fn is_empty(&self) -> bool {
        self.funded().next().is_none()
    }
}

impl<K: Into<CardId>> FromIterator<(K, u32)> for Allocation {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
