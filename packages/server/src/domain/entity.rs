//! Core domain models for the click counter game.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{error::ValueObjectError, value_object::PlayerName};

/// Cumulative click totals keyed by player name.
///
/// Serialized as a flat JSON object, `{"<name>": <total>, ...}`, which is
/// both the persisted document and the `scores` payload on the wire.
/// Deserialization rejects any key that is not a valid [`PlayerName`] and any
/// value that is not a non-negative integer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, u64>",
    into = "BTreeMap<String, u64>"
)]
pub struct ScoreBoard {
    scores: BTreeMap<PlayerName, u64>,
}

impl ScoreBoard {
    /// Create an empty scoreboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one click for `name` and return the new total
    pub fn increment(&mut self, name: &PlayerName) -> u64 {
        let total = self.scores.entry(name.clone()).or_insert(0);
        *total = total.saturating_add(1);
        *total
    }

    /// Current total for `name` (0 when the player has never clicked)
    pub fn total(&self, name: &PlayerName) -> u64 {
        self.scores.get(name).copied().unwrap_or(0)
    }

    /// Sum of every player's total
    pub fn total_clicks(&self) -> u64 {
        self.scores.values().fold(0u64, |acc, v| acc.saturating_add(*v))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Iterate players in name order
    pub fn iter(&self) -> impl Iterator<Item = (&PlayerName, u64)> {
        self.scores.iter().map(|(name, total)| (name, *total))
    }
}

impl TryFrom<BTreeMap<String, u64>> for ScoreBoard {
    type Error = ValueObjectError;

    fn try_from(raw: BTreeMap<String, u64>) -> Result<Self, Self::Error> {
        let mut scores = BTreeMap::new();
        for (name, total) in raw {
            let name = PlayerName::new(name)?;
            // "a " and "a" collapse to the same player after trimming
            let entry = scores.entry(name).or_insert(0u64);
            *entry = entry.saturating_add(total);
        }
        Ok(Self { scores })
    }
}

impl From<ScoreBoard> for BTreeMap<String, u64> {
    fn from(board: ScoreBoard) -> Self {
        board
            .scores
            .into_iter()
            .map(|(name, total)| (name.into_string(), total))
            .collect()
    }
}
