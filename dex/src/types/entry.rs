//! Roster entry (one creature row of the dataset)

use serde::{Deserialize, Serialize};

use super::pokemon_type::Type;
use super::stats::{BaseStats, Stat};

/// One creature in the roster. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Unique name within the dataset
    pub name: String,

    pub primary_type: Type,

    pub secondary_type: Option<Type>,

    /// Generation the creature was introduced in (1-8)
    pub generation: u8,

    pub stats: BaseStats,

    /// Mass in kilograms, when the dataset records it
    pub weight_kg: Option<f32>,
}

impl RosterEntry {
    /// Create a single-typed entry with zeroed stats
    pub fn new(name: impl Into<String>, primary_type: Type, generation: u8) -> Self {
        Self {
            name: name.into(),
            primary_type,
            secondary_type: None,
            generation,
            stats: BaseStats::default(),
            weight_kg: None,
        }
    }

    pub fn with_secondary(mut self, secondary: Type) -> Self {
        self.secondary_type = Some(secondary);
        self
    }

    pub fn with_stats(mut self, stats: BaseStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_weight(mut self, weight_kg: f32) -> Self {
        self.weight_kg = Some(weight_kg);
        self
    }

    /// The one or two types of this entry, primary first
    pub fn types(&self) -> impl Iterator<Item = Type> + '_ {
        std::iter::once(self.primary_type).chain(self.secondary_type)
    }

    pub fn has_type(&self, t: Type) -> bool {
        self.primary_type == t || self.secondary_type == Some(t)
    }

    /// Value of one stat
    pub fn stat(&self, stat: Stat) -> u16 {
        self.stats.get(stat)
    }

    /// "Fire" or "Fire/Flying"
    pub fn type_label(&self) -> String {
        match self.secondary_type {
            Some(second) => format!("{}/{}", self.primary_type, second),
            None => self.primary_type.to_string(),
        }
    }
}
