//! The roster: every creature available for selection, in dataset order

use std::collections::HashMap;

use crate::LoadError;
use crate::types::RosterEntry;

/// Ordered roster with name lookups
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,

    /// Exact name -> position
    by_name: HashMap<String, usize>,

    /// Lower-cased name -> position (first occurrence)
    by_lower: HashMap<String, usize>,
}

impl Roster {
    /// Build a roster, rejecting duplicate names
    pub fn new(entries: Vec<RosterEntry>) -> Result<Self, LoadError> {
        let mut by_name = HashMap::with_capacity(entries.len());
        let mut by_lower = HashMap::with_capacity(entries.len());

        for (idx, entry) in entries.iter().enumerate() {
            if by_name.insert(entry.name.clone(), idx).is_some() {
                return Err(LoadError::DuplicateEntry(entry.name.clone()));
            }
            by_lower.entry(entry.name.to_lowercase()).or_insert(idx);
        }

        Ok(Self {
            entries,
            by_name,
            by_lower,
        })
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &RosterEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact-name lookup
    pub fn get(&self, name: &str) -> Option<&RosterEntry> {
        self.by_name.get(name).map(|&idx| &self.entries[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Case-insensitive exact-name lookup (surrounding whitespace ignored)
    pub fn find_ignore_case(&self, name: &str) -> Option<&RosterEntry> {
        self.by_lower
            .get(&name.trim().to_lowercase())
            .map(|&idx| &self.entries[idx])
    }

    /// Entries of one generation, in dataset order
    pub fn generation(&self, generation: u8) -> impl Iterator<Item = &RosterEntry> {
        self.entries
            .iter()
            .filter(move |e| e.generation == generation)
    }
}
