//! The in-memory team

use pokeparty_dex::{RosterEntry, Type};
use serde::Serialize;

use crate::TeamError;

/// Maximum number of members on a team
pub const MAX_TEAM_SIZE: usize = 6;

/// A replacement may not push the count of any single type above this
pub const MAX_SHARED_TYPE: usize = 2;

/// Ordered team of at most [`MAX_TEAM_SIZE`] entries (display order)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Team {
    members: Vec<RosterEntry>,
}

impl Team {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from selector output, keeping at most six members
    pub fn from_members(mut members: Vec<RosterEntry>) -> Self {
        members.truncate(MAX_TEAM_SIZE);
        Self { members }
    }

    pub fn members(&self) -> &[RosterEntry] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= MAX_TEAM_SIZE
    }

    pub fn get(&self, position: usize) -> Option<&RosterEntry> {
        self.members.get(position)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m.name == name)
    }

    /// Number of members carrying `t`, ignoring the member at `skip`
    pub fn count_with_type(&self, t: Type, skip: Option<usize>) -> usize {
        self.members
            .iter()
            .enumerate()
            .filter(|(idx, member)| Some(*idx) != skip && member.has_type(t))
            .count()
    }

    /// Append a member
    pub fn push(&mut self, entry: RosterEntry) -> Result<(), TeamError> {
        if self.is_full() {
            return Err(TeamError::TeamFull(self.members.len()));
        }
        self.members.push(entry);
        Ok(())
    }

    /// Remove the member at `position`, returning it
    pub fn remove(&mut self, position: usize) -> Result<RosterEntry, TeamError> {
        self.check_position(position)?;
        Ok(self.members.remove(position))
    }

    /// Put `entry` at `position`, returning the member it replaced
    pub fn replace(&mut self, position: usize, entry: RosterEntry) -> Result<RosterEntry, TeamError> {
        self.check_position(position)?;
        Ok(std::mem::replace(&mut self.members[position], entry))
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub(crate) fn check_position(&self, position: usize) -> Result<(), TeamError> {
        if position >= self.members.len() {
            return Err(TeamError::PositionOutOfRange {
                position,
                len: self.members.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, t: Type) -> RosterEntry {
        RosterEntry::new(name, t, 1)
    }

    #[test]
    fn test_push_until_full() {
        let mut team = Team::new();
        for i in 0..MAX_TEAM_SIZE {
            team.push(member(&format!("M{i}"), Type::Normal)).unwrap();
        }
        assert!(team.is_full());
        assert!(matches!(
            team.push(member("Extra", Type::Fire)),
            Err(TeamError::TeamFull(6))
        ));
        assert_eq!(team.len(), 6);
    }

    #[test]
    fn test_from_members_truncates() {
        let members = (0..8).map(|i| member(&format!("M{i}"), Type::Water)).collect();
        assert_eq!(Team::from_members(members).len(), MAX_TEAM_SIZE);
    }

    #[test]
    fn test_remove_and_replace() {
        let mut team = Team::from_members(vec![
            member("Oddish", Type::Grass),
            member("Psyduck", Type::Water),
        ]);

        let old = team.replace(1, member("Vulpix", Type::Fire)).unwrap();
        assert_eq!(old.name, "Psyduck");
        assert!(team.contains("Vulpix"));

        let removed = team.remove(0).unwrap();
        assert_eq!(removed.name, "Oddish");
        assert_eq!(team.len(), 1);

        assert!(matches!(
            team.remove(3),
            Err(TeamError::PositionOutOfRange { position: 3, len: 1 })
        ));
    }

    #[test]
    fn test_type_counts() {
        let team = Team::from_members(vec![
            member("Oddish", Type::Grass).with_secondary(Type::Poison),
            member("Bellsprout", Type::Grass).with_secondary(Type::Poison),
            member("Ekans", Type::Poison),
        ]);
        assert_eq!(team.count_with_type(Type::Grass, None), 2);
        assert_eq!(team.count_with_type(Type::Poison, None), 3);
        assert_eq!(team.count_with_type(Type::Poison, Some(2)), 2);
    }
}
