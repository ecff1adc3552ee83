//! Session - the team builder state and its user actions
//!
//! Every user action is a [`Request`] handled against the current state.
//! A request either succeeds and returns an [`Outcome`] carrying the message
//! to show, or fails with a [`TeamError`] and leaves the session untouched.

use std::path::PathBuf;

use pokeparty_dex::Dex;
use pokeparty_dex::query::{EffectivenessProfile, effectiveness_profile};

use crate::TeamError;
use crate::analysis::{TeamAnalysis, analyze_team};
use crate::criteria::{CriteriaForm, TeamCriteria};
use crate::export::export_team;
use crate::selector::{candidate_pool, find_replacement, select_team};
use crate::team::Team;

/// One user action
#[derive(Debug, Clone)]
pub enum Request {
    /// Parse the form, then select a new team
    Generate(CriteriaForm),

    /// Select a new team from already validated criteria
    Select(TeamCriteria),

    /// Remove the member at the selected display position
    Remove(Option<usize>),

    /// Replace the member at the selected display position
    Swap(Option<usize>),

    Clear,

    /// Append a roster entry by name, bypassing the selector's rules
    ManualAdd(String),

    Export(PathBuf),

    Analyze,

    /// Effectiveness report for the member at the selected position
    Profile(Option<usize>),
}

/// Successful result of a [`Request`]
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The team was replaced or edited
    TeamChanged { message: String },

    Exported { path: PathBuf, members: usize },

    Analysis(TeamAnalysis),

    Profile {
        name: String,
        profile: EffectivenessProfile,
    },
}

impl Outcome {
    /// Text to show the user
    pub fn message(&self) -> String {
        match self {
            Outcome::TeamChanged { message } => message.clone(),
            Outcome::Exported { path, members } => {
                format!("Your team of {} has been saved to '{}'.", members, path.display())
            }
            Outcome::Analysis(analysis) => analysis.report(),
            Outcome::Profile { name, profile } => format!("{}: {}", name, profile.report()),
        }
    }

    fn changed(message: impl Into<String>) -> Self {
        Outcome::TeamChanged {
            message: message.into(),
        }
    }
}

/// Team builder state: the loaded tables, the current team and the criteria
/// of the last generated team (used again by swaps).
#[derive(Debug, Clone)]
pub struct Session {
    dex: Dex,
    team: Team,
    criteria: TeamCriteria,
}

impl Session {
    pub fn new(dex: Dex) -> Self {
        Self {
            dex,
            team: Team::new(),
            criteria: TeamCriteria::default(),
        }
    }

    pub fn dex(&self) -> &Dex {
        &self.dex
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    /// Criteria of the last successful selection
    pub fn criteria(&self) -> &TeamCriteria {
        &self.criteria
    }

    /// Handle one user action
    pub fn handle(&mut self, request: Request) -> Result<Outcome, TeamError> {
        match request {
            Request::Generate(form) => {
                let criteria = form.parse()?;
                self.select(criteria)
            }
            Request::Select(criteria) => self.select(criteria),
            Request::Remove(position) => self.remove(position),
            Request::Swap(position) => self.swap(position),
            Request::Clear => {
                self.team.clear();
                Ok(Outcome::changed("Team cleared."))
            }
            Request::ManualAdd(name) => self.manual_add(&name),
            Request::Export(path) => self.export(path),
            Request::Analyze => Ok(Outcome::Analysis(analyze_team(&self.team, &self.dex.chart)?)),
            Request::Profile(position) => self.profile(position),
        }
    }

    fn select(&mut self, criteria: TeamCriteria) -> Result<Outcome, TeamError> {
        let pool = candidate_pool(&self.dex.roster, &criteria);
        if pool.is_empty() {
            return Err(TeamError::NoCandidates);
        }

        let members = select_team(&self.dex, &pool, &criteria);
        if members.is_empty() {
            return Err(TeamError::NoCandidates);
        }

        let message = format!(
            "Generated a team of {}: {}",
            members.len(),
            members
                .iter()
                .map(|m| m.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        self.team = Team::from_members(members);
        self.criteria = criteria;
        Ok(Outcome::changed(message))
    }

    fn remove(&mut self, position: Option<usize>) -> Result<Outcome, TeamError> {
        let position = position.ok_or(TeamError::NoSelection)?;
        let removed = self.team.remove(position)?;
        Ok(Outcome::changed(format!(
            "{} has been removed from your team.",
            removed.name
        )))
    }

    fn swap(&mut self, position: Option<usize>) -> Result<Outcome, TeamError> {
        let position = position.ok_or(TeamError::NoSelection)?;
        self.team.check_position(position)?;

        let replacement = find_replacement(&self.dex, &self.team, position, &self.criteria)
            .cloned()
            .ok_or_else(|| {
                let name = self
                    .team
                    .get(position)
                    .map(|m| m.name.clone())
                    .unwrap_or_default();
                TeamError::NoReplacement(name)
            })?;

        let incoming = replacement.name.clone();
        let outgoing = self.team.replace(position, replacement)?;
        tracing::info!(
            position,
            outgoing = %outgoing.name,
            incoming = %incoming,
            "Swapped team member"
        );
        Ok(Outcome::changed(format!(
            "Swapped {} with {}.",
            outgoing.name, incoming
        )))
    }

    fn manual_add(&mut self, name: &str) -> Result<Outcome, TeamError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TeamError::InvalidInput(
                "Please enter a Pokémon name.".to_string(),
            ));
        }

        let entry = self
            .dex
            .roster
            .find_ignore_case(name)
            .cloned()
            .ok_or_else(|| TeamError::UnknownPokemon(name.to_string()))?;

        let added = entry.name.clone();
        self.team.push(entry)?;
        Ok(Outcome::changed(format!(
            "{added} has been added to your team!"
        )))
    }

    fn export(&self, path: PathBuf) -> Result<Outcome, TeamError> {
        if self.team.is_empty() {
            return Err(TeamError::EmptyTeam);
        }
        export_team(&self.team, &path)?;
        Ok(Outcome::Exported {
            path,
            members: self.team.len(),
        })
    }

    fn profile(&self, position: Option<usize>) -> Result<Outcome, TeamError> {
        let position = position.ok_or(TeamError::NoSelection)?;
        self.team.check_position(position)?;
        let member = &self.team.members()[position];

        Ok(Outcome::Profile {
            name: member.name.clone(),
            profile: effectiveness_profile(
                &self.dex.chart,
                member.primary_type,
                member.secondary_type,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokeparty_dex::{EvolutionTable, Roster, RosterEntry, Type, TypeChart};

    fn session() -> Session {
        let roster = Roster::new(vec![
            RosterEntry::new("Charmander", Type::Fire, 1),
            RosterEntry::new("Squirtle", Type::Water, 1),
            RosterEntry::new("Bulbasaur", Type::Grass, 1).with_secondary(Type::Poison),
            RosterEntry::new("Chikorita", Type::Grass, 2),
        ])
        .unwrap();
        Session::new(Dex::new(roster, EvolutionTable::default(), TypeChart::standard()))
    }

    fn generation(generation: &str) -> Request {
        Request::Generate(CriteriaForm {
            generation: generation.to_string(),
            ..CriteriaForm::default()
        })
    }

    fn names(session: &Session) -> Vec<&str> {
        session.team().members().iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_generate() {
        let mut s = session();
        let outcome = s.handle(generation("1")).unwrap();
        assert_eq!(names(&s), vec!["Charmander", "Squirtle", "Bulbasaur"]);
        assert!(outcome.message().contains("Charmander, Squirtle, Bulbasaur"));
        assert_eq!(s.criteria().generation, Some(1));
    }

    #[test]
    fn test_generate_invalid_input_keeps_team() {
        let mut s = session();
        s.handle(generation("1")).unwrap();
        assert!(matches!(s.handle(generation("x")), Err(TeamError::InvalidInput(_))));
        assert!(matches!(
            s.handle(generation("9")),
            Err(TeamError::GenerationOutOfRange(9))
        ));
        assert_eq!(s.team().len(), 3);
    }

    #[test]
    fn test_generate_empty_generation() {
        let mut s = session();
        assert!(matches!(s.handle(generation("5")), Err(TeamError::NoCandidates)));
        assert!(s.team().is_empty());
    }

    #[test]
    fn test_generate_everything_excluded() {
        let mut s = session();
        let criteria = TeamCriteria::new()
            .generation(2)
            .exclude(Type::Grass);
        assert!(matches!(
            s.handle(Request::Select(criteria)),
            Err(TeamError::NoCandidates)
        ));
    }

    #[test]
    fn test_remove() {
        let mut s = session();
        s.handle(generation("1")).unwrap();

        assert!(matches!(s.handle(Request::Remove(None)), Err(TeamError::NoSelection)));
        assert_eq!(s.team().len(), 3);

        let outcome = s.handle(Request::Remove(Some(1))).unwrap();
        assert_eq!(outcome.message(), "Squirtle has been removed from your team.");
        assert_eq!(names(&s), vec!["Charmander", "Bulbasaur"]);

        assert!(matches!(
            s.handle(Request::Remove(Some(7))),
            Err(TeamError::PositionOutOfRange { position: 7, len: 2 })
        ));
    }

    #[test]
    fn test_manual_add_ignores_case_and_rules() {
        let mut s = session();
        s.handle(generation("1")).unwrap();

        // Chikorita is generation 2 and shares Grass with Bulbasaur
        let outcome = s.handle(Request::ManualAdd("  cHiKoRiTa ".into())).unwrap();
        assert_eq!(outcome.message(), "Chikorita has been added to your team!");
        assert_eq!(s.team().len(), 4);

        assert!(matches!(
            s.handle(Request::ManualAdd("Mew".into())),
            Err(TeamError::UnknownPokemon(name)) if name == "Mew"
        ));
        assert!(matches!(
            s.handle(Request::ManualAdd("   ".into())),
            Err(TeamError::InvalidInput(_))
        ));
        assert_eq!(s.team().len(), 4);
    }

    #[test]
    fn test_swap() {
        let mut s = session();
        s.handle(Request::Select(TeamCriteria::new().generation(1).exclude(Type::Grass)))
            .unwrap();
        assert_eq!(names(&s), vec!["Charmander", "Squirtle"]);

        // Bulbasaur is excluded by the remembered criteria, nothing else is left
        assert!(matches!(
            s.handle(Request::Swap(Some(0))),
            Err(TeamError::NoReplacement(name)) if name == "Charmander"
        ));
        assert_eq!(names(&s), vec!["Charmander", "Squirtle"]);

        s.handle(generation("1")).unwrap();
        s.handle(Request::Remove(Some(1))).unwrap();
        assert_eq!(names(&s), vec!["Charmander", "Bulbasaur"]);
        let outcome = s.handle(Request::Swap(Some(0))).unwrap();
        assert_eq!(outcome.message(), "Swapped Charmander with Squirtle.");
        assert!(matches!(s.handle(Request::Swap(None)), Err(TeamError::NoSelection)));
    }

    #[test]
    fn test_clear_and_export_empty() {
        let mut s = session();
        s.handle(generation("1")).unwrap();
        s.handle(Request::Clear).unwrap();
        assert!(s.team().is_empty());
        assert!(matches!(
            s.handle(Request::Export(PathBuf::from("unused.csv"))),
            Err(TeamError::EmptyTeam)
        ));
        assert!(matches!(s.handle(Request::Analyze), Err(TeamError::EmptyTeam)));
    }

    #[test]
    fn test_profile() {
        let mut s = session();
        s.handle(generation("1")).unwrap();
        match s.handle(Request::Profile(Some(0))).unwrap() {
            Outcome::Profile { name, profile } => {
                assert_eq!(name, "Charmander");
                assert!(profile.strong_against.contains(&Type::Grass));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(matches!(s.handle(Request::Profile(None)), Err(TeamError::NoSelection)));
    }
}
