//! Selection criteria and the raw form they are parsed from

use std::collections::BTreeSet;

use pokeparty_dex::{Stat, Type};
use serde::{Deserialize, Serialize};

use crate::TeamError;

pub const MIN_GENERATION: u8 = 1;
pub const MAX_GENERATION: u8 = 8;
pub const MAX_LEVEL: u8 = 100;

/// What the selector should optimise for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamCriteria {
    /// Only consider entries of this generation
    pub generation: Option<u8>,

    /// Consider candidates in descending order of this stat
    pub prioritized_stat: Option<Stat>,

    /// Types allowed to overlap with types already on the team
    pub preferred_types: BTreeSet<Type>,

    /// Types that may not appear on any member
    pub excluded_types: BTreeSet<Type>,

    /// Level cap for evolution resolution. `None` disables resolution.
    pub max_level: Option<u8>,
}

impl TeamCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(mut self, generation: u8) -> Self {
        self.generation = Some(generation);
        self
    }

    pub fn prioritize(mut self, stat: Stat) -> Self {
        self.prioritized_stat = Some(stat);
        self
    }

    pub fn prefer(mut self, t: Type) -> Self {
        self.preferred_types.insert(t);
        self
    }

    pub fn exclude(mut self, t: Type) -> Self {
        self.excluded_types.insert(t);
        self
    }

    pub fn max_level(mut self, level: u8) -> Self {
        self.max_level = Some(level);
        self
    }

    pub fn is_preferred(&self, t: Type) -> bool {
        self.preferred_types.contains(&t)
    }

    pub fn is_excluded(&self, t: Type) -> bool {
        self.excluded_types.contains(&t)
    }
}

/// Unvalidated user input, one string per form field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriteriaForm {
    /// Required, 1-8
    pub generation: String,

    /// Optional stat column name
    pub stat: String,

    /// Optional level cap, 1-100
    pub max_level: String,

    pub preferred_types: Vec<String>,

    pub excluded_types: Vec<String>,
}

impl CriteriaForm {
    /// Validate every field. Nothing is partially applied on error.
    pub fn parse(&self) -> Result<TeamCriteria, TeamError> {
        let generation = parse_number(&self.generation, "Generation (1-8)")?;
        if !(u32::from(MIN_GENERATION)..=u32::from(MAX_GENERATION)).contains(&generation) {
            return Err(TeamError::GenerationOutOfRange(generation));
        }

        let max_level = if self.max_level.trim().is_empty() {
            None
        } else {
            let level = parse_number(&self.max_level, "Level (1-100)")?;
            if !(1..=u32::from(MAX_LEVEL)).contains(&level) {
                return Err(TeamError::LevelOutOfRange(level));
            }
            Some(level as u8)
        };

        let stat = self.stat.trim();
        let prioritized_stat = if stat.is_empty() {
            None
        } else {
            Some(
                Stat::from_column(stat)
                    .ok_or_else(|| TeamError::InvalidInput(format!("unknown stat `{stat}`")))?,
            )
        };

        Ok(TeamCriteria {
            generation: Some(generation as u8),
            prioritized_stat,
            preferred_types: parse_types(&self.preferred_types)?,
            excluded_types: parse_types(&self.excluded_types)?,
            max_level,
        })
    }
}

/// Digits only, as typed into the form
fn parse_number(text: &str, field: &str) -> Result<u32, TeamError> {
    let text = text.trim();
    let invalid = || TeamError::InvalidInput(format!("Please enter a valid numerical value for {field}."));
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    text.parse().map_err(|_| invalid())
}

fn parse_types(names: &[String]) -> Result<BTreeSet<Type>, TeamError> {
    names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(|name| {
            Type::parse(name).ok_or_else(|| TeamError::InvalidInput(format!("unknown type `{name}`")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(generation: &str) -> CriteriaForm {
        CriteriaForm {
            generation: generation.to_string(),
            ..CriteriaForm::default()
        }
    }

    #[test]
    fn test_parse_minimal_form() {
        let criteria = form(" 3 ").parse().unwrap();
        assert_eq!(criteria.generation, Some(3));
        assert_eq!(criteria.prioritized_stat, None);
        assert_eq!(criteria.max_level, None);
        assert!(criteria.preferred_types.is_empty());
    }

    #[test]
    fn test_parse_full_form() {
        let criteria = CriteriaForm {
            generation: "1".into(),
            stat: "Attack".into(),
            max_level: "30".into(),
            preferred_types: vec!["fire".into(), " Water".into(), "".into()],
            excluded_types: vec!["ghost".into()],
        }
        .parse()
        .unwrap();

        assert_eq!(criteria.prioritized_stat, Some(Stat::Attack));
        assert_eq!(criteria.max_level, Some(30));
        assert!(criteria.is_preferred(Type::Fire));
        assert!(criteria.is_preferred(Type::Water));
        assert_eq!(criteria.preferred_types.len(), 2);
        assert!(criteria.is_excluded(Type::Ghost));
    }

    #[test]
    fn test_non_numeric_generation() {
        for bad in ["", "one", "-1", "2.5", "1a"] {
            assert!(
                matches!(form(bad).parse(), Err(TeamError::InvalidInput(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_generation_out_of_range() {
        assert!(matches!(form("0").parse(), Err(TeamError::GenerationOutOfRange(0))));
        assert!(matches!(form("9").parse(), Err(TeamError::GenerationOutOfRange(9))));
        assert!(matches!(
            form("99999999999").parse(),
            Err(TeamError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_invalid_level() {
        let mut f = form("1");
        f.max_level = "high".into();
        assert!(matches!(f.parse(), Err(TeamError::InvalidInput(_))));
        f.max_level = "101".into();
        assert!(matches!(f.parse(), Err(TeamError::LevelOutOfRange(101))));
        f.max_level = "0".into();
        assert!(matches!(f.parse(), Err(TeamError::LevelOutOfRange(0))));
    }

    #[test]
    fn test_unknown_stat_and_type() {
        let mut f = form("1");
        f.stat = "luck".into();
        assert!(matches!(f.parse(), Err(TeamError::InvalidInput(msg)) if msg.contains("luck")));

        let mut f = form("1");
        f.excluded_types = vec!["sound".into()];
        assert!(matches!(f.parse(), Err(TeamError::InvalidInput(msg)) if msg.contains("sound")));
    }

    #[test]
    fn test_builder() {
        let criteria = TeamCriteria::new()
            .generation(2)
            .prioritize(Stat::Speed)
            .prefer(Type::Grass)
            .exclude(Type::Ice)
            .max_level(50);
        assert_eq!(criteria.generation, Some(2));
        assert_eq!(criteria.prioritized_stat, Some(Stat::Speed));
        assert!(criteria.is_preferred(Type::Grass));
        assert!(criteria.is_excluded(Type::Ice));
        assert_eq!(criteria.max_level, Some(50));
    }
}
