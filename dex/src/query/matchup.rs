//! Type matchup helpers for the team report

use serde::Serialize;

use crate::types::{Type, TypeChart};

/// Offensive profile of a one- or two-typed entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectivenessProfile {
    pub primary: Type,
    pub secondary: Option<Type>,

    /// Combined multiplier for every column type, in chart order
    pub multipliers: Vec<(Type, f32)>,

    /// Column types whose combined multiplier is above 1
    pub strong_against: Vec<Type>,

    /// Column types whose combined multiplier is below 1
    pub weak_against: Vec<Type>,
}

/// Combine the chart rows of `primary` and `secondary` column by column.
///
/// For each column type `t` the multiplier is `chart[primary][t] *
/// chart[secondary][t]`, with the second factor fixed at 1 for single-typed
/// entries. Products above 1 land in `strong_against`, below 1 in
/// `weak_against`; exactly neutral columns appear in neither list.
pub fn effectiveness_profile(
    chart: &TypeChart,
    primary: Type,
    secondary: Option<Type>,
) -> EffectivenessProfile {
    let first = chart.row(primary);
    let second = secondary.map(|s| chart.row(s));
    let multipliers: Vec<(Type, f32)> = Type::all()
        .iter()
        .enumerate()
        .map(|(i, &t)| (t, first[i] * second.map_or(1.0, |row| row[i])))
        .collect();

    let strong_against = multipliers
        .iter()
        .filter(|(_, m)| *m > 1.0)
        .map(|(t, _)| *t)
        .collect();
    let weak_against = multipliers
        .iter()
        .filter(|(_, m)| *m < 1.0)
        .map(|(t, _)| *t)
        .collect();

    EffectivenessProfile {
        primary,
        secondary,
        multipliers,
        strong_against,
        weak_against,
    }
}

impl EffectivenessProfile {
    /// Multiplier against one column type
    pub fn multiplier(&self, t: Type) -> f32 {
        self.multipliers
            .iter()
            .find(|(column, _)| *column == t)
            .map_or(1.0, |(_, m)| *m)
    }

    /// Two-line textual report
    pub fn report(&self) -> String {
        let label = match self.secondary {
            Some(second) => format!("{}/{}", self.primary, second),
            None => self.primary.to_string(),
        };
        format!(
            "{label}\n  Strong against: {}\n  Weak against: {}",
            join_types(&self.strong_against),
            join_types(&self.weak_against)
        )
    }
}

fn join_types(types: &[Type]) -> String {
    if types.is_empty() {
        return "none".to_string();
    }
    types
        .iter()
        .map(Type::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// All attacking types that hit the defender for more than 1x
pub fn weaknesses(chart: &TypeChart, defender_types: &[Type]) -> Vec<Type> {
    Type::all()
        .iter()
        .copied()
        .filter(|t| chart.multiplier_multi(*t, defender_types) > 1.0)
        .collect()
}

/// All attacking types the defender resists (0 < effectiveness < 1)
pub fn resistances(chart: &TypeChart, defender_types: &[Type]) -> Vec<Type> {
    Type::all()
        .iter()
        .copied()
        .filter(|t| {
            let eff = chart.multiplier_multi(*t, defender_types);
            eff > 0.0 && eff < 1.0
        })
        .collect()
}

/// All attacking types the defender is immune to
pub fn immunities(chart: &TypeChart, defender_types: &[Type]) -> Vec<Type> {
    Type::all()
        .iter()
        .copied()
        .filter(|t| chart.multiplier_multi(*t, defender_types) == 0.0)
        .collect()
}
