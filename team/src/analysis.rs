//! Team and roster summaries behind the analysis report

use std::collections::BTreeMap;

use pokeparty_dex::query::{immunities, resistances, weaknesses};
use pokeparty_dex::{RosterEntry, Type, TypeChart};
use serde::Serialize;

use crate::TeamError;
use crate::team::Team;

/// A member singled out by one stat
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberStat {
    pub name: String,
    pub value: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamAnalysis {
    /// Highest attack (first member on ties)
    pub strongest: MemberStat,

    /// Lowest defense (first member on ties)
    pub weakest: MemberStat,

    /// Attacking types that hit at least one member super-effectively,
    /// with the number of members hit, in chart order
    pub weakness_counts: Vec<(Type, usize)>,

    /// Attacking types at least one member resists, same shape
    pub resistance_counts: Vec<(Type, usize)>,

    /// Attacking types at least one member takes no damage from
    pub immunity_counts: Vec<(Type, usize)>,

    /// Members' average stats by primary type
    pub type_averages: Vec<TypeAverages>,

    /// Members with a known mass
    pub weight_points: Vec<WeightPoint>,
}

impl TeamAnalysis {
    pub fn report(&self) -> String {
        let mut out = format!(
            "Strongest Pokémon (Highest Attack): {} ({})\nWeakest Pokémon (Lowest Defense): {} ({})",
            self.strongest.name, self.strongest.value, self.weakest.name, self.weakest.value
        );
        for (label, counts) in [
            ("Weak to", &self.weakness_counts),
            ("Resists", &self.resistance_counts),
            ("Immune to", &self.immunity_counts),
        ] {
            if !counts.is_empty() {
                out.push_str(&format!("\n{label}: {}", join_counts(counts)));
            }
        }

        out.push_str("\nAverage stats by type:");
        for row in &self.type_averages {
            out.push_str(&format!(
                "\n  {} ({}): HP {:.1}, Atk {:.1}, Def {:.1}, SpA {:.1}, SpD {:.1}, Spe {:.1}",
                row.primary_type,
                row.count,
                row.hp,
                row.attack,
                row.defense,
                row.sp_attack,
                row.sp_defense,
                row.speed
            ));
        }

        if !self.weight_points.is_empty() {
            out.push_str("\nWeight vs total:");
            for point in &self.weight_points {
                out.push_str(&format!(
                    "\n  {}: {:.1} kg, {}",
                    point.name, point.weight_kg, point.total
                ));
            }
        }
        out
    }
}

fn join_counts(counts: &[(Type, usize)]) -> String {
    counts
        .iter()
        .map(|(t, n)| format!("{t} x{n}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn analyze_team(team: &Team, chart: &TypeChart) -> Result<TeamAnalysis, TeamError> {
    let members = team.members();
    let first = members.first().ok_or(TeamError::EmptyTeam)?;

    // Iterator::max_by_key keeps the last maximum; the report wants the first
    let strongest = members
        .iter()
        .fold(first, |best, m| if m.stats.attack > best.stats.attack { m } else { best });
    let weakest = members
        .iter()
        .min_by_key(|m| m.stats.defense)
        .unwrap_or(first);

    let mut weak: BTreeMap<Type, usize> = BTreeMap::new();
    let mut resist: BTreeMap<Type, usize> = BTreeMap::new();
    let mut immune: BTreeMap<Type, usize> = BTreeMap::new();
    for member in members {
        let types: Vec<Type> = member.types().collect();
        for (counts, found) in [
            (&mut weak, weaknesses(chart, &types)),
            (&mut resist, resistances(chart, &types)),
            (&mut immune, immunities(chart, &types)),
        ] {
            for t in found {
                *counts.entry(t).or_default() += 1;
            }
        }
    }

    Ok(TeamAnalysis {
        strongest: MemberStat {
            name: strongest.name.clone(),
            value: strongest.stats.attack,
        },
        weakest: MemberStat {
            name: weakest.name.clone(),
            value: weakest.stats.defense,
        },
        weakness_counts: weak.into_iter().collect(),
        resistance_counts: resist.into_iter().collect(),
        immunity_counts: immune.into_iter().collect(),
        type_averages: average_stats_by_type(members),
        weight_points: weight_vs_total(members),
    })
}

/// Mean base stats of the entries sharing one primary type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeAverages {
    pub primary_type: Type,
    pub count: usize,
    pub hp: f64,
    pub attack: f64,
    pub defense: f64,
    pub sp_attack: f64,
    pub sp_defense: f64,
    pub speed: f64,
}

/// Average stats grouped by primary type, ordered by type
pub fn average_stats_by_type<'a>(
    entries: impl IntoIterator<Item = &'a RosterEntry>,
) -> Vec<TypeAverages> {
    let mut groups: BTreeMap<Type, (usize, [u64; 6])> = BTreeMap::new();
    for entry in entries {
        let s = &entry.stats;
        let (count, sums) = groups.entry(entry.primary_type).or_default();
        *count += 1;
        for (sum, value) in sums
            .iter_mut()
            .zip([s.hp, s.attack, s.defense, s.sp_attack, s.sp_defense, s.speed])
        {
            *sum += u64::from(value);
        }
    }

    groups
        .into_iter()
        .map(|(primary_type, (count, sums))| {
            let mean = |i: usize| sums[i] as f64 / count as f64;
            TypeAverages {
                primary_type,
                count,
                hp: mean(0),
                attack: mean(1),
                defense: mean(2),
                sp_attack: mean(3),
                sp_defense: mean(4),
                speed: mean(5),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightPoint {
    pub name: String,
    pub weight_kg: f32,
    pub total: u16,
}

/// Mass against aggregate stats, for entries whose mass is known
pub fn weight_vs_total<'a>(entries: impl IntoIterator<Item = &'a RosterEntry>) -> Vec<WeightPoint> {
    entries
        .into_iter()
        .filter_map(|e| {
            e.weight_kg.map(|weight_kg| WeightPoint {
                name: e.name.clone(),
                weight_kg,
                total: e.stats.total,
            })
        })
        .collect()
}
