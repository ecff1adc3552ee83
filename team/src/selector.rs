//! Team selection and replacement search

use std::collections::HashSet;

use pokeparty_dex::{Dex, Roster, RosterEntry, Stat, Type};

use crate::criteria::TeamCriteria;
use crate::resolver::{is_available_at_level, resolve_final_form};
use crate::team::{MAX_SHARED_TYPE, MAX_TEAM_SIZE, Team};

/// Roster entries matching the generation filter, in dataset order
pub fn candidate_pool<'a>(roster: &'a Roster, criteria: &TeamCriteria) -> Vec<&'a RosterEntry> {
    match criteria.generation {
        Some(generation) => roster.generation(generation).collect(),
        None => roster.iter().collect(),
    }
}

/// Stable descending sort; equal values keep their incoming order
fn sort_by_stat(candidates: &mut [&RosterEntry], stat: Option<Stat>) {
    if let Some(stat) = stat {
        candidates.sort_by(|a, b| b.stat(stat).cmp(&a.stat(stat)));
    }
}

/// The form a candidate is fielded as, or `None` when it has to be skipped.
///
/// Without a level cap the candidate is taken as is. With one, it is resolved
/// to its final form, which must be available at the cap and must exist in
/// the full roster.
fn fielded_form<'a>(
    dex: &'a Dex,
    candidate: &'a RosterEntry,
    max_level: Option<u8>,
) -> Option<&'a RosterEntry> {
    let Some(level) = max_level else {
        return Some(candidate);
    };

    let resolved = resolve_final_form(&dex.evolutions, &candidate.name, level);
    if !is_available_at_level(&dex.evolutions, resolved, level) {
        tracing::debug!(
            candidate = %candidate.name,
            resolved,
            max_level = level,
            "Skipping form not available at level cap"
        );
        return None;
    }

    let form = dex.roster.get(resolved);
    if form.is_none() {
        tracing::debug!(
            candidate = %candidate.name,
            resolved,
            "Skipping unresolvable evolution target"
        );
    }
    form
}

fn has_excluded_type(entry: &RosterEntry, criteria: &TeamCriteria) -> bool {
    entry.types().any(|t| criteria.is_excluded(t))
}

/// Select up to six entries from `candidates`.
///
/// Candidates are visited in descending order of the prioritised stat (ties
/// and the unsorted case keep the given order). Each one is resolved to its
/// fielded form; forms with an excluded type are skipped. A form is accepted
/// when none of its types is on the team yet, or when any of its types is
/// preferred. Two candidates resolving to the same form yield one member.
pub fn select_team(
    dex: &Dex,
    candidates: &[&RosterEntry],
    criteria: &TeamCriteria,
) -> Vec<RosterEntry> {
    let mut ordered = candidates.to_vec();
    sort_by_stat(&mut ordered, criteria.prioritized_stat);

    let mut team: Vec<RosterEntry> = Vec::with_capacity(MAX_TEAM_SIZE);
    let mut accepted: HashSet<&str> = HashSet::new();
    let mut used_types: HashSet<Type> = HashSet::new();

    for candidate in ordered {
        if team.len() == MAX_TEAM_SIZE {
            break;
        }

        let Some(form) = fielded_form(dex, candidate, criteria.max_level) else {
            continue;
        };

        if accepted.contains(form.name.as_str()) {
            tracing::debug!(candidate = %candidate.name, form = %form.name, "Skipping duplicate form");
            continue;
        }

        if has_excluded_type(form, criteria) {
            continue;
        }

        let disjoint = form.types().all(|t| !used_types.contains(&t));
        let preferred = form.types().any(|t| criteria.is_preferred(t));
        if !(disjoint || preferred) {
            continue;
        }

        used_types.extend(form.types());
        accepted.insert(form.name.as_str());
        team.push(form.clone());
    }

    tracing::info!(
        size = team.len(),
        members = ?team.iter().map(|m| m.name.as_str()).collect::<Vec<_>>(),
        "Selected team"
    );

    team
}

/// First candidate that can take the place of the member at `position`.
///
/// Uses the same pool, ordering and level handling as [`select_team`]. The
/// replacement must not already be on the team, must carry no excluded type,
/// and none of its types may already be held by [`MAX_SHARED_TYPE`] of the
/// other members.
pub fn find_replacement<'a>(
    dex: &'a Dex,
    team: &Team,
    position: usize,
    criteria: &TeamCriteria,
) -> Option<&'a RosterEntry> {
    team.get(position)?;

    let mut pool = candidate_pool(&dex.roster, criteria);
    sort_by_stat(&mut pool, criteria.prioritized_stat);

    pool.into_iter()
        .filter_map(|candidate| fielded_form(dex, candidate, criteria.max_level))
        .find(|form| {
            !team.contains(&form.name)
                && !has_excluded_type(form, criteria)
                && form
                    .types()
                    .all(|t| team.count_with_type(t, Some(position)) < MAX_SHARED_TYPE)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokeparty_dex::{BaseStats, EvolutionEdge, EvolutionTable, TypeChart};

    fn entry(name: &str, t: Type, second: Option<Type>, attack: u16) -> RosterEntry {
        let mut e = RosterEntry::new(name, t, 1).with_stats(BaseStats {
            attack,
            ..BaseStats::default()
        });
        e.secondary_type = second;
        e
    }

    fn dex(entries: Vec<RosterEntry>, edges: Vec<EvolutionEdge>) -> Dex {
        Dex::new(
            Roster::new(entries).unwrap(),
            EvolutionTable::new(edges),
            TypeChart::standard(),
        )
    }

    fn names(team: &[RosterEntry]) -> Vec<&str> {
        team.iter().map(|m| m.name.as_str()).collect()
    }

    fn abc() -> Dex {
        dex(
            vec![
                entry("A", Type::Fire, None, 50),
                entry("B", Type::Water, None, 60),
                entry("C", Type::Fire, Some(Type::Flying), 70),
            ],
            vec![],
        )
    }

    #[test]
    fn test_overlapping_type_skipped() {
        let dex = abc();
        let pool = candidate_pool(&dex.roster, &TeamCriteria::new());
        let team = select_team(&dex, &pool, &TeamCriteria::new().max_level(100));
        assert_eq!(names(&team), vec!["A", "B"]);
    }

    #[test]
    fn test_preferred_type_allows_overlap() {
        let dex = abc();
        let criteria = TeamCriteria::new().prefer(Type::Fire).max_level(100);
        let pool = candidate_pool(&dex.roster, &criteria);
        let team = select_team(&dex, &pool, &criteria);
        assert_eq!(names(&team), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_prioritized_stat_orders_acceptance() {
        let dex = abc();
        let criteria = TeamCriteria::new().prioritize(Stat::Attack);
        let pool = candidate_pool(&dex.roster, &criteria);
        let team = select_team(&dex, &pool, &criteria);
        // C (70) first claims Fire and Flying, A is then blocked
        assert_eq!(names(&team), vec!["C", "B"]);
    }

    #[test]
    fn test_stat_ties_keep_dataset_order() {
        let dex = dex(
            vec![
                entry("First", Type::Fire, None, 80),
                entry("Second", Type::Water, None, 80),
                entry("Third", Type::Grass, None, 90),
            ],
            vec![],
        );
        let criteria = TeamCriteria::new().prioritize(Stat::Attack);
        let pool = candidate_pool(&dex.roster, &criteria);
        assert_eq!(names(&select_team(&dex, &pool, &criteria)), vec!["Third", "First", "Second"]);
    }

    #[test]
    fn test_excluded_types_skipped() {
        let dex = abc();
        let criteria = TeamCriteria::new().prefer(Type::Fire).exclude(Type::Flying);
        let pool = candidate_pool(&dex.roster, &criteria);
        assert_eq!(names(&select_team(&dex, &pool, &criteria)), vec!["A", "B"]);
    }

    #[test]
    fn test_level_gated_form_not_reached() {
        let dex = dex(
            vec![entry("X", Type::Normal, None, 10), entry("Y", Type::Normal, None, 90)],
            vec![EvolutionEdge::new("X", "Y", 18)],
        );
        let criteria = TeamCriteria::new().max_level(10);
        let pool = candidate_pool(&dex.roster, &criteria);
        let team = select_team(&dex, &pool, &criteria);
        assert_eq!(names(&team), vec!["X"]);
        assert!(!is_available_at_level(&dex.evolutions, "Y", 10));
    }

    #[test]
    fn test_candidates_resolve_and_dedupe() {
        let dex = dex(
            vec![
                entry("Pidgey", Type::Normal, Some(Type::Flying), 45),
                entry("Pidgeotto", Type::Normal, Some(Type::Flying), 60),
                entry("Squirtle", Type::Water, None, 48),
            ],
            vec![EvolutionEdge::new("Pidgey", "Pidgeotto", 18)],
        );
        let criteria = TeamCriteria::new().prefer(Type::Normal).max_level(20);
        let pool = candidate_pool(&dex.roster, &criteria);
        let team = select_team(&dex, &pool, &criteria);
        assert_eq!(names(&team), vec!["Pidgeotto", "Squirtle"]);
    }

    #[test]
    fn test_no_resolution_without_level_cap() {
        let dex = dex(
            vec![entry("Pidgey", Type::Normal, None, 45), entry("Pidgeotto", Type::Flying, None, 60)],
            vec![EvolutionEdge::new("Pidgey", "Pidgeotto", 18)],
        );
        let pool = candidate_pool(&dex.roster, &TeamCriteria::new());
        let team = select_team(&dex, &pool, &TeamCriteria::new());
        assert_eq!(names(&team), vec!["Pidgey", "Pidgeotto"]);
    }

    #[test]
    fn test_missing_evolution_target_skipped() {
        let dex = dex(
            vec![entry("Eevee", Type::Normal, None, 55), entry("Vulpix", Type::Fire, None, 41)],
            vec![EvolutionEdge::new("Eevee", "Sylveon", 5)],
        );
        let criteria = TeamCriteria::new().max_level(50);
        let pool = candidate_pool(&dex.roster, &criteria);
        assert_eq!(names(&select_team(&dex, &pool, &criteria)), vec!["Vulpix"]);
    }

    #[test]
    fn test_stops_at_six() {
        let entries = Type::all()
            .iter()
            .enumerate()
            .map(|(i, &t)| entry(&format!("E{i}"), t, None, 1))
            .collect();
        let dex = dex(entries, vec![]);
        let pool = candidate_pool(&dex.roster, &TeamCriteria::new());
        let team = select_team(&dex, &pool, &TeamCriteria::new());
        assert_eq!(names(&team), vec!["E0", "E1", "E2", "E3", "E4", "E5"]);
    }

    #[test]
    fn test_generation_filter() {
        let mut later = entry("Totodile", Type::Water, None, 65);
        later.generation = 2;
        let dex = dex(vec![entry("Squirtle", Type::Water, None, 48), later], vec![]);
        let criteria = TeamCriteria::new().generation(2);
        let pool = candidate_pool(&dex.roster, &criteria);
        assert_eq!(names(&select_team(&dex, &pool, &criteria)), vec!["Totodile"]);
    }

    #[test]
    fn test_replacement_respects_shared_type_limit() {
        let dex = dex(
            vec![
                entry("Oddish", Type::Grass, None, 50),
                entry("Bellsprout", Type::Grass, None, 75),
                entry("Vulpix", Type::Fire, None, 41),
                entry("Exeggcute", Type::Grass, Some(Type::Psychic), 40),
                entry("Abra", Type::Psychic, None, 20),
            ],
            vec![],
        );
        let team = Team::from_members(vec![
            dex.roster.get("Oddish").unwrap().clone(),
            dex.roster.get("Bellsprout").unwrap().clone(),
            dex.roster.get("Vulpix").unwrap().clone(),
        ]);

        let replacement = find_replacement(&dex, &team, 2, &TeamCriteria::new()).unwrap();
        assert_eq!(replacement.name, "Abra");

        // Swapping out a grass member frees one grass slot
        let replacement = find_replacement(&dex, &team, 0, &TeamCriteria::new()).unwrap();
        assert_eq!(replacement.name, "Exeggcute");
    }

    #[test]
    fn test_replacement_none_available() {
        let dex = abc();
        let team = Team::from_members(dex.roster.entries().to_vec());
        assert!(find_replacement(&dex, &team, 0, &TeamCriteria::new()).is_none());
        assert!(find_replacement(&dex, &team, 9, &TeamCriteria::new()).is_none());
    }
}
