//! Evolution resolution under a level cap

use std::collections::HashSet;

use pokeparty_dex::EvolutionTable;

/// Follow evolutions from `identifier` as far as `max_level` allows.
///
/// At each step the first outgoing edge in declaration order whose minimum
/// level is at most `max_level` is taken; other branches are never explored.
/// Traversal stops before revisiting a form, so a malformed cyclic table
/// terminates on the last form not yet seen.
pub fn resolve_final_form<'a>(
    evolutions: &'a EvolutionTable,
    identifier: &'a str,
    max_level: u8,
) -> &'a str {
    let mut current = identifier;
    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(current);

    while let Some(edge) = evolutions
        .outgoing(current)
        .find(|edge| edge.min_level <= max_level)
    {
        if !visited.insert(edge.target.as_str()) {
            tracing::warn!(
                start = identifier,
                at = current,
                next = %edge.target,
                "Evolution cycle detected, stopping resolution"
            );
            break;
        }
        current = edge.target.as_str();
    }

    current
}

/// Whether `identifier` can exist at `max_level`.
///
/// A form is unavailable when it is the target of any edge whose minimum
/// level exceeds the cap, no matter which path led to it.
pub fn is_available_at_level(evolutions: &EvolutionTable, identifier: &str, max_level: u8) -> bool {
    !evolutions
        .incoming(identifier)
        .any(|edge| edge.min_level > max_level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokeparty_dex::EvolutionEdge;

    fn pidgey_line() -> EvolutionTable {
        EvolutionTable::new(vec![
            EvolutionEdge::new("Pidgey", "Pidgeotto", 18),
            EvolutionEdge::new("Pidgeotto", "Pidgeot", 36),
        ])
    }

    #[test]
    fn test_resolve_stops_at_level_cap() {
        let table = pidgey_line();
        assert_eq!(resolve_final_form(&table, "Pidgey", 10), "Pidgey");
        assert_eq!(resolve_final_form(&table, "Pidgey", 18), "Pidgeotto");
        assert_eq!(resolve_final_form(&table, "Pidgey", 35), "Pidgeotto");
        assert_eq!(resolve_final_form(&table, "Pidgey", 100), "Pidgeot");
    }

    #[test]
    fn test_resolve_unknown_identifier_is_identity() {
        let table = pidgey_line();
        assert_eq!(resolve_final_form(&table, "Ditto", 100), "Ditto");
    }

    #[test]
    fn test_resolve_branch_takes_first_declared_edge() {
        let table = EvolutionTable::new(vec![
            EvolutionEdge::new("Tyrogue", "Hitmontop", 30),
            EvolutionEdge::new("Tyrogue", "Hitmonlee", 20),
            EvolutionEdge::new("Tyrogue", "Hitmonchan", 20),
        ]);
        // Hitmontop is declared first but gated above the cap
        assert_eq!(resolve_final_form(&table, "Tyrogue", 25), "Hitmonlee");
        assert_eq!(resolve_final_form(&table, "Tyrogue", 30), "Hitmontop");
    }

    #[test]
    fn test_resolve_terminates_on_cycle() {
        let table = EvolutionTable::new(vec![
            EvolutionEdge::new("A", "B", 5),
            EvolutionEdge::new("B", "C", 5),
            EvolutionEdge::new("C", "A", 5),
        ]);
        assert_eq!(resolve_final_form(&table, "A", 100), "C");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let table = pidgey_line();
        for level in [1, 17, 18, 36, 100] {
            let once = resolve_final_form(&table, "Pidgey", level);
            assert_eq!(resolve_final_form(&table, once, level), once);
        }
    }

    #[test]
    fn test_availability() {
        let table = pidgey_line();
        assert!(is_available_at_level(&table, "Pidgey", 1));
        assert!(!is_available_at_level(&table, "Pidgeotto", 10));
        assert!(is_available_at_level(&table, "Pidgeotto", 18));
        assert!(!is_available_at_level(&table, "Pidgeot", 35));
    }

    #[test]
    fn test_availability_uses_every_incoming_edge() {
        // Reachable cheaply from one source, but gated high from another
        let table = EvolutionTable::new(vec![
            EvolutionEdge::new("Cheap", "Target", 5),
            EvolutionEdge::new("Pricey", "Target", 50),
        ]);
        assert_eq!(resolve_final_form(&table, "Cheap", 10), "Target");
        assert!(!is_available_at_level(&table, "Target", 10));
    }
}
