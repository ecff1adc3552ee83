//! Level-gated evolution edges

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A directed, level-gated transition from one form to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionEdge {
    pub source: String,
    pub target: String,
    /// Minimum level required to evolve
    pub min_level: u8,
}

impl EvolutionEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, min_level: u8) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            min_level,
        }
    }
}

/// All evolution edges in declaration order.
///
/// Several edges may share a source (branching). Cycles are not rejected here;
/// traversal has to guard against them.
#[derive(Debug, Clone, Default)]
pub struct EvolutionTable {
    edges: Vec<EvolutionEdge>,
    by_source: HashMap<String, Vec<usize>>,
    by_target: HashMap<String, Vec<usize>>,
}

impl EvolutionTable {
    pub fn new(edges: Vec<EvolutionEdge>) -> Self {
        let mut by_source: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_target: HashMap<String, Vec<usize>> = HashMap::new();

        for (idx, edge) in edges.iter().enumerate() {
            by_source.entry(edge.source.clone()).or_default().push(idx);
            by_target.entry(edge.target.clone()).or_default().push(idx);
        }

        Self {
            edges,
            by_source,
            by_target,
        }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edges leaving `source`, in declaration order
    pub fn outgoing<'a>(&'a self, source: &str) -> impl Iterator<Item = &'a EvolutionEdge> + 'a {
        self.indices(&self.by_source, source)
    }

    /// Edges arriving at `target`, in declaration order
    pub fn incoming<'a>(&'a self, target: &str) -> impl Iterator<Item = &'a EvolutionEdge> + 'a {
        self.indices(&self.by_target, target)
    }

    fn indices<'a>(
        &'a self,
        index: &'a HashMap<String, Vec<usize>>,
        key: &str,
    ) -> impl Iterator<Item = &'a EvolutionEdge> + 'a {
        index
            .get(key)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.edges[idx])
    }
}

impl FromIterator<EvolutionEdge> for EvolutionTable {
    fn from_iter<I: IntoIterator<Item = EvolutionEdge>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
