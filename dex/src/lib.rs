//! Roster, evolution and type-chart tables for the pokeparty team builder.
//!
//! This crate owns the data model and turns flat tables into it. The team
//! logic in `pokeparty-team` only ever sees the parsed, in-memory form.
//!
//! ```text
//! pokemon.csv / evolutions.csv / type_chart.csv
//!        │  (load)
//!        ▼
//! pokeparty-dex (Roster, EvolutionTable, TypeChart) ← THIS CRATE
//!        │
//!        ▼
//! pokeparty-team (selection, team editing, export)
//! ```
//!
//! # Main Types
//!
//! - [`Type`] and [`TypeChart`] - the 18 types and their effectiveness matrix
//! - [`Stat`] and [`BaseStats`] - per-entry stats
//! - [`RosterEntry`] and [`Roster`] - the creatures available for selection
//! - [`EvolutionEdge`] and [`EvolutionTable`] - level-gated evolutions
//! - [`Dex`] - all three tables bundled together

use std::path::PathBuf;

use thiserror::Error;

pub mod evolution;
pub mod load;
pub mod query;
pub mod roster;
pub mod types;

pub use evolution::{EvolutionEdge, EvolutionTable};
pub use load::{load_dex, load_evolutions, load_roster, load_type_chart};
pub use roster::Roster;
pub use types::{BaseStats, RosterEntry, Stat, Type, TypeChart};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{table} table is missing required column `{column}`")]
    MissingColumn { table: &'static str, column: String },

    #[error("{table} table line {line}: invalid value `{value}` in column `{column}`")]
    InvalidValue {
        table: &'static str,
        line: u64,
        column: String,
        value: String,
    },

    #[error("{table} table line {line}: unknown type `{value}`")]
    UnknownType {
        table: &'static str,
        line: u64,
        value: String,
    },

    #[error("Duplicate roster entry: {0}")]
    DuplicateEntry(String),

    #[error("Failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// The three support tables loaded together
#[derive(Debug, Clone, Default)]
pub struct Dex {
    pub roster: Roster,
    pub evolutions: EvolutionTable,
    pub chart: TypeChart,
}

impl Dex {
    pub fn new(roster: Roster, evolutions: EvolutionTable, chart: TypeChart) -> Self {
        Self {
            roster,
            evolutions,
            chart,
        }
    }
}
