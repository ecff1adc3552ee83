//! Team selection and editing for the pokeparty team builder.
//!
//! # Overview
//!
//! Given a [`Dex`](pokeparty_dex::Dex), this crate builds a team of up to six
//! entries that covers as many distinct types as the criteria allow, with
//! every candidate fielded in the highest form its level cap reaches.
//!
//! ```text
//! pokeparty-dex (parsed tables)
//!        │
//!        ▼
//! pokeparty-team ← THIS CRATE
//!        │  resolver  → final evolutionary form under a level cap
//!        │  selector  → type-diverse team of ≤ 6
//!        │  session   → one request/response per user action
//!        ▼
//! export (CSV) / analysis report
//! ```
//!
//! # Example Usage
//!
//! ```ignore
//! use pokeparty_team::{CriteriaForm, Request, Session};
//!
//! let mut session = Session::new(dex);
//! let form = CriteriaForm {
//!     generation: "1".into(),
//!     max_level: "30".into(),
//!     ..CriteriaForm::default()
//! };
//! let outcome = session.handle(Request::Generate(form))?;
//! println!("{}", outcome.message());
//! ```

use std::path::PathBuf;

use thiserror::Error;

pub mod analysis;
pub mod criteria;
pub mod export;
pub mod resolver;
pub mod selector;
pub mod session;
pub mod team;

pub use analysis::{TeamAnalysis, TypeAverages, WeightPoint, analyze_team, average_stats_by_type, weight_vs_total};
pub use criteria::{CriteriaForm, TeamCriteria};
pub use export::{DEFAULT_EXPORT_FILE, export_team, write_team_csv};
pub use resolver::{is_available_at_level, resolve_final_form};
pub use selector::{candidate_pool, find_replacement, select_team};
pub use session::{Outcome, Request, Session};
pub use team::{MAX_SHARED_TYPE, MAX_TEAM_SIZE, Team};

/// Errors reported back to the user. None of them leave the session
/// half-modified.
#[derive(Error, Debug)]
pub enum TeamError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Generation must be between 1 and 8, got {0}")]
    GenerationOutOfRange(u32),

    #[error("Level must be between 1 and 100, got {0}")]
    LevelOutOfRange(u32),

    #[error("No Pokémon match the selected criteria. Try adjusting the filters.")]
    NoCandidates,

    #[error("Please select a Pokémon first.")]
    NoSelection,

    #[error("No team member at position {position} (team has {len})")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("The Pokémon name entered is not valid: {0}")]
    UnknownPokemon(String),

    #[error("Team is full ({0} members)")]
    TeamFull(usize),

    #[error("No team available. Generate or add Pokémon to a team first.")]
    EmptyTeam,

    #[error("No suitable replacement found for {0}")]
    NoReplacement(String),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
