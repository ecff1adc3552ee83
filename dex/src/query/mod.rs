//! Query helpers over the type chart
//!
//! Offensive profiles for the textual team report, plus the defensive
//! weakness/resistance lookups used by the team analysis.

mod matchup;

pub use matchup::{EffectivenessProfile, effectiveness_profile, immunities, resistances, weaknesses};
