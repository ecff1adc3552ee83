//! Domain types for the roster tables

mod entry;
mod pokemon_type;
mod stats;

pub use entry::RosterEntry;
pub use pokemon_type::{Type, TypeChart};
pub use stats::{BaseStats, Stat};
