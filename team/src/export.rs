//! CSV export of the current team

use std::fs::File;
use std::io::Write;
use std::path::Path;

use pokeparty_dex::RosterEntry;
use serde::Serialize;

use crate::TeamError;
use crate::team::Team;

pub const DEFAULT_EXPORT_FILE: &str = "selected_team.csv";

const HEADER: [&str; 10] = [
    "Name",
    "Type 1",
    "Type 2",
    "HP",
    "Attack",
    "Defense",
    "Sp. Attack",
    "Sp. Defense",
    "Speed",
    "Total",
];

/// One exported row, in [`HEADER`] order
#[derive(Serialize)]
struct ExportRow<'a> {
    name: &'a str,
    type1: &'static str,
    type2: &'static str,
    hp: u16,
    attack: u16,
    defense: u16,
    sp_attack: u16,
    sp_defense: u16,
    speed: u16,
    total: u16,
}

impl<'a> From<&'a RosterEntry> for ExportRow<'a> {
    fn from(entry: &'a RosterEntry) -> Self {
        let s = &entry.stats;
        Self {
            name: &entry.name,
            type1: entry.primary_type.as_str(),
            type2: entry.secondary_type.map_or("", |t| t.as_str()),
            hp: s.hp,
            attack: s.attack,
            defense: s.defense,
            sp_attack: s.sp_attack,
            sp_defense: s.sp_defense,
            speed: s.speed,
            total: s.total,
        }
    }
}

/// Write the team as CSV (header always present)
pub fn write_team_csv<W: Write>(team: &Team, writer: W) -> Result<(), TeamError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(HEADER)?;
    for member in team.members() {
        wtr.serialize(ExportRow::from(member))?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write the team to `path`, replacing any existing file
pub fn export_team(team: &Team, path: impl AsRef<Path>) -> Result<(), TeamError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| TeamError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_team_csv(team, file)?;

    tracing::info!(path = %path.display(), members = team.len(), "Exported team");
    Ok(())
}
