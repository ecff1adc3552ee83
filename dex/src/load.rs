//! CSV loaders for the roster, evolution and type-chart tables.
//!
//! Headers are trimmed and lower-cased before matching, so `Name`, ` name`
//! and `NAME` all satisfy the `name` column. A missing required column is a
//! hard error; the caller is expected to stop before any interaction.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::StringRecord;

use crate::evolution::{EvolutionEdge, EvolutionTable};
use crate::roster::Roster;
use crate::types::{BaseStats, RosterEntry, Stat, Type, TypeChart};
use crate::{Dex, LoadError};

const ROSTER: &str = "roster";
const EVOLUTIONS: &str = "evolution";
const TYPE_CHART: &str = "type chart";

/// Header name -> column index for one table
struct Columns {
    table: &'static str,
    index: HashMap<String, usize>,
}

impl Columns {
    fn from_headers(table: &'static str, headers: &StringRecord) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.trim().to_lowercase(), idx))
            .collect();
        Self { table, index }
    }

    fn require(&self, column: &str) -> Result<usize, LoadError> {
        self.optional(column).ok_or_else(|| LoadError::MissingColumn {
            table: self.table,
            column: column.to_string(),
        })
    }

    fn optional(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }
}

/// A data row together with its line number, for error reporting
struct Row<'r> {
    table: &'static str,
    line: u64,
    record: &'r StringRecord,
}

impl<'r> Row<'r> {
    fn cell(&self, idx: usize) -> &'r str {
        self.record.get(idx).unwrap_or("").trim()
    }

    fn number<T: FromStr>(&self, idx: usize, column: &str) -> Result<T, LoadError> {
        let value = self.cell(idx);
        value.parse().map_err(|_| LoadError::InvalidValue {
            table: self.table,
            line: self.line,
            column: column.to_string(),
            value: value.to_string(),
        })
    }

    fn kind(&self, value: &str) -> Result<Type, LoadError> {
        Type::parse(value).ok_or_else(|| LoadError::UnknownType {
            table: self.table,
            line: self.line,
            value: value.to_string(),
        })
    }
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Line number of a record, falling back to its data position
fn line_of(record: &StringRecord, fallback: usize) -> u64 {
    record
        .position()
        .map(|p| p.line())
        .unwrap_or(fallback as u64 + 2)
}

/// Read a roster table
///
/// Required columns: `name, type1, generation, hp, attack, defense,
/// sp_attack, sp_defense, speed, base_total`. Optional: `type2`, `weight_kg`.
pub fn read_roster<R: Read>(input: R) -> Result<Roster, LoadError> {
    let mut rdr = reader(input);
    let columns = Columns::from_headers(ROSTER, rdr.headers()?);

    let name_col = columns.require("name")?;
    let type1_col = columns.require("type1")?;
    let type2_col = columns.optional("type2");
    let generation_col = columns.require("generation")?;
    let weight_col = columns.optional("weight_kg");
    let stat_cols = Stat::ALL
        .iter()
        .map(|&stat| columns.require(stat.column()).map(|idx| (stat, idx)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut entries = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let row = Row {
            table: ROSTER,
            line: line_of(&record, i),
            record: &record,
        };

        let name = row.cell(name_col);
        if name.is_empty() {
            return Err(LoadError::InvalidValue {
                table: ROSTER,
                line: row.line,
                column: "name".to_string(),
                value: String::new(),
            });
        }

        let primary_type = row.kind(row.cell(type1_col))?;
        let secondary_type = match type2_col.map(|idx| row.cell(idx)) {
            Some(cell) if !cell.is_empty() => Some(row.kind(cell)?),
            _ => None,
        };

        let mut stats = BaseStats::default();
        for &(stat, idx) in &stat_cols {
            stats.set(stat, row.number(idx, stat.column())?);
        }

        // The public dataset leaves some masses blank; treat those as unknown.
        let weight_kg = weight_col.and_then(|idx| row.cell(idx).parse::<f32>().ok());

        entries.push(RosterEntry {
            name: name.to_string(),
            primary_type,
            secondary_type,
            generation: row.number(generation_col, "generation")?,
            stats,
            weight_kg,
        });
    }

    Roster::new(entries)
}

/// Read an evolution table with columns `source, target, min_level`
pub fn read_evolutions<R: Read>(input: R) -> Result<EvolutionTable, LoadError> {
    let mut rdr = reader(input);
    let columns = Columns::from_headers(EVOLUTIONS, rdr.headers()?);

    let source_col = columns.require("source")?;
    let target_col = columns.require("target")?;
    let level_col = columns.require("min_level")?;

    let mut edges = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let row = Row {
            table: EVOLUTIONS,
            line: line_of(&record, i),
            record: &record,
        };

        let source = row.cell(source_col);
        let target = row.cell(target_col);
        if source.is_empty() && target.is_empty() {
            continue;
        }

        edges.push(EvolutionEdge::new(
            source,
            target,
            row.number(level_col, "min_level")?,
        ));
    }

    Ok(EvolutionTable::new(edges))
}

/// Read a type chart: first column names the attacking type, remaining
/// header cells name defending types. Blank cells stay neutral.
pub fn read_type_chart<R: Read>(input: R) -> Result<TypeChart, LoadError> {
    let mut rdr = reader(input);
    let headers = rdr.headers()?.clone();

    let defenders = headers
        .iter()
        .skip(1)
        .map(|name| {
            Type::parse(name).ok_or_else(|| LoadError::UnknownType {
                table: TYPE_CHART,
                line: 1,
                value: name.trim().to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if defenders.is_empty() {
        return Err(LoadError::MissingColumn {
            table: TYPE_CHART,
            column: "defending types".to_string(),
        });
    }

    let mut chart = TypeChart::neutral();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let row = Row {
            table: TYPE_CHART,
            line: line_of(&record, i),
            record: &record,
        };

        let attacker = row.kind(row.cell(0))?;
        for (offset, &defender) in defenders.iter().enumerate() {
            let idx = offset + 1;
            if row.cell(idx).is_empty() {
                continue;
            }
            let value: f32 = row.number(idx, defender.as_str())?;
            chart.set(attacker, defender, value);
        }
    }

    Ok(chart)
}

pub fn load_roster(path: impl AsRef<Path>) -> Result<Roster, LoadError> {
    read_roster(open(path.as_ref())?)
}

pub fn load_evolutions(path: impl AsRef<Path>) -> Result<EvolutionTable, LoadError> {
    read_evolutions(open(path.as_ref())?)
}

pub fn load_type_chart(path: impl AsRef<Path>) -> Result<TypeChart, LoadError> {
    read_type_chart(open(path.as_ref())?)
}

/// Load all three tables. Without a chart path the standard chart is used.
pub fn load_dex(
    roster: impl AsRef<Path>,
    evolutions: impl AsRef<Path>,
    chart: Option<&Path>,
) -> Result<Dex, LoadError> {
    let roster = load_roster(roster)?;
    let evolutions = load_evolutions(evolutions)?;
    let chart = match chart {
        Some(path) => load_type_chart(path)?,
        None => TypeChart::standard(),
    };

    tracing::info!(
        entries = roster.len(),
        edges = evolutions.len(),
        "Loaded dex tables"
    );

    Ok(Dex::new(roster, evolutions, chart))
}
