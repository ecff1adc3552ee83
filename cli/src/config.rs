//! Table locations, resolved from flags, then environment, then defaults

use std::path::{Path, PathBuf};

pub const ENV_DATA_DIR: &str = "POKEPARTY_DATA_DIR";
pub const ENV_ROSTER: &str = "POKEPARTY_ROSTER";
pub const ENV_EVOLUTIONS: &str = "POKEPARTY_EVOLUTIONS";
pub const ENV_TYPE_CHART: &str = "POKEPARTY_TYPE_CHART";

const DEFAULT_DATA_DIR: &str = "data";
const ROSTER_FILE: &str = "pokemon.csv";
const EVOLUTIONS_FILE: &str = "evolutions.csv";
const TYPE_CHART_FILE: &str = "type_chart.csv";

/// Paths given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub roster: Option<PathBuf>,
    pub evolutions: Option<PathBuf>,
    pub type_chart: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub roster: PathBuf,
    pub evolutions: PathBuf,
    /// `None` means the built-in chart
    pub type_chart: Option<PathBuf>,
}

impl Config {
    /// Resolve against the process environment
    pub fn resolve(overrides: &Overrides) -> Self {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve with an explicit environment lookup.
    ///
    /// An explicitly configured chart is always used; the default chart file
    /// only when it exists.
    pub fn resolve_with(overrides: &Overrides, env: impl Fn(&str) -> Option<String>) -> Self {
        let pick = |flag: &Option<PathBuf>, key: &str| -> Option<PathBuf> {
            flag.clone().or_else(|| env(key).map(PathBuf::from))
        };

        let data_dir = pick(&overrides.data_dir, ENV_DATA_DIR)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let roster = pick(&overrides.roster, ENV_ROSTER).unwrap_or_else(|| data_dir.join(ROSTER_FILE));
        let evolutions =
            pick(&overrides.evolutions, ENV_EVOLUTIONS).unwrap_or_else(|| data_dir.join(EVOLUTIONS_FILE));
        let type_chart = pick(&overrides.type_chart, ENV_TYPE_CHART)
            .or_else(|| Some(data_dir.join(TYPE_CHART_FILE)).filter(|p| p.exists()));

        Self {
            roster,
            evolutions,
            type_chart,
        }
    }

    pub fn type_chart(&self) -> Option<&Path> {
        self.type_chart.as_deref()
    }
}
