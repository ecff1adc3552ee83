use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use pokeparty_dex::query::effectiveness_profile;
use pokeparty_dex::{Dex, Type, load_dex};
use pokeparty_team::{
    CriteriaForm, DEFAULT_EXPORT_FILE, Request, Session, Team, average_stats_by_type,
    weight_vs_total,
};

use crate::config::{Config, Overrides};

const USAGE: &str = "\
usage: pokeparty <command> [options]

commands:
  generate   build a team (then apply --add/--remove/--swap/--export in order)
  profile    effectiveness report for one or two types
  analyze    average stats by primary type across the roster
  help       show this message

table options:
  --data DIR  --roster FILE  --evolutions FILE  --type-chart FILE

generate options:
  --gen N         generation 1-8 (required)
  --stat STAT     hp, attack, defense, sp_attack, sp_defense, speed, base_total
  --level N       level cap 1-100
  --prefer T,T    preferred types
  --exclude T,T   excluded types
  --add NAME      append a Pokémon by name
  --remove POS    remove the member at display position POS (1-based)
  --swap POS      replace the member at display position POS (1-based)
  --clear         empty the team
  --analyze       print the team analysis
  --profile POS   effectiveness report for the member at POS
  --export [FILE] save the team as CSV (default selected_team.csv)
  --json          print the final team as JSON";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Generate,
    Profile,
    Analyze,
    Help,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("generate") => Some(Command::Generate),
        Some("profile") => Some(Command::Profile),
        Some("analyze") => Some(Command::Analyze),
        Some("help") | Some("--help") | Some("-h") => Some(Command::Help),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    let result = match parse_command(args) {
        Some(Command::Generate) => handle_generate(&args[2..]),
        Some(Command::Profile) => handle_profile(&args[2..]),
        Some(Command::Analyze) => handle_analyze(&args[2..]),
        Some(Command::Help) => {
            println!("{USAGE}");
            return 0;
        }
        None => {
            eprintln!("{USAGE}");
            return 2;
        }
    };

    match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {err:#}");
            1
        }
    }
}

/// Options in command-line order; flags without a value carry `None`
#[derive(Debug, Default, PartialEq, Eq)]
struct Parsed {
    options: Vec<(String, Option<String>)>,
    positionals: Vec<String>,
}

const VALUELESS: [&str; 4] = ["--json", "--clear", "--analyze", "--export"];

fn parse_options(args: &[String]) -> Parsed {
    let mut parsed = Parsed::default();
    let mut iter = args.iter().peekable();

    while let Some(arg) = iter.next() {
        if !arg.starts_with("--") {
            parsed.positionals.push(arg.clone());
            continue;
        }

        let takes_value = !VALUELESS.contains(&arg.as_str());
        let value = match iter.peek() {
            // --export optionally takes a file name
            Some(next) if !next.starts_with("--") && (takes_value || arg == "--export") => {
                iter.next().cloned()
            }
            _ => None,
        };
        parsed.options.push((arg.clone(), value));
    }

    parsed
}

impl Parsed {
    fn value(&self, name: &str) -> Option<&str> {
        self.options
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.as_deref())
    }

    fn has(&self, name: &str) -> bool {
        self.options.iter().any(|(key, _)| key == name)
    }

    fn list(&self, name: &str) -> Vec<String> {
        self.value(name)
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_default()
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            data_dir: self.value("--data").map(PathBuf::from),
            roster: self.value("--roster").map(PathBuf::from),
            evolutions: self.value("--evolutions").map(PathBuf::from),
            type_chart: self.value("--type-chart").map(PathBuf::from),
        }
    }
}

fn load(parsed: &Parsed) -> Result<Dex> {
    let config = Config::resolve(&parsed.overrides());
    tracing::debug!(?config, "Resolved table locations");
    load_dex(&config.roster, &config.evolutions, config.type_chart())
        .with_context(|| format!("Failed to load tables from {}", config.roster.display()))
}

/// Display positions are 1-based
fn position(value: Option<&str>) -> Result<Option<usize>> {
    match value {
        None => Ok(None),
        Some(v) => {
            let pos: usize = v
                .parse()
                .with_context(|| format!("Invalid position `{v}`"))?;
            if pos == 0 {
                bail!("Positions start at 1");
            }
            Ok(Some(pos - 1))
        }
    }
}

fn handle_generate(args: &[String]) -> Result<()> {
    let parsed = parse_options(args);
    generate(&parsed, &mut io::stdout().lock(), &mut io::stderr().lock())
}

/// With `--json`, stdout carries only the team document and notices go to `err`
fn generate(parsed: &Parsed, out: &mut impl Write, err: &mut impl Write) -> Result<()> {
    let json = parsed.has("--json");
    let mut session = Session::new(load(parsed)?);

    let form = CriteriaForm {
        generation: parsed.value("--gen").unwrap_or_default().to_string(),
        stat: parsed.value("--stat").unwrap_or_default().to_string(),
        max_level: parsed.value("--level").unwrap_or_default().to_string(),
        preferred_types: parsed.list("--prefer"),
        excluded_types: parsed.list("--exclude"),
    };
    let outcome = session.handle(Request::Generate(form))?;
    if json {
        writeln!(err, "{}", outcome.message())?;
    } else {
        writeln!(out, "{}", outcome.message())?;
    }

    for (key, value) in &parsed.options {
        let request = match key.as_str() {
            "--add" => Request::ManualAdd(value.clone().unwrap_or_default()),
            "--remove" => Request::Remove(position(value.as_deref())?),
            "--swap" => Request::Swap(position(value.as_deref())?),
            "--clear" => Request::Clear,
            "--analyze" => Request::Analyze,
            "--profile" => Request::Profile(position(value.as_deref())?),
            "--export" => Request::Export(PathBuf::from(
                value.as_deref().unwrap_or(DEFAULT_EXPORT_FILE),
            )),
            _ => continue,
        };

        // A failed edit is reported and the remaining edits still run
        match session.handle(request) {
            Ok(outcome) if json => writeln!(err, "{}", outcome.message())?,
            Ok(outcome) => writeln!(out, "{}", outcome.message())?,
            Err(e) => writeln!(err, "{key}: {e}")?,
        }
    }

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(session.team())?)?;
    } else {
        print_team(out, session.team())?;
    }
    Ok(())
}

fn print_team(out: &mut impl Write, team: &Team) -> io::Result<()> {
    writeln!(
        out,
        "{:<3} {:<14} {:<9} {:<9} {:>4} {:>6} {:>7} {:>5}",
        "#", "Name", "Type 1", "Type 2", "HP", "Attack", "Defense", "Speed"
    )?;
    for (idx, member) in team.members().iter().enumerate() {
        writeln!(
            out,
            "{:<3} {:<14} {:<9} {:<9} {:>4} {:>6} {:>7} {:>5}",
            idx + 1,
            member.name,
            member.primary_type.as_str(),
            member.secondary_type.map_or("", |t| t.as_str()),
            member.stats.hp,
            member.stats.attack,
            member.stats.defense,
            member.stats.speed,
        )?;
    }
    Ok(())
}

fn parse_type(name: &str) -> Result<Type> {
    Type::parse(name).ok_or_else(|| anyhow!("Unknown type `{name}`"))
}

fn handle_profile(args: &[String]) -> Result<()> {
    let parsed = parse_options(args);
    let primary = parsed
        .positionals
        .first()
        .ok_or_else(|| anyhow!("profile needs at least one type"))
        .and_then(|t| parse_type(t))?;
    let secondary = parsed.positionals.get(1).map(|t| parse_type(t)).transpose()?;

    let dex = load(&parsed)?;
    let profile = effectiveness_profile(&dex.chart, primary, secondary);

    if parsed.has("--json") {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        println!("{}", profile.report());
    }
    Ok(())
}

fn handle_analyze(args: &[String]) -> Result<()> {
    let parsed = parse_options(args);
    let dex = load(&parsed)?;

    let generation = parsed
        .value("--gen")
        .map(|g| g.parse::<u8>().with_context(|| format!("Invalid generation `{g}`")))
        .transpose()?;
    let entries: Vec<_> = dex
        .roster
        .iter()
        .filter(|e| generation.is_none_or(|g| e.generation == g))
        .collect();

    let averages = average_stats_by_type(entries.iter().copied());
    let points = weight_vs_total(entries.iter().copied());

    if parsed.has("--json") {
        let report = serde_json::json!({ "averages": averages, "weight_vs_total": points });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{:<9} {:>5} {:>6} {:>6} {:>7} {:>6} {:>6} {:>6}",
        "Type", "Count", "HP", "Atk", "Def", "SpA", "SpD", "Spe"
    );
    for row in &averages {
        println!(
            "{:<9} {:>5} {:>6.1} {:>6.1} {:>7.1} {:>6.1} {:>6.1} {:>6.1}",
            row.primary_type.as_str(),
            row.count,
            row.hp,
            row.attack,
            row.defense,
            row.sp_attack,
            row.sp_defense,
            row.speed
        );
    }
    println!("{} entries with known weight", points.len());
    Ok(())
}
