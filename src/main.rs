//
// matched-map is free software: you can redistribute it and/or modify
// it under the terms of the GNU Lesser General Public License  v3
// as published by the Free Software Foundation.
//
// matched-map is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY.
// See the GNU Lesser General Public License  for more details.
//
// You should have received a copy of the GNU Lesser General Public License
// along with matched-map. If not, see http://www.gnu.org/licenses/lgpl-3.0.en.html
//
// Copyright (c)  2022 by X. Gillard
//

//! The matched-map command line tool. It reads a list of names (from a file
//! or interactively), generates a matched map over these names and prints it
//! as `source -> target` lines.

use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use env_logger::{Builder, Env};
use log::info;
use matched_map::{MatchError, Matcher, MatcherConfig, ProblemFile};

/// The names file which is picked up when no other source of names is given
const DEFAULT_NAMES_FILE: &str = ".bs/names";
/// The line that ends the interactive input of names
const SENTINEL: &str = "$$END$$";

#[derive(Parser)]
#[command(
    name = "matched-map",
    about = "Pairs every name of a list with a partner drawn from the same list",
    version
)]
struct Cli {
    /// File holding one name per line (defaults to .bs/names when it exists,
    /// names are read from stdin otherwise)
    #[arg(short, long)]
    names: Option<PathBuf>,

    /// Yaml problem file (names, forbidden and mandatory matches, flags)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Allow a name to be matched with itself
    #[arg(long)]
    allow_self: bool,

    /// Pair the names two by two (a -> b and b -> a)
    #[arg(long)]
    reciprocal: bool,

    /// Do not shuffle the names before searching
    #[arg(long)]
    no_randomize: bool,

    /// Seed of the random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// Forbidden match, as source=target (repeatable)
    #[arg(long = "forbid", value_name = "SOURCE=TARGET", value_parser = parse_pair)]
    forbid: Vec<(String, String)>,

    /// Mandatory match, as source=target (repeatable)
    #[arg(long = "mandatory", value_name = "SOURCE=TARGET", value_parser = parse_pair)]
    mandatory: Vec<(String, String)>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Increase the log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// How the matched map is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// one `source -> target` line per name
    Text,
    /// a json object
    Json,
    /// a yaml mapping
    Yaml,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Logs go to stderr, filtered by RUST_LOG or by the verbosity flag
fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    Builder::from_env(Env::default().default_filter_or(level))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{:<5}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

/// Each kind of failure has its own exit code
fn exit_code(error: &anyhow::Error) -> u8 {
    match error.downcast_ref::<MatchError>() {
        Some(MatchError::InvalidInput) => 10,
        Some(MatchError::DuplicateLabel(_)) => 11,
        Some(MatchError::InvalidLabel(_)) => 12,
        Some(MatchError::UnknownLabel(_)) => 13,
        Some(MatchError::DuplicateTarget(_)) => 14,
        Some(MatchError::OddCount(_)) => 15,
        Some(MatchError::NoSolution) => 16,
        None => 1,
    }
}

fn run(cli: &Cli) -> Result<()> {
    let problem = match &cli.config {
        Some(path) => ProblemFile::load(path)?,
        None => ProblemFile::default(),
    };

    let names = collect_names(cli, &problem)?;
    if names.len() < 2 {
        bail!("enter at least 2 names");
    }
    info!("read {} names", names.len());

    let defaults = problem.config(true);
    let config = MatcherConfig {
        allow_self_match: cli.allow_self || defaults.allow_self_match,
        allow_reciprocal_match: cli.reciprocal || defaults.allow_reciprocal_match,
        randomize_order: !cli.no_randomize && defaults.randomize_order,
        seed: cli.seed.or(defaults.seed),
    };

    let mandatory = problem
        .mandatory
        .iter()
        .chain(cli.mandatory.iter())
        .map(|(s, t)| (s, t));
    let mut matcher = Matcher::with_mandatory(names, mandatory)
        .context("invalid names or mandatory matches")?
        .with_config(config);

    let forbidden = problem
        .forbidden
        .iter()
        .chain(cli.forbid.iter())
        .map(|(s, t)| (s, t));
    matcher
        .set_forbidden_pairs(forbidden)
        .context("invalid forbidden matches")?;

    let map = matcher.generate()?;
    info!("search statistics: {:?}", matcher.last_stats());

    let output = match cli.format {
        Format::Text => map.to_string(),
        Format::Json => serde_json::to_string_pretty(&map)? + "\n",
        Format::Yaml => serde_yaml::to_string(&map)?,
    };
    print!("{output}");
    Ok(())
}

/// Names come from the explicit names file, the problem file, the default
/// names file or the terminal (in that order of preference)
fn collect_names(cli: &Cli, problem: &ProblemFile) -> Result<Vec<String>> {
    if let Some(path) = &cli.names {
        return read_names_file(path);
    }
    if !problem.names.is_empty() {
        return Ok(problem.names.clone());
    }
    let default = Path::new(DEFAULT_NAMES_FILE);
    if default.exists() {
        return read_names_file(default);
    }

    let stdin = io::stdin();
    read_names_interactively(stdin.lock(), io::stderr())
}

/// Reads one name per line; names are trimmed and blank lines skipped
fn read_names_file(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read names from {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from)
        .collect())
}

/// Reads names until the sentinel line (or the end of the input)
fn read_names_interactively<R: BufRead, W: Write>(input: R, mut prompt: W) -> Result<Vec<String>> {
    writeln!(prompt, "When done entering names, enter {SENTINEL}.")?;
    writeln!(prompt, "Enter names now, each followed by ENTER key:")?;

    let mut names = vec![];
    for line in input.lines() {
        let line = line?;
        let name = line.trim();
        if name == SENTINEL {
            writeln!(prompt, "\n{}\n", "-".repeat(80))?;
            break;
        }
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// Parses a `source=target` command line argument
fn parse_pair(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((source, target)) if !source.trim().is_empty() && !target.trim().is_empty() => {
            Ok((source.trim().to_string(), target.trim().to_string()))
        }
        _ => Err(format!("expected SOURCE=TARGET, got \"{arg}\"")),
    }
}

// #############################################################################
// ### UNIT TESTS ##############################################################
// #############################################################################

#[cfg(test)]
mod tests_cli {
    use super::*;

    #[test]
    fn pairs_are_split_on_the_equal_sign() {
        assert_eq!(parse_pair("oak=elm"), Ok(("oak".into(), "elm".into())));
        assert_eq!(parse_pair(" oak = elm "), Ok(("oak".into(), "elm".into())));
        assert!(parse_pair("oak").is_err());
        assert!(parse_pair("oak=").is_err());
        assert!(parse_pair("=elm").is_err());
    }

    #[test]
    fn interactive_input_stops_at_the_sentinel() {
        let input = "oak\n\n  elm  \n$$END$$\npine\n";
        let mut prompt = vec![];
        let names = read_names_interactively(input.as_bytes(), &mut prompt).unwrap();
        assert_eq!(names, vec!["oak", "elm"]);
        assert!(String::from_utf8(prompt).unwrap().contains(SENTINEL));
    }

    #[test]
    fn interactive_input_stops_at_the_end_of_input() {
        let names = read_names_interactively("oak\nelm".as_bytes(), io::sink()).unwrap();
        assert_eq!(names, vec!["oak", "elm"]);
    }

    #[test]
    fn names_files_are_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names");
        fs::write(&path, "oak\n  elm\n\npine  \n").unwrap();
        assert_eq!(read_names_file(&path).unwrap(), vec!["oak", "elm", "pine"]);
    }

    #[test]
    fn each_failure_kind_has_its_own_exit_code() {
        let codes = [
            MatchError::InvalidInput,
            MatchError::DuplicateLabel("a".into()),
            MatchError::InvalidLabel(String::new()),
            MatchError::UnknownLabel("z".into()),
            MatchError::DuplicateTarget("b".into()),
            MatchError::OddCount(3),
            MatchError::NoSolution,
        ]
        .into_iter()
        .map(|e| exit_code(&anyhow::Error::new(e).context("while testing")))
        .collect::<Vec<_>>();
        assert_eq!(codes, vec![10, 11, 12, 13, 14, 15, 16]);
        assert_eq!(exit_code(&anyhow::anyhow!("anything else")), 1);
    }

    #[test]
    fn the_command_line_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
