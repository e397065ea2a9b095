// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

use crate::commands;
use crate::core::config::{
    CliOverrides, DEFAULT_MINISAT_ADAPTER, DEFAULT_MINISAT_PATH, DEFAULT_TIMEOUT_SECS,
    DEFAULT_TOOL_ADAPTER, DEFAULT_TOOL_PATH,
};
use crate::infra::logging;

/// Everything the `run` command needs, as parsed from the command line.
#[derive(Debug, Clone)]
pub struct CliArgs {
    pub directory: PathBuf,
    pub config: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub overrides: CliOverrides,
    pub verbose: u8,
    pub quiet: bool,
}

pub fn build_cli() -> Command {
    Command::new("solver-bench")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Benchmark SAT solver executables over a corpus of problem files.")
        .arg(
            Arg::new("directory")
                .help("Root directory of the test corpus; searched recursively")
                .value_name("DIRECTORY")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("tool-path")
                .long("tool-path")
                .help(format!("Path to the solver under test [default: {DEFAULT_TOOL_PATH}]"))
                .value_name("PATH")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("tool-args")
                .long("tool-args")
                .help("Extra arguments for the solver under test, shell-quoted")
                .value_name("ARGS")
                .allow_hyphen_values(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("tool-adapter")
                .long("tool-adapter")
                .help(format!(
                    "Output adapter of the solver under test [default: {DEFAULT_TOOL_ADAPTER}]"
                ))
                .value_name("NAME")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("minisat")
                .long("minisat")
                .help("Also run the reference solver on every test for comparison")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("minisat-path")
                .long("minisat-path")
                .help(format!(
                    "Path to the reference solver, looked up in PATH if bare [default: {DEFAULT_MINISAT_PATH}]"
                ))
                .value_name("PATH")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("minisat-args")
                .long("minisat-args")
                .help("Extra arguments for the reference solver, shell-quoted")
                .value_name("ARGS")
                .allow_hyphen_values(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("minisat-adapter")
                .long("minisat-adapter")
                .help(format!(
                    "Output adapter of the reference solver [default: {DEFAULT_MINISAT_ADAPTER}]"
                ))
                .value_name("NAME")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .help(format!(
                    "Timeout per solver invocation, in seconds [default: {DEFAULT_TIMEOUT_SECS}]"
                ))
                .value_name("SECONDS")
                .value_parser(clap::value_parser!(u64).range(1..))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("extension")
                .short('e')
                .long("extension")
                .help("Only benchmark files with this extension, e.g. 'cnf'")
                .value_name("EXT")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("TOML configuration file; command line flags take precedence")
                .value_name("CONFIG")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Also write a JSON report to this file")
                .value_name("JSON")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log more to stderr (-v: per-test progress, -vv: solver details)")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print the line report; no console summary or warnings")
                .conflicts_with("verbose")
                .action(ArgAction::SetTrue),
        )
}

fn string_arg(matches: &ArgMatches, id: &str) -> Option<String> {
    matches.get_one::<String>(id).cloned()
}

impl CliArgs {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let overrides = CliOverrides {
            tool_path: string_arg(matches, "tool-path"),
            tool_args: string_arg(matches, "tool-args"),
            tool_adapter: string_arg(matches, "tool-adapter"),
            minisat: matches.get_flag("minisat"),
            minisat_path: string_arg(matches, "minisat-path"),
            minisat_args: string_arg(matches, "minisat-args"),
            minisat_adapter: string_arg(matches, "minisat-adapter"),
            timeout_secs: matches.get_one::<u64>("timeout").copied(),
            extension: string_arg(matches, "extension"),
        };

        Self {
            directory: matches
                .get_one::<PathBuf>("directory")
                .cloned()
                .unwrap_or_default(), // Required by clap
            config: matches.get_one::<PathBuf>("config").cloned(),
            json: matches.get_one::<PathBuf>("json").cloned(),
            overrides,
            verbose: matches.get_count("verbose"),
            quiet: matches.get_flag("quiet"),
        }
    }

    /// Parses arguments from an explicit list; the first item is the binary name.
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = build_cli().try_get_matches_from(args)?;
        Ok(Self::from_matches(&matches))
    }
}

/// Parses the process arguments, exiting with usage help on error.
pub fn parse_args() -> CliArgs {
    CliArgs::from_matches(&build_cli().get_matches())
}

pub async fn run() -> Result<()> {
    let args = parse_args();
    logging::init(args.verbose, args.quiet);
    commands::run::execute(args).await?;
    Ok(())
}
