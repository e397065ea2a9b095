// src/commands/run.rs

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::{
    cli::CliArgs,
    core::{
        config::{BenchConfig, RunConfig},
        discovery::discover_tests,
        execution::run_benchmark,
        models::RunSummary,
    },
    reporting::{ConsoleSummary, JsonReport, LineReporter, ReporterSet},
};

pub async fn execute(args: CliArgs) -> Result<RunSummary> {
    let config = load_config(&args)?;

    info!(
        corpus = %args.directory.display(),
        primary = %config.primary.program.display(),
        secondary = ?config.secondary.as_ref().map(|s| s.program.display().to_string()),
        timeout_secs = config.timeout.as_secs(),
        "Starting benchmark"
    );

    let corpus = discover_tests(&args.directory, &config.filter)
        .with_context(|| format!("Cannot discover tests in {}", args.directory.display()))?;

    if corpus.is_empty() {
        warn!(corpus = %args.directory.display(), "No test files found");
    }

    // Opened before the first test so a bad path fails fast.
    let json_report = args
        .json
        .as_ref()
        .map(|path| JsonReport::create(path, &config))
        .transpose()
        .context("Cannot open JSON report")?;

    let mut reporters = ReporterSet::new();
    reporters.push(LineReporter::stdout());
    if !args.quiet {
        reporters.push(ConsoleSummary::stderr(
            config.primary.name.clone(),
            config.secondary.as_ref().map(|s| s.name.clone()),
        ));
    }
    if let Some(json_report) = json_report {
        reporters.push(json_report);
    }

    let summary = run_benchmark(&corpus, &config, &mut reporters).await?;

    if let Some(json_path) = &args.json {
        info!(path = %json_path.display(), "JSON report written");
    }

    Ok(summary)
}

fn load_config(args: &CliArgs) -> Result<RunConfig> {
    let file_config = match &args.config {
        Some(path) => BenchConfig::load(path)?,
        None => BenchConfig::default(),
    };

    RunConfig::resolve(&args.overrides, &file_config).context("Invalid benchmark configuration")
}
