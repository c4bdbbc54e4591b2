//! Command-line interface
//!
//! `run` and `run-all` execute days once and echo their output. `update-readme`
//! benchmarks every configured day and rewrites the Performance section of the
//! report document.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    benchmark::{parser, BenchmarkRunner, ProcessInvoker},
    config::Config,
    error::{AppError, AppResult},
    models::{BenchmarkReport, WorkUnitTable},
    report::{render_section, ReportDocument},
    utils::machine::MachineProfile,
};

/// Advent of Code solution benchmark runner
#[derive(Parser, Debug)]
#[command(name = "aoc-bench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run a single day once and print its output.
    Run {
        /// Day number.
        day: u32,
    },

    /// Run every configured day once, in order.
    RunAll,

    /// Benchmark every configured day and update the Performance section.
    UpdateReadme {
        /// Report document to patch (overrides BENCH_README_PATH).
        #[arg(short, long)]
        readme: Option<PathBuf>,

        /// Also write the benchmark results as JSON to this path.
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

/// Execute the parsed command
pub async fn execute(cli: Cli, config: &Config) -> AppResult<()> {
    match cli.command {
        Commands::Run { day } => run_day(config, day).await,
        Commands::RunAll => run_all(config).await,
        Commands::UpdateReadme { readme, json } => {
            let readme = readme.unwrap_or_else(|| config.report.readme_path.clone());
            update_readme(config, &readme, json.as_deref()).await
        }
    }
}

async fn run_day(config: &Config, day: u32) -> AppResult<()> {
    let units = WorkUnitTable::from_config(&config.units)?;
    let unit = units.get(day)?;
    let invoker = ProcessInvoker::from_config(config);

    info!(day, command = %unit.command_line(), "Running day");
    let run = invoker.capture(unit).await?;
    print!("{}", run.output);

    let output = run.into_output()?;
    let parsed = parser::parse(&output);
    info!(
        day,
        part1 = parsed.primary_answer.as_deref().unwrap_or("-"),
        part2 = parsed.secondary_answer.as_deref().unwrap_or("-"),
        time = parsed.elapsed.as_deref().unwrap_or("-"),
        "Day finished"
    );

    Ok(())
}

async fn run_all(config: &Config) -> AppResult<()> {
    let units = WorkUnitTable::from_config(&config.units)?;
    let invoker = ProcessInvoker::from_config(config);
    let mut failed = Vec::new();

    for unit in units.iter() {
        println!("=== Day {} ===", unit.id);

        let result = invoker.capture(unit).await.and_then(|run| {
            print!("{}", run.output);
            run.into_output()
        });

        match result {
            Ok(_) => {}
            Err(e) if !e.is_fatal() => {
                warn!(day = unit.id, error = %e, "Day failed, continuing");
                failed.push(unit.id);
            }
            Err(e) => return Err(e),
        }
        println!();
    }

    if !failed.is_empty() {
        println!("Failed days: {}", join_ids(&failed));
    }

    Ok(())
}

async fn update_readme(config: &Config, readme: &Path, json: Option<&Path>) -> AppResult<()> {
    let units = WorkUnitTable::from_config(&config.units)?;
    let runner = BenchmarkRunner::new(
        Arc::new(ProcessInvoker::from_config(config)),
        config.benchmark.clone(),
    );

    let started_at = Utc::now();
    println!(
        "Benchmark started at {}",
        started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    let report = runner.run_all(&units).await;
    print_summary(&report);

    let machine = MachineProfile::collect().await;
    info!(machine = %machine.description, "Collected machine metadata");

    write_report(readme, &machine, &report)?;
    println!("Updated {}", readme.display());

    if let Some(path) = json {
        write_json(path, started_at, &machine, &report)?;
        println!("Results written to {}", path.display());
    }

    Ok(())
}

/// Render the section and patch it into the document at `path`
pub fn write_report(
    path: &Path,
    machine: &MachineProfile,
    report: &BenchmarkReport,
) -> AppResult<()> {
    let section = render_section(machine, &report.summaries);

    let mut document = ReportDocument::load(path)?;
    document.replace_performance_section(&section);
    document.save()?;

    info!(
        path = %document.path().display(),
        days = report.summaries.len(),
        "Performance section updated"
    );
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    started_at: DateTime<Utc>,
    machine: &'a MachineProfile,
    #[serde(flatten)]
    report: &'a BenchmarkReport,
}

/// Dump the results as pretty-printed JSON
pub fn write_json(
    path: &Path,
    started_at: DateTime<Utc>,
    machine: &MachineProfile,
    report: &BenchmarkReport,
) -> AppResult<()> {
    let json = serde_json::to_string_pretty(&JsonReport {
        started_at,
        machine,
        report,
    })?;

    fs::write(path, json).map_err(|source| AppError::DocumentWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn print_summary(report: &BenchmarkReport) {
    println!();
    println!("=== Summary ===");
    for summary in &report.summaries {
        println!(
            "Day {}: Part1={}, Part2={}, Time={}",
            summary.unit_id,
            summary.primary_answer,
            summary.secondary_answer,
            summary.display_elapsed
        );
    }

    if !report.omitted.is_empty() {
        println!("Omitted (no valid runs): {}", join_ids(&report.omitted));
    }
    println!();
}

fn join_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
