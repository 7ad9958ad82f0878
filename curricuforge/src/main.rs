/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{error, info, warn};

use curricuforge::config::{parse_name_list, TimetableConfig};
use curricuforge::generator::{TimetableGenerator, TimetableReport};
use curricuforge::timetable::Timetable;

// ── CLI argument definition ───────────────────────────────────────────────────

/// Output document encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

/// CurricuForge timetable generator.
///
/// Example:
///   curricuforge -c school.yaml --seed 42 -o timetable.json
///   curricuforge --grades 2 --sections 1 --teachers "A, B" --lunch 0
#[derive(Debug, Parser)]
#[command(
    name = "curricuforge",
    about = "CurricuForge – weekly school timetable generator",
    long_about = None,
)]
struct Cli {
    /// Path to a YAML or JSON timetable configuration.  Built-in defaults are
    /// used when omitted.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Override the number of grades.
    #[arg(long = "grades")]
    grades: Option<u32>,

    /// Override the number of sections per grade.
    #[arg(long = "sections")]
    sections: Option<u32>,

    /// Override the subject list (comma-separated).
    #[arg(long = "subjects")]
    subjects: Option<String>,

    /// Override the teacher list (comma-separated, may be empty).
    #[arg(long = "teachers")]
    teachers: Option<String>,

    /// Override the number of periods per day.
    #[arg(long = "periods")]
    periods: Option<u32>,

    /// Override the 1-based lunch period (out of range disables lunch).
    #[arg(long = "lunch", allow_negative_numbers = true)]
    lunch: Option<i32>,

    /// Seed for a reproducible timetable.
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Output encoding.
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Write the document to this file instead of stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
}

// ── Output document ───────────────────────────────────────────────────────────

/// `{ config, data }`: the record shape the persistence layer stores.
#[derive(Debug, Serialize)]
struct TimetableDocument<'a> {
    config: &'a TimetableConfig,
    data: &'a Timetable,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialise structured logging on stderr; stdout carries the document.
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    info!("CurricuForge starting up...");

    // ── Load configuration ────────────────────────────────────────────────────
    let mut config = match &cli.config {
        Some(path) => TimetableConfig::load_from_file(path)?,
        None => {
            warn!("No configuration file provided, using default school settings");
            TimetableConfig::default()
        }
    };
    apply_overrides(cli, &mut config);

    info!(
        grades          = config.grade_count,
        sections        = config.sections_per_grade,
        subjects        = ?config.subjects,
        teachers        = ?config.teachers,
        periods_per_day = config.periods_per_day,
        lunch_period    = config.lunch_period,
        seed            = ?cli.seed,
        "Configuration"
    );

    // ── Generate ──────────────────────────────────────────────────────────────
    let generator = TimetableGenerator::new(Arc::new(config));
    let timetable = match cli.seed {
        Some(seed) => generator.generate(&mut StdRng::seed_from_u64(seed)),
        None => generator.generate_random(),
    }
    .context("Invalid timetable configuration")?;

    TimetableReport::from_timetable(&timetable).log();

    // ── Emit document ─────────────────────────────────────────────────────────
    let document = TimetableDocument {
        config: generator.config(),
        data: &timetable,
    };
    let rendered = render(&document, cli.format)?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Cannot write timetable to: {}", path.display()))?;
            info!("Timetable written to: {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

/// Apply command-line overrides on top of the loaded configuration.
fn apply_overrides(cli: &Cli, config: &mut TimetableConfig) {
    if let Some(grades) = cli.grades {
        config.grade_count = grades;
    }
    if let Some(sections) = cli.sections {
        config.sections_per_grade = sections;
    }
    if let Some(subjects) = &cli.subjects {
        config.subjects = parse_name_list(subjects);
    }
    if let Some(teachers) = &cli.teachers {
        config.teachers = parse_name_list(teachers);
    }
    if let Some(periods) = cli.periods {
        config.periods_per_day = periods;
    }
    if let Some(lunch) = cli.lunch {
        config.lunch_period = lunch;
    }
}

fn render(document: &TimetableDocument<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(document).context("Failed to encode timetable as JSON")
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(document).context("Failed to encode timetable as YAML")
        }
    }
}
