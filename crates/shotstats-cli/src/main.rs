//! shotstats CLI - descriptive statistics for film-shot annotation tables

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use shotstats_core::core::annotations::load_annotations;
use shotstats_core::core::report::{DescriptiveReport, ReportStyle};
use shotstats_core::core::settings::{AnalysisSettings, DEFAULT_SETTINGS_PATH};
use shotstats_core::core::timecode::{format_timecode, Timecode};
use shotstats_core::core::DEFAULT_ANNOTATIONS_PATH;

#[derive(Parser)]
#[command(name = "shotstats")]
#[command(about = "Descriptive statistics over film-shot annotations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute all statistics for an annotation table and print them as report macros
    Report {
        /// Annotation table (CSV with a header row)
        #[arg(default_value = DEFAULT_ANNOTATIONS_PATH)]
        input: PathBuf,

        /// Frames per second used to convert timecodes
        #[arg(long)]
        fps: Option<u32>,

        /// Output syntax (tex, define)
        #[arg(short, long)]
        style: Option<ReportStyle>,

        /// Print the full analysis as JSON instead of report lines
        #[arg(long)]
        json: bool,

        /// JSON settings file (defaults to ./shotstats.json when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Include the first and last shot in location and category statistics
        #[arg(long)]
        include_boundary_shots: bool,
    },

    /// Convert a HH:MM:SS:Frame timecode to seconds
    Timecode {
        /// Timecode to convert
        timecode: String,

        /// Frames per second
        #[arg(long, default_value_t = shotstats_core::core::DEFAULT_FPS)]
        fps: u32,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TimecodeOutput {
    timecode: Timecode,
    fps: u32,
    seconds: f64,
    normalized: String,
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            input,
            fps,
            style,
            json,
            config,
            include_boundary_shots,
        } => {
            let mut settings = resolve_settings(config.as_deref())?;
            if let Some(fps) = fps {
                settings.fps = fps;
            }
            if let Some(style) = style {
                settings.style = style;
            }
            if include_boundary_shots {
                settings.exclude_boundary_shots = false;
            }
            settings.normalize();

            cmd_report(&input, &settings, json)?;
        }
        Commands::Timecode { timecode, fps, json } => {
            cmd_timecode(&timecode, fps, json)?;
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only the report
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// An explicit settings file must exist; the default one is optional
fn resolve_settings(config: Option<&Path>) -> Result<AnalysisSettings> {
    match config {
        Some(path) => AnalysisSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => AnalysisSettings::load_or_default(DEFAULT_SETTINGS_PATH)
            .with_context(|| format!("Failed to load settings from {DEFAULT_SETTINGS_PATH}")),
    }
}

fn cmd_report(input: &Path, settings: &AnalysisSettings, json: bool) -> Result<()> {
    debug!("Report settings: {:?}", settings);

    let sequence = load_annotations(input, settings.fps)
        .with_context(|| format!("Failed to load annotations from {}", input.display()))?;
    info!("Loaded {} shots from {}", sequence.len(), input.display());

    let report = DescriptiveReport::build_with(&sequence, settings)
        .context("Failed to compute descriptive statistics")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for line in report.render(settings.style)? {
        println!("{line}");
    }

    Ok(())
}

fn cmd_timecode(timecode: &str, fps: u32, json: bool) -> Result<()> {
    let parsed: Timecode = timecode
        .parse()
        .with_context(|| format!("Failed to parse timecode '{timecode}'"))?;
    let seconds = parsed.to_seconds(fps)?;

    if json {
        let output = TimecodeOutput {
            timecode: parsed,
            fps,
            seconds,
            normalized: format_timecode(seconds, fps),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{seconds}");
    }

    Ok(())
}
