//! `slots` CLI — expand availability patterns and filter slots from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Expand a pattern over its own window (stdin → stdout)
//! cat pattern.json | slots generate
//!
//! # Expand over an explicit window, keeping full slot records
//! slots generate -i pattern.json --from 2024-01-01 --to 2024-01-31 --full -o slots.json
//!
//! # Mark slots unavailable against exceptions
//! slots filter -s slots.json -e exceptions.json
//!
//! # Query a whole service schedule
//! slots availability -i schedule.json --from 2024-01-01 --to 2024-01-07
//!
//! # Public view: available slots only, next 30 days
//! slots public -i schedule.json --today 2024-01-01
//! ```

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use slot_engine::window::{self, Window};
use slot_engine::{
    filter_slots_with, generate_slots, public_view, AvailableSlot, EngineConfig, ExceptionRequest,
    PatternRequest, ServiceException, ServiceSchedule, SlotView,
};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Expand availability patterns into bookable slots"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand a pattern request into slots
    Generate {
        /// Pattern JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Window start date (defaults to the pattern's start date)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Window end date (defaults to the pattern's end date or the horizon)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Reference time for open-ended patterns, UTC (defaults to now)
        #[arg(long)]
        now: Option<NaiveDateTime>,
        /// Emit full slot records instead of the client view
        #[arg(long)]
        full: bool,
    },
    /// Mark slots available or unavailable against exceptions
    Filter {
        /// Slot records JSON file (as written by `generate --full`)
        #[arg(short, long)]
        slots: String,
        /// Exception requests JSON file
        #[arg(short, long)]
        exceptions: String,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Keep only available slots, sorted by start
        #[arg(long)]
        available_only: bool,
    },
    /// Query a service schedule over a window
    Availability {
        /// Schedule JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Window start date
        #[arg(long)]
        from: NaiveDate,
        /// Window end date (slots must start by its midnight)
        #[arg(long)]
        to: NaiveDate,
        /// Reference time for open-ended patterns, UTC (defaults to now)
        #[arg(long)]
        now: Option<NaiveDateTime>,
    },
    /// Public view of a service schedule: available slots only
    Public {
        /// Schedule JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// First day of the public window (defaults to today, UTC)
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Reference time for open-ended patterns, UTC (defaults to now)
        #[arg(long)]
        now: Option<NaiveDateTime>,
    },
}

/// A service's patterns and exceptions as submitted by the provider.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleDocument {
    #[serde(default)]
    service_id: Option<Uuid>,
    #[serde(default)]
    patterns: Vec<PatternRequest>,
    #[serde(default)]
    exceptions: Vec<ExceptionRequest>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match cli.config.as_deref() {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("Failed to load config: {}", path))?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Generate {
            input,
            output,
            from,
            to,
            now,
            full,
        } => {
            let json = read_input(input.as_deref())?;
            let request: PatternRequest =
                serde_json::from_str(&json).context("Failed to parse pattern JSON")?;
            request.validate().context("Invalid pattern")?;

            let now = now.map(|n| n.and_utc()).unwrap_or_else(Utc::now);
            let pattern = request.into_pattern(Uuid::new_v4(), now);
            let default_window = window::generation_window(&pattern, now, &config);
            let window = Window::new(
                from.map(midnight).unwrap_or(default_window.start),
                to.map(midnight).unwrap_or(default_window.end),
            );

            let slots = generate_slots(&pattern, window.start, window.end);
            tracing::info!(count = slots.len(), "generated slots");

            let rendered = if full {
                serde_json::to_string_pretty(&slots)?
            } else {
                render_views(&slots)?
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Filter {
            slots,
            exceptions,
            output,
            available_only,
        } => {
            let slots: Vec<AvailableSlot> = serde_json::from_str(&read_input(Some(slots.as_str()))?)
                .context("Failed to parse slots JSON")?;
            let requests: Vec<ExceptionRequest> =
                serde_json::from_str(&read_input(Some(exceptions.as_str()))?)
                    .context("Failed to parse exceptions JSON")?;
            let exceptions = accept_exceptions(requests)?;

            let filtered = if available_only {
                public_view(&slots, &exceptions, config.yearly_match)
            } else {
                filter_slots_with(&slots, &exceptions, config.yearly_match)
            };
            write_output(output.as_deref(), &render_views(&filtered)?)?;
        }
        Commands::Availability {
            input,
            output,
            from,
            to,
            now,
        } => {
            let now = now.map(|n| n.and_utc()).unwrap_or_else(Utc::now);
            let schedule = load_schedule(input.as_deref(), config, now)?;
            let slots = schedule.availability(midnight(from), midnight(to));
            write_output(output.as_deref(), &render_views(&slots)?)?;
        }
        Commands::Public {
            input,
            output,
            today,
            now,
        } => {
            let now = now.map(|n| n.and_utc()).unwrap_or_else(Utc::now);
            let today = today.unwrap_or_else(|| now.date_naive());
            let schedule = load_schedule(input.as_deref(), config, now)?;
            let slots = schedule.public_slots(today);
            write_output(output.as_deref(), &render_views(&slots)?)?;
        }
    }

    Ok(())
}

/// Install a stderr `fmt` subscriber. `RUST_LOG` wins unless `--verbose` is set.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Validate exception requests and turn them into exceptions for an anonymous service.
fn accept_exceptions(requests: Vec<ExceptionRequest>) -> Result<Vec<ServiceException>> {
    let now = Utc::now();
    requests
        .into_iter()
        .enumerate()
        .map(|(i, req)| -> Result<ServiceException> {
            req.validate()
                .with_context(|| format!("Invalid exception at index {}", i))?;
            Ok(req.into_exception(Uuid::nil(), now))
        })
        .collect()
}

/// Build a schedule from a document, generating slots for every pattern.
fn load_schedule(
    input: Option<&str>,
    config: EngineConfig,
    now: chrono::DateTime<Utc>,
) -> Result<ServiceSchedule> {
    let json = read_input(input)?;
    let doc: ScheduleDocument =
        serde_json::from_str(&json).context("Failed to parse schedule JSON")?;

    let mut schedule = ServiceSchedule::new(doc.service_id.unwrap_or_else(Uuid::new_v4), config);
    for (i, request) in doc.patterns.into_iter().enumerate() {
        schedule
            .add_pattern(request, now)
            .with_context(|| format!("Invalid pattern at index {}", i))?;
    }
    for (i, request) in doc.exceptions.into_iter().enumerate() {
        schedule
            .add_exception(request, now)
            .with_context(|| format!("Invalid exception at index {}", i))?;
    }

    Ok(schedule)
}

fn render_views(slots: &[AvailableSlot]) -> Result<String> {
    let views: Vec<SlotView> = slots.iter().map(SlotView::from).collect();
    Ok(serde_json::to_string_pretty(&views)?)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
