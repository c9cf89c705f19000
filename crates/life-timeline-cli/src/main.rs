//! `lifeline` CLI — build and reorganize life-history timelines from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Build a timeline from persisted event rows (stdin → stdout)
//! cat rows.json | lifeline build --from 1990 --to 2026
//!
//! # Build with a TOML config file
//! lifeline build --config timeline.toml -i rows.json -o timeline.json
//!
//! # Move an event from June to July 1995
//! lifeline move -i timeline.json --event e1 --source 1995-06 --target 1995-07
//!
//! # Add or remove a single event
//! lifeline insert -i timeline.json --event-json new.json
//! lifeline remove -i timeline.json --event e1
//!
//! # Persistence intents between two timelines
//! lifeline diff --before old.json --after new.json
//!
//! # Per-year event counts
//! lifeline summary -i timeline.json
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` or pass `-v` for more detail.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use life_timeline::{EventId, EventRow, LifeEvent, LifeTimeline, MonthId, TimelineError};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;

use config::{load_config, Overrides};

#[derive(Parser)]
#[command(
    name = "lifeline",
    version,
    about = "Build and reorganize decade/year/month life-history timelines"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a timeline from a JSON array of event rows
    Build {
        /// Input rows file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// TOML config file with the span and undated policy
        #[arg(long)]
        config: Option<PathBuf>,
        /// First year of the span (overrides the config file)
        #[arg(long, allow_negative_numbers = true)]
        from: Option<i32>,
        /// Last year of the span (overrides the config file)
        #[arg(long, allow_negative_numbers = true)]
        to: Option<i32>,
        /// Fail on rows without an event date instead of bucketing them
        #[arg(long)]
        reject_undated: bool,
    },
    /// Move an event from one month to another
    Move {
        /// Input timeline file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Id of the event to move
        #[arg(long)]
        event: String,
        /// Month currently holding the event (YYYY-MM)
        #[arg(long)]
        source: String,
        /// Month to move the event to (YYYY-MM)
        #[arg(long)]
        target: String,
    },
    /// Add one event row to a timeline
    Insert {
        /// Input timeline file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// File holding a single event row as JSON
        #[arg(long)]
        event_json: String,
    },
    /// Remove an event from a timeline
    Remove {
        /// Input timeline file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Id of the event to remove
        #[arg(long)]
        event: String,
    },
    /// Print the persistence intents that turn one timeline into another
    Diff {
        #[arg(long)]
        before: String,
        #[arg(long)]
        after: String,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Show event counts per year
    Summary {
        /// Input timeline file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct YearSummary {
    year: i32,
    events: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build {
            input,
            output,
            config,
            from,
            to,
            reject_undated,
        } => {
            let overrides = Overrides {
                from,
                to,
                reject_undated,
            };
            let config = load_config(config.as_deref(), &overrides)?;
            let raw = read_input(input.as_deref())?;
            let rows: Vec<EventRow> =
                serde_json::from_str(&raw).context("Failed to parse event rows JSON")?;
            let count = rows.len();

            let timeline =
                LifeTimeline::initiate(config, rows).context("Failed to build timeline")?;
            info!(
                rows = count,
                undated = timeline.undated().len(),
                "built timeline"
            );
            write_timeline(output.as_deref(), &timeline)?;
        }
        Commands::Move {
            input,
            output,
            event,
            source,
            target,
        } => {
            let timeline = read_timeline(input.as_deref())?;
            let source: MonthId = source
                .parse()
                .with_context(|| format!("Invalid source month: {}", source))?;
            let target: MonthId = target
                .parse()
                .with_context(|| format!("Invalid target month: {}", target))?;
            let id = EventId::from(event);
            let (_, found) = timeline
                .find_event(&id)
                .ok_or_else(|| TimelineError::EventNotFound(id.to_string()))?;
            let found = found.clone();

            let moved = timeline
                .move_event(&found, source, target)
                .context("Failed to move event")?;
            info!(event = %id, %source, %target, "moved event");
            write_timeline(output.as_deref(), &moved)?;
        }
        Commands::Insert {
            input,
            output,
            event_json,
        } => {
            let timeline = read_timeline(input.as_deref())?;
            let raw = std::fs::read_to_string(&event_json)
                .with_context(|| format!("Failed to read file: {}", event_json))?;
            let row: EventRow = serde_json::from_str(&raw).context("Failed to parse event row")?;
            let event = LifeEvent::try_from(row)?;
            let id = event.id.clone();

            let next = timeline
                .insert_event(event)
                .context("Failed to insert event")?;
            info!(event = %id, "inserted event");
            write_timeline(output.as_deref(), &next)?;
        }
        Commands::Remove {
            input,
            output,
            event,
        } => {
            let timeline = read_timeline(input.as_deref())?;
            let (next, removed) = timeline
                .remove_event(&EventId::from(event))
                .context("Failed to remove event")?;
            info!(event = %removed.id, "removed event");
            write_timeline(output.as_deref(), &next)?;
        }
        Commands::Diff {
            before,
            after,
            output,
        } => {
            let before = read_timeline(Some(before.as_str()))?;
            let after = read_timeline(Some(after.as_str()))?;
            let intents = life_timeline::diff(&before, &after);
            debug!(intents = intents.len(), "computed diff");
            let json = serde_json::to_string_pretty(&intents)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Summary { input, json } => {
            let timeline = read_timeline(input.as_deref())?;
            let years: Vec<YearSummary> = timeline
                .decades()
                .iter()
                .flat_map(|d| d.years())
                .map(|y| YearSummary {
                    year: y.year(),
                    events: y.months().map(|m| m.events().len()).sum(),
                })
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&years)?);
            } else {
                for y in years.iter().filter(|y| y.events > 0) {
                    println!("{:>6}  {}", y.year, y.events);
                }
                println!("Undated: {}", timeline.undated().len());
                println!("Total:   {}", timeline.event_count());
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_timeline(path: Option<&str>) -> Result<LifeTimeline> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Failed to parse timeline JSON")
}

fn write_timeline(path: Option<&str>, timeline: &LifeTimeline) -> Result<()> {
    let json = serde_json::to_string_pretty(timeline)?;
    write_output(path, &json)
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
