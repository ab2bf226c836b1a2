//! `day-layout`: lay out a day's events from JSON.
//!
//! Reads an array of `{"start": .., "end": ..}` objects from a file or stdin
//! and prints the computed layout as JSON.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use day_layout::telemetry::init_default_tracing;
use day_layout::{layout, EventInput, EventOrder, LayoutConfig, ReflowStrategy};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "day-layout",
    version,
    about = "Lay out calendar events into non-overlapping columns"
)]
struct Cli {
    /// JSON file holding an array of {"start", "end"} events (stdin if omitted or "-")
    input: Option<PathBuf>,

    /// Width of the day column
    #[arg(long, default_value_t = 600.0)]
    total_width: f64,

    /// Spacing subtracted from every event width
    #[arg(long, default_value_t = 3.0)]
    gutter: f64,

    /// Right-edge slack a cluster must leave free to be re-packed
    #[arg(long, default_value_t = 5.0)]
    overflow_margin: f64,

    /// Process events by start time instead of input order
    #[arg(long)]
    sort: bool,

    /// Width reflow strategy
    #[arg(long, value_enum, default_value_t = Reflow::Neighborhood)]
    reflow: Reflow,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Log layout decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Reflow {
    Neighborhood,
    Component,
}

impl From<Reflow> for ReflowStrategy {
    fn from(reflow: Reflow) -> Self {
        match reflow {
            Reflow::Neighborhood => ReflowStrategy::Neighborhood,
            Reflow::Component => ReflowStrategy::Component,
        }
    }
}

impl Cli {
    fn config(&self) -> LayoutConfig {
        let order = if self.sort {
            EventOrder::StartTime
        } else {
            EventOrder::Input
        };
        LayoutConfig::default()
            .with_total_width(self.total_width)
            .with_gutter(self.gutter)
            .with_overflow_margin(self.overflow_margin)
            .with_order(order)
            .with_reflow(self.reflow.into())
    }

    fn read_input(&self) -> Result<String> {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display())),
            _ => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read stdin")?;
                Ok(buf)
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _ = init_default_tracing(if cli.verbose { "debug" } else { "warn" });

    let raw = cli.read_input()?;
    let events: Vec<EventInput> =
        serde_json::from_str(&raw).context("Failed to parse events JSON")?;

    let config = cli.config();
    let day = layout(&events, &config).context("Layout failed")?;
    info!(events = day.len(), columns = day.column_count, "layout complete");

    let output = if cli.pretty {
        serde_json::to_string_pretty(&day)?
    } else {
        serde_json::to_string(&day)?
    };
    println!("{output}");
    Ok(())
}
