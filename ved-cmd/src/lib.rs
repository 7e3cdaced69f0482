//! Command implementations for the VED CLI.
//!
//! Provides subcommands for loading the current city snapshots, querying
//! pollution history, and generating the heatmap point field.

use clap::Subcommand;

pub mod heatmap;
pub mod history;
pub mod snapshot;

#[derive(Subcommand)]
pub enum Command {
    /// Load the current air quality, weather and traffic snapshots
    Snapshot {
        /// Print the snapshots as JSON instead of a text summary
        #[arg(long)]
        json: bool,
    },

    /// Query pollution history for a trailing day window
    History {
        /// Number of trailing days to cover
        #[arg(short, long, default_value_t = 7)]
        days: u32,

        /// Print the synthesized intraday (24h) breakdown instead of the
        /// daily series
        #[arg(long)]
        hourly: bool,

        /// Write the history points as CSV to this path
        #[arg(long)]
        csv: Option<String>,
    },

    /// Generate the pollution heatmap point field
    Heatmap {
        /// Override the current PM2.5 concentration (µg/m³)
        #[arg(long)]
        pm25: Option<f64>,

        /// Write the points as CSV to this path
        #[arg(long)]
        csv: Option<String>,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Snapshot { json } => snapshot::run_snapshot(json).await,
        Command::History { days, hourly, csv } => {
            history::run_history(days, hourly, csv.as_deref()).await
        }
        Command::Heatmap { pm25, csv } => heatmap::run_heatmap(pm25, csv.as_deref()).await,
    }
}
