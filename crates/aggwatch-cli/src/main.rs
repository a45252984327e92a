//! CLI for aggwatch — chart how far the estimator drifts from ground truth.

mod commands;
mod tui;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "aggwatch")]
#[command(about = "aggwatch — % deviation of estimated vs actual aggregates, per epoch")]
#[command(version = aggwatch_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chart a summary file as-is (one-shot; q to dismiss)
    Plot {
        /// Path to the summary file
        summary: String,

        /// Metric set: full (all six) or basic (average, stddev, count)
        #[arg(long, default_value = "full", value_parser = ["full", "basic"])]
        metrics: String,
    },

    /// Live dashboard: regenerate the summary each cycle and redraw in place
    Monitor {
        /// Dataset folder name; raw logs live in dump/<folder>
        folder: String,

        /// Seconds between refresh cycles
        #[arg(long, default_value = "10.0")]
        refresh: f64,

        /// Dump command run as `<cmd> dump/<folder>` to regenerate the summary
        #[arg(long, default_value = aggwatch_core::DEFAULT_DUMP_CMD)]
        dump_cmd: String,

        /// Directory the summary file is written to
        #[arg(long, default_value = "summaries")]
        summaries_dir: String,

        /// Metric set: full (all six) or basic (average, stddev, count)
        #[arg(long, default_value = "full", value_parser = ["full", "basic"])]
        metrics: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Plot { summary, metrics } => commands::plot::run(&summary, &metrics),
        Commands::Monitor {
            folder,
            refresh,
            dump_cmd,
            summaries_dir,
            metrics,
        } => commands::monitor::run(&folder, refresh, &dump_cmd, &summaries_dir, &metrics),
    }
}
