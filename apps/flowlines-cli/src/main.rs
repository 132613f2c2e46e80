//! Flowlines command-line interface.
//!
//! Picks a flow (from flags or an interactive menu), runs every
//! visualization stage and prints a text summary of the results.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Planar flow visualization: streamlines, pathlines, streaklines and
/// vorticity.
#[derive(Parser)]
#[command(name = "flowlines")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Planar flow visualization toolkit", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Visualize one flow
    Run(commands::run::RunArgs),
    /// List the selectable flows
    List,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::List => commands::list::execute(),
    }
}
