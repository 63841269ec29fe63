mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cropsight",
    about = "Crop frame quality assessment and positioning advice"
)]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess image files and print positioning advice
    Analyze(commands::analyze::AnalyzeArgs),
    /// Replay a frame directory through a monitoring session
    Monitor(commands::monitor::MonitorArgs),
    /// Generate a default session config file
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Monitor(args) => commands::monitor::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
