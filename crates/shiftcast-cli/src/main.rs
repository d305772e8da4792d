use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod logging;
mod render;

#[derive(Parser)]
#[command(name = "shiftcast-cli", version, about = "Shiftcast predictive timeline CLI")]
struct Cli {
    /// Config file to use instead of ~/.config/shiftcast/config.toml
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one forecast series
    Series {
        #[command(subcommand)]
        kind: commands::series::SeriesKind,
    },
    /// Render every dashboard panel
    Dashboard(commands::dashboard::DashboardArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    logging::init_tracing();

    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Series { kind } => commands::series::run(kind, config),
        Commands::Dashboard(args) => commands::dashboard::run(args, config),
        Commands::Config { action } => commands::config::run(action, config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
