use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "pomodoro-cli", version, about = "Pomodoro timer CLI")]
struct Cli {
    /// Directory holding pomodoro_data.json (default: ~/.config/pomodoro)
    #[arg(long, global = true, env = "POMODORO_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Settings management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Session statistics
    Stats(commands::stats::StatsArgs),
    /// Backup and restore
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
    /// Record the user's email
    Login {
        /// Email address (any non-empty string)
        email: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let result = commands::open_store(cli.data_dir.as_deref()).and_then(|store| match cli.command {
        Commands::Timer { action } => commands::timer::run(store, action),
        Commands::Config { action } => commands::config::run(&store, action),
        Commands::Stats(args) => commands::stats::run(&store, args),
        Commands::Data { action } => commands::data::run(&store, action),
        Commands::Login { email } => {
            store.set_user(&email)?;
            println!("logged in as {}", email.trim());
            Ok(())
        }
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
