use std::path::PathBuf;

use clap::Subcommand;
use pomodoro_core::Store;

use super::CliResult;

#[derive(Subcommand)]
pub enum DataAction {
    /// Write a backup of all data
    Export {
        /// Backup file (default: pomodoro_backup.json next to the data file)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Replace all data with a backup
    Import {
        /// Backup file (default: pomodoro_backup.json next to the data file)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

pub fn run(store: &Store, action: DataAction) -> CliResult {
    match action {
        DataAction::Export { path } => {
            let written = store.export_data(path.as_deref())?;
            println!("Data saved to {}", written.display());
        }
        DataAction::Import { path } => {
            store.import_data(path.as_deref())?;
            println!("Data restored.");
        }
    }
    Ok(())
}
