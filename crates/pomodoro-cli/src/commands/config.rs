use clap::Subcommand;
use pomodoro_core::{Settings, Store, Theme};

use super::CliResult;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a setting (e.g. "focus", "theme", "auto_break")
    Get {
        /// Setting key as stored in the data file
        key: String,
    },
    /// Set a setting
    Set {
        /// Setting key
        key: String,
        /// New value
        value: String,
    },
    /// List all settings
    List,
    /// Reset settings to defaults (statistics are kept)
    Reset,
    /// List the available color themes
    Themes,
}

pub fn run(store: &Store, action: ConfigAction) -> CliResult {
    match action {
        ConfigAction::Get { key } => {
            let settings = store.load_settings()?;
            match settings.get(&key) {
                Some(value) => println!("{value}"),
                None => {
                    eprintln!("unknown key: {key}");
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut settings = store.load_settings()?;
            settings.set(&key, &value)?;
            store.save_settings(settings)?;
            println!("ok");
        }
        ConfigAction::List => {
            let settings = store.load_settings()?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        ConfigAction::Reset => {
            store.save_settings(Settings::default())?;
            println!("settings reset to defaults");
        }
        ConfigAction::Themes => {
            let current = store.load_settings()?.theme;
            for theme in Theme::ALL {
                let marker = if theme == current { "*" } else { " " };
                println!("{marker} {theme}");
            }
        }
    }
    Ok(())
}
