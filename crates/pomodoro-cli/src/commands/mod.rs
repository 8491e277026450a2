pub mod config;
pub mod data;
pub mod stats;
pub mod timer;

use std::path::Path;
use std::sync::Arc;

use pomodoro_core::Store;

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Open the store and make sure its document is readable. A corrupt
/// document is moved aside and the user is told where it went.
pub fn open_store(data_dir: Option<&Path>) -> CliResult<Arc<Store>> {
    let store = match data_dir {
        Some(dir) => Store::in_dir(dir),
        None => Store::open_default()?,
    };
    let (_, recovery) = store.load_or_recover()?;
    if let Some(recovery) = recovery {
        eprintln!(
            "warning: saved data was unreadable ({}); starting from defaults. The old file was kept at {}",
            recovery.reason,
            recovery.moved_to.display()
        );
    }
    Ok(Arc::new(store))
}
