//! JSON-file persistence for the application state document.
//!
//! The [`Store`] is the single source of truth: callers never keep an
//! `AppState` around between operations. Each mutation is a
//! load → mutate → save round trip performed under the store's lock
//! (see [`Store::transact`]).

pub mod settings;
pub mod state;

pub use settings::{Ringtone, Settings, Theme};
pub use state::{AppState, DailyBucket, Statistics};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::error::{CoreError, StoreError, ValidationError};
use crate::stats::{summarize, SummaryReport};

pub const DATA_FILE: &str = "pomodoro_data.json";
pub const BACKUP_FILE: &str = "pomodoro_backup.json";

/// Returns `~/.config/pomodoro[-dev]/` based on POMODORO_ENV.
///
/// Set POMODORO_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("POMODORO_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pomodoro-dev")
    } else {
        base_dir.join("pomodoro")
    };

    fs::create_dir_all(&dir).map_err(|e| StoreError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

/// Outcome of [`Store::load_or_recover`] when the document was unreadable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovery {
    /// Where the unreadable document was moved.
    pub moved_to: PathBuf,
    /// Parse error reported for the unreadable document.
    pub reason: String,
}

/// Single-writer JSON store.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    lock: Mutex<()>,
}

impl Store {
    /// Store backed by `path`. The file need not exist yet.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Store using the standard file name inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::at(dir.as_ref().join(DATA_FILE))
    }

    /// Store at `~/.config/pomodoro/pomodoro_data.json`.
    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self::in_dir(data_dir()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Default backup location: a sibling of the data file.
    pub fn default_backup_path(&self) -> PathBuf {
        self.path.with_file_name(BACKUP_FILE)
    }

    // ── Document I/O ─────────────────────────────────────────────────

    /// Read the document, filling in defaults for absent keys.
    ///
    /// A missing file yields `AppState::default()`.
    ///
    /// # Errors
    /// `CorruptState` if the file is not a valid document, `Io` if it
    /// cannot be read.
    pub fn load(&self) -> Result<AppState, StoreError> {
        let _guard = self.guard();
        Ok(read_document(&self.path)?.unwrap_or_default())
    }

    /// Overwrite the document atomically.
    pub fn save(&self, state: &AppState) -> Result<(), StoreError> {
        let _guard = self.guard();
        write_document(&self.path, state)
    }

    /// Run `f` against the current document and persist the result, all
    /// under the store lock.
    pub fn transact<T>(&self, f: impl FnOnce(&mut AppState) -> T) -> Result<T, StoreError> {
        self.try_transact(|state| Ok::<_, StoreError>(f(state)))
    }

    /// Like [`Store::transact`], but `f` may reject the change. Nothing is
    /// written when `f` returns an error.
    pub fn try_transact<T, E>(
        &self,
        f: impl FnOnce(&mut AppState) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let _guard = self.guard();
        let mut state = read_document(&self.path)?.unwrap_or_default();
        let out = f(&mut state)?;
        write_document(&self.path, &state)?;
        Ok(out)
    }

    /// Load the document; if it is corrupt, move it aside and continue with
    /// defaults. The returned [`Recovery`] must be shown to the user.
    pub fn load_or_recover(&self) -> Result<(AppState, Option<Recovery>), StoreError> {
        let _guard = self.guard();
        match read_document(&self.path) {
            Ok(state) => Ok((state.unwrap_or_default(), None)),
            Err(StoreError::CorruptState { source, .. }) => {
                let stamp = Local::now().format("%Y%m%d%H%M%S");
                let mut name = self.path.as_os_str().to_owned();
                name.push(format!(".corrupt-{stamp}"));
                let moved_to = PathBuf::from(name);
                fs::rename(&self.path, &moved_to).map_err(|e| StoreError::io(&self.path, e))?;
                warn!(
                    path = %self.path.display(),
                    moved_to = %moved_to.display(),
                    error = %source,
                    "state document is corrupt; continuing with defaults"
                );
                Ok((
                    AppState::default(),
                    Some(Recovery {
                        moved_to,
                        reason: source.to_string(),
                    }),
                ))
            }
            Err(e) => Err(e),
        }
    }

    // ── Snapshots ────────────────────────────────────────────────────

    /// Copy the full document to `path`.
    pub fn export_snapshot(&self, path: &Path) -> Result<(), StoreError> {
        let _guard = self.guard();
        let state = read_document(&self.path)?.unwrap_or_default();
        write_document(path, &state)?;
        info!(to = %path.display(), "exported state snapshot");
        Ok(())
    }

    /// Replace the live document with the snapshot at `path`.
    ///
    /// # Errors
    /// `MissingBackup` if `path` does not exist, `CorruptState` if it cannot
    /// be parsed. In both cases the live document is untouched.
    pub fn import_snapshot(&self, path: &Path) -> Result<AppState, StoreError> {
        let _guard = self.guard();
        let state = read_document(path)?.ok_or_else(|| StoreError::MissingBackup {
            path: path.to_path_buf(),
        })?;
        write_document(&self.path, &state)?;
        info!(from = %path.display(), "imported state snapshot");
        Ok(state)
    }

    // ── Host-facing operations ───────────────────────────────────────

    pub fn load_settings(&self) -> Result<Settings, StoreError> {
        Ok(self.load()?.settings)
    }

    /// Validate and persist `settings`. Invalid settings are rejected and
    /// the stored ones kept.
    pub fn save_settings(&self, settings: Settings) -> Result<(), CoreError> {
        settings.validate()?;
        self.transact(|state| state.settings = settings)?;
        debug!("settings saved");
        Ok(())
    }

    /// Export to `path`, or to the default backup location.
    pub fn export_data(&self, path: Option<&Path>) -> Result<PathBuf, StoreError> {
        let target = path.map_or_else(|| self.default_backup_path(), Path::to_path_buf);
        self.export_snapshot(&target)?;
        Ok(target)
    }

    /// Import from `path`, or from the default backup location.
    pub fn import_data(&self, path: Option<&Path>) -> Result<AppState, StoreError> {
        let source = path.map_or_else(|| self.default_backup_path(), Path::to_path_buf);
        self.import_snapshot(&source)
    }

    /// Record the user's identifier. Only emptiness is checked.
    pub fn set_user(&self, identifier: &str) -> Result<(), CoreError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "user".into(),
                message: "must not be empty".into(),
            }
            .into());
        }
        self.transact(|state| state.user_identifier = Some(identifier.to_string()))?;
        Ok(())
    }

    pub fn summarize(&self, as_of: NaiveDate) -> Result<SummaryReport, StoreError> {
        Ok(summarize(&self.load()?, as_of))
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// `Ok(None)` when the file does not exist.
fn read_document(path: &Path) -> Result<Option<AppState>, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::io(path, e)),
    };
    let state = serde_json::from_slice(&bytes).map_err(|source| StoreError::CorruptState {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(state))
}

/// Write to a `.tmp` sibling, then rename over the target.
fn write_document(path: &Path, state: &AppState) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(state)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let written = fs::File::create(&tmp_path)
        .and_then(|mut file| {
            file.write_all(&json)?;
            file.sync_all()
        })
        .map_err(|e| StoreError::io(&tmp_path, e))
        .and_then(|()| fs::rename(&tmp_path, path).map_err(|e| StoreError::io(path, e)));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    debug!(path = %path.display(), bytes = json.len(), "state document written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn failed_save_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = Store::in_dir(dir.path());
        fs::create_dir(store.path()).unwrap();
        fs::write(store.path().join("keep"), b"x").unwrap();

        assert!(store.save(&AppState::default()).is_err());
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .filter(|name| name.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "{leftovers:?}");
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let store = Store::in_dir(dir.path());
        assert_eq!(store.load().unwrap(), AppState::default());
        assert!(!store.path().exists());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = Store::in_dir(dir.path());
        let mut state = AppState::default();
        state.current_cycle = 3;
        state.stats.total_pomodoros = 7;
        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), state);
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = Store::in_dir(dir.path());
        store.save(&AppState::default()).unwrap();
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec![DATA_FILE.to_string()]);
    }

    #[test]
    fn garbage_is_corrupt_state() {
        let dir = TempDir::new().unwrap();
        let store = Store::in_dir(dir.path());
        fs::write(store.path(), b"{ not json").unwrap();
        let err = store.load().unwrap_err();
        assert!(err.is_corrupt());
    }

    #[test]
    fn wrong_field_type_is_corrupt_state() {
        let dir = TempDir::new().unwrap();
        let store = Store::in_dir(dir.path());
        fs::write(store.path(), br#"{"current_cycle": "three"}"#).unwrap();
        assert!(store.load().unwrap_err().is_corrupt());
    }

    #[test]
    fn transact_persists_mutation() {
        let dir = TempDir::new().unwrap();
        let store = Store::in_dir(dir.path());
        let cycle = store
            .transact(|s| {
                s.current_cycle += 2;
                s.current_cycle
            })
            .unwrap();
        assert_eq!(cycle, 2);
        assert_eq!(store.load().unwrap().current_cycle, 2);
    }

    #[test]
    fn failed_try_transact_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let store = Store::in_dir(dir.path());
        let result: Result<(), CoreError> = store.try_transact(|s| {
            s.current_cycle = 9;
            Err(ValidationError::UnknownKey("x".into()).into())
        });
        assert!(result.is_err());
        assert!(!store.path().exists());
    }

    #[test]
    fn save_settings_rejects_invalid_and_keeps_prior() {
        let dir = TempDir::new().unwrap();
        let store = Store::in_dir(dir.path());
        let good = Settings {
            focus_minutes: 25,
            ..Settings::default()
        };
        store.save_settings(good.clone()).unwrap();

        let bad = Settings {
            long_break_minutes: 0,
            ..Settings::default()
        };
        let err = store.save_settings(bad).unwrap_err();
        assert!(matches!(err, CoreError::InvalidSettings(_)));
        assert_eq!(store.load_settings().unwrap(), good);
    }

    #[test]
    fn load_or_recover_moves_corrupt_document_aside() {
        let dir = TempDir::new().unwrap();
        let store = Store::in_dir(dir.path());
        fs::write(store.path(), b"[1, 2").unwrap();

        let (state, recovery) = store.load_or_recover().unwrap();
        assert_eq!(state, AppState::default());
        let recovery = recovery.expect("corrupt document should be reported");
        assert!(recovery.moved_to.exists());
        assert!(!store.path().exists());
        assert_eq!(fs::read(&recovery.moved_to).unwrap(), b"[1, 2");
    }

    #[test]
    fn load_or_recover_passes_through_valid_document() {
        let dir = TempDir::new().unwrap();
        let store = Store::in_dir(dir.path());
        let (state, recovery) = store.load_or_recover().unwrap();
        assert_eq!(state, AppState::default());
        assert!(recovery.is_none());
    }

    #[test]
    fn set_user_trims_and_rejects_empty() {
        let dir = TempDir::new().unwrap();
        let store = Store::in_dir(dir.path());
        assert!(store.set_user("   ").is_err());
        store.set_user("  someone@example.com ").unwrap();
        assert_eq!(
            store.load().unwrap().user_identifier.as_deref(),
            Some("someone@example.com")
        );
    }

    #[test]
    fn default_backup_is_sibling_of_data_file() {
        let store = Store::at("/tmp/somewhere/pomodoro_data.json");
        assert_eq!(
            store.default_backup_path(),
            PathBuf::from("/tmp/somewhere/pomodoro_backup.json")
        );
    }
}
