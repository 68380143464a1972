use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    /// Interval between automatic ticks in the interactive driver.
    pub(crate) tick_interval_ms: u64,
    pub(crate) fps_cap: u32,
    /// Fixed seed for reproducible runs; wall-clock seeded when absent.
    pub(crate) seed: Option<u64>,
    pub(crate) event_log_len: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 2000,
            fps_cap: 30,
            seed: None,
            event_log_len: 6,
        }
    }
}

const SETTINGS_FILE: &str = "settings.json";

/// Where settings live when `--config` is not given. Resolving the path
/// touches nothing on disk; the directory is made on first save.
pub(crate) fn platform_settings_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "moodpet", "Moodpet").map(|proj| proj.config_dir().join(SETTINGS_FILE))
}

pub(crate) fn resolve_settings_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(platform_settings_path)
}

/// Missing or unreadable settings fall back to defaults.
pub(crate) fn load_settings(path: &Path) -> Settings {
    let raw = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(_) => return Settings::default(),
    };
    match serde_json::from_str::<Settings>(&raw) {
        Ok(v) => v,
        Err(err) => {
            warn!(path = %path.display(), %err, "ignoring malformed settings");
            Settings::default()
        }
    }
}

pub(crate) fn save_settings_atomic(path: &Path, s: &Settings) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("could not create {}", dir.display()))?;
    }
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(s)?;
    fs::write(&tmp, data).with_context(|| format!("could not write {}", tmp.display()))?;
    atomic_rename(&tmp, path)?;
    Ok(())
}

fn atomic_rename(from: &Path, to: &Path) -> Result<()> {
    // rename-over-existing is not atomic on Windows
    if cfg!(windows) && to.exists() {
        let _ = fs::remove_file(to);
    }
    fs::rename(from, to)
        .with_context(|| format!("could not move {} to {}", from.display(), to.display()))?;
    Ok(())
}
