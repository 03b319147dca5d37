use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::ZoomLevel;

/// Viewer preferences persisted across runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Prefs {
    #[serde(default)]
    pub zoom: ZoomLevel,
    #[serde(default)]
    pub pixels_per_unit: Option<f32>,
    #[serde(default)]
    pub last_file: Option<PathBuf>,
}

impl Prefs {
    /// Load preferences from the platform config directory, falling back to
    /// defaults when the file is absent or unreadable.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                eprintln!("Ignoring malformed preferences at {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Persist preferences. Failures are logged, never fatal.
    pub fn save(&self) {
        let Some(path) = Self::config_path() else {
            return;
        };
        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    eprintln!("Failed to save preferences to {}: {}", path.display(), e);
                }
            }
            Err(e) => eprintln!("Failed to serialize preferences: {}", e),
        }
    }

    /// Directory holding the preferences file, if the platform exposes one.
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "GanttView")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("prefs.json"))
    }
}
