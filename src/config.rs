//! Persisted user settings (lives in the OS config directory).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ScheduleError, ScheduleResult};
use crate::timeline::{
    LayoutConfig, TrackMode, DEFAULT_COLUMN_WIDTH, DEFAULT_MIN_SPAN_DAYS, DEFAULT_PADDING_DAYS,
    MAX_COLUMN_WIDTH, MIN_COLUMN_WIDTH,
};

const ZOOM_STEP: f32 = 1.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub column_width_px: f32,
    pub padding_days: i64,
    pub min_span_days: i64,
    pub track_mode: TrackMode,
    /// How far the page buttons move the chart.
    pub weeks_per_page: i32,
    /// Snapshot reopened on start-up.
    pub last_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            column_width_px: DEFAULT_COLUMN_WIDTH,
            padding_days: DEFAULT_PADDING_DAYS,
            min_span_days: DEFAULT_MIN_SPAN_DAYS,
            track_mode: TrackMode::SingleTrack,
            weeks_per_page: 2,
            last_file: None,
        }
    }
}

impl Settings {
    /// Layout tunables with out-of-range values pulled back into bounds.
    pub fn layout(&self) -> LayoutConfig {
        LayoutConfig {
            padding_days: self.padding_days.max(0),
            min_span_days: self.min_span_days.max(1),
            ..LayoutConfig::default()
        }
        .with_column_width(self.column_width_px.clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH))
    }

    pub fn zoom_in(&mut self) {
        self.column_width_px = (self.column_width_px * ZOOM_STEP).min(MAX_COLUMN_WIDTH);
    }

    pub fn zoom_out(&mut self) {
        self.column_width_px = (self.column_width_px / ZOOM_STEP).max(MIN_COLUMN_WIDTH);
    }

    /// Read settings from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> ScheduleResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ScheduleError::io(path, e)),
        }
    }

    /// Like [`Settings::load`], but logs and falls back to defaults on error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> ScheduleResult<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| ScheduleError::io(dir, e))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| ScheduleError::io(path, e))?;
        tracing::debug!(path = %path.display(), "settings saved");
        Ok(())
    }
}

/// Directory holding `settings.json`.
pub fn config_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "DashboardGantt")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}
