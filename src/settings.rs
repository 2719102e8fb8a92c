//! Persisted host settings.
//!
//! Stored as a single JSON document. Every field has a default, so files
//! written by older versions (or edited by hand) load with the missing fields
//! filled in.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::element::ResetPreset;
use crate::error::{SortError, SortResult, ValidationError};
use crate::host::{PacingConfig, SoundSettings};
use crate::options::{check_column_count, check_preconditions, Algorithm, AlgorithmOptions};

/// Everything a host remembers between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of columns, `8..=1024`.
    pub column_count: usize,
    /// Selected catalog entry.
    pub algorithm: Algorithm,
    /// Per-operation delays.
    pub pacing: PacingConfig,
    /// Arrangement applied on reset.
    pub reset_preset: ResetPreset,
    /// Options passed to the catalog entry.
    pub algorithm_options: AlgorithmOptions,
    /// Audio cues.
    pub sound: SoundSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            column_count: 100,
            algorithm: Algorithm::InsertionSort,
            pacing: PacingConfig::default(),
            reset_preset: ResetPreset::Shuffle,
            algorithm_options: AlgorithmOptions::default(),
            sound: SoundSettings::default(),
        }
    }
}

impl Settings {
    /// Parses settings from JSON.
    ///
    /// # Errors
    ///
    /// Returns a config error if the document is not valid settings JSON.
    pub fn from_json(json: &str) -> SortResult<Self> {
        serde_json::from_str(json).map_err(|e| SortError::config(format!("invalid settings JSON: {e}")))
    }

    /// Serializes settings as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a config error if serialization fails.
    pub fn to_json_pretty(&self) -> SortResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SortError::config(format!("cannot serialize settings: {e}")))
    }

    /// Loads settings from `path`.
    ///
    /// # Errors
    ///
    /// Returns a config error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> SortResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| SortError::config(format!("cannot read {}: {e}", path.display())))?;
        let settings = Self::from_json(&json)?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Writes settings to `path`.
    ///
    /// The document goes to a temporary sibling first and is renamed over
    /// `path` once flushed, so a crash never leaves a truncated file.
    ///
    /// # Errors
    ///
    /// Returns a config error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> SortResult<()> {
        let path = path.as_ref();
        let json = self.to_json_pretty()?;
        let temp_path = path.with_extension(format!("json.tmp.{}", Uuid::new_v4()));
        let io_err = |e: std::io::Error| SortError::config(format!("cannot write {}: {e}", path.display()));

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        let written = writer
            .write_all(json.as_bytes())
            .and_then(|()| writer.flush())
            .and_then(|()| writer.get_ref().sync_all())
            .and_then(|()| fs::rename(&temp_path, path));
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(io_err(e));
        }

        info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Checks the column range, the selected algorithm's options and its
    /// length requirement.
    ///
    /// # Errors
    ///
    /// Returns the first violated precondition.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_column_count(self.column_count)?;
        check_preconditions(self.algorithm, &self.algorithm_options, self.column_count)
    }

    /// Rounds the column count down to a power of two when the selected
    /// algorithm only sorts such lengths. Returns true if it changed.
    pub fn snap_column_count(&mut self) -> bool {
        let count = self.column_count;
        if count <= 1 || count.is_power_of_two() || !self.algorithm.requires_power_of_two(&self.algorithm_options) {
            return false;
        }
        self.column_count = 1 << count.ilog2();
        true
    }
}
