use gridmaze_core::{game::MoveMode, GenAlgorithm};
use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::constants::base_path;

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read or write settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse settings file: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazePreset {
    pub title: String,
    pub width: u16,
    pub height: u16,
    #[serde(default)]
    pub default: bool,
}

impl MazePreset {
    pub fn new(title: &str, width: u16, height: u16) -> Self {
        MazePreset {
            title: title.to_string(),
            width,
            height,
            default: false,
        }
    }
}

pub fn default_presets() -> Vec<MazePreset> {
    vec![
        MazePreset::new("Small", 10, 10),
        MazePreset {
            default: true,
            ..MazePreset::new("Medium", 18, 18)
        },
        MazePreset::new("Large", 28, 28),
        MazePreset::new("XL", 40, 40),
    ]
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub default_algorithm: Option<GenAlgorithm>,
    #[serde(default)]
    pub move_mode: Option<MoveMode>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub mazes: Option<Vec<MazePreset>>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_default_algorithm(&self) -> GenAlgorithm {
        self.default_algorithm.unwrap_or_default()
    }

    pub fn get_move_mode(&self) -> MoveMode {
        self.move_mode.unwrap_or_default()
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn set_mazes(mut self, value: Vec<MazePreset>) -> Self {
        self.mazes = Some(value);
        self
    }

    /// Configured presets, or the built-in ones when none are configured.
    pub fn get_mazes(&self) -> Vec<MazePreset> {
        match &self.mazes {
            Some(mazes) if !mazes.is_empty() => mazes.clone(),
            _ => default_presets(),
        }
    }

    /// Index of the first preset marked as default, or the first one.
    pub fn get_default_preset(&self) -> usize {
        self.get_mazes()
            .iter()
            .position(|preset| preset.default)
            .unwrap_or(0)
    }

    pub fn default_path() -> Option<PathBuf> {
        base_path().map(|dir| dir.join("settings.ron"))
    }

    pub fn parse(text: &str) -> Result<Self, SettingsError> {
        let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
        Ok(options.from_str(text)?)
    }

    /// Loads settings from `path`, writing the default settings there first if it doesn't exist.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if path.exists() {
            let text = fs::read_to_string(path)?;
            log::debug!("loaded settings from {:?}", path);
            return Self::parse(&text);
        }

        Self::write_default(path)?;
        Self::parse(DEFAULT_SETTINGS)
    }

    /// Like [`Settings::load`], but falls back to defaults and logs a warning on failure.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::warn!("No settings directory available, using default settings");
            return Self::parse(DEFAULT_SETTINGS).unwrap_or_default();
        };

        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("{}, using default settings", err);
                Self::parse(DEFAULT_SETTINGS).unwrap_or_default()
            }
        }
    }

    pub fn reset_config(path: &Path) -> Result<(), SettingsError> {
        Self::write_default(path)
    }

    fn write_default(path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_SETTINGS)?;
        log::info!("wrote default settings to {:?}", path);

        Ok(())
    }
}
