//! Application configuration file.
use std::{fs, io, path::Path};

use schip::{prelude::*, InvalidTimingMode};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// User settings, stored as YAML.
///
/// ```yaml
/// cycles: 500
/// timing: fixed
/// legacy_shift: false
/// legacy_memops: false
/// sound: true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Instructions per second in fixed timing mode.
    pub cycles: u64,
    pub timing: TimingMode,
    pub legacy_shift: bool,
    pub legacy_memops: bool,
    /// Report the buzzer turning on and off.
    pub sound: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cycles: Hz::default().0,
            timing: TimingMode::Fixed,
            legacy_shift: false,
            legacy_memops: false,
            sound: true,
        }
    }
}

impl AppConfig {
    pub fn from_yaml(text: &str) -> Result<Self, AppError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(text)?;
        Ok(config.normalized())
    }

    pub fn to_yaml(&self) -> Result<String, AppError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Clamp values into the ranges the VM supports.
    pub fn normalized(mut self) -> Self {
        self.cycles = Hz(self.cycles).clamped().0;
        self
    }

    /// Load the configuration file at the given path.
    ///
    /// A missing file is created with the defaults. A file that can't be read
    /// or parsed is left untouched, and the defaults are used instead. Otherwise
    /// the file is written back in its normalised form.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        let config = match fs::read_to_string(path) {
            Ok(text) => match Self::from_yaml(&text) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!("malformed config {}, using defaults: {err}", path.display());
                    return Self::default();
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("creating config {}", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("failed to read config {}, using defaults: {err}", path.display());
                return Self::default();
            }
        };

        if let Err(err) = config.save(path) {
            log::warn!("failed to write config {}: {err}", path.display());
        }

        config
    }

    /// Override the timing mode by name, without touching the file.
    pub fn set_timing(&mut self, mode: &str) -> Result<(), InvalidTimingMode> {
        self.timing = mode.parse()?;
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AppError> {
        fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    /// VM settings. The random number generator is seeded from entropy.
    pub fn to_conf(&self) -> Chip8Conf {
        Chip8Conf {
            cycle_rate: Hz(self.cycles),
            timing: self.timing,
            legacy_shift: self.legacy_shift,
            legacy_memops: self.legacy_memops,
            seed: None,
        }
    }
}
