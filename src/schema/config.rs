//! Configuration types for Game of Life runs.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Pattern, Preset, Seed};
use crate::compute::FixedTimestep;

/// Upper bound on the automatic generation rate.
pub const MAX_GENERATIONS_PER_SECOND: u32 = 10_000;

fn default_rows() -> usize {
    69
}

fn default_cols() -> usize {
    69
}

fn default_generations_per_second() -> u32 {
    60
}

/// How generations are advanced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepMode {
    /// Advance on a fixed timestep.
    #[default]
    Automatic,
    /// Advance once per key press.
    Manual,
}

/// Terminal color scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    /// Terminal colors, dead cells drawn as `.`.
    #[default]
    Default,
    /// Green on black, dead cells left blank.
    Hacker,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 2] = [ColorScheme::Default, ColorScheme::Hacker];

    pub fn name(self) -> &'static str {
        match self {
            ColorScheme::Default => "default",
            ColorScheme::Hacker => "hacker",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorScheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorScheme::ALL
            .into_iter()
            .find(|scheme| scheme.name() == s)
            .ok_or_else(|| ConfigError::UnknownColorScheme(s.to_string()))
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Grid height in cells.
    #[serde(default = "default_rows")]
    pub rows: usize,
    /// Grid width in cells.
    #[serde(default = "default_cols")]
    pub cols: usize,
    #[serde(default)]
    pub step_mode: StepMode,
    /// Automatic mode target rate.
    #[serde(default = "default_generations_per_second")]
    pub target_generations_per_second: u32,
    /// Most generations a single late tick may fire. `None` catches up fully.
    #[serde(default)]
    pub max_catch_up_steps: Option<u32>,
    #[serde(default)]
    pub color_scheme: ColorScheme,
    /// Initial configuration.
    #[serde(default)]
    pub seed: Seed,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            step_mode: StepMode::default(),
            target_generations_per_second: default_generations_per_second(),
            max_catch_up_steps: None,
            color_scheme: ColorScheme::default(),
            seed: Seed::default(),
        }
    }
}

impl SimulationConfig {
    /// Load a configuration from a JSON file. The result is not validated.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Fixed timestep matching the configured rate and catch-up limit.
    pub fn timestep(&self) -> FixedTimestep {
        FixedTimestep::new(self.target_generations_per_second)
            .with_max_catch_up(self.max_catch_up_steps)
    }

    /// Validate configuration parameters.
    ///
    /// Explicit seed coordinates are not checked here; they fail with an
    /// out-of-range error when applied to the grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.target_generations_per_second == 0
            || self.target_generations_per_second > MAX_GENERATIONS_PER_SECOND
        {
            return Err(ConfigError::InvalidRate(self.target_generations_per_second));
        }
        if self.max_catch_up_steps == Some(0) {
            return Err(ConfigError::InvalidCatchUp);
        }

        for pattern in &self.seed.patterns {
            match *pattern {
                Pattern::Preset { preset, origin } => {
                    let (height, width) = preset.min_grid();
                    let rows = origin.0.saturating_add(height);
                    let cols = origin.1.saturating_add(width);
                    if rows > self.rows || cols > self.cols {
                        return Err(ConfigError::PresetDoesNotFit { preset, rows, cols });
                    }
                }
                Pattern::Random { density, .. } => {
                    if !(0.0..=1.0).contains(&density) {
                        return Err(ConfigError::InvalidDensity(density));
                    }
                }
                Pattern::Cells { .. } => {}
            }
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Grid rows and columns must be bigger than 0 (got {rows}x{cols})")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("Generations per second must be between 1 and 10000 (got {0})")]
    InvalidRate(u32),
    #[error("Catch-up limit must be at least 1 step")]
    InvalidCatchUp,
    #[error("The {preset} preset needs a grid of at least {rows} rows by {cols} columns")]
    PresetDoesNotFit {
        preset: Preset,
        rows: usize,
        cols: usize,
    },
    #[error("Random density {0} must be within 0.0 and 1.0")]
    InvalidDensity(f64),
    #[error("Invalid color scheme \"{0}\" (valid: default, hacker)")]
    UnknownColorScheme(String),
    #[error("Error reading config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error parsing config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Error serializing config: {0}")]
    Serialize(#[source] serde_json::Error),
}
