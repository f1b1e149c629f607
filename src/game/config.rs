use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::error::NavError;

/// Configuration for a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square grid; must be even
    pub grid_size: usize,
    /// Delay between two ticks, in milliseconds
    pub tick_interval_ms: u64,
    /// Seed for target placement; `None` draws one from the OS
    pub seed: Option<u64>,
    /// Allow single greedy steps while the body is shorter than the grid side
    pub greedy_short_body: bool,
    /// Draw the Hamiltonian cycle under the snake
    pub show_path: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 6,
            tick_interval_ms: 150,
            seed: None,
            greedy_short_body: true,
            show_path: true,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), NavError> {
        validate_grid_size(self.grid_size)?;

        if self.tick_interval_ms == 0 {
            return Err(NavError::InvalidTickInterval);
        }

        Ok(())
    }
}

/// The serpentine cycle only closes on even, non-empty grids
pub fn validate_grid_size(grid_size: usize) -> Result<(), NavError> {
    if grid_size == 0 || grid_size % 2 != 0 {
        return Err(NavError::InvalidGridSize(grid_size));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 6);
        assert_eq!(config.tick_interval(), Duration::from_millis(150));
        assert!(config.greedy_short_body);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_odd_grid() {
        let config = GameConfig::new(7);
        assert_eq!(config.validate(), Err(NavError::InvalidGridSize(7)));
    }

    #[test]
    fn test_validation_zero_grid() {
        let config = GameConfig::new(0);
        assert_eq!(config.validate(), Err(NavError::InvalidGridSize(0)));
    }

    #[test]
    fn test_validation_zero_interval() {
        let config = GameConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(NavError::InvalidTickInterval));
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_size": 10, "seed": 42 }}"#).unwrap();

        let config = GameConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.grid_size, 10);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.tick_interval_ms, 150);
    }

    #[test]
    fn test_load_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "grid_size = 10").unwrap();

        assert!(GameConfig::from_json_file(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(GameConfig::from_json_file(&dir.path().join("absent.json")).is_err());
    }
}
