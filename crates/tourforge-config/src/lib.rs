//! Configuration system for TourForge.
//!
//! Load run configuration from TOML or YAML files to control the start
//! city, which cities take part, genetic algorithm parameters and progress
//! polling without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use tourforge_config::TourConfig;
//! use std::time::Duration;
//!
//! let config = TourConfig::from_toml_str(r#"
//!     start_city = "Berlin"
//!     random_seed = 7
//!
//!     [genetic]
//!     population_size = 200
//!     generations = 500
//!     mutation_rate = 0.05
//!
//!     [activation]
//!     random_count = 8
//! "#).unwrap();
//!
//! assert_eq!(config.start_city.as_deref(), Some("Berlin"));
//! assert_eq!(config.genetic.population_size, 200);
//! assert_eq!(config.progress.poll_interval(), Duration::from_millis(100));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use tourforge_config::TourConfig;
//!
//! let config = TourConfig::load("tour.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main run configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TourConfig {
    /// Name of the city every tour starts and ends at.
    #[serde(default)]
    pub start_city: Option<String>,

    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Genetic algorithm parameters.
    #[serde(default)]
    pub genetic: GeneticConfig,

    /// Progress polling configuration.
    #[serde(default)]
    pub progress: ProgressConfig,

    /// Which cities to activate before solving.
    #[serde(default)]
    pub activation: ActivationConfig,
}

impl TourConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the start city.
    pub fn with_start_city(mut self, name: impl Into<String>) -> Self {
        self.start_city = Some(name.into());
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Replaces the genetic algorithm parameters.
    pub fn with_genetic(mut self, genetic: GeneticConfig) -> Self {
        self.genetic = genetic;
        self
    }

    /// Sets how often progress is polled, in milliseconds.
    pub fn with_poll_interval_ms(mut self, millis: u64) -> Self {
        self.progress.poll_interval_ms = millis;
        self
    }

    /// Activates `count` random cities before solving.
    pub fn with_random_activation(mut self, count: usize) -> Self {
        self.activation.random_count = Some(count);
        self
    }

    /// Adds a city that is always activated before solving.
    pub fn with_active_city(mut self, name: impl Into<String>) -> Self {
        self.activation.cities.push(name.into());
        self
    }

    /// Checks value ranges that the file format cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.genetic.validate()?;
        if self.progress.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "progress.poll_interval_ms must be positive".to_string(),
            ));
        }
        if self.activation.random_count == Some(0) {
            return Err(ConfigError::Invalid(
                "activation.random_count must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Genetic algorithm parameters.
///
/// Counts are signed so that out-of-range values in a file reach the
/// solver's own validation instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneticConfig {
    /// Individuals per generation. At least 2.
    pub population_size: i64,

    /// Number of generations to evolve. Zero keeps the random population.
    pub generations: i64,

    /// Probability in `[0, 1]` that an offspring is mutated.
    pub mutation_rate: f64,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 100,
            mutation_rate: 0.01,
        }
    }
}

impl GeneticConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::Invalid(format!(
                "genetic.population_size must be at least 2, got {}",
                self.population_size
            )));
        }
        if self.generations < 0 {
            return Err(ConfigError::Invalid(format!(
                "genetic.generations must not be negative, got {}",
                self.generations
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::Invalid(format!(
                "genetic.mutation_rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }
        Ok(())
    }
}

/// Progress polling configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Interval between remaining-time polls.
    pub poll_interval_ms: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
        }
    }
}

impl ProgressConfig {
    /// Returns the poll interval as a Duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Which cities to activate before solving.
///
/// Named cities are activated first; `random_count` then adds random cities
/// with the start city as anchor.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ActivationConfig {
    /// Number of cities to activate at random, including the start city.
    pub random_count: Option<usize>,

    /// Cities that are always activated.
    pub cities: Vec<String>,
}

#[cfg(test)]
mod tests;
