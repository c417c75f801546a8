//! Simulator configuration.
//!
//! Loaded from JSON; every field is optional and falls back to its default.
//!
//! ```json
//! { "quantum": 4, "max_processes": 50, "algorithms": [{ "kind": "sjf" }] }
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::models::{Process, Ticks};
use crate::scheduler::{compare_with_limit, simulate_with_limit, Algorithm, SimulationOutcome};
use crate::validation::DEFAULT_MAX_PROCESSES;

/// Default round robin time quantum.
pub const DEFAULT_QUANTUM: Ticks = 2;

/// Simulator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Time quantum for round robin when no explicit algorithm list is given.
    pub quantum: Ticks,
    /// Largest accepted process set.
    pub max_processes: usize,
    /// Algorithms to run. `None` = all four.
    pub algorithms: Option<Vec<Algorithm>>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
            max_processes: DEFAULT_MAX_PROCESSES,
            algorithms: None,
        }
    }
}

/// Configuration loading failure.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io { path: PathBuf, source: std::io::Error },
    /// The JSON did not match the expected shape.
    Parse(serde_json::Error),
    /// A value is out of range.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read config {}: {source}", path.display())
            }
            Self::Parse(e) => write!(f, "malformed config: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl SimulatorConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Sets the round robin quantum.
    pub fn with_quantum(mut self, quantum: Ticks) -> Self {
        self.quantum = quantum;
        self
    }

    /// Sets the explicit algorithm list.
    pub fn with_algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        self.algorithms = Some(algorithms);
        self
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quantum < 1 {
            return Err(ConfigError::Invalid(format!(
                "quantum must be at least 1, got {}",
                self.quantum
            )));
        }
        if self.max_processes == 0 {
            return Err(ConfigError::Invalid(
                "max_processes must be at least 1".to_string(),
            ));
        }
        if let Some(algorithms) = &self.algorithms {
            if algorithms.is_empty() {
                return Err(ConfigError::Invalid("algorithm list is empty".to_string()));
            }
            for algorithm in algorithms {
                if let Algorithm::RoundRobin { quantum } = *algorithm {
                    if quantum < 1 {
                        return Err(ConfigError::Invalid(format!(
                            "round robin quantum must be at least 1, got {quantum}"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// The algorithms this configuration runs.
    pub fn algorithms(&self) -> Vec<Algorithm> {
        self.algorithms
            .clone()
            .unwrap_or_else(|| Algorithm::all(self.quantum))
    }

    /// Runs one algorithm under this configuration's size limit.
    pub fn simulate(
        &self,
        processes: &[Process],
        algorithm: Algorithm,
    ) -> Result<SimulationOutcome, ScheduleError> {
        simulate_with_limit(processes, algorithm, self.max_processes)
    }

    /// Runs every configured algorithm on independent copies.
    pub fn simulate_all(
        &self,
        processes: &[Process],
    ) -> Result<Vec<SimulationOutcome>, ScheduleError> {
        compare_with_limit(processes, &self.algorithms(), self.max_processes)
    }
}
