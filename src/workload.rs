//! Process set input.
//!
//! Builds process sets from JSON, from the interactive
//! `arrival burst priority` line format, or from a seeded random generator.
//! Pids are always assigned 1..n in input order.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::{Pid, Process, Ticks};

/// Static attributes of one process, as written in a workload file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub arrival: Ticks,
    pub burst: Ticks,
    #[serde(default)]
    pub priority: i32,
}

impl ProcessSpec {
    pub fn new(arrival: Ticks, burst: Ticks, priority: i32) -> Self {
        Self {
            arrival,
            burst,
            priority,
        }
    }

    /// Parses one `arrival burst [priority]` line.
    pub fn parse_line(line: &str) -> Result<Self, WorkloadError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if !(2..=3).contains(&fields.len()) {
            return Err(WorkloadError::Line(format!(
                "expected `arrival burst [priority]`, got {:?}",
                line.trim()
            )));
        }

        let number = |name: &str, text: &str| {
            text.parse::<i64>()
                .map_err(|_| WorkloadError::Line(format!("{name} is not an integer: {text:?}")))
        };
        let arrival = number("arrival", fields[0])?;
        let burst = number("burst", fields[1])?;
        let priority = match fields.get(2) {
            Some(text) => text
                .parse::<i32>()
                .map_err(|_| WorkloadError::Line(format!("priority is not an integer: {text:?}")))?,
            None => 0,
        };

        Ok(Self::new(arrival, burst, priority))
    }

    fn into_process(self, pid: Pid) -> Process {
        Process::new(pid, self.arrival, self.burst).with_priority(self.priority)
    }
}

/// Workload input failure.
#[derive(Debug)]
pub enum WorkloadError {
    /// The file could not be read.
    Io { path: PathBuf, source: std::io::Error },
    /// The JSON did not match the expected shape.
    Json(serde_json::Error),
    /// A text line could not be parsed.
    Line(String),
}

impl fmt::Display for WorkloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read workload {}: {source}", path.display())
            }
            Self::Json(e) => write!(f, "malformed workload: {e}"),
            Self::Line(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for WorkloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(e) => Some(e),
            Self::Line(_) => None,
        }
    }
}

/// Assigns pids 1..n to `specs` in order.
pub fn from_specs(specs: &[ProcessSpec]) -> Vec<Process> {
    specs
        .iter()
        .zip(1..)
        .map(|(spec, pid)| spec.into_process(pid))
        .collect()
}

/// Parses a JSON array of process specs.
///
/// ```
/// let processes = cpu_sched_sim::workload::from_json_str(
///     r#"[{ "arrival": 0, "burst": 5 }, { "arrival": 1, "burst": 3, "priority": 2 }]"#,
/// ).unwrap();
/// assert_eq!(processes[1].pid, 2);
/// assert_eq!(processes[1].priority, 2);
/// ```
pub fn from_json_str(json: &str) -> Result<Vec<Process>, WorkloadError> {
    let specs: Vec<ProcessSpec> = serde_json::from_str(json).map_err(WorkloadError::Json)?;
    Ok(from_specs(&specs))
}

/// Reads a JSON workload file.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Process>, WorkloadError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| WorkloadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_json_str(&json)
}

/// Parameters for a reproducible random workload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomWorkload {
    /// Number of processes.
    pub count: usize,
    /// Arrivals are drawn from `0..=max_arrival`.
    pub max_arrival: Ticks,
    /// Bursts are drawn from `min_burst..=max_burst`.
    pub min_burst: Ticks,
    pub max_burst: Ticks,
    /// Priorities are drawn from `0..=max_priority`.
    pub max_priority: i32,
    /// RNG seed.
    pub seed: u64,
}

impl RandomWorkload {
    /// `count` processes with small textbook-sized values.
    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            count,
            max_arrival: 10,
            min_burst: 1,
            max_burst: 10,
            max_priority: 5,
            seed,
        }
    }

    /// Sets the arrival window.
    pub fn with_max_arrival(mut self, max_arrival: Ticks) -> Self {
        self.max_arrival = max_arrival;
        self
    }

    /// Sets the burst range.
    pub fn with_burst_range(mut self, min_burst: Ticks, max_burst: Ticks) -> Self {
        self.min_burst = min_burst;
        self.max_burst = max_burst;
        self
    }

    /// Draws the process set. Identical parameters give identical output.
    pub fn generate(&self) -> Vec<Process> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let min_burst = self.min_burst.max(1);
        let max_burst = self.max_burst.max(min_burst);

        let specs: Vec<ProcessSpec> = (0..self.count)
            .map(|_| {
                ProcessSpec::new(
                    rng.random_range(0..=self.max_arrival.max(0)),
                    rng.random_range(min_burst..=max_burst),
                    rng.random_range(0..=self.max_priority.max(0)),
                )
            })
            .collect();
        from_specs(&specs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_processes;

    #[test]
    fn test_from_specs_assigns_pids() {
        let processes = from_specs(&[ProcessSpec::new(0, 5, 1), ProcessSpec::new(2, 3, 0)]);
        assert_eq!(processes[0].pid, 1);
        assert_eq!(processes[1].pid, 2);
        assert_eq!(processes[1].arrival, 2);
        assert_eq!(processes[0].priority, 1);
        assert_eq!(processes[1].remaining, 3);
    }

    #[test]
    fn test_json_priority_defaults_to_zero() {
        let processes = from_json_str(r#"[{ "arrival": 4, "burst": 2 }]"#).unwrap();
        assert_eq!(processes[0].priority, 0);
    }

    #[test]
    fn test_json_malformed() {
        assert!(matches!(
            from_json_str(r#"[{ "arrival": 4 }]"#),
            Err(WorkloadError::Json(_))
        ));
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(
            ProcessSpec::parse_line("0 5 2").unwrap(),
            ProcessSpec::new(0, 5, 2)
        );
        assert_eq!(
            ProcessSpec::parse_line("  3   4 ").unwrap(),
            ProcessSpec::new(3, 4, 0)
        );
    }

    #[test]
    fn test_parse_line_errors() {
        assert!(ProcessSpec::parse_line("").is_err());
        assert!(ProcessSpec::parse_line("1 2 3 4").is_err());
        let err = ProcessSpec::parse_line("1 x").unwrap_err();
        assert!(err.to_string().contains("burst"));
        assert!(ProcessSpec::parse_line("1 2 high").is_err());
    }

    #[test]
    fn test_parse_line_keeps_bad_values_for_validation() {
        // Range checks belong to validation, not parsing
        let spec = ProcessSpec::parse_line("-1 0").unwrap();
        assert!(validate_processes(&from_specs(&[spec])).is_err());
    }

    #[test]
    fn test_random_workload_reproducible() {
        let a = RandomWorkload::new(20, 99).generate();
        let b = RandomWorkload::new(20, 99).generate();
        let c = RandomWorkload::new(20, 100).generate();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_random_workload_valid() {
        let processes = RandomWorkload::new(30, 1)
            .with_max_arrival(50)
            .with_burst_range(2, 4)
            .generate();
        assert_eq!(processes.len(), 30);
        assert!(validate_processes(&processes).is_ok());
        assert!(processes.iter().all(|p| (2..=4).contains(&p.burst)));
        assert!(processes.iter().all(|p| (0..=50).contains(&p.arrival)));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load("/nonexistent/workload.json"),
            Err(WorkloadError::Io { .. })
        ));
    }
}
