//! Single-CPU scheduling algorithms and KPI evaluation.
//!
//! Every algorithm runs against its own copy of the caller's process set,
//! so repeated runs on the same input never interfere.
//!
//! # Algorithms
//!
//! | Algorithm | Preemptive | Selection |
//! |-----------|-----------|-----------|
//! | FCFS | no | arrival order |
//! | SJF | no | shortest burst among ready |
//! | Priority | no | lowest priority value among ready |
//! | Round Robin | yes (quantum) | fixed cyclic arrival order |
//!
//! # References
//!
//! - Silberschatz, Galvin, Gagne, "Operating System Concepts", Ch. 5
//! - Tanenbaum, "Modern Operating Systems", Ch. 2.4

pub mod fcfs;
mod kpi;
pub mod non_preemptive;
pub mod round_robin;

pub use kpi::ScheduleKpi;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::dispatching::RuleEngine;
use crate::error::ScheduleError;
use crate::models::{Pid, Process, Ticks, Timeline};
use crate::validation::{
    validate_processes_with_limit, validate_quantum, ValidationResult, DEFAULT_MAX_PROCESSES,
};

/// A scheduling discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Algorithm {
    /// First-Come-First-Served.
    Fcfs,
    /// Shortest-Job-First, non-preemptive.
    Sjf,
    /// Priority, non-preemptive.
    Priority,
    /// Round Robin with a fixed time quantum.
    RoundRobin { quantum: Ticks },
}

impl Algorithm {
    /// All four disciplines, round robin using `quantum`.
    pub fn all(quantum: Ticks) -> Vec<Self> {
        vec![
            Self::Fcfs,
            Self::Sjf,
            Self::Priority,
            Self::RoundRobin { quantum },
        ]
    }

    /// Parses a short name (`fcfs`, `sjf`, `priority`, `rr`).
    ///
    /// `quantum` is only used for round robin.
    pub fn from_name(name: &str, quantum: Ticks) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "fcfs" | "fifo" => Some(Self::Fcfs),
            "sjf" => Some(Self::Sjf),
            "priority" | "prio" => Some(Self::Priority),
            "rr" | "round_robin" | "round-robin" => Some(Self::RoundRobin { quantum }),
            _ => None,
        }
    }

    /// Short label for tables.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf => "SJF",
            Self::Priority => "Priority",
            Self::RoundRobin { .. } => "RR",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fcfs => f.write_str("FCFS Scheduling"),
            Self::Sjf => f.write_str("SJF (Non-Preemptive)"),
            Self::Priority => f.write_str("Priority Scheduling (Non-Preemptive)"),
            Self::RoundRobin { quantum } => write!(f, "Round Robin (Quantum: {quantum})"),
        }
    }
}

/// Result of one scheduling run.
///
/// `processes` keeps the caller's input order with every computed field
/// filled in; `timeline` covers `[0, makespan)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// Discipline that produced this outcome.
    pub algorithm: Algorithm,
    /// Completed processes in input order.
    pub processes: Vec<Process>,
    /// CPU timeline.
    pub timeline: Timeline,
}

impl SimulationOutcome {
    /// Finds a process by pid.
    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    /// Completion tick per process, in input order.
    pub fn completions(&self) -> Vec<(Pid, Ticks)> {
        self.processes
            .iter()
            .filter_map(|p| p.completion.map(|c| (p.pid, c)))
            .collect()
    }

    /// Aggregate metrics for this run.
    pub fn kpi(&self) -> ScheduleKpi {
        ScheduleKpi::calculate(&self.processes, &self.timeline)
    }
}

/// Runs `algorithm` on a copy of `processes` (default size limit).
///
/// # Example
///
/// ```
/// use cpu_sched_sim::models::Process;
/// use cpu_sched_sim::scheduler::{simulate, Algorithm};
///
/// let processes = vec![Process::new(1, 0, 5), Process::new(2, 1, 3)];
/// let outcome = simulate(&processes, Algorithm::Fcfs).unwrap();
/// assert_eq!(outcome.completions(), vec![(1, 5), (2, 8)]);
/// ```
pub fn simulate(
    processes: &[Process],
    algorithm: Algorithm,
) -> Result<SimulationOutcome, ScheduleError> {
    simulate_with_limit(processes, algorithm, DEFAULT_MAX_PROCESSES)
}

/// Runs `algorithm` on a copy of `processes`, accepting at most
/// `max_processes` entries.
pub fn simulate_with_limit(
    processes: &[Process],
    algorithm: Algorithm,
    max_processes: usize,
) -> Result<SimulationOutcome, ScheduleError> {
    if let Err(errors) = validate_request(processes, algorithm, max_processes) {
        let err = ScheduleError::from(errors);
        warn!(%algorithm, error = %err, "rejected scheduling request");
        return Err(err);
    }

    let mut working = working_copy(processes);
    let timeline = match algorithm {
        Algorithm::Fcfs => fcfs::schedule(&mut working),
        Algorithm::Sjf => {
            non_preemptive::schedule(&mut working, &RuleEngine::shortest_job_first())
        }
        Algorithm::Priority => non_preemptive::schedule(&mut working, &RuleEngine::priority()),
        Algorithm::RoundRobin { quantum } => round_robin::schedule(&mut working, quantum),
    };

    info!(
        %algorithm,
        processes = working.len(),
        makespan = timeline.makespan(),
        slices = timeline.len(),
        "simulation finished"
    );

    Ok(SimulationOutcome {
        algorithm,
        processes: working,
        timeline,
    })
}

/// Runs each algorithm against its own copy of `processes`.
///
/// Stops at the first rejected request.
pub fn compare(
    processes: &[Process],
    algorithms: &[Algorithm],
) -> Result<Vec<SimulationOutcome>, ScheduleError> {
    compare_with_limit(processes, algorithms, DEFAULT_MAX_PROCESSES)
}

/// [`compare`] with an explicit process limit.
pub fn compare_with_limit(
    processes: &[Process],
    algorithms: &[Algorithm],
    max_processes: usize,
) -> Result<Vec<SimulationOutcome>, ScheduleError> {
    algorithms
        .iter()
        .map(|&algorithm| simulate_with_limit(processes, algorithm, max_processes))
        .collect()
}

/// Returns a copy of `processes` ordered by ascending arrival.
///
/// Ties keep their original relative order.
pub fn sort_by_arrival(processes: &[Process]) -> Vec<Process> {
    arrival_order(processes)
        .into_iter()
        .map(|i| processes[i].clone())
        .collect()
}

/// Indices of `processes` in stable arrival order.
pub(crate) fn arrival_order(processes: &[Process]) -> Vec<usize> {
    RuleEngine::arrival_order().sort_indices(processes)
}

fn validate_request(
    processes: &[Process],
    algorithm: Algorithm,
    max_processes: usize,
) -> ValidationResult {
    let mut errors = Vec::new();
    if let Algorithm::RoundRobin { quantum } = algorithm {
        if let Err(mut e) = validate_quantum(quantum) {
            errors.append(&mut e);
        }
    }
    if let Err(mut e) = validate_processes_with_limit(processes, max_processes) {
        errors.append(&mut e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn working_copy(processes: &[Process]) -> Vec<Process> {
    processes
        .iter()
        .cloned()
        .map(|mut p| {
            p.reset();
            p
        })
        .collect()
}
