//! Input validation for scheduling runs.
//!
//! Checks a process set (and quantum, for round robin) before any
//! algorithm touches it. Detects:
//! - Empty process sets
//! - Oversized process sets
//! - Non-positive or duplicate pids
//! - Negative arrival ticks
//! - Non-positive bursts
//! - Non-positive round robin quantum
//! - Workloads whose last possible completion tick does not fit in `Ticks`
//!
//! All problems are collected, so a caller sees every bad field at once.

use std::collections::HashSet;
use std::fmt;

use crate::models::{Process, Ticks};

/// Default upper bound on the number of processes in one run.
pub const DEFAULT_MAX_PROCESSES: usize = 100;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No processes were supplied.
    EmptyProcessSet,
    /// More processes than the configured limit.
    TooManyProcesses,
    /// Two processes share the same pid.
    DuplicatePid,
    /// A pid of zero (reserved for idle in rendered charts).
    InvalidPid,
    /// Arrival tick below zero.
    NegativeArrival,
    /// Burst of zero or less.
    NonPositiveBurst,
    /// Round robin quantum of zero or less.
    NonPositiveQuantum,
    /// Latest arrival plus total burst exceeds the `Ticks` range.
    HorizonOverflow,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a process set against the default size limit.
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    validate_processes_with_limit(processes, DEFAULT_MAX_PROCESSES)
}

/// Validates a process set.
///
/// Checks:
/// 1. At least one process
/// 2. No more than `max_processes`
/// 3. Pids are non-zero and unique
/// 4. `arrival >= 0`
/// 5. `burst > 0`
/// 6. `max(arrival) + sum(burst)` fits in `Ticks`, which bounds every tick
///    an algorithm can reach
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_processes_with_limit(
    processes: &[Process],
    max_processes: usize,
) -> ValidationResult {
    let mut errors = Vec::new();

    if processes.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyProcessSet,
            "Process set is empty",
        ));
    }

    if processes.len() > max_processes {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooManyProcesses,
            format!(
                "{} processes supplied, limit is {max_processes}",
                processes.len()
            ),
        ));
    }

    let mut pids = HashSet::new();
    for p in processes {
        if p.pid == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPid,
                "Process pid must be positive",
            ));
        } else if !pids.insert(p.pid) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePid,
                format!("Duplicate pid: P{}", p.pid),
            ));
        }

        if p.arrival < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("P{} has negative arrival time {}", p.pid, p.arrival),
            ));
        }

        if p.burst <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("P{} has non-positive burst time {}", p.pid, p.burst),
            ));
        }
    }

    if schedule_horizon(processes).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::HorizonOverflow,
            "Latest arrival plus total burst time overflows the tick range",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Upper bound on the completion tick of any work-conserving schedule,
/// `None` on overflow. Negative fields are counted as zero.
fn schedule_horizon(processes: &[Process]) -> Option<Ticks> {
    let latest_arrival = processes.iter().map(|p| p.arrival.max(0)).max().unwrap_or(0);
    processes
        .iter()
        .map(|p| p.burst.max(0))
        .try_fold(latest_arrival, Ticks::checked_add)
}

/// Validates a round robin time quantum.
pub fn validate_quantum(quantum: Ticks) -> ValidationResult {
    if quantum < 1 {
        return Err(vec![ValidationError::new(
            ValidationErrorKind::NonPositiveQuantum,
            format!("Time quantum must be at least 1, got {quantum}"),
        )]);
    }
    Ok(())
}
