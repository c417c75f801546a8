//! Process (job) model.
//!
//! A process is a unit of CPU work with a fixed arrival tick, burst length
//! and priority. Completion metrics are filled in by a scheduling run.
//!
//! # Time Representation
//! All times are integer ticks relative to the simulation epoch (t=0).

use serde::{Deserialize, Serialize};

/// Simulated time, in ticks.
pub type Ticks = i64;

/// Process identifier. Assigned 1..n at input time.
pub type Pid = u32;

/// A process to be scheduled.
///
/// Static attributes (`pid`, `arrival`, `burst`, `priority`) never change.
/// `remaining` and the completion fields are owned by the run that
/// schedules this copy of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier.
    pub pid: Pid,
    /// Tick at which the process becomes eligible to run.
    pub arrival: Ticks,
    /// Total CPU ticks required.
    pub burst: Ticks,
    /// Scheduling priority (lower = more important).
    pub priority: i32,
    /// Ticks of burst not yet executed.
    pub remaining: Ticks,
    /// Tick at which the process was first dispatched.
    pub first_run: Option<Ticks>,
    /// Tick at which execution finished.
    pub completion: Option<Ticks>,
    /// `completion - arrival`.
    pub turnaround: Option<Ticks>,
    /// `turnaround - burst`.
    pub waiting: Option<Ticks>,
}

impl Process {
    /// Creates a new process with priority 0.
    pub fn new(pid: Pid, arrival: Ticks, burst: Ticks) -> Self {
        Self {
            pid,
            arrival,
            burst,
            priority: 0,
            remaining: burst,
            first_run: None,
            completion: None,
            turnaround: None,
            waiting: None,
        }
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Whether the process has arrived by `now`.
    #[inline]
    pub fn has_arrived(&self, now: Ticks) -> bool {
        self.arrival <= now
    }

    /// Whether all of the burst has executed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.completion.is_some()
    }

    /// Runs the process for up to `slice` ticks starting at `now`.
    ///
    /// Returns the number of ticks actually executed. Completes the process
    /// when the remaining burst reaches zero.
    pub fn execute(&mut self, now: Ticks, slice: Ticks) -> Ticks {
        let ran = self.remaining.min(slice);
        if self.first_run.is_none() {
            self.first_run = Some(now);
        }
        self.remaining -= ran;
        if self.remaining == 0 {
            self.complete(now + ran);
        }
        ran
    }

    /// Records completion at `at` and derives turnaround and waiting time.
    pub fn complete(&mut self, at: Ticks) {
        let turnaround = at - self.arrival;
        self.remaining = 0;
        self.completion = Some(at);
        self.turnaround = Some(turnaround);
        self.waiting = Some(turnaround - self.burst);
    }

    /// Response time: first dispatch minus arrival.
    pub fn response(&self) -> Option<Ticks> {
        self.first_run.map(|t| t - self.arrival)
    }

    /// Clears every computed field, restoring the process to its input state.
    pub fn reset(&mut self) {
        self.remaining = self.burst;
        self.first_run = None;
        self.completion = None;
        self.turnaround = None;
        self.waiting = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_builder() {
        let p = Process::new(3, 4, 7).with_priority(2);
        assert_eq!(p.pid, 3);
        assert_eq!(p.arrival, 4);
        assert_eq!(p.burst, 7);
        assert_eq!(p.priority, 2);
        assert_eq!(p.remaining, 7);
        assert!(!p.is_complete());
        assert_eq!(p.waiting, None);
    }

    #[test]
    fn test_complete_derives_metrics() {
        let mut p = Process::new(1, 1, 3);
        p.complete(8);
        assert_eq!(p.completion, Some(8));
        assert_eq!(p.turnaround, Some(7));
        assert_eq!(p.waiting, Some(4));
        assert_eq!(p.remaining, 0);
    }

    #[test]
    fn test_execute_partial_then_finish() {
        let mut p = Process::new(1, 0, 5);
        assert_eq!(p.execute(0, 2), 2);
        assert_eq!(p.remaining, 3);
        assert!(!p.is_complete());

        // Slice larger than what is left only runs the remainder
        assert_eq!(p.execute(6, 4), 3);
        assert_eq!(p.completion, Some(9));
        assert_eq!(p.first_run, Some(0));
        assert_eq!(p.response(), Some(0));
    }

    #[test]
    fn test_reset() {
        let mut p = Process::new(1, 2, 2);
        p.execute(4, 2);
        assert!(p.is_complete());
        p.reset();
        assert_eq!(p, Process::new(1, 2, 2));
    }

    #[test]
    fn test_has_arrived() {
        let p = Process::new(1, 5, 1);
        assert!(!p.has_arrived(4));
        assert!(p.has_arrived(5));
    }
}
