//! Schedule quality metrics (KPIs).
//!
//! Computes standard CPU scheduling indicators from a completed run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | End of the last slice |
//! | Avg Turnaround | Mean of completion - arrival |
//! | Avg Waiting | Mean of turnaround - burst |
//! | Avg Response | Mean of first dispatch - arrival |
//! | CPU Utilization | Busy ticks / makespan |
//! | Throughput | Completed processes / makespan |
//! | Context Switches | Process-to-different-process transitions |
//!
//! # Reference
//! Silberschatz et al., "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::models::{Process, Ticks, Timeline};

/// Performance indicators for one scheduling run.
///
/// All time values are in ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Latest completion tick.
    pub makespan: Ticks,
    /// Number of completed processes.
    pub completed: usize,
    /// Mean turnaround time.
    pub avg_turnaround: f64,
    /// Mean waiting time.
    pub avg_waiting: f64,
    /// Mean response time.
    pub avg_response: f64,
    /// Longest waiting time of any single process.
    pub max_waiting: Ticks,
    /// Fraction of the makespan spent executing (0.0..1.0).
    pub cpu_utilization: f64,
    /// Completed processes per tick.
    pub throughput: f64,
    /// Switches between different processes.
    pub context_switches: usize,
}

impl ScheduleKpi {
    /// Computes KPIs from completed processes and their timeline.
    ///
    /// Processes without completion data are ignored. An empty input yields
    /// all-zero metrics.
    pub fn calculate(processes: &[Process], timeline: &Timeline) -> Self {
        let mut completed = 0usize;
        // Sums of near-limit ticks exceed the i64 range
        let mut total_turnaround: i128 = 0;
        let mut total_waiting: i128 = 0;
        let mut total_response: i128 = 0;
        let mut max_waiting: Ticks = 0;

        for p in processes {
            if let (Some(turnaround), Some(waiting)) = (p.turnaround, p.waiting) {
                completed += 1;
                total_turnaround += i128::from(turnaround);
                total_waiting += i128::from(waiting);
                total_response += i128::from(p.response().unwrap_or(waiting));
                max_waiting = max_waiting.max(waiting);
            }
        }

        let makespan = timeline.makespan();
        let mean = |total: i128| {
            if completed == 0 {
                0.0
            } else {
                total as f64 / completed as f64
            }
        };
        let per_tick = |value: f64| {
            if makespan <= 0 {
                0.0
            } else {
                value / makespan as f64
            }
        };

        Self {
            makespan,
            completed,
            avg_turnaround: mean(total_turnaround),
            avg_waiting: mean(total_waiting),
            avg_response: mean(total_response),
            max_waiting,
            cpu_utilization: per_tick(timeline.busy_time() as f64),
            throughput: per_tick(completed as f64),
            context_switches: timeline.context_switches(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{fcfs, round_robin};

    #[test]
    fn test_kpi_fcfs() {
        let outcome = fcfs::run(&[Process::new(1, 0, 5), Process::new(2, 1, 3)]).unwrap();
        let kpi = outcome.kpi();
        assert_eq!(kpi.makespan, 8);
        assert_eq!(kpi.completed, 2);
        assert!((kpi.avg_turnaround - 6.0).abs() < 1e-10); // (5 + 7) / 2
        assert!((kpi.avg_waiting - 2.0).abs() < 1e-10); // (0 + 4) / 2
        assert!((kpi.avg_response - 2.0).abs() < 1e-10);
        assert_eq!(kpi.max_waiting, 4);
        assert!((kpi.cpu_utilization - 1.0).abs() < 1e-10);
        assert!((kpi.throughput - 0.25).abs() < 1e-10);
        assert_eq!(kpi.context_switches, 1);
    }

    #[test]
    fn test_kpi_utilization_with_idle() {
        let outcome = fcfs::run(&[Process::new(1, 6, 2)]).unwrap();
        let kpi = outcome.kpi();
        // busy 2 of 8
        assert!((kpi.cpu_utilization - 0.25).abs() < 1e-10);
        assert_eq!(kpi.context_switches, 0);
    }

    #[test]
    fn test_kpi_rr_response_differs_from_waiting() {
        let outcome = round_robin::run(&[Process::new(1, 0, 5), Process::new(2, 0, 3)], 2).unwrap();
        let kpi = outcome.kpi();
        assert!((kpi.avg_waiting - 3.5).abs() < 1e-10); // (3 + 4) / 2
        assert!((kpi.avg_response - 1.0).abs() < 1e-10); // (0 + 2) / 2
        assert_eq!(kpi.context_switches, 4);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = ScheduleKpi::calculate(&[], &Timeline::new());
        assert_eq!(kpi.makespan, 0);
        assert_eq!(kpi.completed, 0);
        assert_eq!(kpi.avg_turnaround, 0.0);
        assert_eq!(kpi.avg_waiting, 0.0);
        assert_eq!(kpi.cpu_utilization, 0.0);
        assert_eq!(kpi.throughput, 0.0);
    }

    #[test]
    fn test_kpi_ignores_unfinished() {
        let kpi = ScheduleKpi::calculate(&[Process::new(1, 0, 3)], &Timeline::new());
        assert_eq!(kpi.completed, 0);
        assert_eq!(kpi.avg_waiting, 0.0);
    }

    #[test]
    fn test_kpi_totals_beyond_tick_range() {
        let mut a = Process::new(1, 0, 1);
        let mut b = Process::new(2, 0, 1);
        a.complete(Ticks::MAX);
        b.complete(Ticks::MAX);

        let kpi = ScheduleKpi::calculate(&[a, b], &Timeline::new());
        assert_eq!(kpi.completed, 2);
        assert_eq!(kpi.avg_turnaround, Ticks::MAX as f64);
        assert_eq!(kpi.max_waiting, Ticks::MAX - 1);
    }
}
