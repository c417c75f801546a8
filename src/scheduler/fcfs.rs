//! First-Come-First-Served.
//!
//! Processes run to completion in stable arrival order. The CPU idles
//! only when the next process in line has not arrived yet.

use tracing::debug;

use super::{arrival_order, simulate, Algorithm, SimulationOutcome};
use crate::error::ScheduleError;
use crate::models::{Process, Timeline};

/// Runs FCFS on a copy of `processes`.
pub fn run(processes: &[Process]) -> Result<SimulationOutcome, ScheduleError> {
    simulate(processes, Algorithm::Fcfs)
}

pub(crate) fn schedule(processes: &mut [Process]) -> Timeline {
    let mut timeline = Timeline::new();
    let mut now = 0;

    for i in arrival_order(processes) {
        let p = &mut processes[i];
        if now < p.arrival {
            timeline.record_idle(now, p.arrival);
            now = p.arrival;
        }

        let start = now;
        now += p.execute(start, p.burst);
        timeline.record_run(p.pid, start, now);
        debug!(pid = p.pid, start, end = now, "fcfs dispatch");
    }

    timeline.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Slice;

    #[test]
    fn test_fcfs_basic() {
        let processes = vec![Process::new(1, 0, 5), Process::new(2, 1, 3)];
        let outcome = run(&processes).unwrap();

        assert_eq!(outcome.completions(), vec![(1, 5), (2, 8)]);
        assert_eq!(outcome.process(1).unwrap().waiting, Some(0));
        assert_eq!(outcome.process(2).unwrap().waiting, Some(4));
        assert_eq!(outcome.process(2).unwrap().turnaround, Some(7));
    }

    #[test]
    fn test_fcfs_ignores_submission_order() {
        // Submitted late-first; runs early-first
        let processes = vec![Process::new(1, 6, 2), Process::new(2, 0, 3)];
        let outcome = run(&processes).unwrap();
        assert_eq!(
            outcome.timeline.slices(),
            &[Slice::run(2, 0, 3), Slice::idle(3, 6), Slice::run(1, 6, 8)]
        );
        // Output keeps input order
        assert_eq!(outcome.processes[0].pid, 1);
    }

    #[test]
    fn test_fcfs_equal_arrival_keeps_input_order() {
        let processes = vec![Process::new(2, 0, 1), Process::new(1, 0, 1)];
        let outcome = run(&processes).unwrap();
        assert_eq!(
            outcome.timeline.slices(),
            &[Slice::run(2, 0, 1), Slice::run(1, 1, 2)]
        );
    }

    #[test]
    fn test_fcfs_leading_idle() {
        let outcome = run(&[Process::new(1, 5, 2)]).unwrap();
        assert_eq!(
            outcome.timeline.slices(),
            &[Slice::idle(0, 5), Slice::run(1, 5, 7)]
        );
        assert_eq!(outcome.process(1).unwrap().waiting, Some(0));
    }

    #[test]
    fn test_fcfs_convoy() {
        // Long job first makes short jobs wait
        let processes = vec![
            Process::new(1, 0, 10),
            Process::new(2, 1, 1),
            Process::new(3, 2, 1),
        ];
        let outcome = run(&processes).unwrap();
        assert_eq!(outcome.process(2).unwrap().waiting, Some(9));
        assert_eq!(outcome.process(3).unwrap().waiting, Some(9));
    }
}
