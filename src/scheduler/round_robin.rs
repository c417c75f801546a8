//! Round Robin.
//!
//! # Algorithm
//!
//! Processes are visited in a fixed cyclic order (stable arrival sort).
//! Each sweep gives every unfinished, arrived process one slice of
//! `min(remaining, quantum)` ticks. A process that arrives mid-sweep is
//! served in that same sweep once its position comes up. A sweep with no
//! eligible process idles until the earliest pending arrival.
//!
//! Finished processes keep their place in the order and are skipped.

use tracing::debug;

use super::{arrival_order, simulate, Algorithm, SimulationOutcome};
use crate::error::ScheduleError;
use crate::models::{Process, Ticks, Timeline};

/// Runs Round Robin on a copy of `processes`.
///
/// `quantum` must be at least 1.
///
/// # Example
///
/// ```
/// use cpu_sched_sim::models::Process;
/// use cpu_sched_sim::scheduler::round_robin;
///
/// let processes = vec![Process::new(1, 0, 5), Process::new(2, 0, 3)];
/// let outcome = round_robin::run(&processes, 2).unwrap();
/// assert_eq!(outcome.completions(), vec![(1, 8), (2, 7)]);
/// ```
pub fn run(processes: &[Process], quantum: Ticks) -> Result<SimulationOutcome, ScheduleError> {
    simulate(processes, Algorithm::RoundRobin { quantum })
}

pub(crate) fn schedule(processes: &mut [Process], quantum: Ticks) -> Timeline {
    let order = arrival_order(processes);
    let mut timeline = Timeline::new();
    let mut now = 0;
    let mut done = 0;

    while done < processes.len() {
        let mut worked = false;

        for &i in &order {
            let p = &mut processes[i];
            if p.is_complete() || !p.has_arrived(now) {
                continue;
            }

            worked = true;
            let start = now;
            now += p.execute(start, quantum);
            timeline.record_run(p.pid, start, now);
            debug!(pid = p.pid, start, end = now, remaining = p.remaining, "rr slice");
            if p.is_complete() {
                done += 1;
            }
        }

        if !worked {
            let Some(next) = processes
                .iter()
                .filter(|p| !p.is_complete())
                .map(|p| p.arrival)
                .min()
            else {
                break;
            };
            timeline.record_idle(now, next);
            debug!(start = now, end = next, "cpu idle");
            now = next;
        }
    }

    timeline.finish()
}
