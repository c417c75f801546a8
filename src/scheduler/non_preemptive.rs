//! Non-preemptive dynamic selection (SJF and Priority).
//!
//! # Algorithm
//!
//! 1. The ready set is every unfinished process with `arrival <= now`.
//! 2. If it is empty, idle until the earliest pending arrival.
//! 3. Otherwise pick the best ready process through the rule engine and
//!    run it to completion.
//! 4. Repeat until every process has completed.
//!
//! `now` strictly increases each iteration, so the loop terminates after at
//! most `2n` iterations.
//!
//! # Complexity
//! O(n^2) for n processes.

use tracing::debug;

use super::{simulate, Algorithm, SimulationOutcome};
use crate::dispatching::RuleEngine;
use crate::error::ScheduleError;
use crate::models::{Process, Timeline};

/// Runs Shortest-Job-First on a copy of `processes`.
///
/// Ties: earliest arrival, then lowest pid.
pub fn run_sjf(processes: &[Process]) -> Result<SimulationOutcome, ScheduleError> {
    simulate(processes, Algorithm::Sjf)
}

/// Runs non-preemptive Priority scheduling on a copy of `processes`.
///
/// Lower priority value runs first. Ties: earliest arrival, then lowest pid.
pub fn run_priority(processes: &[Process]) -> Result<SimulationOutcome, ScheduleError> {
    simulate(processes, Algorithm::Priority)
}

pub(crate) fn schedule(processes: &mut [Process], engine: &RuleEngine) -> Timeline {
    let mut timeline = Timeline::new();
    let mut now = 0;
    let mut done = 0;

    while done < processes.len() {
        let ready = (0..processes.len())
            .filter(|&i| !processes[i].is_complete() && processes[i].has_arrived(now));

        match engine.select_best(processes, ready) {
            Some(i) => {
                let p = &mut processes[i];
                let start = now;
                now += p.execute(start, p.remaining);
                timeline.record_run(p.pid, start, now);
                done += 1;
                debug!(pid = p.pid, start, end = now, rules = ?engine.rule_names(), "dispatch");
            }
            None => {
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
    }

    timeline.finish()
}
