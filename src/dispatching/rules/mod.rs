//! Built-in selection rules.
//!
//! # Score Convention
//! All rules return lower scores for processes that should run first.

use super::{RuleScore, SelectionRule};
use crate::models::Process;

/// Shortest burst first.
///
/// Uses the full burst, which equals the remaining work for a process that
/// has not started. Minimizes average waiting time on a single CPU.
#[derive(Debug, Clone, Copy)]
pub struct ShortestBurst;

impl SelectionRule for ShortestBurst {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn evaluate(&self, process: &Process) -> RuleScore {
        process.burst
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}

/// Lowest priority value first.
#[derive(Debug, Clone, Copy)]
pub struct LowestPriority;

impl SelectionRule for LowestPriority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, process: &Process) -> RuleScore {
        RuleScore::from(process.priority)
    }

    fn description(&self) -> &'static str {
        "Lowest Priority Number"
    }
}

/// First in, first out by arrival tick.
#[derive(Debug, Clone, Copy)]
pub struct EarliestArrival;

impl SelectionRule for EarliestArrival {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn evaluate(&self, process: &Process) -> RuleScore {
        process.arrival
    }

    fn description(&self) -> &'static str {
        "First In, First Out"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortest_burst() {
        let short = Process::new(1, 0, 2);
        let long = Process::new(2, 0, 9);
        assert!(ShortestBurst.evaluate(&short) < ShortestBurst.evaluate(&long));
    }

    #[test]
    fn test_lowest_priority() {
        let urgent = Process::new(1, 0, 5).with_priority(-3);
        let relaxed = Process::new(2, 0, 5).with_priority(4);
        assert!(LowestPriority.evaluate(&urgent) < LowestPriority.evaluate(&relaxed));
    }

    #[test]
    fn test_earliest_arrival() {
        let first = Process::new(2, 1, 5);
        let second = Process::new(1, 3, 5);
        assert!(EarliestArrival.evaluate(&first) < EarliestArrival.evaluate(&second));
    }

    #[test]
    fn test_names() {
        assert_eq!(ShortestBurst.name(), "SJF");
        assert_eq!(LowestPriority.description(), "Lowest Priority Number");
        assert_eq!(EarliestArrival.name(), "FIFO");
    }
}
