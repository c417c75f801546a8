//! Rule engine for multi-key selection.
//!
//! Applies rules in sequence, consulting the next rule only on ties, then
//! falls back to a final tie-breaking strategy.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, SelectionRule};
use crate::models::Process;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Leave the tie in place. Sorting keeps input order.
    #[default]
    Stable,
    /// Lowest pid wins.
    ByPid,
}

/// A composable rule chain for process selection.
///
/// # Example
/// ```
/// use cpu_sched_sim::dispatching::RuleEngine;
/// use cpu_sched_sim::models::Process;
///
/// let processes = vec![Process::new(1, 0, 8), Process::new(2, 0, 3)];
/// let engine = RuleEngine::shortest_job_first();
/// assert_eq!(engine.select_best(&processes, 0..2), Some(1));
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn SelectionRule>>,
    tie_breaker: TieBreaker,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::Stable,
        }
    }

    /// Shortest burst, then earliest arrival, then lowest pid.
    pub fn shortest_job_first() -> Self {
        Self::new()
            .with_rule(rules::ShortestBurst)
            .with_rule(rules::EarliestArrival)
            .with_final_tie_breaker(TieBreaker::ByPid)
    }

    /// Lowest priority value, then earliest arrival, then lowest pid.
    pub fn priority() -> Self {
        Self::new()
            .with_rule(rules::LowestPriority)
            .with_rule(rules::EarliestArrival)
            .with_final_tie_breaker(TieBreaker::ByPid)
    }

    /// Earliest arrival; ties keep input order.
    pub fn arrival_order() -> Self {
        Self::new().with_rule(rules::EarliestArrival)
    }

    /// Appends a rule to the chain.
    pub fn with_rule<R: SelectionRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the rules in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Compares two processes through the rule chain.
    pub fn compare(&self, a: &Process, b: &Process) -> Ordering {
        for rule in &self.rules {
            match rule.evaluate(a).cmp(&rule.evaluate(b)) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }

        match self.tie_breaker {
            TieBreaker::Stable => Ordering::Equal,
            TieBreaker::ByPid => a.pid.cmp(&b.pid),
        }
    }

    /// Sorts process indices, best first. The sort is stable.
    pub fn sort_indices(&self, processes: &[Process]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..processes.len()).collect();
        indices.sort_by(|&a, &b| self.compare(&processes[a], &processes[b]));
        indices
    }

    /// Returns the best of the `candidates` indices.
    ///
    /// On a full tie the first candidate in iteration order wins.
    pub fn select_best(
        &self,
        processes: &[Process],
        candidates: impl IntoIterator<Item = usize>,
    ) -> Option<usize> {
        candidates.into_iter().reduce(|best, i| {
            if self.compare(&processes[i], &processes[best]) == Ordering::Less {
                i
            } else {
                best
            }
        })
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
