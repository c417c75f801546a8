//! Selection rules and rule engine for dispatching.
//!
//! A non-preemptive scheduler picks the next process from the ready set
//! by comparing candidates through a chain of rules. SJF and Priority
//! scheduling differ only in which chain they use.
//!
//! # Usage
//!
//! ```
//! use cpu_sched_sim::dispatching::{RuleEngine, TieBreaker};
//! use cpu_sched_sim::dispatching::rules;
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::ShortestBurst)
//!     .with_rule(rules::EarliestArrival)
//!     .with_final_tie_breaker(TieBreaker::ByPid);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin, Gagne, "Operating System Concepts", Ch. 5
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod engine;
pub mod rules;

pub use engine::{RuleEngine, TieBreaker};

use crate::models::Process;
use std::fmt::Debug;

/// Score returned by a selection rule.
///
/// Lower scores = selected first.
pub type RuleScore = i64;

/// A rule that ranks processes competing for the CPU.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules return smaller values for
/// processes that should run first.
pub trait SelectionRule: Send + Sync + Debug {
    /// Rule name (e.g., "SJF", "FIFO").
    fn name(&self) -> &'static str;

    /// Scores a process. Lower runs first.
    fn evaluate(&self, process: &Process) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
