//! Single-CPU process scheduling simulator.
//!
//! Computes what would happen to a static, fully known process set under
//! four classical disciplines: FCFS, non-preemptive SJF, non-preemptive
//! Priority and Round Robin. All time is simulated as integer ticks.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `Timeline`, `Slice`, `Occupant`
//! - **`dispatching`**: Selection rules and the rule engine used for SJF/Priority
//! - **`scheduler`**: The four algorithms, `simulate`/`compare`, and `ScheduleKpi`
//! - **`validation`**: Input integrity checks (empty sets, bursts, pids, quantum)
//! - **`report`**: Metrics tables and block-style Gantt charts
//! - **`workload`**: JSON, line-based and seeded random process sets
//! - **`config`**: `SimulatorConfig` (quantum, process limit, algorithm list)
//!
//! # Example
//!
//! ```
//! use cpu_sched_sim::models::Process;
//! use cpu_sched_sim::scheduler::{simulate, Algorithm};
//!
//! let processes = vec![Process::new(1, 0, 5), Process::new(2, 0, 3)];
//! let outcome = simulate(&processes, Algorithm::RoundRobin { quantum: 2 }).unwrap();
//! assert_eq!(outcome.timeline.makespan(), 8);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin, Gagne, "Operating System Concepts", Ch. 5
//! - Tanenbaum, "Modern Operating Systems", Ch. 2.4

pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use config::SimulatorConfig;
pub use error::ScheduleError;
pub use models::{Process, Timeline};
pub use scheduler::{compare, simulate, Algorithm, SimulationOutcome};
