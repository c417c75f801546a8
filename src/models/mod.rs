//! Simulation domain models.
//!
//! Provides the process record and the timeline produced by a scheduling
//! run. Both are plain data: algorithms own a private copy of each.
//!
//! # Domain Mappings
//!
//! | cpu-sched-sim | Textbook term | Gantt chart |
//! |---------------|---------------|-------------|
//! | Process | Job / PCB | Row label |
//! | Slice | Dispatch interval | Block |
//! | Timeline | Execution trace | Whole chart |

mod process;
mod timeline;

pub use process::{Pid, Process, Ticks};
pub use timeline::{Occupant, Slice, Timeline};
