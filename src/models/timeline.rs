//! Timeline (Gantt) model.
//!
//! A timeline is the ordered record of what the CPU did during a run:
//! contiguous slices that are either idle or executing one process.
//!
//! # Invariants
//! Once finished, slices cover `[0, makespan)` with no gaps or overlaps,
//! every slice has `end > start`, and no two adjacent slices are idle.

use serde::{Deserialize, Serialize};

use super::{Pid, Ticks};

/// What occupied the CPU during a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupant {
    /// No process was eligible.
    Idle,
    /// The process with this pid was executing.
    Process(Pid),
}

/// A contiguous execution or idle interval `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    /// Who held the CPU.
    pub occupant: Occupant,
    /// Start tick (inclusive).
    pub start: Ticks,
    /// End tick (exclusive).
    pub end: Ticks,
}

impl Slice {
    /// Creates an execution slice.
    pub fn run(pid: Pid, start: Ticks, end: Ticks) -> Self {
        Self {
            occupant: Occupant::Process(pid),
            start,
            end,
        }
    }

    /// Creates an idle slice.
    pub fn idle(start: Ticks, end: Ticks) -> Self {
        Self {
            occupant: Occupant::Idle,
            start,
            end,
        }
    }

    /// Slice length in ticks.
    #[inline]
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.occupant == Occupant::Idle
    }

    /// The executing pid, `None` for idle slices.
    pub fn pid(&self) -> Option<Pid> {
        match self.occupant {
            Occupant::Process(pid) => Some(pid),
            Occupant::Idle => None,
        }
    }
}

/// Ordered sequence of slices produced by one scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    slices: Vec<Slice>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an execution slice. Zero-length slices are dropped.
    pub fn record_run(&mut self, pid: Pid, start: Ticks, end: Ticks) {
        self.push(Slice::run(pid, start, end));
    }

    /// Appends an idle slice. Zero-length slices are dropped.
    pub fn record_idle(&mut self, start: Ticks, end: Ticks) {
        self.push(Slice::idle(start, end));
    }

    fn push(&mut self, slice: Slice) {
        if slice.end > slice.start {
            self.slices.push(slice);
        }
    }

    /// Merges runs of adjacent idle slices into one.
    pub fn coalesce(&mut self) {
        let mut merged: Vec<Slice> = Vec::with_capacity(self.slices.len());
        for slice in self.slices.drain(..) {
            match merged.last_mut() {
                Some(last) if last.is_idle() && slice.is_idle() && last.end == slice.start => {
                    last.end = slice.end;
                }
                _ => merged.push(slice),
            }
        }
        self.slices = merged;
    }

    /// Seals the timeline at the end of a run.
    pub fn finish(mut self) -> Self {
        self.coalesce();
        self
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Number of slices.
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Makespan: end of the last slice.
    pub fn makespan(&self) -> Ticks {
        self.slices.last().map(|s| s.end).unwrap_or(0)
    }

    /// Total ticks the CPU spent idle.
    pub fn idle_time(&self) -> Ticks {
        self.slices
            .iter()
            .filter(|s| s.is_idle())
            .map(Slice::duration)
            .sum()
    }

    /// Total ticks the CPU spent executing processes.
    pub fn busy_time(&self) -> Ticks {
        self.makespan() - self.idle_time()
    }

    /// Ticks executed on behalf of `pid`.
    pub fn executed_for(&self, pid: Pid) -> Ticks {
        self.slices_for(pid).map(Slice::duration).sum()
    }

    /// Execution slices belonging to `pid`, in time order.
    pub fn slices_for(&self, pid: Pid) -> impl Iterator<Item = &Slice> {
        self.slices
            .iter()
            .filter(move |s| s.occupant == Occupant::Process(pid))
    }

    /// Number of times the CPU switched from one process to a different one.
    ///
    /// Idle gaps between two different processes count as one switch.
    pub fn context_switches(&self) -> usize {
        let mut switches = 0;
        let mut last: Option<Pid> = None;
        for pid in self.slices.iter().filter_map(Slice::pid) {
            if last.is_some_and(|prev| prev != pid) {
                switches += 1;
            }
            last = Some(pid);
        }
        switches
    }

    /// Whether slices start at 0, touch end-to-start, are non-empty and have
    /// no two consecutive idle entries.
    pub fn is_contiguous(&self) -> bool {
        let mut cursor = 0;
        let mut prev_idle = false;
        for slice in &self.slices {
            if slice.start != cursor || slice.end <= slice.start || (prev_idle && slice.is_idle()) {
                return false;
            }
            cursor = slice.end;
            prev_idle = slice.is_idle();
        }
        true
    }
}
