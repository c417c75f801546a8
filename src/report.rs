//! Text rendering of scheduling results.
//!
//! Produces the console views of a run: a per-process metrics table with
//! averages, a block-style Gantt chart, and a side-by-side comparison of
//! several algorithms. Rendering is read-only over the outcome.

use std::fmt::Write;

use crate::models::{Occupant, Process, Ticks, Timeline};
use crate::scheduler::{Algorithm, ScheduleKpi, SimulationOutcome};

const BLOCK_WIDTH: usize = 6;

const TABLE_HEADERS: [&str; 8] = [
    "PID",
    "Priority",
    "Arrival",
    "Burst",
    "Completion",
    "Turnaround",
    "Waiting",
    "Response",
];

/// Renders a full run: title, Gantt chart and metrics table.
pub fn render_outcome(outcome: &SimulationOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n--- {} ---", outcome.algorithm);
    out.push_str(&render_gantt(&outcome.timeline));
    out.push_str(&render_table(&outcome.processes));
    out
}

/// Renders the timeline as labelled blocks over a tick axis.
///
/// ```text
/// +------+------+
/// | P1   | IDLE |
/// +------+------+
/// 0      5      8
/// ```
pub fn render_gantt(timeline: &Timeline) -> String {
    let mut out = String::from("\n--- Gantt Chart (Execution Order) ---\n");
    let slices = timeline.slices();
    if slices.is_empty() {
        out.push_str("(no execution)\n");
        return out;
    }

    let labels: Vec<String> = slices
        .iter()
        .map(|slice| match slice.occupant {
            Occupant::Idle => "IDLE".to_string(),
            Occupant::Process(pid) => format!("P{pid}"),
        })
        .collect();
    let start = slices[0].start.to_string();

    // Blocks widen so every label and tick stays inside its borders
    let block = labels
        .iter()
        .map(|label| label.len() + 1)
        .chain(slices.iter().map(|slice| slice.end.to_string().len()))
        .chain(std::iter::once(start.len()))
        .fold(BLOCK_WIDTH, usize::max);

    let border = format!("{}+\n", format!("+{}", "-".repeat(block)).repeat(slices.len()));

    out.push_str(&border);
    for label in &labels {
        let _ = write!(out, "| {label:<width$}", width = block - 1);
    }
    out.push_str("|\n");
    out.push_str(&border);

    // Each tick ends under the `+` that closes its block
    out.push_str(&start);
    for (i, slice) in slices.iter().enumerate() {
        let width = if i == 0 { block + 2 - start.len() } else { block + 1 };
        let _ = write!(out, "{:>width$}", slice.end);
    }
    out.push('\n');
    out
}

/// Renders the per-process metrics table followed by averages.
pub fn render_table(processes: &[Process]) -> String {
    let widths: Vec<usize> = TABLE_HEADERS.iter().map(|h| h.len() + 2).collect();
    let rule = "-".repeat(widths.iter().map(|w| w + 1).sum::<usize>() + 1);

    let mut out = String::new();
    let _ = writeln!(out, "\n{rule}");
    out.push_str(&table_row(&widths, TABLE_HEADERS.iter().map(|h| h.to_string())));
    let _ = writeln!(out, "{rule}");

    for p in processes {
        let cells = [
            format!("P{}", p.pid),
            p.priority.to_string(),
            p.arrival.to_string(),
            p.burst.to_string(),
            optional(p.completion),
            optional(p.turnaround),
            optional(p.waiting),
            optional(p.response()),
        ];
        out.push_str(&table_row(&widths, cells.into_iter()));
    }
    let _ = writeln!(out, "{rule}");

    let kpi = ScheduleKpi::calculate(processes, &Timeline::new());
    let _ = writeln!(out, "Average Turnaround Time: {:.2}", kpi.avg_turnaround);
    let _ = writeln!(out, "Average Waiting Time: {:.2}", kpi.avg_waiting);
    let _ = writeln!(out, "Average Response Time: {:.2}", kpi.avg_response);
    let _ = writeln!(out, "{rule}");
    out
}

/// Renders one line per outcome with its headline KPIs.
pub fn render_comparison(outcomes: &[SimulationOutcome]) -> String {
    let mut out = String::from("\n--- Algorithm Comparison ---\n");
    let _ = writeln!(
        out,
        "{:<14} {:>9} {:>9} {:>9} {:>9} {:>7} {:>9}",
        "Algorithm", "Avg TAT", "Avg WT", "Avg RT", "Makespan", "CPU %", "Switches"
    );
    for outcome in outcomes {
        let kpi = outcome.kpi();
        let name = match outcome.algorithm {
            Algorithm::RoundRobin { quantum } => format!("RR (q={quantum})"),
            other => other.short_name().to_string(),
        };
        let _ = writeln!(
            out,
            "{:<14} {:>9.2} {:>9.2} {:>9.2} {:>9} {:>7.1} {:>9}",
            name,
            kpi.avg_turnaround,
            kpi.avg_waiting,
            kpi.avg_response,
            kpi.makespan,
            kpi.cpu_utilization * 100.0,
            kpi.context_switches
        );
    }
    out
}

fn table_row(widths: &[usize], cells: impl Iterator<Item = String>) -> String {
    let mut row = String::from("|");
    for (cell, &width) in cells.zip(widths) {
        let _ = write!(row, "{cell:^width$}|");
    }
    row.push('\n');
    row
}

fn optional(value: Option<Ticks>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{compare, fcfs};

    #[test]
    fn test_gantt_layout() {
        let mut timeline = Timeline::new();
        timeline.record_run(1, 0, 5);
        timeline.record_idle(5, 7);
        timeline.record_run(2, 7, 12);

        let chart = render_gantt(&timeline);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[1], "--- Gantt Chart (Execution Order) ---");
        assert_eq!(lines[2], "+------+------+------+");
        assert_eq!(lines[3], "| P1   | IDLE | P2   |");
        assert_eq!(lines[4], "+------+------+------+");
        assert_eq!(lines[5], "0      5      7     12");
    }

    #[test]
    fn test_gantt_widens_for_large_ticks() {
        let mut timeline = Timeline::new();
        timeline.record_run(1, 0, 123_456_789);
        timeline.record_idle(123_456_789, 123_456_800);

        let chart = render_gantt(&timeline);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[2], "+---------+---------+");
        assert_eq!(lines[3], "| P1      | IDLE    |");
        assert_eq!(lines[5], "0 123456789 123456800");
        assert!(lines[2..=5].iter().all(|line| line.len() == lines[2].len()));
    }

    #[test]
    fn test_gantt_empty() {
        assert!(render_gantt(&Timeline::new()).contains("(no execution)"));
    }

    #[test]
    fn test_table_contents() {
        let outcome = fcfs::run(&[Process::new(1, 0, 5), Process::new(2, 1, 3)]).unwrap();
        let table = render_table(&outcome.processes);
        assert!(table.starts_with("\n-"));
        assert!(table.contains("| PID | Priority |"));
        assert!(table.contains("P2"));
        assert!(table.contains("Average Turnaround Time: 6.00"));
        assert!(table.contains("Average Waiting Time: 2.00"));
    }

    #[test]
    fn test_table_empty_has_zero_averages() {
        let table = render_table(&[]);
        assert!(table.contains("Average Waiting Time: 0.00"));
    }

    #[test]
    fn test_table_unfinished_shows_dash() {
        let table = render_table(&[Process::new(1, 0, 3)]);
        // Completion column is 12 wide
        assert!(table.contains("|     -      |"));
    }

    #[test]
    fn test_render_outcome_title() {
        let outcome = fcfs::run(&[Process::new(1, 0, 1)]).unwrap();
        let text = render_outcome(&outcome);
        assert!(text.contains("--- FCFS Scheduling ---"));
        assert!(text.contains("Gantt Chart"));
    }

    #[test]
    fn test_comparison_lists_every_algorithm() {
        let processes = vec![Process::new(1, 0, 5), Process::new(2, 1, 3)];
        let outcomes = compare(&processes, &Algorithm::all(2)).unwrap();
        let text = render_comparison(&outcomes);
        for name in ["FCFS", "SJF", "Priority", "RR (q=2)"] {
            assert!(text.contains(name), "missing {name}");
        }
    }
}
