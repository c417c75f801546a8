use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use cpu_sched_sim::models::{Process, Ticks};
use cpu_sched_sim::workload::{self, ProcessSpec, RandomWorkload};
use cpu_sched_sim::{report, Algorithm, SimulationOutcome, SimulatorConfig};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: cpu-sched-sim [OPTIONS]

Without --workload or --random, process attributes are read interactively;
--algorithm, --compare and --json then do not apply.

Options:
  --workload FILE     JSON array of {arrival, burst, priority}
  --random N          generate N random processes
  --seed S            seed for --random (default 0)
  --config FILE       JSON simulator config
  --algorithm NAME    fcfs | sjf | priority | rr
  --quantum Q         round robin time quantum
  --compare           run every configured algorithm and compare
  --json              print outcomes as JSON
  -h, --help          show this help";

#[derive(Debug, Default)]
struct Options {
    workload: Option<PathBuf>,
    random: Option<usize>,
    seed: u64,
    config: Option<PathBuf>,
    algorithm: Option<String>,
    quantum: Option<Ticks>,
    compare: bool,
    json: bool,
    help: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options> {
    let mut opts = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .with_context(|| format!("{flag} requires a value"))
        };
        match arg.as_str() {
            "--workload" => opts.workload = Some(value("--workload")?.into()),
            "--random" => {
                opts.random = Some(
                    value("--random")?
                        .parse()
                        .context("--random expects a count")?,
                )
            }
            "--seed" => {
                opts.seed = value("--seed")?
                    .parse()
                    .context("--seed expects an integer")?
            }
            "--config" => opts.config = Some(value("--config")?.into()),
            "--algorithm" => opts.algorithm = Some(value("--algorithm")?),
            "--quantum" => {
                opts.quantum = Some(
                    value("--quantum")?
                        .parse()
                        .context("--quantum expects an integer")?,
                )
            }
            "--compare" => opts.compare = true,
            "--json" => opts.json = true,
            "-h" | "--help" => opts.help = true,
            other => bail!("unknown argument: {other}\n\n{USAGE}"),
        }
    }

    if opts.workload.is_some() && opts.random.is_some() {
        bail!("--workload and --random are mutually exclusive");
    }
    let has_input = opts.workload.is_some() || opts.random.is_some();
    if !opts.help && !has_input && (opts.algorithm.is_some() || opts.compare || opts.json) {
        bail!("--algorithm, --compare and --json need --workload or --random");
    }
    Ok(opts)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let opts = parse_args(std::env::args().skip(1))?;
    if opts.help {
        println!("{USAGE}");
        return Ok(());
    }

    let mut config = match &opts.config {
        Some(path) => SimulatorConfig::load(path)?,
        None => SimulatorConfig::default(),
    };
    if let Some(quantum) = opts.quantum {
        if quantum < 1 {
            bail!("time quantum must be at least 1, got {quantum}");
        }
        config = config.with_quantum(quantum);
    }

    let processes = if let Some(path) = &opts.workload {
        workload::load(path)?
    } else if let Some(count) = opts.random {
        RandomWorkload::new(count, opts.seed).generate()
    } else {
        let stdin = io::stdin();
        let stdout = io::stdout();
        return interactive(&mut stdin.lock(), &mut stdout.lock(), &config);
    };

    if let Some(name) = &opts.algorithm {
        let algorithm = Algorithm::from_name(name, config.quantum)
            .with_context(|| format!("unknown algorithm: {name}"))?;
        config = config.with_algorithms(vec![algorithm]);
    }
    let outcomes = config.simulate_all(&processes)?;

    let mut stdout = io::stdout().lock();
    if opts.json {
        serde_json::to_writer_pretty(&mut stdout, &outcomes)?;
        writeln!(stdout)?;
    } else {
        print_outcomes(&mut stdout, &outcomes, opts.compare || opts.algorithm.is_none())?;
    }
    Ok(())
}

fn print_outcomes(
    out: &mut impl Write,
    outcomes: &[SimulationOutcome],
    summary: bool,
) -> Result<()> {
    for outcome in outcomes {
        write!(out, "{}", report::render_outcome(outcome))?;
    }
    if summary && outcomes.len() > 1 {
        write!(out, "{}", report::render_comparison(outcomes))?;
    }
    Ok(())
}

/// Reads one trimmed line, `None` on end of input.
fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompts until a parsable value arrives; `None` on end of input.
fn prompt<T>(
    input: &mut impl BufRead,
    out: &mut impl Write,
    message: &str,
    parse: impl Fn(&str) -> Result<T>,
) -> Result<Option<T>> {
    loop {
        write!(out, "{message}")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match parse(&line) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => writeln!(out, "Invalid input: {e:#}")?,
        }
    }
}

fn interactive(
    input: &mut impl BufRead,
    out: &mut impl Write,
    config: &SimulatorConfig,
) -> Result<()> {
    writeln!(out, "OS Simulator Project: CPU Scheduling")?;

    let count = prompt(input, out, "Enter number of processes: ", |s| {
        let n: usize = s.parse().context("expected a positive count")?;
        if n == 0 || n > config.max_processes {
            bail!("count must be between 1 and {}", config.max_processes);
        }
        Ok(n)
    })?;
    let Some(count) = count else {
        return Ok(());
    };

    let mut specs = Vec::with_capacity(count);
    for i in 1..=count {
        let message = format!("Process {i} [Arrival Time, Burst Time, Priority]: ");
        let spec = prompt(input, out, &message, |s| {
            let spec = ProcessSpec::parse_line(s)?;
            if spec.arrival < 0 || spec.burst <= 0 {
                bail!("arrival must be >= 0 and burst > 0");
            }
            Ok(spec)
        })?;
        match spec {
            Some(spec) => specs.push(spec),
            None => return Ok(()),
        }
    }
    let processes: Vec<Process> = workload::from_specs(&specs);

    loop {
        writeln!(out, "\nSelect Algorithm:")?;
        writeln!(out, "1. FCFS")?;
        writeln!(out, "2. SJF (Non-Preemptive)")?;
        writeln!(out, "3. Priority (Non-Preemptive)")?;
        writeln!(out, "4. Round Robin")?;
        writeln!(out, "5. Exit")?;
        writeln!(out, "6. Compare All")?;
        write!(out, "Choice: ")?;
        out.flush()?;

        let Some(choice) = read_line(input)? else {
            return Ok(());
        };
        let algorithm = match choice.as_str() {
            "1" => Algorithm::Fcfs,
            "2" => Algorithm::Sjf,
            "3" => Algorithm::Priority,
            "4" => {
                let quantum = prompt(input, out, "Enter Time Quantum: ", |s| {
                    let q: Ticks = s.parse().context("expected an integer")?;
                    if q < 1 {
                        bail!("quantum must be at least 1");
                    }
                    Ok(q)
                })?;
                match quantum {
                    Some(quantum) => Algorithm::RoundRobin { quantum },
                    None => return Ok(()),
                }
            }
            "5" => return Ok(()),
            "6" => {
                let outcomes = config.simulate_all(&processes)?;
                print_outcomes(out, &outcomes, true)?;
                continue;
            }
            _ => {
                writeln!(out, "Invalid choice!")?;
                continue;
            }
        };

        match config.simulate(&processes, algorithm) {
            Ok(outcome) => write!(out, "{}", report::render_outcome(&outcome))?,
            Err(e) => writeln!(out, "Cannot schedule: {e}")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run_interactive(script: &str) -> String {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        interactive(&mut input, &mut output, &SimulatorConfig::default()).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_parse_args() {
        let opts = parse_args(args(&[
            "--random",
            "5",
            "--seed",
            "3",
            "--algorithm",
            "rr",
            "--quantum",
            "4",
        ]))
        .unwrap();
        assert_eq!(opts.random, Some(5));
        assert_eq!(opts.seed, 3);
        assert_eq!(opts.algorithm.as_deref(), Some("rr"));
        assert_eq!(opts.quantum, Some(4));
        assert!(!opts.json);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(args(&["--bogus"])).is_err());
        assert!(parse_args(args(&["--quantum"])).is_err());
        assert!(parse_args(args(&["--quantum", "x"])).is_err());
        assert!(parse_args(args(&["--workload", "a.json", "--random", "3"])).is_err());
    }

    #[test]
    fn test_run_flags_need_input_source() {
        for flag in [&["--algorithm", "sjf"][..], &["--compare"][..], &["--json"][..]] {
            let err = parse_args(args(flag)).unwrap_err();
            assert!(err.to_string().contains("need --workload or --random"));
        }
        assert!(parse_args(args(&["--json", "--random", "3"])).is_ok());
        assert!(parse_args(args(&["--compare", "--workload", "a.json"])).is_ok());
        assert!(parse_args(args(&["--quantum", "3"])).is_ok());
    }

    #[test]
    fn test_interactive_fcfs_then_exit() {
        let text = run_interactive("2\n0 5 1\n1 3 2\n1\n5\n");
        assert!(text.contains("--- FCFS Scheduling ---"));
        assert!(text.contains("| P1   | P2   |"));
        assert!(text.contains("Average Waiting Time: 2.00"));
    }

    #[test]
    fn test_interactive_round_robin() {
        let text = run_interactive("2\n0 5 0\n0 3 0\n4\n2\n5\n");
        assert!(text.contains("Round Robin (Quantum: 2)"));
        assert!(text.contains("| P1   | P2   | P1   | P2   | P1   |"));
    }

    #[test]
    fn test_interactive_reprompts_bad_input() {
        let text = run_interactive("zero\n1\n0 0 0\n0 2 0\n9\n5\n");
        assert!(text.contains("Invalid input"));
        assert!(text.contains("Invalid choice!"));
    }

    #[test]
    fn test_interactive_rejects_zero_quantum() {
        let text = run_interactive("1\n0 2 0\n4\n0\n1\n5\n");
        assert!(text.contains("quantum must be at least 1"));
        assert!(text.contains("Round Robin (Quantum: 1)"));
    }

    #[test]
    fn test_interactive_compare_all() {
        let text = run_interactive("2\n0 5 1\n1 3 0\n6\n");
        assert!(text.contains("Algorithm Comparison"));
    }

    #[test]
    fn test_interactive_eof() {
        let text = run_interactive("");
        assert!(text.contains("Enter number of processes"));
    }
}
