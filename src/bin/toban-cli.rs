#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use toban::{io, verify, DayGroups, Mark, ScheduleError, SolveConfig, Solver, Worksheet};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Monthly on-call duty roster CLI
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Enable logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Names exempt from the day→next-night rest rule (repeatable)
    #[arg(long, global = true)]
    exempt: Vec<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve the monthly assignment and write the output grid
    Solve {
        /// Input worksheet table (CSV)
        #[arg(long)]
        input: String,
        /// Output assignment grid (CSV)
        #[arg(long)]
        out: String,
        /// Optional JSON solve report
        #[arg(long)]
        report: Option<String>,
        /// Backend log level (0 = silent)
        #[arg(long, default_value_t = 0)]
        solver_log: u32,
        /// Disable the LNS improvement heuristics
        #[arg(long)]
        no_lns: bool,
    },

    /// Verify an existing assignment grid against the hard constraints
    Check {
        /// Input worksheet table (CSV)
        #[arg(long)]
        input: String,
        /// Assignment grid to verify (CSV)
        #[arg(long)]
        grid: String,
    },

    /// Print a summary of the decoded worksheet
    Inspect {
        /// Input worksheet table (CSV)
        #[arg(long)]
        input: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let code = match cli.cmd {
        Commands::Solve {
            input,
            out,
            report,
            solver_log,
            no_lns,
        } => {
            let sheet = load_sheet(&input, &cli.exempt)?;
            let config = SolveConfig {
                lns_only: !no_lns,
                log_level: solver_log,
            };
            let solver = Solver::new(&sheet, config);
            match solver.solve() {
                Ok(solution) => {
                    io::write_grid(&out, &solution.to_grid(&sheet))
                        .with_context(|| format!("writing {out}"))?;
                    if let Some(path) = report {
                        let report = io::Report::new(&solution, chrono::Utc::now());
                        io::export_report_json(&path, &report)
                            .with_context(|| format!("writing {path}"))?;
                    }
                    println!(
                        "status {:?} | covered {} | preference score {}",
                        solution.status, solution.covered_count, solution.pref_sum
                    );
                    for (p, person) in sheet.people.iter().enumerate() {
                        let duties: Vec<String> = solution.marks[p]
                            .iter()
                            .enumerate()
                            .filter(|(_, m)| m.is_worked())
                            .map(|(j, m)| {
                                let slot = &sheet.slots[sheet.first_current + j];
                                if *m == Mark::Rotation {
                                    format!("{}(輪番)", slot.day_number)
                                } else {
                                    slot.day_number.to_string()
                                }
                            })
                            .collect();
                        println!("{} | {}", person.name, duties.join(" "));
                    }
                    0
                }
                Err(ScheduleError::Infeasible) => {
                    eprintln!("最適解が見つかりませんでした");
                    1
                }
                Err(err) => return Err(err.into()),
            }
        }

        Commands::Check { input, grid } => {
            let sheet = load_sheet(&input, &cli.exempt)?;
            let days = DayGroups::build(&sheet);
            let marks = io::read_grid(&grid, &sheet).with_context(|| format!("reading {grid}"))?;
            let violations = verify(&sheet, &days, &marks);
            if violations.is_empty() {
                println!("OK: no violations");
                0
            } else {
                eprintln!("Found {} violation(s)", violations.len());
                for v in &violations {
                    eprintln!("{v}");
                }
                // code 2 = grid present but invalid
                2
            }
        }

        Commands::Inspect { input } => {
            let sheet = load_sheet(&input, &cli.exempt)?;
            let days = DayGroups::build(&sheet);
            println!(
                "{} people | {} slots ({} carry-over) | {} day groups",
                sheet.people.len(),
                sheet.slots.len(),
                sheet.first_current,
                days.day_count()
            );
            for person in &sheet.people {
                let tag = if person.exempt_day_to_night {
                    " (day→night exempt)"
                } else {
                    ""
                };
                println!("{} | {} shifts{}", person.name, person.required, tag);
            }
            0
        }
    };

    std::process::exit(code);
}

fn load_sheet(input: &str, exempt: &[String]) -> Result<Worksheet> {
    let table = io::read_table(input).with_context(|| format!("reading {input}"))?;
    let sheet = Worksheet::from_table(&table, exempt)?;
    Ok(sheet)
}
