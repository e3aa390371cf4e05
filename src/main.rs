// Copyright (c) 2026, Chad Hogan
// All rights reserved.
//
// This source code is licensed under the BSD-3-Clause license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use okada_disloc::core::{MechanismTerms, SourceKind};
use okada_disloc::io;
use okada_disloc::scheduler::{DislocSolver, ProgressInfo};

#[derive(Parser)]
#[command(
    name = "disloc",
    about = "Surface displacement and strain from Okada point and rectangular dislocations"
)]
struct Cli {
    /// Scenario file (disloc text format, or .json)
    input: PathBuf,

    /// Output file path (.npy, .json, or anything else for the text table)
    #[arg(default_value = "disloc.output")]
    output: PathBuf,

    /// Number of Rayon worker threads
    #[arg(long)]
    threads: Option<usize>,

    /// Accumulate on one thread, sources outer and points inner
    #[arg(long)]
    serial: bool,

    /// Print progress to stderr (see --progress-interval)
    #[arg(long)]
    progress: bool,

    /// Progress reporting interval in milliseconds (used with --progress)
    #[arg(long, default_value = "500")]
    progress_interval: u64,

    /// Print the per-mechanism local-frame terms of every source at the first point
    #[arg(long)]
    breakdown: bool,

    /// Default log filter; RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn print_breakdown(index: usize, kind: SourceKind, local: [f64; 2], terms: &MechanismTerms) {
    let kind = match kind {
        SourceKind::PointSource => "point source",
        SourceKind::FiniteFault => "finite fault",
    };
    println!("-------------------------");
    println!("case {}       {}", index + 1, kind);
    println!("-------------------------");
    println!("x = {:.3};  y = {:.3}\n", local[0], local[1]);

    let rows = [
        ("strike", &terms.displacement.strike, &terms.strain.strike, &terms.tilt.strike),
        ("dip", &terms.displacement.dip, &terms.strain.dip, &terms.tilt.dip),
        ("tensile", &terms.displacement.tensile, &terms.strain.tensile, &terms.tilt.tensile),
    ];

    println!("                u1             u2             u3\n");
    for (name, u, _, _) in &rows {
        println!("{:<10}  {:>12.3e}   {:>12.3e}   {:>12.3e}", name, u[0], u[1], u[2]);
    }
    println!("\n                e11            e12            e21            e22\n");
    for (name, _, e, _) in &rows {
        println!(
            "{:<10}  {:>12.3e}   {:>12.3e}   {:>12.3e}   {:>12.3e}",
            name, e.e11, e.e12, e.e21, e.e22
        );
    }
    println!("\n                e31            e32\n");
    for (name, _, _, t) in &rows {
        println!("{:<10}  {:>12.3e}   {:>12.3e}", name, t[0], t[1]);
    }
    println!();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .context("invalid --log-level filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let scenario = io::load_scenario(&cli.input)
        .with_context(|| format!("failed to read scenario from {}", cli.input.display()))?;

    let mut solver = DislocSolver::from_scenario(&scenario)
        .with_context(|| format!("invalid scenario in {}", cli.input.display()))?
        .with_progress_interval(Duration::from_millis(cli.progress_interval));
    if let Some(threads) = cli.threads {
        solver = solver.with_threads(threads);
    }

    if cli.breakdown {
        for (index, source) in solver.sources().iter().enumerate() {
            if let Some((local, terms)) = solver.breakdown(index, 0) {
                print_breakdown(index, source.kind, local, &terms);
            }
        }
    }

    let results = if cli.serial {
        solver.solve_serial()
    } else {
        let progress_cb: Option<Box<dyn Fn(ProgressInfo) + Sync>> = if cli.progress {
            Some(Box::new(|info: ProgressInfo| {
                eprintln!(
                    "[{:.1}s] points={}/{}",
                    info.elapsed.as_secs_f64(),
                    info.points_done,
                    info.total_points,
                );
            }))
        } else {
            None
        };
        solver.solve(progress_cb.as_deref())?
    };

    io::save_results(&scenario, &results, &cli.output)
        .with_context(|| format!("failed to write results to {}", cli.output.display()))?;

    Ok(())
}
