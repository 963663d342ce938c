//! Nodal - DC nodal analysis driver
//!
//! Reads a netlist, solves it, and prints node voltages, branch currents
//! and the KCL check.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=debug nodal circuit.cir --precision 4
//! ```

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use nodal_core::{
    analysis::{analyze, Analysis},
    circuit::validate_circuit,
    error::Result,
    netlist,
    solver::{SolverConfig, DEFAULT_KCL_TOLERANCE, DEFAULT_PIVOT_TOLERANCE},
};

/// DC nodal analysis of resistive circuits
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the netlist file
    #[arg(value_name = "CIRCUIT_FILE")]
    circuit_file: PathBuf,

    /// Decimal places for voltages and currents
    #[arg(short, long, default_value_t = 3)]
    precision: usize,

    /// Relative KCL tolerance
    #[arg(short, long, default_value_t = DEFAULT_KCL_TOLERANCE)]
    tolerance: f64,

    /// Relative pivot threshold for singularity detection
    #[arg(long, default_value_t = DEFAULT_PIVOT_TOLERANCE)]
    pivot_tolerance: f64,
}

fn main() -> ExitCode {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Analysis failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    // Parse the netlist
    let circuit = netlist::parse_file(&args.circuit_file)?;

    // Validate
    validate_circuit(&circuit)?;

    let config = SolverConfig::new()
        .with_kcl_tolerance(args.tolerance)
        .with_pivot_tolerance(args.pivot_tolerance);
    let analysis = analyze(&circuit, &config)?;

    print_report(&analysis, args);
    Ok(())
}

fn print_report(analysis: &Analysis, args: &Args) {
    let p = args.precision;

    println!("Voltages:");
    for (node, v) in analysis.solution.iter() {
        println!("V{} = {:.*}", node, p, v);
    }

    println!("\nCurrents:");
    for b in &analysis.branch_currents {
        println!("I {} to {} = {:.*}", b.n1, b.n2, p, b.current);
    }

    println!("\nKCL Check:");
    for entry in analysis.kcl.entries() {
        let status = if entry.is_balanced(args.tolerance) { "ok" } else { "FAIL" };
        println!("Node {} KCL Sum: {:.3e} [{}]", entry.node, entry.net_current, status);
    }
}
