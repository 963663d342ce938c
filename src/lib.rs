//! # Nodal Core
//!
//! DC nodal analysis of resistive circuits driven by current sources.
//!
//! This library provides:
//! - An incremental circuit builder with an ordered node registry
//! - Conductance matrix assembly by stamping
//! - A dense LU solver that reports singular networks explicitly
//! - Branch current derivation and Kirchhoff Current Law checks
//!
//! ## Architecture
//!
//! - [`circuit`] - Circuit model, node indexing and topology checks
//! - [`components`] - Resistor and current source records
//! - [`solver`] - Matrix assembly and the linear solve
//! - [`analysis`] - Branch currents, KCL report and the one-shot pipeline
//! - [`netlist`] - SPICE-like text reader
//!
//! ## Usage
//!
//! ```rust
//! use nodal_core::Circuit;
//!
//! let mut c = Circuit::new();
//! c.add_resistor("1", "0", 10.0)?;
//! c.add_resistor("2", "0", 5.0)?;
//! c.add_resistor("1", "2", 15.0)?;
//! c.add_current_source("2", 2.0)?;
//!
//! let volts = c.solve()?;
//! assert_eq!(volts.get("0"), Some(0.0));
//!
//! let kcl = c.validate_kcl(&volts)?;
//! assert!(kcl.is_balanced(nodal_core::solver::DEFAULT_KCL_TOLERANCE));
//! # Ok::<(), nodal_core::NodalError>(())
//! ```
//!
//! ### CLI
//!
//! ```bash
//! nodal circuit.cir --precision 3
//! ```
//!
//! ## Sign Convention
//!
//! Each non-ground node contributes one row of Y·V = I. Resistor currents in
//! a row are counted as leaving the node, and a current source enters the
//! right-hand side with its stated value negated.

pub mod analysis;
pub mod circuit;
pub mod components;
pub mod error;
pub mod netlist;
pub mod solver;

// Re-export main types for convenience
pub use analysis::{analyze, Analysis, Analyzer, BranchCurrent, KclReport};
pub use circuit::Circuit;
pub use error::{NodalError, Result};
pub use solver::{Solver, SolverConfig, VoltageSolution};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmCircuit;
