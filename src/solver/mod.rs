//! Nodal analysis solver.
//!
//! This module provides the numerical engine for DC operating points.
//!
//! ## Nodal Analysis
//!
//! With ground as the voltage reference, every other node contributes one
//! equation to the system Y·v = i where:
//! - Y is the conductance matrix, stamped from each resistor
//! - v is the vector of node voltages
//! - i is the current vector, stamped (negated) from each current source
//!
//! A resistor of conductance G between nodes a and b stamps:
//! ```text
//!        a     b
//!   a [ +G    -G ]
//!   b [ -G    +G ]
//! ```
//! and only the diagonal entry when the other terminal is ground.

mod linear;
mod mna;
mod solution;

pub use linear::{LuDecomposition, SingularPivot};
pub use mna::{stamp_components, NodalSystem};
pub use solution::VoltageSolution;

use crate::circuit::Circuit;
use crate::error::{NodalError, Result};

/// Relative pivot threshold below which the matrix is treated as singular.
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-12;

/// Relative tolerance used when judging the KCL balance of a solution.
pub const DEFAULT_KCL_TOLERANCE: f64 = 1e-9;

/// Configuration for the solver.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Relative pivot threshold for singularity detection.
    pub pivot_tolerance: f64,
    /// Relative tolerance for the KCL check.
    pub kcl_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
            kcl_tolerance: DEFAULT_KCL_TOLERANCE,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the relative pivot threshold.
    ///
    /// Pivots smaller than this fraction of the largest conductance in
    /// their column are treated as zero.
    pub fn with_pivot_tolerance(mut self, tolerance: f64) -> Self {
        self.pivot_tolerance = tolerance;
        self
    }

    /// Set the relative KCL tolerance.
    pub fn with_kcl_tolerance(mut self, tolerance: f64) -> Self {
        self.kcl_tolerance = tolerance;
        self
    }
}

/// Dense direct solver for nodal systems.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Create a solver with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver with custom configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Get the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Assemble and solve a circuit for its node voltages.
    pub fn solve(&self, circuit: &Circuit) -> Result<VoltageSolution> {
        let system = NodalSystem::assemble(circuit);
        self.solve_system(&system)
    }

    /// Solve an assembled system.
    ///
    /// Fails with `SingularSystem` when Y has no unique solution, naming
    /// the node whose column ran out of pivots.
    pub fn solve_system(&self, system: &NodalSystem) -> Result<VoltageSolution> {
        let index = system.node_index();
        let lu = LuDecomposition::factor(system.matrix(), system.size(), self.config.pivot_tolerance)
            .map_err(|pivot| {
                let node = index.name_of(pivot.column).unwrap_or_default().to_string();
                tracing::debug!(%node, magnitude = pivot.magnitude, "no usable pivot");
                NodalError::SingularSystem { node }
            })?;

        let x = lu.solve(system.rhs())?;
        tracing::debug!(nodes = x.len(), "solved nodal system");

        Ok(VoltageSolution::from_voltages(
            index.iter().map(|(i, name)| (name.to_string(), x[i])),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_resistor_to_ground() {
        let mut c = Circuit::new();
        c.add_resistor("1", "0", 1000.0).unwrap();
        c.add_current_source("1", -0.001).unwrap();

        let v = Solver::new().solve(&c).unwrap();
        assert_relative_eq!(v.get("1").unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_isolated_node_is_singular() {
        let mut c = Circuit::new();
        c.add_resistor("1", "0", 10.0).unwrap();
        c.add_node("2");

        let err = Solver::new().solve(&c).unwrap_err();
        assert!(matches!(err, NodalError::SingularSystem { ref node } if node == "2"));
    }

    #[test]
    fn test_ungrounded_island_is_singular() {
        let mut c = Circuit::new();
        c.add_resistor("1", "0", 10.0).unwrap();
        c.add_resistor("a", "b", 10.0).unwrap();
        c.add_current_source("a", 1.0).unwrap();

        assert!(matches!(
            Solver::new().solve(&c),
            Err(NodalError::SingularSystem { .. })
        ));
    }

    #[test]
    fn test_ground_only_circuit() {
        let mut c = Circuit::new();
        c.add_current_source("0", 1.0).unwrap();

        let v = Solver::new().solve(&c).unwrap();
        assert_eq!(v.len(), 1);
        assert_eq!(v.get("0"), Some(0.0));
    }

    #[test]
    fn test_pivot_tolerance_is_relative() {
        // b hangs off a by 1 Ω and reaches ground only through 100 MΩ
        let mut c = Circuit::new();
        c.add_resistor("a", "0", 1e8).unwrap();
        c.add_resistor("a", "b", 1.0).unwrap();
        c.add_resistor("b", "0", 1e8).unwrap();

        assert!(Solver::new().solve(&c).is_ok());

        let strict = Solver::with_config(SolverConfig::new().with_pivot_tolerance(1e-6));
        assert!(matches!(
            strict.solve(&c),
            Err(NodalError::SingularSystem { ref node }) if node == "b"
        ));
    }

    #[test]
    fn test_wide_conductance_spread_solves() {
        let mut c = Circuit::new();
        c.add_resistor("a", "0", 1e-3).unwrap();
        c.add_resistor("b", "0", 1e10).unwrap();
        c.add_current_source("b", 1e-9).unwrap();

        let v = Solver::new().solve(&c).unwrap();
        assert_eq!(v.get("a"), Some(0.0));
        assert_relative_eq!(v.get("b").unwrap(), -10.0, max_relative = 1e-12);
    }

    #[test]
    fn test_config_builder() {
        let config = SolverConfig::new()
            .with_pivot_tolerance(1e-10)
            .with_kcl_tolerance(1e-6);
        assert_eq!(config.pivot_tolerance, 1e-10);
        assert_eq!(config.kcl_tolerance, 1e-6);
    }
}
