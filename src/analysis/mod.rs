//! Post-solve analysis: branch currents and KCL verification.
//!
//! Both operations are read-only views over a [`Circuit`] and a
//! [`VoltageSolution`]; each call returns freshly computed values.

use crate::circuit::{Circuit, NodeId};
use crate::components::Component;
use crate::error::Result;
use crate::solver::{Solver, SolverConfig, VoltageSolution};

/// Current through one resistor, flowing from `n1` to `n2`.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchCurrent {
    /// Resistor name
    pub name: String,
    pub n1: String,
    pub n2: String,
    /// Amperes, positive from n1 to n2
    pub current: f64,
}

/// KCL balance at one node.
#[derive(Debug, Clone, PartialEq)]
pub struct KclEntry {
    pub node: String,
    /// Net current: branch currents leaving plus stamped source terms
    pub net_current: f64,
    /// Sum of absolute currents at the node
    pub scale: f64,
}

impl KclEntry {
    /// True if the net current is within `tolerance` relative to the node's current scale.
    pub fn is_balanced(&self, tolerance: f64) -> bool {
        self.net_current.abs() <= tolerance * self.scale
    }
}

/// KCL balance for every non-ground node, in registration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KclReport {
    entries: Vec<KclEntry>,
}

impl KclReport {
    /// Per-node entries.
    pub fn entries(&self) -> &[KclEntry] {
        &self.entries
    }

    /// Entry for a node, if it is a non-ground node of the circuit.
    pub fn get(&self, node: &str) -> Option<&KclEntry> {
        self.entries.iter().find(|e| e.node == node)
    }

    /// Largest absolute net current across all nodes.
    pub fn max_abs_net(&self) -> f64 {
        self.entries
            .iter()
            .fold(0.0, |m, e| f64::max(m, e.net_current.abs()))
    }

    /// True if every node is balanced within `tolerance`.
    pub fn is_balanced(&self, tolerance: f64) -> bool {
        self.entries.iter().all(|e| e.is_balanced(tolerance))
    }

    /// Nodes that fail the balance check.
    pub fn violations(&self, tolerance: f64) -> impl Iterator<Item = &KclEntry> {
        self.entries.iter().filter(move |e| !e.is_balanced(tolerance))
    }
}

/// Read-only analysis over a circuit.
#[derive(Debug, Clone, Copy)]
pub struct Analyzer<'a> {
    circuit: &'a Circuit,
}

impl<'a> Analyzer<'a> {
    pub fn new(circuit: &'a Circuit) -> Self {
        Self { circuit }
    }

    /// Current through every resistor, in declaration order.
    ///
    /// Fails with `UnknownNode` if the solution does not cover a resistor terminal.
    pub fn branch_currents(&self, solution: &VoltageSolution) -> Result<Vec<BranchCurrent>> {
        self.circuit
            .resistors()
            .map(|r| {
                let n1 = self.circuit.node_name(r.nodes[0]);
                let n2 = self.circuit.node_name(r.nodes[1]);
                let current = r.current(solution.voltage(n1)?, solution.voltage(n2)?);
                Ok(BranchCurrent {
                    name: r.name.clone(),
                    n1: n1.to_string(),
                    n2: n2.to_string(),
                    current,
                })
            })
            .collect()
    }

    /// Net current at every non-ground node.
    ///
    /// Branch currents count positive at their first terminal and negative at
    /// their second. Source terms carry the sign they were stamped with, so
    /// each entry equals the row residual of Y·V − I and is ~0 for a correct
    /// solve. The report is diagnostic only.
    pub fn validate_kcl(&self, solution: &VoltageSolution) -> Result<KclReport> {
        let n = self.circuit.num_nodes();
        let mut net = vec![0.0; n];
        let mut scale = vec![0.0; n];

        for component in self.circuit.components() {
            match component {
                Component::Resistor(r) => {
                    let [a, b] = r.nodes;
                    let i = r.current(
                        solution.voltage(self.circuit.node_name(a))?,
                        solution.voltage(self.circuit.node_name(b))?,
                    );
                    net[a.0] += i;
                    net[b.0] -= i;
                    scale[a.0] += i.abs();
                    scale[b.0] += i.abs();
                }
                Component::CurrentSource(s) => {
                    net[s.node.0] += s.current();
                    scale[s.node.0] += s.current().abs();
                }
            }
        }

        let entries = (1..n)
            .map(|k| KclEntry {
                node: self.circuit.node_name(NodeId(k)).to_string(),
                net_current: net[k],
                scale: scale[k],
            })
            .collect();

        Ok(KclReport { entries })
    }
}

/// Full result of a one-shot analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub solution: VoltageSolution,
    pub branch_currents: Vec<BranchCurrent>,
    pub kcl: KclReport,
}

/// Solve a circuit, derive branch currents and check KCL in one pass.
pub fn analyze(circuit: &Circuit, config: &SolverConfig) -> Result<Analysis> {
    let solution = Solver::with_config(config.clone()).solve(circuit)?;
    let analyzer = Analyzer::new(circuit);
    let branch_currents = analyzer.branch_currents(&solution)?;
    let kcl = analyzer.validate_kcl(&solution)?;

    for entry in kcl.violations(config.kcl_tolerance) {
        tracing::warn!(
            node = %entry.node,
            net = entry.net_current,
            "KCL not satisfied within tolerance"
        );
    }

    Ok(Analysis {
        solution,
        branch_currents,
        kcl,
    })
}

impl Circuit {
    /// Solve for node voltages with default solver settings.
    pub fn solve(&self) -> Result<VoltageSolution> {
        Solver::new().solve(self)
    }

    /// Current through every resistor for a solution of this circuit.
    pub fn branch_currents(&self, solution: &VoltageSolution) -> Result<Vec<BranchCurrent>> {
        Analyzer::new(self).branch_currents(solution)
    }

    /// KCL balance at every non-ground node for a solution of this circuit.
    pub fn validate_kcl(&self, solution: &VoltageSolution) -> Result<KclReport> {
        Analyzer::new(self).validate_kcl(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NodalError;
    use crate::solver::{NodalSystem, DEFAULT_KCL_TOLERANCE};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn reference_circuit() -> Circuit {
        let mut c = Circuit::new();
        c.add_resistor("1", "0", 10.0).unwrap();
        c.add_resistor("2", "0", 5.0).unwrap();
        c.add_resistor("1", "2", 15.0).unwrap();
        c.add_current_source("2", 2.0).unwrap();
        c
    }

    fn ladder(sections: usize, scale: f64) -> Circuit {
        let mut c = Circuit::new();
        for k in 0..sections {
            let here = format!("n{}", k);
            let next = format!("n{}", k + 1);
            c.add_resistor(&here, &next, 100.0 + k as f64).unwrap();
            c.add_resistor(&next, "0", 1000.0 * (k + 1) as f64).unwrap();
        }
        c.add_resistor("n0", "0", 50.0).unwrap();
        c.add_current_source("n0", 0.01 * scale).unwrap();
        c.add_current_source(&format!("n{}", sections), -0.002 * scale).unwrap();
        c
    }

    #[test]
    fn test_reference_scenario() {
        let c = reference_circuit();
        let v = c.solve().unwrap();

        let v1 = v.get("1").unwrap();
        let v2 = v.get("2").unwrap();
        assert_relative_eq!(v1, -10.0 / 3.0, max_relative = 1e-12);
        assert_relative_eq!(v2, -25.0 / 3.0, max_relative = 1e-12);

        let system = NodalSystem::assemble(&c);
        for r in system.residual(&[v1, v2]) {
            assert_abs_diff_eq!(r, 0.0, epsilon = 1e-12);
        }

        let currents = c.branch_currents(&v).unwrap();
        let triples: Vec<(&str, &str)> = currents.iter().map(|b| (b.n1.as_str(), b.n2.as_str())).collect();
        assert_eq!(triples, [("1", "0"), ("2", "0"), ("1", "2")]);
        assert_relative_eq!(currents[0].current, v1 / 10.0);
        assert_relative_eq!(currents[1].current, v2 / 5.0);
        assert_relative_eq!(currents[2].current, (v1 - v2) / 15.0);

        let kcl = c.validate_kcl(&v).unwrap();
        let nodes: Vec<&str> = kcl.entries().iter().map(|e| e.node.as_str()).collect();
        assert_eq!(nodes, ["1", "2"]);
        assert_abs_diff_eq!(kcl.get("1").unwrap().net_current, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(kcl.get("2").unwrap().net_current, 0.0, epsilon = 1e-12);
        assert!(kcl.is_balanced(DEFAULT_KCL_TOLERANCE));
    }

    #[test]
    fn test_ground_is_exactly_zero() {
        for c in [reference_circuit(), ladder(6, 1.0)] {
            assert_eq!(c.solve().unwrap().get("0"), Some(0.0));
        }
    }

    #[test]
    fn test_solve_is_deterministic() {
        let c = ladder(8, 1.0);
        let a = c.solve().unwrap();
        let b = c.solve().unwrap();
        for ((na, va), (nb, vb)) in a.iter().zip(b.iter()) {
            assert_eq!(na, nb);
            assert_eq!(va.to_bits(), vb.to_bits());
        }
    }

    #[test]
    fn test_kcl_closure_on_ladder() {
        let c = ladder(10, 1.0);
        let v = c.solve().unwrap();
        let report = c.validate_kcl(&v).unwrap();

        assert_eq!(report.entries().len(), c.node_count());
        assert!(report.is_balanced(DEFAULT_KCL_TOLERANCE), "{:?}", report);
        assert_eq!(report.violations(DEFAULT_KCL_TOLERANCE).count(), 0);
    }

    #[test]
    fn test_superposition_scaling() {
        let k = -3.5;
        let base = ladder(5, 1.0).solve().unwrap();
        let scaled = ladder(5, k).solve().unwrap();

        for ((_, v), (_, vk)) in base.iter().zip(scaled.iter()) {
            assert_relative_eq!(vk, k * v, max_relative = 1e-10, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_unbalanced_solution_is_reported_not_repaired() {
        let c = reference_circuit();
        let wrong = VoltageSolution::from_voltages(vec![("1".to_string(), 5.0), ("2".to_string(), 10.0)]);

        let report = c.validate_kcl(&wrong).unwrap();
        assert!(!report.is_balanced(DEFAULT_KCL_TOLERANCE));
        // node 1: 5/10 + (5 - 10)/15
        assert_relative_eq!(report.get("1").unwrap().net_current, 0.5 - 1.0 / 3.0);
        // node 2: 10/5 - (5 - 10)/15 + 2
        assert_relative_eq!(report.get("2").unwrap().net_current, 2.0 + 1.0 / 3.0 + 2.0);
        assert!(report.max_abs_net() > 4.0);
    }

    #[test]
    fn test_unknown_node_in_solution() {
        let c = reference_circuit();
        let partial = VoltageSolution::from_voltages(vec![("1".to_string(), 1.0)]);

        let err = c.branch_currents(&partial).unwrap_err();
        assert!(matches!(err, NodalError::UnknownNode { ref node } if node == "2"));
        assert!(matches!(
            c.validate_kcl(&partial),
            Err(NodalError::UnknownNode { .. })
        ));
    }

    #[test]
    fn test_analyze_pipeline() {
        let c = reference_circuit();
        let result = analyze(&c, &SolverConfig::default()).unwrap();

        assert_eq!(result.solution, c.solve().unwrap());
        assert_eq!(result.branch_currents.len(), 3);
        assert!(result.kcl.is_balanced(DEFAULT_KCL_TOLERANCE));
    }

    #[test]
    fn test_analyze_propagates_singular_system() {
        let mut c = reference_circuit();
        c.add_node("lonely");
        assert!(matches!(
            analyze(&c, &SolverConfig::default()),
            Err(NodalError::SingularSystem { ref node }) if node == "lonely"
        ));
    }

    #[test]
    fn test_empty_node_entry_is_balanced() {
        let entry = KclEntry {
            node: "x".to_string(),
            net_current: 0.0,
            scale: 0.0,
        };
        assert!(entry.is_balanced(DEFAULT_KCL_TOLERANCE));
    }
}
