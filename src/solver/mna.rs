//! Nodal matrix assembly.

use crate::circuit::{Circuit, NodeIndex};
use crate::components::Component;

/// Nodal equation system Y·V = I.
#[derive(Debug, Clone, PartialEq)]
pub struct NodalSystem {
    /// Conductance matrix Y (row-major)
    y: Vec<f64>,
    /// Right-hand-side current vector
    rhs: Vec<f64>,
    /// Matrix dimension (number of non-ground nodes)
    size: usize,
    /// Node ordering used for rows and columns
    index: NodeIndex,
}

impl NodalSystem {
    /// Create a zeroed system for the given node ordering.
    pub fn new(index: NodeIndex) -> Self {
        let size = index.len();
        Self {
            y: vec![0.0; size * size],
            rhs: vec![0.0; size],
            size,
            index,
        }
    }

    /// Assemble the conductance matrix and current vector for a circuit.
    pub fn assemble(circuit: &Circuit) -> Self {
        let mut system = Self::new(circuit.build_node_index());
        stamp_components(circuit, &mut system);
        tracing::debug!(
            nodes = system.size,
            components = circuit.components().len(),
            "assembled nodal system"
        );
        system
    }

    /// Matrix dimension.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Node ordering of rows and columns.
    pub fn node_index(&self) -> &NodeIndex {
        &self.index
    }

    /// Row-major conductance matrix.
    pub fn matrix(&self) -> &[f64] {
        &self.y
    }

    /// Right-hand-side current vector.
    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    /// Get matrix element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.y[row * self.size + col]
    }

    /// Add to matrix element at (row, col).
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        self.y[row * self.size + col] += value;
    }

    /// Add to right-hand-side element.
    pub fn add_source(&mut self, row: usize, value: f64) {
        self.rhs[row] += value;
    }

    /// Copy the matrix out as nested rows.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.y.chunks(self.size.max(1)).take(self.size).map(<[f64]>::to_vec).collect()
    }

    /// Stamp a conductance between two nodes (`None` is ground).
    /// For a conductance G between nodes n1 and n2:
    ///   Y[n1,n1] += G
    ///   Y[n2,n2] += G
    ///   Y[n1,n2] -= G
    ///   Y[n2,n1] -= G
    pub fn stamp_conductance(&mut self, n1: Option<usize>, n2: Option<usize>, g: f64) {
        if let Some(i) = n1 {
            self.add(i, i, g);
        }
        if let Some(j) = n2 {
            self.add(j, j, g);
        }
        if let (Some(i), Some(j)) = (n1, n2) {
            self.add(i, j, -g);
            self.add(j, i, -g);
        }
    }

    /// Stamp a current source at a node. Ground sources are dropped.
    ///
    /// The stated value enters the right-hand side negated.
    pub fn stamp_current_source(&mut self, node: Option<usize>, current: f64) {
        if let Some(i) = node {
            self.add_source(i, -current);
        }
    }

    /// Check Y[i][j] == Y[j][i] within an absolute tolerance.
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        (0..self.size).all(|i| {
            (i + 1..self.size).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tolerance)
        })
    }

    /// Residual Y·x − I for a candidate solution.
    pub fn residual(&self, x: &[f64]) -> Vec<f64> {
        (0..self.size)
            .map(|i| {
                let row = &self.y[i * self.size..(i + 1) * self.size];
                let yx: f64 = row.iter().zip(x).map(|(a, b)| a * b).sum();
                yx - self.rhs[i]
            })
            .collect()
    }
}

/// Stamp every component of the circuit into the system.
pub fn stamp_components(circuit: &Circuit, system: &mut NodalSystem) {
    for component in circuit.components() {
        match component {
            Component::Resistor(r) => {
                let n1 = circuit.node_index(r.nodes[0]);
                let n2 = circuit.node_index(r.nodes[1]);
                system.stamp_conductance(n1, n2, r.conductance());
            }

            Component::CurrentSource(i) => {
                let node = circuit.node_index(i.node);
                system.stamp_current_source(node, i.current());
            }
        }
    }
}
