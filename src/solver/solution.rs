//! Node voltage results.

use std::collections::HashMap;

use crate::circuit::GROUND_NAME;
use crate::error::{NodalError, Result};

/// Voltages for every node of a circuit, ground included.
///
/// Entries keep node registration order with ground first. Ground is always
/// exactly 0.0.
#[derive(Debug, Clone, PartialEq)]
pub struct VoltageSolution {
    entries: Vec<(String, f64)>,
    lookup: HashMap<String, usize>,
}

impl VoltageSolution {
    /// Build a solution from non-ground `(name, voltage)` pairs.
    ///
    /// Ground is inserted first at 0.0; a ground entry in `voltages` is ignored.
    pub fn from_voltages<I>(voltages: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let mut solution = Self {
            entries: vec![(GROUND_NAME.to_string(), 0.0)],
            lookup: HashMap::from([(GROUND_NAME.to_string(), 0)]),
        };
        for (name, v) in voltages {
            if solution.lookup.contains_key(&name) {
                continue;
            }
            solution.lookup.insert(name.clone(), solution.entries.len());
            solution.entries.push((name, v));
        }
        solution
    }

    /// Voltage at a node, if the node is part of the solution.
    pub fn get(&self, node: &str) -> Option<f64> {
        self.lookup.get(node).map(|&i| self.entries[i].1)
    }

    /// Voltage at a node, failing with `UnknownNode` for names not in the solution.
    pub fn voltage(&self, node: &str) -> Result<f64> {
        self.get(node).ok_or_else(|| NodalError::unknown_node(node))
    }

    /// Iterate `(name, voltage)` pairs, ground first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Number of nodes, ground included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: ground is always present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
