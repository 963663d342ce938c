//! Linear passive components.

use crate::circuit::{ComponentId, NodeId};
use crate::error::{NodalError, Result};

/// A resistor between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Resistor {
    pub id: ComponentId,
    pub name: String,
    pub nodes: [NodeId; 2], // [n1, n2], positive current flows n1 -> n2
    pub resistance: f64,
}

impl Resistor {
    /// Create a new resistor.
    ///
    /// Fails if the resistance is not a positive finite number or both
    /// terminals are the same node.
    pub fn new(id: ComponentId, name: String, nodes: [NodeId; 2], resistance: f64) -> Result<Self> {
        Self::check_resistance(&name, resistance)?;
        if nodes[0] == nodes[1] {
            return Err(NodalError::invalid_parameter(
                &name,
                "nodes",
                format!("both terminals connect to node {}", nodes[0]),
            ));
        }
        Ok(Self {
            id,
            name,
            nodes,
            resistance,
        })
    }

    /// Validate a resistance value.
    pub(crate) fn check_resistance(name: &str, resistance: f64) -> Result<()> {
        if !resistance.is_finite() || resistance <= 0.0 {
            return Err(NodalError::invalid_parameter(
                name,
                "resistance",
                format!("must be a positive finite value, got {}", resistance),
            ));
        }
        Ok(())
    }

    /// Get the conductance (1/R).
    pub fn conductance(&self) -> f64 {
        1.0 / self.resistance
    }

    /// Current flowing from n1 to n2 for the given terminal voltages.
    pub fn current(&self, v1: f64, v2: f64) -> f64 {
        (v1 - v2) / self.resistance
    }
}
