//! Circuit validation.

use std::collections::VecDeque;

use crate::error::{NodalError, Result};

use super::{Circuit, NodeId};

/// Validate a circuit before analysis.
///
/// Checks:
/// - The circuit has at least one component
/// - Every node has a resistive path to ground
///
/// A floating node always makes the conductance matrix singular; this check
/// names it up front instead of waiting for the solver to fail.
pub fn validate_circuit(circuit: &Circuit) -> Result<()> {
    if circuit.is_empty() {
        return Err(NodalError::InvalidTopology {
            message: "Circuit has no components".to_string(),
        });
    }

    let n = circuit.num_nodes();
    let mut adjacency: Vec<Vec<NodeId>> = vec![Vec::new(); n];
    for component in circuit.components() {
        // Only two-terminal elements conduct between nodes
        if let &[a, b] = component.nodes() {
            adjacency[a.0].push(b);
            adjacency[b.0].push(a);
        }
    }

    let mut reached = vec![false; n];
    let mut queue = VecDeque::from([NodeId::GROUND]);
    reached[0] = true;
    while let Some(node) = queue.pop_front() {
        for &next in &adjacency[node.0] {
            if !reached[next.0] {
                reached[next.0] = true;
                queue.push_back(next);
            }
        }
    }

    if let Some(floating) = reached.iter().position(|&r| !r) {
        return Err(NodalError::FloatingNode {
            node: circuit.node_name(NodeId(floating)).to_string(),
        });
    }

    Ok(())
}
