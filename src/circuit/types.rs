//! Core types for circuit representation.

use std::collections::HashMap;
use std::fmt;

/// Name of the ground (reference) node.
pub const GROUND_NAME: &str = "0";

/// A unique identifier for a node in the circuit.
/// Node 0 is always ground; other nodes are numbered in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The ground node (always index 0).
    pub const GROUND: NodeId = NodeId(0);

    /// Check if this is the ground node.
    pub fn is_ground(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ground() {
            write!(f, "GND")
        } else {
            write!(f, "N{}", self.0)
        }
    }
}

/// A unique identifier for a component in the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(pub usize);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

/// Ordered bijection between non-ground node names and matrix positions.
///
/// Positions are assigned `0..N` in node registration order, ground excluded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeIndex {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl NodeIndex {
    /// Build an index from node names given in registration order.
    ///
    /// Ground and repeated names are skipped, so the first occurrence wins.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::default();
        for name in names {
            let name = name.as_ref();
            if name == GROUND_NAME || index.positions.contains_key(name) {
                continue;
            }
            index.positions.insert(name.to_string(), index.names.len());
            index.names.push(name.to_string());
        }
        index
    }

    /// Number of indexed (non-ground) nodes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if only ground exists.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Matrix position of a node, `None` for ground or unknown names.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Node name at a matrix position.
    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Iterate `(position, name)` pairs in position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names.iter().enumerate().map(|(i, n)| (i, n.as_str()))
    }
}
