//! Circuit graph structure.

use std::collections::{HashMap, HashSet};

use super::types::{ComponentId, NodeId, NodeIndex, GROUND_NAME};
use crate::components::{Component, CurrentSource, Resistor};
use crate::error::{NodalError, Result};

/// A resistive circuit built up element by element.
///
/// Nodes are registered implicitly by the elements that reference them, in
/// first-seen order. Ground (`"0"`) always exists and is node 0.
#[derive(Debug, Clone)]
pub struct Circuit {
    /// All components in declaration order
    components: Vec<Component>,

    /// Mapping from node names to node IDs
    node_map: HashMap<String, NodeId>,

    /// Reverse mapping from node IDs to names, ground first
    node_names: Vec<String>,

    /// Names already taken by components
    component_names: HashSet<String>,

    /// Next auto-name suffix to try, per prefix
    name_counters: HashMap<char, usize>,
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

impl Circuit {
    /// Create an empty circuit containing only ground.
    pub fn new() -> Self {
        let mut node_map = HashMap::new();
        node_map.insert(GROUND_NAME.to_string(), NodeId::GROUND);
        Self {
            components: Vec::new(),
            node_map,
            node_names: vec![GROUND_NAME.to_string()],
            component_names: HashSet::new(),
            name_counters: HashMap::new(),
        }
    }

    /// Register a node by name, returning its ID.
    ///
    /// Idempotent: a name that is already known keeps its original ID.
    pub fn add_node(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.node_map.get(name) {
            return id;
        }
        let id = NodeId(self.node_names.len());
        self.node_map.insert(name.to_string(), id);
        self.node_names.push(name.to_string());
        id
    }

    /// Add a resistor between `n1` and `n2`, named `R<k>` automatically.
    pub fn add_resistor(&mut self, n1: &str, n2: &str, resistance: f64) -> Result<ComponentId> {
        let name = self.next_name('R');
        self.add_named_resistor(&name, n1, n2, resistance)
    }

    /// Add a resistor with an explicit component name.
    ///
    /// The call is validated before any node is registered, so a rejected
    /// resistor leaves the circuit unchanged.
    pub fn add_named_resistor(
        &mut self,
        name: &str,
        n1: &str,
        n2: &str,
        resistance: f64,
    ) -> Result<ComponentId> {
        self.check_name(name)?;
        Resistor::check_resistance(name, resistance)?;
        if n1 == n2 {
            return Err(NodalError::invalid_parameter(
                name,
                "nodes",
                format!("both terminals connect to node '{}'", n1),
            ));
        }

        let nodes = [self.add_node(n1), self.add_node(n2)];
        let id = ComponentId(self.components.len());
        let resistor = Resistor::new(id, name.to_string(), nodes, resistance)?;
        self.push(Component::Resistor(resistor));
        Ok(id)
    }

    /// Add a current source at `node`, named `I<k>` automatically.
    pub fn add_current_source(&mut self, node: &str, current: f64) -> Result<ComponentId> {
        let name = self.next_name('I');
        self.add_named_current_source(&name, node, current)
    }

    /// Add a current source with an explicit component name.
    pub fn add_named_current_source(&mut self, name: &str, node: &str, current: f64) -> Result<ComponentId> {
        self.check_name(name)?;
        CurrentSource::check(name, current)?;

        let node = self.add_node(node);
        let id = ComponentId(self.components.len());
        let source = CurrentSource::new(id, name.to_string(), node, current)?;
        self.push(Component::CurrentSource(source));
        Ok(id)
    }

    fn check_name(&self, name: &str) -> Result<()> {
        if self.component_names.contains(name) {
            return Err(NodalError::DuplicateComponent {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// First free `<prefix><k>`. Names are never released, so the counter
    /// only moves past taken suffixes.
    fn next_name(&mut self, prefix: char) -> String {
        let k = self.name_counters.entry(prefix).or_insert(1);
        loop {
            let name = format!("{}{}", prefix, k);
            if !self.component_names.contains(&name) {
                return name;
            }
            *k += 1;
        }
    }

    fn push(&mut self, component: Component) {
        self.component_names.insert(component.name().to_string());
        self.components.push(component);
    }

    /// All components in declaration order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Resistors in declaration order.
    pub fn resistors(&self) -> impl Iterator<Item = &Resistor> {
        self.components.iter().filter_map(|c| match c {
            Component::Resistor(r) => Some(r),
            _ => None,
        })
    }

    /// Current sources in declaration order.
    pub fn current_sources(&self) -> impl Iterator<Item = &CurrentSource> {
        self.components.iter().filter_map(|c| match c {
            Component::CurrentSource(i) => Some(i),
            _ => None,
        })
    }

    /// True if the circuit has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Number of nodes including ground.
    pub fn num_nodes(&self) -> usize {
        self.node_names.len()
    }

    /// Number of non-ground nodes (the matrix dimension).
    pub fn node_count(&self) -> usize {
        self.node_names.len() - 1
    }

    /// Node names in registration order, ground first.
    pub fn node_names(&self) -> &[String] {
        &self.node_names
    }

    /// Get the matrix index for a node voltage.
    /// Returns None for ground (node 0).
    pub fn node_index(&self, node: NodeId) -> Option<usize> {
        if node.is_ground() {
            None
        } else {
            Some(node.0 - 1)
        }
    }

    /// Build the name-to-position index for the non-ground nodes.
    pub fn build_node_index(&self) -> NodeIndex {
        NodeIndex::from_names(&self.node_names)
    }

    /// Find a node ID by name.
    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.node_map.get(name).copied()
    }

    /// Get the name of a node.
    pub fn node_name(&self, node: NodeId) -> &str {
        &self.node_names[node.0]
    }
}
