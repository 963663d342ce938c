//! Circuit element models.
//!
//! Two element kinds are supported:
//! - Linear: Resistor
//! - Sources: Current Source
//!
//! Each component knows its terminals and its contribution to the nodal
//! equations; stamping itself happens in [`crate::solver`].

mod linear;
mod sources;

pub use linear::Resistor;
pub use sources::CurrentSource;

use crate::circuit::NodeId;

/// A circuit component.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Resistor(Resistor),
    CurrentSource(CurrentSource),
}

impl Component {
    /// Get the component name.
    pub fn name(&self) -> &str {
        match self {
            Component::Resistor(r) => &r.name,
            Component::CurrentSource(i) => &i.name,
        }
    }

    /// Get the nodes this component connects to.
    pub fn nodes(&self) -> &[NodeId] {
        match self {
            Component::Resistor(r) => &r.nodes,
            Component::CurrentSource(i) => std::slice::from_ref(&i.node),
        }
    }
}
