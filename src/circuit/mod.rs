//! Circuit representation and validation.
//!
//! The [`Circuit`] struct holds the resistors and current sources of a
//! network together with the node registry that fixes matrix ordering.

mod graph;
mod types;
mod validate;

pub use graph::Circuit;
pub use types::*;
pub use validate::validate_circuit;
