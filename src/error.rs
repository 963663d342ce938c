//! Error types for nodal analysis.
//!
//! This module provides a unified error type [`NodalError`] that covers
//! circuit construction, netlist parsing, topology checks, and solving.

use thiserror::Error;

/// Result type alias using [`NodalError`].
pub type Result<T> = std::result::Result<T, NodalError>;

/// Unified error type for all nodal analysis operations.
#[derive(Error, Debug)]
pub enum NodalError {
    // ============ Circuit Construction Errors ============
    /// Invalid parameter value (non-positive resistance, shorted endpoints, ...)
    #[error("Invalid parameter '{param}' for component '{component}': {message}")]
    InvalidParameter {
        component: String,
        param: String,
        message: String,
    },

    /// Duplicate component name
    #[error("Duplicate component name '{name}'")]
    DuplicateComponent { name: String },

    /// Node not present in the circuit or solution
    #[error("Unknown node '{node}'")]
    UnknownNode { node: String },

    // ============ Topology Errors ============
    /// Floating node (no resistive path to ground)
    #[error("Floating node '{node}' detected - no path to ground")]
    FloatingNode { node: String },

    /// Invalid circuit topology
    #[error("Invalid circuit topology: {message}")]
    InvalidTopology { message: String },

    // ============ Solver Errors ============
    /// Conductance matrix has no unique solution
    #[error("Singular conductance matrix at node '{node}' - node is isolated or has no path to ground")]
    SingularSystem { node: String },

    /// Right-hand side does not match the matrix dimension
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    // ============ Netlist Errors ============
    /// Error while reading a netlist line
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Error reading a netlist file
    #[error("Failed to read netlist file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl NodalError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(
        component: impl Into<String>,
        param: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            component: component.into(),
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create an unknown node error
    pub fn unknown_node(node: impl Into<String>) -> Self {
        Self::UnknownNode { node: node.into() }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }
}
