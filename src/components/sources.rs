//! Independent current sources.

use crate::circuit::{ComponentId, NodeId};
use crate::error::{NodalError, Result};

/// A current source attached to a single node.
///
/// Current sources add directly to the RHS vector of the nodal equations.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSource {
    pub id: ComponentId,
    pub name: String,
    pub node: NodeId,
    pub value: f64,
}

impl CurrentSource {
    /// Create a new current source. The value must be finite.
    pub fn new(id: ComponentId, name: String, node: NodeId, value: f64) -> Result<Self> {
        Self::check(&name, value)?;
        Ok(Self {
            id,
            name,
            node,
            value,
        })
    }

    pub(crate) fn check(name: &str, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(NodalError::invalid_parameter(
                name,
                "current",
                format!("must be finite, got {}", value),
            ));
        }
        Ok(())
    }

    /// Get the source current in amperes.
    pub fn current(&self) -> f64 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_source_accepts_signed_values() {
        let src = CurrentSource::new(ComponentId(0), "I1".to_string(), NodeId(1), -0.5).unwrap();
        assert_eq!(src.current(), -0.5);
    }

    #[test]
    fn test_current_source_rejects_non_finite() {
        let result = CurrentSource::new(ComponentId(0), "I1".to_string(), NodeId(1), f64::NAN);
        assert!(matches!(result, Err(NodalError::InvalidParameter { .. })));
    }
}
