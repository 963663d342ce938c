//! Netlist reader for circuit descriptions.
//!
//! A small SPICE-like, line-oriented format that feeds the [`Circuit`]
//! construction API.
//!
//! # Grammar Overview
//!
//! ```text
//! netlist     = { line }
//! line        = comment | directive | element | empty
//! comment     = '*' { any_char } | ('#' | ';') { any_char }
//! directive   = ".title" { any } | ".end"
//! element     = resistor | source
//! resistor    = 'R' name node node value
//! source      = 'I' name node ["DC"] value
//!             | 'I' name node node ["DC"] value
//! node        = word | "0" | "GND"
//! value       = number [unit_suffix]
//! unit_suffix = 'p' | 'n' | 'u' | 'm' | 'k' | 'M' | 'G'
//! ```
//!
//! A single-node source injects its value into that node. The two-node form
//! follows SPICE: current flows from the first node through the source into
//! the second.
//!
//! # Example
//!
//! ```text
//! * Two-node resistive network
//! R1 1 0 10
//! R2 2 0 5
//! R3 1 2 15
//! I1 2 2
//! .end
//! ```

mod lexer;
mod parser;

pub use lexer::{parse_value, tokenize_line, Token};
pub use parser::Parser;

use crate::circuit::Circuit;
use crate::error::Result;

/// Parse netlist text into a circuit.
pub fn parse(input: &str) -> Result<Circuit> {
    Parser::new(input).parse()
}

/// Parse a netlist file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<Circuit> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::NodalError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
