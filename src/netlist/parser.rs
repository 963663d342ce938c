//! Netlist parser building a [`Circuit`] line by line.

use super::lexer::{parse_value, tokenize_line, Token};
use crate::circuit::{Circuit, GROUND_NAME};
use crate::error::{NodalError, Result};

/// Parser for netlist text.
pub struct Parser<'a> {
    input: &'a str,
    circuit: Circuit,
}

impl<'a> Parser<'a> {
    /// Create a new parser over the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            circuit: Circuit::new(),
        }
    }

    /// Parse the whole netlist into a circuit.
    pub fn parse(mut self) -> Result<Circuit> {
        let input = self.input;
        for (idx, text) in input.lines().enumerate() {
            let line = idx + 1;
            let tokens = tokenize_line(text, line);
            let Some(first) = tokens.first() else {
                continue;
            };

            if first.text.starts_with('.') {
                match first.text.to_ascii_lowercase().as_str() {
                    ".end" => break,
                    ".title" => continue,
                    other => {
                        return Err(NodalError::parse(
                            line,
                            format!("unknown directive: {}", other),
                        ));
                    }
                }
            }

            self.parse_element(&tokens)?;
        }

        tracing::debug!(
            nodes = self.circuit.node_count(),
            components = self.circuit.components().len(),
            "parsed netlist"
        );
        Ok(self.circuit)
    }

    fn parse_element(&mut self, tokens: &[Token<'_>]) -> Result<()> {
        let name = tokens[0].text;
        let line = tokens[0].line;

        // Optional DC keyword before the value
        let args: Vec<&Token<'_>> = tokens[1..]
            .iter()
            .filter(|t| !t.text.eq_ignore_ascii_case("DC"))
            .collect();

        match name.chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('R') => {
                let [n1, n2, value] = expect_args::<_, 3>(&args, name, line)?;
                let resistance = number(value)?;
                self.circuit
                    .add_named_resistor(name, &node_name(n1), &node_name(n2), resistance)?;
            }
            Some('I') => match args.len() {
                2 => {
                    let current = number(args[1])?;
                    self.circuit
                        .add_named_current_source(name, &node_name(args[0]), current)?;
                }
                _ => {
                    let [pos, neg, value] = expect_args::<_, 3>(&args, name, line)?;
                    self.add_two_terminal_source(name, &node_name(pos), &node_name(neg), number(value)?)?;
                }
            },
            _ => {
                return Err(NodalError::parse(
                    line,
                    format!("unknown element type '{}'", name),
                ));
            }
        }
        Ok(())
    }

    /// Current flows from `pos` through the source into `neg`.
    fn add_two_terminal_source(&mut self, name: &str, pos: &str, neg: &str, current: f64) -> Result<()> {
        match (pos == GROUND_NAME, neg == GROUND_NAME) {
            (true, _) => {
                self.circuit.add_named_current_source(name, neg, current)?;
            }
            (false, true) => {
                self.circuit.add_named_current_source(name, pos, -current)?;
            }
            (false, false) => {
                self.circuit
                    .add_named_current_source(&format!("{}+", name), pos, -current)?;
                self.circuit
                    .add_named_current_source(&format!("{}-", name), neg, current)?;
            }
        }
        Ok(())
    }
}

fn expect_args<T: Copy, const N: usize>(args: &[T], name: &str, line: usize) -> Result<[T; N]> {
    <[T; N]>::try_from(args).map_err(|_| {
        NodalError::parse(
            line,
            format!("element '{}' expects {} fields, got {}", name, N, args.len()),
        )
    })
}

fn number(token: &Token<'_>) -> Result<f64> {
    parse_value(token.text).ok_or_else(|| {
        NodalError::parse(
            token.line,
            format!("invalid number '{}' at column {}", token.text, token.column),
        )
    })
}

fn node_name(token: &Token<'_>) -> String {
    if token.text.eq_ignore_ascii_case("GND") {
        GROUND_NAME.to_string()
    } else {
        token.text.to_string()
    }
}
