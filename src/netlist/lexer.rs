//! Line tokenizer and value parsing for netlists.

/// A whitespace-separated word on a netlist line.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    /// The token's text
    pub text: &'a str,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Returns true if the character starts a comment.
fn is_comment_start(ch: char) -> bool {
    ch == '#' || ch == ';'
}

/// Split one netlist line into tokens.
///
/// Lines starting with `*` are comments; `#` and `;` start a comment anywhere.
pub fn tokenize_line(text: &str, line: usize) -> Vec<Token<'_>> {
    if text.trim_start().starts_with('*') {
        return Vec::new();
    }
    let code = match text.find(is_comment_start) {
        Some(pos) => &text[..pos],
        None => text,
    };

    let mut tokens = Vec::new();
    let mut start = None;
    for (pos, ch) in code.char_indices().chain(std::iter::once((code.len(), ' '))) {
        match (ch.is_whitespace(), start) {
            (false, None) => start = Some(pos),
            (true, Some(s)) => {
                tokens.push(Token {
                    text: &code[s..pos],
                    line,
                    column: code[..s].chars().count() + 1,
                });
                start = None;
            }
            _ => {}
        }
    }
    tokens
}

/// Parse a number string with optional unit suffix.
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (num_str, multiplier) = if let Some(last) = text.chars().last() {
        let mult = match last {
            'p' => 1e-12,
            'n' => 1e-9,
            'u' | 'µ' => 1e-6,
            'm' => 1e-3,
            'k' | 'K' => 1e3,
            'M' => 1e6,
            'G' => 1e9,
            _ => 1.0,
        };
        if mult != 1.0 {
            (&text[..text.len() - last.len_utf8()], mult)
        } else {
            (text, 1.0)
        }
    } else {
        (text, 1.0)
    };

    num_str.parse::<f64>().ok().map(|v| v * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_value() {
        assert_relative_eq!(parse_value("10k").unwrap(), 10_000.0);
        assert_relative_eq!(parse_value("4.7u").unwrap(), 4.7e-6);
        assert_relative_eq!(parse_value("2.2M").unwrap(), 2.2e6);
        assert_relative_eq!(parse_value("15").unwrap(), 15.0);
        assert_relative_eq!(parse_value("-2m").unwrap(), -2e-3);
        assert_relative_eq!(parse_value("1e-3").unwrap(), 1e-3);
        assert_eq!(parse_value("abc"), None);
        assert_eq!(parse_value(""), None);
    }

    #[test]
    fn test_tokenize_line() {
        let tokens = tokenize_line("  R1 in\tout 10k ; load", 3);
        let words: Vec<&str> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(words, ["R1", "in", "out", "10k"]);
        assert_eq!(tokens[0].column, 3);
        assert_eq!(tokens[1].column, 6);
        assert!(tokens.iter().all(|t| t.line == 3));
    }

    #[test]
    fn test_comment_lines() {
        assert!(tokenize_line("* title card", 1).is_empty());
        assert!(tokenize_line("# note", 1).is_empty());
        assert!(tokenize_line("   ", 1).is_empty());
    }
}
