//! Textual rendering and parsing of PAD values in the "pure" and
//! "HWhile" (`@`-tag-prefixed) formats. Internally a
//! [`serde_json::Value`] always carries tags in their bare ("pure") form;
//! the `@` prefix is purely a presentation detail applied to, or stripped
//! from, the first element of each list.

use serde_json::Value;
use while_errors::{Result, ToolchainError};

fn malformed(message: impl Into<String>) -> ToolchainError {
    ToolchainError::MalformedPad(message.into())
}

/// Renders `value` in the "pure" textual format: bare tags, e.g. `[':=', 1, ['var', 0]]`.
pub fn render_pure(value: &Value) -> String {
    render(value, false, true)
}

/// Renders `value` in the "HWhile" textual format: every tag prefixed with
/// `@`, e.g. `[@':=', 1, [@'var', 0]]`.
pub fn render_hwhile(value: &Value) -> String {
    render(value, true, true)
}

fn render(value: &Value, hwhile: bool, is_tag_position: bool) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if is_tag_position && hwhile {
                format!("'@{s}'")
            } else {
                format!("'{s}'")
            }
        }
        Value::Array(items) => {
            let rendered: Vec<String> =
                items.iter().enumerate().map(|(i, item)| render(item, hwhile, i == 0)).collect();
            format!("[{}]", rendered.join(", "))
        }
        other => unreachable!("PAD values are only numbers, strings, and arrays, found {other:?}"),
    }
}

/// Parses a PAD value written in either the "pure" or "HWhile" textual
/// format, normalising `@`-prefixed tags away so decoding accepts either.
pub fn parse_pad(text: &str) -> Result<Value> {
    let mut parser = TextParser { chars: text.char_indices().peekable(), source: text };
    let value = parser.parse_value()?;
    parser.skip_ws();
    if parser.chars.peek().is_some() {
        return Err(malformed("unexpected trailing input after a complete PAD value"));
    }
    Ok(value)
}

struct TextParser<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    source: &'a str,
}

impl<'a> TextParser<'a> {
    fn skip_ws(&mut self) {
        while matches!(self.chars.peek(), Some((_, c)) if c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        self.skip_ws();
        match self.chars.peek() {
            Some((_, '[')) => self.parse_list(),
            Some(_) => self.parse_atom(),
            None => Err(malformed("unexpected end of input while parsing a PAD value")),
        }
    }

    fn parse_list(&mut self) -> Result<Value> {
        self.chars.next(); // consume '['
        let mut items = Vec::new();
        self.skip_ws();
        if matches!(self.chars.peek(), Some((_, ']'))) {
            self.chars.next();
            return Ok(Value::Array(items));
        }
        loop {
            items.push(self.parse_value()?);
            self.skip_ws();
            match self.chars.next() {
                Some((_, ',')) => {
                    self.skip_ws();
                    continue;
                }
                Some((_, ']')) => break,
                _ => return Err(malformed("expected ',' or ']' in a PAD list")),
            }
        }
        Ok(Value::Array(items))
    }

    fn parse_atom(&mut self) -> Result<Value> {
        let start = self.chars.peek().map(|(i, _)| *i).unwrap_or(self.source.len());
        let quoted = matches!(self.chars.peek(), Some((_, '\'')));
        if quoted {
            self.chars.next();
        }
        let mut end = start + if quoted { 1 } else { 0 };
        while let Some(&(i, c)) = self.chars.peek() {
            if quoted {
                if c == '\'' {
                    self.chars.next();
                    end = i + 1;
                    break;
                }
            } else if c == ',' || c == '[' || c == ']' || c.is_whitespace() {
                break;
            }
            end = i + c.len_utf8();
            self.chars.next();
        }
        let raw = &self.source[start..end];
        let unquoted = raw.trim_matches('\'');
        let normalised = unquoted.strip_prefix('@').unwrap_or(unquoted);
        if !normalised.is_empty() && normalised.chars().all(|c| c.is_ascii_digit()) {
            let n: u64 = normalised.parse().map_err(|_| malformed(format!("'{normalised}' is not a valid index")))?;
            Ok(Value::from(n))
        } else {
            Ok(Value::String(normalised.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn renders_pure_format() {
        let value = json!([0, [[":=", 1, ["var", 0]]], 1]);
        assert_eq!(render_pure(&value), "[0, [[':=', 1, ['var', 0]]], 1]");
    }

    #[test]
    fn renders_hwhile_format_with_at_prefixed_tags() {
        let value = json!([0, [[":=", 1, ["var", 0]]], 1]);
        assert_eq!(render_hwhile(&value), "[0, [['@:=', 1, ['@var', 0]]], 1]");
    }

    #[test]
    fn parses_pure_text_back_into_the_same_value() {
        let value = json!([0, [[":=", 1, ["var", 0]]], 1]);
        let text = render_pure(&value);
        assert_eq!(parse_pad(&text).unwrap(), value);
    }

    #[test]
    fn parses_hwhile_text_into_the_normalised_value() {
        let value = json!([0, [[":=", 1, ["var", 0]]], 1]);
        let text = render_hwhile(&value);
        assert_eq!(parse_pad(&text).unwrap(), value);
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(parse_pad("[0, [], 1] extra").is_err());
    }
}
