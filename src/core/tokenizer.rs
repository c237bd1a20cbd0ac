use crate::error::{CommandLineError, CommandLineResult};
use log::trace;
use serde_json::Value;

/// Splits a typed line into shell-style words.
///
/// Handles whitespace separation, single and double quotes, and backslash
/// escapes. A matching quote only closes when followed by whitespace or the
/// end of input; elsewhere it is dropped and the quote stays open. Malformed
/// input never fails: a trailing backslash is dropped and an unterminated
/// quote runs to the end of the line.
pub fn split(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current: Option<String> = None;
    let mut open_quote: Option<char> = None;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                // A backslash at the very end escapes nothing.
                if let Some(escaped) = chars.next() {
                    current.get_or_insert_with(String::new).push(escaped);
                }
            }
            '"' | '\'' => match open_quote {
                None => {
                    open_quote = Some(ch);
                    current.get_or_insert_with(String::new);
                }
                Some(quote) if quote == ch => {
                    if chars.peek().map_or(true, |next| next.is_whitespace()) {
                        open_quote = None;
                    }
                }
                Some(_) => {
                    current.get_or_insert_with(String::new).push(ch);
                }
            },
            c if c.is_whitespace() && open_quote.is_none() => {
                if let Some(word) = current.take() {
                    words.push(word);
                }
            }
            _ => {
                current.get_or_insert_with(String::new).push(ch);
            }
        }
    }

    if let Some(quote) = open_quote {
        trace!("unterminated {} quote runs to end of input", quote);
    }

    if let Some(word) = current {
        words.push(word);
    }

    words
}

/// Entry point for loosely typed callers such as JSON messages from a host.
pub fn split_value(input: &Value) -> CommandLineResult<Vec<String>> {
    match input {
        Value::String(text) => Ok(split(text)),
        other => Err(CommandLineError::InvalidArgument(value_type_name(other).to_string())),
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Escapes a word so that [`split`] reads it back unchanged.
pub fn quote_word(word: &str) -> String {
    if word.is_empty() {
        return "''".to_string();
    }

    let mut quoted = String::with_capacity(word.len());
    for ch in word.chars() {
        if ch.is_whitespace() || matches!(ch, '\\' | '"' | '\'') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted
}
