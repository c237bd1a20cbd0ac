use super::options::{OptionKind, OptionSpec, OptionValue, ParseResult};
use super::tokenizer::quote_word;

/// Rebuilds a displayable command line from a parse result.
///
/// The output is not byte-identical to what was typed, but parsing it again
/// with the same spec yields an equivalent result.
pub fn to_command_line(spec: &OptionSpec, result: &ParseResult) -> String {
    let mut words: Vec<String> = Vec::new();

    for (name, value) in &result.options {
        let Some(entry) = spec.get(name) else {
            continue;
        };

        match (&entry.kind, value) {
            (OptionKind::Boolean, OptionValue::Flag(true)) => words.push(format!("--{}", name)),
            (OptionKind::Boolean, OptionValue::Flag(false)) => words.push(format!("--no-{}", name)),
            (OptionKind::Incremental, OptionValue::Count(count)) => {
                let base = match entry.default {
                    Some(OptionValue::Count(base)) => base,
                    _ => 0,
                };
                let (flag, times) = if *count >= base {
                    (format!("--{}", name), count - base)
                } else {
                    (format!("--no-{}", name), base - count)
                };
                for _ in 0..times {
                    words.push(flag.clone());
                }
                // A zero count with nothing seeded only exists because of a negation.
                if times == 0 && entry.default.is_none() {
                    words.push(format!("--no-{}", name));
                }
            }
            (OptionKind::Value, OptionValue::Text(text)) => words.push(value_word(name, text.as_deref())),
            (OptionKind::Value, OptionValue::List(items)) => {
                for item in items {
                    words.push(value_word(name, item.as_deref()));
                }
            }
            _ => {}
        }
    }

    if !result.positional_args.is_empty() {
        words.push("--".to_string());
        words.extend(result.positional_args.iter().map(|arg| quote_word(arg)));
    }

    words.join(" ")
}

fn value_word(name: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => format!("--{}={}", name, quote_word(value)),
        None => format!("--{}", name),
    }
}
