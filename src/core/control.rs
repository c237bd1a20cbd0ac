use super::options::{get_options, OptionSpec, OptionSpecEntry};
use crate::error::CommandLineResult;
use log::debug;

/// Internal flags that may appear anywhere in a typed line, even before the
/// command name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlFlags {
    pub debug: bool,
    pub help: bool,
}

pub fn control_spec() -> OptionSpec {
    let mut spec = OptionSpec::new();
    spec.insert("debug".to_string(), OptionSpecEntry::boolean());
    spec.insert("help".to_string(), OptionSpecEntry::boolean().with_aliases(["h"]));
    spec
}

/// Names and aliases in `spec` that a control flag would claim first.
pub fn control_conflicts(spec: &OptionSpec) -> Vec<String> {
    let control = control_spec();
    let reserved: Vec<&String> = control
        .iter()
        .flat_map(|(name, entry)| std::iter::once(name).chain(entry.aliases.iter()))
        .collect();

    spec.iter()
        .flat_map(|(name, entry)| std::iter::once(name).chain(entry.aliases.iter()))
        .filter(|word| reserved.contains(word))
        .cloned()
        .collect()
}

/// Pulls the control flags out of `words`, returning them with the words that
/// remain for command-specific parsing.
///
/// Only words before the first `--` are inspected; the terminator and
/// everything after it are handed back untouched.
pub fn extract_control_flags<S: AsRef<str>>(
    words: &[S],
) -> CommandLineResult<(ControlFlags, Vec<String>)> {
    let boundary = words
        .iter()
        .position(|word| word.as_ref() == "--")
        .unwrap_or(words.len());
    let (head, tail) = words.split_at(boundary);

    let result = get_options(&control_spec(), head)?;
    let flags = ControlFlags {
        debug: result.flag("debug"),
        help: result.flag("help"),
    };
    if flags != ControlFlags::default() {
        debug!("control flags: {:?}", flags);
    }

    let mut remaining = result.positional_args;
    remaining.extend(tail.iter().map(|word| word.as_ref().to_string()));
    Ok((flags, remaining))
}
