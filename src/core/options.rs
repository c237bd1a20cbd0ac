use crate::error::{CommandLineError, CommandLineResult};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// How occurrences of an option are interpreted.
///
/// Specs usually come from configuration files, so any kind string outside
/// the three known ones is kept as [`OptionKind::Unknown`] and only rejected
/// once an occurrence of that option is actually matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OptionKind {
    Boolean,
    Value,
    Incremental,
    Unknown(String),
}

impl From<String> for OptionKind {
    fn from(kind: String) -> Self {
        match kind.to_ascii_lowercase().as_str() {
            "boolean" => OptionKind::Boolean,
            "value" => OptionKind::Value,
            "incremental" => OptionKind::Incremental,
            _ => OptionKind::Unknown(kind),
        }
    }
}

impl From<OptionKind> for String {
    fn from(kind: OptionKind) -> Self {
        match kind {
            OptionKind::Boolean => "boolean".to_string(),
            OptionKind::Value => "value".to_string(),
            OptionKind::Incremental => "incremental".to_string(),
            OptionKind::Unknown(kind) => kind,
        }
    }
}

/// A resolved option value. Serializes to plain JSON/TOML scalars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Flag(bool),
    Count(u64),
    Text(Option<String>),
    List(Vec<Option<String>>),
}

impl OptionValue {
    /// Renders the value for display and template expansion.
    pub fn to_display_string(&self) -> String {
        match self {
            OptionValue::Flag(flag) => flag.to_string(),
            OptionValue::Count(count) => count.to_string(),
            OptionValue::Text(text) => text.clone().unwrap_or_default(),
            OptionValue::List(items) => items
                .iter()
                .map(|item| item.as_deref().unwrap_or(""))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSpecEntry {
    pub kind: OptionKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub array: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<OptionValue>,
}

impl OptionSpecEntry {
    pub fn new(kind: OptionKind) -> Self {
        Self {
            kind,
            aliases: Vec::new(),
            array: false,
            default: None,
        }
    }

    pub fn boolean() -> Self {
        Self::new(OptionKind::Boolean)
    }

    pub fn value() -> Self {
        Self::new(OptionKind::Value)
    }

    pub fn incremental() -> Self {
        Self::new(OptionKind::Incremental)
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Accumulate one entry per occurrence instead of overwriting.
    pub fn array(mut self) -> Self {
        self.array = true;
        self
    }

    pub fn with_default(mut self, default: OptionValue) -> Self {
        self.default = Some(default);
        self
    }

    fn seed(&self) -> Option<OptionValue> {
        let default = self.default.clone()?;
        if self.array && self.kind == OptionKind::Value {
            return Some(match default {
                OptionValue::Text(text) => OptionValue::List(vec![text]),
                other => other,
            });
        }
        Some(default)
    }
}

/// Canonical option name to its description.
pub type OptionSpec = BTreeMap<String, OptionSpecEntry>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub options: BTreeMap<String, OptionValue>,
    pub positional_args: Vec<String>,
}

impl ParseResult {
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.options.get(name), Some(OptionValue::Flag(true)))
    }

    pub fn count(&self, name: &str) -> u64 {
        match self.options.get(name) {
            Some(OptionValue::Count(count)) => *count,
            _ => 0,
        }
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        match self.options.get(name) {
            Some(OptionValue::Text(text)) => text.as_deref(),
            Some(OptionValue::List(items)) => items.iter().rev().find_map(|item| item.as_deref()),
            _ => None,
        }
    }
}

/// How a single word reads to the parser. One or more leading dashes followed
/// by a non-empty name make an option.
enum WordShape<'w> {
    Terminator,
    Option { name: &'w str, inline: Option<&'w str> },
    Plain,
}

/// `-name`, `--name` or `--name=value`; anything else is a plain word.
///
/// Any number of leading dashes is accepted, so `---name` and `----name` are
/// options too. Only the exact word `--` is a terminator.
fn classify(word: &str) -> WordShape<'_> {
    if word == "--" {
        return WordShape::Terminator;
    }

    let body = word.trim_start_matches('-');
    if body.len() == word.len() {
        return WordShape::Plain;
    }

    let (name, inline) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };

    if name.is_empty() {
        WordShape::Plain
    } else {
        WordShape::Option { name, inline }
    }
}

#[derive(Clone, Copy)]
struct Occurrence<'s> {
    name: &'s str,
    entry: &'s OptionSpecEntry,
    negated: bool,
}

/// Resolves a name to its canonical spec entry: exact name, then alias, then
/// a `no-`/`no` negation of a boolean or incremental option.
///
/// Negation prefixes are peeled one at a time, `no-` before `no`, and every
/// peel flips the occurrence, so `no-no-x` is a plain `x`.
fn resolve<'s>(spec: &'s OptionSpec, name: &str) -> CommandLineResult<Option<Occurrence<'s>>> {
    let mut current = name;
    let mut peeled = 0usize;

    loop {
        if let Some((canonical, entry)) = lookup(spec, current) {
            if peeled == 0 {
                return Ok(Some(Occurrence {
                    name: canonical,
                    entry,
                    negated: false,
                }));
            }
            return match &entry.kind {
                OptionKind::Boolean | OptionKind::Incremental => Ok(Some(Occurrence {
                    name: canonical,
                    entry,
                    negated: peeled % 2 == 1,
                })),
                OptionKind::Value => Ok(None),
                OptionKind::Unknown(kind) => Err(CommandLineError::UnknownOptionType {
                    option: canonical.to_string(),
                    kind: kind.clone(),
                }),
            };
        }

        let rest = ["no-", "no"]
            .iter()
            .filter_map(|prefix| current.strip_prefix(*prefix))
            .find(|rest| !rest.is_empty());
        match rest {
            Some(rest) => {
                current = rest;
                peeled += 1;
            }
            None => return Ok(None),
        }
    }
}

fn lookup<'s>(spec: &'s OptionSpec, name: &str) -> Option<(&'s String, &'s OptionSpecEntry)> {
    spec.get_key_value(name).or_else(|| {
        spec.iter()
            .find(|(_, entry)| entry.aliases.iter().any(|alias| alias == name))
    })
}

struct ParseState<'s> {
    result: ParseResult,
    explicit: BTreeSet<&'s str>,
    pending: Option<Occurrence<'s>>,
}

impl<'s> ParseState<'s> {
    fn seeded(spec: &'s OptionSpec) -> Self {
        let options = spec
            .iter()
            .filter_map(|(name, entry)| entry.seed().map(|value| (name.clone(), value)))
            .collect();

        Self {
            result: ParseResult {
                options,
                positional_args: Vec::new(),
            },
            explicit: BTreeSet::new(),
            pending: None,
        }
    }

    fn assign(&mut self, occurrence: Occurrence<'s>, value: Option<&str>) {
        let value = value.map(str::to_string);
        trace!("option '{}' = {:?}", occurrence.name, value);

        if !occurrence.entry.array {
            self.result
                .options
                .insert(occurrence.name.to_string(), OptionValue::Text(value));
            return;
        }

        // The first explicit occurrence replaces a seeded default list.
        let first = self.explicit.insert(occurrence.name);
        let slot = self
            .result
            .options
            .entry(occurrence.name.to_string())
            .or_insert_with(|| OptionValue::List(Vec::new()));
        match slot {
            OptionValue::List(items) if !first => items.push(value),
            other => *other = OptionValue::List(vec![value]),
        }
    }

    fn flush_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!("option '{}' has no value", pending.name);
            self.assign(pending, None);
        }
    }

    fn apply(
        &mut self,
        occurrence: Occurrence<'s>,
        inline: Option<&str>,
        word: &str,
    ) -> CommandLineResult<()> {
        self.flush_pending();

        let name = occurrence.name;
        match (&occurrence.entry.kind, inline) {
            (OptionKind::Unknown(kind), _) => {
                return Err(CommandLineError::UnknownOptionType {
                    option: name.to_string(),
                    kind: kind.clone(),
                });
            }
            (OptionKind::Boolean | OptionKind::Incremental, Some(_)) => {
                debug!("option '{}' takes no value, keeping '{}' as an argument", name, word);
                self.result.positional_args.push(word.to_string());
            }
            (OptionKind::Boolean, None) => {
                self.result
                    .options
                    .insert(name.to_string(), OptionValue::Flag(!occurrence.negated));
            }
            (OptionKind::Incremental, None) => {
                let current = match self.result.options.get(name) {
                    Some(OptionValue::Count(count)) => *count,
                    _ => 0,
                };
                let next = if occurrence.negated {
                    current.saturating_sub(1)
                } else {
                    current.saturating_add(1)
                };
                self.result
                    .options
                    .insert(name.to_string(), OptionValue::Count(next));
            }
            (OptionKind::Value, Some(value)) => self.assign(occurrence, Some(value)),
            (OptionKind::Value, None) => self.pending = Some(occurrence),
        }

        Ok(())
    }

    fn plain(&mut self, word: &str) {
        match self.pending.take() {
            Some(pending) => self.assign(pending, Some(word)),
            None => self.result.positional_args.push(word.to_string()),
        }
    }
}

/// Parses `words` against `spec`.
///
/// Unknown option-looking words are kept as positional arguments (or consumed
/// as the value of a pending option). The only failure is matching an option
/// whose kind is not one of the known [`OptionKind`]s.
pub fn get_options<S: AsRef<str>>(spec: &OptionSpec, words: &[S]) -> CommandLineResult<ParseResult> {
    let mut state = ParseState::seeded(spec);
    let mut cursor = 0;

    while cursor < words.len() {
        let word = words[cursor].as_ref();
        cursor += 1;

        match classify(word) {
            WordShape::Terminator => {
                state.flush_pending();
                state
                    .result
                    .positional_args
                    .extend(words[cursor..].iter().map(|w| w.as_ref().to_string()));
                break;
            }
            WordShape::Option { name, inline } => match resolve(spec, name)? {
                Some(occurrence) => state.apply(occurrence, inline, word)?,
                None => {
                    trace!("'{}' is not a known option", word);
                    state.plain(word);
                }
            },
            WordShape::Plain => state.plain(word),
        }
    }

    state.flush_pending();
    Ok(state.result)
}
