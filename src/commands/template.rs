use super::{Command, Context, Invocation};
use crate::config::CommandConfig;
use crate::core::options::{OptionSpec, ParseResult};
use anyhow::Result;
use serde_json::json;

/// A command defined in configuration that expands its arguments into a
/// text template.
pub struct TemplateCommand {
    name: String,
    config: CommandConfig,
}

impl TemplateCommand {
    pub fn new(name: &str, config: &CommandConfig) -> Self {
        Self {
            name: name.to_string(),
            config: config.clone(),
        }
    }
}

#[async_trait::async_trait]
impl Command for TemplateCommand {
    async fn execute(&self, invocation: &Invocation, ctx: &Context<'_>) -> Result<i32> {
        let output = expand(&self.config.template, &invocation.result);
        if ctx.json {
            println!("{}", json!({ "command": self.name, "output": output }));
        } else {
            println!("{}", output);
        }
        Ok(0)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.config.description
    }

    fn aliases(&self) -> &[String] {
        &self.config.aliases
    }

    fn options(&self) -> OptionSpec {
        self.config.options.clone()
    }
}

/// Replaces `{args}`, `{N}` and `{opt:name}` placeholders. Anything else in
/// braces is left as written.
pub fn expand(template: &str, result: &ParseResult) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        output.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let Some(end) = after.find('}') else {
            output.push_str(&rest[start..]);
            return output;
        };

        let key = &after[..end];
        match placeholder(key, result) {
            Some(value) => output.push_str(&value),
            None => {
                output.push('{');
                output.push_str(key);
                output.push('}');
            }
        }
        rest = &after[end + 1..];
    }

    output.push_str(rest);
    output
}

fn placeholder(key: &str, result: &ParseResult) -> Option<String> {
    if key == "args" {
        return Some(result.positional_args.join(" "));
    }
    if let Some(name) = key.strip_prefix("opt:") {
        return Some(
            result
                .options
                .get(name)
                .map(|value| value.to_display_string())
                .unwrap_or_default(),
        );
    }
    let index: usize = key.parse().ok()?;
    Some(result.positional_args.get(index).cloned().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::{get_options, OptionSpecEntry};

    fn parsed(words: &[&str]) -> ParseResult {
        let mut spec = OptionSpec::new();
        spec.insert("lang".to_string(), OptionSpecEntry::value());
        spec.insert("tag".to_string(), OptionSpecEntry::value().array());
        get_options(&spec, words).unwrap()
    }

    #[test]
    fn test_expand_args_and_indexes() {
        let result = parsed(&["rust", "lang"]);
        assert_eq!(expand("q={args}", &result), "q=rust lang");
        assert_eq!(expand("{1}/{0}/{2}", &result), "lang/rust/");
    }

    #[test]
    fn test_expand_options() {
        let result = parsed(&["--lang", "de", "--tag", "a", "--tag", "b", "x"]);
        assert_eq!(expand("{opt:lang}.wiki/{0}", &result), "de.wiki/x");
        assert_eq!(expand("[{opt:tag}]", &result), "[a b]");
        assert_eq!(expand("[{opt:missing}]", &result), "[]");
    }

    #[test]
    fn test_unknown_placeholders_kept() {
        let result = parsed(&[]);
        assert_eq!(expand("{json} and {unclosed", &result), "{json} and {unclosed");
    }
}
