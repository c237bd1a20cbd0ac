use super::{Command, Context, Invocation};
use crate::core::options::{get_options, OptionSpec, OptionSpecEntry};
use anyhow::{Context as _, Result};

/// Parses its own arguments against an option spec given inline as JSON and
/// prints the result. Handy for checking how a line will be understood.
pub struct ParseCommand;

#[async_trait::async_trait]
impl Command for ParseCommand {
    async fn execute(&self, invocation: &Invocation, _ctx: &Context<'_>) -> Result<i32> {
        let spec: OptionSpec = match invocation.result.value("spec") {
            Some(json) => serde_json::from_str(json).context("invalid --spec JSON")?,
            None => OptionSpec::new(),
        };

        let result = get_options(&spec, &invocation.result.positional_args)?;
        println!("{}", serde_json::to_string_pretty(&result)?);
        Ok(0)
    }

    fn name(&self) -> &str {
        "parse"
    }

    fn description(&self) -> &str {
        "Show how words parse against an option spec"
    }

    fn options(&self) -> OptionSpec {
        let mut spec = OptionSpec::new();
        spec.insert("spec".to_string(), OptionSpecEntry::value());
        spec
    }

    fn usage(&self) -> String {
        "parse [--spec <json>] [--] [words...]".to_string()
    }
}
