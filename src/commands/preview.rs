use super::{Command, Context, Invocation};
use crate::core::options::get_options;
use crate::core::render::to_command_line;
use anyhow::{anyhow, Result};
use serde_json::json;

/// Shows the normalized form of a command line as it would be dispatched.
pub struct PreviewCommand;

#[async_trait::async_trait]
impl Command for PreviewCommand {
    async fn execute(&self, invocation: &Invocation, ctx: &Context<'_>) -> Result<i32> {
        let Some((name, words)) = invocation.result.positional_args.split_first() else {
            return Err(anyhow!("preview: missing command name"));
        };

        let command = ctx
            .registry
            .find(name)
            .ok_or_else(|| anyhow!("Unknown command: {}", name))?;
        let spec = command.options();
        let result = get_options(&spec, words)?;

        let rendered = to_command_line(&spec, &result);
        let line = if rendered.is_empty() {
            command.name().to_string()
        } else {
            format!("{} {}", command.name(), rendered)
        };

        if ctx.json {
            println!("{}", json!({ "command": command.name(), "line": line, "parsed": result }));
        } else {
            println!("{}", line);
        }
        Ok(0)
    }

    fn name(&self) -> &str {
        "preview"
    }

    fn description(&self) -> &str {
        "Print the normalized form of a command line"
    }

    fn usage(&self) -> String {
        "preview <command> [args...]".to_string()
    }
}
