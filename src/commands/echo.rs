use super::{Command, Context, Invocation};
use crate::core::options::{OptionSpec, OptionSpecEntry};
use anyhow::Result;
use std::io::Write;

pub struct EchoCommand;

#[async_trait::async_trait]
impl Command for EchoCommand {
    async fn execute(&self, invocation: &Invocation, _ctx: &Context<'_>) -> Result<i32> {
        let result = &invocation.result;
        let mut text = result.positional_args.join(" ");
        if result.flag("upper") {
            text = text.to_uppercase();
        }

        let mut stdout = std::io::stdout();
        if result.flag("n") {
            write!(stdout, "{}", text)?;
        } else {
            writeln!(stdout, "{}", text)?;
        }
        stdout.flush()?;

        Ok(0)
    }

    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Print the arguments as words"
    }

    fn options(&self) -> OptionSpec {
        let mut spec = OptionSpec::new();
        spec.insert("n".to_string(), OptionSpecEntry::boolean());
        spec.insert("upper".to_string(), OptionSpecEntry::boolean().with_aliases(["u"]));
        spec
    }
}
