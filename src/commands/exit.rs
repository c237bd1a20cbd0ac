use super::{Command, Context, Invocation, EXIT_REQUESTED};
use anyhow::Result;

pub struct ExitCommand;

#[async_trait::async_trait]
impl Command for ExitCommand {
    async fn execute(&self, _invocation: &Invocation, _ctx: &Context<'_>) -> Result<i32> {
        Ok(EXIT_REQUESTED)
    }

    fn name(&self) -> &str {
        "exit"
    }

    fn description(&self) -> &str {
        "Leave the interactive prompt"
    }
}
