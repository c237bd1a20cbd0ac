use super::{Command, Context, Invocation};
use anyhow::Result;

pub struct HelpCommand;

#[async_trait::async_trait]
impl Command for HelpCommand {
    async fn execute(&self, invocation: &Invocation, ctx: &Context<'_>) -> Result<i32> {
        let args = &invocation.result.positional_args;

        if args.is_empty() {
            println!("omnicmd - typed command lines, resolved");
            println!();
            println!("Commands:");
            for command in ctx.registry.commands() {
                println!("  {:10} - {}", command.name(), command.description());
            }
            println!();
            println!("Use 'help <command>' or '<command> --help' for details.");
            return Ok(0);
        }

        let name = &args[0];
        match ctx.registry.find(name) {
            Some(command) => {
                print_usage(command);
                Ok(0)
            }
            None => {
                println!("Unknown command: {}", name);
                Ok(1)
            }
        }
    }

    fn name(&self) -> &str {
        "help"
    }

    fn description(&self) -> &str {
        "Display help information"
    }

    fn usage(&self) -> String {
        "help [command]".to_string()
    }
}

pub fn print_usage(command: &dyn Command) {
    println!("{} - {}", command.name(), command.description());
    if !command.aliases().is_empty() {
        println!("Aliases: {}", command.aliases().join(", "));
    }
    println!();
    println!("Usage:");
    println!("  {}", command.usage());
}
