use crate::config::AppConfig;
use crate::core::control::{control_conflicts, extract_control_flags, ControlFlags};
use crate::core::options::{get_options, OptionKind, OptionSpec, ParseResult};
use crate::core::tokenizer::split;
use anyhow::{anyhow, Result};
use log::{debug, warn};

pub mod echo;
pub mod exit;
pub mod help;
pub mod parse;
pub mod preview;
pub mod template;

/// Returned by a command to ask the session to stop.
pub const EXIT_REQUESTED: i32 = 130;

/// A typed line resolved against a command.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub command: String,
    pub flags: ControlFlags,
    pub result: ParseResult,
}

pub struct Context<'a> {
    pub registry: &'a CommandRegistry,
    pub json: bool,
}

#[async_trait::async_trait]
pub trait Command: Send + Sync {
    async fn execute(&self, invocation: &Invocation, ctx: &Context<'_>) -> Result<i32>;

    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn aliases(&self) -> &[String] {
        &[]
    }
    fn options(&self) -> OptionSpec {
        OptionSpec::new()
    }
    fn usage(&self) -> String {
        format!("{}{}", self.name(), options_usage(&self.options()))
    }
}

pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new(config: &AppConfig) -> Self {
        let mut commands: Vec<Box<dyn Command>> = vec![
            Box::new(help::HelpCommand),
            Box::new(parse::ParseCommand),
            Box::new(preview::PreviewCommand),
            Box::new(echo::EchoCommand),
            Box::new(exit::ExitCommand),
        ];

        for (name, command) in &config.commands {
            if commands.iter().any(|existing| existing.name() == name) {
                warn!("Configured command '{}' shadows a built-in and is ignored", name);
                continue;
            }
            for option in control_conflicts(&command.options) {
                warn!(
                    "Option '{}' of command '{}' is taken by a control flag and never reaches the command",
                    option, name
                );
            }
            commands.push(Box::new(template::TemplateCommand::new(name, command)));
        }

        Self { commands }
    }

    /// Finds a command by name, falling back to aliases.
    pub fn find(&self, name: &str) -> Option<&dyn Command> {
        self.commands
            .iter()
            .find(|command| command.name() == name)
            .or_else(|| {
                self.commands
                    .iter()
                    .find(|command| command.aliases().iter().any(|alias| alias == name))
            })
            .map(|command| command.as_ref())
    }

    pub fn commands(&self) -> impl Iterator<Item = &dyn Command> {
        self.commands.iter().map(|command| command.as_ref())
    }

    /// Splits `line`, strips control flags, and parses the tail against the
    /// named command's options.
    pub fn resolve(&self, line: &str) -> Result<(&dyn Command, Invocation)> {
        let words = split(line);
        let (flags, mut words) = extract_control_flags(&words)?;

        if words.is_empty() {
            return Err(anyhow!("Empty command"));
        }
        let name = words.remove(0);

        let command = self
            .find(&name)
            .ok_or_else(|| anyhow!("Unknown command: {}", name))?;
        let result = get_options(&command.options(), &words)?;
        debug!("Resolved '{}' to {}: {:?}", line, command.name(), result);

        let invocation = Invocation {
            command: command.name().to_string(),
            flags,
            result,
        };
        Ok((command, invocation))
    }
}

/// One `[--name]`-style fragment per option, in spec order.
pub fn options_usage(spec: &OptionSpec) -> String {
    let mut usage = String::new();
    for (name, entry) in spec {
        let fragment = match entry.kind {
            OptionKind::Boolean => format!("--[no-]{}", name),
            OptionKind::Incremental => format!("--{}...", name),
            OptionKind::Value if entry.array => format!("--{} <value>...", name),
            OptionKind::Value => format!("--{} <value>", name),
            OptionKind::Unknown(_) => continue,
        };
        usage.push_str(&format!(" [{}]", fragment));
    }
    usage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::{OptionSpecEntry, OptionValue};

    fn registry() -> CommandRegistry {
        CommandRegistry::new(&AppConfig::with_sample_commands())
    }

    #[test]
    fn test_find_by_name_and_alias() {
        let registry = registry();
        assert_eq!(registry.find("search").map(|c| c.name()), Some("search"));
        assert_eq!(registry.find("g").map(|c| c.name()), Some("search"));
        assert!(registry.find("nope").is_none());
    }

    #[test]
    fn test_resolve_with_control_flags_before_command() {
        let registry = registry();
        let (command, invocation) = registry.resolve("--debug g -s docs.rs 'async trait'").unwrap();
        assert_eq!(command.name(), "search");
        assert!(invocation.flags.debug);
        assert_eq!(
            invocation.result.options.get("site"),
            Some(&OptionValue::Text(Some("docs.rs".to_string())))
        );
        assert_eq!(invocation.result.positional_args, vec!["async trait"]);
    }

    #[test]
    fn test_resolve_errors() {
        let registry = registry();
        assert!(registry.resolve("   ").is_err());
        assert!(registry.resolve("--debug").is_err());
        assert!(registry.resolve("missing arg").is_err());
    }

    #[test]
    fn test_builtins_win_over_configured_commands() {
        let mut config = AppConfig::default();
        config.commands.insert("help".to_string(), Default::default());
        let registry = CommandRegistry::new(&config);
        assert_eq!(registry.commands().filter(|c| c.name() == "help").count(), 1);
    }

    #[test]
    fn test_control_name_in_configured_options_is_shadowed() {
        let mut config = AppConfig::default();
        let mut options = OptionSpec::new();
        options.insert("host".to_string(), OptionSpecEntry::value().with_aliases(["h"]));
        config.commands.insert(
            "ping".to_string(),
            crate::config::CommandConfig {
                template: "{opt:host}".to_string(),
                options,
                ..Default::default()
            },
        );
        let registry = CommandRegistry::new(&config);

        let (_, invocation) = registry.resolve("ping -h example.org").unwrap();
        assert!(invocation.flags.help);
        assert!(!invocation.result.options.contains_key("host"));
        assert_eq!(invocation.result.positional_args, vec!["example.org"]);
    }

    #[test]
    fn test_options_usage() {
        let mut spec = OptionSpec::new();
        spec.insert("all".to_string(), OptionSpecEntry::boolean());
        spec.insert("tag".to_string(), OptionSpecEntry::value().array());
        spec.insert("v".to_string(), OptionSpecEntry::incremental());
        assert_eq!(
            options_usage(&spec),
            " [--[no-]all] [--tag <value>...] [--v...]"
        );
    }
}
