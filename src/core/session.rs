use crate::cli::Cli;
use crate::commands::help::print_usage;
use crate::commands::{CommandRegistry, Context as CommandContext, EXIT_REQUESTED};
use crate::config::AppConfig;
use crate::core::control::{control_spec, extract_control_flags};
use crate::core::options::OptionSpec;
use crate::core::tokenizer::split;
use crate::terminal::Terminal;
use anyhow::Result;
use colored::*;
use log::{debug, info};
use rustyline::completion::{extract_word, Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config as EditorConfig, Context, EditMode, Editor};
use rustyline_derive::{Helper, Hinter, Validator};
use std::borrow::Cow;

/// Names a completion can offer for one command.
#[derive(Debug, Clone)]
struct CommandNames {
    names: Vec<String>,
    options: Vec<String>,
}

/// Command and option names, snapshotted from the registry for suggestions.
#[derive(Debug, Clone, Default)]
pub struct CompletionIndex {
    commands: Vec<CommandNames>,
    control: Vec<String>,
}

impl CompletionIndex {
    pub fn new(registry: &CommandRegistry) -> Self {
        let commands = registry
            .commands()
            .map(|command| CommandNames {
                names: std::iter::once(command.name().to_string())
                    .chain(command.aliases().iter().cloned())
                    .collect(),
                options: option_words(&command.options()),
            })
            .collect();

        Self {
            commands,
            control: option_words(&control_spec()),
        }
    }

    /// Candidates for `word`, given the text typed before it.
    pub fn suggest(&self, before: &str, word: &str) -> Vec<String> {
        let typed = split(before);
        let remaining = match extract_control_flags(&typed) {
            Ok((_, remaining)) => remaining,
            Err(_) => return Vec::new(),
        };

        let mut candidates: Vec<String> = match remaining.first() {
            None if !word.starts_with('-') => self
                .commands
                .iter()
                .flat_map(|command| command.names.iter())
                .filter(|name| name.starts_with(word))
                .cloned()
                .collect(),
            None => Vec::new(),
            Some(_) if !word.starts_with('-') => return Vec::new(),
            Some(name) => self
                .commands
                .iter()
                .find(|command| command.names.iter().any(|n| n == name))
                .map(|command| command.options.clone())
                .unwrap_or_default(),
        };

        if word.starts_with('-') {
            candidates.extend(self.control.iter().cloned());
            candidates.retain(|candidate| candidate.starts_with(word));
        }
        candidates.sort();
        candidates.dedup();
        candidates
    }
}

fn option_words(spec: &OptionSpec) -> Vec<String> {
    spec.iter()
        .flat_map(|(name, entry)| std::iter::once(name).chain(entry.aliases.iter()))
        .map(|name| {
            if name.chars().count() == 1 {
                format!("-{}", name)
            } else {
                format!("--{}", name)
            }
        })
        .collect()
}

#[derive(Helper, Hinter, Validator)]
struct SessionHelper {
    colored_prompt: String,
    index: CompletionIndex,
}

impl Completer for SessionHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let (start, word) = extract_word(line, pos, None, |c| c.is_whitespace());
        let candidates = self.index.suggest(&line[..start], word);
        debug!("Completion for '{}' at {}: {} candidates", word, start, candidates.len());

        let pairs = candidates
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Highlighter for SessionHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default && !self.colored_prompt.is_empty() {
            Cow::Borrowed(&self.colored_prompt)
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(hint.bright_black().to_string())
    }
}

pub struct Session {
    config: AppConfig,
    terminal: Terminal,
    registry: CommandRegistry,
    json: bool,
    exit_code: i32,
}

impl Session {
    pub async fn new(args: Cli) -> Result<Self> {
        let config = AppConfig::load(args.config)?;
        let terminal = Terminal::new(config.colors.enabled && !args.no_color)?;
        let registry = CommandRegistry::new(&config);

        debug!("Session initialized with config: {:?}", config);

        Ok(Self {
            config,
            terminal,
            registry,
            json: args.json,
            exit_code: 0,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let editor_config = EditorConfig::builder()
            .completion_type(CompletionType::List)
            .edit_mode(EditMode::Emacs)
            .max_history_size(self.config.history.max_entries)?
            .build();

        let mut editor: Editor<SessionHelper, DefaultHistory> = Editor::with_config(editor_config)?;
        editor.set_helper(Some(SessionHelper {
            colored_prompt: self.terminal.colorize_prompt(&self.config.prompt.format),
            index: CompletionIndex::new(&self.registry),
        }));

        loop {
            match editor.readline(&self.config.prompt.format) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    editor.add_history_entry(line)?;

                    if self.execute_command(line).await == EXIT_REQUESTED {
                        break;
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    self.terminal.print_info("^C").await?;
                }
                Err(rustyline::error::ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }

        info!("Session exiting with code: {}", self.exit_code);
        Ok(())
    }

    /// Resolves and runs one typed line, returning its exit code. Failures are
    /// reported on the terminal rather than propagated.
    pub async fn execute_command(&mut self, line: &str) -> i32 {
        self.exit_code = match self.dispatch(line).await {
            Ok(code) => code,
            Err(e) => {
                let _ = self.terminal.print_error(&format!("Error: {}", e)).await;
                1
            }
        };
        self.exit_code
    }

    async fn dispatch(&self, line: &str) -> Result<i32> {
        debug!("Processing command: {}", line);
        let (command, invocation) = self.registry.resolve(line)?;

        if invocation.flags.debug {
            let parsed = serde_json::to_string(&invocation.result)?;
            self.terminal
                .print_info(&format!("debug: {} {}", invocation.command, parsed))
                .await?;
        }

        if invocation.flags.help {
            print_usage(command);
            return Ok(0);
        }

        let ctx = CommandContext {
            registry: &self.registry,
            json: self.json,
        };
        command.execute(&invocation, &ctx).await
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }
}
