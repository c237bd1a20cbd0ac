use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "omnicmd",
    version,
    about = "Resolve typed command lines into commands, options and arguments",
    long_about = "omnicmd splits free-form command lines shell-style, resolves the command name, and parses its options against a per-command option spec."
)]
pub struct Cli {
    /// Configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Resolve and run a single command line, then exit
    #[arg(short = 'c', long)]
    pub command: Option<String>,

    /// Print command output as JSON where supported
    #[arg(long)]
    pub json: bool,

    /// Verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
