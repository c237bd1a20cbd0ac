//! Turns free-form typed command lines into a command name plus a structured
//! set of options and positional arguments.
//!
//! The engine is two pure functions: [`split`] tokenizes a line shell-style and
//! [`get_options`] resolves the words against an [`OptionSpec`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod terminal;

pub use crate::core::{
    extract_control_flags, get_options, split, split_value, to_command_line, ControlFlags,
    OptionKind, OptionSpec, OptionSpecEntry, OptionValue, ParseResult,
};
pub use error::{CommandLineError, CommandLineResult};
