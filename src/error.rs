use thiserror::Error;

/// Failures raised by the tokenizer and option parser.
///
/// Everything else (unknown options, missing values, dangling quotes) degrades
/// gracefully and never surfaces here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandLineError {
    #[error("invalid argument: expected a string, got {0}")]
    InvalidArgument(String),

    #[error("unknown option type '{kind}' for option '{option}'")]
    UnknownOptionType { option: String, kind: String },
}

pub type CommandLineResult<T> = std::result::Result<T, CommandLineError>;
