pub mod control;
pub mod options;
pub mod render;
pub mod session;
pub mod tokenizer;

pub use control::{extract_control_flags, ControlFlags};
pub use options::{get_options, OptionKind, OptionSpec, OptionSpecEntry, OptionValue, ParseResult};
pub use render::to_command_line;
pub use session::Session;
pub use tokenizer::{split, split_value};
