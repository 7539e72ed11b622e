//! User interface
//!
//! CLI parsing, result line formatting, terminal colors and shell
//! completion generation.

pub mod cli;
pub mod color;
pub mod completion;
pub mod output;

// Re-export commonly used items
pub use cli::{Cli, Commands, cli_to_config};
pub use color::color_enabled;
pub use completion::print_completions;
pub use output::{OutputFormat, Printer};
