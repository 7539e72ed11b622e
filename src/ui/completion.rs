//! Shell completion generation for linch

use clap::{Command, CommandFactory};
use clap_complete::{Generator, Shell, generate};
use std::io::Write;

use crate::ui::cli::Cli;

/// Write the completion script for `generator` to `out`.
pub fn write_completions<G: Generator, W: Write>(generator: G, app: &mut Command, out: &mut W) {
    let name = app.get_name().to_string();
    generate(generator, app, name, out);
}

/// Print the completion script for `shell` to stdout.
pub fn print_completions(shell: Shell) {
    let mut app = Cli::command();
    write_completions(shell, &mut app, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script_for(shell: Shell) -> String {
        let mut out = Vec::new();
        write_completions(shell, &mut Cli::command(), &mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_bash_completions_mention_flags() {
        let script = script_for(Shell::Bash);

        assert!(script.contains("linch"));
        assert!(script.contains("--limit"));
        assert!(script.contains("--max-retries"));
        assert!(script.contains("completions"));
    }

    #[test]
    fn test_every_shell_generates_a_script() {
        for shell in [
            Shell::Bash,
            Shell::Zsh,
            Shell::Fish,
            Shell::PowerShell,
            Shell::Elvish,
        ] {
            assert!(!script_for(shell).is_empty(), "{shell} produced no script");
        }
    }
}
