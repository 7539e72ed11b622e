//! Output formatting for validated links

use std::io::{self, Write};
use std::str::FromStr;

use serde_json::json;

use crate::core::constants::{output_formats, tags};
use crate::core::error::LinchError;
use crate::core::types::{Action, Outcome};
use crate::ui::color::{Colors, colorize_if};

/// How result lines are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `TAG STATUS: URL`, colored when enabled
    #[default]
    Pretty,
    /// Shell commands that rewrite permanently redirected URLs in place
    Fix,
    /// One JSON object per line
    Json,
}

impl FromStr for OutputFormat {
    type Err = LinchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            output_formats::PRETTY => Ok(OutputFormat::Pretty),
            output_formats::FIX => Ok(OutputFormat::Fix),
            output_formats::JSON => Ok(OutputFormat::Json),
            other => Err(LinchError::InvalidArgument(format!(
                "Unknown output format '{other}'. Expected one of: {}",
                output_formats::ALL.join(", ")
            ))),
        }
    }
}

/// Renders one line per [`Action`].
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    format: OutputFormat,
    color: bool,
}

impl Printer {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Self { format, color }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// The line for `action`, or `None` when the format skips it.
    pub fn render(&self, action: &Action) -> Option<String> {
        match self.format {
            OutputFormat::Pretty => Some(pretty_line(action, self.color)),
            OutputFormat::Fix => fix_line(action),
            OutputFormat::Json => Some(json_line(action)),
        }
    }

    /// Write the line for `action` to `out`, followed by a newline.
    pub fn write<W: Write>(&self, out: &mut W, action: &Action) -> io::Result<()> {
        match self.render(action) {
            Some(line) => writeln!(out, "{line}"),
            None => Ok(()),
        }
    }

    /// Like [`Printer::write`], but a reader that went away ends the output
    /// instead of failing it. Returns `false` once nothing more should be
    /// written.
    pub fn emit<W: Write>(&self, out: &mut W, action: &Action) -> io::Result<bool> {
        match self.write(out, action) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(false),
            Err(err) => Err(err),
        }
    }
}

fn status_color(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Success { .. } => Colors::GREEN,
        Outcome::PermanentRedirect { .. } => Colors::YELLOW,
        Outcome::TemporaryRedirect { .. } => Colors::BLUE,
        Outcome::Failure { .. } => Colors::RED,
        Outcome::Error { .. } => Colors::MAGENTA,
    }
}

fn pretty_line(action: &Action, color: bool) -> String {
    let outcome = &action.outcome;
    let status = outcome
        .status()
        .map(|status| status.to_string())
        .unwrap_or_else(|| tags::NO_STATUS.to_string());

    let mut line = format!(
        "{} {}: {}",
        outcome.tag(),
        colorize_if(color, &status, status_color(outcome)),
        action.link.url()
    );
    if let Some(target) = outcome.redirect_target() {
        line.push_str(&format!(" -> {target}"));
    }
    if let Some(reason) = outcome.reason() {
        line.push_str(&format!(" ({reason})"));
    }
    line
}

fn fix_line(action: &Action) -> Option<String> {
    match &action.outcome {
        Outcome::PermanentRedirect { target, .. } => {
            let script = sed_script(action.link.url(), target.as_str());
            Some(format!(
                "sed -i {} {}",
                shell_quote(&script),
                shell_quote(&action.link.path().to_string_lossy())
            ))
        }
        Outcome::Error { .. } => Some(format!("# {action}")),
        _ => None,
    }
}

fn json_line(action: &Action) -> String {
    let outcome = &action.outcome;
    json!({
        "url": action.link.url(),
        "path": action.link.path().to_string_lossy(),
        "kind": outcome.kind(),
        "status": outcome.status(),
        "target": outcome.redirect_target().map(|target| target.as_str()),
        "reason": outcome.reason(),
    })
    .to_string()
}

/// Matches the first character after a URL that cannot belong to it.
const URL_BOUNDARY: &str = r"\([^-a-zA-Z0-9@:%_+.~#?&/=]\)";

/// Build a sed script replacing `old` with `new` only where `old` is the
/// whole URL: followed by a non-URL character, or at the end of a line.
pub fn sed_script(old: &str, new: &str) -> String {
    let pattern = sed_escape_pattern(old);
    let replacement = sed_escape_replacement(new);
    format!("s|{pattern}{URL_BOUNDARY}|{replacement}\\1|g;s|{pattern}$|{replacement}|")
}

/// Escape `text` for use as a literal in a sed regular expression
/// delimited by `|`.
pub fn sed_escape_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '.' | '*' | '[' | ']' | '^' | '$' | '|') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Escape `text` for use as a literal sed replacement delimited by `|`.
pub fn sed_escape_replacement(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '&' | '|') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Quote `text` as a single POSIX shell word.
pub fn shell_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}
