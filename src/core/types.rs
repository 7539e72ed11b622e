use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

use crate::core::constants::tags;

/// A URL candidate found in a file.
///
/// Links are immutable once extracted. The same URL text found in two
/// files yields two links; only the first one admitted by the
/// deduplication gate is ever validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    /// The URL exactly as it appeared in the file
    pub url: String,
    /// Absolute path of the file the URL was found in
    pub path: PathBuf,
}

impl Link {
    pub fn new<S: Into<String>, P: Into<PathBuf>>(url: S, path: P) -> Self {
        Self {
            url: url.into(),
            path: path.into(),
        }
    }

    /// Get the URL as a string slice.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the source file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// Terminal classification of one probe.
///
/// Every variant carries exactly the data that makes sense for it, so a
/// result can never hold both a redirect target and an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The server answered with a status below 300
    Success { status: u16 },
    /// 301 or 308 with a resolvable `Location`
    PermanentRedirect { status: u16, target: Url },
    /// 302 or 307 with a resolvable `Location`
    TemporaryRedirect { status: u16, target: Url },
    /// Any other status the server answered with
    Failure { status: u16 },
    /// The URL could not be checked: it did not parse, the transport
    /// failed, the redirect was malformed, or rate limiting never ended.
    /// `status` is `None` when no response was received.
    Error {
        status: Option<u16>,
        reason: String,
    },
}

impl Outcome {
    pub fn error<S: Into<String>>(status: Option<u16>, reason: S) -> Self {
        Outcome::Error {
            status,
            reason: reason.into(),
        }
    }

    /// Five letter tag used by the pretty printer.
    pub fn tag(&self) -> &'static str {
        match self {
            Outcome::Success { .. } => tags::SUCCESS,
            Outcome::PermanentRedirect { .. } => tags::PERMANENT_REDIRECT,
            Outcome::TemporaryRedirect { .. } => tags::TEMPORARY_REDIRECT,
            Outcome::Failure { .. } => tags::FAILURE,
            Outcome::Error { .. } => tags::INTERNAL,
        }
    }

    /// Stable machine name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Success { .. } => "success",
            Outcome::PermanentRedirect { .. } => "redirect-permanent",
            Outcome::TemporaryRedirect { .. } => "redirect-temporary",
            Outcome::Failure { .. } => "failure",
            Outcome::Error { .. } => "error",
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Outcome::Success { status }
            | Outcome::PermanentRedirect { status, .. }
            | Outcome::TemporaryRedirect { status, .. }
            | Outcome::Failure { status } => Some(*status),
            Outcome::Error { status, .. } => *status,
        }
    }

    pub fn redirect_target(&self) -> Option<&Url> {
        match self {
            Outcome::PermanentRedirect { target, .. } | Outcome::TemporaryRedirect { target, .. } => {
                Some(target)
            }
            _ => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Outcome::Error { reason, .. } => Some(reason),
            _ => None,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

/// The final result for one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub link: Link,
    pub outcome: Outcome,
}

impl Action {
    pub fn new(link: Link, outcome: Outcome) -> Self {
        Self { link, outcome }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let status = self
            .outcome
            .status()
            .map(|s| s.to_string())
            .unwrap_or_else(|| tags::NO_STATUS.to_string());
        write!(f, "{} {}: {}", self.outcome.tag(), status, self.link)?;
        if let Some(target) = self.outcome.redirect_target() {
            write!(f, " -> {target}")?;
        }
        if let Some(reason) = self.outcome.reason() {
            write!(f, " ({reason})")?;
        }
        Ok(())
    }
}
