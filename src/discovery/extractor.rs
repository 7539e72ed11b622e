use grep::regex::RegexMatcher;
use grep::searcher::Searcher;
use grep::searcher::sinks::Lossy;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::sync::mpsc;

use crate::core::error::{LinchError, Result};
use crate::core::types::Link;
use crate::discovery::path_utils::absolute_path;

use std::fs;
use std::io::BufRead;
use std::path::Path;

/// `scheme://` followed by a `[www.]domain.tld`, `localhost` or IPv4 host,
/// then whatever path and query characters follow.
const URL_PATTERN: &str = concat!(
    r"https?://",
    r"(?:(?:www\.)?[-a-zA-Z0-9@:%._+~#=]{2,256}\.[a-z]{2,4}\b",
    r"|localhost(?::[0-9]{1,5})?\b",
    r"|[0-9]{1,3}(?:\.[0-9]{1,3}){3}(?::[0-9]{1,5})?\b)",
    r"[-a-zA-Z0-9@:%_+.~#?&/=]*",
);

// Selects candidate lines while the file is streamed
static REGEX_MATCHER: Lazy<RegexMatcher> =
    Lazy::new(|| RegexMatcher::new(URL_PATTERN).expect("Failed to compile URL regex pattern"));

// Pulls every URL out of a candidate line
static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(URL_PATTERN).expect("Failed to compile URL regex pattern"));

/// Receiver of extracted links.
pub trait LinkSink {
    /// Hand over one link. Returning `false` stops extraction.
    fn accept(&mut self, link: Link) -> bool;
}

impl LinkSink for Vec<Link> {
    fn accept(&mut self, link: Link) -> bool {
        self.push(link);
        true
    }
}

/// Blocks while the channel is full, so this must run off the async
/// worker threads (e.g. inside `spawn_blocking`).
impl LinkSink for mpsc::Sender<Link> {
    fn accept(&mut self, link: Link) -> bool {
        self.blocking_send(link).is_ok()
    }
}

/// What happened to a single path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathScan {
    /// Missing, unreadable or a directory
    Skipped,
    /// Fully scanned
    Scanned { links: usize },
    /// The sink asked to stop part way through
    Stopped { links: usize },
}

/// Counters reported once the path list is exhausted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub paths: usize,
    pub skipped: usize,
    pub links: usize,
}

#[derive(Default, Debug)]
pub struct Extractor {}

impl Extractor {
    /// Read one path per line from `reader` and feed every URL found in
    /// those files into `sink`.
    ///
    /// Only a failure to read the path list itself is an error; paths that
    /// cannot be scanned are skipped.
    pub fn extract_from_reader<R: BufRead, S: LinkSink>(
        &self,
        reader: R,
        sink: &mut S,
    ) -> Result<ExtractionSummary> {
        let mut summary = ExtractionSummary::default();

        for line in reader.lines() {
            let line = line
                .map_err(|e| LinchError::Input(format!("could not read path list: {e}")))?;

            let path = match absolute_path(&line) {
                Ok(Some(path)) => path,
                Ok(None) => continue,
                Err(err) => {
                    debug!("Skipping path '{line}': {err}");
                    summary.paths += 1;
                    summary.skipped += 1;
                    continue;
                }
            };

            summary.paths += 1;
            match self.extract_from_path(&path, sink) {
                PathScan::Skipped => summary.skipped += 1,
                PathScan::Scanned { links } => summary.links += links,
                PathScan::Stopped { links } => {
                    summary.links += links;
                    debug!("Link consumer went away, stopping extraction");
                    return Ok(summary);
                }
            }
        }

        Ok(summary)
    }

    /// Scan a single file line by line and emit every URL match,
    /// duplicates included.
    pub fn extract_from_path<S: LinkSink>(&self, path: &Path, sink: &mut S) -> PathScan {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => {
                debug!("Skipping directory {}", path.display());
                return PathScan::Skipped;
            }
            Ok(_) => {}
            Err(err) => {
                debug!("Skipping {}: {err}", path.display());
                return PathScan::Skipped;
            }
        }

        let mut links = 0;
        let mut stopped = false;

        let searched = Searcher::new().search_path(
            &*REGEX_MATCHER,
            path,
            Lossy(|_line_number, line| {
                for url in find_urls(line) {
                    if !sink.accept(Link::new(url, path)) {
                        stopped = true;
                        return Ok(false);
                    }
                    links += 1;
                }
                Ok(true)
            }),
        );

        if let Err(err) = searched {
            debug!("Could not read {}: {err}", path.display());
            if links == 0 {
                return PathScan::Skipped;
            }
        }

        if stopped {
            PathScan::Stopped { links }
        } else {
            PathScan::Scanned { links }
        }
    }
}

/// All URL-shaped substrings of `line`, in order of appearance.
pub fn find_urls(line: &str) -> impl Iterator<Item = &str> {
    URL_REGEX.find_iter(line).map(|m| m.as_str())
}
