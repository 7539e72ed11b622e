use dashmap::DashMap;
use tokio::time::{Duration, Instant};
use url::Url;

/// Per-host "do not contact before" deadlines.
///
/// Entries are written when a host answers 429. Every read compares the
/// deadline against the current instant, so an expired entry behaves as
/// if it were absent; it is evicted the next time it is read.
#[derive(Debug, Default)]
pub struct CooldownTable {
    until: DashMap<String, Instant>,
}

impl CooldownTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite the deadline for `host`.
    pub fn set_cooldown(&self, host: &str, until: Instant) {
        self.until.insert(host.to_string(), until);
    }

    /// Time left until `host` may be contacted again, if any.
    pub fn remaining(&self, host: &str) -> Option<Duration> {
        let now = Instant::now();
        let until = *self.until.get(host)?;

        if until > now {
            Some(until - now)
        } else {
            self.until.remove_if(host, |_, deadline| *deadline <= now);
            None
        }
    }

    pub fn is_cooling_down(&self, host: &str) -> bool {
        self.remaining(host).is_some()
    }

    /// The active deadline for `host`; `None` once it has passed.
    pub fn cooldown_until(&self, host: &str) -> Option<Instant> {
        self.remaining(host).map(|left| Instant::now() + left)
    }

    /// Number of stored entries, expired ones included until they are read.
    pub fn len(&self) -> usize {
        self.until.len()
    }

    pub fn is_empty(&self) -> bool {
        self.until.is_empty()
    }
}

/// Key under which a URL's host is tracked: the host name, plus the port
/// when the URL spells one out.
pub fn host_key(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}
