use async_trait::async_trait;
use reqwest::header::{HeaderMap, LOCATION, RETRY_AFTER};
use reqwest::redirect::Policy;
use tokio::time::Duration;
use url::Url;

use crate::config::Config;
use crate::core::constants::{error_messages, http_status, timeouts};
use crate::core::error::Result;
use crate::core::types::Outcome;

/// What a single probe concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// A terminal outcome for the URL
    Done(Outcome),
    /// The host asked us to back off; never reported to the user
    RateLimited { retry_after: Duration },
}

/// One network round trip for one URL.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, url: &Url) -> Verdict;
}

/// Probes with a single `HEAD` request and never follows redirects.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build the shared HTTP client from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut client_builder = reqwest::Client::builder()
            .timeout(config.timeout_duration())
            .redirect(Policy::none())
            .user_agent(config.user_agent());

        client_builder = client_builder
            .pool_max_idle_per_host(config.concurrency().min(20))
            .pool_idle_timeout(Duration::from_secs(30));

        if config.skip_ssl_verification.unwrap_or(false) {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        Ok(Self::new(client_builder.build()?))
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, url: &Url) -> Verdict {
        match self.client.head(url.clone()).send().await {
            Ok(response) => classify(url, response.status().as_u16(), response.headers()),
            Err(err) => Verdict::Done(Outcome::error(None, describe_error(&err))),
        }
    }
}

/// Map a response status and its headers onto a verdict.
///
/// Redirect targets are resolved against `original`, the URL that was
/// requested, since no redirect chain is ever followed.
pub fn classify(original: &Url, status: u16, headers: &HeaderMap) -> Verdict {
    let outcome = match status {
        s if s < 300 => Outcome::Success { status },
        http_status::MOVED_PERMANENTLY | http_status::PERMANENT_REDIRECT => {
            match resolve_location(original, headers) {
                Ok(target) => Outcome::PermanentRedirect { status, target },
                Err(reason) => Outcome::error(Some(status), reason),
            }
        }
        http_status::FOUND | http_status::TEMPORARY_REDIRECT => {
            match resolve_location(original, headers) {
                Ok(target) => Outcome::TemporaryRedirect { status, target },
                Err(reason) => Outcome::error(Some(status), reason),
            }
        }
        http_status::TOO_MANY_REQUESTS => {
            return Verdict::RateLimited {
                retry_after: parse_retry_after(headers),
            };
        }
        _ => Outcome::Failure { status },
    };

    Verdict::Done(outcome)
}

/// Resolve the `Location` header against the original request URL.
pub fn resolve_location(original: &Url, headers: &HeaderMap) -> std::result::Result<Url, String> {
    let Some(value) = headers.get(LOCATION) else {
        return Err(error_messages::MISSING_LOCATION.to_string());
    };

    let invalid = || {
        format!(
            "{}: '{}'",
            error_messages::INVALID_LOCATION,
            String::from_utf8_lossy(value.as_bytes())
        )
    };

    let location = value.to_str().map_err(|_| invalid())?.trim();
    if location.is_empty() {
        return Err(error_messages::MISSING_LOCATION.to_string());
    }

    let target = original.join(location).map_err(|_| invalid())?;
    if target.host_str().is_none_or(str::is_empty) {
        return Err(invalid());
    }

    Ok(target)
}

/// Wait hint of a 429 response, in whole seconds.
pub fn parse_retry_after(headers: &HeaderMap) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(Duration::from_secs(timeouts::DEFAULT_RETRY_AFTER_SECONDS))
}

fn describe_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        return "request timed out".to_string();
    }
    std::error::Error::source(err)
        .map(|e| e.to_string())
        .unwrap_or_else(|| err.to_string())
}
