/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes literal values used by the engine, the CLI and
/// the output layer so they stay consistent with each other.
/// Output format constants
pub mod output_formats {
    /// Human readable, one tagged line per result
    pub const PRETTY: &str = "pretty";
    /// Shell commands that rewrite permanent redirects in place
    pub const FIX: &str = "fix";
    /// One JSON object per line
    pub const JSON: &str = "json";

    /// Default output format
    pub const DEFAULT: &str = PRETTY;

    /// All valid output formats
    pub const ALL: [&str; 3] = [PRETTY, FIX, JSON];
}

/// Result tags used in the pretty output
pub mod tags {
    pub const SUCCESS: &str = "SUCCE";
    pub const PERMANENT_REDIRECT: &str = "REDIR";
    pub const TEMPORARY_REDIRECT: &str = "SEMIR";
    pub const FAILURE: &str = "ERROR";
    pub const INTERNAL: &str = "INTER";

    /// Placeholder printed instead of a status code when no response arrived
    pub const NO_STATUS: &str = "XXX";
}

/// HTTP status code constants
pub mod http_status {
    /// HTTP 301 Moved Permanently - permanent redirect
    pub const MOVED_PERMANENTLY: u16 = 301;
    /// HTTP 302 Found - temporary redirect
    pub const FOUND: u16 = 302;
    /// HTTP 307 Temporary Redirect
    pub const TEMPORARY_REDIRECT: u16 = 307;
    /// HTTP 308 Permanent Redirect
    pub const PERMANENT_REDIRECT: u16 = 308;
    /// HTTP 429 Too Many Requests - rate limited
    pub const TOO_MANY_REQUESTS: u16 = 429;
}

/// Timeout and duration constants
pub mod timeouts {
    /// Default per-request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 3;
    /// Maximum accepted timeout in seconds (24 hours)
    pub const MAX_TIMEOUT_SECONDS: u64 = 86_400;
    /// Default wait between requests of one worker in milliseconds
    pub const DEFAULT_WAIT_MS: u64 = 0;
    /// Wait applied after a 429 without a usable Retry-After header
    pub const DEFAULT_RETRY_AFTER_SECONDS: u64 = 15;
    /// Upper bound of the random jitter added to every delayed retry
    pub const MAX_RETRY_JITTER_MS: u64 = 1_000;
}

/// Default configuration values
pub mod defaults {
    /// Default number of concurrent probes
    pub const CONCURRENCY: usize = 10;
    /// Highest concurrency accepted by validation
    pub const MAX_CONCURRENCY: usize = 1_000;
    /// Default number of rate-limit retries per URL
    pub const MAX_RETRIES: u32 = 10;
}

/// Channel capacities of the validation pipeline
pub mod channels {
    /// Links handed from the extractor to the pool
    pub const INTAKE_CAPACITY: usize = 64;
    /// Jobs waiting for a free worker, including delayed retries
    pub const DISPATCH_QUEUE_CAPACITY: usize = 1_000;
    /// Finished actions waiting for the consumer
    pub const RESULT_CAPACITY: usize = 100;
}

/// Error message constants
pub mod error_messages {
    pub const MISSING_LOCATION: &str = "missing location in redirection";
    pub const INVALID_LOCATION: &str = "invalid location in redirection";
    pub const RATE_LIMIT_EXHAUSTED: &str = "rate limited; gave up after";
}

/// Configuration file constants
pub mod config {
    /// Name of the configuration file looked up in the working directory
    pub const FILE_NAME: &str = ".linch.toml";
    /// How many parent directories are searched for the configuration file
    pub const PARENT_SEARCH_DEPTH: usize = 3;
}
