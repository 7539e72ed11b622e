//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{config as config_file, defaults, output_formats, timeouts};
use crate::core::error::{LinchError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Number of concurrent probes
    pub concurrency: Option<usize>,

    /// Timeout in seconds for a single HEAD request
    pub timeout: Option<u64>,

    /// Delay in milliseconds a worker waits after each request
    pub wait: Option<u64>,

    /// How often one URL may be retried after a 429 before giving up
    pub max_retries: Option<u32>,

    /// Colorize status codes in pretty output
    pub color: Option<bool>,

    /// Output format (pretty, fix, json)
    pub output_format: Option<String>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Skip TLS certificate verification
    pub skip_ssl_verification: Option<bool>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concurrency: Some(defaults::CONCURRENCY),
            timeout: Some(timeouts::DEFAULT_TIMEOUT_SECONDS),
            wait: Some(timeouts::DEFAULT_WAIT_MS),
            max_retries: Some(defaults::MAX_RETRIES),
            color: Some(true),
            output_format: Some(output_formats::DEFAULT.to_string()),
            user_agent: None,
            skip_ssl_verification: Some(false),
            verbose: Some(false),
        }
    }
}

/// Values collected from the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub concurrency: Option<usize>,
    pub timeout: Option<u64>,
    pub wait: Option<u64>,
    pub max_retries: Option<u32>,
    pub no_color: bool,
    pub output_format: Option<String>,
    pub user_agent: Option<String>,
    pub skip_ssl_verification: bool,
    pub verbose: bool,
    pub quiet: bool,
    pub config_file: Option<String>,
    pub no_config: bool,
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LinchError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            LinchError::TomlParsing(err) => LinchError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                err
            )),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Keys missing from the document keep their default values.
    pub fn from_toml(content: &str) -> Result<Self> {
        let partial: Config = toml::from_str(content)?;
        let mut config = Self::default();
        config.overlay(partial);
        config.validate()?;
        Ok(config)
    }

    /// Load the config file found in standard locations, or the defaults
    /// when there is none. A file that exists but cannot be loaded is an
    /// error; callers decide whether to fall back.
    pub fn load_from_standard_locations() -> Result<Self> {
        match Self::find_in_standard_locations() {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// First `.linch.toml` in the working directory or its parents.
    pub fn find_in_standard_locations() -> Option<PathBuf> {
        (0..=config_file::PARENT_SEARCH_DEPTH)
            .map(|depth| PathBuf::from(format!("{}{}", "../".repeat(depth), config_file::FILE_NAME)))
            .find(|path| path.is_file())
    }

    /// Copy every value that is set in `other` over this config.
    fn overlay(&mut self, other: Config) {
        if other.concurrency.is_some() {
            self.concurrency = other.concurrency;
        }
        if other.timeout.is_some() {
            self.timeout = other.timeout;
        }
        if other.wait.is_some() {
            self.wait = other.wait;
        }
        if other.max_retries.is_some() {
            self.max_retries = other.max_retries;
        }
        if other.color.is_some() {
            self.color = other.color;
        }
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.user_agent.is_some() {
            self.user_agent = other.user_agent;
        }
        if other.skip_ssl_verification.is_some() {
            self.skip_ssl_verification = other.skip_ssl_verification;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Core options
        if let Some(concurrency) = cli_config.concurrency {
            self.concurrency = Some(concurrency);
        }
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(wait) = cli_config.wait {
            self.wait = Some(wait);
        }
        if let Some(max_retries) = cli_config.max_retries {
            self.max_retries = Some(max_retries);
        }

        // Output & format
        if cli_config.no_color {
            self.color = Some(false);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }

        // Network & security
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if cli_config.skip_ssl_verification {
            self.skip_ssl_verification = Some(true);
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency.unwrap_or(defaults::CONCURRENCY)
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(timeouts::DEFAULT_TIMEOUT_SECONDS))
    }

    /// Get the per-worker wait as Duration
    pub fn wait_duration(&self) -> Duration {
        Duration::from_millis(self.wait.unwrap_or(timeouts::DEFAULT_WAIT_MS))
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries.unwrap_or(defaults::MAX_RETRIES)
    }

    pub fn output_format(&self) -> &str {
        self.output_format
            .as_deref()
            .unwrap_or(output_formats::DEFAULT)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(concurrency) = self.concurrency {
            if concurrency == 0 {
                return Err(LinchError::Config(
                    "Concurrency cannot be 0. Expected a positive number of concurrent requests."
                        .to_string(),
                ));
            }
            if concurrency > defaults::MAX_CONCURRENCY {
                return Err(LinchError::Config(format!(
                    "Concurrency of {concurrency} is above the limit of {}.",
                    defaults::MAX_CONCURRENCY
                )));
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(LinchError::Config(
                    "Timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(LinchError::Config(format!(
                    "Timeout of {timeout} seconds is extremely large (>24 hours). Consider using a smaller value."
                )));
            }
        }

        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(LinchError::Config(format!(
                "Unknown output format '{format}'. Expected one of: {}",
                output_formats::ALL.join(", ")
            )));
        }

        Ok(())
    }
}
