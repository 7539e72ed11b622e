// Command-line interface definitions and parsing for linch

use crate::config::CliConfig;
use crate::core::constants::output_formats;
use clap::{Parser, Subcommand};

/// Validate the links found in files whose paths are read from stdin.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    // Core Options
    /// Concurrent requests (default: 10)
    #[arg(
        short = 'l',
        long = "limit",
        value_name = "COUNT",
        help_heading = "Core Options"
    )]
    pub concurrency: Option<usize>,

    /// Request timeout in whole seconds (default: 3)
    #[arg(
        short = 't',
        long,
        value_name = "SECONDS",
        help_heading = "Core Options"
    )]
    pub timeout: Option<u64>,

    // Retry & Rate Limiting
    /// Delay after each request in milliseconds (default: 0)
    #[arg(
        short = 'w',
        long,
        value_name = "MS",
        help_heading = "Retry & Rate Limiting"
    )]
    pub wait: Option<u64>,

    /// Rate limited retries per URL before giving up (default: 10)
    #[arg(long, value_name = "COUNT", help_heading = "Retry & Rate Limiting")]
    pub max_retries: Option<u32>,

    // Output & Verbosity
    /// Disable colored output
    #[arg(short = 'n', long, help_heading = "Output & Verbosity")]
    pub no_color: bool,

    /// Print sed commands that replace permanently redirected URLs
    #[arg(
        short = 'f',
        long,
        conflicts_with = "format",
        help_heading = "Output & Verbosity"
    )]
    pub fix: bool,

    /// Output format
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    /// Suppress log output
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    // Network & Security
    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", help_heading = "Network & Security")]
    pub user_agent: Option<String>,

    /// Skip SSL certificate verification
    #[arg(long, help_heading = "Network & Security")]
    pub insecure: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    #[command(arg_required_else_help = true)]
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Convert derive-based CLI arguments directly to CliConfig structure
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    let output_format = if cli.fix {
        Some(output_formats::FIX.to_string())
    } else {
        cli.format.clone()
    };

    CliConfig {
        concurrency: cli.concurrency,
        timeout: cli.timeout,
        wait: cli.wait,
        max_retries: cli.max_retries,
        no_color: cli.no_color,
        output_format,
        user_agent: cli.user_agent.clone(),
        skip_ssl_verification: cli.insecure,
        verbose: cli.verbose,
        quiet: cli.quiet,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}
