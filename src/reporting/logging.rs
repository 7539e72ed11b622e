use crate::config::Config;
use crate::core::types::{Action, Outcome};
use crate::discovery::ExtractionSummary;
use log::{debug, info, warn};

/// Pick the log level for the given flags; `quiet` wins over `verbose`.
pub fn level_for(verbose: bool, quiet: bool) -> log::LevelFilter {
    if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    }
}

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = level_for(verbose, quiet);

    // `RUST_LOG` still applies to anything not covered by the level above
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_module_path(false)
        .format_target(false)
        .try_init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    info!(
        "Configuration: concurrency={}, timeout={:?}, wait={:?}, max_retries={}",
        config.concurrency(),
        config.timeout_duration(),
        config.wait_duration(),
        config.max_retries()
    );
    info!(
        "HTTP: user_agent={}, skip_ssl={}",
        config.user_agent(),
        config.skip_ssl_verification.unwrap_or(false)
    );
    info!("Output: format={}", config.output_format());
}

/// Log individual link results for debugging
pub fn log_action(action: &Action) {
    match &action.outcome {
        Outcome::Error { reason, .. } => {
            debug!("✗ {} ({}) -> {reason}", action.link, action.link.path().display())
        }
        outcome => debug!(
            "{} {} ({}) -> {}",
            if outcome.is_ok() { "✓" } else { "✗" },
            action.link,
            action.link.path().display(),
            outcome.kind()
        ),
    }
}

/// Log what the extractor went through
pub fn log_extraction_summary(summary: &ExtractionSummary) {
    info!(
        "Extracted {} link(s) from {} path(s), {} skipped",
        summary.links, summary.paths, summary.skipped
    );
    if summary.paths > 0 && summary.paths == summary.skipped {
        warn!("None of the {} input path(s) could be read", summary.paths);
    }
}
