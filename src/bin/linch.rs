use clap::Parser;
use linch::config::{CliConfig, Config};
use linch::core::{LinchError, Result};
use linch::discovery::Extractor;
use linch::reporting::logging;
use linch::ui::{Cli, Commands, OutputFormat, Printer, cli_to_config, color_enabled, print_completions};
use linch::validation::{HttpProbe, PoolSettings, ValidatorPool};
use log::{debug, warn};

use std::io::IsTerminal;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        print_completions(shell);
        return;
    }

    match run(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Read paths from stdin, validate every link in those files and print one
/// line per distinct URL.
async fn run(cli: &Cli) -> Result<i32> {
    let cli_config = cli_to_config(cli);
    let (config, ignored_file) = load_and_merge_config(&cli_config)?;

    logging::init_logger(config.verbose.unwrap_or(false), cli_config.quiet);
    if let Some(err) = ignored_file {
        warn!("Ignoring config file, using defaults: {err}");
    }
    logging::log_config_info(&config);

    let format: OutputFormat = config.output_format().parse()?;
    let printer = Printer::new(format, color_enabled(config.color.unwrap_or(true)));

    let probe = HttpProbe::from_config(&config)?;
    let pool = ValidatorPool::new(Arc::new(probe), PoolSettings::from_config(&config));
    let (links, mut actions) = pool.start();

    if std::io::stdin().is_terminal() {
        warn!("Reading file paths from a terminal; pipe one path per line into linch");
    }

    let extraction = tokio::task::spawn_blocking(move || {
        let mut links = links;
        Extractor::default().extract_from_reader(std::io::stdin().lock(), &mut links)
    });

    let mut stdout = std::io::stdout();
    while let Some(action) = actions.recv().await {
        logging::log_action(&action);
        if !printer.emit(&mut stdout, &action)? {
            debug!("Stdout was closed, no more results will be printed");
            break;
        }
    }
    drop(actions);

    let summary = extraction
        .await
        .map_err(|e| LinchError::Input(format!("Link extraction did not finish: {e}")))??;
    logging::log_extraction_summary(&summary);

    Ok(0)
}

/// Resolve the configuration file, merge CLI values over it and validate.
///
/// A config file found in a standard location that cannot be loaded does
/// not stop the run; it is handed back so it can be logged once the logger
/// is up.
fn load_and_merge_config(cli_config: &CliConfig) -> Result<(Config, Option<LinchError>)> {
    let (mut config, ignored_file) = if cli_config.no_config {
        (Config::default(), None)
    } else if let Some(ref config_file) = cli_config.config_file {
        (Config::load_from_file(config_file)?, None)
    } else {
        match Config::load_from_standard_locations() {
            Ok(config) => (config, None),
            Err(err) => (Config::default(), Some(err)),
        }
    };

    // CLI takes precedence
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok((config, ignored_file))
}
