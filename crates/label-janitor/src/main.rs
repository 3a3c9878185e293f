//! Linear label janitor CLI.
//!
//! Lists issue labels that no issue uses and, when dry-run is off and the
//! operator confirms, deletes them.

use std::env;
use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use label_janitor::ui::Reporter;
use label_janitor::{config, janitor, Config, JanitorError, LinearClient, Outcome, StdinConfirm};

/// Find and remove unused Linear issue labels.
#[derive(Parser)]
#[command(
    name = "label-janitor",
    version,
    about = "Find and remove Linear issue labels that no issue uses",
    long_about = "Find and remove Linear issue labels that no issue uses.\n\n\
                  Reads LINEAR_API_KEY (required) and DRY_RUN from the environment or a .env file.\n\
                  Dry-run stays on unless DRY_RUN=false. Group labels are never touched."
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// GraphQL endpoint (overrides LINEAR_API_URL).
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Per-request timeout in seconds (overrides LINEAR_TIMEOUT_SECS).
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,

    /// Actually delete labels after confirmation (same as LABEL_DELETION_ENABLED=true).
    #[arg(long)]
    enable_deletion: bool,
}

impl Cli {
    fn config(&self) -> Result<Config, JanitorError> {
        self.config_with(|key| env::var(key).ok())
    }

    /// Flags given on the command line shadow the matching variables before
    /// anything is validated, so a bad env value cannot veto an explicit flag.
    fn config_with<F>(&self, env_lookup: F) -> Result<Config, JanitorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Config::from_lookup(|key| self.flag_value(key).or_else(|| env_lookup(key)))
    }

    fn flag_value(&self, key: &str) -> Option<String> {
        match key {
            config::API_URL_VAR => self.api_url.clone(),
            config::TIMEOUT_VAR => self.timeout_secs.map(|secs| secs.to_string()),
            config::DELETION_ENABLED_VAR => self.enable_deletion.then(|| "true".to_string()),
            _ => None,
        }
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let directive = if verbose { "label_janitor=debug" } else { "label_janitor=warn" };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .init();
    Ok(())
}

async fn execute(cli: &Cli) -> Result<Outcome> {
    let config = cli.config()?;
    info!(?config, "Starting label janitor");

    let client = LinearClient::from_config(&config)?;
    let mut confirm = StdinConfirm;
    let mut reporter = Reporter::new(io::stdout());

    let outcome = janitor::run(&client, &config, &mut confirm, &mut reporter).await?;
    info!(?outcome, "Label janitor finished");
    Ok(outcome)
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; the environment may already be set.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("{} Failed to initialize logging: {e:#}", "✗".red().bold());
        return ExitCode::FAILURE;
    }

    let result = execute(&cli).await;
    if let Err(err) = &result {
        eprintln!("{} {err:#}", "✗".red().bold());
    }
    ExitCode::from(exit_code(&result))
}

/// Process exit code for a finished run.
///
/// Config errors map to 2, every other error and any failed deletion to 1.
fn exit_code(result: &Result<Outcome>) -> u8 {
    match result {
        Ok(outcome) if outcome.is_success() => 0,
        Ok(_) => 1,
        Err(err) => err
            .downcast_ref::<JanitorError>()
            .map_or(1, JanitorError::exit_code),
    }
}
