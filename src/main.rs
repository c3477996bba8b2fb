use libris::cli::{parse_args, run_cli_command, CliCommand, CliContext};
use libris::config::ClientConfig;

use color_eyre::Result;
use tracing_subscriber::EnvFilter;

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "libris=warn";

/// Log to stderr so command output on stdout stays clean.
fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

fn main() -> Result<()> {
    let command = parse_args(std::env::args());

    // Handle --version before any initialization
    if command == CliCommand::Version {
        println!("{}", libris::cli::version_line());
        return Ok(());
    }

    color_eyre::install()?;
    init_logging();

    let config = ClientConfig::from_env();
    tracing::debug!("Using library service at {}", config.base_url);

    // Suspension points are API calls only; one thread is enough
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let ctx = CliContext::from_config(&config);
    let outcome = runtime.block_on(run_cli_command(command, &ctx))?;
    std::process::exit(outcome.exit_code());
}
