//! CLI module for libris.
//!
//! This module provides the command-line front-end:
//! - Argument parsing
//! - Version display
//! - Command handlers driving the view-models
//!
//! # Usage
//!
//! ```ignore
//! use libris::cli::{parse_args, run_cli_command, CliContext};
//!
//! let command = parse_args(std::env::args());
//! let ctx = CliContext::from_config(&ClientConfig::from_env());
//! let outcome = run_cli_command(command, &ctx).await?;
//! std::process::exit(outcome.exit_code());
//! ```

pub mod args;
pub mod commands;
pub mod version;

pub use args::{parse_args, CliCommand, ProfileEdits, USAGE};
pub use commands::Outcome;
pub use version::{version_line, VERSION};

use std::io;
use std::sync::Arc;

use color_eyre::Result;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::session::SessionStore;
use crate::traits::LibraryApi;

/// Reads a password without echoing it.
pub type PasswordReader = Box<dyn Fn(&str) -> io::Result<String> + Send + Sync>;

/// Everything a command needs: the API, the shared session and a way to
/// ask for passwords.
pub struct CliContext<A: LibraryApi> {
    pub api: Arc<A>,
    pub session: Arc<SessionStore>,
    pub read_password: PasswordReader,
}

impl<A: LibraryApi> CliContext<A> {
    pub fn new(api: Arc<A>, session: Arc<SessionStore>, read_password: PasswordReader) -> Self {
        Self {
            api,
            session,
            read_password,
        }
    }
}

impl CliContext<ApiClient> {
    /// Production context: session store and HTTP client from `config`,
    /// passwords read from the terminal.
    pub fn from_config(config: &ClientConfig) -> Self {
        let session = Arc::new(config.session_store());
        let api = Arc::new(ApiClient::from_config(config, Arc::clone(&session)));
        Self::new(api, session, Box::new(|label: &str| rpassword::prompt_password(label)))
    }
}

/// Run a parsed command.
///
/// Failures the user should see (rejected credentials, unreachable server,
/// refused mutations) are printed and reported as [`Outcome::Failure`].
/// `Err` is reserved for terminal I/O problems.
pub async fn run_cli_command<A: LibraryApi>(
    command: CliCommand,
    ctx: &CliContext<A>,
) -> Result<Outcome> {
    tracing::debug!("Running {:?}", command);
    let outcome = match command {
        CliCommand::Version => {
            println!("{}", version_line());
            Outcome::Success
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Outcome::Success
        }
        CliCommand::Invalid(reason) => {
            eprintln!("error: {}", reason);
            eprintln!();
            eprintln!("{}", USAGE);
            Outcome::Failure
        }
        CliCommand::Login { username } => commands::login(ctx, &username).await?,
        CliCommand::Register {
            name,
            username,
            email,
        } => commands::register(ctx, &name, &username, &email).await?,
        CliCommand::Logout => commands::logout(ctx),
        CliCommand::Whoami => commands::whoami(ctx),
        CliCommand::Books => commands::books(ctx).await,
        CliCommand::Borrow { isbn } => commands::borrow(ctx, &isbn).await,
        CliCommand::Loans => commands::loans(ctx).await,
        CliCommand::Renew { loan_id } => commands::renew(ctx, loan_id).await,
        CliCommand::Return { loan_id } => commands::return_loan(ctx, loan_id).await,
        CliCommand::Profile => commands::profile(ctx).await,
        CliCommand::ProfileSet(edits) => commands::profile_set(ctx, &edits).await?,
        CliCommand::Members { query } => commands::members(ctx, query.as_deref()).await,
        CliCommand::Member { id } => commands::member(ctx, id).await,
    };
    Ok(outcome)
}
