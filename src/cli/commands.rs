//! Handlers for each CLI command.
//!
//! Every handler drives the same view-models a graphical front-end would,
//! prints the resulting state and reports whether the command succeeded.

use std::sync::Arc;

use color_eyre::Result;

use super::args::ProfileEdits;
use super::CliContext;
use crate::auth::{AuthFlow, Landing};
use crate::cli_output::{self, icons};
use crate::traits::LibraryApi;
use crate::view_models::{
    BooksViewModel, LoansViewModel, MembersViewModel, MutationOutcome, Notice, ProfileViewModel,
    ViewState,
};

/// How a command ended. Maps to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::Failure => 1,
        }
    }
}

fn show_state<T>(
    title: &str,
    state: &ViewState<T>,
    render: impl FnOnce(&T) -> Vec<String>,
) -> Outcome {
    cli_output::print_header(title);
    match state {
        ViewState::Ready(snapshot) => {
            cli_output::print_lines(&render(snapshot));
            Outcome::Success
        }
        ViewState::Failed(error) => {
            cli_output::print_view_error(error);
            Outcome::Failure
        }
        ViewState::Idle | ViewState::Loading => Outcome::Failure,
    }
}

fn show_mutation(outcome: MutationOutcome, notice: Option<Notice>) -> Outcome {
    match outcome {
        MutationOutcome::Applied => {
            if let Some(notice) = notice {
                cli_output::print_notice(&notice);
            }
            Outcome::Success
        }
        MutationOutcome::Failed(error) => {
            cli_output::print_view_error(&error);
            Outcome::Failure
        }
        MutationOutcome::Busy | MutationOutcome::Ignored => Outcome::Failure,
    }
}

fn show_landing(verb: &str, username: &str, landing: Landing) {
    cli_output::print_status_line(icons::SUCCESS, &format!("{} as {}", verb, username));
    println!("    {} ({})", landing.title(), landing.path());
}

pub async fn login<A: LibraryApi>(ctx: &CliContext<A>, username: &str) -> Result<Outcome> {
    let password = (ctx.read_password)("Password: ")?;
    let flow = AuthFlow::new(Arc::clone(&ctx.api), Arc::clone(&ctx.session));
    match flow.login(username, &password).await {
        Ok(landing) => {
            show_landing("Signed in", username, landing);
            Ok(Outcome::Success)
        }
        Err(failure) => {
            cli_output::print_status_line(icons::FAILURE, &failure.user_message());
            Ok(Outcome::Failure)
        }
    }
}

pub async fn register<A: LibraryApi>(
    ctx: &CliContext<A>,
    name: &str,
    username: &str,
    email: &str,
) -> Result<Outcome> {
    let password = (ctx.read_password)("Choose a password: ")?;
    let flow = AuthFlow::new(Arc::clone(&ctx.api), Arc::clone(&ctx.session));
    match flow.register(name, username, email, &password).await {
        Ok(landing) => {
            show_landing("Registered", username, landing);
            Ok(Outcome::Success)
        }
        Err(failure) => {
            cli_output::print_status_line(icons::FAILURE, &failure.user_message());
            Ok(Outcome::Failure)
        }
    }
}

pub fn logout<A: LibraryApi>(ctx: &CliContext<A>) -> Outcome {
    AuthFlow::new(Arc::clone(&ctx.api), Arc::clone(&ctx.session)).logout();
    cli_output::print_status_line(icons::SUCCESS, "Signed out");
    Outcome::Success
}

pub fn whoami<A: LibraryApi>(ctx: &CliContext<A>) -> Outcome {
    match ctx.session.claims() {
        Ok(claims) => {
            let landing = Landing::for_claims(&claims);
            println!("  User:    {}", claims.subject);
            println!("  Role:    {}", claims.role);
            println!("  Landing: {}", landing.path());
            if let Some(expiry) = claims.expires_at() {
                let note = if claims.is_expired() { " (expired)" } else { "" };
                println!("  Expires: {}{}", expiry.format("%Y-%m-%d %H:%M UTC"), note);
            }
            Outcome::Success
        }
        Err(e) => {
            cli_output::print_status_line(icons::WARNING, &e.user_message());
            Outcome::Failure
        }
    }
}

pub async fn books<A: LibraryApi>(ctx: &CliContext<A>) -> Outcome {
    let mut vm = BooksViewModel::new(Arc::clone(&ctx.api));
    vm.load().await;
    show_state("AVAILABLE BOOKS", vm.state(), |b| cli_output::book_lines(b))
}

pub async fn borrow<A: LibraryApi>(ctx: &CliContext<A>, isbn: &str) -> Outcome {
    let mut vm = BooksViewModel::new(Arc::clone(&ctx.api));
    let outcome = vm.borrow(isbn).await;
    show_mutation(outcome, vm.take_notice())
}

pub async fn loans<A: LibraryApi>(ctx: &CliContext<A>) -> Outcome {
    let mut vm = LoansViewModel::new(Arc::clone(&ctx.api));
    vm.load().await;
    show_state("MY LOANS", vm.state(), |l| cli_output::loan_lines(l))
}

pub async fn renew<A: LibraryApi>(ctx: &CliContext<A>, loan_id: i64) -> Outcome {
    let mut vm = LoansViewModel::new(Arc::clone(&ctx.api));
    let outcome = vm.renew(loan_id).await;
    show_mutation(outcome, vm.take_notice())
}

pub async fn return_loan<A: LibraryApi>(ctx: &CliContext<A>, loan_id: i64) -> Outcome {
    let mut vm = LoansViewModel::new(Arc::clone(&ctx.api));
    let outcome = vm.return_loan(loan_id).await;
    show_mutation(outcome, vm.take_notice())
}

pub async fn profile<A: LibraryApi>(ctx: &CliContext<A>) -> Outcome {
    let mut vm = ProfileViewModel::new(Arc::clone(&ctx.api));
    vm.load().await;
    show_state("MY PROFILE", vm.state(), cli_output::profile_lines)
}

/// Load the profile so untouched fields are sent back unchanged, apply the
/// edits and submit.
pub async fn profile_set<A: LibraryApi>(
    ctx: &CliContext<A>,
    edits: &ProfileEdits,
) -> Result<Outcome> {
    let mut vm = ProfileViewModel::new(Arc::clone(&ctx.api));
    vm.load().await;
    if let Some(error) = vm.state().error() {
        cli_output::print_view_error(error);
        return Ok(Outcome::Failure);
    }

    let form = vm.form_mut();
    if let Some(name) = &edits.name {
        form.name = name.clone();
    }
    if let Some(email) = &edits.email {
        form.email = email.clone();
    }
    if let Some(username) = &edits.username {
        form.username = username.clone();
    }
    if edits.change_password {
        form.password = (ctx.read_password)("New password: ")?;
    }

    let outcome = vm.update().await;
    let result = show_mutation(outcome, vm.take_notice());
    if result == Outcome::Success {
        if let Some(profile) = vm.profile() {
            cli_output::print_lines(&cli_output::profile_lines(profile));
        }
    }
    Ok(result)
}

pub async fn members<A: LibraryApi>(ctx: &CliContext<A>, query: Option<&str>) -> Outcome {
    let mut vm = MembersViewModel::new(Arc::clone(&ctx.api));
    vm.search(query.unwrap_or_default()).await;
    show_state("MEMBERS", vm.state(), |m| cli_output::member_lines(m))
}

pub async fn member<A: LibraryApi>(ctx: &CliContext<A>, id: i64) -> Outcome {
    let mut vm = MembersViewModel::new(Arc::clone(&ctx.api));
    vm.select(id).await;
    show_state("MEMBER DETAILS", vm.selected(), cli_output::member_detail_lines)
}
