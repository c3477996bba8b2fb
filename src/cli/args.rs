//! Command-line argument parsing for the libris CLI.

/// Fields to change with `profile set`. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileEdits {
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    /// Prompt for a new password.
    pub change_password: bool,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    Login { username: String },
    Register { name: String, username: String, email: String },
    Logout,
    /// Show the signed-in user and their landing page
    Whoami,
    Books,
    Borrow { isbn: String },
    Loans,
    Renew { loan_id: i64 },
    Return { loan_id: i64 },
    Profile,
    ProfileSet(ProfileEdits),
    /// List members, optionally filtered by name
    Members { query: Option<String> },
    Member { id: i64 },
    /// Arguments that could not be parsed, with the reason
    Invalid(String),
}

pub const USAGE: &str = "\
Usage: libris <command> [arguments]

Commands:
  login <username>                  Sign in (prompts for the password)
  register <name> <username> <email>
                                    Create an account and sign in
  logout                            Forget the stored session
  whoami                            Show the signed-in user
  books                             List available books
  borrow <isbn>                     Borrow a book
  loans                             List your loans
  renew <loan-id>                   Renew a loan
  return <loan-id>                  Return a loan
  profile                           Show your profile
  profile set [--name N] [--email E] [--username U] [--password]
                                    Update your profile
  members [name]                    List members (admin)
  member <id>                       Show a member's details (admin)

Options:
  -V, --version                     Show version
  -h, --help                        Show this help

Environment:
  LIBRIS_API_URL       Service URL (default http://localhost:8080)
  LIBRIS_SESSION_FILE  Session file (default ~/.libris/session.json)
  LIBRIS_NO_PERSIST    Keep the session in memory only
  RUST_LOG             Log filter (default libris=warn)";

fn id_arg(command: &str, value: Option<&String>) -> Result<i64, String> {
    let value = value.ok_or_else(|| format!("`{}` needs an id", command))?;
    value
        .parse()
        .map_err(|_| format!("`{}` needs a numeric id, got `{}`", command, value))
}

fn text_arg(command: &str, what: &str, value: Option<&String>) -> Result<String, String> {
    value
        .filter(|v| !v.trim().is_empty())
        .cloned()
        .ok_or_else(|| format!("`{}` needs {}", command, what))
}

fn parse_profile_edits(rest: &[String]) -> Result<ProfileEdits, String> {
    let mut edits = ProfileEdits::default();
    let mut iter = rest.iter();
    while let Some(flag) = iter.next() {
        let slot = match flag.as_str() {
            "--name" => &mut edits.name,
            "--email" => &mut edits.email,
            "--username" => &mut edits.username,
            "--password" => {
                edits.change_password = true;
                continue;
            }
            other => return Err(format!("unknown option `{}` for `profile set`", other)),
        };
        let value = iter
            .next()
            .ok_or_else(|| format!("`{}` needs a value", flag))?;
        *slot = Some(value.clone());
    }
    if edits == ProfileEdits::default() {
        return Err("`profile set` needs at least one option".to_string());
    }
    Ok(edits)
}

fn parse_command(args: &[String]) -> Result<CliCommand, String> {
    let Some(first) = args.first() else {
        return Ok(CliCommand::Help);
    };
    let rest = &args[1..];
    let command = match first.as_str() {
        "--version" | "-V" => CliCommand::Version,
        "--help" | "-h" | "help" => CliCommand::Help,
        "login" => CliCommand::Login {
            username: text_arg("login", "a username", rest.first())?,
        },
        "register" => CliCommand::Register {
            name: text_arg("register", "a name", rest.first())?,
            username: text_arg("register", "a username", rest.get(1))?,
            email: text_arg("register", "an email", rest.get(2))?,
        },
        "logout" => CliCommand::Logout,
        "whoami" => CliCommand::Whoami,
        "books" => CliCommand::Books,
        "borrow" => CliCommand::Borrow {
            isbn: text_arg("borrow", "an ISBN", rest.first())?,
        },
        "loans" => CliCommand::Loans,
        "renew" => CliCommand::Renew {
            loan_id: id_arg("renew", rest.first())?,
        },
        "return" => CliCommand::Return {
            loan_id: id_arg("return", rest.first())?,
        },
        "profile" => match rest.first().map(String::as_str) {
            None => CliCommand::Profile,
            Some("set") => CliCommand::ProfileSet(parse_profile_edits(&rest[1..])?),
            Some(other) => return Err(format!("unknown `profile` subcommand `{}`", other)),
        },
        "members" => CliCommand::Members {
            query: (!rest.is_empty()).then(|| rest.join(" ")),
        },
        "member" => CliCommand::Member {
            id: id_arg("member", rest.first())?,
        },
        other => return Err(format!("unknown command `{}`", other)),
    };
    Ok(command)
}

/// Parse command-line arguments and return the appropriate command.
///
/// # Examples
///
/// ```
/// use libris::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["libris".to_string(), "renew".to_string(), "7".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Renew { loan_id: 7 });
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let args: Vec<String> = args.skip(1).collect();
    parse_command(&args).unwrap_or_else(CliCommand::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        let argv = std::iter::once("libris")
            .chain(args.iter().copied())
            .map(String::from);
        parse_args(argv)
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["--version"]), CliCommand::Version);
        assert_eq!(parse(&["-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_no_args_is_help() {
        assert_eq!(parse(&[]), CliCommand::Help);
        assert_eq!(parse(&["-h"]), CliCommand::Help);
    }

    #[test]
    fn test_parse_login_and_register() {
        assert_eq!(
            parse(&["login", "alice"]),
            CliCommand::Login { username: "alice".to_string() }
        );
        assert_eq!(
            parse(&["register", "Alice Liddell", "alice", "alice@example.com"]),
            CliCommand::Register {
                name: "Alice Liddell".to_string(),
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
            }
        );
        assert!(matches!(parse(&["login"]), CliCommand::Invalid(_)));
        assert!(matches!(parse(&["register", "A", "a"]), CliCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_loan_ids() {
        assert_eq!(parse(&["renew", "12"]), CliCommand::Renew { loan_id: 12 });
        assert_eq!(parse(&["return", "3"]), CliCommand::Return { loan_id: 3 });
        assert_eq!(
            parse(&["return", "abc"]),
            CliCommand::Invalid("`return` needs a numeric id, got `abc`".to_string())
        );
        assert_eq!(
            parse(&["renew"]),
            CliCommand::Invalid("`renew` needs an id".to_string())
        );
    }

    #[test]
    fn test_parse_borrow() {
        assert_eq!(
            parse(&["borrow", "978-0441013593"]),
            CliCommand::Borrow { isbn: "978-0441013593".to_string() }
        );
    }

    #[test]
    fn test_parse_profile_set() {
        assert_eq!(parse(&["profile"]), CliCommand::Profile);
        assert_eq!(
            parse(&["profile", "set", "--email", "new@example.com", "--password"]),
            CliCommand::ProfileSet(ProfileEdits {
                email: Some("new@example.com".to_string()),
                change_password: true,
                ..Default::default()
            })
        );
        assert!(matches!(parse(&["profile", "set"]), CliCommand::Invalid(_)));
        assert!(matches!(parse(&["profile", "set", "--name"]), CliCommand::Invalid(_)));
        assert!(matches!(parse(&["profile", "set", "--age", "3"]), CliCommand::Invalid(_)));
        assert!(matches!(parse(&["profile", "edit"]), CliCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_members() {
        assert_eq!(parse(&["members"]), CliCommand::Members { query: None });
        assert_eq!(
            parse(&["members", "Ada", "Lovelace"]),
            CliCommand::Members { query: Some("Ada Lovelace".to_string()) }
        );
        assert_eq!(parse(&["member", "5"]), CliCommand::Member { id: 5 });
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            parse(&["fly"]),
            CliCommand::Invalid("unknown command `fly`".to_string())
        );
    }
}
