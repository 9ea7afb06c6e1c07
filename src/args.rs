use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser};

use crate::error::MssqlJsonError;

/// Command-line flags as typed by the caller.
///
/// `-h` is taken by `--hostname`, so help is only reachable as `--help`.
#[derive(Parser, Debug)]
#[command(
    name = "mssql-json",
    version,
    about = "Run one SQL statement against SQL Server and print the result set as JSON",
    disable_help_flag = true
)]
pub struct Args {
    #[arg(short = 'u', long, help = "(required) username to connect to db")]
    pub username: String,
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "(required) user password, also accepted as -pw; special characters need no escaping"
    )]
    pub password: String,
    #[arg(
        short = 'd',
        long,
        help = "(optional) domain of the user, like WINDOMAIN\\username"
    )]
    pub domain: Option<String>,
    #[arg(short = 'i', long, help = "(required) sql server instance")]
    pub instance: String,
    #[arg(
        short = 'h',
        long,
        default_value = "localhost",
        help = "(optional) database host"
    )]
    pub hostname: String,
    #[arg(short = 'p', long, default_value_t = 1433, help = "(optional) remote port")]
    pub port: u16,
    #[arg(
        long,
        default_value = "master",
        help = "(optional) database name, also accepted as -db"
    )]
    pub database: String,
    #[arg(
        short = 'q',
        long,
        help = "(required) SQL query, terminated with ;"
    )]
    pub sql: String,
    #[arg(short = 's', long, help = "(optional) results not printed to stdout")]
    pub silent: bool,
    #[arg(short = 'f', long, help = "(optional) save result to file")]
    pub filename: Option<PathBuf>,
    #[arg(long, help = "(optional) exit with status 3 when the query fails")]
    pub strict: bool,
    #[arg(
        short = 'v',
        long,
        action = ArgAction::Count,
        help = "(optional) more log output on stderr, repeatable"
    )]
    pub verbose: u8,
    #[arg(long, action = ArgAction::Help, help = "Print help")]
    help: Option<bool>,
}

/// Flags that consume the following token as their value.
const VALUE_FLAGS: &[&str] = &[
    "-u",
    "--username",
    "-pw",
    "--password",
    "-d",
    "--domain",
    "-i",
    "--instance",
    "-h",
    "--hostname",
    "-p",
    "--port",
    "-db",
    "--database",
    "-q",
    "--sql",
    "-f",
    "--filename",
];

/// Rewrite the two-letter short flags `-pw` and `-db` to their long forms.
///
/// clap only knows single-character short flags. Tokens in value position (the word
/// after a value flag, or anything after `--`) are passed through untouched.
pub fn normalize_args<I, T>(argv: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut expects_value = false;
    let mut passthrough = false;

    for token in argv.into_iter().map(Into::into) {
        if passthrough || expects_value {
            expects_value = false;
            out.push(token);
            continue;
        }
        let rewritten = match token.to_str() {
            Some("--") => {
                passthrough = true;
                token
            }
            Some("-pw") => {
                expects_value = true;
                OsString::from("--password")
            }
            Some("-db") => {
                expects_value = true;
                OsString::from("--database")
            }
            Some(flag) if VALUE_FLAGS.contains(&flag) => {
                expects_value = true;
                token
            }
            _ => token,
        };
        out.push(rewritten);
    }
    out
}

/// Parse a full argument vector (program name first).
///
/// # Errors
///
/// Returns the clap error for missing, unknown or malformed flags, and for
/// `--help`/`--version` requests.
pub fn parse_args<I, T>(argv: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    Args::try_parse_from(normalize_args(argv))
}

/// Help text listing every option.
#[must_use]
pub fn usage() -> String {
    Args::command().render_help().to_string()
}

/// Wrap a parse failure together with the usage text for the caller.
#[must_use]
pub fn argument_error(err: &clap::Error) -> MssqlJsonError {
    MssqlJsonError::ArgumentError(format!("{}\n{}", err.render(), usage()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    const REQUIRED: &[&str] = &[
        "mssql-json",
        "-u",
        "sa",
        "-pw",
        "x",
        "-i",
        "SQLEXPRESS",
        "-q",
        "SELECT 1 AS one;",
    ];

    #[test]
    fn defaults_fill_optional_flags() {
        let args = parse_args(REQUIRED.to_vec()).unwrap();
        assert_eq!(args.username, "sa");
        assert_eq!(args.password, "x");
        assert_eq!(args.instance, "SQLEXPRESS");
        assert_eq!(args.sql, "SELECT 1 AS one;");
        assert_eq!(args.domain, None);
        assert_eq!(args.hostname, "localhost");
        assert_eq!(args.port, 1433);
        assert_eq!(args.database, "master");
        assert!(!args.silent);
        assert!(!args.strict);
        assert_eq!(args.filename, None);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn short_and_long_forms_are_accepted() {
        let args = parse_args([
            "mssql-json",
            "--username",
            "bob",
            "--password",
            "pw",
            "--instance",
            "INST",
            "--sql",
            "SELECT 1;",
            "-d",
            "CORP",
            "-h",
            "db.example.com",
            "-p",
            "14330",
            "-db",
            "sales",
            "-s",
            "-f",
            "out.json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.domain.as_deref(), Some("CORP"));
        assert_eq!(args.hostname, "db.example.com");
        assert_eq!(args.port, 14330);
        assert_eq!(args.database, "sales");
        assert!(args.silent);
        assert_eq!(args.filename, Some(PathBuf::from("out.json")));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn missing_any_required_flag_fails() {
        // drop each flag/value pair in turn
        for skip in [1, 3, 5, 7] {
            let argv: Vec<&str> = REQUIRED
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip && *i != skip + 1)
                .map(|(_, a)| *a)
                .collect();
            let err = parse_args(argv).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument, "skip {skip}");
        }
    }

    #[test]
    fn unknown_flag_fails() {
        let mut argv = REQUIRED.to_vec();
        argv.push("--bogus");
        let err = parse_args(argv).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn port_must_be_numeric() {
        let mut argv = REQUIRED.to_vec();
        argv.extend(["-p", "abc"]);
        let err = parse_args(argv).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn help_is_long_only() {
        let err = parse_args(["mssql-json", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn two_letter_flags_are_rewritten_outside_value_position() {
        let argv = normalize_args(["mssql-json", "-pw", "-db", "-db", "x", "-q", "-pw"]);
        assert_eq!(
            argv,
            ["mssql-json", "--password", "-db", "--database", "x", "-q", "-pw"]
                .map(OsString::from)
        );
    }

    #[test]
    fn usage_lists_every_option() {
        let help = usage();
        for flag in [
            "--username",
            "--password",
            "--domain",
            "--instance",
            "--hostname",
            "--port",
            "--database",
            "--sql",
            "--silent",
            "--filename",
        ] {
            assert!(help.contains(flag), "{flag} missing from help");
        }
    }

    #[test]
    fn parse_failure_carries_usage_and_exits_1() {
        let err = parse_args(["mssql-json", "-u", "sa"]).unwrap_err();
        let err = argument_error(&err);
        assert!(matches!(err, MssqlJsonError::ArgumentError(_)));
        assert_eq!(err.exit_code(false), 1);

        let text = err.to_string();
        assert!(text.contains("--instance"), "{text}");
        assert!(text.ends_with(&usage()), "{text}");
    }
}
