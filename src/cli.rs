//! Command-line parsing: `toast <success|failure>`

use std::ffi::OsString;

use clap::Parser;

use crate::error::UsageError;
use crate::status::Status;

#[derive(Parser, Debug)]
#[command(name = "toast")]
#[command(about = "Show a build-status toast, then exit", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// "success" or anything else for failure
    #[arg(value_parser = clap::value_parser!(OsString))]
    status: OsString,
}

/// Parse argv (program name included) into a status
/// Exactly one raw argument is accepted, whatever it looks like
pub fn parse<I, T>(args: I) -> Result<Status, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let program = program_name(args.first());

    let [argv0, value] = args.as_slice() else {
        return Err(UsageError::ArgCount { program });
    };

    // Leading escape: the value is positional even if it is "--" or "-x"
    let escaped = [argv0.clone(), OsString::from("--"), value.clone()];
    Cli::try_parse_from(escaped)
        .map(|cli| Status::from_arg(&cli.status))
        .map_err(|_| UsageError::ArgCount { program })
}

/// argv[0] as shown in the usage line
fn program_name(argv0: Option<&OsString>) -> String {
    argv0
        .map(|a| a.to_string_lossy().into_owned())
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}
