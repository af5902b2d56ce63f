pub mod svcacct;
pub mod user;

use crate::error::AdminError;

/// Positional `ALIAS ACCOUNT` pair every account command takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target<'a> {
    pub alias: &'a str,
    pub account: &'a str,
}

/// Fails with a usage error unless exactly `expected` positional arguments
/// were given. Only the count is checked, never the content.
pub fn check_arity(
    args: &[String],
    expected: usize,
    command: &'static [&'static str],
) -> Result<(), AdminError> {
    if args.len() == expected {
        return Ok(());
    }

    Err(AdminError::Usage {
        command,
        message: format!(
            "Incorrect number of arguments for {} command.",
            command.join(" ")
        ),
    })
}

pub fn target<'a>(args: &'a [String], command: &'static [&'static str]) -> Result<Target<'a>, AdminError> {
    check_arity(args, 2, command)?;
    Ok(Target {
        alias: &args[0],
        account: &args[1],
    })
}
