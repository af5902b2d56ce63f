use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use objadm::cli::Cli;
use objadm::error::AdminError;
use objadm::output::{stderr_color, write_error};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(objadm::parse_error_status(&err));
        }
    };
    objadm::init_logging(cli.debug);
    let json = cli.json;
    let no_color = cli.no_color;

    let Err(err) = objadm::run(cli) else {
        return ExitCode::SUCCESS;
    };

    let mut stderr = io::stderr().lock();
    if let Some(AdminError::Usage { command, .. }) = err.downcast_ref::<AdminError>() {
        let _ = write_error(&*err, false, stderr_color(false, no_color), &mut stderr);
        let _ = writeln!(stderr, "\n{}", objadm::command_help(command));
    } else if write_error(&*err, json, stderr_color(json, no_color), &mut stderr).is_err() {
        let _ = writeln!(stderr, "objadm: {err}");
    }

    ExitCode::FAILURE
}
