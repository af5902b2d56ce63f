pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod gateway;
pub mod helpers;
pub mod models;
pub mod output;
pub mod policy;

use anyhow::Result;
use clap::CommandFactory;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, SvcacctCommands, UserCommands};
use commands::svcacct::{AddOptions, EditOptions};
use error::AdminError;
use gateway::{AliasConnector, Connect};
use models::Outcome;
use output::RenderConfig;

pub const LOG_ENV: &str = "OBJADM_LOG";

/// Installs the stderr log subscriber. `--debug` wins over `OBJADM_LOG`.
pub fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("objadm=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Runs one command to completion: validate, call the cluster, build outcomes.
pub fn dispatch<C: Connect>(command: Commands, connector: &C) -> Result<Vec<Outcome>, AdminError> {
    match command {
        Commands::User(user_cmd) => match user_cmd {
            UserCommands::Disable { args } => Ok(vec![commands::user::disable(&args, connector)?]),
            UserCommands::Enable { args } => Ok(vec![commands::user::enable(&args, connector)?]),
            UserCommands::Svcacct(svcacct_cmd) => match svcacct_cmd {
                SvcacctCommands::Add {
                    args,
                    access_key,
                    secret_key,
                    policy,
                } => {
                    let opts = AddOptions {
                        access_key,
                        secret_key,
                        policy,
                    };
                    Ok(vec![commands::svcacct::add(&args, opts, connector)?])
                }
                SvcacctCommands::Ls { args } => commands::svcacct::list(&args, connector),
                SvcacctCommands::Info { args } => Ok(vec![commands::svcacct::info(&args, connector)?]),
                SvcacctCommands::Rm { args } => Ok(vec![commands::svcacct::remove(&args, connector)?]),
                SvcacctCommands::Enable { args } => {
                    Ok(vec![commands::svcacct::enable(&args, connector)?])
                }
                SvcacctCommands::Disable { args } => {
                    Ok(vec![commands::svcacct::disable(&args, connector)?])
                }
                SvcacctCommands::Edit {
                    args,
                    secret_key,
                    policy,
                } => {
                    let opts = EditOptions { secret_key, policy };
                    Ok(vec![commands::svcacct::edit(&args, opts, connector)?])
                }
            },
        },
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let render = RenderConfig::detect(cli.json, cli.no_color);
    let connector = AliasConnector::new(cli.config_dir);

    let outcomes = dispatch(cli.command, &connector)?;
    output::print(&outcomes, &render)
}

/// Exit status for a command line clap rejected. `--help` and `--version`
/// surface as errors too but are not failures.
pub fn parse_error_status(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

/// Help text of the subcommand at `path`, e.g. `["user", "svcacct", "add"]`.
pub fn command_help(path: &[&str]) -> String {
    let mut cmd = Cli::command();
    cmd.build();

    let mut current = &cmd;
    for name in path {
        match current.find_subcommand(name) {
            Some(sub) => current = sub,
            None => break,
        }
    }
    current.clone().render_help().to_string()
}
