use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "objadm", version, about = "Administer object-storage cluster accounts")]
pub struct Cli {
    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Directory holding config.toml with the alias table
    #[arg(long, global = true, value_name = "DIR", env = "OBJADM_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Log requests to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage users
    #[command(subcommand)]
    User(UserCommands),
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Disable user
    #[command(after_help = "EXAMPLES:\n  objadm user disable myminio foobar")]
    Disable {
        #[arg(value_name = "TARGET USERNAME")]
        args: Vec<String>,
    },

    /// Enable user
    #[command(after_help = "EXAMPLES:\n  objadm user enable myminio foobar")]
    Enable {
        #[arg(value_name = "TARGET USERNAME")]
        args: Vec<String>,
    },

    /// Manage service accounts
    #[command(subcommand)]
    Svcacct(SvcacctCommands),
}

#[derive(Subcommand, Debug)]
pub enum SvcacctCommands {
    /// Add a new service account
    #[command(after_help = "ACCOUNT:\n  An account could be a regular user, STS or LDAP user.\n\n\
                            EXAMPLES:\n  objadm user svcacct add myminio foobar")]
    Add {
        #[arg(value_name = "ALIAS ACCOUNT")]
        args: Vec<String>,

        /// Set an access key for the service account
        #[arg(long)]
        access_key: Option<String>,

        /// Set a secret key for the service account
        #[arg(long)]
        secret_key: Option<String>,

        /// Path to a JSON policy file
        #[arg(long, value_name = "PATH")]
        policy: Option<PathBuf>,
    },

    /// List service accounts of a user
    #[command(visible_alias = "list")]
    Ls {
        #[arg(value_name = "ALIAS ACCOUNT")]
        args: Vec<String>,
    },

    /// Show service account details
    Info {
        #[arg(value_name = "ALIAS SERVICE-ACCOUNT")]
        args: Vec<String>,
    },

    /// Remove a service account
    #[command(visible_alias = "remove")]
    Rm {
        #[arg(value_name = "ALIAS SERVICE-ACCOUNT")]
        args: Vec<String>,
    },

    /// Enable a service account
    Enable {
        #[arg(value_name = "ALIAS SERVICE-ACCOUNT")]
        args: Vec<String>,
    },

    /// Disable a service account
    Disable {
        #[arg(value_name = "ALIAS SERVICE-ACCOUNT")]
        args: Vec<String>,
    },

    /// Edit the secret key or policy of a service account
    #[command(visible_alias = "set")]
    Edit {
        #[arg(value_name = "ALIAS SERVICE-ACCOUNT")]
        args: Vec<String>,

        /// Set a new secret key
        #[arg(long)]
        secret_key: Option<String>,

        /// Path to a JSON policy file replacing the current one
        #[arg(long, value_name = "PATH")]
        policy: Option<PathBuf>,
    },
}
