use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single remote administrative call.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("No config directory: pass --config-dir or set HOME")]
    NoConfigDir,

    #[error("Alias not found: {alias}{}", suggestion_hint(.suggestion))]
    UnknownAlias {
        alias: String,
        suggestion: Option<String>,
    },
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!("\nDid you mean: {name}"),
        None => String::new(),
    }
}

#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("Unable to open the policy document {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to parse the policy document {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },
}

/// Every way a command can fail. All of them end the invocation.
#[derive(Error, Debug)]
pub enum AdminError {
    /// Wrong positional arguments. `command` is the subcommand path whose help
    /// gets printed.
    #[error("{message}")]
    Usage {
        command: &'static [&'static str],
        message: String,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error("Unable to initialize admin connection to `{alias}`: {reason}")]
    Connection { alias: String, reason: String },

    #[error("{action} ({}): {source}", .args.join(", "))]
    Remote {
        action: &'static str,
        args: Vec<String>,
        #[source]
        source: GatewayError,
    },
}

impl AdminError {
    pub fn remote(action: &'static str, args: &[String], source: GatewayError) -> Self {
        AdminError::Remote {
            action,
            args: args.to_vec(),
            source,
        }
    }
}
