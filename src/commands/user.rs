use crate::commands::target;
use crate::error::AdminError;
use crate::gateway::{AdminApi, Connect};
use crate::models::{AccountStatus, Outcome};

pub const DISABLE: &[&str] = &["user", "disable"];
pub const ENABLE: &[&str] = &["user", "enable"];

pub fn disable<C: Connect>(args: &[String], connector: &C) -> Result<Outcome, AdminError> {
    set_status(args, AccountStatus::Disabled, DISABLE, connector)
}

pub fn enable<C: Connect>(args: &[String], connector: &C) -> Result<Outcome, AdminError> {
    set_status(args, AccountStatus::Enabled, ENABLE, connector)
}

fn set_status<C: Connect>(
    args: &[String],
    status: AccountStatus,
    command: &'static [&'static str],
    connector: &C,
) -> Result<Outcome, AdminError> {
    let target = target(args, command)?;
    let client = connector.connect(target.alias)?;

    tracing::debug!(user = target.account, %status, "setting user status");
    client
        .set_user_status(target.account, status)
        .map_err(|e| {
            let action = match status {
                AccountStatus::Disabled => "Unable to disable user",
                AccountStatus::Enabled => "Unable to enable user",
            };
            AdminError::remote(action, args, e)
        })?;

    let access_key = target.account.to_string();
    Ok(match status {
        AccountStatus::Disabled => Outcome::Disable { access_key },
        AccountStatus::Enabled => Outcome::Enable { access_key },
    })
}
