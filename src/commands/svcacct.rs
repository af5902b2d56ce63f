use std::path::PathBuf;

use crate::commands::{target, Target};
use crate::error::AdminError;
use crate::gateway::{AdminApi, Connect};
use crate::models::{AccountStatus, AddServiceAccountReq, Outcome, UpdateServiceAccountReq};
use crate::policy;

pub const ADD: &[&str] = &["user", "svcacct", "add"];
pub const LIST: &[&str] = &["user", "svcacct", "ls"];
pub const INFO: &[&str] = &["user", "svcacct", "info"];
pub const REMOVE: &[&str] = &["user", "svcacct", "rm"];
pub const ENABLE: &[&str] = &["user", "svcacct", "enable"];
pub const DISABLE: &[&str] = &["user", "svcacct", "disable"];
pub const EDIT: &[&str] = &["user", "svcacct", "edit"];

/// Optional inputs of `svcacct add`. Each one is independent of the others.
#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub policy: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct EditOptions {
    pub secret_key: Option<String>,
    pub policy: Option<PathBuf>,
}

/// Mints a service account under the parent named by the second argument.
///
/// Explicit keys are forwarded as given; the cluster decides whether they are
/// acceptable. The policy file is read and parsed before connecting.
pub fn add<C: Connect>(args: &[String], opts: AddOptions, connector: &C) -> Result<Outcome, AdminError> {
    let Target { alias, account } = target(args, ADD)?;
    let policy = policy::load(opts.policy.as_deref())?;

    let statements = policy.as_ref().map_or(0, |doc| doc.policy.statements.len());

    let client = connector.connect(alias)?;

    let req = AddServiceAccountReq {
        target_user: account.to_string(),
        access_key: opts.access_key.unwrap_or_default(),
        secret_key: opts.secret_key.unwrap_or_default(),
        policy: policy.map(|doc| doc.raw),
    };
    tracing::debug!(
        target_user = account,
        explicit_access_key = !req.access_key.is_empty(),
        explicit_secret_key = !req.secret_key.is_empty(),
        policy_statements = statements,
        "adding service account"
    );

    let creds = client
        .add_service_account(&req)
        .map_err(|e| AdminError::remote("Unable to add a new service account", args, e))?;

    Ok(Outcome::Add {
        access_key: creds.access_key,
        secret_key: creds.secret_key,
    })
}

/// One `List` outcome per service account of the parent user.
pub fn list<C: Connect>(args: &[String], connector: &C) -> Result<Vec<Outcome>, AdminError> {
    let Target { alias, account } = target(args, LIST)?;
    let client = connector.connect(alias)?;

    let accounts = client
        .list_service_accounts(account)
        .map_err(|e| AdminError::remote("Unable to list service accounts", args, e))?;
    tracing::debug!(user = account, count = accounts.len(), "listed service accounts");

    Ok(accounts
        .into_iter()
        .map(|access_key| Outcome::List {
            access_key,
            parent_user: account.to_string(),
        })
        .collect())
}

pub fn info<C: Connect>(args: &[String], connector: &C) -> Result<Outcome, AdminError> {
    let Target { alias, account } = target(args, INFO)?;
    let client = connector.connect(alias)?;

    let info = client.info_service_account(account).map_err(|e| {
        AdminError::remote("Unable to get information of the specified service account", args, e)
    })?;

    Ok(Outcome::Info {
        access_key: account.to_string(),
        parent_user: info.parent_user,
        account_status: info.account_status,
        implied_policy: info.implied_policy,
        policy: info.policy,
        member_of: info.member_of,
    })
}

pub fn remove<C: Connect>(args: &[String], connector: &C) -> Result<Outcome, AdminError> {
    let Target { alias, account } = target(args, REMOVE)?;
    let client = connector.connect(alias)?;

    client.delete_service_account(account).map_err(|e| {
        AdminError::remote("Unable to remove the specified service account", args, e)
    })?;

    Ok(Outcome::Remove {
        access_key: account.to_string(),
    })
}

pub fn enable<C: Connect>(args: &[String], connector: &C) -> Result<Outcome, AdminError> {
    set_status(args, AccountStatus::Enabled, ENABLE, connector)
}

pub fn disable<C: Connect>(args: &[String], connector: &C) -> Result<Outcome, AdminError> {
    set_status(args, AccountStatus::Disabled, DISABLE, connector)
}

fn set_status<C: Connect>(
    args: &[String],
    status: AccountStatus,
    command: &'static [&'static str],
    connector: &C,
) -> Result<Outcome, AdminError> {
    let Target { alias, account } = target(args, command)?;
    let client = connector.connect(alias)?;

    let req = UpdateServiceAccountReq {
        new_status: Some(status),
        ..Default::default()
    };
    client.update_service_account(account, &req).map_err(|e| {
        let action = match status {
            AccountStatus::Enabled => "Unable to enable the specified service account",
            AccountStatus::Disabled => "Unable to disable the specified service account",
        };
        AdminError::remote(action, args, e)
    })?;

    let access_key = account.to_string();
    Ok(match status {
        AccountStatus::Enabled => Outcome::Enable { access_key },
        AccountStatus::Disabled => Outcome::Disable { access_key },
    })
}

/// Replaces the secret key and/or policy. At least one must be given.
pub fn edit<C: Connect>(args: &[String], opts: EditOptions, connector: &C) -> Result<Outcome, AdminError> {
    let Target { alias, account } = target(args, EDIT)?;
    if opts.secret_key.is_none() && opts.policy.is_none() {
        return Err(AdminError::Usage {
            command: EDIT,
            message: "At least one of --secret-key or --policy is required.".to_string(),
        });
    }
    let policy = policy::load(opts.policy.as_deref())?;

    let client = connector.connect(alias)?;

    let req = UpdateServiceAccountReq {
        new_policy: policy.map(|doc| doc.raw),
        new_secret_key: opts.secret_key,
        new_status: None,
    };
    client.update_service_account(account, &req).map_err(|e| {
        AdminError::remote("Unable to edit the specified service account", args, e)
    })?;

    Ok(Outcome::Set {
        access_key: account.to_string(),
    })
}
