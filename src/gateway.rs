//! Remote administrative API: the calls the commands make and the blocking
//! HTTP client that performs them against an alias.

use std::path::PathBuf;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, Url};
use serde::{Deserialize, Serialize};

use crate::config::{resolve_config_dir, Alias, Config};
use crate::error::{AdminError, GatewayError};
use crate::models::{
    AccountStatus, AddServiceAccountReq, Credentials, ServiceAccountInfo, UpdateServiceAccountReq,
};

pub const ADMIN_API_PREFIX: &str = "minio/admin/v3";

/// Typed administrative calls against one cluster.
pub trait AdminApi {
    fn add_service_account(&self, req: &AddServiceAccountReq) -> Result<Credentials, GatewayError>;

    fn set_user_status(&self, user: &str, status: AccountStatus) -> Result<(), GatewayError>;

    fn list_service_accounts(&self, user: &str) -> Result<Vec<String>, GatewayError>;

    fn info_service_account(&self, access_key: &str) -> Result<ServiceAccountInfo, GatewayError>;

    fn delete_service_account(&self, access_key: &str) -> Result<(), GatewayError>;

    fn update_service_account(
        &self,
        access_key: &str,
        req: &UpdateServiceAccountReq,
    ) -> Result<(), GatewayError>;
}

/// Opens an admin client for a named alias.
pub trait Connect {
    type Client: AdminApi;

    fn connect(&self, alias: &str) -> Result<Self::Client, AdminError>;
}

/// Connects through the alias table in `config.toml`.
///
/// The file is only read when a command actually connects, so argument
/// errors never depend on the state of the config.
pub struct AliasConnector {
    config_dir: Option<PathBuf>,
}

impl AliasConnector {
    pub fn new(config_dir: Option<PathBuf>) -> Self {
        Self { config_dir }
    }
}

impl Connect for AliasConnector {
    type Client = HttpAdminClient;

    fn connect(&self, alias: &str) -> Result<HttpAdminClient, AdminError> {
        let dir = resolve_config_dir(self.config_dir.clone())?;
        let config = Config::load(&dir)?;
        let entry = config.alias(alias)?;

        tracing::debug!(alias, url = entry.url.as_str(), "connecting to admin endpoint");
        HttpAdminClient::new(entry).map_err(|reason| AdminError::Connection {
            alias: alias.to_string(),
            reason,
        })
    }
}

pub struct HttpAdminClient {
    http: Client,
    base: Url,
    access_key: String,
    secret_key: String,
}

impl HttpAdminClient {
    pub fn new(alias: &Alias) -> Result<Self, String> {
        let mut base = Url::parse(&alias.url).map_err(|e| format!("invalid URL `{}`: {e}", alias.url))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(format!("unsupported scheme `{}`", base.scheme()));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let http = Client::builder()
            .timeout(alias.timeout())
            .user_agent(concat!("objadm/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| e.to_string())?;

        Ok(Self {
            http,
            base,
            access_key: alias.access_key.clone(),
            secret_key: alias.secret_key.clone(),
        })
    }

    fn endpoint(&self, call: &str, query: &[(&str, &str)]) -> Result<Url, GatewayError> {
        let mut url = self
            .base
            .join(&format!("{ADMIN_API_PREFIX}/{call}"))
            .map_err(|e| GatewayError::Invalid(format!("invalid endpoint: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        call: &str,
        query: &[(&str, &str)],
    ) -> Result<RequestBuilder, GatewayError> {
        let url = self.endpoint(call, query)?;
        tracing::debug!(method = method.as_str(), url = url.as_str(), "admin request");
        Ok(self
            .http
            .request(method, url)
            .basic_auth(&self.access_key, Some(&self.secret_key)))
    }
}

/// Turns a non-success response into [`GatewayError::Status`], preferring the
/// server's own error message when the body carries one.
fn check(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .map(|err| err.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
    tracing::debug!(status = status.as_u16(), message = message.as_str(), "admin request failed");

    Err(GatewayError::Status {
        status: status.as_u16(),
        message,
    })
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(rename = "Message", default)]
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddServiceAccountBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    policy: Option<&'a serde_json::value::RawValue>,
    #[serde(skip_serializing_if = "str::is_empty")]
    access_key: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    secret_key: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    target_user: &'a str,
}

#[derive(Deserialize)]
struct AddServiceAccountResp {
    credentials: Credentials,
}

#[derive(Deserialize)]
struct ListServiceAccountsResp {
    #[serde(default)]
    accounts: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateServiceAccountBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    new_policy: Option<&'a serde_json::value::RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_secret_key: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_status: Option<&'static str>,
}

/// Service-account updates spell status as `on`/`off`, unlike `set-user-status`.
fn service_account_status(status: AccountStatus) -> &'static str {
    match status {
        AccountStatus::Enabled => "on",
        AccountStatus::Disabled => "off",
    }
}

/// Borrows policy bytes as embedded JSON. The loader has already parsed them,
/// so this only fails on documents that never went through it.
fn raw_policy(bytes: Option<&[u8]>) -> Result<Option<&serde_json::value::RawValue>, GatewayError> {
    bytes
        .map(|bytes| {
            let text = std::str::from_utf8(bytes)
                .map_err(|e| GatewayError::Invalid(format!("policy is not UTF-8: {e}")))?;
            serde_json::from_str::<&serde_json::value::RawValue>(text).map_err(GatewayError::from)
        })
        .transpose()
}

impl AdminApi for HttpAdminClient {
    fn add_service_account(&self, req: &AddServiceAccountReq) -> Result<Credentials, GatewayError> {
        let body = AddServiceAccountBody {
            policy: raw_policy(req.policy.as_deref())?,
            access_key: &req.access_key,
            secret_key: &req.secret_key,
            target_user: &req.target_user,
        };
        let response = self
            .request(Method::PUT, "add-service-accounts", &[])?
            .json(&body)
            .send()?;
        let resp: AddServiceAccountResp = serde_json::from_slice(&check(response)?.bytes()?)?;
        Ok(resp.credentials)
    }

    fn set_user_status(&self, user: &str, status: AccountStatus) -> Result<(), GatewayError> {
        let response = self
            .request(
                Method::PUT,
                "set-user-status",
                &[("accessKey", user), ("status", status.as_ref())],
            )?
            .send()?;
        check(response)?;
        Ok(())
    }

    fn list_service_accounts(&self, user: &str) -> Result<Vec<String>, GatewayError> {
        let response = self
            .request(Method::GET, "list-service-accounts", &[("user", user)])?
            .send()?;
        let resp: ListServiceAccountsResp = serde_json::from_slice(&check(response)?.bytes()?)?;
        Ok(resp.accounts)
    }

    fn info_service_account(&self, access_key: &str) -> Result<ServiceAccountInfo, GatewayError> {
        let response = self
            .request(Method::GET, "info-service-account", &[("accessKey", access_key)])?
            .send()?;
        Ok(serde_json::from_slice(&check(response)?.bytes()?)?)
    }

    fn delete_service_account(&self, access_key: &str) -> Result<(), GatewayError> {
        let response = self
            .request(Method::DELETE, "delete-service-accounts", &[("accessKey", access_key)])?
            .send()?;
        check(response)?;
        Ok(())
    }

    fn update_service_account(
        &self,
        access_key: &str,
        req: &UpdateServiceAccountReq,
    ) -> Result<(), GatewayError> {
        let body = UpdateServiceAccountBody {
            new_policy: raw_policy(req.new_policy.as_deref())?,
            new_secret_key: req.new_secret_key.as_deref(),
            new_status: req.new_status.map(service_account_status),
        };
        let response = self
            .request(Method::POST, "update-service-account", &[("accessKey", access_key)])?
            .json(&body)
            .send()?;
        check(response)?;
        Ok(())
    }
}
