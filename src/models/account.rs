use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, AsRefStr, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AccountStatus {
    Enabled,
    Disabled,
}

/// Access/secret key pair minted (or echoed) by the cluster.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Body of a "mint service account" call.
///
/// Empty `access_key`/`secret_key` ask the cluster to generate them. `policy`
/// carries the raw bytes of the policy file, forwarded untouched.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AddServiceAccountReq {
    pub target_user: String,
    pub access_key: String,
    pub secret_key: String,
    pub policy: Option<Vec<u8>>,
}

impl std::fmt::Debug for AddServiceAccountReq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let secret = if self.secret_key.is_empty() {
            ""
        } else {
            "<redacted>"
        };
        f.debug_struct("AddServiceAccountReq")
            .field("target_user", &self.target_user)
            .field("access_key", &self.access_key)
            .field("secret_key", &secret)
            .field("policy_bytes", &self.policy.as_ref().map(Vec::len))
            .finish()
    }
}

/// Body of an "update service account" call. `None` leaves a property as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateServiceAccountReq {
    pub new_policy: Option<Vec<u8>>,
    pub new_secret_key: Option<String>,
    pub new_status: Option<AccountStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAccountInfo {
    pub parent_user: String,
    pub account_status: String,
    #[serde(default)]
    pub implied_policy: bool,
    #[serde(default)]
    pub policy: String,
    #[serde(default)]
    pub member_of: Vec<String>,
}
