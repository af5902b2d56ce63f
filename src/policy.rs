use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::PolicyError;

pub const DEFAULT_VERSION: &str = "2012-10-17";
const S3_RESOURCE_PREFIX: &str = "arn:aws:s3:::";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Effect {
    Allow,
    Deny,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn values(&self) -> &[String] {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value),
            OneOrMany::Many(values) => values,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Statement {
    #[serde(rename = "Sid", default)]
    pub sid: Option<String>,
    #[serde(rename = "Effect")]
    pub effect: Effect,
    #[serde(rename = "Action")]
    pub action: OneOrMany,
    #[serde(rename = "Resource", default)]
    pub resource: Option<OneOrMany>,
    #[serde(rename = "Condition", default)]
    pub condition: Option<serde_json::Map<String, Value>>,
}

/// Parsed access-policy document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Policy {
    #[serde(rename = "ID", default)]
    pub id: Option<String>,
    #[serde(rename = "Version", default)]
    pub version: Option<String>,
    #[serde(rename = "Statement", default)]
    pub statements: Vec<Statement>,
}

impl Policy {
    /// Parses and validates a policy document.
    pub fn parse(bytes: &[u8]) -> Result<Self, String> {
        let policy: Policy = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;
        policy.validate()?;
        Ok(policy)
    }

    fn validate(&self) -> Result<(), String> {
        if let Some(version) = &self.version {
            if version != DEFAULT_VERSION {
                return Err(format!("invalid version '{version}'"));
            }
        }

        let mut sids = HashSet::new();
        for (index, statement) in self.statements.iter().enumerate() {
            statement
                .validate()
                .map_err(|reason| format!("statement {}: {reason}", index + 1))?;

            if let Some(sid) = statement.sid.as_deref().filter(|sid| !sid.is_empty()) {
                if !sids.insert(sid) {
                    return Err(format!("duplicate Sid '{sid}'"));
                }
            }
        }
        Ok(())
    }
}

impl Statement {
    fn validate(&self) -> Result<(), String> {
        let actions = self.action.values();
        if actions.is_empty() {
            return Err("Action must not be empty".to_string());
        }
        for action in actions {
            match action.split_once(':') {
                Some((service, name)) if !service.is_empty() && !name.is_empty() => {}
                _ => return Err(format!("invalid action '{action}'")),
            }
        }

        if actions.iter().any(|action| action.starts_with("s3:")) {
            let resources = self.resource.as_ref().map(OneOrMany::values).unwrap_or_default();
            if resources.is_empty() {
                return Err("Resource must not be empty".to_string());
            }
            if let Some(bad) = resources.iter().find(|r| !r.starts_with(S3_RESOURCE_PREFIX)) {
                return Err(format!("invalid resource '{bad}'"));
            }
        }
        Ok(())
    }
}

/// A policy file read from disk: the raw bytes to forward plus their parse.
#[derive(Debug, Clone)]
pub struct PolicyDocument {
    pub raw: Vec<u8>,
    pub policy: Policy,
}

/// Reads and validates the policy at `path`. `None` means no override.
pub fn load(path: Option<&Path>) -> Result<Option<PolicyDocument>, PolicyError> {
    let Some(path) = path else {
        return Ok(None);
    };

    let raw = std::fs::read(path).map_err(|source| PolicyError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let policy = Policy::parse(&raw).map_err(|reason| PolicyError::Parse {
        path: path.to_path_buf(),
        reason,
    })?;

    tracing::debug!(path = %path.display(), statements = policy.statements.len(), "loaded policy document");

    Ok(Some(PolicyDocument {
        raw,
        policy,
    }))
}
