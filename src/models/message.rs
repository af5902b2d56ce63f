use console::Style;
use serde::{Serialize, Serializer};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Width of the access key column in `list` rows.
const ACCESS_FIELD_MAX_LEN: usize = 20;

/// Tag of an account-lifecycle operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Add,
    List,
    Info,
    Remove,
    Disable,
    Enable,
    Set,
}

/// Result of one successful account-lifecycle call.
///
/// Each variant carries only the fields meaningful to its operation, so the
/// sparse JSON form and the human templates fall out of an exhaustive match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Add {
        access_key: String,
        secret_key: String,
    },
    List {
        access_key: String,
        parent_user: String,
    },
    Info {
        access_key: String,
        parent_user: String,
        account_status: String,
        implied_policy: bool,
        policy: String,
        member_of: Vec<String>,
    },
    Remove {
        access_key: String,
    },
    Disable {
        access_key: String,
    },
    Enable {
        access_key: String,
    },
    Set {
        access_key: String,
    },
}

impl Outcome {
    pub fn operation(&self) -> Operation {
        match self {
            Outcome::Add { .. } => Operation::Add,
            Outcome::List { .. } => Operation::List,
            Outcome::Info { .. } => Operation::Info,
            Outcome::Remove { .. } => Operation::Remove,
            Outcome::Disable { .. } => Operation::Disable,
            Outcome::Enable { .. } => Operation::Enable,
            Outcome::Set { .. } => Operation::Set,
        }
    }

    pub fn access_key(&self) -> &str {
        match self {
            Outcome::Add { access_key, .. }
            | Outcome::List { access_key, .. }
            | Outcome::Info { access_key, .. }
            | Outcome::Remove { access_key }
            | Outcome::Disable { access_key }
            | Outcome::Enable { access_key }
            | Outcome::Set { access_key } => access_key,
        }
    }

    /// Human-readable form. `color` toggles ANSI styling.
    pub fn to_human(&self, color: bool) -> String {
        let message = Style::new().green().force_styling(color);

        match self {
            Outcome::Add {
                access_key,
                secret_key,
            } => message
                .apply_to(format!("Access Key: {access_key}\nSecret Key: {secret_key}"))
                .to_string(),
            Outcome::List { access_key, .. } => table_cell(access_key, ACCESS_FIELD_MAX_LEN),
            Outcome::Info {
                access_key,
                parent_user,
                account_status,
                implied_policy,
                ..
            } => {
                let policy = if *implied_policy { "implied" } else { "embedded" };
                let lines = [
                    format!("AccessKey: {access_key}"),
                    format!("ParentUser: {parent_user}"),
                    format!("Status: {account_status}"),
                    format!("Policy: {policy}"),
                ];
                message.apply_to(lines.join("\n")).to_string()
            }
            Outcome::Remove { access_key } => message
                .apply_to(format!("Removed service account `{access_key}` successfully."))
                .to_string(),
            Outcome::Disable { access_key } => message
                .apply_to(format!("Disabled service account `{access_key}` successfully."))
                .to_string(),
            Outcome::Enable { access_key } => message
                .apply_to(format!("Enabled service account `{access_key}` successfully."))
                .to_string(),
            Outcome::Set { access_key } => message
                .apply_to(format!("Edited service account `{access_key}` successfully."))
                .to_string(),
        }
    }

    /// Canonical pretty-printed JSON form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn wire(&self) -> Wire<'_> {
        let base = Wire {
            access_key: non_empty(self.access_key()),
            ..Wire::default()
        };

        match self {
            Outcome::Add { secret_key, .. } => Wire {
                secret_key: non_empty(secret_key),
                ..base
            },
            Outcome::List { parent_user, .. } => Wire {
                parent_user: non_empty(parent_user),
                ..base
            },
            Outcome::Info {
                parent_user,
                account_status,
                implied_policy,
                policy,
                member_of,
                ..
            } => Wire {
                account_status: non_empty(account_status),
                implied_policy: *implied_policy,
                member_of: (!member_of.is_empty()).then_some(member_of.as_slice()),
                parent_user: non_empty(parent_user),
                policy: non_empty(policy),
                ..base
            },
            Outcome::Remove { .. }
            | Outcome::Disable { .. }
            | Outcome::Enable { .. }
            | Outcome::Set { .. } => base,
        }
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.wire().serialize(serializer)
    }
}

// Fields are declared in alphabetical order of their JSON keys.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Wire<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    access_key: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    account_status: Option<&'a str>,
    #[serde(skip_serializing_if = "is_false")]
    implied_policy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    member_of: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_user: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    policy: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_key: Option<&'a str>,
    status: &'static str,
}

impl Default for Wire<'_> {
    fn default() -> Self {
        Self {
            access_key: None,
            account_status: None,
            implied_policy: false,
            member_of: None,
            parent_user: None,
            policy: None,
            secret_key: None,
            status: "success",
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

/// Left-aligned fixed-width cell; overlong content is cut and ends in `...`.
fn table_cell(content: &str, width: usize) -> String {
    const DOTS: &str = "...";

    if content.chars().count() > width {
        let kept: String = content.chars().take(width - DOTS.len()).collect();
        format!("{kept}{DOTS}")
    } else {
        format!("{content:<width$}")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use strum::IntoEnumIterator;

    use super::*;

    fn sample(operation: Operation) -> Outcome {
        let access_key = "svc-foobar".to_string();
        match operation {
            Operation::Add => Outcome::Add {
                access_key,
                secret_key: "s3cr3t".to_string(),
            },
            Operation::List => Outcome::List {
                access_key,
                parent_user: "foobar".to_string(),
            },
            Operation::Info => Outcome::Info {
                access_key,
                parent_user: "foobar".to_string(),
                account_status: "on".to_string(),
                implied_policy: false,
                policy: r#"{"Version":"2012-10-17","Statement":[]}"#.to_string(),
                member_of: vec!["admins".to_string()],
            },
            Operation::Remove => Outcome::Remove { access_key },
            Operation::Disable => Outcome::Disable { access_key },
            Operation::Enable => Outcome::Enable { access_key },
            Operation::Set => Outcome::Set { access_key },
        }
    }

    fn json_keys(outcome: &Outcome) -> Vec<String> {
        let value: Value = serde_json::from_str(&outcome.to_json().unwrap()).unwrap();
        value.as_object().unwrap().keys().cloned().collect()
    }

    #[test]
    fn json_carries_only_fields_of_the_operation() {
        for operation in Operation::iter() {
            let outcome = sample(operation);
            let keys = json_keys(&outcome);
            let expected: &[&str] = match operation {
                Operation::Add => &["accessKey", "secretKey", "status"],
                Operation::List => &["accessKey", "parentUser", "status"],
                Operation::Info => &[
                    "accessKey",
                    "accountStatus",
                    "memberOf",
                    "parentUser",
                    "policy",
                    "status",
                ],
                _ => &["accessKey", "status"],
            };
            assert_eq!(keys, expected, "keys for {operation}");
        }
    }

    #[test]
    fn add_json_has_no_descriptive_fields() {
        let json = sample(Operation::Add).to_json().unwrap();
        assert!(!json.contains("memberOf"));
        assert!(!json.contains("policy"));
        assert!(!json.contains("null"));
        assert!(json.contains(r#""status": "success""#));
    }

    #[test]
    fn info_json_drops_empty_values() {
        let outcome = Outcome::Info {
            access_key: "svc".to_string(),
            parent_user: "foobar".to_string(),
            account_status: "off".to_string(),
            implied_policy: true,
            policy: String::new(),
            member_of: Vec::new(),
        };
        assert_eq!(
            json_keys(&outcome),
            ["accessKey", "accountStatus", "impliedPolicy", "parentUser", "status"]
        );
    }

    #[test]
    fn json_is_pretty_and_ordered() {
        let json = sample(Operation::Disable).to_json().unwrap();
        assert_eq!(
            json,
            "{\n  \"accessKey\": \"svc-foobar\",\n  \"status\": \"success\"\n}"
        );
    }

    #[test]
    fn human_form_is_non_empty_and_deterministic() {
        for operation in Operation::iter() {
            let outcome = sample(operation);
            let first = outcome.to_human(false);
            assert!(!first.is_empty(), "empty output for {operation}");
            assert_eq!(first, outcome.to_human(false));
            assert_eq!(outcome.operation(), operation);
        }
    }

    #[test]
    fn human_templates() {
        assert_eq!(
            sample(Operation::Add).to_human(false),
            "Access Key: svc-foobar\nSecret Key: s3cr3t"
        );
        assert_eq!(
            sample(Operation::Info).to_human(false),
            "AccessKey: svc-foobar\nParentUser: foobar\nStatus: on\nPolicy: embedded"
        );
        assert_eq!(
            sample(Operation::Remove).to_human(false),
            "Removed service account `svc-foobar` successfully."
        );
        assert_eq!(
            sample(Operation::Disable).to_human(false),
            "Disabled service account `svc-foobar` successfully."
        );
        assert_eq!(
            sample(Operation::Enable).to_human(false),
            "Enabled service account `svc-foobar` successfully."
        );
        assert_eq!(
            sample(Operation::Set).to_human(false),
            "Edited service account `svc-foobar` successfully."
        );
    }

    #[test]
    fn color_wraps_the_same_text() {
        let plain = sample(Operation::Disable).to_human(false);
        let colored = sample(Operation::Disable).to_human(true);
        assert_ne!(plain, colored);
        assert!(colored.contains(&plain));
        assert!(colored.starts_with("\u{1b}["));
    }

    #[test]
    fn list_rows_are_fixed_width() {
        assert_eq!(sample(Operation::List).to_human(false), "svc-foobar          ");

        let long = Outcome::List {
            access_key: "ABCDEFGHIJKLMNOPQRSTUVWXYZ".to_string(),
            parent_user: "foobar".to_string(),
        };
        assert_eq!(long.to_human(false), "ABCDEFGHIJKLMNOPQ...");
    }

    #[test]
    fn operation_tags_round_trip_and_reject_unknown() {
        for operation in Operation::iter() {
            assert_eq!(operation.as_ref().parse::<Operation>().unwrap(), operation);
        }
        assert_eq!(Operation::Remove.to_string(), "remove");
        assert!("promote".parse::<Operation>().is_err());
        assert!("".parse::<Operation>().is_err());
    }
}
