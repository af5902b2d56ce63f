use std::io::{self, Write};

use anyhow::Result;
use console::{style, Term};
use serde::Serialize;

use crate::models::Outcome;

/// How results are printed. Chosen once per process and passed down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub json: bool,
    pub color: bool,
}

impl RenderConfig {
    /// Colors are used only for human output on a terminal that supports them.
    pub fn detect(json: bool, no_color: bool) -> Self {
        let color = !json && !no_color && Term::stdout().features().colors_supported();
        Self { json, color }
    }
}

/// Whether diagnostics on stderr may be colored. JSON errors never are.
pub fn stderr_color(json: bool, no_color: bool) -> bool {
    !json && !no_color && Term::stderr().features().colors_supported()
}

/// Trait for types that can render themselves under a [`RenderConfig`].
pub trait Render {
    fn render(&self, config: &RenderConfig, w: &mut dyn Write) -> Result<()>;
}

impl Render for Outcome {
    fn render(&self, config: &RenderConfig, w: &mut dyn Write) -> Result<()> {
        let text = if config.json {
            self.to_json()?
        } else {
            self.to_human(config.color)
        };
        writeln!(w, "{text}")?;
        Ok(())
    }
}

/// Prints every outcome to stdout, one document or block each.
pub fn print(outcomes: &[Outcome], config: &RenderConfig) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for outcome in outcomes {
        outcome.render(config, &mut stdout)?;
    }
    stdout.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct ErrorDocument<'a> {
    status: &'static str,
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    cause: Option<String>,
}

/// Writes the single diagnostic for a failed invocation.
pub fn write_error(
    err: &(dyn std::error::Error + 'static),
    json: bool,
    color: bool,
    w: &mut dyn Write,
) -> Result<()> {
    let message = err.to_string();
    if json {
        let doc = ErrorDocument {
            status: "error",
            error: ErrorDetail {
                message: &message,
                cause: err.source().map(ToString::to_string),
            },
        };
        serde_json::to_writer_pretty(&mut *w, &doc)?;
        writeln!(w)?;
    } else {
        writeln!(w, "{} {message}", style("objadm:").red().bold().force_styling(color))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AdminError, GatewayError};

    const HUMAN: RenderConfig = RenderConfig {
        json: false,
        color: false,
    };
    const JSON: RenderConfig = RenderConfig {
        json: true,
        color: false,
    };

    fn rendered(outcome: &Outcome, config: &RenderConfig) -> String {
        let mut buf = Vec::new();
        outcome.render(config, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn human_mode_prints_template_line() {
        let outcome = Outcome::Disable {
            access_key: "foobar".to_string(),
        };
        assert_eq!(
            rendered(&outcome, &HUMAN),
            "Disabled service account `foobar` successfully.\n"
        );
    }

    #[test]
    fn json_mode_prints_document() {
        let outcome = Outcome::Add {
            access_key: "AK".to_string(),
            secret_key: "SK".to_string(),
        };
        let out = rendered(&outcome, &JSON);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"accessKey": "AK", "secretKey": "SK", "status": "success"})
        );
        assert!(out.ends_with("}\n"));
        assert_eq!(out, format!("{}\n", outcome.to_json().unwrap()));
    }

    #[test]
    fn json_never_colors() {
        assert!(!RenderConfig::detect(true, false).color);
        assert!(!RenderConfig::detect(false, true).color);
    }

    #[test]
    fn json_error_document_carries_cause() {
        let err = AdminError::remote(
            "Unable to disable user",
            &["myminio".to_string(), "foobar".to_string()],
            GatewayError::Status {
                status: 403,
                message: "Access Denied.".to_string(),
            },
        );
        let mut buf = Vec::new();
        write_error(&err, true, false, &mut buf).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(
            value["error"]["message"],
            "Unable to disable user (myminio, foobar): Access Denied. (HTTP 403)"
        );
        assert_eq!(value["error"]["cause"], "Access Denied. (HTTP 403)");
    }

    #[test]
    fn json_error_without_cause_omits_it() {
        let err = AdminError::Connection {
            alias: "myminio".to_string(),
            reason: "invalid URL".to_string(),
        };
        let mut buf = Vec::new();
        write_error(&err, true, false, &mut buf).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert!(value["error"].get("cause").is_none());
    }

    #[test]
    fn human_error_is_one_line() {
        let err = AdminError::Connection {
            alias: "myminio".to_string(),
            reason: "invalid URL".to_string(),
        };
        let mut buf = Vec::new();
        write_error(&err, false, false, &mut buf).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "objadm: Unable to initialize admin connection to `myminio`: invalid URL\n"
        );
    }

    #[test]
    fn human_error_colors_only_when_asked() {
        let err = AdminError::Connection {
            alias: "myminio".to_string(),
            reason: "invalid URL".to_string(),
        };
        let mut colored = Vec::new();
        write_error(&err, false, true, &mut colored).unwrap();
        let colored = String::from_utf8(colored).unwrap();

        assert!(colored.contains('\u{1b}'));
        assert_eq!(
            console::strip_ansi_codes(&colored),
            "objadm: Unable to initialize admin connection to `myminio`: invalid URL\n"
        );
        assert!(!stderr_color(true, false));
        assert!(!stderr_color(false, true));
    }
}
