use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

/// Literal shown in place of the dashboard when a render cycle fails.
pub const RENDER_FAILURE_PLACEHOLDER: &str = "Unable to load transactions.";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// True for the failures that replace the whole dashboard with the placeholder.
    pub fn is_render_failure(&self) -> bool {
        matches!(self.code.as_str(), "network_error" | "empty_dataset")
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `pocketdash {cmd} --help` for usage."),
            None => "Run `pocketdash --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn network_status(url: &str, status: u16) -> Self {
        Self::new(
            "network_error",
            &format!("CSV endpoint returned HTTP {status}."),
            vec![
                "Confirm the sheet is still published to the web as CSV.".to_string(),
                "Open the URL in a browser to check it is reachable.".to_string(),
            ],
        )
        .with_data(json!({
            "url": url,
            "status": status,
        }))
    }

    pub fn network_transport(url: &str, detail: &str) -> Self {
        Self::new(
            "network_error",
            &format!("Could not fetch the CSV endpoint: {detail}"),
            vec![
                "Check your network connection.".to_string(),
                "Confirm the source URL is spelled correctly.".to_string(),
            ],
        )
        .with_data(json!({
            "url": url,
        }))
    }

    pub fn empty_dataset() -> Self {
        Self::new(
            "empty_dataset",
            "The CSV source has no data rows.",
            vec![
                "Add at least one transaction row below the header.".to_string(),
                "Expected header: Timestamp,Name,Amount,Category".to_string(),
            ],
        )
    }

    pub fn missing_source() -> Self {
        Self::invalid_argument_with_recovery(
            "No CSV source configured.",
            vec![
                "Pass `--url <csv-url>` or `--file <path>`.".to_string(),
                "Or set `source_url` in your config file.".to_string(),
            ],
        )
    }

    pub fn source_read_failed(location: &str, detail: &str) -> Self {
        Self::invalid_argument_with_recovery(
            &format!("Could not read CSV source `{location}`: {detail}"),
            vec!["Verify the path exists and is readable.".to_string()],
        )
    }

    pub fn config_not_found(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "config_not_found",
            &format!("Config file `{location}` does not exist."),
            vec![
                format!("Create `{location}` or point `--config` at an existing file."),
                "Run `pocketdash config` to see the effective defaults.".to_string(),
            ],
        )
    }

    pub fn config_read_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "config_read_failed",
            &format!("Could not read config file `{location}`: {detail}"),
            vec![format!("Grant read access to `{location}`.")],
        )
    }

    pub fn config_invalid(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "config_invalid",
            &format!("Config file `{location}` is not valid: {detail}"),
            vec!["Fix the reported TOML error and rerun the command.".to_string()],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
