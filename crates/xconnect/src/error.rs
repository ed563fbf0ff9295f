//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable process exit code.

use miette::Diagnostic;
use thiserror::Error;

use xconnect_config::ConfigError;
use xconnect_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const UPSTREAM: i32 = 9;
    pub const STORE: i32 = 10;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to {url}")]
    #[diagnostic(
        code(xconnect::connection_failed),
        help(
            "{reason}\n\
             Check network access, or point the client elsewhere with\n\
             `xconnect config set equinix.api_url <url>`."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(xconnect::timeout),
        help("Raise the limit with --timeout <secs> or `defaults.timeout` in the config.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(xconnect::auth_failed),
        help(
            "Verify equinix.client_id and the client secret.\n\
             Store a new secret with: xconnect config set-secret equinix"
        )
    )]
    AuthFailed { message: String },

    #[error("No {what} configured for {service}")]
    #[diagnostic(
        code(xconnect::no_credentials),
        help(
            "Run `xconnect config init`, or set it directly, e.g.\n\
             `xconnect config set {service}.client_id <id>` and\n\
             `xconnect config set-secret {service}`."
        )
    )]
    NoCredentials { service: String, what: String },

    // ── Upstream ─────────────────────────────────────────────────────
    #[error("Could not fetch port availability for panel {panel}")]
    #[diagnostic(
        code(xconnect::availability_fetch),
        help(
            "{reason}\n\
             The stored inventory was left unchanged."
        )
    )]
    AvailabilityFetch { panel: String, reason: String },

    #[error("API error: {message}")]
    #[diagnostic(code(xconnect::api_error))]
    Api { message: String, status: Option<u16> },

    // ── Records ──────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(xconnect::not_found),
        help("Run: xconnect {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{resource_type} '{identifier}' already exists")]
    #[diagnostic(
        code(xconnect::conflict),
        help("Pick another id, or remove the existing record first.")
    )]
    Conflict {
        resource_type: String,
        identifier: String,
    },

    #[error("Datacenter '{datacenter}' has no patch panel configured")]
    #[diagnostic(
        code(xconnect::missing_patch_panel),
        help("Pass --panel <id>, or store one on the datacenter record.")
    )]
    MissingPatchPanel { datacenter: String },

    #[error("Invalid panel size: {message}")]
    #[diagnostic(
        code(xconnect::panel_size),
        help(
            "The datacenter has no port inventory yet. Pass --panel-size <n>,\n\
             set maxPorts on the record, or `xconnect config set default_panel_size <n>`."
        )
    )]
    PanelSize { message: String },

    #[error("Record store {path}: {reason}")]
    #[diagnostic(
        code(xconnect::store),
        help("Check the file, or point elsewhere with --store <path>.")
    )]
    Store { path: String, reason: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(xconnect::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(xconnect::config),
        help("Inspect the resolved configuration with: xconnect config show")
    )]
    Config { message: String },

    #[error(transparent)]
    #[diagnostic(code(xconnect::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to a process exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::AvailabilityFetch { .. } | Self::Api { .. } => exit_code::UPSTREAM,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::MissingPatchPanel { .. } | Self::PanelSize { .. } | Self::Validation { .. } => {
                exit_code::USAGE
            }
            Self::Store { .. } => exit_code::STORE,
            Self::Config { .. } | Self::Io(_) => exit_code::GENERAL,
        }
    }
}

// ── Conversion from domain errors ────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        if err.is_auth_error() {
            return Self::AuthFailed {
                message: err.to_string(),
            };
        }

        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Timeout => Self::Timeout,
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::AvailabilityFetch { panel, reason, .. } => {
                Self::AvailabilityFetch { panel, reason }
            }
            CoreError::DatacenterNotFound { id } => Self::NotFound {
                resource_type: "datacenter".into(),
                identifier: id,
                list_command: "datacenters list".into(),
            },
            CoreError::DatacenterExists { id } => Self::Conflict {
                resource_type: "datacenter".into(),
                identifier: id,
            },
            CoreError::NotFound {
                entity_type,
                identifier,
            } => {
                let list_command = match entity_type.as_str() {
                    "fac" | "facility" => "facilities search <name>",
                    _ => "--help",
                };
                Self::NotFound {
                    resource_type: entity_type,
                    identifier,
                    list_command: list_command.into(),
                }
            }
            CoreError::MissingPatchPanel { datacenter } => Self::MissingPatchPanel { datacenter },
            CoreError::PortOutOfRange { port, panel_size } => Self::Validation {
                field: "port".into(),
                reason: format!("{port} is outside 1..={panel_size}"),
            },
            CoreError::InvalidPanelSize { message } => Self::PanelSize { message },
            CoreError::ValidationFailed { message } => Self::Validation {
                field: "input".into(),
                reason: message,
            },
            CoreError::Config { message } => Self::Config { message },
            CoreError::Store { path, reason } => Self::Store {
                path: path.display().to_string(),
                reason,
            },
            CoreError::Api { message, status } => Self::Api { message, status },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { service, what } => Self::NoCredentials { service, what },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_datacenter_exits_not_found() {
        let err: CliError = CoreError::DatacenterNotFound { id: "zh9".into() }.into();
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        assert_eq!(err.to_string(), "datacenter 'zh9' not found");
    }

    #[test]
    fn fetch_failures_exit_upstream_unless_auth() {
        let plain: CliError = CoreError::AvailabilityFetch {
            panel: "PP:1".into(),
            reason: "missing field `availablePorts`".into(),
            source: None,
        }
        .into();
        assert_eq!(plain.exit_code(), exit_code::UPSTREAM);

        let auth: CliError = CoreError::AuthenticationFailed {
            message: "invalid_client".into(),
        }
        .into();
        assert_eq!(auth.exit_code(), exit_code::AUTH);
    }

    #[test]
    fn store_and_panel_size_codes() {
        let store: CliError = CoreError::Store {
            path: "/tmp/dc.json".into(),
            reason: "expected value".into(),
        }
        .into();
        assert_eq!(store.exit_code(), exit_code::STORE);

        let size: CliError = CoreError::InvalidPanelSize {
            message: "no default".into(),
        }
        .into();
        assert_eq!(size.exit_code(), exit_code::USAGE);
    }
}
