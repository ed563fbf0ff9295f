// ── Core error types ──
//
// Domain errors from xconnect-core. Consumers never match on HTTP status
// codes or JSON parse failures directly; `From<xconnect_api::Error>`
// translates transport-layer errors into domain variants.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out")]
    Timeout,

    // ── Availability ─────────────────────────────────────────────────
    /// The availability source could not say which ports are free.
    ///
    /// Distinct from an empty availability set, which means every port is
    /// occupied.
    #[error("Could not fetch port availability for panel {panel}: {reason}")]
    AvailabilityFetch {
        panel: String,
        reason: String,
        #[source]
        source: Option<xconnect_api::Error>,
    },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Datacenter not found: {id}")]
    DatacenterNotFound { id: String },

    #[error("Datacenter already exists: {id}")]
    DatacenterExists { id: String },

    #[error("Entity not found: {entity_type} {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Datacenter {datacenter} has no patch panel configured")]
    MissingPatchPanel { datacenter: String },

    #[error("Port {port} is outside panel range 1..={panel_size}")]
    PortOutOfRange { port: u32, panel_size: u32 },

    // ── Configuration errors ─────────────────────────────────────────
    /// Panel size could not be determined, or is zero.
    #[error("Invalid panel size: {message}")]
    InvalidPanelSize { message: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Store errors ─────────────────────────────────────────────────
    #[error("Record store {}: {reason}", path.display())]
    Store { path: PathBuf, reason: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },
}

impl CoreError {
    /// Wrap an API failure raised while fetching availability for `panel`.
    pub fn availability(panel: &str, err: xconnect_api::Error) -> Self {
        Self::AvailabilityFetch {
            panel: panel.to_owned(),
            reason: err.to_string(),
            source: Some(err),
        }
    }

    /// `true` if the upstream refused our credentials, directly or while
    /// fetching availability.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::AuthenticationFailed { .. } => true,
            Self::AvailabilityFetch {
                source: Some(source),
                ..
            } => source.is_auth_error(),
            _ => false,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<xconnect_api::Error> for CoreError {
    fn from(err: xconnect_api::Error) -> Self {
        match err {
            xconnect_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            xconnect_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            xconnect_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            xconnect_api::Error::InvalidBaseUrl(url) => CoreError::Config {
                message: format!("Invalid base URL: {url}"),
            },
            xconnect_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            xconnect_api::Error::NotFound { resource } => {
                let (entity_type, identifier) = resource
                    .split_once(' ')
                    .map_or(("resource", resource.as_str()), |(kind, id)| (kind, id));
                CoreError::NotFound {
                    entity_type: entity_type.to_owned(),
                    identifier: identifier.to_owned(),
                }
            }
            xconnect_api::Error::RateLimited { retry_after_secs } => CoreError::Api {
                message: format!("Rate limited -- retry after {retry_after_secs}s"),
                status: Some(429),
            },
            xconnect_api::Error::Http { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            xconnect_api::Error::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("Unexpected response: {message}"),
                status: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_resource_splits_into_kind_and_id() {
        let err: CoreError = xconnect_api::Error::NotFound {
            resource: "fac 999".into(),
        }
        .into();
        assert!(matches!(
            err,
            CoreError::NotFound { ref entity_type, ref identifier }
                if entity_type == "fac" && identifier == "999"
        ));
    }

    #[test]
    fn availability_keeps_auth_cause() {
        let err = CoreError::availability(
            "PP:1",
            xconnect_api::Error::Authentication {
                message: "bad secret".into(),
            },
        );
        assert!(err.is_auth_error());
        assert!(err.to_string().contains("PP:1"));
    }
}
