// Shared transport configuration for building reqwest::Client instances.
//
// Both the Equinix and PeeringDB clients share TLS and timeout settings
// through this module, plus the common status -> Error mapping applied to
// every JSON response.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::error::Error;

const USER_AGENT: &str = concat!("xconnect/", env!("CARGO_PKG_VERSION"));

/// Number of body characters kept in error messages.
const PREVIEW_CHARS: usize = 200;

/// TLS verification mode.
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    /// Use the system certificate store.
    #[default]
    System,
    /// Trust an additional CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (lab proxies with self-signed certs).
    DangerAcceptInvalid,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        self.build_client_with_headers(HeaderMap::new())
    }

    /// Build a `reqwest::Client` with additional default headers.
    ///
    /// Used by the PeeringDB client to inject the `Authorization: Api-Key` header.
    pub fn build_client_with_headers(&self, headers: HeaderMap) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers);

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

/// Truncate a response body for inclusion in an error message.
pub(crate) fn preview(body: &str) -> String {
    body.chars().take(PREVIEW_CHARS).collect()
}

/// Map the response status to an `Error`, or decode the JSON body on success.
///
/// `resource` names the requested object for `NotFound` messages.
pub(crate) async fn decode_json<T: DeserializeOwned>(
    resp: reqwest::Response,
    resource: &str,
) -> Result<T, Error> {
    let status = resp.status();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(Error::Authentication {
            message: format!("{resource}: access denied (HTTP {})", status.as_u16()),
        });
    }

    if status == StatusCode::NOT_FOUND {
        return Err(Error::NotFound {
            resource: resource.to_owned(),
        });
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = resp
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);
        return Err(Error::RateLimited { retry_after_secs });
    }

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::Http {
            status: status.as_u16(),
            message: preview(&body),
        });
    }

    let body = resp.text().await?;
    trace!(bytes = body.len(), "decoding {resource}");

    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(&body)),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_on_char_boundary() {
        let body = "ü".repeat(300);
        let p = preview(&body);
        assert_eq!(p.chars().count(), PREVIEW_CHARS);
    }

    #[test]
    fn default_transport_uses_system_tls() {
        let cfg = TransportConfig::default();
        assert!(matches!(cfg.tls, TlsMode::System));
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert!(cfg.build_client().is_ok());
    }
}
