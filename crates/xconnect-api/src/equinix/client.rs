// Equinix API HTTP client
//
// Exchanges client credentials for a bearer token at `/oauth2/v1/token`,
// caches it until shortly before expiry, and attaches it to every
// patch-panel request.

use std::time::{Duration, Instant};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

use super::models::{PatchPanel, TokenRequest, TokenResponse};
use crate::error::Error;
use crate::transport::{TransportConfig, decode_json, preview};

/// Lifetime assumed when the token endpoint omits `expires_in`.
const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600);

/// Tokens are refreshed this long before they actually expire.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Which Equinix API deployment to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquinixEnvironment {
    #[default]
    Production,
    Sandbox,
}

impl EquinixEnvironment {
    /// Root URL of the deployment.
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Production => "https://api.equinix.com",
            Self::Sandbox => "https://sandboxapi.equinix.com",
        }
    }
}

/// OAuth2 client credentials issued by the Equinix developer portal.
#[derive(Debug, Clone)]
pub struct EquinixCredentials {
    pub client_id: String,
    pub client_secret: SecretString,
}

struct AccessToken {
    value: SecretString,
    refresh_at: Instant,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        Instant::now() < self.refresh_at
    }
}

/// Async client for the Equinix colocation API.
pub struct EquinixClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: EquinixCredentials,
    token: Mutex<Option<AccessToken>>,
}

impl std::fmt::Debug for EquinixClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EquinixClient")
            .field("base_url", &self.base_url.as_str())
            .field("client_id", &self.credentials.client_id)
            .finish_non_exhaustive()
    }
}

impl EquinixClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL, credentials, and transport config.
    pub fn new(
        base_url: &str,
        credentials: EquinixCredentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(base_url, http, credentials)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(
        base_url: &str,
        http: reqwest::Client,
        credentials: EquinixCredentials,
    ) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            http,
            base_url,
            credentials,
            token: Mutex::new(None),
        })
    }

    /// The API root this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append path segments to the base URL.
    ///
    /// Patch panel ids look like `PP:0201:0102:1374601`, which `Url::join`
    /// would read as a scheme, so segments are pushed individually.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    // ── Token handling ───────────────────────────────────────────────

    /// Return a valid bearer token, exchanging credentials if needed.
    async fn bearer(&self) -> Result<SecretString, Error> {
        let mut guard = self.token.lock().await;
        if let Some(token) = guard.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.value.clone());
        }

        let token = self.authenticate().await?;
        let value = token.value.clone();
        *guard = Some(token);
        Ok(value)
    }

    async fn authenticate(&self) -> Result<AccessToken, Error> {
        let url = self.endpoint(&["oauth2", "v1", "token"]);
        debug!("POST {url} (client credentials)");

        let form = TokenRequest {
            grant_type: "client_credentials",
            client_id: &self.credentials.client_id,
            client_secret: self.credentials.client_secret.expose_secret(),
        };
        let resp = self.http.post(url).form(&form).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Equinix token exchange rejected");
            return Err(Error::Authentication {
                message: format!(
                    "token exchange rejected (HTTP {}): {}",
                    status.as_u16(),
                    preview(&body)
                ),
            });
        }

        let body: TokenResponse = decode_json(resp, "access token").await?;
        let ttl = body
            .expires_in
            .map_or(DEFAULT_TOKEN_TTL, Duration::from_secs)
            .saturating_sub(TOKEN_REFRESH_MARGIN);

        Ok(AccessToken {
            value: SecretString::from(body.access_token),
            refresh_at: Instant::now() + ttl,
        })
    }

    /// Drop the cached token so the next call re-authenticates.
    async fn invalidate_token(&self) {
        *self.token.lock().await = None;
    }

    // ── Patch panels ─────────────────────────────────────────────────

    /// Fetch one patch panel with its current free-port list.
    ///
    /// `GET /colocations/v2/patchPanels/{id}`
    pub async fn patch_panel(&self, patch_panel_id: &str) -> Result<PatchPanel, Error> {
        let url = self.endpoint(&["colocations", "v2", "patchPanels", patch_panel_id]);
        let token = self.bearer().await?;
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        let result = decode_json(resp, &format!("patch panel {patch_panel_id}")).await;
        if matches!(result, Err(Error::Authentication { .. })) {
            self.invalidate_token().await;
        }
        result
    }

    /// List the patch panels in a cabinet for an account.
    ///
    /// `GET /colocations/v2/patchPanels?cabinetId=..&accountNumber=..`
    pub async fn patch_panels(
        &self,
        cabinet_id: &str,
        account_number: &str,
    ) -> Result<Vec<PatchPanel>, Error> {
        let url = self.endpoint(&["colocations", "v2", "patchPanels"]);
        let token = self.bearer().await?;
        debug!("GET {url} cabinet={cabinet_id} account={account_number}");

        let resp = self
            .http
            .get(url)
            .query(&[("cabinetId", cabinet_id), ("accountNumber", account_number)])
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        let result = decode_json(resp, "patch panels").await;
        if matches!(result, Err(Error::Authentication { .. })) {
            self.invalidate_token().await;
        }
        result
    }
}
