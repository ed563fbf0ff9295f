// ── Runtime connection settings ──
//
// These types describe how to reach the upstream APIs. They carry
// credentials and tuning but never touch disk; the CLI resolves them from
// its config file and hands them in.

use secrecy::SecretString;
use xconnect_api::{EquinixClient, PeeringDbClient};

pub use xconnect_api::{EquinixCredentials, EquinixEnvironment, TlsMode, TransportConfig};

/// Public PeeringDB API root.
pub const PEERINGDB_API_URL: &str = "https://www.peeringdb.com/api";

/// How to reach the Equinix API.
#[derive(Debug, Clone)]
pub struct EquinixSettings {
    pub base_url: String,
    pub credentials: EquinixCredentials,
}

impl EquinixSettings {
    /// Settings for a named deployment.
    pub fn for_environment(env: EquinixEnvironment, credentials: EquinixCredentials) -> Self {
        Self {
            base_url: env.base_url().to_owned(),
            credentials,
        }
    }

    pub fn connect(&self, transport: &TransportConfig) -> Result<EquinixClient, crate::CoreError> {
        Ok(EquinixClient::new(
            &self.base_url,
            self.credentials.clone(),
            transport,
        )?)
    }
}

/// How to reach PeeringDB.
#[derive(Debug, Clone)]
pub struct PeeringDbSettings {
    pub base_url: String,
    pub api_key: Option<SecretString>,
}

impl Default for PeeringDbSettings {
    fn default() -> Self {
        Self {
            base_url: PEERINGDB_API_URL.to_owned(),
            api_key: None,
        }
    }
}

impl PeeringDbSettings {
    pub fn connect(
        &self,
        transport: &TransportConfig,
    ) -> Result<PeeringDbClient, crate::CoreError> {
        Ok(PeeringDbClient::new(
            &self.base_url,
            self.api_key.as_ref(),
            transport,
        )?)
    }
}
