//! Configuration for the xconnect CLI.
//!
//! TOML config file, `XCONNECT_` environment overrides, credential
//! resolution (env var + keyring + plaintext), and translation to the
//! runtime settings in `xconnect_core::config`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use xconnect_core::{
    EquinixCredentials, EquinixEnvironment, EquinixSettings, PEERINGDB_API_URL, PeeringDbSettings,
    ReservedPolicy, TlsMode, TransportConfig,
};

/// Keyring service name all secrets are stored under.
pub const KEYRING_SERVICE: &str = "xconnect";

/// Keyring entry for the Equinix OAuth client secret.
pub const EQUINIX_SECRET_ENTRY: &str = "equinix/client-secret";

/// Keyring entry for the PeeringDB API key.
pub const PEERINGDB_KEY_ENTRY: &str = "peeringdb/api-key";

/// Panel size `config init` writes for new installs.
pub const SUGGESTED_PANEL_SIZE: u32 = 12;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no {what} configured for {service}")]
    NoCredentials { service: String, what: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Datacenter inventory file. Defaults to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,

    /// Panel size for datacenters with no inventory and no `maxPorts`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_panel_size: Option<u32>,

    /// Label recorded as `syncSource`; defaults to the source's own label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_source: Option<String>,

    /// What a sync does with reserved ports that are not free.
    #[serde(default)]
    pub reserved_ports: ReservedPolicy,

    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub equinix: EquinixConfig,

    #[serde(default)]
    pub peeringdb: PeeringDbConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default)]
    pub insecure: bool,

    /// Extra CA certificate to trust (PEM).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
            insecure: false,
            ca_cert: None,
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// Equinix API access.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EquinixConfig {
    #[serde(default)]
    pub environment: EquinixEnvironment,

    /// Overrides the environment's base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// Client secret (plaintext -- prefer keyring or env var).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    /// Environment variable name containing the client secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret_env: Option<String>,
}

/// PeeringDB access. Anonymous by default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PeeringDbConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// API key (plaintext -- prefer keyring or env var).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
}

impl Config {
    /// Starting point written by `config init`.
    pub fn starter() -> Self {
        Self {
            default_panel_size: Some(SUGGESTED_PANEL_SIZE),
            ..Self::default()
        }
    }

    /// Reject values no command could work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_panel_size == Some(0) {
            return Err(ConfigError::Validation {
                field: "default_panel_size".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.defaults.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "defaults.timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        for (field, value) in [
            ("equinix.api_url", &self.equinix.api_url),
            ("peeringdb.api_url", &self.peeringdb.api_url),
        ] {
            if let Some(raw) = value {
                url::Url::parse(raw).map_err(|e| ConfigError::Validation {
                    field: field.into(),
                    reason: format!("invalid URL '{raw}': {e}"),
                })?;
            }
        }
        Ok(())
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "xconnect", "xconnect")
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("xconnect");
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default inventory location when `store_path` is unset.
pub fn default_store_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("datacenters.json"),
        |dirs| dirs.data_dir().join("datacenters.json"),
    )
}

/// The inventory file this config points at.
pub fn store_path(cfg: &Config) -> PathBuf {
    cfg.store_path.clone().unwrap_or_else(default_store_path)
}

// ── Loading & saving ────────────────────────────────────────────────

/// Load config from the canonical path plus environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Layer defaults, the TOML file at `path` (if present), and `XCONNECT_`
/// env vars. `__` separates nested keys: `XCONNECT_EQUINIX__CLIENT_ID`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("XCONNECT_").split("__"))
        .extract()?;
    config.validate()?;
    Ok(config)
}

/// Serialize config to TOML and write it to the canonical path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// env var named by `env_name` → keyring `entry` → plaintext.
fn resolve_secret(
    env_name: Option<&str>,
    entry: &str,
    plaintext: Option<&str>,
) -> Option<SecretString> {
    if let Some(val) = env_name.and_then(|name| std::env::var(name).ok()) {
        return Some(SecretString::from(val));
    }

    if let Ok(secret) =
        keyring::Entry::new(KEYRING_SERVICE, entry).and_then(|e| e.get_password())
    {
        return Some(SecretString::from(secret));
    }

    plaintext.map(|s| SecretString::from(s.to_owned()))
}

/// Resolve the Equinix client secret.
pub fn resolve_equinix_secret(cfg: &EquinixConfig) -> Result<SecretString, ConfigError> {
    resolve_secret(
        cfg.client_secret_env.as_deref(),
        EQUINIX_SECRET_ENTRY,
        cfg.client_secret.as_deref(),
    )
    .ok_or_else(|| ConfigError::NoCredentials {
        service: "equinix".into(),
        what: "client secret".into(),
    })
}

/// Resolve the optional PeeringDB API key.
pub fn resolve_peeringdb_key(cfg: &PeeringDbConfig) -> Option<SecretString> {
    resolve_secret(
        cfg.api_key_env.as_deref(),
        PEERINGDB_KEY_ENTRY,
        cfg.api_key.as_deref(),
    )
}

/// Store a secret in the system keyring.
pub fn store_secret(entry: &str, secret: &str) -> Result<(), ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, entry)?.set_password(secret)?;
    Ok(())
}

// ── Translation to runtime settings ─────────────────────────────────

/// Equinix connection settings, with credentials resolved.
pub fn equinix_settings(cfg: &Config) -> Result<EquinixSettings, ConfigError> {
    let eq = &cfg.equinix;
    let client_id = eq
        .client_id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ConfigError::NoCredentials {
            service: "equinix".into(),
            what: "client_id".into(),
        })?;
    let credentials = EquinixCredentials {
        client_id,
        client_secret: resolve_equinix_secret(eq)?,
    };

    Ok(match eq.api_url {
        Some(ref url) => EquinixSettings {
            base_url: url.clone(),
            credentials,
        },
        None => EquinixSettings::for_environment(eq.environment, credentials),
    })
}

/// PeeringDB connection settings.
pub fn peeringdb_settings(cfg: &Config) -> PeeringDbSettings {
    PeeringDbSettings {
        base_url: cfg
            .peeringdb
            .api_url
            .clone()
            .unwrap_or_else(|| PEERINGDB_API_URL.to_owned()),
        api_key: resolve_peeringdb_key(&cfg.peeringdb),
    }
}

/// Transport settings from `[defaults]`.
pub fn transport_config(cfg: &Config) -> TransportConfig {
    let tls = if cfg.defaults.insecure {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca) = cfg.defaults.ca_cert {
        TlsMode::CustomCa(ca.clone())
    } else {
        TlsMode::System
    };
    TransportConfig {
        tls,
        timeout: Duration::from_secs(cfg.defaults.timeout),
    }
}
