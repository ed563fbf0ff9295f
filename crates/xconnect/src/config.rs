//! Bridges the config crate and CLI flags into a per-invocation context.
//!
//! Flags win over `XCONNECT_*` env vars, which win over the config file.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use xconnect_config::Config;
use xconnect_core::{
    AddressCache, EquinixClient, JsonFileStore, PeeringDbClient, TlsMode, TransportConfig,
};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

/// The config file this invocation reads and writes.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(xconnect_config::config_path)
}

/// Load the layered config for this invocation.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(xconnect_config::load_config_from(&config_file(global))?)
}

/// Everything a command handler needs: resolved config, store, and
/// output preferences.
pub struct Context {
    pub config: Config,
    pub store: JsonFileStore,
    pub output: OutputFormat,
    pub color: bool,
    pub quiet: bool,
    pub yes: bool,
    transport: TransportConfig,
    addresses: AddressCache,
}

impl Context {
    pub fn new(global: &GlobalOpts) -> Result<Self, CliError> {
        let config = load(global)?;

        let store_path = global
            .store
            .clone()
            .unwrap_or_else(|| xconnect_config::store_path(&config));

        let output = match global.output {
            Some(fmt) => fmt,
            None => parse_choice::<OutputFormat>("defaults.output", &config.defaults.output)?,
        };
        let color_mode = match global.color {
            Some(mode) => mode,
            None => parse_choice::<ColorMode>("defaults.color", &config.defaults.color)?,
        };

        let mut transport = xconnect_config::transport_config(&config);
        if global.insecure {
            transport.tls = TlsMode::DangerAcceptInvalid;
        }
        if let Some(secs) = global.timeout {
            transport.timeout = Duration::from_secs(secs);
        }

        tracing::debug!(store = %store_path.display(), ?output, "context resolved");

        Ok(Self {
            store: JsonFileStore::new(store_path),
            output,
            color: output::should_color(color_mode),
            quiet: global.quiet,
            yes: global.yes,
            config,
            transport,
            addresses: AddressCache::new(),
        })
    }

    pub fn equinix(&self) -> Result<EquinixClient, CliError> {
        let settings = xconnect_config::equinix_settings(&self.config)?;
        Ok(settings.connect(&self.transport)?)
    }

    pub fn peeringdb(&self) -> Result<PeeringDbClient, CliError> {
        Ok(xconnect_config::peeringdb_settings(&self.config).connect(&self.transport)?)
    }

    /// Process-lifetime cache for network address lookups.
    pub fn addresses(&self) -> &AddressCache {
        &self.addresses
    }
}

fn parse_choice<T: ValueEnum>(field: &str, raw: &str) -> Result<T, CliError> {
    T::from_str(raw, true).map_err(|reason| CliError::Validation {
        field: field.into(),
        reason,
    })
}
