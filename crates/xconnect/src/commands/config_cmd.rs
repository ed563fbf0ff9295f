//! Config subcommand handlers.

use std::path::Path;

use dialoguer::{Input, Select};

use xconnect_config::{
    Config, EQUINIX_SECRET_ENTRY, PEERINGDB_KEY_ENTRY, SUGGESTED_PANEL_SIZE, save_config_to,
    store_secret,
};
use xconnect_core::EquinixEnvironment;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat, SecretTarget};
use crate::config;
use crate::error::CliError;
use crate::output;

/// Keys `config set` accepts, with the TOML type each one takes.
const KEYS: &[(&str, ValueKind)] = &[
    ("store_path", ValueKind::String),
    ("default_panel_size", ValueKind::Integer),
    ("sync_source", ValueKind::String),
    ("reserved_ports", ValueKind::String),
    ("defaults.output", ValueKind::String),
    ("defaults.color", ValueKind::String),
    ("defaults.timeout", ValueKind::Integer),
    ("defaults.insecure", ValueKind::Boolean),
    ("defaults.ca_cert", ValueKind::String),
    ("equinix.environment", ValueKind::String),
    ("equinix.api_url", ValueKind::String),
    ("equinix.client_id", ValueKind::String),
    ("equinix.client_secret", ValueKind::String),
    ("equinix.client_secret_env", ValueKind::String),
    ("peeringdb.api_url", ValueKind::String),
    ("peeringdb.api_key", ValueKind::String),
    ("peeringdb.api_key_env", ValueKind::String),
];

#[derive(Debug, Clone, Copy)]
enum ValueKind {
    String,
    Integer,
    Boolean,
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of `cfg` with plaintext secrets masked.
fn redacted(cfg: &Config) -> Config {
    let mut out = cfg.clone();
    let mask = |v: &mut Option<String>| {
        if v.is_some() {
            *v = Some("****".into());
        }
    };
    mask(&mut out.equinix.client_secret);
    mask(&mut out.peeringdb.api_key);
    out
}

fn config_err(e: impl std::fmt::Display) -> CliError {
    CliError::Config {
        message: e.to_string(),
    }
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn parse_value(key: &str, raw: &str) -> Result<toml::Value, CliError> {
    let kind = KEYS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, kind)| *kind)
        .ok_or_else(|| CliError::Validation {
            field: "key".into(),
            reason: format!(
                "unknown key '{key}'; expected one of: {}",
                KEYS.iter().map(|(k, _)| *k).collect::<Vec<_>>().join(", ")
            ),
        })?;

    let invalid = |what: &str| CliError::Validation {
        field: key.into(),
        reason: format!("'{raw}' is not {what}"),
    };
    Ok(match kind {
        ValueKind::String => toml::Value::String(raw.to_owned()),
        ValueKind::Integer => toml::Value::Integer(raw.parse().map_err(|_| invalid("an integer"))?),
        ValueKind::Boolean => toml::Value::Boolean(raw.parse().map_err(|_| invalid("true or false"))?),
    })
}

/// Set a dotted `key` in the TOML document, creating tables on the way.
fn set_dotted(doc: &mut toml::Table, key: &str, value: toml::Value) -> Result<(), CliError> {
    let mut parts: Vec<&str> = key.split('.').collect();
    let Some(leaf) = parts.pop() else {
        return Err(config_err("empty key"));
    };
    let mut table = doc;
    for part in parts {
        let entry = table
            .entry(part.to_owned())
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));
        table = entry
            .as_table_mut()
            .ok_or_else(|| config_err(format!("'{part}' is not a table in the config file")))?;
    }
    table.insert(leaf.to_owned(), value);
    Ok(())
}

/// Apply `key = value` to the config file at `path`, leaving env overrides
/// out of the written file.
fn set_in_file(path: &Path, key: &str, raw: &str) -> Result<(), CliError> {
    let mut doc = if path.exists() {
        std::fs::read_to_string(path)?
            .parse::<toml::Table>()
            .map_err(config_err)?
    } else {
        toml::Table::new()
    };

    set_dotted(&mut doc, key, parse_value(key, raw)?)?;

    let parsed: Config = toml::Value::Table(doc.clone())
        .try_into()
        .map_err(config_err)?;
    parsed.validate()?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(&doc).map_err(config_err)?)?;
    Ok(())
}

fn prompt_secret(label: &str) -> Result<String, CliError> {
    let secret = rpassword::prompt_password(format!("{label}: ")).map_err(prompt_err)?;
    if secret.trim().is_empty() {
        return Err(CliError::Validation {
            field: label.to_lowercase(),
            reason: "cannot be empty".into(),
        });
    }
    Ok(secret)
}

fn init_wizard(path: &Path) -> Result<Config, CliError> {
    eprintln!("xconnect configuration");
    eprintln!("   Config path: {}\n", path.display());

    let mut cfg = Config::starter();

    let environments = ["production", "sandbox"];
    let env_idx = Select::new()
        .with_prompt("Equinix API environment")
        .items(&environments)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    cfg.equinix.environment = if env_idx == 1 {
        EquinixEnvironment::Sandbox
    } else {
        EquinixEnvironment::Production
    };

    let client_id: String = Input::new()
        .with_prompt("Equinix client ID (blank to skip)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    if !client_id.trim().is_empty() {
        cfg.equinix.client_id = Some(client_id.trim().to_owned());

        let secret = prompt_secret("Client secret")?;
        let choices = [
            "Store in system keyring (recommended)",
            "Save to config file (plaintext)",
        ];
        let choice = Select::new()
            .with_prompt("Where should the secret go?")
            .items(&choices)
            .default(0)
            .interact()
            .map_err(prompt_err)?;
        if choice == 0 {
            store_secret(EQUINIX_SECRET_ENTRY, &secret)?;
            eprintln!("   ✓ Client secret stored in system keyring");
        } else {
            cfg.equinix.client_secret = Some(secret);
        }
    }

    let panel_size: u32 = Input::new()
        .with_prompt("Default panel size for new datacenters")
        .default(SUGGESTED_PANEL_SIZE)
        .interact_text()
        .map_err(prompt_err)?;
    cfg.default_panel_size = Some(panel_size);

    cfg.validate()?;
    Ok(cfg)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::config_file(global);

    match args.command {
        ConfigCommand::Init {
            non_interactive,
            force,
        } => {
            if path.exists() && !force {
                return Err(CliError::Conflict {
                    resource_type: "config file".into(),
                    identifier: path.display().to_string(),
                });
            }
            let cfg = if non_interactive {
                Config::starter()
            } else {
                init_wizard(&path)?
            };
            save_config_to(&cfg, &path)?;
            if !global.quiet {
                eprintln!("✓ Wrote {}", path.display());
            }
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = redacted(&config::load(global)?);
            let format = global.output.unwrap_or(OutputFormat::Table);
            let out = output::render_single(
                format,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_default(),
                |c| toml::to_string_pretty(c).unwrap_or_default(),
            );
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            set_in_file(&path, &key, &value)?;
            if !global.quiet {
                eprintln!("✓ {key} updated in {}", path.display());
            }
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::SetSecret { target } => {
            let (entry, label) = match target {
                SecretTarget::Equinix => (EQUINIX_SECRET_ENTRY, "Equinix client secret"),
                SecretTarget::Peeringdb => (PEERINGDB_KEY_ENTRY, "PeeringDB API key"),
            };
            let secret = prompt_secret(label)?;
            store_secret(entry, &secret)?;
            if !global.quiet {
                eprintln!("✓ {label} stored in system keyring");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_creates_nested_tables_and_types_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        set_in_file(&path, "equinix.client_id", "12345").unwrap();
        set_in_file(&path, "default_panel_size", "24").unwrap();
        set_in_file(&path, "defaults.insecure", "true").unwrap();

        let cfg: Config = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(cfg.equinix.client_id.as_deref(), Some("12345"));
        assert_eq!(cfg.default_panel_size, Some(24));
        assert!(cfg.defaults.insecure);
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert!(matches!(
            set_in_file(&path, "equinix.token", "x"),
            Err(CliError::Validation { .. })
        ));
        assert!(matches!(
            set_in_file(&path, "default_panel_size", "0"),
            Err(CliError::Validation { .. })
        ));
        assert!(matches!(
            set_in_file(&path, "reserved_ports", "sometimes"),
            Err(CliError::Config { .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn show_masks_plaintext_secrets() {
        let mut cfg = Config::default();
        cfg.equinix.client_secret = Some("hunter2".into());
        let shown = toml::to_string_pretty(&redacted(&cfg)).unwrap();
        assert!(shown.contains("****"));
        assert!(!shown.contains("hunter2"));
    }
}
