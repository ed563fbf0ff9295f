//! Clap derive structures for the `xconnect` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Compiled into build.rs for man pages, so only clap types belong here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// xconnect -- datacenter cross-connect inventory and patch-panel sync
#[derive(Debug, Parser)]
#[command(
    name = "xconnect",
    version,
    about = "Track datacenter patch-panel ports and sync them from the Equinix API",
    long_about = "Keeps a local inventory of datacenter facilities and the patch-panel\n\
        ports we own in them. `sync` pulls live port availability from the\n\
        Equinix API and merges it with stored occupant records; PeeringDB\n\
        lookups help import facilities and resolve network addresses.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config dir)
    #[arg(long, env = "XCONNECT_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Datacenter inventory file (overrides store_path)
    #[arg(long, env = "XCONNECT_STORE", global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "XCONNECT_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "XCONNECT_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PortStatusArg {
    Available,
    Occupied,
    Reserved,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sync patch-panel ports from the Equinix API
    Sync(SyncArgs),

    /// Show stored sync state without contacting any API
    Status(StatusArgs),

    /// Manage datacenter records
    #[command(alias = "dc")]
    Datacenters(DatacentersArgs),

    /// View and edit patch-panel ports
    #[command(alias = "p")]
    Ports(PortsArgs),

    /// Search and import PeeringDB facilities
    #[command(alias = "fac")]
    Facilities(FacilitiesArgs),

    /// Look up PeeringDB networks
    #[command(alias = "net")]
    Networks(NetworksArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SYNC / STATUS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Datacenter ID to sync
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub datacenter: Option<String>,

    /// Sync every datacenter that has a patch panel configured
    #[arg(long, short = 'a')]
    pub all: bool,

    /// Patch panel ID (overrides the one stored on the datacenter)
    #[arg(long, conflicts_with = "all")]
    pub panel: Option<String>,

    /// Panel size to use when the datacenter has no port inventory yet
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub panel_size: Option<u32>,

    /// Replace occupied ports with placeholders instead of keeping their details
    #[arg(long)]
    pub no_preserve: bool,

    /// Leave reserved ports reserved when the API reports them taken
    #[arg(long)]
    pub keep_reserved: bool,

    /// Label recorded as the sync source
    #[arg(long)]
    pub source_label: Option<String>,

    /// Show the merged result without writing it
    #[arg(long, short = 'n')]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Datacenter ID (all datacenters when omitted)
    pub datacenter: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DATACENTERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DatacentersArgs {
    #[command(subcommand)]
    pub command: DatacentersCommand,
}

#[derive(Debug, Subcommand)]
pub enum DatacentersCommand {
    /// List datacenter records
    #[command(alias = "ls")]
    List {
        /// Only show records whose name, site code or address contains this text
        #[arg(long, short = 'f')]
        filter: Option<String>,
    },

    /// Show one datacenter record
    #[command(alias = "get")]
    Show {
        /// Datacenter ID
        id: String,
    },

    /// Add a datacenter record by hand
    Add(DatacenterAddArgs),

    /// Remove a datacenter record
    #[command(alias = "rm")]
    Remove {
        /// Datacenter ID
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct DatacenterAddArgs {
    /// Datacenter ID (slug)
    pub id: String,

    /// Facility name
    #[arg(long)]
    pub name: String,

    /// Display name (defaults to the name)
    #[arg(long)]
    pub display_name: Option<String>,

    /// Postal address
    #[arg(long)]
    pub address: Option<String>,

    /// Site code (e.g. ZH4)
    #[arg(long)]
    pub site_code: Option<String>,

    /// Our company name as customer of the facility
    #[arg(long)]
    pub customer: Option<String>,

    /// Vendor account number
    #[arg(long)]
    pub account_number: Option<String>,

    /// IBX code
    #[arg(long)]
    pub ibx: Option<String>,

    /// Cage identifier
    #[arg(long)]
    pub cage: Option<String>,

    /// Cabinet identifier
    #[arg(long)]
    pub cabinet: Option<String>,

    /// Patch panel ID at the vendor
    #[arg(long)]
    pub patch_panel: Option<String>,

    /// Number of ports on the patch panel
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_ports: Option<u32>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PORTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PortsArgs {
    #[command(subcommand)]
    pub command: PortsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PortsCommand {
    /// List the patch-panel ports of a datacenter
    #[command(alias = "ls")]
    List {
        /// Datacenter ID
        datacenter: String,

        /// Only show ports with this status
        #[arg(long, short = 's')]
        status: Option<PortStatusArg>,
    },

    /// Set the status and occupant details of a port
    Set(PortSetArgs),

    /// Mark a port available and drop its occupant details
    Clear {
        /// Datacenter ID
        datacenter: String,

        /// Port number
        port: u32,
    },
}

#[derive(Debug, Args)]
pub struct PortSetArgs {
    /// Datacenter ID
    pub datacenter: String,

    /// Port number
    pub port: u32,

    /// New status
    #[arg(long, short = 's', default_value = "occupied")]
    pub status: PortStatusArg,

    /// Party connected on the far side
    #[arg(long)]
    pub occupant: Option<String>,

    /// Installation date label
    #[arg(long)]
    pub installed_on: Option<String>,

    /// Media type (e.g. SMF, MMF)
    #[arg(long)]
    pub media_type: Option<String>,

    /// Cross-connect order number
    #[arg(long)]
    pub order_number: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PEERINGDB
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct FacilitiesArgs {
    #[command(subcommand)]
    pub command: FacilitiesCommand,
}

#[derive(Debug, Subcommand)]
pub enum FacilitiesCommand {
    /// Search facilities by name; a trailing country ("Equinix CH") narrows results
    Search {
        /// Search text
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Show one facility
    Show {
        /// PeeringDB facility ID
        id: u64,

        /// Also list the networks present in the facility
        #[arg(long)]
        networks: bool,
    },

    /// Create a datacenter record from a facility
    Import {
        /// PeeringDB facility ID
        id: u64,

        /// Datacenter ID to use instead of the slugged facility name
        #[arg(long = "as", value_name = "ID")]
        datacenter_id: Option<String>,

        /// Our company name as customer of the facility
        #[arg(long)]
        customer: Option<String>,

        /// Patch panel ID at the vendor
        #[arg(long)]
        patch_panel: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct NetworksArgs {
    #[command(subcommand)]
    pub command: NetworksCommand,
}

#[derive(Debug, Subcommand)]
pub enum NetworksCommand {
    /// Resolve the postal address of a network
    Address {
        /// PeeringDB network ID, or an AS number written as AS<n>
        network: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the config file with guided setup
    Init {
        /// Write defaults without prompting
        #[arg(long)]
        non_interactive: bool,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Display current resolved configuration
    Show,

    /// Set a configuration value
    Set {
        /// Config key (dot-separated, e.g. "equinix.client_id")
        key: String,

        /// Value to set
        value: String,
    },

    /// Print the config file path
    Path,

    /// Store an API secret in the system keyring
    SetSecret {
        /// Which secret to store
        target: SecretTarget,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SecretTarget {
    /// Equinix OAuth client secret
    Equinix,
    /// PeeringDB API key
    Peeringdb,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
