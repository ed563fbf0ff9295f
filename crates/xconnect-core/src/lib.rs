// xconnect-core: datacenter port inventory, patch-panel reconciliation and sync.

pub mod cache;
pub mod config;
pub mod convert;
pub mod error;
pub mod lookup;
pub mod model;
pub mod reconcile;
pub mod source;
pub mod store;
pub mod sync;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cache::AddressCache;
pub use config::{
    EquinixCredentials, EquinixEnvironment, EquinixSettings, PEERINGDB_API_URL,
    PeeringDbSettings, TlsMode, TransportConfig,
};
pub use convert::{facility_to_datacenter, format_facility_address};
pub use error::CoreError;
pub use lookup::network_address;
pub use reconcile::{ReconcileOptions, Reconciliation, ReservedPolicy, Summary, reconcile};
pub use source::AvailabilitySource;
pub use store::{JsonFileStore, MemoryStore, RecordStore, SyncUpdate};
pub use sync::{
    STATIC_SOURCE_LABEL, SyncReport, SyncRequest, SyncStatus, sync_datacenter, sync_status,
};

pub use model::{
    DEFAULT_MEDIA_TYPE, Datacenter, OurInfo, PortRecord, PortStatus, Requester, TechnicalDefaults,
};

// Upstream client and wire types the CLI works with directly.
pub use xconnect_api::{EquinixClient, Facility, Network, PeeringDbClient};
