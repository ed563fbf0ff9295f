// ── Datacenter record storage ──
//
// The sync service reads prior inventory and commits merged inventory
// through `RecordStore`. Commits replace the whole datacenter record.

mod json_file;
mod memory;

use chrono::{DateTime, Utc};

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::CoreError;
use crate::model::{Datacenter, PortRecord};

/// Everything a sync writes back into a datacenter record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncUpdate {
    pub ports: Vec<PortRecord>,
    pub available_ports: Vec<u32>,
    pub synced_at: DateTime<Utc>,
    pub source: String,
}

impl SyncUpdate {
    /// Write the merged inventory and sync metadata into `datacenter`.
    pub fn apply_to(self, datacenter: &mut Datacenter) {
        let info = &mut datacenter.our_info;
        info.port_details = self.ports;
        info.available_ports = Some(
            self.available_ports
                .iter()
                .map(ToString::to_string)
                .collect(),
        );
        info.last_api_sync = Some(self.synced_at);
        info.sync_source = Some(self.source);
    }
}

/// Storage seam used by the sync service.
pub trait RecordStore {
    /// Load one datacenter record.
    fn datacenter(&self, id: &str) -> Result<Datacenter, CoreError>;

    /// The stored port inventory of a datacenter. Unreadable inventory comes
    /// back empty.
    fn prior_ports(&self, id: &str) -> Result<Vec<PortRecord>, CoreError> {
        self.datacenter(id).map(|dc| dc.our_info.port_details)
    }

    /// Replace the datacenter record with `update` applied, returning the
    /// stored result.
    fn commit_sync(&self, id: &str, update: SyncUpdate) -> Result<Datacenter, CoreError>;
}
