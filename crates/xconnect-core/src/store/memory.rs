use dashmap::DashMap;

use super::{RecordStore, SyncUpdate};
use crate::error::CoreError;
use crate::model::Datacenter;

/// Process-local store keyed by datacenter id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: DashMap<String, Datacenter>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, datacenter: Datacenter) {
        self.records.insert(datacenter.id.clone(), datacenter);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<Datacenter> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = Datacenter>>(iter: I) -> Self {
        let store = Self::new();
        for dc in iter {
            store.insert(dc);
        }
        store
    }
}

impl RecordStore for MemoryStore {
    fn datacenter(&self, id: &str) -> Result<Datacenter, CoreError> {
        self.records
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| CoreError::DatacenterNotFound { id: id.to_owned() })
    }

    fn commit_sync(&self, id: &str, update: SyncUpdate) -> Result<Datacenter, CoreError> {
        let mut entry = self
            .records
            .get_mut(id)
            .ok_or_else(|| CoreError::DatacenterNotFound { id: id.to_owned() })?;
        update.apply_to(entry.value_mut());
        Ok(entry.value().clone())
    }
}
