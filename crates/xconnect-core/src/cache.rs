use dashmap::DashMap;

/// Postal addresses resolved for PeeringDB networks, keyed by network id.
///
/// Entries live as long as the cache and are never evicted. Share it by
/// reference between lookups.
#[derive(Debug, Default)]
pub struct AddressCache {
    entries: DashMap<u64, String>,
}

impl AddressCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, network_id: u64) -> Option<String> {
        self.entries.get(&network_id).map(|e| e.value().clone())
    }

    pub fn insert(&self, network_id: u64, address: String) {
        self.entries.insert(network_id, address);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
