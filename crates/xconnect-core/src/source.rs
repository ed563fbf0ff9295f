// ── Availability sources ──
//
// Anything that can say which ports of a patch panel are free right now.

use std::collections::BTreeSet;
use std::future::Future;

use tracing::debug;
use xconnect_api::EquinixClient;

use crate::error::CoreError;

/// Supplies the set of free port numbers for a patch panel.
///
/// Implementations must report failure as [`CoreError::AvailabilityFetch`];
/// an empty set means the panel is full.
pub trait AvailabilitySource {
    /// Free port numbers on `panel`.
    fn available_ports(
        &self,
        panel: &str,
    ) -> impl Future<Output = Result<BTreeSet<u32>, CoreError>> + Send;

    /// Human-readable label recorded as the sync source.
    fn label(&self) -> &str;
}

impl AvailabilitySource for EquinixClient {
    async fn available_ports(&self, panel: &str) -> Result<BTreeSet<u32>, CoreError> {
        let patch_panel = self
            .patch_panel(panel)
            .await
            .map_err(|e| CoreError::availability(panel, e))?;

        let free: BTreeSet<u32> = patch_panel
            .available_ports
            .into_iter()
            .filter(|p| *p > 0)
            .collect();
        debug!(panel, free = free.len(), "patch panel availability");
        Ok(free)
    }

    fn label(&self) -> &str {
        "Equinix API"
    }
}
