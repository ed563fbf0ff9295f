// ── Sync service ──
//
// Fetch live availability for a datacenter's patch panel, reconcile it
// against the stored inventory, and commit the result.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::CoreError;
use crate::model::{Datacenter, PortRecord, PortStatus};
use crate::reconcile::{ReconcileOptions, ReservedPolicy, Summary, reconcile};
use crate::source::AvailabilitySource;
use crate::store::{RecordStore, SyncUpdate};

/// Source label reported for a datacenter that has never been synced.
pub const STATIC_SOURCE_LABEL: &str = "Static Database";

/// Parameters for one datacenter sync.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    pub datacenter_id: String,
    /// Overrides the patch panel stored on the datacenter.
    pub patch_panel: Option<String>,
    /// Explicit panel size; wins over the datacenter's `maxPorts`.
    pub panel_size: Option<u32>,
    /// Fallback when neither the request nor the datacenter gives a size.
    pub default_panel_size: Option<u32>,
    pub preserve_occupant_info: bool,
    pub reserved: ReservedPolicy,
    /// Label written as `syncSource`; defaults to the source's own label.
    pub source_label: Option<String>,
    /// Reconcile without writing anything back.
    pub dry_run: bool,
}

impl SyncRequest {
    pub fn new(datacenter_id: impl Into<String>) -> Self {
        Self {
            datacenter_id: datacenter_id.into(),
            patch_panel: None,
            panel_size: None,
            default_panel_size: None,
            preserve_occupant_info: true,
            reserved: ReservedPolicy::default(),
            source_label: None,
            dry_run: false,
        }
    }
}

/// Outcome of a sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub datacenter_id: String,
    pub patch_panel: String,
    pub synced_at: DateTime<Utc>,
    pub source: String,
    pub dry_run: bool,
    pub summary: Summary,
    pub ports: Vec<PortRecord>,
}

/// Sync state of a stored datacenter, without contacting any source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    pub datacenter_id: String,
    pub patch_panel: Option<String>,
    pub last_sync: Option<DateTime<Utc>>,
    pub source: String,
    pub total_ports: usize,
    pub available_ports: usize,
    pub occupied_ports: usize,
    pub reserved_ports: usize,
    /// Occupied ports with a named occupant.
    pub named_occupants: usize,
}

impl SyncStatus {
    pub fn of(datacenter: &Datacenter) -> Self {
        let info = &datacenter.our_info;
        let with_status =
            |status: PortStatus| info.port_details.iter().filter(|p| p.status == status).count();

        Self {
            datacenter_id: datacenter.id.clone(),
            patch_panel: Some(info.patch_panel.clone()).filter(|p| !p.trim().is_empty()),
            last_sync: info.last_api_sync,
            source: info
                .sync_source
                .clone()
                .unwrap_or_else(|| STATIC_SOURCE_LABEL.to_owned()),
            total_ports: info.port_details.len(),
            available_ports: with_status(PortStatus::Available),
            occupied_ports: with_status(PortStatus::Occupied),
            reserved_ports: with_status(PortStatus::Reserved),
            named_occupants: info
                .port_details
                .iter()
                .filter(|p| p.status == PortStatus::Occupied && p.has_occupant())
                .count(),
        }
    }
}

/// Sync one datacenter's patch panel from `source` into `store`.
///
/// A failed fetch leaves the store untouched.
pub async fn sync_datacenter<S, R>(
    source: &S,
    store: &R,
    request: &SyncRequest,
) -> Result<SyncReport, CoreError>
where
    S: AvailabilitySource,
    R: RecordStore + ?Sized,
{
    let datacenter = store.datacenter(&request.datacenter_id)?;
    let panel = request
        .patch_panel
        .clone()
        .unwrap_or_else(|| datacenter.our_info.patch_panel.clone());
    if panel.trim().is_empty() {
        return Err(CoreError::MissingPatchPanel {
            datacenter: datacenter.id,
        });
    }

    let prior = store.prior_ports(&datacenter.id).unwrap_or_else(|e| {
        warn!(datacenter = %datacenter.id, error = %e, "prior inventory unreadable; treating as empty");
        Vec::new()
    });

    let available = source.available_ports(&panel).await?;

    let options = ReconcileOptions {
        preserve_occupant_info: request.preserve_occupant_info,
        default_panel_size: request
            .panel_size
            .or(datacenter.our_info.max_ports)
            .or(request.default_panel_size),
        reserved: request.reserved,
    };
    let merged = reconcile(&prior, &available, &options)?;

    let synced_at = Utc::now();
    let label = request
        .source_label
        .clone()
        .unwrap_or_else(|| source.label().to_owned());

    info!(
        datacenter = %datacenter.id,
        panel = %panel,
        total = merged.summary.total_ports,
        occupied = merged.summary.occupied_ports,
        preserved = merged.summary.preserved_customer_records,
        dry_run = request.dry_run,
        "patch panel reconciled"
    );

    if !request.dry_run {
        store.commit_sync(
            &datacenter.id,
            SyncUpdate {
                ports: merged.ports.clone(),
                available_ports: merged.summary.available_ports.clone(),
                synced_at,
                source: label.clone(),
            },
        )?;
    }

    Ok(SyncReport {
        datacenter_id: datacenter.id,
        patch_panel: panel,
        synced_at,
        source: label,
        dry_run: request.dry_run,
        summary: merged.summary,
        ports: merged.ports,
    })
}

/// Report the stored sync state of one datacenter.
pub fn sync_status<R: RecordStore + ?Sized>(
    store: &R,
    datacenter_id: &str,
) -> Result<SyncStatus, CoreError> {
    store.datacenter(datacenter_id).map(|dc| SyncStatus::of(&dc))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::store::MemoryStore;

    /// Canned availability, or a canned failure.
    struct FakeSource {
        free: Option<BTreeSet<u32>>,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn free(ports: impl IntoIterator<Item = u32>) -> Self {
            Self {
                free: Some(ports.into_iter().collect()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                free: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl AvailabilitySource for FakeSource {
        async fn available_ports(&self, panel: &str) -> Result<BTreeSet<u32>, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.free.clone().ok_or_else(|| CoreError::AvailabilityFetch {
                panel: panel.to_owned(),
                reason: "connection refused".into(),
                source: None,
            })
        }

        fn label(&self) -> &str {
            "Fake API"
        }
    }

    fn datacenter(ports: Vec<PortRecord>) -> Datacenter {
        let mut dc = Datacenter::new("zh2", "Equinix ZH2");
        dc.our_info.patch_panel = "PP:0201:0102:1374601".into();
        dc.our_info.port_details = ports;
        dc
    }

    fn acme(port: u32) -> PortRecord {
        PortRecord {
            status: PortStatus::Occupied,
            occupant_name: Some("Acme".into()),
            ..PortRecord::available(port)
        }
    }

    #[tokio::test]
    async fn sync_commits_merged_inventory() {
        let mut ports: Vec<PortRecord> = (1..=6).map(PortRecord::available).collect();
        ports[2] = acme(3);
        let store: MemoryStore = [datacenter(ports)].into_iter().collect();
        let source = FakeSource::free([1, 2, 5, 6]);

        let report = sync_datacenter(&source, &store, &SyncRequest::new("zh2"))
            .await
            .unwrap();

        assert_eq!(report.patch_panel, "PP:0201:0102:1374601");
        assert_eq!(report.source, "Fake API");
        assert_eq!(report.summary.occupied_ports, 2);
        assert_eq!(report.summary.preserved_customer_records, 1);

        let stored = store.datacenter("zh2").unwrap();
        assert_eq!(stored.our_info.port_details, report.ports);
        assert_eq!(stored.our_info.port_details[2], acme(3));
        assert_eq!(
            stored.our_info.port_details[3],
            PortRecord {
                status: PortStatus::Occupied,
                ..PortRecord::available(4)
            }
        );
        assert_eq!(
            stored.our_info.available_ports,
            Some(vec!["1".into(), "2".into(), "5".into(), "6".into()])
        );
        assert_eq!(stored.our_info.last_api_sync, Some(report.synced_at));
        assert_eq!(stored.our_info.sync_source.as_deref(), Some("Fake API"));
    }

    #[tokio::test]
    async fn failed_fetch_is_tagged_and_store_untouched() {
        let original = datacenter(vec![acme(1), PortRecord::available(2)]);
        let store: MemoryStore = [original.clone()].into_iter().collect();

        let err = sync_datacenter(&FakeSource::failing(), &store, &SyncRequest::new("zh2"))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::AvailabilityFetch { .. }));
        assert_eq!(store.datacenter("zh2").unwrap(), original);
    }

    #[tokio::test]
    async fn empty_inventory_falls_back_to_max_ports_then_default() {
        let mut dc = datacenter(Vec::new());
        dc.our_info.max_ports = Some(24);
        let store: MemoryStore = [dc].into_iter().collect();
        let mut request = SyncRequest::new("zh2");
        request.default_panel_size = Some(12);

        let report = sync_datacenter(&FakeSource::free(1..=24), &store, &request)
            .await
            .unwrap();
        assert_eq!(report.summary.total_ports, 24);

        let store: MemoryStore = [datacenter(Vec::new())].into_iter().collect();
        let report = sync_datacenter(&FakeSource::free(1..=12), &store, &request)
            .await
            .unwrap();
        assert_eq!(report.summary.total_ports, 12);
        assert_eq!(report.summary.occupied_ports, 0);
    }

    #[tokio::test]
    async fn missing_panel_size_fails_before_writing() {
        let store: MemoryStore = [datacenter(Vec::new())].into_iter().collect();
        let err = sync_datacenter(&FakeSource::free([1]), &store, &SyncRequest::new("zh2"))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::InvalidPanelSize { .. }));
        assert_eq!(store.datacenter("zh2").unwrap().our_info.last_api_sync, None);
    }

    #[tokio::test]
    async fn dry_run_reports_without_committing() {
        let original = datacenter((1..=4).map(PortRecord::available).collect());
        let store: MemoryStore = [original.clone()].into_iter().collect();
        let mut request = SyncRequest::new("zh2");
        request.dry_run = true;
        request.source_label = Some("Equinix API (manual)".into());

        let report = sync_datacenter(&FakeSource::free(Vec::<u32>::new()), &store, &request)
            .await
            .unwrap();

        assert!(report.dry_run);
        assert_eq!(report.source, "Equinix API (manual)");
        assert_eq!(report.summary.occupied_ports, 4);
        assert_eq!(store.datacenter("zh2").unwrap(), original);
    }

    #[tokio::test]
    async fn datacenter_without_panel_is_rejected() {
        let store: MemoryStore = [Datacenter::new("bare", "Bare")].into_iter().collect();
        let source = FakeSource::free([1]);

        let err = sync_datacenter(&source, &store, &SyncRequest::new("bare"))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::MissingPatchPanel { .. }));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_datacenter_is_not_found() {
        let store = MemoryStore::new();
        let err = sync_datacenter(&FakeSource::free([1]), &store, &SyncRequest::new("nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::DatacenterNotFound { .. }));
    }

    #[tokio::test]
    async fn repeated_sync_is_stable() {
        let store: MemoryStore = [datacenter(vec![acme(1), PortRecord::available(2)])]
            .into_iter()
            .collect();
        let source = FakeSource::free([2]);

        let first = sync_datacenter(&source, &store, &SyncRequest::new("zh2"))
            .await
            .unwrap();
        let second = sync_datacenter(&source, &store, &SyncRequest::new("zh2"))
            .await
            .unwrap();

        assert_eq!(first.ports, second.ports);
    }

    #[test]
    fn status_of_never_synced_datacenter() {
        let mut reserved = PortRecord::available(3);
        reserved.status = PortStatus::Reserved;
        let store: MemoryStore = [datacenter(vec![
            acme(1),
            PortRecord::occupied_placeholder(2),
            reserved,
            PortRecord::available(4),
        ])]
        .into_iter()
        .collect();

        let status = sync_status(&store, "zh2").unwrap();

        assert_eq!(
            status,
            SyncStatus {
                datacenter_id: "zh2".into(),
                patch_panel: Some("PP:0201:0102:1374601".into()),
                last_sync: None,
                source: STATIC_SOURCE_LABEL.into(),
                total_ports: 4,
                available_ports: 1,
                occupied_ports: 2,
                reserved_ports: 1,
                named_occupants: 1,
            }
        );
    }
}
