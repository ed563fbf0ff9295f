// ── Port reconciliation ──
//
// Merges a freshly fetched availability set into the stored port
// inventory of one patch panel. Pure and synchronous; the sync service
// owns fetching and persistence.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::CoreError;
use crate::model::{PortRecord, PortStatus};

/// What happens to a `reserved` port that the source reports as not free.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReservedPolicy {
    /// Force it to `occupied` like any other taken port.
    #[default]
    Downgrade,
    /// Leave it `reserved`, metadata untouched.
    Keep,
}

/// Knobs for a single reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Carry occupant metadata over for ports that stay taken.
    pub preserve_occupant_info: bool,
    /// Panel size used when there is no prior inventory.
    pub default_panel_size: Option<u32>,
    pub reserved: ReservedPolicy,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            preserve_occupant_info: true,
            default_panel_size: None,
            reserved: ReservedPolicy::default(),
        }
    }
}

/// Counts describing a merged inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_ports: u32,
    /// Ports not reported free, whatever their final status.
    pub occupied_ports: u32,
    /// The availability set exactly as the source reported it.
    pub available_ports: Vec<u32>,
    /// Prior records that were occupied with a named occupant.
    pub preserved_customer_records: u32,
}

/// Output of [`reconcile`]: one record per port, plus a summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub ports: Vec<PortRecord>,
    pub summary: Summary,
}

/// Resolve the panel size: the prior inventory length, else the default.
pub fn panel_size(existing: &[PortRecord], default: Option<u32>) -> Result<u32, CoreError> {
    if !existing.is_empty() {
        return u32::try_from(existing.len()).map_err(|_| CoreError::InvalidPanelSize {
            message: format!("{} prior ports exceed the supported panel size", existing.len()),
        });
    }
    match default {
        Some(0) => Err(CoreError::InvalidPanelSize {
            message: "default panel size must be at least 1".into(),
        }),
        Some(size) => Ok(size),
        None => Err(CoreError::InvalidPanelSize {
            message: "no prior inventory and no default panel size configured".into(),
        }),
    }
}

/// Merge `available` into `existing`.
///
/// Every port in `1..=N` gets exactly one record, ascending. Free ports are
/// emitted bare. Taken ports keep their first prior record (status forced
/// to `occupied`, or left `reserved` under [`ReservedPolicy::Keep`]) when
/// preservation is on, and otherwise become an occupied placeholder.
/// Prior records numbered above `N` are dropped.
pub fn reconcile(
    existing: &[PortRecord],
    available: &BTreeSet<u32>,
    options: &ReconcileOptions,
) -> Result<Reconciliation, CoreError> {
    let total = panel_size(existing, options.default_panel_size)?;

    let ports: Vec<PortRecord> = (1..=total)
        .map(|port| {
            if available.contains(&port) {
                return PortRecord::available(port);
            }
            let prior = existing.iter().find(|r| r.port_number == port);
            match prior {
                Some(prior) if options.preserve_occupant_info => {
                    let mut kept = prior.clone();
                    kept.status = match (prior.status, options.reserved) {
                        (PortStatus::Reserved, ReservedPolicy::Keep) => PortStatus::Reserved,
                        _ => PortStatus::Occupied,
                    };
                    kept
                }
                _ => PortRecord::occupied_placeholder(port),
            }
        })
        .collect();

    let occupied_ports = count(ports.iter().filter(|r| r.status != PortStatus::Available));
    let preserved_customer_records = count(
        existing
            .iter()
            .filter(|r| r.status == PortStatus::Occupied && r.has_occupant()),
    );

    Ok(Reconciliation {
        ports,
        summary: Summary {
            total_ports: total,
            occupied_ports,
            available_ports: available.iter().copied().collect(),
            preserved_customer_records,
        },
    })
}

fn count<I: Iterator>(iter: I) -> u32 {
    u32::try_from(iter.count()).unwrap_or(u32::MAX)
}
