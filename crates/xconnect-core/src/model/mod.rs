// ── Domain model ──
//
// Canonical, on-disk representation of the local inventory: datacenter
// records and the patch-panel ports we own in them. Field names on the
// wire stay compatible with the JSON inventory files already in use.

pub mod datacenter;
pub mod port;

pub use datacenter::{Datacenter, OurInfo, Requester, TechnicalDefaults};
pub use port::{DEFAULT_MEDIA_TYPE, PortRecord, PortStatus};
