// Equinix colocation API client
//
// OAuth2 client-credentials token exchange plus the patch-panel endpoints
// under `/colocations/v2/patchPanels`.

pub mod client;
pub mod models;

pub use client::{EquinixClient, EquinixCredentials, EquinixEnvironment};
pub use models::PatchPanel;
