// xconnect-api: Async clients for the Equinix patch-panel API and PeeringDB

pub mod equinix;
pub mod error;
pub mod peeringdb;
pub mod transport;

pub use equinix::{EquinixClient, EquinixCredentials, EquinixEnvironment, PatchPanel};
pub use error::Error;
pub use peeringdb::{Contact, Facility, Network, Organization, PeeringDbClient};
pub use transport::{TlsMode, TransportConfig};
