// ── Network address lookup ──
//
// Resolve a postal address for a PeeringDB network from the network
// record, its organisation, then its points of contact.

use tracing::{debug, warn};
use xconnect_api::PeeringDbClient;

use crate::cache::AddressCache;
use crate::convert::{contact_address, organization_address};
use crate::error::CoreError;

/// Postal address for `network_id`, or `None` if PeeringDB has none.
///
/// Failures of the organisation and contact lookups are logged and skipped;
/// only the network fetch itself is fatal. Found addresses go into `cache`.
pub async fn network_address(
    client: &PeeringDbClient,
    network_id: u64,
    cache: &AddressCache,
) -> Result<Option<String>, CoreError> {
    if let Some(hit) = cache.get(network_id) {
        debug!(network_id, "address cache hit");
        return Ok(Some(hit));
    }

    let network = client.network(network_id).await?;

    if let Some(address) = network.address.filter(|a| !a.trim().is_empty()) {
        cache.insert(network_id, address.clone());
        return Ok(Some(address));
    }

    if let Some(org_id) = network.org_id {
        match client.organization(org_id).await {
            Ok(org) => {
                let address = organization_address(&org);
                if !address.is_empty() {
                    debug!(network_id, org_id, "address from organisation");
                    cache.insert(network_id, address.clone());
                    return Ok(Some(address));
                }
            }
            Err(e) => warn!(network_id, org_id, error = %e, "organisation lookup failed"),
        }
    }

    match client.contacts_for_network(network_id).await {
        Ok(contacts) => {
            if let Some(address) = contacts.iter().find_map(contact_address) {
                debug!(network_id, "address from point of contact");
                cache.insert(network_id, address.clone());
                return Ok(Some(address));
            }
        }
        Err(e) => warn!(network_id, error = %e, "contact lookup failed"),
    }

    Ok(None)
}
