use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::port::PortRecord;

/// A facility we hold space in, with our patch-panel inventory.
///
/// Descriptive fields are opaque to reconciliation. Keys this type does not
/// know about are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datacenter {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub site_code: String,
    /// PeeringDB facility id, when imported from PeeringDB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility_id: Option<u64>,
    #[serde(default)]
    pub our_info: OurInfo,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub common_requesters: Vec<Requester>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_defaults: Option<TechnicalDefaults>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Our side of the facility: account, cabinet, and patch panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OurInfo {
    #[serde(default)]
    pub customer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(default)]
    pub ibx: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cage: Option<String>,
    #[serde(default)]
    pub cabinet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cabinet_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_name: Option<String>,
    /// Patch panel identifier at the vendor, e.g. `PP:0201:0102:1374601`.
    #[serde(default)]
    pub patch_panel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_port: Option<String>,
    /// Free ports as last reported by the vendor, kept as strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_ports: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_ports: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_ports",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub port_details: Vec<PortRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dedicated_media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_wired: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rack_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odf_info: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_api_sync: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_source: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A party that commonly requests cross-connects into this facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requester {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
}

/// Defaults pre-filled into cross-connect requests for this facility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl Datacenter {
    /// A bare record with only identity fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            display_name: name.clone(),
            name,
            address: String::new(),
            site_code: String::new(),
            facility_id: None,
            our_info: OurInfo::default(),
            common_requesters: Vec::new(),
            technical_defaults: None,
            extra: Map::new(),
        }
    }

    /// Case-insensitive substring match over name, display name, site code and address.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        [&self.name, &self.display_name, &self.site_code, &self.address]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// The port record for `port_number`, if the inventory has one.
    pub fn port(&self, port_number: u32) -> Option<&PortRecord> {
        self.our_info
            .port_details
            .iter()
            .find(|p| p.port_number == port_number)
    }
}

/// Read `portDetails`, falling back to an empty inventory when the stored
/// value does not parse.
fn lenient_ports<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<PortRecord>, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    if raw.is_null() {
        return Ok(Vec::new());
    }
    match serde_json::from_value(raw) {
        Ok(ports) => Ok(ports),
        Err(e) => {
            warn!(error = %e, "ignoring malformed portDetails; treating inventory as empty");
            Ok(Vec::new())
        }
    }
}

/// Read `lastApiSync`, treating a value that is not an RFC 3339 timestamp
/// as never synced.
fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    let parsed = match &raw {
        Value::Null => return Ok(None),
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim()).ok(),
        _ => None,
    };
    if parsed.is_none() {
        warn!(value = %raw, "ignoring malformed lastApiSync; treating as never synced");
    }
    Ok(parsed.map(|ts| ts.with_timezone(&Utc)))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::PortStatus;

    #[test]
    fn unknown_keys_survive_round_trip() {
        let raw = json!({
            "id": "equinix-zh2",
            "name": "Equinix ZH2",
            "displayName": "Equinix ZH2 Zurich",
            "address": "Josefstrasse 225, 8005 Zurich",
            "siteCode": "ZH2",
            "ourInfo": {
                "customer": "Example AG",
                "ibx": "ZH2",
                "cabinet": "0102",
                "patchPanel": "PP:0201:0102:1374601",
                "circuitAvailable": true
            },
            "notes": "legacy field"
        });

        let dc: Datacenter = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(dc.extra.get("notes"), Some(&json!("legacy field")));
        assert_eq!(dc.our_info.extra.get("circuitAvailable"), Some(&json!(true)));
        assert_eq!(serde_json::to_value(&dc).unwrap(), raw);
    }

    #[test]
    fn malformed_port_details_read_as_empty() {
        let dc: Datacenter = serde_json::from_value(json!({
            "id": "dc1",
            "name": "DC1",
            "ourInfo": { "portDetails": [{ "portNumber": "three", "status": "occupied" }] }
        }))
        .unwrap();
        assert!(dc.our_info.port_details.is_empty());
    }

    #[test]
    fn port_details_parse() {
        let dc: Datacenter = serde_json::from_value(json!({
            "id": "dc1",
            "name": "DC1",
            "ourInfo": {
                "portDetails": [
                    { "portNumber": 1, "status": "available" },
                    { "portNumber": 2, "status": "reserved", "zSideCustomer": "Acme" }
                ],
                "lastApiSync": "2025-01-02T03:04:05.000Z"
            }
        }))
        .unwrap();
        assert_eq!(dc.our_info.port_details.len(), 2);
        assert_eq!(dc.port(2).map(|p| p.status), Some(PortStatus::Reserved));
        assert!(dc.our_info.last_api_sync.is_some());
    }

    #[test]
    fn malformed_last_sync_reads_as_never_synced() {
        let dc: Datacenter = serde_json::from_value(json!({
            "id": "dc1",
            "name": "DC1",
            "ourInfo": {
                "portDetails": [{ "portNumber": 1, "status": "available" }],
                "lastApiSync": "last tuesday"
            }
        }))
        .unwrap();
        assert_eq!(dc.our_info.last_api_sync, None);
        assert_eq!(dc.our_info.port_details.len(), 1);

        let dc: Datacenter = serde_json::from_value(json!({
            "id": "dc2",
            "name": "DC2",
            "ourInfo": { "lastApiSync": 1_735_787_045 }
        }))
        .unwrap();
        assert_eq!(dc.our_info.last_api_sync, None);
    }

    #[test]
    fn query_matches_any_descriptive_field() {
        let mut dc = Datacenter::new("dc1", "Interxion ZUR1");
        dc.site_code = "ZUR1".into();
        dc.address = "Hardturmstrasse 131, Zurich".into();
        assert!(dc.matches_query("zur1"));
        assert!(dc.matches_query("hardturm"));
        assert!(!dc.matches_query("geneva"));
    }
}
