use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Placeholder media type for an occupied port we know nothing about.
pub const DEFAULT_MEDIA_TYPE: &str = "Fiber";

/// Occupancy state of a patch-panel port.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PortStatus {
    Available,
    Occupied,
    Reserved,
}

/// One physical port on a patch panel.
///
/// `port_number` is the stable identity across syncs. Occupant metadata
/// is only meaningful while the port is occupied or reserved; an
/// available port never carries any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortRecord {
    pub port_number: u32,
    pub status: PortStatus,
    /// The party connected on the far (Z) side.
    #[serde(
        default,
        rename = "zSideCustomer",
        skip_serializing_if = "Option::is_none"
    )]
    pub occupant_name: Option<String>,
    #[serde(
        default,
        rename = "installationDate",
        skip_serializing_if = "Option::is_none"
    )]
    pub installed_on: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
}

impl PortRecord {
    /// A free port with no metadata.
    pub fn available(port_number: u32) -> Self {
        Self {
            port_number,
            status: PortStatus::Available,
            occupant_name: None,
            installed_on: None,
            media_type: None,
            order_number: None,
        }
    }

    /// An occupied port with no known occupant, tagged with the default media type.
    pub fn occupied_placeholder(port_number: u32) -> Self {
        Self {
            status: PortStatus::Occupied,
            media_type: Some(DEFAULT_MEDIA_TYPE.to_owned()),
            ..Self::available(port_number)
        }
    }

    /// `true` if an occupant name is set and not blank.
    pub fn has_occupant(&self) -> bool {
        self.occupant_name
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty())
    }

    /// `true` if any of the occupant metadata fields is set.
    pub fn has_metadata(&self) -> bool {
        self.occupant_name.is_some()
            || self.installed_on.is_some()
            || self.media_type.is_some()
            || self.order_number.is_some()
    }

    /// Drop all occupant metadata and mark the port available.
    pub fn release(&mut self) {
        *self = Self::available(self.port_number);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_inventory_files() {
        let record = PortRecord {
            port_number: 3,
            status: PortStatus::Occupied,
            occupant_name: Some("Acme".into()),
            installed_on: Some("2024-03-01".into()),
            media_type: Some("SMF".into()),
            order_number: Some("1-2345".into()),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "portNumber": 3,
                "status": "occupied",
                "zSideCustomer": "Acme",
                "installationDate": "2024-03-01",
                "mediaType": "SMF",
                "orderNumber": "1-2345"
            })
        );
    }

    #[test]
    fn available_port_serializes_without_metadata() {
        let value = serde_json::to_value(PortRecord::available(9)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "portNumber": 9, "status": "available" })
        );
    }

    #[test]
    fn blank_occupant_is_not_an_occupant() {
        let mut record = PortRecord::occupied_placeholder(1);
        assert!(!record.has_occupant());
        record.occupant_name = Some("   ".into());
        assert!(!record.has_occupant());
        record.occupant_name = Some("Globex".into());
        assert!(record.has_occupant());
    }

    #[test]
    fn release_clears_metadata() {
        let mut record = PortRecord::occupied_placeholder(4);
        record.occupant_name = Some("Initech".into());
        record.release();
        assert_eq!(record, PortRecord::available(4));
        assert!(!record.has_metadata());
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Reserved".parse::<PortStatus>().unwrap(), PortStatus::Reserved);
        assert_eq!(PortStatus::Available.to_string(), "available");
    }
}
