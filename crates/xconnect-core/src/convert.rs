// ── PeeringDB → domain conversions ──

use std::sync::LazyLock;

use regex::Regex;
use xconnect_api::{Contact, Facility, Organization};

use crate::model::{Datacenter, OurInfo};

/// Site code used when a facility name carries none.
pub const CUSTOM_SITE_CODE: &str = "CUSTOM";

/// Default port label on freshly imported datacenters.
pub const NEXT_AVAILABLE_PORT: &str = "Next available port";

static SITE_CODE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"[A-Z]{2,4}\d+"));

/// Join non-empty address parts with `", "`.
pub fn join_address<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Single-line postal address of a facility.
pub fn format_facility_address(facility: &Facility) -> String {
    join_address([
        facility.address1.as_str(),
        &facility.address2,
        &facility.city,
        &facility.state,
        &facility.zipcode,
        &facility.country,
    ])
}

pub(crate) fn organization_address(org: &Organization) -> String {
    join_address([
        org.address1.as_str(),
        &org.address2,
        &org.city,
        &org.state,
        &org.zipcode,
        &org.country,
    ])
}

pub(crate) fn contact_address(contact: &Contact) -> Option<String> {
    if contact.address1.trim().is_empty() && contact.address2.trim().is_empty() {
        return None;
    }
    Some(join_address([
        contact.address1.as_str(),
        &contact.address2,
        &contact.city,
        &contact.state,
        &contact.zipcode,
        &contact.country,
    ]))
}

/// First `[A-Z]{2,4}<digits>` token in a facility name, e.g. `ZH4`.
pub fn site_code(name: &str) -> String {
    match SITE_CODE.as_ref() {
        Ok(re) => re
            .find(name)
            .map_or_else(|| CUSTOM_SITE_CODE.to_owned(), |m| m.as_str().to_owned()),
        Err(_) => CUSTOM_SITE_CODE.to_owned(),
    }
}

/// Lowercase ASCII slug: alphanumeric runs joined by `-`.
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// New datacenter record for a PeeringDB facility, with an empty inventory.
pub fn facility_to_datacenter(facility: &Facility) -> Datacenter {
    let slug = slugify(&facility.name);
    let id = if slug.is_empty() {
        format!("fac-{}", facility.id)
    } else {
        slug
    };

    let mut dc = Datacenter::new(id, facility.name.clone());
    dc.address = format_facility_address(facility);
    dc.site_code = site_code(&facility.name);
    dc.facility_id = Some(facility.id);
    dc.our_info = OurInfo {
        default_port: Some(NEXT_AVAILABLE_PORT.to_owned()),
        ..OurInfo::default()
    };
    dc
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn facility(name: &str) -> Facility {
        serde_json::from_value(json!({
            "id": 62,
            "name": name,
            "address1": "Josefstrasse 225",
            "address2": "",
            "city": "Zurich",
            "state": null,
            "zipcode": "8005",
            "country": "CH"
        }))
        .unwrap()
    }

    #[test]
    fn site_code_is_first_matching_token() {
        assert_eq!(site_code("Equinix ZH4 - Zurich"), "ZH4");
        assert_eq!(site_code("Interxion ZUR1 / ZUR2"), "ZUR1");
        assert_eq!(site_code("Green Datacenter Lupfig"), CUSTOM_SITE_CODE);
        // Five capitals before the digit still contain a four-letter match.
        assert_eq!(site_code("ABCDE1"), "BCDE1");
    }

    #[test]
    fn address_skips_empty_parts() {
        assert_eq!(
            format_facility_address(&facility("Equinix ZH2")),
            "Josefstrasse 225, Zurich, 8005, CH"
        );
    }

    #[test]
    fn import_builds_bare_datacenter() {
        let dc = facility_to_datacenter(&facility("Equinix ZH2 (Zurich)"));

        assert_eq!(dc.id, "equinix-zh2-zurich");
        assert_eq!(dc.name, "Equinix ZH2 (Zurich)");
        assert_eq!(dc.display_name, dc.name);
        assert_eq!(dc.site_code, "ZH2");
        assert_eq!(dc.facility_id, Some(62));
        assert_eq!(dc.our_info.default_port.as_deref(), Some(NEXT_AVAILABLE_PORT));
        assert!(dc.our_info.port_details.is_empty());
        assert!(dc.our_info.patch_panel.is_empty());
    }

    #[test]
    fn name_without_ascii_falls_back_to_facility_id() {
        assert_eq!(facility_to_datacenter(&facility("データ")).id, "fac-62");
    }
}
