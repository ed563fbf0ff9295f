// PeeringDB wire types
//
// PeeringDB returns empty strings rather than nulls for most unset text
// fields, so text fields default to `""` and callers test `is_empty()`.

use serde::{Deserialize, Deserializer, Serialize};

/// `{ "data": [...] }` envelope used by every PeeringDB endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// A colocation facility (`/api/fac`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub aka: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub org_name: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub address1: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub address2: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub city: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub state: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub country: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub zipcode: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub net_count: u32,
    #[serde(default)]
    pub ix_count: u32,
    #[serde(default)]
    pub carrier_count: u32,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub website: String,
}

/// A network / autonomous system (`/api/net`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub id: u64,
    pub asn: u32,
    pub name: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub aka: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub name_long: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub website: String,
    #[serde(default)]
    pub org_id: Option<u64>,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub info_type: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub policy_general: String,
    /// Not part of the documented schema, but some records carry it.
    #[serde(default)]
    pub address: Option<String>,
}

/// The organisation owning networks and facilities (`/api/org`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub address1: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub address2: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub city: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub state: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub zipcode: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub country: String,
}

/// A network point of contact (`/api/poc`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: u64,
    #[serde(default)]
    pub net_id: Option<u64>,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub role: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub name: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub email: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub phone: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub address1: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub address2: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub city: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub state: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub zipcode: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub country: String,
}

/// Treat an explicit `null` like a missing text field.
fn empty_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
