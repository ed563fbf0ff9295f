// PeeringDB read API client
//
// Facilities, networks, organisations and points of contact from
// `https://www.peeringdb.com/api`. Every list endpoint wraps its payload
// as `{ "data": [...] }`.

pub mod client;
pub mod models;

pub use client::{PeeringDbClient, split_country_hint};
pub use models::{Contact, Facility, Network, Organization};
