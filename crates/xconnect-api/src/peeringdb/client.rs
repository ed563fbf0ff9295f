// PeeringDB HTTP client
//
// Read-only. An API key is optional and only raises the rate limit;
// anonymous access works for every endpoint used here.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::models::{Contact, Envelope, Facility, Network, Organization};
use crate::error::Error;
use crate::transport::{TransportConfig, decode_json};

/// Trailing words in a facility query that narrow the search to a country.
const COUNTRY_HINTS: &[(&str, &str)] = &[
    ("ch", "CH"),
    ("switzerland", "CH"),
    ("it", "IT"),
    ("italy", "IT"),
    ("de", "DE"),
    ("germany", "DE"),
    ("fr", "FR"),
    ("france", "FR"),
    ("uk", "GB"),
    ("gb", "GB"),
    ("us", "US"),
];

/// Split a trailing country hint off a facility query.
///
/// `"Equinix CH"` and `"Equinix Switzerland"` both become
/// `("Equinix", Some("CH"))`. Queries without a recognised hint are
/// returned unchanged.
pub fn split_country_hint(query: &str) -> (&str, Option<&'static str>) {
    let trimmed = query.trim();
    let Some((head, last)) = trimmed.rsplit_once(char::is_whitespace) else {
        return (trimmed, None);
    };
    let last = last.to_ascii_lowercase();
    COUNTRY_HINTS
        .iter()
        .find(|(word, _)| *word == last)
        .map_or((trimmed, None), |(_, code)| (head.trim_end(), Some(*code)))
}

/// Async client for the PeeringDB REST API.
#[derive(Debug)]
pub struct PeeringDbClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PeeringDbClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL, an optional API key, and transport config.
    ///
    /// The key is sent as `Authorization: Api-Key <key>` on every request.
    pub fn new(
        base_url: &str,
        api_key: Option<&SecretString>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            let mut value = HeaderValue::from_str(&format!("Api-Key {}", key.expose_secret()))
                .map_err(|e| Error::Authentication {
                    message: format!("invalid API key header value: {e}"),
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        let http = transport.build_client_with_headers(headers)?;
        Self::with_client(base_url, http)
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn with_client(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET an endpoint and unwrap the `data` array.
    async fn get_list<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: &[(&str, String)],
        resource: &str,
    ) -> Result<Vec<T>, Error> {
        let url = self.endpoint(segments);
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        let envelope: Envelope<T> = decode_json(resp, resource).await?;
        Ok(envelope.data)
    }

    /// GET a single object by id; an empty `data` array is a not-found.
    async fn get_one<T: DeserializeOwned>(&self, kind: &str, id: u64) -> Result<T, Error> {
        let resource = format!("{kind} {id}");
        let id = id.to_string();
        let found: Vec<T> = self.get_list(&[kind, &id], &[], &resource).await?;
        found.into_iter().next().ok_or(Error::NotFound { resource })
    }

    // ── Facilities ───────────────────────────────────────────────────

    /// Search facilities by name, honouring a trailing country hint.
    ///
    /// With a hint, results in the hinted country sort first; the relative
    /// order returned by PeeringDB is otherwise kept.
    pub async fn search_facilities(&self, query: &str) -> Result<Vec<Facility>, Error> {
        let (name, country) = split_country_hint(query);

        let mut params = vec![("name_search", name.to_owned())];
        if let Some(code) = country {
            params.push(("country", code.to_owned()));
        }

        let mut facilities: Vec<Facility> = self.get_list(&["fac"], &params, "facilities").await?;
        if let Some(code) = country {
            facilities.sort_by_key(|f| f.country != code);
        }
        Ok(facilities)
    }

    /// Fetch one facility. `GET /fac/{id}`
    pub async fn facility(&self, id: u64) -> Result<Facility, Error> {
        self.get_one("fac", id).await
    }

    // ── Networks ─────────────────────────────────────────────────────

    /// Fetch one network. `GET /net/{id}`
    pub async fn network(&self, id: u64) -> Result<Network, Error> {
        self.get_one("net", id).await
    }

    /// Look a network up by its AS number. `GET /net?asn={asn}`
    pub async fn network_by_asn(&self, asn: u32) -> Result<Option<Network>, Error> {
        let networks: Vec<Network> = self
            .get_list(&["net"], &[("asn", asn.to_string())], "networks")
            .await?;
        Ok(networks.into_iter().next())
    }

    /// Networks present in a facility. `GET /net?fac_id={id}`
    pub async fn networks_in_facility(&self, facility_id: u64) -> Result<Vec<Network>, Error> {
        self.get_list(
            &["net"],
            &[("fac_id", facility_id.to_string())],
            "networks",
        )
        .await
    }

    // ── Organisations & contacts ─────────────────────────────────────

    /// Fetch one organisation. `GET /org/{id}`
    pub async fn organization(&self, id: u64) -> Result<Organization, Error> {
        self.get_one("org", id).await
    }

    /// Points of contact for a network. `GET /poc?net_id={id}`
    pub async fn contacts_for_network(&self, network_id: u64) -> Result<Vec<Contact>, Error> {
        self.get_list(
            &["poc"],
            &[("net_id", network_id.to_string())],
            "contacts",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_code_suffix_becomes_filter() {
        assert_eq!(split_country_hint("Equinix CH"), ("Equinix", Some("CH")));
        assert_eq!(split_country_hint("Interxion de"), ("Interxion", Some("DE")));
        assert_eq!(split_country_hint("Telehouse UK"), ("Telehouse", Some("GB")));
    }

    #[test]
    fn country_name_suffix_becomes_filter() {
        assert_eq!(
            split_country_hint("Equinix Zurich Switzerland"),
            ("Equinix Zurich", Some("CH"))
        );
        assert_eq!(split_country_hint("Data4 Italy"), ("Data4", Some("IT")));
    }

    #[test]
    fn queries_without_hint_pass_through() {
        assert_eq!(split_country_hint("Equinix"), ("Equinix", None));
        assert_eq!(split_country_hint("  Equinix ZH4  "), ("Equinix ZH4", None));
        assert_eq!(split_country_hint("Digital Realty"), ("Digital Realty", None));
    }
}
