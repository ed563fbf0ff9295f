#![allow(clippy::unwrap_used)]
// Integration tests for `PeeringDbClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use xconnect_api::{Error, PeeringDbClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, PeeringDbClient) {
    let server = MockServer::start().await;
    let client = PeeringDbClient::with_client(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn facility(id: u64, name: &str, country: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "org_name": "Equinix",
        "address1": "Josefstrasse 225",
        "address2": null,
        "city": "Zurich",
        "country": country,
        "zipcode": "8005",
        "latitude": 47.38,
        "longitude": 8.52,
        "net_count": 120,
        "ix_count": 3,
        "carrier_count": 10
    })
}

// ── Facilities ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_search_facilities_with_country_hint() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/fac"))
        .and(query_param("name_search", "Equinix"))
        .and(query_param("country", "CH"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                facility(1, "Equinix FR5", "DE"),
                facility(2, "Equinix ZH2", "CH"),
            ]
        })))
        .mount(&server)
        .await;

    let results = client.search_facilities("Equinix CH").await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].name, "Equinix ZH2");
    assert_eq!(results[1].name, "Equinix FR5");
    assert!(results[0].address2.is_empty());
}

#[tokio::test]
async fn test_search_facilities_without_hint() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/fac"))
        .and(query_param("name_search", "Interxion"))
        .and(query_param_is_missing("country"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let results = client.search_facilities("Interxion").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_get_facility_by_id() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/fac/58"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": [facility(58, "Equinix ZH4", "CH")] })),
        )
        .mount(&server)
        .await;

    let fac = client.facility(58).await.unwrap();
    assert_eq!(fac.id, 58);
    assert_eq!(fac.zipcode, "8005");
    assert_eq!(fac.net_count, 120);
}

#[tokio::test]
async fn test_empty_data_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/fac/999"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let result = client.facility(999).await;
    assert!(
        matches!(result, Err(Error::NotFound { ref resource }) if resource == "fac 999"),
        "expected NotFound, got: {result:?}"
    );
}

// ── Networks / orgs / contacts ──────────────────────────────────────

#[tokio::test]
async fn test_network_by_asn() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/net"))
        .and(query_param("asn", "13030"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": 70, "asn": 13030, "name": "Init7", "org_id": 88 }]
        })))
        .mount(&server)
        .await;

    let net = client.network_by_asn(13030).await.unwrap().unwrap();
    assert_eq!(net.id, 70);
    assert_eq!(net.org_id, Some(88));
    assert!(net.address.is_none());
}

#[tokio::test]
async fn test_contacts_for_network() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/poc"))
        .and(query_param("net_id", "70"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": 1, "net_id": 70, "role": "NOC", "name": "NOC", "email": "noc@example.net" },
                { "id": 2, "net_id": 70, "role": "Policy", "name": "Peering" }
            ]
        })))
        .mount(&server)
        .await;

    let contacts = client.contacts_for_network(70).await.unwrap();
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0].email, "noc@example.net");
    assert!(contacts[1].email.is_empty());
}

#[tokio::test]
async fn test_api_key_header_is_sent() {
    let server = MockServer::start().await;
    let key = SecretString::from("pdb-key".to_string());
    let client =
        PeeringDbClient::new(&server.uri(), Some(&key), &TransportConfig::default()).unwrap();

    Mock::given(method("GET"))
        .and(path("/org/88"))
        .and(header("authorization", "Api-Key pdb-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": 88, "name": "Init7 (Switzerland) Ltd.", "city": "Winterthur", "country": "CH" }]
        })))
        .mount(&server)
        .await;

    let org = client.organization(88).await.unwrap();
    assert_eq!(org.city, "Winterthur");
}

#[tokio::test]
async fn test_rate_limit_reports_retry_after() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/net/1"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "17"))
        .mount(&server)
        .await;

    let err = client.network(1).await.unwrap_err();
    assert!(matches!(err, Error::RateLimited { retry_after_secs: 17 }));
    assert!(err.is_transient());
}
