#![allow(clippy::unwrap_used)]
// Network address lookup against a wiremock PeeringDB.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use xconnect_api::{PeeringDbClient, TransportConfig};
use xconnect_core::{AddressCache, CoreError, network_address};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, PeeringDbClient) {
    let server = MockServer::start().await;
    let client = PeeringDbClient::new(&server.uri(), None, &TransportConfig::default()).unwrap();
    (server, client)
}

async fn mount_network(server: &MockServer, network: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/net/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [network] })))
        .expect(1)
        .mount(server)
        .await;
}

// ── Tests ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_address_on_network_wins_and_is_cached() {
    let (server, client) = setup().await;
    mount_network(
        &server,
        json!({ "id": 10, "asn": 64500, "name": "Acme", "org_id": 7, "address": "Main St 1, Bern" }),
    )
    .await;

    let cache = AddressCache::new();
    let first = network_address(&client, 10, &cache).await.unwrap();
    let second = network_address(&client, 10, &cache).await.unwrap();

    assert_eq!(first.as_deref(), Some("Main St 1, Bern"));
    assert_eq!(second, first);
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_falls_back_to_organisation_address() {
    let (server, client) = setup().await;
    mount_network(&server, json!({ "id": 10, "asn": 64500, "name": "Acme", "org_id": 7 })).await;

    Mock::given(method("GET"))
        .and(path("/org/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": 7,
                "name": "Acme AG",
                "address1": "Bahnhofstrasse 1",
                "address2": "",
                "city": "Zurich",
                "state": "",
                "zipcode": "8001",
                "country": "CH"
            }]
        })))
        .mount(&server)
        .await;

    let cache = AddressCache::new();
    let address = network_address(&client, 10, &cache).await.unwrap();

    assert_eq!(address.as_deref(), Some("Bahnhofstrasse 1, Zurich, 8001, CH"));
    assert_eq!(cache.get(10), address);
}

#[tokio::test]
async fn test_falls_back_to_points_of_contact() {
    let (server, client) = setup().await;
    mount_network(&server, json!({ "id": 10, "asn": 64500, "name": "Acme", "org_id": 7 })).await;

    Mock::given(method("GET"))
        .and(path("/org/7"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/poc"))
        .and(query_param("net_id", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": 1, "role": "Abuse", "address1": "" },
                { "id": 2, "role": "NOC", "address1": "Route 9", "city": "Geneva", "country": "CH" }
            ]
        })))
        .mount(&server)
        .await;

    let address = network_address(&client, 10, &AddressCache::new()).await.unwrap();

    assert_eq!(address.as_deref(), Some("Route 9, Geneva, CH"));
}

#[tokio::test]
async fn test_no_address_anywhere_is_none_and_not_cached() {
    let (server, client) = setup().await;
    mount_network(&server, json!({ "id": 10, "asn": 64500, "name": "Acme" })).await;

    Mock::given(method("GET"))
        .and(path("/poc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let cache = AddressCache::new();
    let address = network_address(&client, 10, &cache).await.unwrap();

    assert_eq!(address, None);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_unknown_network_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/net/99"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let err = network_address(&client, 99, &AddressCache::new())
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::NotFound { ref entity_type, .. } if entity_type == "net"));
}
