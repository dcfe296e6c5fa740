//! Integration tests for `OverpassClient` and the resolver using wiremock
//! HTTP mocks.

use healthwatch_locator::{
    resolve_nearest, CandidateProvider, GeoPoint, LookupFailure, LookupOutcome, OverpassClient,
    QueryError, ResolverConfig, StaticLocation,
};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> OverpassClient {
    OverpassClient::with_base_url(15, "healthwatch-test/0.1", base_url)
        .expect("client construction should not fail")
}

fn point(lat: f64, lon: f64) -> GeoPoint {
    GeoPoint::new(lat, lon).expect("valid test point")
}

#[tokio::test]
async fn find_candidates_parses_nodes_and_ways() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "elements": [
            {
                "type": "node",
                "id": 1,
                "lat": -1.2921,
                "lon": 36.8219,
                "tags": {
                    "name": "Nairobi West Hospital",
                    "addr:street": "Gandhi Avenue",
                    "addr:city": "Nairobi",
                    "phone": "+254 20 1234567"
                }
            },
            {
                "type": "way",
                "id": 2,
                "center": { "lat": -1.30, "lon": 36.80 },
                "tags": { "name": "Mater Hospital" }
            }
        ]
    });

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("data="))
        .and(body_string_contains("amenity%22%3D%22hospital"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let candidates = client
        .find_candidates(point(-1.29, 36.82), 15.0, "hospital")
        .await
        .expect("should parse candidates");

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].name.as_deref(), Some("Nairobi West Hospital"));
    assert_eq!(candidates[0].phone.as_deref(), Some("+254 20 1234567"));
    assert_eq!(candidates[0].format_address(), "Gandhi Avenue, Nairobi");
    let way_location = candidates[1].location.expect("way center resolved");
    assert!((way_location.latitude() - (-1.30)).abs() < 1e-9);
}

#[tokio::test]
async fn server_error_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .find_candidates(point(-1.29, 36.82), 15.0, "hospital")
        .await;

    assert!(
        matches!(result, Err(QueryError::UnexpectedStatus { status: 500, .. })),
        "expected UnexpectedStatus(500), got: {result:?}"
    );
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<!doctype html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .find_candidates(point(-1.29, 36.82), 15.0, "hospital")
        .await;

    assert!(
        matches!(result, Err(QueryError::Deserialize { .. })),
        "expected Deserialize error, got: {result:?}"
    );
}

#[tokio::test]
async fn resolver_end_to_end_picks_nearest_hospital() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "elements": [
            { "type": "node", "id": 1, "lat": -1.35, "lon": 36.90,
              "tags": { "name": "Far Hospital" } },
            { "type": "node", "id": 2, "lat": -1.2925, "lon": 36.8215,
              "tags": { "name": "Close Hospital", "addr:city": "Nairobi" } },
            { "type": "node", "id": 3, "tags": { "name": "Unmapped Clinic" } }
        ]
    });

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let location = StaticLocation::new(point(-1.2921, 36.8219));
    let outcome = resolve_nearest(&location, &client, &ResolverConfig::default()).await;

    let LookupOutcome::Found(facility) = outcome else {
        panic!("expected Found, got {outcome:?}");
    };
    assert_eq!(facility.name, "Close Hospital");
    assert_eq!(facility.address, "Nairobi");
    assert!(facility.distance_km < 1.0, "got {}", facility.distance_km);
}

#[tokio::test]
async fn resolver_maps_empty_elements_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"elements": []})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let location = StaticLocation::new(point(-1.2921, 36.8219));
    let outcome = resolve_nearest(&location, &client, &ResolverConfig::default()).await;

    assert_eq!(outcome, LookupOutcome::NotFound);
}

#[tokio::test]
async fn resolver_maps_unlocatable_elements_to_failure() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "elements": [
            { "type": "node", "id": 1, "tags": { "name": "A" } },
            { "type": "way", "id": 2, "tags": { "name": "B" } }
        ]
    });

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let location = StaticLocation::new(point(-1.2921, 36.8219));
    let outcome = resolve_nearest(&location, &client, &ResolverConfig::default()).await;

    assert_eq!(
        outcome,
        LookupOutcome::Failed(LookupFailure::NoCoordinatesResolvable)
    );
}

#[tokio::test]
async fn resolver_maps_server_error_to_transport_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(504))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let location = StaticLocation::new(point(-1.2921, 36.8219));
    let outcome = resolve_nearest(&location, &client, &ResolverConfig::default()).await;

    assert_eq!(
        outcome,
        LookupOutcome::Failed(LookupFailure::QueryTransportError)
    );
}

#[tokio::test]
async fn custom_category_reaches_the_wire() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("amenity%22%3D%22clinic"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"elements": []})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let candidates = client
        .find_candidates(point(0.0, 0.0), 5.0, "clinic")
        .await
        .expect("mock should match the clinic query");
    assert!(candidates.is_empty());
}
