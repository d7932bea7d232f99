//! Contract tests for `RegistryClient` against the search endpoints.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET | `/api/v1/search/organization` | `organization_*` |
//! | GET | `/api/v1/search/person` | `person_*` |
//! | GET | `/api/v1/search/vehicle` | `vehicle_*` |

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mdesk_client::{BackOfficeClient, BackOfficeConfig};
use mdesk_core::{NationalId, OrganizationNumber, RegistrationNumber};
use mdesk_lookup::{LookupError, OrganizationRegistry, PersonRegistry, VehicleRegistry};

fn test_client(mock_server: &MockServer) -> BackOfficeClient {
    let config = BackOfficeConfig::for_url(mock_server.uri().parse().unwrap(), "test-token");
    BackOfficeClient::new(config).unwrap()
}

// ── Organization search ──────────────────────────────────────────────

#[tokio::test]
async fn organization_search_sends_key_and_decodes_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search/organization"))
        .and(query_param("organization_number", "556677-8899"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "organization_number": "556677-8899",
                "corp_name": "Acme AB",
                "street_address": "Main St 1",
                "city": "Stockholm",
                "postal_code": "11122"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let number = OrganizationNumber::new("556677-8899").unwrap();
    let record = client.registry().search_organization(&number).await.unwrap();
    assert_eq!(record.corp_name, "Acme AB");
    assert_eq!(record.street_address.as_deref(), Some("Main St 1"));
    assert_eq!(record.city.as_deref(), Some("Stockholm"));
    assert_eq!(record.postal_code.as_deref(), Some("11122"));
}

#[tokio::test]
async fn organization_miss_envelope_maps_to_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search/organization"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "success": false })),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let number = OrganizationNumber::new("000000-0000").unwrap();
    let result = client.registry().search_organization(&number).await;
    assert_eq!(result.unwrap_err(), LookupError::NotFound);
}

#[tokio::test]
async fn organization_http_404_maps_to_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search/organization"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let number = OrganizationNumber::new("000000-0000").unwrap();
    let result = client.registry().search_organization(&number).await;
    assert_eq!(result.unwrap_err(), LookupError::NotFound);
}

#[tokio::test]
async fn organization_server_error_maps_to_transport() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search/organization"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let number = OrganizationNumber::new("556677-8899").unwrap();
    let result = client.registry().search_organization(&number).await;
    assert!(matches!(result, Err(LookupError::Transport(_))));
}

// ── Person search ────────────────────────────────────────────────────

#[tokio::test]
async fn person_search_decodes_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search/person"))
        .and(query_param("national_id", "850712-1234"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "national_id": "850712-1234",
                "first_name": "Anna",
                "last_name": "Lind"
            }
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let id = NationalId::new("850712-1234").unwrap();
    let record = client.registry().search_person(&id).await.unwrap();
    assert_eq!(record.first_name, "Anna");
    assert_eq!(record.street_address, None);
}

// ── Vehicle search ───────────────────────────────────────────────────

#[tokio::test]
async fn vehicle_search_decodes_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/search/vehicle"))
        .and(query_param("registration_number", "ABC123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "registration_number": "ABC123",
                "make": "Volvo",
                "model": "V60",
                "model_year": 2021,
                "mileage": 42000
            }
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let registration = RegistrationNumber::new("abc 123").unwrap();
    let record = client.registry().search_vehicle(&registration).await.unwrap();
    assert_eq!(record.make.as_deref(), Some("Volvo"));
    assert_eq!(record.model_year, Some(2021));
    assert_eq!(record.mileage, Some(42000));
}

#[tokio::test]
async fn vehicle_search_is_repeatable_after_a_miss() {
    let mock_server = MockServer::start().await;

    // Two identical searches, two requests: no caching, no cooldown.
    Mock::given(method("GET"))
        .and(path("/api/v1/search/vehicle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let registration = RegistrationNumber::new("XYZ789").unwrap();
    assert_eq!(
        client.registry().search_vehicle(&registration).await,
        Err(LookupError::NotFound)
    );
    assert_eq!(
        client.registry().search_vehicle(&registration).await,
        Err(LookupError::NotFound)
    );
}
