//! Contract tests for `MediaClient` document upload.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mdesk_client::{ApiError, BackOfficeClient, BackOfficeConfig};
use mdesk_core::AgreementId;

fn test_client(mock_server: &MockServer) -> BackOfficeClient {
    let config = BackOfficeConfig::for_url(mock_server.uri().parse().unwrap(), "test-token");
    BackOfficeClient::new(config).unwrap()
}

#[tokio::test]
async fn upload_posts_multipart_and_decodes_media_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/media/upload"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "success": true,
            "data": [
                { "_id": "m-1", "url": "https://cdn.example.com/m-1.pdf",
                  "file_name": "registration.pdf" }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let id = AgreementId::new("a-1").unwrap();
    let media = client
        .media()
        .upload(&id, "registration.pdf", b"%PDF-1.4 ...".to_vec())
        .await
        .unwrap();
    assert_eq!(media.len(), 1);
    assert_eq!(media[0].media_id, "m-1");
    assert_eq!(media[0].file_name.as_deref(), Some("registration.pdf"));
}

#[tokio::test]
async fn upload_failure_carries_backend_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/media/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "message": "file too large"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let id = AgreementId::new("a-1").unwrap();
    let result = client.media().upload(&id, "huge.pdf", vec![0u8; 16]).await;
    match result {
        Err(ApiError::Refused { message, .. }) => assert_eq!(message, "file too large"),
        other => panic!("expected Refused, got {other:?}"),
    }
}
