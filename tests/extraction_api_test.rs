//! Integration tests for the extraction client against a mock task API

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vidrelay::core::error::ExtractError;
use vidrelay::extract::{poll, ExtractionClient, JobHandle, JobState, StatusPoller};

#[tokio::test]
async fn test_submit_returns_job_handle() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tasks"))
        .and(body_json(json!({
            "type": "info",
            "url": "https://youtu.be/abc123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "href": "/tasks/42"
        })))
        .mount(&mock_server)
        .await;

    let client = ExtractionClient::new(mock_server.uri()).unwrap();
    let handle = client.submit("https://youtu.be/abc123").await.unwrap();

    assert_eq!(handle.as_str(), "/tasks/42");
}

#[tokio::test]
async fn test_submit_rejected_on_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = ExtractionClient::new(mock_server.uri()).unwrap();
    let err = client.submit("https://youtu.be/abc123").await.unwrap_err();

    assert!(matches!(err, ExtractError::RemoteRejected));
}

#[tokio::test]
async fn test_submit_rejected_when_href_missing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let client = ExtractionClient::new(mock_server.uri()).unwrap();
    let err = client.submit("https://youtu.be/abc123").await.unwrap_err();

    assert!(matches!(err, ExtractError::RemoteRejected));
}

#[tokio::test]
async fn test_poll_parses_completed_job() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "completed",
            "result": [{
                "formats": [{
                    "ext": "mp4",
                    "vcodec": "avc1",
                    "acodec": "aac",
                    "height": 720,
                    "url": "https://cdn.example/720.mp4"
                }]
            }]
        })))
        .mount(&mock_server)
        .await;

    let client = ExtractionClient::new(mock_server.uri()).unwrap();
    let handle = JobHandle::new("/tasks/42");
    let job = client.poll(&handle).await.unwrap();

    assert_eq!(job.state, JobState::Completed);
    assert_eq!(job.result.len(), 1);
    assert_eq!(job.result[0].formats[0].url, "https://cdn.example/720.mp4");
}

#[tokio::test]
async fn test_poll_surfaces_http_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks/42"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = ExtractionClient::new(mock_server.uri()).unwrap();
    let handle = JobHandle::new("/tasks/42");
    let err = client.poll(&handle).await.unwrap_err();

    assert!(matches!(err, ExtractError::Http(status) if status.as_u16() == 503));
}

#[tokio::test]
async fn test_resolve_waits_through_pending_states() {
    let mock_server = MockServer::start().await;

    // First two polls report pending, then the job completes
    Mock::given(method("GET"))
        .and(path("/tasks/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "state": "pending" })))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/tasks/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "completed",
            "result": [{ "formats": [] }]
        })))
        .mount(&mock_server)
        .await;

    let client = ExtractionClient::new(mock_server.uri()).unwrap();
    let handle = JobHandle::new("/tasks/42");
    let job = poll::resolve(&client, &handle, 30, Duration::ZERO).await.unwrap();

    assert_eq!(job.state, JobState::Completed);
}

#[tokio::test]
async fn test_resolve_reports_remote_failure_reason() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "failed",
            "error": { "message": "Unsupported URL" }
        })))
        .mount(&mock_server)
        .await;

    let client = ExtractionClient::new(mock_server.uri()).unwrap();
    let handle = JobHandle::new("/tasks/42");
    let err = poll::resolve(&client, &handle, 30, Duration::ZERO).await.unwrap_err();

    assert!(matches!(err, ExtractError::RemoteFailed(reason) if reason == "Unsupported URL"));
}
