//! Test data cleanup against a mock server

use teamcity_harness::api::Specifications;
use teamcity_harness::config::ServerConfig;
use teamcity_harness::error::RequestError;
use teamcity_harness::CrudRequest;
use teamcity_harness::util::SecretString;
use teamcity_harness::{CleanupReport, TestDataStorage, UncheckedRequests};
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn super_user_requests(mock_server: &MockServer) -> UncheckedRequests {
    requests_for(mock_server.uri())
}

fn requests_for(url: String) -> UncheckedRequests {
    let specs = Specifications::new(&ServerConfig {
        url,
        superuser_token: Some(SecretString::new("1234")),
        timeout_secs: 5,
        verify_ssl: true,
    })
    .unwrap();
    UncheckedRequests::new(specs.super_user_spec().unwrap())
}

#[tokio::test]
async fn test_cleanup_deletes_newest_first_project_before_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path_regex(r"^/app/rest/(projects|users)/.+$"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let mut storage = TestDataStorage::new();
    let first = storage.add_test_data();
    let second = storage.add_test_data();

    let report = storage.cleanup(&super_user_requests(&mock_server)).await;

    assert_eq!(
        report,
        CleanupReport {
            attempted: 4,
            failed: 0
        }
    );
    assert!(storage.is_empty());

    let paths: Vec<String> = mock_server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();

    assert_eq!(
        paths,
        vec![
            format!("/app/rest/projects/id:{}", second.project_id()),
            format!("/app/rest/users/username:{}", second.user.username),
            format!("/app/rest/projects/id:{}", first.project_id()),
            format!("/app/rest/users/username:{}", first.user.username),
        ]
    );
}

#[tokio::test]
async fn test_cleanup_tolerates_missing_entities() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path_regex(r"^/app/rest/projects/.+$"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Project cannot be found"))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path_regex(r"^/app/rest/users/.+$"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let mut storage = TestDataStorage::new();
    storage.add_test_data();

    let report = storage.cleanup(&super_user_requests(&mock_server)).await;

    assert_eq!(report.attempted, 2);
    assert_eq!(report.failed, 1);
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_cleanup_survives_unreachable_server() {
    // A pooled MockServer keeps listening after drop; use a port that is closed
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let requests = requests_for(format!("http://127.0.0.1:{port}"));

    // Every delete fails in transport, not with a status
    let err = requests.projects().delete("test_Anything").await.unwrap_err();
    assert!(matches!(err, RequestError::Transport(_)));

    let mut storage = TestDataStorage::new();
    storage.add_test_data();
    storage.add_test_data();

    let report = storage.cleanup(&requests).await;

    assert_eq!(report.attempted, 4);
    assert_eq!(report.failed, 4);
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_cleanup_of_empty_storage_is_noop() {
    let mock_server = MockServer::start().await;

    let mut storage = TestDataStorage::new();
    let report = storage.cleanup(&super_user_requests(&mock_server)).await;

    assert_eq!(report, CleanupReport::default());
    assert!(
        mock_server
            .received_requests()
            .await
            .unwrap()
            .is_empty()
    );
}
