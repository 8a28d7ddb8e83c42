//! Request layer integration tests with mock server

use serde_json::json;
use teamcity_harness::api::messages::{self, AUTHENTICATION_REQUIRED, ApiErrorMessage};
use teamcity_harness::api::{BuildType, RoleId, RoleScope, Specifications};
use teamcity_harness::config::ServerConfig;
use teamcity_harness::error::RequestError;
use teamcity_harness::requests::{
    AuthRequest, CheckedBuildConfig, CheckedRequests, CrudRequest, UncheckedBuildConfig,
    UncheckedRequests,
};
use teamcity_harness::util::SecretString;
use teamcity_harness::TestDataGenerator;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// base64(":1234")
const SUPER_USER_AUTH: &str = "Basic OjEyMzQ=";

/// Helper to create specifications pointing to mock server
fn create_specs(mock_server: &MockServer) -> Specifications {
    let config = ServerConfig {
        url: mock_server.uri(),
        superuser_token: Some(SecretString::new("1234")),
        timeout_secs: 5,
        verify_ssl: true,
    };
    Specifications::new(&config).unwrap()
}

/// URI of a local port nothing listens on
///
/// Dropped `MockServer`s return to wiremock's pool and keep listening, so
/// the port comes from a plain listener instead.
fn closed_port_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

#[tokio::test]
async fn test_checked_create_returns_entity_with_submitted_id() {
    let mock_server = MockServer::start().await;
    let data = TestDataGenerator::generate();

    Mock::given(method("POST"))
        .and(path("/app/rest/buildTypes"))
        .and(header("authorization", SUPER_USER_AUTH))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "id": data.build_type_id(),
            "project": { "id": data.project_id() }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": data.build_type_id(),
            "name": data.build_type.name,
            "projectId": data.project_id(),
            "project": { "id": data.project_id(), "name": data.project.name }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let specs = create_specs(&mock_server);
    let checked = CheckedRequests::new(specs.super_user_spec().unwrap());

    let created = checked
        .build_configs()
        .create(&data.build_type)
        .await
        .unwrap();

    assert_eq!(created.id, data.build_type.id);
    assert_eq!(
        created.project.and_then(|p| p.id).as_deref(),
        Some(data.project_id())
    );
}

#[tokio::test]
async fn test_checked_create_fails_on_non_success_status() {
    let mock_server = MockServer::start().await;
    let data = TestDataGenerator::generate();
    let error_body = messages::edit_project_permission(data.project_id());

    Mock::given(method("POST"))
        .and(path("/app/rest/buildTypes"))
        .respond_with(ResponseTemplate::new(403).set_body_string(error_body.clone()))
        .mount(&mock_server)
        .await;

    let specs = create_specs(&mock_server);
    let result = CheckedBuildConfig::new(specs.auth_spec(&data.user))
        .create(&data.build_type)
        .await;

    match result {
        Err(err @ RequestError::UnexpectedStatus { .. }) => {
            assert!(err.is_assertion_failure());
            let message = err.to_string();
            assert!(message.contains("200"), "missing expected status: {message}");
            assert!(message.contains("403"), "missing actual status: {message}");
            assert!(message.contains(&error_body), "missing body: {message}");
        }
        other => panic!("expected status assertion failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unchecked_create_returns_client_error_as_value() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/app/rest/buildTypes"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(ApiErrorMessage::MissingProjectNode.text()),
        )
        .mount(&mock_server)
        .await;

    let specs = create_specs(&mock_server);
    let unchecked = UncheckedRequests::new(specs.super_user_spec().unwrap());

    let response = unchecked
        .build_configs()
        .create(&BuildType::default())
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    assert!(
        response
            .body()
            .contains("Build type creation request should contain project node.")
    );
}

#[tokio::test]
async fn test_unauthenticated_request_sends_no_credentials() {
    let mock_server = MockServer::start().await;
    let data = TestDataGenerator::generate();

    // Any request carrying credentials would hit this mock instead
    Mock::given(method("POST"))
        .and(path("/app/rest/buildTypes"))
        .and(header("authorization", SUPER_USER_AUTH))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/app/rest/buildTypes"))
        .respond_with(ResponseTemplate::new(401).set_body_string(AUTHENTICATION_REQUIRED))
        .mount(&mock_server)
        .await;

    let specs = create_specs(&mock_server);
    let response = UncheckedBuildConfig::new(specs.unauth_spec())
        .create(&data.build_type)
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    assert_eq!(
        response.body(),
        "Authentication required\nTo login manually go to \"/login.html\" page"
    );

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_user_authenticated_spec_uses_basic_auth() {
    let mock_server = MockServer::start().await;
    let data = TestDataGenerator::generate()
        .with_roles(RoleId::SystemAdmin, RoleScope::Global);

    Mock::given(method("POST"))
        .and(path("/app/rest/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": data.project_id(),
            "name": data.project.name,
            "parentProjectId": "_Root"
        })))
        .mount(&mock_server)
        .await;

    let specs = create_specs(&mock_server);
    let checked = CheckedRequests::new(specs.auth_spec(&data.user));
    let project = checked.projects().create(&data.project).await.unwrap();

    assert_eq!(project.id, data.project.id);
    assert_eq!(project.parent_project_id.as_deref(), Some("_Root"));

    let requests = mock_server.received_requests().await.unwrap();
    let authorization = requests[0]
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(authorization.starts_with("Basic "));
    assert_ne!(authorization, SUPER_USER_AUTH);
}

#[tokio::test]
async fn test_create_user_posts_roles() {
    let mock_server = MockServer::start().await;
    let data = TestDataGenerator::generate();
    let scope = data.project_scope().unwrap();
    let data = data.with_roles(RoleId::ProjectAdmin, scope);

    Mock::given(method("POST"))
        .and(path("/app/rest/users"))
        .and(body_partial_json(json!({
            "username": data.user.username,
            "roles": { "role": [{ "roleId": "PROJECT_ADMIN", "scope": format!("p:{}", data.project_id()) }] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": data.user.username,
            "id": 7,
            "roles": { "role": [{
                "roleId": "PROJECT_ADMIN",
                "scope": format!("p:{}", data.project_id()),
                "href": "/app/rest/users/id:7/roles/PROJECT_ADMIN"
            }] }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let specs = create_specs(&mock_server);
    let created = CheckedRequests::new(specs.super_user_spec().unwrap())
        .users()
        .create(&data.user)
        .await
        .unwrap();

    assert_eq!(created.username, data.user.username);
    assert_eq!(created.roles, data.user.roles);
}

#[tokio::test]
async fn test_get_and_delete_use_locator_paths() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/app/rest/projects/id:test_Project"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "test_Project",
            "name": "Project"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/app/rest/users/username:test_User"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let specs = create_specs(&mock_server);
    let checked = CheckedRequests::new(specs.super_user_spec().unwrap());

    let project = checked.projects().get("test_Project").await.unwrap();
    assert_eq!(project.name.as_deref(), Some("Project"));

    let body = checked.users().delete("test_User").await.unwrap();
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_checked_get_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/app/rest/buildTypes/id:missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string("No build type nor template is found by id 'missing'."),
        )
        .mount(&mock_server)
        .await;

    let specs = create_specs(&mock_server);
    let checked = CheckedRequests::new(specs.super_user_spec().unwrap());
    let err = checked.build_configs().get("missing").await.unwrap_err();

    assert_eq!(err.actual_status(), Some(404));
}

#[tokio::test]
async fn test_run_build_create_and_unsupported_operations() {
    let mock_server = MockServer::start().await;
    let data = TestDataGenerator::generate();

    Mock::given(method("POST"))
        .and(path("/app/rest/buildQueue"))
        .and(body_partial_json(json!({
            "buildType": { "id": data.build_type_id() }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 101,
            "buildTypeId": data.build_type_id(),
            "state": "queued",
            "buildType": { "id": data.build_type_id() }
        })))
        .mount(&mock_server)
        .await;

    let specs = create_specs(&mock_server);
    let checked = CheckedRequests::new(specs.super_user_spec().unwrap());

    let queued = checked.run_builds().create(&data.run_build).await.unwrap();
    assert_eq!(queued.id, Some(101));
    assert_eq!(queued.build_type_id.as_deref(), Some(data.build_type_id()));

    let err = checked.run_builds().get("101").await.unwrap_err();
    assert!(matches!(
        err,
        RequestError::Unsupported {
            resource: "run build",
            operation: "get"
        }
    ));

    let err = UncheckedRequests::new(specs.super_user_spec().unwrap())
        .run_builds()
        .update("101", &data.run_build)
        .await
        .unwrap_err();
    assert!(matches!(err, RequestError::Unsupported { .. }));

    // Unsupported operations never reach the server
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_user_update_puts_to_locator_path() {
    let mock_server = MockServer::start().await;
    let data = TestDataGenerator::generate()
        .with_roles(RoleId::ProjectViewer, RoleScope::Global);
    let user_path = format!("/app/rest/users/username:{}", data.user.username);

    Mock::given(method("PUT"))
        .and(path(user_path.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": data.user.username,
            "email": "changed@gmail.com"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let specs = create_specs(&mock_server);
    let updated = CheckedRequests::new(specs.super_user_spec().unwrap())
        .users()
        .update(&data.user.username, &data.user)
        .await
        .unwrap();

    assert_eq!(updated.email, "changed@gmail.com");
}

#[tokio::test]
async fn test_auth_probe_returns_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/authenticationTest.html"))
        .and(query_param("csrf", ""))
        .and(header("authorization", SUPER_USER_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_string("csrf-token-value\n"))
        .mount(&mock_server)
        .await;

    let specs = create_specs(&mock_server);
    let token = AuthRequest::new(specs.super_user_spec().unwrap())
        .csrf_token()
        .await
        .unwrap();

    assert_eq!(token, "csrf-token-value");
}

#[tokio::test]
async fn test_transport_failure_is_not_assertion_failure() {
    let specs = Specifications::new(&ServerConfig {
        url: closed_port_uri(),
        superuser_token: Some(SecretString::new("1234")),
        timeout_secs: 2,
        verify_ssl: true,
    })
    .unwrap();

    let data = TestDataGenerator::generate();
    let err = UncheckedRequests::new(specs.unauth_spec())
        .projects()
        .create(&data.project)
        .await
        .unwrap_err();

    assert!(matches!(err, RequestError::Transport(_)));
    assert!(!err.is_assertion_failure());
}
