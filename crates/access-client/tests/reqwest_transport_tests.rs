//! End-to-end tests for `ReqwestTransport` and `AccessManagerClient` over a
//! real HTTP connection to a mock server.

use std::time::Duration;

use access_client::{
    AccessManagerClient, ClientBuildError, ClientConfig, ElementCodecs, ReqwestTransport,
};
use access_domain::{
    AccessManagerError, AccessManagerEventProcessor, AccessManagerQueryProcessor, ElementType,
    HttpMethod, HttpTransport,
};
use serde_json::json;
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(server.uri()).with_user_agent("accessctl-tests/1.0")
}

fn client(server: &MockServer) -> AccessManagerClient<String, String, String, String> {
    AccessManagerClient::new(&config(server), ElementCodecs::identity()).unwrap()
}

#[tokio::test]
async fn transport_sends_standard_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .and(header("accept", "application/json"))
        .and(header("user-agent", "accessctl-tests/1.0"))
        .and(header_exists("x-request-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["user1"])))
        .expect(1)
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new(&config(&server)).unwrap();
    let response = transport
        .send(HttpMethod::Get, &format!("{}/api/v1/users", server.uri()))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, r#"["user1"]"#);
}

#[tokio::test]
async fn transport_returns_error_statuses_as_responses() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new(&config(&server)).unwrap();
    let response = transport
        .send(HttpMethod::Delete, &format!("{}/api/v1/users/a", server.uri()))
        .await
        .unwrap();

    assert_eq!(response.status, 500);
    assert_eq!(response.body, "boom");
    assert!(!response.is_success());
}

#[tokio::test]
async fn transport_times_out_slow_responses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let config = config(&server).with_timeout(Duration::from_millis(500));
    let transport = ReqwestTransport::new(&config).unwrap();
    let failure = transport
        .send(HttpMethod::Get, &format!("{}/api/v1/users", server.uri()))
        .await
        .unwrap_err();

    assert_eq!(failure.message(), "request could not be completed");
}

#[test]
fn transport_rejects_zero_timeout() {
    let config = ClientConfig::new("http://127.0.0.1:5170/").with_timeout(Duration::ZERO);

    let err = ReqwestTransport::new(&config).unwrap_err();

    assert!(matches!(err, ClientBuildError::InvalidConfig { .. }));
}

#[tokio::test]
async fn client_reads_mappings_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/userToGroupMappings/user/user1"))
        .and(query_param("includeIndirectMappings", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "user": "user1", "group": "group1" },
            { "user": "user1", "group": "group2" }
        ])))
        .mount(&server)
        .await;

    let groups = client(&server)
        .user_to_group_mappings(&"user1".to_owned(), true)
        .await
        .unwrap();

    assert_eq!(groups, ["group1", "group2"]);
}

#[tokio::test]
async fn client_posts_events_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/groupToGroupMappings/fromGroup/group1/toGroup/group2"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .add_group_to_group_mapping(&"group1".to_owned(), &"group2".to_owned())
        .await
        .unwrap();
}

#[tokio::test]
async fn client_translates_not_found_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/entityTypes/ClientAccount/entities"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "code": "EntityTypeNotFoundException",
                "message": "Entity type 'ClientAccount' does not exist.",
                "attributes": [{ "name": "EntityType", "value": "ClientAccount" }]
            }
        })))
        .mount(&server)
        .await;

    let err = client(&server).entities("ClientAccount").await.unwrap_err();

    assert_eq!(err.element_type(), Some(ElementType::EntityType));
    assert_eq!(err.element_value(), Some("ClientAccount"));
}

#[tokio::test]
async fn client_reports_unreachable_server_as_transport_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client: AccessManagerClient<String, String, String, String> =
        AccessManagerClient::new(&ClientConfig::new(uri.as_str()), ElementCodecs::identity())
            .unwrap();
    let err = client.users().await.unwrap_err();

    match &err {
        AccessManagerError::Transport { method, source, .. } => {
            assert_eq!(*method, HttpMethod::Get);
            assert_eq!(source.message(), "request could not be completed");
        }
        other => panic!("expected a transport error, got {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        format!("Failed to call URL '{uri}/api/v1/users' with 'GET' method.")
    );
}

#[test]
fn client_rejects_invalid_base_url() {
    let result: Result<AccessManagerClient<String, String, String, String>, _> =
        AccessManagerClient::new(&ClientConfig::new("localhost:5170"), ElementCodecs::identity());

    assert!(result.is_err());
}
