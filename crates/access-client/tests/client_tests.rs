//! Tests for `AccessManagerClient` against a scripted in-memory transport.

use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use access_client::{AccessManagerClient, ElementCodecs};
use access_domain::{
    AccessManagerError, AccessManagerEventProcessor, AccessManagerQueryProcessor,
    ConversionError, DisplayCodec, ElementType, HttpMethod, HttpResponse, HttpTransport,
    IdentityCodec, InputShape, JsonKind, ShapeError, TransportFailure,
};
use async_trait::async_trait;
use serde_json::json;

const BASE_URL: &str = "http://127.0.0.1:5170/";

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

/// Replays queued responses in order and records each request.
#[derive(Default)]
struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportFailure>>>,
    requests: Mutex<Vec<(HttpMethod, String)>>,
}

impl ScriptedTransport {
    fn respond(&self, status: u16, body: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    fn respond_json(&self, status: u16, body: serde_json::Value) {
        self.respond(status, body.to_string());
    }

    fn fail(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(TransportFailure::new(message)));
    }

    fn requests(&self) -> Vec<(HttpMethod, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, method: HttpMethod, url: &str) -> Result<HttpResponse, TransportFailure> {
        self.requests.lock().unwrap().push((method, url.to_owned()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted response left")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum AccessLevel {
    View,
    Create,
    Modify,
    Delete,
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::View => "View",
            Self::Create => "Create",
            Self::Modify => "Modify",
            Self::Delete => "Delete",
        })
    }
}

impl FromStr for AccessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "View" => Ok(Self::View),
            "Create" => Ok(Self::Create),
            "Modify" => Ok(Self::Modify),
            "Delete" => Ok(Self::Delete),
            other => Err(format!("unknown access level '{other}'")),
        }
    }
}

type TestClient = AccessManagerClient<String, String, String, AccessLevel>;

fn client() -> (TestClient, Arc<ScriptedTransport>) {
    let transport = Arc::new(ScriptedTransport::default());
    let codecs = ElementCodecs::new(
        IdentityCodec,
        IdentityCodec,
        IdentityCodec,
        DisplayCodec::<AccessLevel>::new(),
    );
    let client = AccessManagerClient::with_transport(BASE_URL, transport.clone(), codecs);
    (client, transport)
}

fn s(value: &str) -> String {
    value.to_owned()
}

fn not_found_body(code: &str, attribute: &str, value: &str) -> serde_json::Value {
    json!({
        "error": {
            "code": code,
            "message": format!("{attribute} '{value}' does not exist."),
            "target": attribute.to_lowercase(),
            "attributes": [{ "name": attribute, "value": value }]
        }
    })
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_user_posts_to_user_resource() {
    let (client, transport) = client();
    transport.respond(201, "");

    client.add_user(&s("user1")).await.unwrap();

    assert_eq!(
        transport.requests(),
        [(HttpMethod::Post, s("http://127.0.0.1:5170/api/v1/users/user1"))]
    );
}

#[tokio::test]
async fn remove_mapping_sends_delete_with_encoded_values() {
    let (client, transport) = client();
    transport.respond(200, "");

    client
        .remove_user_to_application_component_and_access_level_mapping(
            &s("user 1"),
            &s("Order/Screen"),
            &AccessLevel::Modify,
        )
        .await
        .unwrap();

    assert_eq!(
        transport.requests(),
        [(
            HttpMethod::Delete,
            s("http://127.0.0.1:5170/api/v1/userToApplicationComponentAndAccessLevelMappings/user/user%201/applicationComponent/Order%2FScreen/accessLevel/Modify")
        )]
    );
}

#[tokio::test]
async fn entity_events_use_entity_paths() {
    let (client, transport) = client();
    transport.respond(201, "");
    transport.respond(201, "");
    transport.respond(200, "");

    client.add_entity_type("ClientAccount").await.unwrap();
    client.add_entity("ClientAccount", "CompanyA").await.unwrap();
    client
        .remove_group_to_entity_mapping(&s("group1"), "ClientAccount", "CompanyA")
        .await
        .unwrap();

    let urls: Vec<String> = transport.requests().into_iter().map(|(_, url)| url).collect();
    assert_eq!(
        urls,
        [
            "http://127.0.0.1:5170/api/v1/entityTypes/ClientAccount",
            "http://127.0.0.1:5170/api/v1/entityTypes/ClientAccount/entities/CompanyA",
            "http://127.0.0.1:5170/api/v1/groupToEntityMappings/group/group1/entityType/ClientAccount/entity/CompanyA",
        ]
    );
}

#[tokio::test]
async fn missing_group_on_mapping_is_element_not_found() {
    let (client, transport) = client();
    transport.respond_json(404, not_found_body("GroupNotFoundException", "Group", "group9"));

    let err = client
        .add_user_to_group_mapping(&s("user1"), &s("group9"))
        .await
        .unwrap_err();

    assert_eq!(err.element_type(), Some(ElementType::Group));
    assert_eq!(err.element_value(), Some("group9"));
    assert_eq!(err.to_string(), "Group 'group9' does not exist.");
    assert_eq!(err.error_response().unwrap().target(), Some("group"));
}

#[tokio::test]
async fn validation_failure_keeps_server_message() {
    let (client, transport) = client();
    transport.respond_json(
        400,
        json!({ "error": { "code": "ArgumentException", "message": "Parameter 'group' must not be whitespace." } }),
    );

    let err = client.add_group(&s(" ")).await.unwrap_err();

    assert!(matches!(err, AccessManagerError::Validation { .. }));
    assert_eq!(err.to_string(), "Parameter 'group' must not be whitespace.");
}

#[tokio::test]
async fn transport_failure_names_method_and_url() {
    let (client, transport) = client();
    transport.fail("connection refused");

    let err = client.remove_user(&s("user1")).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Failed to call URL 'http://127.0.0.1:5170/api/v1/users/user1' with 'DELETE' method."
    );
    let source = std::error::Error::source(&err).unwrap();
    assert_eq!(source.to_string(), "connection refused");
}

#[tokio::test]
async fn unmapped_status_with_text_body_reports_raw_body() {
    let (client, transport) = client();
    transport.respond(503, "Service Unavailable");

    let err = client.add_entity_type("ClientAccount").await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Failed to call URL 'http://127.0.0.1:5170/api/v1/entityTypes/ClientAccount' with 'POST' method. \
         Received non-success HTTP response status '503' and response body 'Service Unavailable'."
    );
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn users_reads_string_array_in_order() {
    let (client, transport) = client();
    transport.respond_json(200, json!(["user2", "user1", "user3"]));

    let users = client.users().await.unwrap();

    assert_eq!(users, [s("user2"), s("user1"), s("user3")]);
    assert_eq!(
        transport.requests(),
        [(HttpMethod::Get, s("http://127.0.0.1:5170/api/v1/users"))]
    );
}

#[tokio::test]
async fn user_to_group_mappings_forwards_indirect_flag_and_reads_group_field() {
    let (client, transport) = client();
    transport.respond_json(
        200,
        json!([{ "user": "user1", "group": "group1" }, { "user": "user1", "group": "group2" }]),
    );

    let groups = client.user_to_group_mappings(&s("user1"), true).await.unwrap();

    assert_eq!(groups, [s("group1"), s("group2")]);
    assert_eq!(
        transport.requests()[0].1,
        "http://127.0.0.1:5170/api/v1/userToGroupMappings/user/user1?includeIndirectMappings=true"
    );
}

#[tokio::test]
async fn group_to_group_mappings_read_direction_specific_fields() {
    let (client, transport) = client();
    transport.respond_json(200, json!([{ "fromGroup": "group1", "toGroup": "group2" }]));
    transport.respond_json(200, json!([{ "fromGroup": "group0", "toGroup": "group1" }]));

    let to = client.group_to_group_mappings(&s("group1"), false).await.unwrap();
    let from = client
        .group_to_group_reverse_mappings(&s("group1"), false)
        .await
        .unwrap();

    assert_eq!(to, [s("group2")]);
    assert_eq!(from, [s("group0")]);
}

#[tokio::test]
async fn component_mappings_decode_pairs_with_both_codecs() {
    let (client, transport) = client();
    transport.respond_json(
        200,
        json!([
            { "user": "user1", "applicationComponent": "Order", "accessLevel": "View" },
            { "user": "user1", "applicationComponent": "Order", "accessLevel": "Create" }
        ]),
    );

    let mappings = client
        .user_to_application_component_and_access_level_mappings(&s("user1"))
        .await
        .unwrap();

    assert_eq!(
        mappings,
        [(s("Order"), AccessLevel::View), (s("Order"), AccessLevel::Create)]
    );
    assert!(transport.requests()[0]
        .1
        .ends_with("/user/user1?includeIndirectMappings=false"));
}

#[tokio::test]
async fn unknown_access_level_is_a_decode_error() {
    let (client, transport) = client();
    transport.respond_json(
        200,
        json!([{ "applicationComponent": "Order", "accessLevel": "Approve" }]),
    );

    let err = client
        .group_to_application_component_and_access_level_mappings(&s("group1"))
        .await
        .unwrap_err();

    match err {
        AccessManagerError::Conversion(ConversionError::Decode(decode)) => {
            assert_eq!(decode.text, "Approve");
        }
        other => panic!("expected a decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn accessible_components_use_indirect_mappings_and_deduplicate() {
    let (client, transport) = client();
    transport.respond_json(
        200,
        json!([
            { "applicationComponent": "Order", "accessLevel": "View" },
            { "applicationComponent": "Order", "accessLevel": "View" },
            { "applicationComponent": "Summary", "accessLevel": "View" }
        ]),
    );

    let accessible = client
        .application_components_accessible_by_user(&s("user1"))
        .await
        .unwrap();

    let expected: HashSet<(String, AccessLevel)> =
        [(s("Order"), AccessLevel::View), (s("Summary"), AccessLevel::View)]
            .into_iter()
            .collect();
    assert_eq!(accessible, expected);
    assert!(transport.requests()[0].1.ends_with("?includeIndirectMappings=true"));
}

#[tokio::test]
async fn entity_queries_read_entity_fields() {
    let (client, transport) = client();
    transport.respond_json(200, json!([{ "entityType": "ClientAccount", "entity": "CompanyA" }]));
    transport.respond_json(200, json!([{ "entityType": "ClientAccount", "entity": "CompanyA" }]));
    transport.respond_json(200, json!([{ "entityType": "ClientAccount", "entity": "CompanyB" }]));

    let entities = client.entities("ClientAccount").await.unwrap();
    let mapped = client.user_to_entity_mappings(&s("user1")).await.unwrap();
    let accessible = client
        .entities_of_type_accessible_by_group(&s("group1"), "ClientAccount")
        .await
        .unwrap();

    assert_eq!(entities, [s("CompanyA")]);
    assert_eq!(mapped, [(s("ClientAccount"), s("CompanyA"))]);
    assert_eq!(accessible, HashSet::from([s("CompanyB")]));
}

#[tokio::test]
async fn contains_user_maps_not_found_to_false() {
    let (client, transport) = client();
    transport.respond(200, "");
    transport.respond_json(404, not_found_body("UserNotFoundException", "User", "user9"));

    assert!(client.contains_user(&s("user1")).await.unwrap());
    assert!(!client.contains_user(&s("user9")).await.unwrap());
}

#[tokio::test]
async fn contains_entity_treats_missing_entity_type_as_absent() {
    let (client, transport) = client();
    transport.respond_json(
        404,
        not_found_body("EntityTypeNotFoundException", "EntityType", "Unknown"),
    );

    assert!(!client.contains_entity("Unknown", "CompanyA").await.unwrap());
}

#[tokio::test]
async fn contains_propagates_other_failures() {
    let (client, transport) = client();
    transport.respond_json(500, json!({ "error": { "code": "Exception", "message": "boom" } }));

    let err = client.contains_group(&s("group1")).await.unwrap_err();

    assert!(matches!(err, AccessManagerError::GenericServer { status: 500, .. }));
}

#[tokio::test]
async fn access_checks_read_boolean_answers() {
    let (client, transport) = client();
    transport.respond(200, "true");
    transport.respond(200, "false");

    assert!(client
        .has_access_to_application_component(&s("user1"), &s("Order"), &AccessLevel::View)
        .await
        .unwrap());
    assert!(!client
        .has_access_to_entity(&s("user1"), "ClientAccount", "CompanyA")
        .await
        .unwrap());

    let urls: Vec<String> = transport.requests().into_iter().map(|(_, url)| url).collect();
    assert_eq!(
        urls,
        [
            "http://127.0.0.1:5170/api/v1/dataElementAccess/applicationComponent/user/user1/applicationComponent/Order/accessLevel/View",
            "http://127.0.0.1:5170/api/v1/dataElementAccess/entity/user/user1/entityType/ClientAccount/entity/CompanyA",
        ]
    );
}

#[tokio::test]
async fn non_boolean_access_answer_is_a_shape_error() {
    let (client, transport) = client();
    transport.respond_json(200, json!({ "allowed": true }));

    let err = client
        .has_access_to_entity(&s("user1"), "ClientAccount", "CompanyA")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AccessManagerError::Conversion(ConversionError::Shape(ShapeError::UnexpectedInput {
            expected: InputShape::Boolean,
            actual: JsonKind::Object,
        }))
    ));
    assert_eq!(err.to_string(), "expected boolean-shaped input, got object");
}

#[tokio::test]
async fn malformed_list_element_fails_the_whole_query() {
    let (client, transport) = client();
    transport.respond_json(200, json!([{ "group": "group1" }, { "grp": "group2" }]));

    let err = client
        .user_to_group_mappings(&s("user1"), false)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "missing key group");
}

#[tokio::test]
async fn non_json_success_body_is_a_response_body_error() {
    let (client, transport) = client();
    transport.respond(200, "<html>proxy page</html>");

    let err = client.groups().await.unwrap_err();

    assert!(matches!(
        err,
        AccessManagerError::ResponseBody { method: HttpMethod::Get, ref url, .. }
            if url == "http://127.0.0.1:5170/api/v1/groups"
    ));
}
