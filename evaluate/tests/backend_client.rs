use chrono::{TimeZone, Utc};
use evaluate::client::{BackendClient, ClientError};
use evaluate::config::ApiConfig;
use model::TaskStatus;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const IDEA: &str = "idea-7";

async fn mount(server: &MockServer, endpoint: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/api/{endpoint}")))
        .and(query_param("ideaId", IDEA))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mount_team(server: &MockServer) {
    mount(
        server,
        "team-structure",
        ResponseTemplate::new(200).set_body_json(json!({
            "members": [
                {"memberId": "m1", "userId": "u1", "isLead": true, "joinDate": "2026-01-01T00:00:00Z"},
                {"memberId": "m2", "userId": "u2"}
            ],
            "roles": []
        })),
    )
    .await;
    mount(
        server,
        "tasks",
        ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "t1", "assignedUsers": ["u1"], "status": "completed"}]
        })),
    )
    .await;
    mount(
        server,
        "messages",
        ResponseTemplate::new(200).set_body_json(json!([
            {"id": "msg1", "senderId": "u2", "content": "@u1 thanks", "createdAt": "2026-05-30T10:00:00Z"}
        ])),
    )
    .await;
    mount(
        server,
        "posts",
        ResponseTemplate::new(200).set_body_json(json!([])),
    )
    .await;
}

fn backend(server: &MockServer) -> BackendClient {
    BackendClient::new(&ApiConfig {
        base_url: format!("{}/api", server.uri()),
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn snapshot_collects_all_five_collections() {
    let server = MockServer::start().await;
    mount_team(&server).await;
    mount(
        &server,
        "files",
        ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "f1", "uploaderId": "u1", "category": "code", "downloadCount": 3}]
        })),
    )
    .await;

    let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
    let snapshot = backend(&server).snapshot(IDEA, now).await.unwrap();

    assert_eq!(snapshot.members.len(), 2);
    assert!(snapshot.members[0].is_lead);
    assert_eq!(snapshot.tasks[0].status, TaskStatus::Completed);
    assert_eq!(snapshot.messages.len(), 1);
    assert!(snapshot.posts.is_empty());
    assert_eq!(snapshot.files[0].download_count, 3);
    assert_eq!(snapshot.captured_at, Some(now));
}

#[tokio::test]
async fn bare_member_array_is_accepted() {
    let server = MockServer::start().await;
    mount(
        &server,
        "team-structure",
        ResponseTemplate::new(200).set_body_json(json!([{"userId": "u9"}])),
    )
    .await;

    let members = backend(&server).members(IDEA).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].user_id, "u9");
}

#[tokio::test]
async fn server_error_fails_the_whole_snapshot() {
    let server = MockServer::start().await;
    mount_team(&server).await;
    mount(&server, "files", ResponseTemplate::new(500)).await;

    let err = backend(&server)
        .snapshot(IDEA, Utc::now())
        .await
        .unwrap_err();
    match err {
        ClientError::Request { path, source } => {
            assert_eq!(path, "files");
            assert_eq!(source.status().map(|s| s.as_u16()), Some(500));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    mount_team(&server).await;
    mount(
        &server,
        "files",
        ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"),
    )
    .await;

    let err = backend(&server)
        .snapshot(IDEA, Utc::now())
        .await
        .unwrap_err();
    assert!(
        matches!(&err, ClientError::Decode { path, .. } if path == "files"),
        "unexpected error: {err:?}"
    );
}
