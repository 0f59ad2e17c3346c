//! Resource trait tests against a mocked Huntress API.

use huntress::{
    Account, Agent, ClientConfig, Context, Get, HuntressClient, IncidentReport,
    IncidentReportListQuery, List, Organization, RetryPolicy,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> HuntressClient {
    ClientConfig::new()
        .base_url(server.uri())
        .credentials("test-key", "test-secret")
        .retry_policy(RetryPolicy::no_retry())
        .requests_per_minute(0)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_get_account() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "account": {"id": 1, "name": "Acme MSP", "subdomain": "acme", "status": "enabled"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let account = Account::current(&client(&server), &Context::background())
        .await
        .unwrap();

    assert_eq!(account.name, "Acme MSP");
    assert_eq!(account.portal_url().as_deref(), Some("https://acme.huntress.io"));
}

#[tokio::test]
async fn test_get_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/agents/17"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "agent": {
                "id": 17,
                "hostname": "WS-0042",
                "organization_id": 5,
                "platform": "windows",
                "last_callback_at": "2024-03-01T12:00:00Z"
            }
        })))
        .mount(&server)
        .await;

    let agent = Agent::get(&client(&server), &Context::background(), 17)
        .await
        .unwrap();

    assert_eq!(agent.hostname, "WS-0042");
    assert_eq!(agent.organization_id, Some(5));
    assert!(agent.last_callback_at.is_some());
}

#[tokio::test]
async fn test_get_missing_entity() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/404"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"code": "not_found", "message": "Organization not found"})),
        )
        .mount(&server)
        .await;

    let err = Organization::get(&client(&server), &Context::background(), 404)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Huntress API error (404): Organization not found");
}

#[tokio::test]
async fn test_list_page_reads_body_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "organizations": [
                {"id": 1, "name": "Alpha"},
                {"id": 2, "name": "Beta"}
            ],
            "pagination": {"current_page": 1, "limit": 2, "total_count": 3, "next_page": 2}
        })))
        .mount(&server)
        .await;

    let page = Organization::list_page(&client(&server), &Context::background(), &(), 1, 2)
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.pagination.total_items, 3);
    assert_eq!(page.pagination.total_pages, 2);
    assert!(page.has_more());
}

#[tokio::test]
async fn test_list_all_follows_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/incident_reports"))
        .and(query_param("status", "sent"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "incident_reports": [{"id": 1, "status": "sent"}, {"id": 2, "status": "sent"}],
            "pagination": {"current_page": 1, "limit": 2, "total_count": 3}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/incident_reports"))
        .and(query_param("status", "sent"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "incident_reports": [{"id": 3, "status": "sent"}],
            "pagination": {"current_page": 2, "limit": 2, "total_count": 3}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = IncidentReportListQuery {
        status: Some("sent".to_string()),
        ..Default::default()
    };
    let reports = IncidentReport::list_all(&client(&server), &Context::background(), &query)
        .await
        .unwrap();

    let ids: Vec<u64> = reports.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(reports.iter().all(IncidentReport::is_open));
}

#[tokio::test]
async fn test_list_uses_header_pagination_without_body_object() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/agents"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Total-Pages", "4")
                .set_body_json(serde_json::json!({"agents": [{"id": 9, "hostname": "db-01"}]})),
        )
        .mount(&server)
        .await;

    let page = Agent::list_page(&client(&server), &Context::background(), &Default::default(), 2, 1)
        .await
        .unwrap();

    assert_eq!(page.pagination.page, 2);
    assert_eq!(page.pagination.per_page, 1);
    assert_eq!(page.pagination.next_page(), Some(3));
}
