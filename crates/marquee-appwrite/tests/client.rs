//! Integration tests for the Appwrite counter operations using wiremock.

use marquee_appwrite::{AppwriteClient, AppwriteError};
use marquee_core::{AppwriteSettings, MovieSnapshot};
use wiremock::matchers::{body_partial_json, header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOCUMENTS_PATH: &str = "/v1/databases/db1/collections/metrics/documents";

fn test_client(server_uri: &str) -> AppwriteClient {
    let settings = AppwriteSettings {
        endpoint: format!("{server_uri}/v1"),
        project_id: "proj".to_string(),
        database_id: "db1".to_string(),
        collection_id: "metrics".to_string(),
        api_key: "secret".to_string(),
    };
    AppwriteClient::new(&settings, 30).expect("client construction should not fail")
}

fn counter_doc(id: &str, term: &str, count: i64, updated_at: &str) -> serde_json::Value {
    serde_json::json!({
        "$id": id,
        "$createdAt": "2025-01-01T00:00:00.000+00:00",
        "$updatedAt": updated_at,
        "searchTerm": term,
        "count": count,
        "movie_id": 268,
        "title": "Batman",
        "poster_url": "https://image.tmdb.org/t/p/w500/batman.jpg"
    })
}

fn snapshot() -> MovieSnapshot<'static> {
    MovieSnapshot {
        movie_id: 268,
        title: "Batman",
        poster_url: Some("https://image.tmdb.org/t/p/w500/batman.jpg"),
    }
}

#[tokio::test]
async fn record_search_creates_missing_counter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DOCUMENTS_PATH))
        .and(query_param(
            "queries[]",
            r#"{"method":"equal","attribute":"searchTerm","values":["batman"]}"#,
        ))
        .and(header("x-appwrite-project", "proj"))
        .and(header("x-appwrite-key", "secret"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "total": 0, "documents": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(DOCUMENTS_PATH))
        .and(body_partial_json(serde_json::json!({
            "data": { "searchTerm": "batman", "count": 1, "movie_id": 268, "title": "Batman" }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(counter_doc(
            "new1",
            "batman",
            1,
            "2025-01-02T00:00:00.000+00:00",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let count = client
        .record_search("  Batman ", snapshot())
        .await
        .expect("record should succeed");

    assert_eq!(count.search_term, "batman");
    assert_eq!(count.count, 1);
}

#[tokio::test]
async fn record_search_increments_existing_counter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DOCUMENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total": 1,
            "documents": [counter_doc("abc", "batman", 4, "2025-01-02T00:00:00.000+00:00")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(format!("{DOCUMENTS_PATH}/abc")))
        .and(body_partial_json(serde_json::json!({ "data": { "count": 5 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(counter_doc(
            "abc",
            "batman",
            5,
            "2025-01-03T00:00:00.000+00:00",
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(DOCUMENTS_PATH))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let count = client
        .record_search("batman", snapshot())
        .await
        .expect("record should succeed");

    assert_eq!(count.count, 5);
}

#[tokio::test]
async fn record_search_rejects_blank_term_without_calling_appwrite() {
    let server = MockServer::start().await;
    Mock::given(path_regex(".*"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.record_search(" \t ", snapshot()).await;
    assert!(matches!(result, Err(AppwriteError::EmptySearchTerm)));
}

#[tokio::test]
async fn list_trending_orders_by_count_then_recency() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DOCUMENTS_PATH))
        .and(query_param(
            "queries[]",
            r#"{"method":"orderDesc","attribute":"count"}"#,
        ))
        .and(query_param("queries[]", r#"{"method":"limit","values":[3]}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total": 3,
            "documents": [
                counter_doc("a", "dune", 7, "2025-01-01T00:00:00.000+00:00"),
                counter_doc("b", "alien", 3, "2025-01-01T00:00:00.000+00:00"),
                counter_doc("c", "batman", 7, "2025-01-05T00:00:00.000+00:00"),
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let trending = client.list_trending(3).await.expect("list should succeed");

    let terms: Vec<&str> = trending.iter().map(|c| c.search_term.as_str()).collect();
    assert_eq!(terms, vec!["batman", "dune", "alien"]);
}

#[tokio::test]
async fn list_trending_zero_limit_skips_request() {
    let server = MockServer::start().await;
    Mock::given(path_regex(".*"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let trending = client.list_trending(0).await.expect("zero limit is not an error");
    assert!(trending.is_empty());
}

#[tokio::test]
async fn api_error_body_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DOCUMENTS_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "The current user is not authorized to perform the requested action.",
            "code": 401,
            "type": "user_unauthorized",
            "version": "1.5.7"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.list_trending(5).await.unwrap_err();

    match err {
        AppwriteError::Api {
            status,
            kind,
            message,
        } => {
            assert_eq!(status, 401);
            assert_eq!(kind, "user_unauthorized");
            assert!(message.contains("not authorized"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_document_list_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DOCUMENTS_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "documents": "nope" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.list_trending(5).await.unwrap_err();
    assert!(matches!(err, AppwriteError::Deserialize { .. }));
}
