//! Integration tests for `TmdbClient` using wiremock HTTP mocks.

use marquee_tmdb::{TmdbClient, TmdbError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> TmdbClient {
    TmdbClient::with_base_url("test-key", 30, &format!("{base_url}/3"))
        .expect("client construction should not fail")
}

fn movie_page(titles: &[(&str, i64)]) -> serde_json::Value {
    let results: Vec<serde_json::Value> = titles
        .iter()
        .map(|(title, id)| {
            serde_json::json!({
                "id": id,
                "title": title,
                "poster_path": format!("/{id}.jpg"),
                "popularity": 10.5,
                "vote_average": 7.1,
                "release_date": "2022-03-01",
                "original_language": "en"
            })
        })
        .collect();

    serde_json::json!({
        "page": 1,
        "results": results,
        "total_pages": 1,
        "total_results": titles.len()
    })
}

#[tokio::test]
async fn empty_query_calls_discover_sorted_by_popularity() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/discover/movie"))
        .and(query_param("sort_by", "popularity.desc"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(movie_page(&[("Dune: Part Two", 693_134), ("Civil War", 929_590)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let movies = client.fetch_movies(None).await.expect("discover should parse");

    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].title, "Dune: Part Two");
    assert_eq!(movies[0].id, 693_134);
    assert_eq!(movies[0].poster_path.as_deref(), Some("/693134.jpg"));
}

#[tokio::test]
async fn blank_query_is_treated_as_discover() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/discover/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_page(&[("Alien", 348)])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let movies = client
        .fetch_movies(Some("   "))
        .await
        .expect("discover should parse");
    assert_eq!(movies.len(), 1);
}

#[tokio::test]
async fn non_empty_query_calls_search_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .and(query_param("query", "batman"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_page(&[
            ("Batman", 268),
            ("Batman Returns", 364),
            ("The Batman", 414_906),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let movies = client
        .fetch_movies(Some("batman"))
        .await
        .expect("search should parse");

    assert_eq!(movies.len(), 3);
    assert_eq!(movies[0].title, "Batman");
}

#[tokio::test]
async fn search_query_with_spaces_is_decoded_by_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .and(query_param("query", "the dark knight"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_page(&[(
            "The Dark Knight",
            155,
        )])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let movies = client
        .search_movies("the dark knight")
        .await
        .expect("search should parse");
    assert_eq!(movies[0].id, 155);
}

#[tokio::test]
async fn server_error_maps_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/discover/movie"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_movies(None).await.unwrap_err();

    assert!(
        matches!(err, TmdbError::UnexpectedStatus { status: 500, .. }),
        "expected UnexpectedStatus(500), got: {err:?}"
    );
    assert_eq!(err.user_message(), "Failed to fetch movies");
}

#[tokio::test]
async fn unauthorized_maps_to_generic_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "success": false,
            "status_code": 7,
            "status_message": "Invalid API key: You must be granted a valid key."
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search_movies("alien").await.unwrap_err();
    assert!(matches!(err, TmdbError::UnexpectedStatus { status: 401, .. }));
    assert_eq!(err.user_message(), "Failed to fetch movies");
}

#[tokio::test]
async fn soft_failure_in_ok_body_surfaces_service_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Response": "False",
            "Error": "Too many results."
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search_movies("a").await.unwrap_err();

    assert!(matches!(err, TmdbError::ApiError(ref m) if m == "Too many results."));
    assert_eq!(err.user_message(), "Too many results.");
}

#[tokio::test]
async fn missing_results_field_yields_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/discover/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "page": 1 })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let movies = client.discover_movies().await.expect("should parse");
    assert!(movies.is_empty());
}

#[tokio::test]
async fn non_json_body_maps_to_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/discover/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.discover_movies().await.unwrap_err();
    assert!(matches!(err, TmdbError::Deserialize { .. }));
    assert_eq!(err.user_message(), "Failed to fetch movies");
}

#[tokio::test]
async fn connection_failure_maps_to_http_error() {
    // Nothing listens on port 1.
    let client = TmdbClient::with_base_url("test-key", 5, "http://127.0.0.1:1/3")
        .expect("client construction should not fail");
    let err = client.discover_movies().await.unwrap_err();
    assert!(matches!(err, TmdbError::Http(_)), "got: {err:?}");
    assert_eq!(err.user_message(), "Failed to fetch movies");
}

#[tokio::test]
async fn incomplete_entry_does_not_reject_the_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/discover/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "page": 1,
            "results": [
                { "id": 1, "title": "Dune" },
                { "id": 2, "title": null }
            ]
        })))
        .mount(&server)
        .await;

    let movies = test_client(&server.uri())
        .fetch_movies(None)
        .await
        .expect("incomplete entry should not fail the listing");

    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].title, "Dune");
    assert_eq!(movies[1].id, 2);
    assert!(movies[1].title.is_empty());
}
