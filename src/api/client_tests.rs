//! Tests for the metadata API client.

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::MovieApi;
use crate::config::{ApiConfig, HOST_HEADER, KEY_HEADER};
use crate::error::{Error, ErrorKind};

fn api_for(server: &MockServer) -> MovieApi {
    let config = ApiConfig::new("imdb8.p.rapidapi.com", "test-key")
        .unwrap()
        .with_user_agent("moviedex-tests")
        .unwrap()
        .with_base_url(&server.uri())
        .unwrap();
    MovieApi::new(config)
}

/// Base URL of a port nothing is listening on
fn refused_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

// ── request shape ────────────────────────────────────────────────────

#[tokio::test]
async fn test_search_sends_auth_headers_and_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/title/auto-complete"))
        .and(query_param("q", "inception"))
        .and(header(HOST_HEADER, "imdb8.p.rapidapi.com"))
        .and(header(KEY_HEADER, "test-key"))
        .and(header("user-agent", "moviedex-tests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "d": [
                {"id": "tt1375666", "l": "Inception", "q": "feature", "y": 2010},
                {"id": "tt5295894", "l": "Inception: The Cobol Job", "q": "video", "y": 2010}
            ],
            "q": "inception",
            "v": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let hits = api_for(&mock_server).search("inception").await.unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].title, "Inception");
    assert_eq!(hits[1].title_type, "video");
}

#[tokio::test]
async fn test_search_title_ids_keeps_rank_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/title/auto-complete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "d": [{"id": "tt001", "l": "A"}, {"id": "tt002", "l": "B"}]
        })))
        .mount(&mock_server)
        .await;

    let ids = api_for(&mock_server).search_title_ids("x").await.unwrap();
    assert_eq!(ids, vec!["tt001", "tt002"]);
}

#[tokio::test]
async fn test_popular_titles_extracts_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/title/get-most-popular-movies"))
        .and(query_param("currentCountry", "IN"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!(["/title/tt001/", "/title/tt002/"])),
        )
        .mount(&mock_server)
        .await;

    let ids = api_for(&mock_server).popular_titles("IN").await.unwrap();
    assert_eq!(ids, vec!["tt001", "tt002"]);
}

#[tokio::test]
async fn test_coming_soon_extracts_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/title/get-coming-soon-movies"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!(["/title/tt900/"])),
        )
        .mount(&mock_server)
        .await;

    let ids = api_for(&mock_server).coming_soon().await.unwrap();
    assert_eq!(ids, vec!["tt900"]);
}

#[tokio::test]
async fn test_meta_data_sends_repeated_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/title/get-meta-data"))
        .and(query_param("ids", "tt001"))
        .and(query_param("ids", "tt002"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "tt001": {"title": {"title": "One", "titleType": "movie", "year": 2001}},
            "tt002": {"title": {"title": "Two", "titleType": "movie", "year": 2002}}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ids = vec!["tt001".to_string(), "tt002".to_string()];
    let details = api_for(&mock_server).title_meta_data(&ids).await.unwrap();
    let titles: Vec<&str> = details.iter().map(|d| d.title()).collect();
    assert_eq!(titles, vec!["One", "Two"]);
}

#[tokio::test]
async fn test_overview_uses_tconst() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/title/get-overview-details"))
        .and(query_param("tconst", "tt0111161"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "/title/tt0111161/",
            "title": {"title": "The Shawshank Redemption", "runningTimeInMinutes": 142},
            "ratings": {"rating": 9.3},
            "genres": ["Drama"],
            "releaseDate": "1994-14-10"
        })))
        .mount(&mock_server)
        .await;

    let detail = api_for(&mock_server)
        .title_overview("tt0111161")
        .await
        .unwrap();
    assert_eq!(detail.id(), "tt0111161");
    assert_eq!(detail.runtime_label(), "2h 22m");
    assert_eq!(detail.rating_label(), "9.3");
    assert_eq!(detail.release_year(), "1994");
}

#[tokio::test]
async fn test_top_cast_extracts_name_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/title/get-top-cast"))
        .and(query_param("tconst", "tt0111161"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!(["/name/nm0000209/", "/name/nm0000151/"])),
        )
        .mount(&mock_server)
        .await;

    let cast = api_for(&mock_server).top_cast("tt0111161").await.unwrap();
    assert_eq!(cast, vec!["nm0000209", "nm0000151"]);
}

#[tokio::test]
async fn test_filmography_uses_nconst() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/actors/get-all-filmography"))
        .and(query_param("nconst", "nm0000209"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "/name/nm0000209/",
            "base": {"id": "/name/nm0000209/", "name": "Tim Robbins"},
            "filmography": [
                {"category": "actor", "title": "The Shawshank Redemption", "titleType": "movie", "year": 1994}
            ]
        })))
        .mount(&mock_server)
        .await;

    let films = api_for(&mock_server)
        .actor_filmography("nm0000209")
        .await
        .unwrap();
    assert_eq!(films.actor.id, "nm0000209");
    assert_eq!(films.actor.name, "Tim Robbins");
    assert_eq!(films.entries.len(), 1);
}

// ── error taxonomy ───────────────────────────────────────────────────

#[tokio::test]
async fn test_http_429_is_rate_limited_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/title/get-coming-soon-movies"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "message": "You have exceeded the MONTHLY quota"
        })))
        .mount(&mock_server)
        .await;

    let err = api_for(&mock_server).coming_soon().await.unwrap_err();
    assert!(err.is_rate_limited());
    assert_eq!(err.kind(), ErrorKind::Api);
}

#[tokio::test]
async fn test_http_500_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    match api_for(&mock_server).top_cast("tt1").await {
        Err(Error::HttpStatus(status)) => {
            assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        }
        other => panic!("Expected Error::HttpStatus(500), got: {other:?}"),
    }
}

#[tokio::test]
async fn test_schema_mismatch_on_200_is_decoding_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/title/auto-complete"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "ok"})),
        )
        .mount(&mock_server)
        .await;

    let err = api_for(&mock_server).search("x").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decoding);
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let config = ApiConfig::new("imdb8.p.rapidapi.com", "test-key")
        .unwrap()
        .with_base_url(&refused_base_url())
        .unwrap();
    let api = MovieApi::new(config);

    let err = api.coming_soon().await.unwrap_err();
    assert!(matches!(err, Error::Network(_)), "got: {err:?}");
    assert_eq!(err.kind(), ErrorKind::Network);
}

// ── fetch_bytes ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_bytes_does_not_leak_api_key() {
    let mock_server = MockServer::start().await;
    let image_bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];

    Mock::given(method("GET"))
        .and(path("/poster.jpg"))
        .and(header("user-agent", "moviedex-tests"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(image_bytes.clone()))
        .mount(&mock_server)
        .await;

    let url = format!("{}/poster.jpg", mock_server.uri());
    let bytes = api_for(&mock_server).fetch_bytes(&url).await.unwrap();
    assert_eq!(bytes, image_bytes);

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(!received[0].headers.contains_key(KEY_HEADER));
}

#[tokio::test]
async fn test_fetch_bytes_404_is_http_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/missing.jpg", mock_server.uri());
    match api_for(&mock_server).fetch_bytes(&url).await {
        Err(Error::HttpStatus(status)) => assert_eq!(status, reqwest::StatusCode::NOT_FOUND),
        other => panic!("Expected Error::HttpStatus(404), got: {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_bytes_invalid_url_is_decoding_error() {
    let mock_server = MockServer::start().await;
    let err = api_for(&mock_server)
        .fetch_bytes("not a url")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decoding);
}
