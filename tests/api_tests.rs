use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;

use cinemate::api::{create_router, AppState};
use cinemate::catalog::{Catalog, MovieTable, SimilarityMatrix};
use cinemate::error::{AppError, AppResult};
use cinemate::models::{MovieRecord, POSTER_ERROR_PLACEHOLDER};
use cinemate::services::MetadataProvider;

/// Serves posters for every movie and trailers for even ids only
struct StubProvider;

#[async_trait::async_trait]
impl MetadataProvider for StubProvider {
    async fn fetch_poster(&self, movie_id: i64) -> AppResult<Option<String>> {
        Ok(Some(format!("https://img.test/{}.jpg", movie_id)))
    }

    async fn fetch_trailer(&self, movie_id: i64) -> AppResult<Option<String>> {
        Ok((movie_id % 2 == 0).then(|| format!("https://www.youtube.com/watch?v={}", movie_id)))
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Fails every lookup, as if TMDB were down
struct DownProvider;

#[async_trait::async_trait]
impl MetadataProvider for DownProvider {
    async fn fetch_poster(&self, _movie_id: i64) -> AppResult<Option<String>> {
        Err(AppError::ExternalApi("connection refused".to_string()))
    }

    async fn fetch_trailer(&self, _movie_id: i64) -> AppResult<Option<String>> {
        Err(AppError::ExternalApi("connection refused".to_string()))
    }

    fn name(&self) -> &'static str {
        "down"
    }
}

/// Answers lookups for `keep` only; any other movie crashes its enrichment task
struct CrashingProvider {
    keep: i64,
}

#[async_trait::async_trait]
impl MetadataProvider for CrashingProvider {
    async fn fetch_poster(&self, movie_id: i64) -> AppResult<Option<String>> {
        if movie_id != self.keep {
            panic!("poster lookup crashed for {}", movie_id);
        }
        Ok(None)
    }

    async fn fetch_trailer(&self, _movie_id: i64) -> AppResult<Option<String>> {
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "crashing"
    }
}

const TITLES: [&str; 7] = [
    "Avatar",
    "Aliens",
    "Titanic",
    "The Abyss",
    "Terminator 2",
    "True Lies",
    "Piranha II",
];

fn catalog() -> Arc<Catalog> {
    let movies = TITLES
        .iter()
        .enumerate()
        .map(|(i, title)| MovieRecord::new(i as i64 + 1, *title))
        .collect();
    let n = TITLES.len();
    let rows = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| if i == j { 1.0 } else { 1.0 / (2.0 + (i + j) as f64) })
                .collect()
        })
        .collect();

    Arc::new(
        Catalog::new(
            MovieTable::new(movies),
            SimilarityMatrix::from_rows(rows).unwrap(),
        )
        .unwrap(),
    )
}

fn create_test_server(provider: Arc<dyn MetadataProvider>) -> TestServer {
    let state = AppState::new(catalog(), provider);
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(Arc::new(StubProvider));
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_list_movies_in_table_order() {
    let server = create_test_server(Arc::new(StubProvider));

    let response = server.get("/api/v1/movies").await;
    response.assert_status_ok();

    let movies: Vec<Value> = response.json();
    assert_eq!(movies.len(), TITLES.len());
    assert_eq!(movies[0]["title"], "Avatar");
    assert_eq!(movies[0]["movie_id"], 1);
    assert_eq!(movies[6]["title"], "Piranha II");
}

#[tokio::test]
async fn test_recommendations() {
    let server = create_test_server(Arc::new(StubProvider));

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Avatar")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["movie"]["title"], "Avatar");
    assert_eq!(body["movie"]["poster_url"], "https://img.test/1.jpg");

    let recommendations = body["recommendations"].as_array().unwrap();
    let titles: Vec<&str> = recommendations
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec!["Aliens", "Titanic", "The Abyss", "Terminator 2", "True Lies"]
    );

    // Aliens has id 2, Titanic id 3
    assert_eq!(
        recommendations[0]["trailer_url"],
        "https://www.youtube.com/watch?v=2"
    );
    assert!(recommendations[1]["trailer_url"].is_null());
}

#[tokio::test]
async fn test_recommendations_unknown_title() {
    let server = create_test_server(Arc::new(StubProvider));

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Z")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("unknown title"));
}

#[tokio::test]
async fn test_recommendations_missing_title() {
    let server = create_test_server(Arc::new(StubProvider));

    let response = server.get("/api/v1/recommendations").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommendations_with_metadata_service_down() {
    let server = create_test_server(Arc::new(DownProvider));

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Titanic")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["movie"]["poster_url"], POSTER_ERROR_PLACEHOLDER);

    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 5);
    for rec in recommendations {
        assert_eq!(rec["poster_url"], POSTER_ERROR_PLACEHOLDER);
        assert!(rec["trailer_url"].is_null());
        assert_ne!(rec["title"], "Titanic");
    }
}

#[tokio::test]
async fn test_index_page() {
    let server = create_test_server(Arc::new(StubProvider));

    let response = server.get("/").await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains(r#"<option value="Avatar">"#));
    assert!(html.contains("Recommend"));
    assert!(!html.contains("Your Searched Movie"));
}

#[tokio::test]
async fn test_index_page_with_results() {
    let server = create_test_server(Arc::new(StubProvider));

    let response = server.get("/").add_query_param("movie", "Aliens").await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains("Your Searched Movie"));
    assert!(html.contains(r#"<option value="Aliens" selected>"#));
    assert!(html.contains("https://img.test/2.jpg"));
    assert!(html.contains("Watch Trailer"));
    assert!(html.contains("Trailer not available"));
}

#[tokio::test]
async fn test_index_page_unknown_title() {
    let server = create_test_server(Arc::new(StubProvider));

    let response = server.get("/").add_query_param("movie", "Z").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert!(response.text().contains("unknown title: Z"));
}

#[tokio::test]
async fn test_index_page_error_keeps_selection() {
    // Aliens has id 2
    let server = create_test_server(Arc::new(CrashingProvider { keep: 2 }));

    let response = server.get("/").add_query_param("movie", "Aliens").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let html = response.text();
    assert!(html.contains(r#"<option value="Aliens" selected>"#));
    assert!(!html.contains("Your Searched Movie"));
}

#[tokio::test]
async fn test_request_id_echoed() {
    let server = create_test_server(Arc::new(StubProvider));

    let id = "5b7c2c52-6f1e-4a52-9a53-0d3e1c0e8f11";
    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static(id),
        )
        .await;
    assert_eq!(response.header("x-request-id"), id);

    let response = server.get("/health").await;
    let generated = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(generated.to_str().unwrap()).is_ok());
}
