use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::RequestId;
use crate::models::{MovieRecord, RecommendationResponse};

use super::page::{render_page, PageBody};
use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub movie: Option<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// All catalog movies in table order
pub async fn list_movies(State(state): State<AppState>) -> Json<Vec<MovieRecord>> {
    Json(state.catalog().movies().cloned().collect())
}

/// Similar movies for a title, as JSON
pub async fn recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let title = params
        .title
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::InvalidInput("title is required".to_string()))?;

    tracing::info!(request_id = %request_id, title = %title, "Processing recommendation request");

    let response = build_response(&state, &title).await?;
    Ok(Json(response))
}

/// The HTML page, with results when `movie` is given
pub async fn index(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<PageQuery>,
) -> Response {
    let Some(title) = params.movie.filter(|m| !m.is_empty()) else {
        return Html(render_page(state.catalog().movies(), None, PageBody::Empty)).into_response();
    };

    tracing::info!(request_id = %request_id, title = %title, "Rendering recommendations page");

    match build_response(&state, &title).await {
        Ok(response) => Html(render_page(
            state.catalog().movies(),
            Some(title.as_str()),
            PageBody::Results(&response),
        ))
        .into_response(),
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Recommendation failed");
            let message = e.to_string();
            (
                e.status_code(),
                Html(render_page(
                    state.catalog().movies(),
                    Some(title.as_str()),
                    PageBody::Error(&message),
                )),
            )
                .into_response()
        }
    }
}

async fn build_response(state: &AppState, title: &str) -> AppResult<RecommendationResponse> {
    let recommender = &state.recommender;
    let (movie, recommendations) =
        tokio::try_join!(recommender.searched_movie(title), recommender.recommend(title))?;

    Ok(RecommendationResponse {
        movie,
        recommendations,
    })
}
