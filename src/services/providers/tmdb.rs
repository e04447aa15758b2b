/// TMDB (The Movie Database) provider
///
/// API Flow:
/// 1. Poster: /movie/{id} → `poster_path`, appended to the image base URL
/// 2. Trailer: /movie/{id}/videos → first YouTube entry of type "Trailer"
use crate::{
    error::{AppError, AppResult},
    models::{TmdbMovieDetails, TmdbVideoList},
    services::providers::MetadataProvider,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

const LANGUAGE: &str = "en-US";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_url: String,
}

impl TmdbProvider {
    pub fn new(http_client: HttpClient, api_key: String, api_url: String, image_url: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            image_url: image_url.trim_end_matches('/').to_string(),
        }
    }

    /// Joins a TMDB `poster_path` onto the image base URL
    fn poster_url(&self, poster_path: &str) -> String {
        format!("{}/{}", self.image_url, poster_path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::debug!(error = %e, response = %response_text, "Failed to deserialize TMDB response");
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn fetch_poster(&self, movie_id: i64) -> AppResult<Option<String>> {
        let details: TmdbMovieDetails = self
            .get_json(&format!("/movie/{}", movie_id), &[("language", LANGUAGE)])
            .await?;

        let poster = details
            .poster_path
            .filter(|path| !path.is_empty())
            .map(|path| self.poster_url(&path));

        tracing::debug!(movie_id, found = poster.is_some(), provider = "tmdb", "Poster fetched");

        Ok(poster)
    }

    async fn fetch_trailer(&self, movie_id: i64) -> AppResult<Option<String>> {
        let videos: TmdbVideoList = self
            .get_json(&format!("/movie/{}/videos", movie_id), &[])
            .await?;

        let trailer = videos.trailer_url();

        tracing::debug!(movie_id, found = trailer.is_some(), provider = "tmdb", "Trailer fetched");

        Ok(trailer)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
