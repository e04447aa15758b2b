use serde::{Deserialize, Serialize};

pub mod movie;

pub use movie::MovieRecord;

/// Shown when TMDB has no poster for a movie
pub const NO_POSTER_PLACEHOLDER: &str = "https://via.placeholder.com/200x300?text=No+Poster";

/// Shown when the poster lookup itself failed
pub const POSTER_ERROR_PLACEHOLDER: &str = "https://via.placeholder.com/200x300?text=Error";

/// A recommended movie with display metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub movie_id: i64,
    pub title: String,
    /// Similarity to the searched movie
    pub score: f64,
    /// Poster image URL, or one of the placeholder URLs
    pub poster_url: String,
    pub trailer_url: Option<String>,
}

/// The movie the user searched for, shown above its recommendations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchedMovie {
    pub movie_id: i64,
    pub title: String,
    pub poster_url: String,
}

/// Response body for the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub movie: SearchedMovie,
    pub recommendations: Vec<Recommendation>,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Subset of `GET /movie/{id}` that we use
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Response of `GET /movie/{id}/videos`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideoList {
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    #[serde(rename = "type", default)]
    pub video_type: Option<String>,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
}

impl TmdbVideo {
    pub fn is_youtube_trailer(&self) -> bool {
        self.video_type.as_deref() == Some("Trailer") && self.site.as_deref() == Some("YouTube")
    }
}

impl TmdbVideoList {
    /// YouTube watch URL of the first YouTube trailer in the list
    pub fn trailer_url(&self) -> Option<String> {
        self.results
            .iter()
            .find(|video| video.is_youtube_trailer())
            .and_then(|video| video.key.as_deref())
            .map(|key| format!("https://www.youtube.com/watch?v={}", key))
    }
}
