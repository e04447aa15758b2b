/// Movie metadata provider abstraction
///
/// The recommender only needs two pieces of display metadata per movie, a
/// poster and a trailer. Providers return `Ok(None)` when the movie simply has
/// neither and `Err` when the lookup itself failed; the caller decides how to
/// degrade.
use crate::error::AppResult;

pub mod tmdb;

pub use tmdb::TmdbProvider;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Full poster image URL for a movie, if it has one
    async fn fetch_poster(&self, movie_id: i64) -> AppResult<Option<String>>;

    /// Watch URL of the movie's first YouTube trailer, if it has one
    async fn fetch_trailer(&self, movie_id: i64) -> AppResult<Option<String>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
