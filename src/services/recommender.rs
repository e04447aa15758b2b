use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::instrument;

use crate::{
    catalog::Catalog,
    error::{AppError, AppResult},
    models::{
        MovieRecord, Recommendation, SearchedMovie, NO_POSTER_PLACEHOLDER,
        POSTER_ERROR_PLACEHOLDER,
    },
    services::providers::MetadataProvider,
};

/// Number of similar movies returned per query
pub const RECOMMENDATION_COUNT: usize = 5;

/// Nearest-neighbor recommendations over the catalog's similarity matrix,
/// enriched with posters and trailers from a metadata provider
#[derive(Clone)]
pub struct Recommender {
    catalog: Arc<Catalog>,
    provider: Arc<dyn MetadataProvider>,
}

impl Recommender {
    pub fn new(catalog: Arc<Catalog>, provider: Arc<dyn MetadataProvider>) -> Self {
        Self { catalog, provider }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Row indices and scores of the movies most similar to `title`, best first
    pub fn rank(&self, title: &str) -> AppResult<Vec<(usize, f64)>> {
        let index = self.catalog.index_of(title)?;
        Ok(self.catalog.similar(index, RECOMMENDATION_COUNT))
    }

    /// The movies most similar to `title`, with display metadata
    ///
    /// Enrichment runs concurrently, one task per movie, and results keep rank
    /// order. A failed lookup degrades that movie's poster or trailer and never
    /// fails the request.
    #[instrument(skip(self), fields(provider = self.provider.name()))]
    pub async fn recommend(&self, title: &str) -> AppResult<Vec<Recommendation>> {
        let ranked = self.rank(title)?;

        // dropping the set aborts any lookups still in flight
        let mut tasks = JoinSet::new();
        for (position, (index, score)) in ranked.into_iter().enumerate() {
            let movie = self.movie_at(index)?.clone();
            let provider = self.provider.clone();
            tasks.spawn(async move {
                let (poster, trailer) = tokio::join!(
                    poster_or_placeholder(provider.as_ref(), movie.id),
                    trailer_or_none(provider.as_ref(), movie.id),
                );

                let recommendation = Recommendation {
                    movie_id: movie.id,
                    title: movie.title,
                    score,
                    poster_url: poster,
                    trailer_url: trailer,
                };
                (position, recommendation)
            });
        }

        let mut slots: Vec<Option<Recommendation>> = vec![None; tasks.len()];
        while let Some(joined) = tasks.join_next().await {
            let (position, recommendation) = joined
                .map_err(|e| AppError::Internal(format!("enrichment task failed: {}", e)))?;
            slots[position] = Some(recommendation);
        }
        let recommendations: Vec<Recommendation> = slots.into_iter().flatten().collect();

        tracing::info!(
            title = %title,
            results = recommendations.len(),
            "Recommendations computed"
        );

        Ok(recommendations)
    }

    /// The searched movie itself, with its poster
    pub async fn searched_movie(&self, title: &str) -> AppResult<SearchedMovie> {
        let index = self.catalog.index_of(title)?;
        let movie = self.movie_at(index)?;

        Ok(SearchedMovie {
            movie_id: movie.id,
            title: movie.title.clone(),
            poster_url: poster_or_placeholder(self.provider.as_ref(), movie.id).await,
        })
    }

    fn movie_at(&self, index: usize) -> AppResult<&MovieRecord> {
        self.catalog
            .movie(index)
            .ok_or_else(|| AppError::Internal(format!("catalog has no row {}", index)))
    }
}

async fn poster_or_placeholder(provider: &dyn MetadataProvider, movie_id: i64) -> String {
    match provider.fetch_poster(movie_id).await {
        Ok(Some(url)) => url,
        Ok(None) => NO_POSTER_PLACEHOLDER.to_string(),
        Err(e) => {
            tracing::warn!(movie_id, error = %e, "Poster lookup failed");
            POSTER_ERROR_PLACEHOLDER.to_string()
        }
    }
}

async fn trailer_or_none(provider: &dyn MetadataProvider, movie_id: i64) -> Option<String> {
    match provider.fetch_trailer(movie_id).await {
        Ok(trailer) => trailer,
        Err(e) => {
            tracing::warn!(movie_id, error = %e, "Trailer lookup failed");
            None
        }
    }
}
