use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::MovieRecord,
};

pub mod bootstrap;
pub mod movies;
pub mod similarity;

pub use bootstrap::ensure_asset;
pub use movies::MovieTable;
pub use similarity::SimilarityMatrix;

/// The movie table and its similarity matrix, loaded once and read-only afterwards
#[derive(Debug, Clone)]
pub struct Catalog {
    movies: MovieTable,
    similarity: SimilarityMatrix,
}

impl Catalog {
    /// Pairs a movie table with its matrix; both must describe the same rows
    pub fn new(movies: MovieTable, similarity: SimilarityMatrix) -> AppResult<Self> {
        if movies.is_empty() {
            return Err(AppError::Catalog("movie table is empty".to_string()));
        }

        if movies.len() != similarity.size() {
            return Err(AppError::Catalog(format!(
                "movie table has {} rows but similarity matrix is {}x{}",
                movies.len(),
                similarity.size(),
                similarity.size()
            )));
        }

        Ok(Self { movies, similarity })
    }

    /// Reads both data files from disk
    pub async fn load(movies_path: &Path, similarity_path: &Path) -> AppResult<Self> {
        let movies = read_with(movies_path, MovieTable::from_json).await?;
        let similarity = read_with(similarity_path, SimilarityMatrix::from_json).await?;

        let catalog = Self::new(movies, similarity)?;

        tracing::info!(
            movies = catalog.len(),
            movies_path = %movies_path.display(),
            similarity_path = %similarity_path.display(),
            "Catalog loaded"
        );

        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn movies(&self) -> impl Iterator<Item = &MovieRecord> {
        self.movies.iter()
    }

    pub fn movie(&self, index: usize) -> Option<&MovieRecord> {
        self.movies.get(index)
    }

    /// Row index of the first movie whose title matches exactly
    pub fn index_of(&self, title: &str) -> AppResult<usize> {
        self.movies
            .index_of(title)
            .ok_or_else(|| AppError::NotFound(format!("unknown title: {}", title)))
    }

    /// The `limit` most similar other movies, most similar first
    pub fn similar(&self, index: usize, limit: usize) -> Vec<(usize, f64)> {
        let mut ranked = self.similarity.ranked(index);
        ranked.truncate(limit);
        ranked
    }
}

async fn read_with<T>(path: &Path, parse: fn(&[u8]) -> AppResult<T>) -> AppResult<T> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        AppError::Catalog(format!("failed to read {}: {}", path.display(), e))
    })?;

    parse(&bytes).map_err(|e| match e {
        AppError::Catalog(msg) => AppError::Catalog(format!("{}: {}", path.display(), msg)),
        other => AppError::Catalog(format!("{}: {}", path.display(), other)),
    })
}
