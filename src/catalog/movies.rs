use serde::Deserialize;
use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::MovieRecord,
};

/// Column-oriented dump keyed by row index: `{"movie_id": {"0": 19995}, "title": {"0": "Avatar"}}`
#[derive(Debug, Deserialize)]
struct MovieColumns {
    movie_id: HashMap<String, i64>,
    title: HashMap<String, String>,
}

impl MovieColumns {
    fn into_records(self) -> AppResult<Vec<MovieRecord>> {
        if self.movie_id.len() != self.title.len() {
            return Err(AppError::Catalog(format!(
                "movie_id column has {} rows but title column has {}",
                self.movie_id.len(),
                self.title.len()
            )));
        }

        let mut titles = self.title;
        let mut rows = Vec::with_capacity(self.movie_id.len());

        for (key, id) in self.movie_id {
            let position: u64 = key
                .parse()
                .map_err(|_| AppError::Catalog(format!("row index '{}' is not a number", key)))?;
            let title = titles
                .remove(&key)
                .ok_or_else(|| AppError::Catalog(format!("row {} has no title", key)))?;
            rows.push((position, MovieRecord { id, title }));
        }

        rows.sort_by_key(|(position, _)| *position);
        Ok(rows.into_iter().map(|(_, movie)| movie).collect())
    }
}

/// The movie table, in row order, with an exact-match title index
#[derive(Debug, Clone)]
pub struct MovieTable {
    movies: Vec<MovieRecord>,
    by_title: HashMap<String, usize>,
}

impl MovieTable {
    pub fn new(movies: Vec<MovieRecord>) -> Self {
        let mut by_title = HashMap::with_capacity(movies.len());
        for (index, movie) in movies.iter().enumerate() {
            // duplicate titles resolve to their first row
            by_title.entry(movie.title.clone()).or_insert(index);
        }

        Self { movies, by_title }
    }

    /// Parses either a JSON array of `{"movie_id", "title"}` records or the
    /// column-oriented layout, picked by the first non-whitespace byte
    pub fn from_json(bytes: &[u8]) -> AppResult<Self> {
        let is_array = bytes
            .iter()
            .find(|b| !b.is_ascii_whitespace())
            .is_some_and(|b| *b == b'[');

        let movies = if is_array {
            serde_json::from_slice::<Vec<MovieRecord>>(bytes)?
        } else {
            serde_json::from_slice::<MovieColumns>(bytes)?.into_records()?
        };

        Ok(Self::new(movies))
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MovieRecord> {
        self.movies.get(index)
    }

    pub fn index_of(&self, title: &str) -> Option<usize> {
        self.by_title.get(title).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MovieRecord> {
        self.movies.iter()
    }
}
