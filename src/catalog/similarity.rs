use crate::error::{AppError, AppResult};

/// Square matrix of precomputed pairwise similarity scores, stored row-major
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    size: usize,
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Builds the matrix from rows, checking that it is square, finite, and
    /// that every row peaks at its own diagonal entry
    pub fn from_rows(rows: Vec<Vec<f64>>) -> AppResult<Self> {
        let size = rows.len();
        let mut scores = Vec::with_capacity(size * size);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(AppError::Catalog(format!(
                    "similarity matrix is not square: row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    size
                )));
            }

            if let Some(j) = row.iter().position(|score| !score.is_finite()) {
                return Err(AppError::Catalog(format!(
                    "similarity[{}][{}] is not a finite number",
                    i, j
                )));
            }

            let own = row[i];
            if let Some((j, score)) = row.iter().enumerate().find(|(_, score)| **score > own) {
                return Err(AppError::Catalog(format!(
                    "similarity[{i}][{j}] = {score} exceeds self-similarity similarity[{i}][{i}] = {own}"
                )));
            }

            scores.extend(row);
        }

        Ok(Self { size, scores })
    }

    pub fn from_json(bytes: &[u8]) -> AppResult<Self> {
        let rows: Vec<Vec<f64>> = serde_json::from_slice(bytes)?;
        Self::from_rows(rows)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index >= self.size {
            return None;
        }
        let start = index * self.size;
        Some(&self.scores[start..start + self.size])
    }

    /// Other rows ordered by descending similarity to `index`
    ///
    /// Equal scores keep column order. The row itself is left out by index,
    /// so a tie with the diagonal never returns the query movie.
    pub fn ranked(&self, index: usize) -> Vec<(usize, f64)> {
        let Some(row) = self.row(index) else {
            return Vec::new();
        };

        let mut ranked: Vec<(usize, f64)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|(other, _)| *other != index)
            .collect();

        // sort_by is stable
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}
