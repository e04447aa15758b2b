use serde::{Deserialize, Serialize};

/// A movie from the catalog
///
/// Its identity within the catalog is its row position, which is also its
/// row and column in the similarity matrix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieRecord {
    /// TMDB movie id
    #[serde(rename = "movie_id")]
    pub id: i64,
    /// Display title, matched exactly on lookup
    pub title: String,
}

impl MovieRecord {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_movie() {
        let movie = MovieRecord::new(19995, "Avatar");
        assert_eq!(movie.id, 19995);
        assert_eq!(movie.title, "Avatar");
    }

    #[test]
    fn test_deserialize_ignores_tags() {
        let json = r#"{"movie_id": 285, "title": "Pirates of the Caribbean: At World's End", "tags": "captain barbossa"}"#;
        let movie: MovieRecord = serde_json::from_str(json).unwrap();
        assert_eq!(movie, MovieRecord::new(285, "Pirates of the Caribbean: At World's End"));
    }

    #[test]
    fn test_serialize_uses_movie_id() {
        let value = serde_json::to_value(MovieRecord::new(1, "A")).unwrap();
        assert_eq!(value["movie_id"], 1);
        assert_eq!(value["title"], "A");
    }

    #[test]
    fn test_movie_id_wins_over_id() {
        let json = r#"{"id": 7, "movie_id": 19995, "title": "Avatar"}"#;
        let movie: MovieRecord = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 19995);
    }
}
