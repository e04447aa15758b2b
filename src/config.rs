use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key used for poster and trailer lookups
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base URL that poster paths are appended to
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    /// Movie table on disk
    #[serde(default = "default_movies_path")]
    pub movies_path: PathBuf,

    /// Similarity matrix on disk
    #[serde(default = "default_similarity_path")]
    pub similarity_path: PathBuf,

    /// Where to download the movie table from when it is missing
    #[serde(default)]
    pub movies_url: Option<String>,

    /// Where to download the similarity matrix from when it is missing
    #[serde(default)]
    pub similarity_url: Option<String>,

    /// Per-request timeout for outbound HTTP calls
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_movies_path() -> PathBuf {
    PathBuf::from("movies.json")
}

fn default_similarity_path() -> PathBuf {
    PathBuf::from("similarity.json")
}

fn default_http_timeout_secs() -> u64 {
    10
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables, reading `.env` first if present
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars).map_err(|e| match e {
            envy::Error::MissingValue(field) if field == "tmdb_api_key" => {
                anyhow::anyhow!("TMDB API key is missing. Set TMDB_API_KEY in the environment or a .env file")
            }
            other => anyhow::anyhow!("Failed to load config: {}", other),
        })?;

        if config.tmdb_api_key.trim().is_empty() {
            anyhow::bail!("TMDB API key is missing. Set TMDB_API_KEY in the environment or a .env file");
        }

        Ok(config)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
