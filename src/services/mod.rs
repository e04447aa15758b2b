pub mod providers;
pub mod recommender;

pub use providers::{MetadataProvider, TmdbProvider};
pub use recommender::{Recommender, RECOMMENDATION_COUNT};
