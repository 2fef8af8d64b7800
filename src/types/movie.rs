//! TMDB movie schema and the card shown to users.

use serde::{Deserialize, Serialize};

/// Base URL for w500 poster images.
pub const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

/// One page of TMDB's `/movie/now_playing`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoviePage {
    #[serde(default)]
    pub results: Vec<Movie>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Movie {
    #[serde(default)]
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieCard {
    pub title: String,
    pub overview: String,
    pub release_date: Option<String>,
    pub rating: f64,
    pub poster_url: Option<String>,
}
