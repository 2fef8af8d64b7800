//! TMDB client for currently playing movies.
//!
//! See: <https://developer.themoviedb.org/reference/movie-now-playing-list>

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::future::try_join_all;
use reqwest::Client;
use tracing::debug;

use super::check_status;
use crate::cache::{DEFAULT_TTL, TtlCache};
use crate::telemetry;
use crate::types::{Movie, MoviePage};
use crate::{CourierError, Result};

/// Default base URL for the TMDB v3 API
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Pages of now-playing results pooled per fetch.
const NOW_PLAYING_PAGES: [u32; 2] = [1, 2];

const PROVIDER: &str = "tmdb";

/// Client for the TMDB API.
///
/// The key is optional at construction so the rest of courier works
/// without one; movie operations then fail with a configuration error.
pub struct TmdbClient {
    api_key: Option<String>,
    http: Client,
    base_url: String,
    now_playing: TtlCache<Vec<Movie>>,
}

impl TmdbClient {
    /// Create a client against the public API.
    pub fn new(http: Client, api_key: Option<String>) -> Self {
        Self::with_base_url(http, api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(
        http: Client,
        api_key: Option<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            now_playing: TtlCache::new("now_playing", DEFAULT_TTL),
        }
    }

    /// Set how long the now-playing list stays fresh.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.now_playing = TtlCache::new("now_playing", ttl);
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Rated now-playing movies from the first two result pages.
    ///
    /// Served from cache when fresh. Movies with no votes are dropped.
    pub async fn fetch_now_playing(&self) -> Result<Arc<Vec<Movie>>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            CourierError::Configuration("missing TMDB API key (TMDB_API_KEY)".to_string())
        })?;
        self.now_playing
            .get_or_fetch(|| self.request_now_playing(api_key))
            .await
    }

    async fn request_now_playing(&self, api_key: &str) -> Result<Vec<Movie>> {
        let pages = try_join_all(
            NOW_PLAYING_PAGES
                .iter()
                .map(|page| self.request_page(api_key, *page)),
        )
        .await?;

        let movies: Vec<Movie> = pages
            .into_iter()
            .flat_map(|page| page.results)
            .filter(|movie| movie.vote_average > 0.0)
            .collect();
        debug!(count = movies.len(), "fetched now playing movies");
        Ok(movies)
    }

    async fn request_page(&self, api_key: &str, page: u32) -> Result<MoviePage> {
        let started = Instant::now();
        let result = self.get_page(api_key, page).await;
        telemetry::record_request(PROVIDER, "now_playing", result.is_ok(), started.elapsed());
        result
    }

    async fn get_page(&self, api_key: &str, page: u32) -> Result<MoviePage> {
        let url = format!("{}/movie/now_playing", self.base_url);
        let page = page.to_string();
        let response = self
            .http
            .get(&url)
            .query(&[
                ("api_key", api_key),
                ("language", "en-US"),
                ("page", page.as_str()),
            ])
            .send()
            .await?;
        let response = check_status(response, None).await?;
        Ok(response.json().await?)
    }
}
