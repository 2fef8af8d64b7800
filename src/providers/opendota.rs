//! OpenDota API client for hero statistics and match details.
//!
//! See: <https://docs.opendota.com/>

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::check_status;
use super::traits::MatchSource;
use crate::cache::{DEFAULT_TTL, TtlCache};
use crate::telemetry;
use crate::types::{HeroStat, MatchDetail};
use crate::{CourierError, Result};

/// Default base URL for the OpenDota API
pub const DEFAULT_BASE_URL: &str = "https://api.opendota.com";

const PROVIDER: &str = "opendota";

/// Client for the OpenDota API.
///
/// The hero stats list is memoized for the cache TTL; match details are
/// fetched fresh on every call.
pub struct OpenDotaClient {
    http: Client,
    base_url: String,
    hero_stats: TtlCache<Vec<HeroStat>>,
}

impl OpenDotaClient {
    /// Create a client against the public API.
    pub fn new(http: Client) -> Self {
        Self::with_base_url(http, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            hero_stats: TtlCache::new("hero_stats", DEFAULT_TTL),
        }
    }

    /// Set how long the hero stats list stays fresh.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.hero_stats = TtlCache::new("hero_stats", ttl);
        self
    }

    /// All heroes with public pick/win counters, served from cache when fresh.
    pub async fn fetch_hero_stats(&self) -> Result<Arc<Vec<HeroStat>>> {
        self.hero_stats
            .get_or_fetch(|| self.request_hero_stats())
            .await
    }

    async fn request_hero_stats(&self) -> Result<Vec<HeroStat>> {
        let started = Instant::now();
        let result = self.get_hero_stats().await;
        telemetry::record_request(PROVIDER, "hero_stats", result.is_ok(), started.elapsed());
        result
    }

    async fn get_hero_stats(&self) -> Result<Vec<HeroStat>> {
        let url = format!("{}/api/heroStats", self.base_url);
        let response = self.http.get(&url).send().await?;
        let response = check_status(response, None).await?;
        let heroes: Vec<HeroStat> = response.json().await?;
        debug!(count = heroes.len(), "fetched hero stats");
        Ok(heroes)
    }

    /// Full detail for one match. Never cached.
    ///
    /// `match_id` stays a string end to end so large ids keep their
    /// precision; it must be a non-empty run of ASCII digits.
    pub async fn fetch_match(&self, match_id: &str) -> Result<MatchDetail> {
        let match_id = validate_match_id(match_id)?;
        let started = Instant::now();
        let result = self.get_match(match_id).await;
        telemetry::record_request(PROVIDER, "match", result.is_ok(), started.elapsed());
        result
    }

    async fn get_match(&self, match_id: &str) -> Result<MatchDetail> {
        let url = format!("{}/api/matches/{}", self.base_url, match_id);
        let response = self.http.get(&url).send().await?;
        let response = check_status(response, Some(not_found(match_id))).await?;
        let body: serde_json::Value = response.json().await?;
        parse_match(match_id, body)
    }
}

/// OpenDota answers unknown matches with `{"error": "..."}`, sometimes
/// with a 200 status.
fn parse_match(match_id: &str, body: serde_json::Value) -> Result<MatchDetail> {
    if let Some(error) = body.get("error") {
        debug!(match_id, error = %error, "upstream reported match error");
        return Err(not_found(match_id));
    }
    serde_json::from_value(body)
        .map_err(|e| CourierError::Parse(format!("match {match_id}: {e}")))
}

fn not_found(match_id: &str) -> CourierError {
    CourierError::NotFound(format!("match {match_id}"))
}

/// Trim and check a match id; returns the trimmed id.
pub fn validate_match_id(match_id: &str) -> Result<&str> {
    let id = match_id.trim();
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CourierError::InvalidInput(format!(
            "match id must be numeric, got {match_id:?}"
        )));
    }
    Ok(id)
}

// ============================================================================
// Provider Trait Implementations
// ============================================================================

#[async_trait]
impl MatchSource for OpenDotaClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn fetch_match(&self, match_id: &str) -> Result<MatchDetail> {
        // Delegate to the existing method
        OpenDotaClient::fetch_match(self, match_id).await
    }
}
