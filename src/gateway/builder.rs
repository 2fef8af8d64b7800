//! Builder for configuring [`Courier`] instances

use std::sync::Arc;
use std::time::Duration;

use super::Courier;
use crate::Result;
use crate::assistant::{Assistant, AssistantConfig};
use crate::cache::DEFAULT_TTL;
use crate::providers::{OpenAiClient, OpenDotaClient, TmdbClient, http_client, opendota, openai, tmdb};
use crate::summarize::MatchSummarizer;

/// Builder for configuring [`Courier`] instances.
///
/// Nothing is required: without an OpenAI key `ask` is unavailable, and
/// without a TMDB key the movie operations are.
#[derive(Clone)]
pub struct CourierBuilder {
    opendota_url: String,
    hero_stats_ttl: Duration,
    tmdb_key: Option<String>,
    tmdb_url: String,
    now_playing_ttl: Duration,
    openai_key: Option<String>,
    openai_url: String,
    assistant: AssistantConfig,
    timeout: Option<Duration>,
}

impl Default for CourierBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CourierBuilder {
    pub fn new() -> Self {
        Self {
            opendota_url: opendota::DEFAULT_BASE_URL.to_string(),
            hero_stats_ttl: DEFAULT_TTL,
            tmdb_key: None,
            tmdb_url: tmdb::DEFAULT_BASE_URL.to_string(),
            now_playing_ttl: DEFAULT_TTL,
            openai_key: None,
            openai_url: openai::DEFAULT_BASE_URL.to_string(),
            assistant: AssistantConfig::default(),
            timeout: None,
        }
    }

    /// Override the OpenDota base URL.
    pub fn opendota_url(mut self, url: impl Into<String>) -> Self {
        self.opendota_url = url.into();
        self
    }

    /// How long hero stats stay fresh (default: 5 minutes).
    pub fn hero_stats_ttl(mut self, ttl: Duration) -> Self {
        self.hero_stats_ttl = ttl;
        self
    }

    /// Configure TMDB for the movie operations.
    pub fn tmdb(mut self, api_key: impl Into<String>) -> Self {
        self.tmdb_key = Some(api_key.into());
        self
    }

    pub fn tmdb_url(mut self, url: impl Into<String>) -> Self {
        self.tmdb_url = url.into();
        self
    }

    /// How long the now-playing list stays fresh (default: 5 minutes).
    pub fn now_playing_ttl(mut self, ttl: Duration) -> Self {
        self.now_playing_ttl = ttl;
        self
    }

    /// Configure OpenAI for `ask` and `investigate`.
    pub fn openai(mut self, api_key: impl Into<String>) -> Self {
        self.openai_key = Some(api_key.into());
        self
    }

    pub fn openai_url(mut self, url: impl Into<String>) -> Self {
        self.openai_url = url.into();
        self
    }

    /// Models and sampling settings for the assistant.
    pub fn assistant(mut self, config: AssistantConfig) -> Self {
        self.assistant = config;
        self
    }

    /// Set a timeout for every upstream request (default: none).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the facade.
    ///
    /// Fails only if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<Courier> {
        let http = http_client(self.timeout)?;

        let opendota = Arc::new(
            OpenDotaClient::with_base_url(http.clone(), self.opendota_url)
                .cache_ttl(self.hero_stats_ttl),
        );
        let tmdb = TmdbClient::with_base_url(http.clone(), self.tmdb_key, self.tmdb_url)
            .cache_ttl(self.now_playing_ttl);

        let summarizer = MatchSummarizer::new(opendota.clone());
        let assistant = self
            .openai_key
            .filter(|key| !key.trim().is_empty())
            .map(|key| {
                let client = Arc::new(OpenAiClient::with_base_url(http, key, self.openai_url));
                Assistant::new(
                    client.clone(),
                    client,
                    summarizer.clone(),
                    self.assistant,
                )
            });

        Ok(Courier::new(opendota, tmdb, summarizer, assistant))
    }
}
