//! The core-facing facade.
//!
//! [`Courier`] is what a command dispatcher holds: one value, shared via
//! `Arc` across tasks, exposing every operation. Failures are logged once
//! here at `warn!` and returned to the caller.

mod builder;

pub use builder::CourierBuilder;

use std::fmt::Display;
use std::sync::Arc;

use tracing::{error, warn};

use crate::assistant::{self, Assistant};
use crate::heroes;
use crate::movies;
use crate::providers::{OpenDotaClient, TmdbClient};
use crate::summarize::MatchSummarizer;
use crate::types::{Answer, HeroDetail, HeroRole, HeroStat, MatchReport, MovieCard, RankedHero};
use crate::{CourierError, Result};

pub struct Courier {
    opendota: Arc<OpenDotaClient>,
    tmdb: TmdbClient,
    summarizer: MatchSummarizer,
    assistant: Option<Assistant>,
}

impl Courier {
    /// Create a new builder.
    pub fn builder() -> CourierBuilder {
        CourierBuilder::new()
    }

    pub(crate) fn new(
        opendota: Arc<OpenDotaClient>,
        tmdb: TmdbClient,
        summarizer: MatchSummarizer,
        assistant: Option<Assistant>,
    ) -> Self {
        Self {
            opendota,
            tmdb,
            summarizer,
            assistant,
        }
    }

    /// Whether `ask` and `investigate` can reach a model.
    pub fn has_assistant(&self) -> bool {
        self.assistant.is_some()
    }

    /// Whether the movie operations are configured.
    pub fn has_movies(&self) -> bool {
        self.tmdb.has_api_key()
    }

    /// All hero stats (cached).
    pub async fn fetch_hero_stats(&self) -> Result<Arc<Vec<HeroStat>>> {
        self.opendota
            .fetch_hero_stats()
            .await
            .inspect_err(|e| log_failure("fetch_hero_stats", e))
    }

    /// The `count` best heroes for `role` by public win rate.
    pub async fn top_heroes_by_role(&self, role: HeroRole, count: usize) -> Result<Vec<RankedHero>> {
        let stats = self.fetch_hero_stats().await?;
        Ok(heroes::top_heroes_by_role(&stats, role, count))
    }

    /// [`Courier::top_heroes_by_role`] for every role, in role order.
    pub async fn all_roles_top(&self, count: usize) -> Result<Vec<(HeroRole, Vec<RankedHero>)>> {
        let stats = self.fetch_hero_stats().await?;
        Ok(heroes::all_roles_top(&stats, count))
    }

    /// Find a hero by (partial) name. `Ok(None)` when nothing matches.
    pub async fn lookup_hero(&self, query: &str) -> Result<Option<HeroDetail>> {
        let stats = self.fetch_hero_stats().await?;
        Ok(heroes::lookup_hero(&stats, query))
    }

    /// Summarize a match; an unknown id yields the not-found report.
    pub async fn fetch_match_summary(&self, match_id: &str) -> Result<MatchReport> {
        self.summarizer
            .summarize_match(match_id)
            .await
            .inspect_err(|e| log_failure("fetch_match_summary", e))
    }

    /// Answer a Dota 2 question, looking up matches on demand.
    pub async fn ask(&self, question: &str) -> Result<Answer> {
        let assistant = self.assistant.as_ref().ok_or_else(|| {
            let e = missing_openai_key();
            log_failure("ask", &e);
            e
        })?;
        assistant
            .ask(question)
            .await
            .inspect_err(|e| log_failure("ask", e))
    }

    /// Research a question with web search. Never fails.
    pub async fn investigate(&self, question: &str) -> Answer {
        match &self.assistant {
            Some(assistant) => assistant.investigate(question).await,
            None => {
                error!(error = %missing_openai_key(), "research unavailable");
                assistant::apology()
            }
        }
    }

    /// `count` random picks among the best-rated now-playing movies.
    pub async fn random_top_movies(&self, count: usize) -> Result<Vec<MovieCard>> {
        let movies = self
            .tmdb
            .fetch_now_playing()
            .await
            .inspect_err(|e| log_failure("random_top_movies", e))?;
        Ok(movies::pick_top_movies(&movies, count, &mut rand::thread_rng()))
    }
}

fn missing_openai_key() -> CourierError {
    CourierError::Configuration("missing OpenAI API key (OPENAI_API_KEY)".to_string())
}

fn log_failure(operation: &'static str, error: &impl Display) {
    warn!(operation, error = %error, "operation failed");
}
