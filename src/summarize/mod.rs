//! Match summarizer.
//!
//! Turns a raw OpenDota match payload into the compact [`MatchSummary`] the
//! assistant feeds back to the model: outcome, duration, score, and one line
//! per player with named hero and items.

mod heroes;
mod items;

pub use heroes::hero_name;
pub use items::ItemCatalog;

use std::sync::Arc;

use tracing::debug;

use crate::providers::MatchSource;
use crate::types::{
    MatchDetail, MatchReport, MatchSummary, PlayerDetail, PlayerSummary, format_duration,
};
use crate::{CourierError, Result};

/// Fetches matches from a [`MatchSource`] and summarizes them.
#[derive(Clone)]
pub struct MatchSummarizer {
    source: Arc<dyn MatchSource>,
    catalog: ItemCatalog,
}

impl MatchSummarizer {
    /// Summarizer using the built-in item catalog.
    pub fn new(source: Arc<dyn MatchSource>) -> Self {
        Self::with_catalog(source, ItemCatalog::builtin().clone())
    }

    pub fn with_catalog(source: Arc<dyn MatchSource>, catalog: ItemCatalog) -> Self {
        Self { source, catalog }
    }

    /// Fetch and summarize one match.
    ///
    /// An unknown match is not an error here: it becomes
    /// [`MatchReport::not_found`]. Every other failure propagates.
    pub async fn summarize_match(&self, match_id: &str) -> Result<MatchReport> {
        match self.source.fetch_match(match_id).await {
            Ok(detail) => {
                debug!(
                    source = self.source.name(),
                    match_id,
                    players = detail.players.len(),
                    "summarizing match"
                );
                Ok(MatchReport::Summary(summarize(&detail, &self.catalog)))
            }
            Err(CourierError::NotFound(_)) => {
                debug!(source = self.source.name(), match_id, "match not found");
                Ok(MatchReport::not_found())
            }
            Err(e) => Err(e),
        }
    }
}

/// Summarize an already-fetched match.
pub fn summarize(detail: &MatchDetail, catalog: &ItemCatalog) -> MatchSummary {
    let outcome = if detail.radiant_win {
        "Radiant Victory"
    } else {
        "Dire Victory"
    };

    MatchSummary {
        match_id: detail.match_id.to_string(),
        outcome: outcome.to_string(),
        duration_secs: detail.duration,
        duration: format_duration(detail.duration),
        radiant_score: detail.radiant_score,
        dire_score: detail.dire_score,
        players: detail
            .players
            .iter()
            .map(|player| summarize_player(player, catalog))
            .collect(),
    }
}

fn summarize_player(player: &PlayerDetail, catalog: &ItemCatalog) -> PlayerSummary {
    let name = player
        .personaname
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or("Anonymous")
        .to_string();

    PlayerSummary {
        name,
        hero: hero_name(player.hero_id),
        side: player.side(),
        kills: player.kills,
        deaths: player.deaths,
        assists: player.assists,
        kda: format!("{}/{}/{}", player.kills, player.deaths, player.assists),
        last_hits: player.last_hits,
        denies: player.denies,
        gold_per_min: player.gold_per_min,
        xp_per_min: player.xp_per_min,
        net_worth: player.net_worth,
        hero_damage: player.hero_damage,
        tower_damage: player.tower_damage,
        level: player.level,
        items: player
            .item_slots()
            .into_iter()
            .filter_map(|slot| catalog.resolve(slot))
            .collect(),
        neutral_item: catalog.resolve(player.item_neutral),
    }
}
