//! Courier - data layer for a Dota 2 chat bot
//!
//! This crate sits between a command dispatcher and three upstream APIs
//! (OpenDota, TMDB, OpenAI). It fetches, caches and reshapes their data
//! into display-ready structures and answers questions through OpenAI
//! with on-demand match lookups.
//!
//! # Example
//!
//! ```rust,no_run
//! use courier::{Courier, HeroRole};
//!
//! #[tokio::main]
//! async fn main() -> courier::Result<()> {
//!     let courier = Courier::builder()
//!         .openai("sk-your-key")
//!         .build()?;
//!
//!     for hero in courier.top_heroes_by_role(HeroRole::Carry, 5).await? {
//!         println!("{} {:.2}%", hero.name, hero.win_rate);
//!     }
//!
//!     let answer = courier.ask("Who won match 7891234567?").await?;
//!     println!("{} ({} tokens, ${:.6})", answer.answer, answer.tokens(), answer.cost());
//!     Ok(())
//! }
//! ```

pub mod assistant;
pub mod cache;
#[cfg(feature = "cli")]
pub mod config;
pub mod error;
pub mod gateway;
pub mod heroes;
pub mod movies;
pub mod pricing;
pub mod providers;
pub mod summarize;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use assistant::{Assistant, AssistantConfig};
pub use cache::TtlCache;
pub use error::{CourierError, Result};
pub use gateway::{Courier, CourierBuilder};
pub use providers::{ChatProvider, MatchSource, ResearchProvider};
pub use summarize::{ItemCatalog, MatchSummarizer};

// Re-export all types
pub use types::{
    Answer, ChatOptions, ChatResponse, HeroDetail, HeroRole, HeroStat, MatchDetail,
    MatchReport, MatchSummary, Message, Movie, MovieCard, PlayerDetail, PlayerSummary,
    RankedHero, ResearchOptions, ResearchResponse, Role, Side, ToolCall, ToolDefinition, Usage,
    UsageAccounting,
};
