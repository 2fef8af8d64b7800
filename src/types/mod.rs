//! Public types for the Courier API.

mod hero;
mod matches;
mod message;
mod movie;
mod options;
mod response;
mod tool;

pub use hero::{HERO_CDN_BASE, HeroDetail, HeroRole, HeroStat, RankedHero, attribute_label};
pub use matches::{
    MatchDetail, MatchReport, MatchSummary, PlayerDetail, PlayerSummary, Side, format_duration,
};
pub use message::{Message, Role};
pub use movie::{Movie, MovieCard, MoviePage, TMDB_IMAGE_BASE};
pub use options::{ChatOptions, ResearchOptions};
pub use response::{
    Answer, ChatResponse, ResearchResponse, Usage, UsageAccounting,
};
pub use tool::{ToolCall, ToolDefinition};
