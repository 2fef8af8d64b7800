//! Provider traits for capability-specific implementations.
//!
//! The orchestrator talks to completion backends and match data through
//! these seams rather than concrete clients, so each capability can be
//! swapped or mocked on its own:
//! - [`ChatProvider`]: chat completions with optional tools
//! - [`ResearchProvider`]: single-shot web-search-augmented responses
//! - [`MatchSource`]: raw match detail lookups

use async_trait::async_trait;

use crate::Result;
use crate::types::{
    ChatOptions, ChatResponse, MatchDetail, Message, ResearchOptions, ResearchResponse,
    ToolDefinition,
};

// ============================================================================
// Chat Provider
// ============================================================================

/// Provider for chat completions.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// One request/response round trip. `tools: None` exposes no tools.
    async fn chat(
        &self,
        messages: &[Message],
        tools: Option<&[ToolDefinition]>,
        options: &ChatOptions,
    ) -> Result<ChatResponse>;
}

// ============================================================================
// Research Provider
// ============================================================================

/// Provider for web-search-augmented answers.
#[async_trait]
pub trait ResearchProvider: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// One request/response round trip with web search enabled.
    async fn research(
        &self,
        input: &[Message],
        options: &ResearchOptions,
    ) -> Result<ResearchResponse>;
}

// ============================================================================
// Match Source
// ============================================================================

/// Source of raw match details.
///
/// Implementations return [`CourierError::NotFound`](crate::CourierError::NotFound)
/// for unknown match ids.
#[async_trait]
pub trait MatchSource: Send + Sync {
    /// Source name for logging/debugging.
    fn name(&self) -> &str;

    async fn fetch_match(&self, match_id: &str) -> Result<MatchDetail>;
}
