//! Prompt text and tool schema for the assistant.

use chrono::NaiveDate;
use serde_json::json;

use crate::types::ToolDefinition;

pub const FETCH_MATCH_TOOL: &str = "fetch_match_details";

pub const ASK_SYSTEM_PROMPT: &str = "You are a knowledgeable Dota 2 assistant. Answer questions \
about Dota 2 heroes, items, strategies, mechanics, meta, patches, and lore. You can fetch and \
analyze specific Dota 2 match details using a tool if a user provides a match ID. Keep answers \
concise (under 1500 characters) and informative. Use specific numbers and facts when possible. \
If a question is not related to Dota 2, politely redirect the user to ask a Dota 2 question \
instead.";

pub const INVESTIGATE_APOLOGY: &str = "I encountered an error while researching this topic. \
Try simplifying your query or asking a different question.";

/// Developer prompt for research requests, dated `today`.
pub fn research_prompt(today: NaiveDate) -> String {
    format!(
        "You are an advanced Dota 2 research assistant. Today's date is {today}. When a user asks \
a complex question about the meta, patches, item builds, or heroes, you MUST perform deep research \
to find the most accurate and up-to-date information before answering.
- ALWAYS search the web to find the exact current live patch version of Dota 2 BEFORE searching \
for meta information, because your training data cutoff means you do not know the current patch.
- Once you know the current patch, search the web to find recent patch notes, meta tier lists, \
and item build guides related to the user's query.

Synthesize the data you gather. Keep answers concise (under 1500 characters) and informative, \
citing the sources or data you found where relevant. If a question is not related to Dota 2, \
politely redirect the user to ask a Dota 2 question instead.",
        today = today.format("%Y-%m-%d")
    )
}

/// The single tool offered on the first `ask` request.
pub fn fetch_match_tool() -> ToolDefinition {
    ToolDefinition::new(
        FETCH_MATCH_TOOL,
        "Fetch a summary of a specific Dota 2 match by its numeric Match ID.",
        json!({
            "type": "object",
            "properties": {
                "match_id": {
                    "type": "string",
                    "description": "The Dota 2 Match ID (e.g. '7891234567'). Keep as string to avoid precision loss."
                }
            },
            "required": ["match_id"]
        }),
    )
}
