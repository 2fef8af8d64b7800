//! AI orchestrator.
//!
//! Two entry points:
//! - [`Assistant::ask`]: chat completion with a match-lookup tool, resolved in
//!   at most two requests
//! - [`Assistant::investigate`]: one web-search-augmented research request
//!
//! Both report token usage summed over the requests actually made, priced
//! against the model that served them.

mod prompts;

pub use prompts::{
    ASK_SYSTEM_PROMPT, FETCH_MATCH_TOOL, INVESTIGATE_APOLOGY, fetch_match_tool, research_prompt,
};

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::providers::{ChatProvider, ResearchProvider};
use crate::summarize::MatchSummarizer;
use crate::types::{
    Answer, ChatOptions, ChatResponse, MatchReport, Message, ResearchOptions, ToolCall,
    UsageAccounting,
};
use crate::{CourierError, Result};

pub const DEFAULT_ASK_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_RESEARCH_MODEL: &str = "gpt-4o";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Models and sampling settings for the assistant.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantConfig {
    pub ask_model: String,
    pub research_model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            ask_model: DEFAULT_ASK_MODEL.to_string(),
            research_model: DEFAULT_RESEARCH_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Where an `ask` run stands.
enum AskPhase {
    AwaitingFirstResponse,
    ResolvingTools(ChatResponse),
    AwaitingSecondResponse,
    Done(String),
}

#[derive(Clone)]
pub struct Assistant {
    chat: Arc<dyn ChatProvider>,
    research: Arc<dyn ResearchProvider>,
    summarizer: MatchSummarizer,
    config: AssistantConfig,
}

impl Assistant {
    pub fn new(
        chat: Arc<dyn ChatProvider>,
        research: Arc<dyn ResearchProvider>,
        summarizer: MatchSummarizer,
        config: AssistantConfig,
    ) -> Self {
        Self {
            chat,
            research,
            summarizer,
            config,
        }
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Answer a question, looking up matches when the model asks for them.
    ///
    /// The first request offers the match tool. If the model calls it, every
    /// call is resolved (failures become `{"error": ...}` tool content) and a
    /// second, tool-less request produces the answer. Failures of either
    /// request propagate.
    pub async fn ask(&self, question: &str) -> Result<Answer> {
        let tools = [fetch_match_tool()];
        let mut messages = vec![Message::system(ASK_SYSTEM_PROMPT), Message::user(question)];
        let mut usage = UsageAccounting::default();
        let mut phase = AskPhase::AwaitingFirstResponse;

        loop {
            phase = match phase {
                AskPhase::AwaitingFirstResponse => {
                    let options = ChatOptions::default()
                        .model(&self.config.ask_model)
                        .max_tokens(self.config.max_tokens)
                        .temperature(self.config.temperature);
                    let response = self.chat.chat(&messages, Some(&tools), &options).await?;
                    usage.record(response.usage.as_ref());
                    if response.wants_tools() {
                        AskPhase::ResolvingTools(response)
                    } else {
                        AskPhase::Done(response.content)
                    }
                }
                AskPhase::ResolvingTools(response) => {
                    let ChatResponse {
                        content,
                        tool_calls,
                        ..
                    } = response;
                    debug!(calls = tool_calls.len(), "resolving tool calls");

                    let mut results = Vec::with_capacity(tool_calls.len());
                    for call in &tool_calls {
                        let content = self.run_tool(call).await;
                        results.push(Message::tool_result(&call.id, content).with_name(&call.name));
                    }

                    let content = (!content.is_empty()).then_some(content);
                    messages.push(Message::assistant_with_tool_calls(content, tool_calls));
                    messages.extend(results);
                    AskPhase::AwaitingSecondResponse
                }
                AskPhase::AwaitingSecondResponse => {
                    let options = ChatOptions::default()
                        .model(&self.config.ask_model)
                        .max_tokens(self.config.max_tokens);
                    let response = self.chat.chat(&messages, None, &options).await?;
                    usage.record(response.usage.as_ref());
                    AskPhase::Done(response.content)
                }
                AskPhase::Done(answer) => {
                    return Ok(Answer {
                        answer,
                        usage: usage.priced(&self.config.ask_model),
                    });
                }
            };
        }
    }

    /// Research a question with web search, dated today (UTC).
    ///
    /// Never fails: any error is logged and answered with
    /// [`INVESTIGATE_APOLOGY`] at zero cost.
    pub async fn investigate(&self, question: &str) -> Answer {
        self.investigate_on(question, Utc::now().date_naive()).await
    }

    /// [`Assistant::investigate`] with an explicit date for the prompt.
    pub async fn investigate_on(&self, question: &str, today: NaiveDate) -> Answer {
        let input = [
            Message::developer(research_prompt(today)),
            Message::user(question),
        ];
        let options = ResearchOptions::default()
            .model(&self.config.research_model)
            .temperature(self.config.temperature);

        match self.research.research(&input, &options).await {
            Ok(response) => {
                let mut usage = UsageAccounting::default();
                usage.record(response.usage.as_ref());
                Answer {
                    answer: response.output_text,
                    usage: usage.priced(&self.config.research_model),
                }
            }
            Err(e) => {
                error!(
                    provider = self.research.name(),
                    model = %self.config.research_model,
                    error = %e,
                    "research request failed"
                );
                apology()
            }
        }
    }

    /// Tool content for one call; errors are rendered, never raised.
    async fn run_tool(&self, call: &ToolCall) -> String {
        match self.call_tool(call).await {
            Ok(report) => report.to_tool_content(),
            Err(e) => {
                warn!(tool = %call.name, error = %e, "tool call failed");
                MatchReport::error(e.to_string()).to_tool_content()
            }
        }
    }

    async fn call_tool(&self, call: &ToolCall) -> Result<MatchReport> {
        if call.name != FETCH_MATCH_TOOL {
            return Err(CourierError::InvalidInput(format!(
                "unknown tool: {}",
                call.name
            )));
        }

        let args: Value = call
            .parse_arguments()
            .map_err(|e| CourierError::InvalidInput(format!("invalid tool arguments: {e}")))?;
        // Models occasionally send the id as a number.
        let match_id = match &args["match_id"] {
            Value::String(id) => id.clone(),
            Value::Number(id) => id.to_string(),
            _ => {
                return Err(CourierError::InvalidInput(
                    "missing match_id argument".to_string(),
                ));
            }
        };
        self.summarizer.summarize_match(&match_id).await
    }
}

/// The zero-cost answer returned when research is unavailable.
pub(crate) fn apology() -> Answer {
    Answer {
        answer: INVESTIGATE_APOLOGY.to_string(),
        usage: UsageAccounting::default(),
    }
}
