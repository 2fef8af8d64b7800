//! OpenAI client for chat completions and web-search responses.
//!
//! Speaks two request shapes:
//! - `POST /chat/completions` for [`ChatProvider`] (tool calling)
//! - `POST /responses` with the `web_search` tool for [`ResearchProvider`]
//!
//! See: <https://platform.openai.com/docs/api-reference>

use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::check_status;
use super::traits::{ChatProvider, ResearchProvider};
use crate::telemetry;
use crate::types::{
    ChatOptions, ChatResponse, Message, ResearchOptions, ResearchResponse, Role,
    ToolCall, ToolDefinition, Usage,
};
use crate::{CourierError, Result};

/// Default base URL for the OpenAI API
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const PROVIDER: &str = "openai";

/// Client for the OpenAI API.
#[derive(Clone)]
pub struct OpenAiClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl OpenAiClient {
    /// Create a client against the public API.
    pub fn new(http: Client, api_key: impl Into<String>) -> Self {
        Self::with_base_url(http, api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(
        http: Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(CourierError::AuthenticationFailed);
        }
        let response = check_status(response, None).await?;
        Ok(response.json().await?)
    }

    async fn complete(
        &self,
        messages: &[Message],
        tools: Option<&[ToolDefinition]>,
        options: &ChatOptions,
    ) -> Result<ChatResponse> {
        let request = ChatRequest {
            model: &options.model,
            messages: messages.iter().map(WireMessage::from).collect(),
            tools: tools.map(|tools| tools.iter().map(WireTool::from).collect()),
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        };
        let completion: ChatCompletion = self.post("/chat/completions", &request).await?;
        completion.into_response()
    }

    async fn respond(
        &self,
        input: &[Message],
        options: &ResearchOptions,
    ) -> Result<ResearchResponse> {
        let request = ResponsesRequest {
            model: &options.model,
            tools: vec![ResponsesTool {
                kind: "web_search",
            }],
            input: input
                .iter()
                .map(|m| InputMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: options.temperature,
        };
        let response: ResponsesPayload = self.post("/responses", &request).await?;
        response.into_response()
    }
}

// ============================================================================
// Chat completions wire format
// ============================================================================

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    /// `null` on assistant turns that only carry tool calls.
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

impl<'a> From<&'a Message> for WireMessage<'a> {
    fn from(message: &'a Message) -> Self {
        let tool_calls = message
            .tool_calls
            .as_ref()
            .filter(|calls| !calls.is_empty())
            .map(|calls| calls.iter().map(WireToolCall::from).collect::<Vec<_>>());
        let content = if tool_calls.is_some() && message.content.is_empty() {
            None
        } else {
            Some(message.content.as_str())
        };
        let tool_call_id = match &message.role {
            Role::Tool { tool_call_id } => Some(tool_call_id.as_str()),
            _ => None,
        };
        Self {
            role: message.role.as_str(),
            content,
            tool_calls,
            tool_call_id,
            name: message.name.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct WireTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunction<'a>,
}

#[derive(Serialize)]
struct WireFunction<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a serde_json::Value,
}

impl<'a> From<&'a ToolDefinition> for WireTool<'a> {
    fn from(tool: &'a ToolDefinition) -> Self {
        Self {
            kind: "function",
            function: WireFunction {
                name: &tool.name,
                description: &tool.description,
                parameters: &tool.parameters,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type", default = "function_kind")]
    kind: String,
    function: WireFunctionCall,
}

fn function_kind() -> String {
    "function".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

impl From<&ToolCall> for WireToolCall {
    fn from(call: &ToolCall) -> Self {
        Self {
            id: call.id.clone(),
            kind: function_kind(),
            function: WireFunctionCall {
                name: call.name.clone(),
                arguments: call.arguments.clone(),
            },
        }
    }
}

impl From<WireToolCall> for ToolCall {
    fn from(call: WireToolCall) -> Self {
        ToolCall::new(call.id, call.function.name, call.function.arguments)
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

impl ChatCompletion {
    fn into_response(self) -> Result<ChatResponse> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or(CourierError::EmptyResponse)?;
        Ok(ChatResponse {
            content: choice.message.content.unwrap_or_default(),
            tool_calls: choice
                .message
                .tool_calls
                .unwrap_or_default()
                .into_iter()
                .map(ToolCall::from)
                .collect(),
            usage: self
                .usage
                .map(|u| Usage::new(u.prompt_tokens, u.completion_tokens)),
            model: self.model,
        })
    }
}

// ============================================================================
// Responses wire format
// ============================================================================

#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    tools: Vec<ResponsesTool>,
    input: Vec<InputMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct ResponsesTool {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct InputMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResponsesPayload {
    #[serde(default)]
    model: Option<String>,
    /// Convenience field; not every server fills it in.
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
    #[serde(default)]
    usage: Option<ResponsesUsage>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
struct OutputContent {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponsesUsage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

impl ResponsesPayload {
    /// Text of every `output_text` part of every message item, in order.
    fn collect_output_text(&self) -> String {
        self.output
            .iter()
            .filter(|item| item.kind == "message")
            .flat_map(|item| item.content.iter())
            .filter(|part| part.kind == "output_text")
            .filter_map(|part| part.text.as_deref())
            .collect()
    }

    fn into_response(self) -> Result<ResearchResponse> {
        let output_text = match self.output_text.as_deref() {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => self.collect_output_text(),
        };
        if output_text.is_empty() {
            return Err(CourierError::EmptyResponse);
        }
        Ok(ResearchResponse {
            output_text,
            usage: self
                .usage
                .map(|u| Usage::new(u.input_tokens, u.output_tokens)),
            model: self.model,
        })
    }
}

// ============================================================================
// Provider Trait Implementations
// ============================================================================

#[async_trait]
impl ChatProvider for OpenAiClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn chat(
        &self,
        messages: &[Message],
        tools: Option<&[ToolDefinition]>,
        options: &ChatOptions,
    ) -> Result<ChatResponse> {
        let started = Instant::now();
        let result = self.complete(messages, tools, options).await;
        telemetry::record_request(PROVIDER, "chat", result.is_ok(), started.elapsed());
        if let Ok(response) = &result {
            let usage = response.usage.unwrap_or_default();
            telemetry::record_tokens(PROVIDER, usage.prompt_tokens, usage.completion_tokens);
            debug!(
                model = %options.model,
                tool_calls = response.tool_calls.len(),
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "chat completion"
            );
        }
        result
    }
}

#[async_trait]
impl ResearchProvider for OpenAiClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn research(
        &self,
        input: &[Message],
        options: &ResearchOptions,
    ) -> Result<ResearchResponse> {
        let started = Instant::now();
        let result = self.respond(input, options).await;
        telemetry::record_request(PROVIDER, "research", result.is_ok(), started.elapsed());
        if let Ok(response) = &result {
            let usage = response.usage.unwrap_or_default();
            telemetry::record_tokens(PROVIDER, usage.prompt_tokens, usage.completion_tokens);
            debug!(
                model = %options.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "research response"
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assistant_tool_turn_has_null_content() {
        let message = Message::assistant_with_tool_calls(
            None,
            vec![ToolCall::new("call_1", "fetch_match_details", r#"{"match_id":"1"}"#)],
        );
        let wire = serde_json::to_value(WireMessage::from(&message)).unwrap();
        assert_eq!(wire["role"], "assistant");
        assert!(wire["content"].is_null());
        assert_eq!(wire["tool_calls"][0]["type"], "function");
        assert_eq!(wire["tool_calls"][0]["function"]["name"], "fetch_match_details");
    }

    #[test]
    fn tool_result_turn_carries_call_id_and_name() {
        let message = Message::tool_result("call_1", "{}").with_name("fetch_match_details");
        let wire = serde_json::to_value(WireMessage::from(&message)).unwrap();
        assert_eq!(wire["role"], "tool");
        assert_eq!(wire["tool_call_id"], "call_1");
        assert_eq!(wire["name"], "fetch_match_details");
        assert_eq!(wire["content"], "{}");
    }

    #[test]
    fn parses_completion_with_tool_calls() {
        let json = r#"{
            "model": "gpt-4o-mini",
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_abc",
                        "type": "function",
                        "function": {"name": "fetch_match_details", "arguments": "{\"match_id\":\"7891234567\"}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }],
            "usage": {"prompt_tokens": 120, "completion_tokens": 18, "total_tokens": 138}
        }"#;
        let completion: ChatCompletion = serde_json::from_str(json).unwrap();
        let response = completion.into_response().unwrap();
        assert!(response.wants_tools());
        assert_eq!(response.tool_calls[0].id, "call_abc");
        assert_eq!(response.usage, Some(Usage::new(120, 18)));
        assert!(response.content.is_empty());
    }

    #[test]
    fn empty_choices_is_empty_response() {
        let completion: ChatCompletion = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            completion.into_response(),
            Err(CourierError::EmptyResponse)
        ));
    }

    #[test]
    fn output_text_collected_from_message_items() {
        let json = r#"{
            "output": [
                {"type": "web_search_call", "id": "ws_1", "status": "completed"},
                {"type": "message", "content": [
                    {"type": "output_text", "text": "Patch 7.39 ", "annotations": []},
                    {"type": "output_text", "text": "is live."}
                ]}
            ],
            "usage": {"input_tokens": 300, "output_tokens": 40}
        }"#;
        let payload: ResponsesPayload = serde_json::from_str(json).unwrap();
        let response = payload.into_response().unwrap();
        assert_eq!(response.output_text, "Patch 7.39 is live.");
        assert_eq!(response.usage, Some(Usage::new(300, 40)));
    }

    #[test]
    fn top_level_output_text_preferred() {
        let json = r#"{"output_text": "direct", "output": []}"#;
        let payload: ResponsesPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.into_response().unwrap().output_text, "direct");
    }
}
