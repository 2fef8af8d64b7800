//! Completion responses and usage accounting

use super::tool::ToolCall;
use crate::pricing;
use serde::{Deserialize, Serialize};

/// Non-streaming chat-completion response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatResponse {
    pub content: String,
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ChatResponse {
    pub fn wants_tools(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Response of a web-search-augmented research request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResearchResponse {
    pub output_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Token usage of a single request/response pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

impl Usage {
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
        }
    }

    pub fn total(&self) -> u64 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// Tokens and cost summed over every request of one orchestration run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct UsageAccounting {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cost_usd: f64,
}

impl UsageAccounting {
    /// Add one response's usage (missing usage counts as zero).
    pub fn record(&mut self, usage: Option<&Usage>) {
        if let Some(usage) = usage {
            self.input_tokens += usage.prompt_tokens;
            self.output_tokens += usage.completion_tokens;
        }
    }

    /// Price the accumulated tokens against `model`.
    pub fn priced(mut self, model: &str) -> Self {
        self.cost_usd = pricing::cost(model, self.input_tokens, self.output_tokens);
        self
    }

    pub fn total_tokens(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// A user-facing answer plus what it cost to produce.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    pub answer: String,
    pub usage: UsageAccounting,
}

impl Answer {
    pub fn tokens(&self) -> u64 {
        self.usage.total_tokens()
    }

    pub fn cost(&self) -> f64 {
        self.usage.cost_usd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accounting_sums_records() {
        let mut acc = UsageAccounting::default();
        acc.record(Some(&Usage::new(100, 20)));
        acc.record(None);
        acc.record(Some(&Usage::new(50, 5)));
        assert_eq!(acc.input_tokens, 150);
        assert_eq!(acc.output_tokens, 25);
        assert_eq!(acc.total_tokens(), 175);
    }

    #[test]
    fn priced_unknown_model_is_free() {
        let mut acc = UsageAccounting::default();
        acc.record(Some(&Usage::new(1_000_000, 1_000_000)));
        assert_eq!(acc.priced("claude-sonnet-4").cost_usd, 0.0);
    }
}
