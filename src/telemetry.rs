//! Telemetry metric name constants and the per-command log line.
//!
//! Consumers install their own `metrics` recorder (e.g. prometheus, statsd);
//! without a recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `courier_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `provider` — upstream name ("opendota", "tmdb", "openai")
//! - `operation` — call made (e.g. "hero_stats", "chat", "research")
//! - `status` — outcome: "ok" or "error"
//! - `direction` — token direction: "prompt" or "completion"
//! - `resource` — cached resource name (e.g. "hero_stats")

use std::time::Duration;

use tracing::info;

/// Total upstream requests issued.
///
/// Labels: `provider`, `operation`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "courier_requests_total";

/// Upstream request duration in seconds.
///
/// Labels: `provider`, `operation`.
pub const REQUEST_DURATION_SECONDS: &str = "courier_request_duration_seconds";

/// Total tokens consumed by completion requests.
///
/// Labels: `provider`, `direction` ("prompt" | "completion").
pub const TOKENS_TOTAL: &str = "courier_tokens_total";

/// Total cache hits.
///
/// Labels: `resource`.
pub const CACHE_HITS_TOTAL: &str = "courier_cache_hits_total";

/// Total cache misses (each miss triggers exactly one upstream fetch).
///
/// Labels: `resource`.
pub const CACHE_MISSES_TOTAL: &str = "courier_cache_misses_total";

/// Total commands handled by a caller of the facade.
///
/// Labels: `command`, `status`.
pub const COMMANDS_TOTAL: &str = "courier_commands_total";

/// Record the outcome and latency of one upstream request.
pub(crate) fn record_request(provider: &'static str, operation: &'static str, ok: bool, elapsed: Duration) {
    let status = if ok { "ok" } else { "error" };
    metrics::counter!(REQUESTS_TOTAL,
        "provider" => provider,
        "operation" => operation,
        "status" => status,
    )
    .increment(1);
    metrics::histogram!(REQUEST_DURATION_SECONDS,
        "provider" => provider,
        "operation" => operation,
    )
    .record(elapsed.as_secs_f64());
}

/// Record prompt/completion token counts for one completion response.
pub(crate) fn record_tokens(provider: &'static str, prompt: u64, completion: u64) {
    metrics::counter!(TOKENS_TOTAL, "provider" => provider, "direction" => "prompt")
        .increment(prompt);
    metrics::counter!(TOKENS_TOTAL, "provider" => provider, "direction" => "completion")
        .increment(completion);
}

/// One handled command, logged as a single structured line.
///
/// Renders like
/// `CMD /ask by someone#1234 200 - 812 ms - Tokens: 154 - Cost: $0.002000`.
/// Token and cost columns show `-` when nothing was spent.
#[derive(Debug, Clone)]
pub struct CommandLog {
    pub command: String,
    pub user: String,
    pub status: u16,
    pub duration: Duration,
    pub tokens: u64,
    pub cost: f64,
}

impl CommandLog {
    pub fn new(command: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            user: user.into(),
            status: 200,
            duration: Duration::ZERO,
            tokens: 0,
            cost: 0.0,
        }
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn usage(mut self, tokens: u64, cost: f64) -> Self {
        self.tokens = tokens;
        self.cost = cost;
        self
    }

    /// Render the human-readable line.
    pub fn line(&self) -> String {
        let tokens = if self.tokens == 0 {
            "-".to_string()
        } else {
            self.tokens.to_string()
        };
        let cost = if self.cost > 0.0 {
            format!("${:.6}", self.cost)
        } else {
            "-".to_string()
        };
        format!(
            "CMD /{} by {} {} - {} ms - Tokens: {} - Cost: {}",
            self.command.trim_start_matches('/'),
            self.user,
            self.status,
            self.duration.as_millis(),
            tokens,
            cost
        )
    }

    /// Emit the line through `tracing` and bump the command counter.
    pub fn emit(&self) {
        let status = if self.status < 400 { "ok" } else { "error" };
        metrics::counter!(COMMANDS_TOTAL,
            "command" => self.command.clone(),
            "status" => status,
        )
        .increment(1);
        info!(
            command = %self.command,
            user = %self.user,
            status = self.status,
            duration_ms = self.duration.as_millis() as u64,
            tokens = self.tokens,
            cost = self.cost,
            "{}",
            self.line()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_with_usage() {
        let log = CommandLog::new("/ask", "TestUser#1234")
            .duration(Duration::from_millis(812))
            .usage(154, 0.002);
        assert_eq!(
            log.line(),
            "CMD /ask by TestUser#1234 200 - 812 ms - Tokens: 154 - Cost: $0.002000"
        );
    }

    #[test]
    fn line_without_usage_shows_dashes() {
        let log = CommandLog::new("hero", "someone").status(500);
        assert_eq!(
            log.line(),
            "CMD /hero by someone 500 - 0 ms - Tokens: - - Cost: -"
        );
    }
}
