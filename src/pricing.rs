//! Static completion pricing.
//!
//! Rates are USD per million tokens, matched by model-name prefix in table
//! order, so `gpt-4o-mini` must precede `gpt-4o`. Models without a matching
//! prefix price at zero.

use tracing::warn;

/// Per-million-token rates for one model family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelRates {
    pub prefix: &'static str,
    pub input_per_mtok: f64,
    pub output_per_mtok: f64,
}

/// Rate table, checked first to last.
pub const RATES: &[ModelRates] = &[
    ModelRates {
        prefix: "gpt-4o-mini",
        input_per_mtok: 0.150,
        output_per_mtok: 0.600,
    },
    ModelRates {
        prefix: "gpt-4o",
        input_per_mtok: 5.00,
        output_per_mtok: 15.00,
    },
];

/// Rates for `model`, if any prefix matches.
pub fn rates(model: &str) -> Option<&'static ModelRates> {
    RATES.iter().find(|r| model.starts_with(r.prefix))
}

/// Cost in USD of `input_tokens` + `output_tokens` on `model`.
pub fn cost(model: &str, input_tokens: u64, output_tokens: u64) -> f64 {
    let Some(rates) = rates(model) else {
        if input_tokens > 0 || output_tokens > 0 {
            warn!(model, "no pricing for model, reporting zero cost");
        }
        return 0.0;
    };
    input_tokens as f64 / 1_000_000.0 * rates.input_per_mtok
        + output_tokens as f64 / 1_000_000.0 * rates.output_per_mtok
}
