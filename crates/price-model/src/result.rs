//! Prediction Results

use serde::{Deserialize, Serialize};

/// Non-negative price estimate tagged with its display currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Estimated resale price
    pub price: f64,
    /// Currency prefix, e.g. `S$`
    pub currency: String,
}

impl PredictionResult {
    /// Render as `S$ 412,345.68`
    pub fn format(&self) -> String {
        format_price(self.price, &self.currency)
    }
}

/// Format an amount with two decimals and thousands separators
pub fn format_price(amount: f64, currency: &str) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{} {}{}.{}", currency, sign, grouped, cents)
}
