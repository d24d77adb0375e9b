// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::models::{Bank, BankMarketCap};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Currencies every market cap is converted into, besides USD.
pub const TARGET_CURRENCIES: [&str; 3] = ["GBP", "EUR", "INR"];

#[derive(Debug, Deserialize)]
struct RateRow {
    #[serde(rename = "Currency")]
    currency: String,
    #[serde(rename = "Rate")]
    rate: f64,
}

/// Load the USD exchange rates from a `Currency,Rate` file.
///
/// A currency listed twice keeps the rate from its last row.
pub fn load_rate_map(path: &Path) -> Result<HashMap<String, f64>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open exchange rate file {}", path.display()))?;

    let mut rate_map = HashMap::new();
    for row in reader.deserialize() {
        let row: RateRow =
            row.with_context(|| format!("Failed to parse exchange rate file {}", path.display()))?;
        if let Some(previous) = rate_map.insert(row.currency.clone(), row.rate) {
            warn!(
                currency = %row.currency,
                previous,
                rate = row.rate,
                "duplicate exchange rate, keeping the last one"
            );
        }
    }

    debug!(currencies = rate_map.len(), "exchange rates loaded");
    Ok(rate_map)
}

/// Round to two decimals, half away from zero on the binary value.
///
/// Inputs whose decimal form sits on a tie but whose `f64` sits just below it
/// round down: `1.005` is stored as `1.00499...` and becomes `1.0`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert a USD amount using the rate map. A currency without a rate
/// converts to 0.0.
pub fn convert_currency(amount_usd: f64, to_currency: &str, rate_map: &HashMap<String, f64>) -> f64 {
    let rate = rate_map.get(to_currency).copied().unwrap_or(0.0);
    round2(amount_usd * rate)
}

/// Add the GBP, EUR and INR market caps to every bank. Order and count are
/// preserved.
pub fn convert_market_caps(banks: Vec<Bank>, rate_map: &HashMap<String, f64>) -> Vec<BankMarketCap> {
    for currency in TARGET_CURRENCIES {
        if !rate_map.contains_key(currency) {
            warn!("⚠️  No conversion rate found for USD to {}, using 0.0", currency);
        }
    }

    banks
        .into_iter()
        .map(|bank| BankMarketCap {
            mc_gbp_billion: convert_currency(bank.mc_usd_billion, "GBP", rate_map),
            mc_eur_billion: convert_currency(bank.mc_usd_billion, "EUR", rate_map),
            mc_inr_billion: convert_currency(bank.mc_usd_billion, "INR", rate_map),
            mc_usd_billion: bank.mc_usd_billion,
            name: bank.name,
        })
        .collect()
}

/// Load the rate file and convert every bank with it.
pub fn transform(banks: Vec<Bank>, rate_path: &Path) -> Result<Vec<BankMarketCap>> {
    let rate_map = load_rate_map(rate_path)?;
    Ok(convert_market_caps(banks, &rate_map))
}
