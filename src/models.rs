// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use serde::{Deserialize, Serialize};

/// One row of the largest-banks table, as scraped.
#[derive(Debug, Clone, PartialEq)]
pub struct Bank {
    pub name: String,
    pub mc_usd_billion: f64,
}

/// A bank with its market cap expressed in every target currency.
///
/// Field names on disk and in the database follow the column names of the
/// output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankMarketCap {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "MC_USD_Billion")]
    pub mc_usd_billion: f64,
    #[serde(rename = "MC_GBP_Billion")]
    pub mc_gbp_billion: f64,
    #[serde(rename = "MC_EUR_Billion")]
    pub mc_eur_billion: f64,
    #[serde(rename = "MC_INR_Billion")]
    pub mc_inr_billion: f64,
}

impl BankMarketCap {
    /// Column names in output order.
    pub const COLUMNS: [&'static str; 5] = [
        "Name",
        "MC_USD_Billion",
        "MC_GBP_Billion",
        "MC_EUR_Billion",
        "MC_INR_Billion",
    ];
}
