// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use thiserror::Error;

/// Failures while reading the bank table out of the page markup.
///
/// `row` is the 0-based position of the `<tr>` inside the first table body,
/// counting header rows.
#[derive(Debug, Error, PartialEq)]
pub enum ExtractError {
    #[error("no <tbody> element found in page")]
    NoTableBody,
    #[error("row {row}: bank name not found in second cell")]
    MissingName { row: usize },
    #[error("row {row}: market cap cell missing")]
    MissingMarketCap { row: usize },
    #[error("row {row}: market cap {value:?} is not a number")]
    InvalidMarketCap { row: usize, value: String },
}
