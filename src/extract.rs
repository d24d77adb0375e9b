// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::error::ExtractError;
use crate::models::Bank;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

// Layout of a data row: rank, flag + linked name, market cap.
const NAME_CELL: usize = 1;
const NAME_LINK_NODE: usize = 2;
const MARKET_CAP_CELL: usize = 2;

/// Reads the largest-banks table out of the page markup.
///
/// Only the first `<tbody>` of the document is considered. Rows without any
/// `<td>` (the header row, separators) are skipped. Every other row must carry
/// the bank name as the text of the link sitting at the third child node of its
/// second cell, and a numeric market cap as the leading text of its third cell.
pub struct TableExtractor {
    tbody: Selector,
    tr: Selector,
    td: Selector,
}

impl TableExtractor {
    pub fn new() -> Self {
        Self {
            tbody: Selector::parse("tbody").expect("Invalid CSS selector for tbody"),
            tr: Selector::parse("tr").expect("Invalid CSS selector for tr"),
            td: Selector::parse("td").expect("Invalid CSS selector for td"),
        }
    }

    pub fn extract(&self, html: &str) -> Result<Vec<Bank>, ExtractError> {
        let document = Html::parse_document(html);
        let tbody = document
            .select(&self.tbody)
            .next()
            .ok_or(ExtractError::NoTableBody)?;

        let mut banks = Vec::new();
        for (row, tr) in tbody.select(&self.tr).enumerate() {
            let cells: Vec<ElementRef> = tr.select(&self.td).collect();
            if cells.is_empty() {
                continue;
            }

            let name = cells
                .get(NAME_CELL)
                .and_then(|cell| cell.children().nth(NAME_LINK_NODE))
                .and_then(ElementRef::wrap)
                .and_then(|link| link.text().next())
                .map(str::to_string)
                .ok_or(ExtractError::MissingName { row })?;

            let raw = cells
                .get(MARKET_CAP_CELL)
                .and_then(|cell| cell.text().next())
                .map(str::to_string)
                .ok_or(ExtractError::MissingMarketCap { row })?;
            let mc_usd_billion = parse_market_cap(&raw)
                .ok_or_else(|| ExtractError::InvalidMarketCap { row, value: raw.clone() })?;

            banks.push(Bank {
                name,
                mc_usd_billion,
            });
        }

        debug!(rows = banks.len(), "bank table extracted");
        Ok(banks)
    }
}

impl Default for TableExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_market_cap(raw: &str) -> Option<f64> {
    raw.replace('\n', "").trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bank_row(rank: u32, name: &str, market_cap: &str) -> String {
        format!(
            "<tr>\n<td>{rank}</td>\n<td><span class=\"flagicon\"><img alt=\"flag\" src=\"f.png\" /></span> \
             <a href=\"/wiki/{slug}\" title=\"{name}\">{name}</a>\n</td>\n<td>{market_cap}\n</td></tr>\n",
            slug = name.replace(' ', "_"),
        )
    }

    fn page(rows: &[String]) -> String {
        format!(
            "<html><body><h2>By market capitalization</h2>\
             <table class=\"wikitable\"><tbody><tr><th>Rank</th><th>Bank name</th>\
             <th>Market cap<br />(US$ billion)</th></tr>\n{}</tbody></table></body></html>",
            rows.concat()
        )
    }

    #[test]
    fn test_extracts_rows_in_document_order() -> Result<(), ExtractError> {
        let html = page(&[
            bank_row(1, "JPMorgan Chase", "432.92"),
            bank_row(2, "Bank of America", "231.52"),
            bank_row(3, "Industrial and Commercial Bank of China", "194.56"),
        ]);

        let banks = TableExtractor::new().extract(&html)?;

        assert_eq!(banks.len(), 3);
        assert_eq!(banks[0].name, "JPMorgan Chase");
        assert_eq!(banks[1].name, "Bank of America");
        assert_eq!(banks[2].name, "Industrial and Commercial Bank of China");
        assert_relative_eq!(banks[0].mc_usd_billion, 432.92);
        assert_relative_eq!(banks[2].mc_usd_billion, 194.56);
        Ok(())
    }

    #[test]
    fn test_rows_without_cells_are_skipped() -> Result<(), ExtractError> {
        let html = page(&[
            bank_row(1, "JPMorgan Chase", "432.92"),
            "<tr><th colspan=\"3\">Separator</th></tr>".to_string(),
            "<tr></tr>".to_string(),
            bank_row(2, "Bank of America", "231.52"),
        ]);

        let banks = TableExtractor::new().extract(&html)?;

        assert_eq!(banks.len(), 2);
        assert_eq!(banks[1].name, "Bank of America");
        Ok(())
    }

    #[test]
    fn test_only_first_table_body_is_read() -> Result<(), ExtractError> {
        let first = page(&[bank_row(1, "HSBC", "160.68")]);
        let html = first.replace(
            "</body>",
            &format!(
                "<table><tbody>{}</tbody></table></body>",
                bank_row(1, "Somewhere Else", "1.0")
            ),
        );

        let banks = TableExtractor::new().extract(&html)?;

        assert_eq!(banks.len(), 1);
        assert_eq!(banks[0].name, "HSBC");
        Ok(())
    }

    #[test]
    fn test_page_without_table_body() {
        let result = TableExtractor::new().extract("<html><body><p>gone</p></body></html>");
        assert_eq!(result, Err(ExtractError::NoTableBody));
    }

    #[test]
    fn test_non_numeric_market_cap_fails() {
        let html = page(&[
            bank_row(1, "JPMorgan Chase", "432.92"),
            bank_row(2, "Bank of America", "n/a"),
        ]);

        let result = TableExtractor::new().extract(&html);

        // Row 0 is the header row.
        assert_eq!(
            result,
            Err(ExtractError::InvalidMarketCap {
                row: 2,
                value: "n/a\n".to_string()
            })
        );
    }

    #[test]
    fn test_row_missing_name_link_fails() {
        let html = page(&["<tr><td>1</td><td>No link here</td><td>10.0</td></tr>".to_string()]);

        let result = TableExtractor::new().extract(&html);

        assert_eq!(result, Err(ExtractError::MissingName { row: 1 }));
    }

    #[test]
    fn test_row_missing_market_cap_cell_fails() {
        let html = page(&[
            "<tr><td>1</td><td><span></span> <a href=\"/wiki/X\">X Bank</a></td></tr>".to_string(),
        ]);

        let result = TableExtractor::new().extract(&html);

        assert_eq!(result, Err(ExtractError::MissingMarketCap { row: 1 }));
    }

    #[test]
    fn test_parse_market_cap_strips_newlines() {
        assert_eq!(parse_market_cap("432.92\n"), Some(432.92));
        assert_eq!(parse_market_cap("\n1\n00.5\n"), Some(100.5));
        assert_eq!(parse_market_cap("abc"), None);
    }
}
