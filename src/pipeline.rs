// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::config::Config;
use crate::currencies;
use crate::db;
use crate::extract::TableExtractor;
use crate::marketcaps::{export_market_caps_csv, store_market_caps};
use crate::page::PageFetcher;
use crate::progress_log::ProgressLogger;
use crate::queries::{run_query, QueryOutput};
use anyhow::{Context, Result};
use tracing::info;

/// Where the page markup comes from.
pub trait PageSource {
    async fn fetch(&self, url: &str) -> Result<String>;
}

impl PageSource for PageFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        PageFetcher::fetch(self, url).await
    }
}

/// The three reports printed at the end of a run.
pub fn report_queries(table_name: &str) -> [String; 3] {
    [
        format!("SELECT * FROM {}", table_name),
        format!("SELECT AVG(MC_GBP_Billion) FROM {}", table_name),
        format!("SELECT Name from {} LIMIT 5", table_name),
    ]
}

/// Scrape, convert, write the CSV and the table, then print the reports.
///
/// Every stage is awaited before the next starts and the first failure ends
/// the run. Returns the report results in query order.
pub async fn run<S: PageSource>(config: &Config, source: &S) -> Result<Vec<QueryOutput>> {
    let logger = ProgressLogger::new(&config.log_path);
    info!("stage log at {}", logger.path().display());
    logger.log("Preliminaries complete. Initiating ETL process");

    let html = source.fetch(&config.url).await?;
    let banks = TableExtractor::new()
        .extract(&html)
        .with_context(|| format!("Failed to extract bank table from {}", config.url))?;
    info!("extracted {} banks", banks.len());
    logger.log("Data extraction complete. Initiating Transformation process");

    let market_caps = currencies::transform(banks, &config.exchange_rate_path)?;
    logger.log("Data transformation complete. Initiating Loading process");

    export_market_caps_csv(&market_caps, &config.output_csv_path)?;
    logger.log("Data saved to CSV file");

    let pool = db::create_db_pool(&config.db_url()).await?;
    logger.log("SQL Connection initiated.");

    store_market_caps(&pool, &market_caps, &config.table_name).await?;
    logger.log("Data loaded to Database as a table, Executing queries");

    let mut results = Vec::new();
    for query in report_queries(&config.table_name) {
        results.push(run_query(&pool, &query).await?);
        logger.log("Process Complete");
    }

    db::close(pool).await;
    logger.log("Server Connection closed");

    Ok(results)
}
