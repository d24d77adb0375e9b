// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::models::BankMarketCap;
use anyhow::{Context, Result};
use csv::Writer;
use sqlx::sqlite::SqlitePool;
use std::path::Path;
use tracing::debug;

// Whole numbers keep their `.0` so the columns read back as floats.
fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

/// Write the market caps to CSV, replacing any existing file.
///
/// The first column is the 0-based row position under an empty header.
pub fn export_market_caps_csv(records: &[BankMarketCap], path: &Path) -> Result<()> {
    let mut writer = Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    // Write headers
    let mut header = vec![""];
    header.extend(BankMarketCap::COLUMNS);
    writer.write_record(&header)?;

    // Write data
    for (index, record) in records.iter().enumerate() {
        writer.write_record(&[
            index.to_string(),
            record.name.clone(),
            format_float(record.mc_usd_billion),
            format_float(record.mc_gbp_billion),
            format_float(record.mc_eur_billion),
            format_float(record.mc_inr_billion),
        ])?;
    }

    writer.flush()?;
    debug!(rows = records.len(), path = %path.display(), "csv written");
    Ok(())
}

/// Read a file written by [`export_market_caps_csv`] back into records.
#[cfg(test)]
pub fn read_csv(path: &Path) -> Result<Vec<BankMarketCap>> {
    let mut reader = csv::Reader::from_path(path)?;
    let records = reader
        .deserialize()
        .collect::<Result<Vec<BankMarketCap>, csv::Error>>()?;
    Ok(records)
}

/// Quote a table name for use as an SQL identifier.
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn column_type(column: &str) -> &'static str {
    if column == "Name" {
        "TEXT"
    } else {
        "REAL"
    }
}

/// Replace `table_name` with a fresh table holding every record.
pub async fn store_market_caps(
    pool: &SqlitePool,
    records: &[BankMarketCap],
    table_name: &str,
) -> Result<()> {
    let table = quote_identifier(table_name);
    let columns = BankMarketCap::COLUMNS
        .iter()
        .map(|c| format!("\"{}\" {}", c, column_type(c)))
        .collect::<Vec<_>>()
        .join(", ");

    let drop_sql = format!("DROP TABLE IF EXISTS {}", table);
    let create_sql = format!("CREATE TABLE {} ({})", table, columns);
    let insert_sql = format!(
        r#"
        INSERT INTO {} ("Name", "MC_USD_Billion", "MC_GBP_Billion", "MC_EUR_Billion", "MC_INR_Billion")
        VALUES (?, ?, ?, ?, ?)
        "#,
        table
    );

    let mut tx = pool.begin().await?;

    sqlx::query(&drop_sql)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to drop table {}", table_name))?;
    sqlx::query(&create_sql)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to create table {}", table_name))?;

    for record in records {
        sqlx::query(&insert_sql)
            .bind(&record.name)
            .bind(record.mc_usd_billion)
            .bind(record.mc_gbp_billion)
            .bind(record.mc_eur_billion)
            .bind(record.mc_inr_billion)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to insert {}", record.name))?;
    }

    tx.commit().await?;
    debug!(rows = records.len(), table = table_name, "table replaced");
    Ok(())
}
