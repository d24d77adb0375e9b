// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::{Context, Result};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::{Column, Executor, Row, Statement, TypeInfo, ValueRef};
use std::fmt;

/// A single cell of a query result.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => write!(f, "None"),
            SqlValue::Integer(v) => write!(f, "{}", v),
            SqlValue::Real(v) => write!(f, "{}", v),
            SqlValue::Text(v) => write!(f, "{}", v),
            SqlValue::Blob(v) => write!(f, "<{} bytes>", v.len()),
        }
    }
}

/// Column names plus rows of a finished query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOutput {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<SqlValue>>,
}

impl QueryOutput {
    /// Every value of `column`, top to bottom.
    #[cfg(test)]
    pub fn column(&self, column: &str) -> Option<Vec<&SqlValue>> {
        let index = self.columns.iter().position(|c| c == column)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }
}

/// Grid with a leading row index and right-aligned columns.
impl fmt::Display for QueryOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return write!(f, "Empty result\nColumns: [{}]", self.columns.join(", "));
        }

        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect();

        let index_width = (self.rows.len() - 1).to_string().len();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                cells
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:index_width$}", "")?;
        for (name, width) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>width$}", name, width = *width)?;
        }

        for (index, row) in cells.iter().enumerate() {
            write!(f, "\n{:<index_width$}", index)?;
            for (cell, width) in row.iter().zip(&widths) {
                write!(f, "  {:>width$}", cell, width = *width)?;
            }
        }
        Ok(())
    }
}

fn decode_value(row: &SqliteRow, index: usize) -> Result<SqlValue> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(SqlValue::Null);
    }

    let type_name = raw.type_info().name().to_string();
    let value = match type_name.as_str() {
        "INTEGER" => SqlValue::Integer(row.try_get(index)?),
        "REAL" => SqlValue::Real(row.try_get(index)?),
        "BLOB" => SqlValue::Blob(row.try_get(index)?),
        _ => SqlValue::Text(row.try_get(index)?),
    };
    Ok(value)
}

/// Execute a query and collect every row.
///
/// Column names come from the prepared statement, so a query without rows
/// still reports its columns.
pub async fn fetch_query(pool: &SqlitePool, query: &str) -> Result<QueryOutput> {
    let statement = pool
        .prepare(query)
        .await
        .with_context(|| format!("Failed to prepare query: {}", query))?;
    let columns = statement
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();

    let rows = sqlx::query(query)
        .fetch_all(pool)
        .await
        .with_context(|| format!("Query failed: {}", query))?;

    let mut output_rows = Vec::with_capacity(rows.len());
    for row in &rows {
        let values = (0..row.len())
            .map(|i| decode_value(row, i))
            .collect::<Result<Vec<_>>>()?;
        output_rows.push(values);
    }

    Ok(QueryOutput {
        columns,
        rows: output_rows,
    })
}

/// Print the query, run it and print its result.
pub async fn run_query(pool: &SqlitePool, query: &str) -> Result<QueryOutput> {
    println!("{}", query);
    let output = fetch_query(pool, query).await?;
    println!("{}", output);
    Ok(output)
}
