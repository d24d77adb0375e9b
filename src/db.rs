// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::{Context, Result};
use sqlx::{
    migrate::MigrateDatabase,
    sqlite::{SqlitePool, SqlitePoolOptions},
    Sqlite,
};

/// Open the database, creating the file if needed.
///
/// The pool holds a single connection so every statement of the run goes
/// through the same handle, one after the other.
pub async fn create_db_pool(db_url: &str) -> Result<SqlitePool> {
    // Create database if it doesn't exist
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        Sqlite::create_database(db_url)
            .await
            .with_context(|| format!("Failed to create database {}", db_url))?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(db_url)
        .await
        .with_context(|| format!("Failed to connect to {}", db_url))?;

    Ok(pool)
}

pub async fn close(pool: SqlitePool) {
    pool.close().await;
}

#[cfg(test)]
pub async fn create_test_pool() -> Result<SqlitePool> {
    create_db_pool("sqlite::memory:").await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_creates_missing_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("Banks.db");
        let db_url = format!("sqlite://{}", path.display());

        let pool = create_db_pool(&db_url).await?;
        assert!(path.exists());

        close(pool).await;
        Ok(())
    }

    #[tokio::test]
    async fn test_close_marks_pool_closed() -> Result<()> {
        let pool = create_test_pool().await?;
        let handle = pool.clone();

        close(pool).await;

        assert!(handle.is_closed());
        Ok(())
    }
}
