// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

mod config;
mod currencies;
mod db;
mod error;
mod extract;
mod marketcaps;
mod models;
mod page;
mod pipeline;
mod progress_log;
mod queries;

use anyhow::Result;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();

    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let config = config::load_config()?;
    info!(url = %config.url, table = %config.table_name, "starting banks ETL");

    pipeline::run(&config, &page::PageFetcher::new()).await?;

    info!("all done");
    Ok(())
}
