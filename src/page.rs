// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;

/// Downloads pages as text. No retries, no timeout beyond the client defaults.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub async fn fetch(&self, url: &str) -> Result<String> {
        if url.is_empty() {
            anyhow::bail!("url empty");
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        let status = response.status();
        let text = response.text().await.context("Failed to get response text")?;

        if !status.is_success() {
            anyhow::bail!("Request to {} failed with {}", url, status);
        }

        debug!(url, bytes = text.len(), "page fetched");
        Ok(text)
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_url_rejected() {
        let fetcher = PageFetcher::new();
        assert!(fetcher.fetch("").await.is_err());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_an_error() {
        // Nothing listens on port 1.
        let fetcher = PageFetcher::new();
        let result = fetcher.fetch("http://127.0.0.1:1/").await;
        assert!(result.is_err());
    }
}
