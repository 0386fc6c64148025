// src/tavily.rs
use anyhow::{bail, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::types::SearchResult;

pub const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

#[async_trait::async_trait]
pub trait Searcher: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>>;
}

#[derive(Debug, Deserialize)]
struct TavilyResp {
    #[serde(default)]
    results: Vec<SearchResult>,
}

pub struct Tavily {
    http: Client,
    key: String,
    base_url: String,
}

impl Tavily {
    pub fn new(key: String, base_url: &str, timeout_ms: Option<u64>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(ms) = timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let http = builder.build()?;
        Ok(Self { http, key, base_url: base_url.trim_end_matches('/').to_string() })
    }
}

#[async_trait::async_trait]
impl Searcher for Tavily {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>> {
        let resp = self.http
            .post(format!("{}/search", self.base_url))
            .bearer_auth(&self.key)
            .json(&serde_json::json!({
                "query": query,
                "max_results": max_results,
                "search_depth": "basic",
            }))
            .send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("search provider returned {status}: {}", body.trim());
        }

        let parsed = resp.json::<TavilyResp>().await?;
        Ok(parsed.results)
    }
}
