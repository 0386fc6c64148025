use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use factcheck_rs::config::{Cli, Settings};
use factcheck_rs::llm::openai::LlmClient;
use factcheck_rs::tavily::Tavily;
use factcheck_rs::{server, FactChecker};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = match Settings::from_cli(Cli::parse()) {
        Ok(s) => s,
        Err(err) => {
            error!(error = %err, "configuration error");
            return Err(err.into());
        }
    };

    let searcher = Tavily::new(
        settings.tavily_api_key.clone(),
        &settings.search_base_url,
        settings.search_timeout_ms,
    )?;
    let llm = LlmClient::new(
        settings.model.clone(),
        Some(settings.llm_base_url.clone()),
        Some(settings.groq_api_key.clone()),
    );
    info!(model = llm.model(), max_results = settings.max_results, "clients ready");

    let checker = FactChecker::new(Arc::new(searcher), Arc::new(llm), settings.max_results);
    server::run_server(checker, &settings.bind).await
}
