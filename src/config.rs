use clap::Parser;

use crate::error::ConfigError;
use crate::llm::openai::{DEFAULT_MODEL, GROQ_BASE_URL};
use crate::pipeline::DEFAULT_MAX_RESULTS;
use crate::tavily;

pub const TAVILY_KEY_VAR: &str = "TAVILY_API_KEY";
pub const GROQ_KEY_VAR: &str = "GROQ_API_KEY";

const MAX_RESULTS_LIMIT: usize = 20;

#[derive(Parser, Debug, Clone)]
#[command(name = "factcheck", version, about = "Check a claim against web search evidence")]
pub struct Cli {
    /// Address the page is served on
    #[arg(long, env = "FACTCHECK_BIND", default_value = "127.0.0.1:8501")]
    pub bind: String,
    /// Chat model used for the verdict
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,
    /// OpenAI-compatible API base
    #[arg(long, default_value = GROQ_BASE_URL)]
    pub llm_base_url: String,
    #[arg(long, default_value = tavily::DEFAULT_BASE_URL)]
    pub search_base_url: String,
    /// Search results fed to the model
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    pub max_results: usize,
    /// Search request timeout; unset leaves the client default
    #[arg(long)]
    pub search_timeout_ms: Option<u64>,
    #[arg(long, env = TAVILY_KEY_VAR, hide = true, hide_env_values = true)]
    pub tavily_api_key: Option<String>,
    #[arg(long, env = GROQ_KEY_VAR, hide = true, hide_env_values = true)]
    pub groq_api_key: Option<String>,
}

/// Validated startup configuration.
#[derive(Clone)]
pub struct Settings {
    pub bind: String,
    pub model: String,
    pub llm_base_url: String,
    pub search_base_url: String,
    pub max_results: usize,
    pub search_timeout_ms: Option<u64>,
    pub tavily_api_key: String,
    pub groq_api_key: String,
}

// Keys never reach Debug output.
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("bind", &self.bind)
            .field("model", &self.model)
            .field("llm_base_url", &self.llm_base_url)
            .field("search_base_url", &self.search_base_url)
            .field("max_results", &self.max_results)
            .field("search_timeout_ms", &self.search_timeout_ms)
            .finish_non_exhaustive()
    }
}

fn valid_api_key(key: &str) -> bool {
    let trimmed = key.trim();
    !trimmed.is_empty() && !trimmed.contains("...")
}

fn require_secret(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(key) if valid_api_key(&key) => Ok(key.trim().to_string()),
        _ => Err(ConfigError::MissingSecret(name)),
    }
}

impl Settings {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let tavily_api_key = require_secret(cli.tavily_api_key, TAVILY_KEY_VAR)?;
        let groq_api_key = require_secret(cli.groq_api_key, GROQ_KEY_VAR)?;

        if cli.max_results == 0 || cli.max_results > MAX_RESULTS_LIMIT {
            return Err(ConfigError::InvalidSetting(format!(
                "--max-results must be between 1 and {MAX_RESULTS_LIMIT}, got {}",
                cli.max_results
            )));
        }
        if cli.model.trim().is_empty() {
            return Err(ConfigError::InvalidSetting("--model must not be empty".into()));
        }

        Ok(Self {
            bind: cli.bind,
            model: cli.model,
            llm_base_url: cli.llm_base_url,
            search_base_url: cli.search_base_url,
            max_results: cli.max_results,
            search_timeout_ms: cli.search_timeout_ms,
            tavily_api_key,
            groq_api_key,
        })
    }
}
