use thiserror::Error;

use crate::report::ReportError;

/// Startup problems. Any of these stops the process before it serves.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing API key {0}: set it in the environment or a .env file")]
    MissingSecret(&'static str),
    #[error("invalid setting: {0}")]
    InvalidSetting(String),
}

/// Failure of one pipeline step. The display always carries the
/// underlying provider or renderer message.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("evidence retrieval failed: {0:#}")]
    Retrieval(anyhow::Error),
    #[error("verdict synthesis failed: {0:#}")]
    Synthesis(anyhow::Error),
    #[error("report rendering failed: {0}")]
    Rendering(#[from] ReportError),
}
