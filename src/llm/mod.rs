use anyhow::Result;

pub mod openai;

/// Single-turn completion: one user message in, the model's text out.
#[async_trait::async_trait]
pub trait Llm: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}
