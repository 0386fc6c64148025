use std::sync::Arc;

use tracing::{debug, info_span, warn, Instrument};

use crate::error::CheckError;
use crate::llm::Llm;
use crate::report::create_report;
use crate::retrieve::retrieve_evidence;
use crate::tavily::Searcher;
use crate::types::CheckOutcome;
use crate::verification::synthesize_verdict;

pub const DEFAULT_MAX_RESULTS: usize = 4;

/// Where one submission ended up. Nothing carries over between submissions.
#[derive(Debug)]
pub enum CheckState {
    /// No usable claim was given; nothing was called.
    Idle,
    Ready(CheckOutcome),
    /// User-facing message, already prefixed with `Error:`.
    Failed(String),
}

/// Owns the provider clients for the life of the process and runs one
/// retrieve, synthesize, render sequence per claim.
#[derive(Clone)]
pub struct FactChecker {
    searcher: Arc<dyn Searcher>,
    llm: Arc<dyn Llm>,
    max_results: usize,
}

impl FactChecker {
    pub fn new(searcher: Arc<dyn Searcher>, llm: Arc<dyn Llm>, max_results: usize) -> Self {
        Self { searcher, llm, max_results }
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// The whole pipeline for a non-blank claim. Steps run strictly in order;
    /// the first error ends the run and no report is built.
    pub async fn run(&self, claim: &str) -> Result<CheckOutcome, CheckError> {
        debug!(max_results = self.max_results, "retrieving evidence");
        let evidence = retrieve_evidence(self.searcher.as_ref(), claim, self.max_results)
            .await
            .map_err(CheckError::Retrieval)?;

        debug!(results = evidence.len(), "synthesizing verdict");
        let verdict = synthesize_verdict(self.llm.as_ref(), claim, &evidence.context_text())
            .await
            .map_err(CheckError::Synthesis)?;

        debug!(label = verdict.label.as_str(), "rendering report");
        let report = create_report(claim, &verdict.text, &evidence.sources_text())?;
        debug!(bytes = report.len(), "report ready");

        Ok(CheckOutcome { claim: claim.to_string(), evidence, verdict, report })
    }

    /// Failure boundary for a user submission. Blank input stays idle,
    /// any step error becomes a displayable message.
    pub async fn submit(&self, input: &str) -> CheckState {
        let claim = input.trim();
        if claim.is_empty() {
            return CheckState::Idle;
        }

        let span = info_span!("fact_check", claim_len = claim.chars().count());
        match self.run(claim).instrument(span).await {
            Ok(outcome) => CheckState::Ready(outcome),
            Err(err) => {
                warn!(error = %err, "fact check failed");
                CheckState::Failed(format!("Error: {err}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchResult;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Hits(Vec<SearchResult>);
    #[async_trait::async_trait]
    impl Searcher for Hits {
        async fn search(&self, _q: &str, _max: usize) -> anyhow::Result<Vec<SearchResult>> {
            Ok(self.0.clone())
        }
    }

    struct CountingLlm(AtomicUsize);
    #[async_trait::async_trait]
    impl Llm for CountingLlm {
        async fn complete(&self, _prompt: &str) -> anyhow::Result<String> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok("VERDICT: FALSE\nNo source supports this.".into())
        }
    }

    struct BrokenLlm;
    #[async_trait::async_trait]
    impl Llm for BrokenLlm {
        async fn complete(&self, _prompt: &str) -> anyhow::Result<String> {
            anyhow::bail!("401 invalid api key")
        }
    }

    #[tokio::test]
    async fn claim_is_trimmed_before_use() {
        let llm = Arc::new(CountingLlm(AtomicUsize::new(0)));
        let checker = FactChecker::new(Arc::new(Hits(vec![])), llm.clone(), 4);
        match checker.submit("  padded claim \n").await {
            CheckState::Ready(out) => assert_eq!(out.claim, "padded claim"),
            other => panic!("unexpected state {other:?}"),
        }
        assert_eq!(llm.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn synthesis_error_is_surfaced() {
        let checker = FactChecker::new(Arc::new(Hits(vec![])), Arc::new(BrokenLlm), 4);
        match checker.submit("claim").await {
            CheckState::Failed(msg) => {
                assert!(msg.starts_with("Error: verdict synthesis failed"));
                assert!(msg.contains("401 invalid api key"));
            }
            other => panic!("unexpected state {other:?}"),
        }
    }
}
