use crate::{tavily::Searcher, types::*};
use anyhow::Result;

/// One search call for the claim; the answer is capped at `max_results`
/// and keeps provider order. Errors are passed straight up.
pub async fn retrieve_evidence(serp: &dyn Searcher, claim: &str, max_results: usize) -> Result<EvidenceSet> {
    let mut results = serp.search(claim, max_results).await?;
    results.truncate(max_results);
    Ok(EvidenceSet { results })
}
