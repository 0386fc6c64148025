use crate::{llm::Llm, types::*};
use anyhow::Result;

const VERDICT_TAG: &str = "VERDICT:";

/// The fixed instruction sent to the model. Claim and context go in verbatim.
pub fn build_verify_prompt(claim: &str, context: &str) -> String {
    format!(
        "You are a Fact Checker. Verify this claim: \"{claim}\"\n\
         Using these search results:\n\
         {context}\n\
         Write a professional summary.\n\
         Start with \"VERDICT: [TRUE / FALSE / UNVERIFIED]\".\n\
         Then explain the evidence."
    )
}

/// Reads the tag off the first `VERDICT:` line. Missing, malformed, or the
/// template placeholder echoed back all count as unverified.
pub fn parse_label(text: &str) -> VerdictLabel {
    for line in text.lines() {
        let upper = line.to_uppercase();
        let Some(idx) = upper.find(VERDICT_TAG) else { continue };
        let rest = upper[idx + VERDICT_TAG.len()..]
            .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '*' | '_' | '['));
        let tag: String = rest.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
        if rest[tag.len()..].trim_start().starts_with('/') {
            return VerdictLabel::Unverified;
        }
        return match tag.as_str() {
            "TRUE" => VerdictLabel::True,
            "FALSE" => VerdictLabel::False,
            _ => VerdictLabel::Unverified,
        };
    }
    VerdictLabel::Unverified
}

/// One deterministic completion over the claim and its joined context.
pub async fn synthesize_verdict(client: &dyn Llm, claim: &str, context: &str) -> Result<Verdict> {
    let prompt = build_verify_prompt(claim, context);
    let text = client.complete(&prompt).await?;
    Ok(Verdict { label: parse_label(&text), text })
}
