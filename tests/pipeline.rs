mod support;

use std::sync::Arc;

use factcheck_rs::retrieve::retrieve_evidence;
use factcheck_rs::{CheckOutcome, CheckState, FactChecker, VerdictLabel};
use proptest::prelude::*;
use support::{contains, hit, report_lines, FakeLlm, FakeSearcher};

fn ready(state: CheckState) -> CheckOutcome {
    match state {
        CheckState::Ready(out) => out,
        other => panic!("expected ready, got {other:?}"),
    }
}

fn checker(search: &Arc<FakeSearcher>, llm: &Arc<FakeLlm>) -> FactChecker {
    FactChecker::new(search.clone(), llm.clone(), 4)
}

#[tokio::test]
async fn no_results_still_synthesizes_and_renders() {
    let search = Arc::new(FakeSearcher::returning(vec![]));
    let llm = Arc::new(FakeLlm::answering("VERDICT: FALSE\nNothing supports a green sky."));

    let state = checker(&search, &llm).submit("The sky is green").await;
    let out = ready(state);

    assert_eq!(llm.calls(), 1);
    let prompt = llm.last_prompt().unwrap();
    assert!(prompt.contains("\"The sky is green\""));
    assert!(prompt.contains("Using these search results:\n\nWrite a professional summary."));

    assert!(out.evidence.is_empty());
    assert_eq!(out.evidence.sources_text(), "");
    assert_eq!(out.verdict.label, VerdictLabel::False);
    assert!(out.report.starts_with(b"%PDF-"));
    assert!(contains(&out.report, b"Sources Found:"));
}

#[tokio::test]
async fn blank_claim_stays_idle_without_calls() {
    let search = Arc::new(FakeSearcher::returning(vec![hit("t", "u", "c")]));
    let llm = Arc::new(FakeLlm::answering("VERDICT: TRUE"));
    let c = checker(&search, &llm);

    for input in ["", "   ", "\n\t "] {
        assert!(matches!(c.submit(input).await, CheckState::Idle));
    }
    assert_eq!(search.calls(), 0);
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn search_timeout_fails_before_synthesis() {
    let search = Arc::new(FakeSearcher::failing("operation timed out"));
    let llm = Arc::new(FakeLlm::answering("VERDICT: TRUE"));

    let state = checker(&search, &llm).submit("Apple released a foldable phone today").await;
    let msg = match state {
        CheckState::Failed(msg) => msg,
        other => panic!("expected failure, got {other:?}"),
    };

    assert!(msg.starts_with("Error: "));
    assert!(msg.contains("operation timed out"));
    assert_eq!(search.calls(), 1);
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn emoji_in_verdict_is_replaced_in_report() {
    let search = Arc::new(FakeSearcher::returning(vec![hit("News", "https://n", "body")]));
    let llm = Arc::new(FakeLlm::answering("VERDICT: TRUE\nConfirmed by launch 🚀 coverage."));

    let state = checker(&search, &llm).submit("A rocket launched").await;
    let out = ready(state);

    assert!(out.verdict.text.contains('🚀'));
    assert!(contains(&out.report, b"Confirmed by launch ? coverage."));
    assert!(!contains(&out.report, "🚀".as_bytes()));
}

#[tokio::test]
async fn context_and_sources_follow_retrieval_order() {
    let search = Arc::new(FakeSearcher::returning(vec![
        hit("First", "https://1", "one"),
        hit("Second", "https://2", "two"),
    ]));
    let llm = Arc::new(FakeLlm::answering("VERDICT: UNVERIFIED"));

    let state = checker(&search, &llm).submit("claim").await;
    let out = ready(state);

    assert!(llm.last_prompt().unwrap().contains("First: one\nSecond: two"));
    assert_eq!(out.evidence.sources_text(), "- First (https://1)\n- Second (https://2)");
    let lines = report_lines(&out.report);
    let at = lines.iter().position(|l| l == "Sources Found:").unwrap();
    assert_eq!(lines[at + 1..], ["- First (https://1)", "- Second (https://2)"]);
}

#[tokio::test]
async fn identical_runs_give_identical_reports() {
    let search = Arc::new(FakeSearcher::returning(vec![hit("T", "https://t", "c")]));
    let llm = Arc::new(FakeLlm::answering("VERDICT: TRUE\nYes."));
    let c = checker(&search, &llm);

    let (CheckState::Ready(a), CheckState::Ready(b)) = (c.submit("same").await, c.submit("same").await) else {
        panic!("expected two ready states");
    };
    assert_eq!(a.report, b.report);
}

proptest! {
    #[test]
    fn citations_match_results_one_to_one(
        items in proptest::collection::vec(("[A-Za-z0-9 ]{0,12}", "[a-z:/.]{0,16}", ".{0,20}"), 0..=4)
    ) {
        let results: Vec<_> = items.iter().map(|(t, u, c)| hit(t, u, c)).collect();
        let search = FakeSearcher::returning(results.clone());
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let ev = rt.block_on(retrieve_evidence(&search, "claim", 4)).unwrap();

        let lines = ev.citation_lines();
        prop_assert_eq!(lines.len(), results.len());
        for (line, r) in lines.iter().zip(&results) {
            prop_assert_eq!(line, &format!("{} ({})", r.title, r.url));
        }
    }
}
