use serde::{Deserialize, Serialize};

/// One record returned by the search provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub content: String,
}

impl SearchResult {
    /// Human-readable citation: `title (url)`.
    pub fn citation_line(&self) -> String {
        format!("{} ({})", self.title, self.url)
    }

    /// Line fed to the model: `title: content`.
    pub fn context_line(&self) -> String {
        format!("{}: {}", self.title, self.content)
    }
}

/// The bounded, ordered evidence retrieved for one claim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EvidenceSet {
    pub results: Vec<SearchResult>,
}

impl EvidenceSet {
    pub fn citation_lines(&self) -> Vec<String> {
        self.results.iter().map(SearchResult::citation_line).collect()
    }

    pub fn context_lines(&self) -> Vec<String> {
        self.results.iter().map(SearchResult::context_line).collect()
    }

    /// Citations as a bulleted block, one per line.
    pub fn sources_text(&self) -> String {
        self.results
            .iter()
            .map(|r| format!("- {}", r.citation_line()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Context lines joined with newlines; empty when nothing was found.
    pub fn context_text(&self) -> String {
        self.context_lines().join("\n")
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictLabel {
    True,
    False,
    Unverified,
}

impl VerdictLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictLabel::True => "TRUE",
            VerdictLabel::False => "FALSE",
            VerdictLabel::Unverified => "UNVERIFIED",
        }
    }
}

/// Raw model answer plus the tag read from it. The text is never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub label: VerdictLabel,
    pub text: String,
}

/// Everything a successful submission produces.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub claim: String,
    pub evidence: EvidenceSet,
    pub verdict: Verdict,
    pub report: Vec<u8>,
}
