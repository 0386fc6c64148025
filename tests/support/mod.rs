#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use factcheck_rs::llm::Llm;
use factcheck_rs::tavily::Searcher;
use factcheck_rs::SearchResult;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub struct FakeLlm {
    pub answer: String,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeLlm {
    pub fn answering(answer: &str) -> Self {
        Self { answer: answer.to_string(), prompts: Mutex::new(Vec::new()) }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Llm for FakeLlm {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer.clone())
    }
}

pub struct FakeSearcher {
    pub results: Vec<SearchResult>,
    pub fail_with: Option<String>,
    pub calls: AtomicUsize,
}

impl FakeSearcher {
    pub fn returning(results: Vec<SearchResult>) -> Self {
        Self { results, fail_with: None, calls: AtomicUsize::new(0) }
    }

    pub fn failing(msg: &str) -> Self {
        Self { results: Vec::new(), fail_with: Some(msg.to_string()), calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Searcher for FakeSearcher {
    async fn search(&self, _query: &str, _max_results: usize) -> Result<Vec<SearchResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(msg) => anyhow::bail!("{msg}"),
            None => Ok(self.results.clone()),
        }
    }
}

pub fn hit(title: &str, url: &str, content: &str) -> SearchResult {
    SearchResult { title: title.into(), url: url.into(), content: content.into() }
}

pub fn contains(hay: &[u8], needle: &[u8]) -> bool {
    hay.windows(needle.len()).any(|w| w == needle)
}

/// Text shown by every `Tj` in the report, page by page, in drawing order.
pub fn report_lines(pdf: &[u8]) -> Vec<String> {
    use lopdf::{content::Content, Document, Object};

    let doc = Document::load_mem(pdf).unwrap();
    let mut lines = Vec::new();
    for page_id in doc.get_pages().into_values() {
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        for op in content.operations.iter().filter(|op| op.operator == "Tj") {
            if let Some(Object::String(bytes, _)) = op.operands.first() {
                lines.push(bytes.iter().map(|b| *b as char).collect());
            }
        }
    }
    lines
}
