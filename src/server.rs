// src/server.rs
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use crate::pipeline::{CheckState, FactChecker};
use crate::report::{REPORT_FILENAME, REPORT_MIME};
use crate::types::{CheckOutcome, VerdictLabel};

#[derive(Deserialize)]
pub struct CheckReq {
    #[serde(default)]
    pub claim: String,
}

#[derive(Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
enum CheckResp {
    Idle,
    Ready {
        label: VerdictLabel,
        verdict: String,
        citations: Vec<String>,
        sources: String,
        report_filename: &'static str,
        /// Base64 of the PDF built during the run.
        report_pdf: String,
    },
    Failed {
        error: String,
    },
}

async fn index() -> Html<String> {
    Html(render_page("", &CheckState::Idle))
}

async fn submit(State(checker): State<Arc<FactChecker>>, Form(req): Form<CheckReq>) -> Html<String> {
    let state = checker.submit(&req.claim).await;
    Html(render_page(&req.claim, &state))
}

async fn api_check(State(checker): State<Arc<FactChecker>>, Json(req): Json<CheckReq>) -> Response {
    match checker.submit(&req.claim).await {
        CheckState::Idle => Json(CheckResp::Idle).into_response(),
        CheckState::Ready(out) => Json(CheckResp::Ready {
            label: out.verdict.label,
            citations: out.evidence.citation_lines(),
            sources: out.evidence.sources_text(),
            report_filename: REPORT_FILENAME,
            report_pdf: STANDARD.encode(&out.report),
            verdict: out.verdict.text,
        })
        .into_response(),
        CheckState::Failed(error) => (StatusCode::BAD_GATEWAY, Json(CheckResp::Failed { error })).into_response(),
    }
}

/// Inline download link for the report bytes the run produced.
fn report_href(report: &[u8]) -> String {
    format!("data:{REPORT_MIME};base64,{}", STANDARD.encode(report))
}

pub fn router(checker: Arc<FactChecker>) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .route("/api/check", post(api_check))
        .with_state(checker)
}

pub async fn run_server(checker: FactChecker, addr: &str) -> anyhow::Result<()> {
    let app = router(Arc::new(checker));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "serving fact checker");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
    out
}

// Body text keeps its line breaks; attributes need them encoded.
fn escape_text(s: &str) -> String {
    escape_html(s).replace("&#10;", "\n").replace("&#13;", "")
}

const STYLE: &str = "body{font-family:sans-serif;max-width:46rem;margin:2rem auto;padding:0 1rem}\
input[name=claim]{width:100%;padding:.5rem;margin:.5rem 0}\
.ok{background:#e6f4ea;padding:.75rem;border-radius:4px}\
.error{background:#fce8e6;padding:.75rem;border-radius:4px}\
.verdict{white-space:pre-wrap;margin:1rem 0}\
.label{font-weight:bold;padding:.2rem .5rem;border-radius:4px;color:#fff}\
.label-true{background:#188038}.label-false{background:#d93025}.label-unverified{background:#80868b}";

fn render_outcome(out: &CheckOutcome) -> String {
    let label = out.verdict.label.as_str();
    format!(
        "<div class=\"ok\">Analysis Complete!</div>\n\
         <p><span class=\"label label-{class}\">{label}</span></p>\n\
         <div class=\"verdict\">{verdict}</div>\n<hr>\n\
         <h2>Sources Used:</h2>\n<pre>{sources}</pre>\n\
         <p><a class=\"download\" download=\"{REPORT_FILENAME}\" href=\"{href}\">\
         Download Professional Report (PDF)</a></p>\n",
        class = label.to_lowercase(),
        verdict = escape_text(&out.verdict.text),
        sources = escape_text(&out.evidence.sources_text()),
        href = report_href(&out.report),
    )
}

fn render_page(claim: &str, state: &CheckState) -> String {
    let body = match state {
        CheckState::Idle => String::new(),
        CheckState::Ready(out) => render_outcome(out),
        CheckState::Failed(msg) => format!("<div class=\"error\">{}</div>\n", escape_text(msg)),
    };
    format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\">\
         <title>AI Fact Checker Pro</title><style>{STYLE}</style></head><body>\n\
         <h1>Instant Fact Checker Agent</h1>\n\
         <form method=\"post\" action=\"/\">\
         <label for=\"claim\">Enter a claim to verify:</label>\
         <input id=\"claim\" name=\"claim\" value=\"{claim}\" \
         placeholder=\"e.g., Apple released a foldable phone today\">\
         <button type=\"submit\">Check</button></form>\n\
         {body}</body></html>\n",
        claim = escape_html(claim.trim()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_and_quotes() {
        assert_eq!(escape_html("<a href=\"x\">'&'</a>"), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
        assert_eq!(escape_html("a\nb"), "a&#10;b");
        assert_eq!(escape_text("a\r\n<b>"), "a\n&lt;b&gt;");
    }

    #[test]
    fn download_link_is_a_pdf_data_uri() {
        assert_eq!(report_href(b"%PDF-1.4"), "data:application/pdf;base64,JVBERi0xLjQ=");
    }

    #[test]
    fn idle_page_has_form_and_no_result() {
        let page = render_page("", &CheckState::Idle);
        assert!(page.contains("Enter a claim to verify:"));
        assert!(!page.contains("Analysis Complete!"));
        assert!(!page.contains("class=\"error\""));
    }

    #[test]
    fn failed_page_shows_message_without_download() {
        let page = render_page("x", &CheckState::Failed("Error: boom <1>".into()));
        assert!(page.contains("Error: boom &lt;1&gt;"));
        assert!(!page.contains("download="));
    }
}
