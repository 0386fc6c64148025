pub mod config;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod report;
pub mod retrieve;
pub mod server;
pub mod tavily;
pub mod types;
pub mod verification;

pub use error::{CheckError, ConfigError};
pub use pipeline::{CheckState, FactChecker};
pub use types::{CheckOutcome, EvidenceSet, SearchResult, Verdict, VerdictLabel};
