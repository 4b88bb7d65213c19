//! specforge: coherence gate for feature specs.
//!
//! Runs an external LLM reviewer over a spec document, extracts the
//! structured verdict from the model's free-form reply, and automates
//! feature-branch setup when the verdict is coherent.

// Core modules
pub mod cli;
pub mod error;
pub mod git;
pub mod review;
pub mod utils;

// Re-export commonly used types
pub use error::{GitError, ReviewError};
pub use review::{ReviewIssue, ReviewVerdict, Reviewer, ReviewerConfig, Severity};
pub use utils::json_extraction::{extract_json, JsonExtractionError};
