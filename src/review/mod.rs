//! Coherence review of spec documents via an external LLM reviewer.
//!
//! The reviewer is any command that reads a prompt on stdin and writes a
//! free-form reply to stdout (by default the `claude` CLI in print mode).
//! The reply is expected to contain a JSON verdict somewhere in the text;
//! [`crate::utils::json_extraction`] digs it out.

mod runner;
mod verdict;

pub use runner::{Reviewer, ReviewerConfig};
pub use verdict::{ReviewIssue, ReviewVerdict, Severity};
