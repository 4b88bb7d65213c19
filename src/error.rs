//! Error types for specforge operations.
//!
//! One enum per subsystem: reviewer invocation and git branch automation.
//! The JSON extraction error lives next to the extractor in
//! [`crate::utils::json_extraction`].

use thiserror::Error;

use crate::utils::json_extraction::JsonExtractionError;

/// Errors that can occur while running the external reviewer.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// The reviewer command line could not be interpreted.
    #[error("Invalid reviewer command: {0}")]
    InvalidCommand(String),

    /// The reviewer process could not be started.
    #[error("Failed to run reviewer '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The reviewer exited unsuccessfully.
    #[error("Reviewer exited with non-zero code {code}: {stderr}")]
    ReviewerFailed { code: i32, stderr: String },

    /// The reviewer exited successfully but wrote nothing to stdout.
    #[error("Reviewer produced no output")]
    EmptyResponse,

    /// The reviewer's output contained no parseable verdict.
    #[error("Failed to parse reviewer verdict: {0}")]
    Verdict(#[from] JsonExtractionError),

    /// IO error while talking to the reviewer process.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during git branch operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// The branch name fails git's reference-name rules.
    #[error("Invalid branch name: '{0}'")]
    InvalidBranchName(String),

    /// A git command exited unsuccessfully.
    #[error("git {args} failed: {stderr}")]
    CommandFailed { args: String, stderr: String },

    /// IO error while running git.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
