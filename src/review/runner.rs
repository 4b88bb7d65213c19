//! External reviewer invocation.
//!
//! Spawns the reviewer command, feeds it the review prompt on stdin, and
//! extracts the typed verdict from whatever it prints. Model output is not
//! trusted to be clean JSON, so a bounded number of attempts papers over the
//! occasional unparseable reply.

use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use super::verdict::ReviewVerdict;
use crate::error::ReviewError;
use crate::utils::json_extraction::extract_json;

/// Default reviewer program.
const DEFAULT_REVIEWER_PROGRAM: &str = "claude";

/// Default arguments for the reviewer program.
const DEFAULT_REVIEWER_ARGS: &[&str] = &["--print"];

/// Maximum attempts when the reviewer returns unparseable output.
const MAX_REVIEW_ATTEMPTS: u32 = 3;

/// Prompt template for the coherence review.
const REVIEW_PROMPT_TEMPLATE: &str = r#"You are a feature-spec reviewer. Assess whether the following spec is COHERENT: internally consistent, implementable as written, with no contradictory or missing requirements.

Evaluate:
1. CONSISTENCY: do any requirements contradict each other?
2. COMPLETENESS: are the routes, data models, and flows the spec references actually defined in it?
3. FEASIBILITY: can the described behavior be implemented as written?

You MUST respond with ONLY a valid JSON object in this exact format:
{
  "issues": [
    {
      "severity": "critical" | "major" | "minor",
      "description": "<what is wrong>",
      "fix_hint": "<how to resolve it>"
    }
  ],
  "coherent": <true or false>
}

Set "coherent" to false when any critical issue exists. An empty "issues" array with "coherent": true means the spec is ready to implement.

Spec to review:

{document}"#;

/// Configuration for the external reviewer command.
#[derive(Debug, Clone)]
pub struct ReviewerConfig {
    /// Program to execute.
    pub program: String,
    /// Fixed arguments passed to the program.
    pub args: Vec<String>,
    /// Attempts before an unparseable reply becomes an error.
    pub max_attempts: u32,
}

impl Default for ReviewerConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_REVIEWER_PROGRAM.to_string(),
            args: DEFAULT_REVIEWER_ARGS.iter().map(|s| s.to_string()).collect(),
            max_attempts: MAX_REVIEW_ATTEMPTS,
        }
    }
}

impl ReviewerConfig {
    /// Parses a whitespace-separated command line into a configuration.
    pub fn from_command_line(cmdline: &str) -> Result<Self, ReviewError> {
        let mut parts = cmdline.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| ReviewError::InvalidCommand("empty command line".to_string()))?;
        Ok(Self {
            program: program.to_string(),
            args: parts.map(|s| s.to_string()).collect(),
            max_attempts: MAX_REVIEW_ATTEMPTS,
        })
    }

    /// Sets the attempt bound for unparseable replies.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

/// Runs coherence reviews through an external LLM command.
#[derive(Debug)]
pub struct Reviewer {
    config: ReviewerConfig,
}

impl Reviewer {
    /// Creates a reviewer with the given configuration.
    pub fn new(config: ReviewerConfig) -> Self {
        Self { config }
    }

    /// Creates a reviewer with the default `claude --print` configuration.
    pub fn with_defaults() -> Self {
        Self::new(ReviewerConfig::default())
    }

    /// Reviews a document and returns the typed verdict.
    ///
    /// Retries up to the configured attempt bound when a run fails or its
    /// output contains no parseable verdict; the last error is surfaced once
    /// attempts are exhausted.
    pub async fn review(&self, document: &str) -> Result<ReviewVerdict, ReviewError> {
        let prompt = build_review_prompt(document);
        let attempts = self.config.max_attempts.max(1);

        let mut result = self.attempt_review(&prompt).await;
        for attempt in 2..=attempts {
            let Err(err) = &result else { break };
            warn!(
                attempt,
                max_attempts = attempts,
                error = %err,
                "Review attempt failed, retrying"
            );
            result = self.attempt_review(&prompt).await;
        }
        result
    }

    /// Runs the reviewer once and extracts the verdict from its output.
    async fn attempt_review(&self, prompt: &str) -> Result<ReviewVerdict, ReviewError> {
        let mut child = Command::new(&self.config.program)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ReviewError::Spawn {
                program: self.config.program.clone(),
                source: e,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(prompt.as_bytes()).await?;
            // Dropping the handle closes the pipe so the child sees EOF.
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(ReviewError::ReviewerFailed {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.trim().is_empty() {
            return Err(ReviewError::EmptyResponse);
        }

        debug!(bytes = stdout.len(), "Reviewer responded, extracting verdict");
        Ok(extract_json(&stdout)?)
    }
}

/// Fills the review prompt template with the document under review.
fn build_review_prompt(document: &str) -> String {
    REVIEW_PROMPT_TEMPLATE.replace("{document}", document)
}
