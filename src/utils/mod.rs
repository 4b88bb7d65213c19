//! Shared utility functions for specforge.
//!
//! Holds the JSON extraction core used to parse structured verdicts out of
//! free-form reviewer output.

pub mod json_extraction;

pub use json_extraction::{extract_json, JsonExtractionError};
