//! Request and response bodies for the JSON API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptRequest {
    pub transcript: String,
    /// Overrides the configured report patient name.
    #[serde(default)]
    pub patient_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeywordRequest {
    pub text: String,
    #[serde(default)]
    pub top_n: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeywordResponse {
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
