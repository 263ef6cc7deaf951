//! Runtime configuration utilities for medscribe.

use std::{
    env,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::ensure;
use serde::Deserialize;

use crate::logging::LogFormat;

pub const DEFAULT_PATIENT_NAME: &str = "Janet Jones";
pub const DEFAULT_CURRENT_STATUS: &str = "Occasional backache";
pub const DEFAULT_PROGNOSIS: &str = "Full recovery expected within six months";

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Root folder holding on-disk model artefacts.
    pub models_dir: PathBuf,
    /// Patient name written into the medical report.
    pub patient_name: String,
    /// Current-status field passed through to the report.
    pub current_status: String,
    /// Prognosis field passed through to the report.
    pub prognosis: String,
    /// Lower bound, in tokens, for the narrative summary.
    pub summary_min_length: usize,
    /// Upper bound, in tokens, for the narrative summary.
    pub summary_max_length: usize,
    /// Confidence a sentiment prediction must exceed to leave "Neutral".
    pub sentiment_threshold: f32,
    /// Default number of keyphrases returned by the keyword extractor.
    pub keyword_top_n: usize,
    /// Log line format written to stderr.
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from("./models"),
            patient_name: DEFAULT_PATIENT_NAME.to_string(),
            current_status: DEFAULT_CURRENT_STATUS.to_string(),
            prognosis: DEFAULT_PROGNOSIS.to_string(),
            summary_min_length: 60,
            summary_max_length: 180,
            sentiment_threshold: 0.6,
            keyword_top_n: 10,
            log_format: LogFormat::Full,
        }
    }
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();
        let models_dir = env::var("MODELS_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.models_dir);
        let patient_name = env::var("PATIENT_NAME").unwrap_or(defaults.patient_name);
        let current_status =
            env::var("REPORT_CURRENT_STATUS").unwrap_or(defaults.current_status);
        let prognosis = env::var("REPORT_PROGNOSIS").unwrap_or(defaults.prognosis);

        let settings = Self {
            models_dir,
            patient_name,
            current_status,
            prognosis,
            summary_min_length: parsed_var("SUMMARY_MIN_LENGTH", defaults.summary_min_length),
            summary_max_length: parsed_var("SUMMARY_MAX_LENGTH", defaults.summary_max_length),
            sentiment_threshold: parsed_var("SENTIMENT_THRESHOLD", defaults.sentiment_threshold),
            keyword_top_n: parsed_var("KEYWORD_TOP_N", defaults.keyword_top_n),
            log_format: match env::var("LOG_FORMAT") {
                Ok(value) => value.parse()?,
                Err(_) => defaults.log_format,
            },
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Reject combinations no component can honour.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.summary_min_length <= self.summary_max_length,
            "SUMMARY_MIN_LENGTH ({}) exceeds SUMMARY_MAX_LENGTH ({})",
            self.summary_min_length,
            self.summary_max_length
        );
        ensure!(
            (0.0..=1.0).contains(&self.sentiment_threshold),
            "SENTIMENT_THRESHOLD must lie in [0, 1], got {}",
            self.sentiment_threshold
        );
        Ok(())
    }

    /// Convenience helper for derived model path segments.
    pub fn join_model<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.models_dir.join(path)
    }
}

fn parsed_var<T: FromStr>(key: &str, default: T) -> T {
    parse_or_default(env::var(key).ok().as_deref(), default)
}

/// Parse a trimmed raw value, keeping `default` when it is missing or malformed.
pub fn parse_or_default<T: FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
