//! Structured clinical reports from physician-patient transcripts.

pub mod api;
pub mod cli;
pub mod clinical;
pub mod config;
pub mod error;
pub mod logging;
pub mod nlp;
pub mod pipeline;
pub mod transcript;

pub use error::{ModelError, ModelResult};
pub use nlp::ModelSet;
pub use pipeline::{run_pipeline, Pipeline, PipelineResult};
