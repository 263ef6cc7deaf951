//! Typed failures raised at the model seam.

use thiserror::Error;

/// Errors produced while loading or invoking a model handle.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{model} model unavailable: {reason}")]
    Unavailable { model: &'static str, reason: String },

    #[error("{model} inference failed: {reason}")]
    Inference { model: &'static str, reason: String },

    #[error("invalid model configuration: {0}")]
    Config(String),

    #[error("model artefact io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ModelError {
    pub fn unavailable(model: &'static str, reason: impl ToString) -> Self {
        Self::Unavailable {
            model,
            reason: reason.to_string(),
        }
    }

    pub fn inference(model: &'static str, reason: impl ToString) -> Self {
        Self::Inference {
            model,
            reason: reason.to_string(),
        }
    }
}

pub type ModelResult<T> = Result<T, ModelError>;
