//! Error type shared by the series builder, the option parsers and the renderers.

use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    /// A caller-supplied option cannot be honoured for the given input.
    #[error("invalid argument `{option}`: {reason}")]
    InvalidArgument { option: &'static str, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Drawing backend failure (plotters errors are not `Send + Sync`, so they are stringified).
    #[error("render failed: {0}")]
    Render(String),

    #[error("`{program}` exited with {status}")]
    Interpreter { program: String, status: ExitStatus },
}

impl PlotError {
    pub fn invalid(option: &'static str, reason: impl Into<String>) -> Self {
        PlotError::InvalidArgument {
            option,
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = PlotError> = std::result::Result<T, E>;
