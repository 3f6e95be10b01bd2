use std::io;

use heapsqueeze_lib::AnalysisError;

pub mod analyze;
pub mod estimates;

#[cfg(test)]
mod analyze_tests;

/// Failure of a command. Printed as `error: <message>` before exiting.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}
