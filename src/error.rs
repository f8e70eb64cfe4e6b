//! Unified error type for the extraction pipeline.

use stratum_extract::MalformedNodeError;
use stratum_psd::LoadError;
use thiserror::Error;

/// Every failure the command line can surface. All of them are fatal;
/// the tool never emits partial output.
#[derive(Error, Debug)]
pub enum StratumError {
    #[error("load error: {0}")]
    Load(#[from] LoadError),
    #[error("extraction error: {0}")]
    Malformed(#[from] MalformedNodeError),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}
