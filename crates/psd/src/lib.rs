//! Loader for layered Photoshop documents.
//!
//! Reads just enough of the binary container to recover the layer tree:
//! canvas dimensions, group nesting, names, identifiers, bounds,
//! visibility, clipping, and text content. Pixel data is never decoded.

mod cursor;
mod descriptor;
mod reader;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use stratum_types::Document;
use thiserror::Error;

/// Failures while reading a document file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("not a layered-image document (bad file signature)")]
    BadSignature,
    #[error("unsupported document version {0}, only version 1 is supported")]
    UnsupportedVersion(u16),
    #[error("corrupt document: {0}")]
    Corrupt(String),
}

/// Reads and parses the document at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Document, LoadError> {
    let path = path.as_ref();
    log::debug!("loading document from {}", path.display());
    let data = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_bytes(&data)
}

/// Parses a document already held in memory.
pub fn parse_bytes(data: &[u8]) -> Result<Document, LoadError> {
    reader::parse(data)
}
