//! Extracts the layer structure of Photoshop documents as deterministic
//! JSON.
//!
//! The pipeline has three stages, one crate each: `stratum-psd` reads the
//! binary container into a source tree, `stratum-extract` filters it down
//! to the visible outline, and this crate renders the result. Each stage
//! either succeeds completely or fails the whole run.

pub mod error;
pub mod render;

pub use error::StratumError;
pub use stratum_extract::{
    CanvasBounds, FilterPolicy, LayerBounds, MalformedNodeError, Outline, OutlineBody,
    OutlineNode, TextContent, extract, flatten,
};
pub use stratum_psd::{LoadError, load, parse_bytes};
pub use stratum_types::{Canvas, Document, Group, Layer, Node, Rect, clipping};

use std::io::Write;
use std::path::Path;

/// Loads the document at `path` and extracts its filtered outline.
pub fn outline_file(
    path: impl AsRef<Path>,
    policy: &FilterPolicy,
) -> Result<Outline, StratumError> {
    let document = stratum_psd::load(path)?;
    let outline = stratum_extract::extract(&document, policy)?;
    log::debug!(
        "outline has {} nodes across {} top-level children",
        flatten(&outline.children).len(),
        outline.children.len()
    );
    Ok(outline)
}

/// Renders `outline` and writes it to `out`, followed by a newline.
///
/// The payload is rendered in full before the first byte is written, so
/// a serialization failure leaves `out` untouched.
pub fn write_outline(outline: &Outline, mut out: impl Write) -> Result<(), StratumError> {
    let mut payload = render::to_json(outline)?;
    payload.push('\n');
    out.write_all(payload.as_bytes())?;
    Ok(())
}
