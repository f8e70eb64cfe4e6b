//! Filtered extraction of a document's layer tree.
//!
//! This crate turns the source model from `stratum-types` into the outline
//! records the tool serializes: visibility and clipping filtering, group
//! recursion, and the attribute checks that make a node well formed. It has
//! no knowledge of the on-disk file format and performs no I/O.

mod error;
mod extract;
pub mod output;

pub use error::MalformedNodeError;
pub use extract::{FilterPolicy, extract, flatten};
pub use output::{CanvasBounds, LayerBounds, Outline, OutlineBody, OutlineNode, TextContent};
