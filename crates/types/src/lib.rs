pub mod geometry;
pub mod tree;

pub use geometry::{Canvas, Rect};
pub use tree::{Document, Group, Layer, Node, clipping};
