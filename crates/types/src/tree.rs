//! The in-memory representation of a layered document after loading but
//! before extraction: a canvas plus an ordered tree of groups and layers.

use crate::geometry::{Canvas, Rect};

/// Well-known values of the per-layer clipping byte.
pub mod clipping {
    /// The layer does not clip ("base" value).
    pub const BASE: u8 = 0;
    /// The layer clips to the layer below it.
    pub const NON_BASE: u8 = 1;
}

/// A loaded document: canvas dimensions and the top-level layer stack in
/// document order (top-to-bottom, as shown in the layers palette).
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub canvas: Canvas,
    pub children: Vec<Node>,
}

/// A single entry in the layer tree.
///
/// Exactly two shapes exist: a group carrying children, or a leaf layer
/// carrying geometry and an optional text payload. Attributes the container
/// format guarantees (name, visibility, clipping) are plain fields; the layer
/// identifier comes from an optional tagged block and is therefore `Option`.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Group(Group),
    Layer(Layer),
}

/// A layer group and its ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: Option<u32>,
    pub name: String,
    pub visible: bool,
    pub clipping: u8,
    pub children: Vec<Node>,
}

/// A leaf layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub id: Option<u32>,
    pub name: String,
    pub bbox: Rect,
    pub text: Option<String>,
    pub visible: bool,
    pub clipping: u8,
}

impl Node {
    pub fn id(&self) -> Option<u32> {
        match self {
            Node::Group(group) => group.id,
            Node::Layer(layer) => layer.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Group(group) => &group.name,
            Node::Layer(layer) => &layer.name,
        }
    }

    pub fn visible(&self) -> bool {
        match self {
            Node::Group(group) => group.visible,
            Node::Layer(layer) => layer.visible,
        }
    }

    pub fn clipping(&self) -> u8 {
        match self {
            Node::Group(group) => group.clipping,
            Node::Layer(layer) => layer.clipping,
        }
    }
}
