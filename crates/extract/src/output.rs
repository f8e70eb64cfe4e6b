//! Output types of the extraction pass.
//!
//! These records are what the serializer renders: a root carrying the canvas
//! size, and a tree of nodes that are either groups (with children) or leaf
//! layers (with a bounding box and optional text). The two shapes share the
//! `id`/`name` header and are flattened into a single JSON object per node.

use serde::Serialize;
use stratum_types::Rect;

/// The extracted description of a whole document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outline {
    /// Canvas dimensions. The canvas origin is implicit, so there is no x/y.
    pub bbox: CanvasBounds,
    /// Surviving top-level nodes in document order.
    pub children: Vec<OutlineNode>,
}

/// Width and height of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CanvasBounds {
    pub w: u32,
    pub h: u32,
}

/// One extracted node. Serializes as `{id, name, children}` for groups and
/// `{id, name, bbox[, text]}` for layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineNode {
    pub id: u32,
    pub name: String,
    #[serde(flatten)]
    pub body: OutlineBody,
}

/// The shape-specific part of an extracted node: exactly one of a child
/// list or a bounding box, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutlineBody {
    Group {
        children: Vec<OutlineNode>,
    },
    Layer {
        bbox: LayerBounds,
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<TextContent>,
    },
}

/// A layer's bounding box, copied verbatim from the source rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayerBounds {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl From<Rect> for LayerBounds {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            w: rect.width,
            h: rect.height,
        }
    }
}

/// The text payload of a text layer, kept verbatim (whitespace and newlines
/// included).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextContent {
    pub value: String,
}

impl OutlineNode {
    pub fn group(id: u32, name: impl Into<String>, children: Vec<OutlineNode>) -> Self {
        Self {
            id,
            name: name.into(),
            body: OutlineBody::Group { children },
        }
    }

    pub fn layer(
        id: u32,
        name: impl Into<String>,
        bbox: LayerBounds,
        text: Option<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            body: OutlineBody::Layer {
                bbox,
                text: text.map(|value| TextContent { value }),
            },
        }
    }

    /// The node's children, or an empty slice for leaf layers.
    pub fn children(&self) -> &[OutlineNode] {
        match &self.body {
            OutlineBody::Group { children } => children,
            OutlineBody::Layer { .. } => &[],
        }
    }
}
