//! The recursive extraction pass.
//!
//! Walks a loaded [`Document`], drops nodes the filter policy excludes, and
//! converts the survivors into [`Outline`] records. The pass is a pure
//! function over the borrowed source tree: no I/O, no logging, no shared
//! state, and the output order always matches the filtered input order.

use crate::error::MalformedNodeError;
use crate::output::{CanvasBounds, LayerBounds, Outline, OutlineBody, OutlineNode, TextContent};
use stratum_types::{Document, Node, clipping};

/// Decides which nodes the traversal drops.
///
/// The clipping sentinel is an explicit parameter rather than a constant
/// baked into the walk, so callers (and tests) can pin the policy they mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterPolicy {
    /// Nodes whose clipping byte equals this value are excluded together
    /// with their subtree. Every other clipping value passes through.
    pub clip_sentinel: u8,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            clip_sentinel: clipping::NON_BASE,
        }
    }
}

impl FilterPolicy {
    fn excludes(&self, node: &Node) -> bool {
        !node.visible() || node.clipping() == self.clip_sentinel
    }
}

/// Extract the filtered outline of `document`.
///
/// Filtering applies independently at every node, before recursion: an
/// excluded group disappears with its whole subtree, while a surviving group
/// whose children were all excluded still appears with empty `children`. The
/// outline root is not itself subject to filtering; it always carries the
/// canvas dimensions.
///
/// Fails with [`MalformedNodeError`] when a surviving node lacks an
/// identifier; the failure aborts the whole extraction rather than emitting
/// a partial tree.
pub fn extract(document: &Document, policy: &FilterPolicy) -> Result<Outline, MalformedNodeError> {
    let mut ancestors = Vec::new();
    let children = extract_nodes(&document.children, policy, &mut ancestors)?;
    Ok(Outline {
        bbox: CanvasBounds {
            w: document.canvas.width,
            h: document.canvas.height,
        },
        children,
    })
}

fn extract_nodes<'a>(
    nodes: &'a [Node],
    policy: &FilterPolicy,
    ancestors: &mut Vec<&'a str>,
) -> Result<Vec<OutlineNode>, MalformedNodeError> {
    let mut out = Vec::new();
    for node in nodes {
        if policy.excludes(node) {
            continue;
        }
        let id = node
            .id()
            .ok_or_else(|| MalformedNodeError::missing(ancestors, node.name(), "layer id"))?;
        let body = match node {
            Node::Group(group) => {
                ancestors.push(&group.name);
                let children = extract_nodes(&group.children, policy, ancestors)?;
                ancestors.pop();
                OutlineBody::Group { children }
            }
            Node::Layer(layer) => OutlineBody::Layer {
                bbox: LayerBounds::from(layer.bbox),
                text: layer
                    .text
                    .as_deref()
                    .filter(|text| !text.is_empty())
                    .map(|text| TextContent {
                        value: text.to_string(),
                    }),
            },
        };
        out.push(OutlineNode {
            id,
            name: node.name().to_string(),
            body,
        });
    }
    Ok(out)
}

/// Depth-first flattened view of an extracted forest.
///
/// Every group's descendants precede the group itself, so leaves come out in
/// document order and containers follow their contents.
pub fn flatten(nodes: &[OutlineNode]) -> Vec<&OutlineNode> {
    fn walk<'a>(nodes: &'a [OutlineNode], out: &mut Vec<&'a OutlineNode>) {
        for node in nodes {
            walk(node.children(), out);
            out.push(node);
        }
    }

    let mut out = Vec::new();
    walk(nodes, &mut out);
    out
}
