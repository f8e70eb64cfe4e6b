use thiserror::Error;

/// A node in the source tree lacked an attribute the extraction needs.
///
/// Extraction is all-or-nothing: the first malformed node aborts the whole
/// run so downstream consumers never see a silently incomplete tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed node at '{path}': missing required attribute '{attribute}'")]
pub struct MalformedNodeError {
    /// Slash-joined node names from the document root to the offending node.
    pub path: String,
    /// The attribute the node lacked.
    pub attribute: &'static str,
}

impl MalformedNodeError {
    pub(crate) fn missing(ancestors: &[&str], name: &str, attribute: &'static str) -> Self {
        let mut path = String::new();
        for ancestor in ancestors {
            path.push_str(ancestor);
            path.push('/');
        }
        path.push_str(name);
        Self { path, attribute }
    }
}
