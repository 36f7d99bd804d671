//! Error types for configuration conversion and rendering.

use thiserror::Error;

/// Errors that can occur while converting or rendering a configuration tree.
///
/// Every variant is fatal: rendering is deterministic, so retrying the same
/// tree fails the same way.
#[derive(Error, Debug)]
pub enum ConfXmlError {
    /// An attributed node does not hold exactly its attribute set and inner
    /// value. `path` is the `/`-joined key path from the document root.
    #[error("malformed attributed node at {path}: {reason}")]
    MalformedAttributedNode { path: String, reason: String },

    /// A value outside the closed value model reached conversion or rendering.
    #[error("unsupported value kind at {path}: {kind}")]
    UnsupportedValueKind { path: String, kind: String },

    /// The configuration text was not valid JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl ConfXmlError {
    /// The key path of the offending node, when the error has one.
    pub fn path(&self) -> Option<&str> {
        match self {
            ConfXmlError::MalformedAttributedNode { path, .. }
            | ConfXmlError::UnsupportedValueKind { path, .. } => Some(path),
            ConfXmlError::JsonParse(_) => None,
        }
    }
}

/// Convenience alias used throughout confxml-core.
pub type Result<T> = std::result::Result<T, ConfXmlError>;

/// Raw keys from the document root down to the node being visited.
#[derive(Debug, Default)]
pub(crate) struct KeyPath<'a> {
    segments: Vec<&'a str>,
}

impl<'a> KeyPath<'a> {
    pub(crate) fn push(&mut self, segment: &'a str) {
        self.segments.push(segment);
    }

    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }

    /// `/`-joined rendering with a leading slash; the root alone is `/`.
    pub(crate) fn display(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            out.push_str(segment);
        }
        out
    }

    pub(crate) fn unsupported(&self, kind: impl Into<String>) -> ConfXmlError {
        ConfXmlError::UnsupportedValueKind {
            path: self.display(),
            kind: kind.into(),
        }
    }

    pub(crate) fn malformed(&self, reason: impl Into<String>) -> ConfXmlError {
        ConfXmlError::MalformedAttributedNode {
            path: self.display(),
            reason: reason.into(),
        }
    }
}
