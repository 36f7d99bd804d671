//! Document envelope: XML declaration plus a versioned root element.
//!
//! The rendered value becomes the *content* of the root element, so an
//! object's entries sit directly under `<Server version="8">`.

use tracing::debug;

use crate::error::Result;
use crate::render::{Renderer, Style};
use crate::types::{Key, Scalar, Value};

/// The XML declaration line that opens every document.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Root element name and optional `version` attribute of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub root: String,
    pub version: Option<String>,
}

impl Envelope {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

impl Default for Envelope {
    /// `<Server version="8">`.
    fn default() -> Self {
        Envelope::new("Server").with_version("8")
    }
}

/// Render a complete document: declaration line, then the root element
/// carrying `value` as its content.
///
/// # Example
/// ```
/// use confxml_core::{render_document, Envelope, Style, Value};
///
/// let value = Value::object([("Name", Value::text("origin"))]);
/// let xml = render_document(&Envelope::default(), &value, Style::Compact).unwrap();
/// assert_eq!(
///     xml,
///     "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Server version=\"8\"><Name>origin</Name></Server>"
/// );
/// ```
pub fn render_document(envelope: &Envelope, value: &Value, style: Style) -> Result<String> {
    debug!(root = %envelope.root, version = ?envelope.version, "rendering document");
    let root = Key::new(envelope.root.as_str());
    let attrs: Vec<(String, Scalar)> = envelope
        .version
        .iter()
        .map(|v| ("version".to_string(), Scalar::Text(v.clone())))
        .collect();

    let mut renderer = Renderer::new(style);
    renderer.push_raw(XML_DECLARATION);
    renderer.push_raw("\n");
    renderer.wrapped(&root, &attrs, value)?;
    Ok(renderer.finish())
}
