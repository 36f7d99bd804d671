//! Markup renderer: turns a [`Value`] tree into XML element text.
//!
//! Rendering walks the tree depth-first and emits one element per visited
//! value:
//!
//! - **Absent**: `<tag></tag>`, or `<tag a="v" />` when it is the body of an
//!   attributed node
//! - **Scalars**: `true`/`false`, decimal numbers, escaped text
//! - **Objects**: one child element per entry, in entry order, tag taken from
//!   the key with its `#suffix` stripped
//! - **Attributed**: attributes on the open tag, inner value as body; an
//!   attributed inner value adds its attributes to the same tag
//!
//! Element and attribute names must be XML names, and attribute names must be
//! unique per element. Rendering is fail-fast. On the first error nothing is returned, so a
//! broken tree never yields partial markup.
//!
//! # Example
//! ```
//! use confxml_core::{render, Value};
//!
//! let value = Value::object([
//!     ("Stream#1", Value::text("a")),
//!     ("Stream#2", Value::text("b")),
//! ]);
//! let xml = render("Config", &value).unwrap();
//! assert_eq!(xml, "<Config><Stream>a</Stream><Stream>b</Stream></Config>");
//! ```

use std::borrow::Cow;
use std::path::Path;

use tracing::{debug, trace};

use crate::error::{KeyPath, Result};
use crate::types::{Key, Number, Scalar, Value};

/// Whitespace layout of the emitted markup. Both styles are markup-equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// No whitespace between tags.
    #[default]
    Compact,
    /// One element per line, nested elements indented by `indent` spaces per
    /// level. Scalar bodies stay on the line of their element.
    Pretty { indent: usize },
}

impl Style {
    /// Two-space pretty printing.
    pub const fn pretty() -> Self {
        Style::Pretty { indent: 2 }
    }
}

/// Render `value` as a single compact element named after `root`.
pub fn render(root: impl Into<Key>, value: &Value) -> Result<String> {
    render_with(root, value, Style::Compact)
}

/// Render `value` as a single element named after `root`, laid out per `style`.
pub fn render_with(root: impl Into<Key>, value: &Value, style: Style) -> Result<String> {
    let root = root.into();
    debug!(root = root.as_str(), ?style, "rendering configuration tree");
    let mut renderer = Renderer::new(style);
    renderer.element(&root, value, 0)?;
    Ok(renderer.finish())
}

/// Stateful walker shared by [`render_with`] and the document envelope.
pub(crate) struct Renderer<'a> {
    out: String,
    style: Style,
    path: KeyPath<'a>,
}

impl<'a> Renderer<'a> {
    pub(crate) fn new(style: Style) -> Self {
        Self {
            out: String::with_capacity(1024),
            style,
            path: KeyPath::default(),
        }
    }

    pub(crate) fn push_raw(&mut self, text: &str) {
        self.out.push_str(text);
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    /// Emit `value` as an element named after `key`.
    pub(crate) fn element(&mut self, key: &'a Key, value: &'a Value, depth: usize) -> Result<()> {
        match value {
            Value::Attributed(node) => self.node(key, &node.attrs, &node.value, true, depth),
            other => self.node(key, &[], other, false, depth),
        }
    }

    /// Emit an element with explicit attributes whose body is `body`. Never
    /// self-closing, so an absent body yields `<tag ...></tag>`.
    pub(crate) fn wrapped(
        &mut self,
        key: &'a Key,
        attrs: &'a [(String, Scalar)],
        body: &'a Value,
    ) -> Result<()> {
        self.node(key, attrs, body, false, 0)
    }

    fn node(
        &mut self,
        key: &'a Key,
        attrs: &'a [(String, Scalar)],
        body: &'a Value,
        self_closing: bool,
        depth: usize,
    ) -> Result<()> {
        self.path.push(key.as_str());
        let tag = key.tag();
        if tag.is_empty() {
            return Err(self.path.unsupported("empty element name"));
        }
        if !is_xml_name(tag) {
            return Err(self.path.unsupported(format!("invalid element name `{tag}`")));
        }
        trace!(path = %self.path.display(), kind = body.kind(), "element");

        // An attributed body contributes its attributes to this element.
        let mut all_attrs: Vec<&'a (String, Scalar)> = attrs.iter().collect();
        let mut body = body;
        while let Value::Attributed(inner) = body {
            all_attrs.extend(inner.attrs.iter());
            body = inner.value.as_ref();
        }

        self.indent(depth);
        self.out.push('<');
        self.out.push_str(tag);
        for (i, (name, value)) in all_attrs.iter().copied().enumerate() {
            if all_attrs[..i].iter().any(|(seen, _)| seen == name) {
                self.path.push(name);
                return Err(self.path.unsupported(format!("duplicate attribute `{name}`")));
            }
            self.attribute(name, value)?;
        }

        if self_closing && matches!(body, Value::Absent) {
            self.out.push_str(" />");
            self.end_line();
        } else {
            self.out.push('>');
            self.body(tag, body, depth)?;
        }

        self.path.pop();
        Ok(())
    }

    fn attribute(&mut self, name: &'a str, value: &'a Scalar) -> Result<()> {
        self.path.push(name);
        if name.is_empty() {
            return Err(self.path.unsupported("empty attribute name"));
        }
        if !is_xml_name(name) {
            return Err(self.path.unsupported(format!("invalid attribute name `{name}`")));
        }
        let text: Cow<'a, str> = match value {
            Scalar::Bool(b) => Cow::Borrowed(bool_text(*b)),
            Scalar::Number(n) => Cow::Owned(self.number(*n)?),
            Scalar::Text(s) => escape_attr(s),
            Scalar::Path(p) => escape_attr(self.path_text(p)?),
        };
        self.path.pop();

        self.out.push(' ');
        self.out.push_str(name);
        self.out.push_str("=\"");
        self.out.push_str(&text);
        self.out.push('"');
        Ok(())
    }

    /// Emit the element content that follows the open tag, then the close tag.
    fn body(&mut self, tag: &str, value: &'a Value, depth: usize) -> Result<()> {
        match value {
            Value::Absent => {}
            Value::Bool(b) => self.out.push_str(bool_text(*b)),
            Value::Number(n) => {
                let text = self.number(*n)?;
                self.out.push_str(&text);
            }
            Value::Text(s) => self.out.push_str(&escape_text(s)),
            Value::Path(p) => {
                let text = escape_text(self.path_text(p)?);
                self.out.push_str(&text);
            }
            Value::Object(entries) if entries.is_empty() => {}
            Value::Object(entries) => {
                self.end_line();
                for (key, child) in entries {
                    self.element(key, child, depth + 1)?;
                }
                self.indent(depth);
            }
            // Attributes were already hoisted onto the open tag by `node`.
            Value::Attributed(inner) => return self.body(tag, &inner.value, depth),
        }
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push('>');
        self.end_line();
        Ok(())
    }

    fn number(&self, n: Number) -> Result<String> {
        format_number(n).ok_or_else(|| self.path.unsupported("non-finite number"))
    }

    fn path_text(&self, p: &'a Path) -> Result<&'a str> {
        p.to_str()
            .ok_or_else(|| self.path.unsupported("non-UTF-8 path"))
    }

    fn indent(&mut self, depth: usize) {
        if let Style::Pretty { indent } = self.style {
            for _ in 0..depth * indent {
                self.out.push(' ');
            }
        }
    }

    fn end_line(&mut self) {
        if matches!(self.style, Style::Pretty { .. }) {
            self.out.push('\n');
        }
    }
}

/// XML `Name` check for element and attribute names.
///
/// Letters and `_` may start a name; letters, digits, `_`, `-` and `.` may
/// follow. `:` is not accepted because an undeclared namespace prefix would
/// make the document fail namespace-aware parsing.
pub fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn bool_text(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}

/// Format a number as locale-independent decimal text.
///
/// Integers never carry a fractional part; floats always do (`1.0`, not `1`).
/// `f64`'s `Display` never uses exponent notation. Returns `None` for NaN and
/// infinities, which have no decimal form.
pub fn format_number(n: Number) -> Option<String> {
    match n {
        Number::Integer(i) => Some(i.to_string()),
        Number::Float(f) if !f.is_finite() => None,
        Number::Float(f) => {
            let mut s = f.to_string();
            if !s.contains('.') {
                s.push_str(".0");
            }
            Some(s)
        }
    }
}

/// Escape element text: `& < > " '` become entity references, everything
/// else passes through unchanged.
pub fn escape_text(s: &str) -> Cow<'_, str> {
    escape(s, false)
}

/// Escape an attribute value. Like [`escape_text`] but also encodes tab,
/// newline and carriage return as character references so that
/// attribute-value normalization keeps them.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape(s, true)
}

fn escape(s: &str, attr: bool) -> Cow<'_, str> {
    let needs_escape = |ch: char| {
        matches!(ch, '&' | '<' | '>' | '"' | '\'') || (attr && matches!(ch, '\t' | '\n' | '\r'))
    };
    if !s.contains(needs_escape) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' if attr => out.push_str("&#x9;"),
            '\n' if attr => out.push_str("&#xA;"),
            '\r' if attr => out.push_str("&#xD;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}
