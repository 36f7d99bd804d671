//! The configuration value model.
//!
//! Every legal configuration value is one of the [`Value`] variants. The type
//! is closed and inductively defined, so a tree can neither be cyclic nor hold
//! anything the renderer does not know how to emit.

use std::fmt;
use std::path::PathBuf;

/// Separator between the tag name and the disambiguating suffix of a [`Key`].
pub const SUFFIX_SEPARATOR: char = '#';

/// An element label, optionally carrying a `#suffix`.
///
/// The suffix only exists so that a mapping-shaped configuration source can
/// hold several entries that render as sibling elements with the same tag:
/// `Host#1` and `Host#2` both render as `<Host>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key(String);

impl Key {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The label exactly as it was written, suffix included.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The emitted tag name: everything before the first `#`.
    pub fn tag(&self) -> &str {
        match self.0.split_once(SUFFIX_SEPARATOR) {
            Some((tag, _)) => tag,
            None => &self.0,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Key {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Key {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Integers and floats are kept apart so an integer never renders with a
/// fractional part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Integer(n)
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number::Float(f)
    }
}

/// A value that may appear as an XML attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Number(Number),
    Text(String),
    Path(PathBuf),
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(Number::Integer(n))
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Scalar::Number(Number::Float(f))
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<PathBuf> for Scalar {
    fn from(p: PathBuf) -> Self {
        Scalar::Path(p)
    }
}

/// An element that carries XML attributes next to its body.
///
/// Holding exactly the attribute list and the inner value is what makes a
/// malformed attributed node unrepresentable once it has been built.
#[derive(Debug, Clone, PartialEq)]
pub struct Attributed {
    /// Attribute name/value pairs in emission order. Names must be XML names
    /// and unique on the rendered element.
    pub attrs: Vec<(String, Scalar)>,
    /// The element body. [`Value::Absent`] renders a self-closing tag. Another
    /// attributed node here has no tag of its own: its attributes are appended
    /// to this element's and its inner value becomes the body.
    pub value: Box<Value>,
}

/// A configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Absent,
    Bool(bool),
    Number(Number),
    Text(String),
    Path(PathBuf),
    /// Labeled children in insertion order. Repeated tags are allowed.
    Object(Vec<(Key, Value)>),
    Attributed(Attributed),
}

impl Value {
    /// Build an [`Value::Object`] from anything yielding `(key, value)` pairs.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build an [`Value::Attributed`] node.
    pub fn attributed<N, S, I>(attrs: I, value: Value) -> Self
    where
        N: Into<String>,
        S: Into<Scalar>,
        I: IntoIterator<Item = (N, S)>,
    {
        Value::Attributed(Attributed {
            attrs: attrs
                .into_iter()
                .map(|(n, s)| (n.into(), s.into()))
                .collect(),
            value: Box::new(value),
        })
    }

    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn path(p: impl Into<PathBuf>) -> Self {
        Value::Path(p.into())
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Path(_) => "path",
            Value::Object(_) => "object",
            Value::Attributed(_) => "attributed",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::Integer(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(Number::Float(f))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        match s {
            Scalar::Bool(b) => Value::Bool(b),
            Scalar::Number(n) => Value::Number(n),
            Scalar::Text(t) => Value::Text(t),
            Scalar::Path(p) => Value::Path(p),
        }
    }
}
