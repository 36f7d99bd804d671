//! Conversion from untyped JSON configuration into the typed [`Value`] model.
//!
//! JSON objects are ambiguous: they are either a plain nested object or an
//! attributed node. An object holding either of the marker keys
//! [`ATTRS_KEY`] / [`VALUE_KEY`] is an attributed node and must hold exactly
//! those two keys:
//!
//! ```json
//! { "Mode": { "_attrs": { "type": "live" }, "_value": null } }
//! ```
//!
//! Key order is significant (it becomes element order), which is why the
//! workspace enables `serde_json`'s `preserve_order` feature.

use serde_json::{Map, Value as Json};
use tracing::debug;

use crate::error::{KeyPath, Result};
use crate::types::{Attributed, Key, Number, Scalar, Value};

/// Marker key holding the attribute set of an attributed node.
pub const ATTRS_KEY: &str = "_attrs";
/// Marker key holding the inner value of an attributed node.
pub const VALUE_KEY: &str = "_value";

/// Parse JSON text and convert it into a [`Value`].
pub fn parse_json(text: &str) -> Result<Value> {
    let json: Json = serde_json::from_str(text)?;
    from_json(&json)
}

/// Convert a parsed JSON tree into a [`Value`], validating attributed nodes.
pub fn from_json(json: &Json) -> Result<Value> {
    debug!("converting JSON configuration");
    let mut path = KeyPath::default();
    convert(json, &mut path)
}

fn convert<'a>(json: &'a Json, path: &mut KeyPath<'a>) -> Result<Value> {
    match json {
        Json::Null => Ok(Value::Absent),
        Json::Bool(b) => Ok(Value::Bool(*b)),
        Json::Number(n) => Ok(Value::Number(number(n, path)?)),
        Json::String(s) => Ok(Value::Text(s.clone())),
        Json::Array(_) => Err(path.unsupported("array")),
        Json::Object(map) if is_attributed(map) => attributed(map, path),
        Json::Object(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (key, child) in map {
                path.push(key);
                entries.push((Key::new(key.as_str()), convert(child, path)?));
                path.pop();
            }
            Ok(Value::Object(entries))
        }
    }
}

fn is_attributed(map: &Map<String, Json>) -> bool {
    map.contains_key(ATTRS_KEY) || map.contains_key(VALUE_KEY)
}

/// Shape check for an attributed node: exactly `_attrs` and `_value`, with
/// `_attrs` an object of scalars.
fn attributed<'a>(map: &'a Map<String, Json>, path: &mut KeyPath<'a>) -> Result<Value> {
    if let Some(extra) = map.keys().find(|k| *k != ATTRS_KEY && *k != VALUE_KEY) {
        return Err(path.malformed(format!("unexpected field `{extra}`")));
    }
    let Some(attrs) = map.get(ATTRS_KEY) else {
        return Err(path.malformed(format!("missing field `{ATTRS_KEY}`")));
    };
    let Some(inner) = map.get(VALUE_KEY) else {
        return Err(path.malformed(format!("missing field `{VALUE_KEY}`")));
    };
    let Json::Object(attrs) = attrs else {
        return Err(path.malformed(format!("`{ATTRS_KEY}` must be an object")));
    };

    path.push(ATTRS_KEY);
    let mut converted = Vec::with_capacity(attrs.len());
    for (name, raw) in attrs {
        path.push(name);
        converted.push((name.clone(), scalar(raw, path)?));
        path.pop();
    }
    path.pop();

    path.push(VALUE_KEY);
    let value = convert(inner, path)?;
    path.pop();

    Ok(Value::Attributed(Attributed {
        attrs: converted,
        value: Box::new(value),
    }))
}

fn scalar(json: &Json, path: &KeyPath<'_>) -> Result<Scalar> {
    match json {
        Json::Bool(b) => Ok(Scalar::Bool(*b)),
        Json::Number(n) => Ok(Scalar::Number(number(n, path)?)),
        Json::String(s) => Ok(Scalar::Text(s.clone())),
        Json::Null => Err(path.unsupported("null attribute value")),
        Json::Array(_) => Err(path.unsupported("array attribute value")),
        Json::Object(_) => Err(path.unsupported("object attribute value")),
    }
}

fn number(n: &serde_json::Number, path: &KeyPath<'_>) -> Result<Number> {
    if let Some(i) = n.as_i64() {
        return Ok(Number::Integer(i));
    }
    if n.is_u64() {
        return Err(path.unsupported(format!("integer {n} out of range")));
    }
    n.as_f64()
        .map(Number::Float)
        .ok_or_else(|| path.unsupported(format!("number {n}")))
}
