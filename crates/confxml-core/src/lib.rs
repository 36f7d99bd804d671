//! # confxml-core
//!
//! Typed configuration values and their deterministic rendering into XML.
//!
//! A configuration tree is a [`Value`]: absent, bool, number, text, path, an
//! ordered object of labeled children, or an attributed node (XML attributes
//! plus an inner value). The renderer walks the tree and emits one element per
//! value, escaping text and stripping `#suffix`es from keys so that repeated
//! sibling tags can live in one mapping.
//!
//! ## Quick start
//!
//! ```rust
//! use confxml_core::{parse_json, render, Value};
//!
//! // Typed construction
//! let mode = Value::attributed([("type", "live")], Value::Absent);
//! assert_eq!(render("Mode", &mode).unwrap(), r#"<Mode type="live" />"#);
//!
//! // From JSON configuration
//! let value = parse_json(r#"{"Host#1":"a.example","Host#2":"b.example"}"#).unwrap();
//! assert_eq!(
//!     render("Hosts", &value).unwrap(),
//!     "<Hosts><Host>a.example</Host><Host>b.example</Host></Hosts>"
//! );
//! ```
//!
//! ## Modules
//!
//! - [`types`]: the value model (`Value`, `Key`, `Scalar`, `Attributed`)
//! - [`render`](mod@render): `Value` → element text, escaping and layout
//! - [`convert`]: JSON → `Value`, attributed node shape check
//! - [`document`]: XML declaration and versioned root envelope
//! - [`error`]: error types for conversion/render failures

pub mod convert;
pub mod document;
pub mod error;
pub mod render;
pub mod types;

pub use convert::{from_json, parse_json};
pub use document::{render_document, Envelope};
pub use error::{ConfXmlError, Result};
pub use render::{escape_attr, escape_text, render, render_with, Style};
pub use types::{Attributed, Key, Number, Scalar, Value};
