/// Property-based rendering tests.
///
/// Uses `proptest` to generate random value trees and checks that:
/// - rendering is deterministic (same tree, byte-identical output)
/// - output always re-parses as well-formed XML
/// - text and attribute values survive escaping and re-parsing unchanged
/// - `#suffix`es never leak into the output and sibling order is kept
///
/// Generated floats are always finite; non-finite numbers are covered by the
/// hand-written failure tests.
use proptest::prelude::*;

use confxml_core::{render, render_with, Key, Number, Scalar, Style, Value};

// ============================================================================
// Strategies
// ============================================================================

/// Element tag, optionally carrying a `#suffix`.
fn arb_key() -> impl Strategy<Value = String> {
    (
        "[A-W_][A-Za-z0-9_]{0,10}",
        prop::option::of("[0-9a-z]{1,4}"),
    )
        .prop_map(|(tag, suffix)| match suffix {
            Some(suffix) => format!("{tag}#{suffix}"),
            None => tag,
        })
}

/// Text that leans heavily on the reserved markup characters.
fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,20}",
        prop::string::string_regex("[a-z&<>\"' ]{0,20}").unwrap(),
        Just("A & B".to_string()),
        Just("caf\u{e9} \u{4f60}\u{597d}".to_string()),
    ]
}

fn arb_number() -> impl Strategy<Value = Number> {
    prop_oneof![
        any::<i64>().prop_map(Number::Integer),
        (-1_000_000i64..1_000_000i64, 1u32..4u32)
            .prop_map(|(m, d)| Number::Float(m as f64 / 10f64.powi(d as i32))),
    ]
}

fn arb_scalar() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        any::<bool>().prop_map(Scalar::Bool),
        arb_number().prop_map(Scalar::Number),
        arb_text().prop_map(Scalar::Text),
    ]
}

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Absent),
        arb_scalar().prop_map(Value::from),
        "/[a-z]{1,8}(/[a-z]{1,8}){0,3}".prop_map(|p: String| Value::path(p)),
    ]
}

/// Attribute names are unique within a node (XML forbids duplicates).
fn arb_attrs() -> impl Strategy<Value = Vec<(String, Scalar)>> {
    prop::collection::btree_map("[a-w][a-z0-9]{0,6}", arb_scalar(), 0..4)
        .prop_map(|m| m.into_iter().collect())
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec((arb_key(), inner.clone()), 0..6).prop_map(Value::object),
            (arb_attrs(), inner).prop_map(|(attrs, body)| {
                // A bare attributed body would merge its attributes into this
                // node and could repeat a name; give it its own element.
                let body = match body {
                    Value::Attributed(_) => Value::object([("Inner", body)]),
                    other => other,
                };
                Value::attributed(attrs, body)
            }),
        ]
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn rendering_is_deterministic(value in arb_value()) {
        let first = render("Root", &value).unwrap();
        let second = render("Root", &value.clone()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn output_is_well_formed(value in arb_value()) {
        let compact = render("Root", &value).unwrap();
        prop_assert!(roxmltree::Document::parse(&compact).is_ok(), "not well-formed: {}", compact);
        let pretty = render_with("Root", &value, Style::pretty()).unwrap();
        prop_assert!(roxmltree::Document::parse(&pretty).is_ok(), "not well-formed: {}", pretty);
    }

    #[test]
    fn text_survives_escaping(text in arb_text()) {
        let xml = render("T", &Value::text(text.clone())).unwrap();
        let doc = roxmltree::Document::parse(&xml).unwrap();
        prop_assert_eq!(doc.root_element().text().unwrap_or(""), text.as_str());
    }

    #[test]
    fn attribute_survives_escaping(text in arb_text()) {
        let xml = render("T", &Value::attributed([("v", text.clone())], Value::Absent)).unwrap();
        let doc = roxmltree::Document::parse(&xml).unwrap();
        prop_assert_eq!(doc.root_element().attribute("v"), Some(text.as_str()));
    }

    #[test]
    fn suffixes_are_stripped_in_order(keys in prop::collection::vec(arb_key(), 1..8)) {
        let value = Value::Object(
            keys.iter()
                .enumerate()
                .map(|(i, k)| (Key::from(k.as_str()), Value::from(i as i64)))
                .collect(),
        );
        let xml = render("Root", &value).unwrap();
        prop_assert!(!xml.contains('#'));

        let doc = roxmltree::Document::parse(&xml).unwrap();
        let children: Vec<(String, String)> = doc
            .root_element()
            .children()
            .filter(|n| n.is_element())
            .map(|n| (n.tag_name().name().to_string(), n.text().unwrap_or("").to_string()))
            .collect();
        let expected: Vec<(String, String)> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (Key::from(k.as_str()).tag().to_string(), i.to_string()))
            .collect();
        prop_assert_eq!(children, expected);
    }
}
