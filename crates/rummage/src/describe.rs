//! "What am I?" summaries of a node.
//!
//! [`describe`] returns a short human description of a value: what shape it
//! has, how many children, which types they are, and for text and numbers
//! a guess at what the value represents.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::node::{Node, Scalar};
use crate::text::{human_int, plural};

/// Integers at or above this are taken to be Unix timestamps (2000-01-01).
pub const EPOCH_THRESHOLD: i64 = 946_702_800;

static TEXT_KINDS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("E-mail Address", r"^([a-z0-9_\.-]+)@([\da-z\.-]+)\.([a-z\.]{2,5})$"),
        ("Whole Number", r"^\d+$"),
        ("Negative Int", r"^-\d+$"),
        ("Decimal Number (Float)", r"^\d*\.\d+$"),
        ("Negative Float", r"^-\d*\.\d+$"),
        ("IP Address", r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}"),
        ("MAC Address", r"^([0-9A-Fa-f]{2}[:-]){5}([0-9A-Fa-f]{2})$"),
        (
            "UUID",
            r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
        ),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("valid text kind pattern")))
    .collect()
});

/// Names what a piece of text looks like, if it matches a known kind.
///
/// ```
/// use rummage::classify_text;
///
/// assert_eq!(classify_text("42"), Some("Whole Number"));
/// assert_eq!(classify_text("10.0.0.1"), Some("IP Address"));
/// assert_eq!(classify_text("lemon"), None);
/// ```
pub fn classify_text(text: &str) -> Option<&'static str> {
    TEXT_KINDS
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(name, _)| *name)
}

/// Describes a node in a line or two.
///
/// Non-empty sequences and sets get a second line describing their first
/// element.
///
/// ```
/// use rummage::{describe, Node};
///
/// assert_eq!(describe(&Node::from(1024)), "1024 = 2^10");
/// assert_eq!(describe(&Node::map([("a", 1), ("b", 2)])), "Map of 2 {text: int}");
/// assert_eq!(
///     describe(&Node::seq(["x", "y"])),
///     "List of 2 text items\n[0]: Just text: x"
/// );
/// ```
pub fn describe(node: &Node) -> String {
    match node {
        Node::Scalar(scalar) => describe_scalar(scalar),
        Node::Unsupported(name) => format!("Unsupported {} value", name),
        Node::Map(entries) if entries.is_empty() => "Empty map".to_string(),
        Node::Map(entries) => {
            let keys = type_summary(entries.keys().map(|k| Scalar::from(k.clone()).type_name()));
            let values = type_summary(entries.values().map(Node::type_name));
            format!("Map of {} {{{}: {}}}", human_int(entries.len() as i64), keys, values)
        }
        Node::Seq(items) => describe_items("List", "list", items),
        Node::Set(items) => describe_items("Set", "set", items),
    }
}

fn describe_items(label: &str, empty_label: &str, items: &[Node]) -> String {
    let Some(first) = items.first() else {
        return format!("Empty {}", empty_label);
    };
    format!(
        "{} of {} {} item{}\n[0]: {}",
        label,
        human_int(items.len() as i64),
        type_summary(items.iter().map(Node::type_name)),
        plural(items.len()),
        describe(first)
    )
}

fn describe_scalar(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Null => "It's just null!".to_string(),
        Scalar::Bool(b) => format!("Just a boolean: {}", b),
        Scalar::Text(s) if s.is_empty() => "Empty text".to_string(),
        Scalar::Text(s) => match classify_text(s) {
            Some(kind) => kind.to_string(),
            None => format!("Just text: {}", s),
        },
        Scalar::Int(n) if *n >= EPOCH_THRESHOLD => format!("Epoch time: {}", n),
        Scalar::Int(n) if *n >= 16 && n.count_ones() == 1 => {
            format!("{} = 2^{}", n, n.trailing_zeros())
        }
        Scalar::Int(n) => format!("Just an int: {}", human_int(*n)),
        Scalar::Float(n) if *n >= EPOCH_THRESHOLD as f64 => format!("Epoch time: {}", n),
        Scalar::Float(n) => format!("Just a float: {}", n),
    }
}

fn type_summary<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<BTreeSet<_>>().into_iter().collect::<Vec<_>>().join(", ")
}
