//! Haystack data model.
//!
//! A [`Node`] is a closed sum type over the shapes a haystack can take:
//! mappings, ordered sequences, sets, scalars, and opaque values the crate
//! does not know how to look inside. Traversal dispatches on the variant
//! instead of inspecting types at runtime.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A leaf value.
///
/// # Example
///
/// ```
/// use rummage::Scalar;
///
/// assert_eq!(Scalar::Int(1), Scalar::Float(1.0));
/// assert_ne!(Scalar::Bool(true), Scalar::Int(1));
/// assert!(Scalar::Text(String::new()).is_falsy());
/// ```
#[derive(Debug, Clone)]
pub enum Scalar {
    /// Absent or null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Text value.
    Text(String),
}

impl Scalar {
    /// Returns `true` if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Returns `true` if this is a `Text` value.
    pub fn is_text(&self) -> bool {
        matches!(self, Scalar::Text(_))
    }

    /// Extracts the text, if present.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the integer, if present.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the float, if present.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Scalar::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns `true` for null, `false`, zero and empty text.
    ///
    /// Falsy values only ever match a needle by exact equality.
    pub fn is_falsy(&self) -> bool {
        match self {
            Scalar::Null => true,
            Scalar::Bool(b) => !b,
            Scalar::Int(n) => *n == 0,
            Scalar::Float(n) => *n == 0.0,
            Scalar::Text(s) => s.is_empty(),
        }
    }

    /// Short name of the variant, used in descriptions.
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int",
            Scalar::Float(_) => "float",
            Scalar::Text(_) => "text",
        }
    }
}

// Exact: the float must be integral and in range, so no rounding of `a`.
fn int_eq_float(a: i64, b: f64) -> bool {
    b.fract() == 0.0 && b >= i64::MIN as f64 && b < i64::MAX as f64 && b as i64 == a
}

// Integers and floats compare numerically; booleans never equal numbers.
impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => true,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a == b,
            (Scalar::Int(a), Scalar::Float(b)) | (Scalar::Float(b), Scalar::Int(a)) => {
                int_eq_float(*a, *b)
            }
            (Scalar::Text(a), Scalar::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Float(n) => write!(f, "{}", n),
            Scalar::Text(s) => write!(f, "{}", s),
        }
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

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Int(n as i64)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<u32> for Scalar {
    fn from(n: u32) -> Self {
        Scalar::Int(n as i64)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Float(n)
    }
}

impl From<Key> for Scalar {
    fn from(key: Key) -> Self {
        match key {
            Key::Bool(b) => Scalar::Bool(b),
            Key::Int(n) => Scalar::Int(n),
            Key::Text(s) => Scalar::Text(s),
        }
    }
}

/// A mapping key or a sequence/set position.
///
/// Keys are totally ordered (by variant, then by value) so mappings iterate
/// deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// Boolean key.
    Bool(bool),
    /// Integer key or position.
    Int(i64),
    /// Text key.
    Text(String),
}

impl Key {
    /// Coerces this key to a position, parsing text if needed.
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Key::Int(n) => Some(*n),
            Key::Text(s) => s.trim().parse().ok(),
            Key::Bool(_) => None,
        }
    }

    /// Returns the text, if this is a text key.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Key::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Compares this key against a scalar without allocating.
    pub fn eq_scalar(&self, scalar: &Scalar) -> bool {
        match (self, scalar) {
            (Key::Bool(a), Scalar::Bool(b)) => a == b,
            (Key::Int(a), Scalar::Int(b)) => a == b,
            (Key::Int(a), Scalar::Float(b)) => int_eq_float(*a, *b),
            (Key::Text(a), Scalar::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Bool(b) => write!(f, "{}", b),
            Key::Int(n) => write!(f, "{}", n),
            Key::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Text(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Text(s)
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl From<i32> for Key {
    fn from(n: i32) -> Self {
        Key::Int(n as i64)
    }
}

impl From<usize> for Key {
    fn from(n: usize) -> Self {
        Key::Int(n as i64)
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Bool(b)
    }
}

/// A haystack node.
///
/// # Example
///
/// ```
/// use rummage::Node;
///
/// let node = Node::map([
///     ("name", Node::from("lemon")),
///     ("tags", Node::seq(["sour", "yellow"])),
/// ]);
///
/// assert_eq!(node.len(), 2);
/// assert!(node.is_container());
/// assert_eq!(node.type_name(), "map");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Mapping with unique, sorted keys.
    Map(BTreeMap<Key, Node>),
    /// Ordered, index-addressable sequence.
    Seq(Vec<Node>),
    /// Unordered collection of distinct members, kept in insertion order.
    Set(Vec<Node>),
    /// Leaf value.
    Scalar(Scalar),
    /// Opaque value identified by a type name. Never descended into.
    Unsupported(String),
}

impl Node {
    /// Creates a null node.
    pub fn null() -> Self {
        Node::Scalar(Scalar::Null)
    }

    /// Creates a mapping from key/value pairs. Later duplicates win.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<Key>,
        V: Into<Node>,
        I: IntoIterator<Item = (K, V)>,
    {
        Node::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Creates a sequence.
    pub fn seq<V, I>(items: I) -> Self
    where
        V: Into<Node>,
        I: IntoIterator<Item = V>,
    {
        Node::Seq(items.into_iter().map(Into::into).collect())
    }

    /// Creates a set, dropping members equal to an earlier one.
    pub fn set<V, I>(items: I) -> Self
    where
        V: Into<Node>,
        I: IntoIterator<Item = V>,
    {
        let mut members: Vec<Node> = Vec::new();
        for item in items {
            let item = item.into();
            if !members.contains(&item) {
                members.push(item);
            }
        }
        Node::Set(members)
    }

    /// Returns `true` for mappings, sequences and sets.
    pub fn is_container(&self) -> bool {
        matches!(self, Node::Map(_) | Node::Seq(_) | Node::Set(_))
    }

    /// Extracts the scalar, if this is a leaf.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the text, if this is a text leaf.
    pub fn as_text(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_text)
    }

    /// Number of children. Leaves have none.
    pub fn len(&self) -> usize {
        match self {
            Node::Map(m) => m.len(),
            Node::Seq(items) | Node::Set(items) => items.len(),
            Node::Scalar(_) | Node::Unsupported(_) => 0,
        }
    }

    /// Returns `true` if this node has no children.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short name of the node's shape.
    pub fn type_name(&self) -> &str {
        match self {
            Node::Map(_) => "map",
            Node::Seq(_) => "list",
            Node::Set(_) => "set",
            Node::Scalar(s) => s.type_name(),
            Node::Unsupported(name) => name,
        }
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Scalar(Scalar::Text(s)) => write!(f, "'{}'", s),
            other => write!(f, "{}", other),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Scalar(s) => write!(f, "{}", s),
            Node::Unsupported(name) => write!(f, "<{}>", name),
            Node::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match key {
                        Key::Text(s) => write!(f, "'{}': ", s)?,
                        other => write!(f, "{}: ", other)?,
                    }
                    value.fmt_nested(f)?;
                }
                write!(f, "}}")
            }
            Node::Seq(items) | Node::Set(items) => {
                let (open, close) = match self {
                    Node::Set(_) => ("{", "}"),
                    _ => ("[", "]"),
                };
                write!(f, "{}", open)?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    item.fmt_nested(f)?;
                }
                write!(f, "{}", close)
            }
        }
    }
}

impl From<Scalar> for Node {
    fn from(s: Scalar) -> Self {
        Node::Scalar(s)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Scalar(s.into())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Scalar(s.into())
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Scalar(b.into())
    }
}

impl From<i32> for Node {
    fn from(n: i32) -> Self {
        Node::Scalar(n.into())
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Node::Scalar(n.into())
    }
}

impl From<f64> for Node {
    fn from(n: f64) -> Self {
        Node::Scalar(n.into())
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Node::null, Into::into)
    }
}

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(items: Vec<T>) -> Self {
        Node::seq(items)
    }
}

impl From<BTreeMap<Key, Node>> for Node {
    fn from(entries: BTreeMap<Key, Node>) -> Self {
        Node::Map(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_numeric_equality() {
        assert_eq!(Scalar::Int(3), Scalar::Float(3.0));
        assert_eq!(Scalar::Float(3.0), Scalar::Int(3));
        assert_ne!(Scalar::Int(3), Scalar::Float(3.5));
    }

    #[test]
    fn int_float_equality_is_exact_past_f64_precision() {
        let big = 1i64 << 53;
        assert_eq!(Scalar::Int(big), Scalar::Float(big as f64));
        assert_ne!(Scalar::Int(big + 1), Scalar::Float(big as f64));
        assert_ne!(Scalar::Float(big as f64), Scalar::Int(big + 1));
        assert_ne!(Scalar::Int(i64::MAX), Scalar::Float(i64::MAX as f64));
        assert_ne!(Scalar::Int(0), Scalar::Float(f64::NAN));
        assert!(!Key::Int(big + 1).eq_scalar(&Scalar::Float(big as f64)));
        assert!(Key::Int(big).eq_scalar(&Scalar::Float(big as f64)));
    }

    #[test]
    fn set_dedup_does_not_depend_on_order() {
        let big = 1i64 << 53;
        let a = Node::set([Node::from(big + 1), Node::from(big as f64), Node::from(big)]);
        let b = Node::set([Node::from(big), Node::from(big as f64), Node::from(big + 1)]);
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 2);
        assert_ne!(Scalar::Bool(false), Scalar::Int(0));
        assert_ne!(Scalar::Null, Scalar::Text(String::new()));
    }

    #[test]
    fn scalar_falsy() {
        assert!(Scalar::Null.is_falsy());
        assert!(Scalar::Bool(false).is_falsy());
        assert!(Scalar::Int(0).is_falsy());
        assert!(Scalar::Float(0.0).is_falsy());
        assert!(Scalar::Text(String::new()).is_falsy());

        assert!(!Scalar::Bool(true).is_falsy());
        assert!(!Scalar::Int(-1).is_falsy());
        assert!(!Scalar::from("0").is_falsy());
    }

    #[test]
    fn key_ordering_is_variant_then_value() {
        let mut keys = vec![
            Key::from("b"),
            Key::from(2),
            Key::from("a"),
            Key::from(true),
            Key::from(1),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                Key::Bool(true),
                Key::Int(1),
                Key::Int(2),
                Key::from("a"),
                Key::from("b"),
            ]
        );
    }

    #[test]
    fn key_as_index() {
        assert_eq!(Key::Int(4).as_index(), Some(4));
        assert_eq!(Key::from("12").as_index(), Some(12));
        assert_eq!(Key::from("-1").as_index(), Some(-1));
        assert_eq!(Key::from("name").as_index(), None);
        assert_eq!(Key::Bool(true).as_index(), None);
    }

    #[test]
    fn key_eq_scalar() {
        assert!(Key::from("a").eq_scalar(&Scalar::from("a")));
        assert!(Key::Int(2).eq_scalar(&Scalar::Float(2.0)));
        assert!(!Key::from("2").eq_scalar(&Scalar::Int(2)));
    }

    #[test]
    fn set_drops_duplicates() {
        let set = Node::set([1, 2, 1, 3, 2]);
        assert_eq!(set, Node::Set(vec![1.into(), 2.into(), 3.into()]));
    }

    #[test]
    fn map_iterates_sorted() {
        let node = Node::map([("zeta", 1), ("alpha", 2), ("mid", 3)]);
        let Node::Map(entries) = node else {
            panic!("expected map");
        };
        let keys: Vec<_> = entries.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn display_nested() {
        let node = Node::map([
            ("color", Node::from("red")),
            ("sizes", Node::seq([1, 2])),
        ]);
        assert_eq!(node.to_string(), "{'color': 'red', 'sizes': [1, 2]}");
        assert_eq!(Node::from("plain").to_string(), "plain");
        assert_eq!(Node::set(["a"]).to_string(), "{'a'}");
        assert_eq!(Node::Unsupported("Socket".into()).to_string(), "<Socket>");
    }

    #[test]
    fn len_and_type_name() {
        assert_eq!(Node::seq([1, 2, 3]).len(), 3);
        assert_eq!(Node::from(5).len(), 0);
        assert!(Node::seq(Vec::<Node>::new()).is_empty());
        assert_eq!(Node::set([1]).type_name(), "set");
        assert_eq!(Node::from(1.5).type_name(), "float");
        assert_eq!(Node::Unsupported("Widget".into()).type_name(), "Widget");
    }

    #[test]
    fn option_becomes_null() {
        assert_eq!(Node::from(None::<i64>), Node::null());
        assert_eq!(Node::from(Some(7)), Node::from(7));
    }
}
