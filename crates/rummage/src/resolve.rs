//! Resolving a path to a value.
//!
//! Resolution never fails: a missing key, an index out of range or a
//! segment that cannot be read as an index all resolve to `None`, so lookups
//! can be chained on data of unknown shape.

use tracing::trace;

use crate::node::{Key, Node};
use crate::path::{Path, DEFAULT_DELIMITER};

/// Resolves explicit keys, outermost first.
///
/// Sequences and sets take integer positions (text segments are parsed,
/// negative positions count from the end). Mappings look the key up as
/// given; a text key that is absent falls back to its integer or boolean
/// reading. The empty key list resolves to the haystack itself.
///
/// # Example
///
/// ```
/// use rummage::{get, Key, Node};
///
/// let haystack = Node::map([("vegetables", Node::seq([Node::map([("name", "green pepper")])]))]);
/// let keys = [Key::from("vegetables"), Key::Int(0), Key::from("name")];
/// assert_eq!(get(&haystack, &keys), Some(&Node::from("green pepper")));
/// assert_eq!(get(&haystack, &[Key::from("fruits")]), None);
/// ```
pub fn get<'a>(haystack: &'a Node, keys: &[Key]) -> Option<&'a Node> {
    keys.iter().enumerate().try_fold(haystack, |node, (depth, key)| {
        let next = step(node, key);
        if next.is_none() {
            trace!(%key, depth, container = node.type_name(), "path segment not found");
        }
        next
    })
}

/// Resolves a [`Path`].
pub fn get_path<'a>(haystack: &'a Node, path: &Path) -> Option<&'a Node> {
    get(haystack, path.keys())
}

/// Resolves a space-delimited path expression such as `"vegetables 0 name"`.
pub fn get_expr<'a>(haystack: &'a Node, expr: &str) -> Option<&'a Node> {
    get_delimited(haystack, expr, DEFAULT_DELIMITER)
}

/// Resolves a path expression split on `delimiter`.
pub fn get_delimited<'a>(haystack: &'a Node, expr: &str, delimiter: &str) -> Option<&'a Node> {
    get_path(haystack, &Path::parse(expr, delimiter))
}

fn step<'a>(node: &'a Node, key: &Key) -> Option<&'a Node> {
    match node {
        Node::Map(entries) => entries.get(key).or_else(|| {
            key.as_text()
                .and_then(reinterpret_text_key)
                .and_then(|k| entries.get(&k))
        }),
        Node::Seq(items) | Node::Set(items) => key
            .as_index()
            .and_then(|index| position(items.len(), index))
            .and_then(|i| items.get(i)),
        Node::Scalar(_) | Node::Unsupported(_) => None,
    }
}

fn reinterpret_text_key(text: &str) -> Option<Key> {
    if let Ok(n) = text.parse::<i64>() {
        return Some(Key::Int(n));
    }
    match text {
        "true" | "True" => Some(Key::Bool(true)),
        "false" | "False" => Some(Key::Bool(false)),
        _ => None,
    }
}

fn position(len: usize, index: i64) -> Option<usize> {
    if index < 0 {
        let back = usize::try_from(index.unsigned_abs()).ok()?;
        len.checked_sub(back)
    } else {
        usize::try_from(index).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pantry() -> Node {
        Node::map([
            (
                "vegetables",
                Node::seq([Node::map([("name", "green pepper")])]),
            ),
            ("counts", Node::map([(Key::Int(1), "one"), (Key::Bool(true), "yes")])),
            ("tags", Node::set(["a", "b"])),
            ("empty", Node::from("")),
        ])
    }

    #[test]
    fn explicit_and_delimited_agree() {
        let data = pantry();
        let explicit = get(&data, &[Key::from("vegetables"), Key::Int(0), Key::from("name")]);
        let delimited = get_expr(&data, "vegetables 0 name");
        assert_eq!(explicit, Some(&Node::from("green pepper")));
        assert_eq!(explicit, delimited);
    }

    #[test]
    fn custom_delimiter() {
        let data = pantry();
        assert_eq!(
            get_delimited(&data, "vegetables/0/name", "/"),
            Some(&Node::from("green pepper"))
        );
    }

    #[test]
    fn missing_is_none() {
        let data = pantry();
        assert_eq!(get_expr(&data, "does_not_exist"), None);
        assert_eq!(get_expr(&data, "vegetables 5 name"), None);
        assert_eq!(get_expr(&data, "vegetables first"), None);
        assert_eq!(get_expr(&data, "vegetables 0 name deeper"), None);
    }

    #[test]
    fn empty_path_is_identity() {
        let data = pantry();
        assert_eq!(get(&data, &[]), Some(&data));
        assert_eq!(get_expr(&data, ""), Some(&data));
    }

    #[test]
    fn found_but_empty_is_some() {
        assert_eq!(get_expr(&pantry(), "empty"), Some(&Node::from("")));
    }

    #[test]
    fn negative_positions_count_from_end() {
        let data = Node::seq([1, 2, 3]);
        assert_eq!(get_expr(&data, "-1"), Some(&Node::from(3)));
        assert_eq!(get_expr(&data, "-3"), Some(&Node::from(1)));
        assert_eq!(get_expr(&data, "-4"), None);
    }

    #[test]
    fn text_segments_fall_back_to_integer_and_bool_keys() {
        let data = pantry();
        assert_eq!(get_expr(&data, "counts 1"), Some(&Node::from("one")));
        assert_eq!(get_expr(&data, "counts true"), Some(&Node::from("yes")));
        assert_eq!(get(&data, &[Key::from("counts"), Key::Int(1)]), Some(&Node::from("one")));
    }

    #[test]
    fn sets_by_position() {
        assert_eq!(get_expr(&pantry(), "tags 1"), Some(&Node::from("b")));
    }

    #[test]
    fn position_bounds() {
        assert_eq!(position(3, 0), Some(0));
        assert_eq!(position(3, -1), Some(2));
        assert_eq!(position(0, -1), None);
        assert_eq!(position(3, i64::MIN), None);
    }
}
