//! Paths into a haystack.
//!
//! A [`Path`] is an ordered list of [`Key`]s. Mapping entries are addressed
//! by their key; sequence elements and set members by their position.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::node::Key;

/// Default segment delimiter for [`Path::parse`].
pub const DEFAULT_DELIMITER: &str = " ";

/// Ordered keys locating a value within a haystack.
///
/// Displays in subscript form, the way the value would be indexed:
///
/// ```
/// use rummage::{Key, Path};
///
/// let path = Path::from(vec![Key::from("fruits"), Key::Int(2), Key::from("name")]);
/// assert_eq!(path.to_string(), "['fruits'][2]['name']");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<Key>);

impl Path {
    /// Creates an empty path, which resolves to the haystack itself.
    pub fn new() -> Self {
        Path::default()
    }

    /// Splits a delimited expression into text segments.
    ///
    /// Empty segments are skipped, so an empty expression is the empty path
    /// and repeated delimiters collapse. Segments stay text; the resolver
    /// coerces them to positions where the container needs one.
    ///
    /// ```
    /// use rummage::{Key, Path};
    ///
    /// let path = Path::parse("vegetables.0.name", ".");
    /// assert_eq!(path.keys(), &[Key::from("vegetables"), Key::from("0"), Key::from("name")]);
    /// assert!(Path::parse("", " ").is_empty());
    /// ```
    pub fn parse(expr: &str, delimiter: &str) -> Self {
        if delimiter.is_empty() {
            return if expr.is_empty() {
                Path::new()
            } else {
                Path(vec![Key::from(expr)])
            };
        }
        Path(
            expr.split(delimiter)
                .filter(|segment| !segment.is_empty())
                .map(Key::from)
                .collect(),
        )
    }

    /// The keys of this path, outermost first.
    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the empty path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a segment.
    pub fn push(&mut self, key: impl Into<Key>) {
        self.0.push(key.into());
    }

    /// Removes the last segment.
    pub fn pop(&mut self) -> Option<Key> {
        self.0.pop()
    }

    /// Returns `true` if `self` is `other` or lies beneath it.
    pub fn starts_with(&self, other: &Path) -> bool {
        self.0.starts_with(&other.0)
    }

    /// Joins the segments with a delimiter, the inverse of [`Path::parse`]
    /// for keys that do not contain the delimiter.
    pub fn to_expr(&self, delimiter: &str) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(delimiter)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for key in &self.0 {
            match key {
                Key::Text(s) => write!(f, "['{}']", s)?,
                other => write!(f, "[{}]", other)?,
            }
        }
        Ok(())
    }
}

impl From<Vec<Key>> for Path {
    fn from(keys: Vec<Key>) -> Self {
        Path(keys)
    }
}

impl FromIterator<Key> for Path {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Key;
    type IntoIter = std::slice::Iter<'a, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl AsRef<[Key]> for Path {
    fn as_ref(&self) -> &[Key] {
        &self.0
    }
}
