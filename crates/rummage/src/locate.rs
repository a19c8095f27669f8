//! Finding every path to a needle.
//!
//! [`Finder`] is a fluent builder over a needle and [`FindOptions`]; its
//! execution methods walk a haystack depth first and collect [`Hit`]s.
//!
//! # Traversal order
//!
//! Mappings are walked in sorted key order, sequences by index and sets in
//! their stored order, so the same haystack always yields the same hits in
//! the same order. At each position the mapping key is tested first, then the
//! value; a key hit does not stop the value from being tested.

use std::ops::ControlFlow;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::node::{Key, Node};
use crate::path::Path;
use crate::pattern::{MatchKind, Needle, Pattern};

/// Search settings.
///
/// Deserializes with defaults for missing fields, so it can be loaded from a
/// partial JSON or YAML document.
///
/// ```
/// use rummage::FindOptions;
///
/// let opts: FindOptions = serde_json::from_str(r#"{"ignore_case": false}"#).unwrap();
/// assert!(!opts.ignore_case);
/// assert!(opts.substring);
/// assert_eq!(opts.max_results, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FindOptions {
    /// Stop the whole traversal at the first hit.
    pub first_only: bool,
    /// Compare text case-insensitively.
    pub ignore_case: bool,
    /// Match text needles by containment, not only by equality.
    pub substring: bool,
    /// Display every hit, ignoring `max_results`.
    pub show_all: bool,
    /// Maximum number of results to display. Zero means unlimited; a
    /// negative number in a loaded document is read as zero.
    /// Never limits the hits that are found.
    #[serde(deserialize_with = "negative_is_unlimited")]
    pub max_results: usize,
}

fn negative_is_unlimited<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let n = i64::deserialize(deserializer)?;
    Ok(usize::try_from(n).unwrap_or(0))
}

impl Default for FindOptions {
    fn default() -> Self {
        FindOptions {
            first_only: false,
            ignore_case: true,
            substring: true,
            show_all: false,
            max_results: 50,
        }
    }
}

impl FindOptions {
    /// Number of hits to display out of `total`.
    pub fn display_limit(&self, total: usize) -> usize {
        if self.show_all || self.max_results == 0 {
            total
        } else {
            total.min(self.max_results)
        }
    }
}

/// Whether a hit is on a mapping key or on a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// The mapping key at the end of the path matched.
    Key,
    /// The value at the end of the path matched.
    Value,
}

/// A single match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hit {
    /// Location of the match.
    pub path: Path,
    /// Whether the key or the value at `path` matched.
    pub target: Target,
    /// How it matched.
    pub kind: MatchKind,
}

/// A search for a needle.
///
/// # Example
///
/// ```
/// use rummage::{Finder, Node};
///
/// let haystack = Node::from_json_str(r#"{
///     "fruits": [
///         {"color": "yellow", "name": "banana"},
///         {"color": "red", "name": "strawberry"},
///         {"color": "yellow", "name": "lemon"}
///     ]
/// }"#).unwrap();
///
/// let paths = Finder::new("yellow").build().paths(&haystack);
/// let rendered: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
/// assert_eq!(rendered, ["['fruits'][0]['color']", "['fruits'][2]['color']"]);
/// ```
#[derive(Debug, Clone)]
pub struct Finder {
    needle: Needle,
    options: FindOptions,
}

impl Finder {
    /// Creates a search with default options.
    pub fn new(needle: impl Into<Needle>) -> Self {
        Finder::with_options(needle, FindOptions::default())
    }

    /// Creates a search with the given options.
    pub fn with_options(needle: impl Into<Needle>, options: FindOptions) -> Self {
        Finder {
            needle: needle.into(),
            options,
        }
    }

    /// Creates a regex search.
    ///
    /// Case sensitivity is fixed when the pattern is compiled; later calls to
    /// [`Finder::ignore_case`] do not change it.
    ///
    /// Returns an error if the pattern is invalid.
    pub fn regex(pattern: &str, ignore_case: bool) -> Result<Self> {
        let compiled = Pattern::regex(pattern, ignore_case)?;
        Ok(Finder::with_options(
            compiled.needle().clone(),
            FindOptions {
                ignore_case,
                substring: false,
                ..FindOptions::default()
            },
        ))
    }

    // ========================================================================
    // Options
    // ========================================================================

    /// Stops at the first hit.
    pub fn first_only(mut self) -> Self {
        self.options.first_only = true;
        self
    }

    /// Sets case-insensitive text comparison.
    pub fn ignore_case(mut self, yes: bool) -> Self {
        self.options.ignore_case = yes;
        self
    }

    /// Sets substring matching for text needles.
    pub fn substring(mut self, yes: bool) -> Self {
        self.options.substring = yes;
        self
    }

    /// Matches text needles by equality only.
    pub fn exact(self) -> Self {
        self.substring(false)
    }

    /// Caps the number of displayed hits. Zero means unlimited.
    pub fn max_results(mut self, n: usize) -> Self {
        self.options.max_results = n;
        self
    }

    /// Displays every hit regardless of `max_results`.
    pub fn show_all(mut self) -> Self {
        self.options.show_all = true;
        self
    }

    /// Finalizes the search.
    pub fn build(self) -> Self {
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// The needle.
    pub fn needle(&self) -> &Needle {
        &self.needle
    }

    /// The current options.
    pub fn options(&self) -> &FindOptions {
        &self.options
    }

    /// The matching rules derived from the needle and options.
    pub fn pattern(&self) -> Pattern {
        Pattern::new(
            self.needle.clone(),
            self.options.ignore_case,
            self.options.substring,
        )
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Collects every hit in traversal order.
    ///
    /// A haystack that is not a container yields no hits.
    pub fn hits(&self, haystack: &Node) -> Vec<Hit> {
        let pattern = self.pattern();
        let mut walk = Walk {
            pattern: &pattern,
            first_only: self.options.first_only,
            path: Path::new(),
            hits: Vec::new(),
        };
        let _ = walk.container(haystack);
        debug!(
            needle = %self.needle,
            hits = walk.hits.len(),
            first_only = self.options.first_only,
            "search complete"
        );
        walk.hits
    }

    /// Collects the path of every hit.
    ///
    /// When both the key and the value at one position match, the path is
    /// listed once.
    pub fn paths(&self, haystack: &Node) -> Vec<Path> {
        let mut paths: Vec<Path> = self.hits(haystack).into_iter().map(|h| h.path).collect();
        paths.dedup();
        paths
    }

    /// Returns the first hit, stopping the traversal there.
    pub fn first(&self, haystack: &Node) -> Option<Hit> {
        self.clone().first_only().hits(haystack).into_iter().next()
    }

    /// Returns `true` if the needle occurs anywhere.
    pub fn any(&self, haystack: &Node) -> bool {
        self.first(haystack).is_some()
    }

    /// Counts every found path, the length of [`Finder::paths`].
    pub fn count(&self, haystack: &Node) -> usize {
        self.paths(haystack).len()
    }
}

/// Finds every path to `needle` with default options.
///
/// Default options ignore case and match text by containment.
///
/// ```
/// use rummage::{find, Key, Node};
///
/// let haystack = Node::map([("vegetables", Node::seq([Node::map([("name", "green pepper")])]))]);
/// let paths = find(&haystack, "pepper");
/// assert_eq!(paths[0].keys(), &[Key::from("vegetables"), Key::Int(0), Key::from("name")]);
/// ```
pub fn find(haystack: &Node, needle: impl Into<Needle>) -> Vec<Path> {
    Finder::new(needle).paths(haystack)
}

/// Depth-first traversal state.
struct Walk<'p> {
    pattern: &'p Pattern,
    first_only: bool,
    path: Path,
    hits: Vec<Hit>,
}

impl Walk<'_> {
    fn container(&mut self, node: &Node) -> ControlFlow<()> {
        match node {
            Node::Map(entries) => {
                for (key, value) in entries {
                    self.path.push(key.clone());
                    let flow = self.position(Some(key), value);
                    self.path.pop();
                    flow?;
                }
            }
            Node::Seq(items) | Node::Set(items) => {
                for (index, item) in items.iter().enumerate() {
                    self.path.push(index);
                    let flow = self.position(None, item);
                    self.path.pop();
                    flow?;
                }
            }
            Node::Scalar(_) | Node::Unsupported(_) => {}
        }
        ControlFlow::Continue(())
    }

    fn position(&mut self, key: Option<&Key>, value: &Node) -> ControlFlow<()> {
        if let Some(kind) = key.and_then(|k| self.pattern.match_key(k)) {
            self.record(Target::Key, kind)?;
        }
        match value {
            Node::Scalar(scalar) => {
                if let Some(kind) = self.pattern.match_scalar(scalar) {
                    self.record(Target::Value, kind)?;
                }
                ControlFlow::Continue(())
            }
            Node::Unsupported(_) => ControlFlow::Continue(()),
            container => self.container(container),
        }
    }

    fn record(&mut self, target: Target, kind: MatchKind) -> ControlFlow<()> {
        self.hits.push(Hit {
            path: self.path.clone(),
            target,
            kind,
        });
        if self.first_only {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}
