//! Rummage - find and address values inside arbitrarily nested data.
//!
//! Rummage works on a [`Node`] tree: mappings, sequences, sets and scalars,
//! nested to any depth and mixed at every level. It provides:
//!
//! - **Locating**: every path at which a needle occurs, as a key or a value
//! - **Resolving**: the value at a path, given as keys or as delimited text
//! - **Reporting**: hits rendered as `haystack['a'][0]: value` lines
//! - **Describing**: a one-line "what am I?" summary of any node
//! - **Bisecting**: the items of a batch that make a black-box call fail
//!
//! # Quick Start
//!
//! ```rust
//! use rummage::{get_expr, get_path, Finder, Node};
//!
//! let haystack = Node::from_json_str(r#"{
//!     "fruits": [
//!         {"color": "yellow", "name": "banana"},
//!         {"color": "red", "name": "strawberry"},
//!         {"color": "yellow", "name": "lemon"}
//!     ],
//!     "vegetables": [
//!         {"color": "green", "name": "green pepper"}
//!     ]
//! }"#).unwrap();
//!
//! let paths = Finder::new("pepper").build().paths(&haystack);
//! assert_eq!(paths.len(), 1);
//! assert_eq!(paths[0].to_string(), "['vegetables'][0]['name']");
//!
//! // Every path resolves back to what was found.
//! assert_eq!(get_path(&haystack, &paths[0]), Some(&Node::from("green pepper")));
//! assert_eq!(get_expr(&haystack, "vegetables 0 name"), Some(&Node::from("green pepper")));
//! ```
//!
//! # Matching Rules
//!
//! | Candidate | Rule |
//! |-----------|------|
//! | Any scalar | Equal to the needle |
//! | Non-empty text, text needle | Contains the needle (optionally ignoring case) |
//! | Non-empty text, regex needle | Matches the regex |
//! | Mapping key | Same rules as a scalar |
//! | Container | Descended into; never compared itself |
//!
//! Empty text and an empty needle only ever match by equality, so searching
//! for `""` does not match everything.
//!
//! # Traversal Order
//!
//! Mappings are walked in sorted key order, sequences by index, sets in
//! their stored order. Results are therefore reproducible.

mod bisect;
mod convert;
mod describe;
mod error;
mod locate;
mod node;
mod path;
mod pattern;
mod report;
mod resolve;
mod text;

// Re-export public API
pub use bisect::{find_failing, Culprit};
pub use describe::{classify_text, describe};
pub use error::{Result, RummageError};
pub use locate::{find, FindOptions, Finder, Hit, Target};
pub use node::{Key, Node, Scalar};
pub use path::{Path, DEFAULT_DELIMITER};
pub use pattern::{MatchKind, Needle, Pattern};
pub use report::{Palette, Report, DEFAULT_NAME};
pub use resolve::{get, get_delimited, get_expr, get_path};
pub use text::{human_int, is_text, plural};
