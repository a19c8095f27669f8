//! Needles and the rules for matching them.
//!
//! A [`Pattern`] pairs a [`Needle`] with the case and substring settings of a
//! search, and decides for a single key or value whether it matches and how.

use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::error::Result;
use crate::node::{Key, Scalar};

/// How a candidate matched the needle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// The candidate equals the needle (or equals it ignoring case, when
    /// substring matching is off).
    Exact,
    /// The needle text is contained in the candidate text.
    Substring,
    /// The candidate text matches the needle regex.
    Regex,
}

impl MatchKind {
    /// Returns the display name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::Substring => "substring",
            MatchKind::Regex => "regex",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The value being searched for.
#[derive(Debug, Clone)]
pub enum Needle {
    /// A scalar, compared by equality and, for text, by containment.
    Value(Scalar),
    /// A compiled regular expression, tested against text candidates.
    Regex(Regex),
}

impl Needle {
    /// Extracts the scalar needle, if this is not a regex.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Needle::Value(s) => Some(s),
            Needle::Regex(_) => None,
        }
    }
}

impl fmt::Display for Needle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Needle::Value(s) => write!(f, "{}", s),
            Needle::Regex(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

impl From<Scalar> for Needle {
    fn from(value: Scalar) -> Self {
        Needle::Value(value)
    }
}

impl From<&str> for Needle {
    fn from(s: &str) -> Self {
        Needle::Value(s.into())
    }
}

impl From<String> for Needle {
    fn from(s: String) -> Self {
        Needle::Value(s.into())
    }
}

impl From<bool> for Needle {
    fn from(b: bool) -> Self {
        Needle::Value(b.into())
    }
}

impl From<i32> for Needle {
    fn from(n: i32) -> Self {
        Needle::Value(n.into())
    }
}

impl From<i64> for Needle {
    fn from(n: i64) -> Self {
        Needle::Value(n.into())
    }
}

impl From<f64> for Needle {
    fn from(n: f64) -> Self {
        Needle::Value(n.into())
    }
}

impl From<Regex> for Needle {
    fn from(re: Regex) -> Self {
        Needle::Regex(re)
    }
}

/// A needle together with its matching rules.
///
/// # Example
///
/// ```
/// use rummage::{MatchKind, Pattern, Scalar};
///
/// let pattern = Pattern::new("PEPPER", true, true);
/// assert_eq!(
///     pattern.match_scalar(&Scalar::from("green pepper")),
///     Some(MatchKind::Substring)
/// );
///
/// let strict = Pattern::new("PEPPER", false, true);
/// assert_eq!(strict.match_scalar(&Scalar::from("green pepper")), None);
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    needle: Needle,
    ignore_case: bool,
    substring: bool,
    folded: Option<String>,
}

impl Pattern {
    /// Creates a pattern for a scalar or regex needle.
    pub fn new(needle: impl Into<Needle>, ignore_case: bool, substring: bool) -> Self {
        let needle = needle.into();
        let folded = match &needle {
            Needle::Value(Scalar::Text(s)) if ignore_case => Some(s.to_lowercase()),
            _ => None,
        };
        Pattern {
            needle,
            ignore_case,
            substring,
            folded,
        }
    }

    /// Compiles a regex needle.
    ///
    /// Returns an error if the pattern is invalid.
    pub fn regex(pattern: &str, ignore_case: bool) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(ignore_case)
            .build()?;
        Ok(Pattern::new(regex, ignore_case, false))
    }

    /// The needle.
    pub fn needle(&self) -> &Needle {
        &self.needle
    }

    /// Returns `true` if text comparisons ignore case.
    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Returns `true` if text needles match by containment.
    pub fn substring(&self) -> bool {
        self.substring
    }

    /// Tests a mapping key against the needle.
    pub fn match_key(&self, key: &Key) -> Option<MatchKind> {
        match (&self.needle, key) {
            // Keys are never containers, so text keys go through the
            // scalar rules and everything else is plain equality.
            (_, Key::Text(s)) => self.match_text(s),
            (Needle::Value(needle), other) => other.eq_scalar(needle).then_some(MatchKind::Exact),
            (Needle::Regex(_), _) => None,
        }
    }

    /// Tests a leaf value against the needle.
    ///
    /// Exact equality applies to every scalar. Containment and regex tests
    /// only apply to non-empty text, and containment also needs a non-empty
    /// text needle.
    pub fn match_scalar(&self, candidate: &Scalar) -> Option<MatchKind> {
        match candidate {
            Scalar::Text(s) => self.match_text(s),
            other => match &self.needle {
                Needle::Value(needle) => (other == needle).then_some(MatchKind::Exact),
                Needle::Regex(_) => None,
            },
        }
    }

    fn match_text(&self, candidate: &str) -> Option<MatchKind> {
        let needle = match &self.needle {
            Needle::Regex(re) => {
                return (!candidate.is_empty() && re.is_match(candidate))
                    .then_some(MatchKind::Regex);
            }
            Needle::Value(Scalar::Text(needle)) => needle,
            Needle::Value(_) => return None,
        };

        if candidate == needle {
            return Some(MatchKind::Exact);
        }
        if candidate.is_empty() || needle.is_empty() {
            return None;
        }

        match (self.substring, &self.folded) {
            (true, Some(folded)) => candidate
                .to_lowercase()
                .contains(folded.as_str())
                .then_some(MatchKind::Substring),
            (true, None) => candidate
                .contains(needle.as_str())
                .then_some(MatchKind::Substring),
            (false, Some(folded)) => {
                (candidate.to_lowercase() == *folded).then_some(MatchKind::Exact)
            }
            (false, None) => None,
        }
    }
}
