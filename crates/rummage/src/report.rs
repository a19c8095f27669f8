//! Rendering search results as text.
//!
//! A [`Report`] shows each found path as `name['a'][0]: value`, caps the
//! number of displayed lines and summarizes the total. A path whose key and
//! value both matched is one result, the same unit [`crate::find`] returns.
//! The cap only affects display: every path is always found and counted.
//! Values are looked up by resolving each path against the haystack.
//!
//! Colors come from an explicit [`Palette`]; nothing reads or sets global
//! color state besides `console`'s own terminal detection.

use std::fmt;

use console::Style;

use crate::locate::{FindOptions, Finder, Hit, Target};
use crate::node::Node;
use crate::path::Path;
use crate::resolve::get_path;
use crate::text::{human_int, plural};

/// Name shown in front of every path unless overridden.
pub const DEFAULT_NAME: &str = "haystack";

/// Styles used by a [`Report`].
#[derive(Debug, Clone)]
pub struct Palette {
    /// Style for `name['path']`.
    pub path: Style,
    /// Style for the resolved value.
    pub value: Style,
    /// Style for summary lines.
    pub info: Style,
    /// Style for secondary markers such as `(key)`.
    pub muted: Style,
}

impl Palette {
    /// No styling at all.
    pub fn plain() -> Self {
        Palette {
            path: Style::new(),
            value: Style::new(),
            info: Style::new(),
            muted: Style::new(),
        }
    }

    /// Blue paths, green values, cyan summaries.
    ///
    /// Colors are only emitted when `console` detects a color terminal,
    /// unless forced with [`Palette::force_styling`].
    pub fn colored() -> Self {
        Palette {
            path: Style::new().blue(),
            value: Style::new().green(),
            info: Style::new().cyan(),
            muted: Style::new().dim(),
        }
    }

    /// Forces styling on or off regardless of terminal detection.
    pub fn force_styling(self, yes: bool) -> Self {
        Palette {
            path: self.path.force_styling(yes),
            value: self.value.force_styling(yes),
            info: self.info.force_styling(yes),
            muted: self.muted.force_styling(yes),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::plain()
    }
}

/// Search results ready for display.
///
/// # Example
///
/// ```
/// use rummage::{Finder, Node};
///
/// let haystack = Node::map([("fruits", Node::seq(["banana", "lemon"]))]);
/// let report = Finder::new("lemon").report(&haystack);
///
/// assert_eq!(report.total(), 1);
/// assert_eq!(report.to_string(), "haystack['fruits'][1]: lemon\nFound 1 result");
/// ```
#[derive(Debug, Clone)]
pub struct Report<'a> {
    haystack: &'a Node,
    hits: Vec<Hit>,
    rows: Vec<Row>,
    options: FindOptions,
    name: String,
    palette: Palette,
}

/// One displayed path and which parts of it matched.
#[derive(Debug, Clone)]
struct Row {
    path: Path,
    key: bool,
    value: bool,
}

// Hits for one path are adjacent: the key is tested right before its value.
fn rows(hits: &[Hit]) -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::new();
    for hit in hits {
        if rows.last().map_or(true, |last| last.path != hit.path) {
            rows.push(Row {
                path: hit.path.clone(),
                key: false,
                value: false,
            });
        }
        if let Some(row) = rows.last_mut() {
            match hit.target {
                Target::Key => row.key = true,
                Target::Value => row.value = true,
            }
        }
    }
    rows
}

impl<'a> Report<'a> {
    /// Builds a report from hits already collected against `haystack`.
    pub fn new(haystack: &'a Node, hits: Vec<Hit>, options: FindOptions) -> Self {
        Report {
            haystack,
            rows: rows(&hits),
            hits,
            options,
            name: DEFAULT_NAME.to_string(),
            palette: Palette::default(),
        }
    }

    /// Sets the name shown before each path.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the palette.
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Every hit, including those beyond the display cap.
    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }

    /// Total number of results, counting each path once.
    pub fn total(&self) -> usize {
        self.rows.len()
    }

    /// Number of results that will be displayed.
    pub fn displayed(&self) -> usize {
        self.options.display_limit(self.total())
    }

    /// Returns `true` if some results are left out of the display.
    pub fn is_truncated(&self) -> bool {
        self.displayed() < self.total()
    }

    /// The rendered lines.
    pub fn lines(&self) -> Vec<String> {
        let palette = &self.palette;
        if self.rows.is_empty() {
            return vec![palette.info.apply_to("Not found").to_string()];
        }

        let mut lines: Vec<String> = self
            .rows
            .iter()
            .take(self.displayed())
            .map(|row| self.row_line(row))
            .collect();

        if self.is_truncated() {
            lines.push(
                palette
                    .info
                    .apply_to(format!(
                        "Displayed first {} results...",
                        human_int(self.displayed() as i64)
                    ))
                    .to_string(),
            );
        }
        if !self.options.first_only {
            let total = self.total();
            lines.push(
                palette
                    .info
                    .apply_to(format!(
                        "Found {} result{}",
                        human_int(total as i64),
                        plural(total)
                    ))
                    .to_string(),
            );
        }
        lines
    }

    /// The rendered report, one line per entry.
    pub fn render(&self) -> String {
        self.lines().join("\n")
    }

    fn row_line(&self, row: &Row) -> String {
        let palette = &self.palette;
        let location = palette
            .path
            .apply_to(format!("{}{}", self.name, row.path));
        let marker = match (row.key, row.value) {
            (true, true) => format!(" {}", palette.muted.apply_to("(key and value)")),
            (true, false) => format!(" {}", palette.muted.apply_to("(key)")),
            _ => String::new(),
        };
        let value = match get_path(self.haystack, &row.path) {
            Some(node) => palette.value.apply_to(node.to_string()).to_string(),
            None => palette.muted.apply_to("<unresolved>").to_string(),
        };
        format!("{}{}: {}", location, marker, value)
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl Finder {
    /// Runs the search and wraps the hits in a [`Report`].
    pub fn report<'a>(&self, haystack: &'a Node) -> Report<'a> {
        Report::new(haystack, self.hits(haystack), self.options().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::find;

    fn colors() -> Node {
        Node::seq(["red", "green", "blue", "reddish", "redwood"])
    }

    #[test]
    fn not_found() {
        let haystack = colors();
        let report = Finder::new("purple").report(&haystack);
        assert_eq!(report.render(), "Not found");
        assert_eq!(report.total(), 0);
    }

    #[test]
    fn display_cap_keeps_full_count() {
        let haystack = colors();
        let report = Finder::new("red").max_results(2).report(&haystack);
        assert_eq!(report.total(), 3);
        assert_eq!(report.displayed(), 2);
        assert!(report.is_truncated());
        assert_eq!(
            report.lines(),
            vec![
                "haystack[0]: red",
                "haystack[3]: reddish",
                "Displayed first 2 results...",
                "Found 3 results",
            ]
        );
    }

    #[test]
    fn show_all_ignores_cap() {
        let haystack = colors();
        let report = Finder::new("red").max_results(1).show_all().report(&haystack);
        assert!(!report.is_truncated());
        assert_eq!(report.lines().len(), 4);
    }

    #[test]
    fn first_only_has_no_summary() {
        let haystack = colors();
        let report = Finder::new("red").first_only().report(&haystack);
        assert_eq!(report.render(), "haystack[0]: red");
    }

    #[test]
    fn key_hits_are_marked() {
        let haystack = Node::map([("red", "apple")]);
        let report = Finder::new("red").report(&haystack).name("colors");
        assert_eq!(
            report.lines(),
            vec!["colors['red'] (key): apple", "Found 1 result"]
        );
    }

    #[test]
    fn key_and_value_on_one_path_is_one_result() {
        let haystack = Node::map([("green", "green")]);
        let report = Finder::new("green").report(&haystack);
        assert_eq!(report.total(), find(&haystack, "green").len());
        assert_eq!(report.hits().len(), 2);
        assert_eq!(
            report.lines(),
            vec!["haystack['green'] (key and value): green", "Found 1 result"]
        );
    }

    #[test]
    fn container_values_render_inline() {
        let haystack = Node::map([("box", Node::seq([Node::map([("id", 7)])]))]);
        let report = Finder::new(7).report(&haystack);
        assert_eq!(report.lines()[0], "haystack['box'][0]['id']: 7");
    }

    #[test]
    fn forced_colors_emit_escape_codes() {
        let palette = Palette::colored().force_styling(true);
        let haystack = colors();
        let report = Finder::new("green").report(&haystack).palette(palette);
        assert!(report.render().contains("\u{1b}["));

        let haystack = colors();

        let plain = Finder::new("green").report(&haystack);
        assert!(!plain.render().contains("\u{1b}["));
    }
}
