//! Small text helpers.

use crate::node::Node;

/// Returns `true` if the node is a text leaf.
pub fn is_text(node: &Node) -> bool {
    node.as_text().is_some()
}

/// Formats an integer with thousands separators.
///
/// ```
/// use rummage::human_int;
///
/// assert_eq!(human_int(1234567), "1,234,567");
/// assert_eq!(human_int(-1000), "-1,000");
/// assert_eq!(human_int(999), "999");
/// ```
pub fn human_int(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `"s"` unless `n` is exactly one.
pub fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_int_boundaries() {
        assert_eq!(human_int(0), "0");
        assert_eq!(human_int(100), "100");
        assert_eq!(human_int(1000), "1,000");
        assert_eq!(human_int(100000), "100,000");
        assert_eq!(human_int(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn plural_suffix() {
        assert_eq!(plural(0), "s");
        assert_eq!(plural(1), "");
        assert_eq!(plural(2), "s");
    }

    #[test]
    fn text_detection() {
        assert!(is_text(&Node::from("x")));
        assert!(is_text(&Node::from("")));
        assert!(!is_text(&Node::from(1)));
        assert!(!is_text(&Node::seq(["x"])));
    }
}
