//! Isolating the items that make a batch call fail.
//!
//! When a function fails on a list of items without saying which ones are to
//! blame, [`find_failing`] splits the list in halves, re-runs the function on
//! each half and keeps narrowing the failing halves down to single items.
//!
//! With `k` failing items out of `n`, this needs `O(k log n)` calls.

use std::fmt;

use tracing::debug;

/// An item that fails on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Culprit<'a, T, E> {
    /// Position of the item in the original slice.
    pub index: usize,
    /// The item.
    pub item: &'a T,
    /// The error the check returned for this item alone.
    pub error: E,
}

#[derive(Debug, Clone, Copy)]
enum Half {
    First,
    Second,
}

impl fmt::Display for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Half::First => write!(f, "first"),
            Half::Second => write!(f, "second"),
        }
    }
}

/// Finds every item for which `check` fails, in original order.
///
/// The whole slice is never checked as one batch; the halves are. A failing
/// empty half cannot be narrowed and is ignored.
///
/// # Example
///
/// ```
/// use rummage::find_failing;
///
/// let items = ["1", "2", "x", "4", "5", "y"];
/// let culprits = find_failing(&items, |batch| {
///     batch.iter().map(|s| s.parse::<i32>()).collect::<Result<Vec<_>, _>>()
/// });
///
/// let found: Vec<&str> = culprits.iter().map(|c| *c.item).collect();
/// assert_eq!(found, ["x", "y"]);
/// assert_eq!(culprits[0].index, 2);
/// ```
pub fn find_failing<'a, T, R, E, F>(items: &'a [T], mut check: F) -> Vec<Culprit<'a, T, E>>
where
    F: FnMut(&[T]) -> Result<R, E>,
{
    let mut culprits = Vec::new();
    bisect(items, 0, 0, &mut check, &mut culprits);
    debug!(items = items.len(), failing = culprits.len(), "bisect complete");
    culprits
}

fn bisect<'a, T, R, E, F>(
    items: &'a [T],
    offset: usize,
    level: usize,
    check: &mut F,
    culprits: &mut Vec<Culprit<'a, T, E>>,
) where
    F: FnMut(&[T]) -> Result<R, E>,
{
    debug!(level, items = items.len(), "bisecting");
    let middle = items.len() / 2;
    let (first, second) = items.split_at(middle);
    check_half(first, offset, Half::First, level, check, culprits);
    check_half(second, offset + middle, Half::Second, level, check, culprits);
}

fn check_half<'a, T, R, E, F>(
    half: &'a [T],
    offset: usize,
    which: Half,
    level: usize,
    check: &mut F,
    culprits: &mut Vec<Culprit<'a, T, E>>,
) where
    F: FnMut(&[T]) -> Result<R, E>,
{
    let error = match check(half) {
        Ok(_) => return,
        Err(error) => error,
    };
    match half {
        [] => debug!(level, half = %which, "empty half failed, cannot narrow"),
        [item] => {
            debug!(level, index = offset, "found failing item");
            culprits.push(Culprit {
                index: offset,
                item,
                error,
            });
        }
        _ => {
            debug!(level, half = %which, "checking half");
            bisect(half, offset, level + 1, check, culprits);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_all(items: &[Result<i64, &'static str>]) -> Result<Vec<i64>, &'static str> {
        items.iter().copied().map(|r| r.map(|n| n * n)).collect()
    }

    #[test]
    fn finds_each_bad_item() {
        let items = vec![
            Ok(1),
            Ok(2),
            Ok(3),
            Ok(4),
            Ok(5),
            Err("fail1"),
            Ok(6),
            Ok(7),
            Ok(8),
            Ok(9),
            Ok(10),
            Err("fail2"),
        ];
        let culprits = find_failing(&items, square_all);
        let indexes: Vec<usize> = culprits.iter().map(|c| c.index).collect();
        let errors: Vec<&str> = culprits.iter().map(|c| c.error).collect();
        assert_eq!(indexes, vec![5, 11]);
        assert_eq!(errors, vec!["fail1", "fail2"]);
    }

    #[test]
    fn nothing_fails() {
        let items = vec![Ok(1), Ok(2), Ok(3)];
        assert!(find_failing(&items, square_all).is_empty());
    }

    #[test]
    fn every_item_fails() {
        let items: Vec<Result<i64, &str>> = vec![Err("a"), Err("b"), Err("c")];
        assert_eq!(find_failing(&items, square_all).len(), 3);
    }

    #[test]
    fn single_and_empty_inputs() {
        let one: Vec<Result<i64, &str>> = vec![Err("only")];
        let culprits = find_failing(&one, square_all);
        assert_eq!(culprits.len(), 1);
        assert_eq!(culprits[0].index, 0);

        let none: Vec<Result<i64, &str>> = Vec::new();
        assert!(find_failing(&none, square_all).is_empty());
    }

    #[test]
    fn failing_empty_batch_is_ignored() {
        let items = vec![1, 2, 3];
        let culprits = find_failing(&items, |batch| {
            if batch.is_empty() || batch.contains(&2) {
                Err(())
            } else {
                Ok(())
            }
        });
        let found: Vec<i32> = culprits.iter().map(|c| *c.item).collect();
        assert_eq!(found, vec![2]);
    }

    #[test]
    fn uses_fewer_calls_than_items_for_sparse_failures() {
        let items: Vec<u32> = (0..64).collect();
        let mut calls = 0;
        let culprits = find_failing(&items, |batch| {
            calls += 1;
            if batch.contains(&40) {
                Err(())
            } else {
                Ok(())
            }
        });
        assert_eq!(culprits.len(), 1);
        assert_eq!(*culprits[0].item, 40);
        assert!(calls < items.len());
    }
}
