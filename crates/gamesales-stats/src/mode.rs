//! Most-frequent-value computation.
//!
//! Every mode in the workspace goes through [`mode`] so ties are resolved the
//! same way everywhere: among values sharing the highest frequency, the
//! smallest one (by [`Ord`]) wins. The result therefore depends only on the
//! multiset of values, never on their order.

use std::collections::BTreeMap;

/// Counts occurrences of each distinct value, ordered by value.
///
/// # Examples
///
/// ```
/// use gamesales_stats::mode::frequencies;
///
/// let counts = frequencies([2015, 2014, 2015]);
/// assert_eq!(counts.get(&2015), Some(&2));
/// assert_eq!(counts.get(&2014), Some(&1));
/// ```
#[must_use]
pub fn frequencies<T, I>(values: I) -> BTreeMap<T, usize>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// Returns the most frequent value, or `None` for an empty input.
///
/// Ties go to the smallest value.
///
/// # Examples
///
/// ```
/// use gamesales_stats::mode::mode;
///
/// assert_eq!(mode([2009, 2010, 2010]), Some(2010));
/// assert_eq!(mode([2010, 2009]), Some(2009));
/// assert_eq!(mode(Vec::<i32>::new()), None);
/// ```
#[must_use]
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut best: Option<(T, usize)> = None;
    // Ascending iteration plus a strict comparison keeps the smallest tied value.
    for (value, count) in frequencies(values) {
        match &best {
            Some((_, best_count)) if count <= *best_count => {}
            _ => best = Some((value, count)),
        }
    }
    best.map(|(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_picks_most_frequent() {
        assert_eq!(mode(["T", "M", "M"]), Some("M"));
    }

    #[test]
    fn mode_tie_is_order_independent() {
        assert_eq!(mode(["M", "E"]), Some("E"));
        assert_eq!(mode(["E", "M"]), Some("E"));
        assert_eq!(mode([2001, 1999, 2001, 1999]), Some(1999));
    }

    #[test]
    fn mode_of_owned_strings() {
        let values = vec!["T".to_owned(), "E".to_owned(), "T".to_owned()];
        assert_eq!(mode(values), Some("T".to_owned()));
    }

    #[test]
    fn frequencies_counts_all() {
        let counts = frequencies(["a", "b", "a", "c", "a"]);
        assert_eq!(counts.into_iter().collect::<Vec<_>>(), [("a", 3), ("b", 1), ("c", 1)]);
    }
}
