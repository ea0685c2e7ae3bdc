//! Combinatorial enumeration
//!
//! Bounded power sets, used to enumerate candidate premise groupings, and
//! lazily generated index sequences.
//!
//! Power-set size grows exponentially with `min(|S|, max_size)`. The plain
//! [`power_set`] trusts its caller; [`checked_power_set`] computes the result
//! size first and refuses oversized requests before doing any work.

use std::collections::BTreeSet;
use std::iter::FusedIterator;

use crate::error::{Error, Result};

/// Returns every subset of `set` with at most `max_size` elements, or exactly
/// `max_size` elements when `exact` is set.
///
/// Built level by level: the subsets of size `k + 1` are the subsets of size
/// `k` extended by one element they do not contain yet. `max_size = 0` yields
/// only the empty set; an exact request larger than `set` yields nothing.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use pln_rules::combinatorics::power_set;
///
/// let set: BTreeSet<char> = ['a', 'b', 'c'].into_iter().collect();
/// assert_eq!(power_set(&set, 2, false).len(), 7);
/// assert_eq!(power_set(&set, 2, true).len(), 3);
/// ```
pub fn power_set<T: Ord + Clone>(
    set: &BTreeSet<T>,
    max_size: usize,
    exact: bool,
) -> BTreeSet<BTreeSet<T>> {
    let mut level: BTreeSet<BTreeSet<T>> = BTreeSet::new();
    level.insert(BTreeSet::new());
    let mut all = if exact { BTreeSet::new() } else { level.clone() };

    for _ in 0..max_size {
        let mut next = BTreeSet::new();
        for subset in &level {
            for element in set.iter().filter(|e| !subset.contains(*e)) {
                let mut extended = subset.clone();
                extended.insert(element.clone());
                next.insert(extended);
            }
        }
        if !exact {
            all.extend(next.iter().cloned());
        }
        level = next;
        if level.is_empty() {
            break;
        }
    }

    if exact {
        level
    } else {
        all
    }
}

/// Returns every subset of `set`.
pub fn power_set_full<T: Ord + Clone>(set: &BTreeSet<T>) -> BTreeSet<BTreeSet<T>> {
    power_set(set, set.len(), false)
}

/// The number of subsets [`power_set`] returns for a set of `n` elements.
///
/// Saturates at `usize::MAX`.
pub fn subset_count(n: usize, max_size: usize, exact: bool) -> usize {
    if exact {
        if max_size > n {
            return 0;
        }
        return binomial(n, max_size);
    }
    (0..=max_size.min(n)).fold(0usize, |acc, k| acc.saturating_add(binomial(n, k)))
}

fn binomial(n: usize, k: usize) -> usize {
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // acc * (n - i) is always divisible by (i + 1)
        acc = match acc.checked_mul((n - i) as u128) {
            Some(v) => v / (i + 1) as u128,
            None => return usize::MAX,
        };
    }
    usize::try_from(acc).unwrap_or(usize::MAX)
}

/// [`power_set`] with an up-front size check.
///
/// # Errors
///
/// `EnumerationBoundExceeded` if the result would hold more than `limit`
/// subsets. Nothing is enumerated in that case.
pub fn checked_power_set<T: Ord + Clone>(
    set: &BTreeSet<T>,
    max_size: usize,
    exact: bool,
    limit: usize,
) -> Result<BTreeSet<BTreeSet<T>>> {
    let requested = subset_count(set.len(), max_size, exact);
    if requested > limit {
        return Err(Error::EnumerationBoundExceeded { requested, limit });
    }
    Ok(power_set(set, max_size, exact))
}

/// A finite sequence whose values are produced on demand by applying a
/// generator to the indices `0..len`.
///
/// The sequence is restartable: every call to [`iter`](Self::iter) starts
/// over from index 0 and nothing is cached between calls.
#[derive(Clone)]
pub struct BoundedSequence<F> {
    len: usize,
    generator: F,
}

/// Builds a [`BoundedSequence`] of `n` values from `generator`.
///
/// # Examples
///
/// ```
/// use pln_rules::combinatorics::bounded_generate;
///
/// let names = bounded_generate(3, |i| format!("v{}", i));
/// assert_eq!(names.iter().collect::<Vec<_>>(), ["v0", "v1", "v2"]);
/// assert_eq!(names.get(1), Some("v1".to_string()));
/// ```
pub fn bounded_generate<T, F>(n: usize, generator: F) -> BoundedSequence<F>
where
    F: Fn(usize) -> T,
{
    BoundedSequence { len: n, generator }
}

impl<T, F> BoundedSequence<F>
where
    F: Fn(usize) -> T,
{
    /// Number of values in the sequence.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` for the empty sequence.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Generates the value at `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        (index < self.len).then(|| (self.generator)(index))
    }

    /// A fresh iterator over the sequence.
    pub fn iter(&self) -> Generated<'_, F> {
        Generated {
            sequence: self,
            front: 0,
            back: self.len,
        }
    }
}

impl<'a, T, F> IntoIterator for &'a BoundedSequence<F>
where
    F: Fn(usize) -> T,
{
    type Item = T;
    type IntoIter = Generated<'a, F>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`BoundedSequence`].
pub struct Generated<'a, F> {
    sequence: &'a BoundedSequence<F>,
    front: usize,
    back: usize,
}

impl<T, F> Iterator for Generated<'_, F>
where
    F: Fn(usize) -> T,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front >= self.back {
            return None;
        }
        let value = (self.sequence.generator)(self.front);
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T, F> DoubleEndedIterator for Generated<'_, F>
where
    F: Fn(usize) -> T,
{
    fn next_back(&mut self) -> Option<T> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some((self.sequence.generator)(self.back))
    }
}

impl<T, F> ExactSizeIterator for Generated<'_, F> where F: Fn(usize) -> T {}

impl<T, F> FusedIterator for Generated<'_, F> where F: Fn(usize) -> T {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn set_of(items: &[u32]) -> BTreeSet<u32> {
        items.iter().copied().collect()
    }

    #[test]
    fn test_scenario_abc_up_to_two() {
        let set: BTreeSet<char> = ['a', 'b', 'c'].into_iter().collect();
        let ps = power_set(&set, 2, false);

        let expected: BTreeSet<BTreeSet<char>> = [
            "", "a", "b", "c", "ab", "ac", "bc",
        ]
        .iter()
        .map(|s| s.chars().collect())
        .collect();
        assert_eq!(ps, expected);
    }

    #[test]
    fn test_zero_size_yields_empty_set_only() {
        let ps = power_set(&set_of(&[1, 2, 3]), 0, false);
        assert_eq!(ps.len(), 1);
        assert!(ps.contains(&BTreeSet::new()));

        let exact = power_set(&set_of(&[1, 2, 3]), 0, true);
        assert_eq!(exact.len(), 1);
    }

    #[test]
    fn test_counts_match_binomial_sums() {
        for n in 0..=6u32 {
            let set: BTreeSet<u32> = (0..n).collect();
            for k in 0..=n as usize {
                let ps = power_set(&set, k, false);
                assert_eq!(ps.len(), subset_count(n as usize, k, false), "n={} k={}", n, k);

                let exact = power_set(&set, k, true);
                assert_eq!(exact.len(), binomial(n as usize, k), "n={} k={}", n, k);
                assert!(exact.iter().all(|s| s.len() == k));
            }
        }
    }

    #[test]
    fn test_subsets_are_contained() {
        let set = set_of(&[2, 4, 8, 16]);
        for subset in power_set_full(&set) {
            assert!(subset.is_subset(&set));
        }
        assert_eq!(power_set_full(&set).len(), 16);
    }

    #[test]
    fn test_max_size_beyond_set() {
        let set = set_of(&[1, 2]);
        assert_eq!(power_set(&set, 10, false).len(), 4);
        assert!(power_set(&set, 3, true).is_empty());
        assert_eq!(subset_count(2, 3, true), 0);
        assert_eq!(subset_count(2, 10, false), 4);
    }

    #[test]
    fn test_empty_input() {
        let set: BTreeSet<u32> = BTreeSet::new();
        assert_eq!(power_set(&set, 3, false).len(), 1);
        assert!(power_set(&set, 1, true).is_empty());
    }

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(5, 0), 1);
        assert_eq!(binomial(5, 2), 10);
        assert_eq!(binomial(52, 5), 2_598_960);
        assert_eq!(subset_count(200, 200, false), usize::MAX);
    }

    #[test]
    fn test_checked_power_set_rejects_up_front() {
        let set: BTreeSet<u32> = (0..30).collect();
        let err = checked_power_set(&set, 30, false, 1_000).unwrap_err();
        assert!(matches!(
            err,
            Error::EnumerationBoundExceeded { limit: 1_000, .. }
        ));

        let ok = checked_power_set(&set, 1, false, 1_000).unwrap();
        assert_eq!(ok.len(), 31);
    }

    #[test]
    fn test_bounded_generate_is_lazy() {
        let calls = Cell::new(0);
        let seq = bounded_generate(1_000, |i| {
            calls.set(calls.get() + 1);
            i * 2
        });

        let first: Vec<_> = seq.iter().take(3).collect();
        assert_eq!(first, vec![0, 2, 4]);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_bounded_generate_restarts() {
        let seq = bounded_generate(4, |i| i + 10);
        assert_eq!(seq.iter().collect::<Vec<_>>(), vec![10, 11, 12, 13]);
        assert_eq!(seq.iter().rev().collect::<Vec<_>>(), vec![13, 12, 11, 10]);
        assert_eq!(seq.iter().len(), 4);
        assert_eq!(seq.get(4), None);
        assert!(bounded_generate(0, |i| i).is_empty());
    }
}
