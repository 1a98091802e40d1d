//! A stable merge sort that only talks to a list through [`UnsortedList`].
//!
//! The sort never indexes into the list and never copies it into a slice. It
//! drains the list from the front into two fresh halves, sorts them
//! recursively, and merges them back by repeatedly moving the smaller front
//! element to the back of the (now empty) original list.

use std::cmp::Ordering;

use log::trace;

use crate::error::Result;
use crate::IndexedList;

/// The part of a list's contract that the merge sort relies on.
///
/// `Default` provides the fresh, empty lists that hold the two halves.
pub trait UnsortedList<T>: Default {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends an element at the back.
    fn add(&mut self, element: T);

    /// Removes and returns the front element, or fails with
    /// [`ListError::Empty`](crate::ListError::Empty).
    fn remove_first(&mut self) -> Result<T>;

    /// Returns the front element, or fails with
    /// [`ListError::Empty`](crate::ListError::Empty).
    fn first(&self) -> Result<&T>;
}

impl<T> UnsortedList<T> for IndexedList<T> {
    fn len(&self) -> usize {
        IndexedList::len(self)
    }

    fn is_empty(&self) -> bool {
        IndexedList::is_empty(self)
    }

    fn add(&mut self, element: T) {
        IndexedList::add(self, element)
    }

    fn remove_first(&mut self) -> Result<T> {
        IndexedList::remove_first(self)
    }

    fn first(&self) -> Result<&T> {
        IndexedList::first(self)
    }
}

/// Sorts `list` in the natural order of its elements.
///
/// This sort is stable (i.e., does not reorder equal elements).
///
/// # Complexity
///
/// This operation should compute in *O*(*n* * log(*n*)) time, moving every
/// element *O*(log(*n*)) times.
///
/// # Examples
///
/// ```
/// use indexed_list::{sort, IndexedList};
///
/// let mut list = IndexedList::from([5, 2, 4, 3, 1]);
/// sort::sort(&mut list);
/// assert_eq!(list.to_string(), "[1, 2, 3, 4, 5]");
/// ```
pub fn sort<T, L>(list: &mut L)
where
    T: Ord,
    L: UnsortedList<T>,
{
    merge_sort(list, &mut |a: &T, b: &T| a.cmp(b));
}

/// Sorts `list` with a comparator function.
///
/// This sort is stable (i.e., does not reorder equal elements).
///
/// The comparator function must define a total ordering for the elements in
/// the list. If the ordering is not total, the order of the elements is
/// unspecified, but every element is kept.
///
/// # Examples
///
/// ```
/// use indexed_list::{sort, IndexedList};
///
/// let mut floats = IndexedList::from([5f64, 4.0, 1.0, 3.0, 2.0]);
/// sort::sort_by(&mut floats, |a, b| a.total_cmp(b));
/// assert_eq!(floats.to_string(), "[1, 2, 3, 4, 5]");
/// ```
pub fn sort_by<T, L, F>(list: &mut L, mut compare: F)
where
    L: UnsortedList<T>,
    F: FnMut(&T, &T) -> Ordering,
{
    merge_sort(list, &mut compare);
}

/// Sorts `list` with a key extraction function.
///
/// This sort is stable (i.e., does not reorder equal elements). The key
/// function is called twice per comparison.
///
/// # Examples
///
/// ```
/// use indexed_list::{sort, IndexedList};
///
/// let mut list = IndexedList::from([-5i32, 4, 1, -3, 2]);
/// sort::sort_by_key(&mut list, |k| k.abs());
/// assert_eq!(list.to_string(), "[1, 2, -3, 4, -5]");
/// ```
pub fn sort_by_key<T, L, K, F>(list: &mut L, mut f: F)
where
    L: UnsortedList<T>,
    F: FnMut(&T) -> K,
    K: Ord,
{
    merge_sort(list, &mut |a: &T, b: &T| f(a).cmp(&f(b)));
}

fn merge_sort<T, L, F>(list: &mut L, compare: &mut F)
where
    L: UnsortedList<T>,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = list.len();
    if len <= 1 {
        return;
    }

    let mid = len / 2;
    trace!("merge sort: splitting {} elements into {} + {}", len, mid, len - mid);
    let mut left = L::default();
    let mut right = L::default();
    let mut moved = 0;
    while let Ok(element) = list.remove_first() {
        if moved < mid {
            left.add(element);
        } else {
            right.add(element);
        }
        moved += 1;
    }

    merge_sort(&mut left, compare);
    merge_sort(&mut right, compare);

    merge(list, &mut left, &mut right, compare);
}

/// Move the elements of the sorted `left` and `right` to the back of `list`.
/// Ties go to `left`, which keeps the sort stable.
fn merge<T, L, F>(list: &mut L, left: &mut L, right: &mut L, compare: &mut F)
where
    L: UnsortedList<T>,
    F: FnMut(&T, &T) -> Ordering,
{
    loop {
        let take_left = match (left.first(), right.first()) {
            (Ok(l), Ok(r)) => compare(l, r) != Ordering::Greater,
            _ => break,
        };
        let from = if take_left { &mut *left } else { &mut *right };
        if let Ok(element) = from.remove_first() {
            list.add(element);
        }
    }
    // at most one side still holds elements
    for rest in [left, right] {
        while let Ok(element) = rest.remove_first() {
            list.add(element);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{sort, sort_by, sort_by_key, UnsortedList};
    use crate::{IndexedList, ListError, Result};
    use std::collections::VecDeque;

    /// A list that records every call the sort makes, to show the sort only
    /// needs the `UnsortedList` contract.
    #[derive(Default)]
    struct Recorder {
        items: VecDeque<i32>,
        calls: usize,
    }

    impl UnsortedList<i32> for Recorder {
        fn len(&self) -> usize {
            self.items.len()
        }
        fn add(&mut self, element: i32) {
            self.calls += 1;
            self.items.push_back(element);
        }
        fn remove_first(&mut self) -> Result<i32> {
            self.calls += 1;
            self.items.pop_front().ok_or(ListError::Empty)
        }
        fn first(&self) -> Result<&i32> {
            self.items.front().ok_or(ListError::Empty)
        }
    }

    fn to_vec<T: Clone>(list: &IndexedList<T>) -> Vec<T> {
        list.assert_well_formed();
        list.iter().cloned().collect()
    }

    #[test]
    fn sort_trivial() {
        let mut empty = IndexedList::<i32>::new();
        sort(&mut empty);
        assert!(empty.is_empty());

        let mut one = IndexedList::from([1]);
        let cursor = one.cursor();
        sort(&mut one);
        assert_eq!(to_vec(&one), vec![1]);
        // nothing moved, so nothing was invalidated
        assert!(cursor.is_valid_for(&one));
    }

    #[test]
    fn sort_natural() {
        macro_rules! test_sort {
            ($input:expr) => {{
                let mut expected = Vec::from($input);
                let mut list = IndexedList::from($input);
                expected.sort();
                sort(&mut list);
                assert_eq!(to_vec(&list), expected);
            }};
        }
        test_sort!([3, 1, 2]);
        test_sort!([2, 1]);
        test_sort!([1, 2, 3, 4, 5]);
        test_sort!([5, 4, 3, 2, 1]);
        test_sort!([4, 4, 1, 4, 1]);
        test_sort!([9, -3, 0, 12, 7, -3, 5, 1, 8, 2, 2]);
        test_sort!(["pear", "apple", "fig", "banana"]);
    }

    #[test]
    fn sort_by_comparator() {
        let mut list = IndexedList::from([5, 4, 1, 3, 2]);
        sort_by(&mut list, |a, b| b.cmp(a));
        assert_eq!(to_vec(&list), vec![5, 4, 3, 2, 1]);

        list.sort_by(|a, b| a.cmp(b));
        assert_eq!(to_vec(&list), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn sort_is_stable() {
        let mut list = IndexedList::from([(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd'), (0, 'e'), (2, 'f')]);
        sort_by(&mut list, |a, b| a.0.cmp(&b.0));
        assert_eq!(
            to_vec(&list),
            vec![(0, 'e'), (1, 'b'), (1, 'd'), (2, 'a'), (2, 'c'), (2, 'f')]
        );

        let mut list = IndexedList::from(["bb", "a", "ccc", "dd", "e"]);
        sort_by_key(&mut list, |s| s.len());
        assert_eq!(to_vec(&list), vec!["a", "e", "bb", "dd", "ccc"]);
    }

    #[test]
    fn sort_only_uses_the_contract() {
        let mut list = Recorder::default();
        for x in [3, 8, 1, 9, 4, 4, 0] {
            list.add(x);
        }
        list.calls = 0;
        sort(&mut list);
        assert_eq!(Vec::from(list.items), vec![0, 1, 3, 4, 4, 8, 9]);
        assert!(list.calls > 0);
    }

    #[test]
    fn sort_comparator_calls() {
        let mut list: IndexedList<_> = (0..16).rev().collect();
        let mut calls = 0;
        sort_by(&mut list, |a, b| {
            calls += 1;
            a.cmp(b)
        });
        assert_eq!(to_vec(&list), (0..16).collect::<Vec<_>>());
        // a reversed input never has both halves interleave
        assert_eq!(calls, 32);
    }
}

// proptest doesn't run under miri with default config
#[cfg(all(not(miri), test))]
mod proptests {
    use super::{sort, sort_by};
    use crate::IndexedList;
    use proptest::collection::vec;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn sort_matches_slice_sort(input in vec(any::<i16>(), 0..200)) {
            let mut expected = input.clone();
            expected.sort();
            let mut list: IndexedList<_> = input.into_iter().collect();
            sort(&mut list);
            list.assert_well_formed();
            prop_assert_eq!(list.iter().copied().collect::<Vec<_>>(), expected);
        }

        #[test]
        fn sort_by_is_stable(input in vec((0..4u8, any::<u32>()), 0..200)) {
            // `slice::sort_by` is stable too, so both must agree exactly
            let mut expected = input.clone();
            expected.sort_by(|a, b| a.0.cmp(&b.0));
            let mut list: IndexedList<_> = input.into_iter().collect();
            sort_by(&mut list, |a, b| a.0.cmp(&b.0));
            prop_assert_eq!(list.len(), expected.len());
            prop_assert!(list.iter().zip(list.iter().skip(1)).all(|(a, b)| a.0 <= b.0));
            prop_assert_eq!(list.into_iter().collect::<Vec<_>>(), expected);
        }
    }
}
