use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use crate::error::{ListError, Result};
use crate::list::cursor::Cursor;
use crate::list::node::{Link, Node};
use crate::Iter;

pub mod cursor;
pub mod iterator;

mod algorithms;
pub(crate) mod node;

/// `IndexedList` is an unsorted, index-addressable, doubly-linked list.
///
/// Inserting or removing at a known [`Cursor`] position takes *O*(1) time.
/// Index-based operations (`get`, `set`, `insert`, `remove`) create a cursor at
/// the requested position, walking from whichever end of the list is closer,
/// so they take *O*(min(*i*, *n* - *i*)) time.
///
/// Every structural change (and, with the default `set-invalidates` feature,
/// every value replacement) bumps an internal version. A [`Cursor`] remembers
/// the version it last saw and refuses to operate with
/// [`ListError::ConcurrentChange`] once the list has moved on without it.
///
/// # Examples
///
/// ```
/// use indexed_list::{IndexedList, ListError};
///
/// let mut list = IndexedList::new();
/// list.add_to_rear(3);
/// list.add_to_rear(1);
/// list.add_to_rear(2);
/// assert_eq!(list.to_string(), "[3, 1, 2]");
/// assert_eq!(list.index_of(&2), Some(2));
///
/// list.sort();
/// assert_eq!(list.to_string(), "[1, 2, 3]");
/// assert_eq!(list.remove(0), Ok(1));
/// assert_eq!(list.to_string(), "[2, 3]");
///
/// assert_eq!(list.get(2), Err(ListError::OutOfRange { index: 2, len: 2 }));
/// ```
pub struct IndexedList<T> {
    pub(crate) head: Link<T>,
    pub(crate) tail: Link<T>,
    /// the number of live nodes
    pub(crate) len: usize,
    pub(crate) version: u64,
    pub(crate) id: ListId,
    _marker: PhantomData<Box<Node<T>>>,
}

/// Identity of one list value, so a cursor cannot be replayed against another
/// list whose version happens to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ListId(u64);

impl ListId {
    fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        ListId(NEXT.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

// private methods
impl<T> IndexedList<T> {
    /// Record a mutation. Every cursor that has not been re-synchronised with
    /// the new version becomes stale.
    pub(crate) fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    fn check_element_index(&self, index: usize) -> Result<()> {
        if index < self.len {
            Ok(())
        } else {
            Err(ListError::out_of_range(index, self.len))
        }
    }

    /// Walk the links in both directions and panic if any invariant is broken.
    #[cfg(test)]
    pub(crate) fn assert_well_formed(&self) {
        assert_eq!(self.head.is_none(), self.tail.is_none());
        assert_eq!(self.head.is_none(), self.len == 0);

        let mut forward = 0;
        let mut prev: Link<T> = None;
        let mut current = self.head;
        while let Some(node) = current {
            let node = unsafe { node.as_ref() };
            assert_eq!(node.prev, prev, "broken back link at index {}", forward);
            prev = current;
            current = node.next;
            forward += 1;
        }
        assert_eq!(prev, self.tail);
        assert_eq!(forward, self.len);

        let mut backward = 0;
        let mut current = self.tail;
        while let Some(node) = current {
            current = unsafe { node.as_ref().prev };
            backward += 1;
        }
        assert_eq!(backward, self.len);
    }
}

impl<T> IndexedList<T> {
    /// Create an empty `IndexedList`.
    ///
    /// # Examples
    /// ```
    /// use indexed_list::IndexedList;
    /// let list: IndexedList<u32> = IndexedList::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            version: 0,
            id: ListId::fresh(),
            _marker: PhantomData,
        }
    }

    /// Returns the number of elements in the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes all elements from the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn clear(&mut self) {
        while self.remove_first().is_ok() {}
    }

    /// Adds an element at the front of the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_list::IndexedList;
    ///
    /// let mut list = IndexedList::new();
    /// list.add_to_front(2);
    /// list.add_to_front(1);
    /// assert_eq!(list.first(), Ok(&1));
    /// assert_eq!(list.remove_first(), Ok(1));
    /// assert_eq!(list.first(), Ok(&2));
    /// ```
    pub fn add_to_front(&mut self, element: T) {
        let mut cursor = self.cursor();
        cursor.insert(self, element);
    }

    /// Adds an element at the back of the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn add_to_rear(&mut self, element: T) {
        let mut cursor = Cursor::new(self, self.len);
        cursor.insert(self, element);
    }

    /// Same as [`IndexedList::add_to_rear`].
    #[inline]
    pub fn add(&mut self, element: T) {
        self.add_to_rear(element);
    }

    /// Inserts an element so that it ends up at position `index`, shifting the
    /// elements after it towards the back.
    ///
    /// `index == len` appends.
    ///
    /// # Errors
    ///
    /// [`ListError::OutOfRange`] if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_list::{IndexedList, ListError};
    ///
    /// let mut list: IndexedList<_> = [1, 2, 3].into_iter().collect();
    /// assert_eq!(list.insert(2, 4), Ok(()));
    /// assert_eq!(list.insert(4, 5), Ok(()));
    /// assert_eq!(list.insert(9, 6), Err(ListError::OutOfRange { index: 9, len: 5 }));
    /// assert_eq!(list.to_string(), "[1, 2, 4, 3, 5]");
    /// ```
    pub fn insert(&mut self, index: usize, element: T) -> Result<()> {
        let mut cursor = self.cursor_from(index)?;
        cursor.insert(self, element);
        Ok(())
    }

    /// Inserts `element` right after the first element equal to `target`.
    ///
    /// # Errors
    ///
    /// [`ListError::NotFound`] if no element equals `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_list::{IndexedList, ListError};
    ///
    /// let mut list: IndexedList<_> = ['a', 'c', 'a'].into_iter().collect();
    /// assert_eq!(list.add_after('b', &'a'), Ok(()));
    /// assert_eq!(list.add_after('z', &'q'), Err(ListError::NotFound));
    /// assert_eq!(list.to_string(), "[a, b, c, a]");
    /// ```
    pub fn add_after(&mut self, element: T, target: &T) -> Result<()>
    where
        T: PartialEq,
    {
        let mut cursor = self.cursor();
        while cursor.has_next(self)? {
            if cursor.next(self)? == target {
                return cursor.add(self, element);
            }
        }
        Err(ListError::NotFound)
    }

    /// Removes the first element and returns it.
    ///
    /// # Errors
    ///
    /// [`ListError::Empty`] if the list is empty.
    pub fn remove_first(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(ListError::Empty);
        }
        let mut cursor = self.cursor();
        cursor.next(self)?;
        cursor.remove(self)
    }

    /// Removes the last element and returns it.
    ///
    /// # Errors
    ///
    /// [`ListError::Empty`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_list::{IndexedList, ListError};
    ///
    /// let mut list = IndexedList::new();
    /// assert_eq!(list.remove_last(), Err(ListError::Empty));
    /// list.add(1);
    /// list.add(3);
    /// assert_eq!(list.remove_last(), Ok(3));
    /// assert_eq!(list.remove_last(), Ok(1));
    /// ```
    pub fn remove_last(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(ListError::Empty);
        }
        self.remove(self.len - 1)
    }

    /// Removes the first element equal to `element` and returns it.
    ///
    /// # Errors
    ///
    /// [`ListError::NotFound`] if no element is equal to `element`.
    pub fn remove_element(&mut self, element: &T) -> Result<T>
    where
        T: PartialEq,
    {
        let mut cursor = self.cursor();
        while cursor.has_next(self)? {
            if cursor.next(self)? == element {
                return cursor.remove(self);
            }
        }
        Err(ListError::NotFound)
    }

    /// Removes the element at `index` and returns it.
    ///
    /// # Errors
    ///
    /// [`ListError::OutOfRange`] if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_list::IndexedList;
    ///
    /// let mut list: IndexedList<_> = [3, 2, 1].into_iter().collect();
    /// assert_eq!(list.remove(1), Ok(2));
    /// assert_eq!(list.remove(0), Ok(3));
    /// assert!(list.remove(1).is_err());
    /// assert_eq!(list.remove(0), Ok(1));
    /// ```
    pub fn remove(&mut self, index: usize) -> Result<T> {
        self.check_element_index(index)?;
        let mut cursor = self.cursor_from(index)?;
        cursor.next(self)?;
        cursor.remove(self)
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// [`ListError::OutOfRange`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.check_element_index(index)?;
        let mut cursor = self.cursor_from(index)?;
        cursor.next(self)
    }

    /// Replaces the element at `index` and returns the old one.
    ///
    /// # Errors
    ///
    /// [`ListError::OutOfRange`] if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_list::IndexedList;
    ///
    /// let mut list: IndexedList<_> = ["a", "b"].into_iter().collect();
    /// assert_eq!(list.set(1, "c"), Ok("b"));
    /// assert_eq!(list.get(1), Ok(&"c"));
    /// assert_eq!(list.len(), 2);
    /// ```
    pub fn set(&mut self, index: usize, element: T) -> Result<T> {
        self.check_element_index(index)?;
        let mut cursor = self.cursor_from(index)?;
        cursor.next(self)?;
        cursor.set(self, element)
    }

    /// Returns the position of the first element equal to `element`, or
    /// `None` if there is none.
    pub fn index_of(&self, element: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|e| e == element)
    }

    /// Returns a reference to the first element.
    ///
    /// # Errors
    ///
    /// [`ListError::Empty`] if the list is empty.
    pub fn first(&self) -> Result<&T> {
        // SAFETY: `head` is either `None` or a live node owned by `self`.
        self.head
            .map(|node| unsafe { &(*node.as_ptr()).element })
            .ok_or(ListError::Empty)
    }

    /// Returns a reference to the last element.
    ///
    /// # Errors
    ///
    /// [`ListError::Empty`] if the list is empty.
    pub fn last(&self) -> Result<&T> {
        // SAFETY: `tail` is either `None` or a live node owned by `self`.
        self.tail
            .map(|node| unsafe { &(*node.as_ptr()).element })
            .ok_or(ListError::Empty)
    }

    /// Provides a cursor before the first element.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_list::IndexedList;
    ///
    /// let mut list: IndexedList<_> = [1, 2, 3].into_iter().collect();
    /// let mut cursor = list.cursor();
    /// while cursor.has_next(&list)? {
    ///     if cursor.next(&list)? % 2 == 1 {
    ///         cursor.remove(&mut list)?;
    ///     }
    /// }
    /// assert_eq!(list.to_string(), "[2]");
    /// # Ok::<(), indexed_list::ListError>(())
    /// ```
    #[inline]
    pub fn cursor(&self) -> Cursor<T> {
        Cursor::new(self, 0)
    }

    /// Provides a cursor at gap `index`, i.e. right before the element at
    /// `index`. `index == len` places the cursor after the last element.
    ///
    /// # Errors
    ///
    /// [`ListError::OutOfRange`] if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_list::IndexedList;
    ///
    /// let list: IndexedList<_> = ['A', 'B', 'C'].into_iter().collect();
    /// let mut cursor = list.cursor_from(3)?;
    /// assert_eq!(cursor.previous(&list), Ok(&'C'));
    /// assert!(list.cursor_from(4).is_err());
    /// # Ok::<(), indexed_list::ListError>(())
    /// ```
    pub fn cursor_from(&self, index: usize) -> Result<Cursor<T>> {
        if index > self.len {
            return Err(ListError::out_of_range(index, self.len));
        }
        Ok(Cursor::new(self, index))
    }

    /// Provides a forward iterator.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Sorts the list in its natural order. The sort is stable.
    ///
    /// See [`sort`](crate::sort::sort).
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        crate::sort::sort(self)
    }

    /// Sorts the list with a comparator function. The sort is stable.
    ///
    /// See [`sort_by`](crate::sort::sort_by).
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_list::IndexedList;
    ///
    /// let mut list: IndexedList<_> = [5, 4, 1, 3, 2].into_iter().collect();
    /// list.sort_by(|a, b| b.cmp(a));
    /// assert_eq!(list.to_string(), "[5, 4, 3, 2, 1]");
    /// ```
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        crate::sort::sort_by(self, compare)
    }

    /// Sorts the list with a key extraction function. The sort is stable.
    ///
    /// See [`sort_by_key`](crate::sort::sort_by_key).
    pub fn sort_by_key<K, F>(&mut self, f: F)
    where
        F: FnMut(&T) -> K,
        K: Ord,
    {
        crate::sort::sort_by_key(self, f)
    }
}

impl<T> Default for IndexedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for IndexedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

unsafe impl<T: Send> Send for IndexedList<T> {}

unsafe impl<T: Sync> Sync for IndexedList<T> {}

#[cfg(test)]
mod tests {
    use crate::{IndexedList, ListError};
    use std::cell::RefCell;

    fn list_eq<T: PartialEq + std::fmt::Debug + Clone>(list: &IndexedList<T>, expected: &[T]) {
        list.assert_well_formed();
        assert_eq!(list.iter().cloned().collect::<Vec<_>>(), expected);
        assert_eq!(list.iter().rev().count(), expected.len());
    }

    #[test]
    fn list_create() {
        let mut list = IndexedList::<i32>::new();
        assert!(list.is_empty());
        list.add(1);
        assert!(!list.is_empty());
        assert_eq!(list.remove_last(), Ok(1));
        assert!(list.is_empty());
        list.assert_well_formed();
    }

    #[test]
    fn list_drop() {
        #[derive(Debug)]
        struct DropChecker<'a> {
            value: i32,
            dropped: &'a RefCell<Vec<i32>>,
        }
        impl Drop for DropChecker<'_> {
            fn drop(&mut self) {
                self.dropped.borrow_mut().push(self.value);
            }
        }
        let dropped = RefCell::new(Vec::new());
        let mut list = IndexedList::new();
        for value in 1..=3 {
            list.add(DropChecker {
                value,
                dropped: &dropped,
            });
        }
        drop(list);
        assert_eq!(dropped.borrow().as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn list_add_and_remove_ends() {
        let mut list = IndexedList::new();
        assert_eq!(list.first(), Err(ListError::Empty));
        assert_eq!(list.last(), Err(ListError::Empty));
        assert_eq!(list.remove_first(), Err(ListError::Empty));
        assert_eq!(list.remove_last(), Err(ListError::Empty));

        list.add_to_rear(1);
        assert_eq!(list.first(), Ok(&1));
        assert_eq!(list.last(), Ok(&1));
        assert_eq!(list.remove_first(), Ok(1));
        list_eq(&list, &[]);

        list.add_to_front(1);
        list.add_to_front(2);
        list.add_to_rear(3);
        list_eq(&list, &[2, 1, 3]);
        assert_eq!(list.first(), Ok(&2));
        assert_eq!(list.last(), Ok(&3));
        assert_eq!(list.remove_first(), Ok(2));
        assert_eq!(list.remove_last(), Ok(3));
        list_eq(&list, &[1]);
        assert_eq!(list.remove_last(), Ok(1));
        list_eq(&list, &[]);
    }

    #[test]
    fn list_front_round_trip() {
        let mut list: IndexedList<_> = (0..4).collect();
        list.add_to_front(9);
        assert_eq!(list.remove_first(), Ok(9));
        list_eq(&list, &[0, 1, 2, 3]);
    }

    #[test]
    fn list_insert_and_remove() {
        let mut list: IndexedList<_> = (0..10).collect();
        assert_eq!(list.insert(5, 10), Ok(()));
        list_eq(&list, &[0, 1, 2, 3, 4, 10, 5, 6, 7, 8, 9]);

        assert_eq!(list.remove(10), Ok(9));
        assert_eq!(list.last(), Ok(&8));

        assert_eq!(list.insert(0, 11), Ok(()));
        assert_eq!(list.first(), Ok(&11));
        assert_eq!(list.remove(0), Ok(11));

        assert_eq!(list.insert(10, 12), Ok(()));
        assert_eq!(list.last(), Ok(&12));
        list_eq(&list, &[0, 1, 2, 3, 4, 10, 5, 6, 7, 8, 12]);

        assert_eq!(
            list.insert(12, 0),
            Err(ListError::OutOfRange { index: 12, len: 11 })
        );
        assert_eq!(
            list.remove(11),
            Err(ListError::OutOfRange { index: 11, len: 11 })
        );
        assert_eq!(list.len(), 11);
    }

    #[test]
    fn list_insert_into_empty() {
        let mut list = IndexedList::new();
        assert_eq!(list.insert(0, 'x'), Ok(()));
        list_eq(&list, &['x']);
    }

    #[test]
    fn list_get_and_set() {
        let mut list: IndexedList<_> = (0..7).collect();
        for i in 0..7 {
            assert_eq!(list.get(i), Ok(&i));
            assert_eq!(list.set(i, i * 10), Ok(i));
            assert_eq!(list.get(i), Ok(&(i * 10)));
            assert_eq!(list.len(), 7);
        }
        assert_eq!(list.get(7), Err(ListError::OutOfRange { index: 7, len: 7 }));
        assert_eq!(list.set(7, 0), Err(ListError::OutOfRange { index: 7, len: 7 }));
        list_eq(&list, &[0, 10, 20, 30, 40, 50, 60]);

        let empty = IndexedList::<u8>::new();
        assert_eq!(empty.get(0), Err(ListError::OutOfRange { index: 0, len: 0 }));
    }

    #[test]
    fn list_value_operations() {
        let mut list: IndexedList<_> = ["a", "b", "c", "b"].into_iter().collect();
        assert_eq!(list.index_of(&"b"), Some(1));
        assert_eq!(list.index_of(&"z"), None);
        assert!(list.contains(&"c"));
        assert!(!list.contains(&"z"));

        assert_eq!(list.remove_element(&"b"), Ok("b"));
        list_eq(&list, &["a", "c", "b"]);
        assert_eq!(list.remove_element(&"z"), Err(ListError::NotFound));

        assert_eq!(list.add_after("d", &"b"), Ok(()));
        list_eq(&list, &["a", "c", "b", "d"]);
        assert_eq!(list.add_after("e", &"a"), Ok(()));
        list_eq(&list, &["a", "e", "c", "b", "d"]);
        assert_eq!(list.add_after("e", &"z"), Err(ListError::NotFound));

        let mut empty = IndexedList::new();
        assert_eq!(empty.add_after(1, &1), Err(ListError::NotFound));
        assert_eq!(empty.remove_element(&1), Err(ListError::NotFound));
    }

    #[test]
    fn list_concrete_scenario() {
        let mut list = IndexedList::new();
        list.add_to_rear(3);
        list.add_to_rear(1);
        list.add_to_rear(2);
        assert_eq!(list.to_string(), "[3, 1, 2]");
        assert_eq!(list.index_of(&2), Some(2));
        list.sort();
        assert_eq!(list.to_string(), "[1, 2, 3]");
        assert_eq!(list.index_of(&2), Some(1));
        assert_eq!(list.remove(0), Ok(1));
        assert_eq!(list.to_string(), "[2, 3]");
    }

    #[test]
    fn list_clear() {
        let mut list: IndexedList<_> = (0..5).collect();
        let cursor = list.cursor();
        list.clear();
        list_eq(&list, &[]);
        assert!(!cursor.is_valid_for(&list));
        list.add(1);
        list_eq(&list, &[1]);
    }

    #[test]
    fn list_mutation_invalidates_cursors() {
        let mut list: IndexedList<_> = (0..3).collect();
        let cursor = list.cursor();
        list.add(3);
        assert_eq!(cursor.has_next(&list), Err(ListError::ConcurrentChange));

        let cursor = list.cursor();
        assert_eq!(list.remove_first(), Ok(0));
        assert_eq!(cursor.has_previous(&list), Err(ListError::ConcurrentChange));

        // failed operations leave the version alone
        let cursor = list.cursor();
        assert!(list.remove(10).is_err());
        assert!(list.insert(10, 0).is_err());
        assert!(list.remove_element(&42).is_err());
        assert!(cursor.is_valid_for(&list));

        // reads leave the version alone
        let _ = list.get(1);
        let _ = list.index_of(&2);
        let _ = list.to_string();
        assert!(cursor.is_valid_for(&list));
    }

    #[cfg(feature = "set-invalidates")]
    #[test]
    fn list_set_invalidates_cursors() {
        let mut list: IndexedList<_> = (0..3).collect();
        let cursor = list.cursor();
        assert_eq!(list.set(0, 5), Ok(0));
        assert_eq!(cursor.next_index(&list), Err(ListError::ConcurrentChange));
    }

    #[cfg(not(feature = "set-invalidates"))]
    #[test]
    fn list_set_keeps_cursors() {
        let mut list: IndexedList<_> = (0..3).collect();
        let mut cursor = list.cursor();
        assert_eq!(list.set(0, 5), Ok(0));
        assert_eq!(cursor.next(&list), Ok(&5));
    }
}

// proptest doesn't run under miri with default config
#[cfg(all(not(miri), test))]
mod proptests {
    use proptest::prelude::*;
    use proptest::test_runner::Config;
    use proptest_state_machine::{ReferenceStateMachine, StateMachineTest};

    use crate::{IndexedList, ListError, Result};

    proptest_state_machine::prop_state_machine! {
        #![proptest_config(Config {
            failure_persistence: None,
            .. Config::default()
        })]

        #[test]
        fn indexed_list_state_machine_test(
            sequential
            1..200
            =>
            IndexedList<u32>
        );
    }

    #[derive(Clone, Debug)]
    pub enum Transition {
        AddToFront(u32),
        AddToRear(u32),
        Insert(usize, u32),
        AddAfter(u32, u32),
        RemoveFirst,
        RemoveLast,
        Remove(usize),
        RemoveElement(u32),
        Set(usize, u32),
        Get(usize),
    }

    pub struct IndexedListStateMachine;

    /// The model answers every transition the way the list is expected to,
    /// so `apply` on the list can compare results directly.
    fn model_apply(state: &mut Vec<u32>, transition: &Transition) -> Result<Option<u32>> {
        let len = state.len();
        match *transition {
            Transition::AddToFront(value) => {
                state.insert(0, value);
                Ok(None)
            }
            Transition::AddToRear(value) => {
                state.push(value);
                Ok(None)
            }
            Transition::Insert(index, value) if index <= len => {
                state.insert(index, value);
                Ok(None)
            }
            Transition::AddAfter(value, target) => {
                let at = state.iter().position(|e| *e == target);
                let at = at.ok_or(ListError::NotFound)?;
                state.insert(at + 1, value);
                Ok(None)
            }
            Transition::RemoveFirst if len > 0 => Ok(Some(state.remove(0))),
            Transition::RemoveLast => state.pop().map(Some).ok_or(ListError::Empty),
            Transition::RemoveFirst => Err(ListError::Empty),
            Transition::Remove(index) if index < len => Ok(Some(state.remove(index))),
            Transition::RemoveElement(value) => {
                let at = state.iter().position(|e| *e == value);
                let at = at.ok_or(ListError::NotFound)?;
                Ok(Some(state.remove(at)))
            }
            Transition::Set(index, value) if index < len => {
                Ok(Some(std::mem::replace(&mut state[index], value)))
            }
            Transition::Get(index) if index < len => Ok(Some(state[index])),
            Transition::Insert(index, _)
            | Transition::Remove(index)
            | Transition::Set(index, _)
            | Transition::Get(index) => Err(ListError::OutOfRange { index, len }),
        }
    }

    fn list_apply(list: &mut IndexedList<u32>, transition: &Transition) -> Result<Option<u32>> {
        match *transition {
            Transition::AddToFront(value) => list.add_to_front(value),
            Transition::AddToRear(value) => list.add_to_rear(value),
            Transition::Insert(index, value) => list.insert(index, value)?,
            Transition::AddAfter(value, target) => list.add_after(value, &target)?,
            Transition::RemoveFirst => return list.remove_first().map(Some),
            Transition::RemoveLast => return list.remove_last().map(Some),
            Transition::Remove(index) => return list.remove(index).map(Some),
            Transition::RemoveElement(value) => return list.remove_element(&value).map(Some),
            Transition::Set(index, value) => return list.set(index, value).map(Some),
            Transition::Get(index) => return list.get(index).map(|e| Some(*e)),
        }
        Ok(None)
    }

    impl ReferenceStateMachine for IndexedListStateMachine {
        type State = Vec<u32>;
        type Transition = Transition;

        fn init_state() -> BoxedStrategy<Self::State> {
            Just(Vec::new()).boxed()
        }

        fn transitions(state: &Self::State) -> BoxedStrategy<Self::Transition> {
            // indices may run one or two past the end to exercise range errors
            let index = 0..state.len() + 2;
            // small values so value-based lookups hit existing elements
            let value = 0..8u32;
            prop_oneof![
                2 => value.clone().prop_map(Transition::AddToFront),
                2 => value.clone().prop_map(Transition::AddToRear),
                2 => (index.clone(), value.clone()).prop_map(|(i, v)| Transition::Insert(i, v)),
                1 => (value.clone(), value.clone()).prop_map(|(v, t)| Transition::AddAfter(v, t)),
                1 => Just(Transition::RemoveFirst),
                1 => Just(Transition::RemoveLast),
                1 => index.clone().prop_map(Transition::Remove),
                1 => value.clone().prop_map(Transition::RemoveElement),
                1 => (index.clone(), value.clone()).prop_map(|(i, v)| Transition::Set(i, v)),
                1 => index.prop_map(Transition::Get),
            ]
            .boxed()
        }

        fn apply(mut state: Self::State, transition: &Self::Transition) -> Self::State {
            let _ = model_apply(&mut state, transition);
            state
        }
    }

    impl StateMachineTest for IndexedList<u32> {
        type SystemUnderTest = Self;
        type Reference = IndexedListStateMachine;

        fn init_test(
            _ref_state: &<Self::Reference as ReferenceStateMachine>::State,
        ) -> Self::SystemUnderTest {
            IndexedList::new()
        }

        fn apply(
            mut state: Self::SystemUnderTest,
            _ref_state: &<Self::Reference as ReferenceStateMachine>::State,
            transition: Transition,
        ) -> Self::SystemUnderTest {
            // replay the transition on a model of the state the list had before
            let mut model: Vec<u32> = state.iter().copied().collect();
            let expected = model_apply(&mut model, &transition);
            assert_eq!(list_apply(&mut state, &transition), expected);
            state
        }

        fn check_invariants(
            state: &Self::SystemUnderTest,
            ref_state: &<Self::Reference as ReferenceStateMachine>::State,
        ) {
            state.assert_well_formed();
            assert_eq!(state.len(), ref_state.len());
            assert!(state.iter().eq(ref_state.iter()));
            assert!(state.iter().rev().eq(ref_state.iter().rev()));
        }
    }
}
