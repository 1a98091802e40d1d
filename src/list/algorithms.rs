use crate::list::IndexedList;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};

impl<T: PartialEq> PartialEq for IndexedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T: Eq> Eq for IndexedList<T> {}

impl<T: PartialOrd> PartialOrd for IndexedList<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for IndexedList<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

/// A clone is a new list: cursors of the original are not valid for it.
impl<T: Clone> Clone for IndexedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: Hash> Hash for IndexedList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for elt in self {
            elt.hash(state);
        }
    }
}

impl<T: Debug> Debug for IndexedList<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders the elements in order, as `[a, b, c]`. An empty list renders as
/// `[]`.
impl<T: Display> Display for IndexedList<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        let mut iter = self.iter();
        if let Some(first) = iter.next() {
            Display::fmt(first, f)?;
            for elt in iter {
                f.write_str(", ")?;
                Display::fmt(elt, f)?;
            }
        }
        f.write_str("]")
    }
}

impl<T> IndexedList<T> {
    /// Returns `true` if the list contains an element equal to the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_list::IndexedList;
    ///
    /// let list: IndexedList<_> = (0..3).collect();
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }
}

impl<T, const N: usize> From<[T; N]> for IndexedList<T> {
    fn from(array: [T; N]) -> Self {
        array.into_iter().collect()
    }
}
