use crate::list::node::{Link, Node};
use crate::list::IndexedList;
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// An iterator over the elements of an `IndexedList`.
///
/// `front` and `back` are the next nodes to yield from either end, and `len`
/// counts the elements between them, so the two ends never cross.
///
/// Though the `Iter` does not hold a reference to the list, it actually
/// *borrows* (immutably) from the list, so a phantom marker of
/// `&'a IndexedList<T>` is added to protect the list from being written.
///
/// # Examples
///
/// ```compile_fail
/// use indexed_list::IndexedList;
///
/// let mut list: IndexedList<_> = [1, 2, 3].into_iter().collect();
/// let mut iter = list.iter();
///
/// // Won't compile, because list is already borrowed immutably.
/// list.add(4);
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    front: Link<T>,
    back: Link<T>,
    len: usize,
    _marker: PhantomData<&'a IndexedList<T>>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a IndexedList<T>) -> Self {
        Self {
            front: list.head,
            back: list.tail,
            len: list.len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            back: self.back,
            len: self.len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: `len > 0`, so `front` is a live node of the borrowed list.
        let current: &'a Node<T> = unsafe { &*self.front?.as_ptr() };
        self.front = current.next;
        self.len -= 1;
        Some(&current.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: `len > 0`, so `back` is a live node of the borrowed list.
        let current: &'a Node<T> = unsafe { &*self.back?.as_ptr() };
        self.back = current.prev;
        self.len -= 1;
        Some(&current.element)
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// An owning iterator over the elements of an `IndexedList`.
pub struct IntoIter<T> {
    list: IndexedList<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("list", &self.list).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.remove_first().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.list.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.remove_last().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for IndexedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a IndexedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for IndexedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = IndexedList::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for IndexedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| self.add_to_rear(item));
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for IndexedList<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::IndexedList;

    #[test]
    fn test_iter() {
        fn test_case(input: std::ops::Range<i32>, mid: usize) {
            let vec: Vec<_> = input.collect();
            let list: IndexedList<_> = vec.iter().copied().collect();
            let len = vec.len();

            let mut iter = list.iter();
            for (i, item) in vec.iter().enumerate() {
                assert_eq!(iter.next(), Some(item));
                assert_eq!(iter.len(), len - i - 1);
            }
            assert_eq!(iter.next(), None);
            assert_eq!(iter.next_back(), None);

            // meet in the middle from both ends
            let mut iter = list.iter();
            for item in vec.iter().take(mid) {
                assert_eq!(iter.next(), Some(item));
            }
            for (i, item) in vec.iter().skip(mid).rev().enumerate() {
                assert_eq!(iter.next_back(), Some(item));
                assert_eq!(iter.len(), len - mid - i - 1);
            }
            assert_eq!(iter.next(), None);
            assert_eq!(iter.next_back(), None);
        }
        test_case(0..10, 10);
        test_case(0..10, 5);
        test_case(0..10, 0);
        test_case(0..2, 1);
        test_case(0..1, 1);
        test_case(0..1, 0);
        test_case(0..0, 0);
    }

    #[test]
    fn test_into_iter() {
        let list: IndexedList<_> = (0..6).collect();
        let mut iter = list.into_iter();
        assert_eq!(iter.len(), 6);
        assert_eq!(iter.next(), Some(0));
        assert_eq!(iter.next_back(), Some(5));
        assert_eq!(iter.collect::<Vec<_>>(), vec![1, 2, 3, 4]);

        let list: IndexedList<String> = ["x", "y"].iter().map(|s| s.to_string()).collect();
        assert_eq!(list.into_iter().rev().collect::<Vec<_>>(), vec!["y", "x"]);
    }

    #[test]
    fn test_extend() {
        let mut list: IndexedList<_> = (0..2).collect();
        list.extend(&[2, 3]);
        list.extend(4..6);
        assert_eq!((&list).into_iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5]);
        list.assert_well_formed();
    }
}
