use std::fmt;
use std::mem;
use std::ptr::NonNull;

use log::debug;

use crate::error::{ListError, Result};
use crate::list::node::{connect, Link, Node};
use crate::list::{IndexedList, ListId};

/// A bidirectional cursor over an [`IndexedList`] that can also insert,
/// replace and remove elements.
///
/// A cursor sits in a *gap*: in a list with length *n* there are *n* + 1 gaps,
/// indexed by 0, 1, ..., *n*, where gap *i* is right before the element at
/// index *i*.
///
/// A `Cursor` does not borrow its list. Every method takes the list it operates
/// on explicitly, so several cursors over one list can be alive at once, and
/// the list can still be mutated directly between cursor calls. To keep this
/// sound, a cursor remembers which list it belongs to and the list version it
/// last saw. Once the list is modified by any other path (directly, or by
/// another cursor), every method except [`Cursor::is_valid_for`] fails with
/// [`ListError::ConcurrentChange`]. Mutations made through the cursor itself
/// keep it in sync.
///
/// `remove` and `set` act on the element returned by the most recent `next`
/// or `previous`, and are only allowed once per step.
///
/// # Examples
///
/// Here is a simple example. (The gap is denoted by `|`.)
/// ```
/// use indexed_list::{IndexedList, ListError};
///
/// // [A B C]
/// let mut list: IndexedList<_> = ['A', 'B', 'C'].into_iter().collect();
///
/// // [A|B C]
/// let mut cursor = list.cursor_from(1)?;
///
/// // [A B|C]
/// assert_eq!(cursor.next(&list), Ok(&'B'));
///
/// // [A|C]
/// assert_eq!(cursor.remove(&mut list), Ok('B'));
/// assert_eq!(cursor.remove(&mut list), Err(ListError::NoPriorStep));
///
/// // [|A C]
/// assert_eq!(cursor.previous(&list), Ok(&'A'));
///
/// // another path modifies the list: the cursor is now stale
/// list.add('D');
/// assert_eq!(cursor.has_next(&list), Err(ListError::ConcurrentChange));
/// # Ok::<(), ListError>(())
/// ```
pub struct Cursor<T> {
    /// the gap, in `0..=len`
    index: usize,
    /// the node right after the gap, `None` if the gap is at the end
    next: Link<T>,
    last: Option<Step<T>>,
    version: u64,
    list: ListId,
}

/// The node produced by the last step, and the direction of that step.
enum Step<T> {
    Forward(NonNull<Node<T>>),
    Backward(NonNull<Node<T>>),
}

impl<T> Step<T> {
    fn node(&self) -> NonNull<Node<T>> {
        match *self {
            Step::Forward(node) | Step::Backward(node) => node,
        }
    }
}

impl<T> Clone for Step<T> {
    fn clone(&self) -> Self {
        match *self {
            Step::Forward(node) => Step::Forward(node),
            Step::Backward(node) => Step::Backward(node),
        }
    }
}

/// The node before the gap whose successor is `next`.
///
/// It is unsafe because `next`, when present, must be a live node of `list`.
unsafe fn node_before<T>(list: &IndexedList<T>, next: Link<T>) -> Link<T> {
    match next {
        None => list.tail,
        Some(node) => node.as_ref().prev,
    }
}

// Private methods
impl<T> Cursor<T> {
    /// Create a cursor at gap `index`, walking from whichever end of the list
    /// is closer.
    ///
    /// `index` must be in `0..=list.len()`.
    pub(crate) fn new(list: &IndexedList<T>, index: usize) -> Self {
        debug_assert!(index <= list.len, "cursor index out of bounds");
        // SAFETY: the walks stay within the `list.len` nodes of `list`.
        let next = unsafe {
            if index > list.len / 2 {
                // target is in the back half: [    i<--#]
                let mut next = None;
                for _ in index..list.len {
                    next = node_before(list, next);
                }
                next
            } else {
                // target is in the front half: [-->i    #]
                let mut next = list.head;
                for _ in 0..index {
                    next = next.and_then(|node| node.as_ref().next);
                }
                next
            }
        };
        Self {
            index,
            next,
            last: None,
            version: list.version,
            list: list.id,
        }
    }

    fn check(&self, list: &IndexedList<T>) -> Result<()> {
        if self.is_valid_for(list) {
            return Ok(());
        }
        debug!(
            "refusing stale cursor: captured version {} of list {:?}, list is {:?} at version {}",
            self.version, self.list, list.id, list.version
        );
        Err(ListError::ConcurrentChange)
    }

    /// Record a mutation made through this cursor and stay in sync with it.
    fn sync(&mut self, list: &mut IndexedList<T>) {
        list.touch();
        self.version = list.version;
    }

    /// Link a new node into the gap, without checking the version.
    ///
    /// The cursor ends up after the new element, and cannot `remove` or `set`
    /// until its next step.
    pub(crate) fn insert(&mut self, list: &mut IndexedList<T>, element: T) {
        let node = Node::new_detached(element);
        // SAFETY: the cursor is in sync with `list`, so `self.next`, `list.head`
        // and `list.tail` are live nodes of `list` (or `None`), and `node` is a
        // new node not linked to anything.
        unsafe {
            match self.next {
                // the list is empty
                None if list.head.is_none() => {
                    list.head = Some(node);
                    list.tail = Some(node);
                }
                // the gap is after the tail
                None => {
                    connect(list.tail, Some(node));
                    list.tail = Some(node);
                }
                // the gap is before the head
                Some(next) if list.head == Some(next) => {
                    connect(Some(node), Some(next));
                    list.head = Some(node);
                }
                Some(next) => {
                    connect(next.as_ref().prev, Some(node));
                    connect(Some(node), Some(next));
                }
            }
        }
        #[cfg(debug_assertions)]
        if let Some(next) = self.next {
            crate::list::node::assert_adjacent(node, next);
        }
        self.index += 1;
        self.last = None;
        list.len += 1;
        self.sync(list);
    }
}

impl<T> Cursor<T> {
    /// Returns `true` if the cursor was created for `list` and nothing but
    /// this cursor has modified `list` since.
    ///
    /// This is the only method that still works on a stale cursor.
    #[inline]
    pub fn is_valid_for(&self, list: &IndexedList<T>) -> bool {
        self.list == list.id && self.version == list.version
    }

    /// Returns `true` if there is an element after the gap.
    ///
    /// # Errors
    ///
    /// [`ListError::ConcurrentChange`] if the cursor is stale.
    pub fn has_next(&self, list: &IndexedList<T>) -> Result<bool> {
        self.check(list)?;
        Ok(self.next.is_some())
    }

    /// Returns `true` if there is an element before the gap.
    ///
    /// # Errors
    ///
    /// [`ListError::ConcurrentChange`] if the cursor is stale.
    pub fn has_previous(&self, list: &IndexedList<T>) -> Result<bool> {
        self.check(list)?;
        Ok(self.next != list.head)
    }

    /// Returns the index of the element after the gap (`len` at the end).
    ///
    /// # Errors
    ///
    /// [`ListError::ConcurrentChange`] if the cursor is stale.
    pub fn next_index(&self, list: &IndexedList<T>) -> Result<usize> {
        self.check(list)?;
        Ok(self.index)
    }

    /// Returns the index of the element before the gap, or `None` at the
    /// front.
    ///
    /// # Errors
    ///
    /// [`ListError::ConcurrentChange`] if the cursor is stale.
    pub fn previous_index(&self, list: &IndexedList<T>) -> Result<Option<usize>> {
        self.check(list)?;
        Ok(self.index.checked_sub(1))
    }

    /// Moves the gap forward over one element and returns it.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Errors
    ///
    /// - [`ListError::ConcurrentChange`] if the cursor is stale;
    /// - [`ListError::EndOfSequence`] if the gap is after the last element.
    pub fn next<'a>(&mut self, list: &'a IndexedList<T>) -> Result<&'a T> {
        self.check(list)?;
        let node = self.next.ok_or(ListError::EndOfSequence)?;
        // SAFETY: the cursor is in sync with `list`, so `node` is a live node
        // of it, and `list` stays borrowed for `'a`.
        let current: &'a Node<T> = unsafe { &*node.as_ptr() };
        self.next = current.next;
        self.index += 1;
        self.last = Some(Step::Forward(node));
        Ok(&current.element)
    }

    /// Moves the gap backward over one element and returns it.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Errors
    ///
    /// - [`ListError::ConcurrentChange`] if the cursor is stale;
    /// - [`ListError::StartOfSequence`] if the gap is before the first element.
    pub fn previous<'a>(&mut self, list: &'a IndexedList<T>) -> Result<&'a T> {
        if !self.has_previous(list)? {
            return Err(ListError::StartOfSequence);
        }
        // SAFETY: the cursor is in sync with `list`; past the tail the
        // previous node is the tail itself, otherwise it is `next.prev`.
        let node = unsafe { node_before(list, self.next) }.ok_or(ListError::StartOfSequence)?;
        self.next = Some(node);
        self.index -= 1;
        self.last = Some(Step::Backward(node));
        // SAFETY: `node` is a live node of `list`, which stays borrowed for `'a`.
        Ok(unsafe { &(*node.as_ptr()).element })
    }

    /// Removes the element returned by the last `next` or `previous`, and
    /// returns it.
    ///
    /// After a forward step the gap moves back by one; after a backward step
    /// the gap keeps its index. Other cursors over the list become stale.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Errors
    ///
    /// - [`ListError::ConcurrentChange`] if the cursor is stale;
    /// - [`ListError::NoPriorStep`] if there was no step since the cursor was
    ///   created or since the last `remove` or `add`.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_list::{IndexedList, ListError};
    ///
    /// let mut list: IndexedList<_> = (1..=4).collect();
    /// let mut cursor = list.cursor_from(4)?;
    /// assert_eq!(cursor.remove(&mut list), Err(ListError::NoPriorStep));
    ///
    /// assert_eq!(cursor.previous(&list), Ok(&4));
    /// assert_eq!(cursor.previous(&list), Ok(&3));
    /// assert_eq!(cursor.remove(&mut list), Ok(3));
    /// assert_eq!(cursor.next(&list), Ok(&4));
    /// assert_eq!(list.to_string(), "[1, 2, 4]");
    /// # Ok::<(), ListError>(())
    /// ```
    pub fn remove(&mut self, list: &mut IndexedList<T>) -> Result<T> {
        self.check(list)?;
        let step = self.last.take().ok_or(ListError::NoPriorStep)?;
        let node = step.node();
        // SAFETY: the cursor is in sync with `list`, so `node` and its
        // neighbours are live nodes of it.
        let next = unsafe {
            let Node { prev, next, .. } = *node.as_ref();
            match (prev, next) {
                // the only element
                (None, None) => {
                    list.head = None;
                    list.tail = None;
                }
                // the head
                (None, Some(_)) => {
                    connect(None, next);
                    list.head = next;
                }
                // the tail
                (Some(_), None) => {
                    connect(prev, None);
                    list.tail = prev;
                }
                (Some(_), Some(_)) => connect(prev, next),
            }
            next
        };
        match step {
            Step::Forward(_) => self.index -= 1,
            Step::Backward(_) => self.next = next,
        }
        list.len -= 1;
        self.sync(list);
        // SAFETY: `node` has been unlinked above and nothing refers to it.
        Ok(unsafe { Node::into_element(node) })
    }

    /// Replaces the element returned by the last `next` or `previous`, and
    /// returns the old one. The links of the list are left untouched.
    ///
    /// With the `set-invalidates` feature (enabled by default), this counts as
    /// a modification: other cursors over the list become stale.
    ///
    /// # Errors
    ///
    /// - [`ListError::ConcurrentChange`] if the cursor is stale;
    /// - [`ListError::NoPriorStep`] if there was no step since the cursor was
    ///   created or since the last `remove` or `add`.
    pub fn set(&mut self, list: &mut IndexedList<T>, element: T) -> Result<T> {
        self.check(list)?;
        let mut node = self
            .last
            .as_ref()
            .map(Step::node)
            .ok_or(ListError::NoPriorStep)?;
        // SAFETY: the cursor is in sync with `list`, so `node` is a live node
        // of it, and `list` is borrowed mutably so no other reference into it
        // is alive.
        let old = mem::replace(unsafe { &mut node.as_mut().element }, element);
        #[cfg(feature = "set-invalidates")]
        self.sync(list);
        Ok(old)
    }

    /// Inserts an element into the gap. The gap ends up after the new element.
    ///
    /// A `remove` or `set` right after `add` fails with
    /// [`ListError::NoPriorStep`]. Other cursors over the list become stale.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Errors
    ///
    /// [`ListError::ConcurrentChange`] if the cursor is stale.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_list::IndexedList;
    ///
    /// let mut list: IndexedList<_> = [1, 4].into_iter().collect();
    /// let mut cursor = list.cursor_from(1)?;
    /// cursor.add(&mut list, 2)?;
    /// cursor.add(&mut list, 3)?;
    /// assert_eq!(cursor.next_index(&list), Ok(3));
    /// assert_eq!(list.to_string(), "[1, 2, 3, 4]");
    /// # Ok::<(), indexed_list::ListError>(())
    /// ```
    pub fn add(&mut self, list: &mut IndexedList<T>, element: T) -> Result<()> {
        self.check(list)?;
        self.insert(list, element);
        Ok(())
    }
}

impl<T> Clone for Cursor<T> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            next: self.next,
            last: self.last.clone(),
            version: self.version,
            list: self.list,
        }
    }
}

impl<T> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("version", &self.version)
            .field("can_modify", &self.last.is_some())
            .finish()
    }
}

unsafe impl<T: Send> Send for Cursor<T> {}

unsafe impl<T: Sync> Sync for Cursor<T> {}
