//! This crate provides an unsorted, index-addressable, doubly-linked list with
//! owned nodes, together with a fail-fast bidirectional cursor and a stable
//! merge sort.
//!
//! The [`IndexedList`] allows inserting and removing elements at either end in
//! constant time. Accessing, inserting or removing at an index takes *O*(*n*)
//! time, but never more than *n* / 2 steps, since the walk starts from
//! whichever end is closer.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use indexed_list::{IndexedList, ListError};
//!
//! let mut list = IndexedList::new();
//! list.add_to_rear(1);
//! list.add_to_rear(3);
//! list.add_to_front(0);
//! list.insert(2, 2)?;
//! assert_eq!(list.to_string(), "[0, 1, 2, 3]");
//!
//! assert_eq!(list.remove(1), Ok(1));
//! assert_eq!(list.set(0, 5), Ok(0));
//! assert_eq!(list.to_string(), "[5, 2, 3]");
//!
//! list.sort();
//! assert_eq!(list.to_string(), "[2, 3, 5]");
//! assert_eq!(list.get(3), Err(ListError::OutOfRange { index: 3, len: 3 }));
//! # Ok::<(), ListError>(())
//! ```
//!
//! # Memory Layout
//!
//! ```text
//!                ╔═══════════╗           ╔═══════════╗           ╔═══════════╗
//!   None ←────── ║   prev    ║ ←──────── ║   prev    ║ ←──────── ║   prev    ║
//!                ╟───────────╢           ╟───────────╢           ╟───────────╢
//!                ║   next    ║ ────────→ ║   next    ║ ────────→ ║   next    ║ ──────→ None
//!                ╟───────────╢           ╟───────────╢           ╟───────────╢
//!                ║ element T ║           ║ element T ║           ║ element T ║
//!                ╚═══════════╝           ╚═══════════╝           ╚═══════════╝
//!                   Node 0 ↑                Node 1                  Node 2 ↑
//!                          │                                               │
//!  ╔═════════════════╗     │                                               │
//!  ║      head       ║ ────┘                                               │
//!  ╟─────────────────╢                                                     │
//!  ║      tail       ║ ────────────────────────────────────────────────────┘
//!  ╟─────────────────╢
//!  ║ len, version, id║
//!  ╚═════════════════╝
//!     IndexedList
//! ```
//!
//! Each node is allocated on the heap and owned by the list through the `next`
//! chain. The `prev` pointers are back references. In an empty list both `head`
//! and `tail` are `None`.
//!
//! The `version` counter changes on every structural change of the list, and
//! `id` tells lists apart. Both are what the cursors check before touching any
//! node.
//!
//! # Iteration
//!
//! [`Iter`] and [`IntoIter`] are double-ended, exact-size and fused iterators.
//! The list also implements [`FromIterator`] and [`Extend`].
//!
//! ```
//! use indexed_list::IndexedList;
//!
//! let list: IndexedList<_> = (1..=3).collect();
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next_back(), Some(&3));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), None);
//! ```
//!
//! # Cursors
//!
//! A [`Cursor`] sits in a gap between two elements. In a list with length *n*
//! there are *n* + 1 gaps, indexed by 0, 1, ..., *n*. It moves with
//! [`next`] and [`previous`], and mutates the list with:
//! - [`add`]: insert a new element in the gap;
//! - [`remove`]: remove the element returned by the last step;
//! - [`set`]: replace the element returned by the last step.
//!
//! A cursor does not borrow the list: every call takes the list explicitly.
//! The cursor is fail-fast. If the list is modified by anything other than the
//! cursor itself, the cursor refuses to work and returns
//! [`ListError::ConcurrentChange`].
//!
//! ```
//! use indexed_list::{IndexedList, ListError};
//!
//! let mut list = IndexedList::from([1, 2, 3, 4]);
//! let mut cursor = list.cursor();
//!
//! while cursor.has_next(&list)? {
//!     if cursor.next(&list)? % 2 == 0 {
//!         cursor.remove(&mut list)?;
//!     }
//! }
//! cursor.add(&mut list, 5)?;
//! assert_eq!(list.to_string(), "[1, 3, 5]");
//!
//! let stale = list.cursor();
//! list.remove_first()?;
//! assert_eq!(stale.has_next(&list), Err(ListError::ConcurrentChange));
//! # Ok::<(), ListError>(())
//! ```
//!
//! # Sorting
//!
//! The [`sort`](mod@sort) module holds a stable merge sort written against the
//! small [`UnsortedList`] trait. It only ever calls `len`, `is_empty`, `add`,
//! `remove_first` and `first`, so it works for any container implementing the
//! trait, not just [`IndexedList`].
//!
//! # Features
//!
//! - `set-invalidates` (enabled by default): replacing an element through
//!   [`IndexedList::set`] or [`Cursor::set`] counts as a modification, so
//!   other cursors of the list go stale. Without it, only structural changes
//!   invalidate cursors.
//!
//! [`next`]: crate::Cursor::next
//! [`previous`]: crate::Cursor::previous
//! [`add`]: crate::Cursor::add
//! [`remove`]: crate::Cursor::remove
//! [`set`]: crate::Cursor::set

#[doc(inline)]
pub use error::{ListError, Result};
#[doc(inline)]
pub use list::cursor::Cursor;
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter};
#[doc(inline)]
pub use list::IndexedList;
#[doc(inline)]
pub use sort::{sort, sort_by, sort_by_key, UnsortedList};

pub mod error;
pub mod list;
pub mod sort;
