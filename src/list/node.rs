use std::ptr::NonNull;

/// A link to a neighbouring node, or `None` past either end of the list.
pub(crate) type Link<T> = Option<NonNull<Node<T>>>;

/// A single list node.
///
/// The list owns its nodes through the `next` chain starting at its head; `prev`
/// is a plain back-reference used for reverse traversal and *O*(1) unlinking,
/// and never owns anything.
pub(crate) struct Node<T> {
    pub(crate) next: Link<T>,
    pub(crate) prev: Link<T>,
    pub(crate) element: T,
}

impl<T> Node<T> {
    /// Allocate a node that is not linked to anything yet.
    pub(crate) fn new_detached(element: T) -> NonNull<Node<T>> {
        let node = Box::new(Node {
            next: None,
            prev: None,
            element,
        });
        NonNull::from(Box::leak(node))
    }

    /// Take back ownership of a node that has already been unlinked, and
    /// return its element.
    ///
    /// It is unsafe because `node` must come from [`Node::new_detached`], must
    /// no longer be reachable from any list, and must not be used afterwards.
    pub(crate) unsafe fn into_element(node: NonNull<Node<T>>) -> T {
        Box::from_raw(node.as_ptr()).element
    }
}

/// Link `prev -> next` in both directions. A `None` side is left alone.
///
/// It is unsafe because both nodes, when present, must be valid nodes of the
/// same list.
pub(crate) unsafe fn connect<T>(prev: Link<T>, next: Link<T>) {
    if let Some(mut prev_node) = prev {
        prev_node.as_mut().next = next;
    }
    if let Some(mut next_node) = next {
        next_node.as_mut().prev = prev;
    }
}

#[cfg(debug_assertions)]
pub(crate) fn assert_adjacent<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    unsafe {
        assert_eq!(prev.as_ref().next, Some(next));
        assert_eq!(next.as_ref().prev, Some(prev));
    }
}

#[cfg(test)]
mod tests {
    use super::{connect, Node};

    #[test]
    fn node_connect() {
        let a = Node::new_detached('a');
        let b = Node::new_detached('b');
        unsafe {
            connect(Some(a), Some(b));
            assert_eq!(a.as_ref().next, Some(b));
            assert_eq!(b.as_ref().prev, Some(a));
            assert_eq!(a.as_ref().prev, None);
            assert_eq!(b.as_ref().next, None);

            connect(Some(a), None);
            assert_eq!(a.as_ref().next, None);

            assert_eq!(Node::into_element(a), 'a');
            assert_eq!(Node::into_element(b), 'b');
        }
    }
}
