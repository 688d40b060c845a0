use core::mem::MaybeUninit;
use core::ptr::{self, NonNull};
use std::alloc::{self, Layout};

use log::debug;

use crate::error::ListError;

pub(crate) type Link<T> = NonNull<Node<T>>;

/// One cell of the chain.
///
/// Live nodes always hold an initialized element. The two sentinel nodes of a
/// list never do, and their element slot is neither read nor dropped.
pub(crate) struct Node<T> {
    next: Link<T>,
    prev: Link<T>,
    element: MaybeUninit<T>,
}

impl<T> Node<T> {
    fn detached(element: MaybeUninit<T>) -> Self {
        Node {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
            element,
        }
    }

    /// Allocates a detached node holding `element`.
    ///
    /// Aborts through the global allocation error handler if memory runs out.
    pub(crate) fn alloc(element: T) -> Link<T> {
        Box::leak(Box::new(Node::detached(MaybeUninit::new(element)))).into()
    }

    /// Allocates a detached node holding `element`, reporting allocation
    /// failure instead of aborting.
    pub(crate) fn try_alloc(element: T) -> Result<Link<T>, ListError> {
        // Two links make the layout non-zero-sized, as `alloc` requires.
        let layout = Layout::new::<Node<T>>();
        let raw = unsafe { alloc::alloc(layout) } as *mut Node<T>;
        match NonNull::new(raw) {
            Some(node) => {
                unsafe { node.as_ptr().write(Node::detached(MaybeUninit::new(element))) };
                Ok(node)
            }
            None => {
                debug!(
                    "allocation of a {}-byte list node failed",
                    layout.size()
                );
                Err(ListError::AllocFailed {
                    size: layout.size(),
                    align: layout.align(),
                })
            }
        }
    }

    /// Frees a detached live node and hands back its element.
    ///
    /// # Safety
    ///
    /// `node` must come from [`Node::alloc`] or [`Node::try_alloc`], must no
    /// longer be reachable from any chain, and must not be used afterwards.
    pub(crate) unsafe fn into_element(node: Link<T>) -> T {
        // `try_alloc` uses the same layout as `Box`, so both free the same way.
        let node = unsafe { Box::from_raw(node.as_ptr()) };
        unsafe { node.element.assume_init_read() }
    }

    /// # Safety
    ///
    /// `node` must be a live node and stay one for `'a`.
    #[inline]
    pub(crate) unsafe fn element<'a>(node: Link<T>) -> &'a T {
        unsafe { (*node.as_ptr()).element.assume_init_ref() }
    }

    /// # Safety
    ///
    /// `node` must be a live node, stay one for `'a`, and its element must
    /// not be aliased during `'a`.
    #[inline]
    pub(crate) unsafe fn element_mut<'a>(node: Link<T>) -> &'a mut T {
        unsafe { (*node.as_ptr()).element.assume_init_mut() }
    }

    #[inline]
    pub(crate) unsafe fn next(node: Link<T>) -> Link<T> {
        unsafe { (*node.as_ptr()).next }
    }

    #[inline]
    pub(crate) unsafe fn prev(node: Link<T>) -> Link<T> {
        unsafe { (*node.as_ptr()).prev }
    }

    /// Links a detached `node` in immediately before `pos`.
    ///
    /// # Safety
    ///
    /// `pos` must be a node of a well-formed chain other than its head
    /// sentinel, and `node` must be detached.
    #[inline]
    pub(crate) unsafe fn link_before(node: Link<T>, pos: Link<T>) {
        unsafe { Self::splice_before(node, node, pos) }
    }

    /// Splices the detached chain `first..=last` in immediately before `pos`.
    ///
    /// Only the four boundary links are written, so elements inside the chain
    /// are never touched.
    ///
    /// # Safety
    ///
    /// Same as [`Node::link_before`]; `last` must be reachable from `first`
    /// by following `next`.
    pub(crate) unsafe fn splice_before(first: Link<T>, last: Link<T>, pos: Link<T>) {
        // Raw writes only: callers may hold references into `element`.
        unsafe {
            let prev = (*pos.as_ptr()).prev;
            (*first.as_ptr()).prev = prev;
            (*last.as_ptr()).next = pos;
            (*prev.as_ptr()).next = first;
            (*pos.as_ptr()).prev = last;
        }
    }

    /// Unlinks `node` from its neighbours. Its own links are left stale.
    ///
    /// # Safety
    ///
    /// `node` must be a live node of a well-formed chain.
    #[inline]
    pub(crate) unsafe fn unlink(node: Link<T>) {
        unsafe {
            let prev = (*node.as_ptr()).prev;
            let next = (*node.as_ptr()).next;
            (*prev.as_ptr()).next = next;
            (*next.as_ptr()).prev = prev;
        }
    }
}

/// The `head`/`tail` boundary pair of one list.
///
/// A list owns exactly one pair for its whole life. The pair sits in its own
/// allocation so that moving the `List` value does not move the sentinels
/// out from under the nodes that link to them.
pub(crate) struct Sentinels<T> {
    head: Node<T>,
    tail: Node<T>,
}

impl<T> Sentinels<T> {
    /// Allocates a sentinel pair describing an empty chain.
    pub(crate) fn alloc() -> NonNull<Self> {
        let pair: NonNull<Self> = Box::leak(Box::new(Sentinels {
            head: Node::detached(MaybeUninit::uninit()),
            tail: Node::detached(MaybeUninit::uninit()),
        }))
        .into();
        unsafe { Self::relink(pair) };
        pair
    }

    /// # Safety
    ///
    /// `pair` must come from [`Sentinels::alloc`] and not be freed yet.
    #[inline]
    pub(crate) unsafe fn head(pair: NonNull<Self>) -> Link<T> {
        unsafe { NonNull::new_unchecked(ptr::addr_of_mut!((*pair.as_ptr()).head)) }
    }

    /// # Safety
    ///
    /// Same as [`Sentinels::head`].
    #[inline]
    pub(crate) unsafe fn tail(pair: NonNull<Self>) -> Link<T> {
        unsafe { NonNull::new_unchecked(ptr::addr_of_mut!((*pair.as_ptr()).tail)) }
    }

    /// Points the sentinels back at each other, forgetting whatever chain was
    /// between them. The forgotten nodes are not freed.
    ///
    /// # Safety
    ///
    /// Same as [`Sentinels::head`].
    pub(crate) unsafe fn relink(pair: NonNull<Self>) {
        unsafe {
            let head = Self::head(pair);
            let tail = Self::tail(pair);
            (*head.as_ptr()).next = tail;
            (*tail.as_ptr()).prev = head;
        }
    }

    /// # Safety
    ///
    /// Every live node must already be gone, and `pair` must not be used
    /// afterwards.
    pub(crate) unsafe fn free(pair: NonNull<Self>) {
        // Element slots are `MaybeUninit`, so nothing inside is dropped.
        drop(unsafe { Box::from_raw(pair.as_ptr()) });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward<T: Copy>(pair: NonNull<Sentinels<T>>) -> Vec<T> {
        let mut out = Vec::new();
        unsafe {
            let tail = Sentinels::tail(pair);
            let mut node = Node::next(Sentinels::head(pair));
            while node != tail {
                out.push(*Node::element(node));
                node = Node::next(node);
            }
        }
        out
    }

    fn backward<T: Copy>(pair: NonNull<Sentinels<T>>) -> Vec<T> {
        let mut out = Vec::new();
        unsafe {
            let head = Sentinels::head(pair);
            let mut node = Node::prev(Sentinels::tail(pair));
            while node != head {
                out.push(*Node::element(node));
                node = Node::prev(node);
            }
        }
        out
    }

    #[test]
    fn fresh_pair_points_at_itself() {
        let pair = Sentinels::<u8>::alloc();
        unsafe {
            let head = Sentinels::head(pair);
            let tail = Sentinels::tail(pair);
            assert_eq!(Node::next(head), tail);
            assert_eq!(Node::prev(tail), head);
            Sentinels::free(pair);
        }
    }

    #[test]
    fn link_and_unlink_keep_both_directions_in_sync() {
        let pair = Sentinels::alloc();
        unsafe {
            let tail = Sentinels::tail(pair);
            let a = Node::alloc(1);
            let c = Node::alloc(3);
            Node::link_before(a, tail);
            Node::link_before(c, tail);
            let b = Node::alloc(2);
            Node::link_before(b, c);
            assert_eq!(forward(pair), [1, 2, 3]);
            assert_eq!(backward(pair), [3, 2, 1]);

            Node::unlink(b);
            assert_eq!(Node::into_element(b), 2);
            assert_eq!(forward(pair), [1, 3]);
            assert_eq!(backward(pair), [3, 1]);

            Node::unlink(a);
            Node::unlink(c);
            assert_eq!(Node::into_element(a) + Node::into_element(c), 4);
            assert_eq!(Node::next(Sentinels::head(pair)), tail);
            Sentinels::free(pair);
        }
    }

    #[test]
    fn splice_moves_a_whole_chain() {
        let from = Sentinels::alloc();
        let to = Sentinels::alloc();
        unsafe {
            for value in 1..=3 {
                Node::link_before(Node::alloc(value), Sentinels::tail(from));
            }
            let only = Node::alloc(0);
            Node::link_before(only, Sentinels::tail(to));

            let first = Node::next(Sentinels::head(from));
            let last = Node::prev(Sentinels::tail(from));
            Sentinels::relink(from);
            Node::splice_before(first, last, only);

            assert!(forward(from).is_empty());
            assert_eq!(forward(to), [1, 2, 3, 0]);
            assert_eq!(backward(to), [0, 3, 2, 1]);

            let tail = Sentinels::tail(to);
            let mut node = Node::next(Sentinels::head(to));
            while node != tail {
                let next = Node::next(node);
                Node::unlink(node);
                Node::into_element(node);
                node = next;
            }
            Sentinels::free(from);
            Sentinels::free(to);
        }
    }

    #[test]
    fn try_alloc_hands_back_the_element() {
        let node = Node::try_alloc(String::from("boxed")).unwrap();
        assert_eq!(unsafe { Node::into_element(node) }, "boxed");
    }
}
