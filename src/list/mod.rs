//! A doubly-linked list with owned nodes and a fixed pair of sentinels.
//!
//! Every live node sits between two real neighbours: other live nodes, or
//! the `head`/`tail` sentinels that bound the chain. Insertion and removal
//! therefore relink the same way at the front, the back and in the middle.

pub mod cursor;
pub mod iter;
mod node;

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FromIterator;
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;

use log::trace;

use self::cursor::{Access, ConstCursor, Cursor, CursorMut};
use self::iter::{IntoIter, Iter, IterMut};
use self::node::{Link, Node, Sentinels};
use crate::error::{ListError, Result};

/// A doubly-linked list with owned nodes.
///
/// The `List` allows inserting and removing elements anywhere in constant
/// time given a [`Cursor`], and pushing and popping at either end in
/// constant time.
pub struct List<T> {
    sentinels: NonNull<Sentinels<T>>,
    len: usize,
    marker: PhantomData<Box<Node<T>>>,
}

// A detached run of nodes: first, last, count.
type Chain<T> = (Link<T>, Link<T>, usize);

// private methods
impl<T> List<T> {
    #[inline]
    fn head(&self) -> Link<T> {
        unsafe { Sentinels::head(self.sentinels) }
    }

    #[inline]
    fn tail(&self) -> Link<T> {
        unsafe { Sentinels::tail(self.sentinels) }
    }

    /// First live node, or `tail` when empty.
    #[inline]
    fn first(&self) -> Link<T> {
        unsafe { Node::next(self.head()) }
    }

    /// Last live node, or `head` when empty.
    #[inline]
    fn last(&self) -> Link<T> {
        unsafe { Node::prev(self.tail()) }
    }

    #[inline]
    fn is_sentinel(&self, node: Link<T>) -> bool {
        node == self.head() || node == self.tail()
    }

    /// Links a detached node in before `pos` and counts it.
    #[inline]
    unsafe fn link_node_before(&mut self, node: Link<T>, pos: Link<T>) -> CursorMut<T> {
        unsafe { Node::link_before(node, pos) };
        self.len += 1;
        Cursor::new(node)
    }

    /// Unlinks a live node without freeing it and returns its successor.
    #[inline]
    unsafe fn unlink_node(&mut self, node: Link<T>) -> Link<T> {
        let next = unsafe { Node::next(node) };
        unsafe { Node::unlink(node) };
        self.len -= 1;
        next
    }

    #[inline]
    fn pop_front_node(&mut self) -> Option<Link<T>> {
        if self.len == 0 {
            return None;
        }
        let node = self.first();
        unsafe { self.unlink_node(node) };
        Some(node)
    }

    #[inline]
    fn pop_back_node(&mut self) -> Option<Link<T>> {
        if self.len == 0 {
            return None;
        }
        let node = self.last();
        unsafe { self.unlink_node(node) };
        Some(node)
    }

    /// Detaches every live node as one chain, leaving the list empty.
    fn detach_all_nodes(&mut self) -> Option<Chain<T>> {
        if self.len == 0 {
            return None;
        }
        let chain = (self.first(), self.last(), mem::replace(&mut self.len, 0));
        unsafe { Sentinels::relink(self.sentinels) };
        Some(chain)
    }

    /// Splices a detached chain in before `pos`.
    unsafe fn splice_nodes_before(&mut self, pos: Link<T>, (first, last, len): Chain<T>) {
        unsafe { Node::splice_before(first, last, pos) };
        self.len += len;
    }
}

impl<T> Default for List<T> {
    /// Creates an empty `List<T>`.
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> List<T> {
    /// Creates an empty `List`.
    ///
    /// Only the sentinel pair is allocated; it stays put until the list is
    /// dropped.
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list: List<u32> = List::new();
    /// assert!(list.is_empty());
    /// assert_eq!(list.begin(), list.end());
    /// ```
    pub fn new() -> Self {
        List {
            sentinels: Sentinels::alloc(),
            len: 0,
            marker: PhantomData,
        }
    }

    /// Creates a list of `count` copies of `value`.
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list = List::from_elem("ab", 3);
    /// assert_eq!(list.iter().copied().collect::<String>(), "ababab");
    /// ```
    pub fn from_elem(value: T, count: usize) -> Self
    where
        T: Clone,
    {
        let mut list = Self::new();
        if count > 0 {
            for _ in 1..count {
                list.push_back(value.clone());
            }
            list.push_back(value);
        }
        list
    }

    /// Creates a list of `count` default values.
    pub fn with_len(count: usize) -> Self
    where
        T: Default,
    {
        let mut list = Self::new();
        for _ in 0..count {
            list.push_back(T::default());
        }
        list
    }

    /// Creates a list owning every node of `source`, leaving `source` empty.
    ///
    /// No element is copied or reallocated; the whole chain is relinked onto
    /// the new sentinels in *O*(1).
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut source: List<_> = (1..=3).collect();
    /// let list = List::take_from(&mut source);
    ///
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    /// assert!(source.is_empty());
    /// assert_eq!(source.begin(), source.end());
    /// ```
    pub fn take_from(source: &mut Self) -> Self {
        let mut list = Self::new();
        list.replace_from(source);
        list
    }

    /// Drops the current elements and takes over every node of `source`,
    /// leaving `source` empty.
    ///
    /// The transfer is an *O*(1) relink; releasing the old elements is
    /// *O*(*n*). Both lists stay usable afterwards.
    ///
    /// A list cannot be moved into itself:
    ///
    /// ```compile_fail
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from_elem(1, 2);
    /// list.replace_from(&mut list);
    /// ```
    pub fn replace_from(&mut self, source: &mut Self) {
        // Only reachable through aliased raw pointers.
        if self.sentinels == source.sentinels {
            return;
        }
        self.clear();
        if let Some(chain) = source.detach_all_nodes() {
            trace!("moving {} nodes into list", chain.2);
            let tail = self.tail();
            unsafe { self.splice_nodes_before(tail, chain) };
        }
    }

    /// Moves all elements from `other` to the end of the list.
    ///
    /// This reuses all the nodes from `other` and moves them into `self`. After
    /// this operation, `other` becomes empty.
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list1 = List::new();
    /// list1.push_back('a');
    ///
    /// let mut list2: List<_> = "bc".chars().collect();
    /// list1.append(&mut list2);
    ///
    /// assert_eq!(list1.iter().collect::<String>(), "abc");
    /// assert!(list2.is_empty());
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        if let Some(chain) = other.detach_all_nodes() {
            trace!("appending {} nodes", chain.2);
            let tail = self.tail();
            unsafe { self.splice_nodes_before(tail, chain) };
        }
    }

    /// Moves all elements from `other` to the beginning of the list.
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    pub fn prepend(&mut self, other: &mut Self) {
        if let Some(chain) = other.detach_all_nodes() {
            trace!("prepending {} nodes", chain.2);
            let first = self.first();
            unsafe { self.splice_nodes_before(first, chain) };
        }
    }

    /// Provides a forward iterator.
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let list: List<u32> = (0..3).collect();
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next_back(), Some(&2));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.first(), self.last(), self.len)
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list: List<u32> = (0..3).collect();
    /// for element in list.iter_mut() {
    ///     *element += 10;
    /// }
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [10, 11, 12]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.first(), self.last(), self.len)
    }

    /// Returns a read-only cursor at the first element, or at
    /// [`end`](List::end) if the list is empty.
    #[inline]
    pub fn begin(&self) -> ConstCursor<T> {
        Cursor::new(self.first())
    }

    /// Returns a read-only cursor one past the last element.
    #[inline]
    pub fn end(&self) -> ConstCursor<T> {
        Cursor::new(self.tail())
    }

    /// Returns a read-write cursor at the first element, or at
    /// [`end_mut`](List::end_mut) if the list is empty.
    #[inline]
    pub fn begin_mut(&mut self) -> CursorMut<T> {
        Cursor::new(self.first())
    }

    /// Returns a read-write cursor one past the last element.
    #[inline]
    pub fn end_mut(&mut self) -> CursorMut<T> {
        Cursor::new(self.tail())
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the length of the `List`.
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes all elements from the `List`.
    ///
    /// Calling it on an empty list does nothing.
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn clear(&mut self) {
        struct DropGuard<'a, T>(&'a mut List<T>);

        impl<'a, T> Drop for DropGuard<'a, T> {
            fn drop(&mut self) {
                // Continue the same loop we do below. This only runs when a destructor has
                // panicked. If another one panics this will abort.
                while let Some(node) = self.0.pop_front_node() {
                    drop(unsafe { Node::into_element(node) });
                }
            }
        }

        if self.len == 0 {
            return;
        }
        trace!("releasing {} nodes", self.len);
        while let Some(node) = self.pop_front_node() {
            let guard = DropGuard(self);
            drop(unsafe { Node::into_element(node) });
            mem::forget(guard);
        }
    }

    /// Returns `true` if the `List` contains an element equal to the given
    /// value.
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Provides a reference to the front element, or `None` if the list is
    /// empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            Some(unsafe { Node::element(self.first()) })
        }
    }

    /// Provides a mutable reference to the front element, or `None` if the
    /// list is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            None
        } else {
            Some(unsafe { Node::element_mut(self.first()) })
        }
    }

    /// Provides a reference to the back element, or `None` if the list is
    /// empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            Some(unsafe { Node::element(self.last()) })
        }
    }

    /// Provides a mutable reference to the back element, or `None` if the
    /// list is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            None
        } else {
            Some(unsafe { Node::element_mut(self.last()) })
        }
    }

    /// Adds an element first in the list.
    ///
    /// This operation should compute in *O*(1) time.
    pub fn push_front(&mut self, elt: T) {
        let first = self.first();
        unsafe { self.link_node_before(Node::alloc(elt), first) };
    }

    /// Like [`push_front`](List::push_front), but reports allocation failure
    /// instead of aborting.
    pub fn try_push_front(&mut self, elt: T) -> Result<()> {
        let node = Node::try_alloc(elt)?;
        let first = self.first();
        unsafe { self.link_node_before(node, first) };
        Ok(())
    }

    /// Removes the first element and returns it, or `None` if the list is
    /// empty.
    ///
    /// This operation should compute in *O*(1) time.
    pub fn pop_front(&mut self) -> Option<T> {
        self.pop_front_node()
            .map(|node| unsafe { Node::into_element(node) })
    }

    /// Appends an element to the back of a list.
    ///
    /// This operation should compute in *O*(1) time.
    pub fn push_back(&mut self, elt: T) {
        let tail = self.tail();
        unsafe { self.link_node_before(Node::alloc(elt), tail) };
    }

    /// Like [`push_back`](List::push_back), but reports allocation failure
    /// instead of aborting.
    pub fn try_push_back(&mut self, elt: T) -> Result<()> {
        let node = Node::try_alloc(elt)?;
        let tail = self.tail();
        unsafe { self.link_node_before(node, tail) };
        Ok(())
    }

    /// Removes the last element from a list and returns it, or `None` if
    /// it is empty.
    ///
    /// This operation should compute in *O*(1) time.
    pub fn pop_back(&mut self) -> Option<T> {
        self.pop_back_node()
            .map(|node| unsafe { Node::into_element(node) })
    }

    /// Inserts `elt` immediately before `pos` and returns a cursor at the new
    /// element.
    ///
    /// `pos` may be [`end`](List::end), which appends. Cursors at other
    /// elements stay valid.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list: List<_> = vec![1, 3].into_iter().collect();
    /// unsafe {
    ///     let three = list.begin().following();
    ///     let two = list.insert(three, 2);
    ///     assert_eq!(*two.get(), 2);
    ///     list.insert(list.end(), 4);
    /// }
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4]);
    /// ```
    ///
    /// # Safety
    ///
    /// `pos` must be a cursor of this list whose node is still alive: a live
    /// element or `end`. It must not be the position before `begin`.
    pub unsafe fn insert<A: Access>(&mut self, pos: Cursor<T, A>, elt: T) -> CursorMut<T> {
        unsafe { self.link_node_before(Node::alloc(elt), pos.node()) }
    }

    /// Like [`insert`](List::insert), but reports allocation failure instead
    /// of aborting, and the position before `begin` as
    /// [`ListError::SentinelPosition`].
    ///
    /// # Safety
    ///
    /// Same as [`insert`](List::insert), except that the position before
    /// `begin` is allowed.
    pub unsafe fn try_insert<A: Access>(
        &mut self,
        pos: Cursor<T, A>,
        elt: T,
    ) -> Result<CursorMut<T>> {
        if pos.node() == self.head() {
            return Err(ListError::SentinelPosition);
        }
        let node = Node::try_alloc(elt)?;
        Ok(unsafe { self.link_node_before(node, pos.node()) })
    }

    /// Removes and drops the element at `pos`, returning a cursor at the
    /// element that followed it (or at `end`).
    ///
    /// Only cursors at the erased element are invalidated.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list: List<_> = (0..4).collect();
    /// unsafe {
    ///     let mut cursor = list.begin_mut();
    ///     while cursor != list.end() {
    ///         if *cursor.get() % 2 == 0 {
    ///             cursor = list.erase(cursor);
    ///         } else {
    ///             cursor.move_next();
    ///         }
    ///     }
    /// }
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 3]);
    /// ```
    ///
    /// # Safety
    ///
    /// `pos` must be a cursor of this list at a live element: not `end`, not
    /// the position before `begin`, and not previously erased.
    pub unsafe fn erase<A: Access>(&mut self, pos: Cursor<T, A>) -> CursorMut<T> {
        let node = pos.node();
        debug_assert!(!self.is_sentinel(node), "erase at a sentinel position");
        let next = unsafe { self.unlink_node(node) };
        drop(unsafe { Node::into_element(node) });
        Cursor::new(next)
    }

    /// Like [`erase`](List::erase), but reports a sentinel position as
    /// [`ListError::SentinelPosition`] instead of misbehaving.
    ///
    /// # Safety
    ///
    /// `pos` must be a cursor of this list whose node is still alive.
    pub unsafe fn try_erase<A: Access>(&mut self, pos: Cursor<T, A>) -> Result<CursorMut<T>> {
        if self.is_sentinel(pos.node()) {
            return Err(ListError::SentinelPosition);
        }
        Ok(unsafe { self.erase(pos) })
    }

    /// Unlinks the element at `pos` and returns it.
    ///
    /// # Safety
    ///
    /// Same as [`erase`](List::erase).
    pub unsafe fn remove<A: Access>(&mut self, pos: Cursor<T, A>) -> T {
        let node = pos.node();
        debug_assert!(!self.is_sentinel(node), "remove at a sentinel position");
        unsafe {
            self.unlink_node(node);
            Node::into_element(node)
        }
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        struct FreeSentinels<T>(NonNull<Sentinels<T>>);

        impl<T> Drop for FreeSentinels<T> {
            fn drop(&mut self) {
                unsafe { Sentinels::free(self.0) }
            }
        }

        // Freed last, even if an element destructor panics.
        let _sentinels = FreeSentinels(self.sentinels);
        self.clear();
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the list into an iterator yielding elements by value.
    #[inline]
    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(move |elt| self.push_back(elt));
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned());
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for List<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Clone> Clone for List<T> {
    /// Deep-copies every element into a fresh chain.
    fn clone(&self) -> Self {
        trace!("copying {} nodes", self.len);
        self.iter().cloned().collect()
    }

    /// Drops the current elements, then deep-copies `source`.
    ///
    /// A list cannot be assigned from itself:
    ///
    /// ```compile_fail
    /// use sentinel_list::List;
    ///
    /// let mut list = List::from_elem(1, 2);
    /// list.clone_from(&list);
    /// ```
    fn clone_from(&mut self, source: &Self) {
        // Only reachable through aliased raw pointers.
        if self.sentinels == source.sentinels {
            return;
        }
        self.clear();
        trace!("copying {} nodes", source.len);
        self.extend(source.iter().cloned());
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for elt in self {
            elt.hash(state);
        }
    }
}

// Ensure that `List` and its read-only iterators are covariant in their type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: List<&'static str>) -> List<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}

unsafe impl<T: Send> Send for List<T> {}

unsafe impl<T: Sync> Sync for List<T> {}
