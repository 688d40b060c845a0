//! Position handles into a [`List`](crate::List).
//!
//! A [`Cursor`] names one node of a list: a live element, or the `end`
//! sentinel one past the last element. It is a plain address, `Copy` and free
//! of lifetimes, so it survives insertions and removals of *other* nodes. It
//! dangles once its own node is erased or its list is dropped, and nothing
//! detects that, which is why every operation that follows a cursor is
//! `unsafe`.
//!
//! The access marker only decides whether the element may be written through
//! the cursor. Equality ignores it: two cursors are equal when they name the
//! same node, whatever their flavors.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use super::node::{Link, Node};

mod sealed {
    pub trait Sealed {}
}

/// Marker for the two cursor flavors.
pub trait Access: sealed::Sealed {}

/// Read-write cursors, handed out by `&mut List` methods.
#[derive(Debug)]
pub enum ReadWrite {}

/// Read-only cursors, handed out by `&List` methods.
#[derive(Debug)]
pub enum ReadOnly {}

impl sealed::Sealed for ReadWrite {}
impl sealed::Sealed for ReadOnly {}
impl Access for ReadWrite {}
impl Access for ReadOnly {}

/// A bidirectional position in a `List`.
pub struct Cursor<T, A> {
    node: Link<T>,
    access: PhantomData<A>,
}

/// A cursor that can write the element it points at.
pub type CursorMut<T> = Cursor<T, ReadWrite>;

/// A cursor that can only read the element it points at.
pub type ConstCursor<T> = Cursor<T, ReadOnly>;

impl<T, A: Access> Cursor<T, A> {
    #[inline]
    pub(crate) fn new(node: Link<T>) -> Self {
        Cursor {
            node,
            access: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn node(self) -> Link<T> {
        self.node
    }

    /// Steps to the following node.
    ///
    /// # Safety
    ///
    /// The cursor must point at a node that is still alive and is not the
    /// `end` sentinel.
    #[inline]
    pub unsafe fn move_next(&mut self) {
        self.node = unsafe { Node::next(self.node) };
    }

    /// Steps to the preceding node.
    ///
    /// Stepping back from `begin` lands on the head sentinel; that position
    /// may only be stepped forward again.
    ///
    /// # Safety
    ///
    /// The cursor must point at a node that is still alive and is not the
    /// head sentinel.
    #[inline]
    pub unsafe fn move_prev(&mut self) {
        self.node = unsafe { Node::prev(self.node) };
    }

    /// Returns a cursor one step forward, leaving `self` where it is.
    ///
    /// # Safety
    ///
    /// Same as [`Cursor::move_next`].
    #[inline]
    pub unsafe fn following(mut self) -> Self {
        unsafe { self.move_next() };
        self
    }

    /// Returns a cursor one step back, leaving `self` where it is.
    ///
    /// # Safety
    ///
    /// Same as [`Cursor::move_prev`].
    #[inline]
    pub unsafe fn preceding(mut self) -> Self {
        unsafe { self.move_prev() };
        self
    }

    /// Returns the element under the cursor.
    ///
    /// # Safety
    ///
    /// The cursor must point at a live element (not a sentinel), that element
    /// must outlive `'a`, and no mutable reference to it may exist during
    /// `'a`.
    #[inline]
    pub unsafe fn get<'a>(self) -> &'a T {
        unsafe { Node::element(self.node) }
    }

    /// Forgets write access.
    #[inline]
    pub fn as_const(self) -> ConstCursor<T> {
        Cursor::new(self.node)
    }
}

impl<T> Cursor<T, ReadWrite> {
    /// Returns the element under the cursor for writing.
    ///
    /// Only read-write cursors have this method:
    ///
    /// ```compile_fail
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(1);
    /// unsafe { *list.begin().get_mut() = 2 };
    /// ```
    ///
    /// # Safety
    ///
    /// The cursor must point at a live element (not a sentinel), that element
    /// must outlive `'a`, and no other reference to it may exist during `'a`.
    #[inline]
    pub unsafe fn get_mut<'a>(self) -> &'a mut T {
        unsafe { Node::element_mut(self.node) }
    }
}

impl<T> From<CursorMut<T>> for ConstCursor<T> {
    #[inline]
    fn from(cursor: CursorMut<T>) -> Self {
        cursor.as_const()
    }
}

impl<T, A> Clone for Cursor<T, A> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, A> Copy for Cursor<T, A> {}

impl<T, A: Access, B: Access> PartialEq<Cursor<T, B>> for Cursor<T, A> {
    #[inline]
    fn eq(&self, other: &Cursor<T, B>) -> bool {
        self.node == other.node
    }
}

impl<T, A: Access> Eq for Cursor<T, A> {}

impl<T, A: Access> Hash for Cursor<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.hash(state);
    }
}

impl<T, A> fmt::Debug for Cursor<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.node.as_ptr()).finish()
    }
}
