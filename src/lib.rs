//! A doubly-linked list bounded by two sentinel nodes.
//!
//! [`List`] supports constant-time insertion and removal at any position
//! named by a [`Cursor`], pushing and popping at either end, and
//! bidirectional traversal. Because every live node always has two real
//! neighbours (possibly sentinels), no operation special-cases the ends of
//! the chain.
//!
//! ```
//! use sentinel_list::List;
//!
//! let mut list = List::new();
//! list.push_back(1);
//! list.push_back(2);
//! list.push_front(0);
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), [0, 1, 2]);
//!
//! list.pop_back();
//! assert_eq!(list.len(), 2);
//! ```
#![warn(unsafe_op_in_unsafe_fn)]

pub mod error;
pub mod list;

#[cfg(feature = "serde")]
mod serde_impl;

pub use crate::error::{ListError, Result};
pub use crate::list::cursor::{Access, ConstCursor, Cursor, CursorMut, ReadOnly, ReadWrite};
pub use crate::list::iter::{IntoIter, Iter, IterMut};
pub use crate::list::List;
