//! Shared element buffer.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// Element buffer shared by every handle cloned from it.
///
/// A write through one handle is visible through all of them. Identity of
/// two handles is pointer identity of the allocation.
#[derive(Debug)]
pub struct SharedBuffer<T> {
    data: Rc<RefCell<Vec<T>>>,
}

impl<T> Clone for SharedBuffer<T> {
    fn clone(&self) -> Self {
        Self {
            data: Rc::clone(&self.data),
        }
    }
}

impl<T: Copy> SharedBuffer<T> {
    /// Create a buffer owning `data`.
    #[inline]
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            data: Rc::new(RefCell::new(data)),
        }
    }

    /// Create a buffer of `len` copies of `value`.
    pub fn filled(len: usize, value: T) -> Self {
        Self::from_vec(vec![value; len])
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    /// Check if the buffer holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the elements.
    ///
    /// # Panics
    ///
    /// Panics if a mutable borrow is alive.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, [T]> {
        Ref::map(self.data.borrow(), |v| v.as_slice())
    }

    /// Borrow the elements mutably.
    ///
    /// # Panics
    ///
    /// Panics if any other borrow is alive.
    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, [T]> {
        RefMut::map(self.data.borrow_mut(), |v| v.as_mut_slice())
    }

    /// Copy the elements out.
    pub fn to_vec(&self) -> Vec<T> {
        self.data.borrow().clone()
    }

    /// Check if both handles point to the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    /// Number of live handles to this allocation.
    #[inline]
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.data)
    }
}
