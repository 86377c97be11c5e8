//! Generation-scoped buffer handles.
//!
//! A [`BufferHandle`] names one allocation of one precision domain. It is
//! a plain token: it does not borrow the store, so it can be held across
//! calls, but it must be resolved through the store to reach the data.

use std::fmt;
use std::marker::PhantomData;

use varstab_core::{Precision, Sample};

/// Token for one allocation of the `T` buffer.
///
/// Handles are invalidated by the next resize of the same domain; the
/// engine never refreshes them. Re-acquire a handle after every resize.
#[must_use]
pub struct BufferHandle<T> {
    pub(crate) generation: u64,
    pub(crate) len: usize,
    _width: PhantomData<fn() -> T>,
}

impl<T: Sample> BufferHandle<T> {
    pub(crate) fn new(generation: u64, len: usize) -> Self {
        Self {
            generation,
            len,
            _width: PhantomData,
        }
    }

    /// The buffer generation this handle was issued at.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of elements the handle addresses.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the handle addresses zero elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The precision domain of the handle.
    pub fn precision(&self) -> Precision {
        T::PRECISION
    }
}

impl<T> Clone for BufferHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for BufferHandle<T> {}

impl<T> PartialEq for BufferHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.generation == other.generation && self.len == other.len
    }
}

impl<T> Eq for BufferHandle<T> {}

impl<T: Sample> fmt::Debug for BufferHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferHandle")
            .field("precision", &T::PRECISION)
            .field("generation", &self.generation)
            .field("len", &self.len)
            .finish()
    }
}

impl<T: Sample> fmt::Display for BufferHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BufferHandle({}, gen={}, len={})",
            T::PRECISION,
            self.generation,
            self.len
        )
    }
}
