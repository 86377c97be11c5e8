//! A single resizable sample buffer with generation tracking.

use varstab_core::{BufferError, Sample};

use crate::handle::BufferHandle;

/// One precision domain's backing store.
///
/// Generation 0 means the buffer has never been resized; the first
/// successful resize moves it to generation 1. Handles carry the
/// generation they were issued at and only resolve while it is current.
pub struct SampleBuffer<T> {
    data: Vec<T>,
    generation: u64,
}

impl<T: Sample> SampleBuffer<T> {
    /// An unallocated buffer.
    pub const fn new() -> Self {
        Self {
            data: Vec::new(),
            generation: 0,
        }
    }

    /// Resize to exactly `len` elements and return a fresh handle.
    ///
    /// Preserves `[0, min(old_len, len))`, zero-fills any new tail and
    /// truncates on shrink. `limit` is the largest permitted length.
    /// On failure the buffer is left exactly as it was.
    pub fn resize(&mut self, len: usize, limit: usize) -> Result<BufferHandle<T>, BufferError> {
        if len > limit {
            return Err(BufferError::OutOfMemory {
                precision: T::PRECISION,
                requested: len,
                limit: Some(limit),
            });
        }

        if len > self.data.len() {
            let additional = len - self.data.len();
            self.data
                .try_reserve_exact(additional)
                .map_err(|_| BufferError::OutOfMemory {
                    precision: T::PRECISION,
                    requested: len,
                    limit: None,
                })?;
            self.data.resize(len, T::zero());
        } else {
            self.data.truncate(len);
            self.data.shrink_to_fit();
        }

        self.generation += 1;
        Ok(BufferHandle::new(self.generation, len))
    }

    /// The handle for the current allocation.
    pub fn handle(&self) -> Result<BufferHandle<T>, BufferError> {
        self.check_allocated()?;
        Ok(BufferHandle::new(self.generation, self.data.len()))
    }

    /// Resolve a handle to a read-only view.
    pub fn view(&self, handle: &BufferHandle<T>) -> Result<&[T], BufferError> {
        self.check_current(handle)?;
        Ok(&self.data)
    }

    /// Resolve a handle to a writable view.
    pub fn view_mut(&mut self, handle: &BufferHandle<T>) -> Result<&mut [T], BufferError> {
        self.check_current(handle)?;
        Ok(&mut self.data)
    }

    /// The current contents, without a handle.
    ///
    /// This is the read path the variance kernels use: they always see
    /// the latest allocation.
    pub fn contents(&self) -> Result<&[T], BufferError> {
        self.check_allocated()?;
        Ok(&self.data)
    }

    /// Base pointer and length of the current allocation.
    ///
    /// For foreign callers that write samples in place. The pointer is
    /// valid until the next resize of this buffer or until the buffer is
    /// dropped, whichever comes first.
    pub fn raw_parts_mut(&mut self) -> Result<(*mut T, usize), BufferError> {
        self.check_allocated()?;
        Ok((self.data.as_mut_ptr(), self.data.len()))
    }

    /// Whether `handle` was issued at the current generation.
    pub fn is_current(&self, handle: &BufferHandle<T>) -> bool {
        self.generation != 0 && handle.generation == self.generation
    }

    /// Whether any resize has succeeded yet.
    pub fn is_allocated(&self) -> bool {
        self.generation != 0
    }

    /// Current generation (0 = never resized).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of elements in the current allocation.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the current allocation holds zero elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes held by the backing `Vec`, including spare capacity.
    pub fn memory_bytes(&self) -> usize {
        self.data.capacity() * std::mem::size_of::<T>()
    }

    fn check_allocated(&self) -> Result<(), BufferError> {
        if self.generation == 0 {
            return Err(BufferError::InvalidState {
                precision: T::PRECISION,
            });
        }
        Ok(())
    }

    fn check_current(&self, handle: &BufferHandle<T>) -> Result<(), BufferError> {
        self.check_allocated()?;
        if handle.generation != self.generation {
            return Err(BufferError::StaleHandle {
                precision: T::PRECISION,
                handle_generation: handle.generation,
                current_generation: self.generation,
            });
        }
        Ok(())
    }
}

impl<T: Sample> Default for SampleBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}
