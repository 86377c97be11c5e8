//! The two-domain sample store.

use log::{debug, warn};
use varstab_core::{BufferError, Sample};

use crate::buffer::SampleBuffer;
use crate::config::BufferConfig;
use crate::handle::BufferHandle;

/// Owns one `f32` and one `f64` sample buffer.
///
/// The two buffers have independent lengths and generations. Callers that
/// compare algorithms across widths conventionally keep them the same
/// length, but nothing here requires it.
pub struct SampleStore {
    config: BufferConfig,
    single: SampleBuffer<f32>,
    double: SampleBuffer<f64>,
}

/// Maps a sample width to its buffer inside a [`SampleStore`].
pub trait Stored: Sample {
    /// The buffer holding samples of this width.
    fn buffer(store: &SampleStore) -> &SampleBuffer<Self>;

    /// Mutable access to the buffer holding samples of this width.
    fn buffer_mut(store: &mut SampleStore) -> &mut SampleBuffer<Self>;
}

impl Stored for f32 {
    fn buffer(store: &SampleStore) -> &SampleBuffer<f32> {
        &store.single
    }

    fn buffer_mut(store: &mut SampleStore) -> &mut SampleBuffer<f32> {
        &mut store.single
    }
}

impl Stored for f64 {
    fn buffer(store: &SampleStore) -> &SampleBuffer<f64> {
        &store.double
    }

    fn buffer_mut(store: &mut SampleStore) -> &mut SampleBuffer<f64> {
        &mut store.double
    }
}

impl SampleStore {
    /// An empty store; neither buffer is allocated.
    pub fn new(config: BufferConfig) -> Self {
        Self {
            config,
            single: SampleBuffer::new(),
            double: SampleBuffer::new(),
        }
    }

    /// The store's configuration.
    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    /// Resize the `T` buffer to exactly `len` elements.
    ///
    /// Any handle previously issued for this domain is stale afterwards.
    pub fn resize<T: Stored>(&mut self, len: usize) -> Result<BufferHandle<T>, BufferError> {
        let limit = self.config.limit_for(T::PRECISION);
        let buffer = T::buffer_mut(self);
        let old_len = buffer.len();
        match buffer.resize(len, limit) {
            Ok(handle) => {
                debug!(
                    "resized {} buffer: {} -> {} elements, generation {}",
                    T::PRECISION,
                    old_len,
                    len,
                    handle.generation()
                );
                Ok(handle)
            }
            Err(e) => {
                warn!("{e}");
                Err(e)
            }
        }
    }

    /// The handle for the current `T` allocation.
    pub fn handle<T: Stored>(&self) -> Result<BufferHandle<T>, BufferError> {
        T::buffer(self).handle()
    }

    /// Resolve a handle to a read-only view.
    pub fn view<T: Stored>(&self, handle: &BufferHandle<T>) -> Result<&[T], BufferError> {
        T::buffer(self).view(handle)
    }

    /// Resolve a handle to a writable view.
    pub fn view_mut<T: Stored>(
        &mut self,
        handle: &BufferHandle<T>,
    ) -> Result<&mut [T], BufferError> {
        T::buffer_mut(self).view_mut(handle)
    }

    /// Current contents of the `T` buffer.
    pub fn contents<T: Stored>(&self) -> Result<&[T], BufferError> {
        T::buffer(self).contents()
    }

    /// The `T` buffer itself.
    pub fn buffer<T: Stored>(&self) -> &SampleBuffer<T> {
        T::buffer(self)
    }

    /// Mutable access to the `T` buffer.
    ///
    /// Resizing through this reference skips the store's limit and logging;
    /// the caller supplies its own limit.
    pub fn buffer_mut<T: Stored>(&mut self) -> &mut SampleBuffer<T> {
        T::buffer_mut(self)
    }

    /// Bytes held by both buffers.
    pub fn memory_bytes(&self) -> usize {
        self.single.memory_bytes() + self.double.memory_bytes()
    }
}

impl Default for SampleStore {
    fn default() -> Self {
        Self::new(BufferConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use varstab_core::Precision;

    #[test]
    fn domains_are_independent() {
        let mut store = SampleStore::default();
        let h32 = store.resize::<f32>(16).unwrap();
        assert_eq!(
            store.handle::<f64>(),
            Err(BufferError::InvalidState {
                precision: Precision::Double
            })
        );

        let h64 = store.resize::<f64>(4).unwrap();
        assert_eq!(h32.len(), 16);
        assert_eq!(h64.len(), 4);
        // Resizing one domain leaves the other's handle valid.
        assert!(store.view(&h32).is_ok());
        let _ = store.resize::<f64>(8).unwrap();
        assert!(store.view(&h32).is_ok());
        assert!(store.view(&h64).is_err());
    }

    #[test]
    fn writes_through_handle_are_visible_in_contents() {
        let mut store = SampleStore::default();
        let h = store.resize::<f64>(3).unwrap();
        store
            .view_mut(&h)
            .unwrap()
            .copy_from_slice(&[1.5, 2.5, 3.5]);
        assert_eq!(store.contents::<f64>().unwrap(), &[1.5, 2.5, 3.5]);
    }

    #[test]
    fn configured_limit_applies_per_domain() {
        let mut store = SampleStore::new(BufferConfig::new(10));
        assert!(store.resize::<f32>(10).is_ok());
        assert_eq!(
            store.resize::<f64>(11),
            Err(BufferError::OutOfMemory {
                precision: Precision::Double,
                requested: 11,
                limit: Some(10),
            })
        );
        assert!(!store.buffer::<f64>().is_allocated());
    }

    #[test]
    fn memory_bytes_sums_both_buffers() {
        let mut store = SampleStore::default();
        let _ = store.resize::<f32>(4).unwrap();
        let _ = store.resize::<f64>(4).unwrap();
        assert_eq!(store.memory_bytes(), 4 * 4 + 4 * 8);
    }
}
