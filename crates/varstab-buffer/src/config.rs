//! Buffer allocation limits.

use varstab_core::Precision;

/// Configuration for a [`SampleStore`](crate::SampleStore).
///
/// Applies to both precision domains independently.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BufferConfig {
    /// Largest element count a single resize may request.
    ///
    /// Default: 268_435_456 (1 GiB of `f32`, 2 GiB of `f64`). Requests
    /// above the limit fail with `OutOfMemory` without touching the
    /// allocator.
    pub max_elements: usize,
}

impl BufferConfig {
    /// Default element limit: 2^28.
    pub const DEFAULT_MAX_ELEMENTS: usize = 1 << 28;

    /// Create a config with the given element limit.
    pub fn new(max_elements: usize) -> Self {
        Self { max_elements }
    }

    /// The effective limit for a domain: the configured limit, clamped to
    /// what the target can address at that width.
    pub fn limit_for(&self, precision: Precision) -> usize {
        self.max_elements.min(precision.max_addressable())
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ELEMENTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limit_is_quarter_giga_elements() {
        let config = BufferConfig::default();
        assert_eq!(config.max_elements, 268_435_456);
    }

    #[test]
    fn unlimited_config_clamps_to_addressable() {
        let config = BufferConfig::new(usize::MAX);
        assert_eq!(
            config.limit_for(Precision::Double),
            Precision::Double.max_addressable()
        );
        assert!(config.limit_for(Precision::Single) > config.limit_for(Precision::Double));
    }
}
