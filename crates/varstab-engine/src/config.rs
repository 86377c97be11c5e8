//! Engine configuration, validation, and error types.
//!
//! [`EngineConfig`] is checked once by [`VarianceEngine::new`](crate::VarianceEngine::new);
//! a validated config never changes for the life of the engine.

use std::error::Error;
use std::fmt;

use varstab_buffer::BufferConfig;

// ── ShiftChoice ────────────────────────────────────────────────────

/// Where the shift comes from when a shift-based algorithm is evaluated
/// without an explicit one.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ShiftChoice {
    /// The first sample of the buffer being read. Zero for an empty
    /// buffer, whose variance is NaN regardless.
    #[default]
    FirstSample,
    /// A fixed value, applied to every evaluation.
    Fixed(f64),
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`EngineConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `max_elements` is zero, so no non-empty buffer could be allocated.
    ZeroCapacity,
    /// A fixed default shift is NaN or infinite.
    NonFiniteShift {
        /// The invalid value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "max_elements must be at least 1"),
            Self::NonFiniteShift { value } => {
                write!(f, "fixed default shift must be finite, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

// ── EngineConfig ───────────────────────────────────────────────────

/// Complete configuration for a [`VarianceEngine`](crate::VarianceEngine).
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Upper bound on the element count of either buffer. Resize requests
    /// above it fail with `OutOfMemory`. Default: 2^28.
    pub max_elements: usize,
    /// Shift used by [`evaluate`](crate::VarianceEngine::evaluate) when
    /// none is supplied. Default: [`ShiftChoice::FirstSample`].
    pub default_shift: ShiftChoice,
}

impl EngineConfig {
    /// Check all invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_elements == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if let ShiftChoice::Fixed(value) = self.default_shift {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteShift { value });
            }
        }
        Ok(())
    }

    /// The buffer-level view of this configuration.
    pub fn buffer_config(&self) -> BufferConfig {
        BufferConfig::new(self.max_elements)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_elements: BufferConfig::DEFAULT_MAX_ELEMENTS,
            default_shift: ShiftChoice::FirstSample,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.default_shift, ShiftChoice::FirstSample);
        assert_eq!(
            config.buffer_config().max_elements,
            BufferConfig::DEFAULT_MAX_ELEMENTS
        );
    }

    #[test]
    fn zero_capacity_rejected() {
        let config = EngineConfig {
            max_elements: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCapacity));
    }

    #[test]
    fn non_finite_fixed_shift_rejected() {
        for value in [f64::INFINITY, f64::NEG_INFINITY] {
            let config = EngineConfig {
                default_shift: ShiftChoice::Fixed(value),
                ..EngineConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::NonFiniteShift { value })
            );
        }
        let nan = EngineConfig {
            default_shift: ShiftChoice::Fixed(f64::NAN),
            ..EngineConfig::default()
        };
        assert!(matches!(
            nan.validate(),
            Err(ConfigError::NonFiniteShift { .. })
        ));
    }

    #[test]
    fn fixed_finite_shift_accepted() {
        let config = EngineConfig {
            max_elements: 1,
            default_shift: ShiftChoice::Fixed(16_777_200.0),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            ConfigError::ZeroCapacity.to_string(),
            "max_elements must be at least 1"
        );
        assert_eq!(
            ConfigError::NonFiniteShift {
                value: f64::INFINITY
            }
            .to_string(),
            "fixed default shift must be finite, got inf"
        );
    }
}
