//! Storage precision domains.

use std::fmt;

/// One of the two independently managed storage widths.
///
/// Every buffer, handle and error is tagged with the domain it belongs
/// to. The domains never share storage or generation counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Precision {
    /// Reduced precision: IEEE 754 binary32 (`f32`).
    Single,
    /// Extended precision: IEEE 754 binary64 (`f64`).
    Double,
}

impl Precision {
    /// Width of one element in bits.
    pub const fn bits(self) -> u32 {
        match self {
            Self::Single => 32,
            Self::Double => 64,
        }
    }

    /// Width of one element in bytes.
    pub const fn element_bytes(self) -> usize {
        match self {
            Self::Single => std::mem::size_of::<f32>(),
            Self::Double => std::mem::size_of::<f64>(),
        }
    }

    /// Largest element count whose byte size still fits in `isize::MAX`.
    ///
    /// Requests above this can never be satisfied by the allocator.
    pub const fn max_addressable(self) -> usize {
        isize::MAX as usize / self.element_bytes()
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "f32"),
            Self::Double => write!(f, "f64"),
        }
    }
}
