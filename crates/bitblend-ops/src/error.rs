//! Error types for blend operations.

use thiserror::Error;

/// Error type for blend operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Operator name is not one of `xor`, `or`, `and`.
    #[error("operation not supported: {name}")]
    UnsupportedOperator {
        /// The name that failed to resolve.
        name: String,
    },

    /// Input images have different dimensions.
    #[error("image sizes must be equal: {a_width}x{a_height} vs {b_width}x{b_height}")]
    SizeMismatch {
        /// First image width
        a_width: u32,
        /// First image height
        a_height: u32,
        /// Second image width
        b_width: u32,
        /// Second image height
        b_height: u32,
    },

    /// Error from core raster handling.
    #[error(transparent)]
    Core(#[from] bitblend_core::Error),
}

impl OpsError {
    /// Creates an [`OpsError::UnsupportedOperator`] error.
    #[inline]
    pub fn unsupported_operator(name: impl Into<String>) -> Self {
        Self::UnsupportedOperator { name: name.into() }
    }

    /// Creates an [`OpsError::SizeMismatch`] error.
    #[inline]
    pub fn size_mismatch(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::SizeMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }
}

/// Result type for blend operations.
pub type OpsResult<T> = Result<T, OpsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = OpsError::unsupported_operator("nand");
        assert_eq!(err.to_string(), "operation not supported: nand");

        let err = OpsError::size_mismatch((4, 3), (3, 4));
        assert_eq!(err.to_string(), "image sizes must be equal: 4x3 vs 3x4");
    }
}
