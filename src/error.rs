//! Conversion errors.

use core::fmt;

use crate::class::ClassId;
use crate::limits::LimitExceeded;

/// Errors from array validation and layout conversion.
///
/// Implements [`core::error::Error`] so callers can wrap it in their own
/// error types.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum LayoutError {
    /// The array's declared class differs from the requested element type.
    ClassMismatch {
        /// Class of the requested element type.
        expected: ClassId,
        /// Class declared by the array.
        actual: ClassId,
    },
    /// The class has no numeric storage or no element type.
    UnsupportedClass(ClassId),
    /// The array does not have 2 or 3 dimensions.
    DimensionCount {
        /// Number of dimensions found.
        actual: usize,
    },
    /// The channel extent differs from the requested channel count.
    ChannelMismatch {
        /// Requested channel count.
        expected: usize,
        /// Channel extent of the array (1 for a 2-D array).
        actual: usize,
    },
    /// Storage length does not match the extents.
    DataLength {
        /// Product of the extents.
        expected: usize,
        /// Number of stored elements.
        actual: usize,
    },
    /// An extent is zero, or the element count overflows.
    InvalidDimensions,
    /// A conversion limit was exceeded.
    Limit(LimitExceeded),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClassMismatch { expected, actual } => {
                write!(f, "array class {actual} does not match element type {expected}")
            }
            Self::UnsupportedClass(class) => write!(f, "class {class} cannot be converted"),
            Self::DimensionCount { actual } => {
                write!(f, "expected 2 or 3 dimensions, found {actual}")
            }
            Self::ChannelMismatch { expected, actual } => {
                write!(f, "expected {expected} channels, found {actual}")
            }
            Self::DataLength { expected, actual } => {
                write!(f, "extents need {expected} elements, found {actual}")
            }
            Self::InvalidDimensions => write!(f, "extent is zero or element count overflows"),
            Self::Limit(e) => write!(f, "conversion limit exceeded: {e}"),
        }
    }
}

impl core::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Limit(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LimitExceeded> for LayoutError {
    fn from(e: LimitExceeded) -> Self {
        Self::Limit(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn display() {
        let err = LayoutError::ClassMismatch {
            expected: ClassId::UInt8,
            actual: ClassId::Double,
        };
        assert_eq!(
            format!("{err}"),
            "array class double does not match element type uint8"
        );

        let err = LayoutError::ChannelMismatch {
            expected: 3,
            actual: 1,
        };
        assert_eq!(format!("{err}"), "expected 3 channels, found 1");

        let err = LayoutError::Limit(LimitExceeded::Rows {
            actual: 10,
            max: 5,
        });
        assert_eq!(
            format!("{err}"),
            "conversion limit exceeded: rows 10 exceeds limit 5"
        );
    }

    #[test]
    fn limit_is_source() {
        use core::error::Error;
        let err = LayoutError::from(LimitExceeded::Elements {
            actual: 100,
            max: 10,
        });
        assert!(err.source().is_some());
        assert!(LayoutError::InvalidDimensions.source().is_none());
    }
}
