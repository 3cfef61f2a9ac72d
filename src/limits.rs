//! Resource limits for layout conversion.
//!
//! [`ConvertLimits`] caps the size of arrays a conversion will allocate.
//! [`LimitExceeded`] is returned when a check fails, before any element is
//! copied.

/// Caps on the shape and size of a conversion.
///
/// All fields are optional; `None` means no limit for that resource.
///
/// ```
/// use zenmx::ConvertLimits;
///
/// let limits = ConvertLimits::none()
///     .with_max_elements(16_000_000)
///     .with_max_memory(256 * 1024 * 1024);
/// assert!(limits.check_shape(1080, 1920, 3, 1).is_ok());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct ConvertLimits {
    /// Maximum row count.
    pub max_rows: Option<usize>,
    /// Maximum column count.
    pub max_cols: Option<usize>,
    /// Maximum total scalar count (rows × cols × channels).
    pub max_elements: Option<u64>,
    /// Maximum bytes of the allocated destination.
    pub max_memory_bytes: Option<u64>,
}

impl ConvertLimits {
    /// No limits (all fields `None`).
    pub fn none() -> Self {
        Self::default()
    }

    /// Set maximum row count.
    pub fn with_max_rows(mut self, rows: usize) -> Self {
        self.max_rows = Some(rows);
        self
    }

    /// Set maximum column count.
    pub fn with_max_cols(mut self, cols: usize) -> Self {
        self.max_cols = Some(cols);
        self
    }

    /// Set maximum total scalar count.
    pub fn with_max_elements(mut self, max: u64) -> Self {
        self.max_elements = Some(max);
        self
    }

    /// Set maximum destination size in bytes.
    pub fn with_max_memory(mut self, bytes: u64) -> Self {
        self.max_memory_bytes = Some(bytes);
        self
    }

    /// Whether any limits are set.
    pub fn has_any(&self) -> bool {
        self.max_rows.is_some()
            || self.max_cols.is_some()
            || self.max_elements.is_some()
            || self.max_memory_bytes.is_some()
    }

    /// Check a `rows × cols × channels` shape of `element_size`-byte scalars.
    pub fn check_shape(
        &self,
        rows: usize,
        cols: usize,
        channels: usize,
        element_size: usize,
    ) -> Result<(), LimitExceeded> {
        if let Some(max) = self.max_rows
            && rows > max
        {
            return Err(LimitExceeded::Rows { actual: rows, max });
        }
        if let Some(max) = self.max_cols
            && cols > max
        {
            return Err(LimitExceeded::Cols { actual: cols, max });
        }
        let elements = (rows as u64)
            .saturating_mul(cols as u64)
            .saturating_mul(channels as u64);
        if let Some(max) = self.max_elements
            && elements > max
        {
            return Err(LimitExceeded::Elements {
                actual: elements,
                max,
            });
        }
        if let Some(max) = self.max_memory_bytes {
            let bytes = elements.saturating_mul(element_size as u64);
            if bytes > max {
                return Err(LimitExceeded::Memory { actual: bytes, max });
            }
        }
        Ok(())
    }
}

/// A conversion limit was exceeded.
///
/// Each variant carries the actual value and the limit that was exceeded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LimitExceeded {
    /// Row count exceeded `max_rows`.
    Rows {
        /// Actual row count.
        actual: usize,
        /// Maximum allowed.
        max: usize,
    },
    /// Column count exceeded `max_cols`.
    Cols {
        /// Actual column count.
        actual: usize,
        /// Maximum allowed.
        max: usize,
    },
    /// Scalar count exceeded `max_elements`.
    Elements {
        /// Actual scalar count.
        actual: u64,
        /// Maximum allowed.
        max: u64,
    },
    /// Destination size exceeded `max_memory_bytes`.
    Memory {
        /// Destination size in bytes.
        actual: u64,
        /// Maximum allowed.
        max: u64,
    },
}

impl core::fmt::Display for LimitExceeded {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Rows { actual, max } => write!(f, "rows {actual} exceeds limit {max}"),
            Self::Cols { actual, max } => write!(f, "cols {actual} exceeds limit {max}"),
            Self::Elements { actual, max } => {
                write!(f, "element count {actual} exceeds limit {max}")
            }
            Self::Memory { actual, max } => {
                write!(f, "memory {actual} bytes exceeds limit {max}")
            }
        }
    }
}

impl core::error::Error for LimitExceeded {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_limits() {
        let limits = ConvertLimits::none();
        assert!(!limits.has_any());
        assert!(limits.check_shape(100_000, 100_000, 4, 8).is_ok());
    }

    #[test]
    fn builder_sets_limits() {
        let limits = ConvertLimits::none()
            .with_max_rows(480)
            .with_max_memory(1024);
        assert!(limits.has_any());
        assert_eq!(limits.max_rows, Some(480));
        assert_eq!(limits.max_memory_bytes, Some(1024));
        assert!(limits.max_cols.is_none());
    }

    #[test]
    fn rows_and_cols_exceeded() {
        let limits = ConvertLimits::none().with_max_rows(480).with_max_cols(640);
        assert!(limits.check_shape(480, 640, 3, 1).is_ok());
        assert_eq!(
            limits.check_shape(481, 640, 3, 1).unwrap_err(),
            LimitExceeded::Rows {
                actual: 481,
                max: 480
            }
        );
        assert_eq!(
            limits.check_shape(480, 641, 3, 1).unwrap_err(),
            LimitExceeded::Cols {
                actual: 641,
                max: 640
            }
        );
    }

    #[test]
    fn elements_count_channels() {
        let limits = ConvertLimits::none().with_max_elements(300);
        assert!(limits.check_shape(10, 10, 3, 1).is_ok());
        assert_eq!(
            limits.check_shape(10, 10, 4, 1).unwrap_err(),
            LimitExceeded::Elements {
                actual: 400,
                max: 300
            }
        );
    }

    #[test]
    fn memory_scales_with_element_size() {
        let limits = ConvertLimits::none().with_max_memory(800);
        assert!(limits.check_shape(10, 10, 1, 8).is_ok());
        let err = limits.check_shape(10, 10, 1, 16).unwrap_err();
        assert!(matches!(err, LimitExceeded::Memory { actual: 1600, .. }));
    }

    #[test]
    fn display() {
        use alloc::format;
        let err = LimitExceeded::Cols {
            actual: 5000,
            max: 4096,
        };
        assert_eq!(format!("{err}"), "cols 5000 exceeds limit 4096");
        let err = LimitExceeded::Memory {
            actual: 2048,
            max: 1024,
        };
        assert_eq!(format!("{err}"), "memory 2048 bytes exceeds limit 1024");
    }
}
