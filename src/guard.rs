//! Element class checks.
//!
//! [`check_class`] is the recoverable form. [`check_class_or_exit`] keeps the
//! fail-fast contract of native extensions: a class mismatch means the caller
//! picked the wrong element type, and the process stops before any buffer is
//! reinterpreted.

use crate::array::NumericArray;
use crate::class::Element;
use crate::error::LayoutError;

/// Check that `array` declares the class of `T`.
///
/// ```
/// use zenmx::{LayoutError, MxArray, check_class};
///
/// let a = MxArray::from_vec(&[1, 2], vec![1.0f32, 2.0]).unwrap();
/// assert!(check_class::<f32>(&a).is_ok());
/// assert!(matches!(check_class::<f64>(&a), Err(LayoutError::ClassMismatch { .. })));
/// ```
pub fn check_class<T: Element>(array: &(impl NumericArray + ?Sized)) -> Result<(), LayoutError> {
    let actual = array.class_id();
    if actual != T::CLASS {
        log::warn!("class check failed: expected {}, found {}", T::CLASS, actual);
        return Err(LayoutError::ClassMismatch {
            expected: T::CLASS,
            actual,
        });
    }
    Ok(())
}

/// Exit status used when [`check_class_or_exit`] terminates the process.
#[cfg(feature = "std")]
pub const CLASS_MISMATCH_EXIT_CODE: i32 = 1;

/// Check that `array` declares the class of `T`, terminating the process if not.
///
/// On mismatch a diagnostic is written to stderr and the process exits with
/// [`CLASS_MISMATCH_EXIT_CODE`]. Returns normally only when the classes match.
#[cfg(feature = "std")]
pub fn check_class_or_exit<T: Element>(array: &(impl NumericArray + ?Sized)) {
    if let Err(LayoutError::ClassMismatch { expected, actual }) = check_class::<T>(array) {
        std::eprintln!(
            "type of input matrix does not match with template type (expected {expected}, found {actual})"
        );
        std::process::exit(CLASS_MISMATCH_EXIT_CODE);
    }
}
