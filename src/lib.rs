//! Layout exchange between MATLAB-style numeric arrays and row-major
//! multi-channel matrices.
//!
//! Host arrays are column-major with planar channels (`X(row, col, ch)`,
//! row varying fastest). Vision libraries store images row-major with each
//! pixel's channels side by side. This crate copies between the two,
//! value for value:
//!
//! - [`array_to_image`] / [`image_to_array`]: the two conversions
//! - [`MxArray`] / [`MxArrayRef`] / [`NumericArray`]: the host array model
//! - [`Element`] / [`ClassId`]: scalar type to host class mapping
//! - [`check_class`] / [`check_class_or_exit`]: element class checks
//! - [`MatType`]: packed depth and channel type codes
//! - [`ConvertLimits`]: caps on conversion size
//! - [`pixels`]: `rgb` pixel views of converted images
//!
//! Images are `imgref` buffers of `[T; N]` pixels.

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod array;
mod class;
mod convert;
mod error;
mod guard;
mod limits;
pub mod pixels;

pub use array::{MxArray, MxArrayRef, MxData, MxSlice, NumericArray};
pub use class::{ClassId, Element, MAX_CHANNELS, MatDepth, MatType};
pub use convert::{
    array_to_image, array_to_image_with_limits, image_to_array, image_to_array_with_limits,
};
pub use error::LayoutError;
pub use guard::check_class;
#[cfg(feature = "std")]
pub use guard::{CLASS_MISMATCH_EXIT_CODE, check_class_or_exit};
pub use limits::{ConvertLimits, LimitExceeded};

// Re-exports for callers building images.
pub use imgref::{Img, ImgRef, ImgVec};
pub use rgb;
