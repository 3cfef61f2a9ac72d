//! Layout conversion between host arrays and row-major images.
//!
//! A host array is column-major with planar channels: memory order is
//! channel (slowest), column, row (fastest). An image is row-major with
//! interleaved channels: each pixel is a `[T; N]`. Converting in either
//! direction is a full copy; both routines walk the host buffer in its
//! physical order (channel, then column, then row), so host reads or writes
//! are sequential and image accesses are strided.
//!
//! ```
//! use zenmx::{MxArray, NumericArray, array_to_image, image_to_array};
//!
//! // X(:,:,1) = X(:,:,2) = single([1 2; 3 4])
//! let x = MxArray::from_vec(&[2, 2, 2], vec![1.0f32, 3.0, 2.0, 4.0, 1.0, 3.0, 2.0, 4.0]).unwrap();
//! let img = array_to_image::<f32, 2>(&x).unwrap();
//! assert_eq!(img.buf()[1], [2.0, 2.0]); // row 0, col 1
//!
//! let back = image_to_array(img.as_ref()).unwrap();
//! assert_eq!(back.dims(), &[2, 2, 2]);
//! assert_eq!(back, x);
//! ```

use alloc::vec;
use alloc::vec::Vec;

use imgref::{ImgRef, ImgVec};

use crate::array::{MxArray, NumericArray};
use crate::class::{Element, MAX_CHANNELS};
use crate::error::LayoutError;
use crate::guard::check_class;
use crate::limits::ConvertLimits;

/// Validated `rows × cols` extents of a host array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Extents {
    rows: usize,
    cols: usize,
}

const fn assert_channels<const N: usize>() {
    assert!(N >= 1 && N <= MAX_CHANNELS, "channel count must be 1..=512");
}

/// Validate class, dimensionality, channel extent and length for `[T; N]`.
fn validate<T: Element, const N: usize>(
    src: &(impl NumericArray + ?Sized),
    limits: &ConvertLimits,
) -> Result<Extents, LayoutError> {
    check_class::<T>(src)?;
    let mut dims = src.dims();
    while dims.len() > 2 && dims.last() == Some(&1) {
        dims = &dims[..dims.len() - 1];
    }
    let channels = match dims.len() {
        2 => 1,
        3 => dims[2],
        actual => return Err(LayoutError::DimensionCount { actual }),
    };
    if channels != N {
        return Err(LayoutError::ChannelMismatch {
            expected: N,
            actual: channels,
        });
    }
    let (rows, cols) = (dims[0], dims[1]);
    // imgref needs a nonzero stride and u32 extents.
    if cols == 0 || u32::try_from(cols).is_err() || u32::try_from(rows).is_err() {
        return Err(LayoutError::InvalidDimensions);
    }
    let expected = rows
        .checked_mul(cols)
        .and_then(|n| n.checked_mul(N))
        .ok_or(LayoutError::InvalidDimensions)?;
    let actual = src.data().len();
    if actual != expected {
        return Err(LayoutError::DataLength { expected, actual });
    }
    limits.check_shape(rows, cols, N, size_of::<T>())?;
    Ok(Extents { rows, cols })
}

/// Convert a host array to a row-major image with `N` channels per pixel.
///
/// The array must declare the class of `T` and have 2 dimensions (`N == 1`)
/// or 3 dimensions with a third extent of `N`. Trailing extents of 1 past the
/// second are ignored. A `0 x cols` array gives an image of height 0. Zero
/// columns cannot be represented as an image and are rejected.
///
/// # Errors
///
/// [`LayoutError::ClassMismatch`], [`LayoutError::DimensionCount`],
/// [`LayoutError::ChannelMismatch`], [`LayoutError::InvalidDimensions`] or
/// [`LayoutError::DataLength`] when the array does not fit `[T; N]`.
pub fn array_to_image<T: Element, const N: usize>(
    src: &(impl NumericArray + ?Sized),
) -> Result<ImgVec<[T; N]>, LayoutError> {
    array_to_image_with_limits(src, &ConvertLimits::none())
}

/// [`array_to_image`] with resource limits checked before allocation.
pub fn array_to_image_with_limits<T: Element, const N: usize>(
    src: &(impl NumericArray + ?Sized),
    limits: &ConvertLimits,
) -> Result<ImgVec<[T; N]>, LayoutError> {
    const { assert_channels::<N>() };
    let Extents { rows, cols } = validate::<T, N>(src, limits)?;
    let data = src
        .data()
        .typed::<T>()
        .ok_or(LayoutError::ClassMismatch {
            expected: T::CLASS,
            actual: src.class_id(),
        })?;
    log::debug!("array to image: {rows}x{cols}x{N} {}", T::CLASS);
    if rows == 0 {
        return Ok(ImgVec::new(Vec::new(), cols, 0));
    }

    let mut pixels = vec![[T::default(); N]; rows * cols];
    for (ch, plane) in data.chunks_exact(rows * cols).enumerate() {
        for (col, column) in plane.chunks_exact(rows).enumerate() {
            for (row, &value) in column.iter().enumerate() {
                pixels[row * cols + col][ch] = value;
            }
        }
    }
    Ok(ImgVec::new(pixels, cols, rows))
}

/// Convert a row-major image to a newly allocated host array.
///
/// The result has extents `[rows, cols]` when `N == 1` and
/// `[rows, cols, N]` otherwise, with the class of `T`. Strided images
/// (sub-views) are read through their stride.
///
/// # Errors
///
/// [`LayoutError::Limit`] when a limit is exceeded, or
/// [`LayoutError::InvalidDimensions`] if the element count overflows.
/// An image of height 0 gives a `0 x cols` array.
pub fn image_to_array<T: Element, const N: usize>(
    img: ImgRef<'_, [T; N]>,
) -> Result<MxArray, LayoutError> {
    image_to_array_with_limits(img, &ConvertLimits::none())
}

/// [`image_to_array`] with resource limits checked before allocation.
pub fn image_to_array_with_limits<T: Element, const N: usize>(
    img: ImgRef<'_, [T; N]>,
    limits: &ConvertLimits,
) -> Result<MxArray, LayoutError> {
    const { assert_channels::<N>() };
    let (rows, cols, stride) = (img.height(), img.width(), img.stride());
    limits.check_shape(rows, cols, N, size_of::<T>())?;
    let len = rows
        .checked_mul(cols)
        .and_then(|n| n.checked_mul(N))
        .ok_or(LayoutError::InvalidDimensions)?;
    log::debug!("image to array: {rows}x{cols}x{N} {}", T::CLASS);

    let buf = img.buf();
    let mut out: Vec<T> = Vec::with_capacity(len);
    for ch in 0..N {
        for col in 0..cols {
            for row in 0..rows {
                out.push(buf[row * stride + col][ch]);
            }
        }
    }

    let dims: &[usize] = if N > 1 {
        &[rows, cols, N]
    } else {
        &[rows, cols]
    };
    MxArray::new(dims, T::into_data(out))
}
