//! Column-major host array model.
//!
//! [`MxArray`] is an owned numeric array laid out the way the host stores
//! it: column-major, with the third axis (channel) varying slowest.
//! [`MxArrayRef`] is the borrowed counterpart for buffers owned elsewhere.
//! Both implement [`NumericArray`], which is all the converters read.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::class::{ClassId, Element};
use crate::error::LayoutError;

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Owned numeric storage, tagged by class.
#[derive(Clone, PartialEq)]
#[non_exhaustive]
pub enum MxData {
    Int8(Vec<i8>),
    UInt8(Vec<u8>),
    Int16(Vec<i16>),
    UInt16(Vec<u16>),
    Int32(Vec<i32>),
    UInt32(Vec<u32>),
    Int64(Vec<i64>),
    UInt64(Vec<u64>),
    Single(Vec<f32>),
    Double(Vec<f64>),
}

/// Borrowed numeric storage, tagged by class.
#[derive(Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum MxSlice<'a> {
    Int8(&'a [i8]),
    UInt8(&'a [u8]),
    Int16(&'a [i16]),
    UInt16(&'a [u16]),
    Int32(&'a [i32]),
    UInt32(&'a [u32]),
    Int64(&'a [i64]),
    UInt64(&'a [u64]),
    Single(&'a [f32]),
    Double(&'a [f64]),
}

macro_rules! for_each_variant {
    ($value:expr, $ty:ident, $v:ident => $body:expr) => {
        match $value {
            $ty::Int8($v) => $body,
            $ty::UInt8($v) => $body,
            $ty::Int16($v) => $body,
            $ty::UInt16($v) => $body,
            $ty::Int32($v) => $body,
            $ty::UInt32($v) => $body,
            $ty::Int64($v) => $body,
            $ty::UInt64($v) => $body,
            $ty::Single($v) => $body,
            $ty::Double($v) => $body,
        }
    };
}

impl MxData {
    /// Zero-filled storage of `len` elements.
    ///
    /// Returns `None` for classes without numeric storage.
    pub fn zeros(class: ClassId, len: usize) -> Option<Self> {
        Some(match class {
            ClassId::Int8 => Self::Int8(vec![0; len]),
            ClassId::UInt8 => Self::UInt8(vec![0; len]),
            ClassId::Int16 => Self::Int16(vec![0; len]),
            ClassId::UInt16 => Self::UInt16(vec![0; len]),
            ClassId::Int32 => Self::Int32(vec![0; len]),
            ClassId::UInt32 => Self::UInt32(vec![0; len]),
            ClassId::Int64 => Self::Int64(vec![0; len]),
            ClassId::UInt64 => Self::UInt64(vec![0; len]),
            ClassId::Single => Self::Single(vec![0.0; len]),
            ClassId::Double => Self::Double(vec![0.0; len]),
            _ => return None,
        })
    }

    /// Class tag of the stored elements.
    pub fn class_id(&self) -> ClassId {
        self.as_slice().class_id()
    }

    /// Number of stored elements.
    pub fn len(&self) -> usize {
        for_each_variant!(self, MxData, v => v.len())
    }

    /// Whether no elements are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the storage.
    pub fn as_slice(&self) -> MxSlice<'_> {
        match self {
            Self::Int8(v) => MxSlice::Int8(v),
            Self::UInt8(v) => MxSlice::UInt8(v),
            Self::Int16(v) => MxSlice::Int16(v),
            Self::UInt16(v) => MxSlice::UInt16(v),
            Self::Int32(v) => MxSlice::Int32(v),
            Self::UInt32(v) => MxSlice::UInt32(v),
            Self::Int64(v) => MxSlice::Int64(v),
            Self::UInt64(v) => MxSlice::UInt64(v),
            Self::Single(v) => MxSlice::Single(v),
            Self::Double(v) => MxSlice::Double(v),
        }
    }
}

impl<'a> MxSlice<'a> {
    /// Class tag of the borrowed elements.
    pub fn class_id(&self) -> ClassId {
        match self {
            Self::Int8(_) => ClassId::Int8,
            Self::UInt8(_) => ClassId::UInt8,
            Self::Int16(_) => ClassId::Int16,
            Self::UInt16(_) => ClassId::UInt16,
            Self::Int32(_) => ClassId::Int32,
            Self::UInt32(_) => ClassId::UInt32,
            Self::Int64(_) => ClassId::Int64,
            Self::UInt64(_) => ClassId::UInt64,
            Self::Single(_) => ClassId::Single,
            Self::Double(_) => ClassId::Double,
        }
    }

    /// Number of borrowed elements.
    pub fn len(&self) -> usize {
        for_each_variant!(self, MxSlice, v => v.len())
    }

    /// Whether no elements are borrowed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Typed elements, if `T` matches the stored class.
    #[inline]
    pub fn typed<T: Element>(self) -> Option<&'a [T]> {
        T::from_slice(self)
    }
}

macro_rules! impl_from_slice {
    ($($ty:ty => $class:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a [$ty]> for MxSlice<'a> {
                #[inline]
                fn from(s: &'a [$ty]) -> Self {
                    MxSlice::$class(s)
                }
            }

            impl From<Vec<$ty>> for MxData {
                #[inline]
                fn from(v: Vec<$ty>) -> Self {
                    MxData::$class(v)
                }
            }
        )*
    };
}

impl_from_slice! {
    i8 => Int8,
    u8 => UInt8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Single,
    f64 => Double,
}

impl fmt::Debug for MxData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MxData::{:?}({} elements)", self.class_id(), self.len())
    }
}

impl fmt::Debug for MxSlice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MxSlice::{:?}({} elements)", self.class_id(), self.len())
    }
}

// ---------------------------------------------------------------------------
// NumericArray
// ---------------------------------------------------------------------------

/// Read access to a column-major numeric array.
pub trait NumericArray {
    /// Declared element class.
    fn class_id(&self) -> ClassId;

    /// Dimension extents, at least two.
    fn dims(&self) -> &[usize];

    /// Flat column-major storage.
    fn data(&self) -> MxSlice<'_>;

    /// Number of dimensions.
    #[inline]
    fn ndims(&self) -> usize {
        self.dims().len()
    }

    /// First extent.
    #[inline]
    fn rows(&self) -> usize {
        self.dims().first().copied().unwrap_or(0)
    }

    /// Second extent.
    #[inline]
    fn cols(&self) -> usize {
        self.dims().get(1).copied().unwrap_or(0)
    }

    /// Third extent, or 1 for a 2-D array.
    #[inline]
    fn channels(&self) -> usize {
        self.dims().get(2).copied().unwrap_or(1)
    }

    /// Total number of elements, saturating at `usize::MAX`.
    #[inline]
    fn numel(&self) -> usize {
        element_count(self.dims()).unwrap_or(usize::MAX)
    }
}

/// Product of the extents.
fn element_count(dims: &[usize]) -> Result<usize, LayoutError> {
    dims.iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or(LayoutError::InvalidDimensions)
}

/// Check extents and strip trailing singletons past the second dimension.
fn normalize_dims(dims: &[usize], len: usize) -> Result<Vec<usize>, LayoutError> {
    if dims.len() < 2 {
        return Err(LayoutError::DimensionCount { actual: dims.len() });
    }
    let mut dims = dims.to_vec();
    while dims.len() > 2 && dims.last() == Some(&1) {
        dims.pop();
    }
    let expected = element_count(&dims)?;
    if expected != len {
        return Err(LayoutError::DataLength {
            expected,
            actual: len,
        });
    }
    Ok(dims)
}

// ---------------------------------------------------------------------------
// MxArray (owned)
// ---------------------------------------------------------------------------

/// Owned column-major numeric array.
///
/// Trailing singleton dimensions past the second are dropped on creation,
/// so a `2x3x1` array reports two dimensions.
///
/// ```
/// use zenmx::{ClassId, MxArray, NumericArray};
///
/// // [1 2; 3 4] stored column by column.
/// let a = MxArray::from_vec(&[2, 2], vec![1u16, 3, 2, 4]).unwrap();
/// assert_eq!(a.class_id(), ClassId::UInt16);
/// assert_eq!(a.get::<u16>(0, 1, 0), Some(2));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MxArray {
    dims: Vec<usize>,
    data: MxData,
}

impl MxArray {
    /// Create an array from extents and column-major storage.
    ///
    /// # Errors
    ///
    /// Fails if fewer than two extents are given, or if the storage length
    /// does not equal the product of the extents.
    pub fn new(dims: &[usize], data: MxData) -> Result<Self, LayoutError> {
        let dims = normalize_dims(dims, data.len())?;
        Ok(Self { dims, data })
    }

    /// Create an array from a typed column-major buffer.
    pub fn from_vec<T>(dims: &[usize], data: Vec<T>) -> Result<Self, LayoutError>
    where
        MxData: From<Vec<T>>,
    {
        Self::new(dims, MxData::from(data))
    }

    /// Allocate a zero-filled numeric array.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnsupportedClass`] for non-numeric classes, and the
    /// same shape errors as [`new`](MxArray::new).
    pub fn zeros(dims: &[usize], class: ClassId) -> Result<Self, LayoutError> {
        let len = element_count(dims)?;
        let data = MxData::zeros(class, len).ok_or(LayoutError::UnsupportedClass(class))?;
        Self::new(dims, data)
    }

    /// Borrow as an [`MxArrayRef`].
    pub fn as_ref(&self) -> MxArrayRef<'_> {
        MxArrayRef {
            dims: &self.dims,
            data: self.data.as_slice(),
        }
    }

    /// Typed storage, if `T` matches the array class.
    pub fn typed<T: Element>(&self) -> Option<&[T]> {
        T::from_slice(self.data.as_slice())
    }

    /// Element at `(row, col, channel)`.
    ///
    /// Returns `None` if out of bounds or if `T` does not match the class.
    pub fn get<T: Element>(&self, row: usize, col: usize, channel: usize) -> Option<T> {
        if row >= self.rows() || col >= self.cols() || channel >= self.channels() {
            return None;
        }
        let idx = (channel * self.cols() + col) * self.rows() + row;
        self.typed::<T>()?.get(idx).copied()
    }

    /// Take ownership of the storage.
    pub fn into_data(self) -> MxData {
        self.data
    }
}

impl NumericArray for MxArray {
    #[inline]
    fn class_id(&self) -> ClassId {
        self.data.class_id()
    }

    #[inline]
    fn dims(&self) -> &[usize] {
        &self.dims
    }

    #[inline]
    fn data(&self) -> MxSlice<'_> {
        self.data.as_slice()
    }
}

// ---------------------------------------------------------------------------
// MxArrayRef (borrowed)
// ---------------------------------------------------------------------------

/// Borrowed view of a column-major array owned elsewhere.
///
/// Extents are taken as given: unlike [`MxArray`], trailing singletons are
/// kept in [`dims`](NumericArray::dims). The converters ignore any number of
/// trailing extents of 1 past the second, so `[r, c, n, 1]` converts like
/// `[r, c, n]`.
#[derive(Clone, Copy, Debug)]
pub struct MxArrayRef<'a> {
    dims: &'a [usize],
    data: MxSlice<'a>,
}

impl<'a> MxArrayRef<'a> {
    /// Create a view with validation.
    ///
    /// # Errors
    ///
    /// Fails if fewer than two extents are given, or if the storage length
    /// does not equal the product of the extents.
    pub fn new(dims: &'a [usize], data: impl Into<MxSlice<'a>>) -> Result<Self, LayoutError> {
        let data = data.into();
        if dims.len() < 2 {
            return Err(LayoutError::DimensionCount { actual: dims.len() });
        }
        let expected = element_count(dims)?;
        if expected != data.len() {
            return Err(LayoutError::DataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { dims, data })
    }

    /// Copy into an owned [`MxArray`].
    pub fn to_array(&self) -> Result<MxArray, LayoutError> {
        let data = match self.data {
            MxSlice::Int8(s) => MxData::Int8(s.to_vec()),
            MxSlice::UInt8(s) => MxData::UInt8(s.to_vec()),
            MxSlice::Int16(s) => MxData::Int16(s.to_vec()),
            MxSlice::UInt16(s) => MxData::UInt16(s.to_vec()),
            MxSlice::Int32(s) => MxData::Int32(s.to_vec()),
            MxSlice::UInt32(s) => MxData::UInt32(s.to_vec()),
            MxSlice::Int64(s) => MxData::Int64(s.to_vec()),
            MxSlice::UInt64(s) => MxData::UInt64(s.to_vec()),
            MxSlice::Single(s) => MxData::Single(s.to_vec()),
            MxSlice::Double(s) => MxData::Double(s.to_vec()),
        };
        MxArray::new(self.dims, data)
    }
}

impl NumericArray for MxArrayRef<'_> {
    #[inline]
    fn class_id(&self) -> ClassId {
        self.data.class_id()
    }

    #[inline]
    fn dims(&self) -> &[usize] {
        self.dims
    }

    #[inline]
    fn data(&self) -> MxSlice<'_> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_validates_length() {
        let err = MxArray::from_vec(&[2, 2], vec![1u8, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            LayoutError::DataLength {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn new_requires_two_dims() {
        let err = MxArray::from_vec(&[4], vec![1u8, 2, 3, 4]).unwrap_err();
        assert_eq!(err, LayoutError::DimensionCount { actual: 1 });
    }

    #[test]
    fn trailing_singletons_dropped() {
        let a = MxArray::from_vec(&[2, 3, 1, 1], vec![0f64; 6]).unwrap();
        assert_eq!(a.dims(), &[2, 3]);
        assert_eq!(a.ndims(), 2);
        assert_eq!(a.channels(), 1);

        // A leading singleton is meaningful and stays.
        let a = MxArray::from_vec(&[1, 1], vec![5i32]).unwrap();
        assert_eq!(a.dims(), &[1, 1]);
    }

    #[test]
    fn extents() {
        let a = MxArray::from_vec(&[2, 3, 4], vec![0u8; 24]).unwrap();
        assert_eq!((a.rows(), a.cols(), a.channels()), (2, 3, 4));
        assert_eq!(a.numel(), 24);

        let view = a.as_ref();
        assert_eq!(view.dims(), a.dims());
        assert_eq!(view.class_id(), ClassId::UInt8);
        assert_eq!(a.into_data().len(), 24);
    }

    #[test]
    fn zeros_for_every_numeric_class() {
        for class in [
            ClassId::Int8,
            ClassId::UInt8,
            ClassId::Int16,
            ClassId::UInt16,
            ClassId::Int32,
            ClassId::UInt32,
            ClassId::Int64,
            ClassId::UInt64,
            ClassId::Single,
            ClassId::Double,
        ] {
            let a = MxArray::zeros(&[3, 2], class).unwrap();
            assert_eq!(a.class_id(), class);
            assert_eq!(a.numel(), 6);
        }
    }

    #[test]
    fn zeros_rejects_non_numeric() {
        let err = MxArray::zeros(&[1, 1], ClassId::Cell).unwrap_err();
        assert_eq!(err, LayoutError::UnsupportedClass(ClassId::Cell));
    }

    #[test]
    fn zeros_rejects_overflow() {
        let err = MxArray::zeros(&[usize::MAX, 2], ClassId::UInt8).unwrap_err();
        assert_eq!(err, LayoutError::InvalidDimensions);
    }

    #[test]
    fn get_is_column_major() {
        // [1 2; 3 4]
        let a = MxArray::from_vec(&[2, 2], vec![1u16, 3, 2, 4]).unwrap();
        assert_eq!(a.get::<u16>(0, 0, 0), Some(1));
        assert_eq!(a.get::<u16>(0, 1, 0), Some(2));
        assert_eq!(a.get::<u16>(1, 0, 0), Some(3));
        assert_eq!(a.get::<u16>(1, 1, 0), Some(4));
        assert_eq!(a.get::<u16>(2, 0, 0), None);
        assert_eq!(a.get::<u8>(0, 0, 0), None);
    }

    #[test]
    fn view_roundtrip() {
        let dims = [2, 2, 1];
        let buf = [1.5f32, 2.5, 3.5, 4.5];
        let view = MxArrayRef::new(&dims, &buf[..]).unwrap();
        assert_eq!(view.class_id(), ClassId::Single);
        assert_eq!(view.ndims(), 3);
        assert_eq!(view.data().typed::<f32>(), Some(&buf[..]));

        let owned = view.to_array().unwrap();
        assert_eq!(owned.dims(), &[2, 2]);
        assert_eq!(owned.typed::<f32>(), Some(&buf[..]));
    }

    #[test]
    fn view_validates_length() {
        let dims = [3, 3];
        let buf = [0u8; 8];
        let err = MxArrayRef::new(&dims, &buf[..]).unwrap_err();
        assert!(matches!(err, LayoutError::DataLength { expected: 9, .. }));
    }

    struct Huge;

    impl NumericArray for Huge {
        fn class_id(&self) -> ClassId {
            ClassId::UInt8
        }

        fn dims(&self) -> &[usize] {
            &[usize::MAX, 3]
        }

        fn data(&self) -> MxSlice<'_> {
            MxSlice::UInt8(&[])
        }
    }

    #[test]
    fn numel_saturates_on_overflow() {
        assert_eq!(Huge.numel(), usize::MAX);
    }

    #[test]
    fn empty_storage() {
        let d = MxData::from(Vec::<u16>::new());
        assert!(d.is_empty());
        assert!(d.as_slice().is_empty());
        assert!(!MxData::from(vec![1u8]).is_empty());
    }

    #[test]
    fn data_debug() {
        let d = MxData::from(vec![1i16, 2, 3]);
        assert_eq!(alloc::format!("{d:?}"), "MxData::Int16(3 elements)");
    }
}
