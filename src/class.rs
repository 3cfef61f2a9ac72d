//! Element classes and the scalar type map.
//!
//! [`ClassId`] mirrors the host's runtime class tag. [`Element`] is the
//! compile-time side: it is implemented for exactly the seven scalar types
//! that can cross the boundary, so asking for the class of any other type
//! fails to compile.
//!
//! ```compile_fail
//! use zenmx::Element;
//! // uint32 is not a convertible class.
//! let _ = <u32 as Element>::CLASS;
//! ```
//!
//! ```compile_fail
//! use zenmx::Element;
//! let _ = <i64 as Element>::CLASS;
//! ```
//!
//! ```compile_fail
//! use zenmx::Element;
//! let _ = <u64 as Element>::CLASS;
//! ```

use alloc::vec::Vec;
use core::fmt;

use crate::array::{MxData, MxSlice};

/// Runtime element class of a host array.
///
/// Discriminants match the host's numeric class codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum ClassId {
    /// Unrecognised or unset class.
    Unknown = 0,
    Cell = 1,
    Struct = 2,
    Logical = 3,
    Char = 4,
    Void = 5,
    /// 64-bit float.
    Double = 6,
    /// 32-bit float.
    Single = 7,
    Int8 = 8,
    UInt8 = 9,
    Int16 = 10,
    UInt16 = 11,
    Int32 = 12,
    UInt32 = 13,
    Int64 = 14,
    UInt64 = 15,
    Function = 16,
}

impl ClassId {
    /// Map a raw class code to a [`ClassId`].
    ///
    /// Returns [`Unknown`](ClassId::Unknown) for unrecognised codes.
    pub const fn from_code(code: u32) -> Self {
        match code {
            1 => Self::Cell,
            2 => Self::Struct,
            3 => Self::Logical,
            4 => Self::Char,
            5 => Self::Void,
            6 => Self::Double,
            7 => Self::Single,
            8 => Self::Int8,
            9 => Self::UInt8,
            10 => Self::Int16,
            11 => Self::UInt16,
            12 => Self::Int32,
            13 => Self::UInt32,
            14 => Self::Int64,
            15 => Self::UInt64,
            16 => Self::Function,
            _ => Self::Unknown,
        }
    }

    /// Raw class code.
    #[inline]
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Host-side class name, as printed by `class(x)`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Cell => "cell",
            Self::Struct => "struct",
            Self::Logical => "logical",
            Self::Char => "char",
            Self::Void => "void",
            Self::Double => "double",
            Self::Single => "single",
            Self::Int8 => "int8",
            Self::UInt8 => "uint8",
            Self::Int16 => "int16",
            Self::UInt16 => "uint16",
            Self::Int32 => "int32",
            Self::UInt32 => "uint32",
            Self::Int64 => "int64",
            Self::UInt64 => "uint64",
            Self::Function => "function_handle",
        }
    }

    /// Whether arrays of this class hold plain numeric storage.
    #[inline]
    pub const fn is_numeric(self) -> bool {
        self.element_size().is_some()
    }

    /// Whether an [`Element`] type exists for this class.
    ///
    /// `uint32`, `int64` and `uint64` are numeric but not convertible.
    #[inline]
    pub const fn is_convertible(self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::UInt8
                | Self::Int16
                | Self::UInt16
                | Self::Int32
                | Self::Single
                | Self::Double
        )
    }

    /// Byte size of one element, or `None` for non-numeric classes.
    pub const fn element_size(self) -> Option<usize> {
        match self {
            Self::Int8 | Self::UInt8 => Some(1),
            Self::Int16 | Self::UInt16 => Some(2),
            Self::Int32 | Self::UInt32 | Self::Single => Some(4),
            Self::Int64 | Self::UInt64 | Self::Double => Some(8),
            _ => None,
        }
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

mod sealed {
    pub trait Sealed {}
}

/// A scalar type that can be exchanged with the host.
///
/// Sealed: implemented for `i8`, `u8`, `i16`, `u16`, `i32`, `f32` and `f64`.
pub trait Element:
    Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static + sealed::Sealed
{
    /// Host class tag for this scalar.
    const CLASS: ClassId;
    /// Matrix depth code for this scalar.
    const DEPTH: MatDepth;

    /// Borrow typed elements out of host storage, if the class matches.
    fn from_slice(data: MxSlice<'_>) -> Option<&[Self]>;

    /// Wrap a column-major buffer as host storage.
    fn into_data(buf: Vec<Self>) -> MxData;
}

macro_rules! impl_element {
    ($($ty:ty => $class:ident, $depth:ident;)*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Element for $ty {
                const CLASS: ClassId = ClassId::$class;
                const DEPTH: MatDepth = MatDepth::$depth;

                #[inline]
                fn from_slice(data: MxSlice<'_>) -> Option<&[Self]> {
                    match data {
                        MxSlice::$class(s) => Some(s),
                        _ => None,
                    }
                }

                #[inline]
                fn into_data(buf: Vec<Self>) -> MxData {
                    MxData::$class(buf)
                }
            }
        )*
    };
}

impl_element! {
    i8 => Int8, S8;
    u8 => UInt8, U8;
    i16 => Int16, S16;
    u16 => UInt16, U16;
    i32 => Int32, S32;
    f32 => Single, F32;
    f64 => Double, F64;
}

// ---------------------------------------------------------------------------
// Matrix type codes
// ---------------------------------------------------------------------------

/// Maximum channel count of a matrix type code.
pub const MAX_CHANNELS: usize = 512;

const CHANNEL_SHIFT: u32 = 3;

/// Per-channel depth of a row-major matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MatDepth {
    U8 = 0,
    S8 = 1,
    U16 = 2,
    S16 = 3,
    S32 = 4,
    F32 = 5,
    F64 = 6,
}

impl MatDepth {
    /// Depth suffix used in type names, e.g. `"32F"`.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::U8 => "8U",
            Self::S8 => "8S",
            Self::U16 => "16U",
            Self::S16 => "16S",
            Self::S32 => "32S",
            Self::F32 => "32F",
            Self::F64 => "64F",
        }
    }

    /// Host class holding the same scalar.
    pub const fn class(self) -> ClassId {
        match self {
            Self::U8 => ClassId::UInt8,
            Self::S8 => ClassId::Int8,
            Self::U16 => ClassId::UInt16,
            Self::S16 => ClassId::Int16,
            Self::S32 => ClassId::Int32,
            Self::F32 => ClassId::Single,
            Self::F64 => ClassId::Double,
        }
    }
}

/// Combined depth and channel count, packed as `depth + ((channels - 1) << 3)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MatType {
    depth: MatDepth,
    channels: u16,
}

impl MatType {
    /// Create a type code. Returns `None` unless `1 <= channels <= 512`.
    pub const fn new(depth: MatDepth, channels: usize) -> Option<Self> {
        if channels == 0 || channels > MAX_CHANNELS {
            return None;
        }
        Some(Self {
            depth,
            channels: channels as u16,
        })
    }

    /// Type code for scalar `T` with `channels` channels.
    pub const fn of<T: Element>(channels: usize) -> Option<Self> {
        Self::new(T::DEPTH, channels)
    }

    /// Unpack a raw type code.
    pub const fn from_code(code: i32) -> Option<Self> {
        if code < 0 {
            return None;
        }
        let depth = match code & ((1 << CHANNEL_SHIFT) - 1) {
            0 => MatDepth::U8,
            1 => MatDepth::S8,
            2 => MatDepth::U16,
            3 => MatDepth::S16,
            4 => MatDepth::S32,
            5 => MatDepth::F32,
            6 => MatDepth::F64,
            _ => return None,
        };
        Self::new(depth, (code >> CHANNEL_SHIFT) as usize + 1)
    }

    #[inline]
    pub const fn depth(self) -> MatDepth {
        self.depth
    }

    #[inline]
    pub const fn channels(self) -> usize {
        self.channels as usize
    }

    /// Packed type code.
    #[inline]
    pub const fn code(self) -> i32 {
        self.depth as i32 + ((self.channels as i32 - 1) << CHANNEL_SHIFT)
    }
}

impl fmt::Display for MatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CV_{}C{}", self.depth.suffix(), self.channels)
    }
}
