//! Element type tags and the numeric trait hierarchy.
//!
//! Every value storable in an array carries a [`DType`] tag from a closed
//! set of scalar kinds. The trait hierarchy is:
//! ```text
//! Element            (storable: bool + all numeric kinds)
//!   └── Scalar       (arithmetic)
//!         ├── Integer
//!         └── Float
//!               └── Real  (f32, f64)
//! ```
//!
//! All array operations are generic over these traits, so the same code
//! path serves `f64` images and `u16` sensor frames alike. The untyped
//! [`ArrayCore`](crate::array::ArrayCore) stores a `DType`; the typed
//! front-ends check it at the boundary.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

// ---------------------------------------------------------------------------
// DType — the closed set of supported element kinds
// ---------------------------------------------------------------------------

/// Tag identifying one of the supported element kinds.
///
/// The set is closed: dispatch-by-type entry points match on this tag and
/// reject anything they do not handle, rather than falling back to open
/// runtime dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

impl DType {
    /// Size of one element of this kind, in bytes.
    pub const fn size_of(self) -> usize {
        match self {
            DType::Bool | DType::I8 | DType::U8 => 1,
            DType::I16 | DType::U16 => 2,
            DType::I32 | DType::U32 | DType::F32 => 4,
            DType::I64 | DType::U64 | DType::F64 => 8,
        }
    }

    /// Required pointer alignment for this kind, in bytes.
    pub const fn alignment(self) -> usize {
        self.size_of()
    }

    /// Whether this kind is a floating-point type.
    pub const fn is_float(self) -> bool {
        matches!(self, DType::F32 | DType::F64)
    }
}

// ---------------------------------------------------------------------------
// Element — the root trait for every storable type
// ---------------------------------------------------------------------------

/// Base trait for all types storable in an array.
///
/// This intentionally does *not* require arithmetic so that `bool` arrays
/// (comparison and classification results) remain first-class citizens.
pub trait Element:
    Copy + Clone + fmt::Debug + fmt::Display + PartialEq + PartialOrd + Default + 'static
{
    /// The tag for this element kind.
    const DTYPE: DType;
}

impl Element for bool {
    const DTYPE: DType = DType::Bool;
}

// ---------------------------------------------------------------------------
// Scalar — adds arithmetic
// ---------------------------------------------------------------------------

/// Trait for numeric element types supporting elementwise arithmetic.
pub trait Scalar:
    Element
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Sum
{
    /// The additive identity (`0`).
    fn zero() -> Self;

    /// The multiplicative identity (`1`).
    fn one() -> Self;

    /// Convert from `usize` (used for index / shape arithmetic).
    fn from_usize(v: usize) -> Self;
}

// ---------------------------------------------------------------------------
// Integer
// ---------------------------------------------------------------------------

/// Marker trait for integer scalar types.
pub trait Integer: Scalar {
    /// Remainder after division.
    fn rem(self, rhs: Self) -> Self;
}

// ---------------------------------------------------------------------------
// Float — operations that only make sense for floating-point numbers
// ---------------------------------------------------------------------------

/// Trait for floating-point scalar types (`f32`, `f64`).
pub trait Float: Scalar + Neg<Output = Self> {
    /// Mathematical constant pi.
    fn pi() -> Self;

    /// Machine epsilon.
    fn epsilon() -> Self;

    /// Positive infinity.
    fn infinity() -> Self;

    /// Negative infinity.
    fn neg_infinity() -> Self;

    /// Not-a-number.
    fn nan() -> Self;

    fn abs(self) -> Self;
    fn sqrt(self) -> Self;
    fn cbrt(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn asin(self) -> Self;
    fn acos(self) -> Self;
    fn atan(self) -> Self;
    fn atan2(self, other: Self) -> Self;
    fn sinh(self) -> Self;
    fn cosh(self) -> Self;
    fn tanh(self) -> Self;
    fn exp(self) -> Self;
    fn exp2(self) -> Self;
    fn ln(self) -> Self;
    fn log2(self) -> Self;
    fn log10(self) -> Self;
    fn powf(self, n: Self) -> Self;
    fn powi(self, n: i32) -> Self;
    fn hypot(self, other: Self) -> Self;
    fn floor(self) -> Self;
    fn ceil(self) -> Self;
    fn round(self) -> Self;
    fn trunc(self) -> Self;
    fn recip(self) -> Self;
    fn is_nan(self) -> bool;
    fn is_finite(self) -> bool;
    fn is_infinite(self) -> bool;
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;

    /// Fused multiply-add: `self * a + b` with a single rounding step.
    fn mul_add(self, a: Self, b: Self) -> Self;

    /// Convert from an `f64` literal (used for constants).
    fn from_f64(v: f64) -> Self;
}

/// Trait alias for real-valued floats (non-complex).
///
/// Currently identical to [`Float`]; exists so that future complex-number
/// support can distinguish `Float` (the full set) from `Real` (the reals).
pub trait Real: Float {}

// ===========================================================================
// Macro implementations
// ===========================================================================

macro_rules! impl_element {
    ($ty:ty, $tag:ident) => {
        impl Element for $ty {
            const DTYPE: DType = DType::$tag;
        }
    };
}

impl_element!(i8, I8);
impl_element!(i16, I16);
impl_element!(i32, I32);
impl_element!(i64, I64);
impl_element!(u8, U8);
impl_element!(u16, U16);
impl_element!(u32, U32);
impl_element!(u64, U64);
impl_element!(f32, F32);
impl_element!(f64, F64);

macro_rules! impl_scalar_float {
    ($ty:ty) => {
        impl Scalar for $ty {
            #[inline]
            fn zero() -> Self {
                0.0
            }
            #[inline]
            fn one() -> Self {
                1.0
            }
            #[inline]
            fn from_usize(v: usize) -> Self {
                v as Self
            }
        }

        impl Float for $ty {
            #[inline]
            fn pi() -> Self {
                Self::from_f64(std::f64::consts::PI)
            }
            #[inline]
            fn epsilon() -> Self {
                <$ty>::EPSILON
            }
            #[inline]
            fn infinity() -> Self {
                <$ty>::INFINITY
            }
            #[inline]
            fn neg_infinity() -> Self {
                <$ty>::NEG_INFINITY
            }
            #[inline]
            fn nan() -> Self {
                <$ty>::NAN
            }
            #[inline]
            fn abs(self) -> Self {
                <$ty>::abs(self)
            }
            #[inline]
            fn sqrt(self) -> Self {
                <$ty>::sqrt(self)
            }
            #[inline]
            fn cbrt(self) -> Self {
                <$ty>::cbrt(self)
            }
            #[inline]
            fn sin(self) -> Self {
                <$ty>::sin(self)
            }
            #[inline]
            fn cos(self) -> Self {
                <$ty>::cos(self)
            }
            #[inline]
            fn tan(self) -> Self {
                <$ty>::tan(self)
            }
            #[inline]
            fn asin(self) -> Self {
                <$ty>::asin(self)
            }
            #[inline]
            fn acos(self) -> Self {
                <$ty>::acos(self)
            }
            #[inline]
            fn atan(self) -> Self {
                <$ty>::atan(self)
            }
            #[inline]
            fn atan2(self, other: Self) -> Self {
                <$ty>::atan2(self, other)
            }
            #[inline]
            fn sinh(self) -> Self {
                <$ty>::sinh(self)
            }
            #[inline]
            fn cosh(self) -> Self {
                <$ty>::cosh(self)
            }
            #[inline]
            fn tanh(self) -> Self {
                <$ty>::tanh(self)
            }
            #[inline]
            fn exp(self) -> Self {
                <$ty>::exp(self)
            }
            #[inline]
            fn exp2(self) -> Self {
                <$ty>::exp2(self)
            }
            #[inline]
            fn ln(self) -> Self {
                <$ty>::ln(self)
            }
            #[inline]
            fn log2(self) -> Self {
                <$ty>::log2(self)
            }
            #[inline]
            fn log10(self) -> Self {
                <$ty>::log10(self)
            }
            #[inline]
            fn powf(self, n: Self) -> Self {
                <$ty>::powf(self, n)
            }
            #[inline]
            fn powi(self, n: i32) -> Self {
                <$ty>::powi(self, n)
            }
            #[inline]
            fn hypot(self, other: Self) -> Self {
                <$ty>::hypot(self, other)
            }
            #[inline]
            fn floor(self) -> Self {
                <$ty>::floor(self)
            }
            #[inline]
            fn ceil(self) -> Self {
                <$ty>::ceil(self)
            }
            #[inline]
            fn round(self) -> Self {
                <$ty>::round(self)
            }
            #[inline]
            fn trunc(self) -> Self {
                <$ty>::trunc(self)
            }
            #[inline]
            fn recip(self) -> Self {
                <$ty>::recip(self)
            }
            #[inline]
            fn is_nan(self) -> bool {
                <$ty>::is_nan(self)
            }
            #[inline]
            fn is_finite(self) -> bool {
                <$ty>::is_finite(self)
            }
            #[inline]
            fn is_infinite(self) -> bool {
                <$ty>::is_infinite(self)
            }
            #[inline]
            fn min(self, other: Self) -> Self {
                <$ty>::min(self, other)
            }
            #[inline]
            fn max(self, other: Self) -> Self {
                <$ty>::max(self, other)
            }
            #[inline]
            fn mul_add(self, a: Self, b: Self) -> Self {
                <$ty>::mul_add(self, a, b)
            }
            #[inline]
            fn from_f64(v: f64) -> Self {
                v as Self
            }
        }

        impl Real for $ty {}
    };
}

impl_scalar_float!(f32);
impl_scalar_float!(f64);

macro_rules! impl_scalar_int {
    ($ty:ty) => {
        impl Scalar for $ty {
            #[inline]
            fn zero() -> Self {
                0
            }
            #[inline]
            fn one() -> Self {
                1
            }
            #[inline]
            #[allow(clippy::cast_possible_wrap)]
            fn from_usize(v: usize) -> Self {
                v as Self
            }
        }

        impl Integer for $ty {
            #[inline]
            fn rem(self, rhs: Self) -> Self {
                self % rhs
            }
        }
    };
}

impl_scalar_int!(i8);
impl_scalar_int!(i16);
impl_scalar_int!(i32);
impl_scalar_int!(i64);
impl_scalar_int!(u8);
impl_scalar_int!(u16);
impl_scalar_int!(u32);
impl_scalar_int!(u64);
