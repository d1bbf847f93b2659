//! Vectorized elementwise math over float arrays (ufuncs).
//!
//! Provides both methods on `Array<T: Float>` and free functions
//! mirroring `NumPy`'s top-level ufuncs (`np.sin`, `np.exp`, etc.).
//! Everything is a thin wrapper over the map/zip engine, so views and
//! broadcast descriptors work unchanged.

use crate::array::Array;
use crate::dtype::Float;
use crate::error::Result;

// ======================================================================
// Array methods
// ======================================================================

macro_rules! unary_method {
    ($(#[$doc:meta] $name:ident),* $(,)?) => {
        $(
            #[$doc]
            #[inline]
            pub fn $name(&self) -> Result<Array<T>> {
                self.map(Float::$name)
            }
        )*
    };
}

impl<T: Float> Array<T> {
    unary_method!(
        /// Elementwise absolute value.
        abs,
        /// Elementwise square root.
        sqrt,
        /// Elementwise cube root.
        cbrt,
        /// Elementwise sine.
        sin,
        /// Elementwise cosine.
        cos,
        /// Elementwise tangent.
        tan,
        /// Elementwise arcsine.
        asin,
        /// Elementwise arccosine.
        acos,
        /// Elementwise arctangent.
        atan,
        /// Elementwise hyperbolic sine.
        sinh,
        /// Elementwise hyperbolic cosine.
        cosh,
        /// Elementwise hyperbolic tangent.
        tanh,
        /// Elementwise natural exponential.
        exp,
        /// Elementwise base-2 exponential.
        exp2,
        /// Elementwise natural logarithm.
        ln,
        /// Elementwise base-2 logarithm.
        log2,
        /// Elementwise base-10 logarithm.
        log10,
        /// Elementwise floor.
        floor,
        /// Elementwise ceiling.
        ceil,
        /// Elementwise rounding to nearest integer.
        round,
        /// Elementwise truncation toward zero.
        trunc,
        /// Elementwise reciprocal.
        recip,
    );

    /// Elementwise power with a scalar exponent.
    #[inline]
    pub fn powf(&self, exponent: T) -> Result<Array<T>> {
        self.map(|x| x.powf(exponent))
    }

    /// Elementwise power with an integer exponent.
    #[inline]
    pub fn powi(&self, n: i32) -> Result<Array<T>> {
        self.map(|x| x.powi(n))
    }

    /// Elementwise four-quadrant arctangent of `self / other`, with
    /// broadcasting.
    #[inline]
    pub fn atan2(&self, other: &Array<T>) -> Result<Array<T>> {
        self.zip_map(other, Float::atan2)
    }

    /// Elementwise `sqrt(self^2 + other^2)`, with broadcasting.
    #[inline]
    pub fn hypot(&self, other: &Array<T>) -> Result<Array<T>> {
        self.zip_map(other, Float::hypot)
    }

    /// Clamp every element into `[min, max]`.
    #[inline]
    pub fn clamp(&self, min: T, max: T) -> Result<Array<T>> {
        self.map(|x| Float::min(Float::max(x, min), max))
    }

    /// Elementwise NaN test.
    #[inline]
    pub fn is_nan(&self) -> Result<Array<bool>> {
        self.map(Float::is_nan)
    }

    /// Elementwise finiteness test.
    #[inline]
    pub fn is_finite(&self) -> Result<Array<bool>> {
        self.map(Float::is_finite)
    }

    /// Elementwise infinity test.
    #[inline]
    pub fn is_infinite(&self) -> Result<Array<bool>> {
        self.map(Float::is_infinite)
    }
}

// ======================================================================
// Free-function mirrors
// ======================================================================

macro_rules! unary_fn {
    ($(#[$doc:meta] $name:ident),* $(,)?) => {
        $(
            #[$doc]
            #[inline]
            pub fn $name<T: Float>(a: &Array<T>) -> Result<Array<T>> {
                a.$name()
            }
        )*
    };
}

unary_fn!(
    /// Elementwise absolute value.
    abs,
    /// Elementwise square root.
    sqrt,
    /// Elementwise cube root.
    cbrt,
    /// Elementwise sine.
    sin,
    /// Elementwise cosine.
    cos,
    /// Elementwise tangent.
    tan,
    /// Elementwise arcsine.
    asin,
    /// Elementwise arccosine.
    acos,
    /// Elementwise arctangent.
    atan,
    /// Elementwise hyperbolic sine.
    sinh,
    /// Elementwise hyperbolic cosine.
    cosh,
    /// Elementwise hyperbolic tangent.
    tanh,
    /// Elementwise natural exponential.
    exp,
    /// Elementwise base-2 exponential.
    exp2,
    /// Elementwise natural logarithm.
    ln,
    /// Elementwise base-2 logarithm.
    log2,
    /// Elementwise base-10 logarithm.
    log10,
    /// Elementwise floor.
    floor,
    /// Elementwise ceiling.
    ceil,
    /// Elementwise rounding to nearest integer.
    round,
    /// Elementwise truncation toward zero.
    trunc,
    /// Elementwise reciprocal.
    recip,
);

/// Elementwise four-quadrant arctangent of `y / x`, with broadcasting.
#[inline]
pub fn atan2<T: Float>(y: &Array<T>, x: &Array<T>) -> Result<Array<T>> {
    y.atan2(x)
}

/// Elementwise `sqrt(a^2 + b^2)`, with broadcasting.
#[inline]
pub fn hypot<T: Float>(a: &Array<T>, b: &Array<T>) -> Result<Array<T>> {
    a.hypot(b)
}

/// Elementwise power with a scalar exponent.
#[inline]
pub fn powf<T: Float>(a: &Array<T>, exponent: T) -> Result<Array<T>> {
    a.powf(exponent)
}
