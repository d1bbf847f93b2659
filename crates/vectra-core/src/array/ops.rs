//! Elementwise arithmetic, comparisons, and reductions.
//!
//! Operators are thin wrappers around the map/zip engine and broadcast
//! their operands:
//! - `Array<T> op Array<T>` (elementwise, broadcasting; panics on
//!   non-broadcastable shapes, use the `*_checked` twins for a `Result`)
//! - `Array<T> op T` (broadcast a scalar to every element)
//! - `Neg` for `Float` arrays
//!
//! Comparisons are named methods returning `Array<bool>`.

use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::dtype::{Element, Float, Scalar};
use crate::error::Result;

use super::Array;

// ======================================================================
// Array op Array (elementwise, broadcasting — panics on failure)
// ======================================================================

macro_rules! impl_array_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<T: Scalar> $trait for &Array<T> {
            type Output = Array<T>;

            fn $method(self, rhs: &Array<T>) -> Array<T> {
                match self.zip_map(rhs, |a, b| a $op b) {
                    Ok(out) => out,
                    Err(e) => panic!(
                        "elementwise {} of shapes {:?} and {:?} failed: {e}",
                        stringify!($method), self.shape(), rhs.shape(),
                    ),
                }
            }
        }

        impl<T: Scalar> $trait for Array<T> {
            type Output = Array<T>;

            fn $method(self, rhs: Array<T>) -> Array<T> {
                (&self).$method(&rhs)
            }
        }
    };
}

impl_array_binop!(Add, add, +);
impl_array_binop!(Sub, sub, -);
impl_array_binop!(Mul, mul, *);
impl_array_binop!(Div, div, /);

// ======================================================================
// Array op scalar (broadcast the scalar to every element)
// ======================================================================

macro_rules! impl_scalar_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<T: Scalar> $trait<T> for &Array<T> {
            type Output = Array<T>;

            fn $method(self, rhs: T) -> Array<T> {
                match self.map(|a| a $op rhs) {
                    Ok(out) => out,
                    Err(e) => panic!("elementwise {} failed: {e}", stringify!($method)),
                }
            }
        }

        impl<T: Scalar> $trait<T> for Array<T> {
            type Output = Array<T>;

            fn $method(self, rhs: T) -> Array<T> {
                (&self).$method(rhs)
            }
        }
    };
}

impl_scalar_binop!(Add, add, +);
impl_scalar_binop!(Sub, sub, -);
impl_scalar_binop!(Mul, mul, *);
impl_scalar_binop!(Div, div, /);

// ======================================================================
// Negation
// ======================================================================

impl<T: Float> Neg for &Array<T> {
    type Output = Array<T>;

    fn neg(self) -> Array<T> {
        match self.map(|a| -a) {
            Ok(out) => out,
            Err(e) => panic!("elementwise neg failed: {e}"),
        }
    }
}

impl<T: Float> Neg for Array<T> {
    type Output = Array<T>;

    fn neg(self) -> Array<T> {
        -&self
    }
}

// ======================================================================
// Fallible (Result-returning) arithmetic for non-panicking callers
// ======================================================================

impl<T: Scalar> Array<T> {
    /// Elementwise addition with broadcasting, returning `Err` on
    /// non-broadcastable shapes.
    pub fn add_checked(&self, other: &Array<T>) -> Result<Array<T>> {
        self.zip_map(other, |a, b| a + b)
    }

    /// Elementwise subtraction with broadcasting.
    pub fn sub_checked(&self, other: &Array<T>) -> Result<Array<T>> {
        self.zip_map(other, |a, b| a - b)
    }

    /// Elementwise multiplication with broadcasting.
    pub fn mul_checked(&self, other: &Array<T>) -> Result<Array<T>> {
        self.zip_map(other, |a, b| a * b)
    }

    /// Elementwise division with broadcasting.
    pub fn div_checked(&self, other: &Array<T>) -> Result<Array<T>> {
        self.zip_map(other, |a, b| a / b)
    }
}

// ======================================================================
// Comparisons — named methods producing bool arrays
// ======================================================================

impl<T: Element> Array<T> {
    /// Elementwise `<` with broadcasting.
    pub fn lt(&self, other: &Array<T>) -> Result<Array<bool>> {
        self.zip_map(other, |a, b| a < b)
    }

    /// Elementwise `<=` with broadcasting.
    pub fn le(&self, other: &Array<T>) -> Result<Array<bool>> {
        self.zip_map(other, |a, b| a <= b)
    }

    /// Elementwise `>` with broadcasting.
    pub fn gt(&self, other: &Array<T>) -> Result<Array<bool>> {
        self.zip_map(other, |a, b| a > b)
    }

    /// Elementwise `>=` with broadcasting.
    pub fn ge(&self, other: &Array<T>) -> Result<Array<bool>> {
        self.zip_map(other, |a, b| a >= b)
    }

    /// Elementwise `==` with broadcasting.
    pub fn eq_elem(&self, other: &Array<T>) -> Result<Array<bool>> {
        self.zip_map(other, |a, b| a == b)
    }

    /// Elementwise `!=` with broadcasting.
    pub fn ne_elem(&self, other: &Array<T>) -> Result<Array<bool>> {
        self.zip_map(other, |a, b| a != b)
    }
}

// ======================================================================
// Reductions
// ======================================================================

impl<T: Scalar> Array<T> {
    /// Sum of all elements, seeded at the additive identity.
    pub fn sum(&self) -> T {
        self.iter().sum()
    }

    /// Product of all elements.
    pub fn product(&self) -> T {
        self.iter().fold(T::one(), |acc, x| acc * x)
    }

    /// Minimum element. Returns `None` for empty arrays.
    pub fn min_element(&self) -> Option<T> {
        self.iter().reduce(|a, b| if b < a { b } else { a })
    }

    /// Maximum element. Returns `None` for empty arrays.
    pub fn max_element(&self) -> Option<T> {
        self.iter().reduce(|a, b| if b > a { b } else { a })
    }

    /// Sum along an axis (negative values count from the last axis),
    /// producing an array with that axis removed.
    ///
    /// Each sub-array along the axis is accumulated into a zeroed output
    /// through write-through view assignment.
    pub fn sum_axis(&self, axis: isize) -> Result<Array<T>> {
        let norm = super::normalize_axis(axis, self.ndim())?;

        let mut new_shape: Vec<usize> = self.shape().to_vec();
        new_shape.remove(norm);

        let acc = Array::<T>::zeros(&new_shape)?;
        let mut acc_view = acc.view();
        for sub in self.axis_iter(axis)? {
            acc_view.zip_assign(&sub, |a, b| a + b)?;
        }
        Ok(acc)
    }
}

impl<T: Float> Array<T> {
    /// Mean of all elements.
    pub fn mean(&self) -> T {
        self.sum() / T::from_usize(self.numel())
    }

    /// Mean along an axis: the axis sum divided by the axis length.
    pub fn mean_axis(&self, axis: isize) -> Result<Array<T>> {
        let norm = super::normalize_axis(axis, self.ndim())?;
        let len = T::from_usize(self.shape()[norm]);
        self.sum_axis(axis)?.map(|x| x / len)
    }
}
