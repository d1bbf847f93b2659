//! Array creation functions analogous to `np.zeros`, `np.ones`, etc.
//!
//! Allocating constructors return `Result`: element-count overflow and
//! buffer allocation failure are reported, not panicked on.

use std::any::Any;
use std::rc::Rc;

use crate::buffer::Buffer;
use crate::dtype::{Element, Float, Scalar};
use crate::error::{CoreError, Result};
use crate::layout::{checked_num_elements, contiguous_strides, Shape};

use super::{Array, ArrayCore};

impl<T: Element> Array<T> {
    /// Allocate a fresh contiguous array. Elements are zero-initialized.
    pub fn empty(shape: &[usize]) -> Result<Self> {
        let numel = checked_num_elements(shape)?;
        let bytes = numel
            .checked_mul(std::mem::size_of::<T>())
            .ok_or_else(|| CoreError::InvalidShape {
                shape: shape.to_vec(),
                reason: "byte size overflows usize",
            })?;
        let buffer = Buffer::allocate(bytes)?;
        let core = ArrayCore::contiguous(Shape::from_slice(shape), T::DTYPE, buffer)?;
        Ok(Array::from_core_unchecked(core))
    }

    /// Allocate a contiguous array with every element set to `value`.
    pub fn full(shape: &[usize], value: T) -> Result<Self> {
        let mut out = Self::empty(shape)?;
        for slot in out.as_mut_slice()? {
            *slot = value;
        }
        Ok(out)
    }

    /// A rank-0 (scalar) array holding a single value.
    pub fn singleton(value: T) -> Result<Self> {
        Self::full(&[], value)
    }

    /// Build a contiguous array from a flat vector and a shape.
    ///
    /// Fails if the product of `shape` does not equal `data.len()`.
    ///
    /// ```
    /// # use vectra_core::array::Array;
    /// let a = Array::<f64>::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// assert_eq!(a.shape(), &[2, 3]);
    /// assert_eq!(a.get(&[1, 0]).unwrap(), 4.0);
    /// ```
    pub fn from_vec(data: Vec<T>, shape: &[usize]) -> Result<Self> {
        let numel = checked_num_elements(shape)?;
        if numel != data.len() {
            return Err(CoreError::InvalidShape {
                shape: shape.to_vec(),
                reason: "shape product does not match data length",
            });
        }
        let mut out = Self::empty(shape)?;
        out.as_mut_slice()?.copy_from_slice(&data);
        Ok(out)
    }

    /// Build a contiguous array from a flat slice and a shape (copies the
    /// data).
    pub fn from_slice(data: &[T], shape: &[usize]) -> Result<Self> {
        Self::from_vec(data.to_vec(), shape)
    }

    /// Allocate a contiguous duplicate of this array.
    ///
    /// The duplicate is always contiguous regardless of this array's
    /// layout, and shares nothing with it.
    pub fn copy(&self) -> Result<Self> {
        let mut out = Self::empty(self.shape())?;
        for (slot, v) in out.as_mut_slice()?.iter_mut().zip(self.iter()) {
            *slot = v;
        }
        Ok(out)
    }

    /// Wrap foreign memory without copying.
    ///
    /// `ptr` is the buffer base holding elements of `T`; `strides` are
    /// signed byte deltas (row-major contiguous when `None`). If `owner`
    /// is `Some`, the token is held alive for as long as the array (or
    /// anything derived from it) lives; if `None`, the caller manages the
    /// pointee's lifetime.
    ///
    /// # Safety
    /// `ptr` must point to memory that is valid for reads and writes over
    /// the full extent addressed by `shape`/`strides`, and must remain
    /// valid for the lifetime of the returned array and everything derived
    /// from it.
    pub unsafe fn from_raw_parts(
        ptr: *mut T,
        shape: &[usize],
        strides: Option<&[isize]>,
        owner: Option<Rc<dyn Any>>,
    ) -> Result<Self> {
        let elem = std::mem::size_of::<T>();
        if ptr as usize % std::mem::align_of::<T>() != 0 {
            return Err(CoreError::Misaligned {
                alignment: std::mem::align_of::<T>(),
            });
        }

        let strides = match strides {
            Some(s) => {
                if s.iter().any(|&st| st % elem as isize != 0) {
                    return Err(CoreError::Misaligned { alignment: elem });
                }
                s.iter().copied().collect()
            }
            None => contiguous_strides(shape, elem),
        };

        // The wrapped extent is the maximal byte reachable from the base;
        // descriptors with a negative reach from the base are rejected by
        // the core constructor.
        let numel = checked_num_elements(shape)?;
        let mut max = 0isize;
        for (&dim, &stride) in shape.iter().zip(strides.iter()) {
            let span = (dim as isize - 1) * stride;
            if span > 0 {
                max += span;
            }
        }
        let len = if numel == 0 { 0 } else { max as usize + elem };

        let buffer = Buffer::from_raw(ptr as *mut u8, len, owner)?;
        let core = ArrayCore::new(Shape::from_slice(shape), strides, 0, T::DTYPE, buffer)?;
        Array::from_core(core)
    }
}

impl<T: Scalar> Array<T> {
    /// Allocate an array filled with zeros.
    ///
    /// ```
    /// # use vectra_core::array::Array;
    /// let a = Array::<f64>::zeros(&[2, 3]).unwrap();
    /// assert!(a.iter().all(|x| x == 0.0));
    /// ```
    pub fn zeros(shape: &[usize]) -> Result<Self> {
        // Fresh buffers are zero-initialized; all supported kinds encode
        // zero as all-zero bytes.
        Self::empty(shape)
    }

    /// Allocate an array filled with ones.
    pub fn ones(shape: &[usize]) -> Result<Self> {
        Self::full(shape, T::one())
    }

    /// A 1-D array with values `[0, 1, 2, ..., n-1]`.
    ///
    /// ```
    /// # use vectra_core::array::Array;
    /// let a = Array::<i32>::arange(5).unwrap();
    /// assert_eq!(a.to_vec(), vec![0, 1, 2, 3, 4]);
    /// ```
    pub fn arange(n: usize) -> Result<Self> {
        let mut out = Self::empty(&[n])?;
        for (i, slot) in out.as_mut_slice()?.iter_mut().enumerate() {
            *slot = T::from_usize(i);
        }
        Ok(out)
    }

    /// An identity matrix of size `n x n`.
    pub fn eye(n: usize) -> Result<Self> {
        let mut out = Self::zeros(&[n, n])?;
        for i in 0..n {
            out.set(&[i, i], T::one())?;
        }
        Ok(out)
    }
}

impl<T: Float> Array<T> {
    /// A 1-D array of `n` evenly spaced values from `start` to `end`
    /// (inclusive). Fails if `n < 2`.
    pub fn linspace(start: T, end: T, n: usize) -> Result<Self> {
        if n < 2 {
            return Err(CoreError::InvalidArgument {
                reason: "linspace requires n >= 2",
            });
        }
        let step = (end - start) / T::from_usize(n - 1);
        let mut out = Self::empty(&[n])?;
        for (i, slot) in out.as_mut_slice()?.iter_mut().enumerate() {
            *slot = start + step * T::from_usize(i);
        }
        Ok(out)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let a = Array::<f64>::zeros(&[3, 4]).unwrap();
        assert_eq!(a.shape(), &[3, 4]);
        assert_eq!(a.numel(), 12);
        assert!(a.iter().all(|x| x == 0.0));
        assert!(a.is_contiguous());
    }

    #[test]
    fn test_ones() {
        let a = Array::<f32>::ones(&[2, 2]).unwrap();
        assert!(a.iter().all(|x| x == 1.0));
    }

    #[test]
    fn test_full() {
        let a = Array::full(&[2, 3], 7_i32).unwrap();
        assert!(a.iter().all(|x| x == 7));
    }

    #[test]
    fn test_singleton() {
        let a = Array::singleton(42_i32).unwrap();
        assert_eq!(a.ndim(), 0);
        assert_eq!(a.numel(), 1);
        assert_eq!(a.get(&[]).unwrap(), 42);
    }

    #[test]
    fn test_from_vec_shape_mismatch() {
        let r = Array::<f64>::from_vec(vec![1.0, 2.0, 3.0], &[2, 3]);
        assert!(r.is_err());
    }

    #[test]
    fn test_from_vec_overflow_rejected() {
        let r = Array::<f64>::from_vec(vec![], &[usize::MAX, 2]);
        assert!(matches!(r, Err(CoreError::InvalidShape { .. })));
    }

    #[test]
    fn test_arange() {
        let a = Array::<i32>::arange(5).unwrap();
        assert_eq!(a.to_vec(), vec![0, 1, 2, 3, 4]);
        assert_eq!(a.shape(), &[5]);
    }

    #[test]
    fn test_arange_zero() {
        let a = Array::<i32>::arange(0).unwrap();
        assert!(a.is_empty());
        assert_eq!(a.shape(), &[0]);
    }

    #[test]
    fn test_eye() {
        let a = Array::<f64>::eye(3).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let want = if i == j { 1.0 } else { 0.0 };
                assert_eq!(a.get(&[i, j]).unwrap(), want);
            }
        }
    }

    #[test]
    fn test_linspace() {
        let a = Array::<f64>::linspace(0.0, 1.0, 5).unwrap();
        assert_eq!(a.shape(), &[5]);
        assert_eq!(a.get(&[0]).unwrap(), 0.0);
        assert_eq!(a.get(&[4]).unwrap(), 1.0);
        assert!((a.get(&[2]).unwrap() - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_linspace_invalid() {
        assert!(Array::<f64>::linspace(0.0, 1.0, 1).is_err());
    }

    #[test]
    fn test_copy_is_contiguous_and_equal() {
        let a = Array::<i32>::from_vec(vec![1, 2, 3, 4, 5, 6], &[2, 3]).unwrap();
        let t = a.transpose();
        assert!(!t.is_contiguous());
        let c = t.copy().unwrap();
        assert!(c.is_contiguous());
        assert_eq!(c, t);
        assert_eq!(c.to_vec(), vec![1, 4, 2, 5, 3, 6]);
    }

    #[test]
    fn test_copy_shares_nothing() {
        let a = Array::<i32>::from_vec(vec![1, 2], &[2]).unwrap();
        let mut c = a.copy().unwrap();
        c.set(&[0], 99).unwrap();
        assert_eq!(a.get(&[0]).unwrap(), 1);
    }

    #[test]
    fn test_from_raw_parts_contiguous() {
        let mut data = vec![1.0_f64, 2.0, 3.0, 4.0];
        let a =
            unsafe { Array::<f64>::from_raw_parts(data.as_mut_ptr(), &[2, 2], None, None) }
                .unwrap();
        assert_eq!(a.get(&[1, 0]).unwrap(), 3.0);
        // No copy took place: writes through the array hit the vector.
        let mut a = a;
        a.set(&[0, 0], 9.0).unwrap();
        assert_eq!(data[0], 9.0);
    }

    #[test]
    fn test_from_raw_parts_custom_strides() {
        // View every other element of a 6-element buffer as a length-3
        // array.
        let mut data = vec![0_i32, 1, 2, 3, 4, 5];
        let a = unsafe {
            Array::<i32>::from_raw_parts(data.as_mut_ptr(), &[3], Some(&[8]), None)
        }
        .unwrap();
        assert_eq!(a.to_vec(), vec![0, 2, 4]);
    }

    #[test]
    fn test_from_raw_parts_rejects_misaligned_strides() {
        let mut data = vec![0_i32; 4];
        let r = unsafe {
            Array::<i32>::from_raw_parts(data.as_mut_ptr(), &[2], Some(&[3]), None)
        };
        assert!(matches!(r, Err(CoreError::Misaligned { .. })));
    }

    #[test]
    fn test_from_raw_parts_keeps_owner_alive() {
        let owner: Rc<dyn Any> = Rc::new(vec![1.0_f64, 2.0, 3.0]);
        let ptr = Rc::downcast::<Vec<f64>>(Rc::clone(&owner))
            .unwrap()
            .as_ptr() as *mut f64;
        let a = unsafe { Array::<f64>::from_raw_parts(ptr, &[3], None, Some(owner)) }.unwrap();
        assert_eq!(a.to_vec(), vec![1.0, 2.0, 3.0]);
    }
}
