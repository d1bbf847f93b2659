//! Shape manipulation: reshape, transpose, permute, flatten, squeeze,
//! unsqueeze, and broadcasting.
//!
//! Everything here is a descriptor operation over the shared buffer,
//! except `reshape` of a non-contiguous source, which copies first and
//! then reinterprets the contiguous duplicate.

use crate::dtype::Element;
use crate::error::{CoreError, Result};
use crate::layout::{checked_num_elements, contiguous_strides, Shape, Strides};

use super::{Array, ArrayCore};

impl<T: Element> Array<T> {
    /// Reinterpret the elements under a new shape.
    ///
    /// Fails if the total element count changes. A contiguous source is
    /// reinterpreted in place (zero copy, shared buffer); a non-contiguous
    /// source is copied to a contiguous duplicate first, so the result
    /// reflects the *logical* element order of the source view.
    pub fn reshape(&self, new_shape: &[usize]) -> Result<Array<T>> {
        let to_elems = checked_num_elements(new_shape)?;
        if to_elems != self.numel() {
            return Err(CoreError::ReshapeMismatch {
                from_elems: self.numel(),
                to: new_shape.to_vec(),
                to_elems,
            });
        }

        if !self.is_contiguous() {
            return self.copy()?.reshape(new_shape);
        }

        let elem = self.core().elem_size();
        let core = ArrayCore::new(
            Shape::from_slice(new_shape),
            contiguous_strides(new_shape, elem),
            self.offset(),
            self.core().dtype(),
            self.core().buffer().clone(),
        )?;
        Ok(Array::from_core_unchecked(core))
    }

    /// Flatten into a 1-D array (zero copy when contiguous).
    pub fn flatten(&self) -> Result<Array<T>> {
        self.reshape(&[self.numel()])
    }

    /// Reverse all axes. A descriptor operation: the result shares this
    /// array's buffer.
    pub fn transpose(&self) -> Array<T> {
        Array::from_core_unchecked(self.core().transposed())
    }

    /// Reorder axes by a permutation of `0..ndim`. Zero copy.
    pub fn permute(&self, axes: &[usize]) -> Result<Array<T>> {
        let ndim = self.ndim();
        if axes.len() != ndim {
            return Err(CoreError::InvalidArgument {
                reason: "permutation length must match array rank",
            });
        }
        let mut seen = vec![false; ndim];
        for &a in axes {
            if a >= ndim {
                return Err(CoreError::AxisOutOfBounds {
                    axis: a as isize,
                    ndim,
                });
            }
            if seen[a] {
                return Err(CoreError::InvalidArgument {
                    reason: "duplicate axis in permutation",
                });
            }
            seen[a] = true;
        }

        let shape: Shape = axes.iter().map(|&a| self.shape()[a]).collect();
        let strides: Strides = axes.iter().map(|&a| self.strides()[a]).collect();
        let core = ArrayCore::new(
            shape,
            strides,
            self.offset(),
            self.core().dtype(),
            self.core().buffer().clone(),
        )?;
        Ok(Array::from_core_unchecked(core))
    }

    /// Insert a length-1 axis at `axis` (0..=ndim). Zero copy.
    pub fn unsqueeze(&self, axis: usize) -> Result<Array<T>> {
        let ndim = self.ndim();
        if axis > ndim {
            return Err(CoreError::AxisOutOfBounds {
                axis: axis as isize,
                ndim,
            });
        }
        let mut shape = Shape::from_slice(self.shape());
        let mut strides = Strides::from_slice(self.strides());
        shape.insert(axis, 1);
        strides.insert(axis, 0);
        let core = ArrayCore::new(
            shape,
            strides,
            self.offset(),
            self.core().dtype(),
            self.core().buffer().clone(),
        )?;
        Ok(Array::from_core_unchecked(core))
    }

    /// Remove all length-1 axes, carrying the remaining strides verbatim.
    /// Zero copy.
    pub fn squeeze(&self) -> Array<T> {
        let mut shape = Shape::new();
        let mut strides = Strides::new();
        for (&dim, &stride) in self.shape().iter().zip(self.strides().iter()) {
            if dim != 1 {
                shape.push(dim);
                strides.push(stride);
            }
        }
        let core = ArrayCore {
            shape,
            strides,
            offset: self.offset(),
            dtype: self.core().dtype(),
            buffer: self.core().buffer().clone(),
        };
        Array::from_core_unchecked(core)
    }

    /// Broadcast to `target` without copying (zero-stride expansion).
    pub fn broadcast_to(&self, target: &[usize]) -> Result<Array<T>> {
        Ok(Array::from_core_unchecked(
            self.core().broadcast_to(target)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reshape_contiguous_is_zero_copy() {
        let a = Array::<i32>::arange(6).unwrap();
        let b = a.reshape(&[2, 3]).unwrap();
        assert_eq!(b.shape(), &[2, 3]);
        assert_eq!(b.strides(), &[12, 4]);
        assert_eq!(b.core().data_ptr(), a.core().data_ptr());
        assert_eq!(b.get(&[1, 0]).unwrap(), 3);
    }

    #[test]
    fn test_reshape_element_count_mismatch() {
        let a = Array::<i32>::arange(4).unwrap();
        assert!(matches!(
            a.reshape(&[3, 2]),
            Err(CoreError::ReshapeMismatch { .. })
        ));
    }

    #[test]
    fn test_reshape_flat_roundtrip() {
        // A contiguous (4, 4) of 0..16 flattens back to the original order.
        let a = Array::<i32>::arange(16).unwrap().reshape(&[4, 4]).unwrap();
        let flat = a.reshape(&[16]).unwrap();
        assert_eq!(flat.to_vec(), (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn test_reshape_transposed_copies_logical_order() {
        // Reshaping a transposed (hence non-contiguous) view flattens the
        // transposed order, not the storage order.
        let a = Array::<i32>::arange(16).unwrap().reshape(&[4, 4]).unwrap();
        let t = a.transpose();
        let flat = t.reshape(&[16]).unwrap();
        let expected: Vec<i32> = (0..16).map(|i| (i % 4) * 4 + i / 4).collect();
        assert_eq!(flat.to_vec(), expected);
        // The copy broke aliasing with the source.
        assert!(flat.is_contiguous());
        assert_ne!(flat.core().data_ptr(), a.core().data_ptr());
    }

    #[test]
    fn test_transpose_2d() {
        let a = Array::<i32>::from_vec(vec![1, 2, 3, 4, 5, 6], &[2, 3]).unwrap();
        let t = a.transpose();
        assert_eq!(t.shape(), &[3, 2]);
        assert_eq!(t.get(&[0, 1]).unwrap(), 4);
        assert_eq!(t.get(&[2, 0]).unwrap(), 3);
    }

    #[test]
    fn test_permute() {
        let a = Array::<i32>::arange(24).unwrap().reshape(&[2, 3, 4]).unwrap();
        let p = a.permute(&[2, 0, 1]).unwrap();
        assert_eq!(p.shape(), &[4, 2, 3]);
        assert_eq!(
            p.get(&[3, 1, 2]).unwrap(),
            a.get(&[1, 2, 3]).unwrap()
        );
        // Descriptor-only: shares the buffer.
        assert_eq!(p.core().data_ptr(), a.core().data_ptr());
    }

    #[test]
    fn test_permute_validation() {
        let a = Array::<i32>::zeros(&[2, 3]).unwrap();
        assert!(a.permute(&[0]).is_err());
        assert!(a.permute(&[0, 2]).is_err());
        assert!(a.permute(&[1, 1]).is_err());
    }

    #[test]
    fn test_unsqueeze_squeeze() {
        let a = Array::<i32>::from_vec(vec![1, 2, 3], &[3]).unwrap();
        let b = a.unsqueeze(0).unwrap();
        assert_eq!(b.shape(), &[1, 3]);
        let c = b.squeeze();
        assert_eq!(c.shape(), &[3]);
        assert_eq!(c.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_unsqueeze_out_of_bounds() {
        let a = Array::<i32>::from_vec(vec![1, 2, 3], &[3]).unwrap();
        assert!(a.unsqueeze(2).is_err());
    }

    #[test]
    fn test_squeeze_keeps_strides_of_survivors() {
        let a = Array::<i32>::arange(6).unwrap().reshape(&[1, 2, 1, 3]).unwrap();
        let s = a.squeeze();
        assert_eq!(s.shape(), &[2, 3]);
        assert_eq!(s.to_vec(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_flatten_view_of_slice() {
        let a = Array::<i32>::arange(12).unwrap().reshape(&[3, 4]).unwrap();
        let row = a.select(0, 1).unwrap();
        let flat = row.flatten().unwrap();
        assert_eq!(flat.to_vec(), vec![4, 5, 6, 7]);
    }

    #[test]
    fn test_broadcast_to_identity() {
        let a = Array::<f64>::zeros(&[2, 3]).unwrap();
        let b = a.broadcast_to(&[2, 3]).unwrap();
        assert_eq!(b.strides(), a.strides());
        assert_eq!(b.offset(), a.offset());
    }
}
