//! Sorting: flat `sort`/`argsort`, axis variants, and the type-erased
//! dispatch entry over the closed element-kind set.

use core::cmp::Ordering;

use crate::dtype::{DType, Element};
use crate::error::{CoreError, Result};

use super::{Array, ArrayCore};

impl<T: Element> Array<T> {
    /// Sort all elements, returning a fresh contiguous 1-D array in
    /// ascending order.
    pub fn sort(&self) -> Result<Array<T>> {
        let mut data = self.to_vec();
        data.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        Array::from_vec(data, &[self.numel()])
    }

    /// Indices that would sort all elements (flat), as a 1-D
    /// `Array<u64>`.
    pub fn argsort(&self) -> Result<Array<u64>> {
        let data = self.to_vec();
        let mut indices: Vec<u64> = (0..data.len() as u64).collect();
        indices.sort_unstable_by(|&a, &b| {
            data[a as usize]
                .partial_cmp(&data[b as usize])
                .unwrap_or(Ordering::Equal)
        });
        Array::from_vec(indices, &[data.len()])
    }

    /// Sort each 1-D lane along `axis` independently, returning a fresh
    /// contiguous array of the same shape.
    pub fn sort_axis(&self, axis: isize) -> Result<Array<T>> {
        let norm = super::normalize_axis(axis, self.ndim())?;

        // The contiguous copy holds this array's logical order, so the
        // lane arithmetic below is plain row-major index math.
        let mut out = self.copy()?;
        let shape = out.shape().to_vec();
        let outer: usize = shape[..norm].iter().product();
        let axis_len = shape[norm];
        let inner: usize = shape[norm + 1..].iter().product();

        let data = out.as_mut_slice()?;
        let mut lane = vec![T::default(); axis_len];

        for o in 0..outer {
            for i in 0..inner {
                let base = o * axis_len * inner + i;
                for (k, slot) in lane.iter_mut().enumerate() {
                    *slot = data[base + k * inner];
                }
                lane.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
                for (k, &v) in lane.iter().enumerate() {
                    data[base + k * inner] = v;
                }
            }
        }
        Ok(out)
    }

    /// Indices that would sort each lane along `axis`, with the same
    /// shape as `self` and element type `u64`.
    pub fn argsort_axis(&self, axis: isize) -> Result<Array<u64>> {
        let norm = super::normalize_axis(axis, self.ndim())?;

        let values = self.copy()?;
        let data = values.as_slice()?;
        let shape = self.shape();
        let outer: usize = shape[..norm].iter().product();
        let axis_len = shape[norm];
        let inner: usize = shape[norm + 1..].iter().product();

        let mut result = vec![0u64; self.numel()];
        let mut order: Vec<usize> = (0..axis_len).collect();

        for o in 0..outer {
            for i in 0..inner {
                let base = o * axis_len * inner + i;
                for (k, slot) in order.iter_mut().enumerate() {
                    *slot = k;
                }
                order.sort_unstable_by(|&a, &b| {
                    data[base + a * inner]
                        .partial_cmp(&data[base + b * inner])
                        .unwrap_or(Ordering::Equal)
                });
                for (k, &src) in order.iter().enumerate() {
                    result[base + k * inner] = src as u64;
                }
            }
        }
        Array::from_vec(result, shape)
    }
}

/// Type-erased flat sort over the closed element-kind set.
///
/// Dispatches on the core's tag to the generic implementation; kinds
/// without an ordering (`Bool`) are rejected with
/// [`CoreError::UnsupportedDType`].
pub fn sort_dyn(core: &ArrayCore) -> Result<ArrayCore> {
    fn sort_as<T: Element>(core: &ArrayCore) -> Result<ArrayCore> {
        let array = Array::<T>::from_core(core.clone())?;
        Ok(array.sort()?.core().clone())
    }

    match core.dtype() {
        DType::Bool => Err(CoreError::UnsupportedDType { dtype: DType::Bool }),
        DType::I8 => sort_as::<i8>(core),
        DType::I16 => sort_as::<i16>(core),
        DType::I32 => sort_as::<i32>(core),
        DType::I64 => sort_as::<i64>(core),
        DType::U8 => sort_as::<u8>(core),
        DType::U16 => sort_as::<u16>(core),
        DType::U32 => sort_as::<u32>(core),
        DType::U64 => sort_as::<u64>(core),
        DType::F32 => sort_as::<f32>(core),
        DType::F64 => sort_as::<f64>(core),
    }
}
