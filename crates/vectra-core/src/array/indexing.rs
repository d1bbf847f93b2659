//! Deriving sub-array descriptors from index lists.
//!
//! The derivation walks source axes and [`Index`] entries in lockstep: a
//! singleton consumes an axis into the offset, a range emits a resized
//! output axis, and a new-axis marker inserts a length-1, stride-0 axis
//! without consuming anything. Source axes left over after the entry list
//! is exhausted are carried through verbatim, so short index lists behave
//! as if padded with full-axis selectors. The result always shares the
//! source buffer.

use crate::dtype::Element;
use crate::error::{CoreError, Result};
use crate::index::{Index, Slice};
use crate::layout::{Shape, Strides};

use super::{Array, ArrayCore};

impl ArrayCore {
    /// Derive a new descriptor by applying an index list.
    pub fn index(&self, entries: &[Index]) -> Result<ArrayCore> {
        let consuming = entries
            .iter()
            .filter(|e| !matches!(e, Index::NewAxis))
            .count();
        if consuming > self.ndim() {
            return Err(CoreError::TooManyIndices {
                given: consuming,
                ndim: self.ndim(),
            });
        }

        let mut shape = Shape::new();
        let mut strides = Strides::new();
        let mut offset = self.offset();
        let mut axis = 0usize;

        for entry in entries {
            match entry {
                Index::NewAxis => {
                    shape.push(1);
                    strides.push(0);
                }
                Index::At(v) => {
                    let len = self.shape()[axis];
                    let i = Index::normalize(*v, len, axis)?;
                    offset += i as isize * self.strides()[axis];
                    axis += 1;
                }
                Index::Range(range) => {
                    let len = self.shape()[axis];
                    let (start, end) = range.resolve(len)?;
                    shape.push(Slice::out_len(start, end, range.step));
                    strides.push(range.step * self.strides()[axis]);
                    offset += start * self.strides()[axis];
                    axis += 1;
                }
            }
        }

        for rest in axis..self.ndim() {
            shape.push(self.shape()[rest]);
            strides.push(self.strides()[rest]);
        }

        ArrayCore::new(shape, strides, offset, self.dtype(), self.buffer().clone())
    }
}

impl<T: Element> Array<T> {
    /// Select a sub-array with an index list. The result aliases this
    /// array's buffer; no elements are copied.
    pub fn slice(&self, entries: &[Index]) -> Result<Array<T>> {
        Ok(Array::from_core_unchecked(self.core().index(entries)?))
    }

    /// Fix `axis` at `index`, dropping that axis from the result.
    ///
    /// For a 2-D array, `select(0, i)` is row `i` and `select(1, j)` is
    /// column `j`, each as a 1-D view. Negative `axis` and `index` count
    /// from the end.
    pub fn select(&self, axis: isize, index: isize) -> Result<Array<T>> {
        let norm = super::normalize_axis(axis, self.ndim())?;
        let mut entries: Vec<Index> = vec![Index::Range(Slice::full()); norm];
        entries.push(Index::At(index));
        self.slice(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_2x3() -> Array<i32> {
        Array::from_vec(vec![1, 2, 3, 4, 5, 6], &[2, 3]).unwrap()
    }

    #[test]
    fn test_row_then_column_range() {
        // Row 1, columns 0..2 of [[1,2,3],[4,5,6]] -> [4, 5].
        let a = sample_2x3();
        let s = a
            .slice(&[Index::At(1), Index::Range(Slice::new(0, 2))])
            .unwrap();
        assert_eq!(s.shape(), &[2]);
        assert_eq!(s.to_vec(), vec![4, 5]);
    }

    #[test]
    fn test_short_list_extends_with_full_axes() {
        let a = sample_2x3();
        let s = a.slice(&[Index::At(0)]).unwrap();
        assert_eq!(s.shape(), &[3]);
        assert_eq!(s.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_negative_singleton() {
        let a = sample_2x3();
        let s = a.slice(&[Index::At(-1)]).unwrap();
        assert_eq!(s.to_vec(), vec![4, 5, 6]);
    }

    #[test]
    fn test_singleton_out_of_bounds() {
        let a = sample_2x3();
        assert!(matches!(
            a.slice(&[Index::At(2)]),
            Err(CoreError::IndexOutOfBounds { .. })
        ));
        assert!(matches!(
            a.slice(&[Index::At(-3)]),
            Err(CoreError::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_new_axis_inserts_unit_axis() {
        let a = sample_2x3();
        let s = a.slice(&[Index::NewAxis]).unwrap();
        assert_eq!(s.shape(), &[1, 2, 3]);
        assert_eq!(s.strides()[0], 0);
        assert_eq!(s.to_vec(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_new_axis_consumes_no_source_axis() {
        let a = sample_2x3();
        let s = a
            .slice(&[Index::At(1), Index::NewAxis, Index::At(2)])
            .unwrap();
        assert_eq!(s.shape(), &[1]);
        assert_eq!(s.to_vec(), vec![6]);
    }

    #[test]
    fn test_too_many_indices() {
        let a = sample_2x3();
        assert!(matches!(
            a.slice(&[Index::At(0), Index::At(0), Index::At(0)]),
            Err(CoreError::TooManyIndices { given: 3, ndim: 2 })
        ));
        // New-axis entries do not count against the rank.
        assert!(a
            .slice(&[Index::NewAxis, Index::At(0), Index::At(0), Index::NewAxis])
            .is_ok());
    }

    #[test]
    fn test_negative_step_reverses() {
        let a = Array::<i32>::from_vec((0..5).collect(), &[5]).unwrap();
        let r = a.slice(&[Index::Range(Slice::reversed())]).unwrap();
        assert_eq!(r.to_vec(), vec![4, 3, 2, 1, 0]);
        assert_eq!(r.strides(), &[-4]);
    }

    #[test]
    fn test_stepped_range_stride() {
        let a = Array::<i32>::from_vec((0..10).collect(), &[10]).unwrap();
        let s = a
            .slice(&[Index::Range(Slice::with_step(1, 8, 3))])
            .unwrap();
        assert_eq!(s.shape(), &[3]);
        assert_eq!(s.to_vec(), vec![1, 4, 7]);
        assert_eq!(s.strides(), &[12]);
    }

    #[test]
    fn test_empty_range() {
        let a = sample_2x3();
        let s = a.slice(&[Index::Range(Slice::new(1, 1))]).unwrap();
        assert_eq!(s.shape(), &[0, 3]);
        assert_eq!(s.numel(), 0);
    }

    #[test]
    fn test_result_shares_buffer() {
        let a = sample_2x3();
        let s = a.slice(&[Index::At(1)]).unwrap();
        assert_eq!(s.core().data_ptr(), a.core().data_ptr());
    }

    #[test]
    fn test_select_row_and_column() {
        let a = sample_2x3();
        assert_eq!(a.select(0, 1).unwrap().to_vec(), vec![4, 5, 6]);
        assert_eq!(a.select(1, 0).unwrap().to_vec(), vec![1, 4]);
        assert_eq!(a.select(-1, -1).unwrap().to_vec(), vec![3, 6]);
    }

    #[test]
    fn test_select_axis_out_of_bounds() {
        let a = sample_2x3();
        assert!(matches!(
            a.select(2, 0),
            Err(CoreError::AxisOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_select_to_scalar() {
        let a = Array::<i32>::from_vec(vec![42], &[1]).unwrap();
        let s = a.select(0, 0).unwrap();
        assert_eq!(s.ndim(), 0);
        assert_eq!(s.get(&[]).unwrap(), 42);
    }

    #[test]
    fn test_chained_slicing() {
        let a = Array::<i32>::arange(24).unwrap().reshape(&[4, 6]).unwrap();
        let block = a
            .slice(&[
                Index::Range(Slice::new(1, 3)),
                Index::Range(Slice::with_step(0, 6, 2)),
            ])
            .unwrap();
        assert_eq!(block.shape(), &[2, 3]);
        assert_eq!(block.to_vec(), vec![6, 8, 10, 12, 14, 16]);
        let rev = block.slice(&[Index::Range(Slice::reversed())]).unwrap();
        assert_eq!(rev.to_vec(), vec![12, 14, 16, 6, 8, 10]);
    }
}
