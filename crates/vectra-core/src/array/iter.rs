//! Strided cursors: the element iterator and the per-axis sub-array
//! iterator.
//!
//! The element cursor visits every position of a descriptor in logical
//! row-major order (rightmost axis fastest). The trailing group of axes
//! whose strides collapse into one linear run is folded into a single
//! virtual axis up front, so a fully contiguous array degenerates to a
//! flat pointer walk and only genuinely strided descriptors pay for the
//! odometer: add the axis's sequential-stride delta, bump its counter, or
//! reset and carry outward.

use smallvec::SmallVec;
use std::marker::PhantomData;

use crate::dtype::Element;
use crate::error::Result;
use crate::index::Index;
use crate::layout::{inner_loop_run, seq_strides, Shape, Strides};

use super::{Array, ArrayCore};

/// Untyped strided cursor over a descriptor.
///
/// Holds its own copies of the (collapsed) shape and stride deltas, so it
/// stays valid for as long as the buffer does, independent of any array
/// wrapper.
pub(crate) struct RawCursor {
    ptr: *mut u8,
    vshape: Shape,
    deltas: Strides,
    counter: Shape,
    remaining: usize,
}

impl RawCursor {
    pub(crate) fn new(core: &ArrayCore) -> Self {
        let run = inner_loop_run(core.shape(), core.strides());
        let mut vshape: Shape = core.shape()[..run.boundary].iter().copied().collect();
        vshape.push(run.len);
        let mut vstrides: Strides = core.strides()[..run.boundary].iter().copied().collect();
        vstrides.push(run.stride);

        RawCursor {
            ptr: core.data_ptr().wrapping_offset(core.offset()),
            deltas: seq_strides(&vshape, &vstrides),
            counter: SmallVec::from_elem(0, vshape.len()),
            remaining: core.num_elements(),
            vshape,
        }
    }

    /// The pointer to the next element, or `None` when exhausted.
    ///
    /// Every returned pointer is in-bounds for the descriptor's buffer;
    /// the cursor never advances past the final element.
    #[inline]
    pub(crate) fn next_ptr(&mut self) -> Option<*mut u8> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.ptr;
        self.remaining -= 1;
        if self.remaining > 0 {
            for i in (0..self.vshape.len()).rev() {
                self.ptr = self.ptr.wrapping_offset(self.deltas[i]);
                if self.counter[i] + 1 < self.vshape[i] {
                    self.counter[i] += 1;
                    break;
                }
                self.counter[i] = 0;
            }
        }
        Some(current)
    }

    #[inline]
    pub(crate) fn remaining(&self) -> usize {
        self.remaining
    }
}

/// Iterator over the elements of an array, in logical row-major order.
///
/// Yields elements by value; all mutation goes through the array and view
/// write APIs.
pub struct ElemIter<'a, T: Element> {
    cursor: RawCursor,
    marker: PhantomData<&'a Array<T>>,
}

impl<'a, T: Element> Iterator for ElemIter<'a, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        // Safety: the cursor only yields in-bounds, aligned pointers of
        // the array's element type.
        self.cursor.next_ptr().map(|p| unsafe { *(p as *const T) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.cursor.remaining();
        (n, Some(n))
    }
}

impl<'a, T: Element> ExactSizeIterator for ElemIter<'a, T> {}

/// Iterator over the sub-arrays obtained by fixing one axis at each of
/// its positions in turn.
///
/// Each item is a lower-dimensional view aliasing the source buffer,
/// produced through a singleton-index derivation.
pub struct AxisIter<'a, T: Element> {
    array: &'a Array<T>,
    axis: usize,
    pos: usize,
    len: usize,
}

impl<'a, T: Element> Iterator for AxisIter<'a, T> {
    type Item = Array<T>;

    fn next(&mut self) -> Option<Array<T>> {
        if self.pos >= self.len {
            return None;
        }
        let mut entries: Vec<Index> = vec![Index::Range(crate::index::Slice::full()); self.axis];
        entries.push(Index::At(self.pos as isize));
        self.pos += 1;
        // The derivation cannot fail: the position is within the axis and
        // the entry list never exceeds the rank.
        let core = self
            .array
            .core()
            .index(&entries)
            .expect("in-range singleton derivation");
        Some(Array::from_core_unchecked(core))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.pos;
        (n, Some(n))
    }
}

impl<'a, T: Element> ExactSizeIterator for AxisIter<'a, T> {}

impl<T: Element> Array<T> {
    /// Iterate over all elements in logical row-major order.
    pub fn iter(&self) -> ElemIter<'_, T> {
        ElemIter {
            cursor: RawCursor::new(self.core()),
            marker: PhantomData,
        }
    }

    /// Iterate over the sub-arrays along `axis` (negative values count
    /// from the last axis).
    ///
    /// For a 2-D array, `axis_iter(0)` yields rows and `axis_iter(1)`
    /// yields columns, each as a 1-D view sharing this array's buffer.
    pub fn axis_iter(&self, axis: isize) -> Result<AxisIter<'_, T>> {
        let norm = super::normalize_axis(axis, self.ndim())?;
        Ok(AxisIter {
            array: self,
            axis: norm,
            pos: 0,
            len: self.shape()[norm],
        })
    }
}
