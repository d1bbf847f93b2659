//! N-dimensional arrays over shared byte buffers.
//!
//! [`ArrayCore`] is the untyped descriptor: a (shape, strides, offset,
//! dtype, buffer) tuple that is the single source of truth for reading an
//! n-dimensional array out of a byte region. [`Array`] is the typed
//! front-end over a core. Copying either duplicates the descriptor and
//! bumps the buffer's share count; it never duplicates buffer contents, so
//! slices, transposes, and broadcasts of one array all alias one buffer.

mod create;
mod display;
mod indexing;
mod iter;
mod map;
mod ops;
mod reshape;
mod sort;
mod view;

pub use iter::{AxisIter, ElemIter};
pub use sort::sort_dyn;
pub use view::View;

use std::marker::PhantomData;

use crate::buffer::BufferHandle;
use crate::dtype::{DType, Element};
use crate::error::{CoreError, Result};
use crate::layout::{self, Shape, Strides};

/// Normalize a possibly negative axis against a rank, failing outside
/// `[0, ndim)`.
pub(crate) fn normalize_axis(axis: isize, ndim: usize) -> Result<usize> {
    let norm = if axis < 0 { axis + ndim as isize } else { axis };
    if norm < 0 || norm >= ndim as isize {
        return Err(CoreError::AxisOutOfBounds { axis, ndim });
    }
    Ok(norm as usize)
}

/// The untyped array descriptor.
///
/// Immutable once constructed except by wholesale replacement; derivation
/// operations (slicing, broadcasting, transposition) build new cores over
/// the same buffer handle.
#[derive(Debug, Clone)]
pub struct ArrayCore {
    shape: Shape,
    strides: Strides,
    offset: isize,
    dtype: DType,
    buffer: BufferHandle,
}

impl ArrayCore {
    /// Build a descriptor, validating its invariants.
    ///
    /// Fails if shape and strides disagree in length, or if any valid
    /// multi-index would address bytes outside the buffer. Zero-element
    /// descriptors skip the span check (nothing is ever dereferenced).
    pub fn new(
        shape: Shape,
        strides: Strides,
        offset: isize,
        dtype: DType,
        buffer: BufferHandle,
    ) -> Result<Self> {
        if shape.len() != strides.len() {
            return Err(CoreError::ShapeStridesMismatch {
                shape: shape.to_vec(),
                strides_len: strides.len(),
            });
        }

        if layout::num_elements(&shape) > 0 {
            let mut min = offset;
            let mut max = offset;
            for (&dim, &stride) in shape.iter().zip(strides.iter()) {
                let span = (dim as isize - 1) * stride;
                if span >= 0 {
                    max += span;
                } else {
                    min += span;
                }
            }
            let max_end = max + dtype.size_of() as isize;
            if min < 0 || max_end > buffer.len() as isize {
                return Err(CoreError::OutOfBufferBounds {
                    min,
                    max: max_end,
                    len: buffer.len(),
                });
            }
        }

        Ok(Self {
            shape,
            strides,
            offset,
            dtype,
            buffer,
        })
    }

    /// Build a contiguous row-major descriptor at offset 0.
    pub fn contiguous(shape: Shape, dtype: DType, buffer: BufferHandle) -> Result<Self> {
        let strides = layout::contiguous_strides(&shape, dtype.size_of());
        Self::new(shape, strides, 0, dtype, buffer)
    }

    /// The shape as a slice.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// The strides as a slice (signed byte deltas).
    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    /// Byte displacement of the logical origin from the buffer base.
    #[inline]
    pub fn offset(&self) -> isize {
        self.offset
    }

    /// The element kind stored in this descriptor's buffer.
    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Size of one element, in bytes.
    #[inline]
    pub fn elem_size(&self) -> usize {
        self.dtype.size_of()
    }

    /// The number of dimensions (rank).
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total element count (1 for a rank-0 scalar).
    #[inline]
    pub fn num_elements(&self) -> usize {
        layout::num_elements(&self.shape)
    }

    /// The shared buffer handle.
    #[inline]
    pub fn buffer(&self) -> &BufferHandle {
        &self.buffer
    }

    /// Base pointer of the backing buffer.
    #[inline]
    pub fn data_ptr(&self) -> *mut u8 {
        self.buffer.data()
    }

    /// Whether strides match the canonical row-major layout for the shape.
    pub fn is_contiguous(&self) -> bool {
        layout::is_contiguous(&self.shape, &self.strides, self.elem_size())
    }

    /// Byte offset of a multi-index: the inner product of indices and
    /// strides plus the base offset. Every component is range-checked
    /// against the corresponding shape entry.
    pub fn byte_offset(&self, index: &[usize]) -> Result<isize> {
        if index.len() != self.ndim() {
            return Err(CoreError::DimensionMismatch {
                expected: self.shape.to_vec(),
                got: index.to_vec(),
            });
        }
        let mut off = self.offset;
        for (axis, (&i, (&dim, &stride))) in index
            .iter()
            .zip(self.shape.iter().zip(self.strides.iter()))
            .enumerate()
        {
            if i >= dim {
                return Err(CoreError::IndexOutOfBounds {
                    index: i as isize,
                    axis,
                    size: dim,
                });
            }
            off += i as isize * stride;
        }
        Ok(off)
    }

    /// Broadcast this descriptor to `target` without copying.
    ///
    /// Shapes are right-aligned; matching axes carry their stride,
    /// size-1 axes (and absent leading axes) get stride 0 so the same
    /// element is read repeatedly. Anything else fails.
    pub fn broadcast_to(&self, target: &[usize]) -> Result<ArrayCore> {
        let ndim = target.len();
        if self.ndim() > ndim {
            return Err(CoreError::BroadcastToMismatch {
                shape: self.shape.to_vec(),
                target: target.to_vec(),
            });
        }

        let lead = ndim - self.ndim();
        let mut strides: Strides = Strides::with_capacity(ndim);
        for (i, &size) in target.iter().enumerate() {
            let stride = match i.checked_sub(lead) {
                None => 0,
                Some(j) => {
                    let own = self.shape[j];
                    if own == size {
                        self.strides[j]
                    } else if own == 1 {
                        0
                    } else {
                        return Err(CoreError::BroadcastToMismatch {
                            shape: self.shape.to_vec(),
                            target: target.to_vec(),
                        });
                    }
                }
            };
            strides.push(stride);
        }

        ArrayCore::new(
            target.iter().copied().collect(),
            strides,
            self.offset,
            self.dtype,
            self.buffer.clone(),
        )
    }

    /// Reverse all axes: the descriptor-level transpose. Shares the
    /// buffer; never copies.
    pub fn transposed(&self) -> ArrayCore {
        let shape: Shape = self.shape.iter().rev().copied().collect();
        let strides: Strides = self.strides.iter().rev().copied().collect();
        ArrayCore {
            shape,
            strides,
            offset: self.offset,
            dtype: self.dtype,
            buffer: self.buffer.clone(),
        }
    }
}

/// A typed n-dimensional array.
///
/// Value semantics apply to the *descriptor*: cloning copies the
/// shape/strides/offset and bumps the shared buffer's reference count.
/// Writing through any view of the buffer is observable through every
/// other array over the overlapping region.
#[derive(Debug, Clone)]
pub struct Array<T: Element> {
    core: ArrayCore,
    marker: PhantomData<T>,
}

impl<T: Element> Array<T> {
    /// Attach a typed front-end to a descriptor.
    ///
    /// Fails unless the core's element tag matches `T`.
    pub fn from_core(core: ArrayCore) -> Result<Self> {
        if core.dtype() != T::DTYPE {
            return Err(CoreError::DTypeMismatch {
                core: core.dtype(),
                requested: T::DTYPE,
            });
        }
        Ok(Self {
            core,
            marker: PhantomData,
        })
    }

    /// Wrap a core that is already known to carry `T::DTYPE` (derivation
    /// ops preserve the tag).
    pub(crate) fn from_core_unchecked(core: ArrayCore) -> Self {
        debug_assert_eq!(core.dtype(), T::DTYPE);
        Self {
            core,
            marker: PhantomData,
        }
    }

    /// The underlying descriptor.
    #[inline]
    pub fn core(&self) -> &ArrayCore {
        &self.core
    }

    /// The shape as a slice.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.core.shape()
    }

    /// The strides as a slice (signed byte deltas).
    #[inline]
    pub fn strides(&self) -> &[isize] {
        self.core.strides()
    }

    /// Byte displacement of the logical origin from the buffer base.
    #[inline]
    pub fn offset(&self) -> isize {
        self.core.offset()
    }

    /// The number of dimensions (rank).
    #[inline]
    pub fn ndim(&self) -> usize {
        self.core.ndim()
    }

    /// Total element count.
    #[inline]
    pub fn numel(&self) -> usize {
        self.core.num_elements()
    }

    /// Whether the array has zero elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.numel() == 0
    }

    /// Whether the descriptor is row-major contiguous.
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.core.is_contiguous()
    }

    /// Read the element at a byte offset from the buffer base.
    ///
    /// # Safety
    /// `byte_off` must be an in-bounds, `T`-aligned offset produced by
    /// this array's descriptor.
    pub(crate) unsafe fn read_at(&self, byte_off: isize) -> T {
        *(self.core.data_ptr().offset(byte_off) as *const T)
    }

    /// Write the element at a byte offset from the buffer base.
    ///
    /// # Safety
    /// Same contract as [`Self::read_at`].
    pub(crate) unsafe fn write_at(&self, byte_off: isize, value: T) {
        *(self.core.data_ptr().offset(byte_off) as *mut T) = value;
    }

    /// The element at a multi-index.
    pub fn get(&self, index: &[usize]) -> Result<T> {
        let off = self.core.byte_offset(index)?;
        // Safety: byte_offset range-checked the index against a validated
        // descriptor.
        Ok(unsafe { self.read_at(off) })
    }

    /// Overwrite the element at a multi-index.
    ///
    /// The write lands in the shared buffer and is observable through
    /// every aliasing array.
    pub fn set(&mut self, index: &[usize], value: T) -> Result<()> {
        let off = self.core.byte_offset(index)?;
        // Safety: as for `get`.
        unsafe { self.write_at(off, value) };
        Ok(())
    }

    /// The contiguous fast-path accessor: the elements as one flat slice
    /// in row-major order.
    ///
    /// Fails with [`CoreError::NotContiguous`] on non-contiguous
    /// descriptors.
    pub fn as_slice(&self) -> Result<&[T]> {
        if !self.is_contiguous() {
            return Err(CoreError::NotContiguous);
        }
        // Safety: a contiguous descriptor spans exactly numel elements
        // starting at its (validated, aligned) origin.
        Ok(unsafe {
            let base = self.core.data_ptr().offset(self.core.offset());
            std::slice::from_raw_parts(base as *const T, self.numel())
        })
    }

    /// Mutable variant of [`Self::as_slice`].
    pub fn as_mut_slice(&mut self) -> Result<&mut [T]> {
        if !self.is_contiguous() {
            return Err(CoreError::NotContiguous);
        }
        // Safety: as for `as_slice`.
        Ok(unsafe {
            let base = self.core.data_ptr().offset(self.core.offset());
            std::slice::from_raw_parts_mut(base as *mut T, self.numel())
        })
    }

    /// Collect all elements into a `Vec` in logical row-major order.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }
}

impl<T: Element> PartialEq for Array<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.iter().eq(other.iter())
    }
}
