//! Shared byte buffers backing every array.
//!
//! A [`Buffer`] either owns an allocation or wraps foreign memory, and is
//! always handed out behind a reference-counted [`BufferHandle`]. Every
//! descriptor derived from an array (slice, broadcast, transpose, reshape
//! view) clones the handle, so the bytes are freed exactly once: when the
//! last handle drops. Wrapped foreign memory is never freed here; its
//! optional owner token is released instead.
//!
//! The engine is single-threaded by contract, so the handle is an `Rc`.
//! `BufferHandle` is the one alias to change should cross-thread sharing
//! ever be required.

use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::any::Any;
use std::ptr::NonNull;
use std::rc::Rc;

use crate::error::{CoreError, Result};

/// Alignment of owned allocations. Covers every supported element kind.
const BUFFER_ALIGN: usize = 16;

/// Reference-counted handle to a byte buffer.
pub type BufferHandle = Rc<Buffer>;

/// A contiguous byte region, either owned or wrapped.
pub struct Buffer {
    ptr: NonNull<u8>,
    len: usize,
    kind: BufferKind,
}

enum BufferKind {
    /// Allocated by [`Buffer::allocate`]; freed on drop.
    Owned { layout: Layout },
    /// Foreign memory. The token keeps the true owner alive for as long as
    /// this buffer exists; the pointee itself is never freed here.
    External { _owner: Option<Rc<dyn Any>> },
}

impl Buffer {
    /// Allocate an owned, zero-initialized buffer of `size` bytes.
    ///
    /// Allocation failure surfaces as [`CoreError::AllocationFailed`];
    /// there is no partial-allocation fallback.
    pub fn allocate(size: usize) -> Result<BufferHandle> {
        // Zero-size arrays still get a live (1-byte) allocation so that
        // `data()` is always a valid pointer.
        let layout = Layout::from_size_align(size.max(1), BUFFER_ALIGN)
            .map_err(|_| CoreError::AllocationFailed { size })?;
        // Safety: layout has non-zero size.
        let raw = unsafe { alloc_zeroed(layout) };
        let ptr = NonNull::new(raw).ok_or(CoreError::AllocationFailed { size })?;
        Ok(Rc::new(Buffer {
            ptr,
            len: size,
            kind: BufferKind::Owned { layout },
        }))
    }

    /// Wrap `len` bytes of foreign memory without copying or taking
    /// ownership.
    ///
    /// If `owner` is `Some`, the token is kept alive for the lifetime of
    /// the returned handle; if `None`, the caller must keep the pointee
    /// alive for at least as long as any handle (and any array derived
    /// from it) exists.
    ///
    /// # Safety
    /// `ptr` must point to at least `len` readable and writable bytes that
    /// remain valid for the lifetime of the returned handle.
    pub unsafe fn from_raw(ptr: *mut u8, len: usize, owner: Option<Rc<dyn Any>>) -> Result<BufferHandle> {
        let ptr = NonNull::new(ptr).ok_or(CoreError::InvalidArgument {
            reason: "cannot wrap a null pointer",
        })?;
        Ok(Rc::new(Buffer {
            ptr,
            len,
            kind: BufferKind::External { _owner: owner },
        }))
    }

    /// Base pointer of the byte region.
    #[inline]
    pub fn data(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// Length of the byte region.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the region has zero length.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether this buffer owns (and will free) its allocation.
    pub fn is_owned(&self) -> bool {
        matches!(self.kind, BufferKind::Owned { .. })
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        if let BufferKind::Owned { layout } = &self.kind {
            // Safety: allocated in `allocate` with this exact layout.
            unsafe { dealloc(self.ptr.as_ptr(), *layout) };
        }
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.len)
            .field("owned", &self.is_owned())
            .finish()
    }
}
