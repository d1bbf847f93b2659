//! `vectra-core` — Foundation crate for the Vectra ecosystem.
//!
//! A strided n-dimensional array engine: descriptors (shape, strides,
//! offset) over shared byte buffers, with zero-copy views, broadcasting,
//! strided iteration, and a broadcasting-aware elementwise engine. All
//! other `vectra-*` crates consume arrays purely through the
//! construction, indexing, and iteration surface defined here.
//!
//! # Design
//!
//! - Slicing, broadcasting, transposition, and (contiguous) reshape are
//!   descriptor operations: they share the source buffer and never copy
//!   elements. Writing through any view is observable through every
//!   aliasing array.
//! - Generic over element types via the [`Element`] / [`Scalar`] /
//!   [`Float`] trait hierarchy, with a closed [`DType`] tag set for
//!   type-erased dispatch.
//! - Single-threaded by contract: the buffer share count is not atomic
//!   and no locking exists. Aliasing, not racing, is the hazard to manage.
//! - `unsafe` is confined to the buffer layer and to pointer accesses
//!   whose bounds the descriptor constructor has already validated.

pub mod array;
pub mod buffer;
pub mod dtype;
pub mod error;
pub mod index;
pub mod layout;
pub mod math;

// Re-export key types at crate root for convenience.
pub use array::{Array, ArrayCore, AxisIter, ElemIter, View};
pub use buffer::{Buffer, BufferHandle};
pub use dtype::{DType, Element, Float, Integer, Real, Scalar};
pub use error::{CoreError, Result};
pub use index::{Index, Slice};

/// Items intended for glob-import: `use vectra_core::prelude::*;`
pub mod prelude {
    pub use crate::array::{Array, ArrayCore, View};
    pub use crate::dtype::{DType, Element, Float, Integer, Real, Scalar};
    pub use crate::error::{CoreError, Result};
    pub use crate::index::{Index, Slice};
}
