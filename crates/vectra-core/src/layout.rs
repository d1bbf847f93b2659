//! Pure shape and stride arithmetic.
//!
//! Shapes are element counts per axis; strides are signed byte deltas per
//! axis; an offset is a signed byte displacement from the buffer base.
//! Everything here is a free function over slices, independent of any
//! buffer, so the descriptor and iterator layers can share one source of
//! truth for layout math.

use smallvec::SmallVec;

use crate::error::{CoreError, Result};

/// Per-axis element counts. Ranks up to 4 stay inline.
pub type Shape = SmallVec<[usize; 4]>;

/// Per-axis signed byte deltas.
pub type Strides = SmallVec<[isize; 4]>;

/// Total element count for a shape.
///
/// The empty shape (a scalar) counts as 1; any zero-length axis makes the
/// whole count 0.
#[inline]
pub fn num_elements(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Overflow-checked element count, used at allocation sites.
pub fn checked_num_elements(shape: &[usize]) -> Result<usize> {
    shape
        .iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .ok_or_else(|| CoreError::InvalidShape {
            shape: shape.to_vec(),
            reason: "element count overflows usize",
        })
}

/// Row-major (C-order) byte strides for a shape.
///
/// The rightmost axis gets the smallest stride (`elem_size`);
/// `strides[i] = elem_size * product(shape[i+1..])`.
pub fn contiguous_strides(shape: &[usize], elem_size: usize) -> Strides {
    let ndim = shape.len();
    let mut strides: Strides = SmallVec::from_elem(elem_size as isize, ndim);
    for i in (0..ndim.saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * shape[i + 1] as isize;
    }
    strides
}

/// Whether `strides` match the canonical row-major layout for `shape`.
///
/// Walks from the innermost axis outward, confirming each stride equals
/// the running product of trailing sizes times the element size.
pub fn is_contiguous(shape: &[usize], strides: &[isize], elem_size: usize) -> bool {
    let mut expected = elem_size as isize;
    for (&dim, &stride) in shape.iter().zip(strides.iter()).rev() {
        if stride != expected {
            return false;
        }
        expected *= dim as isize;
    }
    true
}

/// Broadcast two shapes to their common shape.
///
/// Shapes are right-aligned, missing leading axes padded with 1. Per axis
/// the result is the larger size when either side is 1 or both agree;
/// anything else is an error.
pub fn broadcast_pair(a: &[usize], b: &[usize]) -> Result<Shape> {
    let ndim = a.len().max(b.len());
    let mut out: Shape = SmallVec::with_capacity(ndim);
    for i in 0..ndim {
        // Right-aligned axis lookup; absent axes behave as size 1.
        let da = i
            .checked_sub(ndim - a.len())
            .map_or(1, |j| a[j]);
        let db = i
            .checked_sub(ndim - b.len())
            .map_or(1, |j| b[j]);
        if da == db || db == 1 {
            out.push(da);
        } else if da == 1 {
            out.push(db);
        } else {
            return Err(CoreError::NotBroadcastable {
                shape_a: a.to_vec(),
                shape_b: b.to_vec(),
            });
        }
    }
    Ok(out)
}

/// Fold [`broadcast_pair`] left to right over a list of shapes.
///
/// The empty list yields the empty (scalar) shape.
pub fn broadcast_shapes(shapes: &[&[usize]]) -> Result<Shape> {
    let mut out = Shape::new();
    for shape in shapes {
        out = broadcast_pair(&out, shape)?;
    }
    Ok(out)
}

/// Sequential stride deltas for an odometer-style traversal.
///
/// `delta[last] = strides[last]`; for every other axis
/// `delta[i] = strides[i] - shape[i+1] * strides[i+1]`. A cursor that adds
/// `delta[i]` for each axis it wraps during a carry lands exactly where a
/// full offset recomputation would.
pub fn seq_strides(shape: &[usize], strides: &[isize]) -> Strides {
    let ndim = strides.len();
    let mut deltas: Strides = SmallVec::from_slice(strides);
    for i in 0..ndim.saturating_sub(1) {
        deltas[i] = strides[i] - shape[i + 1] as isize * strides[i + 1];
    }
    deltas
}

/// The maximal trailing run of axes that collapses into one linear walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InnerRun {
    /// First axis of the run; axes `boundary..ndim` are collapsed.
    pub boundary: usize,
    /// Byte step between consecutive elements of the run.
    pub stride: isize,
    /// Total element count of the run.
    pub len: usize,
}

/// Find the maximal trailing group of axes whose strides are consistent
/// with a single linear stride over their combined element count.
///
/// A fully contiguous descriptor collapses to one run over the whole
/// array; the iterator's fast path is built on this.
pub fn inner_loop_run(shape: &[usize], strides: &[isize]) -> InnerRun {
    let ndim = shape.len();
    if ndim == 0 {
        return InnerRun {
            boundary: 0,
            stride: 0,
            len: 1,
        };
    }

    let step = strides[ndim - 1];
    let mut boundary = ndim - 1;
    let mut len = shape[ndim - 1];
    while boundary > 0 {
        let outer = boundary - 1;
        if strides[outer] != shape[boundary] as isize * strides[boundary] {
            break;
        }
        len *= shape[outer];
        boundary = outer;
    }

    InnerRun {
        boundary,
        stride: step,
        len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_elements() {
        assert_eq!(num_elements(&[2, 3, 4]), 24);
        assert_eq!(num_elements(&[5]), 5);
        assert_eq!(num_elements(&[]), 1);
        assert_eq!(num_elements(&[3, 0, 2]), 0);
    }

    #[test]
    fn test_checked_num_elements_overflow() {
        assert!(checked_num_elements(&[usize::MAX, 2]).is_err());
        assert_eq!(checked_num_elements(&[2, 3]).unwrap(), 6);
    }

    #[test]
    fn test_contiguous_strides() {
        assert_eq!(contiguous_strides(&[2, 3, 4], 8).as_slice(), &[96, 32, 8]);
        assert_eq!(contiguous_strides(&[5], 4).as_slice(), &[4]);
        assert!(contiguous_strides(&[], 8).is_empty());
    }

    #[test]
    fn test_is_contiguous() {
        assert!(is_contiguous(&[2, 3], &[24, 8], 8));
        assert!(!is_contiguous(&[2, 3], &[8, 24], 8));
        assert!(!is_contiguous(&[2, 3], &[24, 0], 8));
        // Scalar descriptor is trivially contiguous.
        assert!(is_contiguous(&[], &[], 8));
    }

    #[test]
    fn test_broadcast_pair() {
        assert_eq!(broadcast_pair(&[3, 1], &[1, 4]).unwrap().as_slice(), &[3, 4]);
        assert_eq!(broadcast_pair(&[2, 3], &[3]).unwrap().as_slice(), &[2, 3]);
        assert_eq!(broadcast_pair(&[], &[2, 2]).unwrap().as_slice(), &[2, 2]);
        assert!(broadcast_pair(&[2, 3], &[2, 4]).is_err());
    }

    #[test]
    fn test_broadcast_shapes_fold() {
        let shapes: [&[usize]; 3] = [&[3, 1], &[1, 4], &[4]];
        assert_eq!(broadcast_shapes(&shapes).unwrap().as_slice(), &[3, 4]);
        assert!(broadcast_shapes(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_seq_strides_contiguous() {
        // For contiguous strides every delta collapses to the element size.
        let shape = [2, 3, 4];
        let strides = contiguous_strides(&shape, 8);
        let deltas = seq_strides(&shape, &strides);
        assert_eq!(deltas.as_slice(), &[8, 8, 8]);
    }

    #[test]
    fn test_seq_strides_transposed() {
        // Transposed (3, 2) view of a contiguous (2, 3) f64 array:
        // strides [8, 24]. delta[0] = 8 - 2*24 = -40, delta[1] = 24.
        let deltas = seq_strides(&[3, 2], &[8, 24]);
        assert_eq!(deltas.as_slice(), &[-40, 24]);
    }

    #[test]
    fn test_inner_loop_run_contiguous() {
        let shape = [2, 3, 4];
        let strides = contiguous_strides(&shape, 8);
        let run = inner_loop_run(&shape, &strides);
        assert_eq!(run, InnerRun { boundary: 0, stride: 8, len: 24 });
    }

    #[test]
    fn test_inner_loop_run_sliced() {
        // Row-sliced (2, 3) view with a row gap: strides [48, 8] over a
        // (4, 3) f64 parent. Only the last axis collapses.
        let run = inner_loop_run(&[2, 3], &[48, 8]);
        assert_eq!(run, InnerRun { boundary: 1, stride: 8, len: 3 });
    }

    #[test]
    fn test_inner_loop_run_broadcast() {
        // All-zero strides collapse completely: one run re-reading a cell.
        let run = inner_loop_run(&[3, 4], &[0, 0]);
        assert_eq!(run, InnerRun { boundary: 0, stride: 0, len: 12 });
    }

    #[test]
    fn test_inner_loop_run_scalar() {
        let run = inner_loop_run(&[], &[]);
        assert_eq!(run.len, 1);
        assert_eq!(run.boundary, 0);
    }
}
