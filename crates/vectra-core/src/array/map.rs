//! The elementwise engine: broadcasting-aware map and zip.
//!
//! Every arithmetic operator, comparison, and vectorized math function is
//! a thin wrapper around the functions here: broadcast all inputs to
//! their common shape, allocate a fresh contiguous output, and walk
//! inputs and output in lockstep.

use crate::dtype::Element;
use crate::error::Result;
use crate::layout::broadcast_pair;

use super::iter::RawCursor;
use super::Array;

impl<T: Element> Array<T> {
    /// Apply `f` to every element, producing a fresh contiguous array of
    /// the same shape.
    pub fn map<U, F>(&self, f: F) -> Result<Array<U>>
    where
        U: Element,
        F: Fn(T) -> U,
    {
        let mut out = Array::<U>::empty(self.shape())?;
        for (slot, v) in out.as_mut_slice()?.iter_mut().zip(self.iter()) {
            *slot = f(v);
        }
        Ok(out)
    }

    /// Apply `f` elementwise across this array and `other`, broadcasting
    /// both to their common shape first.
    ///
    /// The output is freshly allocated and contiguous; the inputs are
    /// read through zero-copy broadcast descriptors.
    pub fn zip_map<U, R, F>(&self, other: &Array<U>, f: F) -> Result<Array<R>>
    where
        U: Element,
        R: Element,
        F: Fn(T, U) -> R,
    {
        let bshape = broadcast_pair(self.shape(), other.shape())?;
        let a = self.core().broadcast_to(&bshape)?;
        let b = other.core().broadcast_to(&bshape)?;
        let out = Array::<R>::empty(&bshape)?;

        let mut ca = RawCursor::new(&a);
        let mut cb = RawCursor::new(&b);
        let mut co = RawCursor::new(out.core());
        while let (Some(po), Some(pa), Some(pb)) = (co.next_ptr(), ca.next_ptr(), cb.next_ptr())
        {
            // Safety: all three cursors yield in-bounds element pointers
            // and run for the same broadcast element count.
            unsafe { *(po as *mut R) = f(*(pa as *const T), *(pb as *const U)) };
        }
        Ok(out)
    }

    /// Ternary variant of [`Self::zip_map`].
    pub fn zip_map3<U, V, R, F>(
        &self,
        second: &Array<U>,
        third: &Array<V>,
        f: F,
    ) -> Result<Array<R>>
    where
        U: Element,
        V: Element,
        R: Element,
        F: Fn(T, U, V) -> R,
    {
        let bshape = broadcast_pair(self.shape(), second.shape())?;
        let bshape = broadcast_pair(&bshape, third.shape())?;
        let a = self.core().broadcast_to(&bshape)?;
        let b = second.core().broadcast_to(&bshape)?;
        let c = third.core().broadcast_to(&bshape)?;
        let out = Array::<R>::empty(&bshape)?;

        let mut ca = RawCursor::new(&a);
        let mut cb = RawCursor::new(&b);
        let mut cc = RawCursor::new(&c);
        let mut co = RawCursor::new(out.core());
        while let (Some(po), Some(pa), Some(pb), Some(pc)) =
            (co.next_ptr(), ca.next_ptr(), cb.next_ptr(), cc.next_ptr())
        {
            // Safety: as for `zip_map`.
            unsafe {
                *(po as *mut R) = f(*(pa as *const T), *(pb as *const U), *(pc as *const V));
            }
        }
        Ok(out)
    }

    /// Apply `f` to every element in place, writing through the
    /// descriptor (views included).
    pub fn map_inplace<F>(&mut self, f: F)
    where
        F: Fn(T) -> T,
    {
        let mut cursor = RawCursor::new(self.core());
        while let Some(ptr) = cursor.next_ptr() {
            // Safety: the cursor yields in-bounds, aligned element
            // pointers of this descriptor.
            unsafe {
                let p = ptr as *mut T;
                *p = f(*p);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::index::Index;

    #[test]
    fn test_map() {
        let a = Array::<i32>::from_vec(vec![1, 2, 3, 4], &[2, 2]).unwrap();
        let b = a.map(|x| x * 10).unwrap();
        assert_eq!(b.to_vec(), vec![10, 20, 30, 40]);
        assert_eq!(b.shape(), &[2, 2]);
    }

    #[test]
    fn test_map_changes_element_type() {
        let a = Array::<f64>::from_vec(vec![1.5, -2.0], &[2]).unwrap();
        let b: Array<bool> = a.map(|x| x > 0.0).unwrap();
        assert_eq!(b.to_vec(), vec![true, false]);
    }

    #[test]
    fn test_map_over_view_reads_logical_order() {
        let a = Array::<i32>::from_vec(vec![1, 2, 3, 4], &[2, 2]).unwrap();
        let t = a.transpose();
        let b = t.map(|x| x).unwrap();
        assert_eq!(b.to_vec(), vec![1, 3, 2, 4]);
        assert!(b.is_contiguous());
    }

    #[test]
    fn test_zip_map_same_shape() {
        let a = Array::<i32>::from_vec(vec![1, 2, 3], &[3]).unwrap();
        let b = Array::<i32>::from_vec(vec![10, 20, 30], &[3]).unwrap();
        let c = a.zip_map(&b, |x, y| x + y).unwrap();
        assert_eq!(c.to_vec(), vec![11, 22, 33]);
    }

    #[test]
    fn test_zip_map_broadcasts_vector_across_rows() {
        // (3, 3) zeros + (3,) ones -> all ones.
        let a = Array::<f64>::zeros(&[3, 3]).unwrap();
        let b = Array::<f64>::ones(&[3]).unwrap();
        let c = a.zip_map(&b, |x, y| x + y).unwrap();
        assert_eq!(c.shape(), &[3, 3]);
        assert!(c.iter().all(|x| x == 1.0));
    }

    #[test]
    fn test_zip_map_broadcasts_column_and_row() {
        let col = Array::<i32>::from_vec(vec![0, 10], &[2, 1]).unwrap();
        let row = Array::<i32>::from_vec(vec![1, 2, 3], &[3]).unwrap();
        let c = col.zip_map(&row, |x, y| x + y).unwrap();
        assert_eq!(c.shape(), &[2, 3]);
        assert_eq!(c.to_vec(), vec![1, 2, 3, 11, 12, 13]);
    }

    #[test]
    fn test_zip_map_incompatible_shapes() {
        let a = Array::<i32>::zeros(&[2, 3]).unwrap();
        let b = Array::<i32>::zeros(&[2, 4]).unwrap();
        assert!(a.zip_map(&b, |x, y| x + y).is_err());
    }

    #[test]
    fn test_zip_map3() {
        let a = Array::<f64>::from_vec(vec![1.0, 2.0], &[2]).unwrap();
        let b = Array::<f64>::from_vec(vec![10.0, 20.0], &[2]).unwrap();
        let c = Array::<f64>::singleton(0.5).unwrap();
        let r = a.zip_map3(&b, &c, |x, y, z| x * y + z).unwrap();
        assert_eq!(r.to_vec(), vec![10.5, 40.5]);
    }

    #[test]
    fn test_map_inplace_through_view() {
        let a = Array::<i32>::from_vec(vec![1, 2, 3, 4, 5, 6], &[2, 3]).unwrap();
        let mut row = a.slice(&[Index::At(1)]).unwrap();
        row.map_inplace(|x| x * 100);
        assert_eq!(a.to_vec(), vec![1, 2, 3, 400, 500, 600]);
    }
}
