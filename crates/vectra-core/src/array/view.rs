//! Write-through views.
//!
//! A [`View`] wraps an aliasing descriptor and gives it assignment
//! semantics: filling with a scalar or assigning a broadcastable array
//! writes into the shared buffer positions the descriptor maps to, rather
//! than rebinding the descriptor. Every other array over an overlapping
//! region observes the writes immediately. On zero-stride broadcast axes
//! one physical cell is written repeatedly.

use crate::dtype::Element;
use crate::error::Result;
use crate::index::Index;

use super::iter::RawCursor;
use super::Array;

/// A write-through handle over an aliasing descriptor.
pub struct View<T: Element> {
    target: Array<T>,
}

impl<T: Element> Array<T> {
    /// A write-through view of the whole array.
    pub fn view(&self) -> View<T> {
        View {
            target: self.clone(),
        }
    }

    /// A write-through view of the sub-array selected by an index list.
    pub fn view_at(&self, entries: &[Index]) -> Result<View<T>> {
        Ok(View {
            target: self.slice(entries)?,
        })
    }
}

impl<T: Element> View<T> {
    /// The aliasing array this view writes through.
    pub fn target(&self) -> &Array<T> {
        &self.target
    }

    /// The view's shape.
    pub fn shape(&self) -> &[usize] {
        self.target.shape()
    }

    /// Assign `value` to every position the view maps to.
    pub fn fill(&mut self, value: T) {
        let mut cursor = RawCursor::new(self.target.core());
        while let Some(ptr) = cursor.next_ptr() {
            // Safety: the cursor yields in-bounds, aligned element
            // pointers of the view's descriptor.
            unsafe { *(ptr as *mut T) = value };
        }
    }

    /// Assign a broadcastable array into the view, element by element.
    ///
    /// `src` is broadcast to the view's shape; each logical position of
    /// the view is overwritten with the corresponding source element.
    pub fn assign(&mut self, src: &Array<T>) -> Result<()> {
        let src = src.broadcast_to(self.shape())?;
        let mut dst_cursor = RawCursor::new(self.target.core());
        let mut src_cursor = RawCursor::new(src.core());
        while let (Some(d), Some(s)) = (dst_cursor.next_ptr(), src_cursor.next_ptr()) {
            // Safety: both cursors yield in-bounds element pointers and
            // run for the same element count.
            unsafe { *(d as *mut T) = *(s as *const T) };
        }
        Ok(())
    }

    /// Combine a broadcastable array into the view with `f`, writing
    /// `f(current, incoming)` back through the descriptor.
    ///
    /// This read-modify-write primitive is what axis reductions
    /// accumulate with.
    pub fn zip_assign<F>(&mut self, src: &Array<T>, f: F) -> Result<()>
    where
        F: Fn(T, T) -> T,
    {
        let src = src.broadcast_to(self.shape())?;
        let mut dst_cursor = RawCursor::new(self.target.core());
        let mut src_cursor = RawCursor::new(src.core());
        while let (Some(d), Some(s)) = (dst_cursor.next_ptr(), src_cursor.next_ptr()) {
            // Safety: as for `assign`.
            unsafe {
                let d = d as *mut T;
                *d = f(*d, *(s as *const T));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::index::Slice;

    #[test]
    fn test_fill_through_slice() {
        let a = Array::<i32>::from_vec(vec![1, 2, 3, 4, 5, 6], &[2, 3]).unwrap();
        a.view_at(&[Index::At(1)]).unwrap().fill(0);
        // The write is visible through the original array.
        assert_eq!(a.to_vec(), vec![1, 2, 3, 0, 0, 0]);
    }

    #[test]
    fn test_fill_stepped_column() {
        let a = Array::<i32>::from_vec((0..10).collect(), &[10]).unwrap();
        a.view_at(&[Index::Range(Slice::full().step_by(2))])
            .unwrap()
            .fill(-1);
        assert_eq!(a.to_vec(), vec![-1, 1, -1, 3, -1, 5, -1, 7, -1, 9]);
    }

    #[test]
    fn test_assign_row_vector_into_row() {
        let a = Array::<f64>::zeros(&[2, 3]).unwrap();
        let row = Array::<f64>::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
        a.view_at(&[Index::At(0)]).unwrap().assign(&row).unwrap();
        assert_eq!(a.to_vec(), vec![1.0, 2.0, 3.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_assign_broadcasts_scalar_array() {
        let a = Array::<f64>::zeros(&[2, 2]).unwrap();
        let s = Array::<f64>::singleton(5.0).unwrap();
        a.view().assign(&s).unwrap();
        assert!(a.iter().all(|x| x == 5.0));
    }

    #[test]
    fn test_assign_shape_mismatch() {
        let a = Array::<f64>::zeros(&[2, 2]).unwrap();
        let bad = Array::<f64>::zeros(&[3]).unwrap();
        assert!(a.view().assign(&bad).is_err());
    }

    #[test]
    fn test_writes_visible_through_all_aliases() {
        let a = Array::<i32>::from_vec(vec![1, 2, 3, 4], &[2, 2]).unwrap();
        let t = a.transpose();
        a.view_at(&[Index::At(0), Index::At(1)])
            .unwrap()
            .fill(99);
        assert_eq!(t.get(&[1, 0]).unwrap(), 99);
    }

    #[test]
    fn test_broadcast_view_writes_one_cell_repeatedly() {
        // A zero-stride broadcast view maps many logical positions onto
        // one physical cell; filling it writes that cell for each.
        let a = Array::<i32>::from_vec(vec![7], &[1]).unwrap();
        let b = a.broadcast_to(&[4]).unwrap();
        b.view().fill(3);
        assert_eq!(a.get(&[0]).unwrap(), 3);
        assert_eq!(b.to_vec(), vec![3, 3, 3, 3]);
    }

    #[test]
    fn test_zip_assign_accumulates() {
        let acc = Array::<i32>::zeros(&[3]).unwrap();
        let x = Array::<i32>::from_vec(vec![1, 2, 3], &[3]).unwrap();
        let mut v = acc.view();
        v.zip_assign(&x, |a, b| a + b).unwrap();
        v.zip_assign(&x, |a, b| a + b).unwrap();
        assert_eq!(acc.to_vec(), vec![2, 4, 6]);
    }
}
