//! `Display` formatting for [`Array`].
//!
//! Reads go through the strided accessors, so views (slices, transposes,
//! broadcasts) print their logical contents.

use core::fmt;

use crate::dtype::Element;

use super::Array;

impl<T: Element> fmt::Display for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "array([], shape={:?})", self.shape());
        }

        match self.ndim() {
            0 => {
                let v = self.get(&[]).map_err(|_| fmt::Error)?;
                write!(f, "array({v})")
            }
            1 => {
                write!(f, "array([")?;
                for (i, v) in self.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "])")
            }
            2 => {
                let rows = self.shape()[0];
                writeln!(f, "array([")?;
                for (r, row) in self.axis_iter(0).map_err(|_| fmt::Error)?.enumerate() {
                    write!(f, "  [")?;
                    for (c, v) in row.iter().enumerate() {
                        if c > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{v}")?;
                    }
                    if r < rows - 1 {
                        writeln!(f, "],")?;
                    } else {
                        writeln!(f, "]")?;
                    }
                }
                write!(f, "])")
            }
            _ => {
                // 3-D and higher: shape plus a flat data summary.
                let mut it = self.iter();
                let first = it.next().ok_or(fmt::Error)?;
                match it.last() {
                    Some(last) => write!(
                        f,
                        "array(shape={:?}, data=[{first}, ..., {last}])",
                        self.shape(),
                    ),
                    None => write!(f, "array(shape={:?}, data=[{first}])", self.shape()),
                }
            }
        }
    }
}
