use crate::error::BcastError;
use alloc::boxed::Box;
use core::fmt::{Display, Formatter};

/// Shape of tensor.
///
/// Every dimension is at least one and the number of elements fits into usize.
/// Empty shape is a scalar, it has one element.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Shape(Box<[usize]>);

impl Shape {
    /// Create new shape, fails if any dimension is zero
    /// or if the number of elements does not fit into usize.
    pub fn new(dims: &[usize]) -> Result<Self, BcastError> {
        let mut volume: usize = 1;
        for (axis, &dim) in dims.iter().enumerate() {
            if dim == 0 {
                return Err(BcastError::InvalidShape { axis, dim });
            }
            volume = volume
                .checked_mul(dim)
                .ok_or(BcastError::VolumeOverflow { axis })?;
        }
        Ok(Self(dims.into()))
    }

    /// Rank 0 shape
    #[must_use]
    pub fn scalar() -> Self {
        Self(Box::new([]))
    }

    /// Get shape's rank
    #[must_use]
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Get dimension at axis
    pub fn dim(&self, axis: usize) -> Result<usize, BcastError> {
        self.0
            .get(axis)
            .copied()
            .ok_or(BcastError::IndexOutOfBounds {
                index: axis,
                len: self.rank(),
            })
    }

    /// Get number of elements in tensor with this shape
    /// (a product of it's dimensions).
    #[must_use]
    pub fn volume(&self) -> usize {
        self.0.iter().product()
    }

    /// Iter
    pub fn iter(&self) -> impl Iterator<Item = &usize> {
        self.into_iter()
    }

    /// Get shape's row major strides
    #[must_use]
    pub fn strides(&self) -> Box<[usize]> {
        let mut a = 1;
        let mut strides: Box<[usize]> = self
            .0
            .iter()
            .rev()
            .map(|d| {
                let t = a;
                a *= d;
                t
            })
            .collect();
        strides.reverse();
        strides
    }
}

impl core::ops::Index<usize> for Shape {
    type Output = usize;
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Shape {
    type IntoIter = <&'a [usize] as IntoIterator>::IntoIter;
    type Item = &'a usize;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("[")?;
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_fmt(format_args!("{d}"))?;
        }
        f.write_str("]")
    }
}
