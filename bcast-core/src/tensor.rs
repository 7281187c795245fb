use crate::error::BcastError;
use crate::scalar::Scalar;
use crate::shape::Shape;
use alloc::vec::Vec;
use core::ops::Range;
use rand::distributions::uniform::SampleUniform;
use rand::Rng;

/// Dense tensor, row major buffer of scalars with a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T: Scalar> {
    shape: Shape,
    data: Vec<T>,
}

impl<T: Scalar> Tensor<T> {
    /// Create tensor from shape and buffer, buffer length must be equal to shape's volume
    pub fn new(shape: Shape, data: Vec<T>) -> Result<Self, BcastError> {
        if shape.volume() != data.len() {
            return Err(BcastError::BufferSize {
                expected: shape.volume(),
                found: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Create tensor from dimensions and buffer
    pub fn from_vec(dims: &[usize], data: Vec<T>) -> Result<Self, BcastError> {
        Self::new(Shape::new(dims)?, data)
    }

    /// Rank 0 tensor holding one value
    #[must_use]
    pub fn scalar(value: T) -> Self {
        Self {
            shape: Shape::scalar(),
            data: alloc::vec![value],
        }
    }

    /// Tensor filled with zeros
    #[must_use]
    pub fn zeros(shape: Shape) -> Self {
        Self::full(shape, T::zero())
    }

    /// Tensor filled with value
    #[must_use]
    pub fn full(shape: Shape, value: T) -> Self {
        let data = alloc::vec![value; shape.volume()];
        Self { shape, data }
    }

    /// Tensor with values drawn uniformly from range
    #[must_use]
    pub fn uniform<R: Rng + ?Sized>(shape: Shape, range: Range<T>, rng: &mut R) -> Self
    where
        T: SampleUniform,
    {
        let data = (0..shape.volume())
            .map(|_| rng.gen_range(range.clone()))
            .collect();
        Self { shape, data }
    }

    /// Shape
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Row major buffer
    #[must_use]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable row major buffer
    #[must_use]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Element at multi index, None if index does not match the shape
    #[must_use]
    pub fn get(&self, index: &[usize]) -> Option<T> {
        if index.len() != self.shape.rank() {
            return None;
        }
        let mut idx = 0;
        for ((i, d), st) in index.iter().zip(&self.shape).zip(self.shape.strides().iter()) {
            if i >= d {
                return None;
            }
            idx += i * st;
        }
        self.data.get(idx).copied()
    }

    /// Take the buffer
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}
