#![allow(dead_code)]

use bcast_cpu::{BcastError, Scalar, Shape, Tensor};
use itertools::Itertools;
use rand::rngs::SmallRng;
use rand::SeedableRng;

pub const SEED: u64 = 69420;

pub fn rng() -> SmallRng {
    SmallRng::seed_from_u64(SEED)
}

pub fn randn(dims: &[usize], rng: &mut SmallRng) -> Result<Tensor<f32>, BcastError> {
    Ok(Tensor::uniform(Shape::new(dims)?, -10f32..10f32, rng))
}

/// Slow per index reference, `y` placed at `offset` of `x`
pub fn reference<T: Scalar>(
    x: &Tensor<T>,
    y: &Tensor<T>,
    offset: usize,
    op: impl Fn(T, T) -> T,
) -> Vec<T> {
    let rank = y.shape().rank();
    if x.shape().rank() == 0 {
        return vec![op(x.data()[0], y.data()[0])];
    }
    x.shape()
        .iter()
        .map(|&d| 0..d)
        .multi_cartesian_product()
        .map(|idx| {
            let yidx: Vec<usize> = idx[offset..offset + rank]
                .iter()
                .zip(y.shape())
                .map(|(&i, &d)| if d == 1 { 0 } else { i })
                .collect();
            op(x.get(&idx).unwrap(), y.get(&yidx).unwrap())
        })
        .collect()
}
