use crate::broadcast::{resolve_offset, BroadcastMode};
use crate::error::BcastError;
use crate::shape::Shape;
use alloc::boxed::Box;
use alloc::vec::Vec;

/// Pairing of every axis of the base shape with a dimension of the aligned shape.
///
/// Aligned operand is never expanded in memory, instead the plan gives its
/// strides in the base index space, where every broadcasted axis has stride 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastPlan {
    shape: Shape,
    offset: usize,
    pairs: Box<[(usize, usize)]>,
    strides: Box<[usize]>,
    // Adjacent axes that can be iterated as one, size one axes dropped
    dims: Box<[usize]>,
    dim_strides: Box<[usize]>,
    contiguous: bool,
}

impl BroadcastPlan {
    /// Resolve offset of `aligned` within `base` with given mode and build the plan
    pub fn resolve(
        base: &Shape,
        aligned: &Shape,
        mode: &BroadcastMode,
    ) -> Result<Self, BcastError> {
        let offset = resolve_offset(base, aligned, mode)?;
        Self::new(base, aligned, offset)
    }

    /// Build plan for `aligned` placed at axis `offset` of `base`
    pub fn new(base: &Shape, aligned: &Shape, offset: usize) -> Result<Self, BcastError> {
        let max = base.rank().saturating_sub(aligned.rank());
        if aligned.rank() > base.rank() || offset > max {
            return Err(BcastError::AxisOutOfRange {
                axis: offset as i64,
                max,
            });
        }
        let aligned_strides = aligned.strides();
        let mut pairs = Vec::with_capacity(base.rank());
        let mut strides = Vec::with_capacity(base.rank());
        for (axis, &d) in base.iter().enumerate() {
            let (ad, st) = if (offset..offset + aligned.rank()).contains(&axis) {
                let ad = aligned[axis - offset];
                (ad, if ad == 1 { 0 } else { aligned_strides[axis - offset] })
            } else {
                (1, 0)
            };
            if ad != 1 && ad != d {
                return Err(BcastError::ShapeMismatch {
                    axis,
                    base: d,
                    aligned: ad,
                });
            }
            pairs.push((d, ad));
            strides.push(st);
        }
        let (dims, dim_strides) = coalesce(base, &strides);
        Ok(Self {
            shape: base.clone(),
            offset,
            pairs: pairs.into(),
            strides: strides.into(),
            dims,
            dim_strides,
            contiguous: aligned.volume() == base.volume(),
        })
    }

    /// Output shape, this is the base shape
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Axis of the base shape where the aligned shape starts
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Pairs of (base dimension, aligned dimension) for every axis of the base shape
    #[must_use]
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// Strides of the aligned operand for every axis of the base shape
    #[must_use]
    pub fn aligned_strides(&self) -> &[usize] {
        &self.strides
    }

    /// Axes merged for iteration, pairs of dimension and aligned stride
    #[must_use]
    pub fn coalesced(&self) -> (&[usize], &[usize]) {
        (&self.dims, &self.dim_strides)
    }

    /// Is the aligned operand read with the same index as the output?
    /// True when no axis is broadcasted.
    #[must_use]
    pub fn is_contiguous(&self) -> bool {
        self.contiguous
    }

    /// Number of elements of the output
    #[must_use]
    pub fn volume(&self) -> usize {
        self.shape.volume()
    }

    /// Index into the aligned operand buffer for row major output index `idx`
    #[must_use]
    pub fn aligned_index(&self, mut idx: usize) -> usize {
        if self.contiguous {
            return idx;
        }
        let mut res = 0;
        for (d, st) in self.dims.iter().zip(self.dim_strides.iter()).rev() {
            res += (idx % d) * st;
            idx /= d;
        }
        res
    }
}

// Merge axis into the previous one whenever outer stride == inner stride * inner dim.
// This covers both runs of broadcasted axes (all strides 0) and runs of
// contiguous axes of the aligned operand.
fn coalesce(base: &Shape, strides: &[usize]) -> (Box<[usize]>, Box<[usize]>) {
    let mut dims: Vec<usize> = Vec::with_capacity(base.rank());
    let mut dim_strides: Vec<usize> = Vec::with_capacity(base.rank());
    for (&d, &st) in base.iter().zip(strides) {
        if d == 1 {
            continue;
        }
        match (dims.last_mut(), dim_strides.last_mut()) {
            (Some(ld), Some(ls)) if *ls == st * d => {
                *ld *= d;
                *ls = st;
            }
            _ => {
                dims.push(d);
                dim_strides.push(st);
            }
        }
    }
    (dims.into(), dim_strides.into())
}
