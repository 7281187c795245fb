use crate::error::BcastError;
use crate::layout::Layout;
use crate::shape::Shape;
use alloc::boxed::Box;

/// Describes how the axes of the aligned operand map onto the axes of the base operand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum BroadcastMode {
    /// Align last axis with last axis, like numpy
    #[default]
    Trailing,
    /// Align first axis of the aligned shape with this axis of the base shape
    AxisOffset(i64),
    /// Align first axis of the aligned shape with the named axis of the layout
    SemanticAxis(Box<str>, Layout),
}

impl BroadcastMode {
    /// Semantic axis mode
    #[must_use]
    pub fn semantic(name: &str, layout: Layout) -> Self {
        Self::SemanticAxis(name.into(), layout)
    }
}

/// Which operand defines the output shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    /// Left operand is the base, right operand is aligned into it
    Lhs,
    /// Right operand has higher rank, it is the base
    Rhs,
}

impl Base {
    /// Pick base operand, the one with higher rank. Left operand wins ties.
    #[must_use]
    pub fn of(lhs: &Shape, rhs: &Shape) -> Self {
        if rhs.rank() > lhs.rank() {
            Self::Rhs
        } else {
            Self::Lhs
        }
    }
}

/// Compute axis of `base` at which the first axis of `aligned` is placed.
///
/// Returned offset satisfies `offset + aligned.rank() <= base.rank()`.
/// Dimensions are not compared here, see [`BroadcastPlan`](crate::plan::BroadcastPlan).
pub fn resolve_offset(
    base: &Shape,
    aligned: &Shape,
    mode: &BroadcastMode,
) -> Result<usize, BcastError> {
    let axis = match mode {
        BroadcastMode::Trailing => {
            return base
                .rank()
                .checked_sub(aligned.rank())
                .ok_or(BcastError::RankMismatch {
                    base: base.rank(),
                    aligned: aligned.rank(),
                });
        }
        BroadcastMode::AxisOffset(axis) => *axis,
        BroadcastMode::SemanticAxis(name, layout) => layout.axis(name, base.rank())?,
    };
    let max = base.rank().saturating_sub(aligned.rank());
    if axis < 0 || aligned.rank() > base.rank() || axis as usize > max {
        return Err(BcastError::AxisOutOfRange { axis, max });
    }
    Ok(axis as usize)
}
