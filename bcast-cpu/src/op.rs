use bcast_core::scalar::Scalar;
use core::fmt::{Display, Formatter};

/// Elementwise binary operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// Addition
    Add,
    /// Subtraction
    Sub,
    /// Multiplication
    Mul,
    /// Division
    Div,
    /// Maximum
    Max,
    /// Minimum
    Min,
}

impl BinaryOp {
    /// Apply operation to scalars
    #[must_use]
    pub fn apply<T: Scalar>(self, x: T, y: T) -> T {
        match self {
            Self::Add => x.add(y),
            Self::Sub => x.sub(y),
            Self::Mul => x.mul(y),
            Self::Div => x.div(y),
            Self::Max => Scalar::max(x, y),
            Self::Min => Scalar::min(x, y),
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!("{self:?}"))
    }
}
