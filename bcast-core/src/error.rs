use crate::layout::Layout;
use crate::shape::Shape;
use alloc::boxed::Box;
use core::fmt::{Display, Formatter};

/// BcastError
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BcastError {
    /// Shape contains dimension that is not positive
    InvalidShape {
        /// Axis of the offending dimension
        axis: usize,
        /// The offending dimension
        dim: usize,
    },
    /// Number of elements of shape does not fit into usize
    VolumeOverflow {
        /// Axis at which the product of dimensions overflows
        axis: usize,
    },
    /// Trailing broadcast of a shape with higher rank than the base shape
    RankMismatch {
        /// Rank of the base shape
        base: usize,
        /// Rank of the aligned shape
        aligned: usize,
    },
    /// Aligned shape does not fit into base shape at this axis
    AxisOutOfRange {
        /// Requested axis offset
        axis: i64,
        /// Largest offset that would fit
        max: usize,
    },
    /// Operator arguments set both an axis and an axis name
    ConflictingAxis {
        /// Requested axis offset
        axis: i64,
        /// Requested axis name
        name: Box<str>,
    },
    /// Layout does not define this axis name
    UnknownAxisName {
        /// Requested name
        name: Box<str>,
        /// Layout used for lookup
        layout: Layout,
    },
    /// Paired dimensions are neither equal nor one
    ShapeMismatch {
        /// Axis of the base shape
        axis: usize,
        /// Dimension of the base shape
        base: usize,
        /// Dimension of the aligned shape
        aligned: usize,
    },
    /// Order string is not a known layout
    UnknownLayout(Box<str>),
    /// Buffer length does not match shape
    BufferSize {
        /// Volume of the shape
        expected: usize,
        /// Length of the buffer
        found: usize,
    },
    /// Output tensor has different shape than the broadcasted result
    OutputShape {
        /// Shape of the result
        expected: Shape,
        /// Shape of the passed output
        found: Shape,
    },
    /// Index out of bounds
    IndexOutOfBounds {
        /// Passed index
        index: usize,
        /// Actual length
        len: usize,
    },
    /// Error parsing some data
    ParseError(Box<str>),
    /// Broadcasting is disabled, but shapes are not equal
    BroadcastDisabled {
        /// Left shape
        lhs: Shape,
        /// Right shape
        rhs: Shape,
    },
}

impl Display for BcastError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            BcastError::InvalidShape { axis, dim } => f.write_fmt(format_args!(
                "InvalidShape: dimension {dim} at axis {axis} is not positive."
            )),
            BcastError::VolumeOverflow { axis } => f.write_fmt(format_args!(
                "VolumeOverflow: number of elements overflows at axis {axis}."
            )),
            BcastError::RankMismatch { base, aligned } => f.write_fmt(format_args!(
                "RankMismatch: can not align rank {aligned} shape to rank {base} shape."
            )),
            BcastError::AxisOutOfRange { axis, max } => f.write_fmt(format_args!(
                "AxisOutOfRange: axis is {axis}, but it must be in range 0..={max}."
            )),
            BcastError::ConflictingAxis { axis, name } => f.write_fmt(format_args!(
                "ConflictingAxis: both axis {axis} and axis name {name:?} are set."
            )),
            BcastError::UnknownAxisName { name, layout } => f.write_fmt(format_args!(
                "UnknownAxisName: layout {layout} has no axis named {name:?}."
            )),
            BcastError::ShapeMismatch {
                axis,
                base,
                aligned,
            } => f.write_fmt(format_args!(
                "ShapeMismatch: at axis {axis} base has {base}, but aligned has {aligned}."
            )),
            BcastError::UnknownLayout(order) => {
                f.write_fmt(format_args!("UnknownLayout: {order:?} is not NCHW or NHWC."))
            }
            BcastError::BufferSize { expected, found } => f.write_fmt(format_args!(
                "BufferSize: shape has {expected} elements, but buffer has {found}."
            )),
            BcastError::OutputShape { expected, found } => f.write_fmt(format_args!(
                "OutputShape: expected output with shape {expected}, but found {found}."
            )),
            BcastError::IndexOutOfBounds { index, len } => f.write_fmt(format_args!(
                "Range out of bounds: The index is {index}, but the len is {len}"
            )),
            BcastError::ParseError(e) => f.write_fmt(format_args!("ParseError: {e}")),
            BcastError::BroadcastDisabled { lhs, rhs } => f.write_fmt(format_args!(
                "BroadcastDisabled: shapes {lhs} and {rhs} differ and broadcasting is off."
            )),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BcastError {}
