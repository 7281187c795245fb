use crate::error::BcastError;
use alloc::boxed::Box;
use core::fmt::{Display, Formatter};
use core::str::FromStr;

/// Memory layout of image-like tensors, names the meaning of each axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layout {
    /// Batch, channel, height, width
    #[default]
    NCHW,
    /// Batch, height, width, channel
    NHWC,
}

/// Position of a named axis, counted from the start or from the end of the shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisPosition {
    Front(usize),
    Back(usize),
}

// Channel axis under NHWC is the last axis of whatever rank the base has.
const SEMANTIC_AXES: &[(Layout, &str, AxisPosition)] = &[
    (Layout::NCHW, "N", AxisPosition::Front(0)),
    (Layout::NCHW, "C", AxisPosition::Front(1)),
    (Layout::NCHW, "H", AxisPosition::Front(2)),
    (Layout::NCHW, "W", AxisPosition::Front(3)),
    (Layout::NHWC, "N", AxisPosition::Front(0)),
    (Layout::NHWC, "H", AxisPosition::Front(1)),
    (Layout::NHWC, "W", AxisPosition::Front(2)),
    (Layout::NHWC, "C", AxisPosition::Back(1)),
];

impl Layout {
    /// Resolve axis name into axis offset within shape of rank `rank`.
    ///
    /// The returned offset is not validated against the aligned shape,
    /// it may be negative if the name points before the first axis.
    pub fn axis(self, name: &str, rank: usize) -> Result<i64, BcastError> {
        SEMANTIC_AXES
            .iter()
            .find(|(layout, n, _)| *layout == self && *n == name)
            .map(|(_, _, position)| match position {
                AxisPosition::Front(i) => *i as i64,
                AxisPosition::Back(i) => rank as i64 - *i as i64,
            })
            .ok_or_else(|| BcastError::UnknownAxisName {
                name: name.into(),
                layout: self,
            })
    }

    /// Name of this layout, as used in operator arguments
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NCHW => "NCHW",
            Self::NHWC => "NHWC",
        }
    }
}

impl FromStr for Layout {
    type Err = BcastError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NCHW" => Ok(Self::NCHW),
            "NHWC" => Ok(Self::NHWC),
            _ => Err(BcastError::UnknownLayout(Box::from(s))),
        }
    }
}

impl Display for Layout {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Layout;
    use crate::error::BcastError;

    #[test]
    fn channel_axis() -> Result<(), BcastError> {
        assert_eq!(Layout::NCHW.axis("C", 4)?, 1);
        assert_eq!(Layout::NHWC.axis("C", 4)?, 3);
        assert_eq!(Layout::NHWC.axis("C", 2)?, 1);
        assert_eq!(Layout::NHWC.axis("H", 4)?, 1);
        Ok(())
    }

    #[test]
    fn unknown_name() {
        assert_eq!(
            Layout::NCHW.axis("D", 4),
            Err(BcastError::UnknownAxisName {
                name: "D".into(),
                layout: Layout::NCHW
            })
        );
    }

    #[test]
    fn parse() {
        assert_eq!("NHWC".parse::<Layout>(), Ok(Layout::NHWC));
        assert_eq!(
            "CHWN".parse::<Layout>(),
            Err(BcastError::UnknownLayout("CHWN".into()))
        );
    }
}
