//! Operator arguments as they come from graph definitions.
//!
//! Elementwise operators in serialized graphs carry loosely typed flags:
//! `broadcast`, `axis`, `axis_str` and `order`. [`ElementwiseArgs`] holds them
//! and turns them into a [`BroadcastMode`] once, before any shape is looked at
//! by the executor.

use crate::broadcast::BroadcastMode;
use crate::error::BcastError;
use crate::layout::Layout;
use crate::shape::Shape;
use alloc::boxed::Box;

/// Flags of an elementwise binary operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementwiseArgs {
    /// Allow the second operand to have different shape
    pub broadcast: bool,
    /// Axis where the second operand starts, -1 aligns trailing axes
    pub axis: i64,
    /// Named axis where the second operand starts
    pub axis_str: Option<Box<str>>,
    /// Layout for named axis, default layout is used if none
    pub order: Option<Layout>,
}

impl Default for ElementwiseArgs {
    fn default() -> Self {
        Self {
            broadcast: false,
            axis: -1,
            axis_str: None,
            order: None,
        }
    }
}

impl ElementwiseArgs {
    /// Enable broadcasting
    #[must_use]
    pub fn broadcast() -> Self {
        Self {
            broadcast: true,
            ..Self::default()
        }
    }

    /// Set axis
    #[must_use]
    pub fn axis(mut self, axis: i64) -> Self {
        self.axis = axis;
        self
    }

    /// Set named axis
    #[must_use]
    pub fn axis_str(mut self, name: &str) -> Self {
        self.axis_str = Some(name.into());
        self
    }

    /// Set order from its name, e.g. "NHWC"
    pub fn order(mut self, order: &str) -> Result<Self, BcastError> {
        self.order = Some(order.parse()?);
        Ok(self)
    }

    /// Translate flags into broadcast mode.
    ///
    /// `default_layout` is used when no order was given.
    pub fn mode(&self, default_layout: Layout) -> Result<BroadcastMode, BcastError> {
        if !self.broadcast {
            return Ok(BroadcastMode::Trailing);
        }
        match (&self.axis_str, self.axis) {
            (Some(name), -1) => Ok(BroadcastMode::SemanticAxis(
                name.clone(),
                self.order.unwrap_or(default_layout),
            )),
            (Some(name), axis) => Err(BcastError::ConflictingAxis {
                axis,
                name: name.clone(),
            }),
            (None, -1) => Ok(BroadcastMode::Trailing),
            // Other negative axes are rejected by the resolver, which knows the valid range
            (None, axis) => Ok(BroadcastMode::AxisOffset(axis)),
        }
    }

    /// Check operand shapes against the flags, without broadcasting they must be equal
    pub fn check(&self, lhs: &Shape, rhs: &Shape) -> Result<(), BcastError> {
        if !self.broadcast && lhs != rhs {
            return Err(BcastError::BroadcastDisabled {
                lhs: lhs.clone(),
                rhs: rhs.clone(),
            });
        }
        Ok(())
    }
}
