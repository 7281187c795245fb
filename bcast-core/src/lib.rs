#![no_std]
//! # bcast-core
//!
//! bcast-core is the backend independent part of bcast.
//! It contains definitions of shape, dtype, scalar and tensor, the broadcast
//! modes used by elementwise binary operators (trailing, explicit axis and
//! semantic axis resolved through NCHW/NHWC layouts), and the broadcast plan
//! that backends use to read the smaller operand without copying it.
//!
//! ```rust
//! use bcast_core::{broadcast::BroadcastMode, layout::Layout, plan::BroadcastPlan, shape::Shape};
//!
//! let x = Shape::new(&[2, 3, 4, 5])?;
//! let y = Shape::new(&[3])?;
//! let plan = BroadcastPlan::resolve(&x, &y, &BroadcastMode::semantic("C", Layout::NCHW))?;
//! assert_eq!(plan.offset(), 1);
//! # Ok::<(), bcast_core::error::BcastError>(())
//! ```
#![forbid(unsafe_code)]
#![forbid(rustdoc::broken_intra_doc_links)]
#![forbid(rustdoc::private_intra_doc_links)]
#![forbid(missing_docs)]
#![forbid(rustdoc::missing_crate_level_docs)]
#![forbid(rustdoc::private_doc_tests)]
#![forbid(rustdoc::invalid_codeblock_attributes)]
#![forbid(rustdoc::invalid_html_tags)]
#![forbid(rustdoc::invalid_rust_codeblocks)]
#![forbid(rustdoc::bare_urls)]
#![forbid(rustdoc::unescaped_backticks)]
#![forbid(rustdoc::redundant_explicit_links)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// See [ElementwiseArgs](args::ElementwiseArgs)
pub mod args;
/// See [BroadcastMode](broadcast::BroadcastMode)
pub mod broadcast;
/// See [DType](dtype::DType)
pub mod dtype;
/// See [BcastError](error::BcastError)
pub mod error;
/// See [Layout](layout::Layout)
pub mod layout;
/// See [BroadcastPlan](plan::BroadcastPlan)
pub mod plan;
/// See [Scalar](scalar::Scalar)
pub mod scalar;
/// See [Shape](shape::Shape)
pub mod shape;
/// See [Tensor](tensor::Tensor)
pub mod tensor;
