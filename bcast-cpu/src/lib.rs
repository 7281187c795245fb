//! CPU only, pure rust executor for bcast
//!
//! ```rust
//! use bcast_cpu::{BroadcastMode, Tensor};
//!
//! let ex = bcast_cpu::executor();
//! let x = Tensor::from_vec(&[2, 3], vec![1f32, 2., 3., 4., 5., 6.])?;
//! let y = Tensor::from_vec(&[3], vec![10f32, 20., 30.])?;
//! let z = ex.add(&x, &y, &BroadcastMode::Trailing)?;
//! assert_eq!(z.data(), &[11., 22., 33., 14., 25., 36.]);
//! # Ok::<(), bcast_cpu::BcastError>(())
//! ```
//!
//! With `std` feature, large outputs are computed in parallel with rayon and
//! configuration is read from bcast/config.json in XDG config directories and
//! from `BCAST_DEBUG` and `BCAST_PAR_THRESHOLD` environment variables.

#![cfg_attr(not(feature = "std"), no_std)]
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

/// See [Config](config::Config)
pub mod config;
mod executor;
mod op;

pub use crate::executor::Executor;
pub use crate::op::BinaryOp;
pub use bcast_core::{
    args::ElementwiseArgs, broadcast::BroadcastMode, dtype::DType, error::BcastError,
    layout::Layout, scalar::Scalar, shape::Shape, tensor::Tensor,
};

/// Create new executor.
///
/// With `std` feature, config is loaded with [`Config::load`](config::Config::load),
/// otherwise defaults are used.
#[must_use]
pub fn executor() -> Executor {
    #[cfg(feature = "std")]
    {
        Executor::new(config::Config::load())
    }
    #[cfg(not(feature = "std"))]
    {
        Executor::default()
    }
}
