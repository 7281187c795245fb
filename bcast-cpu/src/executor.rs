use crate::config::Config;
use crate::op::BinaryOp;
use bcast_core::{
    args::ElementwiseArgs,
    broadcast::{Base, BroadcastMode},
    error::BcastError,
    plan::BroadcastPlan,
    scalar::Scalar,
    shape::Shape,
    tensor::Tensor,
};
#[cfg(feature = "std")]
use rayon::prelude::*;

/// Applies binary operations to pairs of tensors with broadcasting.
///
/// Executor holds only configuration, it can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Executor {
    config: Config,
}

impl Executor {
    /// Create executor with given config
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Config of this executor
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build broadcast plan for operands of these shapes.
    /// Returned [`Base`] tells which operand the output shape comes from.
    pub fn plan(
        &self,
        lhs: &Shape,
        rhs: &Shape,
        mode: &BroadcastMode,
    ) -> Result<(BroadcastPlan, Base), BcastError> {
        let base = Base::of(lhs, rhs);
        let plan = match base {
            Base::Lhs => BroadcastPlan::resolve(lhs, rhs, mode)?,
            Base::Rhs => BroadcastPlan::resolve(rhs, lhs, mode)?,
        };
        #[cfg(feature = "std")]
        {
            if self.config.debug_plan() {
                let (dims, strides) = plan.coalesced();
                println!(
                    "Plan {lhs} x {rhs} with {mode:?}: base {base:?}, offset {}, pairs {:?}",
                    plan.offset(),
                    plan.pairs(),
                );
                println!("Iterating {dims:?} with strides {strides:?}");
            }
        }
        Ok((plan, base))
    }

    /// Apply `op` elementwise, `op` always gets left operand first.
    pub fn apply<T: Scalar, F>(
        &self,
        lhs: &Tensor<T>,
        rhs: &Tensor<T>,
        mode: &BroadcastMode,
        op: F,
    ) -> Result<Tensor<T>, BcastError>
    where
        F: Fn(T, T) -> T + Sync + Send,
    {
        let (plan, base) = self.plan(lhs.shape(), rhs.shape(), mode)?;
        let mut out = Tensor::zeros(plan.shape().clone());
        self.execute(&plan, base, lhs, rhs, &mut out, &op);
        Ok(out)
    }

    /// Apply `op` elementwise, writing into `out`.
    /// `out` must have the shape of the base operand, it is not touched on error.
    pub fn apply_into<T: Scalar, F>(
        &self,
        lhs: &Tensor<T>,
        rhs: &Tensor<T>,
        mode: &BroadcastMode,
        out: &mut Tensor<T>,
        op: F,
    ) -> Result<(), BcastError>
    where
        F: Fn(T, T) -> T + Sync + Send,
    {
        let (plan, base) = self.plan(lhs.shape(), rhs.shape(), mode)?;
        if out.shape() != plan.shape() {
            return Err(BcastError::OutputShape {
                expected: plan.shape().clone(),
                found: out.shape().clone(),
            });
        }
        self.execute(&plan, base, lhs, rhs, out, &op);
        Ok(())
    }

    /// Apply binary op
    pub fn binary<T: Scalar>(
        &self,
        op: BinaryOp,
        lhs: &Tensor<T>,
        rhs: &Tensor<T>,
        mode: &BroadcastMode,
    ) -> Result<Tensor<T>, BcastError> {
        self.apply(lhs, rhs, mode, move |x, y| op.apply(x, y))
    }

    /// Apply binary op, writing into `out`
    pub fn binary_into<T: Scalar>(
        &self,
        op: BinaryOp,
        lhs: &Tensor<T>,
        rhs: &Tensor<T>,
        mode: &BroadcastMode,
        out: &mut Tensor<T>,
    ) -> Result<(), BcastError> {
        self.apply_into(lhs, rhs, mode, out, move |x, y| op.apply(x, y))
    }

    /// Apply binary op configured with operator arguments
    pub fn run<T: Scalar>(
        &self,
        op: BinaryOp,
        lhs: &Tensor<T>,
        rhs: &Tensor<T>,
        args: &ElementwiseArgs,
    ) -> Result<Tensor<T>, BcastError> {
        args.check(lhs.shape(), rhs.shape())?;
        let mode = args.mode(self.config.default_layout)?;
        self.binary(op, lhs, rhs, &mode)
    }

    /// Add
    pub fn add<T: Scalar>(
        &self,
        lhs: &Tensor<T>,
        rhs: &Tensor<T>,
        mode: &BroadcastMode,
    ) -> Result<Tensor<T>, BcastError> {
        self.binary(BinaryOp::Add, lhs, rhs, mode)
    }

    /// Sub
    pub fn sub<T: Scalar>(
        &self,
        lhs: &Tensor<T>,
        rhs: &Tensor<T>,
        mode: &BroadcastMode,
    ) -> Result<Tensor<T>, BcastError> {
        self.binary(BinaryOp::Sub, lhs, rhs, mode)
    }

    /// Mul
    pub fn mul<T: Scalar>(
        &self,
        lhs: &Tensor<T>,
        rhs: &Tensor<T>,
        mode: &BroadcastMode,
    ) -> Result<Tensor<T>, BcastError> {
        self.binary(BinaryOp::Mul, lhs, rhs, mode)
    }

    /// Div
    pub fn div<T: Scalar>(
        &self,
        lhs: &Tensor<T>,
        rhs: &Tensor<T>,
        mode: &BroadcastMode,
    ) -> Result<Tensor<T>, BcastError> {
        self.binary(BinaryOp::Div, lhs, rhs, mode)
    }

    /// Max
    pub fn max<T: Scalar>(
        &self,
        lhs: &Tensor<T>,
        rhs: &Tensor<T>,
        mode: &BroadcastMode,
    ) -> Result<Tensor<T>, BcastError> {
        self.binary(BinaryOp::Max, lhs, rhs, mode)
    }

    /// Min
    pub fn min<T: Scalar>(
        &self,
        lhs: &Tensor<T>,
        rhs: &Tensor<T>,
        mode: &BroadcastMode,
    ) -> Result<Tensor<T>, BcastError> {
        self.binary(BinaryOp::Min, lhs, rhs, mode)
    }

    fn execute<T: Scalar, F>(
        &self,
        plan: &BroadcastPlan,
        base: Base,
        lhs: &Tensor<T>,
        rhs: &Tensor<T>,
        out: &mut Tensor<T>,
        op: &F,
    ) where
        F: Fn(T, T) -> T + Sync + Send,
    {
        let parallel = plan.volume() >= self.config.parallel_threshold;
        #[cfg(feature = "std")]
        let begin = std::time::Instant::now();
        match base {
            Base::Lhs => binary(plan, lhs.data(), rhs.data(), out.data_mut(), parallel, |b, a| {
                op(b, a)
            }),
            Base::Rhs => binary(plan, rhs.data(), lhs.data(), out.data_mut(), parallel, |b, a| {
                op(a, b)
            }),
        }
        #[cfg(feature = "std")]
        {
            if self.config.debug_exec() {
                println!(
                    "Executed {} elements of {}, {}{}, took {} us",
                    plan.volume(),
                    T::dtype(),
                    if plan.is_contiguous() { "contiguous" } else { "strided" },
                    if parallel { " in parallel" } else { "" },
                    begin.elapsed().as_micros(),
                );
            }
        }
    }
}

// Output is written row by row, where row is the innermost coalesced axis.
// Index into aligned operand is computed once per row.
fn binary<T: Scalar, F>(
    plan: &BroadcastPlan,
    base: &[T],
    aligned: &[T],
    out: &mut [T],
    parallel: bool,
    op: F,
) where
    F: Fn(T, T) -> T + Sync + Send,
{
    #[cfg(not(feature = "std"))]
    let _ = parallel;
    if plan.is_contiguous() {
        #[cfg(feature = "std")]
        {
            if parallel {
                out.par_iter_mut()
                    .zip(base.par_iter().zip(aligned.par_iter()))
                    .for_each(|(o, (b, a))| *o = op(*b, *a));
                return;
            }
        }
        for (o, (b, a)) in out.iter_mut().zip(base.iter().zip(aligned)) {
            *o = op(*b, *a);
        }
        return;
    }
    let (dims, strides) = plan.coalesced();
    let row_len = dims.last().copied().unwrap_or(1);
    let row_stride = strides.last().copied().unwrap_or(0);
    let row = |(r, row): (usize, &mut [T])| {
        let start = r * row_len;
        let astart = plan.aligned_index(start);
        for (k, o) in row.iter_mut().enumerate() {
            *o = op(base[start + k], aligned[astart + k * row_stride]);
        }
    };
    #[cfg(feature = "std")]
    {
        if parallel {
            out.par_chunks_mut(row_len).enumerate().for_each(row);
            return;
        }
    }
    out.chunks_mut(row_len).enumerate().for_each(row);
}
