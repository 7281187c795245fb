use crate::dtype::DType;

/// Scalar trait is implemented for all [dtypes](DType)
pub trait Scalar: Copy + Sized + PartialOrd + core::fmt::Debug + Send + Sync + 'static {
    /// Get dtype of Self
    fn dtype() -> DType;
    /// Get zero of Self
    fn zero() -> Self;
    /// Add
    fn add(self, rhs: Self) -> Self;
    /// Sub
    fn sub(self, rhs: Self) -> Self;
    /// Mul
    fn mul(self, rhs: Self) -> Self;
    /// Div
    fn div(self, rhs: Self) -> Self;
    /// Max of two numbers
    fn max(self, rhs: Self) -> Self;
    /// Min of two numbers
    fn min(self, rhs: Self) -> Self;
}

macro_rules! float_scalar {
    ($t: ty, $dtype: expr) => {
        impl Scalar for $t {
            fn dtype() -> DType {
                $dtype
            }

            fn zero() -> Self {
                0.
            }

            fn add(self, rhs: Self) -> Self {
                self + rhs
            }

            fn sub(self, rhs: Self) -> Self {
                self - rhs
            }

            fn mul(self, rhs: Self) -> Self {
                self * rhs
            }

            fn div(self, rhs: Self) -> Self {
                self / rhs
            }

            fn max(self, rhs: Self) -> Self {
                <$t>::max(self, rhs)
            }

            fn min(self, rhs: Self) -> Self {
                <$t>::min(self, rhs)
            }
        }
    };
}

float_scalar!(f32, DType::F32);
float_scalar!(f64, DType::F64);

impl Scalar for i32 {
    fn dtype() -> DType {
        DType::I32
    }

    fn zero() -> Self {
        0
    }

    fn add(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }

    fn sub(self, rhs: Self) -> Self {
        self.wrapping_sub(rhs)
    }

    fn mul(self, rhs: Self) -> Self {
        self.wrapping_mul(rhs)
    }

    fn div(self, rhs: Self) -> Self {
        // Division by zero gives zero instead of panicking
        self.checked_div(rhs).unwrap_or(0)
    }

    fn max(self, rhs: Self) -> Self {
        <i32 as Ord>::max(self, rhs)
    }

    fn min(self, rhs: Self) -> Self {
        <i32 as Ord>::min(self, rhs)
    }
}

#[cfg(feature = "half")]
macro_rules! half_scalar {
    ($t: ty, $dtype: expr) => {
        impl Scalar for $t {
            fn dtype() -> DType {
                $dtype
            }

            fn zero() -> Self {
                <$t>::ZERO
            }

            fn add(self, rhs: Self) -> Self {
                <$t>::from_f32(self.to_f32() + rhs.to_f32())
            }

            fn sub(self, rhs: Self) -> Self {
                <$t>::from_f32(self.to_f32() - rhs.to_f32())
            }

            fn mul(self, rhs: Self) -> Self {
                <$t>::from_f32(self.to_f32() * rhs.to_f32())
            }

            fn div(self, rhs: Self) -> Self {
                <$t>::from_f32(self.to_f32() / rhs.to_f32())
            }

            fn max(self, rhs: Self) -> Self {
                <$t>::from_f32(f32::max(self.to_f32(), rhs.to_f32()))
            }

            fn min(self, rhs: Self) -> Self {
                <$t>::from_f32(f32::min(self.to_f32(), rhs.to_f32()))
            }
        }
    };
}

#[cfg(feature = "half")]
half_scalar!(half::f16, DType::F16);
#[cfg(feature = "half")]
half_scalar!(half::bf16, DType::BF16);
