//! Numeric element trait shared by every container and kernel.
//!
//! [`Scalar`] asks for the operations the kernels actually use (addition,
//! multiplication, the additive identity) plus an associated accumulator type.
//! Reductions such as [`spmv`](crate::ops::spmv) and
//! [`spgemm`](crate::spgemm::spgemm) sum in [`Scalar::Acc`] and narrow once per
//! output entry, so `f32` storage still gets `f64` accumulation. Callers who
//! want a different policy implement `Scalar` for their own element type and
//! pick its `Acc`.

use std::fmt::Debug;

use num_traits::NumAssign;

/// Element type of sparse vectors and matrices.
pub trait Scalar: Copy + Debug + PartialEq + NumAssign + Send + Sync + 'static {
    /// Accumulator used for sums of products over this element type.
    type Acc: Copy + Debug + PartialEq + NumAssign + Send + Sync + 'static;

    /// Convert into the accumulator type.
    fn widen(self) -> Self::Acc;

    /// Convert an accumulated sum back to storage precision.
    fn narrow(acc: Self::Acc) -> Self;

    /// Lossy view as `f64`, used by the dense kernels and the CG solver.
    fn as_f64(self) -> f64;
}

macro_rules! impl_scalar_float {
    ($($t:ty => $acc:ty),* $(,)?) => {
        $(
            #[allow(clippy::unnecessary_cast)]
            impl Scalar for $t {
                type Acc = $acc;

                #[inline]
                fn widen(self) -> $acc {
                    self as $acc
                }

                #[inline]
                fn narrow(acc: $acc) -> $t {
                    acc as $t
                }

                #[inline]
                fn as_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

/// Integer narrowing is checked: a sum that does not fit the element type
/// panics instead of wrapping.
macro_rules! impl_scalar_int {
    ($($t:ty => $acc:ty),* $(,)?) => {
        $(
            impl Scalar for $t {
                type Acc = $acc;

                #[inline]
                fn widen(self) -> $acc {
                    <$acc>::from(self)
                }

                #[inline]
                fn narrow(acc: $acc) -> $t {
                    match <$t>::try_from(acc) {
                        Ok(v) => v,
                        Err(_) => panic!(
                            "accumulated value {acc} overflows element type {}",
                            stringify!($t),
                        ),
                    }
                }

                #[inline]
                fn as_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_scalar_float!(f32 => f64, f64 => f64);
impl_scalar_int!(i32 => i64, i64 => i64);
