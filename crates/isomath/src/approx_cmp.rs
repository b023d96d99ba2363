//! Approximate comparison functions and the tolerance they use.
//!
//! There is one process-wide default tolerance, initially [`EPSILON`]. Code
//! that needs a different tolerance for a block of comparisons pushes a
//! scoped override with [`push_epsilon()`] or [`push_precision()`]. The
//! override applies to the current thread only and is removed when the
//! returned [`EpsilonGuard`] is dropped, including during unwinding.

use std::cell::Cell;

pub use approx::AbsDiffEq;
use lazy_static::lazy_static;
use parking_lot::RwLock;

use crate::{EPSILON, Float};

lazy_static! {
    static ref DEFAULT_EPSILON: RwLock<Float> = RwLock::new(EPSILON);
}

thread_local! {
    static SCOPED_EPSILON: Cell<Option<Float>> = const { Cell::new(None) };
}

/// Returns the tolerance that approximate comparisons currently use.
pub fn epsilon() -> Float {
    SCOPED_EPSILON
        .with(Cell::get)
        .unwrap_or_else(|| *DEFAULT_EPSILON.read())
}

/// Returns the process-wide default tolerance, ignoring scoped overrides.
pub fn default_epsilon() -> Float {
    *DEFAULT_EPSILON.read()
}
/// Sets the process-wide default tolerance.
pub fn set_default_epsilon(epsilon: Float) {
    log::debug!("setting default comparison tolerance to {epsilon:e}");
    *DEFAULT_EPSILON.write() = epsilon;
}
/// Sets the process-wide default tolerance to `decimals` decimal digits.
pub fn set_default_precision(decimals: u8) {
    set_default_epsilon(precision_to_epsilon(decimals));
}

/// Returns the tolerance corresponding to a number of decimal digits.
pub fn precision_to_epsilon(decimals: u8) -> Float {
    (10.0 as Float).powi(-(decimals as i32))
}

/// Scoped tolerance override. The previous tolerance is restored when this is
/// dropped.
#[derive(Debug)]
#[must_use = "the previous tolerance is restored as soon as the guard is dropped"]
pub struct EpsilonGuard {
    previous: Option<Float>,
}
impl Drop for EpsilonGuard {
    fn drop(&mut self) {
        SCOPED_EPSILON.with(|scoped| scoped.set(self.previous));
    }
}

/// Overrides the tolerance on the current thread until the returned guard is
/// dropped.
pub fn push_epsilon(epsilon: Float) -> EpsilonGuard {
    let previous = SCOPED_EPSILON.with(|scoped| scoped.replace(Some(epsilon)));
    EpsilonGuard { previous }
}
/// Overrides the tolerance with one of `decimals` decimal digits on the
/// current thread until the returned guard is dropped.
pub fn push_precision(decimals: u8) -> EpsilonGuard {
    push_epsilon(precision_to_epsilon(decimals))
}
/// Runs `f` with a tolerance of `decimals` decimal digits.
pub fn with_precision<R>(decimals: u8, f: impl FnOnce() -> R) -> R {
    let _guard = push_precision(decimals);
    f()
}

/// Compares two values, but considers them equal if they are separated by
/// less than the active tolerance.
pub fn approx_eq<T: AbsDiffEq<Epsilon = Float>>(a: &T, b: &T) -> bool {
    // use native equality to handle infinities
    a == b || a.abs_diff_eq(b, epsilon())
}

/// Compares two numbers, but considers them equal if they are separated by
/// less than the active tolerance.
pub fn approx_cmp(a: Float, b: Float) -> std::cmp::Ordering {
    if approx_eq(&a, &b) {
        std::cmp::Ordering::Equal
    } else if a < b {
        std::cmp::Ordering::Less
    } else {
        std::cmp::Ordering::Greater
    }
}
/// Returns whether one number is less than another by more than the active
/// tolerance.
pub fn approx_lt(a: Float, b: Float) -> bool {
    a < b && !approx_eq(&a, &b)
}
/// Returns whether one number is greater than another by more than the active
/// tolerance.
pub fn approx_gt(a: Float, b: Float) -> bool {
    a > b && !approx_eq(&a, &b)
}

/// Returns whether `x` is within the active tolerance of zero.
pub fn is_approx_zero(x: Float) -> bool {
    approx_eq(&x, &0.0)
}
/// Returns whether `x` has an absolute value greater than the active
/// tolerance.
pub fn is_approx_nonzero(x: Float) -> bool {
    !is_approx_zero(x)
}
/// Returns whether `x` is less than the negative tolerance.
pub fn is_approx_negative(x: Float) -> bool {
    approx_lt(x, 0.0)
}
/// Returns whether `x` is greater than the tolerance.
pub fn is_approx_positive(x: Float) -> bool {
    approx_gt(x, 0.0)
}
/// Returns `f` as an integer if it is approximately equal to one.
pub fn to_approx_integer(f: Float) -> Option<i64> {
    let i = f.round() as i64;
    approx_eq(&f, &(i as Float)).then_some(i)
}
