//! Cumulative mass breakpoints of a weighted sample.
//!
//! Weights are normalized to total mass 1 and prefix-summed. The final
//! partial sum (1 up to rounding) is dropped: the mass beyond the last
//! breakpoint is the unbounded interval `(b_{n−2}, +∞)`.

use crate::error::{Result, WassersteinError};
use crate::stats::kahan_sum;
use crate::vector::{broadcast_divide, cumulative_sum};

/// Cumulative breakpoints of `weights`, of length `weights.len() − 1`.
///
/// # Errors
/// - `InsufficientData` if `weights` is empty.
/// - `InvalidParameter` if a weight is negative or not finite.
/// - `DivisionByZero` if the weights sum to zero.
///
/// # Examples
/// ```
/// use u_wasserstein::cumulative::cumulative_mass;
/// let cu = cumulative_mass(&[1.0, 1.0, 2.0]).unwrap();
/// assert_eq!(cu, vec![0.25, 0.5]);
/// ```
pub fn cumulative_mass(weights: &[f64]) -> Result<Vec<f64>> {
    let n = weights.len();
    if n == 0 {
        return Err(WassersteinError::InsufficientData {
            op: "cumulative_mass",
            needed: 1,
            got: 0,
        });
    }
    if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(WassersteinError::invalid_parameter(
            "weights",
            format!("weights must be finite and non-negative, got {bad}"),
        ));
    }
    let largest = weights.iter().copied().fold(0.0_f64, f64::max);
    if largest == 0.0 {
        return Err(WassersteinError::DivisionByZero {
            op: "cumulative_mass",
        });
    }
    // Entries of `relative` lie in [0, 1], so the total stays within n.
    let relative = broadcast_divide(weights, largest);
    let total = kahan_sum(&relative);
    let normalized = broadcast_divide(&relative, total);
    Ok(cumulative_sum(&normalized[..n - 1], None))
}

/// Cumulative breakpoints for `n` equally weighted points: `i / n` for
/// `i = 1..n`.
pub fn uniform_cumulative_mass(n: usize) -> Vec<f64> {
    (1..n).map(|i| i as f64 / n as f64).collect()
}
