//! Element-wise arithmetic over `f64` sequences.
//!
//! Every operator is an explicitly named function instead of an operator
//! overload, so the broadcast fallback of [`elementwise_multiply`] and
//! [`elementwise_divide`] is visible at the call site.
//!
//! # Length rules
//!
//! | Operation | Unequal lengths |
//! |---|---|
//! | [`elementwise_add`], [`elementwise_subtract`] | `SizeMismatch` |
//! | [`elementwise_multiply`], [`elementwise_divide`] | warn, then broadcast `y[0]`; `InvalidOperand` if `y` is empty |

use tracing::warn;

use crate::error::{Result, WassersteinError};

/// Returns `x[i] + y[i]`.
///
/// # Errors
/// `SizeMismatch` if `x.len() != y.len()`.
///
/// # Examples
/// ```
/// use u_wasserstein::vector::elementwise_add;
/// assert_eq!(elementwise_add(&[1.0, 2.0], &[3.0, 4.0]).unwrap(), vec![4.0, 6.0]);
/// ```
pub fn elementwise_add(x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
    if x.len() != y.len() {
        return Err(WassersteinError::size_mismatch("add", x.len(), y.len()));
    }
    Ok(x.iter().zip(y).map(|(a, b)| a + b).collect())
}

/// Returns `x[i] − y[i]`.
///
/// # Errors
/// `SizeMismatch` if `x.len() != y.len()`.
pub fn elementwise_subtract(x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
    if x.len() != y.len() {
        return Err(WassersteinError::size_mismatch(
            "subtract",
            x.len(),
            y.len(),
        ));
    }
    Ok(x.iter().zip(y).map(|(a, b)| a - b).collect())
}

/// Returns `x[i] · y[i]`.
///
/// When the lengths differ the call degrades to
/// `broadcast_multiply(x, y[0])` and logs a warning.
///
/// # Errors
/// `InvalidOperand` if the lengths differ and `y` is empty.
///
/// # Examples
/// ```
/// use u_wasserstein::vector::elementwise_multiply;
/// // Lengths differ: y[0] is used as a scalar factor.
/// assert_eq!(elementwise_multiply(&[1.0, 2.0, 3.0], &[2.0]).unwrap(), vec![2.0, 4.0, 6.0]);
/// ```
pub fn elementwise_multiply(x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
    if x.len() == y.len() {
        return Ok(x.iter().zip(y).map(|(a, b)| a * b).collect());
    }
    let factor = broadcast_scalar("multiply", x.len(), y)?;
    Ok(broadcast_multiply(x, factor))
}

/// Returns `x[i] / y[i]`.
///
/// When the lengths differ the call degrades to
/// `broadcast_divide(x, y[0])` and logs a warning.
///
/// # Errors
/// `InvalidOperand` if the lengths differ and `y` is empty.
pub fn elementwise_divide(x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
    if x.len() == y.len() {
        return Ok(x.iter().zip(y).map(|(a, b)| a / b).collect());
    }
    let divisor = broadcast_scalar("divide", x.len(), y)?;
    Ok(broadcast_divide(x, divisor))
}

// Picks y[0] as the broadcast scalar after a length mismatch.
fn broadcast_scalar(op: &'static str, x_len: usize, y: &[f64]) -> Result<f64> {
    match y.first() {
        Some(&scalar) => {
            warn!(
                op,
                x_len,
                y_len = y.len(),
                scalar,
                "sizes of x and y are incompatible, broadcasting y[0]"
            );
            Ok(scalar)
        }
        None => Err(WassersteinError::InvalidOperand { op }),
    }
}

/// Returns `x[i] + summand`.
pub fn broadcast_add(x: &[f64], summand: f64) -> Vec<f64> {
    x.iter().map(|v| v + summand).collect()
}

/// Returns `x[i] · factor`.
pub fn broadcast_multiply(x: &[f64], factor: f64) -> Vec<f64> {
    x.iter().map(|v| v * factor).collect()
}

/// Returns `x[i] / divisor`. Division by zero follows IEEE 754.
pub fn broadcast_divide(x: &[f64], divisor: f64) -> Vec<f64> {
    x.iter().map(|v| v / divisor).collect()
}

/// Returns `x[i]` raised to `exponent`.
pub fn power(x: &[f64], exponent: f64) -> Vec<f64> {
    x.iter().map(|v| v.powf(exponent)).collect()
}

/// Returns `|x[i]|`.
pub fn absolute(x: &[f64]) -> Vec<f64> {
    x.iter().map(|v| v.abs()).collect()
}

/// Returns `x` followed by `y`.
pub fn concat(x: &[f64], y: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(x.len() + y.len());
    out.extend_from_slice(x);
    out.extend_from_slice(y);
    out
}

/// Returns an ascending copy of `x`.
///
/// Uses the IEEE 754 total order, so the call never panics; callers that
/// must reject NaN check for it before sorting.
pub fn sorted(x: &[f64]) -> Vec<f64> {
    let mut out = x.to_vec();
    out.sort_unstable_by(f64::total_cmp);
    out
}

/// Returns `true` if `x` is in non-decreasing order.
pub fn is_sorted_ascending(x: &[f64]) -> bool {
    x.windows(2).all(|w| w[0] <= w[1])
}

/// Running sum of `x`: `out[i] = x[0] + … + x[i]`.
///
/// With `last_index = Some(k)` and `0 < k <= x.len()`, only the first `k`
/// partial sums are returned. Any other value yields the full sequence.
///
/// # Examples
/// ```
/// use u_wasserstein::vector::cumulative_sum;
/// assert_eq!(cumulative_sum(&[1.0, 2.0, 3.0], None), vec![1.0, 3.0, 6.0]);
/// assert_eq!(cumulative_sum(&[1.0, 2.0, 3.0], Some(2)), vec![1.0, 3.0]);
/// ```
pub fn cumulative_sum(x: &[f64], last_index: Option<usize>) -> Vec<f64> {
    let upper = match last_index {
        Some(k) if k > 0 && k <= x.len() => k,
        _ => x.len(),
    };
    x[..upper]
        .iter()
        .scan(0.0, |acc, &v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}
