//! Reductions and quantiles over `f64` sequences.
//!
//! # Algorithms
//!
//! - **Sum / Mean**: Neumaier compensated summation, O(ε) error independent
//!   of n.
//! - **Standard deviation**: two-pass with compensated sums, Bessel's
//!   correction (denominator `n − 1`).
//! - **Correlation**: Pearson's r with optional caller-supplied means.
//! - **Quantile**: type-1 empirical quantile, `sorted[⌊n·q⌋]`.
//!   Reference: Hyndman & Fan (1996), "Sample Quantiles in Statistical
//!   Packages", *The American Statistician* 50(4).

use crate::error::{Result, WassersteinError};
use crate::vector::sorted;

/// Sum of all elements, using [`kahan_sum`].
///
/// Returns `0.0` for an empty slice.
pub fn sum(data: &[f64]) -> f64 {
    kahan_sum(data)
}

/// Arithmetic mean.
///
/// # Errors
/// `InsufficientData` if `data` is empty.
///
/// # Examples
/// ```
/// use u_wasserstein::stats::mean;
/// assert!((mean(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap() - 3.0).abs() < 1e-15);
/// ```
pub fn mean(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(WassersteinError::InsufficientData {
            op: "mean",
            needed: 1,
            got: 0,
        });
    }
    Ok(kahan_sum(data) / data.len() as f64)
}

/// Sample standard deviation with Bessel's correction.
///
/// # Formula
/// ```text
/// s = √( Σ(xᵢ − x̄)² / (n − 1) )
/// ```
///
/// # Errors
/// `InsufficientData` if `data.len() < 2`; the `n − 1` divisor would be
/// zero.
///
/// # Examples
/// ```
/// use u_wasserstein::stats::std_dev;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((std_dev(&v).unwrap() - 2.138089935299395).abs() < 1e-10);
/// ```
pub fn std_dev(data: &[f64]) -> Result<f64> {
    let n = data.len();
    if n < 2 {
        return Err(WassersteinError::InsufficientData {
            op: "std_dev",
            needed: 2,
            got: n,
        });
    }
    let m = kahan_sum(data) / n as f64;
    let squares: Vec<f64> = data.iter().map(|x| (x - m) * (x - m)).collect();
    Ok((kahan_sum(&squares) / (n - 1) as f64).sqrt())
}

/// Pearson correlation coefficient of `x` and `y`.
///
/// `mean_x` and `mean_y` may carry pre-computed means; `None` means the
/// empirical mean is computed here.
///
/// # Errors
/// - `SizeMismatch` if the lengths differ.
/// - `InsufficientData` if the sequences are empty.
/// - `DivisionByZero` if either sequence has zero spread around its mean.
///
/// # Examples
/// ```
/// use u_wasserstein::stats::correlation;
/// let x = [1.0, 2.0, 3.0, 4.0];
/// let y = [2.0, 4.0, 6.0, 8.0];
/// assert!((correlation(&x, &y, None, None).unwrap() - 1.0).abs() < 1e-12);
/// ```
pub fn correlation(
    x: &[f64],
    y: &[f64],
    mean_x: Option<f64>,
    mean_y: Option<f64>,
) -> Result<f64> {
    if x.len() != y.len() {
        return Err(WassersteinError::size_mismatch(
            "correlation",
            x.len(),
            y.len(),
        ));
    }
    if x.is_empty() {
        return Err(WassersteinError::InsufficientData {
            op: "correlation",
            needed: 1,
            got: 0,
        });
    }
    let mean_x = match mean_x {
        Some(m) => m,
        None => mean(x)?,
    };
    let mean_y = match mean_y {
        Some(m) => m,
        None => mean(y)?,
    };

    let mut numerator = 0.0;
    let mut denom_x = 0.0;
    let mut denom_y = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        numerator += dx * dy;
        denom_x += dx * dx;
        denom_y += dy * dy;
    }
    let denominator = denom_x.sqrt() * denom_y.sqrt();
    if denominator == 0.0 {
        return Err(WassersteinError::DivisionByZero { op: "correlation" });
    }
    Ok(numerator / denominator)
}

/// Type-1 empirical quantiles of `data` at the levels `qs`.
///
/// Sorts a copy of `data` once, then returns `sorted[⌊n·q⌋]` for every
/// level. The index is clamped to `n − 1`, so `q = 1` yields the maximum.
///
/// # Errors
/// - `InsufficientData` if `data` is empty.
/// - `InvalidParameter` if any level lies outside `[0, 1]`.
///
/// # Examples
/// ```
/// use u_wasserstein::stats::quantile;
/// let data = [5.0, 1.0, 4.0, 2.0, 3.0];
/// assert_eq!(quantile(&data, &[0.0, 0.5, 1.0]).unwrap(), vec![1.0, 3.0, 5.0]);
/// ```
pub fn quantile(data: &[f64], qs: &[f64]) -> Result<Vec<f64>> {
    if data.is_empty() {
        return Err(WassersteinError::InsufficientData {
            op: "quantile",
            needed: 1,
            got: 0,
        });
    }
    let sorted_data = sorted(data);
    qs.iter().map(|&q| quantile_sorted(&sorted_data, q)).collect()
}

/// Type-1 quantile on **pre-sorted**, non-empty data.
///
/// The caller guarantees `sorted_data` is in non-decreasing order.
///
/// # Errors
/// - `InsufficientData` if `sorted_data` is empty.
/// - `InvalidParameter` if `q` lies outside `[0, 1]`.
pub fn quantile_sorted(sorted_data: &[f64], q: f64) -> Result<f64> {
    let n = sorted_data.len();
    if n == 0 {
        return Err(WassersteinError::InsufficientData {
            op: "quantile",
            needed: 1,
            got: 0,
        });
    }
    if !(0.0..=1.0).contains(&q) {
        return Err(WassersteinError::invalid_parameter(
            "q",
            format!("quantile level must lie in [0, 1], got {q}"),
        ));
    }
    let index = ((n as f64 * q).floor() as usize).min(n - 1);
    Ok(sorted_data[index])
}

/// Quantiles at the `k` equidistant levels `(i + 1 − d) / k`, `i = 0..k`.
///
/// With `d = 0.5` the levels are the cell midpoints of a uniform grid on
/// `[0, 1]`; with `d = 0` the last level is `1`.
///
/// # Errors
/// - `InvalidParameter` if `k == 0` or `d` lies outside `[0, 1]`.
/// - `InsufficientData` if `data` is empty.
///
/// # Examples
/// ```
/// use u_wasserstein::stats::equidistant_quantiles;
/// let data = [1.0, 2.0, 3.0, 4.0];
/// // levels 0.125, 0.375, 0.625, 0.875
/// assert_eq!(equidistant_quantiles(&data, 4, 0.5).unwrap(), vec![1.0, 2.0, 3.0, 4.0]);
/// ```
pub fn equidistant_quantiles(data: &[f64], k: usize, d: f64) -> Result<Vec<f64>> {
    if k == 0 {
        return Err(WassersteinError::invalid_parameter(
            "k",
            "number of quantiles must be > 0",
        ));
    }
    if !(0.0..=1.0).contains(&d) {
        return Err(WassersteinError::invalid_parameter(
            "d",
            format!("quantile offset must lie in [0, 1], got {d}"),
        ));
    }
    let levels: Vec<f64> = (0..k)
        .map(|i| ((i + 1) as f64 - d) / k as f64)
        .collect();
    quantile(data, &levels)
}

// ---------------------------------------------------------------------------
// Kahan compensated summation
// ---------------------------------------------------------------------------

/// Neumaier compensated summation for O(ε) error independent of `n`.
///
/// This is an improved variant of Kahan summation that also handles the
/// case where the addend is larger in magnitude than the running sum.
///
/// Reference: Neumaier (1974), "Rundungsfehleranalyse einiger Verfahren
/// zur Summation endlicher Summen", *ZAMM* 54(1), pp. 39–51.
///
/// # Complexity
/// Time: O(n), Space: O(1)
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
