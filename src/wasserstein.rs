//! Exact order-`p` Wasserstein distance between 1-D empirical samples.
//!
//! # Algorithm
//!
//! In one dimension the optimal coupling is the monotone rearrangement,
//! so the distance is the `L^p` distance between quantile functions:
//!
//! ```text
//! W_p(μ, ν) = ( ∫₀¹ |F_ν⁻¹(u) − F_μ⁻¹(u)|^p du )^{1/p}
//! ```
//!
//! - **Fast path** (equal sizes, no weights): both quantile functions are
//!   step functions on the grid `i / n`, so
//!   `W_p = mean(|sort(y) − sort(x)|^p)^{1/p}`.
//! - **General path**: the cumulative breakpoints of both samples are
//!   merged into a common partition of `[0, 1]`. On every cell both
//!   quantile functions are constant;
//!   [`interval_table`](crate::histogram::interval_table) tells how many
//!   cells each sorted value spans, and the integral becomes a finite sum
//!   of `width · |y − x|^p`.
//!
//! Reference: Schuhmacher et al., `transport::wasserstein1d` (R package).
//!
//! # Weight alignment
//!
//! Weights pair with sample values in **sorted** order. A sample that
//! comes with a weight vector must therefore already be sorted ascending;
//! otherwise the call fails with
//! [`WassersteinError::UnsortedWeightedSample`] instead of silently
//! pairing mass with the wrong position.

use tracing::{debug, trace};

use crate::approx::{
    squared_wasserstein_approx, squared_wasserstein_decomposed, SquaredWassersteinDecomposition,
};
use crate::config::{validate_order, WassersteinConfig};
use crate::cumulative::{cumulative_mass, uniform_cumulative_mass};
use crate::error::{Result, WassersteinError};
use crate::expand::repeat_weighted;
use crate::histogram::interval_table_default;
use crate::stats::{kahan_sum, mean};
use crate::vector::{
    absolute, concat, elementwise_multiply, elementwise_subtract, is_sorted_ascending, power,
    sorted,
};

/// Order-`p` Wasserstein distance between samples `x` and `y`.
///
/// `weights_x` / `weights_y` optionally give the mass of each point; a
/// missing vector means unit weights. Weights need not sum to one.
///
/// # Errors
/// - `InvalidParameter` if `p` is not finite and positive, a sample value
///   is NaN or infinite, or a weight is negative.
/// - `InsufficientData` if either sample is empty.
/// - `SizeMismatch` if a weight vector's length differs from its sample.
/// - `UnsortedWeightedSample` if a weighted sample is not sorted.
/// - `DivisionByZero` if a weight vector sums to zero.
///
/// # Examples
/// ```
/// use u_wasserstein::wasserstein_metric;
///
/// // Equal sizes, unweighted: mean absolute difference of sorted values.
/// let d = wasserstein_metric(&[3.0, 1.0, 2.0], &[2.0, 3.0, 4.0], 1.0, None, None).unwrap();
/// assert!((d - 1.0).abs() < 1e-12);
///
/// // Half the mass moves from 0 to 10.
/// let w = [1.0, 1.0];
/// let d = wasserstein_metric(&[0.0, 10.0], &[0.0, 0.0], 1.0, Some(&w), Some(&w)).unwrap();
/// assert!((d - 5.0).abs() < 1e-12);
/// ```
pub fn wasserstein_metric(
    x: &[f64],
    y: &[f64],
    p: f64,
    weights_x: Option<&[f64]>,
    weights_y: Option<&[f64]>,
) -> Result<f64> {
    validate_order(p)?;
    validate_sample("x", x, weights_x)?;
    validate_sample("y", y, weights_y)?;

    let a = sorted(x);
    let b = sorted(y);

    if a.len() == b.len() && weights_x.is_none() && weights_y.is_none() {
        debug!(n = a.len(), p, "wasserstein: sorted pairing");
        return sorted_pairing_distance(&a, &b, p);
    }

    debug!(
        n_x = a.len(),
        n_y = b.len(),
        weighted_x = weights_x.is_some(),
        weighted_y = weights_y.is_some(),
        p,
        "wasserstein: cumulative refinement"
    );
    let partition = RefinedPartition::new(&a, weights_x, &b, weights_y)?;
    partition.distance(p)
}

/// Fast path: `mean(|b − a|^p)^{1/p}` over equally long sorted samples.
fn sorted_pairing_distance(a: &[f64], b: &[f64], p: f64) -> Result<f64> {
    let diff = elementwise_subtract(b, a)?;
    let cost = power(&absolute(&diff), p);
    Ok(mean(&cost)?.powf(1.0 / p))
}

fn validate_sample(which: &'static str, sample: &[f64], weights: Option<&[f64]>) -> Result<()> {
    if sample.is_empty() {
        return Err(WassersteinError::InsufficientData {
            op: "wasserstein_metric",
            needed: 1,
            got: 0,
        });
    }
    if let Some(bad) = sample.iter().find(|v| !v.is_finite()) {
        return Err(WassersteinError::invalid_parameter(
            which,
            format!("sample values must be finite, got {bad}"),
        ));
    }
    if let Some(w) = weights {
        if w.len() != sample.len() {
            return Err(WassersteinError::size_mismatch(
                "wasserstein_metric",
                sample.len(),
                w.len(),
            ));
        }
        if !is_sorted_ascending(sample) {
            return Err(WassersteinError::UnsortedWeightedSample { which });
        }
    }
    Ok(())
}

/// Two sorted samples refined onto the common partition of their
/// cumulative breakpoints.
///
/// Cell `i` spans `[lower[i], upper[i]]` on the probability axis; on it the
/// quantile functions of the two samples equal `expanded_x[i]` and
/// `expanded_y[i]`. All four vectors share the length
/// `cu_x.len() + cu_y.len() + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct RefinedPartition {
    /// Cells spanned by each sorted `x` value (foreign breakpoints + 1).
    pub repeats_x: Vec<usize>,
    /// Cells spanned by each sorted `y` value (foreign breakpoints + 1).
    pub repeats_y: Vec<usize>,
    pub expanded_x: Vec<f64>,
    pub expanded_y: Vec<f64>,
    /// Lower cell bounds, `[0] ++ sort(cu_x ++ cu_y)`.
    pub lower: Vec<f64>,
    /// Upper cell bounds, `sort(cu_x ++ cu_y) ++ [1]`.
    pub upper: Vec<f64>,
}

impl RefinedPartition {
    /// Refines sorted samples `x` and `y` with optional weights.
    ///
    /// Both samples are paired with their cumulative masses position by
    /// position, so each must be sorted ascending even without an explicit
    /// weight vector.
    ///
    /// # Errors
    /// - `InsufficientData` if a sample is empty.
    /// - `InvalidParameter` if a sample value is not finite.
    /// - `SizeMismatch` if a weight vector's length differs from its sample.
    /// - `UnsortedWeightedSample` if a sample is not sorted ascending.
    /// - Any error of [`cumulative_mass`] for the weights.
    pub fn new(
        x: &[f64],
        weights_x: Option<&[f64]>,
        y: &[f64],
        weights_y: Option<&[f64]>,
    ) -> Result<Self> {
        for (which, sample, weights) in [("x", x, weights_x), ("y", y, weights_y)] {
            validate_sample(which, sample, weights)?;
            if !is_sorted_ascending(sample) {
                return Err(WassersteinError::UnsortedWeightedSample { which });
            }
        }
        let cu_x = breakpoints(x.len(), weights_x)?;
        let cu_y = breakpoints(y.len(), weights_y)?;

        // Every value spans one cell of its own plus one per foreign
        // breakpoint that lands inside its interval.
        let repeats_x: Vec<usize> = interval_table_default(&cu_y, &cu_x)
            .into_iter()
            .map(|c| c + 1)
            .collect();
        let repeats_y: Vec<usize> = interval_table_default(&cu_x, &cu_y)
            .into_iter()
            .map(|c| c + 1)
            .collect();

        let expanded_x = repeat_weighted(x, &repeats_x)?;
        let expanded_y = repeat_weighted(y, &repeats_y)?;

        let merged = sorted(&concat(&cu_x, &cu_y));
        let lower = concat(&[0.0], &merged);
        let upper = concat(&merged, &[1.0]);
        trace!(
            cells = lower.len(),
            breaks_x = cu_x.len(),
            breaks_y = cu_y.len(),
            "refined partition"
        );

        Ok(Self {
            repeats_x,
            repeats_y,
            expanded_x,
            expanded_y,
            lower,
            upper,
        })
    }

    /// Number of cells in the partition.
    pub fn len(&self) -> usize {
        self.lower.len()
    }

    /// Always `false`: a partition has at least the cell `[0, 1]`.
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// Cell widths `upper[i] − lower[i]`; they sum to 1.
    pub fn widths(&self) -> Result<Vec<f64>> {
        elementwise_subtract(&self.upper, &self.lower)
    }

    /// `(Σ width · |y − x|^p)^{1/p}` over all cells.
    pub fn distance(&self, p: f64) -> Result<f64> {
        validate_order(p)?;
        let widths = self.widths()?;
        let cost = power(
            &absolute(&elementwise_subtract(&self.expanded_y, &self.expanded_x)?),
            p,
        );
        if widths.len() != cost.len() {
            return Err(WassersteinError::size_mismatch(
                "wasserstein_metric",
                widths.len(),
                cost.len(),
            ));
        }
        let weighted = elementwise_multiply(&widths, &cost)?;
        Ok(kahan_sum(&weighted).powf(1.0 / p))
    }
}

fn breakpoints(n: usize, weights: Option<&[f64]>) -> Result<Vec<f64>> {
    match weights {
        Some(w) => cumulative_mass(w),
        None => Ok(uniform_cumulative_mass(n)),
    }
}

/// Distance engine bound to a validated [`WassersteinConfig`].
///
/// # Examples
/// ```
/// use u_wasserstein::{Wasserstein, WassersteinConfig};
///
/// let engine = Wasserstein::new(WassersteinConfig::new().with_power(2.0)).unwrap();
/// let d = engine.distance(&[0.0, 1.0], &[1.0, 2.0]).unwrap();
/// assert!((d - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Wasserstein {
    config: WassersteinConfig,
}

impl Wasserstein {
    /// Creates an engine, rejecting invalid configurations.
    pub fn new(config: WassersteinConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &WassersteinConfig {
        &self.config
    }

    /// Unweighted distance of order `config.p`.
    pub fn distance(&self, x: &[f64], y: &[f64]) -> Result<f64> {
        wasserstein_metric(x, y, self.config.p, None, None)
    }

    /// Weighted distance of order `config.p`.
    pub fn weighted_distance(
        &self,
        x: &[f64],
        weights_x: Option<&[f64]>,
        y: &[f64],
        weights_y: Option<&[f64]>,
    ) -> Result<f64> {
        wasserstein_metric(x, y, self.config.p, weights_x, weights_y)
    }

    /// Quantile approximation of the squared 2-Wasserstein distance.
    pub fn squared_approx(&self, x: &[f64], y: &[f64]) -> Result<f64> {
        squared_wasserstein_approx(x, y, &self.config)
    }

    /// Location / size / shape decomposition of the squared distance.
    pub fn squared_decomposed(
        &self,
        x: &[f64],
        y: &[f64],
    ) -> Result<SquaredWassersteinDecomposition> {
        squared_wasserstein_decomposed(x, y, &self.config)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn sample(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec(-100.0_f64..100.0, min_len..=max_len)
    }

    fn sorted_sample_with_weights(max_len: usize) -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
        (1..=max_len).prop_flat_map(|n| {
            (
                proptest::collection::vec(-100.0_f64..100.0, n).prop_map(|v| sorted(&v)),
                proptest::collection::vec(0.1_f64..10.0, n),
            )
        })
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-8 * a.abs().max(b.abs()).max(1.0)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn fast_and_general_paths_agree(
            pairs in proptest::collection::vec((-100.0_f64..100.0, -100.0_f64..100.0), 1..40),
            p in 0.5_f64..3.0,
        ) {
            let (x, y): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
            let ones = vec![1.0; x.len()];
            let fast = wasserstein_metric(&x, &y, p, None, None).unwrap();
            let general = RefinedPartition::new(&sorted(&x), Some(&ones), &sorted(&y), Some(&ones))
                .unwrap()
                .distance(p)
                .unwrap();
            prop_assert!(close(fast, general), "fast={} general={}", fast, general);
        }

        #[test]
        fn symmetric(x in sample(1, 30), y in sample(1, 30), p in 0.5_f64..3.0) {
            let xy = wasserstein_metric(&x, &y, p, None, None).unwrap();
            let yx = wasserstein_metric(&y, &x, p, None, None).unwrap();
            prop_assert!(close(xy, yx), "d(x,y)={} d(y,x)={}", xy, yx);
        }

        #[test]
        fn symmetric_weighted(
            (x, wx) in sorted_sample_with_weights(20),
            (y, wy) in sorted_sample_with_weights(20),
        ) {
            let xy = wasserstein_metric(&x, &y, 1.0, Some(&wx), Some(&wy)).unwrap();
            let yx = wasserstein_metric(&y, &x, 1.0, Some(&wy), Some(&wx)).unwrap();
            prop_assert!(close(xy, yx), "d(x,y)={} d(y,x)={}", xy, yx);
        }

        #[test]
        fn identity(x in sample(1, 30), p in 0.5_f64..3.0) {
            prop_assert_eq!(wasserstein_metric(&x, &x, p, None, None).unwrap(), 0.0);
        }

        #[test]
        fn identity_weighted((x, w) in sorted_sample_with_weights(20), p in 0.5_f64..3.0) {
            let d = wasserstein_metric(&x, &x, p, Some(&w), Some(&w)).unwrap();
            prop_assert!(d.abs() < 1e-12, "d(x,x)={}", d);
        }

        #[test]
        fn single_points_order_two(a in -1e3_f64..1e3, b in -1e3_f64..1e3) {
            let d = wasserstein_metric(&[a], &[b], 2.0, None, None).unwrap();
            prop_assert!(close(d, (a - b).abs()));
        }

        #[test]
        fn weight_scaling_invariant(
            (x, wx) in sorted_sample_with_weights(20),
            y in sample(1, 20),
            scale in 0.01_f64..100.0,
        ) {
            let scaled: Vec<f64> = wx.iter().map(|w| w * scale).collect();
            let d = wasserstein_metric(&x, &y, 1.0, Some(&wx), None).unwrap();
            let d_scaled = wasserstein_metric(&x, &y, 1.0, Some(&scaled), None).unwrap();
            prop_assert!(
                (d - d_scaled).abs() <= 1e-6 * d.max(1.0),
                "d={} scaled={}", d, d_scaled
            );
        }

        #[test]
        fn partition_mass_conservation(
            (x, wx) in sorted_sample_with_weights(25),
            (y, wy) in sorted_sample_with_weights(25),
        ) {
            let cu_x = cumulative_mass(&wx).unwrap();
            let cu_y = cumulative_mass(&wy).unwrap();
            let raw_x = interval_table_default(&cu_y, &cu_x);
            let raw_y = interval_table_default(&cu_x, &cu_y);
            prop_assert_eq!(raw_x.iter().sum::<usize>(), cu_y.len());
            prop_assert_eq!(raw_y.iter().sum::<usize>(), cu_x.len());

            let part = RefinedPartition::new(&x, Some(&wx), &y, Some(&wy)).unwrap();
            let cells = cu_x.len() + cu_y.len() + 1;
            prop_assert_eq!(part.repeats_x.iter().sum::<usize>(), cells);
            prop_assert_eq!(part.repeats_y.iter().sum::<usize>(), cells);
            prop_assert_eq!(part.expanded_x.len(), cells);
            prop_assert_eq!(part.expanded_y.len(), cells);
            prop_assert_eq!(part.len(), cells);

            let total: f64 = part.widths().unwrap().iter().sum();
            prop_assert!((total - 1.0).abs() < 1e-9);
        }

        #[test]
        fn shift_moves_distance_by_offset(x in sample(1, 30), offset in -50.0_f64..50.0) {
            let shifted: Vec<f64> = x.iter().map(|v| v + offset).collect();
            let d = wasserstein_metric(&x, &shifted, 1.0, None, None).unwrap();
            prop_assert!((d - offset.abs()).abs() < 1e-9);
        }
    }
}
