//! Interval histogram used to refine two cumulative distributions onto
//! their common partition.
//!
//! `k` ascending breakpoints induce `k + 1` intervals:
//!
//! ```text
//! (−∞, b₀], (b₀, b₁], …, (b_{k−2}, b_{k−1}], (b_{k−1}, +∞)
//! ```
//!
//! Intervals are left-open and right-closed, so a value equal to a
//! breakpoint is counted in the lower interval.

/// Counts how many elements of `data` fall into each interval induced by
/// `breaks`.
///
/// Both `data` and `breaks` must be sorted ascending. A single forward
/// pointer walks `data` while the interval index advances, so the cost is
/// O(n + k) with no backtracking. Intervals that receive no element keep
/// `init_value`.
///
/// With empty `breaks` there is a single interval `(−∞, +∞)` holding every
/// element.
///
/// # Examples
/// ```
/// use u_wasserstein::histogram::interval_table;
/// assert_eq!(interval_table(&[0.1, 0.5, 0.9], &[0.3, 0.6], 0), vec![1, 1, 1]);
/// // ties fall into the lower interval
/// assert_eq!(interval_table(&[0.3, 0.3], &[0.3], 0), vec![2, 0]);
/// ```
pub fn interval_table(data: &[f64], breaks: &[f64], init_value: usize) -> Vec<usize> {
    let mut table = vec![init_value; breaks.len() + 1];
    let mut data_i = 0;

    for (interval_i, count) in table.iter_mut().enumerate() {
        let upper = breaks.get(interval_i).copied().unwrap_or(f64::INFINITY);
        while data_i < data.len() && data[data_i] <= upper {
            *count += 1;
            data_i += 1;
        }
    }
    // NaN never compares <= upper; anything left over goes to the open tail.
    if data_i < data.len() {
        if let Some(last) = table.last_mut() {
            *last += data.len() - data_i;
        }
    }
    table
}

/// [`interval_table`] with every interval starting from zero.
pub fn interval_table_default(data: &[f64], breaks: &[f64]) -> Vec<usize> {
    interval_table(data, breaks, 0)
}
