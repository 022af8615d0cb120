//! Multiplicity-weighted repetition of sample values.

use crate::error::{Result, WassersteinError};

/// Repeats `x[i]` exactly `multiplicities[i]` times, keeping index order
/// and emitting all copies of one value contiguously.
///
/// # Errors
/// `SizeMismatch` if `x` and `multiplicities` differ in length.
///
/// # Examples
/// ```
/// use u_wasserstein::expand::repeat_weighted;
/// let out = repeat_weighted(&[1.0, 2.0, 3.0], &[2, 0, 1]).unwrap();
/// assert_eq!(out, vec![1.0, 1.0, 3.0]);
/// ```
pub fn repeat_weighted(x: &[f64], multiplicities: &[usize]) -> Result<Vec<f64>> {
    if x.len() != multiplicities.len() {
        return Err(WassersteinError::size_mismatch(
            "repeat_weighted",
            x.len(),
            multiplicities.len(),
        ));
    }
    let total: usize = multiplicities.iter().sum();
    let mut out = Vec::with_capacity(total);
    for (&value, &times) in x.iter().zip(multiplicities) {
        out.extend(std::iter::repeat(value).take(times));
    }
    Ok(out)
}
