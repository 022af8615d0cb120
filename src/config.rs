//! Configuration for distance computations.

use crate::error::{Result, WassersteinError};

/// Number of equidistant quantiles used by the approximations.
pub const DEFAULT_NUM_QUANTILES: usize = 1000;

/// Offset `d` of the quantile levels `(i + 1 − d) / K`.
pub const DEFAULT_QUANTILE_OFFSET: f64 = 0.5;

/// Parameters shared by the exact metric and the quantile approximations.
#[derive(Debug, Clone, PartialEq)]
pub struct WassersteinConfig {
    /// Order `p` of the Wasserstein distance.
    pub p: f64,
    /// Number of equidistant quantiles `K` for the approximations.
    pub num_quantiles: usize,
    /// Offset `d` of the quantile grid.
    pub quantile_offset: f64,
}

impl Default for WassersteinConfig {
    fn default() -> Self {
        Self {
            p: 1.0,
            num_quantiles: DEFAULT_NUM_QUANTILES,
            quantile_offset: DEFAULT_QUANTILE_OFFSET,
        }
    }
}

impl WassersteinConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the order `p`
    pub fn with_power(mut self, p: f64) -> Self {
        self.p = p;
        self
    }

    /// Set the number of quantiles
    pub fn with_quantiles(mut self, k: usize) -> Self {
        self.num_quantiles = k;
        self
    }

    /// Set the quantile grid offset
    pub fn with_quantile_offset(mut self, d: f64) -> Self {
        self.quantile_offset = d;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validate_order(self.p)?;
        self.validate_quantile_grid()
    }

    /// Validate only the quantile grid (`num_quantiles`, `quantile_offset`).
    ///
    /// The quantile approximations never read `p`, so this is all they
    /// require.
    pub fn validate_quantile_grid(&self) -> Result<()> {
        if self.num_quantiles == 0 {
            return Err(WassersteinError::invalid_parameter(
                "num_quantiles",
                "must be > 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.quantile_offset) {
            return Err(WassersteinError::invalid_parameter(
                "quantile_offset",
                format!("must lie in [0, 1], got {}", self.quantile_offset),
            ));
        }
        Ok(())
    }
}

/// Checks that the order `p` is finite and strictly positive.
pub(crate) fn validate_order(p: f64) -> Result<()> {
    if !p.is_finite() || p <= 0.0 {
        return Err(WassersteinError::invalid_parameter(
            "p",
            format!("order must be finite and > 0, got {p}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = WassersteinConfig::default();
        assert_eq!(config.p, 1.0);
        assert_eq!(config.num_quantiles, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = WassersteinConfig::new()
            .with_power(2.0)
            .with_quantiles(50)
            .with_quantile_offset(0.0);
        assert_eq!(config.p, 2.0);
        assert_eq!(config.num_quantiles, 50);
        assert_eq!(config.quantile_offset, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_power() {
        for p in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                WassersteinConfig::new().with_power(p).validate(),
                Err(WassersteinError::InvalidParameter { name: "p", .. })
            ));
        }
    }

    #[test]
    fn test_grid_check_ignores_power() {
        let config = WassersteinConfig::new().with_power(-1.0);
        assert!(config.validate().is_err());
        assert!(config.validate_quantile_grid().is_ok());
    }

    #[test]
    fn test_invalid_quantile_grid() {
        assert!(WassersteinConfig::new().with_quantiles(0).validate().is_err());
        assert!(WassersteinConfig::new()
            .with_quantile_offset(-0.1)
            .validate()
            .is_err());
    }
}
