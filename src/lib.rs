//! # u-wasserstein
//!
//! Exact one-dimensional Wasserstein distances for the U-Engine ecosystem.
//!
//! Given two samples, optionally weighted, [`wasserstein_metric`] computes
//! the order-`p` optimal-transport distance between their empirical
//! distributions without solving a transportation problem: in 1-D the
//! optimal plan is the monotone rearrangement, so sorting plus a linear
//! refinement of the cumulative distributions is enough.
//!
//! ## Modules
//!
//! - [`wasserstein`] — the distance engine (sorted pairing and cumulative
//!   refinement)
//! - [`cumulative`] — cumulative mass breakpoints of a weight vector
//! - [`histogram`] — interval counts used to refine two partitions
//! - [`expand`] — multiplicity-weighted repetition
//! - [`approx`] — quantile approximations of the squared distance
//! - [`vector`], [`stats`] — element-wise arithmetic, reductions, quantiles
//! - [`random`] — seeded permutations for resampling tests
//! - [`config`] — distance parameters
//!
//! ## Design Philosophy
//!
//! - **Explicit failures**: every precondition violation is a
//!   [`WassersteinError`]; the only recovery is the logged broadcast
//!   fallback of [`vector::elementwise_multiply`] and
//!   [`vector::elementwise_divide`]
//! - **Pure functions**: no shared state, safe to call from many threads
//! - **Property-based testing**: metric invariants verified via proptest
//!
//! ## Example
//!
//! ```
//! use u_wasserstein::wasserstein_metric;
//!
//! let x = [0.0, 1.0, 2.0, 3.0];
//! let y = [0.0, 2.0];
//! let d = wasserstein_metric(&x, &y, 1.0, None, None).unwrap();
//! assert!((d - 0.5).abs() < 1e-12);
//! ```

pub mod approx;
pub mod config;
pub mod cumulative;
pub mod error;
pub mod expand;
pub mod histogram;
pub mod random;
pub mod stats;
pub mod vector;
pub mod wasserstein;

pub use approx::{
    squared_wasserstein_approx, squared_wasserstein_decomposed, SquaredWassersteinDecomposition,
};
pub use config::WassersteinConfig;
pub use error::{Result, WassersteinError};
pub use histogram::interval_table;
pub use wasserstein::{wasserstein_metric, RefinedPartition, Wasserstein};
