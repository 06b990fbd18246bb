//! # fast-pi: Parallel Monte Carlo Estimation of π
//!
//! Draws points uniformly in the unit square, counts the fraction that lands
//! strictly inside the inscribed quarter circle and scales it by 4.
//!
//! ## Key Features
//!
//! - **Allocation-free kernel**: the sampling loop is generic over the generator,
//!   no heap traffic and no dynamic dispatch per sample
//! - **Independent streams**: each batch owns a Philox generator whose stream id
//!   selects a disjoint slice of the counter space
//! - **Parallel fan-out**: batches run on Rayon and are averaged after a single
//!   join point
//! - **Reproducible**: fixed base seed + stream id → identical results
//!
//! ## Quick Start
//!
//! ```rust
//! use fast_pi::{estimate, estimate_detailed, EstimateRequest};
//!
//! let pi = estimate(200_000, 4).expect("Valid request");
//! assert!((pi - std::f64::consts::PI).abs() < 0.05);
//!
//! let report = estimate_detailed(&EstimateRequest {
//!     seed: 7,
//!     ..EstimateRequest::new(200_000, 4)
//! })
//! .expect("Valid request");
//! println!("π ≈ {:.5} ± {:.5}", report.value, report.standard_error());
//! ```
//!
//! ## Mathematical Foundation
//!
//! For `(x, y) ~ U[0,1)²`, `P(x² + y² < 1) = π/4`, so `4 · hits / n` is an
//! unbiased estimator of π with standard error `4·sqrt(p(1-p)/n)`.

// Module declarations
pub mod error;
pub mod math_utils;
pub mod mc;
pub mod output;
pub mod rng;

// Re-export commonly used types for convenience
pub use error::{ErrorKind, PiError, PiResult};
pub use mc::estimator::{estimate, estimate_detailed, EstimateReport, EstimateRequest};
pub use mc::kernel::{run_batch, BatchResult, SampleBatch};
pub use rng::{Generator, RngFactory, DEFAULT_SEED};
