//! Quadratic Assignment Problem data.
//!
//! Assign `n` facilities to `n` locations so that the sum of
//! `flow[i][j] * distance[p[i]][p[j]]` over all facility pairs is minimal.
//!
//! - [`Matrix`]: immutable square integer matrix
//! - [`QapInstance`]: flow and distance pair with full and incremental cost
//! - [`MatrixLoader`]: comma-separated matrix parsing
//!
//! # References
//!
//! - Koopmans, T. C. & Beckmann, M. (1957). "Assignment Problems and the
//!   Location of Economic Activities", *Econometrica* 25(1), 53-76.
//! - Taillard, É. (1991). "Robust taboo search for the quadratic assignment
//!   problem", *Parallel Computing* 17, 443-455.

mod instance;
mod loader;
mod matrix;

pub use instance::QapInstance;
pub use loader::MatrixLoader;
pub use matrix::Matrix;
