//! Tabu Search for the Quadratic Assignment Problem.
//!
//! Assigns `n` facilities to `n` locations so that the total
//! flow-weighted distance is minimal, using a single configurable Tabu
//! Search engine:
//!
//! - **Instance data** ([`qap`]): flow and distance matrices, full and
//!   incremental cost evaluation, CSV loading.
//! - **Search** ([`tabu`]): swap neighborhood, recency or visited-set
//!   memory, optional frequency memory, fixed or dynamic tenure, and four
//!   admissibility rules (plain, frequency, global and local aspiration).
//!
//! # Example
//!
//! ```
//! use u_qap::qap::{Matrix, QapInstance};
//! use u_qap::tabu::{Admissibility, TabuConfig, TabuRunner};
//!
//! let flow = Matrix::from_rows(vec![vec![0, 3, 1], vec![3, 0, 2], vec![1, 2, 0]]).unwrap();
//! let dist = Matrix::from_rows(vec![vec![0, 5, 2], vec![5, 0, 4], vec![2, 4, 0]]).unwrap();
//! let qap = QapInstance::new(flow, dist).unwrap();
//!
//! let config = TabuConfig::default()
//!     .with_max_iterations(100)
//!     .with_strategy(Admissibility::AspirationGlobal)
//!     .with_seed(42);
//! let result = TabuRunner::run(&qap, &config).unwrap();
//! println!("{result}");
//! ```

pub mod error;
pub mod qap;
pub mod tabu;

pub use error::{ConfigError, LoadError};
