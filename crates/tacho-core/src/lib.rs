//! # Tacho Core
//!
//! Receiver-side speed reconstruction library designed for `no_std`
//! environments. This crate contains only the code that needs to run on the
//! consuming device:
//! - Slope-hold estimator (zero-order hold + two-point extrapolation)
//! - Jerk shape-factor to physical jerk conversion
//! - Unit conversion constants
//!
//! # Features
//! - `std`: Enable standard library support (for testing)
//! - Default: `no_std` with no allocations (bare metal embedded)

#![cfg_attr(not(any(feature = "std", test)), no_std)]

pub mod estimator;
pub mod jerk;
pub mod units;

// Re-export core types
pub use estimator::{SlopeEstimator, SpeedSample};
pub use jerk::{HarnessInit, JerkParams};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
