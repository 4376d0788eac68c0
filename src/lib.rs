//! This crate provides checks and utilities for analyzing spike-train data in Rust.
//!
//! # Checking Parameters
//!
//! ```rust
//! use rusty_spiketools::utils::checks::{check_param_options, check_param_range};
//!
//! // A smoothing width must be within bounds
//! assert!(check_param_range(0.5, "sigma", (0.0, 10.0)).is_ok());
//! assert!(check_param_range(20.0, "sigma", (0.0, 10.0)).is_err());
//!
//! // An averaging type must be one of the known ones
//! assert!(check_param_options("Mean", "avg_type", &["mean", "median"], true).is_ok());
//! ```
//!
//! # Inferring Orientations
//!
//! ```rust
//! use ndarray::Array2;
//! use rusty_spiketools::utils::checks::{check_axis, check_array_orientation, ArrayInput, Orientation};
//!
//! // 3 trials of 5 samples each
//! let rates = Array2::<f64>::zeros((3, 5));
//! assert_eq!(check_array_orientation(&rates).unwrap(), Orientation::Row);
//!
//! // Average across samples, i.e., along axis 1
//! assert_eq!(check_axis(None, ArrayInput::Single(&rates)).unwrap(), 1);
//! ```
//!
//! # Defining Time Bins
//!
//! ```rust
//! use rusty_spiketools::utils::checks::{check_time_bins, TimeBins};
//!
//! let spikes = vec![0.12, 0.53, 0.98, 1.41];
//! let edges = check_time_bins(&TimeBins::Width(0.5), None, Some(&spikes[..]), true).unwrap();
//! assert_eq!(edges, vec![0.0, 0.5, 1.0, 1.5]);
//! ```
//!
//! # Averaging Data
//!
//! ```rust
//! use ndarray::array;
//! use rusty_spiketools::utils::checks::{check_axis, ArrayInput};
//! use rusty_spiketools::utils::select::get_avg_func;
//!
//! let rates = array![[1.0, 2.0, 3.0], [3.0, 4.0, 5.0]];
//! let axis = check_axis(None, ArrayInput::Single(&rates)).unwrap();
//! let avg = get_avg_func("mean").unwrap().compute(&rates, axis).unwrap();
//! assert_eq!(avg.to_vec(), vec![2.0, 4.0]);
//! ```

pub mod error;
pub mod utils;

/// The number of elements an array must exceed to be trusted for orientation inference in a list of arrays.
pub const MIN_ORIENTATION_SIZE: usize = 4;
/// The tolerance on the number of steps when generating bin edges from a bin width.
pub const BIN_TOLERANCE: f64 = 1e-9;
