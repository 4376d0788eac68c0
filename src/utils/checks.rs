//! General purpose checks on parameters and data arrays.
//!
//! Three families of functions live here:
//! - parameter checks ([`check_param_range`], [`check_param_options`], [`check_param_lengths`],
//!   [`check_list_options`]), which fail fast with a message naming the offending parameter,
//! - orientation and axis inference ([`check_array_orientation`], [`check_array_lst_orientation`],
//!   [`check_axis`]), which decide how data arrays are laid out,
//! - time-bin normalization ([`check_time_bins`], [`check_bin_range`]), which turn a bin width or
//!   a set of edges into explicit edges.
//!
//! # Examples
//!
//! ```rust
//! use rusty_spiketools::utils::checks::{check_time_bins, TimeBins};
//!
//! let values = vec![0.2, 0.4, 0.6, 0.9, 1.4, 1.5, 1.6, 1.9];
//!
//! // Bins defined by their width, the end of the time range is inclusive
//! let edges = check_time_bins(&TimeBins::Width(0.5), Some((0.0, 2.0)), Some(&values[..]), false).unwrap();
//! assert_eq!(edges, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
//!
//! // Bins already defined by their edges are returned as is
//! let same = check_time_bins(&TimeBins::Edges(edges.clone()), None, Some(&values[..]), true).unwrap();
//! assert_eq!(same, edges);
//! ```
use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::base::lower_list;
use super::shape::Shaped;
use crate::error::{RangeWarning, SpikeToolsError};
use crate::{BIN_TOLERANCE, MIN_ORIENTATION_SIZE};

/// An axis selector, as used by reductions along one dimension of an array.
pub type Axis = isize;

/// The axis selector returned when the orientation cannot be inferred.
pub const UNDEFINED_AXIS: Axis = -1;

/// The inferred layout of a data array.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// A 1d array.
    Vector,
    /// Data points run along the last dimension.
    Row,
    /// Data points run along the second-to-last dimension.
    Column,
}

impl Orientation {
    /// Returns the axis to reduce over for data with this orientation.
    pub const fn axis(self) -> Axis {
        match self {
            Orientation::Vector => 0,
            Orientation::Row => 1,
            Orientation::Column => 0,
        }
    }
}

/// Returns the axis associated with a (possibly undefined) orientation.
pub fn axis_from_orientation(orientation: Option<Orientation>) -> Axis {
    orientation.map_or(UNDEFINED_AXIS, Orientation::axis)
}

/// Either a single data array or a collection of data arrays.
#[derive(Debug)]
pub enum ArrayInput<'a, A> {
    Single(&'a A),
    Collection(&'a [A]),
}

/// A time bin definition.
///
/// Deserializes from a number (bin width) or from a list of numbers (bin edges).
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeBins {
    /// The length of each bin.
    Width(f64),
    /// Precomputed bin edges, which must be strictly increasing.
    Edges(Vec<f64>),
}

impl From<f64> for TimeBins {
    fn from(width: f64) -> Self {
        TimeBins::Width(width)
    }
}

impl From<Vec<f64>> for TimeBins {
    fn from(edges: Vec<f64>) -> Self {
        TimeBins::Edges(edges)
    }
}

/// Check a parameter value is within the closed interval `bounds`.
/// NaN is never within bounds.
pub fn check_param_range(param: f64, label: &str, bounds: (f64, f64)) -> Result<(), SpikeToolsError> {
    let (low, high) = bounds;
    if !(low..=high).contains(&param) {
        return Err(SpikeToolsError::OutOfRange {
            label: label.to_string(),
            low,
            high,
        });
    }
    Ok(())
}

/// Check a parameter value is one of the acceptable options.
/// If `ignore_case` is set, the comparison is made on lower-cased strings.
pub fn check_param_options<S: AsRef<str>>(
    param: &str,
    label: &str,
    options: &[S],
    ignore_case: bool,
) -> Result<(), SpikeToolsError> {
    let (param, options) = if ignore_case {
        (param.to_lowercase(), lower_list(options))
    } else {
        (
            param.to_string(),
            options.iter().map(|option| option.as_ref().to_string()).collect(),
        )
    };

    if !options.contains(&param) {
        return Err(SpikeToolsError::InvalidOption {
            label: label.to_string(),
            options,
        });
    }
    Ok(())
}

/// Check that a set of parameters have the same length, i.e., the same size along their first dimension.
/// If `expected_length` is a non-zero value, the common length must also be equal to it.
///
/// Parameters of different types can be checked together as `&dyn Shaped`.
pub fn check_param_lengths<P: Shaped, L: AsRef<str>>(
    params: &[P],
    labels: &[L],
    expected_length: Option<usize>,
) -> Result<(), SpikeToolsError> {
    let first = match params.first() {
        Some(first) => first,
        None => return Ok(()),
    };

    let length = outer_len(first);
    let label_list = || labels.iter().map(|label| label.as_ref().to_string()).collect();

    if params[1..].iter().any(|param| outer_len(param) != length) {
        return Err(SpikeToolsError::LengthMismatch {
            labels: label_list(),
            expected: None,
        });
    }

    if let Some(expected) = expected_length.filter(|&expected| expected > 0) {
        if length != expected {
            return Err(SpikeToolsError::LengthMismatch {
                labels: label_list(),
                expected: Some(expected),
            });
        }
    }
    Ok(())
}

fn outer_len<P: Shaped + ?Sized>(param: &P) -> usize {
    param.dims().first().copied().unwrap_or(0)
}

/// Check that every element of a list is one of the acceptable options (case-sensitive).
pub fn check_list_options<S: AsRef<str>, O: AsRef<str>>(
    contents: &[S],
    label: &str,
    options: &[O],
) -> Result<(), SpikeToolsError> {
    contents
        .iter()
        .try_for_each(|el| check_param_options(el.as_ref(), label, options, false))
}

/// Infer the orientation of a 1d, 2d or 3d array.
///
/// For 2d and 3d arrays, only the last two dimensions matter:
/// an empty last dimension gives a row, an empty second-to-last dimension gives a column,
/// otherwise the array is a row if its last dimension is at least as long as the second-to-last one.
pub fn check_array_orientation<A: Shaped + ?Sized>(arr: &A) -> Result<Orientation, SpikeToolsError> {
    let dims = arr.dims();
    match dims.len() {
        1 => Ok(Orientation::Vector),
        2 | 3 => {
            let orientation = match (dims[dims.len() - 2], dims[dims.len() - 1]) {
                (_, 0) => Orientation::Row,
                (0, _) => Orientation::Column,
                (rows, cols) if cols >= rows => Orientation::Row,
                _ => Orientation::Column,
            };
            Ok(orientation)
        }
        ndim => Err(SpikeToolsError::Dimensionality(ndim)),
    }
}

/// Infer the orientation of a list of arrays.
///
/// Returns `None` for an empty list. Otherwise, the orientation is inferred from the first array
/// with more than [`MIN_ORIENTATION_SIZE`] elements, or from the first array if none is large enough.
pub fn check_array_lst_orientation<A: Shaped>(
    arr_lst: &[A],
) -> Result<Option<Orientation>, SpikeToolsError> {
    if arr_lst.is_empty() {
        return Ok(None);
    }

    let position = arr_lst
        .iter()
        .position(|arr| arr.size() > MIN_ORIENTATION_SIZE)
        .unwrap_or(0);
    debug!(
        "Inferring the orientation of {} arrays from array {}",
        arr_lst.len(),
        position
    );

    check_array_orientation(&arr_lst[position]).map(Some)
}

/// Check an axis argument, inferring it from the orientation of the data if not given.
///
/// An explicit axis, including `Some(0)`, is returned unchanged.
/// Otherwise, vectors and columns give 0, rows give 1 and an undefined orientation gives [`UNDEFINED_AXIS`].
pub fn check_axis<A: Shaped>(axis: Option<Axis>, arr: ArrayInput<'_, A>) -> Result<Axis, SpikeToolsError> {
    if let Some(axis) = axis {
        return Ok(axis);
    }

    let orientation = match arr {
        ArrayInput::Single(arr) => Some(check_array_orientation(arr)?),
        ArrayInput::Collection(arr_lst) => check_array_lst_orientation(arr_lst)?,
    };
    Ok(axis_from_orientation(orientation))
}

/// Returns the smallest and largest non-NaN values, if any.
pub(crate) fn nan_minmax(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|value| !value.is_nan())
        .minmax_by(|a, b| a.total_cmp(b))
        .into_option()
}

/// Check data values against a bin range, given as a pair or as the full set of edges.
///
/// Values beyond the first or last edge produce a [`RangeWarning`], which is logged and returned.
/// NaN values are ignored.
#[must_use]
pub fn check_bin_range(values: &[f64], bin_area: &[f64]) -> Option<RangeWarning> {
    let (low, high) = (*bin_area.first()?, *bin_area.last()?);
    let (min, max) = nan_minmax(values)?;

    if min < low || max > high {
        let warning = RangeWarning { min, max, low, high };
        warn!("{}", warning);
        return Some(warning);
    }
    None
}

/// Check a time bin definition, and define the bin edges if only given a bin width.
///
/// With a bin width, the edges go from the start of `time_range` up to and including its end.
/// Without a time range, they go from 0 up to and including the largest of `values`.
/// With bin edges, they must be strictly increasing and are returned unchanged.
///
/// If `check_range` is set and `values` are given, the values are checked against the bins
/// (see [`check_bin_range`]).
pub fn check_time_bins(
    bins: &TimeBins,
    time_range: Option<(f64, f64)>,
    values: Option<&[f64]>,
    check_range: bool,
) -> Result<Vec<f64>, SpikeToolsError> {
    let edges = match bins {
        TimeBins::Width(width) => {
            let width = *width;
            if !(width.is_finite() && width > 0.0) {
                return Err(SpikeToolsError::InvalidParameter(format!(
                    "the bin width must be positive and finite, got {}",
                    width
                )));
            }

            let (start, end) = match time_range {
                Some(range) => range,
                None => {
                    let values = values.ok_or_else(|| {
                        SpikeToolsError::MissingParameter(
                            "either `values` or `time_range` is required to define time bins".to_string(),
                        )
                    })?;
                    let (_, max) = nan_minmax(values).ok_or_else(|| {
                        SpikeToolsError::InvalidParameter(
                            "the values must contain at least one non-NaN value to define time bins".to_string(),
                        )
                    })?;
                    (0.0, max)
                }
            };

            if !(start.is_finite() && (end + width).is_finite()) {
                return Err(SpikeToolsError::InvalidParameter(format!(
                    "the time range must be finite, got [{}, {}]",
                    start, end
                )));
            }

            let edges = inclusive_edges(start, end, width);
            debug!(
                "Defined {} bin edges of width {} from {}",
                edges.len(),
                width,
                start
            );
            edges
        }
        TimeBins::Edges(edges) => {
            if !edges.iter().tuple_windows().all(|(a, b)| b - a > 0.0) {
                return Err(SpikeToolsError::MalformedBins);
            }
            edges.clone()
        }
    };

    if let Some(values) = values {
        if check_range && !values.is_empty() {
            // the warning is already logged, the edges are valid either way
            let _ = check_bin_range(values, &edges);
        }
    }

    Ok(edges)
}

/// Evenly spaced edges from `start`, the last one being at or just beyond `end`.
fn inclusive_edges(start: f64, end: f64, width: f64) -> Vec<f64> {
    let mut edges = arange(start, end + width, width);
    if edges.last().map_or(false, |&last| last < end) {
        edges.push(start + edges.len() as f64 * width);
    }
    edges
}

/// Evenly spaced values in `[start, stop)`.
/// The count is rounded down when the span is within [`BIN_TOLERANCE`] of a whole number of steps.
fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let num = ((stop - start) / step - BIN_TOLERANCE).ceil().max(0.0) as usize;
    (0..num).map(|i| start + i as f64 * step).collect()
}
