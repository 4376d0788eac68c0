//! Selection of averaging and variance functions by name.
//!
//! Both kinds reduce an array along an axis selector, typically the one returned by
//! [`check_axis`](super::checks::check_axis). Negative selectors count from the last axis.
use std::str::FromStr;

use itertools::Itertools;
use ndarray::{Array, ArrayBase, Data, RemoveAxis};
use serde::{Deserialize, Serialize};

use super::checks::{check_param_options, Axis};
use crate::error::SpikeToolsError;

/// The names of the available averaging functions.
pub const AVERAGE_TYPES: [&str; 4] = ["mean", "median", "nanmean", "nanmedian"];
/// The names of the available variance functions.
pub const VARIANCE_TYPES: [&str; 3] = ["var", "std", "sem"];

/// An averaging function.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AverageKind {
    Mean,
    Median,
    /// Mean ignoring NaN values.
    NanMean,
    /// Median ignoring NaN values.
    NanMedian,
}

impl FromStr for AverageKind {
    type Err = SpikeToolsError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        check_param_options(name, "avg_type", &AVERAGE_TYPES, false)?;
        Ok(match name {
            "mean" => AverageKind::Mean,
            "median" => AverageKind::Median,
            "nanmean" => AverageKind::NanMean,
            _ => AverageKind::NanMedian,
        })
    }
}

impl AverageKind {
    /// Average the values of a single lane.
    pub fn reduce(self, values: impl Iterator<Item = f64>) -> f64 {
        match self {
            AverageKind::Mean => mean(&values.collect::<Vec<_>>()),
            AverageKind::Median => median(values.collect()),
            AverageKind::NanMean => mean(&values.filter(|v| !v.is_nan()).collect::<Vec<_>>()),
            AverageKind::NanMedian => median(values.filter(|v| !v.is_nan()).collect()),
        }
    }

    /// Average an array along the given axis.
    pub fn compute<S, D>(self, data: &ArrayBase<S, D>, axis: Axis) -> Result<Array<f64, D::Smaller>, SpikeToolsError>
    where
        S: Data<Elem = f64>,
        D: RemoveAxis,
    {
        let axis = resolve_axis(axis, data.ndim())?;
        Ok(data.map_axis(ndarray::Axis(axis), |lane| self.reduce(lane.iter().copied())))
    }
}

/// A variance function.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarianceKind {
    /// Population variance.
    Var,
    /// Population standard deviation.
    Std,
    /// Standard error of the mean, with one degree of freedom removed.
    Sem,
}

impl FromStr for VarianceKind {
    type Err = SpikeToolsError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        check_param_options(name, "var_type", &VARIANCE_TYPES, false)?;
        Ok(match name {
            "var" => VarianceKind::Var,
            "std" => VarianceKind::Std,
            _ => VarianceKind::Sem,
        })
    }
}

impl VarianceKind {
    /// Compute the spread of the values of a single lane.
    pub fn reduce(self, values: impl Iterator<Item = f64>) -> f64 {
        let values = values.collect::<Vec<_>>();
        match self {
            VarianceKind::Var => variance(&values, 0),
            VarianceKind::Std => variance(&values, 0).sqrt(),
            VarianceKind::Sem => (variance(&values, 1) / values.len() as f64).sqrt(),
        }
    }

    /// Compute the spread of an array along the given axis.
    pub fn compute<S, D>(self, data: &ArrayBase<S, D>, axis: Axis) -> Result<Array<f64, D::Smaller>, SpikeToolsError>
    where
        S: Data<Elem = f64>,
        D: RemoveAxis,
    {
        let axis = resolve_axis(axis, data.ndim())?;
        Ok(data.map_axis(ndarray::Axis(axis), |lane| self.reduce(lane.iter().copied())))
    }
}

/// Select an averaging function by name.
pub fn get_avg_func(avg_type: &str) -> Result<AverageKind, SpikeToolsError> {
    avg_type.parse()
}

/// Select a variance function by name.
pub fn get_var_func(var_type: &str) -> Result<VarianceKind, SpikeToolsError> {
    var_type.parse()
}

/// Map an axis selector to an axis index, negative selectors counting from the last axis.
fn resolve_axis(axis: Axis, ndim: usize) -> Result<usize, SpikeToolsError> {
    let resolved = if axis < 0 { axis + ndim as isize } else { axis };
    if resolved < 0 || resolved >= ndim as isize {
        return Err(SpikeToolsError::InvalidParameter(format!(
            "axis {} is out of bounds for an array with {} dimensions",
            axis, ndim
        )));
    }
    Ok(resolved as usize)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: Vec<f64>) -> f64 {
    if values.is_empty() || values.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }

    let sorted = values.into_iter().sorted_by(|a, b| a.total_cmp(b)).collect::<Vec<_>>();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Variance with `ddof` delta degrees of freedom, NaN if there are not enough values.
fn variance(values: &[f64], ddof: usize) -> f64 {
    if values.len() <= ddof {
        return f64::NAN;
    }
    let mu = mean(values);
    values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / (values.len() - ddof) as f64
}
