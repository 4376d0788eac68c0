//! Helpers to reshape, clean, bin and smooth data arrays.
use std::str::FromStr;

use ndarray::{Array, Array2, ArrayBase, Data, Dimension, Ix2};
use serde::{Deserialize, Serialize};

use super::base::flatten;
use super::checks::{
    check_array_orientation, check_bin_range, check_param_lengths, check_param_options,
    check_param_range, nan_minmax, Orientation,
};
use super::shape::Shaped;
use crate::error::SpikeToolsError;

/// The number of standard deviations at which the Gaussian smoothing kernel is truncated.
pub const GAUSSIAN_TRUNCATE: f64 = 4.0;

/// The side of the bins on which values exactly on an outer edge are moved inside.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinSide {
    Left,
    Right,
}

impl FromStr for BinSide {
    type Err = SpikeToolsError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        check_param_options(name, "side", &["left", "right"], false)?;
        Ok(if name == "left" {
            BinSide::Left
        } else {
            BinSide::Right
        })
    }
}

/// Returns a copy of a 2d array with a row orientation, i.e., transposed if it is a column.
pub fn make_row_orientation<S: Data<Elem = f64>>(
    arr: &ArrayBase<S, Ix2>,
) -> Result<Array2<f64>, SpikeToolsError> {
    Ok(match check_array_orientation(arr)? {
        Orientation::Column => arr.t().to_owned(),
        _ => arr.to_owned(),
    })
}

/// Returns the smallest and largest values, ignoring NaN values.
pub fn compute_range(data: &[f64]) -> Result<(f64, f64), SpikeToolsError> {
    nan_minmax(data).ok_or_else(|| {
        SpikeToolsError::InvalidParameter("cannot compute the range of data without non-NaN values".to_string())
    })
}

/// Returns the data without NaN values.
pub fn drop_nans(data: &[f64]) -> Vec<f64> {
    data.iter().copied().filter(|v| !v.is_nan()).collect()
}

/// Returns a 2d array without NaN values, which are dropped row by row.
/// Every row must contain the same number of NaN values.
pub fn drop_nans_2d<S: Data<Elem = f64>>(data: &ArrayBase<S, Ix2>) -> Result<Array2<f64>, SpikeToolsError> {
    let rows: Vec<Vec<f64>> = data
        .rows()
        .into_iter()
        .map(|row| row.iter().copied().filter(|v| !v.is_nan()).collect())
        .collect();

    let labels: Vec<String> = (0..rows.len()).map(|i| format!("row {}", i)).collect();
    check_param_lengths(&rows, &labels, None)?;

    let (num_rows, num_cols) = (rows.len(), rows.first().map_or(0, Vec::len));
    Array2::from_shape_vec((num_rows, num_cols), flatten(rows))
        .map_err(|e| SpikeToolsError::InvalidParameter(e.to_string()))
}

/// Assign each value to a bin, given increasing bin edges.
///
/// Bin `i` covers `[edges[i], edges[i + 1])`. Values below the first edge get -1, values at or
/// above the last edge (and NaN values) get `edges.len() - 1`. With `include_edge`, values exactly
/// on the last edge are assigned to the last bin instead.
pub fn assign_data_to_bins(
    data: &[f64],
    edges: &[f64],
    check_range: bool,
    include_edge: bool,
) -> Result<Vec<isize>, SpikeToolsError> {
    if check_range {
        // out of range values are logged and still assigned below
        let _ = check_bin_range(data, edges);
    }

    let mut assignments = digitize(data, edges);
    if include_edge {
        assignments = include_bin_edge(&assignments, data, edges, BinSide::Left)?;
    }

    Ok(assignments.into_iter().map(|a| a as isize - 1).collect())
}

/// Index of the first edge strictly above each value, as numpy's `digitize` with increasing edges.
fn digitize(data: &[f64], edges: &[f64]) -> Vec<usize> {
    data.iter()
        .map(|&x| {
            if x.is_nan() {
                edges.len()
            } else {
                edges.partition_point(|&edge| edge <= x)
            }
        })
        .collect()
}

/// Move values sitting exactly on an outer edge into the adjacent bin.
///
/// With [`BinSide::Left`], values equal to the last edge are moved down one bin.
/// With [`BinSide::Right`], values equal to the first edge are moved up one bin.
pub fn include_bin_edge(
    assignments: &[usize],
    positions: &[f64],
    edges: &[f64],
    side: BinSide,
) -> Result<Vec<usize>, SpikeToolsError> {
    let params: [&dyn Shaped; 2] = [&assignments, &positions];
    check_param_lengths(&params, &["assignments", "positions"], None)?;

    let edge = match side {
        BinSide::Left => edges.last(),
        BinSide::Right => edges.first(),
    };

    Ok(assignments
        .iter()
        .zip(positions)
        .map(|(&assignment, &position)| match (side, edge) {
            (BinSide::Left, Some(&edge)) if position == edge => assignment.saturating_sub(1),
            (BinSide::Right, Some(&edge)) if position == edge => assignment + 1,
            _ => assignment,
        })
        .collect())
}

/// Smooth data with a Gaussian kernel of standard deviation `sigma`, along every axis.
///
/// Borders are handled by reflecting the data about the edge of the last sample.
/// A zero `sigma` leaves the data unchanged.
pub fn smooth_data<S, D>(data: &ArrayBase<S, D>, sigma: f64) -> Result<Array<f64, D>, SpikeToolsError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    check_param_range(sigma, "sigma", (0.0, f64::INFINITY))?;
    if sigma.is_infinite() {
        return Err(SpikeToolsError::InvalidParameter(
            "the smoothing width must be finite".to_string(),
        ));
    }

    let mut smoothed = data.to_owned();
    if sigma == 0.0 {
        return Ok(smoothed);
    }

    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as isize;

    for axis in 0..smoothed.ndim() {
        for mut lane in smoothed.lanes_mut(ndarray::Axis(axis)) {
            let input = lane.to_vec();
            for (i, out) in lane.iter_mut().enumerate() {
                *out = kernel
                    .iter()
                    .enumerate()
                    .map(|(k, w)| w * input[reflect(i as isize + k as isize - radius, input.len())])
                    .sum();
            }
        }
    }

    Ok(smoothed)
}

/// Normalized Gaussian weights over `[-radius, radius]`.
fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (GAUSSIAN_TRUNCATE * sigma + 0.5) as isize;
    let weights: Vec<f64> = (-radius..=radius)
        .map(|x| (-0.5 * (x as f64 / sigma).powi(2)).exp())
        .collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Index into `[0, len)` of a position reflected about the data edges, i.e., `d c b a | a b c d | d c b a`.
fn reflect(index: isize, len: usize) -> usize {
    let period = 2 * len as isize;
    let folded = index.rem_euclid(period);
    if folded < len as isize {
        folded as usize
    } else {
        (period - 1 - folded) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};

    #[test]
    fn test_make_row_orientation() {
        let arr_r = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        assert_eq!(make_row_orientation(&arr_r).unwrap(), arr_r);

        let arr_c = array![[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]];
        assert_eq!(make_row_orientation(&arr_c).unwrap(), arr_r);
    }

    #[test]
    fn test_compute_range() {
        assert_eq!(compute_range(&[0.5, 1.0, 1.5, 2.0, 2.5]), Ok((0.5, 2.5)));
        assert_eq!(compute_range(&[f64::NAN, 3.0, -1.0]), Ok((-1.0, 3.0)));
        assert!(compute_range(&[]).is_err());
        assert!(compute_range(&[f64::NAN]).is_err());
    }

    #[test]
    fn test_drop_nans() {
        let data = [0.5, 1.0, f64::NAN, 1.5, 2.0, f64::NAN, 2.5];
        assert_eq!(drop_nans(&data), vec![0.5, 1.0, 1.5, 2.0, 2.5]);

        let data = array![
            [0.5, f64::NAN, 1.0, 1.5, 2.0, f64::NAN, 2.5],
            [0.5, f64::NAN, 1.0, 1.5, 2.0, f64::NAN, 2.5]
        ];
        assert_eq!(
            drop_nans_2d(&data).unwrap(),
            array![[0.5, 1.0, 1.5, 2.0, 2.5], [0.5, 1.0, 1.5, 2.0, 2.5]]
        );

        let data = array![[0.5, f64::NAN], [0.5, 1.0]];
        assert!(matches!(
            drop_nans_2d(&data),
            Err(SpikeToolsError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_assign_data_to_bins() {
        let data = [1.0, 3.0, 5.0, 7.0];
        let edges = [0.0, 2.0, 4.0, 6.0, 8.0];
        assert_eq!(assign_data_to_bins(&data, &edges, true, true), Ok(vec![0, 1, 2, 3]));

        // values on the last edge belong to the last bin only if it is included
        let data = [0.0, 2.0, 8.0];
        assert_eq!(assign_data_to_bins(&data, &edges, false, true), Ok(vec![0, 1, 3]));
        assert_eq!(assign_data_to_bins(&data, &edges, false, false), Ok(vec![0, 1, 4]));

        // out of range values
        let data = [-1.0, 9.0, f64::NAN];
        assert_eq!(assign_data_to_bins(&data, &edges, true, true), Ok(vec![-1, 4, 4]));
    }

    #[test]
    fn test_include_bin_edge() {
        let edges = [0.0, 1.0, 2.0];

        let out = include_bin_edge(&[1, 2, 3], &[0.5, 1.5, 2.0], &edges, BinSide::Left).unwrap();
        assert_eq!(out, vec![1, 2, 2]);

        let out = include_bin_edge(&[0, 1, 2], &[0.0, 0.5, 1.5], &edges, BinSide::Right).unwrap();
        assert_eq!(out, vec![1, 1, 2]);

        assert!(include_bin_edge(&[0, 1], &[0.0], &edges, BinSide::Left).is_err());
        assert_eq!("right".parse::<BinSide>(), Ok(BinSide::Right));
        assert!("center".parse::<BinSide>().is_err());
    }

    #[test]
    fn test_smooth_data() {
        let data = Array1::from(vec![0.5, 1.0, 1.5, 2.0, 2.5]);
        let out = smooth_data(&data, 0.5).unwrap();
        assert_ne!(out, data);
        assert_eq!(smooth_data(&data, 0.0).unwrap(), data);

        let data = array![[0.5, 1.0, 1.5, 2.0, 2.5], [0.5, 1.0, 1.5, 2.0, 2.5]];
        let out = smooth_data(&data, 0.5).unwrap();
        assert_eq!(out.shape(), data.shape());
        assert_ne!(out, data);

        // a constant signal is left unchanged
        let flat = Array1::from_elem(8, 3.0);
        assert!(smooth_data(&flat, 2.0)
            .unwrap()
            .iter()
            .all(|v| (v - 3.0).abs() < 1e-12));

        // an impulse spreads symmetrically
        let impulse = Array1::from(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
        let out = smooth_data(&impulse, 1.0).unwrap();
        assert!((out[2] - out[4]).abs() < 1e-12);
        assert!(out[3] > out[2] && out[2] > out[1]);

        assert!(smooth_data(&data, -1.0).is_err());
        assert!(smooth_data(&data, f64::INFINITY).is_err());
    }

    #[test]
    fn test_reflect() {
        assert_eq!(
            (-3..7).map(|i| reflect(i, 3)).collect::<Vec<_>>(),
            vec![2, 1, 0, 0, 1, 2, 2, 1, 0, 0]
        );
    }
}
