//! Error module for the Rusty Spiketools library.
use std::error::Error;
use std::fmt;

/// Error types for the library.
#[derive(Debug, PartialEq, Clone)]
pub enum SpikeToolsError {
    /// Error for a scalar parameter outside of its bounds.
    OutOfRange { label: String, low: f64, high: f64 },
    /// Error for a string parameter which is not one of the allowed options.
    InvalidOption { label: String, options: Vec<String> },
    /// Error for sibling parameters with different lengths, or with a length different from the expected one.
    LengthMismatch {
        labels: Vec<String>,
        expected: Option<usize>,
    },
    /// Error for arrays whose number of dimensions is not supported, e.g., more than 3.
    Dimensionality(usize),
    /// Error for a missing input, e.g., neither values nor time range to define bins.
    MissingParameter(String),
    /// Error for bin edges which are not strictly increasing.
    MalformedBins,
    /// Error for invalid parameters, e.g., a non-positive bin width.
    InvalidParameter(String),
}

/// Format labels or options the way they are listed in error messages, i.e., `'a', 'b'`.
fn quoted_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("'{}'", item))
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for SpikeToolsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SpikeToolsError::OutOfRange { label, low, high } => write!(
                f,
                "The provided value for the {} parameter is out of bounds. It should be between {:.1} and {:.1}.",
                label, low, high
            ),
            SpikeToolsError::InvalidOption { label, options } => write!(
                f,
                "The provided value for the {} parameter is invalid. It should be chosen from {{{}}}.",
                label,
                quoted_list(options)
            ),
            SpikeToolsError::LengthMismatch { labels, expected } => match expected {
                Some(length) => write!(
                    f,
                    "These parameters should all have length {}: {}.",
                    length,
                    quoted_list(labels)
                ),
                None => write!(
                    f,
                    "These parameters should be the same length: {}.",
                    quoted_list(labels)
                ),
            },
            SpikeToolsError::Dimensionality(ndim) => write!(
                f,
                "Orientation can only be inferred for 1d to 3d arrays, got {} dimensions",
                ndim
            ),
            SpikeToolsError::MissingParameter(e) => write!(f, "Missing parameter: {}", e),
            SpikeToolsError::MalformedBins => write!(f, "Bin definition is ill-formed."),
            SpikeToolsError::InvalidParameter(e) => write!(f, "Invalid parameters: {}", e),
        }
    }
}

impl Error for SpikeToolsError {}

/// Advisory diagnostic for data values extending beyond a bin definition.
/// It never stops a computation; it is logged and handed back to the caller.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct RangeWarning {
    /// The smallest (non-NaN) data value.
    pub min: f64,
    /// The largest (non-NaN) data value.
    pub max: f64,
    /// The first edge of the bin definition.
    pub low: f64,
    /// The last edge of the bin definition.
    pub high: f64,
}

impl fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "The data values extend beyond the given bin definition: data in [{}, {}], bins in [{}, {}]",
            self.min, self.max, self.low, self.high
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let error = SpikeToolsError::OutOfRange {
            label: "sigma".to_string(),
            low: 0.0,
            high: 10.0,
        };
        assert_eq!(
            error.to_string(),
            "The provided value for the sigma parameter is out of bounds. It should be between 0.0 and 10.0."
        );
    }

    #[test]
    fn test_invalid_option_message() {
        let error = SpikeToolsError::InvalidOption {
            label: "avg_type".to_string(),
            options: vec!["mean".to_string(), "median".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "The provided value for the avg_type parameter is invalid. It should be chosen from {'mean', 'median'}."
        );
    }

    #[test]
    fn test_length_mismatch_message() {
        let labels = vec!["times".to_string(), "values".to_string()];
        let error = SpikeToolsError::LengthMismatch {
            labels: labels.clone(),
            expected: None,
        };
        assert_eq!(
            error.to_string(),
            "These parameters should be the same length: 'times', 'values'."
        );

        let error = SpikeToolsError::LengthMismatch {
            labels,
            expected: Some(3),
        };
        assert_eq!(
            error.to_string(),
            "These parameters should all have length 3: 'times', 'values'."
        );
    }
}
