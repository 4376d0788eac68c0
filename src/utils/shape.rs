//! Shape abstraction over the array types accepted by the checks.

use nalgebra::{DMatrix, Scalar};
use ndarray::{ArrayBase, Dimension, RawData};

/// A value with an N-dimensional shape, e.g., an ndarray array, a matrix, or a plain vector.
pub trait Shaped {
    /// Returns the size of each dimension.
    fn dims(&self) -> Vec<usize>;

    /// Returns the number of dimensions.
    fn ndim(&self) -> usize {
        self.dims().len()
    }

    /// Returns the total number of elements.
    fn size(&self) -> usize {
        self.dims().iter().product()
    }
}

impl<S: RawData, D: Dimension> Shaped for ArrayBase<S, D> {
    fn dims(&self) -> Vec<usize> {
        self.shape().to_vec()
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<T: Scalar> Shaped for DMatrix<T> {
    fn dims(&self) -> Vec<usize> {
        vec![self.nrows(), self.ncols()]
    }
}

impl<T> Shaped for [T] {
    fn dims(&self) -> Vec<usize> {
        vec![self.len()]
    }
}

impl<T> Shaped for Vec<T> {
    fn dims(&self) -> Vec<usize> {
        vec![self.len()]
    }
}

impl<T: Shaped + ?Sized> Shaped for &T {
    fn dims(&self) -> Vec<usize> {
        (**self).dims()
    }

    fn size(&self) -> usize {
        (**self).size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2, Array3};

    #[test]
    fn test_ndarray_shape() {
        let arr = Array3::<f64>::zeros((2, 3, 4));
        assert_eq!(arr.dims(), vec![2, 3, 4]);
        assert_eq!(Shaped::ndim(&arr), 3);
        assert_eq!(Shaped::size(&arr), 24);

        let view = arr.view();
        assert_eq!(view.dims(), vec![2, 3, 4]);

        let empty = Array2::<f64>::zeros((0, 5));
        assert_eq!(Shaped::size(&empty), 0);

        let vector = Array1::from(vec![1.0, 2.0]);
        assert_eq!(vector.dims(), vec![2]);
    }

    #[test]
    fn test_matrix_and_vec_shape() {
        let matrix = DMatrix::<f64>::zeros(3, 5);
        assert_eq!(matrix.dims(), vec![3, 5]);
        assert_eq!(Shaped::size(&matrix), 15);

        let vector = vec![0.5, 1.0, 1.5];
        assert_eq!(vector.dims(), vec![3]);
        assert_eq!(vector[..].dims(), vec![3]);
        assert_eq!(Shaped::ndim(&&vector), 1);
    }
}
