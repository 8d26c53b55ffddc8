// Matrix arithmetic: elementwise add/subtract and matrix multiply

use crate::error::MatrixError;
use crate::grid::{Grid, Operation};

/// Dispatch on `op`.
pub fn apply(op: Operation, a: &Grid, b: &Grid) -> Result<Grid, MatrixError> {
    match op {
        Operation::Add => add(a, b),
        Operation::Subtract => subtract(a, b),
        Operation::Multiply => multiply(a, b),
    }
}

pub fn add(a: &Grid, b: &Grid) -> Result<Grid, MatrixError> {
    elementwise(Operation::Add, a, b, |x, y| x + y)
}

pub fn subtract(a: &Grid, b: &Grid) -> Result<Grid, MatrixError> {
    elementwise(Operation::Subtract, a, b, |x, y| x - y)
}

fn elementwise(
    op: Operation,
    a: &Grid,
    b: &Grid,
    f: impl Fn(f64, f64) -> f64,
) -> Result<Grid, MatrixError> {
    if a.dims() != b.dims() {
        return Err(MatrixError::DimensionMismatch { op, left: a.dims(), right: b.dims() });
    }

    let data: Vec<f64> = a
        .as_flat()
        .iter()
        .zip(b.as_flat())
        .map(|(&x, &y)| f(x, y))
        .collect();

    Grid::from_flat(a.rows(), a.cols(), data)
        .ok_or(MatrixError::DimensionMismatch { op, left: a.dims(), right: b.dims() })
}

/// Matrix product. Each cell sums `a[i][k] * b[k][j]` in increasing `k`.
pub fn multiply(a: &Grid, b: &Grid) -> Result<Grid, MatrixError> {
    if a.cols() != b.rows() {
        return Err(MatrixError::DimensionMismatch {
            op: Operation::Multiply,
            left: a.dims(),
            right: b.dims(),
        });
    }

    let (rows, inner, cols) = (a.rows(), a.cols(), b.cols());
    let lhs = a.as_flat();
    let rhs = b.as_flat();
    let mut data = vec![0.0; rows * cols];

    for i in 0..rows {
        for j in 0..cols {
            let mut sum = 0.0;
            for k in 0..inner {
                sum += lhs[i * inner + k] * rhs[k * cols + j];
            }
            data[i * cols + j] = sum;
        }
    }

    Grid::from_flat(rows, cols, data).ok_or(MatrixError::DimensionMismatch {
        op: Operation::Multiply,
        left: a.dims(),
        right: b.dims(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Dimensions;

    fn grid(rows: Vec<Vec<f64>>) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn add_2x2() {
        let a = grid(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = grid(vec![vec![5.0, 6.0], vec![7.0, 8.0]]);
        assert_eq!(add(&a, &b).unwrap().to_rows(), vec![vec![6.0, 8.0], vec![10.0, 12.0]]);
    }

    #[test]
    fn subtract_2x2() {
        let a = grid(vec![vec![5.0, 5.0], vec![5.0, 5.0]]);
        let b = grid(vec![vec![2.0, 3.0], vec![4.0, 1.0]]);
        assert_eq!(subtract(&a, &b).unwrap().to_rows(), vec![vec![3.0, 2.0], vec![1.0, 4.0]]);
    }

    #[test]
    fn multiply_2x3_by_3x2() {
        let a = grid(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let b = grid(vec![vec![7.0, 8.0], vec![9.0, 10.0], vec![11.0, 12.0]]);
        let r = multiply(&a, &b).unwrap();
        assert_eq!(r.dims(), Dimensions::new(2, 2));
        assert_eq!(r.to_rows(), vec![vec![58.0, 64.0], vec![139.0, 154.0]]);
    }

    #[test]
    fn multiply_row_by_column_is_1x1() {
        let a = grid(vec![vec![1.0, 2.0, 3.0]]);
        let b = grid(vec![vec![4.0], vec![5.0], vec![6.0]]);
        assert_eq!(multiply(&a, &b).unwrap().to_rows(), vec![vec![32.0]]);
        // and the other way round is an outer product
        assert_eq!(multiply(&b, &a).unwrap().dims(), Dimensions::new(3, 3));
    }

    #[test]
    fn add_shape_mismatch() {
        let a = grid(vec![vec![1.0, 2.0]]);
        let b = grid(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(
            add(&a, &b),
            Err(MatrixError::DimensionMismatch {
                op: Operation::Add,
                left: Dimensions::new(1, 2),
                right: Dimensions::new(2, 2),
            })
        );
    }

    #[test]
    fn equal_area_is_still_a_mismatch() {
        let a = grid(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let b = grid(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
        let err = subtract(&a, &b).unwrap_err();
        assert_eq!(err.to_string(), "A and B must have same dimensions for subtraction");
    }

    #[test]
    fn multiply_inner_mismatch() {
        let a = grid(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = grid(vec![vec![1.0, 2.0, 3.0]]);
        let err = multiply(&a, &b).unwrap_err();
        assert_eq!(err.to_string(), "A.cols must equal B.rows for multiplication");
    }

    #[test]
    fn inputs_are_not_mutated() {
        let a = grid(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = a.clone();
        let _ = apply(Operation::Add, &a, &b).unwrap();
        let _ = apply(Operation::Multiply, &a, &b).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_rows(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn empty_operands() {
        let e = Grid::empty();
        assert!(add(&e, &e).unwrap().is_empty());
        assert!(multiply(&e, &e).unwrap().is_empty());
    }
}
