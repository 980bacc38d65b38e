//! Dense square-capable matrices with explicit dimensions
//!
//! Dimensions are fixed at construction and checked on access, so a shape
//! mismatch fails where the matrix is built rather than at some arbitrary
//! index far away.

/// A dense row-major matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols);
        self.data[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(row < self.rows && col < self.cols);
        self.data[row * self.cols + col] = value;
    }

    pub fn add_assign(&mut self, row: usize, col: usize, value: f64) {
        assert!(row < self.rows && col < self.cols);
        self.data[row * self.cols + col] += value;
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for col in 0..self.cols {
            let tmp = self.get(a, col);
            self.set(a, col, self.get(b, col));
            self.set(b, col, tmp);
        }
    }

    /// Invert via Gauss-Jordan elimination with partial pivoting.
    ///
    /// Returns `None` when a pivot is exactly zero and no row below it can
    /// supply a non-zero one, i.e. the matrix is singular.
    pub fn inverse(&self) -> Option<Matrix> {
        assert_eq!(self.rows, self.cols, "only square matrices invert");
        let n = self.rows;
        let mut work = self.clone();
        let mut inverse = Matrix::identity(n);

        for i in 0..n {
            if work.get(i, i) == 0.0 {
                // find a row below with a non-zero entry in this column
                let swap = (i + 1..n).find(|&row| work.get(row, i) != 0.0)?;
                work.swap_rows(i, swap);
                inverse.swap_rows(i, swap);
            }
            let pivot = work.get(i, i);
            for col in 0..n {
                work.set(i, col, work.get(i, col) / pivot);
                inverse.set(i, col, inverse.get(i, col) / pivot);
            }
            for row in 0..n {
                if row == i {
                    continue;
                }
                let factor = work.get(row, i);
                for col in 0..n {
                    work.add_assign(row, col, -factor * work.get(i, col));
                    inverse.add_assign(row, col, -factor * inverse.get(i, col));
                }
            }
        }
        Some(inverse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_rows(rows: &[&[f64]]) -> Matrix {
        let mut m = Matrix::zeros(rows.len(), rows[0].len());
        for (i, row) in rows.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                m.set(i, j, value);
            }
        }
        m
    }

    fn multiply(a: &Matrix, b: &Matrix) -> Matrix {
        let mut out = Matrix::zeros(a.rows(), b.cols());
        for i in 0..a.rows() {
            for j in 0..b.cols() {
                let mut sum = 0.0;
                for k in 0..a.cols() {
                    sum += a.get(i, k) * b.get(k, j);
                }
                out.set(i, j, sum);
            }
        }
        out
    }

    #[test]
    fn test_identity_inverts_to_itself() {
        let identity = Matrix::identity(4);
        assert_eq!(identity.inverse().unwrap(), identity);
    }

    #[test]
    fn test_inverse_times_original_is_identity() {
        let m = from_rows(&[&[4.0, 7.0, 2.0], &[3.0, 6.0, 1.0], &[2.0, 5.0, 3.0]]);
        let inverse = m.inverse().unwrap();
        let product = multiply(&m, &inverse);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((product.get(i, j) - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_singular_matrix_returns_none() {
        // second row is a multiple of the first
        let m = from_rows(&[&[1.0, 2.0], &[2.0, 4.0]]);
        assert!(m.inverse().is_none());
    }

    #[test]
    fn test_zero_matrix_is_singular() {
        assert!(Matrix::zeros(3, 3).inverse().is_none());
    }

    #[test]
    fn test_pivoting_handles_zero_diagonal() {
        // invertible, but needs a row swap on the first pivot
        let m = from_rows(&[&[0.0, 1.0], &[1.0, 0.0]]);
        let inverse = m.inverse().unwrap();
        assert!((inverse.get(0, 1) - 1.0).abs() < 1e-12);
        assert!((inverse.get(1, 0) - 1.0).abs() < 1e-12);
    }
}
