//! Dense LU factorization with partial pivoting.

use crate::error::{NodalError, Result};

/// A column that could not be pivoted during factorization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SingularPivot {
    /// Column (unknown) without a usable pivot
    pub column: usize,
    /// Largest candidate pivot magnitude found in that column
    pub magnitude: f64,
}

/// LU factors of a square matrix, `P·A = L·U`.
///
/// L (unit diagonal) and U share one row-major buffer.
#[derive(Debug, Clone)]
pub struct LuDecomposition {
    lu: Vec<f64>,
    pivots: Vec<usize>,
    size: usize,
}

impl LuDecomposition {
    /// Factor a row-major `size`×`size` matrix.
    ///
    /// A pivot is rejected when its magnitude falls below `pivot_tolerance`
    /// times the largest original entry of its own column, so well-posed
    /// systems with widely spread entries still factor.
    pub fn factor(
        a: &[f64],
        size: usize,
        pivot_tolerance: f64,
    ) -> std::result::Result<Self, SingularPivot> {
        debug_assert_eq!(a.len(), size * size);
        let n = size;
        let mut lu = a.to_vec();
        let mut pivots: Vec<usize> = (0..n).collect();

        let column_scale: Vec<f64> = (0..n)
            .map(|k| (0..n).fold(0.0_f64, |m, i| m.max(a[i * n + k].abs())))
            .collect();

        for k in 0..n {
            // Find pivot
            let mut max_val = lu[k * n + k].abs();
            let mut max_row = k;

            for i in (k + 1)..n {
                let val = lu[i * n + k].abs();
                if val > max_val {
                    max_val = val;
                    max_row = i;
                }
            }

            let scale = column_scale[k];
            if scale == 0.0 || max_val <= pivot_tolerance * scale || !max_val.is_finite() {
                return Err(SingularPivot {
                    column: k,
                    magnitude: max_val,
                });
            }

            // Swap rows if needed
            if max_row != k {
                pivots.swap(k, max_row);
                for j in 0..n {
                    lu.swap(k * n + j, max_row * n + j);
                }
            }

            // Eliminate
            let pivot = lu[k * n + k];
            for i in (k + 1)..n {
                let factor = lu[i * n + k] / pivot;
                lu[i * n + k] = factor;
                for j in (k + 1)..n {
                    lu[i * n + j] -= factor * lu[k * n + j];
                }
            }
        }

        Ok(Self { lu, pivots, size })
    }

    /// Matrix dimension.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Solve `A·x = b` with the stored factors.
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>> {
        let n = self.size;
        if b.len() != n {
            return Err(NodalError::DimensionMismatch {
                expected: n,
                actual: b.len(),
            });
        }

        // Apply pivot permutation to b
        let mut x: Vec<f64> = self.pivots.iter().map(|&p| b[p]).collect();

        // Forward substitution (L * y = Pb)
        for i in 0..n {
            for j in 0..i {
                x[i] -= self.lu[i * n + j] * x[j];
            }
        }

        // Back substitution (U * x = y)
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                x[i] -= self.lu[i * n + j] * x[j];
            }
            x[i] /= self.lu[i * n + i];
        }

        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solve_simple() {
        // 2x + y = 5
        // x + 3y = 6
        // Solution: x = 1.8, y = 1.4
        let a = [2.0, 1.0, 1.0, 3.0];
        let lu = LuDecomposition::factor(&a, 2, 1e-12).unwrap();
        let x = lu.solve(&[5.0, 6.0]).unwrap();

        assert_relative_eq!(x[0], 1.8, epsilon = 1e-12);
        assert_relative_eq!(x[1], 1.4, epsilon = 1e-12);
    }

    #[test]
    fn test_solve_needs_row_swap() {
        // Zero in the leading position forces a pivot swap
        let a = [0.0, 1.0, 2.0, 1.0];
        let lu = LuDecomposition::factor(&a, 2, 1e-12).unwrap();
        let x = lu.solve(&[3.0, 5.0]).unwrap();

        assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_singular_matrix() {
        let a = [1.0, 2.0, 2.0, 4.0]; // Singular (row 2 = 2 * row 1)
        let err = LuDecomposition::factor(&a, 2, 1e-12).unwrap_err();
        assert_eq!(err.column, 1);
    }

    #[test]
    fn test_zero_column_is_singular() {
        let a = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 3.0];
        let err = LuDecomposition::factor(&a, 3, 1e-12).unwrap_err();
        assert_eq!(err.column, 1);
        assert_eq!(err.magnitude, 0.0);
    }

    #[test]
    fn test_zero_matrix_is_singular() {
        let err = LuDecomposition::factor(&[0.0], 1, 1e-12).unwrap_err();
        assert_eq!(err.column, 0);
    }

    #[test]
    fn test_wide_spread_diagonal() {
        let a = [1e6, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1e-14];
        let lu = LuDecomposition::factor(&a, 3, 1e-12).unwrap();
        let x = lu.solve(&[2e6, 3.0, 5e-14]).unwrap();

        assert_relative_eq!(x[0], 2.0, max_relative = 1e-12);
        assert_relative_eq!(x[1], 3.0, max_relative = 1e-12);
        assert_relative_eq!(x[2], 5.0, max_relative = 1e-12);
    }

    #[test]
    fn test_cancelling_column_is_singular() {
        // Rows of a small conductance island sum to zero
        let g = 1e-9;
        let a = [1e3, 0.0, 0.0, 0.0, g, -g, 0.0, -g, g];
        let err = LuDecomposition::factor(&a, 3, 1e-12).unwrap_err();
        assert_eq!(err.column, 2);
    }

    #[test]
    fn test_empty_system() {
        let lu = LuDecomposition::factor(&[], 0, 1e-12).unwrap();
        assert!(lu.solve(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_dimension_mismatch() {
        let lu = LuDecomposition::factor(&[1.0, 2.0, 3.0, 4.0], 2, 1e-12).unwrap();
        let result = lu.solve(&[1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(NodalError::DimensionMismatch { expected: 2, actual: 3 })));
    }

    #[test]
    fn test_diagonally_dominant_system() {
        let n = 12;
        let a: Vec<f64> = (0..n * n)
            .map(|k| {
                let (i, j) = (k / n, k % n);
                if i == j {
                    n as f64 + 1.0
                } else {
                    1.0 / ((i as f64 - j as f64).abs() + 1.0)
                }
            })
            .collect();
        let b: Vec<f64> = (0..n).map(|i| (i + 1) as f64).collect();

        let x = LuDecomposition::factor(&a, n, 1e-12).unwrap().solve(&b).unwrap();

        for i in 0..n {
            let ax: f64 = (0..n).map(|j| a[i * n + j] * x[j]).sum();
            assert_relative_eq!(ax, b[i], epsilon = 1e-10);
        }
    }
}
