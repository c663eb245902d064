//! Direction type for representing image orientation.

use nalgebra::SMatrix;
use serde::{Serialize, Deserialize};
use super::Vector;

/// Direction matrix representing image orientation.
///
/// Column i holds the physical direction of the i-th image axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Direction<const D: usize>(pub SMatrix<f64, D, D>);

impl<const D: usize> Direction<D> {
    /// Create an identity direction matrix (no rotation).
    pub fn identity() -> Self {
        Self(SMatrix::identity())
    }

    /// Build a direction matrix from row-major values.
    pub fn from_rows(rows: [[f64; D]; D]) -> Self {
        Self(SMatrix::from_fn(|r, c| rows[r][c]))
    }

    /// Check if direction matrix is orthogonal (rotation or reflection).
    pub fn is_orthogonal(&self) -> bool {
        let product = self.0 * self.0.transpose();
        let identity = SMatrix::<f64, D, D>::identity();
        (0..D).all(|i| (0..D).all(|j| (product[(i, j)] - identity[(i, j)]).abs() < 1e-6))
    }

    /// Determinant of the direction matrix.
    ///
    /// Closed form for 2D and 3D, partial-pivot elimination otherwise.
    /// nalgebra's `determinant` needs a typenum bound a generic `D` cannot meet.
    pub fn determinant(&self) -> f64 {
        let m = &self.0;
        match D {
            0 => 1.0,
            1 => m[(0, 0)],
            2 => m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)],
            3 => {
                m[(0, 0)] * (m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)])
                    - m[(0, 1)] * (m[(1, 0)] * m[(2, 2)] - m[(1, 2)] * m[(2, 0)])
                    + m[(0, 2)] * (m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)])
            }
            _ => eliminate(*m),
        }
    }

    /// Try to compute the inverse of the direction matrix.
    pub fn try_inverse(&self) -> Option<Self> {
        self.0.try_inverse().map(Self)
    }

    /// Rows as plain arrays, row-major.
    pub fn rows(&self) -> [[f64; D]; D] {
        std::array::from_fn(|r| std::array::from_fn(|c| self.0[(r, c)]))
    }

    /// Get the inner nalgebra matrix.
    pub fn inner(&self) -> &SMatrix<f64, D, D> {
        &self.0
    }
}

fn eliminate<const D: usize>(mut m: SMatrix<f64, D, D>) -> f64 {
    let mut det = 1.0;
    for col in 0..D {
        let pivot = (col..D)
            .max_by(|&a, &b| m[(a, col)].abs().total_cmp(&m[(b, col)].abs()))
            .unwrap_or(col);
        if m[(pivot, col)].abs() < 1e-12 {
            return 0.0;
        }
        if pivot != col {
            m.swap_rows(pivot, col);
            det = -det;
        }
        det *= m[(col, col)];
        for row in (col + 1)..D {
            let factor = m[(row, col)] / m[(col, col)];
            for k in col..D {
                m[(row, k)] -= factor * m[(col, k)];
            }
        }
    }
    det
}

impl<const D: usize> Default for Direction<D> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<const D: usize> std::ops::Index<(usize, usize)> for Direction<D> {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.0[index]
    }
}

impl<const D: usize> std::ops::IndexMut<(usize, usize)> for Direction<D> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl<const D: usize> std::ops::Mul<Vector<D>> for Direction<D> {
    type Output = Vector<D>;

    fn mul(self, vector: Vector<D>) -> Self::Output {
        Vector(self.0 * vector.0)
    }
}
