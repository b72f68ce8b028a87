//! Dense matrices over a field and a Gaussian-elimination solver.
//!
//! The solver is used to take `p`-th roots in algebraic extensions
//! and to divide algebraic numbers.

use std::fmt::Display;
use std::ops::{Index, IndexMut};
use std::slice::Chunks;

use smallvec::SmallVec;
use thiserror::Error;

use crate::domains::Field;
use crate::printer::{PrintOptions, PrintState};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Matrix<F: Field> {
    pub(crate) shape: (usize, usize),
    pub(crate) data: SmallVec<[F::Element; 25]>,
    pub(crate) field: F,
}

impl<F: Field> Matrix<F> {
    /// Create a zero matrix.
    pub fn new(rows: usize, cols: usize, field: F) -> Matrix<F> {
        Matrix {
            shape: (rows, cols),
            data: (0..rows * cols).map(|_| field.zero()).collect(),
            field,
        }
    }

    /// Create a matrix from its entries in row-major order.
    pub fn from_linear(
        rows: usize,
        cols: usize,
        data: Vec<F::Element>,
        field: F,
    ) -> Result<Matrix<F>, LinearSolverError> {
        if data.len() != rows * cols {
            return Err(LinearSolverError::ShapeMismatch);
        }

        Ok(Matrix {
            shape: (rows, cols),
            data: data.into(),
            field,
        })
    }

    /// Create a column vector.
    pub fn column(data: Vec<F::Element>, field: F) -> Matrix<F> {
        Matrix {
            shape: (data.len(), 1),
            data: data.into(),
            field,
        }
    }

    pub fn rows(&self) -> usize {
        self.shape.0
    }

    pub fn cols(&self) -> usize {
        self.shape.1
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn row_iter(&self) -> Chunks<'_, F::Element> {
        self.data.chunks(self.shape.1.max(1))
    }

    /// Consume the matrix and return its entries in row-major order.
    pub fn into_vec(self) -> Vec<F::Element> {
        self.data.into_vec()
    }

    fn swap_rows(&mut self, a: usize, b: usize, start_col: usize) {
        for l in start_col..self.shape.1 {
            self.data.swap(a * self.shape.1 + l, b * self.shape.1 + l);
        }
    }
}

impl<F: Field> Index<(usize, usize)> for Matrix<F> {
    type Output = F::Element;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.data[index.0 * self.shape.1 + index.1]
    }
}

impl<F: Field> IndexMut<(usize, usize)> for Matrix<F> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut F::Element {
        &mut self.data[index.0 * self.shape.1 + index.1]
    }
}

impl<F: Field> Display for Matrix<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let opts = PrintOptions::default();
        let mut s = String::new();
        s.push('{');
        for (ri, r) in self.row_iter().enumerate() {
            s.push('{');
            for (ci, c) in r.iter().enumerate() {
                self.field.format(c, &opts, PrintState::new(), &mut s)?;
                if ci + 1 < self.shape.1 {
                    s.push(',');
                }
            }
            s.push('}');
            if ri + 1 < self.shape.0 {
                s.push(',');
            }
        }
        s.push('}');
        f.write_str(&s)
    }
}

/// Error from the linear solver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinearSolverError {
    #[error("underdetermined system: rank between {min_rank} and {max_rank}")]
    Underdetermined { min_rank: usize, max_rank: usize },
    #[error("inconsistent system")]
    Inconsistent,
    #[error("matrix is not square")]
    NotSquare,
    #[error("matrix shapes do not match")]
    ShapeMismatch,
}

impl<F: Field> Matrix<F> {
    /// Compute the determinant of the matrix. A singular matrix has determinant zero.
    pub fn det(&self) -> Result<F::Element, LinearSolverError> {
        if self.shape.0 != self.shape.1 {
            return Err(LinearSolverError::NotSquare);
        }

        let mut m = self.clone();
        let mut det = m.field.one();
        let n = self.shape.0;
        for j in 0..n {
            let Some(k) = (j..n).find(|k| !F::is_zero(&m[(*k, j)])) else {
                return Ok(m.field.zero());
            };
            if k != j {
                m.swap_rows(j, k, j);
                det = m.field.neg(&det);
            }

            let pivot = m[(j, j)].clone();
            m.field.mul_assign(&mut det, &pivot);
            let inv = m.field.inv(&pivot);
            for k in j + 1..n {
                if F::is_zero(&m[(k, j)]) {
                    continue;
                }
                let s = m.field.mul(&m[(k, j)], &inv);
                for l in j..n {
                    let t = m.field.mul(&m[(j, l)], &s);
                    m[(k, l)] = m.field.sub(&m[(k, l)], &t);
                }
            }
        }

        Ok(det)
    }

    /// Bring the first `max_col` columns into row echelon form,
    /// applying the same row operations to the remaining columns.
    /// Returns the rank of the reduced block.
    fn row_reduce(&mut self, max_col: usize) -> Result<usize, LinearSolverError> {
        let (neqs, ncols) = self.shape;

        let mut i = 0;
        for j in 0..max_col {
            if i >= neqs {
                break;
            }

            if F::is_zero(&self[(i, j)]) {
                match (i + 1..neqs).find(|k| !F::is_zero(&self[(*k, j)])) {
                    Some(k) => self.swap_rows(i, k, j),
                    None => {
                        return Err(LinearSolverError::Underdetermined {
                            min_rank: i,
                            max_rank: max_col - 1,
                        })
                    }
                }
            }

            let inv_x = self.field.inv(&self[(i, j)]);
            for k in i + 1..neqs {
                if F::is_zero(&self[(k, j)]) {
                    continue;
                }
                let s = self.field.mul(&self[(k, j)], &inv_x);
                self[(k, j)] = self.field.zero();
                for l in j + 1..ncols {
                    let t = self.field.mul(&self[(i, l)], &s);
                    self[(k, l)] = self.field.sub(&self[(k, l)], &t);
                }
            }
            i += 1;
        }

        Ok(i)
    }

    /// Solve `A * x = b` for `x`, where `A` is `self` and `b` a column vector.
    pub fn solve(&self, b: &Matrix<F>) -> Result<Matrix<F>, LinearSolverError> {
        if self.shape.0 != b.shape.0 || b.shape.1 != 1 || self.field != b.field {
            return Err(LinearSolverError::ShapeMismatch);
        }

        let (neqs, nvars) = self.shape;
        if neqs < nvars {
            return Err(LinearSolverError::Underdetermined {
                min_rank: 0,
                max_rank: neqs,
            });
        }

        // augmented matrix
        let mut m = Matrix::new(neqs, nvars + 1, self.field.clone());
        for r in 0..neqs {
            for c in 0..nvars {
                m[(r, c)] = self[(r, c)].clone();
            }
            m[(r, nvars)] = b.data[r].clone();
        }

        let rank = m.row_reduce(nvars)?;

        for k in rank..neqs {
            if !F::is_zero(&m[(k, nvars)]) {
                return Err(LinearSolverError::Inconsistent);
            }
        }

        if rank < nvars {
            return Err(LinearSolverError::Underdetermined {
                min_rank: rank,
                max_rank: rank,
            });
        }

        // back substitution
        for i in (0..nvars).rev() {
            if !m.field.is_one(&m[(i, i)]) {
                let inv_x = m.field.inv(&m[(i, i)]);
                m[(i, nvars)] = m.field.mul(&m[(i, nvars)], &inv_x);
            }
            for k in 0..i {
                if !F::is_zero(&m[(k, i)]) {
                    let t = m.field.mul(&m[(i, nvars)], &m[(k, i)]);
                    m[(k, nvars)] = m.field.sub(&m[(k, nvars)], &t);
                }
            }
        }

        Ok(Matrix::column(
            (0..nvars).map(|i| m[(i, nvars)].clone()).collect(),
            m.field,
        ))
    }
}

#[cfg(test)]
mod test {
    use crate::domains::finite_field::{FiniteField, FiniteFieldCore};
    use crate::domains::rational::{Rational, Q};

    use super::{LinearSolverError, Matrix};

    fn zp_matrix(rows: usize, cols: usize, data: &[u32]) -> Matrix<FiniteField<u32>> {
        let field = FiniteField::<u32>::new(17);
        Matrix::from_linear(
            rows,
            cols,
            data.iter().map(|n| field.to_element(*n)).collect(),
            field,
        )
        .unwrap()
    }

    fn values(m: Matrix<FiniteField<u32>>) -> Vec<u32> {
        let field = m.field;
        m.into_vec().iter().map(|x| field.from_element(x)).collect()
    }

    #[test]
    fn solve() {
        let a = zp_matrix(3, 3, &[1, 1, 2, 3, 4, 3, 16, 5, 5]);
        let b = zp_matrix(3, 1, &[3, 15, 8]);
        assert_eq!(values(a.solve(&b).unwrap()), vec![2, 3, 16]);

        let a = zp_matrix(2, 2, &[1, 0, 0, 1]);
        let b = zp_matrix(2, 1, &[5, 6]);
        assert_eq!(values(a.solve(&b).unwrap()), vec![5, 6]);
    }

    #[test]
    fn overdetermined() {
        let a = zp_matrix(5, 3, &[1, 1, 2, 3, 4, 3, 9, 0, 11, 1, 1, 7, 2, 3, 8]);
        let b = zp_matrix(5, 1, &[3, 15, 7, 6, 6]);
        assert_eq!(values(a.solve(&b).unwrap()), vec![11, 1, 4]);
    }

    #[test]
    fn singular_systems() {
        let a = zp_matrix(2, 3, &[1, 1, 2, 3, 4, 3]);
        let b = zp_matrix(2, 1, &[3, 15]);
        assert_eq!(
            a.solve(&b),
            Err(LinearSolverError::Underdetermined {
                min_rank: 0,
                max_rank: 2
            })
        );

        let a = zp_matrix(3, 3, &[1, 1, 2, 3, 4, 3, 10, 7, 12]);
        let b = zp_matrix(3, 1, &[3, 15, 12]);
        assert_eq!(
            a.solve(&b),
            Err(LinearSolverError::Underdetermined {
                min_rank: 2,
                max_rank: 2
            })
        );

        let a = zp_matrix(4, 3, &[1, 1, 2, 3, 4, 3, 16, 5, 5, 14, 2, 4]);
        let b = zp_matrix(4, 1, &[3, 15, 8, 3]);
        assert_eq!(a.solve(&b), Err(LinearSolverError::Inconsistent));

        let b = zp_matrix(4, 1, &[3, 15, 8, 1]);
        let a = zp_matrix(3, 3, &[1, 1, 2, 3, 4, 3, 16, 5, 5]);
        assert_eq!(a.solve(&b), Err(LinearSolverError::ShapeMismatch));
    }

    #[test]
    fn rational_solve_and_det() {
        let r = |n: i64| Rational::from(n);
        let a = Matrix::from_linear(
            3,
            3,
            [1, 1, 2, 3, 4, 3, 16, 5, 5].into_iter().map(r).collect(),
            Q,
        )
        .unwrap();
        let b = Matrix::column([3, 15, 8].into_iter().map(r).collect(), Q);

        assert_eq!(
            a.solve(&b).unwrap().into_vec(),
            vec![
                Rational::from((-5, 6)),
                Rational::from((47, 10)),
                Rational::from((-13, 30))
            ]
        );

        // 1(20-15) - 1(15-48) + 2(15-64)
        assert_eq!(a.det().unwrap(), r(-60));
        assert_eq!(a.to_string(), "{{1,1,2},{3,4,3},{16,5,5}}");
    }
}
