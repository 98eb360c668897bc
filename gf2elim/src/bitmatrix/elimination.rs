//! Gaussian elimination over GF(2) with a caller-chosen column order.
//!
//! The kernel walks the columns in the order it is given, picks the first available row with a
//! 1 in each column as pivot, and clears that column below the pivot. Optionally it then clears
//! each pivot column above its pivot too, which leaves the pivot columns as unit vectors (the
//! systematic form that [`orthogonal_complement`](super::complement::orthogonal_complement)
//! builds on).

use super::{BitMatrix, RowOps};
use crate::error::{Gf2Error, Result};
use tracing::{debug, trace};

impl BitMatrix {
    /// Elimination kernel, mirroring every row operation onto `proxy`.
    ///
    /// Column indices must already be known to be in range. Returns the pivot columns in the
    /// order they were found; pivot `i` sits in row `i` afterwards.
    pub(crate) fn gauss_helper(
        &mut self,
        columns: impl IntoIterator<Item = usize>,
        diagonalize: bool,
        proxy: &mut impl RowOps,
    ) -> Vec<usize> {
        let mut pcols = vec![];
        if self.rows() == 0 {
            return pcols;
        }

        let mut row = 0;
        for pcol in columns {
            let Some(row1) = (row..self.rows()).find(|&i| self.bit(i, pcol)) else {
                continue;
            };

            if row != row1 {
                self.swap_rows(row, row1);
                proxy.swap_rows(row, row1);
            }

            // rows strictly between `row` and `row1` are already 0 in this column
            for i in (row1 + 1)..self.rows() {
                if self.bit(i, pcol) {
                    self.add_row(row, i);
                    proxy.add_row(row, i);
                }
            }

            trace!(col = pcol, row, "pivot");
            pcols.push(pcol);
            row += 1;
            if row == self.rows() {
                break;
            }
        }

        if diagonalize {
            for (prow, &pcol) in pcols.iter().enumerate() {
                for i in 0..prow {
                    if self.bit(i, pcol) {
                        self.add_row(prow, i);
                        proxy.add_row(prow, i);
                    }
                }
            }
        }

        debug!(
            rows = self.rows(),
            cols = self.cols(),
            rank = pcols.len(),
            diagonalize,
            "elimination finished"
        );
        pcols
    }

    /// Gaussian elimination in place, visiting columns in the order given by `columns`.
    ///
    /// `columns` may skip columns or repeat them. Skipped columns never become pivots but are
    /// still changed by row operations. With `diagonalize` the pivot columns are also cleared
    /// above their pivots.
    ///
    /// # Errors
    ///
    /// [`Gf2Error::ColumnOutOfRange`] if an index is `>= self.cols()`. The check happens before
    /// any row is touched, so on error the matrix is unchanged.
    ///
    /// ```
    /// use gf2elim::{BitMatrix, EntryPolicy};
    ///
    /// let mut m = BitMatrix::from_rows(&[[1u8, 1, 0], [0, 1, 1]], EntryPolicy::Strict).unwrap();
    /// let pivots = m.gauss_with_columns(&[2, 1, 0], true).unwrap();
    /// assert_eq!(pivots, vec![2, 1]);
    /// assert_eq!(m.to_rows(), vec![vec![1, 0, 1], vec![1, 1, 0]]);
    /// ```
    pub fn gauss_with_columns(
        &mut self,
        columns: &[usize],
        diagonalize: bool,
    ) -> Result<Vec<usize>> {
        self.check_columns(columns)?;
        Ok(self.gauss_helper(columns.iter().copied(), diagonalize, &mut ()))
    }

    /// Gaussian elimination in place, visiting columns left to right.
    ///
    /// If `diagonalize` is true, produce reduced echelon form, otherwise just echelon form.
    /// Returns the pivot columns.
    #[inline]
    pub fn gauss(&mut self, diagonalize: bool) -> Vec<usize> {
        let cols = self.cols();
        self.gauss_helper(0..cols, diagonalize, &mut ())
    }

    /// Compute the rank of the matrix using gaussian elimination on a copy
    #[inline]
    pub fn rank(&self) -> usize {
        self.clone().gauss(false).len()
    }

    /// Compute the inverse of a square matrix.
    ///
    /// # Errors
    ///
    /// [`Gf2Error::NotSquare`] or [`Gf2Error::NotInvertible`].
    pub fn try_inverse(&self) -> Result<Self> {
        if self.rows() != self.cols() {
            return Err(Gf2Error::NotSquare {
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        let size = self.cols();
        let mut inv = BitMatrix::identity(size);
        let rank = self.clone().gauss_helper(0..size, true, &mut inv).len();

        if rank != size {
            return Err(Gf2Error::NotInvertible { rank, size });
        }
        Ok(inv)
    }

    /// Compute the inverse of an invertible matrix
    ///
    /// # Panics
    ///
    /// If the matrix is not square or not invertible; see [`BitMatrix::try_inverse`].
    pub fn inverse(&self) -> Self {
        match self.try_inverse() {
            Ok(inv) => inv,
            Err(e) => panic!("{}", e),
        }
    }
}

/// Options for one run of the elimination kernel.
///
/// ```
/// use gf2elim::{BitMatrix, Elimination};
///
/// let mut m = BitMatrix::identity(3);
/// let pivots = Elimination::new()
///     .columns([2, 0])
///     .diagonalize(true)
///     .run(&mut m)
///     .unwrap();
/// assert_eq!(pivots, vec![2, 0]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Elimination {
    columns: Option<Vec<usize>>,
    diagonalize: bool,
}

impl Elimination {
    /// Left-to-right column order, no diagonalization
    pub fn new() -> Self {
        Self::default()
    }

    /// Visit the given columns, in this order, instead of all columns left to right
    pub fn columns(mut self, columns: impl IntoIterator<Item = usize>) -> Self {
        self.columns = Some(columns.into_iter().collect());
        self
    }

    /// Also clear the pivot columns above each pivot
    pub fn diagonalize(mut self, diagonalize: bool) -> Self {
        self.diagonalize = diagonalize;
        self
    }

    /// Runs the elimination on `matrix` in place and returns the pivot columns.
    ///
    /// # Errors
    ///
    /// See [`BitMatrix::gauss_with_columns`].
    pub fn run(&self, matrix: &mut BitMatrix) -> Result<Vec<usize>> {
        gaussian_elimination(matrix, self.columns.as_deref(), self.diagonalize)
    }
}

/// Row-reduces `matrix` in place and returns its pivot columns in discovery order.
///
/// `columns` defaults to `0..matrix.cols()`. See [`BitMatrix::gauss_with_columns`].
///
/// # Errors
///
/// [`Gf2Error::ColumnOutOfRange`] if `columns` names a column the matrix doesn't have.
pub fn gaussian_elimination(
    matrix: &mut BitMatrix,
    columns: Option<&[usize]>,
    diagonalize: bool,
) -> Result<Vec<usize>> {
    match columns {
        Some(columns) => matrix.gauss_with_columns(columns, diagonalize),
        None => Ok(matrix.gauss(diagonalize)),
    }
}

/// The rank of `matrix` over GF(2). `matrix` itself is left alone.
pub fn rank(matrix: &BitMatrix) -> usize {
    matrix.rank()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::EntryPolicy;
    use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};

    fn mat(rows: &[&[u8]]) -> BitMatrix {
        BitMatrix::from_rows(rows, EntryPolicy::Strict).unwrap()
    }

    /// Pivot columns are unit vectors with their 1 in the pivot's row
    fn assert_reduced(m: &BitMatrix, pivots: &[usize]) {
        for (prow, &pcol) in pivots.iter().enumerate() {
            for i in 0..m.rows() {
                assert_eq!(m[(i, pcol)], i == prow, "entry ({i}, {pcol})\n{m}");
            }
        }
    }

    #[test]
    fn small_example() {
        let mut m = mat(&[&[1, 1, 0], &[0, 1, 1]]);
        let pivots = gaussian_elimination(&mut m, None, true).unwrap();
        assert_eq!(pivots, vec![0, 1]);
        assert_eq!(m.to_rows(), vec![vec![1, 0, 1], vec![0, 1, 1]]);
    }

    #[test]
    fn echelon_without_diagonalize() {
        let mut m = mat(&[&[0, 1, 1, 0], &[1, 1, 0, 1], &[1, 0, 1, 1]]);
        let pivots = m.gauss(false);
        assert_eq!(pivots, vec![0, 1]);
        assert_eq!(
            m.to_rows(),
            vec![vec![1, 1, 0, 1], vec![0, 1, 1, 0], vec![0, 0, 0, 0]]
        );
    }

    #[test]
    fn random_gauss() {
        let mut rng = SmallRng::seed_from_u64(1);
        for (rows, cols) in [(8, 20), (20, 8), (70, 130), (100, 100)] {
            let mut m = BitMatrix::random(&mut rng, rows, cols);
            let pivots = m.gauss(true);
            assert_reduced(&m, &pivots);
            for i in pivots.len()..m.rows() {
                assert_eq!(m.row_weight(i), 0, "row {i} should be zero");
            }
            assert!(pivots.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn custom_column_order() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut m = BitMatrix::random(&mut rng, 12, 40);
        let mut order: Vec<usize> = (0..40).collect();
        order.shuffle(&mut rng);

        let pivots = m.gauss_with_columns(&order, true).unwrap();
        assert_reduced(&m, &pivots);

        // pivots come out in visiting order
        let positions: Vec<usize> = pivots
            .iter()
            .map(|p| order.iter().position(|c| c == p).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn partial_and_repeated_columns() {
        let mut m = mat(&[&[1, 1, 0, 1], &[1, 0, 1, 1], &[0, 1, 1, 0]]);
        let pivots = m.gauss_with_columns(&[3, 3, 1], true).unwrap();
        assert_eq!(pivots, vec![3, 1]);
        assert_reduced(&m, &pivots);
        // column 0 was never visited but still took part in the row operations
        assert_eq!(
            m.to_rows(),
            vec![vec![1, 0, 1, 1], vec![0, 1, 1, 0], vec![0, 0, 0, 0]]
        );
    }

    #[test]
    fn stops_once_every_row_has_a_pivot() {
        let mut m = mat(&[&[1, 0, 1], &[0, 1, 1]]);
        let pivots = m.gauss_with_columns(&[0, 1, 2, 2], false).unwrap();
        assert_eq!(pivots, vec![0, 1]);
    }

    #[test]
    fn dependent_columns_give_fewer_pivots() {
        let mut m = mat(&[&[1, 1, 1], &[1, 1, 0], &[0, 0, 1]]);
        let pivots = m.gauss_with_columns(&[0, 1], false).unwrap();
        assert_eq!(pivots, vec![0]);
    }

    #[test]
    fn out_of_range_column_leaves_matrix_alone() {
        let mut m = mat(&[&[0, 1], &[1, 0]]);
        let before = m.clone();
        assert_eq!(
            m.gauss_with_columns(&[0, 2], true),
            Err(Gf2Error::ColumnOutOfRange { index: 2, cols: 2 })
        );
        assert_eq!(m, before);
    }

    #[test]
    fn empty_matrices() {
        let mut no_rows = BitMatrix::zeros(0, 5);
        assert!(no_rows.gauss_with_columns(&[4, 0], true).unwrap().is_empty());
        assert_eq!(rank(&no_rows), 0);

        let mut no_cols = BitMatrix::zeros(3, 0);
        assert!(no_cols.gauss(true).is_empty());
    }

    #[test]
    fn idempotent_on_reduced_matrix() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..20 {
            let mut m = BitMatrix::random(&mut rng, 15, 25);
            let mut order: Vec<usize> = (0..25).collect();
            order.shuffle(&mut rng);

            let pivots = m.gauss_with_columns(&order, true).unwrap();
            let reduced = m.clone();
            assert_eq!(m.gauss_with_columns(&order, true).unwrap(), pivots);
            assert_eq!(m, reduced);
        }
    }

    #[test]
    fn rank_matches_pivot_count() {
        let mut rng = SmallRng::seed_from_u64(4);
        for (rows, cols) in [(5, 5), (10, 3), (3, 10), (64, 64), (90, 65)] {
            let m = BitMatrix::random(&mut rng, rows, cols);
            let original = m.clone();
            let r = rank(&m);
            assert_eq!(m, original);
            assert_eq!(r, m.clone().gauss(false).len());
            assert!(r <= rows.min(cols));
        }
    }

    #[test]
    fn rank_of_known_matrices() {
        assert_eq!(rank(&mat(&[&[1, 1], &[1, 1]])), 1);
        assert_eq!(rank(&mat(&[&[1, 1, 0], &[0, 1, 1], &[1, 0, 1]])), 2);
        assert_eq!(rank(&BitMatrix::identity(70)), 70);

        let mut rng = SmallRng::seed_from_u64(7);
        for size in [1, 2, 30, 64, 65, 130] {
            assert_eq!(rank(&BitMatrix::random_invertible(&mut rng, size)), size);
        }

        // (rows x r) times (r x cols), both factors of rank r
        for (rows, r, cols) in [(20, 5, 30), (70, 40, 90), (10, 10, 10), (50, 1, 3)] {
            let left_cols: Vec<usize> = (0..r).collect();
            let a = BitMatrix::random_invertible(&mut rng, rows)
                .select_cols(&left_cols)
                .unwrap();
            let mut b = BitMatrix::random_invertible(&mut rng, cols);
            b.truncate_rows(r);
            assert_eq!(rank(&(&a * &b)), r);
        }
    }

    #[test]
    fn rank_ignores_row_and_column_order() {
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..20 {
            // low rank on purpose, so that the order matters for which pivots get picked
            let a = BitMatrix::random(&mut rng, 12, 4);
            let b = BitMatrix::random(&mut rng, 4, 30);
            let m = &a * &b;
            let r = m.rank();

            let mut row_order: Vec<usize> = (0..m.rows()).collect();
            row_order.shuffle(&mut rng);
            let rows_permuted =
                BitMatrix::build(m.rows(), m.cols(), |i, j| m[(row_order[i], j)]);
            assert_eq!(rows_permuted.rank(), r);

            let mut col_order: Vec<usize> = (0..m.cols()).collect();
            col_order.shuffle(&mut rng);
            let cols_permuted = m.select_cols(&col_order).unwrap();
            assert_eq!(cols_permuted.rank(), r);

            let pivots = m.clone().gauss_with_columns(&col_order, false).unwrap();
            assert_eq!(pivots.len(), r);
        }
    }

    #[test]
    fn builder_matches_free_function() {
        let mut rng = SmallRng::seed_from_u64(6);
        let m = BitMatrix::random(&mut rng, 10, 20);
        let order: Vec<usize> = (0..20).rev().collect();

        let mut a = m.clone();
        let mut b = m.clone();
        let pa = Elimination::new()
            .columns(order.iter().copied())
            .diagonalize(true)
            .run(&mut a)
            .unwrap();
        let pb = gaussian_elimination(&mut b, Some(&order), true).unwrap();
        assert_eq!((pa, a), (pb, b));
    }

    #[test]
    fn matrix_inv() {
        let mut rng = SmallRng::seed_from_u64(1);
        let sz = 100;
        let m = BitMatrix::random_invertible(&mut rng, sz);
        let n = m.inverse();
        let id = BitMatrix::identity(sz);

        assert_eq!(&m * &n, id);
        assert_eq!(&n * &m, id);
    }

    #[test]
    fn singular_and_non_square_inverse() {
        let m = mat(&[&[1, 1], &[1, 1]]);
        assert_eq!(
            m.try_inverse(),
            Err(Gf2Error::NotInvertible { rank: 1, size: 2 })
        );
        assert_eq!(
            BitMatrix::zeros(2, 3).try_inverse(),
            Err(Gf2Error::NotSquare { rows: 2, cols: 3 })
        );
    }
}
