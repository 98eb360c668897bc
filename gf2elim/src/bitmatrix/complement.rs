use super::BitMatrix;
use crate::error::Result;
use tracing::debug;

impl BitMatrix {
    /// Returns a basis of the vectors orthogonal to every row of `self`, one per row.
    ///
    /// The result is `(n - rank) x n`, where `n = self.cols()`, and its rows are independent.
    /// Over GF(2) a vector can be orthogonal to itself, so the two row spaces may overlap and
    /// need not span GF(2)^n together: the complement of `[[1, 1]]` is `[[1, 1]]` again.
    /// `columns` sets the column order used to reduce a copy of `self` (see
    /// [`BitMatrix::gauss_with_columns`]), and so decides which columns of the result form the
    /// identity block. If `columns` leaves out
    /// columns that are needed to reach the full rank, the result is only orthogonal to the
    /// part of the row space those columns pick up.
    ///
    /// # Errors
    ///
    /// [`Gf2Error::ColumnOutOfRange`](crate::Gf2Error::ColumnOutOfRange) if `columns` names a
    /// column `self` doesn't have.
    ///
    /// ```
    /// use gf2elim::{BitMatrix, EntryPolicy};
    ///
    /// let m = BitMatrix::from_rows(&[[1u8, 1, 0], [0, 1, 1]], EntryPolicy::Strict).unwrap();
    /// let dual = m.orthogonal_complement(None).unwrap();
    /// assert_eq!(dual.to_rows(), vec![vec![1, 1, 1]]);
    /// ```
    pub fn orthogonal_complement(&self, columns: Option<&[usize]>) -> Result<BitMatrix> {
        let mut reduced = self.clone();
        let pivots = match columns {
            Some(columns) => reduced.gauss_with_columns(columns, true)?,
            None => reduced.gauss(true),
        };
        Ok(reduced.complement_of_reduced(&pivots))
    }

    /// Complement of a matrix already in diagonalized form with the given pivot columns.
    ///
    /// If the pivots are moved to the front the matrix reads `[I | P]`, and the complement is
    /// `[P^T | I]` moved back into the original column positions.
    pub(crate) fn complement_of_reduced(&self, pivots: &[usize]) -> BitMatrix {
        let n = self.cols();
        let mut is_pivot = vec![false; n];
        for &c in pivots {
            is_pivot[c] = true;
        }
        let free_cols: Vec<usize> = (0..n).filter(|&c| !is_pivot[c]).collect();

        // row i is free column free_cols[i] read down the pivot rows
        let coefficients = BitMatrix::build(free_cols.len(), pivots.len(), |i, prow| {
            self.bit(prow, free_cols[i])
        });

        let mut complement = BitMatrix::zeros(free_cols.len(), n);
        for (prow, &pcol) in pivots.iter().enumerate() {
            for i in 0..free_cols.len() {
                if coefficients.bit(i, prow) {
                    complement.set_bit(i, pcol, true);
                }
            }
        }
        for (i, &c) in free_cols.iter().enumerate() {
            complement.set_bit(i, c, true);
        }

        debug!(
            cols = n,
            rank = pivots.len(),
            complement_rows = complement.rows(),
            "built orthogonal complement"
        );
        complement
    }
}

/// Basis of the orthogonal complement of the row space of `matrix`.
///
/// `matrix` is not modified; the elimination runs on a copy. See
/// [`BitMatrix::orthogonal_complement`].
///
/// # Errors
///
/// [`Gf2Error::ColumnOutOfRange`](crate::Gf2Error::ColumnOutOfRange) if `columns` names a
/// column `matrix` doesn't have.
pub fn orthogonal_complement(matrix: &BitMatrix, columns: Option<&[usize]>) -> Result<BitMatrix> {
    matrix.orthogonal_complement(columns)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{EntryPolicy, Gf2Error};
    use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};

    fn mat(rows: &[&[u8]]) -> BitMatrix {
        BitMatrix::from_rows(rows, EntryPolicy::Strict).unwrap()
    }

    fn check_complement(m: &BitMatrix, c: &BitMatrix) {
        let n = m.cols();
        let r = m.rank();
        assert_eq!((c.rows(), c.cols()), (n - r, n));
        assert!(m.is_orthogonal_to(c), "{m}\nnot orthogonal to\n{c}");
        assert_eq!(c.rank(), n - r);
    }

    fn free_cols(pivots: &[usize], cols: usize) -> Vec<usize> {
        (0..cols).filter(|c| !pivots.contains(c)).collect()
    }

    #[test]
    fn small_example() {
        let m = mat(&[&[1, 1, 0], &[0, 1, 1]]);
        let c = orthogonal_complement(&m, None).unwrap();
        assert_eq!(c.to_rows(), vec![vec![1, 1, 1]]);
        assert!(!c.row(0).dot(m.row(0)));
        assert!(!c.row(0).dot(m.row(1)));
        // the input is untouched
        assert_eq!(m.to_rows(), vec![vec![1, 1, 0], vec![0, 1, 1]]);
    }

    #[test]
    fn self_orthogonal_row() {
        let m = mat(&[&[1, 1]]);
        let c = m.orthogonal_complement(None).unwrap();
        assert_eq!(c.to_rows(), vec![vec![1, 1]]);
        check_complement(&m, &c);
        // the row space meets its complement, so the two don't span GF(2)^2
        assert_eq!(m.vstack(&c).unwrap().rank(), 1);
    }

    #[test]
    fn systematic_layout() {
        // [I | P] gives [P^T | I]
        let m = mat(&[&[1, 0, 1, 1, 0], &[0, 1, 0, 1, 1]]);
        let c = m.orthogonal_complement(None).unwrap();
        assert_eq!(
            c.to_rows(),
            vec![vec![1, 0, 1, 0, 0], vec![1, 1, 0, 1, 0], vec![0, 1, 0, 0, 1]]
        );
    }

    #[test]
    fn custom_order_moves_identity_block() {
        let m = mat(&[&[1, 0, 1, 1, 0], &[0, 1, 0, 1, 1]]);
        let c = m.orthogonal_complement(Some(&[4, 3, 2, 1, 0])).unwrap();
        check_complement(&m, &c);
        // pivots are 4 and 3, so columns 0..3 carry the identity
        let free_part = c.select_cols(&[0, 1, 2]).unwrap();
        assert_eq!(free_part, BitMatrix::identity(3));
    }

    #[test]
    fn zero_matrix() {
        let m = BitMatrix::zeros(4, 6);
        assert_eq!(m.rank(), 0);
        assert_eq!(m.orthogonal_complement(None).unwrap(), BitMatrix::identity(6));

        let no_rows = BitMatrix::zeros(0, 3);
        assert_eq!(
            no_rows.orthogonal_complement(None).unwrap(),
            BitMatrix::identity(3)
        );
    }

    #[test]
    fn full_rank_square() {
        let mut rng = SmallRng::seed_from_u64(1);
        let m = BitMatrix::random_invertible(&mut rng, 20);
        let c = m.orthogonal_complement(None).unwrap();
        assert_eq!((c.rows(), c.cols()), (0, 20));
    }

    #[test]
    fn bad_column_order() {
        let m = BitMatrix::identity(2);
        assert_eq!(
            m.orthogonal_complement(Some(&[0, 5])),
            Err(Gf2Error::ColumnOutOfRange { index: 5, cols: 2 })
        );
    }

    #[test]
    fn random_complements() {
        let mut rng = SmallRng::seed_from_u64(2);
        for (rows, cols) in [(3, 10), (10, 3), (20, 70), (40, 130), (70, 64)] {
            let m = BitMatrix::random(&mut rng, rows, cols);
            let c = m.orthogonal_complement(None).unwrap();
            check_complement(&m, &c);
            let pivots = m.clone().gauss(true);
            assert_eq!(
                c.select_cols(&free_cols(&pivots, cols)).unwrap(),
                BitMatrix::identity(c.rows())
            );

            let mut order: Vec<usize> = (0..cols).collect();
            order.shuffle(&mut rng);
            let c = m.orthogonal_complement(Some(&order)).unwrap();
            check_complement(&m, &c);
            let pivots = m.clone().gauss_with_columns(&order, true).unwrap();
            assert_eq!(
                c.select_cols(&free_cols(&pivots, cols)).unwrap(),
                BitMatrix::identity(c.rows())
            );
        }
    }

    #[test]
    fn rank_deficient_complements() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..10 {
            let a = BitMatrix::random(&mut rng, 15, 5);
            let b = BitMatrix::random(&mut rng, 5, 40);
            let m = &a * &b;
            check_complement(&m, &m.orthogonal_complement(None).unwrap());
        }
    }

    #[test]
    fn complement_of_complement_spans_original() {
        let mut rng = SmallRng::seed_from_u64(4);
        let m = BitMatrix::random(&mut rng, 8, 20);
        let cc = m
            .orthogonal_complement(None)
            .unwrap()
            .orthogonal_complement(None)
            .unwrap();
        let r = m.rank();
        assert_eq!(cc.rank(), r);
        assert_eq!(m.vstack(&cc).unwrap().rank(), r);
    }
}
