pub mod complement;
pub mod elimination;

use crate::bitvec::*;
use crate::error::{Gf2Error, Result};
use rand::Rng;
use std::{
    fmt,
    ops::{Index, Mul},
};

/// A dense matrix over GF(2), stored row-major with each row packed into [`BitBlock`]s.
///
/// Every row occupies `col_blocks` consecutive blocks of `data`. When `cols` is not a multiple
/// of [`BLOCKSIZE`] the trailing bits of each row are padding and are kept at 0, which lets row
/// operations work on whole blocks and lets equality compare blocks directly.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitMatrix {
    /// the number of logical rows in the matrix
    rows: usize,

    /// the number of logical columns in the matrix
    cols: usize,

    /// the number of [`BitBlock`]s used to store each row
    col_blocks: usize,

    /// the matrix data, `rows * col_blocks` blocks in row-major order
    data: BitVec,
}

/// How integer entries are turned into bits when building a [`BitMatrix`] from nested rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EntryPolicy {
    /// Only 0 and 1 are accepted; anything else is a [`Gf2Error::NonBinaryEntry`]
    #[default]
    Strict,

    /// Only the least significant bit of each entry is kept, so `2` reads as 0 and `-1` as 1
    LowBit,
}

impl EntryPolicy {
    fn to_bit(self, value: i128, row: usize, col: usize) -> Result<bool> {
        match (self, value) {
            (_, 0) => Ok(false),
            (_, 1) => Ok(true),
            (EntryPolicy::LowBit, v) => Ok(v & 1 == 1),
            (EntryPolicy::Strict, value) => Err(Gf2Error::NonBinaryEntry { row, col, value }),
        }
    }
}

/// Row operations that the elimination kernel can mirror onto another object.
///
/// The elimination kernel calls these on its proxy every time it swaps or adds rows of
/// the matrix being reduced, so e.g. an identity matrix passed as proxy accumulates the inverse.
pub trait RowOps {
    /// Adds (XORs) row `from` into row `to`
    fn add_row(&mut self, from: usize, to: usize);
    fn swap_rows(&mut self, from: usize, to: usize);
}

impl BitMatrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        let col_blocks = min_blocks(cols);
        BitMatrix {
            rows,
            cols,
            col_blocks,
            data: BitVec::zeros(rows * col_blocks),
        }
    }

    pub fn identity(size: usize) -> Self {
        let mut m = BitMatrix::zeros(size, size);
        for i in 0..size {
            m.set_bit(i, i, true);
        }
        m
    }

    /// Builds a matrix by evaluating `f(i, j)` for every entry
    pub fn build(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut m = BitMatrix::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                if f(i, j) {
                    m.set_bit(i, j, true);
                }
            }
        }
        m
    }

    /// Builds a matrix from nested integer rows, converting entries according to `policy`.
    ///
    /// The number of columns is taken from the first row, so an empty slice gives a `0 x 0`
    /// matrix. Use [`BitMatrix::zeros`] for a matrix with no rows but some columns.
    ///
    /// # Errors
    ///
    /// [`Gf2Error::RaggedRow`] if the rows differ in length, and [`Gf2Error::NonBinaryEntry`]
    /// under [`EntryPolicy::Strict`] if an entry is neither 0 nor 1.
    ///
    /// ```
    /// use gf2elim::{BitMatrix, EntryPolicy};
    ///
    /// let m = BitMatrix::from_rows(&[[1u8, 1, 0], [0, 1, 1]], EntryPolicy::Strict).unwrap();
    /// assert_eq!((m.rows(), m.cols()), (2, 3));
    /// assert!(BitMatrix::from_rows(&[[1u8, 2]], EntryPolicy::Strict).is_err());
    /// ```
    pub fn from_rows<R, T>(rows: &[R], policy: EntryPolicy) -> Result<Self>
    where
        R: AsRef<[T]>,
        T: Copy + Into<i128>,
    {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut m = BitMatrix::zeros(rows.len(), cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Gf2Error::RaggedRow {
                    row: i,
                    len: row.len(),
                    expected: cols,
                });
            }
            for (j, &value) in row.iter().enumerate() {
                if policy.to_bit(value.into(), i, j)? {
                    m.set_bit(i, j, true);
                }
            }
        }
        Ok(m)
    }

    /// Builds a matrix from nested `bool` rows.
    ///
    /// # Errors
    ///
    /// [`Gf2Error::RaggedRow`] if the rows differ in length.
    pub fn from_bool_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut m = BitMatrix::zeros(rows.len(), cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Gf2Error::RaggedRow {
                    row: i,
                    len: row.len(),
                    expected: cols,
                });
            }
            let packed: BitVec = row.iter().copied().collect();
            *m.row_mut(i) ^= &*packed;
        }
        Ok(m)
    }

    /// Copies the matrix out as nested rows of 0s and 1s
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows)
            .map(|i| self.row(i).iter().take(self.cols).map(u8::from).collect())
            .collect()
    }

    #[inline]
    pub fn random(rng: &mut impl Rng, rows: usize, cols: usize) -> Self {
        let col_blocks = min_blocks(cols);
        let tail_mask = match cols % BLOCKSIZE {
            0 => BitBlock::MAX,
            used => !(BitBlock::MAX >> used),
        };
        let data = (0..rows * col_blocks)
            .map(|i| {
                let block = rng.random::<BitBlock>();
                if i % col_blocks == col_blocks - 1 {
                    block & tail_mask
                } else {
                    block
                }
            })
            .collect();
        BitMatrix {
            rows,
            cols,
            col_blocks,
            data,
        }
    }

    /// A random invertible matrix, made by scrambling the identity with random row additions
    pub fn random_invertible(rng: &mut impl Rng, size: usize) -> Self {
        let mut m = BitMatrix::identity(size);
        if size < 2 {
            return m;
        }

        for _ in 0..4 * size * size {
            let r1 = rng.random_range(0..size);
            let mut r2 = rng.random_range(0..size - 1);
            if r2 >= r1 {
                r2 += 1;
            }
            m.add_row(r1, r2);
        }

        m
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn bit(&self, i: usize, j: usize) -> bool {
        debug_assert!(i < self.rows && j < self.cols, "({i}, {j}) out of bounds");
        self.data.bit(self.col_blocks * BLOCKSIZE * i + j)
    }

    #[inline]
    pub fn set_bit(&mut self, i: usize, j: usize, b: bool) {
        debug_assert!(i < self.rows && j < self.cols, "({i}, {j}) out of bounds");
        self.data.set_bit(self.col_blocks * BLOCKSIZE * i + j, b);
    }

    /// The blocks of row `row`, padding included
    #[inline]
    pub fn row(&self, row: usize) -> &BitRange {
        &self.data[row * self.col_blocks..(row + 1) * self.col_blocks]
    }

    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut BitRange {
        &mut self.data[row * self.col_blocks..(row + 1) * self.col_blocks]
    }

    /// Number of 1s in row `row`
    #[inline]
    pub fn row_weight(&self, row: usize) -> usize {
        self.row(row).count_ones() as usize
    }

    pub fn is_zero(&self) -> bool {
        self.data.is_zero()
    }

    /// Drops every row from index `rows` on. Does nothing if the matrix is already shorter.
    pub fn truncate_rows(&mut self, rows: usize) {
        if rows < self.rows {
            self.rows = rows;
            self.data.truncate(rows * self.col_blocks);
        }
    }

    /// Returns a transposed copy of the matrix
    pub fn transposed(&self) -> Self {
        let mut t = BitMatrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for (j, b) in self.row(i).iter().take(self.cols).enumerate() {
                if b {
                    t.set_bit(j, i, true);
                }
            }
        }
        t
    }

    /// Returns the matrix made of the given columns, in the given order.
    ///
    /// # Errors
    ///
    /// [`Gf2Error::ColumnOutOfRange`] if any index is `>= self.cols()`.
    pub fn select_cols(&self, cols: &[usize]) -> Result<Self> {
        self.check_columns(cols)?;
        Ok(BitMatrix::build(self.rows, cols.len(), |i, j| {
            self.bit(i, cols[j])
        }))
    }

    /// Stacks `other` below `self`.
    ///
    /// # Errors
    ///
    /// [`Gf2Error::DimensionMismatch`] if the column counts differ.
    pub fn vstack(&self, other: &BitMatrix) -> Result<Self> {
        if self.cols != other.cols {
            return Err(self.mismatch("vstack", other));
        }
        let data = self
            .data
            .blocks()
            .iter()
            .chain(other.data.blocks())
            .copied()
            .collect();
        Ok(BitMatrix {
            rows: self.rows + other.rows,
            cols: self.cols,
            col_blocks: self.col_blocks,
            data,
        })
    }

    /// Places `other` to the right of `self`.
    ///
    /// # Errors
    ///
    /// [`Gf2Error::DimensionMismatch`] if the row counts differ.
    pub fn hstack(&self, other: &BitMatrix) -> Result<Self> {
        if self.rows != other.rows {
            return Err(self.mismatch("hstack", other));
        }
        Ok(BitMatrix::build(self.rows, self.cols + other.cols, |i, j| {
            if j < self.cols {
                self.bit(i, j)
            } else {
                other.bit(i, j - self.cols)
            }
        }))
    }

    /// Matrix product over GF(2).
    ///
    /// # Errors
    ///
    /// [`Gf2Error::DimensionMismatch`] unless `self.cols() == rhs.rows()`.
    pub fn try_mul(&self, rhs: &BitMatrix) -> Result<Self> {
        if self.cols != rhs.rows {
            return Err(self.mismatch("multiply", rhs));
        }
        let mut res = BitMatrix::zeros(self.rows, rhs.cols);
        for i in 0..self.rows {
            let row = res.row_mut(i);
            for (j, b) in self.row(i).iter().take(self.cols).enumerate() {
                if b {
                    *row ^= rhs.row(j);
                }
            }
        }
        Ok(res)
    }

    /// Whether every row of `self` has zero dot product with every row of `other`.
    ///
    /// Matrices with different column counts live in different spaces and are never orthogonal.
    pub fn is_orthogonal_to(&self, other: &BitMatrix) -> bool {
        self.cols == other.cols
            && (0..self.rows).all(|i| (0..other.rows).all(|j| !self.row(i).dot(other.row(j))))
    }

    fn mismatch(&self, op: &'static str, other: &BitMatrix) -> Gf2Error {
        Gf2Error::DimensionMismatch {
            op,
            lhs_rows: self.rows,
            lhs_cols: self.cols,
            rhs_rows: other.rows,
            rhs_cols: other.cols,
        }
    }

    /// Checks that every index in `columns` names a column of this matrix
    pub(crate) fn check_columns(&self, columns: &[usize]) -> Result<()> {
        match columns.iter().find(|&&c| c >= self.cols) {
            Some(&index) => Err(Gf2Error::ColumnOutOfRange {
                index,
                cols: self.cols,
            }),
            None => Ok(()),
        }
    }
}

impl RowOps for () {
    #[inline]
    fn add_row(&mut self, _: usize, _: usize) {}

    #[inline]
    fn swap_rows(&mut self, _: usize, _: usize) {}
}

impl RowOps for BitMatrix {
    #[inline]
    fn add_row(&mut self, from: usize, to: usize) {
        self.data.xor_range(
            from * self.col_blocks,
            to * self.col_blocks,
            self.col_blocks,
        );
    }

    #[inline]
    fn swap_rows(&mut self, from: usize, to: usize) {
        self.data.swap_range(
            from * self.col_blocks,
            to * self.col_blocks,
            self.col_blocks,
        );
    }
}

impl Index<(usize, usize)> for BitMatrix {
    type Output = bool;

    #[inline]
    fn index(&self, index: (usize, usize)) -> &bool {
        if self.bit(index.0, index.1) {
            &true
        } else {
            &false
        }
    }
}

impl fmt::Display for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            write!(f, "[")?;
            for (j, b) in self.row(i).iter().take(self.cols).enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", u8::from(b))?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

impl Mul for &BitMatrix {
    type Output = BitMatrix;

    /// # Panics
    ///
    /// Panics if the dimensions don't line up; see [`BitMatrix::try_mul`].
    fn mul(self, rhs: Self) -> BitMatrix {
        match self.try_mul(rhs) {
            Ok(res) => res,
            Err(e) => panic!("{}", e),
        }
    }
}
