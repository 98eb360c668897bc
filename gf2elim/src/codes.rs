//! Binary linear codes described by a generator and a parity-check matrix.
//!
//! This is the main consumer of the elimination kernel: a generator matrix is brought into
//! systematic form to find the code's dimension and information set, and its orthogonal
//! complement is the parity-check matrix.

use crate::bitvec::min_blocks;
use crate::error::{Gf2Error, Result};
use crate::{BitMatrix, BitVec};
use tracing::{debug, warn};

/// An `[n, k]` binary linear code.
///
/// The generator is kept in reduced form: its `k` rows are independent, and the columns listed
/// in [`information_set`](Self::information_set) form an identity block, so those positions of
/// a codeword repeat the message bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryLinearCode {
    generator: BitMatrix,
    parity_check: BitMatrix,
    information_set: Vec<usize>,
    known_distance: Option<usize>,
}

impl BinaryLinearCode {
    /// The code spanned by the rows of `generator`. Dependent rows are allowed and dropped.
    pub fn from_generator(generator: &BitMatrix) -> Self {
        let mut reduced = generator.clone();
        let information_set = reduced.gauss(true);
        if information_set.len() < generator.rows() {
            warn!(
                rows = generator.rows(),
                rank = information_set.len(),
                "generator rows are linearly dependent, keeping an independent subset"
            );
        }
        reduced.truncate_rows(information_set.len());
        let parity_check = reduced.complement_of_reduced(&information_set);

        debug!(
            n = reduced.cols(),
            k = information_set.len(),
            "built linear code"
        );
        BinaryLinearCode {
            generator: reduced,
            parity_check,
            information_set,
            known_distance: None,
        }
    }

    /// The code whose codewords have zero syndrome under `parity_check`
    pub fn from_parity_check(parity_check: &BitMatrix) -> Self {
        let mut reduced = parity_check.clone();
        let pivots = reduced.gauss(true);
        Self::from_generator(&reduced.complement_of_reduced(&pivots))
    }

    /// The dual code, generated by this code's parity-check matrix
    pub fn dual(&self) -> Self {
        Self::from_generator(&self.parity_check)
    }

    /// Codeword length
    #[inline]
    pub fn n(&self) -> usize {
        self.generator.cols()
    }

    /// Dimension of the code
    #[inline]
    pub fn k(&self) -> usize {
        self.generator.rows()
    }

    #[inline]
    pub fn generator(&self) -> &BitMatrix {
        &self.generator
    }

    #[inline]
    pub fn parity_check(&self) -> &BitMatrix {
        &self.parity_check
    }

    /// Codeword positions that carry the message bits unchanged
    #[inline]
    pub fn information_set(&self) -> &[usize] {
        &self.information_set
    }

    /// Is the generator of the form `[I | P]`
    pub fn is_standard(&self) -> bool {
        self.information_set.iter().copied().eq(0..self.k())
    }

    /// The rate `k/n` at which information is transferred, or 0 for a code of length 0
    pub fn rate(&self) -> f64 {
        if self.n() == 0 {
            return 0.0;
        }
        self.k() as f64 / self.n() as f64
    }

    /// The minimum Hamming weight of a nonzero codeword, or 0 for the zero code.
    ///
    /// Unless the code comes from a family with known distance, this walks all `2^k` codewords
    /// in Gray-code order, so it is only practical for small `k`.
    ///
    /// # Panics
    ///
    /// If `k` is too large to count the codewords in a `usize`.
    pub fn minimum_distance(&self) -> usize {
        if let Some(d) = self.known_distance {
            return d;
        }
        let k = self.k();
        assert!(k < usize::BITS as usize, "too many codewords to enumerate");

        let mut word = BitVec::zeros(min_blocks(self.n()));
        let mut best = None;
        for i in 1usize..(1 << k) {
            *word ^= self.generator.row(i.trailing_zeros() as usize);
            let weight = word.count_ones() as usize;
            best = Some(best.map_or(weight, |b: usize| b.min(weight)));
        }
        best.unwrap_or(0)
    }

    /// the standard `[n,k,d]_q` notation
    pub fn n_k_d_q(&self) -> [usize; 4] {
        [self.n(), self.k(), self.minimum_distance(), 2]
    }

    /// Each row of `messages` is a message of `k` bits; the result holds the matching
    /// codewords, one per row.
    ///
    /// # Errors
    ///
    /// If `messages` does not have `k` columns.
    pub fn encode(&self, messages: &BitMatrix) -> Result<BitMatrix> {
        messages.try_mul(&self.generator)
    }

    /// Each row of `words` is a received word of `n` bits; the result holds the `n - k` bit
    /// syndrome of each word, one per row.
    ///
    /// # Errors
    ///
    /// If `words` does not have `n` columns.
    pub fn syndrome(&self, words: &BitMatrix) -> Result<BitMatrix> {
        if words.cols() != self.n() {
            return Err(Gf2Error::DimensionMismatch {
                op: "take the syndrome of",
                lhs_rows: words.rows(),
                lhs_cols: words.cols(),
                rhs_rows: self.parity_check.rows(),
                rhs_cols: self.parity_check.cols(),
            });
        }
        words.try_mul(&self.parity_check.transposed())
    }

    /// Whether every row of `words` is a codeword.
    ///
    /// # Errors
    ///
    /// If `words` does not have `n` columns.
    pub fn contains_all(&self, words: &BitMatrix) -> Result<bool> {
        Ok(self.syndrome(words)?.is_zero())
    }

    /// The Hadamard code of dimension `k`, whose codewords list the values of every linear form
    /// on GF(2)^k.
    ///
    /// Column `j` of the generator is the binary expansion of `j`, most significant bit in row
    /// 0, giving a `[2^k, k, 2^(k-1)]` code. The augmented variant keeps only the columns with
    /// the top bit set, giving a `[2^(k-1), k, 2^(k-2)]` code.
    ///
    /// # Panics
    ///
    /// If `augmented` is set and `k < 2`, or if the length `2^k` doesn't fit in a `usize`.
    pub fn hadamard(k: usize, augmented: bool) -> Self {
        assert!(!augmented || k >= 2, "augmented Hadamard codes need k >= 2");
        assert!(
            k < usize::BITS as usize,
            "Hadamard code of dimension {k} is too long"
        );
        let full_length = 1usize << k;
        let first = if augmented { full_length >> 1 } else { 0 };
        let n = full_length - first;
        let generator = BitMatrix::build(k, n, |i, j| ((first + j) >> (k - 1 - i)) & 1 == 1);

        let mut code = Self::from_generator(&generator);
        code.known_distance = Some(n >> 1);
        code
    }
}
