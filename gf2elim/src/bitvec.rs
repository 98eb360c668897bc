use ref_cast::RefCast;
use std::fmt;
use std::ops::{BitXorAssign, Deref, DerefMut, Index, IndexMut, Range};

/// A block of bits. This is an alias for [`u64`]
pub type BitBlock = u64;

/// Number of bits in a [`BitBlock`]
pub const BLOCKSIZE: usize = BitBlock::BITS as usize;

/// The most significant bit of a block, which holds the lowest bit index
pub const MSB_ON: BitBlock = 1 << (BLOCKSIZE - 1);

/// Returns the minimum number of [`BitBlock`]s needed to hold `bits` bits
#[inline]
pub fn min_blocks(bits: usize) -> usize {
    bits.div_ceil(BLOCKSIZE)
}

/// An owned, growable run of bits packed into [`BitBlock`]s.
///
/// Bit `i` lives in block `i / BLOCKSIZE`, counting from the most significant bit of that
/// block, so the natural left-to-right reading of a row matches the order of its bits in memory.
/// Most of the interesting methods come from [`BitRange`], which `BitVec` dereferences to.
///
/// ```
/// use gf2elim::bitvec::*;
///
/// let mut bv = BitVec::zeros(2);
/// bv.set_bit(70, true);
/// assert!(bv.bit(70));
/// assert_eq!(bv.count_ones(), 1);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct BitVec(Vec<BitBlock>);

/// A borrowed run of bits, i.e. a slice of [`BitBlock`]s.
///
/// Row operations of [`BitMatrix`](crate::BitMatrix) work on `BitRange`s carved out of the
/// matrix storage, indexed by block rather than by bit.
#[derive(RefCast, PartialEq, Eq, Hash, Debug)]
#[repr(transparent)]
pub struct BitRange([BitBlock]);

/// Iterator over the bits of a [`BitRange`], most significant bit of the first block first
pub struct Bits<'a> {
    blocks: std::slice::Iter<'a, BitBlock>,
    current: BitBlock,
    remaining: usize,
}

impl Iterator for Bits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.remaining == 0 {
            self.current = *self.blocks.next()?;
            self.remaining = BLOCKSIZE;
        }
        let bit = self.current & MSB_ON != 0;
        self.current <<= 1;
        self.remaining -= 1;
        Some(bit)
    }
}

impl BitRange {
    /// Copies the range into a new [`BitVec`]
    #[inline]
    pub fn to_vec(&self) -> BitVec {
        BitVec(self.0.to_vec())
    }

    /// Number of blocks in the range
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of bits the range can hold, i.e. `len() * BLOCKSIZE`
    #[inline]
    pub fn num_bits(&self) -> usize {
        self.0.len() * BLOCKSIZE
    }

    #[inline]
    pub fn blocks(&self) -> &[BitBlock] {
        &self.0
    }

    /// Iterates over every bit in the range, padding included
    #[inline]
    pub fn iter(&self) -> Bits<'_> {
        Bits {
            blocks: self.0.iter(),
            current: 0,
            remaining: 0,
        }
    }

    /// Returns the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.num_bits()`.
    #[inline]
    pub fn bit(&self, index: usize) -> bool {
        self.0[index / BLOCKSIZE] & (MSB_ON >> (index % BLOCKSIZE)) != 0
    }

    /// Sets the bit at `index` to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.num_bits()`.
    #[inline]
    pub fn set_bit(&mut self, index: usize, value: bool) {
        let mask = MSB_ON >> (index % BLOCKSIZE);
        let block = &mut self.0[index / BLOCKSIZE];
        if value {
            *block |= mask;
        } else {
            *block &= !mask;
        }
    }

    #[inline]
    pub fn count_ones(&self) -> u32 {
        self.0.iter().map(|b| b.count_ones()).sum()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Dot product over GF(2): the parity of the number of positions where both ranges are 1
    #[inline]
    pub fn dot(&self, rhs: &BitRange) -> bool {
        let ones: u32 = self
            .0
            .iter()
            .zip(rhs.0.iter())
            .map(|(a, b)| (a & b).count_ones())
            .sum();
        ones & 1 == 1
    }

    /// XORs the `len` blocks starting at `source` into the `len` blocks starting at `target`.
    ///
    /// The two block ranges must not overlap.
    #[inline]
    pub fn xor_range(&mut self, source: usize, target: usize, len: usize) {
        debug_assert!(source + len <= target || target + len <= source);
        for i in 0..len {
            self.0[target + i] ^= self.0[source + i];
        }
    }

    /// Swaps the `len` blocks starting at `source` with the `len` blocks starting at `target`
    #[inline]
    pub fn swap_range(&mut self, source: usize, target: usize, len: usize) {
        if source == target {
            return;
        }
        let (lo, hi) = (source.min(target), source.max(target));
        debug_assert!(lo + len <= hi);
        let (head, tail) = self.0.split_at_mut(hi);
        head[lo..lo + len].swap_with_slice(&mut tail[..len]);
    }
}

impl Index<Range<usize>> for BitRange {
    type Output = BitRange;

    #[inline]
    fn index(&self, index: Range<usize>) -> &BitRange {
        BitRange::ref_cast(&self.0[index])
    }
}

impl IndexMut<Range<usize>> for BitRange {
    #[inline]
    fn index_mut(&mut self, index: Range<usize>) -> &mut BitRange {
        BitRange::ref_cast_mut(&mut self.0[index])
    }
}

impl Index<usize> for BitRange {
    type Output = BitBlock;

    #[inline]
    fn index(&self, index: usize) -> &BitBlock {
        &self.0[index]
    }
}

impl IndexMut<usize> for BitRange {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut BitBlock {
        &mut self.0[index]
    }
}

impl BitXorAssign<&BitRange> for BitRange {
    #[inline]
    fn bitxor_assign(&mut self, rhs: &BitRange) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a ^= b;
        }
    }
}

impl BitVec {
    #[inline]
    pub fn zeros(num_blocks: usize) -> Self {
        BitVec(vec![0; num_blocks])
    }

    /// Keeps the first `num_blocks` blocks and drops the rest
    #[inline]
    pub fn truncate(&mut self, num_blocks: usize) {
        self.0.truncate(num_blocks);
    }
}

impl Deref for BitVec {
    type Target = BitRange;

    #[inline]
    fn deref(&self) -> &BitRange {
        BitRange::ref_cast(&self.0)
    }
}

impl DerefMut for BitVec {
    #[inline]
    fn deref_mut(&mut self) -> &mut BitRange {
        BitRange::ref_cast_mut(&mut self.0)
    }
}

impl From<Vec<BitBlock>> for BitVec {
    fn from(blocks: Vec<BitBlock>) -> Self {
        BitVec(blocks)
    }
}

impl From<BitVec> for Vec<BitBlock> {
    fn from(bits: BitVec) -> Self {
        bits.0
    }
}

impl FromIterator<BitBlock> for BitVec {
    fn from_iter<T: IntoIterator<Item = BitBlock>>(iter: T) -> Self {
        BitVec(iter.into_iter().collect())
    }
}

/// Packs bits MSB-first, zero-padding the final block
impl FromIterator<bool> for BitVec {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        let mut blocks = Vec::new();
        let mut block: BitBlock = 0;
        let mut filled = 0;
        for bit in iter {
            if bit {
                block |= MSB_ON >> filled;
            }
            filled += 1;
            if filled == BLOCKSIZE {
                blocks.push(block);
                block = 0;
                filled = 0;
            }
        }
        if filled != 0 {
            blocks.push(block);
        }
        BitVec(blocks)
    }
}

impl From<&[bool]> for BitVec {
    fn from(bits: &[bool]) -> Self {
        bits.iter().copied().collect()
    }
}

impl fmt::Display for BitVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in &self.0 {
            write!(f, "{:064b}", block)?;
        }
        Ok(())
    }
}
