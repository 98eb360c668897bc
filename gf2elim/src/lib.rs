//! `gf2elim` is a Rust library for row reduction over the 2-element finite field, written for
//! the matrix work that comes up around error-correcting codes. It provides:
//! - Gaussian elimination in place, visiting columns in an order chosen by the caller and
//!   optionally diagonalizing the pivot columns
//! - rank over GF(2)
//! - orthogonal complements (dual bases) of a row space, built from the systematic form
//! - binary linear codes derived from a generator or parity-check matrix
//!
//! The main data structures are:
//! - [`BitVec`]/[`BitRange`]: bits stored in 64-bit blocks, with the block-level XOR and swap
//!   operations that row reduction is made of
//! - [`BitMatrix`]: a dense row-major matrix of bits built on `BitVec`
//!
//! ```
//! use gf2elim::{gaussian_elimination, orthogonal_complement, rank, BitMatrix, EntryPolicy};
//!
//! let m = BitMatrix::from_rows(&[[1u8, 1, 0], [0, 1, 1]], EntryPolicy::Strict).unwrap();
//! assert_eq!(rank(&m), 2);
//!
//! let mut reduced = m.clone();
//! let pivots = gaussian_elimination(&mut reduced, None, true).unwrap();
//! assert_eq!(pivots, vec![0, 1]);
//! assert_eq!(reduced.to_rows(), vec![vec![1, 0, 1], vec![0, 1, 1]]);
//!
//! let dual = orthogonal_complement(&m, None).unwrap();
//! assert_eq!(dual.to_rows(), vec![vec![1, 1, 1]]);
//! ```

#![allow(
    clippy::needless_range_loop,
    clippy::uninlined_format_args,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]
pub mod bitmatrix;
pub mod bitvec;
pub mod codes;
pub mod error;

pub use bitmatrix::complement::orthogonal_complement;
pub use bitmatrix::elimination::{gaussian_elimination, rank, Elimination};
pub use bitmatrix::{BitMatrix, EntryPolicy, RowOps};
pub use bitvec::{BitBlock, BitRange, BitVec};
pub use codes::BinaryLinearCode;
pub use error::{Gf2Error, Result};
