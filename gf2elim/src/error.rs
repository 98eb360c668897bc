use thiserror::Error;

/// Errors raised when a caller hands the library malformed input.
///
/// Every variant describes a contract violation on the caller's side. Nothing here is
/// transient, so none of these are worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Gf2Error {
    /// A row of nested input has a different length than the first row
    #[error("row {row} has {len} entries, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// A column order refers to a column the matrix does not have
    #[error("column index {index} is out of range for a matrix with {cols} columns")]
    ColumnOutOfRange { index: usize, cols: usize },

    /// An integer entry other than 0 or 1 under [`EntryPolicy::Strict`](crate::EntryPolicy::Strict)
    #[error("entry {value} at ({row}, {col}) is not 0 or 1")]
    NonBinaryEntry { row: usize, col: usize, value: i128 },

    #[error("cannot {op} a {lhs_rows}x{lhs_cols} matrix with a {rhs_rows}x{rhs_cols} matrix")]
    DimensionMismatch {
        op: &'static str,
        lhs_rows: usize,
        lhs_cols: usize,
        rhs_rows: usize,
        rhs_cols: usize,
    },

    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("matrix is not invertible (rank {rank} < {size})")]
    NotInvertible { rank: usize, size: usize },
}

pub type Result<T> = std::result::Result<T, Gf2Error>;
