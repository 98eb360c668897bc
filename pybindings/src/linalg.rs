//! Python entry points. Matrices cross the boundary as lists of lists of 0/1 integers.

use gf2elim::{BitMatrix, EntryPolicy, Gf2Error};
use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyList;

fn to_py_err(e: Gf2Error) -> PyErr {
    match e {
        Gf2Error::ColumnOutOfRange { .. } => PyIndexError::new_err(e.to_string()),
        _ => PyValueError::new_err(e.to_string()),
    }
}

fn to_matrix(rows: &[Vec<i64>]) -> PyResult<BitMatrix> {
    BitMatrix::from_rows(rows, EntryPolicy::Strict).map_err(to_py_err)
}

/// Row-reduces `matrix` (a list of lists of 0/1) in place and returns the pivot columns.
///
/// Columns are visited in the order given by `columns`, or left to right if it is omitted.
/// With `diagonalize=True` the pivot columns are also cleared above their pivots.
#[pyfunction]
#[pyo3(signature = (matrix, columns=None, diagonalize=false))]
pub fn gaussian_elimination(
    matrix: &Bound<'_, PyList>,
    columns: Option<Vec<usize>>,
    diagonalize: bool,
) -> PyResult<Vec<usize>> {
    // every row must be a list we can write back into, so check that before touching anything
    let py_rows = matrix
        .iter()
        .map(|row| row.downcast_into::<PyList>().map_err(PyErr::from))
        .collect::<PyResult<Vec<_>>>()?;
    let rows = py_rows
        .iter()
        .map(|row| row.extract::<Vec<i64>>())
        .collect::<PyResult<Vec<_>>>()?;

    let mut m = to_matrix(&rows)?;
    let pivots = gf2elim::gaussian_elimination(&mut m, columns.as_deref(), diagonalize)
        .map_err(to_py_err)?;

    for (py_row, row) in py_rows.iter().zip(m.to_rows()) {
        for (j, bit) in row.into_iter().enumerate() {
            py_row.set_item(j, i64::from(bit))?;
        }
    }
    Ok(pivots)
}

/// Rank of `matrix` over GF(2). The argument is not modified.
#[pyfunction]
pub fn rank(matrix: Vec<Vec<i64>>) -> PyResult<usize> {
    Ok(to_matrix(&matrix)?.rank())
}

/// A basis of the vectors orthogonal to every row of `matrix`, as a new list of lists.
#[pyfunction]
#[pyo3(signature = (matrix, columns=None))]
pub fn orthogonal_complement(
    matrix: Vec<Vec<i64>>,
    columns: Option<Vec<usize>>,
) -> PyResult<Vec<Vec<i64>>> {
    let m = to_matrix(&matrix)?;
    let complement = m
        .orthogonal_complement(columns.as_deref())
        .map_err(to_py_err)?;
    // `Vec<u8>` would come out as `bytes`
    Ok(complement
        .to_rows()
        .into_iter()
        .map(|row| row.into_iter().map(i64::from).collect())
        .collect())
}
