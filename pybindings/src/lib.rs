// There seems to be some issues with the pyo3 bindings generation on functions returning
// a `PyResult<T>`.
#![allow(clippy::useless_conversion)]

pub mod linalg;

use crate::linalg::{gaussian_elimination, orthogonal_complement, rank};
use pyo3::prelude::*;

#[pymodule]
fn gf2elim(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(gaussian_elimination, m)?)?;
    m.add_function(wrap_pyfunction!(rank, m)?)?;
    m.add_function(wrap_pyfunction!(orthogonal_complement, m)?)?;
    Ok(())
}
