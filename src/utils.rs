#[cfg(feature = "python-bindings")]
use ndarray::{Array1, Array2};

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::PyAny,
};

#[cfg(feature = "python-bindings")]
use crate::request::{
    data::Behav,
    options::{BootType, CorMode, MeanCentering, PLSOptions},
};

#[cfg(feature = "python-bindings")]
use numpy::{PyReadonlyArray1, PyReadonlyArray2};

#[cfg(feature = "python-bindings")]
pub fn extract_f64_matrix<'py>(
    _py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<Array2<f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr_ro.as_array().to_owned());
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(frame_ro) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(frame_ro.as_array().to_owned());
        }
    }

    let rows: Vec<Vec<f64>> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err(
            "expected a 2-D numpy.ndarray, pandas.DataFrame, or nested sequence of float64",
        )
    })?;
    let ncols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|row| row.len() != ncols) {
        return Err(PyValueError::new_err("all rows must have the same length"));
    }
    let nrows = rows.len();
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((nrows, ncols), flat)
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

#[cfg(feature = "python-bindings")]
pub fn extract_group_list<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<Vec<Array2<f64>>> {
    // A bare 2-D array is one group; anything else must be a sequence of them.
    if let Ok(matrix) = extract_f64_matrix(py, raw_data) {
        return Ok(vec![matrix]);
    }

    let items: Vec<Bound<'py, PyAny>> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 2-D float64 array or a sequence of 2-D float64 arrays")
    })?;
    items.iter().map(|item| extract_f64_matrix(py, item)).collect()
}

#[cfg(feature = "python-bindings")]
pub fn extract_subject_counts<'py>(raw_data: &Bound<'py, PyAny>) -> PyResult<Vec<usize>> {
    if let Ok(count) = raw_data.extract::<usize>() {
        return Ok(vec![count]);
    }
    raw_data.extract::<Vec<usize>>().map_err(|_| {
        PyTypeError::new_err("expected a non-negative integer or a sequence of them")
    })
}

#[cfg(feature = "python-bindings")]
pub fn extract_behav<'py>(py: Python<'py>, raw_data: &Bound<'py, PyAny>) -> PyResult<Behav> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        return Ok(Behav::Column(arr_ro.as_array().to_owned()));
    }
    if let Ok(vec) = raw_data.extract::<Vec<f64>>() {
        return Ok(Behav::Column(Array1::from(vec)));
    }
    extract_f64_matrix(py, raw_data).map(Behav::Matrix)
}

#[cfg(feature = "python-bindings")]
pub fn extract_options(
    num_perm: usize, num_split: usize, num_boot: usize, meancentering: i64, cormode: i64,
    boot_type: &str, clim: f64, seed: Option<u64>,
) -> PyResult<PLSOptions> {
    let options = PLSOptions {
        num_perm,
        num_split,
        num_boot,
        meancentering: MeanCentering::from_wire(meancentering)?,
        cormode: CorMode::from_wire(cormode)?,
        boot_type: boot_type.parse::<BootType>()?,
        clim,
        seed,
    };
    options.validate()?;
    Ok(options)
}
