//! pls_bridge — typed host-side bridge to an external PLS analysis engine.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the behavioural-PLS operations to Python via the `_pls_bridge` extension
//! module. The crate marshals host data into the engine's value model, drives
//! one engine session per bridge, and converts engine replies into typed
//! records. When the `python-bindings` feature is enabled, this module defines
//! the Python-facing classes and functions used by the `pls_bridge` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`request`, `codec`, and `bridge`) as the
//!   public crate surface.
//! - Define `#[pyclass]` wrappers for the analysis result records and
//!   `#[pyfunction]` entry points (`pls_analysis`, `load_pls_model`,
//!   `save_pls_model`) for the `_pls_bridge` Python extension.
//!
//! Invariants & assumptions
//! ------------------------
//! - All conversion and transport work is implemented in the inner Rust
//!   modules; this file performs only FFI glue, input extraction, and error
//!   mapping.
//! - The Python entry points start one engine session per call, configured
//!   from the `PLS_ENGINE` environment variable.
//!
//! Conventions
//! -----------
//! - Result fields keep the engine's names (`u`, `s`, `v`, `usc`, `lvcorrs`,
//!   ...) so Python callers can consult the engine's documentation directly.
//! - Errors from core Rust code are propagated as rich error types internally
//!   and converted to `PyErr` values at the PyO3 boundary: conversion and
//!   request failures become `ValueError`, session failures become `OSError`.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on [`bridge::PLSBridge`] and
//!   friends and can ignore the PyO3 items guarded by the `python-bindings`
//!   feature.
//! - The Python packaging layer imports the `_pls_bridge` module defined here
//!   and wraps its functions in user-facing Python APIs.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by the
//!   scripted-session integration tests; the PyO3 surface is exercised by
//!   Python smoke tests against the built extension.

pub mod bridge;
pub mod codec;
pub mod request;
pub mod utils;

#[cfg(feature = "python-bindings")]
use std::path::Path;

#[cfg(feature = "python-bindings")]
use numpy::{PyArray1, PyArray2, PyArrayDyn, ToPyArray};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    bridge::{BridgeConfig, PLSBridge, ProcessSession, SessionConfig},
    codec::{AnalysisResult, BootResult, OtherInput, PermResult, SplitHalfResult},
    request::data::AnalysisRequest,
    utils::{
        extract_behav, extract_group_list, extract_options, extract_subject_counts,
    },
};

/// PLSResult — Python-facing analysis result.
///
/// Purpose
/// -------
/// Hold a converted [`AnalysisResult`] and expose its fields to Python as
/// read-only properties, with matrices materialized as numpy arrays.
///
/// Fields
/// ------
/// - `inner`: [`AnalysisResult`]
///   Fully converted result; every field already passed the category tables.
///
/// Notes
/// -----
/// - Instances come from [`pls_analysis`] and [`load_pls_model`] and can be
///   handed back to [`save_pls_model`]; Python code never constructs one.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "pls_bridge")]
pub struct PLSResult {
    pub inner: AnalysisResult,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PLSResult {
    #[getter]
    pub fn method(&self) -> i64 {
        self.inner.method
    }

    #[getter]
    pub fn is_struct(&self) -> bool {
        self.inner.is_struct
    }

    #[getter]
    pub fn num_conditions(&self) -> i64 {
        self.inner.num_conditions
    }

    #[getter]
    pub fn num_subj_lst(&self) -> Vec<i64> {
        self.inner.num_subj_lst.clone()
    }

    #[getter]
    pub fn u<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.u.to_pyarray(py)
    }

    #[getter]
    pub fn s<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.s.to_pyarray(py)
    }

    #[getter]
    pub fn v<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.v.to_pyarray(py)
    }

    #[getter]
    pub fn usc<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.usc.to_pyarray(py)
    }

    #[getter]
    pub fn vsc<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.vsc.to_pyarray(py)
    }

    #[getter]
    pub fn lvcorrs<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.lvcorrs.to_pyarray(py)
    }

    #[getter]
    pub fn stacked_behavdata<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.stacked_behavdata.to_pyarray(py)
    }

    #[getter]
    pub fn datamatcorrs_lst<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.datamatcorrs_lst.to_pyarray(py)
    }

    #[getter]
    pub fn perm_result(&self) -> Option<PLSPermResult> {
        self.inner.perm_result.clone().map(|inner| PLSPermResult { inner })
    }

    #[getter]
    pub fn perm_splithalf(&self) -> Option<PLSSplitHalf> {
        self.inner.perm_splithalf.clone().map(|inner| PLSSplitHalf { inner })
    }

    #[getter]
    pub fn boot_result(&self) -> Option<PLSBootResult> {
        self.inner.boot_result.clone().map(|inner| PLSBootResult { inner })
    }

    #[getter]
    pub fn other_input(&self) -> PLSOtherInput {
        PLSOtherInput { inner: self.inner.other_input }
    }
}

/// Permutation-test sub-record of a [`PLSResult`].
#[cfg(feature = "python-bindings")]
#[pyclass(module = "pls_bridge")]
pub struct PLSPermResult {
    pub inner: PermResult,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PLSPermResult {
    #[getter]
    pub fn num_perm(&self) -> i64 {
        self.inner.num_perm
    }

    #[getter]
    pub fn is_perm_splithalf(&self) -> bool {
        self.inner.is_perm_splithalf
    }

    #[getter]
    pub fn sp<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.sp.to_pyarray(py)
    }

    #[getter]
    pub fn sprob<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.sprob.to_pyarray(py)
    }

    #[getter]
    pub fn persamp<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.persamp.to_pyarray(py)
    }
}

/// Split-half permutation sub-record of a [`PLSResult`].
#[cfg(feature = "python-bindings")]
#[pyclass(module = "pls_bridge")]
pub struct PLSSplitHalf {
    pub inner: SplitHalfResult,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PLSSplitHalf {
    #[getter]
    pub fn num_outer_perm(&self) -> i64 {
        self.inner.num_outer_perm
    }

    #[getter]
    pub fn num_split(&self) -> i64 {
        self.inner.num_split
    }

    #[getter]
    pub fn orig_ucorr<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.orig_ucorr.to_pyarray(py)
    }

    #[getter]
    pub fn orig_vcorr<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.orig_vcorr.to_pyarray(py)
    }

    #[getter]
    pub fn ucorr_prob<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.ucorr_prob.to_pyarray(py)
    }

    #[getter]
    pub fn vcorr_prob<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.vcorr_prob.to_pyarray(py)
    }

    #[getter]
    pub fn ucorr_ul<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.ucorr_ul.to_pyarray(py)
    }

    #[getter]
    pub fn ucorr_ll<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.ucorr_ll.to_pyarray(py)
    }

    #[getter]
    pub fn vcorr_ul<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.vcorr_ul.to_pyarray(py)
    }

    #[getter]
    pub fn vcorr_ll<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.vcorr_ll.to_pyarray(py)
    }
}

/// Bootstrap sub-record of a [`PLSResult`].
#[cfg(feature = "python-bindings")]
#[pyclass(module = "pls_bridge")]
pub struct PLSBootResult {
    pub inner: BootResult,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PLSBootResult {
    #[getter]
    pub fn num_boot(&self) -> i64 {
        self.inner.num_boot
    }

    #[getter]
    pub fn countnewtotal(&self) -> i64 {
        self.inner.countnewtotal
    }

    #[getter]
    pub fn nonrotated_boot(&self) -> bool {
        self.inner.nonrotated_boot
    }

    #[getter]
    pub fn clim(&self) -> f64 {
        self.inner.clim
    }

    #[getter]
    pub fn boot_type(&self) -> String {
        self.inner.boot_type.clone()
    }

    #[getter]
    pub fn num_lowvariability_behav_boots<'py>(
        &self, py: Python<'py>,
    ) -> Bound<'py, PyArray1<f64>> {
        self.inner.num_lowvariability_behav_boots.to_pyarray(py)
    }

    #[getter]
    pub fn ulcorr<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.ulcorr.to_pyarray(py)
    }

    #[getter]
    pub fn llcorr<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.llcorr.to_pyarray(py)
    }

    #[getter]
    pub fn ulcorr_adj<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.ulcorr_adj.to_pyarray(py)
    }

    #[getter]
    pub fn llcorr_adj<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.llcorr_adj.to_pyarray(py)
    }

    #[getter]
    pub fn badbeh<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.badbeh.to_pyarray(py)
    }

    #[getter]
    pub fn prop<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.prop.to_pyarray(py)
    }

    #[getter]
    pub fn distrib<'py>(&self, py: Python<'py>) -> Bound<'py, PyArrayDyn<f64>> {
        self.inner.distrib.to_pyarray(py)
    }

    #[getter]
    pub fn bootsamp<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<i64>> {
        self.inner.bootsamp.to_pyarray(py)
    }

    #[getter]
    pub fn bootsamp_4beh<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<i64>> {
        self.inner.bootsamp_4beh.to_pyarray(py)
    }

    #[getter]
    pub fn orig_corr<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.orig_corr.to_pyarray(py)
    }

    #[getter]
    pub fn compare_u<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.compare_u.to_pyarray(py)
    }

    #[getter]
    pub fn u_se<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.u_se.to_pyarray(py)
    }
}

/// Echoed-input sub-record of a [`PLSResult`].
#[cfg(feature = "python-bindings")]
#[pyclass(module = "pls_bridge")]
pub struct PLSOtherInput {
    pub inner: OtherInput,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PLSOtherInput {
    #[getter]
    pub fn meancentering_type(&self) -> bool {
        self.inner.meancentering_type
    }

    #[getter]
    pub fn cormode(&self) -> bool {
        self.inner.cormode
    }
}

#[cfg(feature = "python-bindings")]
fn connect_from_env(make_script: bool) -> PyResult<PLSBridge<ProcessSession>> {
    let session_config = SessionConfig::from_env()?;
    let session = ProcessSession::start(&session_config)?;
    let config = BridgeConfig { make_script, script_dir: None };
    Ok(PLSBridge::with_session(session, config))
}

/// Run a behavioural PLS analysis through the engine named by `PLS_ENGINE`.
///
/// `datamat_lst` accepts a single 2-D array or a sequence of them, one per
/// group; `num_subj_lst` a single integer or a sequence; `stacked_behavdata`
/// a 1-D column or a 2-D matrix with one row per subject. Resampling counts,
/// the mean-centering and correlation-mode codes, the bootstrap type, the
/// confidence limit, and the seed match the engine's option struct.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (
        datamat_lst,
        num_subj_lst,
        num_cond,
        stacked_behavdata,
        num_perm = 0,
        num_split = 0,
        num_boot = 0,
        meancentering = 0,
        cormode = 0,
        boot_type = "strat",
        clim = 95.0,
        seed = None,
        make_script = true,
    ),
    text_signature = "(datamat_lst, num_subj_lst, num_cond, stacked_behavdata, /, num_perm=0, \
                      num_split=0, num_boot=0, meancentering=0, cormode=0, boot_type='strat', \
                      clim=95.0, seed=None, make_script=True)"
)]
#[allow(clippy::too_many_arguments)]
pub fn pls_analysis<'py>(
    py: Python<'py>, datamat_lst: &Bound<'py, PyAny>, num_subj_lst: &Bound<'py, PyAny>,
    num_cond: usize, stacked_behavdata: &Bound<'py, PyAny>, num_perm: usize, num_split: usize,
    num_boot: usize, meancentering: i64, cormode: i64, boot_type: &str, clim: f64,
    seed: Option<u64>, make_script: bool,
) -> PyResult<PLSResult> {
    let groups = extract_group_list(py, datamat_lst)?;
    let counts = extract_subject_counts(num_subj_lst)?;
    let behav = extract_behav(py, stacked_behavdata)?;
    let options = extract_options(
        num_perm, num_split, num_boot, meancentering, cormode, boot_type, clim, seed,
    )?;
    let request = AnalysisRequest::new(groups, counts, num_cond, behav, options)?;

    let mut bridge = connect_from_env(make_script)?;
    let inner = bridge.run_analysis(&request)?;
    Ok(PLSResult { inner })
}

/// Load a persisted model file through the engine named by `PLS_ENGINE`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (path, make_script = true),
    text_signature = "(path, /, make_script=True)"
)]
pub fn load_pls_model(path: &str, make_script: bool) -> PyResult<PLSResult> {
    let mut bridge = connect_from_env(make_script)?;
    let inner = bridge.load_model(Path::new(path))?;
    Ok(PLSResult { inner })
}

/// Persist an analysis result through the engine named by `PLS_ENGINE`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (path, result), text_signature = "(path, result, /)")]
pub fn save_pls_model(path: &str, result: &PLSResult) -> PyResult<()> {
    let mut bridge = connect_from_env(false)?;
    bridge.save_model(Path::new(path), &result.inner)?;
    Ok(())
}

/// _pls_bridge — PyO3 module initializer for the Python extension.
///
/// Purpose
/// -------
/// Define the `_pls_bridge` Python module: the three engine operations and the
/// result classes they return.
///
/// Notes
/// -----
/// - This function is invoked automatically by Python when importing the
///   compiled extension; it is not called directly by user code.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _pls_bridge<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<PLSResult>()?;
    m.add_class::<PLSPermResult>()?;
    m.add_class::<PLSSplitHalf>()?;
    m.add_class::<PLSBootResult>()?;
    m.add_class::<PLSOtherInput>()?;
    m.add_function(wrap_pyfunction!(pls_analysis, m)?)?;
    m.add_function(wrap_pyfunction!(load_pls_model, m)?)?;
    m.add_function(wrap_pyfunction!(save_pls_model, m)?)?;
    Ok(())
}
