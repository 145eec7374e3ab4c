//! request::errors — validation failures for analysis requests.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for request construction and
//! validation. Every variant names the constraint it enforces — group/count
//! agreement, positive counts, behavioural-matrix geometry, finite data, and
//! the option ranges — so a rejected request tells the caller exactly what to
//! fix before any engine session is opened.
//!
//! Conventions
//! -----------
//! - Indices are 0-based.
//! - Validation happens once, in `AnalysisRequest::new`; a constructed
//!   request is assumed valid everywhere downstream.
//!
//! Testing notes
//! -------------
//! - `Display` payload embedding is covered here; the constraints themselves
//!   are exercised by the `request::data` and `request::options` tests.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type RequestResult<T> = Result<T, RequestError>;

/// RequestError — a request violates one of the documented invariants.
///
/// Variants
/// --------
/// - `EmptyGroupList`: no group data matrices were supplied.
/// - `GroupCountMismatch { groups, counts }`: subject-count list length does
///   not equal the number of group matrices.
/// - `NonPositiveSubjectCount { index }`: a subject count is zero.
/// - `ZeroConditions`: the condition count is zero.
/// - `BehavRowMismatch { rows, expected }`: behavioural-matrix row count does
///   not equal the total subject count.
/// - `NonFiniteGroupData { group, row, col }`: a group matrix element is NaN
///   or ±∞.
/// - `NonFiniteBehavData { row, col }`: a behavioural element is NaN or ±∞.
/// - `InvalidClim(f64)`: confidence limit outside [0, 100].
/// - `InvalidMeanCentering(i64)`: wire value outside 0–3.
/// - `InvalidCorMode(i64)`: wire value not in {0, 2, 4, 6}.
/// - `InvalidBootType(String)`: string not "strat"/"nonstrat".
#[derive(Debug, Clone, PartialEq)]
pub enum RequestError {
    EmptyGroupList,
    GroupCountMismatch { groups: usize, counts: usize },
    NonPositiveSubjectCount { index: usize },
    ZeroConditions,
    BehavRowMismatch { rows: usize, expected: usize },
    NonFiniteGroupData { group: usize, row: usize, col: usize },
    NonFiniteBehavData { row: usize, col: usize },
    InvalidClim(f64),
    InvalidMeanCentering(i64),
    InvalidCorMode(i64),
    InvalidBootType(String),
}

impl std::error::Error for RequestError {}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestError::EmptyGroupList => {
                write!(f, "Group data list must contain at least one matrix.")
            }
            RequestError::GroupCountMismatch { groups, counts } => {
                write!(
                    f,
                    "Subject-count list length ({counts}) must equal the number of group \
                     matrices ({groups})."
                )
            }
            RequestError::NonPositiveSubjectCount { index } => {
                write!(f, "Subject count at index {index} must be positive.")
            }
            RequestError::ZeroConditions => write!(f, "Condition count must be positive."),
            RequestError::BehavRowMismatch { rows, expected } => {
                write!(
                    f,
                    "Behavioural data has {rows} rows; expected {expected} (total subjects)."
                )
            }
            RequestError::NonFiniteGroupData { group, row, col } => {
                write!(
                    f,
                    "Group matrix {group} element ({row}, {col}) is not finite."
                )
            }
            RequestError::NonFiniteBehavData { row, col } => {
                write!(f, "Behavioural element ({row}, {col}) is not finite.")
            }
            RequestError::InvalidClim(clim) => {
                write!(f, "Confidence limit {clim} must lie in [0, 100].")
            }
            RequestError::InvalidMeanCentering(v) => {
                write!(f, "Invalid mean-centering type {v}. Must be 0, 1, 2, or 3.")
            }
            RequestError::InvalidCorMode(v) => {
                write!(f, "Invalid correlation mode {v}. Must be 0, 2, 4, or 6.")
            }
            RequestError::InvalidBootType(s) => {
                write!(f, "Invalid boot type {s:?}. Must be 'strat' or 'nonstrat'.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<RequestError> for PyErr {
    fn from(err: RequestError) -> PyErr {
        PyValueError::new_err(format!("RequestError: {err}"))
    }
}
