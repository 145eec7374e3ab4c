//! request::data — the analysis request record and its promotion rules.
//!
//! Purpose
//! -------
//! Bundle everything one engine call needs — group data matrices, per-group
//! subject counts, the condition count, the stacked behavioural matrix, and a
//! [`PLSOptions`] — into a validated [`AnalysisRequest`]. Constructed per
//! call, consumed once, discarded.
//!
//! Key behaviors
//! -------------
//! - Apply the documented promotion rules at the type level: a single bare
//!   matrix is a one-element group list, a single integer is a one-element
//!   subject-count list, and a 1-D behavioural array of length N is an N×1
//!   matrix. The [`Groups`], [`Counts`], and [`Behav`] argument enums carry
//!   these promotions through plain `From` impls, so both spellings reach
//!   the same constructor.
//! - Validate the geometry invariants once, at construction: non-empty group
//!   list, count/group agreement, positive counts, behavioural rows equal to
//!   total subjects, finite data, and the option ranges.
//!
//! Invariants & assumptions
//! ------------------------
//! - A constructed request is valid; downstream code (encoding, the bridge)
//!   performs no further checks.
//!
//! Downstream usage
//! ----------------
//! - `codec::encode::encode_request` converts the request into the engine's
//!   positional argument list.
//!
//! Testing notes
//! -------------
//! - Unit tests cover each promotion identity and each rejected geometry.
use ndarray::{Array1, Array2, Axis};

use crate::request::{
    errors::{RequestError, RequestResult},
    options::PLSOptions,
};

/// Group-data argument: one matrix or an explicit list.
#[derive(Debug, Clone, PartialEq)]
pub enum Groups {
    One(Array2<f64>),
    Many(Vec<Array2<f64>>),
}

impl From<Array2<f64>> for Groups {
    fn from(matrix: Array2<f64>) -> Groups {
        Groups::One(matrix)
    }
}

impl From<Vec<Array2<f64>>> for Groups {
    fn from(list: Vec<Array2<f64>>) -> Groups {
        Groups::Many(list)
    }
}

impl Groups {
    fn into_list(self) -> Vec<Array2<f64>> {
        match self {
            Groups::One(matrix) => vec![matrix],
            Groups::Many(list) => list,
        }
    }
}

/// Subject-count argument: one count or an explicit list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Counts {
    One(usize),
    Many(Vec<usize>),
}

impl From<usize> for Counts {
    fn from(count: usize) -> Counts {
        Counts::One(count)
    }
}

impl From<Vec<usize>> for Counts {
    fn from(list: Vec<usize>) -> Counts {
        Counts::Many(list)
    }
}

impl Counts {
    fn into_list(self) -> Vec<usize> {
        match self {
            Counts::One(count) => vec![count],
            Counts::Many(list) => list,
        }
    }
}

/// Behavioural-data argument: a 1-D column or a full matrix.
#[derive(Debug, Clone, PartialEq)]
pub enum Behav {
    Column(Array1<f64>),
    Matrix(Array2<f64>),
}

impl From<Array1<f64>> for Behav {
    fn from(column: Array1<f64>) -> Behav {
        Behav::Column(column)
    }
}

impl From<Array2<f64>> for Behav {
    fn from(matrix: Array2<f64>) -> Behav {
        Behav::Matrix(matrix)
    }
}

impl Behav {
    fn into_matrix(self) -> Array2<f64> {
        match self {
            Behav::Column(column) => column.insert_axis(Axis(1)),
            Behav::Matrix(matrix) => matrix,
        }
    }
}

/// AnalysisRequest — validated input for one engine analysis call.
///
/// Fields
/// ------
/// - `datamat_lst`: one 2-D matrix per group; rows are independent-variable
///   data.
/// - `num_subj_lst`: per-group subject counts; same length as the group
///   list, all positive.
/// - `num_cond`: condition count, positive.
/// - `stacked_behavdata`: behavioural matrix with one row per subject.
/// - `options`: resampling counts, enums, confidence limit, seed.
///
/// Invariants
/// ----------
/// - Enforced by [`AnalysisRequest::new`]; see the module docs. The fields
///   are public for reading; mutating them bypasses validation and is the
///   caller's responsibility.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub datamat_lst: Vec<Array2<f64>>,
    pub num_subj_lst: Vec<usize>,
    pub num_cond: usize,
    pub stacked_behavdata: Array2<f64>,
    pub options: PLSOptions,
}

impl AnalysisRequest {
    /// Build and validate a request, applying the promotion rules.
    ///
    /// Parameters
    /// ----------
    /// - `groups`: a single `Array2<f64>` or a `Vec` of them.
    /// - `counts`: a single `usize` or a `Vec` of them.
    /// - `num_cond`: number of conditions, positive.
    /// - `behav`: a 1-D `Array1<f64>` (treated as one column) or a 2-D
    ///   matrix.
    /// - `options`: configuration for the call.
    ///
    /// Errors
    /// ------
    /// Any [`RequestError`] named in the module docs; the first violated
    /// invariant is reported.
    pub fn new(
        groups: impl Into<Groups>, counts: impl Into<Counts>, num_cond: usize,
        behav: impl Into<Behav>, options: PLSOptions,
    ) -> RequestResult<AnalysisRequest> {
        let datamat_lst = groups.into().into_list();
        let num_subj_lst = counts.into().into_list();
        let stacked_behavdata = behav.into().into_matrix();

        if datamat_lst.is_empty() {
            return Err(RequestError::EmptyGroupList);
        }
        if num_subj_lst.len() != datamat_lst.len() {
            return Err(RequestError::GroupCountMismatch {
                groups: datamat_lst.len(),
                counts: num_subj_lst.len(),
            });
        }
        if let Some(index) = num_subj_lst.iter().position(|&n| n == 0) {
            return Err(RequestError::NonPositiveSubjectCount { index });
        }
        if num_cond == 0 {
            return Err(RequestError::ZeroConditions);
        }

        let total_subjects: usize = num_subj_lst.iter().sum();
        if stacked_behavdata.nrows() != total_subjects {
            return Err(RequestError::BehavRowMismatch {
                rows: stacked_behavdata.nrows(),
                expected: total_subjects,
            });
        }

        for (group, matrix) in datamat_lst.iter().enumerate() {
            if let Some(((row, col), _)) =
                matrix.indexed_iter().find(|(_, v)| !v.is_finite())
            {
                return Err(RequestError::NonFiniteGroupData { group, row, col });
            }
        }
        if let Some(((row, col), _)) =
            stacked_behavdata.indexed_iter().find(|(_, v)| !v.is_finite())
        {
            return Err(RequestError::NonFiniteBehavData { row, col });
        }

        options.validate()?;

        Ok(AnalysisRequest { datamat_lst, num_subj_lst, num_cond, stacked_behavdata, options })
    }

    /// Total subject count across all groups.
    pub fn total_subjects(&self) -> usize {
        self.num_subj_lst.iter().sum()
    }
}
