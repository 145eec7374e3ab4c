//! codec::encode — host-to-engine conversion of results and arguments.
//!
//! Purpose
//! -------
//! The to-engine direction of the codec: turn the typed records of
//! `codec::result` back into [`EngineValue`] structs for persistence, and
//! turn an [`AnalysisRequest`] into the positional argument list the analysis
//! adapter expects.
//!
//! Key behaviors
//! -------------
//! - Invert every category rule from `codec::decode`: booleans become
//!   0.0/1.0 double scalars, host integers become double scalars, index
//!   matrices become double-coded matrices, and the per-field precision from
//!   the category tables decides whether a matrix is written as double or
//!   single.
//! - Re-wrap `datamatcorrs_lst` in its one-element cell.
//! - Build the engine options struct with the fixed `method` discriminator
//!   and the wire encodings of the configuration enums.
//!
//! Invariants & assumptions
//! ------------------------
//! - Encoding is total: every well-typed record has an engine form, so these
//!   functions return values rather than results.
//! - Composing encode after decode reproduces the engine value up to the
//!   single-precision narrowing; composing decode after encode reproduces
//!   the host value exactly for non-single categories.
//!
//! Downstream usage
//! ----------------
//! - `bridge::analysis` calls [`encode_request`] before the remote analysis
//!   call and [`encode_result`] before the persistence call.
//!
//! Testing notes
//! -------------
//! - Unit tests cover a full encode→decode round-trip (with f32-exact
//!   fixture values so equality is exact) and the argument-list layout.
use std::collections::BTreeMap;

use ndarray::{Array1, Array2};

use crate::{
    codec::{
        result::{AnalysisResult, BootResult, OtherInput, PermResult, SplitHalfResult},
        value::EngineValue,
    },
    request::data::AnalysisRequest,
};

fn double(arr: &Array2<f64>) -> EngineValue {
    EngineValue::Double(arr.clone().into_dyn())
}

fn single(arr: &Array2<f64>) -> EngineValue {
    EngineValue::Single(arr.mapv(|v| v as f32).into_dyn())
}

fn index_matrix(arr: &Array2<i64>) -> EngineValue {
    EngineValue::Double(arr.mapv(|v| v as f64).into_dyn())
}

fn vector(arr: &Array1<f64>) -> EngineValue {
    EngineValue::Double(arr.clone().into_dyn())
}

fn int_scalar(v: i64) -> EngineValue {
    EngineValue::scalar(v as f64)
}

/// Encode `perm_result` back to engine form.
pub fn encode_perm_result(perm: &PermResult) -> EngineValue {
    let mut map = BTreeMap::new();
    map.insert("num_perm".to_string(), int_scalar(perm.num_perm));
    map.insert("is_perm_splithalf".to_string(), EngineValue::flag(perm.is_perm_splithalf));
    map.insert("sp".to_string(), double(&perm.sp));
    map.insert("sprob".to_string(), double(&perm.sprob));
    map.insert("persamp".to_string(), double(&perm.persamp));
    EngineValue::Struct(map)
}

/// Encode `perm_splithalf` back to engine form.
pub fn encode_splithalf(sh: &SplitHalfResult) -> EngineValue {
    let mut map = BTreeMap::new();
    map.insert("num_outer_perm".to_string(), int_scalar(sh.num_outer_perm));
    map.insert("num_split".to_string(), int_scalar(sh.num_split));
    map.insert("orig_ucorr".to_string(), double(&sh.orig_ucorr));
    map.insert("orig_vcorr".to_string(), double(&sh.orig_vcorr));
    map.insert("ucorr_prob".to_string(), double(&sh.ucorr_prob));
    map.insert("vcorr_prob".to_string(), double(&sh.vcorr_prob));
    map.insert("ucorr_ul".to_string(), double(&sh.ucorr_ul));
    map.insert("ucorr_ll".to_string(), double(&sh.ucorr_ll));
    map.insert("vcorr_ul".to_string(), double(&sh.vcorr_ul));
    map.insert("vcorr_ll".to_string(), double(&sh.vcorr_ll));
    EngineValue::Struct(map)
}

/// Encode `boot_result` back to engine form.
pub fn encode_boot_result(boot: &BootResult) -> EngineValue {
    let mut map = BTreeMap::new();
    map.insert("num_boot".to_string(), int_scalar(boot.num_boot));
    map.insert("countnewtotal".to_string(), int_scalar(boot.countnewtotal));
    map.insert("nonrotated_boot".to_string(), EngineValue::flag(boot.nonrotated_boot));
    map.insert("clim".to_string(), EngineValue::scalar(boot.clim));
    map.insert("boot_type".to_string(), EngineValue::Str(boot.boot_type.clone()));
    map.insert(
        "num_LowVariability_behav_boots".to_string(),
        vector(&boot.num_lowvariability_behav_boots),
    );
    map.insert("ulcorr".to_string(), double(&boot.ulcorr));
    map.insert("llcorr".to_string(), double(&boot.llcorr));
    map.insert("ulcorr_adj".to_string(), double(&boot.ulcorr_adj));
    map.insert("llcorr_adj".to_string(), double(&boot.llcorr_adj));
    map.insert("badbeh".to_string(), double(&boot.badbeh));
    map.insert("prop".to_string(), double(&boot.prop));
    map.insert("distrib".to_string(), EngineValue::Double(boot.distrib.clone()));
    map.insert("bootsamp".to_string(), index_matrix(&boot.bootsamp));
    map.insert("bootsamp_4beh".to_string(), index_matrix(&boot.bootsamp_4beh));
    map.insert("orig_corr".to_string(), single(&boot.orig_corr));
    map.insert("compare_u".to_string(), single(&boot.compare_u));
    map.insert("u_se".to_string(), single(&boot.u_se));
    EngineValue::Struct(map)
}

/// Encode `other_input` back to engine form.
pub fn encode_other_input(other: &OtherInput) -> EngineValue {
    let mut map = BTreeMap::new();
    map.insert("meancentering_type".to_string(), EngineValue::flag(other.meancentering_type));
    map.insert("cormode".to_string(), EngineValue::flag(other.cormode));
    EngineValue::Struct(map)
}

/// encode_result — convert a host [`AnalysisResult`] to engine form.
///
/// Inverse of [`crate::codec::decode::decode_result`]: scalars widen to
/// double scalars, flags become 0.0/1.0, the single-precision fields narrow
/// back to singles, and `datamatcorrs_lst` regains its one-element cell.
/// Omitted sub-records are simply not written, matching an engine run with
/// the corresponding count at zero.
pub fn encode_result(result: &AnalysisResult) -> EngineValue {
    let mut map = BTreeMap::new();
    map.insert("method".to_string(), int_scalar(result.method));
    map.insert("is_struct".to_string(), EngineValue::flag(result.is_struct));
    map.insert("num_conditions".to_string(), int_scalar(result.num_conditions));
    map.insert(
        "num_subj_lst".to_string(),
        EngineValue::Double(
            Array1::from_iter(result.num_subj_lst.iter().map(|&n| n as f64)).into_dyn(),
        ),
    );
    map.insert("u".to_string(), single(&result.u));
    map.insert("s".to_string(), single(&result.s));
    map.insert("v".to_string(), single(&result.v));
    map.insert("usc".to_string(), single(&result.usc));
    map.insert("vsc".to_string(), single(&result.vsc));
    map.insert("lvcorrs".to_string(), single(&result.lvcorrs));
    map.insert("stacked_behavdata".to_string(), single(&result.stacked_behavdata));
    map.insert(
        "datamatcorrs_lst".to_string(),
        EngineValue::Cell(vec![single(&result.datamatcorrs_lst)]),
    );
    if let Some(perm) = &result.perm_result {
        map.insert("perm_result".to_string(), encode_perm_result(perm));
    }
    if let Some(sh) = &result.perm_splithalf {
        map.insert("perm_splithalf".to_string(), encode_splithalf(sh));
    }
    if let Some(boot) = &result.boot_result {
        map.insert("boot_result".to_string(), encode_boot_result(boot));
    }
    map.insert("other_input".to_string(), encode_other_input(&result.other_input));
    EngineValue::Struct(map)
}

/// encode_request — build the positional argument list for the analysis
/// adapter.
///
/// Layout matches the adapter signature
/// `pls_analysis_py(datamat_lst, num_subj_lst, k, opt)`:
/// a cell of double group matrices, a double vector of subject counts, the
/// condition count as a double scalar, and the options struct with the fixed
/// behavioural-PLS `method` discriminator and the wire encodings of the
/// configuration enums.
pub fn encode_request(request: &AnalysisRequest) -> Vec<EngineValue> {
    let groups = EngineValue::Cell(request.datamat_lst.iter().map(double).collect());
    let counts = EngineValue::Double(
        Array1::from_iter(request.num_subj_lst.iter().map(|&n| n as f64)).into_dyn(),
    );
    let num_cond = EngineValue::scalar(request.num_cond as f64);

    let opt = &request.options;
    let mut map = BTreeMap::new();
    map.insert("method".to_string(), int_scalar(opt.method()));
    map.insert("num_perm".to_string(), EngineValue::scalar(opt.num_perm as f64));
    map.insert("num_split".to_string(), EngineValue::scalar(opt.num_split as f64));
    map.insert("num_boot".to_string(), EngineValue::scalar(opt.num_boot as f64));
    map.insert("stacked_behavdata".to_string(), double(&request.stacked_behavdata));
    map.insert(
        "meancentering_type".to_string(),
        EngineValue::scalar(opt.meancentering.wire() as f64),
    );
    map.insert("cormode".to_string(), EngineValue::scalar(opt.cormode.wire() as f64));
    map.insert("boot_type".to_string(), EngineValue::Str(opt.boot_type.as_str().to_string()));
    map.insert("clim".to_string(), EngineValue::scalar(opt.clim));

    vec![groups, counts, num_cond, EngineValue::Struct(map)]
}
