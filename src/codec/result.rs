//! codec::result — typed host-side records for the engine's analysis output.
//!
//! Purpose
//! -------
//! Replace the source wrapper's duck-typed attribute bag with concrete
//! structured records: one type per engine sub-record, with named, typed
//! fields. These are the values callers own after `run_analysis`/`load_model`
//! and hand back to `save_model`.
//!
//! Key behaviors
//! -------------
//! - Mirror the engine's field names verbatim (lower-cased where the engine
//!   mixes case, see `num_lowvariability_behav_boots`).
//! - Store numeric matrices as `Array2<f64>` regardless of the engine-side
//!   precision; the category tables remember which fields narrow back to
//!   single precision on encode.
//! - Keep the resampling sub-records optional, since the engine omits them
//!   when the corresponding count is zero.
//!
//! Invariants & assumptions
//! ------------------------
//! - Construction happens only in `codec::decode` (from an engine struct) or
//!   in tests; the records perform no validation of their own.
//! - `distrib` is kept dynamic-dimensional because the engine returns a 3-D
//!   bootstrap distribution.
//!
//! Downstream usage
//! ----------------
//! - `codec::encode` converts these records back to engine form for
//!   persistence.
//! - The feature-gated Python wrappers in the crate root expose the fields
//!   as numpy arrays and plain scalars.
//!
//! Testing notes
//! -------------
//! - These are plain data carriers; behavior is covered by the decode/encode
//!   unit tests and the bridge integration tests.
use ndarray::{Array1, Array2, ArrayD};

/// Permutation test outputs (`perm_result`).
#[derive(Debug, Clone, PartialEq)]
pub struct PermResult {
    /// Number of permutations actually run.
    pub num_perm: i64,
    /// Whether split-half permutation was enabled for this run.
    pub is_perm_splithalf: bool,
    /// Permuted singular values.
    pub sp: Array2<f64>,
    /// Permutation p-values per latent variable.
    pub sprob: Array2<f64>,
    /// Permutation resample orders.
    pub persamp: Array2<f64>,
}

/// Split-half permutation outputs (`perm_splithalf`).
#[derive(Debug, Clone, PartialEq)]
pub struct SplitHalfResult {
    pub num_outer_perm: i64,
    pub num_split: i64,
    /// Observed split-half correlations for the left singular vectors.
    pub orig_ucorr: Array2<f64>,
    /// Observed split-half correlations for the right singular vectors.
    pub orig_vcorr: Array2<f64>,
    pub ucorr_prob: Array2<f64>,
    pub vcorr_prob: Array2<f64>,
    pub ucorr_ul: Array2<f64>,
    pub ucorr_ll: Array2<f64>,
    pub vcorr_ul: Array2<f64>,
    pub vcorr_ll: Array2<f64>,
}

/// Bootstrap outputs (`boot_result`).
#[derive(Debug, Clone, PartialEq)]
pub struct BootResult {
    /// Number of bootstrap resamples.
    pub num_boot: i64,
    /// Resamples regenerated to avoid duplicate subjects.
    pub countnewtotal: i64,
    /// Whether the nonrotated bootstrap variant was used.
    pub nonrotated_boot: bool,
    /// Confidence limit percentage echoed from the request.
    pub clim: f64,
    /// "strat" or "nonstrat", echoed from the request.
    pub boot_type: String,
    /// Per-behaviour counts of low-variability resamples.
    pub num_lowvariability_behav_boots: Array1<f64>,
    /// Upper confidence bounds on the behaviour correlations.
    pub ulcorr: Array2<f64>,
    /// Lower confidence bounds on the behaviour correlations.
    pub llcorr: Array2<f64>,
    /// Bias-adjusted upper bounds.
    pub ulcorr_adj: Array2<f64>,
    /// Bias-adjusted lower bounds.
    pub llcorr_adj: Array2<f64>,
    pub badbeh: Array2<f64>,
    pub prop: Array2<f64>,
    /// Full bootstrap distribution, 3-D.
    pub distrib: ArrayD<f64>,
    /// Bootstrap resample indices.
    pub bootsamp: Array2<i64>,
    /// Behaviour-specific resample indices.
    pub bootsamp_4beh: Array2<i64>,
    /// Observed behaviour correlations (engine stores single precision).
    pub orig_corr: Array2<f64>,
    /// Bootstrap ratios for the left singular vectors.
    pub compare_u: Array2<f64>,
    /// Bootstrap standard errors for the left singular vectors.
    pub u_se: Array2<f64>,
}

/// Echoed configuration flags (`other_input`).
///
/// The engine encodes both fields numerically; the wrapper contract exposes
/// them as booleans (zero vs nonzero mean-centering, Pearson vs other
/// correlation mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtherInput {
    pub meancentering_type: bool,
    pub cormode: bool,
}

/// AnalysisResult — the fully converted output of one engine analysis.
///
/// Purpose
/// -------
/// Own every top-level field of the vendor analysis struct (minus the
/// marshaling-incompatible `field_descrip`, which the adapter script strips
/// before the value crosses the boundary), with the four named sub-records
/// as typed members.
///
/// Fields
/// ------
/// - `method`: engine method discriminator; 3 for behavioural PLS.
/// - `is_struct`: engine flag describing the input layout.
/// - `num_conditions`, `num_subj_lst`: echoed request geometry.
/// - `u`, `s`, `v`: singular decomposition blocks (engine singles).
/// - `usc`, `vsc`: brain and behaviour scores.
/// - `lvcorrs`: latent-variable correlations.
/// - `stacked_behavdata`: echoed behavioural matrix.
/// - `datamatcorrs_lst`: behaviour/data correlations, unwrapped from the
///   engine's one-element cell.
/// - `perm_result`, `perm_splithalf`, `boot_result`: resampling outputs,
///   present only when the corresponding count was nonzero.
/// - `other_input`: echoed configuration flags.
///
/// Lifecycle
/// ---------
/// Constructed once per engine call or load; owned by the caller thereafter;
/// converted back to engine form only on an explicit save.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub method: i64,
    pub is_struct: bool,
    pub num_conditions: i64,
    pub num_subj_lst: Vec<i64>,
    pub u: Array2<f64>,
    pub s: Array2<f64>,
    pub v: Array2<f64>,
    pub usc: Array2<f64>,
    pub vsc: Array2<f64>,
    pub lvcorrs: Array2<f64>,
    pub stacked_behavdata: Array2<f64>,
    pub datamatcorrs_lst: Array2<f64>,
    pub perm_result: Option<PermResult>,
    pub perm_splithalf: Option<SplitHalfResult>,
    pub boot_result: Option<BootResult>,
    pub other_input: OtherInput,
}
