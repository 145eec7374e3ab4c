//! request::options — configuration record for one analysis call.
//!
//! Purpose
//! -------
//! Collect the configuration knobs of a behavioural-PLS run in one validated
//! place: resampling counts, the mean-centering and correlation-mode enums,
//! the bootstrap sampling mode, the confidence limit, and the optional RNG
//! seed. Call sites pass an explicit [`PLSOptions`] instead of ad-hoc flags.
//!
//! Key behaviors
//! -------------
//! - Represent the engine's numeric option codes as proper enums
//!   ([`MeanCentering`], [`CorMode`], [`BootType`]) with `wire`/`from_wire`
//!   conversions, so invalid codes are rejected at construction time rather
//!   than inside the engine.
//! - Fix the `method` discriminator to 3, the engine's behavioural-PLS mode;
//!   it is not caller-configurable.
//!
//! Invariants & assumptions
//! ------------------------
//! - `clim` lies in [0, 100]; enforced by [`PLSOptions::validate`], which
//!   request construction always runs.
//! - Resampling counts are non-negative by type (`usize`); zero disables the
//!   corresponding resampling procedure and the engine omits its sub-record.
//! - `seed` controls reproducibility: `Some(seed)` makes permutation and
//!   bootstrap runs repeatable, `None` draws a fresh seed from the host RNG
//!   at call time.
//!
//! Downstream usage
//! ----------------
//! - `request::data::AnalysisRequest` embeds a [`PLSOptions`].
//! - `codec::encode::encode_request` writes the wire encodings into the
//!   engine options struct.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the enum wire round-trips, rejection of invalid
//!   codes, and the `clim` range check.
use std::str::FromStr;

use crate::request::errors::{RequestError, RequestResult};

/// Engine method discriminator selecting behavioural-PLS mode.
const METHOD_BEHAVIOURAL_PLS: i64 = 3;

/// MeanCentering — which group/condition means are removed before the
/// decomposition.
///
/// Variants (wire values)
/// ----------------------
/// - `GroupConditionMeans` (0): remove group condition means from condition
///   means within each group. Boosts condition differences, removes overall
///   group differences.
/// - `GrandConditionMeans` (1): remove grand condition means from each group
///   condition mean. Boosts group differences, removes overall condition
///   differences.
/// - `GrandMean` (2): remove the grand mean over all subjects and
///   conditions.
/// - `AllMainEffects` (3): remove condition and group means, leaving the
///   pure group-by-condition interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeanCentering {
    GroupConditionMeans,
    GrandConditionMeans,
    GrandMean,
    AllMainEffects,
}

impl MeanCentering {
    /// The engine's numeric code for this variant.
    pub fn wire(self) -> i64 {
        match self {
            MeanCentering::GroupConditionMeans => 0,
            MeanCentering::GrandConditionMeans => 1,
            MeanCentering::GrandMean => 2,
            MeanCentering::AllMainEffects => 3,
        }
    }

    /// Parse the engine's numeric code.
    pub fn from_wire(code: i64) -> RequestResult<MeanCentering> {
        match code {
            0 => Ok(MeanCentering::GroupConditionMeans),
            1 => Ok(MeanCentering::GrandConditionMeans),
            2 => Ok(MeanCentering::GrandMean),
            3 => Ok(MeanCentering::AllMainEffects),
            other => Err(RequestError::InvalidMeanCentering(other)),
        }
    }
}

/// CorMode — similarity measure used in the decomposition.
///
/// Variants (wire values)
/// ----------------------
/// - `Pearson` (0), `Covariance` (2), `CosineAngle` (4), `DotProduct` (6).
///   The engine skips odd codes; they are rejected here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorMode {
    Pearson,
    Covariance,
    CosineAngle,
    DotProduct,
}

impl CorMode {
    /// The engine's numeric code for this variant.
    pub fn wire(self) -> i64 {
        match self {
            CorMode::Pearson => 0,
            CorMode::Covariance => 2,
            CorMode::CosineAngle => 4,
            CorMode::DotProduct => 6,
        }
    }

    /// Parse the engine's numeric code.
    pub fn from_wire(code: i64) -> RequestResult<CorMode> {
        match code {
            0 => Ok(CorMode::Pearson),
            2 => Ok(CorMode::Covariance),
            4 => Ok(CorMode::CosineAngle),
            6 => Ok(CorMode::DotProduct),
            other => Err(RequestError::InvalidCorMode(other)),
        }
    }
}

/// BootType — stratified vs non-stratified bootstrap resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootType {
    Strat,
    Nonstrat,
}

impl BootType {
    /// The engine's string encoding for this variant.
    pub fn as_str(self) -> &'static str {
        match self {
            BootType::Strat => "strat",
            BootType::Nonstrat => "nonstrat",
        }
    }
}

impl FromStr for BootType {
    type Err = RequestError;

    fn from_str(s: &str) -> RequestResult<BootType> {
        match s {
            "strat" => Ok(BootType::Strat),
            "nonstrat" => Ok(BootType::Nonstrat),
            other => Err(RequestError::InvalidBootType(other.to_string())),
        }
    }
}

/// PLSOptions — configuration for one behavioural-PLS analysis call.
///
/// Fields
/// ------
/// - `num_perm`: number of permutations; 0 disables the permutation test.
/// - `num_split`: number of split-half permutations; 0 disables.
/// - `num_boot`: number of bootstrap resamples; 0 disables.
/// - `meancentering`: [`MeanCentering`] policy.
/// - `cormode`: [`CorMode`] similarity measure.
/// - `boot_type`: [`BootType`] sampling mode.
/// - `clim`: confidence limit percentage in [0, 100].
/// - `seed`: optional engine RNG seed; `None` draws a fresh one per call.
///
/// Notes
/// -----
/// - `Default` mirrors the original wrapper's keyword defaults: all counts
///   zero, mean-centering 0, Pearson correlation, stratified bootstrap,
///   `clim = 95.0`, no seed.
#[derive(Debug, Clone, PartialEq)]
pub struct PLSOptions {
    pub num_perm: usize,
    pub num_split: usize,
    pub num_boot: usize,
    pub meancentering: MeanCentering,
    pub cormode: CorMode,
    pub boot_type: BootType,
    pub clim: f64,
    pub seed: Option<u64>,
}

impl PLSOptions {
    /// The fixed engine method discriminator.
    pub fn method(&self) -> i64 {
        METHOD_BEHAVIOURAL_PLS
    }

    /// Check the option ranges that the type system cannot enforce.
    pub fn validate(&self) -> RequestResult<()> {
        if !self.clim.is_finite() || !(0.0..=100.0).contains(&self.clim) {
            return Err(RequestError::InvalidClim(self.clim));
        }
        Ok(())
    }
}

impl Default for PLSOptions {
    fn default() -> Self {
        PLSOptions {
            num_perm: 0,
            num_split: 0,
            num_boot: 0,
            meancentering: MeanCentering::GroupConditionMeans,
            cormode: CorMode::Pearson,
            boot_type: BootType::Strat,
            clim: 95.0,
            seed: None,
        }
    }
}
