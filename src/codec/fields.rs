//! codec::fields — per-record conversion category tables.
//!
//! Purpose
//! -------
//! Declare, once and in one place, which conversion category every engine
//! field belongs to. The decoder and encoder both dispatch on these tables,
//! which keeps the two directions symmetric by construction: the same entry
//! that tells the decoder "widen this single-precision matrix to f64" tells
//! the encoder "narrow this matrix back to single precision".
//!
//! Key behaviors
//! -------------
//! - Define [`Category`], the closed set of field conversions.
//! - Define one `const` table per record (`RESULT_FIELDS`,
//!   `PERM_RESULT_FIELDS`, `SPLITHALF_FIELDS`, `BOOT_RESULT_FIELDS`,
//!   `OTHER_INPUT_FIELDS`) with a `required` flag per entry.
//! - Provide [`lookup`] and [`check_completeness`] used by the decoder to
//!   reject unknown fields and flag missing required ones.
//!
//! Invariants & assumptions
//! ------------------------
//! - Tables are closed: a key not present in its record's table is an error,
//!   never a silent pass-through.
//! - Field names are the engine-side names, verbatim.
//! - The source wrapper collapsed the double-array and single-array branches
//!   into one through an always-true membership test; here the two are kept
//!   as distinct categories (`DoubleArray` vs `SingleArray`) so the encoder
//!   knows which precision each field takes. See DESIGN.md.
//!
//! Downstream usage
//! ----------------
//! - `codec::decode` walks a table, pulls each entry out of the engine
//!   struct, and converts per category.
//! - `codec::encode` walks the typed record and writes each field in the
//!   precision its category names.
//!
//! Testing notes
//! -------------
//! - Unit tests assert table closure properties: no duplicate names, every
//!   sub-record name present at top level, and the completeness check
//!   rejecting unknown/missing keys.
use std::collections::BTreeMap;

use crate::codec::{
    errors::{ConversionError, ConversionResult},
    value::EngineValue,
};

/// Category — how one named field converts between engine and host forms.
///
/// Variants
/// --------
/// - `IntScalar`: double scalar holding a whole number; host `i64`.
/// - `BoolScalar`: double scalar that must be exactly 0.0 or 1.0; host `bool`.
/// - `TruthyScalar`: double scalar read by its nonzero-ness; host `bool`.
///   Used for the echoed option codes in `other_input`, which the engine
///   reports as the original numeric codes (0–3 mean-centering, {0,2,4,6}
///   correlation mode), not as booleans.
/// - `FloatScalar`: double scalar; host `f64`.
/// - `StrScalar`: engine string; host `String`.
/// - `DoubleArray`: double-precision numeric array; host `f64` array.
/// - `SingleArray`: single-precision numeric array; host `f64` array, written
///   back as single precision.
/// - `IndexArray`: double-coded integer indices (resample tables); host `i64`
///   array.
/// - `CellArray`: one-element cell wrapping a numeric matrix; unwrapped one
///   level before conversion.
/// - `SubStruct`: nested record with its own category table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    IntScalar,
    BoolScalar,
    TruthyScalar,
    FloatScalar,
    StrScalar,
    DoubleArray,
    SingleArray,
    IndexArray,
    CellArray,
    SubStruct,
}

/// One row of a record's conversion table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Engine-side field name, verbatim.
    pub name: &'static str,
    /// Conversion category applied in both directions.
    pub category: Category,
    /// Whether decoding fails if the field is absent.
    pub required: bool,
}

const fn spec(name: &'static str, category: Category, required: bool) -> FieldSpec {
    FieldSpec { name, category, required }
}

/// Record names used in conversion errors.
pub const RECORD_RESULT: &str = "result";
pub const RECORD_PERM: &str = "perm_result";
pub const RECORD_SPLITHALF: &str = "perm_splithalf";
pub const RECORD_BOOT: &str = "boot_result";
pub const RECORD_OTHER_INPUT: &str = "other_input";

/// Top-level analysis result. The resampling sub-records are optional because
/// the engine omits them when the corresponding count is zero.
pub const RESULT_FIELDS: &[FieldSpec] = &[
    spec("method", Category::IntScalar, true),
    spec("is_struct", Category::BoolScalar, true),
    spec("num_conditions", Category::IntScalar, true),
    spec("num_subj_lst", Category::IndexArray, true),
    spec("u", Category::SingleArray, true),
    spec("s", Category::SingleArray, true),
    spec("v", Category::SingleArray, true),
    spec("usc", Category::SingleArray, true),
    spec("vsc", Category::SingleArray, true),
    spec("lvcorrs", Category::SingleArray, true),
    spec("stacked_behavdata", Category::SingleArray, true),
    spec("datamatcorrs_lst", Category::CellArray, true),
    spec("perm_result", Category::SubStruct, false),
    spec("perm_splithalf", Category::SubStruct, false),
    spec("boot_result", Category::SubStruct, false),
    spec("other_input", Category::SubStruct, true),
];

/// Permutation test outputs.
pub const PERM_RESULT_FIELDS: &[FieldSpec] = &[
    spec("num_perm", Category::IntScalar, true),
    spec("is_perm_splithalf", Category::BoolScalar, true),
    spec("sp", Category::DoubleArray, true),
    spec("sprob", Category::DoubleArray, true),
    spec("persamp", Category::DoubleArray, true),
];

/// Split-half permutation outputs.
pub const SPLITHALF_FIELDS: &[FieldSpec] = &[
    spec("num_outer_perm", Category::IntScalar, true),
    spec("num_split", Category::IntScalar, true),
    spec("orig_ucorr", Category::DoubleArray, true),
    spec("orig_vcorr", Category::DoubleArray, true),
    spec("ucorr_prob", Category::DoubleArray, true),
    spec("vcorr_prob", Category::DoubleArray, true),
    spec("ucorr_ul", Category::DoubleArray, true),
    spec("ucorr_ll", Category::DoubleArray, true),
    spec("vcorr_ul", Category::DoubleArray, true),
    spec("vcorr_ll", Category::DoubleArray, true),
];

/// Bootstrap outputs.
pub const BOOT_RESULT_FIELDS: &[FieldSpec] = &[
    spec("num_boot", Category::IntScalar, true),
    spec("countnewtotal", Category::IntScalar, true),
    spec("nonrotated_boot", Category::BoolScalar, true),
    spec("clim", Category::FloatScalar, true),
    spec("boot_type", Category::StrScalar, true),
    spec("num_LowVariability_behav_boots", Category::DoubleArray, true),
    spec("ulcorr", Category::DoubleArray, true),
    spec("llcorr", Category::DoubleArray, true),
    spec("ulcorr_adj", Category::DoubleArray, true),
    spec("llcorr_adj", Category::DoubleArray, true),
    spec("badbeh", Category::DoubleArray, true),
    spec("prop", Category::DoubleArray, true),
    spec("distrib", Category::DoubleArray, true),
    spec("bootsamp", Category::IndexArray, true),
    spec("bootsamp_4beh", Category::IndexArray, true),
    spec("orig_corr", Category::SingleArray, true),
    spec("compare_u", Category::SingleArray, true),
    spec("u_se", Category::SingleArray, true),
];

/// Echoed configuration codes, read by their nonzero-ness.
pub const OTHER_INPUT_FIELDS: &[FieldSpec] = &[
    spec("meancentering_type", Category::TruthyScalar, true),
    spec("cormode", Category::TruthyScalar, true),
];

/// Find the table entry for `name`, if any.
pub fn lookup(table: &'static [FieldSpec], name: &str) -> Option<&'static FieldSpec> {
    table.iter().find(|s| s.name == name)
}

/// Reject engine structs that do not match their table exactly.
///
/// Every key of `map` must have a table entry (else `UnknownField`) and every
/// required entry must be present in `map` (else `MissingField`).
pub fn check_completeness(
    record: &'static str, table: &'static [FieldSpec], map: &BTreeMap<String, EngineValue>,
) -> ConversionResult<()> {
    for key in map.keys() {
        if lookup(table, key).is_none() {
            return Err(ConversionError::UnknownField { record, field: key.clone() });
        }
    }
    for entry in table {
        if entry.required && !map.contains_key(entry.name) {
            return Err(ConversionError::MissingField {
                record,
                field: entry.name.to_string(),
            });
        }
    }
    Ok(())
}
