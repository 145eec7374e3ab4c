//! codec::decode — engine-to-host conversion of analysis results.
//!
//! Purpose
//! -------
//! Convert an [`EngineValue`] struct returned by the engine (from the remote
//! analysis call or the load adapter) into the typed records of
//! `codec::result`, dispatching every field through the category tables in
//! `codec::fields`.
//!
//! Key behaviors
//! -------------
//! - Check each struct against its table before converting: unknown fields
//!   and missing required fields are typed errors, not silent pass-throughs.
//! - Widen single-precision engine arrays to `f64` on the host side.
//! - Enforce the scalar contracts: boolean-coded doubles must be exactly
//!   0.0/1.0, integer-coded doubles must be whole and finite. The echoed
//!   option codes in `other_input` are the exception: the engine reports the
//!   numeric codes the caller configured (mean-centering 0–3, correlation
//!   mode {0, 2, 4, 6}), so those two fields decode by nonzero-ness.
//! - Unwrap the one-element `datamatcorrs_lst` cell one level before the
//!   numeric conversion.
//!
//! Invariants & assumptions
//! ------------------------
//! - A decoded record is fully converted or an error; no partially populated
//!   record escapes this module.
//! - Vector-shaped fields (`num_subj_lst`, `num_LowVariability_behav_boots`)
//!   accept either a 1-D array or a degenerate 2-D row/column, since the
//!   engine materializes vectors as 1×n matrices.
//!
//! Downstream usage
//! ----------------
//! - `bridge::analysis` calls [`decode_result`] on every remote-analysis and
//!   load reply. The sub-record decoders are public so callers can convert
//!   partial structures they obtained elsewhere.
//!
//! Testing notes
//! -------------
//! - Unit tests cover each category's happy path, the fail-fast contracts
//!   (non-0/1 booleans, fractional counts, wrong shapes), and the
//!   completeness checks.
use std::collections::BTreeMap;

use ndarray::{Array1, Array2, ArrayD, Ix2};

use crate::codec::{
    errors::{ConversionError, ConversionResult},
    fields::{
        BOOT_RESULT_FIELDS, Category, OTHER_INPUT_FIELDS, PERM_RESULT_FIELDS, RECORD_BOOT,
        RECORD_OTHER_INPUT, RECORD_PERM, RECORD_RESULT, RECORD_SPLITHALF, RESULT_FIELDS,
        SPLITHALF_FIELDS, check_completeness,
    },
    result::{AnalysisResult, BootResult, OtherInput, PermResult, SplitHalfResult},
    value::EngineValue,
};

type Map = BTreeMap<String, EngineValue>;

fn struct_map<'a>(record: &'static str, value: &'a EngineValue) -> ConversionResult<&'a Map> {
    value
        .as_struct()
        .ok_or(ConversionError::NotAStruct { record, found: value.kind() })
}

fn get<'a>(
    map: &'a Map, record: &'static str, field: &'static str,
) -> ConversionResult<&'a EngineValue> {
    map.get(field)
        .ok_or_else(|| ConversionError::MissingField { record, field: field.to_string() })
}

fn scalar_of(
    record: &'static str, field: &'static str, category: Category, value: &EngineValue,
) -> ConversionResult<f64> {
    match value {
        EngineValue::Double(arr) => match arr.iter().next() {
            Some(&v) if arr.len() == 1 => Ok(v),
            _ => Err(ConversionError::WrongShape {
                record,
                field: field.to_string(),
                expected: "scalar",
                found: arr.shape().to_vec(),
            }),
        },
        other => Err(ConversionError::WrongType {
            record,
            field: field.to_string(),
            category,
            found: other.kind(),
        }),
    }
}

fn take_f64(map: &Map, record: &'static str, field: &'static str) -> ConversionResult<f64> {
    scalar_of(record, field, Category::FloatScalar, get(map, record, field)?)
}

fn take_i64(map: &Map, record: &'static str, field: &'static str) -> ConversionResult<i64> {
    let raw = scalar_of(record, field, Category::IntScalar, get(map, record, field)?)?;
    integral(record, field, raw)
}

fn integral(record: &'static str, field: &'static str, raw: f64) -> ConversionResult<i64> {
    if raw.is_finite() && raw.fract() == 0.0 {
        Ok(raw as i64)
    } else {
        Err(ConversionError::NonIntegralCount { record, field: field.to_string(), value: raw })
    }
}

fn take_bool(map: &Map, record: &'static str, field: &'static str) -> ConversionResult<bool> {
    let raw = scalar_of(record, field, Category::BoolScalar, get(map, record, field)?)?;
    match raw {
        v if v == 0.0 => Ok(false),
        v if v == 1.0 => Ok(true),
        v => Err(ConversionError::NonBooleanFlag { record, field: field.to_string(), value: v }),
    }
}

/// Nonzero-as-true flag, for the echoed numeric option codes.
fn take_truthy(map: &Map, record: &'static str, field: &'static str) -> ConversionResult<bool> {
    let raw = scalar_of(record, field, Category::TruthyScalar, get(map, record, field)?)?;
    Ok(raw != 0.0)
}

fn take_string(map: &Map, record: &'static str, field: &'static str) -> ConversionResult<String> {
    let value = get(map, record, field)?;
    value.as_str().map(str::to_string).ok_or_else(|| ConversionError::WrongType {
        record,
        field: field.to_string(),
        category: Category::StrScalar,
        found: value.kind(),
    })
}

fn to_matrix(
    record: &'static str, field: &'static str, arr: ArrayD<f64>,
) -> ConversionResult<Array2<f64>> {
    let shape = arr.shape().to_vec();
    arr.into_dimensionality::<Ix2>().map_err(|_| ConversionError::WrongShape {
        record,
        field: field.to_string(),
        expected: "2-D matrix",
        found: shape,
    })
}

/// Numeric matrix in the precision its category names; widened to `f64`.
fn take_matrix(
    map: &Map, record: &'static str, field: &'static str, category: Category,
) -> ConversionResult<Array2<f64>> {
    let value = get(map, record, field)?;
    let widened = match (category, value) {
        (Category::DoubleArray, EngineValue::Double(arr)) => arr.clone(),
        (Category::SingleArray, EngineValue::Single(arr)) => arr.mapv(f64::from),
        _ => {
            return Err(ConversionError::WrongType {
                record,
                field: field.to_string(),
                category,
                found: value.kind(),
            });
        }
    };
    to_matrix(record, field, widened)
}

/// Double array of any dimensionality, used for the 3-D bootstrap
/// distribution.
fn take_dyn(map: &Map, record: &'static str, field: &'static str) -> ConversionResult<ArrayD<f64>> {
    let value = get(map, record, field)?;
    match value {
        EngineValue::Double(arr) => Ok(arr.clone()),
        other => Err(ConversionError::WrongType {
            record,
            field: field.to_string(),
            category: Category::DoubleArray,
            found: other.kind(),
        }),
    }
}

/// 1-D double vector; a degenerate 2-D row or column is flattened.
fn take_vector(
    map: &Map, record: &'static str, field: &'static str,
) -> ConversionResult<Array1<f64>> {
    let arr = take_dyn(map, record, field)?;
    let shape = arr.shape().to_vec();
    match shape.as_slice() {
        [_] | [1, _] | [_, 1] => Ok(Array1::from_iter(arr.iter().copied())),
        _ => Err(ConversionError::WrongShape {
            record,
            field: field.to_string(),
            expected: "1-D vector",
            found: shape,
        }),
    }
}

/// Double-coded integer index matrix.
fn take_index_matrix(
    map: &Map, record: &'static str, field: &'static str,
) -> ConversionResult<Array2<i64>> {
    let raw = take_dyn(map, record, field)?;
    let matrix = to_matrix(record, field, raw)?;
    let mut out = Array2::zeros(matrix.raw_dim());
    for (slot, &v) in out.iter_mut().zip(matrix.iter()) {
        *slot = integral(record, field, v)?;
    }
    Ok(out)
}

/// Double-coded integer vector (`num_subj_lst`).
fn take_index_vector(
    map: &Map, record: &'static str, field: &'static str,
) -> ConversionResult<Vec<i64>> {
    take_vector(map, record, field)?
        .iter()
        .map(|&v| integral(record, field, v))
        .collect()
}

/// One-element cell wrapping a numeric matrix; unwraps one level.
fn take_cell_matrix(
    map: &Map, record: &'static str, field: &'static str,
) -> ConversionResult<Array2<f64>> {
    let value = get(map, record, field)?;
    let items = value.as_cell().ok_or_else(|| ConversionError::WrongType {
        record,
        field: field.to_string(),
        category: Category::CellArray,
        found: value.kind(),
    })?;
    let inner = match items {
        [only] => only,
        _ => {
            return Err(ConversionError::WrongShape {
                record,
                field: field.to_string(),
                expected: "one-element cell",
                found: vec![items.len()],
            });
        }
    };
    let widened = match inner {
        EngineValue::Double(arr) => arr.clone(),
        EngineValue::Single(arr) => arr.mapv(f64::from),
        other => {
            return Err(ConversionError::WrongType {
                record,
                field: field.to_string(),
                category: Category::CellArray,
                found: other.kind(),
            });
        }
    };
    to_matrix(record, field, widened)
}

/// Convert the engine's `perm_result` struct.
pub fn decode_perm_result(value: &EngineValue) -> ConversionResult<PermResult> {
    let map = struct_map(RECORD_PERM, value)?;
    check_completeness(RECORD_PERM, PERM_RESULT_FIELDS, map)?;
    Ok(PermResult {
        num_perm: take_i64(map, RECORD_PERM, "num_perm")?,
        is_perm_splithalf: take_bool(map, RECORD_PERM, "is_perm_splithalf")?,
        sp: take_matrix(map, RECORD_PERM, "sp", Category::DoubleArray)?,
        sprob: take_matrix(map, RECORD_PERM, "sprob", Category::DoubleArray)?,
        persamp: take_matrix(map, RECORD_PERM, "persamp", Category::DoubleArray)?,
    })
}

/// Convert the engine's `perm_splithalf` struct.
pub fn decode_splithalf(value: &EngineValue) -> ConversionResult<SplitHalfResult> {
    let map = struct_map(RECORD_SPLITHALF, value)?;
    check_completeness(RECORD_SPLITHALF, SPLITHALF_FIELDS, map)?;
    Ok(SplitHalfResult {
        num_outer_perm: take_i64(map, RECORD_SPLITHALF, "num_outer_perm")?,
        num_split: take_i64(map, RECORD_SPLITHALF, "num_split")?,
        orig_ucorr: take_matrix(map, RECORD_SPLITHALF, "orig_ucorr", Category::DoubleArray)?,
        orig_vcorr: take_matrix(map, RECORD_SPLITHALF, "orig_vcorr", Category::DoubleArray)?,
        ucorr_prob: take_matrix(map, RECORD_SPLITHALF, "ucorr_prob", Category::DoubleArray)?,
        vcorr_prob: take_matrix(map, RECORD_SPLITHALF, "vcorr_prob", Category::DoubleArray)?,
        ucorr_ul: take_matrix(map, RECORD_SPLITHALF, "ucorr_ul", Category::DoubleArray)?,
        ucorr_ll: take_matrix(map, RECORD_SPLITHALF, "ucorr_ll", Category::DoubleArray)?,
        vcorr_ul: take_matrix(map, RECORD_SPLITHALF, "vcorr_ul", Category::DoubleArray)?,
        vcorr_ll: take_matrix(map, RECORD_SPLITHALF, "vcorr_ll", Category::DoubleArray)?,
    })
}

/// Convert the engine's `boot_result` struct.
pub fn decode_boot_result(value: &EngineValue) -> ConversionResult<BootResult> {
    let map = struct_map(RECORD_BOOT, value)?;
    check_completeness(RECORD_BOOT, BOOT_RESULT_FIELDS, map)?;
    Ok(BootResult {
        num_boot: take_i64(map, RECORD_BOOT, "num_boot")?,
        countnewtotal: take_i64(map, RECORD_BOOT, "countnewtotal")?,
        nonrotated_boot: take_bool(map, RECORD_BOOT, "nonrotated_boot")?,
        clim: take_f64(map, RECORD_BOOT, "clim")?,
        boot_type: take_string(map, RECORD_BOOT, "boot_type")?,
        num_lowvariability_behav_boots: take_vector(
            map,
            RECORD_BOOT,
            "num_LowVariability_behav_boots",
        )?,
        ulcorr: take_matrix(map, RECORD_BOOT, "ulcorr", Category::DoubleArray)?,
        llcorr: take_matrix(map, RECORD_BOOT, "llcorr", Category::DoubleArray)?,
        ulcorr_adj: take_matrix(map, RECORD_BOOT, "ulcorr_adj", Category::DoubleArray)?,
        llcorr_adj: take_matrix(map, RECORD_BOOT, "llcorr_adj", Category::DoubleArray)?,
        badbeh: take_matrix(map, RECORD_BOOT, "badbeh", Category::DoubleArray)?,
        prop: take_matrix(map, RECORD_BOOT, "prop", Category::DoubleArray)?,
        distrib: take_dyn(map, RECORD_BOOT, "distrib")?,
        bootsamp: take_index_matrix(map, RECORD_BOOT, "bootsamp")?,
        bootsamp_4beh: take_index_matrix(map, RECORD_BOOT, "bootsamp_4beh")?,
        orig_corr: take_matrix(map, RECORD_BOOT, "orig_corr", Category::SingleArray)?,
        compare_u: take_matrix(map, RECORD_BOOT, "compare_u", Category::SingleArray)?,
        u_se: take_matrix(map, RECORD_BOOT, "u_se", Category::SingleArray)?,
    })
}

/// Convert the engine's `other_input` struct.
pub fn decode_other_input(value: &EngineValue) -> ConversionResult<OtherInput> {
    let map = struct_map(RECORD_OTHER_INPUT, value)?;
    check_completeness(RECORD_OTHER_INPUT, OTHER_INPUT_FIELDS, map)?;
    Ok(OtherInput {
        meancentering_type: take_truthy(map, RECORD_OTHER_INPUT, "meancentering_type")?,
        cormode: take_truthy(map, RECORD_OTHER_INPUT, "cormode")?,
    })
}

/// decode_result — convert a full engine analysis struct to host form.
///
/// Purpose
/// -------
/// The to-host direction of the codec: given the struct returned by the
/// analysis adapter (or the load adapter), produce a fully typed
/// [`AnalysisResult`] or fail with a [`ConversionError`] naming the first
/// field whose value did not fit its category.
///
/// Errors
/// ------
/// - `NotAStruct` when the reply is not a struct at all.
/// - `UnknownField` / `MissingField` when the struct does not match the
///   top-level category table exactly.
/// - Any field-level error from the category converters.
pub fn decode_result(value: &EngineValue) -> ConversionResult<AnalysisResult> {
    let map = struct_map(RECORD_RESULT, value)?;
    check_completeness(RECORD_RESULT, RESULT_FIELDS, map)?;

    let perm_result = match map.get("perm_result") {
        Some(v) => Some(decode_perm_result(v)?),
        None => None,
    };
    let perm_splithalf = match map.get("perm_splithalf") {
        Some(v) => Some(decode_splithalf(v)?),
        None => None,
    };
    let boot_result = match map.get("boot_result") {
        Some(v) => Some(decode_boot_result(v)?),
        None => None,
    };

    Ok(AnalysisResult {
        method: take_i64(map, RECORD_RESULT, "method")?,
        is_struct: take_bool(map, RECORD_RESULT, "is_struct")?,
        num_conditions: take_i64(map, RECORD_RESULT, "num_conditions")?,
        num_subj_lst: take_index_vector(map, RECORD_RESULT, "num_subj_lst")?,
        u: take_matrix(map, RECORD_RESULT, "u", Category::SingleArray)?,
        s: take_matrix(map, RECORD_RESULT, "s", Category::SingleArray)?,
        v: take_matrix(map, RECORD_RESULT, "v", Category::SingleArray)?,
        usc: take_matrix(map, RECORD_RESULT, "usc", Category::SingleArray)?,
        vsc: take_matrix(map, RECORD_RESULT, "vsc", Category::SingleArray)?,
        lvcorrs: take_matrix(map, RECORD_RESULT, "lvcorrs", Category::SingleArray)?,
        stacked_behavdata: take_matrix(
            map,
            RECORD_RESULT,
            "stacked_behavdata",
            Category::SingleArray,
        )?,
        datamatcorrs_lst: take_cell_matrix(map, RECORD_RESULT, "datamatcorrs_lst")?,
        perm_result,
        perm_splithalf,
        boot_result,
        other_input: decode_other_input(get(map, RECORD_RESULT, "other_input")?)?,
    })
}

#[cfg(test)]
mod tests {
    use ndarray::{arr1, arr2};

    use super::*;
    use crate::codec::fields::FieldSpec;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Happy-path conversion for every category through the sub-record
    //   decoders.
    // - The fail-fast contracts: non-0/1 boolean floats, fractional counts,
    //   precision mismatches, and wrong shapes.
    // - The one-element cell unwrap and the degenerate-2-D vector rule.
    //
    // They intentionally DO NOT cover:
    // - The full top-level fixture, which the encode round-trip tests and
    //   the bridge integration tests exercise.
    // -------------------------------------------------------------------------

    fn perm_struct(num_perm: f64, splithalf: f64) -> EngineValue {
        let mut map = Map::new();
        map.insert("num_perm".to_string(), EngineValue::scalar(num_perm));
        map.insert("is_perm_splithalf".to_string(), EngineValue::scalar(splithalf));
        map.insert("sp".to_string(), EngineValue::Double(arr2(&[[1.5], [0.5]]).into_dyn()));
        map.insert("sprob".to_string(), EngineValue::Double(arr2(&[[0.02], [0.4]]).into_dyn()));
        map.insert(
            "persamp".to_string(),
            EngineValue::Double(arr2(&[[1.0, 2.0], [2.0, 1.0]]).into_dyn()),
        );
        EngineValue::Struct(map)
    }

    #[test]
    // Purpose
    // -------
    // Verify that a well-formed `perm_result` struct decodes with the
    // documented host types: int count, boolean flag, f64 matrices.
    //
    // Given
    // -----
    // - A struct with num_perm = 100.0 and is_perm_splithalf = 0.0.
    //
    // Expect
    // ------
    // - `num_perm == 100` as i64, `is_perm_splithalf == false`, and the
    //   matrices preserved element-for-element.
    fn perm_result_decodes_counts_flags_and_matrices() {
        // Arrange
        let value = perm_struct(100.0, 0.0);

        // Act
        let decoded = decode_perm_result(&value).expect("decoding should succeed");

        // Assert
        assert_eq!(decoded.num_perm, 100);
        assert!(!decoded.is_perm_splithalf);
        assert_eq!(decoded.sp, arr2(&[[1.5], [0.5]]));
        assert_eq!(decoded.persamp.dim(), (2, 2));
    }

    #[test]
    // Purpose
    // -------
    // Verify the boolean-float invariant: a flag value other than 0.0/1.0
    // is an explicit error, never a silent coercion.
    //
    // Given
    // -----
    // - A `perm_result` struct whose is_perm_splithalf is 2.0.
    //
    // Expect
    // ------
    // - `NonBooleanFlag` naming the field and carrying 2.0.
    fn non_boolean_flag_fails_fast() {
        // Arrange
        let value = perm_struct(100.0, 2.0);

        // Act
        let err = decode_perm_result(&value).expect_err("2.0 is not a boolean encoding");

        // Assert
        assert_eq!(
            err,
            ConversionError::NonBooleanFlag {
                record: RECORD_PERM,
                field: "is_perm_splithalf".to_string(),
                value: 2.0,
            }
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify that integer-coded scalars reject fractional values instead of
    // truncating them.
    //
    // Given
    // -----
    // - A `perm_result` struct whose num_perm is 99.5.
    //
    // Expect
    // ------
    // - `NonIntegralCount` carrying 99.5.
    fn fractional_count_fails_fast() {
        // Arrange
        let value = perm_struct(99.5, 0.0);

        // Act
        let err = decode_perm_result(&value).expect_err("99.5 is not a whole count");

        // Assert
        assert_eq!(
            err,
            ConversionError::NonIntegralCount {
                record: RECORD_PERM,
                field: "num_perm".to_string(),
                value: 99.5,
            }
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify that a single-precision field rejects a double-precision value,
    // since the two array categories are kept distinct.
    //
    // Given
    // -----
    // - An `other`-style struct where `orig_corr` (SingleArray) holds a
    //   Double value.
    //
    // Expect
    // ------
    // - `WrongType` with the SingleArray category and "double" as found.
    fn single_category_rejects_double_value() {
        // Arrange
        let mut map = Map::new();
        map.insert("orig_corr".to_string(), EngineValue::Double(arr2(&[[0.5]]).into_dyn()));

        // Act
        let err = take_matrix(&map, RECORD_BOOT, "orig_corr", Category::SingleArray)
            .expect_err("double value should not satisfy a single-precision field");

        // Assert
        assert_eq!(
            err,
            ConversionError::WrongType {
                record: RECORD_BOOT,
                field: "orig_corr".to_string(),
                category: Category::SingleArray,
                found: "double",
            }
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify shape preservation: a 2-D single-precision matrix decodes to a
    // host matrix with identical row/column counts and widened elements.
    //
    // Given
    // -----
    // - A 2×3 single-precision array.
    //
    // Expect
    // ------
    // - A 2×3 `Array2<f64>` with the same elements.
    fn single_matrix_widens_and_preserves_shape() {
        // Arrange
        let mut map = Map::new();
        map.insert(
            "u".to_string(),
            EngineValue::Single(arr2(&[[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]]).into_dyn()),
        );

        // Act
        let matrix = take_matrix(&map, RECORD_RESULT, "u", Category::SingleArray)
            .expect("decoding should succeed");

        // Assert
        assert_eq!(matrix.dim(), (2, 3));
        assert_eq!(matrix[[1, 2]], 6.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify the cell-unwrap rule for `datamatcorrs_lst`: exactly one level
    // of cell nesting is removed, and multi-element cells are rejected.
    //
    // Given
    // -----
    // - A one-element cell holding a 1×2 single matrix, and a two-element
    //   cell.
    //
    // Expect
    // ------
    // - The former decodes to the inner matrix; the latter is `WrongShape`.
    fn cell_field_unwraps_exactly_one_level() {
        // Arrange
        let inner = EngineValue::Single(arr2(&[[0.25f32, 0.75]]).into_dyn());
        let mut good = Map::new();
        good.insert("datamatcorrs_lst".to_string(), EngineValue::Cell(vec![inner.clone()]));
        let mut bad = Map::new();
        bad.insert(
            "datamatcorrs_lst".to_string(),
            EngineValue::Cell(vec![inner.clone(), inner]),
        );

        // Act
        let matrix = take_cell_matrix(&good, RECORD_RESULT, "datamatcorrs_lst")
            .expect("one-element cell should decode");
        let err = take_cell_matrix(&bad, RECORD_RESULT, "datamatcorrs_lst")
            .expect_err("two-element cell should be rejected");

        // Assert
        assert_eq!(matrix, arr2(&[[0.25, 0.75]]));
        assert!(matches!(err, ConversionError::WrongShape { found, .. } if found == vec![2]));
    }

    #[test]
    // Purpose
    // -------
    // Verify that vector-shaped fields accept both 1-D arrays and
    // degenerate 2-D rows, flattening the latter.
    //
    // Given
    // -----
    // - `num_subj_lst` as a 1×2 row `[10.0, 12.0]` and as a 1-D array.
    //
    // Expect
    // ------
    // - Both decode to `[10, 12]`.
    fn index_vectors_accept_rows_and_flat_arrays() {
        // Arrange
        let mut as_row = Map::new();
        as_row.insert(
            "num_subj_lst".to_string(),
            EngineValue::Double(arr2(&[[10.0, 12.0]]).into_dyn()),
        );
        let mut as_flat = Map::new();
        as_flat.insert(
            "num_subj_lst".to_string(),
            EngineValue::Double(arr1(&[10.0, 12.0]).into_dyn()),
        );

        // Act
        let from_row = take_index_vector(&as_row, RECORD_RESULT, "num_subj_lst")
            .expect("row vector should decode");
        let from_flat = take_index_vector(&as_flat, RECORD_RESULT, "num_subj_lst")
            .expect("flat vector should decode");

        // Assert
        assert_eq!(from_row, vec![10, 12]);
        assert_eq!(from_flat, vec![10, 12]);
    }

    #[test]
    // Purpose
    // -------
    // Verify that index matrices reject fractional resample indices.
    //
    // Given
    // -----
    // - A `bootsamp` matrix containing 2.5.
    //
    // Expect
    // ------
    // - `NonIntegralCount` carrying 2.5.
    fn index_matrix_rejects_fractional_entries() {
        // Arrange
        let mut map = Map::new();
        map.insert(
            "bootsamp".to_string(),
            EngineValue::Double(arr2(&[[1.0, 2.5]]).into_dyn()),
        );

        // Act
        let err = take_index_matrix(&map, RECORD_BOOT, "bootsamp")
            .expect_err("fractional index should be rejected");

        // Assert
        assert!(matches!(err, ConversionError::NonIntegralCount { value, .. } if value == 2.5));
    }

    #[test]
    // Purpose
    // -------
    // Verify that `other_input` decodes its numeric flags to booleans, the
    // contract the end-to-end scenario relies on (cormode 0 → false).
    //
    // Given
    // -----
    // - An `other_input` struct with meancentering_type = 1.0, cormode = 0.0.
    //
    // Expect
    // ------
    // - `meancentering_type == true`, `cormode == false`.
    fn other_input_flags_become_booleans() {
        // Arrange
        let mut map = Map::new();
        map.insert("meancentering_type".to_string(), EngineValue::scalar(1.0));
        map.insert("cormode".to_string(), EngineValue::scalar(0.0));
        let value = EngineValue::Struct(map);

        // Act
        let decoded = decode_other_input(&value).expect("decoding should succeed");

        // Assert
        assert!(decoded.meancentering_type);
        assert!(!decoded.cormode);
    }

    fn table_for(name: &str) -> &'static [FieldSpec] {
        match name {
            "perm_result" => PERM_RESULT_FIELDS,
            "perm_splithalf" => SPLITHALF_FIELDS,
            "boot_result" => BOOT_RESULT_FIELDS,
            "other_input" => OTHER_INPUT_FIELDS,
            other => panic!("sub-record {other} has no category table"),
        }
    }

    /// The simplest engine value admissible under a table entry's category,
    /// shaped to satisfy the strictest converter that category feeds
    /// (vectors and matrices both accept a 1×2 row).
    fn value_for(entry: &FieldSpec) -> EngineValue {
        match entry.category {
            Category::IntScalar => EngineValue::scalar(2.0),
            Category::BoolScalar => EngineValue::scalar(1.0),
            Category::TruthyScalar => EngineValue::scalar(2.0),
            Category::FloatScalar => EngineValue::scalar(95.0),
            Category::StrScalar => EngineValue::Str("strat".to_string()),
            Category::DoubleArray => EngineValue::Double(arr2(&[[1.0, 2.0]]).into_dyn()),
            Category::SingleArray => {
                EngineValue::Single(arr2(&[[1.0f32, 2.0]]).into_dyn())
            }
            Category::IndexArray => EngineValue::Double(arr2(&[[1.0, 2.0]]).into_dyn()),
            Category::CellArray => {
                EngineValue::Cell(vec![EngineValue::Single(arr2(&[[1.0f32, 2.0]]).into_dyn())])
            }
            Category::SubStruct => synthesize(table_for(entry.name)),
        }
    }

    fn synthesize(table: &'static [FieldSpec]) -> EngineValue {
        EngineValue::Struct(
            table.iter().map(|entry| (entry.name.to_string(), value_for(entry))).collect(),
        )
    }

    #[test]
    // Purpose
    // -------
    // Verify that the category tables and the field converters agree: a
    // struct synthesized purely from each entry's declared category must
    // decode, so a table entry whose converter drifts (say, an index field
    // decoded as a string) breaks here rather than silently.
    //
    // Given
    // -----
    // - A full result struct generated from `RESULT_FIELDS`, recursing into
    //   every sub-record table.
    //
    // Expect
    // ------
    // - `decode_result` succeeds, and spot checks confirm category-faithful
    //   conversion (indices as integers, echoed codes as truthy flags).
    fn table_categories_agree_with_their_converters() {
        // Arrange
        let value = synthesize(RESULT_FIELDS);

        // Act
        let decoded = decode_result(&value).expect("table-synthesized struct should decode");

        // Assert
        assert_eq!(decoded.num_subj_lst, vec![1, 2]);
        assert_eq!(
            decoded.boot_result.expect("boot_result synthesized").bootsamp,
            arr2(&[[1, 2]])
        );
        assert!(decoded.other_input.meancentering_type);
        assert_eq!(decoded.datamatcorrs_lst, arr2(&[[1.0, 2.0]]));
    }

    #[test]
    // Purpose
    // -------
    // Verify that `other_input` accepts the numeric option codes the engine
    // echoes back: a grand-mean-centered covariance run reports
    // meancentering_type = 2.0 and cormode = 2.0, both valid request codes,
    // and both must decode rather than fail the whole result.
    //
    // Given
    // -----
    // - An `other_input` struct with both fields at 2.0.
    //
    // Expect
    // ------
    // - Successful decode with both flags true (nonzero).
    fn other_input_accepts_echoed_option_codes() {
        // Arrange
        let mut map = Map::new();
        map.insert("meancentering_type".to_string(), EngineValue::scalar(2.0));
        map.insert("cormode".to_string(), EngineValue::scalar(2.0));
        let value = EngineValue::Struct(map);

        // Act
        let decoded = decode_other_input(&value).expect("echoed codes should decode");

        // Assert
        assert!(decoded.meancentering_type);
        assert!(decoded.cormode);
    }

    #[test]
    // Purpose
    // -------
    // Verify that a non-struct value handed to a record decoder is rejected
    // with `NotAStruct` rather than a panic.
    //
    // Given
    // -----
    // - A bare scalar passed to `decode_boot_result`.
    //
    // Expect
    // ------
    // - `NotAStruct` naming the record and the observed kind.
    fn non_struct_input_is_rejected() {
        // Arrange
        let value = EngineValue::scalar(3.0);

        // Act
        let err = decode_boot_result(&value).expect_err("scalar is not a struct");

        // Assert
        assert_eq!(err, ConversionError::NotAStruct { record: RECORD_BOOT, found: "double" });
    }
}
