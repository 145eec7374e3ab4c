//! codec::errors — conversion failures between engine and host forms.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for the bidirectional codec. Every
//! failure identifies the record and field it occurred on, the conversion
//! category that was expected, and — where meaningful — the offending value,
//! so a mismatch surfaces as a descriptive error instead of a crash deep in
//! array-shape logic.
//!
//! Key behaviors
//! -------------
//! - Define [`ConversionResult`] and [`ConversionError`] as the canonical
//!   result and error types for `codec::decode` and `codec::encode`.
//! - Attach human-readable `Display` messages phrased in terms of the field
//!   contract (e.g. "boolean-coded field must be 0.0 or 1.0").
//! - Implement `From<ConversionError> for PyErr` behind the
//!   `python-bindings` feature so codec failures raise `ValueError` in
//!   Python.
//!
//! Invariants & assumptions
//! ------------------------
//! - `record` and `field` payloads are the engine-side names from the
//!   category tables in `codec::fields`, never host-side renamings.
//! - Errors are small and `Clone`; they carry shapes and scalars but never
//!   whole arrays.
//!
//! Conventions
//! -----------
//! - Fail fast: an out-of-contract value (non-0/1 boolean float, fractional
//!   count, wrongly shaped array) is an error at the field where it is
//!   observed, not a silent coercion.
//!
//! Downstream usage
//! ----------------
//! - `codec::decode` and `codec::encode` return [`ConversionResult<T>`].
//! - `bridge::errors::BridgeError` wraps this type so bridge callers see one
//!   error surface.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that each variant's `Display` message embeds its
//!   record, field, and payload.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::codec::fields::Category;

pub type ConversionResult<T> = Result<T, ConversionError>;

/// ConversionError — a field's runtime value does not fit its category.
///
/// Variants
/// --------
/// - `MissingField { record, field }`
///   A field the category table marks as required is absent from the engine
///   struct.
/// - `UnknownField { record, field }`
///   The engine struct carries a field with no entry in the record's
///   category table. Unknown fields are rejected rather than passed through.
/// - `WrongType { record, field, category, found }`
///   The value's variant does not match the category (e.g. a string where a
///   double array was declared). `found` is the observed variant name.
/// - `WrongShape { record, field, expected, found }`
///   The array has the right precision but the wrong dimensionality
///   (`expected` is a short description such as "2-D matrix").
/// - `NonBooleanFlag { record, field, value }`
///   A boolean-coded field held a float other than 0.0 or 1.0.
/// - `NonIntegralCount { record, field, value }`
///   An integer-coded scalar or index array held a fractional or non-finite
///   double.
/// - `NotAStruct { record, found }`
///   The value handed to a record decoder was not a struct at all.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionError {
    MissingField { record: &'static str, field: String },
    UnknownField { record: &'static str, field: String },
    WrongType { record: &'static str, field: String, category: Category, found: &'static str },
    WrongShape { record: &'static str, field: String, expected: &'static str, found: Vec<usize> },
    NonBooleanFlag { record: &'static str, field: String, value: f64 },
    NonIntegralCount { record: &'static str, field: String, value: f64 },
    NotAStruct { record: &'static str, found: &'static str },
}

impl std::error::Error for ConversionError {}

impl std::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionError::MissingField { record, field } => {
                write!(f, "Field '{field}' is required in '{record}' but was absent.")
            }
            ConversionError::UnknownField { record, field } => {
                write!(
                    f,
                    "Field '{field}' in '{record}' has no entry in the conversion table."
                )
            }
            ConversionError::WrongType { record, field, category, found } => {
                write!(
                    f,
                    "Field '{record}.{field}' is declared {category:?} but held a {found} value."
                )
            }
            ConversionError::WrongShape { record, field, expected, found } => {
                write!(
                    f,
                    "Field '{record}.{field}' expected a {expected}, got shape {found:?}."
                )
            }
            ConversionError::NonBooleanFlag { record, field, value } => {
                write!(
                    f,
                    "Boolean-coded field '{record}.{field}' must be 0.0 or 1.0, got {value}."
                )
            }
            ConversionError::NonIntegralCount { record, field, value } => {
                write!(
                    f,
                    "Integer-coded field '{record}.{field}' must be a whole number, got {value}."
                )
            }
            ConversionError::NotAStruct { record, found } => {
                write!(f, "Expected a struct for '{record}', got a {found} value.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<ConversionError> for PyErr {
    fn from(err: ConversionError) -> PyErr {
        PyValueError::new_err(format!("ConversionError: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `Display` formatting for each ConversionError variant.
    // - Embedding of record, field, and payload values into messages.
    //
    // They intentionally DO NOT cover:
    // - The `From<ConversionError> for PyErr` conversion, which requires the
    //   Python C API and is exercised by Python-level tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `NonBooleanFlag` names the record, field, and offending
    // value in its message.
    //
    // Given
    // -----
    // - A `NonBooleanFlag` for `boot_result.nonrotated_boot` with value 2.5.
    //
    // Expect
    // ------
    // - The message contains the record, the field, and "2.5".
    fn non_boolean_flag_message_names_field_and_value() {
        // Arrange
        let err = ConversionError::NonBooleanFlag {
            record: "boot_result",
            field: "nonrotated_boot".to_string(),
            value: 2.5,
        };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("boot_result"), "missing record in: {msg}");
        assert!(msg.contains("nonrotated_boot"), "missing field in: {msg}");
        assert!(msg.contains("2.5"), "missing value in: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `WrongShape` reports both the expectation and the
    // observed shape.
    //
    // Given
    // -----
    // - A `WrongShape` expecting a 2-D matrix but observing `[3]`.
    //
    // Expect
    // ------
    // - The message contains "2-D matrix" and "[3]".
    fn wrong_shape_message_reports_expected_and_found() {
        // Arrange
        let err = ConversionError::WrongShape {
            record: "result",
            field: "u".to_string(),
            expected: "2-D matrix",
            found: vec![3],
        };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("2-D matrix"), "missing expectation in: {msg}");
        assert!(msg.contains("[3]"), "missing observed shape in: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `MissingField` and `UnknownField` both name the record
    // and field, since these are the completeness-check errors.
    //
    // Given
    // -----
    // - A missing `sprob` and an unknown `mystery` on `perm_result`.
    //
    // Expect
    // ------
    // - Each message contains the record and field names.
    fn completeness_errors_name_record_and_field() {
        // Arrange
        let missing = ConversionError::MissingField {
            record: "perm_result",
            field: "sprob".to_string(),
        };
        let unknown = ConversionError::UnknownField {
            record: "perm_result",
            field: "mystery".to_string(),
        };

        // Act + Assert
        for (err, field) in [(missing, "sprob"), (unknown, "mystery")] {
            let msg = err.to_string();
            assert!(msg.contains("perm_result"), "missing record in: {msg}");
            assert!(msg.contains(field), "missing field in: {msg}");
        }
    }
}
