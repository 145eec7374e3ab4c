//! codec::value — the engine's native value model.
//!
//! Purpose
//! -------
//! Model the closed set of value shapes the external PLS engine exchanges
//! with the host: double- and single-precision numeric arrays, character
//! strings, cell arrays, and named structs. Every argument sent to the engine
//! and every result received from it is an [`EngineValue`] tree; the codec
//! modules translate between these trees and the typed host records.
//!
//! Key behaviors
//! -------------
//! - Represent numeric data as dynamic-dimension `ndarray` arrays so that
//!   scalars (zero-dimensional), vectors, matrices, and the 3-D bootstrap
//!   distribution all fit one variant per precision.
//! - Provide cheap shape-probing accessors (`as_struct`, `as_scalar_f64`,
//!   `as_str`, `as_cell`) used by the decoder's category dispatch.
//! - Serialize/deserialize via serde so that [`EngineValue`] doubles as the
//!   session wire format (see `bridge::session`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Engine scalars are zero-dimensional or one-element arrays; the accessors
//!   treat both identically.
//! - Struct keys are engine field names and are kept verbatim; no renaming
//!   happens at this layer.
//!
//! Conventions
//! -----------
//! - `Double` carries `f64`, `Single` carries `f32`; the decoder widens
//!   singles to `f64` on the host side, and the encoder narrows per-field
//!   according to the category tables in `codec::fields`.
//!
//! Downstream usage
//! ----------------
//! - `codec::decode` consumes [`EngineValue`] trees returned by the engine.
//! - `codec::encode` produces them from [`crate::codec::result::AnalysisResult`]
//!   and [`crate::request::data::AnalysisRequest`].
//! - `bridge::session` ships them over the process boundary as JSON.
//!
//! Testing notes
//! -------------
//! - Unit tests cover scalar construction/extraction, the one-element scalar
//!   rule, and JSON round-trips of a nested struct.
use std::collections::BTreeMap;

use ndarray::{ArrayD, arr0};
use serde::{Deserialize, Serialize};

/// EngineValue — one node of an engine-native value tree.
///
/// Variants
/// --------
/// - `Double(ArrayD<f64>)`
///   Double-precision numeric array of any dimensionality. Engine scalars
///   (counts, flags, `clim`) arrive as zero-dimensional or one-element
///   doubles.
/// - `Single(ArrayD<f32>)`
///   Single-precision numeric array; the engine stores the loading matrices
///   (`u`, `v`, `s`, …) in this precision.
/// - `Str(String)`
///   Character string, e.g. `boot_type`.
/// - `Cell(Vec<EngineValue>)`
///   Ordered heterogeneous container; used for the group-data argument and
///   the one-element `datamatcorrs_lst` wrapper.
/// - `Struct(BTreeMap<String, EngineValue>)`
///   Named record; the analysis result and its sub-records are structs.
///
/// Notes
/// -----
/// - `PartialEq` compares element-for-element, which the tests rely on for
///   exact (non-floating) round-trip checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum EngineValue {
    Double(ArrayD<f64>),
    Single(ArrayD<f32>),
    Str(String),
    Cell(Vec<EngineValue>),
    Struct(BTreeMap<String, EngineValue>),
}

impl EngineValue {
    /// Construct a zero-dimensional double scalar.
    pub fn scalar(value: f64) -> EngineValue {
        EngineValue::Double(arr0(value).into_dyn())
    }

    /// Construct a 0.0/1.0 double scalar from a host boolean.
    pub fn flag(value: bool) -> EngineValue {
        EngineValue::scalar(if value { 1.0 } else { 0.0 })
    }

    /// Short, stable name of the variant, used in conversion errors.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineValue::Double(_) => "double",
            EngineValue::Single(_) => "single",
            EngineValue::Str(_) => "string",
            EngineValue::Cell(_) => "cell",
            EngineValue::Struct(_) => "struct",
        }
    }

    /// Borrow the struct map, if this node is a struct.
    pub fn as_struct(&self) -> Option<&BTreeMap<String, EngineValue>> {
        match self {
            EngineValue::Struct(map) => Some(map),
            _ => None,
        }
    }

    /// Extract a double scalar.
    ///
    /// Zero-dimensional and one-element double arrays are both accepted;
    /// anything else (wrong variant, more than one element) yields `None`.
    pub fn as_scalar_f64(&self) -> Option<f64> {
        match self {
            EngineValue::Double(arr) if arr.len() == 1 => arr.iter().next().copied(),
            _ => None,
        }
    }

    /// Borrow the string payload, if this node is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            EngineValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Borrow the cell contents, if this node is a cell array.
    pub fn as_cell(&self) -> Option<&[EngineValue]> {
        match self {
            EngineValue::Cell(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}
