//! Bidirectional, field-name-driven conversion between the engine's value
//! model and typed host records.
//!
//! Purpose
//! -------
//! House the entire Result/Argument Codec: the engine value model
//! ([`value::EngineValue`]), the closed per-record category tables
//! ([`fields`]), the typed host records ([`result`]), and the two conversion
//! directions — [`decode`] (to-host) and [`encode`] (to-engine). The codec is
//! pure: given a value and a direction it constructs a new value, with no
//! side effects.
//!
//! Downstream usage
//! ----------------
//! - `bridge` drives both directions around its remote calls.
//! - [`decode::decode_result`] and [`encode::encode_result`] are also the
//!   reusable library surface for callers holding engine values from
//!   elsewhere.
pub mod decode;
pub mod encode;
pub mod errors;
pub mod fields;
pub mod result;
pub mod value;

pub use decode::decode_result;
pub use encode::{encode_request, encode_result};
pub use errors::{ConversionError, ConversionResult};
pub use result::{AnalysisResult, BootResult, OtherInput, PermResult, SplitHalfResult};
pub use value::EngineValue;
