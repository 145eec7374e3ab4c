//! bridge::errors — the bridge-level error surface.
//!
//! Purpose
//! -------
//! Provide the single error enum bridge callers see. It wraps the codec and
//! request errors and adds the session-lifecycle failures: the engine not
//! starting, a remote call raising, the transport breaking, the adapter
//! script failing to materialize, and a model path not existing.
//!
//! Key behaviors
//! -------------
//! - `RemoteCall` carries the engine's error message verbatim; no retry, no
//!   partial result — a run either fully completes or fails before any
//!   result is produced.
//! - `From` impls fold [`ConversionError`] and [`RequestError`] into this
//!   type so bridge operations propagate with `?`.
//! - Behind `python-bindings`, lifecycle failures convert to `OSError` and
//!   the wrapped validation/conversion failures to `ValueError`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover `Display` payload embedding and the `From` folds.
use std::path::PathBuf;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyOSError};

use crate::{codec::errors::ConversionError, request::errors::RequestError};

pub type BridgeResult<T> = Result<T, BridgeError>;

/// BridgeError — any failure of a bridge operation.
///
/// Variants
/// --------
/// - `EngineStart { reason }`
///   The engine session could not be created; fatal, surfaced unchanged.
/// - `RemoteCall { operation, message }`
///   The remote analysis/load/save raised; `message` is the engine's text,
///   propagated verbatim.
/// - `Transport { detail }`
///   The session channel broke or produced a reply the wire format does not
///   parse.
/// - `ScriptIo { path, detail }`
///   The adapter script could not be written or its directory created.
/// - `ModelNotFound { path }`
///   `load_model` was given a path that does not exist on the host.
/// - `Conversion(ConversionError)`
///   A field of the engine reply did not fit its category.
/// - `Request(RequestError)`
///   The request violated a documented invariant before any session work.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeError {
    EngineStart { reason: String },
    RemoteCall { operation: String, message: String },
    Transport { detail: String },
    ScriptIo { path: PathBuf, detail: String },
    ModelNotFound { path: PathBuf },
    Conversion(ConversionError),
    Request(RequestError),
}

impl std::error::Error for BridgeError {}

impl std::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BridgeError::EngineStart { reason } => {
                write!(f, "Engine session could not be started: {reason}")
            }
            BridgeError::RemoteCall { operation, message } => {
                write!(f, "Remote call '{operation}' failed: {message}")
            }
            BridgeError::Transport { detail } => {
                write!(f, "Engine transport failure: {detail}")
            }
            BridgeError::ScriptIo { path, detail } => {
                write!(f, "Adapter script at {} could not be written: {detail}", path.display())
            }
            BridgeError::ModelNotFound { path } => {
                write!(f, "Model file {} does not exist.", path.display())
            }
            BridgeError::Conversion(err) => write!(f, "{err}"),
            BridgeError::Request(err) => write!(f, "{err}"),
        }
    }
}

impl From<ConversionError> for BridgeError {
    fn from(err: ConversionError) -> BridgeError {
        BridgeError::Conversion(err)
    }
}

impl From<RequestError> for BridgeError {
    fn from(err: RequestError) -> BridgeError {
        BridgeError::Request(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<BridgeError> for PyErr {
    fn from(err: BridgeError) -> PyErr {
        match err {
            BridgeError::Conversion(inner) => inner.into(),
            BridgeError::Request(inner) => inner.into(),
            other => PyOSError::new_err(format!("BridgeError: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `Display` payload embedding for the lifecycle variants.
    // - The `From` folds for conversion and request errors.
    //
    // They intentionally DO NOT cover:
    // - PyErr conversion (needs the Python C API).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `RemoteCall` keeps the engine message verbatim.
    //
    // Given
    // -----
    // - A `RemoteCall` on `pls_analysis_py` with an engine-style message.
    //
    // Expect
    // ------
    // - The message appears unmodified in the `Display` output.
    fn remote_call_preserves_engine_message_verbatim() {
        // Arrange
        let err = BridgeError::RemoteCall {
            operation: "pls_analysis_py".to_string(),
            message: "Undefined function 'pls_analysis'".to_string(),
        };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("pls_analysis_py"), "missing operation in: {msg}");
        assert!(msg.contains("Undefined function 'pls_analysis'"), "message altered in: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that the wrapped error kinds fold in through `From` and keep
    // their own messages.
    //
    // Given
    // -----
    // - A `RequestError::ZeroConditions` and a conversion `NotAStruct`.
    //
    // Expect
    // ------
    // - Each folds into the matching `BridgeError` variant with an equal
    //   `Display` output.
    fn wrapped_errors_fold_through_from() {
        // Arrange
        let request_err = RequestError::ZeroConditions;
        let conversion_err = ConversionError::NotAStruct { record: "result", found: "string" };

        // Act
        let bridged_request: BridgeError = request_err.clone().into();
        let bridged_conversion: BridgeError = conversion_err.clone().into();

        // Assert
        assert_eq!(bridged_request, BridgeError::Request(request_err.clone()));
        assert_eq!(bridged_conversion, BridgeError::Conversion(conversion_err.clone()));
        assert_eq!(bridged_request.to_string(), request_err.to_string());
        assert_eq!(bridged_conversion.to_string(), conversion_err.to_string());
    }

    #[test]
    // Purpose
    // -------
    // Verify that `ModelNotFound` and `ScriptIo` name their paths.
    //
    // Given
    // -----
    // - Errors over a `/tmp/model.mat` path.
    //
    // Expect
    // ------
    // - Both messages contain the path.
    fn path_carrying_variants_name_their_paths() {
        // Arrange
        let path = PathBuf::from("/tmp/model.mat");
        let not_found = BridgeError::ModelNotFound { path: path.clone() };
        let script = BridgeError::ScriptIo { path: path.clone(), detail: "denied".to_string() };

        // Act + Assert
        assert!(not_found.to_string().contains("model.mat"));
        assert!(script.to_string().contains("model.mat"));
        assert!(script.to_string().contains("denied"));
    }
}
