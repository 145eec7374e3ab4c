//! Session management and the public engine operations.
//!
//! Purpose
//! -------
//! Own everything on the engine side of the conversion boundary: the
//! session abstraction and its process transport ([`session`]), the
//! per-call adapter scripts ([`script`]), and the operation surface
//! ([`analysis`]). The codec stays pure; every side effect of talking to
//! the engine lives here.
//!
//! Conventions
//! -----------
//! - Engine failures are surfaced verbatim as [`errors::BridgeError::RemoteCall`];
//!   nothing is retried or rephrased.
//! - One bridge owns one session; operations take `&mut self` and block
//!   until the engine replies.
pub mod analysis;
pub mod errors;
pub mod script;
pub mod session;

pub use analysis::{BridgeConfig, PLSBridge, WORKSPACE_VAR};
pub use errors::{BridgeError, BridgeResult};
pub use script::{AdapterScript, ScriptKind};
pub use session::{EngineSession, ProcessSession, SessionConfig, ENGINE_PATH_VAR};
