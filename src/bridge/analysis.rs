//! bridge::analysis — the three public engine operations.
//!
//! Purpose
//! -------
//! Drive one engine session through the documented operations: run a
//! behavioural-PLS analysis, load a persisted model, and save one. Each
//! operation is a straight line — validate, materialize the adapter script,
//! one remote call, convert — with every failure surfaced synchronously and
//! nothing retried.
//!
//! Key behaviors
//! -------------
//! - [`PLSBridge`] is generic over [`EngineSession`], so the same operation
//!   code runs against the process transport and against scripted test
//!   sessions.
//! - `run_analysis` seeds the engine RNG before the call: with the request's
//!   seed when given, otherwise with a fresh draw from the host RNG — so
//!   permutation/bootstrap runs are reproducible exactly when the caller
//!   supplies a seed.
//! - Adapter scripts are scoped per call; their directory is put on the
//!   engine path first. With `make_script = false` the caller guarantees a
//!   pre-installed equivalent and no file is written.
//! - `save_model` places the encoded result under the fixed workspace name
//!   `result_pls` and invokes the engine persistence primitive on it.
//!
//! Invariants & assumptions
//! ------------------------
//! - Operations block until the engine replies; long permutation/bootstrap
//!   runs hold the caller for their full duration.
//! - A run either fully completes with a converted result or fails before
//!   any result is produced.
//!
//! Testing notes
//! -------------
//! - The end-to-end behavior is covered by `tests/integration_pls_bridge.rs`
//!   against a scripted session; unit tests here cover the config defaults
//!   and the host-side load precondition.
use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::info;

use crate::{
    bridge::{
        errors::{BridgeError, BridgeResult},
        script::{ANALYSIS_FN, AdapterScript, LOAD_FN, ScriptKind},
        session::{EngineSession, ProcessSession, SessionConfig},
    },
    codec::{
        decode::decode_result,
        encode::{encode_request, encode_result},
        result::AnalysisResult,
        value::EngineValue,
    },
    request::data::AnalysisRequest,
};

/// Fixed engine workspace name used by `save_model`.
pub const WORKSPACE_VAR: &str = "result_pls";

/// BridgeConfig — per-bridge behavior knobs.
///
/// Fields
/// ------
/// - `make_script`: materialize the adapter scripts per call (default).
///   When `false`, the caller must have equivalents on the engine path.
/// - `script_dir`: directory to write scripts into; `None` uses a fresh
///   temporary directory per call, removed with the call.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeConfig {
    pub make_script: bool,
    pub script_dir: Option<PathBuf>,
}

impl BridgeConfig {
    /// The default configuration: per-call scripts in temporary
    /// directories.
    pub fn new() -> BridgeConfig {
        BridgeConfig { make_script: true, script_dir: None }
    }
}

impl Default for BridgeConfig {
    fn default() -> BridgeConfig {
        BridgeConfig::new()
    }
}

/// PLSBridge — one engine session plus the operation surface.
///
/// Construct with [`PLSBridge::connect`] for the process transport or
/// [`PLSBridge::with_session`] for any other [`EngineSession`].
pub struct PLSBridge<S: EngineSession> {
    session: S,
    config: BridgeConfig,
}

impl PLSBridge<ProcessSession> {
    /// Start an engine process session and wrap it with the default
    /// configuration.
    pub fn connect(session_config: &SessionConfig) -> BridgeResult<PLSBridge<ProcessSession>> {
        let session = ProcessSession::start(session_config)?;
        Ok(PLSBridge::with_session(session, BridgeConfig::new()))
    }
}

impl<S: EngineSession> PLSBridge<S> {
    /// Wrap an existing session.
    pub fn with_session(session: S, config: BridgeConfig) -> PLSBridge<S> {
        PLSBridge { session, config }
    }

    fn scoped_script(&mut self, kind: ScriptKind) -> BridgeResult<Option<AdapterScript>> {
        if !self.config.make_script {
            return Ok(None);
        }
        let script = AdapterScript::materialize(kind, self.config.script_dir.as_deref())?;
        self.session
            .eval(&format!("addpath('{}')", script.dir().display()))?;
        Ok(Some(script))
    }

    /// run_analysis — invoke the remote behavioural-PLS analysis.
    ///
    /// Seeds the engine RNG (request seed or a fresh host draw), makes the
    /// one remote call through the analysis adapter, and converts the reply.
    ///
    /// Errors
    /// ------
    /// - `ScriptIo` if the adapter cannot be materialized.
    /// - `RemoteCall` verbatim if the engine raises; no retry.
    /// - `Conversion` if the reply does not fit the category tables.
    pub fn run_analysis(&mut self, request: &AnalysisRequest) -> BridgeResult<AnalysisResult> {
        let _script = self.scoped_script(ScriptKind::Analysis)?;

        let seed = request.options.seed.unwrap_or_else(|| rand::rng().random());
        self.session.eval(&format!("rng({seed})"))?;

        info!(
            groups = request.datamat_lst.len(),
            num_perm = request.options.num_perm,
            num_boot = request.options.num_boot,
            "running behavioural PLS analysis"
        );
        let args = encode_request(request);
        let raw = self.session.feval(ANALYSIS_FN, &args)?;
        Ok(decode_result(&raw)?)
    }

    /// load_model — load a persisted model file through the load adapter.
    ///
    /// The adapter unwraps the file's single top-level struct and strips the
    /// incompatible field; the reply is converted like an analysis result.
    ///
    /// Errors
    /// ------
    /// - `ModelNotFound` if `path` does not exist on the host.
    /// - `RemoteCall` verbatim for engine-side load failures (including a
    ///   file without exactly one top-level struct).
    pub fn load_model(&mut self, path: &Path) -> BridgeResult<AnalysisResult> {
        if !path.exists() {
            return Err(BridgeError::ModelNotFound { path: path.to_path_buf() });
        }
        let _script = self.scoped_script(ScriptKind::Load)?;

        info!(path = %path.display(), "loading persisted model");
        let arg = EngineValue::Str(path.display().to_string());
        let raw = self.session.feval(LOAD_FN, &[arg])?;
        Ok(decode_result(&raw)?)
    }

    /// save_model — persist a result through the engine.
    ///
    /// Encodes the result to engine form, places it under the fixed
    /// workspace name, and invokes the engine persistence primitive. The
    /// incompatible field is never written, so a later load needs no
    /// stripping.
    pub fn save_model(&mut self, path: &Path, result: &AnalysisResult) -> BridgeResult<()> {
        info!(path = %path.display(), "saving model");
        let value = encode_result(result);
        self.session.put_variable(WORKSPACE_VAR, &value)?;
        self.session
            .eval(&format!("save('{}', '{}')", path.display(), WORKSPACE_VAR))
    }
}
